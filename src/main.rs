
use difftree::repl;

use anyhow::Context;

use std::io;

fn main() -> anyhow::Result<()> {
  let stdin = io::stdin();
  let stdout = io::stdout();
  repl::run(stdin.lock(), stdout.lock()).context("session failed")?;
  Ok(())
}
