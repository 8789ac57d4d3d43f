
//! Utility functions for walking an expression tree.

use super::Expr;

/// Calls `f` on every node of the tree, children before parents.
pub fn postorder_walk<F>(expr: &Expr, mut f: F)
where F: FnMut(&Expr) {
  postorder_walk_impl(expr, &mut f);
}

fn postorder_walk_impl<F>(expr: &Expr, f: &mut F)
where F: FnMut(&Expr) {
  match expr {
    Expr::Atom(_) => {}
    Expr::Unary(_, operand) => {
      postorder_walk_impl(operand, f);
    }
    Expr::Binary(_, left, right) => {
      postorder_walk_impl(left, f);
      postorder_walk_impl(right, f);
    }
  }
  f(expr);
}

/// Returns true if any of the sub-expressions of `expr` (including
/// `expr` itself) satisfies the predicate.
pub fn any<F>(expr: &Expr, f: F) -> bool
where F: Fn(&Expr) -> bool {
  let mut result = false;
  postorder_walk(expr, |e| {
    if f(e) {
      result = true;
    }
  });
  result
}
