
use super::var::Var;

use serde::{Serialize, Deserialize};

use std::collections::HashMap;

/// The point at which trees are evaluated: a mapping from variable
/// names to values, plus the seed factors the derivative driver
/// activates one at a time.
///
/// Values and seeds are separate maps, so a user variable can never
/// collide with the driver's seed bookkeeping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Environment {
  values: HashMap<Var, f64>,
  seeds: HashMap<Var, f64>,
}

impl Environment {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn insert(&mut self, var: Var, value: f64) {
    self.values.insert(var, value);
  }

  pub fn value(&self, var: &Var) -> Option<f64> {
    self.values.get(var).copied()
  }

  pub fn contains(&self, var: &Var) -> bool {
    self.values.contains_key(var)
  }

  /// The seed factor for `var`. Seeds default to 0 until activated.
  pub fn seed(&self, var: &Var) -> f64 {
    self.seeds.get(var).copied().unwrap_or(0.0)
  }

  pub fn set_seed(&mut self, var: Var, value: f64) {
    self.seeds.insert(var, value);
  }

  /// Zeroes the seed of every variable bound in this environment.
  pub fn reset_seeds(&mut self) {
    let vars: Vec<Var> = self.values.keys().cloned().collect();
    for var in vars {
      self.seeds.insert(var, 0.0);
    }
  }

  /// The variables bound in this environment, in no particular order.
  pub fn vars(&self) -> impl Iterator<Item = &Var> {
    self.values.keys()
  }

  pub fn len(&self) -> usize {
    self.values.len()
  }

  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }
}

impl FromIterator<(Var, f64)> for Environment {
  fn from_iter<I: IntoIterator<Item = (Var, f64)>>(iter: I) -> Self {
    Self {
      values: iter.into_iter().collect(),
      seeds: HashMap::new(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn var(name: &str) -> Var {
    Var::new(name).unwrap()
  }

  #[test]
  fn test_values() {
    let mut env = Environment::new();
    assert!(env.is_empty());
    env.insert(var("x"), 3.0);
    env.insert(var("y"), -1.5);
    assert_eq!(env.len(), 2);
    assert_eq!(env.value(&var("x")), Some(3.0));
    assert_eq!(env.value(&var("y")), Some(-1.5));
    assert_eq!(env.value(&var("z")), None);
    assert!(env.contains(&var("x")));
    assert!(!env.contains(&var("z")));
  }

  #[test]
  fn test_seeds_default_to_zero() {
    let env: Environment = [(var("x"), 3.0)].into_iter().collect();
    assert_eq!(env.seed(&var("x")), 0.0);
    assert_eq!(env.seed(&var("nowhere")), 0.0);
  }

  #[test]
  fn test_seed_activation() {
    let mut env: Environment = [(var("x"), 3.0), (var("y"), 4.0)].into_iter().collect();
    env.reset_seeds();
    env.set_seed(var("y"), 1.0);
    assert_eq!(env.seed(&var("x")), 0.0);
    assert_eq!(env.seed(&var("y")), 1.0);

    env.reset_seeds();
    assert_eq!(env.seed(&var("y")), 0.0);
  }

  #[test]
  fn test_seeds_do_not_shadow_values() {
    let mut env: Environment = [(var("x"), 3.0)].into_iter().collect();
    env.set_seed(var("x"), 1.0);
    assert_eq!(env.value(&var("x")), Some(3.0));
    assert_eq!(env.seed(&var("x")), 1.0);
  }
}
