//! The pool of candidate solutions an evolution run operates on.

use std::collections::HashMap;

use rand::{seq::SliceRandom, Rng};

use crate::{
  dominance::nondominated_indices,
  objective::Evaluation,
  problem::Problem,
  solution::Solution,
};

/// A deduplicated pool of scored [`Solution`]s for one [`Problem`].
///
/// Solutions are keyed by their [`Evaluation`]: two solutions with the same
/// five scores are interchangeable for this crate's purposes, so inserting
/// a newcomer that scores identically to an existing member replaces it
/// rather than growing the pool.
pub struct Population<'p> {
  problem: &'p Problem,
  members: HashMap<Evaluation, Solution>,
}

impl<'p> Population<'p> {
  /// An empty population over `problem`.
  pub fn new(problem: &'p Problem) -> Self {
    Population {
      problem,
      members: HashMap::new(),
    }
  }

  /// Scores `solution` and inserts it, keyed by its evaluation. Returns the
  /// evaluation it was stored under.
  pub fn insert(&mut self, solution: Solution) -> Evaluation {
    let evaluation = Evaluation::score(self.problem, &solution);
    self.members.insert(evaluation, solution);
    evaluation
  }

  /// Number of distinct evaluations currently held.
  pub fn size(&self) -> usize {
    self.members.len()
  }

  /// Whether the population holds no solutions.
  pub fn is_empty(&self) -> bool {
    self.members.is_empty()
  }

  /// All `(evaluation, solution)` pairs currently held, in arbitrary order.
  pub fn iter(&self) -> impl Iterator<Item = (&Evaluation, &Solution)> {
    self.members.iter()
  }

  /// `k` solutions drawn uniformly at random, with replacement.
  ///
  /// # Panics
  ///
  /// Panics if the population is empty — sampling from an empty population
  /// is a programming error in the caller, not a recoverable input error.
  pub fn random_sample(&self, k: usize, rng: &mut impl Rng) -> Vec<Solution> {
    let pool: Vec<&Solution> = self.members.values().collect();
    assert!(!pool.is_empty(), "cannot sample from an empty population");
    (0..k)
      .map(|_| (*pool.choose(rng).expect("pool is non-empty")).clone())
      .collect()
  }

  /// Discards every dominated member, keeping only the non-dominated
  /// frontier (ties survive).
  pub fn prune(&mut self) {
    let evaluations: Vec<Evaluation> = self.members.keys().copied().collect();
    let scores: Vec<[u32; 5]> = evaluations.iter().map(Evaluation::as_array).collect();
    let keep: std::collections::HashSet<usize> =
      nondominated_indices(&scores).into_iter().collect();
    let mut members = std::mem::take(&mut self.members);
    self.members = evaluations
      .into_iter()
      .enumerate()
      .filter(|(i, _)| keep.contains(i))
      .filter_map(|(_, eval)| members.remove(&eval).map(|sol| (eval, sol)))
      .collect();
  }
}
