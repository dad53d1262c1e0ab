//! The five penalty objectives and the canonical evaluation tuple they form.

use std::collections::HashSet;

use crate::{problem::Problem, solution::Solution, tables::Preference};

/// Objective names, in the fixed canonical order used everywhere an
/// [`Evaluation`] is formed, hashed, or printed.
pub const OBJECTIVE_NAMES: [&str; 5] = [
  "overallocation",
  "conflicts",
  "undersupport",
  "unwilling",
  "unpreferred",
];

/// Excess load penalty: `Σ_t max(0, assigned(t) − max_assigned[t])`.
/// Undershooting a TA's cap costs nothing.
pub fn overallocation(problem: &Problem, solution: &Solution) -> u32 {
  problem
    .tas
    .records()
    .iter()
    .enumerate()
    .map(|(t, record)| solution.assigned_count(t).saturating_sub(record.max_assigned))
    .sum()
}

/// Number of TAs with two or more assigned sections sharing a `daytime`.
/// A TA with three sections at the same slot still counts once.
pub fn conflicts(problem: &Problem, solution: &Solution) -> u32 {
  (0..problem.num_tas())
    .filter(|&t| {
      let daytimes: Vec<&str> = solution
        .sections_of(t)
        .map(|s| problem.sections.records()[s].daytime.as_str())
        .collect();
      let distinct: HashSet<&str> = daytimes.iter().copied().collect();
      distinct.len() < daytimes.len()
    })
    .count() as u32
}

/// Understaffing penalty: `Σ_s max(0, min_ta[s] − staffed(s))`.
/// Overstaffing a section costs nothing.
pub fn undersupport(problem: &Problem, solution: &Solution) -> u32 {
  problem
    .sections
    .records()
    .iter()
    .enumerate()
    .map(|(s, record)| record.min_ta.saturating_sub(solution.staffed_count(s)))
    .sum()
}

/// Count of `(t, s)` assignments where the TA marked the section `U`.
pub fn unwilling(problem: &Problem, solution: &Solution) -> u32 {
  count_assignments_with_preference(problem, solution, Preference::Unwilling)
}

/// Count of `(t, s)` assignments where the TA marked the section `W`.
/// `P` assignments are free; disjoint from [`unwilling`].
pub fn unpreferred(problem: &Problem, solution: &Solution) -> u32 {
  count_assignments_with_preference(problem, solution, Preference::Willing)
}

fn count_assignments_with_preference(
  problem: &Problem,
  solution: &Solution,
  preference: Preference,
) -> u32 {
  problem
    .tas
    .records()
    .iter()
    .enumerate()
    .map(|(t, record)| {
      solution
        .sections_of(t)
        .filter(|&s| record.preferences[s] == preference)
        .count() as u32
    })
    .sum()
}

/// The five-score vector produced by scoring a [`Solution`] against a
/// [`Problem`], in the fixed canonical order
/// `overallocation, conflicts, undersupport, unwilling, unpreferred`.
///
/// Two evaluations are equal iff all five scores are equal; this is what
/// makes `Evaluation` usable as the [`crate::population::Population`]'s key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Evaluation {
  /// `overallocation` score.
  pub overallocation: u32,
  /// `conflicts` score.
  pub conflicts: u32,
  /// `undersupport` score.
  pub undersupport: u32,
  /// `unwilling` score.
  pub unwilling: u32,
  /// `unpreferred` score.
  pub unpreferred: u32,
}

impl Evaluation {
  /// Scores `solution` against `problem` on all five objectives.
  pub fn score(problem: &Problem, solution: &Solution) -> Self {
    Evaluation {
      overallocation: overallocation(problem, solution),
      conflicts: conflicts(problem, solution),
      undersupport: undersupport(problem, solution),
      unwilling: unwilling(problem, solution),
      unpreferred: unpreferred(problem, solution),
    }
  }

  /// The scores as a plain array, in canonical order — the shape the
  /// dominance engine operates on.
  pub fn as_array(&self) -> [u32; 5] {
    [
      self.overallocation,
      self.conflicts,
      self.undersupport,
      self.unwilling,
      self.unpreferred,
    ]
  }

  /// `(name, score)` pairs in canonical order, for building a scores-table
  /// row.
  pub fn named_scores(&self) -> [(&'static str, u32); 5] {
    let scores = self.as_array();
    std::array::from_fn(|i| (OBJECTIVE_NAMES[i], scores[i]))
  }
}
