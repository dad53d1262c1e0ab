//! Pareto dominance over five-objective penalty vectors, and the
//! non-dominated-frontier scan built on top of it.

use std::cmp::Ordering;

use itertools::Itertools;

/// Describes Pareto dominance for arrays of penalty scores.
///
/// Every score here is a non-negative penalty whose target value is `0`, so
/// "closer to zero" is just "smaller" — unlike a general fitness score this
/// never needs to compare by absolute value.
pub trait ParetoDominance {
  /// Returns `Less` if `self` dominates `other` (every coordinate `<=`, at
  /// least one `<`), `Greater` if `other` dominates `self`, otherwise
  /// `Equal` (incomparable, or identical).
  fn dominance(&self, other: &Self) -> Ordering;
}

impl ParetoDominance for [u32] {
  fn dominance(&self, other: &Self) -> Ordering {
    let mut ord = Ordering::Equal;
    for (a, b) in self.iter().zip(other) {
      match (ord, a.cmp(b)) {
        (Ordering::Equal, next_ord) => ord = next_ord,
        (Ordering::Greater, Ordering::Less) | (Ordering::Less, Ordering::Greater) => {
          return Ordering::Equal
        }
        _ => {}
      }
    }
    ord
  }
}

/// Indices of the non-dominated entries of `scores`, in input order.
///
/// An entry survives iff no other entry dominates it. Ties (mutually
/// non-dominating, including exact duplicates) all survive. `O(n^2)`
/// pairwise scan over all unordered pairs.
pub fn nondominated_indices(scores: &[[u32; 5]]) -> Vec<usize> {
  let mut dominated = vec![false; scores.len()];
  for (i, j) in (0..scores.len()).tuple_combinations() {
    match scores[i].dominance(&scores[j]) {
      Ordering::Less => dominated[j] = true,
      Ordering::Greater => dominated[i] = true,
      Ordering::Equal => {}
    }
  }
  (0..scores.len()).filter(|&i| !dominated[i]).collect()
}
