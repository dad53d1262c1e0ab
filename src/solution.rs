//! The T×S 0/1 assignment matrix and its construction.

use rand::Rng;

/// A T×S assignment matrix, stored row-major. `solution[(t, s)]` is `true`
/// iff TA `t` is assigned to section `s`.
///
/// Shape is fixed at construction and every cell is always 0 or 1 by
/// construction — there is no representable invalid `Solution`. Feasibility
/// (capacity, conflicts, willingness) is not enforced here; it is only
/// scored, by the objective functions in [`crate::objective`].
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Solution {
  num_tas: usize,
  num_sections: usize,
  cells: Vec<bool>,
}

impl Solution {
  /// A `num_tas`×`num_sections` matrix with every cell unassigned.
  pub fn zeros(num_tas: usize, num_sections: usize) -> Self {
    Solution {
      num_tas,
      num_sections,
      cells: vec![false; num_tas * num_sections],
    }
  }

  /// A `num_tas`×`num_sections` matrix with every cell assigned.
  pub fn ones(num_tas: usize, num_sections: usize) -> Self {
    Solution {
      num_tas,
      num_sections,
      cells: vec![true; num_tas * num_sections],
    }
  }

  /// A `num_tas`×`num_sections` matrix with each cell assigned
  /// independently at random with probability 0.5.
  pub fn random(num_tas: usize, num_sections: usize, rng: &mut impl Rng) -> Self {
    let cells = (0..num_tas * num_sections).map(|_| rng.gen_bool(0.5)).collect();
    Solution {
      num_tas,
      num_sections,
      cells,
    }
  }

  /// `(T, S)`.
  pub fn shape(&self) -> (usize, usize) {
    (self.num_tas, self.num_sections)
  }

  fn index(&self, ta: usize, section: usize) -> usize {
    debug_assert!(ta < self.num_tas);
    debug_assert!(section < self.num_sections);
    ta * self.num_sections + section
  }

  /// Whether TA `ta` is assigned to `section`.
  pub fn get(&self, ta: usize, section: usize) -> bool {
    self.cells[self.index(ta, section)]
  }

  /// Assigns or unassigns TA `ta` to `section`.
  pub fn set(&mut self, ta: usize, section: usize, assigned: bool) {
    let idx = self.index(ta, section);
    self.cells[idx] = assigned;
  }

  /// Number of sections TA `ta` is assigned to.
  pub fn assigned_count(&self, ta: usize) -> u32 {
    (0..self.num_sections).filter(|&s| self.get(ta, s)).count() as u32
  }

  /// Number of TAs assigned to `section`.
  pub fn staffed_count(&self, section: usize) -> u32 {
    (0..self.num_tas).filter(|&t| self.get(t, section)).count() as u32
  }

  /// Section indices TA `ta` is assigned to, in section order.
  pub fn sections_of(&self, ta: usize) -> impl Iterator<Item = usize> + '_ {
    (0..self.num_sections).filter(move |&s| self.get(ta, s))
  }

  /// TA indices assigned to `section`, in TA order.
  pub fn tas_of(&self, section: usize) -> impl Iterator<Item = usize> + '_ {
    (0..self.num_tas).filter(move |&t| self.get(t, section))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rand::SeedableRng;

  #[test]
  fn test_zeros_and_ones() {
    let z = Solution::zeros(3, 4);
    assert_eq!(z.shape(), (3, 4));
    assert!((0..3).all(|t| (0..4).all(|s| !z.get(t, s))));

    let o = Solution::ones(3, 4);
    assert!((0..3).all(|t| (0..4).all(|s| o.get(t, s))));
  }

  #[test]
  fn test_get_set() {
    let mut sol = Solution::zeros(2, 2);
    assert!(!sol.get(0, 1));
    sol.set(0, 1, true);
    assert!(sol.get(0, 1));
    assert!(!sol.get(1, 1));
  }

  #[test]
  fn test_counts() {
    let mut sol = Solution::zeros(2, 3);
    sol.set(0, 0, true);
    sol.set(0, 1, true);
    sol.set(1, 1, true);
    assert_eq!(sol.assigned_count(0), 2);
    assert_eq!(sol.assigned_count(1), 1);
    assert_eq!(sol.staffed_count(0), 1);
    assert_eq!(sol.staffed_count(1), 2);
    assert_eq!(sol.staffed_count(2), 0);
    assert_eq!(sol.sections_of(0).collect::<Vec<_>>(), vec![0, 1]);
    assert_eq!(sol.tas_of(1).collect::<Vec<_>>(), vec![0, 1]);
  }

  #[test]
  fn test_random_has_correct_shape() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(7);
    let sol = Solution::random(5, 6, &mut rng);
    assert_eq!(sol.shape(), (5, 6));
  }
}
