//! Local-search operators that propose a new solution from existing ones.

use std::collections::HashSet;

use rand::{seq::SliceRandom, Rng};

use crate::{problem::Problem, solution::Solution, tables::Preference};

/// A closed set of local-search moves. Each variant dispatches to a free
/// function; this crate deliberately avoids a per-agent trait hierarchy.
///
/// Every agent takes one solution (`k = 1`) sampled from the population and
/// returns one new matrix. Agents are advisory: nothing requires the result
/// to improve on any objective, let alone all five.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Agent {
  /// Unassigns a TA's unwilling, then unpreferred, then most-staffed
  /// sections until it is back at or under its cap.
  OverallocationMinimizer,
  /// For each TA, keeps the first assignment at a given `daytime` and
  /// drops the rest.
  ConflictsMinimizer,
  /// Moves free TAs into understaffed sections.
  UndersupportMinimizer,
  /// Moves each unwilling assignment to a preferred, or else willing,
  /// section.
  UnwillingMinimizer,
  /// Moves each unpreferred assignment to an understaffed preferred
  /// section, or else any preferred section for that TA.
  UnpreferredMinimizer,
  /// Flips a random fraction of cells, sampled without replacement.
  Shuffle,
  /// Independently flips each cell with some probability.
  Mutate,
}

impl Agent {
  /// Every agent, in a fixed order, for iterating or picking uniformly.
  pub const ALL: [Agent; 7] = [
    Agent::OverallocationMinimizer,
    Agent::ConflictsMinimizer,
    Agent::UndersupportMinimizer,
    Agent::UnwillingMinimizer,
    Agent::UnpreferredMinimizer,
    Agent::Shuffle,
    Agent::Mutate,
  ];

  /// Applies this agent to `solutions`, returning one new solution.
  ///
  /// # Panics
  ///
  /// Panics if `solutions` is empty — an agent always needs at least one
  /// input solution; an empty population reaching an agent is a caller
  /// bug, not a recoverable error.
  pub fn apply(
    &self,
    problem: &Problem,
    solutions: Vec<Solution>,
    rng: &mut impl Rng,
  ) -> Solution {
    let solution = solutions
      .into_iter()
      .next()
      .expect("agent requires at least one input solution");
    match self {
      Agent::OverallocationMinimizer => overallocation_minimizer(problem, solution),
      Agent::ConflictsMinimizer => conflicts_minimizer(problem, solution),
      Agent::UndersupportMinimizer => undersupport_minimizer(problem, solution),
      Agent::UnwillingMinimizer => unwilling_minimizer(problem, solution),
      Agent::UnpreferredMinimizer => unpreferred_minimizer(problem, solution),
      Agent::Shuffle => shuffle(solution, rng),
      Agent::Mutate => mutate(solution, rng),
    }
  }
}

/// The first section among `sections` with the highest `staffed_count`,
/// ties won by the earliest (lowest-index) section — matches picking the
/// first maximum out of an ascending index list.
fn most_staffed(solution: &Solution, sections: impl Iterator<Item = usize>) -> Option<usize> {
  let mut best: Option<(usize, u32)> = None;
  for s in sections {
    let staffed = solution.staffed_count(s);
    match best {
      None => best = Some((s, staffed)),
      Some((_, best_staffed)) if staffed > best_staffed => best = Some((s, staffed)),
      _ => {}
    }
  }
  best.map(|(s, _)| s)
}

fn overallocation_minimizer(problem: &Problem, mut solution: Solution) -> Solution {
  let (num_tas, _) = solution.shape();
  let overallocated_tas: Vec<usize> = (0..num_tas)
    .filter(|&t| solution.assigned_count(t) > problem.tas.records()[t].max_assigned)
    .collect();

  for t in overallocated_tas {
    let max_assigned = problem.tas.records()[t].max_assigned;
    let preferences = problem.tas.records()[t].preferences.clone();

    let unwilling_sections: Vec<usize> = solution
      .sections_of(t)
      .filter(|&s| preferences[s] == Preference::Unwilling)
      .collect();
    for s in unwilling_sections {
      solution.set(t, s, false);
    }

    let unpreferred_sections: Vec<usize> = solution
      .sections_of(t)
      .filter(|&s| preferences[s] == Preference::Willing)
      .collect();
    for s in unpreferred_sections {
      solution.set(t, s, false);
    }

    while solution.assigned_count(t) > max_assigned {
      let section = most_staffed(&solution, solution.sections_of(t))
        .expect("a TA still over cap must have at least one assigned section");
      solution.set(t, section, false);
    }
  }

  solution
}

fn conflicts_minimizer(problem: &Problem, mut solution: Solution) -> Solution {
  let (num_tas, _) = solution.shape();
  for t in 0..num_tas {
    let mut seen_daytimes: HashSet<&str> = HashSet::new();
    let assigned_sections: Vec<usize> = solution.sections_of(t).collect();
    for s in assigned_sections {
      let daytime = problem.sections.records()[s].daytime.as_str();
      if !seen_daytimes.insert(daytime) {
        solution.set(t, s, false);
      }
    }
  }
  solution
}

fn undersupport_minimizer(problem: &Problem, mut solution: Solution) -> Solution {
  let (num_tas, num_sections) = solution.shape();
  let min_ta: Vec<u32> = problem.sections.records().iter().map(|r| r.min_ta).collect();
  let max_assigned: Vec<u32> = problem.tas.records().iter().map(|r| r.max_assigned).collect();

  let mut staffed: Vec<u32> = (0..num_sections).map(|s| solution.staffed_count(s)).collect();
  let assigned_count: Vec<u32> = (0..num_tas).map(|t| solution.assigned_count(t)).collect();

  let mut overallocated_sections: Vec<usize> =
    (0..num_sections).filter(|&s| staffed[s] > min_ta[s]).collect();
  let mut underallocated_sections: Vec<usize> =
    (0..num_sections).filter(|&s| staffed[s] < min_ta[s]).collect();
  let overallocated_tas: HashSet<usize> =
    (0..num_tas).filter(|&t| assigned_count[t] > max_assigned[t]).collect();

  let mut available_tas: Vec<usize> = (0..num_tas)
    .filter(|&t| {
      assigned_count[t] == 0
        || solution
          .sections_of(t)
          .any(|s| problem.tas.records()[t].preferences[s] == Preference::Unwilling)
        || solution.sections_of(t).any(|s| overallocated_sections.contains(&s))
    })
    .collect();
  available_tas.sort_unstable();
  available_tas.dedup();

  for t in available_tas {
    if overallocated_tas.contains(&t) || underallocated_sections.is_empty() {
      continue;
    }

    let preferences = &problem.tas.records()[t].preferences;
    let preferred_underallocated = underallocated_sections
      .iter()
      .copied()
      .find(|&s| preferences[s] == Preference::Preferred);
    let target_section = preferred_underallocated.unwrap_or(underallocated_sections[0]);

    if let Some(assigned_section) = solution.sections_of(t).next() {
      solution.set(t, assigned_section, false);
      staffed[assigned_section] -= 1;
      if staffed[assigned_section] == min_ta[assigned_section] {
        overallocated_sections.retain(|&s| s != assigned_section);
      }
    }

    solution.set(t, target_section, true);
    staffed[target_section] += 1;
    if staffed[target_section] == min_ta[target_section] {
      underallocated_sections.retain(|&s| s != target_section);
    }
  }

  solution
}

fn unwilling_minimizer(problem: &Problem, mut solution: Solution) -> Solution {
  let (num_tas, _) = solution.shape();
  // Snapshotted up front: the reference implementation also resolves
  // targets from the static preference table, never the in-progress copy.
  let unwilling_assignments: Vec<(usize, usize)> = (0..num_tas)
    .flat_map(|t| solution.sections_of(t).map(move |s| (t, s)).collect::<Vec<_>>())
    .filter(|&(t, s)| problem.tas.records()[t].preferences[s] == Preference::Unwilling)
    .collect();

  for (t, s) in unwilling_assignments {
    let preferences = &problem.tas.records()[t].preferences;
    let target = preferences
      .iter()
      .position(|&p| p == Preference::Preferred)
      .or_else(|| preferences.iter().position(|&p| p == Preference::Willing));
    if let Some(target_section) = target {
      solution.set(t, s, false);
      solution.set(t, target_section, true);
    }
  }

  solution
}

fn unpreferred_minimizer(problem: &Problem, mut solution: Solution) -> Solution {
  let (num_tas, num_sections) = solution.shape();
  let min_ta: Vec<u32> = problem.sections.records().iter().map(|r| r.min_ta).collect();
  let mut staffed: Vec<u32> = (0..num_sections).map(|s| solution.staffed_count(s)).collect();

  let has_any_preferring_ta: Vec<bool> = (0..num_sections)
    .map(|s| {
      problem
        .tas
        .records()
        .iter()
        .any(|r| r.preferences[s] == Preference::Preferred)
    })
    .collect();

  // A single globally-first understaffed section that someone prefers,
  // reused as the target for every move below regardless of whether it is
  // *this* TA's preferred section — preserved from the reference agent.
  let undersupported_preferred_section: Option<usize> =
    (0..num_sections).find(|&s| staffed[s] < min_ta[s] && has_any_preferring_ta[s]);

  let unpreferred_assignments: Vec<(usize, usize)> = (0..num_tas)
    .flat_map(|t| solution.sections_of(t).map(move |s| (t, s)).collect::<Vec<_>>())
    .filter(|&(t, s)| problem.tas.records()[t].preferences[s] == Preference::Willing)
    .collect();

  for (t, s) in unpreferred_assignments {
    let preferences = &problem.tas.records()[t].preferences;
    let target = undersupported_preferred_section
      .or_else(|| preferences.iter().position(|&p| p == Preference::Preferred));
    if let Some(target_section) = target {
      solution.set(t, s, false);
      solution.set(t, target_section, true);
      staffed[s] -= 1;
      staffed[target_section] += 1;
    }
  }

  solution
}

fn shuffle(mut solution: Solution, rng: &mut impl Rng) -> Solution {
  let (num_tas, num_sections) = solution.shape();
  let total = num_tas * num_sections;
  let ratio = rng.gen_range(0.1..0.3);
  let num_to_shuffle = ((total as f64) * ratio) as usize;

  let mut cells: Vec<usize> = (0..total).collect();
  let (chosen, _) = cells.partial_shuffle(rng, num_to_shuffle);
  for &idx in chosen.iter() {
    let (t, s) = (idx / num_sections, idx % num_sections);
    let current = solution.get(t, s);
    solution.set(t, s, !current);
  }

  solution
}

fn mutate(mut solution: Solution, rng: &mut impl Rng) -> Solution {
  let (num_tas, num_sections) = solution.shape();
  let rate = rng.gen_range(0.1..0.3);
  for t in 0..num_tas {
    for s in 0..num_sections {
      if rng.gen_bool(rate) {
        let current = solution.get(t, s);
        solution.set(t, s, !current);
      }
    }
  }
  solution
}
