//! The time-bounded agent-scheduling loop that drives a run.

use std::time::Instant;

use rand::{rngs::StdRng, Rng, SeedableRng};
use typed_builder::TypedBuilder;

use crate::{
  agent::Agent,
  population::Population,
  problem::Problem,
  solution::Solution,
  terminator::{TimeLimitTerminator, Terminator},
};

/// Configuration and state for one optimization run.
///
/// Construct with [`EvolutionLoop::builder`]; all fields but `problem` have
/// defaults. `seed`, if set, makes the run reproducible.
#[derive(TypedBuilder)]
pub struct EvolutionLoop<'p> {
  /// The validated TA/section tables the run scores solutions against.
  problem: &'p Problem,
  /// Wall-clock budget for the run.
  #[builder(default = 300)]
  time_limit_seconds: u64,
  /// How many iterations between dominance prunes.
  #[builder(default = 100)]
  prune_every: u64,
  /// How many iterations between progress reports (which also prune).
  #[builder(default = 10_000)]
  status_every: u64,
  /// Seeds the run's RNG for reproducibility. Unset draws from entropy.
  #[builder(default, setter(strip_option))]
  seed: Option<u64>,
}

impl<'p> EvolutionLoop<'p> {
  /// Runs until the time limit elapses, then returns the final, pruned
  /// population.
  ///
  /// Each iteration: check the deadline, pick one agent uniformly at
  /// random, sample a solution, apply the agent, score and insert the
  /// result, and periodically prune. The returned population is always
  /// pruned to its non-dominated frontier.
  pub fn run(&self) -> Population<'p> {
    let mut rng = match self.seed {
      Some(seed) => StdRng::seed_from_u64(seed),
      None => StdRng::from_entropy(),
    };

    let mut population = Population::new(self.problem);
    population.insert(Solution::random(
      self.problem.num_tas(),
      self.problem.num_sections(),
      &mut rng,
    ));

    let mut terminator = TimeLimitTerminator::new(self.time_limit_seconds);
    let start = Instant::now();
    let mut iteration: u64 = 0;

    while !terminator.terminate(start.elapsed()) {
      let agent = Agent::ALL[rng.gen_range(0..Agent::ALL.len())];
      let picks = population.random_sample(1, &mut rng);
      let result = agent.apply(self.problem, picks, &mut rng);
      population.insert(result);

      iteration += 1;

      if iteration % self.status_every == 0 {
        population.prune();
        tracing::info!(
          iteration,
          population_size = population.size(),
          elapsed_secs = start.elapsed().as_secs_f64(),
          "evolution progress"
        );
        for (evaluation, _) in population.iter() {
          tracing::debug!(?evaluation, "population member");
        }
      } else if iteration % self.prune_every == 0 {
        population.prune();
      }
    }

    population.prune();
    tracing::info!(
      iteration,
      population_size = population.size(),
      elapsed_secs = start.elapsed().as_secs_f64(),
      "evolution finished"
    );

    population
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::tables::{RawSectionRow, RawTaRow, SectionTable, TaTable};

  fn fixture() -> Problem {
    let sections = SectionTable::from_raw(vec![
      RawSectionRow {
        id: 0,
        daytime: "MWF 9am".to_string(),
        min_ta: 1,
      },
      RawSectionRow {
        id: 1,
        daytime: "TR 2pm".to_string(),
        min_ta: 1,
      },
    ])
    .unwrap();
    let tas = TaTable::from_raw(
      vec![
        RawTaRow {
          id: 0,
          max_assigned: 1,
          preferences: vec!["P".into(), "U".into()],
        },
        RawTaRow {
          id: 1,
          max_assigned: 1,
          preferences: vec!["U".into(), "P".into()],
        },
      ],
      2,
    )
    .unwrap();
    Problem::new(tas, sections).unwrap()
  }

  #[test]
  fn test_run_terminates_and_returns_nonempty_pruned_population() {
    let problem = fixture();
    let evolution = EvolutionLoop::builder()
      .problem(&problem)
      .time_limit_seconds(0)
      .seed(7)
      .build();
    let population = evolution.run();
    assert!(!population.is_empty());
  }

  #[test]
  fn test_run_is_deterministic_given_same_seed() {
    let problem = fixture();
    let run = || {
      EvolutionLoop::builder()
        .problem(&problem)
        .time_limit_seconds(0)
        .prune_every(1)
        .seed(99)
        .build()
        .run()
    };
    let a = run();
    let b = run();
    let mut a_scores: Vec<[u32; 5]> = a.iter().map(|(e, _)| e.as_array()).collect();
    let mut b_scores: Vec<[u32; 5]> = b.iter().map(|(e, _)| e.as_array()).collect();
    a_scores.sort();
    b_scores.sort();
    assert_eq!(a_scores, b_scores);
  }

  #[test]
  fn test_builder_defaults() {
    let problem = fixture();
    let evolution = EvolutionLoop::builder().problem(&problem).build();
    assert_eq!(evolution.time_limit_seconds, 300);
    assert_eq!(evolution.prune_every, 100);
    assert_eq!(evolution.status_every, 10_000);
    assert_eq!(evolution.seed, None);
  }

  #[test]
  fn test_run_emits_a_finished_summary_event() {
    use std::{
      io,
      sync::{Arc, Mutex},
    };

    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl io::Write for SharedBuf {
      fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
      }
      fn flush(&mut self) -> io::Result<()> {
        Ok(())
      }
    }

    impl<'a> MakeWriter<'a> for SharedBuf {
      type Writer = SharedBuf;
      fn make_writer(&'a self) -> Self::Writer {
        self.clone()
      }
    }

    let buf = SharedBuf::default();
    let subscriber = tracing_subscriber::fmt()
      .with_writer(buf.clone())
      .with_ansi(false)
      .finish();

    let problem = fixture();
    tracing::subscriber::with_default(subscriber, || {
      EvolutionLoop::builder()
        .problem(&problem)
        .time_limit_seconds(0)
        .seed(5)
        .build()
        .run();
    });

    let logged = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
    assert!(logged.contains("evolution finished"), "log was: {logged}");
  }
}
