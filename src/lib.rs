#![warn(missing_docs)]
//! A multi-objective evolutionary optimizer for assigning teaching
//! assistants to recitation sections.
//!
//! Candidate T×S assignment matrices are scored against five penalty
//! objectives (overallocation, conflicts, undersupport, unwilling,
//! unpreferred) and refined by a population of local-search agents under
//! Pareto-dominance pruning. [`evolution::EvolutionLoop`] drives a run;
//! [`population::Population::iter`] yields its non-dominated frontier.

pub mod agent;
pub mod dominance;
pub mod error;
pub mod evolution;
pub mod objective;
pub mod population;
pub mod problem;
pub mod solution;
pub mod tables;
pub mod terminator;

pub use error::{Error, Result};
pub use evolution::EvolutionLoop;
pub use objective::Evaluation;
pub use population::Population;
pub use problem::Problem;
pub use solution::Solution;
