//! Stopping conditions for the evolution loop.

use std::time::Duration;

/// Decides whether the evolution loop should stop.
pub trait Terminator {
  /// Returns `true` if the loop should stop, given the time elapsed since
  /// it started.
  fn terminate(&mut self, elapsed: Duration) -> bool;
}

/// Terminates once `elapsed` reaches a fixed limit.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct TimeLimitTerminator {
  limit: Duration,
}

impl TimeLimitTerminator {
  /// Stops the loop once `limit_seconds` have elapsed.
  pub fn new(limit_seconds: u64) -> Self {
    TimeLimitTerminator {
      limit: Duration::from_secs(limit_seconds),
    }
  }
}

impl Terminator for TimeLimitTerminator {
  fn terminate(&mut self, elapsed: Duration) -> bool {
    elapsed >= self.limit
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_time_limit_terminator() {
    let mut t = TimeLimitTerminator::new(10);
    assert!(!t.terminate(Duration::from_secs(9)));
    assert!(t.terminate(Duration::from_secs(10)));
    assert!(t.terminate(Duration::from_secs(11)));
  }

  #[test]
  fn test_time_limit_terminator_zero() {
    let mut t = TimeLimitTerminator::new(0);
    assert!(t.terminate(Duration::from_secs(0)));
  }
}
