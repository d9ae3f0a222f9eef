use rand::{rngs::StdRng, SeedableRng};
use rand_distr::{Bernoulli, Distribution};

use crate::error::EngineError;

pub const LINK_CHECK_INTERVAL_MS: u64 = 5_000;
pub const RECONNECT_DELAY_MS: u64 = 2_000;
pub const HANDSHAKE_DELAY_MS: u64 = 1_000;
pub const DEFAULT_DROP_PROBABILITY: f64 = 0.02;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
  Connected,
  Connecting,
  Disconnected,
}

/// Simulated transport health, independent of feed content. An established
/// link drops with a small probability on each periodic check and then walks
/// a fixed recovery ladder driven by the caller's timers:
/// disconnected -> connecting -> connected.
pub struct LinkMonitor {
  rng: StdRng,
  drop_dist: Bernoulli,
  state: LinkState,
}

impl LinkMonitor {
  pub fn new(drop_probability: f64, seed: Option<u64>) -> Result<Self, EngineError> {
    let drop_dist = Bernoulli::new(drop_probability)
      .map_err(|e| EngineError::InvalidConfiguration(format!("link drop probability must be within [0, 1]: {}", e)))?;
    let rng = match seed {
      Some(seed) => StdRng::seed_from_u64(seed),
      None => StdRng::from_os_rng(),
    };

    Ok(LinkMonitor { rng, drop_dist, state: LinkState::Connected })
  }

  pub fn state(&self) -> LinkState {
    self.state
  }

  pub fn is_connected(&self) -> bool {
    self.state == LinkState::Connected
  }

  /// Periodic health check. Only an established link can drop; a link already
  /// recovering is left alone.
  pub fn check(&mut self) -> LinkState {
    if self.state == LinkState::Connected && self.drop_dist.sample(&mut self.rng) {
      self.state = LinkState::Disconnected;
    }
    self.state
  }

  pub fn begin_reconnect(&mut self) -> LinkState {
    if self.state == LinkState::Disconnected {
      self.state = LinkState::Connecting;
    }
    self.state
  }

  pub fn complete_reconnect(&mut self) -> LinkState {
    if self.state == LinkState::Connecting {
      self.state = LinkState::Connected;
    }
    self.state
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn rejects_out_of_range_probabilities() {
    assert!(matches!(LinkMonitor::new(1.5, Some(1)), Err(EngineError::InvalidConfiguration(_))));
    assert!(matches!(LinkMonitor::new(-0.1, Some(1)), Err(EngineError::InvalidConfiguration(_))));
  }

  #[test]
  fn certain_drop_fires_on_the_first_check() {
    let mut monitor = LinkMonitor::new(1.0, Some(1)).unwrap();
    assert!(monitor.is_connected());
    assert_eq!(monitor.check(), LinkState::Disconnected);
    // further checks never resurrect the link on their own
    assert_eq!(monitor.check(), LinkState::Disconnected);
  }

  #[test]
  fn zero_probability_never_drops() {
    let mut monitor = LinkMonitor::new(0.0, Some(1)).unwrap();
    for _ in 0..200 {
      assert_eq!(monitor.check(), LinkState::Connected);
    }
  }

  #[test]
  fn recovery_walks_the_ladder_in_order() {
    let mut monitor = LinkMonitor::new(1.0, Some(1)).unwrap();
    monitor.check();
    assert_eq!(monitor.begin_reconnect(), LinkState::Connecting);
    assert_eq!(monitor.complete_reconnect(), LinkState::Connected);
  }

  #[test]
  fn ladder_steps_are_noops_out_of_sequence() {
    let mut monitor = LinkMonitor::new(0.0, Some(1)).unwrap();
    // connected: neither recovery step applies
    assert_eq!(monitor.begin_reconnect(), LinkState::Connected);
    assert_eq!(monitor.complete_reconnect(), LinkState::Connected);

    let mut dropped = LinkMonitor::new(1.0, Some(1)).unwrap();
    dropped.check();
    // completing without connecting first stays disconnected
    assert_eq!(dropped.complete_reconnect(), LinkState::Disconnected);
  }
}
