use std::collections::HashSet;
use std::sync::Arc;

use rand::{rngs::StdRng, Rng, SeedableRng};
use rand_distr::{Bernoulli, Distribution, Uniform};
use serde::{Deserialize, Serialize};

// Display names cycle through this pool; past one full lap an index suffix
// keeps symbols unique.
pub const SYMBOLS: [&str; 50] = [
  "AAPL", "GOOGL", "MSFT", "AMZN", "TSLA", "META", "NVDA", "NFLX", "AMD", "INTC",
  "BTC", "ETH", "ADA", "SOL", "DOT", "LINK", "UNI", "AVAX", "MATIC", "ATOM",
  "JPM", "BAC", "WFC", "GS", "MS", "C", "USB", "PNC", "TFC", "COF",
  "JNJ", "PFE", "UNH", "MRK", "ABBV", "TMO", "DHR", "BMY", "AMGN", "GILD",
  "XOM", "CVX", "COP", "EOG", "SLB", "PXD", "MPC", "VLO", "PSX", "HES",
];

// Prices never fall below this floor regardless of volatility.
pub const MIN_PRICE: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
  Active,
  Paused,
  Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
  pub id: usize,
  pub symbol: String,
  pub price: f64,
  pub volume: u64,
  pub change: f64,
  pub change_percent: f64,
  pub status: Status,
  pub last_update_ms: u64,
}

/// Immutable point-in-time view of the whole collection. Updates replace the
/// snapshot wholesale; readers holding an older one keep a valid view.
pub type Snapshot = Arc<Vec<Record>>;

#[derive(Debug, Clone, Copy)]
pub struct ActivityPattern {
  pub probability: f32,
  pub update_count: usize,
  pub volatility: f64,
}

pub const PATTERNS: [ActivityPattern; 4] = [
  // high frequency (crypto-like)
  ActivityPattern { probability: 0.3, update_count: 5, volatility: 0.05 },
  // medium frequency (stock-like)
  ActivityPattern { probability: 0.5, update_count: 2, volatility: 0.02 },
  // low frequency (bond-like)
  ActivityPattern { probability: 0.15, update_count: 1, volatility: 0.01 },
  // burst (news events)
  ActivityPattern { probability: 0.05, update_count: 15, volatility: 0.1 },
];

// A draw that clears every threshold lands on the medium tier. The weights
// are first-match thresholds, not a normalized distribution.
const FALLBACK_PATTERN: usize = 1;

#[derive(Debug, Clone)]
pub struct FeedConfig {
  pub total: usize,
  pub seed: Option<u64>,
}

impl Default for FeedConfig {
  fn default() -> Self {
    FeedConfig { total: 1_000, seed: None }
  }
}

pub struct TickerFeed {
  rng: StdRng,
  total: usize,
  pattern_dist: Uniform<f32>,
  pattern_thresholds: Vec<f32>,
  unit_dist: Uniform<f64>,
  init_price_dist: Uniform<f64>,
  init_volume_dist: Uniform<u64>,
  status_flip: Bernoulli,
  pause_over_error: Bernoulli,
  status_recover: Bernoulli,
  ticks: u64,
  records_touched: u64,
}

impl TickerFeed {
  pub fn new(config: &FeedConfig) -> Self {
    let rng = match config.seed {
      Some(seed) => StdRng::seed_from_u64(seed),
      None => StdRng::from_os_rng(),
    };

    TickerFeed {
      rng,
      total: config.total,
      pattern_dist: Uniform::new(0.0, 1.0).expect("error creating pattern distribution"),
      pattern_thresholds: PATTERNS.iter().scan(0.0, |acc, p| {
        *acc += p.probability;
        Some(*acc)
      }).collect(),
      unit_dist: Uniform::new(0.0, 1.0).expect("error creating unit distribution"),
      init_price_dist: Uniform::new(10.0, 1_010.0).expect("error creating price distribution"),
      init_volume_dist: Uniform::new(10_000, 1_010_000).expect("error creating volume distribution"),
      status_flip: Bernoulli::new(0.001).expect("error creating status flip distribution"),
      pause_over_error: Bernoulli::new(0.7).expect("error creating pause/error distribution"),
      status_recover: Bernoulli::new(0.1).expect("error creating status recovery distribution"),
      ticks: 0,
      records_touched: 0,
    }
  }

  pub fn total(&self) -> usize {
    self.total
  }

  /// Update steps applied so far.
  pub fn ticks(&self) -> u64 {
    self.ticks
  }

  /// Cumulative count of records actually touched across all update steps.
  pub fn records_touched(&self) -> u64 {
    self.records_touched
  }

  /// Populate the full collection. Ids are dense 0..n-1 and double as the
  /// positional index; records are never inserted, removed, or reordered
  /// afterwards.
  pub fn seed_records(&mut self, now_ms: u64) -> Snapshot {
    let records = (0..self.total).map(|index| {
      let base = SYMBOLS[index % SYMBOLS.len()];
      let symbol = if index >= SYMBOLS.len() {
        format!("{}_{}", base, index / SYMBOLS.len())
      } else {
        base.to_string()
      };
      let price = self.init_price_dist.sample(&mut self.rng);

      Record {
        id: index,
        symbol,
        price,
        volume: self.init_volume_dist.sample(&mut self.rng),
        change: (self.unit_dist.sample(&mut self.rng) - 0.5) * price * 0.1,
        change_percent: (self.unit_dist.sample(&mut self.rng) - 0.5) * 10.0,
        status: Status::Active,
        last_update_ms: now_ms,
      }
    }).collect::<Vec<Record>>();

    Arc::new(records)
  }

  fn select_pattern(&mut self) -> ActivityPattern {
    let draw = self.pattern_dist.sample(&mut self.rng);
    let idx = self.pattern_thresholds.iter()
      .position(|threshold| draw <= *threshold)
      .unwrap_or(FALLBACK_PATTERN);
    PATTERNS[idx]
  }

  /// One simulated update step. Returns a new snapshot; the previous one is
  /// left untouched. Duplicate index draws collapse, so the number of records
  /// touched is at most the selected pattern's update count.
  pub fn apply_tick(&mut self, prev: &Snapshot, now_ms: u64) -> Snapshot {
    let pattern = self.select_pattern();
    let mut next = prev.as_ref().clone();

    let mut indices = HashSet::new();
    if !next.is_empty() {
      for _ in 0..pattern.update_count {
        indices.insert(self.rng.random_range(0..next.len()));
      }
    }

    for &index in &indices {
      let shift = (self.unit_dist.sample(&mut self.rng) - 0.5) * pattern.volatility;
      let volume_scale = 0.8 + self.unit_dist.sample(&mut self.rng) * 0.4;

      let record = &mut next[index];
      let new_price = (record.price + record.price * shift).max(MIN_PRICE);
      record.change = new_price - record.price;
      record.change_percent = record.change / record.price * 100.0;
      record.price = new_price;
      record.volume = (record.volume as f64 * volume_scale).floor() as u64;
      record.status = self.roll_status(record.status);
      record.last_update_ms = now_ms;
    }

    self.ticks += 1;
    self.records_touched += indices.len() as u64;

    Arc::new(next)
  }

  // Status is sticky: an active record rarely degrades, a degraded record
  // recovers with its own probability.
  fn roll_status(&mut self, current: Status) -> Status {
    match current {
      Status::Active if self.status_flip.sample(&mut self.rng) => {
        if self.pause_over_error.sample(&mut self.rng) {
          Status::Paused
        } else {
          Status::Error
        }
      }
      Status::Paused | Status::Error if self.status_recover.sample(&mut self.rng) => Status::Active,
      other => other,
    }
  }
}
