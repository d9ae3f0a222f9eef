use std::time::{SystemTime, UNIX_EPOCH};

use tokio::sync::{mpsc, watch};
use tokio::time::{self, Duration, Instant, MissedTickBehavior};
use tracing::{info, warn};

use crate::conn::{
  LinkMonitor, LinkState, DEFAULT_DROP_PROBABILITY, HANDSHAKE_DELAY_MS, LINK_CHECK_INTERVAL_MS,
  RECONNECT_DELAY_MS,
};
use crate::error::EngineError;
use crate::feed::gen::{FeedConfig, Snapshot, TickerFeed};
use crate::sched::update_delay;

#[derive(Debug)]
pub enum FeedCommand {
  SetScrolling(bool),
  Stop,
}

#[derive(Debug, Clone)]
pub struct ServiceConfig {
  pub feed: FeedConfig,
  pub drop_probability: f64,
  pub link_seed: Option<u64>,
}

impl Default for ServiceConfig {
  fn default() -> Self {
    ServiceConfig {
      feed: FeedConfig::default(),
      drop_probability: DEFAULT_DROP_PROBABILITY,
      link_seed: None,
    }
  }
}

/// Client side of a running feed task. Snapshots and link states arrive over
/// watch channels, so a subscriber always observes a whole snapshot, never a
/// partially updated one.
pub struct FeedHandle {
  commands: mpsc::Sender<FeedCommand>,
  snapshots: watch::Receiver<Snapshot>,
  link: watch::Receiver<LinkState>,
}

impl FeedHandle {
  pub fn snapshots(&self) -> watch::Receiver<Snapshot> {
    self.snapshots.clone()
  }

  pub fn link(&self) -> watch::Receiver<LinkState> {
    self.link.clone()
  }

  /// Most recent published snapshot.
  pub fn latest(&self) -> Snapshot {
    self.snapshots.borrow().clone()
  }

  pub async fn set_scrolling(&self, scrolling: bool) -> Result<(), EngineError> {
    self.commands.send(FeedCommand::SetScrolling(scrolling)).await
      .map_err(|e| EngineError::ChannelClosed(e.to_string()))
  }

  pub async fn stop(&self) -> Result<(), EngineError> {
    self.commands.send(FeedCommand::Stop).await
      .map_err(|e| EngineError::ChannelClosed(e.to_string()))
  }
}

/// Seed the store and spawn the single task owning the feed and the link
/// monitor. Must be called from within a tokio runtime. Dropping the handle
/// (or sending `Stop`) ends the task and every timer it owns.
pub fn spawn_feed(config: ServiceConfig) -> Result<FeedHandle, EngineError> {
  let mut feed = TickerFeed::new(&config.feed);
  let monitor = LinkMonitor::new(config.drop_probability, config.link_seed)?;

  let initial = feed.seed_records(now_ms());
  let (snap_tx, snap_rx) = watch::channel(initial);
  let (link_tx, link_rx) = watch::channel(LinkState::Connected);
  let (cmd_tx, cmd_rx) = mpsc::channel(64);

  info!(total = feed.total(), "starting ticker feed");
  tokio::spawn(run_feed(feed, monitor, snap_tx, link_tx, cmd_rx));

  Ok(FeedHandle { commands: cmd_tx, snapshots: snap_rx, link: link_rx })
}

async fn run_feed(
  mut feed: TickerFeed,
  mut monitor: LinkMonitor,
  snap_tx: watch::Sender<Snapshot>,
  link_tx: watch::Sender<LinkState>,
  mut commands: mpsc::Receiver<FeedCommand>,
) {
  let mut is_scrolling = false;
  let mut next_update = Instant::now() + update_delay(is_scrolling);

  let link_period = Duration::from_millis(LINK_CHECK_INTERVAL_MS);
  let mut link_check = time::interval_at(Instant::now() + link_period, link_period);
  link_check.set_missed_tick_behavior(MissedTickBehavior::Delay);

  // pending recovery stage and its deadline, set while the link is down
  let mut recovery: Option<(Instant, LinkState)> = None;

  loop {
    let stage_deadline = recovery.map(|(at, _)| at).unwrap_or_else(Instant::now);

    tokio::select! {
      cmd = commands.recv() => {
        match cmd {
          Some(FeedCommand::SetScrolling(flag)) => is_scrolling = flag,
          Some(FeedCommand::Stop) | None => break,
        }
      }

      _ = time::sleep_until(next_update) => {
        // ticks are skipped, not buffered, while the link is down
        if monitor.is_connected() {
          let prev = snap_tx.borrow().clone();
          let next = feed.apply_tick(&prev, now_ms());
          if snap_tx.send(next).is_err() {
            break;
          }
        }
        next_update = Instant::now() + update_delay(is_scrolling);
      }

      _ = link_check.tick() => {
        if monitor.is_connected() && monitor.check() == LinkState::Disconnected {
          warn!("link dropped, scheduling reconnect");
          let _ = link_tx.send(LinkState::Disconnected);
          recovery = Some((
            Instant::now() + Duration::from_millis(RECONNECT_DELAY_MS),
            LinkState::Connecting,
          ));
        }
      }

      _ = time::sleep_until(stage_deadline), if recovery.is_some() => {
        if let Some((_, stage)) = recovery.take() {
          match stage {
            LinkState::Connecting => {
              monitor.begin_reconnect();
              let _ = link_tx.send(LinkState::Connecting);
              recovery = Some((
                Instant::now() + Duration::from_millis(HANDSHAKE_DELAY_MS),
                LinkState::Connected,
              ));
            }
            LinkState::Connected => {
              monitor.complete_reconnect();
              let _ = link_tx.send(LinkState::Connected);
              info!("link restored");
            }
            LinkState::Disconnected => {}
          }
        }
      }
    }
  }

  info!(ticks = feed.ticks(), touched = feed.records_touched(), "ticker feed stopped");
}

fn now_ms() -> u64 {
  SystemTime::now()
    .duration_since(UNIX_EPOCH)
    .map(|d| d.as_millis() as u64)
    .unwrap_or(0)
}
