use std::time::Duration;

use engine::conn::LinkState;
use engine::feed::gen::FeedConfig;
use engine::feed::service::{spawn_feed, ServiceConfig};
use tokio::time::Instant;

fn quiet_link_config(total: usize) -> ServiceConfig {
  ServiceConfig {
    feed: FeedConfig { total, seed: Some(7) },
    drop_probability: 0.0,
    link_seed: Some(7),
  }
}

#[tokio::test(start_paused = true)]
async fn publishes_snapshots_on_the_adaptive_cadence() {
  let handle = spawn_feed(quiet_link_config(100)).expect("service spawns");
  let mut snapshots = handle.snapshots();

  let initial = snapshots.borrow_and_update().clone();
  assert_eq!(initial.len(), 100);

  snapshots.changed().await.expect("first update arrives");
  let second = snapshots.borrow_and_update().clone();
  assert_eq!(second.len(), 100);
  for (before, after) in initial.iter().zip(second.iter()) {
    assert_eq!(before.id, after.id);
    assert!(after.price > 0.0);
  }

  // idle cadence
  let started = Instant::now();
  snapshots.changed().await.expect("idle tick");
  let idle_gap = started.elapsed();
  assert!(idle_gap <= Duration::from_millis(150), "idle gap was {:?}", idle_gap);

  // scrolling backs the cadence off
  handle.set_scrolling(true).await.expect("command accepted");
  snapshots.changed().await.expect("tick scheduled before the command");
  let started = Instant::now();
  snapshots.changed().await.expect("scrolling tick");
  let scroll_gap = started.elapsed();
  assert!(scroll_gap >= Duration::from_millis(245), "scroll gap was {:?}", scroll_gap);

  handle.stop().await.expect("stop accepted");
}

#[tokio::test(start_paused = true)]
async fn outage_freezes_snapshots_until_recovery_completes() {
  let config = ServiceConfig {
    feed: FeedConfig { total: 50, seed: Some(7) },
    drop_probability: 1.0,
    link_seed: Some(7),
  };
  let handle = spawn_feed(config).expect("service spawns");
  let mut link = handle.link();
  let mut snapshots = handle.snapshots();

  // certain drop fires on the first 5s health check
  link.changed().await.expect("link drop observed");
  assert_eq!(*link.borrow_and_update(), LinkState::Disconnected);

  let frozen = snapshots.borrow_and_update().clone();
  tokio::time::sleep(Duration::from_millis(1_500)).await;
  assert!(!snapshots.has_changed().expect("feed task alive"));

  // 2s after the drop the link starts reconnecting, 1s later it is back
  link.changed().await.expect("connecting stage");
  assert_eq!(*link.borrow_and_update(), LinkState::Connecting);
  assert!(!snapshots.has_changed().expect("feed task alive"));

  link.changed().await.expect("connected stage");
  assert_eq!(*link.borrow_and_update(), LinkState::Connected);

  // updates resume against the frozen snapshot, nothing was replayed
  snapshots.changed().await.expect("updates resume");
  let resumed = snapshots.borrow_and_update().clone();
  assert_eq!(resumed.len(), frozen.len());
  for (before, after) in frozen.iter().zip(resumed.iter()) {
    assert_eq!(before.id, after.id);
  }

  handle.stop().await.expect("stop accepted");
}

#[tokio::test(start_paused = true)]
async fn stop_tears_the_feed_down() {
  let handle = spawn_feed(quiet_link_config(10)).expect("service spawns");
  let mut snapshots = handle.snapshots();

  snapshots.changed().await.expect("feed is live");
  handle.stop().await.expect("stop accepted");

  // once the task exits the publisher side is gone
  loop {
    if snapshots.changed().await.is_err() {
      break;
    }
  }
}
