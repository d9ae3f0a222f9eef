use std::time::Duration;

pub const IDLE_UPDATE_MS: u64 = 100;
pub const SCROLLING_UPDATE_MS: u64 = 250;
/// Trailing debounce before a scroll gesture is considered settled.
pub const SCROLL_SETTLE_MS: u64 = 150;

/// Update cadence policy: tick fast while idle, back off while the view is
/// actively scrolling so redraws are not wasted mid-gesture.
pub fn update_delay(is_scrolling: bool) -> Duration {
  if is_scrolling {
    Duration::from_millis(SCROLLING_UPDATE_MS)
  } else {
    Duration::from_millis(IDLE_UPDATE_MS)
  }
}
