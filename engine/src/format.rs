use crate::feed::gen::Status;

/// Tiered precision: large magnitudes read best with 2 decimals, small ones
/// need 4 to show movement at all.
pub fn format_price(price: f64) -> String {
  if price > 100.0 {
    format!("{:.2}", price)
  } else {
    format!("{:.4}", price)
  }
}

/// Abbreviate volumes with K/M suffixes at the 1e3/1e6 thresholds.
pub fn format_volume(volume: u64) -> String {
  if volume >= 1_000_000 {
    format!("{:.1}M", volume as f64 / 1_000_000.0)
  } else if volume >= 1_000 {
    format!("{:.0}K", volume as f64 / 1_000.0)
  } else {
    volume.to_string()
  }
}

/// Display category for a record status.
pub fn status_label(status: Status) -> &'static str {
  match status {
    Status::Active => "active",
    Status::Paused => "paused",
    Status::Error => "error",
  }
}
