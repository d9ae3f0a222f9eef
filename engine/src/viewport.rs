use crate::error::EngineError;

/// Uniform row layout for a virtualized list. Validated once at construction
/// so range queries stay total.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowLayout {
  row_height: f64,
  visible_rows: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleRange {
  pub start: usize,
  pub count: usize,
}

impl RowLayout {
  pub fn new(row_height: f64, visible_rows: usize) -> Result<Self, EngineError> {
    if !row_height.is_finite() || row_height <= 0.0 {
      return Err(EngineError::InvalidConfiguration(
        format!("row height must be a positive number, got {}", row_height),
      ));
    }
    if visible_rows == 0 {
      return Err(EngineError::InvalidConfiguration(
        "visible row count must be at least 1".to_string(),
      ));
    }
    Ok(RowLayout { row_height, visible_rows })
  }

  pub fn row_height(&self) -> f64 {
    self.row_height
  }

  pub fn visible_rows(&self) -> usize {
    self.visible_rows
  }

  /// Full scrollable height backing the spacer element.
  pub fn content_height(&self, total: usize) -> f64 {
    total as f64 * self.row_height
  }

  /// Vertical offset of the first rendered row.
  pub fn offset_top(&self, range: &VisibleRange) -> f64 {
    range.start as f64 * self.row_height
  }

  /// Smallest contiguous index range covering every row that intersects the
  /// viewport at the given scroll offset. Pure: re-derived from its inputs on
  /// every call, degenerate inputs clamp rather than fail.
  pub fn visible_range(&self, scroll_offset: f64, total: usize) -> VisibleRange {
    if total == 0 {
      return VisibleRange { start: 0, count: 0 };
    }

    let max_start = total.saturating_sub(self.visible_rows);
    let mut start = (scroll_offset.max(0.0) / self.row_height).floor() as usize;
    if start > max_start {
      start = max_start;
    }
    let count = self.visible_rows.min(total - start);

    VisibleRange { start, count }
  }
}

impl VisibleRange {
  pub fn end(&self) -> usize {
    self.start + self.count
  }

  pub fn is_empty(&self) -> bool {
    self.count == 0
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn rejects_degenerate_layouts() {
    assert!(matches!(RowLayout::new(0.0, 10), Err(EngineError::InvalidConfiguration(_))));
    assert!(matches!(RowLayout::new(-40.0, 10), Err(EngineError::InvalidConfiguration(_))));
    assert!(matches!(RowLayout::new(f64::NAN, 10), Err(EngineError::InvalidConfiguration(_))));
    assert!(matches!(RowLayout::new(40.0, 0), Err(EngineError::InvalidConfiguration(_))));
  }

  #[test]
  fn range_at_the_top() {
    let layout = RowLayout::new(40.0, 10).unwrap();
    assert_eq!(layout.visible_range(0.0, 1_000), VisibleRange { start: 0, count: 10 });
  }

  #[test]
  fn range_at_the_bottom() {
    let layout = RowLayout::new(40.0, 10).unwrap();
    assert_eq!(layout.visible_range(39_960.0, 1_000), VisibleRange { start: 990, count: 10 });
  }

  #[test]
  fn overscrolled_offset_clamps_to_the_end() {
    let layout = RowLayout::new(40.0, 10).unwrap();
    assert_eq!(layout.visible_range(999_999.0, 1_000), VisibleRange { start: 990, count: 10 });
  }

  #[test]
  fn negative_offset_clamps_to_the_top() {
    let layout = RowLayout::new(40.0, 10).unwrap();
    assert_eq!(layout.visible_range(-250.0, 1_000), VisibleRange { start: 0, count: 10 });
  }

  #[test]
  fn short_collections_shrink_the_count() {
    let layout = RowLayout::new(40.0, 10).unwrap();
    assert_eq!(layout.visible_range(0.0, 4), VisibleRange { start: 0, count: 4 });
    assert_eq!(layout.visible_range(0.0, 0), VisibleRange { start: 0, count: 0 });
  }

  #[test]
  fn mid_scroll_range_is_exact() {
    let layout = RowLayout::new(40.0, 10).unwrap();
    let range = layout.visible_range(405.0, 1_000);
    assert_eq!(range, VisibleRange { start: 10, count: 10 });
    assert_eq!(range.end(), 20);
    assert_eq!(layout.offset_top(&range), 400.0);
  }

  #[test]
  fn range_query_is_pure() {
    let layout = RowLayout::new(32.0, 15).unwrap();
    for offset in [0.0, 1.0, 512.0, 31_999.0, 1e9] {
      assert_eq!(layout.visible_range(offset, 1_000), layout.visible_range(offset, 1_000));
      let range = layout.visible_range(offset, 1_000);
      assert!(range.end() <= 1_000);
    }
  }

  #[test]
  fn content_height_covers_every_row() {
    let layout = RowLayout::new(40.0, 10).unwrap();
    assert_eq!(layout.content_height(1_000), 40_000.0);
    assert_eq!(layout.content_height(0), 0.0);
  }
}
