// storefront_admin/src/render/dates.rs

use chrono::{DateTime, FixedOffset, Offset, Utc};

pub const NO_DATE: &str = "No date";

/// Renders timestamps in a fixed display offset, e.g. `18 Oct 2026, 03:05 PM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateFormat {
  offset: FixedOffset,
}

impl DateFormat {
  /// Offsets outside ±24h fall back to UTC.
  pub fn with_offset_minutes(minutes: i32) -> Self {
    let offset = minutes
      .checked_mul(60)
      .and_then(FixedOffset::east_opt)
      .unwrap_or_else(|| Utc.fix());
    Self { offset }
  }

  pub fn format(&self, stamp: Option<DateTime<Utc>>) -> String {
    match stamp {
      Some(stamp) => stamp.with_timezone(&self.offset).format("%-d %b %Y, %I:%M %p").to_string(),
      None => NO_DATE.to_string(),
    }
  }
}

impl Default for DateFormat {
  fn default() -> Self {
    Self::with_offset_minutes(crate::config::DEFAULT_UTC_OFFSET_MINUTES)
  }
}
