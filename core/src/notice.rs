// storefront_admin/src/notice.rs

//! The transient status message shown after each admin action.

use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
  Success,
  Error,
}

impl NoticeKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      NoticeKind::Success => "success",
      NoticeKind::Error => "error",
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
  pub text: String,
  pub kind: NoticeKind,
}

impl Notice {
  pub fn success(text: impl Into<String>) -> Self {
    Self {
      text: text.into(),
      kind: NoticeKind::Success,
    }
  }

  pub fn error(text: impl Into<String>) -> Self {
    Self {
      text: text.into(),
      kind: NoticeKind::Error,
    }
  }
}

#[derive(Debug, Default)]
struct Slot {
  current: Option<(Notice, Instant)>,
  generation: u64,
}

/// Holds at most one message. Each post replaces the previous one and clears
/// itself after the configured time to live, unless a newer post replaced it.
#[derive(Debug, Clone)]
pub struct MessageArea {
  slot: Arc<Mutex<Slot>>,
  ttl: Duration,
}

impl MessageArea {
  pub fn new(ttl: Duration) -> Self {
    Self {
      slot: Arc::new(Mutex::new(Slot::default())),
      ttl,
    }
  }

  pub fn ttl(&self) -> Duration {
    self.ttl
  }

  pub fn post(&self, notice: Notice) {
    let deadline = Instant::now() + self.ttl;
    let generation = {
      let mut slot = self.slot.lock();
      slot.generation += 1;
      debug!(kind = notice.kind.as_str(), text = %notice.text, "Posting message.");
      slot.current = Some((notice, deadline));
      slot.generation
    };

    // Outside a runtime the deadline check in `current` still expires it.
    if let Ok(handle) = tokio::runtime::Handle::try_current() {
      let slot = Arc::clone(&self.slot);
      handle.spawn(async move {
        tokio::time::sleep_until(deadline).await;
        let mut slot = slot.lock();
        if slot.generation == generation {
          trace!(generation, "Message cleared.");
          slot.current = None;
        }
      });
    }
  }

  pub fn current(&self) -> Option<Notice> {
    let slot = self.slot.lock();
    slot
      .current
      .as_ref()
      .filter(|(_, deadline)| Instant::now() < *deadline)
      .map(|(notice, _)| notice.clone())
  }

  pub fn clear(&self) {
    let mut slot = self.slot.lock();
    slot.generation += 1;
    slot.current = None;
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test(start_paused = true)]
  async fn message_clears_after_ttl() {
    let area = MessageArea::new(Duration::from_millis(3500));
    area.post(Notice::success("Order deleted!"));
    tokio::time::sleep(Duration::from_millis(3400)).await;
    assert_eq!(area.current(), Some(Notice::success("Order deleted!")));
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(area.current(), None);
  }

  #[tokio::test(start_paused = true)]
  async fn newer_message_outlives_older_timer() {
    let area = MessageArea::new(Duration::from_millis(3500));
    area.post(Notice::success("first"));
    tokio::time::sleep(Duration::from_millis(3000)).await;
    area.post(Notice::error("second"));
    tokio::time::sleep(Duration::from_millis(1000)).await;
    assert_eq!(area.current(), Some(Notice::error("second")));
  }
}
