// storefront_admin/src/catalog/preview.rs

//! Temporary local previews of images chosen for draft rows.

use crate::assets::ImageFile;
use bytes::Bytes;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Weak};
use tracing::trace;
use uuid::Uuid;

pub const DEFAULT_URL_PREFIX: &str = "/previews/";

#[derive(Debug, Clone)]
pub struct PreviewImage {
  pub content_type: String,
  pub bytes: Bytes,
}

type Entries = Mutex<HashMap<Uuid, PreviewImage>>;

/// Serves preview bytes for as long as their [`PreviewHandle`] lives.
#[derive(Clone)]
pub struct PreviewRegistry {
  entries: Arc<Entries>,
  url_prefix: Arc<str>,
}

impl PreviewRegistry {
  pub fn new(url_prefix: impl Into<String>) -> Self {
    Self {
      entries: Arc::new(Mutex::new(HashMap::new())),
      url_prefix: Arc::from(url_prefix.into()),
    }
  }

  pub fn acquire(&self, image: &ImageFile) -> PreviewHandle {
    let token = Uuid::new_v4();
    self.entries.lock().insert(
      token,
      PreviewImage {
        content_type: image.content_type_or_default().to_string(),
        bytes: image.bytes.clone(),
      },
    );
    trace!(%token, file = %image.file_name, "Preview acquired.");
    PreviewHandle {
      token,
      url: format!("{}{}", self.url_prefix, token),
      entries: Arc::downgrade(&self.entries),
    }
  }

  pub fn fetch(&self, token: &Uuid) -> Option<PreviewImage> {
    self.entries.lock().get(token).cloned()
  }

  pub fn live_count(&self) -> usize {
    self.entries.lock().len()
  }
}

impl Default for PreviewRegistry {
  fn default() -> Self {
    Self::new(DEFAULT_URL_PREFIX)
  }
}

impl fmt::Debug for PreviewRegistry {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("PreviewRegistry")
      .field("url_prefix", &self.url_prefix)
      .field("live", &self.live_count())
      .finish()
  }
}

/// A live preview. Dropping it revokes the URL.
pub struct PreviewHandle {
  token: Uuid,
  url: String,
  entries: Weak<Entries>,
}

impl PreviewHandle {
  pub fn token(&self) -> Uuid {
    self.token
  }

  pub fn url(&self) -> &str {
    &self.url
  }
}

impl Drop for PreviewHandle {
  fn drop(&mut self) {
    if let Some(entries) = self.entries.upgrade() {
      entries.lock().remove(&self.token);
      trace!(token = %self.token, "Preview released.");
    }
  }
}

impl fmt::Debug for PreviewHandle {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("PreviewHandle").field("url", &self.url).finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn dropping_handle_revokes_preview() {
    let registry = PreviewRegistry::new("/p/");
    let handle = registry.acquire(&ImageFile::new("a.jpg", Some("image/jpeg".into()), vec![1u8, 2, 3]));
    assert!(handle.url().starts_with("/p/"));
    let fetched = registry.fetch(&handle.token()).unwrap();
    assert_eq!(fetched.content_type, "image/jpeg");
    assert_eq!(registry.live_count(), 1);
    let token = handle.token();
    drop(handle);
    assert!(registry.fetch(&token).is_none());
    assert_eq!(registry.live_count(), 0);
  }
}
