// storefront_admin/src/assets/memory.rs

use super::{AssetHost, ImageFile, UploadError, UploadedAsset};
use async_trait::async_trait;
use parking_lot::Mutex;

/// Asset host that keeps nothing but a counter and hands back stable URLs
/// under `base_url`. Serves local runs where no image host is configured.
pub struct MemoryAssetHost {
  base_url: String,
  uploaded: Mutex<Vec<String>>,
}

impl MemoryAssetHost {
  pub fn new(base_url: impl Into<String>) -> Self {
    Self {
      base_url: base_url.into(),
      uploaded: Mutex::new(Vec::new()),
    }
  }

  /// URLs handed out so far, oldest first.
  pub fn uploaded(&self) -> Vec<String> {
    self.uploaded.lock().clone()
  }
}

#[async_trait]
impl AssetHost for MemoryAssetHost {
  async fn upload(&self, image: &ImageFile) -> Result<UploadedAsset, UploadError> {
    if image.is_empty() {
      return Err(UploadError::MissingUrl(Some("Empty file".to_string())));
    }
    let mut uploaded = self.uploaded.lock();
    let public_id = format!("{}-{}", uploaded.len() + 1, image.file_name);
    let secure_url = format!("{}/{}", self.base_url.trim_end_matches('/'), public_id);
    uploaded.push(secure_url.clone());
    Ok(UploadedAsset {
      secure_url,
      public_id: Some(public_id),
    })
  }
}
