// storefront_admin/src/assets/mod.rs

//! Image host collaborator. Uploads are opaque: a file goes in, a public
//! `secure_url` comes out, or the upload failed.

pub mod cloudinary;
pub mod memory;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// An image picked by the admin, held in memory until uploaded.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageFile {
  pub file_name: String,
  pub content_type: Option<String>,
  pub bytes: Bytes,
}

impl ImageFile {
  pub fn new(file_name: impl Into<String>, content_type: Option<String>, bytes: impl Into<Bytes>) -> Self {
    Self {
      file_name: file_name.into(),
      content_type,
      bytes: bytes.into(),
    }
  }

  pub fn is_empty(&self) -> bool {
    self.bytes.is_empty()
  }

  pub fn content_type_or_default(&self) -> &str {
    self.content_type.as_deref().unwrap_or("application/octet-stream")
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UploadedAsset {
  pub secure_url: String,
  pub public_id: Option<String>,
}

#[derive(Debug, Error)]
pub enum UploadError {
  #[error("network error: {0}")]
  Network(#[from] reqwest::Error),

  /// The host answered, but without a usable URL.
  #[error("no secure_url in upload response{}", .0.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
  MissingUrl(Option<String>),

  #[error("malformed upload response: {0}")]
  Decode(String),
}

#[async_trait]
pub trait AssetHost: Send + Sync {
  async fn upload(&self, image: &ImageFile) -> Result<UploadedAsset, UploadError>;
}
