// storefront_admin/src/assets/cloudinary.rs

use super::{AssetHost, ImageFile, UploadError, UploadedAsset};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

pub const DEFAULT_ENDPOINT: &str = "https://api.cloudinary.com/v1_1";

/// Unsigned-upload settings: the cloud to upload into and the preset that
/// authorizes it.
#[derive(Debug, Clone)]
pub struct CloudinaryConfig {
  pub cloud_name: String,
  pub upload_preset: String,
  pub endpoint: String,
  pub timeout: Duration,
}

impl CloudinaryConfig {
  pub fn new(cloud_name: impl Into<String>, upload_preset: impl Into<String>) -> Self {
    Self {
      cloud_name: cloud_name.into(),
      upload_preset: upload_preset.into(),
      endpoint: DEFAULT_ENDPOINT.to_string(),
      timeout: Duration::from_secs(30),
    }
  }

  pub fn upload_url(&self) -> String {
    format!("{}/{}/image/upload", self.endpoint, self.cloud_name)
  }
}

pub struct CloudinaryHost {
  client: Client,
  config: CloudinaryConfig,
}

impl CloudinaryHost {
  pub fn new(config: CloudinaryConfig) -> Result<Self, UploadError> {
    let client = Client::builder().timeout(config.timeout).build()?;
    Ok(Self { client, config })
  }
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
  secure_url: Option<String>,
  public_id: Option<String>,
  error: Option<UploadErrorBody>,
}

#[derive(Debug, Deserialize)]
struct UploadErrorBody {
  message: String,
}

/// The body alone decides success: a `secure_url` means the asset exists,
/// anything else is a failed upload regardless of HTTP status.
fn interpret_response(body: &str) -> Result<UploadedAsset, UploadError> {
  let parsed: UploadResponse = serde_json::from_str(body).map_err(|e| UploadError::Decode(e.to_string()))?;
  match parsed.secure_url.filter(|url| !url.is_empty()) {
    Some(secure_url) => Ok(UploadedAsset {
      secure_url,
      public_id: parsed.public_id,
    }),
    None => Err(UploadError::MissingUrl(parsed.error.map(|e| e.message))),
  }
}

#[async_trait]
impl AssetHost for CloudinaryHost {
  #[instrument(skip(self, image), fields(file_name = %image.file_name, size = image.bytes.len()))]
  async fn upload(&self, image: &ImageFile) -> Result<UploadedAsset, UploadError> {
    let part = Part::bytes(image.bytes.to_vec())
      .file_name(image.file_name.clone())
      .mime_str(image.content_type_or_default())?;
    let form = Form::new()
      .part("file", part)
      .text("upload_preset", self.config.upload_preset.clone());

    let response = self.client.post(self.config.upload_url()).multipart(form).send().await?;
    let status = response.status();
    let body = response.text().await?;

    match interpret_response(&body) {
      Ok(asset) => {
        debug!(url = %asset.secure_url, "Image uploaded.");
        Ok(asset)
      }
      Err(e) => {
        warn!(http_status = %status, error = %e, "Image upload returned no URL.");
        Err(e)
      }
    }
  }
}
