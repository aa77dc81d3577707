// storefront_admin/src/config.rs

use crate::assets::cloudinary::{self, CloudinaryConfig};
use crate::error::{AdminError, Result};
use crate::store::firestore::{self, FirestoreConfig};
use std::env;
use std::time::Duration;

pub const DEFAULT_CURRENCY_SYMBOL: &str = "₦";
/// West Africa Time.
pub const DEFAULT_UTC_OFFSET_MINUTES: i32 = 60;
pub const DEFAULT_STORE_NAME: &str = "the store";
pub const DEFAULT_MESSAGE_TTL: Duration = Duration::from_millis(3500);
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
  /// Firestore documents and Cloudinary uploads.
  Firestore,
  /// Everything in process; nothing survives a restart.
  Memory,
}

#[derive(Debug, Clone)]
pub struct AdminConfig {
  pub backend: BackendKind,
  pub firestore: Option<FirestoreConfig>,
  pub cloudinary: Option<CloudinaryConfig>,
  pub currency_symbol: String,
  pub utc_offset_minutes: i32,
  pub contact_phone: String,
  pub store_name: String,
  pub message_ttl: Duration,
}

impl Default for AdminConfig {
  /// In-memory backend with the display defaults.
  fn default() -> Self {
    Self {
      backend: BackendKind::Memory,
      firestore: None,
      cloudinary: None,
      currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
      utc_offset_minutes: DEFAULT_UTC_OFFSET_MINUTES,
      contact_phone: String::new(),
      store_name: DEFAULT_STORE_NAME.to_string(),
      message_ttl: DEFAULT_MESSAGE_TTL,
    }
  }
}

impl AdminConfig {
  pub fn from_env() -> Result<Self> {
    Self::from_lookup(|name| env::var(name).ok())
  }

  /// Builds the configuration from any variable source. Empty values count as unset.
  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
    let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
    let require = |name: &str| {
      get(name).ok_or_else(|| AdminError::Config(format!("Missing environment variable '{}'", name)))
    };

    let backend = match get("ADMIN_BACKEND").as_deref() {
      None | Some("firestore") => BackendKind::Firestore,
      Some("memory") => BackendKind::Memory,
      Some(other) => return Err(AdminError::Config(format!("Invalid ADMIN_BACKEND: '{}'", other))),
    };

    let timeout = match get("HTTP_TIMEOUT_SECS") {
      Some(raw) => Duration::from_secs(
        raw
          .parse::<u64>()
          .map_err(|e| AdminError::Config(format!("Invalid HTTP_TIMEOUT_SECS: {}", e)))?,
      ),
      None => DEFAULT_HTTP_TIMEOUT,
    };

    let (firestore, cloudinary) = match backend {
      BackendKind::Memory => (None, None),
      BackendKind::Firestore => {
        let mut store = FirestoreConfig::new(require("FIRESTORE_PROJECT_ID")?);
        store.api_key = get("FIRESTORE_API_KEY");
        store.database = get("FIRESTORE_DATABASE").unwrap_or_else(|| firestore::DEFAULT_DATABASE.to_string());
        store.endpoint = get("FIRESTORE_ENDPOINT").unwrap_or_else(|| firestore::DEFAULT_ENDPOINT.to_string());
        store.timeout = timeout;

        let mut assets = CloudinaryConfig::new(require("CLOUDINARY_CLOUD_NAME")?, require("CLOUDINARY_UPLOAD_PRESET")?);
        assets.endpoint = get("CLOUDINARY_ENDPOINT").unwrap_or_else(|| cloudinary::DEFAULT_ENDPOINT.to_string());
        assets.timeout = timeout;

        (Some(store), Some(assets))
      }
    };

    let utc_offset_minutes = match get("DISPLAY_UTC_OFFSET_MINUTES") {
      Some(raw) => raw
        .parse::<i32>()
        .ok()
        .filter(|m| m.abs() < 24 * 60)
        .ok_or_else(|| AdminError::Config(format!("Invalid DISPLAY_UTC_OFFSET_MINUTES: '{}'", raw)))?,
      None => DEFAULT_UTC_OFFSET_MINUTES,
    };

    let message_ttl = match get("MESSAGE_TTL_MS") {
      Some(raw) => Duration::from_millis(
        raw
          .parse::<u64>()
          .map_err(|e| AdminError::Config(format!("Invalid MESSAGE_TTL_MS: {}", e)))?,
      ),
      None => DEFAULT_MESSAGE_TTL,
    };

    let config = Self {
      backend,
      firestore,
      cloudinary,
      currency_symbol: get("CURRENCY_SYMBOL").unwrap_or_else(|| DEFAULT_CURRENCY_SYMBOL.to_string()),
      utc_offset_minutes,
      contact_phone: get("CONTACT_PHONE").unwrap_or_default(),
      store_name: get("STORE_NAME").unwrap_or_else(|| DEFAULT_STORE_NAME.to_string()),
      message_ttl,
    };

    tracing::info!(backend = ?config.backend, "Admin configuration loaded.");
    Ok(config)
  }
}
