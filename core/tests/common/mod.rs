// tests/common/mod.rs
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;
use storefront_admin::assets::memory::MemoryAssetHost;
use storefront_admin::assets::{AssetHost, ImageFile, UploadError, UploadedAsset};
use storefront_admin::catalog::{PreviewRegistry, QueryCapability};
use storefront_admin::notice::MessageArea;
use storefront_admin::render::RenderSettings;
use storefront_admin::store::memory::MemoryStore;
use storefront_admin::store::{Collection, Document, DocumentStore, FieldMap, FieldValue, Query, StoreError};
use storefront_admin::AdminConsole;
use std::time::Duration;
use tokio::sync::Barrier;
use tracing::Level;

// --- Recorded collaborator calls ---
#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
  Create { collection: Collection, name: Option<String> },
  Query { collection: Collection, ordered: bool, filtered: bool },
  /// `fields` lists the written field names, sorted.
  Update { collection: Collection, id: String, fields: Vec<String> },
  Delete { collection: Collection, id: String },
}

/// Memory store that records every call and fails on demand.
#[derive(Default)]
pub struct RecordingStore {
  inner: MemoryStore,
  calls: Mutex<Vec<StoreCall>>,
  failing_updates: Mutex<HashSet<String>>,
  failing_creates: Mutex<HashSet<String>>,
  failing_queries: Mutex<bool>,
  update_gate: Mutex<Option<Arc<Barrier>>>,
}

impl RecordingStore {
  pub fn new() -> Arc<Self> {
    Arc::new(Self::default())
  }

  pub fn memory(&self) -> &MemoryStore {
    &self.inner
  }

  pub fn calls(&self) -> Vec<StoreCall> {
    self.calls.lock().clone()
  }

  pub fn creates(&self) -> Vec<String> {
    self
      .calls()
      .into_iter()
      .filter_map(|c| match c {
        StoreCall::Create { name, .. } => name,
        _ => None,
      })
      .collect()
  }

  pub fn updated_ids(&self) -> Vec<String> {
    self
      .calls()
      .into_iter()
      .filter_map(|c| match c {
        StoreCall::Update { id, .. } => Some(id),
        _ => None,
      })
      .collect()
  }

  pub fn clear_calls(&self) {
    self.calls.lock().clear();
  }

  pub fn fail_update_of(&self, id: &str) {
    self.failing_updates.lock().insert(id.to_string());
  }

  /// Fails creation of the product with this name.
  pub fn fail_create_of(&self, name: &str) {
    self.failing_creates.lock().insert(name.to_string());
  }

  /// Holds every update until `parties` updates are in flight at once.
  pub fn gate_updates(&self, parties: usize) {
    *self.update_gate.lock() = Some(Arc::new(Barrier::new(parties)));
  }

  /// Field names written by each update of `id`, in call order.
  pub fn update_fields_of(&self, id: &str) -> Vec<Vec<String>> {
    self
      .calls()
      .into_iter()
      .filter_map(|c| match c {
        StoreCall::Update { id: updated, fields, .. } if updated == id => Some(fields),
        _ => None,
      })
      .collect()
  }

  pub fn fail_queries(&self, fail: bool) {
    *self.failing_queries.lock() = fail;
  }

  pub async fn doc(&self, collection: Collection, id: &str) -> Option<Document> {
    let docs = self.inner.query(&Query::all(collection)).await.ok()?;
    docs.into_iter().find(|d| d.id == id)
  }
}

fn unavailable() -> StoreError {
  StoreError::Rejected {
    status: "UNAVAILABLE".into(),
    message: "injected failure".into(),
  }
}

#[async_trait]
impl DocumentStore for RecordingStore {
  async fn create(&self, collection: Collection, fields: FieldMap) -> Result<Document, StoreError> {
    let name = fields.get("name").and_then(FieldValue::as_str).map(str::to_string);
    self.calls.lock().push(StoreCall::Create {
      collection,
      name: name.clone(),
    });
    if name.is_some_and(|n| self.failing_creates.lock().contains(&n)) {
      return Err(unavailable());
    }
    self.inner.create(collection, fields).await
  }

  async fn query(&self, query: &Query) -> Result<Vec<Document>, StoreError> {
    self.calls.lock().push(StoreCall::Query {
      collection: query.collection,
      ordered: query.order_by.is_some(),
      filtered: query.filter.is_some(),
    });
    if *self.failing_queries.lock() {
      return Err(unavailable());
    }
    self.inner.query(query).await
  }

  async fn update(&self, collection: Collection, id: &str, fields: FieldMap) -> Result<(), StoreError> {
    let mut written: Vec<String> = fields.keys().cloned().collect();
    written.sort();
    self.calls.lock().push(StoreCall::Update {
      collection,
      id: id.to_string(),
      fields: written,
    });
    let gate = self.update_gate.lock().clone();
    if let Some(gate) = gate {
      gate.wait().await;
    }
    if self.failing_updates.lock().contains(id) {
      return Err(unavailable());
    }
    self.inner.update(collection, id, fields).await
  }

  async fn delete(&self, collection: Collection, id: &str) -> Result<(), StoreError> {
    self.calls.lock().push(StoreCall::Delete {
      collection,
      id: id.to_string(),
    });
    self.inner.delete(collection, id).await
  }
}

/// Asset host that records uploads in order and can refuse chosen files.
pub struct RecordingAssetHost {
  inner: MemoryAssetHost,
  uploads: Mutex<Vec<String>>,
  failing: Mutex<HashSet<String>>,
}

impl RecordingAssetHost {
  pub fn new() -> Arc<Self> {
    Arc::new(Self {
      inner: MemoryAssetHost::new("https://cdn.test/img"),
      uploads: Mutex::new(Vec::new()),
      failing: Mutex::new(HashSet::new()),
    })
  }

  pub fn uploads(&self) -> Vec<String> {
    self.uploads.lock().clone()
  }

  /// Uploads of this file name answer without a `secure_url`.
  pub fn fail_on(&self, file_name: &str) {
    self.failing.lock().insert(file_name.to_string());
  }
}

#[async_trait]
impl AssetHost for RecordingAssetHost {
  async fn upload(&self, image: &ImageFile) -> Result<UploadedAsset, UploadError> {
    self.uploads.lock().push(image.file_name.clone());
    // Remote hosts suspend here; let other tasks interleave.
    tokio::task::yield_now().await;
    if self.failing.lock().contains(&image.file_name) {
      return Err(UploadError::MissingUrl(Some("Upload preset not found".into())));
    }
    self.inner.upload(image).await
  }
}

// --- Fixtures ---
pub struct Harness {
  pub store: Arc<RecordingStore>,
  pub assets: Arc<RecordingAssetHost>,
  pub previews: PreviewRegistry,
  pub console: AdminConsole,
}

pub fn harness() -> Harness {
  harness_with(QueryCapability::ORDERED)
}

pub fn harness_with(capability: QueryCapability) -> Harness {
  let store = RecordingStore::new();
  let assets = RecordingAssetHost::new();
  let previews = PreviewRegistry::new("/previews/");
  let console = AdminConsole::new(
    store.clone(),
    assets.clone(),
    capability,
    RenderSettings::default(),
    MessageArea::new(Duration::from_millis(3500)),
    previews.clone(),
  )
  .expect("console wires up");
  Harness {
    store,
    assets,
    previews,
    console,
  }
}

pub fn image(name: &str) -> ImageFile {
  ImageFile::new(name, Some("image/jpeg".into()), vec![0xFFu8, 0xD8, 0xFF, 0xE0])
}

pub fn at(hour: u32, minute: u32) -> DateTime<Utc> {
  Utc.with_ymd_and_hms(2026, 10, 18, hour, minute, 0).unwrap()
}

pub fn item(name: &str, price: f64, quantity: i64) -> FieldValue {
  let mut fields = FieldMap::new();
  fields.insert("name".into(), name.into());
  fields.insert("price".into(), FieldValue::Double(price));
  fields.insert("quantity".into(), FieldValue::Integer(quantity));
  fields.insert("imageUrl".into(), format!("https://cdn.test/{}.jpg", name).into());
  FieldValue::Map(fields)
}

/// Stages an order the way the storefront writes them.
pub fn seed_order(store: &RecordingStore, id: &str, status: Option<&str>, created: DateTime<Utc>, items: Vec<FieldValue>) {
  let mut fields = FieldMap::new();
  fields.insert("items".into(), FieldValue::Array(items));
  fields.insert("createdAt".into(), FieldValue::Timestamp(created));
  if let Some(status) = status {
    fields.insert("status".into(), status.into());
  }
  store.memory().seed(Collection::Orders, Document::new(id, fields));
}

pub fn seed_product(store: &RecordingStore, id: &str, name: &str, category: &str, created: Option<DateTime<Utc>>) {
  let mut fields = FieldMap::new();
  fields.insert("name".into(), name.into());
  fields.insert("price".into(), FieldValue::Double(5000.0));
  fields.insert("category".into(), category.into());
  fields.insert("imageUrl".into(), format!("https://cdn.test/{}.jpg", id).into());
  if let Some(created) = created {
    fields.insert("createdAt".into(), FieldValue::Timestamp(created));
  }
  store.memory().seed(Collection::Products, Document::new(id, fields));
}

// --- Helper for Tracing Setup ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
