// storefront_admin/src/store/firestore.rs

//! [`DocumentStore`] over the Firestore REST API (v1).
//!
//! Writes go through `documents:commit` so creation and status timestamps
//! can use the `REQUEST_TIME` server transform. Reads go through
//! `documents:runQuery`.

use super::{Collection, Direction, Document, DocumentStore, FieldFilter, FieldMap, FieldValue, Query, StoreError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::time::Duration;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

pub const DEFAULT_ENDPOINT: &str = "https://firestore.googleapis.com/v1";
pub const DEFAULT_DATABASE: &str = "(default)";

#[derive(Debug, Clone)]
pub struct FirestoreConfig {
  pub project_id: String,
  /// Web API key appended as `?key=`; requests go unauthenticated otherwise.
  pub api_key: Option<String>,
  pub database: String,
  pub endpoint: String,
  pub timeout: Duration,
}

impl FirestoreConfig {
  pub fn new(project_id: impl Into<String>) -> Self {
    Self {
      project_id: project_id.into(),
      api_key: None,
      database: DEFAULT_DATABASE.to_string(),
      endpoint: DEFAULT_ENDPOINT.to_string(),
      timeout: Duration::from_secs(30),
    }
  }

  /// Resource name prefix, e.g. `projects/p/databases/(default)/documents`.
  pub fn documents_path(&self) -> String {
    format!("projects/{}/databases/{}/documents", self.project_id, self.database)
  }

  pub fn document_name(&self, collection: Collection, id: &str) -> String {
    format!("{}/{}/{}", self.documents_path(), collection, id)
  }
}

pub struct FirestoreStore {
  client: Client,
  config: FirestoreConfig,
}

impl FirestoreStore {
  pub fn new(config: FirestoreConfig) -> Result<Self, StoreError> {
    let client = Client::builder().timeout(config.timeout).build()?;
    Ok(Self { client, config })
  }

  fn url(&self, suffix: &str) -> String {
    format!("{}/{}{}", self.config.endpoint, self.config.documents_path(), suffix)
  }

  fn with_key(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
    match &self.config.api_key {
      Some(key) => request.query(&[("key", key)]),
      None => request,
    }
  }

  async fn commit(&self, write: Value) -> Result<CommitResponse, StoreError> {
    let response = self
      .with_key(self.client.post(self.url(":commit")))
      .json(&json!({ "writes": [write] }))
      .send()
      .await?;
    let response = check_status(response).await?;
    response
      .json::<CommitResponse>()
      .await
      .map_err(|e| StoreError::Decode(e.to_string()))
  }
}

#[async_trait]
impl DocumentStore for FirestoreStore {
  #[instrument(skip(self, values), fields(collection = %collection))]
  async fn create(&self, collection: Collection, mut values: FieldMap) -> Result<Document, StoreError> {
    let id = new_document_id();
    let write = build_write(&self.config.document_name(collection, &id), &values, false, false);
    let committed = self.commit(write).await?;
    super::value::resolve_server_timestamps(&mut values, committed.commit_time);
    debug!(%id, "Document committed.");
    Ok(Document::new(id, values))
  }

  #[instrument(skip(self), fields(collection = %query.collection))]
  async fn query(&self, query: &Query) -> Result<Vec<Document>, StoreError> {
    let response = self
      .with_key(self.client.post(self.url(":runQuery")))
      .json(&build_structured_query(query))
      .send()
      .await?;
    let response = check_status(response).await?;
    let rows: Vec<RunQueryRow> = response.json().await.map_err(|e| StoreError::Decode(e.to_string()))?;

    let docs = rows
      .into_iter()
      .filter_map(|row| row.document)
      .map(|raw| decode_document(&raw))
      .collect::<Result<Vec<_>, _>>()?;
    debug!(count = docs.len(), "Query served.");
    Ok(docs)
  }

  #[instrument(skip(self, values), fields(collection = %collection))]
  async fn update(&self, collection: Collection, id: &str, values: FieldMap) -> Result<(), StoreError> {
    let write = build_write(&self.config.document_name(collection, id), &values, true, true);
    match self.commit(write).await {
      Err(StoreError::Rejected { status, .. }) if status == "NOT_FOUND" => Err(StoreError::NotFound {
        collection,
        id: id.to_string(),
      }),
      other => other.map(|_| ()),
    }
  }

  #[instrument(skip(self), fields(collection = %collection))]
  async fn delete(&self, collection: Collection, id: &str) -> Result<(), StoreError> {
    let response = self
      .with_key(self.client.delete(self.url(&format!("/{}/{}", collection, id))))
      .send()
      .await?;
    check_status(response).await?;
    Ok(())
  }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommitResponse {
  commit_time: DateTime<Utc>,
}

#[derive(Deserialize)]
struct RunQueryRow {
  document: Option<RawDocument>,
}

#[derive(Deserialize)]
struct RawDocument {
  name: String,
  #[serde(default)]
  fields: Map<String, Value>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
  error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
  #[serde(default)]
  status: String,
  #[serde(default)]
  message: String,
}

/// Turns a non-2xx response into [`StoreError::Rejected`] using the API's error envelope.
async fn check_status(response: Response) -> Result<Response, StoreError> {
  let status = response.status();
  if status.is_success() {
    return Ok(response);
  }
  let body = response.text().await.unwrap_or_default();
  let (status_name, message) = match serde_json::from_str::<ErrorEnvelope>(&body) {
    Ok(envelope) => (envelope.error.status, envelope.error.message),
    Err(_) => (status.as_u16().to_string(), body.chars().take(200).collect()),
  };
  warn!(http_status = %status, status = %status_name, %message, "Firestore request rejected.");
  Err(StoreError::Rejected {
    status: status_name,
    message,
  })
}

/// 20 alphanumeric characters, the shape of Firestore auto-ids.
fn new_document_id() -> String {
  Uuid::new_v4().simple().to_string()[..20].to_string()
}

/// Builds one `Write`. Server-timestamp fields become `REQUEST_TIME`
/// transforms. With `merge`, only the listed fields are touched.
pub(crate) fn build_write(name: &str, values: &FieldMap, merge: bool, must_exist: bool) -> Value {
  let mut fields = Map::new();
  let mut transforms = Vec::new();
  for (key, value) in values {
    match value {
      FieldValue::ServerTimestamp => transforms.push(json!({
        "fieldPath": key,
        "setToServerValue": "REQUEST_TIME",
      })),
      other => {
        fields.insert(key.clone(), encode_value(other));
      }
    }
  }

  let mut write = json!({
    "update": { "name": name, "fields": fields },
    "currentDocument": { "exists": must_exist },
  });
  if merge {
    let paths: Vec<&String> = fields.keys().collect();
    write["updateMask"] = json!({ "fieldPaths": paths });
  }
  if !transforms.is_empty() {
    write["updateTransforms"] = Value::Array(transforms);
  }
  write
}

pub(crate) fn build_structured_query(query: &Query) -> Value {
  let mut structured = json!({
    "from": [{ "collectionId": query.collection.as_str() }],
  });
  if let Some(order_by) = &query.order_by {
    let direction = match order_by.direction {
      Direction::Ascending => "ASCENDING",
      Direction::Descending => "DESCENDING",
    };
    structured["orderBy"] = json!([{ "field": { "fieldPath": order_by.field }, "direction": direction }]);
  }
  if let Some(filter) = &query.filter {
    let (op, value) = match filter {
      FieldFilter::Equal(_, value) => ("EQUAL", value),
      FieldFilter::NotEqual(_, value) => ("NOT_EQUAL", value),
    };
    structured["where"] = json!({
      "fieldFilter": {
        "field": { "fieldPath": filter.field() },
        "op": op,
        "value": encode_value(value),
      }
    });
  }
  if let Some(limit) = query.limit {
    structured["limit"] = json!(limit);
  }
  json!({ "structuredQuery": structured })
}

pub(crate) fn encode_value(value: &FieldValue) -> Value {
  match value {
    FieldValue::Null | FieldValue::ServerTimestamp => json!({ "nullValue": null }),
    FieldValue::Bool(b) => json!({ "booleanValue": b }),
    // int64 travels as a decimal string
    FieldValue::Integer(i) => json!({ "integerValue": i.to_string() }),
    FieldValue::Double(d) => json!({ "doubleValue": d }),
    FieldValue::String(s) => json!({ "stringValue": s }),
    FieldValue::Timestamp(ts) => json!({ "timestampValue": ts.to_rfc3339() }),
    FieldValue::Array(values) => json!({
      "arrayValue": { "values": values.iter().map(encode_value).collect::<Vec<_>>() }
    }),
    FieldValue::Map(fields) => {
      let encoded: Map<String, Value> = fields.iter().map(|(k, v)| (k.clone(), encode_value(v))).collect();
      json!({ "mapValue": { "fields": encoded } })
    }
  }
}

pub(crate) fn decode_value(raw: &Value) -> Result<FieldValue, StoreError> {
  let object = raw
    .as_object()
    .ok_or_else(|| StoreError::Decode(format!("field value is not an object: {raw}")))?;
  let (kind, inner) = object
    .iter()
    .next()
    .ok_or_else(|| StoreError::Decode("empty field value".to_string()))?;

  let decoded = match kind.as_str() {
    "nullValue" => FieldValue::Null,
    "booleanValue" => FieldValue::Bool(inner.as_bool().unwrap_or_default()),
    "integerValue" => {
      let text = inner.as_str().map(str::to_string).unwrap_or_else(|| inner.to_string());
      FieldValue::Integer(
        text
          .parse()
          .map_err(|_| StoreError::Decode(format!("bad integerValue {text}")))?,
      )
    }
    "doubleValue" => FieldValue::Double(decode_double(inner)?),
    "stringValue" | "referenceValue" => FieldValue::String(inner.as_str().unwrap_or_default().to_string()),
    "timestampValue" => {
      let text = inner.as_str().unwrap_or_default();
      let parsed = DateTime::parse_from_rfc3339(text)
        .map_err(|e| StoreError::Decode(format!("bad timestampValue {text}: {e}")))?;
      FieldValue::Timestamp(parsed.with_timezone(&Utc))
    }
    "arrayValue" => {
      let values = match inner.get("values").and_then(Value::as_array) {
        Some(values) => values.iter().map(decode_value).collect::<Result<Vec<_>, _>>()?,
        None => Vec::new(),
      };
      FieldValue::Array(values)
    }
    "mapValue" => {
      let empty = Map::new();
      let fields = inner.get("fields").and_then(Value::as_object).unwrap_or(&empty);
      FieldValue::Map(decode_fields(fields)?)
    }
    // geoPointValue, bytesValue and future kinds carry nothing the admin reads.
    other => {
      warn!(kind = other, "Unsupported Firestore value kind read as null.");
      FieldValue::Null
    }
  };
  Ok(decoded)
}

/// Non-finite doubles travel as the strings `NaN`, `Infinity` and `-Infinity`.
fn decode_double(inner: &Value) -> Result<f64, StoreError> {
  if let Some(number) = inner.as_f64() {
    return Ok(number);
  }
  match inner.as_str() {
    Some("NaN") => Ok(f64::NAN),
    Some("Infinity") => Ok(f64::INFINITY),
    Some("-Infinity") => Ok(f64::NEG_INFINITY),
    _ => Err(StoreError::Decode(format!("bad doubleValue {inner}"))),
  }
}

fn decode_fields(fields: &Map<String, Value>) -> Result<FieldMap, StoreError> {
  fields
    .iter()
    .map(|(key, raw)| decode_value(raw).map(|v| (key.clone(), v)))
    .collect()
}

fn decode_document(raw: &RawDocument) -> Result<Document, StoreError> {
  let id = raw
    .name
    .rsplit('/')
    .next()
    .filter(|id| !id.is_empty())
    .ok_or_else(|| StoreError::Decode(format!("bad document name {}", raw.name)))?;
  Ok(Document::new(id, decode_fields(&raw.fields)?))
}
