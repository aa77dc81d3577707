// storefront_admin/src/store/mod.rs

//! Document store collaborator: the `products` and `orders` collections.
//!
//! [`DocumentStore`] is the seam; [`firestore::FirestoreStore`] talks to the
//! Firestore REST API and [`memory::MemoryStore`] keeps everything in process
//! with the same query semantics.

pub mod firestore;
pub mod memory;
pub mod value;

pub use value::{FieldMap, FieldValue};

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Field every admin-written record is stamped with on creation.
pub const CREATED_AT: &str = "createdAt";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
  Products,
  Orders,
}

impl Collection {
  pub fn as_str(&self) -> &'static str {
    match self {
      Collection::Products => "products",
      Collection::Orders => "orders",
    }
  }
}

impl fmt::Display for Collection {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A stored record: store-assigned id plus its fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
  pub id: String,
  pub fields: FieldMap,
}

impl Document {
  pub fn new(id: impl Into<String>, fields: FieldMap) -> Self {
    Self { id: id.into(), fields }
  }

  pub fn get(&self, field: &str) -> Option<&FieldValue> {
    self.fields.get(field)
  }

  pub fn str_field(&self, field: &str) -> Option<&str> {
    self.get(field).and_then(FieldValue::as_str)
  }

  pub fn f64_field(&self, field: &str) -> Option<f64> {
    self.get(field).and_then(FieldValue::as_f64)
  }

  pub fn timestamp_field(&self, field: &str) -> Option<chrono::DateTime<chrono::Utc>> {
    self.get(field).and_then(FieldValue::as_timestamp)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
  Ascending,
  Descending,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
  pub field: String,
  pub direction: Direction,
}

/// Single-field predicate. As in Firestore, documents that lack the field
/// never match, whichever operator is used.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldFilter {
  Equal(String, FieldValue),
  NotEqual(String, FieldValue),
}

impl FieldFilter {
  pub fn field(&self) -> &str {
    match self {
      FieldFilter::Equal(field, _) | FieldFilter::NotEqual(field, _) => field,
    }
  }

  pub fn matches(&self, doc: &Document) -> bool {
    match self {
      FieldFilter::Equal(field, expected) => doc.get(field).is_some_and(|v| v == expected),
      FieldFilter::NotEqual(field, excluded) => doc.get(field).is_some_and(|v| v != excluded),
    }
  }
}

/// Read request against one collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
  pub collection: Collection,
  pub order_by: Option<OrderBy>,
  pub filter: Option<FieldFilter>,
  pub limit: Option<u32>,
}

impl Query {
  /// Every document in `collection`, in store order.
  pub fn all(collection: Collection) -> Self {
    Self {
      collection,
      order_by: None,
      filter: None,
      limit: None,
    }
  }

  pub fn order_by_desc(mut self, field: &str) -> Self {
    self.order_by = Some(OrderBy {
      field: field.to_string(),
      direction: Direction::Descending,
    });
    self
  }

  pub fn filter(mut self, filter: FieldFilter) -> Self {
    self.filter = Some(filter);
    self
  }

  pub fn limit(mut self, limit: u32) -> Self {
    self.limit = Some(limit);
    self
  }
}

#[derive(Debug, Error)]
pub enum StoreError {
  #[error("network error: {0}")]
  Network(#[from] reqwest::Error),

  #[error("document {collection}/{id} not found")]
  NotFound { collection: Collection, id: String },

  /// The store refused the request, e.g. an ordered query without a usable index.
  #[error("request rejected ({status}): {message}")]
  Rejected { status: String, message: String },

  #[error("malformed response: {0}")]
  Decode(String),
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
  /// Creates a record with a store-assigned id. `ServerTimestamp` fields are
  /// stamped by the store and come back resolved.
  async fn create(&self, collection: Collection, fields: FieldMap) -> Result<Document, StoreError>;

  async fn query(&self, query: &Query) -> Result<Vec<Document>, StoreError>;

  /// Overwrites the given fields of an existing record, leaving the others untouched.
  async fn update(&self, collection: Collection, id: &str, fields: FieldMap) -> Result<(), StoreError>;

  /// Physically removes a record. Deleting a missing record succeeds.
  async fn delete(&self, collection: Collection, id: &str) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
  use super::*;

  fn doc_with_status(status: Option<&str>) -> Document {
    let mut fields = FieldMap::new();
    if let Some(status) = status {
      fields.insert("status".into(), status.into());
    }
    Document::new("o1", fields)
  }

  #[test]
  fn not_equal_excludes_documents_missing_the_field() {
    let filter = FieldFilter::NotEqual("status".into(), "processed".into());
    assert!(filter.matches(&doc_with_status(Some("pending"))));
    assert!(!filter.matches(&doc_with_status(Some("processed"))));
    assert!(!filter.matches(&doc_with_status(None)));
  }
}
