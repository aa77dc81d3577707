// storefront_admin/src/store/memory.rs

//! In-process [`DocumentStore`] used for local runs and tests.

use super::value::resolve_server_timestamps;
use super::{Collection, Direction, Document, DocumentStore, FieldMap, Query, StoreError};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use tracing::{debug, instrument};

#[derive(Default)]
struct Inner {
  collections: HashMap<Collection, Vec<Document>>,
  next_id: u64,
  last_stamp: Option<DateTime<Utc>>,
  unordered_only: HashSet<Collection>,
}

impl Inner {
  /// Server clock that never hands out the same instant twice, so records
  /// created back to back keep a strict creation order.
  fn stamp(&mut self) -> DateTime<Utc> {
    let mut now = Utc::now();
    if let Some(last) = self.last_stamp {
      if now <= last {
        now = last + Duration::microseconds(1);
      }
    }
    self.last_stamp = Some(now);
    now
  }
}

/// Documents live in insertion order per collection.
#[derive(Default)]
pub struct MemoryStore {
  inner: Mutex<Inner>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Makes ordered queries on `collection` fail the way a store without the
  /// needed index does.
  pub fn reject_ordered_queries(&self, collection: Collection) {
    self.inner.lock().unordered_only.insert(collection);
  }

  /// Inserts a document as-is, bypassing id assignment and stamping. Used to
  /// stage records that some other system wrote, such as storefront orders.
  pub fn seed(&self, collection: Collection, doc: Document) {
    self.inner.lock().collections.entry(collection).or_default().push(doc);
  }

  pub fn len(&self, collection: Collection) -> usize {
    self.inner.lock().collections.get(&collection).map_or(0, Vec::len)
  }

  pub fn is_empty(&self, collection: Collection) -> bool {
    self.len(collection) == 0
  }
}

#[async_trait]
impl DocumentStore for MemoryStore {
  #[instrument(skip(self, values), fields(collection = %collection))]
  async fn create(&self, collection: Collection, mut values: FieldMap) -> Result<Document, StoreError> {
    let mut inner = self.inner.lock();
    inner.next_id += 1;
    let id = format!("mem{:017}", inner.next_id);
    let stamp = inner.stamp();
    resolve_server_timestamps(&mut values, stamp);
    let doc = Document::new(id, values);
    inner.collections.entry(collection).or_default().push(doc.clone());
    debug!(id = %doc.id, "Document created.");
    Ok(doc)
  }

  #[instrument(skip(self), fields(collection = %query.collection))]
  async fn query(&self, query: &Query) -> Result<Vec<Document>, StoreError> {
    let inner = self.inner.lock();
    if query.order_by.is_some() && inner.unordered_only.contains(&query.collection) {
      return Err(StoreError::Rejected {
        status: "FAILED_PRECONDITION".to_string(),
        message: format!("The query on '{}' requires an index.", query.collection),
      });
    }

    let mut docs: Vec<Document> = inner
      .collections
      .get(&query.collection)
      .map(|docs| {
        docs
          .iter()
          .filter(|doc| query.filter.as_ref().map_or(true, |f| f.matches(doc)))
          .cloned()
          .collect()
      })
      .unwrap_or_default();
    drop(inner);

    if let Some(order_by) = &query.order_by {
      docs.retain(|doc| doc.get(&order_by.field).is_some());
      docs.sort_by(|a, b| {
        let ordering = match (a.get(&order_by.field), b.get(&order_by.field)) {
          (Some(x), Some(y)) => x.compare(y).unwrap_or(Ordering::Equal),
          _ => Ordering::Equal,
        };
        match order_by.direction {
          Direction::Ascending => ordering,
          Direction::Descending => ordering.reverse(),
        }
      });
    }
    if let Some(limit) = query.limit {
      docs.truncate(limit as usize);
    }
    debug!(count = docs.len(), "Query served.");
    Ok(docs)
  }

  #[instrument(skip(self, values), fields(collection = %collection))]
  async fn update(&self, collection: Collection, id: &str, mut values: FieldMap) -> Result<(), StoreError> {
    let mut inner = self.inner.lock();
    let stamp = inner.stamp();
    resolve_server_timestamps(&mut values, stamp);
    let doc = inner
      .collections
      .get_mut(&collection)
      .and_then(|docs| docs.iter_mut().find(|d| d.id == id))
      .ok_or_else(|| StoreError::NotFound {
        collection,
        id: id.to_string(),
      })?;
    doc.fields.extend(values);
    Ok(())
  }

  #[instrument(skip(self), fields(collection = %collection))]
  async fn delete(&self, collection: Collection, id: &str) -> Result<(), StoreError> {
    if let Some(docs) = self.inner.lock().collections.get_mut(&collection) {
      docs.retain(|d| d.id != id);
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::store::{FieldFilter, FieldValue, CREATED_AT};

  fn fields(name: &str) -> FieldMap {
    let mut fields = FieldMap::new();
    fields.insert("name".into(), name.into());
    fields.insert(CREATED_AT.into(), FieldValue::ServerTimestamp);
    fields
  }

  #[tokio::test]
  async fn ordered_query_returns_newest_first_and_skips_unstamped() {
    let store = MemoryStore::new();
    store.create(Collection::Products, fields("first")).await.unwrap();
    store.create(Collection::Products, fields("second")).await.unwrap();
    let mut legacy = FieldMap::new();
    legacy.insert("name".into(), "legacy".into());
    store.seed(Collection::Products, Document::new("old", legacy));

    let ordered = store
      .query(&Query::all(Collection::Products).order_by_desc(CREATED_AT))
      .await
      .unwrap();
    let names: Vec<_> = ordered.iter().filter_map(|d| d.str_field("name")).collect();
    assert_eq!(names, vec!["second", "first"]);

    let unordered = store.query(&Query::all(Collection::Products)).await.unwrap();
    assert_eq!(unordered.len(), 3);
  }

  #[tokio::test]
  async fn rejected_ordering_only_affects_ordered_queries() {
    let store = MemoryStore::new();
    store.reject_ordered_queries(Collection::Products);
    store.create(Collection::Products, fields("a")).await.unwrap();

    let err = store
      .query(&Query::all(Collection::Products).order_by_desc(CREATED_AT))
      .await
      .unwrap_err();
    assert!(matches!(err, StoreError::Rejected { .. }));
    assert_eq!(store.query(&Query::all(Collection::Products)).await.unwrap().len(), 1);
  }

  #[tokio::test]
  async fn update_merges_fields_and_missing_documents_fail() {
    let store = MemoryStore::new();
    let doc = store.create(Collection::Orders, fields("o")).await.unwrap();
    let mut patch = FieldMap::new();
    patch.insert("status".into(), "processed".into());
    store.update(Collection::Orders, &doc.id, patch.clone()).await.unwrap();

    let docs = store
      .query(&Query::all(Collection::Orders).filter(FieldFilter::Equal("status".into(), "processed".into())))
      .await
      .unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].str_field("name"), Some("o"));

    let err = store.update(Collection::Orders, "nope", patch).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));
  }
}
