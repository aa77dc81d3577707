// storefront_admin/src/orders/mod.rs

//! Order viewer: listing and status transitions of storefront orders.

pub mod bulk;

pub use bulk::{MarkAllCtxData, MarkAllReport};

use crate::error::{AdminError, Result};
use crate::model::order::STATUS;
use crate::model::{Order, OrderStatus};
use crate::store::{Collection, DocumentStore, FieldFilter, Query, CREATED_AT};
use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Outcome of a concurrent batch of status updates, once all have settled.
#[derive(Debug, Default)]
pub struct BulkUpdate {
  pub updated: Vec<String>,
  pub failed: Vec<(String, AdminError)>,
}

impl BulkUpdate {
  pub fn attempted(&self) -> usize {
    self.updated.len() + self.failed.len()
  }
}

pub struct OrderDesk {
  store: Arc<dyn DocumentStore>,
}

impl OrderDesk {
  pub fn new(store: Arc<dyn DocumentStore>) -> Self {
    Self { store }
  }

  /// Every order, newest first.
  #[instrument(name = "OrderDesk::load", skip(self))]
  pub async fn load(&self) -> Result<Vec<Order>> {
    let query = Query::all(Collection::Orders).order_by_desc(CREATED_AT);
    let orders: Vec<Order> = self.store.query(&query).await?.iter().map(Order::from_document).collect();
    debug!(count = orders.len(), "Orders loaded.");
    Ok(orders)
  }

  /// Sets the status and stamps its transition time. Repeating a transition
  /// is harmless; the stamp just moves forward.
  #[instrument(name = "OrderDesk::transition", skip(self))]
  pub async fn transition(&self, order_id: &str, status: OrderStatus) -> Result<()> {
    self
      .store
      .update(Collection::Orders, order_id, status.transition_fields())
      .await?;
    info!("Order status updated.");
    Ok(())
  }

  pub async fn mark_processed(&self, order_id: &str) -> Result<()> {
    self.transition(order_id, OrderStatus::Processed).await
  }

  /// Soft delete: the record stays, flagged as deleted.
  pub async fn soft_delete(&self, order_id: &str) -> Result<()> {
    self.transition(order_id, OrderStatus::Deleted).await
  }

  /// Orders whose stored status is anything but processed. Orders without a
  /// status field are not returned.
  #[instrument(name = "OrderDesk::unprocessed", skip(self))]
  pub async fn unprocessed(&self) -> Result<Vec<Order>> {
    let query = Query::all(Collection::Orders).filter(FieldFilter::NotEqual(
      STATUS.to_string(),
      OrderStatus::Processed.as_str().into(),
    ));
    Ok(self.store.query(&query).await?.iter().map(Order::from_document).collect())
  }

  /// Marks every id processed concurrently and waits for all of them.
  #[instrument(name = "OrderDesk::mark_many_processed", skip_all, fields(count = order_ids.len()))]
  pub async fn mark_many_processed(&self, order_ids: &[String]) -> BulkUpdate {
    let results = join_all(order_ids.iter().map(|id| self.mark_processed(id))).await;

    let mut outcome = BulkUpdate::default();
    for (id, result) in order_ids.iter().zip(results) {
      match result {
        Ok(()) => outcome.updated.push(id.clone()),
        Err(e) => {
          warn!(order_id = %id, error = %e, "Order update failed.");
          outcome.failed.push((id.clone(), e));
        }
      }
    }
    outcome
  }
}
