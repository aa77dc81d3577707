// storefront_admin/src/model/order.rs

use crate::store::{Document, FieldMap, FieldValue, CREATED_AT};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use tracing::warn;

pub const ITEMS: &str = "items";
pub const TOTAL: &str = "total";
pub const STATUS: &str = "status";
pub const PROCESSED_AT: &str = "processedAt";
pub const DELETED_AT: &str = "deletedAt";

/// Number of trailing id characters shown to people.
pub const SHORT_ID_LEN: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
  #[default]
  Pending,
  Processed,
  /// Soft delete: the record stays for history.
  Deleted,
}

impl OrderStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      OrderStatus::Pending => "pending",
      OrderStatus::Processed => "processed",
      OrderStatus::Deleted => "deleted",
    }
  }

  /// Decodes a stored status. Absent or unrecognised values count as pending.
  pub fn from_stored(raw: Option<&str>) -> Self {
    match raw {
      None | Some("") | Some("pending") => OrderStatus::Pending,
      Some("processed") => OrderStatus::Processed,
      Some("deleted") => OrderStatus::Deleted,
      Some(other) => {
        warn!(status = other, "Unrecognised order status, treating as pending.");
        OrderStatus::Pending
      }
    }
  }

  /// Timestamp field stamped when an order enters this status.
  pub fn stamp_field(&self) -> Option<&'static str> {
    match self {
      OrderStatus::Pending => None,
      OrderStatus::Processed => Some(PROCESSED_AT),
      OrderStatus::Deleted => Some(DELETED_AT),
    }
  }

  /// Field changes moving an order into this status.
  pub fn transition_fields(&self) -> FieldMap {
    let mut fields = FieldMap::new();
    fields.insert(STATUS.into(), self.as_str().into());
    if let Some(stamp) = self.stamp_field() {
      fields.insert(stamp.into(), FieldValue::ServerTimestamp);
    }
    fields
  }
}

impl fmt::Display for OrderStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
  pub name: String,
  pub price: f64,
  pub quantity: u32,
  pub image_url: String,
}

impl OrderItem {
  pub fn subtotal(&self) -> f64 {
    self.price * f64::from(self.quantity)
  }

  fn from_field(value: &FieldValue) -> Option<Self> {
    let fields = value.as_map()?;
    let text = |key: &str| fields.get(key).and_then(FieldValue::as_str).unwrap_or_default().to_string();
    Some(Self {
      name: text("name"),
      price: fields.get("price").and_then(FieldValue::as_f64).unwrap_or_default(),
      quantity: fields
        .get("quantity")
        .and_then(FieldValue::as_i64)
        .and_then(|q| u32::try_from(q).ok())
        .unwrap_or_default(),
      image_url: text("imageUrl"),
    })
  }
}

/// A storefront order as the admin sees it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
  pub id: String,
  pub items: Vec<OrderItem>,
  pub total: Option<f64>,
  pub status: OrderStatus,
  pub created_at: Option<DateTime<Utc>>,
  pub processed_at: Option<DateTime<Utc>>,
  pub deleted_at: Option<DateTime<Utc>>,
}

impl Order {
  pub fn from_document(doc: &Document) -> Self {
    let items = doc
      .get(ITEMS)
      .and_then(FieldValue::as_array)
      .map(|values| values.iter().filter_map(OrderItem::from_field).collect())
      .unwrap_or_default();

    Self {
      id: doc.id.clone(),
      items,
      total: doc.f64_field(TOTAL),
      status: OrderStatus::from_stored(doc.str_field(STATUS)),
      created_at: doc.timestamp_field(CREATED_AT),
      processed_at: doc.timestamp_field(PROCESSED_AT),
      deleted_at: doc.timestamp_field(DELETED_AT),
    }
  }

  /// Sum of price × quantity over the items.
  pub fn computed_total(&self) -> f64 {
    self.items.iter().map(OrderItem::subtotal).sum()
  }

  /// The stored total when the storefront recorded one, otherwise the computed one.
  pub fn grand_total(&self) -> f64 {
    self.total.unwrap_or_else(|| self.computed_total())
  }

  /// Last [`SHORT_ID_LEN`] characters of the id.
  pub fn short_id(&self) -> &str {
    let start = self
      .id
      .char_indices()
      .rev()
      .nth(SHORT_ID_LEN - 1)
      .map_or(0, |(idx, _)| idx);
    &self.id[start..]
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn order(id: &str, items: Vec<OrderItem>, total: Option<f64>) -> Order {
    Order {
      id: id.to_string(),
      items,
      total,
      status: OrderStatus::Pending,
      created_at: None,
      processed_at: None,
      deleted_at: None,
    }
  }

  fn item(price: f64, quantity: u32) -> OrderItem {
    OrderItem {
      name: "x".into(),
      price,
      quantity,
      image_url: String::new(),
    }
  }

  #[test]
  fn total_is_computed_when_not_stored() {
    let o = order("a", vec![item(1000.0, 2), item(500.0, 1)], None);
    assert_eq!(o.grand_total(), 2500.0);
    let stored = order("a", vec![item(1000.0, 2)], Some(1800.0));
    assert_eq!(stored.grand_total(), 1800.0);
  }

  #[test]
  fn short_id_keeps_last_six_characters() {
    assert_eq!(order("Xk29fQpL0aZ7", vec![], None).short_id(), "pL0aZ7");
    assert_eq!(order("abc", vec![], None).short_id(), "abc");
  }

  #[test]
  fn transitions_stamp_their_own_timestamp() {
    let processed = OrderStatus::Processed.transition_fields();
    assert_eq!(processed[STATUS], FieldValue::String("processed".into()));
    assert_eq!(processed[PROCESSED_AT], FieldValue::ServerTimestamp);
    let deleted = OrderStatus::Deleted.transition_fields();
    assert_eq!(deleted[DELETED_AT], FieldValue::ServerTimestamp);
    assert!(!deleted.contains_key(PROCESSED_AT));
  }

  #[test]
  fn unknown_and_missing_status_read_as_pending() {
    assert_eq!(OrderStatus::from_stored(None), OrderStatus::Pending);
    assert_eq!(OrderStatus::from_stored(Some("shipped")), OrderStatus::Pending);
    assert_eq!(OrderStatus::from_stored(Some("deleted")), OrderStatus::Deleted);
  }
}
