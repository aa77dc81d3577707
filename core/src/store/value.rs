// storefront_admin/src/store/value.rs

use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::collections::BTreeMap;

pub type FieldMap = BTreeMap<String, FieldValue>;

/// A typed document field, mirroring the value kinds of the document store.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
  Null,
  Bool(bool),
  Integer(i64),
  Double(f64),
  String(String),
  Timestamp(DateTime<Utc>),
  Array(Vec<FieldValue>),
  Map(FieldMap),
  /// Write-only sentinel: the store stamps its own clock when applying the write.
  ServerTimestamp,
}

impl FieldValue {
  pub fn as_str(&self) -> Option<&str> {
    match self {
      FieldValue::String(s) => Some(s),
      _ => None,
    }
  }

  /// Numeric view over both integer and double fields.
  pub fn as_f64(&self) -> Option<f64> {
    match self {
      FieldValue::Integer(i) => Some(*i as f64),
      FieldValue::Double(d) => Some(*d),
      _ => None,
    }
  }

  pub fn as_i64(&self) -> Option<i64> {
    match self {
      FieldValue::Integer(i) => Some(*i),
      FieldValue::Double(d) if d.fract() == 0.0 => Some(*d as i64),
      _ => None,
    }
  }

  pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
    match self {
      FieldValue::Timestamp(ts) => Some(*ts),
      _ => None,
    }
  }

  pub fn as_array(&self) -> Option<&[FieldValue]> {
    match self {
      FieldValue::Array(values) => Some(values),
      _ => None,
    }
  }

  pub fn as_map(&self) -> Option<&FieldMap> {
    match self {
      FieldValue::Map(fields) => Some(fields),
      _ => None,
    }
  }

  /// Ordering between two values of comparable kinds. Integers and doubles
  /// compare numerically; mismatched kinds are unordered.
  pub fn compare(&self, other: &FieldValue) -> Option<Ordering> {
    match (self, other) {
      (FieldValue::Timestamp(a), FieldValue::Timestamp(b)) => Some(a.cmp(b)),
      (FieldValue::String(a), FieldValue::String(b)) => Some(a.cmp(b)),
      (FieldValue::Bool(a), FieldValue::Bool(b)) => Some(a.cmp(b)),
      (a, b) => match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x.partial_cmp(&y),
        _ => None,
      },
    }
  }
}

impl From<&str> for FieldValue {
  fn from(value: &str) -> Self {
    FieldValue::String(value.to_string())
  }
}

impl From<String> for FieldValue {
  fn from(value: String) -> Self {
    FieldValue::String(value)
  }
}

impl From<f64> for FieldValue {
  fn from(value: f64) -> Self {
    FieldValue::Double(value)
  }
}

impl From<i64> for FieldValue {
  fn from(value: i64) -> Self {
    FieldValue::Integer(value)
  }
}

impl From<DateTime<Utc>> for FieldValue {
  fn from(value: DateTime<Utc>) -> Self {
    FieldValue::Timestamp(value)
  }
}

/// Replaces every [`FieldValue::ServerTimestamp`] in `fields` with `stamp`,
/// descending into maps and arrays.
pub fn resolve_server_timestamps(fields: &mut FieldMap, stamp: DateTime<Utc>) {
  fn resolve(value: &mut FieldValue, stamp: DateTime<Utc>) {
    match value {
      FieldValue::ServerTimestamp => *value = FieldValue::Timestamp(stamp),
      FieldValue::Array(values) => values.iter_mut().for_each(|v| resolve(v, stamp)),
      FieldValue::Map(fields) => fields.values_mut().for_each(|v| resolve(v, stamp)),
      _ => {}
    }
  }
  fields.values_mut().for_each(|v| resolve(v, stamp));
}
