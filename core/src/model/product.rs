// storefront_admin/src/model/product.rs

use super::Category;
use crate::store::{Document, FieldMap, FieldValue, CREATED_AT};
use chrono::{DateTime, Utc};
use serde::Serialize;

pub const NAME: &str = "name";
pub const PRICE: &str = "price";
pub const CATEGORY: &str = "category";
pub const IMAGE_URL: &str = "imageUrl";

/// A persisted catalog entry.
///
/// `category` keeps the stored text verbatim; records written by this admin
/// always hold one of [`Category::ALL`], but nothing stops other writers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
  pub id: String,
  pub name: String,
  pub price: f64,
  pub category: String,
  pub image_url: String,
  pub created_at: Option<DateTime<Utc>>,
}

impl Product {
  /// Missing fields fall back to empty values rather than failing the load.
  pub fn from_document(doc: &Document) -> Self {
    Self {
      id: doc.id.clone(),
      name: doc.str_field(NAME).unwrap_or_default().to_string(),
      price: doc.f64_field(PRICE).unwrap_or_default(),
      category: doc.str_field(CATEGORY).unwrap_or_default().to_string(),
      image_url: doc.str_field(IMAGE_URL).unwrap_or_default().to_string(),
      created_at: doc.timestamp_field(CREATED_AT),
    }
  }

  pub fn category_kind(&self) -> Option<Category> {
    self.category.parse().ok()
  }
}

/// A product about to be created.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
  pub name: String,
  pub price: f64,
  pub category: Category,
  pub image_url: String,
}

impl NewProduct {
  pub fn into_fields(self) -> FieldMap {
    let mut fields = FieldMap::new();
    fields.insert(NAME.into(), self.name.into());
    fields.insert(PRICE.into(), FieldValue::Double(self.price));
    fields.insert(CATEGORY.into(), self.category.as_str().into());
    fields.insert(IMAGE_URL.into(), self.image_url.into());
    fields.insert(CREATED_AT.into(), FieldValue::ServerTimestamp);
    fields
  }
}

/// The fields inline edit may change. Category and id are fixed at creation.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductChanges {
  pub name: String,
  pub price: f64,
  /// `None` leaves the stored image untouched.
  pub image_url: Option<String>,
}

impl ProductChanges {
  pub fn into_fields(self) -> FieldMap {
    let mut fields = FieldMap::new();
    fields.insert(NAME.into(), self.name.into());
    fields.insert(PRICE.into(), FieldValue::Double(self.price));
    if let Some(image_url) = self.image_url {
      fields.insert(IMAGE_URL.into(), image_url.into());
    }
    fields
  }
}
