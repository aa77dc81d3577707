// storefront_admin/src/render/catalog_view.rs

use super::RenderSettings;
use crate::model::{Category, Product};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// Named containers of the admin page: one per category section plus the
/// orders list and the message area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSurface {
  category_containers: BTreeMap<Category, String>,
  pub orders_container: String,
  pub message_container: String,
  pub drafts_container: String,
}

impl RenderSurface {
  /// Looks up the container for a stored category name. Exact match only.
  pub fn container_for(&self, category: &str) -> Option<&str> {
    let category: Category = category.parse().ok()?;
    self.category_containers.get(&category).map(String::as_str)
  }

  pub fn categories(&self) -> impl Iterator<Item = (Category, &str)> {
    self.category_containers.iter().map(|(c, name)| (*c, name.as_str()))
  }

  /// Drops the section for `category`; its products stop rendering.
  pub fn without(mut self, category: Category) -> Self {
    self.category_containers.remove(&category);
    self
  }
}

impl Default for RenderSurface {
  fn default() -> Self {
    Self {
      category_containers: Category::ALL
        .into_iter()
        .map(|c| (c, format!("{}-container", c.as_str())))
        .collect(),
      orders_container: "ordersList".to_string(),
      message_container: "message".to_string(),
      drafts_container: "productRows".to_string(),
    }
  }
}

/// Which catalog rows are in inline-edit mode. Pure view state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditState {
  editing: HashSet<String>,
}

impl EditState {
  /// Flips the row and returns whether it is now editable.
  pub fn toggle(&mut self, product_id: &str) -> bool {
    if self.editing.remove(product_id) {
      false
    } else {
      self.editing.insert(product_id.to_string());
      true
    }
  }

  pub fn is_editing(&self, product_id: &str) -> bool {
    self.editing.contains(product_id)
  }

  pub fn finish(&mut self, product_id: &str) {
    self.editing.remove(product_id);
  }

  /// Forgets rows whose products no longer exist.
  pub fn retain_existing(&mut self, products: &[Product]) {
    let live: HashSet<&str> = products.iter().map(|p| p.id.as_str()).collect();
    self.editing.retain(|id| live.contains(id.as_str()));
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCard {
  pub id: String,
  pub name: String,
  pub price: f64,
  pub price_label: String,
  pub image_url: String,
  pub editing: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySection {
  pub category: Category,
  pub title: String,
  pub container: String,
  pub products: Vec<ProductCard>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogView {
  pub sections: Vec<CategorySection>,
  /// Products whose category has no container on the surface.
  pub omitted: usize,
}

impl CatalogView {
  pub fn product_count(&self) -> usize {
    self.sections.iter().map(|s| s.products.len()).sum()
  }

  pub fn section(&self, category: Category) -> Option<&CategorySection> {
    self.sections.iter().find(|s| s.category == category)
  }
}

/// Groups products into their category sections, keeping load order within
/// each section.
pub fn build_catalog_view(products: &[Product], edit_state: &EditState, settings: &RenderSettings) -> CatalogView {
  let mut sections: Vec<CategorySection> = settings
    .surface
    .categories()
    .map(|(category, container)| CategorySection {
      category,
      title: category.title().to_string(),
      container: container.to_string(),
      products: Vec::new(),
    })
    .collect();

  let mut omitted = 0;
  for product in products {
    let Some(section) = product
      .category_kind()
      .and_then(|kind| sections.iter_mut().find(|s| s.category == kind))
    else {
      tracing::trace!(product_id = %product.id, category = %product.category, "No container for category.");
      omitted += 1;
      continue;
    };
    section.products.push(ProductCard {
      id: product.id.clone(),
      name: product.name.clone(),
      price: product.price,
      price_label: settings.currency.format_plain(product.price),
      image_url: product.image_url.clone(),
      editing: edit_state.is_editing(&product.id),
    });
  }

  CatalogView { sections, omitted }
}
