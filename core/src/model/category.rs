// storefront_admin/src/model/category.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The fixed set of catalog sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
  Tops,
  Jeans,
  Leggings,
  Gowns,
}

impl Category {
  pub const ALL: [Category; 4] = [Category::Tops, Category::Jeans, Category::Leggings, Category::Gowns];

  /// Stored name; also the key products are grouped by when rendering.
  pub fn as_str(&self) -> &'static str {
    match self {
      Category::Tops => "tops",
      Category::Jeans => "jeans",
      Category::Leggings => "leggings",
      Category::Gowns => "gowns",
    }
  }

  pub fn title(&self) -> &'static str {
    match self {
      Category::Tops => "Tops",
      Category::Jeans => "Jeans",
      Category::Leggings => "Leggings",
      Category::Gowns => "Gowns",
    }
  }
}

impl fmt::Display for Category {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category '{0}'")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
  type Err = UnknownCategory;

  /// Exact match on the stored name.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Category::ALL
      .into_iter()
      .find(|c| c.as_str() == s)
      .ok_or_else(|| UnknownCategory(s.to_string()))
  }
}
