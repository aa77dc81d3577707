// storefront_admin/src/catalog/capability.rs

use crate::store::{Collection, DocumentStore, Query, CREATED_AT};
use tracing::{info, instrument, warn};

/// What the product collection supports, discovered once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryCapability {
  /// Whether products can be read ordered by creation time.
  pub ordered: bool,
}

impl QueryCapability {
  pub const ORDERED: Self = Self { ordered: true };
  pub const UNORDERED: Self = Self { ordered: false };

  #[instrument(name = "QueryCapability::probe", skip_all)]
  pub async fn probe(store: &dyn DocumentStore) -> Self {
    let probe = Query::all(Collection::Products).order_by_desc(CREATED_AT).limit(1);
    match store.query(&probe).await {
      Ok(_) => {
        info!("Ordered product queries available.");
        Self::ORDERED
      }
      Err(e) => {
        warn!(error = %e, "Ordered product queries unavailable; catalog will load unordered.");
        Self::UNORDERED
      }
    }
  }

  pub fn product_query(&self) -> Query {
    let query = Query::all(Collection::Products);
    if self.ordered {
      query.order_by_desc(CREATED_AT)
    } else {
      query
    }
  }
}
