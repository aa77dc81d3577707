// storefront_admin/src/catalog/mod.rs

//! Catalog manager: product upload, listing, inline edit and delete.

pub mod capability;
pub mod drafts;
pub mod preview;
pub mod submit;

pub use capability::QueryCapability;
pub use drafts::{DraftBoard, DraftRow, DraftRowInput, DraftSubmission, RowId};
pub use preview::{PreviewHandle, PreviewImage, PreviewRegistry};
pub use submit::{BatchReport, SubmitBatchCtxData};

use crate::assets::{AssetHost, ImageFile};
use crate::error::{AdminError, Result};
use crate::model::{NewProduct, Product, ProductChanges};
use crate::store::{Collection, DocumentStore};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Image to keep on an edited product.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageChoice {
  /// Leave the stored image as it is.
  Keep,
  /// A newly chosen file, uploaded before the update.
  Replace(ImageFile),
}

/// Inline edit form values, unvalidated.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductEdit {
  pub name: String,
  pub price: String,
  pub image: ImageChoice,
}

/// Remote operations on the `products` collection. Holds no product state;
/// every read goes to the store.
pub struct Catalog {
  store: Arc<dyn DocumentStore>,
  assets: Arc<dyn AssetHost>,
  capability: QueryCapability,
}

impl Catalog {
  pub fn new(store: Arc<dyn DocumentStore>, assets: Arc<dyn AssetHost>, capability: QueryCapability) -> Self {
    Self {
      store,
      assets,
      capability,
    }
  }

  pub fn capability(&self) -> QueryCapability {
    self.capability
  }

  #[instrument(name = "Catalog::load", skip(self), fields(ordered = self.capability.ordered))]
  pub async fn load(&self) -> Result<Vec<Product>> {
    let docs = self.store.query(&self.capability.product_query()).await?;
    let products: Vec<Product> = docs.iter().map(Product::from_document).collect();
    debug!(count = products.len(), "Products loaded.");
    Ok(products)
  }

  /// Uploads an image and returns its public URL.
  #[instrument(name = "Catalog::upload", skip_all, fields(file = %image.file_name, size = image.bytes.len()))]
  pub async fn upload(&self, image: &ImageFile) -> Result<String> {
    let asset = self.assets.upload(image).await?;
    Ok(asset.secure_url)
  }

  #[instrument(name = "Catalog::create", skip_all, fields(name = %product.name, category = %product.category))]
  pub async fn create(&self, product: NewProduct) -> Result<Product> {
    let doc = self.store.create(Collection::Products, product.into_fields()).await?;
    info!(product_id = %doc.id, "Product created.");
    Ok(Product::from_document(&doc))
  }

  /// Validates, re-uploads only when a new image was chosen, then updates
  /// name, price and image URL.
  #[instrument(name = "Catalog::edit", skip(self, edit))]
  pub async fn edit(&self, product_id: &str, edit: ProductEdit) -> Result<()> {
    let name = edit.name.trim();
    if name.is_empty() {
      return Err(AdminError::Validation("Product name cannot be empty".into()));
    }
    let price = drafts::parse_price(&edit.price)
      .ok_or_else(|| AdminError::Validation(format!("Invalid price '{}'", edit.price.trim())))?;

    let image_url = match edit.image {
      ImageChoice::Keep => None,
      ImageChoice::Replace(file) => Some(self.upload(&file).await?),
    };

    let changes = ProductChanges {
      name: name.to_string(),
      price,
      image_url,
    };
    self
      .store
      .update(Collection::Products, product_id, changes.into_fields())
      .await?;
    info!("Product updated.");
    Ok(())
  }

  #[instrument(name = "Catalog::delete", skip(self))]
  pub async fn delete(&self, product_id: &str) -> Result<()> {
    self.store.delete(Collection::Products, product_id).await?;
    info!("Product deleted.");
    Ok(())
  }
}
