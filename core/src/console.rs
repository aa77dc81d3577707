// storefront_admin/src/console.rs

//! Command dispatch for the admin panel.
//!
//! Every user action is an [`AdminCommand`]. The console runs it against the
//! collaborators, re-reads the affected collection afterwards, posts the
//! user-visible message and hands back a typed outcome ready for rendering.

use crate::assets::cloudinary::CloudinaryHost;
use crate::assets::memory::MemoryAssetHost;
use crate::assets::AssetHost;
use crate::catalog::drafts::{DraftBoard, DraftRowInput, RowId};
use crate::catalog::preview::PreviewRegistry;
use crate::catalog::submit::{register_submit_batch_workflow, BatchReport, SubmitBatchCtxData};
use crate::catalog::{Catalog, ProductEdit, QueryCapability};
use crate::config::{AdminConfig, BackendKind};
use crate::error::{AdminError, Result};
use crate::model::{Category, Order, Product};
use crate::notice::{MessageArea, Notice};
use crate::orders::bulk::{register_mark_all_workflow, MarkAllCtxData, MarkAllReport};
use crate::orders::OrderDesk;
use crate::render::{build_catalog_view, build_orders_view, CatalogView, DraftPreview, EditState, OrdersView, RenderSettings};
use crate::store::firestore::FirestoreStore;
use crate::store::memory::MemoryStore;
use crate::store::DocumentStore;
use crate::workflow::{ContextData, RunOutcome, Workflows};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

const MEMORY_ASSET_BASE: &str = "memory://assets";

/// Answer to a "are you sure?" prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
  Confirmed,
  Declined,
}

impl From<bool> for Confirmation {
  fn from(confirmed: bool) -> Self {
    if confirmed {
      Confirmation::Confirmed
    } else {
      Confirmation::Declined
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AdminCommand {
  SubmitBatch { category: Option<Category> },
  LoadCatalog,
  EditProduct { product_id: String, edit: ProductEdit },
  DeleteProduct { product_id: String, confirmation: Confirmation },
  LoadOrders,
  MarkProcessed { order_id: String },
  SoftDeleteOrder { order_id: String, confirmation: Confirmation },
  MarkAllProcessed { confirmation: Confirmation },
}

impl AdminCommand {
  pub fn name(&self) -> &'static str {
    match self {
      AdminCommand::SubmitBatch { .. } => "submit_batch",
      AdminCommand::LoadCatalog => "load_catalog",
      AdminCommand::EditProduct { .. } => "edit_product",
      AdminCommand::DeleteProduct { .. } => "delete_product",
      AdminCommand::LoadOrders => "load_orders",
      AdminCommand::MarkProcessed { .. } => "mark_processed",
      AdminCommand::SoftDeleteOrder { .. } => "soft_delete_order",
      AdminCommand::MarkAllProcessed { .. } => "mark_all_processed",
    }
  }
}

/// Products submitted in one batch, plus the refreshed catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchOutcome {
  pub persisted: Vec<Product>,
  pub skipped: Vec<RowId>,
  pub catalog: Option<CatalogView>,
}

/// Result of a command. Mutations carry the re-read view, or `None` when the
/// mutation succeeded but the re-read failed.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
  BatchSubmitted(BatchOutcome),
  CatalogLoaded(CatalogView),
  ProductUpdated { product_id: String, catalog: Option<CatalogView> },
  ProductDeleted { product_id: String, catalog: Option<CatalogView> },
  OrdersLoaded(OrdersView),
  OrderProcessed { order_id: String, orders: Option<OrdersView> },
  OrderDeleted { order_id: String, orders: Option<OrdersView> },
  OrdersProcessed { count: usize, orders: Option<OrdersView> },
  /// A confirmation was declined; nothing was sent anywhere.
  Cancelled,
}

pub struct AdminConsole {
  catalog: Arc<Catalog>,
  orders: Arc<OrderDesk>,
  drafts: Arc<Mutex<DraftBoard>>,
  edits: Mutex<EditState>,
  messages: MessageArea,
  previews: PreviewRegistry,
  settings: RenderSettings,
  workflows: Workflows<AdminError>,
  /// Held for a whole batch so two submits never read the same rows.
  submit_lock: tokio::sync::Mutex<()>,
}

impl AdminConsole {
  pub fn new(
    store: Arc<dyn DocumentStore>,
    assets: Arc<dyn AssetHost>,
    capability: QueryCapability,
    settings: RenderSettings,
    messages: MessageArea,
    previews: PreviewRegistry,
  ) -> Result<Self> {
    let catalog = Arc::new(Catalog::new(Arc::clone(&store), assets, capability));
    let orders = Arc::new(OrderDesk::new(store));
    let drafts = Arc::new(Mutex::new(DraftBoard::new(previews.clone())));

    let workflows = Workflows::new();
    register_submit_batch_workflow(&workflows, Arc::clone(&catalog), Arc::clone(&drafts))?;
    register_mark_all_workflow(&workflows, Arc::clone(&orders))?;

    Ok(Self {
      catalog,
      orders,
      drafts,
      edits: Mutex::new(EditState::default()),
      messages,
      previews,
      settings,
      workflows,
      submit_lock: tokio::sync::Mutex::new(()),
    })
  }

  /// Builds the collaborators named by `config`, probes ordering support once
  /// and wires the console.
  #[instrument(name = "AdminConsole::from_config", skip_all, fields(backend = ?config.backend))]
  pub async fn from_config(config: &AdminConfig, previews: PreviewRegistry) -> Result<Self> {
    let (store, assets): (Arc<dyn DocumentStore>, Arc<dyn AssetHost>) = match config.backend {
      BackendKind::Memory => (
        Arc::new(MemoryStore::new()),
        Arc::new(MemoryAssetHost::new(MEMORY_ASSET_BASE)),
      ),
      BackendKind::Firestore => {
        let store_config = config
          .firestore
          .clone()
          .ok_or_else(|| AdminError::Config("Firestore backend selected without Firestore settings".into()))?;
        let asset_config = config
          .cloudinary
          .clone()
          .ok_or_else(|| AdminError::Config("Firestore backend selected without Cloudinary settings".into()))?;
        (
          Arc::new(FirestoreStore::new(store_config)?),
          Arc::new(CloudinaryHost::new(asset_config)?),
        )
      }
    };

    let capability = QueryCapability::probe(store.as_ref()).await;
    Self::new(
      store,
      assets,
      capability,
      RenderSettings::from_config(config),
      MessageArea::new(config.message_ttl),
      previews,
    )
  }

  pub fn settings(&self) -> &RenderSettings {
    &self.settings
  }

  pub fn previews(&self) -> &PreviewRegistry {
    &self.previews
  }

  pub fn capability(&self) -> QueryCapability {
    self.catalog.capability()
  }

  pub fn message(&self) -> Option<Notice> {
    self.messages.current()
  }

  pub fn messages(&self) -> &MessageArea {
    &self.messages
  }

  // Draft board

  pub fn add_draft_row(&self) -> RowId {
    self.drafts.lock().add_row()
  }

  pub fn update_draft_row(&self, row: RowId, input: DraftRowInput) -> Result<()> {
    self.drafts.lock().update_row(row, input)
  }

  pub fn remove_draft_row(&self, row: RowId) -> Result<()> {
    self.drafts.lock().remove_row(row)
  }

  pub fn draft_previews(&self) -> Vec<DraftPreview> {
    self.drafts.lock().previews(&self.settings.currency)
  }

  /// Flips inline edit mode for one catalog row. View state only.
  pub fn toggle_edit_mode(&self, product_id: &str) -> bool {
    self.edits.lock().toggle(product_id)
  }

  #[instrument(name = "AdminConsole::dispatch", skip_all, fields(command = command.name()))]
  pub async fn dispatch(&self, command: AdminCommand) -> Result<CommandOutcome> {
    match command {
      AdminCommand::SubmitBatch { category } => self.submit_batch(category).await,
      AdminCommand::LoadCatalog => self.load_catalog().await.map(CommandOutcome::CatalogLoaded),
      AdminCommand::EditProduct { product_id, edit } => self.edit_product(product_id, edit).await,
      AdminCommand::DeleteProduct {
        product_id,
        confirmation,
      } => match confirmation {
        Confirmation::Declined => Ok(self.cancelled()),
        Confirmation::Confirmed => self.delete_product(product_id).await,
      },
      AdminCommand::LoadOrders => self.load_orders().await.map(CommandOutcome::OrdersLoaded),
      AdminCommand::MarkProcessed { order_id } => self.mark_processed(order_id).await,
      AdminCommand::SoftDeleteOrder { order_id, confirmation } => match confirmation {
        Confirmation::Declined => Ok(self.cancelled()),
        Confirmation::Confirmed => self.soft_delete_order(order_id).await,
      },
      AdminCommand::MarkAllProcessed { confirmation } => match confirmation {
        Confirmation::Declined => Ok(self.cancelled()),
        Confirmation::Confirmed => self.mark_all_processed().await,
      },
    }
  }

  fn cancelled(&self) -> CommandOutcome {
    info!("Confirmation declined.");
    CommandOutcome::Cancelled
  }

  fn fail(&self, text: &str, err: AdminError) -> AdminError {
    error!(error = %err, "{}", text);
    self.messages.post(Notice::error(text));
    err
  }

  fn catalog_view(&self, products: &[Product]) -> CatalogView {
    let mut edits = self.edits.lock();
    edits.retain_existing(products);
    build_catalog_view(products, &edits, &self.settings)
  }

  fn orders_view(&self, orders: &[Order]) -> OrdersView {
    build_orders_view(orders, &self.settings)
  }

  async fn submit_batch(&self, category: Option<Category>) -> Result<CommandOutcome> {
    let _batch = self.submit_lock.lock().await;
    let ctx_data = ContextData::new(SubmitBatchCtxData::new(category));
    let run = self.workflows.run(ctx_data.clone()).await;
    let data = ctx_data.read().clone();

    match run {
      Ok(RunOutcome::Completed) => {
        let count = data.persisted.len();
        self
          .messages
          .post(Notice::success(format!("Added {} product(s) successfully!", count)));
        if data.catalog.is_none() {
          self.messages.post(Notice::error("Error loading products"));
        }
      }
      Ok(RunOutcome::Stopped) => {
        self.messages.post(Notice::error("No complete rows to submit."));
      }
      Err(AdminError::Validation(text)) => {
        self.messages.post(Notice::error(text.clone()));
        return Err(AdminError::Validation(text));
      }
      Err(e) => {
        warn!(persisted = data.persisted.len(), failed_row = ?data.failed_row, "Batch stopped early.");
        return Err(self.fail("Failed to add product.", e));
      }
    }

    let report = BatchReport::from(data);
    Ok(CommandOutcome::BatchSubmitted(BatchOutcome {
      catalog: report.catalog.as_deref().map(|products| self.catalog_view(products)),
      persisted: report.persisted,
      skipped: report.skipped,
    }))
  }

  async fn load_catalog(&self) -> Result<CatalogView> {
    match self.catalog.load().await {
      Ok(products) => Ok(self.catalog_view(&products)),
      Err(e) => Err(self.fail("Error loading products", e)),
    }
  }

  /// Re-reads products after a mutation. A failed re-read is reported but
  /// does not undo the mutation's success.
  async fn refresh_catalog(&self) -> Option<CatalogView> {
    self.load_catalog().await.ok()
  }

  async fn edit_product(&self, product_id: String, edit: ProductEdit) -> Result<CommandOutcome> {
    match self.catalog.edit(&product_id, edit).await {
      Ok(()) => {
        self.edits.lock().finish(&product_id);
        self.messages.post(Notice::success("Product updated!"));
      }
      Err(AdminError::Validation(text)) => {
        self.messages.post(Notice::error(text.clone()));
        return Err(AdminError::Validation(text));
      }
      Err(e) => return Err(self.fail("Error updating product", e)),
    }
    Ok(CommandOutcome::ProductUpdated {
      catalog: self.refresh_catalog().await,
      product_id,
    })
  }

  async fn delete_product(&self, product_id: String) -> Result<CommandOutcome> {
    if let Err(e) = self.catalog.delete(&product_id).await {
      return Err(self.fail("Error deleting product", e));
    }
    self.edits.lock().finish(&product_id);
    self.messages.post(Notice::success("Product deleted!"));
    Ok(CommandOutcome::ProductDeleted {
      catalog: self.refresh_catalog().await,
      product_id,
    })
  }

  async fn load_orders(&self) -> Result<OrdersView> {
    match self.orders.load().await {
      Ok(orders) => Ok(self.orders_view(&orders)),
      Err(e) => Err(self.fail("Error loading orders", e)),
    }
  }

  async fn refresh_orders(&self) -> Option<OrdersView> {
    self.load_orders().await.ok()
  }

  async fn mark_processed(&self, order_id: String) -> Result<CommandOutcome> {
    if let Err(e) = self.orders.mark_processed(&order_id).await {
      return Err(self.fail("Error updating order", e));
    }
    self.messages.post(Notice::success("Order marked as processed!"));
    Ok(CommandOutcome::OrderProcessed {
      orders: self.refresh_orders().await,
      order_id,
    })
  }

  async fn soft_delete_order(&self, order_id: String) -> Result<CommandOutcome> {
    if let Err(e) = self.orders.soft_delete(&order_id).await {
      return Err(self.fail("Error deleting order", e));
    }
    self.messages.post(Notice::success("Order deleted!"));
    Ok(CommandOutcome::OrderDeleted {
      orders: self.refresh_orders().await,
      order_id,
    })
  }

  async fn mark_all_processed(&self) -> Result<CommandOutcome> {
    let ctx_data = ContextData::new(MarkAllCtxData::default());
    if let Err(e) = self.workflows.run(ctx_data.clone()).await {
      return Err(self.fail("Error updating orders", e));
    }
    let report = MarkAllReport::from(ctx_data.read().clone());

    self
      .messages
      .post(Notice::success(format!("Marked {} orders as processed!", report.updated)));
    let orders = match report.orders {
      Some(orders) => Some(self.orders_view(&orders)),
      None => {
        self.messages.post(Notice::error("Error loading orders"));
        None
      }
    };
    Ok(CommandOutcome::OrdersProcessed {
      count: report.updated,
      orders,
    })
  }
}
