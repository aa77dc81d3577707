// storefront_admin/src/catalog/submit.rs

//! Bulk product submission as a registered workflow.
//!
//! Steps, in order:
//! 1. `validate_batch`: a category is chosen and at least one row exists.
//! 2. `collect_rows`: complete rows are taken from the board; the rest are skipped.
//! 3. `upload_and_persist`: each row is uploaded then created, strictly in
//!    row order. The first failure ends the run; earlier rows stay persisted.
//! 4. `reset_drafts`: the board goes back to one empty row.
//! 5. `reload_catalog`: products are read again. A failure here is logged
//!    and leaves `catalog` empty rather than failing the batch.

use super::drafts::{DraftBoard, DraftSubmission, RowId};
use super::Catalog;
use crate::error::{AdminError, Result};
use crate::model::{Category, NewProduct, Product};
use crate::workflow::{ContextData, Pipeline, StepControl, Workflows};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Default)]
pub struct SubmitBatchCtxData {
  pub category: Option<Category>,
  pub pending: Vec<DraftSubmission>,
  pub skipped: Vec<RowId>,
  pub persisted: Vec<Product>,
  /// Row whose upload or persist ended the run.
  pub failed_row: Option<RowId>,
  pub catalog: Option<Vec<Product>>,
}

impl SubmitBatchCtxData {
  pub fn new(category: Option<Category>) -> Self {
    Self {
      category,
      ..Default::default()
    }
  }
}

/// What a completed or stopped batch did.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchReport {
  pub persisted: Vec<Product>,
  pub skipped: Vec<RowId>,
  /// Products after the run, when the reload succeeded.
  pub catalog: Option<Vec<Product>>,
}

impl From<SubmitBatchCtxData> for BatchReport {
  fn from(data: SubmitBatchCtxData) -> Self {
    Self {
      persisted: data.persisted,
      skipped: data.skipped,
      catalog: data.catalog,
    }
  }
}

pub fn register_submit_batch_workflow(
  workflows: &Workflows<AdminError>,
  catalog: Arc<Catalog>,
  board: Arc<Mutex<DraftBoard>>,
) -> Result<()> {
  let mut p = Pipeline::<SubmitBatchCtxData, AdminError>::new(&[
    ("validate_batch", false, None),
    ("collect_rows", false, None),
    ("upload_and_persist", false, None),
    ("reset_drafts", false, None),
    ("reload_catalog", false, None),
  ]);

  let validate_board = Arc::clone(&board);
  p.on_step("validate_batch", move |ctx_data: ContextData<SubmitBatchCtxData>| {
    let board = Arc::clone(&validate_board);
    async move {
      if ctx_data.read().category.is_none() {
        return Err(AdminError::Validation("Please select a category".into()));
      }
      if board.lock().is_empty() {
        return Err(AdminError::Validation("Add at least one product row".into()));
      }
      Ok::<_, AdminError>(StepControl::Continue)
    }
  })?;

  let collect_board = Arc::clone(&board);
  p.on_step("collect_rows", move |ctx_data: ContextData<SubmitBatchCtxData>| {
    let board = Arc::clone(&collect_board);
    async move {
      let (pending, skipped) = board.lock().partition();
      let nothing_to_do = pending.is_empty();
      debug!(complete = pending.len(), skipped = skipped.len(), "Draft rows collected.");
      {
        let mut guard = ctx_data.write();
        guard.pending = pending;
        guard.skipped = skipped;
      }
      if nothing_to_do {
        info!("No complete draft rows; nothing to submit.");
        return Ok::<_, AdminError>(StepControl::Stop);
      }
      Ok(StepControl::Continue)
    }
  })?;

  let upload_catalog = Arc::clone(&catalog);
  p.on_step("upload_and_persist", move |ctx_data: ContextData<SubmitBatchCtxData>| {
    let catalog = Arc::clone(&upload_catalog);
    async move {
      let category = ctx_data
        .read()
        .category
        .ok_or_else(|| AdminError::Internal("category vanished after validation".into()))?;
      let pending = ctx_data.take(|d| &mut d.pending);

      for row in pending {
        let row_id = row.row;
        let persisted = async {
          let image_url = catalog.upload(&row.image).await?;
          catalog
            .create(NewProduct {
              name: row.name,
              price: row.price,
              category,
              image_url,
            })
            .await
        }
        .await;

        match persisted {
          Ok(product) => ctx_data.write().persisted.push(product),
          Err(e) => {
            warn!(row = row_id, error = %e, "Batch aborted at row.");
            ctx_data.write().failed_row = Some(row_id);
            return Err(e);
          }
        }
      }
      Ok::<_, AdminError>(StepControl::Continue)
    }
  })?;

  p.on_step("reset_drafts", move |_ctx_data: ContextData<SubmitBatchCtxData>| {
    let board = Arc::clone(&board);
    async move {
      board.lock().reset();
      Ok::<_, AdminError>(StepControl::Continue)
    }
  })?;

  p.on_step("reload_catalog", move |ctx_data: ContextData<SubmitBatchCtxData>| {
    let catalog = Arc::clone(&catalog);
    async move {
      match catalog.load().await {
        Ok(products) => ctx_data.write().catalog = Some(products),
        Err(e) => warn!(error = %e, "Catalog reload after batch failed."),
      }
      Ok::<_, AdminError>(StepControl::Continue)
    }
  })?;

  workflows.register(p);
  Ok(())
}
