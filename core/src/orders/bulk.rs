// storefront_admin/src/orders/bulk.rs

//! Mark-all-processed as a registered workflow: `find_unprocessed`,
//! `update_all` (skipped when nothing is unprocessed), `reload_orders`.

use super::OrderDesk;
use crate::error::{AdminError, Result};
use crate::model::Order;
use crate::workflow::{ContextData, Pipeline, SkipCondition, StepControl, Workflows};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Clone, Default)]
pub struct MarkAllCtxData {
  pub targets: Vec<String>,
  pub updated: usize,
  pub failed: usize,
  pub orders: Option<Vec<Order>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkAllReport {
  pub updated: usize,
  /// Orders after the run, when the reload succeeded.
  pub orders: Option<Vec<Order>>,
}

impl From<MarkAllCtxData> for MarkAllReport {
  fn from(data: MarkAllCtxData) -> Self {
    Self {
      updated: data.updated,
      orders: data.orders,
    }
  }
}

fn nothing_to_update(ctx_data: &ContextData<MarkAllCtxData>) -> bool {
  ctx_data.map_read(|d| &d.targets).is_empty()
}

pub fn register_mark_all_workflow(workflows: &Workflows<AdminError>, desk: Arc<OrderDesk>) -> Result<()> {
  let skip_update: SkipCondition<MarkAllCtxData> = Arc::new(nothing_to_update);
  let mut p = Pipeline::<MarkAllCtxData, AdminError>::new(&[
    ("find_unprocessed", false, None),
    ("update_all", false, Some(skip_update)),
    ("reload_orders", false, None),
  ]);

  let find_desk = Arc::clone(&desk);
  p.on_step("find_unprocessed", move |ctx_data: ContextData<MarkAllCtxData>| {
    let desk = Arc::clone(&find_desk);
    async move {
      let targets: Vec<String> = desk.unprocessed().await?.into_iter().map(|o| o.id).collect();
      info!(count = targets.len(), "Unprocessed orders found.");
      ctx_data.write().targets = targets;
      Ok::<_, AdminError>(StepControl::Continue)
    }
  })?;

  let update_desk = Arc::clone(&desk);
  p.on_step("update_all", move |ctx_data: ContextData<MarkAllCtxData>| {
    let desk = Arc::clone(&update_desk);
    async move {
      let targets = ctx_data.take(|d| &mut d.targets);
      let outcome = desk.mark_many_processed(&targets).await;
      {
        let mut guard = ctx_data.write();
        guard.updated = outcome.updated.len();
        guard.failed = outcome.failed.len();
      }
      if !outcome.failed.is_empty() {
        return Err(AdminError::BulkUpdate {
          failed: outcome.failed.len(),
          attempted: outcome.attempted(),
        });
      }
      Ok::<_, AdminError>(StepControl::Continue)
    }
  })?;

  p.on_step("reload_orders", move |ctx_data: ContextData<MarkAllCtxData>| {
    let desk = Arc::clone(&desk);
    async move {
      match desk.load().await {
        Ok(orders) => ctx_data.write().orders = Some(orders),
        Err(e) => warn!(error = %e, "Order reload after bulk update failed."),
      }
      Ok::<_, AdminError>(StepControl::Continue)
    }
  })?;

  workflows.register(p);
  Ok(())
}
