// storefront_admin/src/workflow/registry.rs

//! `Workflows<E>`: pipelines keyed by the type of context data they run on.

use super::context_data::ContextData;
use super::control::RunOutcome;
use super::error::WorkflowError;
use super::pipeline::Pipeline;

use async_trait::async_trait;
use parking_lot::RwLock;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{event, Level};

#[async_trait]
trait ErasedRunner<AppErr>: Send + Sync
where
  AppErr: std::error::Error + Send + Sync + 'static,
{
  async fn run_erased(&self, ctx: Box<dyn Any + Send>) -> Result<RunOutcome, AppErr>;
}

struct TypedRunner<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<WorkflowError> + Send + Sync + 'static,
{
  pipeline: Pipeline<TData, Err>,
}

#[async_trait]
impl<TData, Err, AppErr> ErasedRunner<AppErr> for TypedRunner<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<WorkflowError> + Send + Sync + 'static,
  AppErr: std::error::Error + From<Err> + From<WorkflowError> + Send + Sync + 'static,
{
  async fn run_erased(&self, ctx: Box<dyn Any + Send>) -> Result<RunOutcome, AppErr> {
    let typed = ctx.downcast::<ContextData<TData>>().map_err(|_| {
      AppErr::from(WorkflowError::NotRegistered {
        context_type: std::any::type_name::<TData>().to_string(),
      })
    })?;
    self.pipeline.run(*typed).await.map_err(AppErr::from)
  }
}

/// Registry handing each run to the pipeline registered for its context type.
pub struct Workflows<AppErr>
where
  AppErr: std::error::Error + From<WorkflowError> + Send + Sync + 'static,
{
  runners: RwLock<HashMap<TypeId, Arc<dyn ErasedRunner<AppErr>>>>,
}

impl<AppErr> Workflows<AppErr>
where
  AppErr: std::error::Error + From<WorkflowError> + Send + Sync + 'static,
{
  pub fn new() -> Self {
    Self {
      runners: RwLock::new(HashMap::new()),
    }
  }

  /// Registers `pipeline`, replacing any pipeline previously registered for `TData`.
  pub fn register<TData, Err>(&self, pipeline: Pipeline<TData, Err>)
  where
    TData: 'static + Send + Sync,
    Err: std::error::Error + From<WorkflowError> + Send + Sync + 'static,
    AppErr: From<Err>,
  {
    event!(
      Level::DEBUG,
      context_type = %std::any::type_name::<TData>(),
      steps = ?pipeline.step_names(),
      "Registering workflow."
    );
    self
      .runners
      .write()
      .insert(TypeId::of::<TData>(), Arc::new(TypedRunner { pipeline }));
  }

  pub async fn run<TData>(&self, ctx_data: ContextData<TData>) -> Result<RunOutcome, AppErr>
  where
    TData: 'static + Send + Sync,
  {
    let runner = self.runners.read().get(&TypeId::of::<TData>()).cloned();
    let runner = runner.ok_or_else(|| {
      let context_type = std::any::type_name::<TData>().to_string();
      event!(Level::ERROR, %context_type, "No workflow registered.");
      AppErr::from(WorkflowError::NotRegistered { context_type })
    })?;
    runner.run_erased(Box::new(ctx_data)).await
  }
}

impl<AppErr> Default for Workflows<AppErr>
where
  AppErr: std::error::Error + From<WorkflowError> + Send + Sync + 'static,
{
  fn default() -> Self {
    Self::new()
  }
}
