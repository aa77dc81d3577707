// storefront_admin/src/workflow/execution.rs

use super::context_data::ContextData;
use super::control::{RunOutcome, StepControl};
use super::error::WorkflowError;
use super::pipeline::Pipeline;
use tracing::{event, info_span, Instrument, Level};

impl<TData, Err> Pipeline<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<WorkflowError> + Send + Sync + 'static,
{
  /// Runs every step in order against `ctx_data`.
  ///
  /// The first handler error aborts the run and is returned as-is; whatever
  /// earlier steps wrote into the context stays there. A non-optional step
  /// with no handlers fails the run with [`WorkflowError::HandlerMissing`].
  pub async fn run(&self, ctx_data: ContextData<TData>) -> Result<RunOutcome, Err> {
    event!(
      Level::DEBUG,
      context_type = %std::any::type_name::<TData>(),
      num_steps = self.steps.len(),
      "Workflow run starting."
    );

    for (step_idx, step_def) in self.steps.iter().enumerate() {
      let step_span = info_span!(
        "workflow_step",
        step_name = step_def.name.as_str(),
        step_index = step_idx,
        optional = step_def.optional
      );

      if let Some(skip_if) = &step_def.skip_if {
        if skip_if(&ctx_data) {
          step_span.in_scope(|| event!(Level::DEBUG, "Step skipped by its skip condition."));
          continue;
        }
      }

      let handlers = match self.handlers.get(&step_def.name) {
        Some(handlers) if !handlers.is_empty() => handlers,
        _ if step_def.optional => {
          step_span.in_scope(|| event!(Level::DEBUG, "Optional step has no handlers."));
          continue;
        }
        _ => {
          step_span.in_scope(|| event!(Level::ERROR, "Non-optional step has no handlers."));
          return Err(Err::from(WorkflowError::HandlerMissing {
            step_name: step_def.name.clone(),
          }));
        }
      };

      for handler_fn in handlers {
        match handler_fn(ctx_data.clone()).instrument(step_span.clone()).await {
          Ok(StepControl::Continue) => {}
          Ok(StepControl::Stop) => {
            step_span.in_scope(|| event!(Level::INFO, "Workflow stopped by a step handler."));
            return Ok(RunOutcome::Stopped);
          }
          Err(e) => {
            step_span.in_scope(|| event!(Level::WARN, error = %e, "Step handler failed."));
            return Err(e);
          }
        }
      }
    }

    event!(Level::DEBUG, "Workflow run completed.");
    Ok(RunOutcome::Completed)
  }
}
