// storefront_admin/src/workflow/error.rs

use thiserror::Error;

/// Failures raised by the workflow engine itself, as opposed to the
/// domain errors returned by step handlers.
#[derive(Debug, Error)]
pub enum WorkflowError {
  #[error("Step not found: {step_name}")]
  StepNotFound { step_name: String },

  #[error("Handler missing for non-optional step: {step_name}")]
  HandlerMissing { step_name: String },

  #[error("No workflow registered for context type {context_type}")]
  NotRegistered { context_type: String },

  #[error("Step handler failed. Source: {source}")]
  HandlerError {
    #[source]
    source: anyhow::Error,
  },
}

impl From<anyhow::Error> for WorkflowError {
  fn from(source: anyhow::Error) -> Self {
    WorkflowError::HandlerError { source }
  }
}
