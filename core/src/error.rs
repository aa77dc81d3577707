// storefront_admin/src/error.rs

use crate::assets::UploadError;
use crate::store::StoreError;
use crate::workflow::WorkflowError;
use thiserror::Error;

/// Broad class of a failure, as callers need to react to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
  /// Rejected before any remote call.
  Validation,
  /// A collaborator (document store, asset host) failed or refused.
  Remote,
  Internal,
}

#[derive(Debug, Error)]
pub enum AdminError {
  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  #[error("Document Store Error: {0}")]
  Store(#[from] StoreError),

  #[error("Image Upload Error: {0}")]
  Upload(#[from] UploadError),

  /// Some updates of a concurrent batch failed; the others were applied.
  #[error("{failed} of {attempted} updates failed")]
  BulkUpdate { failed: usize, attempted: usize },

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Workflow Error: {source}")]
  Workflow {
    #[from]
    source: WorkflowError,
  },

  #[error("Internal Error: {0}")]
  Internal(String),
}

impl AdminError {
  pub fn kind(&self) -> FailureKind {
    match self {
      AdminError::Validation(_) => FailureKind::Validation,
      AdminError::NotFound(_) | AdminError::Upload(_) | AdminError::BulkUpdate { .. } => FailureKind::Remote,
      AdminError::Store(_) => FailureKind::Remote,
      AdminError::Workflow {
        source: WorkflowError::HandlerError { source },
      } => source
        .downcast_ref::<AdminError>()
        .map_or(FailureKind::Internal, AdminError::kind),
      AdminError::Config(_) | AdminError::Workflow { .. } | AdminError::Internal(_) => FailureKind::Internal,
    }
  }

  /// True when the failure means the addressed record does not exist.
  pub fn is_not_found(&self) -> bool {
    matches!(self, AdminError::NotFound(_) | AdminError::Store(StoreError::NotFound { .. }))
  }
}

impl From<anyhow::Error> for AdminError {
  fn from(err: anyhow::Error) -> Self {
    match err.downcast::<AdminError>() {
      Ok(admin) => admin,
      Err(other) => AdminError::Internal(other.to_string()),
    }
  }
}

pub type Result<T, E = AdminError> = std::result::Result<T, E>;
