// storefront_admin_server/src/errors.rs

use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use storefront_admin::{AdminError, FailureKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error(transparent)]
  Admin(#[from] AdminError),

  #[error("Malformed form data: {0}")]
  Multipart(String),
}

impl From<actix_multipart::MultipartError> for AppError {
  fn from(err: actix_multipart::MultipartError) -> Self {
    AppError::Multipart(err.to_string())
  }
}

impl ResponseError for AppError {
  fn error_response(&self) -> HttpResponse {
    tracing::error!(application_error = %self, "Responding with error");
    match self {
      AppError::Validation(m) | AppError::Multipart(m) => HttpResponse::BadRequest().json(json!({"error": m})),
      AppError::NotFound(m) => HttpResponse::NotFound().json(json!({"error": m})),
      AppError::Config(m) => {
        HttpResponse::InternalServerError().json(json!({"error": "Configuration issue", "detail": m}))
      }
      AppError::Admin(e) if e.is_not_found() => HttpResponse::NotFound().json(json!({"error": e.to_string()})),
      AppError::Admin(e) => match e.kind() {
        FailureKind::Validation => HttpResponse::BadRequest().json(json!({"error": e.to_string()})),
        FailureKind::Remote => {
          HttpResponse::BadGateway().json(json!({"error": "Upstream service failed", "detail": e.to_string()}))
        }
        FailureKind::Internal => {
          HttpResponse::InternalServerError().json(json!({"error": "An internal error occurred", "detail": e.to_string()}))
        }
      },
    }
  }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;
