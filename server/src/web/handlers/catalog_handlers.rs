// storefront_admin_server/src/web/handlers/catalog_handlers.rs

use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::{json, Value};
use storefront_admin::catalog::{ImageChoice, ProductEdit};
use storefront_admin::model::Category;
use storefront_admin::{AdminCommand, CommandOutcome};
use tracing::{info, instrument, warn};

use super::{catalog_json, ConfirmQuery};
use crate::errors::{AppError, Result};
use crate::state::AppState;
use crate::web::multipart::ProductForm;

#[derive(Deserialize, Debug)]
pub struct SubmitBatchRequest {
  /// Stored category name; omitted or empty when none was selected.
  #[serde(default)]
  pub category: Option<String>,
}

fn parse_category(raw: Option<String>) -> Result<Option<Category>> {
  match raw.as_deref().map(str::trim) {
    None | Some("") => Ok(None),
    Some(name) => name
      .parse::<Category>()
      .map(Some)
      .map_err(|e| AppError::Validation(e.to_string())),
  }
}

fn with_catalog(mut body: Value, catalog: Option<&storefront_admin::render::CatalogView>) -> Value {
  body["catalog"] = catalog.map_or(Value::Null, catalog_json);
  body
}

#[instrument(name = "handler::submit_batch", skip(app_state, req_body))]
pub async fn submit_batch_handler(
  app_state: web::Data<AppState>,
  req_body: web::Json<SubmitBatchRequest>,
) -> Result<HttpResponse> {
  let category = parse_category(req_body.into_inner().category)?;
  match app_state.console.dispatch(AdminCommand::SubmitBatch { category }).await? {
    CommandOutcome::BatchSubmitted(batch) => {
      info!(persisted = batch.persisted.len(), skipped = batch.skipped.len(), "Batch submitted.");
      let body = json!({
        "persisted": batch.persisted,
        "skippedRows": batch.skipped,
        "message": app_state.console.message(),
      });
      Ok(HttpResponse::Ok().json(with_catalog(body, batch.catalog.as_ref())))
    }
    other => unexpected(other),
  }
}

#[instrument(name = "handler::load_catalog", skip(app_state))]
pub async fn load_catalog_handler(app_state: web::Data<AppState>) -> Result<HttpResponse> {
  match app_state.console.dispatch(AdminCommand::LoadCatalog).await? {
    CommandOutcome::CatalogLoaded(view) => Ok(HttpResponse::Ok().json(catalog_json(&view))),
    other => unexpected(other),
  }
}

#[instrument(name = "handler::toggle_edit_mode", skip(app_state), fields(product_id = %path.as_ref()))]
pub async fn toggle_edit_mode_handler(app_state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse> {
  let product_id = path.into_inner();
  let editing = app_state.console.toggle_edit_mode(&product_id);
  Ok(HttpResponse::Ok().json(json!({ "productId": product_id, "editing": editing })))
}

/// Multipart fields: `name`, `price` and an optional replacement `image`.
#[instrument(name = "handler::edit_product", skip(app_state, payload), fields(product_id = %path.as_ref()))]
pub async fn edit_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
  payload: Multipart,
) -> Result<HttpResponse> {
  let product_id = path.into_inner();
  let form = ProductForm::read(payload).await?;
  let image = match form.image.clone() {
    Some(file) => ImageChoice::Replace(file),
    None => ImageChoice::Keep,
  };
  let edit = ProductEdit {
    name: form.text("name").unwrap_or_default(),
    price: form.text("price").unwrap_or_default(),
    image,
  };

  match app_state
    .console
    .dispatch(AdminCommand::EditProduct { product_id, edit })
    .await?
  {
    CommandOutcome::ProductUpdated { product_id, catalog } => Ok(HttpResponse::Ok().json(with_catalog(
      json!({ "productId": product_id, "message": app_state.console.message() }),
      catalog.as_ref(),
    ))),
    other => unexpected(other),
  }
}

#[instrument(name = "handler::delete_product", skip(app_state, query), fields(product_id = %path.as_ref()))]
pub async fn delete_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
  query: web::Query<ConfirmQuery>,
) -> Result<HttpResponse> {
  let command = AdminCommand::DeleteProduct {
    product_id: path.into_inner(),
    confirmation: query.confirmation(),
  };
  match app_state.console.dispatch(command).await? {
    CommandOutcome::ProductDeleted { product_id, catalog } => Ok(HttpResponse::Ok().json(with_catalog(
      json!({ "productId": product_id, "message": app_state.console.message() }),
      catalog.as_ref(),
    ))),
    CommandOutcome::Cancelled => Ok(HttpResponse::Ok().json(json!({ "cancelled": true }))),
    other => unexpected(other),
  }
}

pub(crate) fn unexpected(outcome: CommandOutcome) -> Result<HttpResponse> {
  warn!(?outcome, "Command produced an unexpected outcome.");
  Err(AppError::Admin(storefront_admin::AdminError::Internal(
    "unexpected command outcome".into(),
  )))
}
