// storefront_admin_server/src/web/handlers/draft_handlers.rs

use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use serde_json::json;
use storefront_admin::catalog::{DraftRowInput, RowId};
use storefront_admin::render::html;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::errors::{AppError, Result};
use crate::state::AppState;
use crate::web::multipart::ProductForm;

fn drafts_response(app_state: &AppState) -> serde_json::Value {
  let previews = app_state.console.draft_previews();
  let fragment = html::render_drafts(&app_state.console.settings().surface.drafts_container, &previews);
  json!({ "rows": previews, "fragment": fragment })
}

#[instrument(name = "handler::list_drafts", skip(app_state))]
pub async fn list_drafts_handler(app_state: web::Data<AppState>) -> Result<HttpResponse> {
  Ok(HttpResponse::Ok().json(drafts_response(&app_state)))
}

#[instrument(name = "handler::add_draft_row", skip(app_state))]
pub async fn add_row_handler(app_state: web::Data<AppState>) -> Result<HttpResponse> {
  let row = app_state.console.add_draft_row();
  info!(row, "Draft row added.");
  let mut body = drafts_response(&app_state);
  body["row"] = json!(row);
  Ok(HttpResponse::Created().json(body))
}

#[instrument(name = "handler::update_draft_row", skip(app_state, payload), fields(row = %path.as_ref()))]
pub async fn update_row_handler(
  app_state: web::Data<AppState>,
  path: web::Path<RowId>,
  payload: Multipart,
) -> Result<HttpResponse> {
  let row = path.into_inner();
  let form = ProductForm::read(payload).await?;
  app_state.console.update_draft_row(
    row,
    DraftRowInput {
      name: form.text("name"),
      price: form.text("price"),
      image: form.image,
    },
  )?;
  Ok(HttpResponse::Ok().json(drafts_response(&app_state)))
}

#[instrument(name = "handler::remove_draft_row", skip(app_state), fields(row = %path.as_ref()))]
pub async fn remove_row_handler(app_state: web::Data<AppState>, path: web::Path<RowId>) -> Result<HttpResponse> {
  app_state.console.remove_draft_row(path.into_inner())?;
  Ok(HttpResponse::Ok().json(drafts_response(&app_state)))
}

/// Serves the bytes behind a live preview URL.
#[instrument(name = "handler::preview", skip(app_state), fields(token = %path.as_ref()))]
pub async fn preview_handler(app_state: web::Data<AppState>, path: web::Path<Uuid>) -> Result<HttpResponse> {
  let token = path.into_inner();
  let preview = app_state
    .console
    .previews()
    .fetch(&token)
    .ok_or_else(|| AppError::NotFound(format!("Preview {} is no longer available.", token)))?;
  Ok(
    HttpResponse::Ok()
      .content_type(preview.content_type)
      .body(preview.bytes),
  )
}
