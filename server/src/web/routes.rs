// storefront_admin_server/src/web/routes.rs

use crate::state::AppState;
use crate::web::handlers::{catalog_handlers, draft_handlers, order_handlers};
use actix_web::{web, HttpResponse};
use serde_json::json;

/// Where draft image previews are served; handed to the preview registry.
pub const PREVIEW_URL_PREFIX: &str = "/api/v1/drafts/previews/";

async fn health_check_handler(app_state: web::Data<AppState>) -> HttpResponse {
  HttpResponse::Ok().json(json!({
    "status": "ok",
    "backend": format!("{:?}", app_state.config.admin.backend).to_lowercase(),
    "orderedCatalog": app_state.console.capability().ordered,
  }))
}

pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg.service(
    web::scope("/api/v1")
      .route("/health", web::get().to(health_check_handler))
      .route("/message", web::get().to(order_handlers::current_message_handler))
      // Draft rows of the bulk upload form
      .service(
        web::scope("/drafts")
          .route("", web::get().to(draft_handlers::list_drafts_handler))
          .route("/rows", web::post().to(draft_handlers::add_row_handler))
          .route("/rows/{row}", web::put().to(draft_handlers::update_row_handler))
          .route("/rows/{row}", web::delete().to(draft_handlers::remove_row_handler))
          .route("/previews/{token}", web::get().to(draft_handlers::preview_handler)),
      )
      // Catalog
      .service(
        web::scope("/catalog")
          .route("", web::get().to(catalog_handlers::load_catalog_handler))
          .route("/submit", web::post().to(catalog_handlers::submit_batch_handler))
          .route(
            "/products/{product_id}/edit-mode",
            web::post().to(catalog_handlers::toggle_edit_mode_handler),
          )
          .route("/products/{product_id}", web::put().to(catalog_handlers::edit_product_handler))
          .route("/products/{product_id}", web::delete().to(catalog_handlers::delete_product_handler)),
      )
      // Orders
      .service(
        web::scope("/orders")
          .route("", web::get().to(order_handlers::load_orders_handler))
          .route("/processed", web::post().to(order_handlers::mark_all_processed_handler))
          .route("/{order_id}/processed", web::post().to(order_handlers::mark_processed_handler))
          .route("/{order_id}", web::delete().to(order_handlers::soft_delete_order_handler)),
      ),
  );
}
