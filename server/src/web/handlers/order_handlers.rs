// storefront_admin_server/src/web/handlers/order_handlers.rs

use actix_web::{web, HttpResponse};
use serde_json::{json, Value};
use storefront_admin::render::OrdersView;
use storefront_admin::{AdminCommand, CommandOutcome};
use tracing::{info, instrument};

use super::catalog_handlers::unexpected;
use super::{message_json, orders_json, ConfirmQuery};
use crate::errors::Result;
use crate::state::AppState;

fn mutation_body(app_state: &AppState, mut body: Value, orders: Option<&OrdersView>) -> Value {
  body["orders"] = orders.map_or(Value::Null, orders_json);
  body["message"] = json!(app_state.console.message());
  body
}

#[instrument(name = "handler::load_orders", skip(app_state))]
pub async fn load_orders_handler(app_state: web::Data<AppState>) -> Result<HttpResponse> {
  match app_state.console.dispatch(AdminCommand::LoadOrders).await? {
    CommandOutcome::OrdersLoaded(view) => {
      info!(count = view.cards.len(), "Orders listed.");
      Ok(HttpResponse::Ok().json(orders_json(&view)))
    }
    other => unexpected(other),
  }
}

#[instrument(name = "handler::mark_processed", skip(app_state), fields(order_id = %path.as_ref()))]
pub async fn mark_processed_handler(app_state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse> {
  let command = AdminCommand::MarkProcessed {
    order_id: path.into_inner(),
  };
  match app_state.console.dispatch(command).await? {
    CommandOutcome::OrderProcessed { order_id, orders } => Ok(HttpResponse::Ok().json(mutation_body(
      &app_state,
      json!({ "orderId": order_id }),
      orders.as_ref(),
    ))),
    other => unexpected(other),
  }
}

#[instrument(name = "handler::soft_delete_order", skip(app_state, query), fields(order_id = %path.as_ref()))]
pub async fn soft_delete_order_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
  query: web::Query<ConfirmQuery>,
) -> Result<HttpResponse> {
  let command = AdminCommand::SoftDeleteOrder {
    order_id: path.into_inner(),
    confirmation: query.confirmation(),
  };
  match app_state.console.dispatch(command).await? {
    CommandOutcome::OrderDeleted { order_id, orders } => Ok(HttpResponse::Ok().json(mutation_body(
      &app_state,
      json!({ "orderId": order_id }),
      orders.as_ref(),
    ))),
    CommandOutcome::Cancelled => Ok(HttpResponse::Ok().json(json!({ "cancelled": true }))),
    other => unexpected(other),
  }
}

#[instrument(name = "handler::mark_all_processed", skip(app_state, query))]
pub async fn mark_all_processed_handler(
  app_state: web::Data<AppState>,
  query: web::Query<ConfirmQuery>,
) -> Result<HttpResponse> {
  let command = AdminCommand::MarkAllProcessed {
    confirmation: query.confirmation(),
  };
  match app_state.console.dispatch(command).await? {
    CommandOutcome::OrdersProcessed { count, orders } => Ok(HttpResponse::Ok().json(mutation_body(
      &app_state,
      json!({ "count": count }),
      orders.as_ref(),
    ))),
    CommandOutcome::Cancelled => Ok(HttpResponse::Ok().json(json!({ "cancelled": true }))),
    other => unexpected(other),
  }
}

pub async fn current_message_handler(app_state: web::Data<AppState>) -> HttpResponse {
  HttpResponse::Ok().json(message_json(&app_state.console, app_state.console.settings()))
}
