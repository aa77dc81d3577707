// storefront_admin_server/src/web/handlers/mod.rs

pub mod catalog_handlers;
pub mod draft_handlers;
pub mod order_handlers;

use serde::Deserialize;
use serde_json::{json, Value};
use storefront_admin::render::{html, CatalogView, OrdersView, RenderSettings};
use storefront_admin::{AdminConsole, Confirmation};

/// `?confirm=true` on destructive requests. Anything else declines.
#[derive(Deserialize, Debug, Default)]
pub struct ConfirmQuery {
  #[serde(default)]
  pub confirm: Option<String>,
}

impl ConfirmQuery {
  pub fn confirmation(&self) -> Confirmation {
    Confirmation::from(self.confirm.as_deref() == Some("true"))
  }
}

pub(crate) fn catalog_json(view: &CatalogView) -> Value {
  json!({ "view": view, "fragments": html::render_catalog(view) })
}

pub(crate) fn orders_json(view: &OrdersView) -> Value {
  json!({ "view": view, "fragments": [html::render_orders(view)] })
}

pub(crate) fn message_json(console: &AdminConsole, settings: &RenderSettings) -> Value {
  let notice = console.message();
  json!({
    "message": notice,
    "fragment": html::render_message(&settings.surface.message_container, notice.as_ref()),
  })
}
