// storefront_admin_server/src/state.rs
use crate::config::ServerConfig;
use std::sync::Arc;
use storefront_admin::AdminConsole;

#[derive(Clone)]
pub struct AppState {
  pub console: Arc<AdminConsole>,
  pub config: Arc<ServerConfig>,
}
