// storefront_admin_server/src/main.rs

use actix_web::{web as actix_data, App, HttpServer};
use std::sync::Arc;
use storefront_admin::catalog::PreviewRegistry;
use storefront_admin::AdminConsole;
use storefront_admin_server::config::ServerConfig;
use storefront_admin_server::state::AppState;
use storefront_admin_server::web::{configure_app_routes, PREVIEW_URL_PREFIX};
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_max_level(Level::INFO)
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .with_span_events(FmtSpan::CLOSE)
    .init();

  tracing::info!("Starting storefront admin server...");

  let server_config = match ServerConfig::from_env() {
    Ok(cfg) => Arc::new(cfg),
    Err(e) => {
      tracing::error!(error = %e, "Failed to load server configuration.");
      return Err(e.into());
    }
  };

  let console = AdminConsole::from_config(&server_config.admin, PreviewRegistry::new(PREVIEW_URL_PREFIX)).await?;
  tracing::info!(
    ordered_catalog = console.capability().ordered,
    "Admin console ready; workflows registered."
  );

  let app_state = AppState {
    console: Arc::new(console),
    config: server_config.clone(),
  };

  let server_address = server_config.bind_address();
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone()))
      .wrap(tracing_actix_web::TracingLogger::default())
      .configure(configure_app_routes)
  })
  .bind(&server_address)?
  .run()
  .await?;

  Ok(())
}
