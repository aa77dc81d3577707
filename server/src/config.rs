// storefront_admin_server/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;
use storefront_admin::AdminConfig;

#[derive(Debug, Clone)]
pub struct ServerConfig {
  pub server_host: String,
  pub server_port: u16,
  pub admin: AdminConfig,
}

impl ServerConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present

    let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let server_port = env::var("SERVER_PORT")
      .unwrap_or_else(|_| "8080".to_string())
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?;
    let admin = AdminConfig::from_env()?;

    tracing::info!(%server_host, server_port, "Server configuration loaded successfully.");
    Ok(Self {
      server_host,
      server_port,
      admin,
    })
  }

  pub fn bind_address(&self) -> String {
    format!("{}:{}", self.server_host, self.server_port)
  }
}
