// storefront_admin_server/src/web/mod.rs

pub mod handlers;
pub mod multipart;
pub mod routes;

pub use routes::{configure_app_routes, PREVIEW_URL_PREFIX};
