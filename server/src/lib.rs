// storefront_admin_server/src/lib.rs

//! HTTP surface of the storefront admin: catalog, draft rows, and orders
//! under `/api/v1`.

pub mod config;
pub mod errors;
pub mod state;
pub mod web;
