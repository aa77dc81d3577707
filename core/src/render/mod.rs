// storefront_admin/src/render/mod.rs

//! View models built from domain data, and their HTML rendering.
//!
//! Every builder is a pure function of its inputs and a [`RenderSettings`].

pub mod catalog_view;
pub mod currency;
pub mod dates;
pub mod draft_view;
pub mod html;
pub mod order_view;

pub use catalog_view::{build_catalog_view, CatalogView, CategorySection, EditState, ProductCard, RenderSurface};
pub use currency::CurrencyFormat;
pub use dates::DateFormat;
pub use draft_view::DraftPreview;
pub use html::Fragment;
pub use order_view::{build_order_card, build_orders_view, ContactTemplate, OrderCard, OrderLine, OrdersView};

use crate::config::AdminConfig;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderSettings {
  pub currency: CurrencyFormat,
  pub dates: DateFormat,
  pub contact: ContactTemplate,
  pub surface: RenderSurface,
}

impl RenderSettings {
  pub fn from_config(config: &AdminConfig) -> Self {
    Self {
      currency: CurrencyFormat::new(config.currency_symbol.clone()),
      dates: DateFormat::with_offset_minutes(config.utc_offset_minutes),
      contact: ContactTemplate::new(&config.contact_phone, config.store_name.clone()),
      surface: RenderSurface::default(),
    }
  }
}
