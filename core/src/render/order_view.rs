// storefront_admin/src/render/order_view.rs

use super::RenderSettings;
use crate::model::{Order, OrderStatus};
use reqwest::Url;
use serde::Serialize;
use tracing::warn;

const CONTACT_BASE: &str = "https://wa.me/";

/// Pre-filled customer follow-up message on WhatsApp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactTemplate {
  base: String,
  store_name: String,
}

impl ContactTemplate {
  /// `phone` may contain formatting; only its digits are used.
  pub fn new(phone: &str, store_name: impl Into<String>) -> Self {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    Self {
      base: format!("{}{}", CONTACT_BASE, digits),
      store_name: store_name.into(),
    }
  }

  pub fn message(&self, short_id: &str) -> String {
    format!("Hello! I'm following up on Order #{} from {}.", short_id, self.store_name)
  }

  pub fn link(&self, short_id: &str) -> String {
    match Url::parse_with_params(&self.base, &[("text", self.message(short_id))]) {
      Ok(url) => url.into(),
      Err(e) => {
        warn!(error = %e, base = %self.base, "Could not build contact link.");
        self.base.clone()
      }
    }
  }
}

impl Default for ContactTemplate {
  fn default() -> Self {
    Self::new("", crate::config::DEFAULT_STORE_NAME)
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
  pub name: String,
  pub image_url: String,
  /// e.g. `₦1,000 × 2`
  pub unit_label: String,
  pub subtotal: f64,
  pub subtotal_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCard {
  pub id: String,
  pub short_id: String,
  pub status: OrderStatus,
  pub date_label: String,
  pub lines: Vec<OrderLine>,
  pub total: f64,
  pub total_label: String,
  pub contact_link: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrdersView {
  pub container: String,
  pub cards: Vec<OrderCard>,
}

pub fn build_order_card(order: &Order, settings: &RenderSettings) -> OrderCard {
  let lines = order
    .items
    .iter()
    .map(|item| OrderLine {
      name: item.name.clone(),
      image_url: item.image_url.clone(),
      unit_label: format!("{} × {}", settings.currency.format_plain(item.price), item.quantity),
      subtotal: item.subtotal(),
      subtotal_label: settings.currency.format_plain(item.subtotal()),
    })
    .collect();
  let total = order.grand_total();
  let short_id = order.short_id().to_string();

  OrderCard {
    id: order.id.clone(),
    contact_link: settings.contact.link(&short_id),
    short_id,
    status: order.status,
    date_label: settings.dates.format(order.created_at),
    lines,
    total,
    total_label: settings.currency.format(total),
  }
}

/// Cards in load order; deleted orders stay listed with their status.
pub fn build_orders_view(orders: &[Order], settings: &RenderSettings) -> OrdersView {
  OrdersView {
    container: settings.surface.orders_container.clone(),
    cards: orders.iter().map(|o| build_order_card(o, settings)).collect(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::model::OrderItem;

  fn sample_order() -> Order {
    Order {
      id: "ORDabc123xyz789".into(),
      items: vec![
        OrderItem {
          name: "Ankara gown".into(),
          price: 1000.0,
          quantity: 2,
          image_url: "https://img/g.jpg".into(),
        },
        OrderItem {
          name: "Crop top".into(),
          price: 500.0,
          quantity: 1,
          image_url: "https://img/t.jpg".into(),
        },
      ],
      total: None,
      status: OrderStatus::Pending,
      created_at: None,
      processed_at: None,
      deleted_at: None,
    }
  }

  #[test]
  fn card_shows_computed_total_and_unit_lines() {
    let card = build_order_card(&sample_order(), &RenderSettings::default());
    assert_eq!(card.total_label, "₦2,500.00");
    assert_eq!(card.lines[0].unit_label, "₦1,000 × 2");
    assert_eq!(card.lines[0].subtotal_label, "₦2,000");
    assert_eq!(card.short_id, "xyz789");
    assert_eq!(card.date_label, "No date");
  }

  #[test]
  fn contact_link_references_masked_id() {
    let contact = ContactTemplate::new("+234 703 380 0470", "Kamzy Outfits");
    let link = contact.link("xyz789");
    assert!(link.starts_with("https://wa.me/2347033800470?text="));
    let parsed = Url::parse(&link).unwrap();
    let (_, text) = parsed.query_pairs().next().unwrap();
    assert_eq!(text, "Hello! I'm following up on Order #xyz789 from Kamzy Outfits.");
  }
}
