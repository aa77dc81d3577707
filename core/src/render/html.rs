// storefront_admin/src/render/html.rs

//! Escaped HTML fragments, one per page container.

use super::catalog_view::{CatalogView, ProductCard};
use super::draft_view::DraftPreview;
use super::order_view::{OrderCard, OrdersView};
use crate::notice::Notice;
use serde::Serialize;
use std::fmt::Write;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fragment {
  pub container: String,
  pub html: String,
}

pub fn escape(raw: &str) -> String {
  let mut out = String::with_capacity(raw.len());
  for ch in raw.chars() {
    match ch {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&#39;"),
      _ => out.push(ch),
    }
  }
  out
}

fn product_card(card: &ProductCard, html: &mut String) {
  let id = escape(&card.id);
  let name = escape(&card.name);
  let image = escape(&card.image_url);
  if card.editing {
    let _ = write!(
      html,
      r#"<div class="product-card editing" data-id="{id}"><img src="{image}" alt="{name}"><input class="edit-name" value="{name}"><input class="edit-price" type="number" value="{price}"><input class="edit-image" type="file" accept="image/*"><button class="save-btn" data-id="{id}">Save</button><button class="cancel-btn" data-id="{id}">Cancel</button></div>"#,
      price = card.price,
    );
  } else {
    let _ = write!(
      html,
      r#"<div class="product-card" data-id="{id}"><img src="{image}" alt="{name}"><h3>{name}</h3><p>{price}</p><button class="edit-btn" data-id="{id}">Edit</button><button class="delete-btn" data-id="{id}">Delete</button></div>"#,
      price = escape(&card.price_label),
    );
  }
}

/// One fragment per section, including empty ones so stale cards are cleared.
pub fn render_catalog(view: &CatalogView) -> Vec<Fragment> {
  view
    .sections
    .iter()
    .map(|section| {
      let mut html = String::new();
      if section.products.is_empty() {
        let _ = write!(html, r#"<p class="empty">No {} yet.</p>"#, escape(&section.title.to_lowercase()));
      }
      for card in &section.products {
        product_card(card, &mut html);
      }
      Fragment {
        container: section.container.clone(),
        html,
      }
    })
    .collect()
}

fn order_card(card: &OrderCard, html: &mut String) {
  let id = escape(&card.id);
  let status = card.status.as_str();
  let _ = write!(
    html,
    r#"<div class="order-card {status}"><div class="order-header"><h3>Order #{short}</h3><span class="order-status {status}">{status}</span><span class="order-date">{date}</span></div><div class="order-items"><h4>Items ({count})</h4>"#,
    short = escape(&card.short_id),
    date = escape(&card.date_label),
    count = card.lines.len(),
  );
  for line in &card.lines {
    let name = escape(&line.name);
    let _ = write!(
      html,
      r#"<div class="order-item"><img src="{image}" alt="{name}" class="item-image"><div class="item-details"><h5>{name}</h5><p>{unit}</p><p>Subtotal: {subtotal}</p></div></div>"#,
      image = escape(&line.image_url),
      unit = escape(&line.unit_label),
      subtotal = escape(&line.subtotal_label),
    );
  }
  let _ = write!(
    html,
    r#"</div><div class="order-footer"><div class="order-total"><strong>Total: {total}</strong></div><div class="order-actions"><button class="btn success mark-processed" data-order-id="{id}">✓ Mark Processed</button><button class="btn error delete-order" data-order-id="{id}">🗑️ Delete</button><a href="{contact}" target="_blank" class="btn primary">💬 Contact Customer</a></div></div></div>"#,
    total = escape(&card.total_label),
    contact = escape(&card.contact_link),
  );
}

pub fn render_orders(view: &OrdersView) -> Fragment {
  let mut html = String::new();
  if view.cards.is_empty() {
    html.push_str(r#"<p class="empty">No orders found.</p>"#);
  }
  for card in &view.cards {
    order_card(card, &mut html);
  }
  Fragment {
    container: view.container.clone(),
    html,
  }
}

pub fn render_drafts(container: &str, previews: &[DraftPreview]) -> Fragment {
  let mut html = String::new();
  for preview in previews {
    let _ = write!(
      html,
      r#"<div class="product-row{done}" data-row="{row}"><span class="preview-name">{name}</span><span class="preview-price">{price}</span>"#,
      done = if preview.complete { " complete" } else { "" },
      row = preview.row,
      name = escape(&preview.name),
      price = escape(preview.price_label.as_deref().unwrap_or(&preview.price_text)),
    );
    if let Some(url) = &preview.preview_url {
      let _ = write!(html, r#"<img class="preview-image" src="{}" alt="">"#, escape(url));
    }
    let _ = write!(html, r#"<button class="remove-row" data-row="{}">Remove</button></div>"#, preview.row);
  }
  Fragment {
    container: container.to_string(),
    html,
  }
}

/// Empty fragment once the message has cleared.
pub fn render_message(container: &str, notice: Option<&Notice>) -> Fragment {
  let html = match notice {
    Some(notice) => format!(
      r#"<div class="message show {}">{}</div>"#,
      notice.kind.as_str(),
      escape(&notice.text)
    ),
    None => r#"<div class="message"></div>"#.to_string(),
  };
  Fragment {
    container: container.to_string(),
    html,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn escapes_markup_in_names() {
    assert_eq!(escape(r#"<b>"Tee" & co</b>"#), "&lt;b&gt;&quot;Tee&quot; &amp; co&lt;/b&gt;");
  }

  #[test]
  fn empty_orders_list_says_so() {
    let view = OrdersView {
      container: "ordersList".into(),
      cards: vec![],
    };
    assert!(render_orders(&view).html.contains("No orders found."));
  }
}
