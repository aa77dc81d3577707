// storefront_admin/src/render/draft_view.rs

use serde::Serialize;

/// Live preview of one draft row as currently typed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftPreview {
  pub row: u64,
  pub name: String,
  pub price_text: String,
  /// Formatted price once the text parses as one.
  pub price_label: Option<String>,
  pub file_name: Option<String>,
  /// Temporary local URL of the chosen image.
  pub preview_url: Option<String>,
  /// Whether the row would be submitted rather than skipped.
  pub complete: bool,
}
