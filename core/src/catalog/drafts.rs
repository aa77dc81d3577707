// storefront_admin/src/catalog/drafts.rs

use super::preview::{PreviewHandle, PreviewRegistry};
use crate::assets::ImageFile;
use crate::error::{AdminError, Result};
use crate::render::{CurrencyFormat, DraftPreview};
use tracing::debug;

pub type RowId = u64;

#[derive(Debug)]
pub struct DraftImage {
  pub file: ImageFile,
  preview: PreviewHandle,
}

impl DraftImage {
  pub fn preview_url(&self) -> &str {
    self.preview.url()
  }
}

/// One unsaved product row as typed by the admin.
#[derive(Debug)]
pub struct DraftRow {
  pub id: RowId,
  pub name: String,
  /// Raw text; parsed only when previewing or submitting.
  pub price: String,
  pub image: Option<DraftImage>,
}

impl DraftRow {
  fn empty(id: RowId) -> Self {
    Self {
      id,
      name: String::new(),
      price: String::new(),
      image: None,
    }
  }

  /// The price when the text holds a finite, non-negative number.
  pub fn parsed_price(&self) -> Option<f64> {
    parse_price(&self.price)
  }

  /// A row is submitted only when name, price and image are all present.
  pub fn submission(&self) -> Option<DraftSubmission> {
    let name = self.name.trim();
    if name.is_empty() {
      return None;
    }
    let price = self.parsed_price()?;
    let image = self.image.as_ref()?;
    Some(DraftSubmission {
      row: self.id,
      name: name.to_string(),
      price,
      image: image.file.clone(),
    })
  }
}

pub fn parse_price(raw: &str) -> Option<f64> {
  raw
    .trim()
    .parse::<f64>()
    .ok()
    .filter(|p| p.is_finite() && *p >= 0.0)
}

/// A complete row, detached from the board for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftSubmission {
  pub row: RowId,
  pub name: String,
  pub price: f64,
  pub image: ImageFile,
}

/// Partial row update; `None` leaves the field as is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DraftRowInput {
  pub name: Option<String>,
  pub price: Option<String>,
  pub image: Option<ImageFile>,
}

/// The draft rows of the bulk upload form. Nothing here is persisted.
#[derive(Debug)]
pub struct DraftBoard {
  rows: Vec<DraftRow>,
  next_id: RowId,
  previews: PreviewRegistry,
}

impl DraftBoard {
  /// A board with a single empty row.
  pub fn new(previews: PreviewRegistry) -> Self {
    let mut board = Self {
      rows: Vec::new(),
      next_id: 1,
      previews,
    };
    board.add_row();
    board
  }

  pub fn add_row(&mut self) -> RowId {
    let id = self.next_id;
    self.next_id += 1;
    self.rows.push(DraftRow::empty(id));
    id
  }

  /// Removing a row releases its preview.
  pub fn remove_row(&mut self, id: RowId) -> Result<()> {
    let idx = self.index_of(id)?;
    self.rows.remove(idx);
    Ok(())
  }

  pub fn update_row(&mut self, id: RowId, input: DraftRowInput) -> Result<()> {
    let idx = self.index_of(id)?;
    if let Some(image) = input.image {
      self.set_image(id, Some(image))?;
    }
    let row = &mut self.rows[idx];
    if let Some(name) = input.name {
      row.name = name;
    }
    if let Some(price) = input.price {
      row.price = price;
    }
    Ok(())
  }

  /// Replaces the row image. The previous preview is released; an empty
  /// file clears the image.
  pub fn set_image(&mut self, id: RowId, image: Option<ImageFile>) -> Result<()> {
    let idx = self.index_of(id)?;
    let image = image.filter(|f| !f.is_empty()).map(|file| DraftImage {
      preview: self.previews.acquire(&file),
      file,
    });
    self.rows[idx].image = image;
    Ok(())
  }

  pub fn rows(&self) -> &[DraftRow] {
    &self.rows
  }

  pub fn len(&self) -> usize {
    self.rows.len()
  }

  pub fn is_empty(&self) -> bool {
    self.rows.is_empty()
  }

  /// Complete rows in row order, and the ids of the rows that would be skipped.
  pub fn partition(&self) -> (Vec<DraftSubmission>, Vec<RowId>) {
    let mut complete = Vec::new();
    let mut skipped = Vec::new();
    for row in &self.rows {
      match row.submission() {
        Some(submission) => complete.push(submission),
        None => {
          debug!(row = row.id, "Skipping incomplete draft row.");
          skipped.push(row.id);
        }
      }
    }
    (complete, skipped)
  }

  /// Back to a single empty row, releasing every preview.
  pub fn reset(&mut self) {
    self.rows.clear();
    self.add_row();
  }

  pub fn previews(&self, currency: &CurrencyFormat) -> Vec<DraftPreview> {
    self
      .rows
      .iter()
      .map(|row| DraftPreview {
        row: row.id,
        name: row.name.clone(),
        price_text: row.price.clone(),
        price_label: row.parsed_price().map(|p| currency.format_plain(p)),
        file_name: row.image.as_ref().map(|i| i.file.file_name.clone()),
        preview_url: row.image.as_ref().map(|i| i.preview_url().to_string()),
        complete: row.submission().is_some(),
      })
      .collect()
  }

  fn index_of(&self, id: RowId) -> Result<usize> {
    self
      .rows
      .iter()
      .position(|r| r.id == id)
      .ok_or_else(|| AdminError::NotFound(format!("draft row {}", id)))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn image(name: &str) -> ImageFile {
    ImageFile::new(name, Some("image/png".into()), vec![7u8; 4])
  }

  #[test]
  fn starts_and_resets_to_one_empty_row() {
    let registry = PreviewRegistry::default();
    let mut board = DraftBoard::new(registry.clone());
    assert_eq!(board.len(), 1);
    let second = board.add_row();
    board.set_image(second, Some(image("a.png"))).unwrap();
    assert_eq!(registry.live_count(), 1);
    board.reset();
    assert_eq!(board.len(), 1);
    assert_eq!(registry.live_count(), 0);
    assert!(board.rows()[0].name.is_empty());
  }

  #[test]
  fn replacing_or_removing_image_releases_preview() {
    let registry = PreviewRegistry::default();
    let mut board = DraftBoard::new(registry.clone());
    let row = board.rows()[0].id;
    board.set_image(row, Some(image("a.png"))).unwrap();
    let first_url = board.rows()[0].image.as_ref().unwrap().preview_url().to_string();
    board.set_image(row, Some(image("b.png"))).unwrap();
    assert_eq!(registry.live_count(), 1);
    assert_ne!(board.rows()[0].image.as_ref().unwrap().preview_url(), first_url);
    board.remove_row(row).unwrap();
    assert_eq!(registry.live_count(), 0);
    assert!(board.is_empty());
  }

  #[test]
  fn partition_keeps_row_order_and_skips_incomplete() {
    let mut board = DraftBoard::new(PreviewRegistry::default());
    let a = board.rows()[0].id;
    let b = board.add_row();
    let c = board.add_row();
    for (id, price) in [(a, "2500"), (b, "abc"), (c, "1200.50")] {
      board
        .update_row(
          id,
          DraftRowInput {
            name: Some(format!("row {}", id)),
            price: Some(price.into()),
            image: Some(image("x.png")),
          },
        )
        .unwrap();
    }
    let (complete, skipped) = board.partition();
    assert_eq!(complete.iter().map(|s| s.row).collect::<Vec<_>>(), vec![a, c]);
    assert_eq!(skipped, vec![b]);
    assert_eq!(complete[1].price, 1200.5);
  }

  #[test]
  fn rejects_negative_and_non_numeric_prices() {
    assert_eq!(parse_price(" 15000 "), Some(15000.0));
    assert_eq!(parse_price("-1"), None);
    assert_eq!(parse_price("NaN"), None);
    assert_eq!(parse_price(""), None);
  }

  #[test]
  fn unknown_row_is_not_found() {
    let mut board = DraftBoard::new(PreviewRegistry::default());
    assert!(board.remove_row(99).unwrap_err().is_not_found());
  }
}
