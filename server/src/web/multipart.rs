// storefront_admin_server/src/web/multipart.rs

use crate::errors::Result;
use actix_multipart::Multipart;
use futures_util::StreamExt;
use std::collections::HashMap;
use storefront_admin::assets::ImageFile;

/// Text fields and at most one file of a product form.
#[derive(Debug, Default)]
pub struct ProductForm {
  pub text: HashMap<String, String>,
  /// The `image` part. Absent when no file was chosen.
  pub image: Option<ImageFile>,
}

impl ProductForm {
  pub fn text(&self, name: &str) -> Option<String> {
    self.text.get(name).cloned()
  }

  /// Drains the payload. Parts with a file name become the image; the rest
  /// are read as UTF-8 text.
  pub async fn read(mut payload: Multipart) -> Result<Self> {
    let mut form = ProductForm::default();
    while let Some(item) = payload.next().await {
      let mut field = item?;
      let name = field.name().to_string();
      let file_name = field.content_disposition().get_filename().map(str::to_string);
      let content_type = field.content_type().map(|m| m.to_string());

      let mut bytes = Vec::new();
      while let Some(chunk) = field.next().await {
        bytes.extend_from_slice(&chunk?);
      }

      match file_name {
        Some(file_name) if name == "image" => {
          let image = ImageFile::new(file_name, content_type, bytes);
          // Browsers send an empty part when the file input is left blank.
          form.image = Some(image).filter(|i| !i.is_empty());
        }
        _ => {
          form.text.insert(name, String::from_utf8_lossy(&bytes).into_owned());
        }
      }
    }
    Ok(form)
  }
}
