// storefront_admin/src/model/mod.rs

//! Domain records decoded from store documents.

pub mod category;
pub mod order;
pub mod product;

pub use category::{Category, UnknownCategory};
pub use order::{Order, OrderItem, OrderStatus};
pub use product::{NewProduct, Product, ProductChanges};
