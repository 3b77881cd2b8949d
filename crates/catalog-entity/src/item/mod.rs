//! Item domain entities: items, their category links, and their images.

pub mod image;
pub mod link;
pub mod model;

pub use image::ItemImage;
pub use link::ItemCategory;
pub use model::{CreateItem, Item, ItemDetail, ItemSummary, UpdateItem};

/// Object name an item's image is uploaded under.
pub fn image_filename(item_id: i64) -> String {
    format!("{item_id}.jpg")
}
