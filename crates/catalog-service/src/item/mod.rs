//! Item management and the image write coordinator.

pub mod service;

pub use service::{DEFAULT_IMAGE_ALT_TEXT, ItemService};
