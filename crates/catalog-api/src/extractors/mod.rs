//! Request extraction helpers: listing query strings and multipart item
//! forms.

pub mod item_form;
pub mod list_params;

pub use item_form::{ItemForm, SpooledImage};
pub use list_params::{CountParams, ListParams, content_range};
