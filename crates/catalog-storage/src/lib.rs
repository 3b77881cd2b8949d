//! # catalog-storage
//!
//! Image upload backends for item images: Supabase-compatible object
//! storage over HTTP and a plain local directory.

pub mod factory;
pub mod providers;

pub use factory::build_uploader;
pub use providers::{LocalImageStore, SupabaseUploader};
