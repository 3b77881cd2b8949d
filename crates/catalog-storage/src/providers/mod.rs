//! Image upload backend implementations.

pub mod local;
pub mod supabase;

pub use local::LocalImageStore;
pub use supabase::SupabaseUploader;

/// Guess the MIME type of an image from its file name.
pub(crate) fn image_mime(filename: &str) -> &'static str {
    let ext = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}
