//! Response compression layer.

use tower_http::compression::CompressionLayer;

/// Builds a gzip compression layer. Listing responses are JSON arrays that
/// compress well.
pub fn build_compression_layer() -> CompressionLayer {
    CompressionLayer::new().gzip(true)
}
