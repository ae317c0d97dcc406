//! Image URL resolution.
//!
//! Node image references are file names in the asset store; the resolver maps
//! them to public URLs.

use url::Url;

/// Resolve an image file reference to a public URL.
pub trait ImageUrlResolver {
    /// The public URL for this image reference.
    fn url(&self, image: &str) -> String;
}

/// Resolver that joins image references onto a base URL.
///
/// The file name is percent-encoded so references with spaces or reserved
/// characters stay valid.
#[derive(Debug, Clone)]
pub struct FileUrlResolver {
    base: Url,
}

impl FileUrlResolver {
    /// Create a resolver for the given base URL (e.g., the media CDN root).
    pub fn new(base: Url) -> Self {
        Self { base }
    }
}

impl ImageUrlResolver for FileUrlResolver {
    fn url(&self, image: &str) -> String {
        let encoded = urlencoding::encode(image.trim_start_matches('/'));
        let base = self.base.as_str().trim_end_matches('/');
        format!("{base}/{encoded}")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn resolver() -> FileUrlResolver {
        FileUrlResolver::new(Url::parse("https://cdn.example.com/media/menu/").unwrap())
    }

    #[test]
    fn joins_base_and_file_name() {
        assert_eq!(
            resolver().url("banner.png"),
            "https://cdn.example.com/media/menu/banner.png"
        );
    }

    #[test]
    fn encodes_reserved_characters() {
        assert_eq!(
            resolver().url("summer sale.png"),
            "https://cdn.example.com/media/menu/summer%20sale.png"
        );
    }

    #[test]
    fn strips_leading_slash() {
        assert_eq!(
            resolver().url("/banner.png"),
            "https://cdn.example.com/media/menu/banner.png"
        );
    }
}
