//! Image URL helpers
//!
//! Unsplash serves resized variants through query parameters; other hosts
//! get their URL back untouched.

/// Widths used when building a `srcset`
pub const DEFAULT_SRCSET_WIDTHS: [u32; 4] = [320, 640, 960, 1280];

/// Requested output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageFormat {
    #[default]
    Webp,
    Avif,
    /// Let the host choose; Unsplash is asked for webp
    Auto,
}

impl ImageFormat {
    fn as_param(self) -> &'static str {
        match self {
            Self::Webp | Self::Auto => "webp",
            Self::Avif => "avif",
        }
    }
}

fn unsplash_base(url: &str) -> Option<&str> {
    if url.contains("unsplash.com") {
        url.split('?').next()
    } else {
        None
    }
}

/// URL of a resized variant of `url`
pub fn optimized_image_url(url: &str, width: u32, format: ImageFormat) -> String {
    match unsplash_base(url) {
        Some(base) => format!(
            "{}?w={}&q=80&fm={}&fit=crop",
            base,
            width,
            format.as_param()
        ),
        None => url.to_string(),
    }
}

/// `srcset` attribute value for the given widths
pub fn src_set(url: &str, widths: &[u32], format: ImageFormat) -> String {
    widths
        .iter()
        .map(|width| format!("{} {}w", optimized_image_url(url, *width, format), width))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Tiny blurred variant shown while the real image loads
pub fn low_quality_placeholder(url: &str) -> String {
    match unsplash_base(url) {
        Some(base) => format!("{}?w=20&q=10&blur=10", base),
        None => url.to_string(),
    }
}
