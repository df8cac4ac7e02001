//! Object naming for image variants
//!
//! Every upload shares one base name across its sizes:
//! `<owner>/<millis>-<random>.webp` for the canonical image and
//! `<owner>/<millis>-<random>-<size>.webp` for the smaller ones.

use rand::Rng;
use rand::distributions::Alphanumeric;
use serde::{Deserialize, Serialize};

/// Extension shared by every stored variant
pub const IMAGE_EXTENSION: &str = "webp";

/// Length of the random part of a base name
const RANDOM_SUFFIX_LEN: usize = 8;

/// Rendition sizes, by bounding box edge in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageSize {
    Thumbnail,
    Medium,
    Large,
    /// Canonical rendition, stored without a suffix
    Original,
}

impl ImageSize {
    /// All sizes, smallest first
    pub const ALL: [ImageSize; 4] = [
        ImageSize::Thumbnail,
        ImageSize::Medium,
        ImageSize::Large,
        ImageSize::Original,
    ];

    /// Sizes derived from the canonical image
    pub const DERIVED: [ImageSize; 3] = [ImageSize::Thumbnail, ImageSize::Medium, ImageSize::Large];

    /// Bounding box edge
    pub const fn max_dimension(&self) -> u32 {
        match self {
            ImageSize::Thumbnail => 150,
            ImageSize::Medium => 300,
            ImageSize::Large => 600,
            ImageSize::Original => 1200,
        }
    }

    /// Filename suffix, `None` for the canonical image
    pub const fn suffix(&self) -> Option<&'static str> {
        match self {
            ImageSize::Thumbnail => Some("thumbnail"),
            ImageSize::Medium => Some("medium"),
            ImageSize::Large => Some("large"),
            ImageSize::Original => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        self.suffix().unwrap_or("original")
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A stored object path split into its shared base and size
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageVariantName {
    /// Path without size suffix or extension (may include directories)
    pub base: String,
    pub size: ImageSize,
}

impl ImageVariantName {
    /// Generate a fresh collision-resistant base under the owner's prefix
    pub fn generate(owner_id: &str) -> Self {
        let random: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(RANDOM_SUFFIX_LEN)
            .map(|b| char::from(b).to_ascii_lowercase())
            .collect();
        Self {
            base: format!("{owner_id}/{}-{random}", shared::util::now_millis()),
            size: ImageSize::Original,
        }
    }

    /// Parse `<base>[-thumbnail|-medium|-large].webp`
    pub fn parse(path: &str) -> Option<Self> {
        let stem = path.strip_suffix(&format!(".{IMAGE_EXTENSION}"))?;

        for size in ImageSize::DERIVED {
            if let Some(suffix) = size.suffix() {
                if let Some(base) = stem.strip_suffix(&format!("-{suffix}")) {
                    if !base.is_empty() && !base.ends_with('/') {
                        return Some(Self {
                            base: base.to_string(),
                            size,
                        });
                    }
                }
            }
        }

        if stem.is_empty() || stem.ends_with('/') {
            return None;
        }
        Some(Self {
            base: stem.to_string(),
            size: ImageSize::Original,
        })
    }

    /// Path of the given size sharing this base
    pub fn path_for(&self, size: ImageSize) -> String {
        self.path_with_extension(size, IMAGE_EXTENSION)
    }

    /// Like [`Self::path_for`] for content that is not WebP
    pub fn path_with_extension(&self, size: ImageSize, extension: &str) -> String {
        match size.suffix() {
            Some(suffix) => format!("{}-{suffix}.{extension}", self.base),
            None => format!("{}.{extension}", self.base),
        }
    }

    /// Paths of all four sizes, canonical first
    pub fn sibling_paths(&self) -> Vec<String> {
        let mut paths = vec![self.path_for(ImageSize::Original)];
        paths.extend(ImageSize::DERIVED.iter().map(|size| self.path_for(*size)));
        paths
    }
}

/// URL of another size of the same image.
///
/// `None` when the URL does not follow the variant naming scheme.
pub fn variant_url(url: &str, size: ImageSize) -> Option<String> {
    let bare = url.split(['?', '#']).next()?;
    ImageVariantName::parse(bare).map(|name| name.path_for(size))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sizes_share_base() {
        let bare = ImageVariantName::parse("u1/1700000000000-ab12cd34.webp").unwrap();
        let thumb = ImageVariantName::parse("u1/1700000000000-ab12cd34-thumbnail.webp").unwrap();
        let medium = ImageVariantName::parse("u1/1700000000000-ab12cd34-medium.webp").unwrap();

        assert_eq!(bare.base, "u1/1700000000000-ab12cd34");
        assert_eq!(thumb.base, bare.base);
        assert_eq!(medium.base, bare.base);
        assert_eq!(bare.size, ImageSize::Original);
        assert_eq!(thumb.size, ImageSize::Thumbnail);
        assert_eq!(medium.size, ImageSize::Medium);
    }

    #[test]
    fn test_parse_rejects_other_names() {
        assert!(ImageVariantName::parse("u1/photo.jpg").is_none());
        assert!(ImageVariantName::parse(".webp").is_none());
        assert!(ImageVariantName::parse("u1/.webp").is_none());
    }

    #[test]
    fn test_sibling_paths() {
        let name = ImageVariantName::parse("u1/17-x-large.webp").unwrap();
        assert_eq!(
            name.sibling_paths(),
            vec![
                "u1/17-x.webp",
                "u1/17-x-thumbnail.webp",
                "u1/17-x-medium.webp",
                "u1/17-x-large.webp",
            ]
        );
    }

    #[test]
    fn test_generate_uses_owner_prefix() {
        let name = ImageVariantName::generate("owner-7");
        let (owner, file) = name.base.split_once('/').unwrap();
        assert_eq!(owner, "owner-7");
        let (millis, random) = file.split_once('-').unwrap();
        assert!(millis.parse::<i64>().is_ok());
        assert_eq!(random.len(), 8);
        assert!(random.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));

        // Round-trips through the parser
        let path = name.path_for(ImageSize::Medium);
        assert_eq!(ImageVariantName::parse(&path).unwrap().base, name.base);
    }

    #[test]
    fn test_variant_url() {
        let url = "https://cdn.test/storage/v1/object/public/products/u1/17-x-medium.webp?t=1";
        assert_eq!(
            variant_url(url, ImageSize::Thumbnail).as_deref(),
            Some("https://cdn.test/storage/v1/object/public/products/u1/17-x-thumbnail.webp")
        );
        assert_eq!(
            variant_url(url, ImageSize::Original).as_deref(),
            Some("https://cdn.test/storage/v1/object/public/products/u1/17-x.webp")
        );
        assert!(variant_url("https://cdn.test/a.png", ImageSize::Large).is_none());
    }
}
