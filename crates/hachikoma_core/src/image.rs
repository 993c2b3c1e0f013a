//! Generated image payloads and the per-slide image set.

use base64::Engine;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A MIME-typed binary image.
///
/// Used both for images returned by the model and for user-supplied
/// reference images.
///
/// # Examples
///
/// ```
/// use hachikoma_core::ImageData;
///
/// let image = ImageData::new("image/png", vec![0x89, 0x50, 0x4E, 0x47]);
/// assert_eq!(image.extension(), "png");
/// assert!(image.to_data_uri().starts_with("data:image/png;base64,"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageData {
    /// MIME type of the payload
    pub mime: String,
    /// Raw image bytes
    pub data: Vec<u8>,
}

impl ImageData {
    /// MIME type assumed when the service omits one.
    pub const DEFAULT_MIME: &'static str = "image/png";

    /// Create a new image payload.
    pub fn new(mime: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime: mime.into(),
            data,
        }
    }

    /// Create an image payload, falling back to PNG when no MIME type is given.
    pub fn with_default_mime(mime: Option<&str>, data: Vec<u8>) -> Self {
        Self::new(mime.unwrap_or(Self::DEFAULT_MIME), data)
    }

    /// File extension matching the MIME type.
    pub fn extension(&self) -> &'static str {
        match self.mime.as_str() {
            "image/jpeg" => "jpg",
            "image/webp" => "webp",
            _ => "png",
        }
    }

    /// Render as a `data:` URI.
    pub fn to_data_uri(&self) -> String {
        let encoded = base64::engine::general_purpose::STANDARD.encode(&self.data);
        format!("data:{};base64,{}", self.mime, encoded)
    }
}

/// Slide-id-keyed set of generated images.
///
/// The set grows incrementally: a slide's entry is either absent or a
/// complete image, and inserting one slide never disturbs the others.
/// Regeneration overwrites a single key.
///
/// # Examples
///
/// ```
/// use hachikoma_core::{ImageData, ImageSet};
///
/// let mut images = ImageSet::new();
/// images.insert(1, ImageData::new("image/png", vec![1]));
/// assert!(images.contains(1));
/// assert_eq!(images.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageSet(BTreeMap<u8, ImageData>);

impl ImageSet {
    /// Create an empty image set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Image for a slide, if one has been generated.
    pub fn get(&self, slide_id: u8) -> Option<&ImageData> {
        self.0.get(&slide_id)
    }

    /// Whether a slide already has an image.
    pub fn contains(&self, slide_id: u8) -> bool {
        self.0.contains_key(&slide_id)
    }

    /// Store the image for a single slide, replacing any previous entry
    /// for that slide only.
    pub fn insert(&mut self, slide_id: u8, image: ImageData) {
        self.0.insert(slide_id, image);
    }

    /// Number of slides with images.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no images have been generated yet.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(slide_id, image)` pairs in ascending slide order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &ImageData)> {
        self.0.iter().map(|(id, image)| (*id, image))
    }
}
