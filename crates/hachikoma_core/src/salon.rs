//! User-supplied salon facts.

use crate::ImageData;
use serde::{Deserialize, Serialize};

/// The salon facts the advertisement is built from.
///
/// Created once at submission and immutable afterward; the story prompt is
/// derived from these fields by plain text substitution.
///
/// # Examples
///
/// ```
/// use hachikoma_core::SalonInfo;
///
/// let salon = SalonInfo::builder()
///     .name("Salon A".to_string())
///     .strengths(vec!["髪質改善".to_string()])
///     .build()
///     .unwrap();
///
/// assert_eq!(salon.name, "Salon A");
/// assert!(salon.features.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, derive_builder::Builder)]
#[builder(default)]
pub struct SalonInfo {
    /// Salon name (must be non-empty)
    pub name: String,
    /// Self-described strengths (at least one required)
    pub strengths: Vec<String>,
    /// Additional features (may be empty)
    pub features: Vec<String>,
    /// Optional staff reference photo
    pub staff_image: Option<ImageData>,
    /// Optional salon interior reference photo
    pub salon_image: Option<ImageData>,
}

impl SalonInfo {
    /// Start building salon info.
    pub fn builder() -> SalonInfoBuilder {
        SalonInfoBuilder::default()
    }
}
