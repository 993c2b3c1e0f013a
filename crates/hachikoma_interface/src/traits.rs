//! Trait definitions for generation backends and their capabilities.

use crate::ModelMetadata;
use async_trait::async_trait;
use hachikoma_core::{GenerateRequest, GenerateResponse};
use hachikoma_error::HachikomaResult;

/// Core trait that all generation backends must implement.
///
/// This provides the minimal interface for a single generation round trip.
/// Additional capabilities are exposed through optional traits.
#[async_trait]
pub trait HachikomaDriver: Send + Sync {
    /// Generate model output given a multimodal request.
    async fn generate(&self, req: &GenerateRequest) -> HachikomaResult<GenerateResponse>;

    /// Provider name (e.g., "gemini").
    fn provider_name(&self) -> &'static str;

    /// Default model identifier used when the request names none.
    fn model_name(&self) -> &str;
}

/// Trait for backends that report model metadata.
pub trait Metadata {
    /// Metadata for the backend's default model.
    fn metadata(&self) -> ModelMetadata;
}

/// Trait for backends that accept image inputs (multimodal vision).
pub trait Vision: HachikomaDriver {
    /// Maximum number of reference images per request.
    fn max_images_per_request(&self) -> usize {
        1
    }

    /// Supported image formats (MIME types).
    fn supported_image_formats(&self) -> &[&'static str] {
        &["image/png", "image/jpeg", "image/webp"]
    }

    /// Maximum image size in bytes.
    fn max_image_size_bytes(&self) -> usize {
        5 * 1024 * 1024 // 5MB default
    }
}
