//! Hachikoma - eight-panel manga advertisement generator
//!
//! Hachikoma turns a salon's self-described strengths into an 8-panel
//! Instagram-style manga advertisement: a text model writes the story, an
//! image model renders each panel, and each panel's request is anchored on
//! the previous panel's rendered output to keep the character consistent.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use hachikoma::{GeminiClient, MangaPipeline, ImageSet, SalonInfo};
//! use hachikoma::{validate_salon, validate_story};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let salon = SalonInfo::builder()
//!         .name("Salon A".to_string())
//!         .strengths(vec!["髪質改善".to_string()])
//!         .build()?;
//!     validate_salon(&salon)?;
//!
//!     let pipeline = MangaPipeline::new(GeminiClient::new()?);
//!     let story = pipeline.request_story(&salon).await?;
//!     validate_story(&story)?;
//!
//!     let mut images = ImageSet::new();
//!     pipeline.generate_all(&story, &mut images).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! Hachikoma is organized as a workspace with focused crates:
//!
//! - `hachikoma_core` - Core data types (story, images, requests)
//! - `hachikoma_interface` - HachikomaDriver trait definition
//! - `hachikoma_error` - Error types
//! - `hachikoma_models` - Gemini REST client, retry wrapper, config
//! - `hachikoma_narrative` - Prompts, story requester, image sequencer
//! - `hachikoma_storage` - Filesystem export
//!
//! This crate (`hachikoma`) re-exports everything for convenience.

// Re-export member crates
pub use hachikoma_core::*;
pub use hachikoma_error::*;
pub use hachikoma_interface::*;
pub use hachikoma_models::*;
pub use hachikoma_narrative::*;
pub use hachikoma_storage::*;
