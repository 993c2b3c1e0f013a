//! Core data types for the Hachikoma manga generation library.
//!
//! This crate provides the foundation data types used across all Hachikoma
//! interfaces: the generic multimodal request/response types spoken by model
//! drivers, and the manga domain model (salon facts, generated story,
//! generated images).

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod image;
mod input;
mod media;
mod message;
mod output;
mod request;
mod role;
mod salon;
mod story;

pub use image::{ImageData, ImageSet};
pub use input::Input;
pub use media::MediaSource;
pub use message::{Message, MessageBuilder};
pub use output::Output;
pub use request::{
    GenerateRequest, GenerateRequestBuilder, GenerateResponse, Modality, ThinkingLevel,
};
pub use role::Role;
pub use salon::{SalonInfo, SalonInfoBuilder};
pub use story::{ProtagonistInfo, SlideData, StoryData, TargetInfo};

/// Number of slides in a complete manga story.
pub const SLIDE_COUNT: usize = 8;
