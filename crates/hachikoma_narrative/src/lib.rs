//! Story generation and chained image sequencing.
//!
//! This crate drives the two generation stages against any
//! [`HachikomaDriver`](hachikoma_interface::HachikomaDriver) backend:
//! requesting the eight-beat story as JSON, validating it, and walking the
//! slides in order to produce one image per slide, each anchored on the
//! previous slide's rendered output for visual consistency.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod pipeline;
mod prompts;
mod story;

pub use pipeline::MangaPipeline;
pub use prompts::{render_image_prompt, render_story_prompt};
pub use story::{extract_json, validate_salon, validate_story};
