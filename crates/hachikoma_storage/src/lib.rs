//! Filesystem export of generated slide images.
//!
//! The export directory holds one file per generated slide, named
//! `slide_<id>.<ext>` with the extension derived from the image's MIME
//! type. Writes go through a temp file + rename so a crashed export never
//! leaves a half-written slide behind.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod export;

pub use export::ImageExporter;
