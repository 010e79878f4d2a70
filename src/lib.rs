//! Batch tagging of media files from a JSON manifest.
//!
//! The manifest maps file names to keyword lists. An optional `"path"` entry
//! names a directory every other key is resolved under:
//!
//! ```json
//! { "path": "photos", "img1.jpg": ["beach", "sunset"], "img2.jpg": [] }
//! ```
//!
//! [`loader::ManifestLoader`] turns the document into ordered
//! [`models::ManifestEntry`] values, and [`tagger::BatchTagger`] writes each
//! entry's tags through a [`codec::MetadataCodec`], collecting a
//! [`models::BatchReport`] instead of stopping at the first failure.

pub mod cli;
pub mod codec;
pub mod config;
pub mod error;
pub mod loader;
pub mod models;
pub mod tagger;
