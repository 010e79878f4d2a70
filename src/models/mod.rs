//! Domain models for manifest tagging.
//!
//! # Core Concepts
//!
//! - [`RootPath`]: Optional directory prefix taken from the manifest's `"path"` key.
//! - [`ManifestEntry`]: One target identifier and the tag list to write to it.
//! - [`TargetFile`]: An entry's target resolved against the root, built at apply time.
//! - [`ApplyResult`]: Terminal outcome of one apply attempt.
//! - [`BatchReport`]: Ordered outcomes of a whole run.

mod entry;
mod report;

pub use entry::*;
pub use report::*;
