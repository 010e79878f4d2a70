//! Metadata codec seam.
//!
//! The container formats themselves are handled by an external tool. This
//! module defines the capability the tagger needs from it and the exiftool
//! implementation used by the `tagm` binary.

mod bin_detect;
mod exiftool;

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::CodecError;

pub use bin_detect::{find_executable_in_dirs, find_executable_in_path, resolve_bin};
pub use exiftool::ExiftoolCodec;

/// Field conventionally holding subject/keyword tags.
pub const DEFAULT_TAG_FIELD: &str = "XMP-dc:Subject";

/// Read and write the tag field embedded in a file.
///
/// `write_tags` replaces exactly one field and leaves every other metadata
/// field on the file as it was. An empty slice clears the field.
pub trait MetadataCodec {
    /// All metadata fields the codec can see, as field name to values.
    fn read_tags(&self, target: &Path) -> Result<BTreeMap<String, Vec<String>>, CodecError>;

    fn write_tags(&self, target: &Path, tags: &[String]) -> Result<(), CodecError>;
}

impl<C: MetadataCodec + ?Sized> MetadataCodec for &C {
    fn read_tags(&self, target: &Path) -> Result<BTreeMap<String, Vec<String>>, CodecError> {
        (**self).read_tags(target)
    }

    fn write_tags(&self, target: &Path, tags: &[String]) -> Result<(), CodecError> {
        (**self).write_tags(target, tags)
    }
}
