//! Runtime configuration.
//!
//! Configuration is via environment variables:
//! - `TAG_MANIFEST_EXIFTOOL` - exiftool executable, as a path or a name on `PATH` (default: `exiftool`)
//! - `TAG_MANIFEST_FIELD` - metadata field that receives the tags (default: `XMP-dc:Subject`)

use crate::codec::DEFAULT_TAG_FIELD;

pub const EXIFTOOL_ENV: &str = "TAG_MANIFEST_EXIFTOOL";
pub const FIELD_ENV: &str = "TAG_MANIFEST_FIELD";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggerConfig {
    /// Explicit exiftool command. `None` means look up `exiftool` on `PATH`.
    pub exiftool: Option<String>,
    pub field: String,
}

impl Default for TaggerConfig {
    fn default() -> Self {
        Self {
            exiftool: None,
            field: DEFAULT_TAG_FIELD.to_string(),
        }
    }
}

impl TaggerConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        Self {
            exiftool: get(EXIFTOOL_ENV),
            field: get(FIELD_ENV).unwrap_or_else(|| DEFAULT_TAG_FIELD.to_string()),
        }
    }
}
