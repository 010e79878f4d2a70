//! Manifest parsing.
//!
//! A manifest is a JSON object. Every key except [`ROOT_KEY`] names a target
//! file and maps to an array of tag strings. Key order is preserved and
//! becomes the apply order.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::ManifestError;
use crate::models::{ManifestEntry, RootPath, ROOT_KEY};

/// A parsed manifest: the root prefix plus the remaining entries in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedManifest {
    pub root: RootPath,
    pub entries: Vec<ManifestEntry>,
}

pub struct ManifestLoader;

impl ManifestLoader {
    /// Read and validate the manifest at `path`. Nothing is written back.
    pub fn load(path: impl AsRef<Path>) -> Result<LoadedManifest, ManifestError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| match source.kind() {
            ErrorKind::InvalidData => {
                ManifestError::format(path, "file is not valid UTF-8 text")
            }
            _ => ManifestError::NotFound {
                path: path.to_path_buf(),
                source,
            },
        })?;

        let manifest = Self::parse(path, &content)?;
        tracing::debug!(
            manifest = %path.display(),
            root = ?manifest.root.as_path(),
            entries = manifest.entries.len(),
            "Loaded manifest"
        );
        Ok(manifest)
    }

    /// Parse manifest text. `path` is only used in error messages.
    pub fn parse(path: impl AsRef<Path>, content: &str) -> Result<LoadedManifest, ManifestError> {
        let path = path.as_ref();
        let document: Value = serde_json::from_str(content)
            .map_err(|e| ManifestError::format(path, format!("not valid JSON: {}", e)))?;

        let mut object = match document {
            Value::Object(object) => object,
            other => {
                return Err(ManifestError::format(
                    path,
                    format!("top level must be an object, found {}", type_name(&other)),
                ))
            }
        };

        let root = take_root(path, &mut object)?;

        let entries = object
            .into_iter()
            .map(|(target, value)| {
                let tags = tag_list(path, &target, value)?;
                Ok(ManifestEntry { target, tags })
            })
            .collect::<Result<Vec<_>, ManifestError>>()?;

        Ok(LoadedManifest { root, entries })
    }
}

fn take_root(path: &Path, object: &mut Map<String, Value>) -> Result<RootPath, ManifestError> {
    // shift_remove keeps the remaining keys in document order
    match object.shift_remove(ROOT_KEY) {
        None => Ok(RootPath::None),
        Some(Value::String(root)) => Ok(RootPath::Prefix(PathBuf::from(root))),
        Some(other) => Err(ManifestError::format(
            path,
            format!(
                "\"{}\" must be a string, found {}",
                ROOT_KEY,
                type_name(&other)
            ),
        )),
    }
}

fn tag_list(path: &Path, target: &str, value: Value) -> Result<Vec<String>, ManifestError> {
    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(ManifestError::format(
                path,
                format!(
                    "tags for \"{}\" must be an array of strings, found {}",
                    target,
                    type_name(&other)
                ),
            ))
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::String(tag) => Ok(tag),
            other => Err(ManifestError::format(
                path,
                format!(
                    "tag {} for \"{}\" must be a string, found {}",
                    index,
                    target,
                    type_name(&other)
                ),
            )),
        })
        .collect()
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
