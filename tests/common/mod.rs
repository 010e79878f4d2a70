//! Shared fixtures for the integration specs.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use tag_manifest::codec::{MetadataCodec, DEFAULT_TAG_FIELD};
use tag_manifest::error::CodecError;

/// Files whose content is exactly this are treated as unparseable containers.
pub const CORRUPT: &str = "corrupt";

/// In-memory codec over real files on disk.
///
/// A target must exist on disk to be read or written. Its metadata lives in
/// memory, keyed by path. Relative targets resolve against `base`, standing
/// in for the process working directory.
pub struct FakeCodec {
    base: PathBuf,
    field: String,
    metadata: RefCell<HashMap<PathBuf, BTreeMap<String, Vec<String>>>>,
    writes: RefCell<Vec<PathBuf>>,
}

impl FakeCodec {
    pub fn in_dir(base: &Path) -> Self {
        Self {
            base: base.to_path_buf(),
            field: DEFAULT_TAG_FIELD.to_string(),
            metadata: RefCell::new(HashMap::new()),
            writes: RefCell::new(Vec::new()),
        }
    }

    fn locate(&self, target: &Path) -> Result<PathBuf, CodecError> {
        let path = self.base.join(target);
        if path.is_file() {
            Ok(path)
        } else {
            Err(CodecError::NotFound(target.to_path_buf()))
        }
    }

    /// Set a field on a file before a run.
    pub fn seed(&self, target: &Path, field: &str, values: &[&str]) {
        self.metadata
            .borrow_mut()
            .entry(self.base.join(target))
            .or_default()
            .insert(
                field.to_string(),
                values.iter().map(|v| v.to_string()).collect(),
            );
    }

    /// Paths written so far, in order.
    pub fn writes(&self) -> Vec<PathBuf> {
        self.writes.borrow().clone()
    }
}

impl MetadataCodec for FakeCodec {
    fn read_tags(&self, target: &Path) -> Result<BTreeMap<String, Vec<String>>, CodecError> {
        let path = self.locate(target)?;
        Ok(self
            .metadata
            .borrow()
            .get(&path)
            .cloned()
            .unwrap_or_default())
    }

    fn write_tags(&self, target: &Path, tags: &[String]) -> Result<(), CodecError> {
        let path = self.locate(target)?;
        if fs::read_to_string(&path).is_ok_and(|content| content == CORRUPT) {
            return Err(CodecError::Format {
                path: target.to_path_buf(),
                reason: "no metadata container".to_string(),
            });
        }

        self.writes.borrow_mut().push(target.to_path_buf());
        let mut metadata = self.metadata.borrow_mut();
        let fields = metadata.entry(path).or_default();
        if tags.is_empty() {
            fields.remove(&self.field);
        } else {
            fields.insert(self.field.clone(), tags.to_vec());
        }
        Ok(())
    }
}

pub fn touch(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent dir");
    }
    fs::write(&path, b"\xFF\xD8\xFF\xD9").expect("Failed to create file");
    path
}

pub fn write_manifest(dir: &Path, name: &str, json: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, json).expect("Failed to write manifest");
    path
}

pub fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
