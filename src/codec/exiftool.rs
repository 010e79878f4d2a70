//! [`MetadataCodec`] backed by the `exiftool` executable.
//!
//! Writes go through exiftool's per-tag assignment syntax, which rewrites only
//! the named tag and keeps the rest of the file's metadata. Reads use its JSON
//! output.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use serde_json::{Map, Value};

use super::{resolve_bin, MetadataCodec};
use crate::config::TaggerConfig;
use crate::error::CodecError;

/// Groups whose values describe the file on disk rather than its metadata.
const VOLATILE_GROUPS: &[&str] = &["System", "ExifTool"];

/// exiftool diagnostics meaning the target could not be opened at all.
const OPEN_FAILURES: &[&str] = &["File not found", "Error opening file"];

#[derive(Debug, Clone)]
pub struct ExiftoolCodec {
    bin: PathBuf,
    field: String,
}

impl ExiftoolCodec {
    pub fn new(bin: impl Into<PathBuf>, field: impl Into<String>) -> Self {
        Self {
            bin: bin.into(),
            field: field.into(),
        }
    }

    /// Locate the executable named by the config, or `exiftool` on `PATH`.
    pub fn from_config(config: &TaggerConfig) -> Result<Self, CodecError> {
        let bin = resolve_bin(config.exiftool.as_deref(), "exiftool").ok_or_else(|| {
            CodecError::Unavailable(match &config.exiftool {
                Some(explicit) => format!("{} is not an executable", explicit),
                None => "exiftool was not found on PATH".to_string(),
            })
        })?;
        tracing::debug!(bin = %bin.display(), field = %config.field, "Using exiftool codec");
        Ok(Self::new(bin, config.field.clone()))
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    fn write_args(&self, target: &Path, tags: &[String]) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["-overwrite_original".into()];
        let values: Vec<&String> = tags.iter().filter(|t| !t.is_empty()).collect();
        if values.is_empty() {
            args.push(format!("-{}=", self.field).into());
        } else {
            // Repeated assignments build one list that replaces the old one.
            for tag in values {
                args.push(format!("-{}={}", self.field, tag).into());
            }
        }
        args.push(file_arg(target));
        args
    }

    fn read_args(target: &Path) -> Vec<OsString> {
        vec!["-j".into(), "-G1".into(), "-a".into(), file_arg(target)]
    }

    fn invoke(&self, target: &Path, args: Vec<OsString>) -> Result<Vec<u8>, CodecError> {
        let output = Command::new(&self.bin)
            .args(args)
            .output()
            .map_err(|e| {
                CodecError::Unavailable(format!("failed to run {}: {}", self.bin.display(), e))
            })?;

        if output.status.success() {
            return Ok(output.stdout);
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(classify_failure(target, &stderr, output.status.code()))
    }
}

impl MetadataCodec for ExiftoolCodec {
    fn read_tags(&self, target: &Path) -> Result<BTreeMap<String, Vec<String>>, CodecError> {
        ensure_file(target)?;
        let stdout = self.invoke(target, Self::read_args(target))?;
        parse_json_output(&stdout).map_err(|reason| CodecError::Format {
            path: target.to_path_buf(),
            reason,
        })
    }

    fn write_tags(&self, target: &Path, tags: &[String]) -> Result<(), CodecError> {
        ensure_file(target)?;
        self.invoke(target, self.write_args(target, tags))?;
        Ok(())
    }
}

/// The target must be a regular file this process can open.
fn ensure_file(target: &Path) -> Result<(), CodecError> {
    let missing = || CodecError::NotFound(target.to_path_buf());
    let meta = fs::metadata(target).map_err(|_| missing())?;
    if !meta.is_file() {
        return Err(missing());
    }
    fs::File::open(target).map_err(|_| missing())?;
    Ok(())
}

/// Keep relative paths starting with `-` from being read as options.
fn file_arg(target: &Path) -> OsString {
    if target.as_os_str().to_string_lossy().starts_with('-') {
        Path::new(".").join(target).into_os_string()
    } else {
        target.as_os_str().to_os_string()
    }
}

fn classify_failure(target: &Path, stderr: &str, code: Option<i32>) -> CodecError {
    if OPEN_FAILURES.iter().any(|marker| stderr.contains(marker)) {
        return CodecError::NotFound(target.to_path_buf());
    }
    let reason = stderr
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(|line| line.trim_start_matches("Error: ").to_string())
        .unwrap_or_else(|| match code {
            Some(code) => format!("exiftool exited with status {}", code),
            None => "exiftool was terminated by a signal".to_string(),
        });
    CodecError::Format {
        path: target.to_path_buf(),
        reason,
    }
}

fn parse_json_output(stdout: &[u8]) -> Result<BTreeMap<String, Vec<String>>, String> {
    let mut records: Vec<Map<String, Value>> =
        serde_json::from_slice(stdout).map_err(|e| format!("unreadable exiftool output: {}", e))?;
    if records.is_empty() {
        return Err("exiftool returned no metadata".to_string());
    }
    let record = records.swap_remove(0);

    let mut fields = BTreeMap::new();
    for (name, value) in record {
        if name == "SourceFile" {
            continue;
        }
        let group = name.split_once(':').map(|(group, _)| group);
        if group.is_some_and(|g| VOLATILE_GROUPS.contains(&g)) {
            continue;
        }
        let values = match value {
            Value::Null => continue,
            Value::Array(items) => items.into_iter().map(value_text).collect(),
            other => vec![value_text(other)],
        };
        fields.insert(name, values);
    }
    Ok(fields)
}

fn value_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        // arbitrary_precision keeps the number exactly as exiftool printed it
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}
