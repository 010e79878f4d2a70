use std::path::PathBuf;

use thiserror::Error;

/// Errors that stop a run before any entry is applied.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Manifest not found: {path}: {source}")]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid manifest {path}: {reason}")]
    Format { path: PathBuf, reason: String },
}

impl ManifestError {
    pub(crate) fn format(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Format {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Errors reported by a [`crate::codec::MetadataCodec`].
///
/// `NotFound` and `Format` are per-file and never abort a batch.
/// `Unavailable` means the codec itself cannot run at all.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("{} does not exist", .0.display())]
    NotFound(PathBuf),

    #[error("Cannot update metadata of {}: {reason}", .path.display())]
    Format { path: PathBuf, reason: String },

    #[error("Metadata codec unavailable: {0}")]
    Unavailable(String),
}

/// Fatal errors surfaced by the command line entry point.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error("{0}")]
    CodecUnavailable(String),
}

impl CliError {
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Usage(_) => 2,
            Self::Manifest(_) | Self::CodecUnavailable(_) => 1,
        }
    }
}
