//! Command line surface.
//!
//! [`run`] takes the raw process arguments and returns an [`Outcome`]; it
//! never exits the process itself. A completed batch exits 0 even when some
//! entries failed. Only usage, manifest and codec setup errors are non-zero.

use std::ffi::OsString;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::error::ErrorKind;
use clap::Parser;

use crate::codec::{ExiftoolCodec, MetadataCodec};
use crate::config::TaggerConfig;
use crate::error::{CliError, CodecError};
use crate::loader::ManifestLoader;
use crate::models::BatchReport;
use crate::tagger::BatchTagger;

#[derive(Debug, Parser)]
#[command(name = "tagm", version)]
#[command(about = "Apply keyword tags to media files from a JSON manifest")]
pub struct Cli {
    /// JSON manifest mapping file names to tag lists
    #[arg(short = 'f', long = "file", value_name = "MANIFEST")]
    pub file: PathBuf,

    /// Print the batch report as JSON instead of a summary
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Parse arguments, matching the `-f`/`--file` flag case-insensitively.
    pub fn try_parse_normalized<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::try_parse_from(normalize_args(args))
    }
}

/// Lowercase flag spellings such as `-F`, `-F=path`, `-Fpath` or `--FILE=path`.
/// Flag values keep their case.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut normalized = Vec::new();
    let mut value_next = false;
    for arg in args.into_iter().map(Into::into) {
        if value_next {
            value_next = false;
            normalized.push(arg);
            continue;
        }
        match arg.to_str() {
            Some(s) if s.eq_ignore_ascii_case("-f") || s.eq_ignore_ascii_case("--file") => {
                value_next = true;
                normalized.push(OsString::from(s.to_ascii_lowercase()));
            }
            Some(s) if s.eq_ignore_ascii_case("--json") => normalized.push("--json".into()),
            Some(s) if s.get(..7).is_some_and(|p| p.eq_ignore_ascii_case("--file=")) => {
                normalized.push(format!("--file={}", &s[7..]).into());
            }
            Some(s) if s.starts_with("-F") => normalized.push(format!("-f{}", &s[2..]).into()),
            _ => normalized.push(arg),
        }
    }
    normalized
}

/// What the process should print and exit with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub exit_code: u8,
    pub message: String,
}

impl Outcome {
    fn completed(cli: &Cli, report: &BatchReport) -> Self {
        let message = if cli.json {
            serde_json::to_string_pretty(report).unwrap_or_else(|e| {
                tracing::warn!("Could not serialize report as JSON: {}", e);
                report.to_string()
            })
        } else {
            report.to_string()
        };
        Self {
            exit_code: 0,
            message,
        }
    }

    fn failed(err: &CliError) -> Self {
        Self {
            exit_code: err.exit_code(),
            message: err.to_string(),
        }
    }

    fn from_clap(err: clap::Error) -> Self {
        let message = err.render().to_string();
        match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => Self {
                exit_code: 0,
                message,
            },
            _ => Self::failed(&CliError::Usage(message.trim_end().to_string())),
        }
    }

    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }

    /// Write the message to `out` on success and to `err` otherwise.
    pub fn write_to(&self, out: &mut impl Write, err: &mut impl Write) -> io::Result<()> {
        let sink: &mut dyn Write = if self.is_success() { out } else { err };
        writeln!(sink, "{}", self.message.trim_end())
    }
}

/// Run the tool against the exiftool codec configured from the environment.
pub fn run<I, T>(args: I) -> Outcome
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    run_with(args, || ExiftoolCodec::from_config(&TaggerConfig::from_env()))
}

/// Run the tool with a caller-supplied codec.
///
/// The codec is only built once the manifest has loaded.
pub fn run_with<I, T, C, F>(args: I, make_codec: F) -> Outcome
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
    C: MetadataCodec,
    F: FnOnce() -> Result<C, CodecError>,
{
    let cli = match Cli::try_parse_normalized(args) {
        Ok(cli) => cli,
        Err(e) => return Outcome::from_clap(e),
    };

    match execute(&cli, make_codec) {
        Ok(report) => Outcome::completed(&cli, &report),
        Err(e) => Outcome::failed(&e),
    }
}

pub fn execute<C, F>(cli: &Cli, make_codec: F) -> Result<BatchReport, CliError>
where
    C: MetadataCodec,
    F: FnOnce() -> Result<C, CodecError>,
{
    check_extension(&cli.file)?;
    let manifest = ManifestLoader::load(&cli.file)?;
    let codec = make_codec().map_err(|e| CliError::CodecUnavailable(e.to_string()))?;

    tracing::info!(
        manifest = %cli.file.display(),
        entries = manifest.entries.len(),
        "Applying manifest"
    );
    Ok(BatchTagger::new(codec).run(&manifest.root, &manifest.entries))
}

fn check_extension(path: &Path) -> Result<(), CliError> {
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        Ok(())
    } else {
        Err(CliError::Usage(format!(
            "Manifest {} must be a .json file",
            path.display()
        )))
    }
}
