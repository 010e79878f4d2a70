use std::path::{Component, Path, PathBuf};

/// Manifest key whose value is the directory prefix for every other key.
pub const ROOT_KEY: &str = "path";

/// Directory prefix applied to every manifest target.
///
/// `None` is the "no prefix" sentinel: targets are used exactly as written,
/// relative to the working directory. It is deliberately distinct from a
/// prefix of `"."`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RootPath {
    #[default]
    None,
    Prefix(PathBuf),
}

impl RootPath {
    /// Resolve a target identifier against this root.
    ///
    /// With a prefix the target is concatenated onto it, so an absolute
    /// target such as `/a.jpg` still resolves to `<prefix>/a.jpg`.
    pub fn resolve(&self, target: &str) -> TargetFile {
        let path = match self {
            Self::None => PathBuf::from(target),
            Self::Prefix(root) => {
                let relative: PathBuf = Path::new(target)
                    .components()
                    .filter(|c| !matches!(c, Component::RootDir | Component::Prefix(_)))
                    .collect();
                root.join(relative)
            }
        };
        TargetFile {
            target: target.to_string(),
            path,
        }
    }

    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Self::None => None,
            Self::Prefix(root) => Some(root),
        }
    }
}

/// A target identifier paired with the tags it should carry.
///
/// `target` is never [`ROOT_KEY`]. An empty `tags` list is valid and clears
/// the tag field on the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub target: String,
    pub tags: Vec<String>,
}

impl ManifestEntry {
    pub fn new(target: impl Into<String>, tags: Vec<String>) -> Self {
        Self {
            target: target.into(),
            tags,
        }
    }
}

/// A manifest target resolved to a concrete file path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetFile {
    /// The identifier exactly as it appeared in the manifest.
    pub target: String,
    pub path: PathBuf,
}
