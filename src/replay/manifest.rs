use crate::engine::FetchResult;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading a replay manifest or its page bodies
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse manifest: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Page {index}: {reason}")]
    Invalid { index: usize, reason: String },
}

/// A list of recorded fetch results to feed through the engine
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Manifest {
    #[serde(default, rename = "page")]
    pub pages: Vec<ManifestPage>,

    /// Directory `body-path` entries are resolved against
    #[serde(skip)]
    pub base_dir: PathBuf,
}

/// One recorded fetch
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ManifestPage {
    pub url: String,

    #[serde(default = "default_status")]
    pub status: u16,

    /// Body file relative to the manifest; absent means no body was received
    pub body_path: Option<PathBuf>,

    #[serde(default)]
    pub headers: HashMap<String, String>,
}

fn default_status() -> u16 {
    200
}

impl ManifestPage {
    /// Reads the body file and assembles the fetch result
    pub async fn load(&self, base_dir: &Path) -> Result<FetchResult, ManifestError> {
        let body = match &self.body_path {
            Some(relative) => {
                let path = base_dir.join(relative);
                let bytes = tokio::fs::read(&path)
                    .await
                    .map_err(|source| ManifestError::Io { path, source })?;
                Some(bytes)
            }
            None => None,
        };

        Ok(FetchResult {
            status: self.status,
            body,
            headers: self.headers.clone(),
        })
    }
}

/// Loads a manifest from a TOML file
///
/// Body paths are resolved relative to the manifest's directory.
pub fn load_manifest(path: &Path) -> Result<Manifest, ManifestError> {
    let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut manifest = parse_manifest(&content)?;
    manifest.base_dir = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    Ok(manifest)
}

/// Parses manifest TOML, resolving body paths against the working directory
pub fn parse_manifest(content: &str) -> Result<Manifest, ManifestError> {
    let manifest: Manifest = toml::from_str(content)?;

    for (index, page) in manifest.pages.iter().enumerate() {
        if page.url.trim().is_empty() {
            return Err(ManifestError::Invalid {
                index,
                reason: "url cannot be empty".to_string(),
            });
        }
        if !(100..=599).contains(&page.status) {
            return Err(ManifestError::Invalid {
                index,
                reason: format!("status {} is not an HTTP status", page.status),
            });
        }
    }

    Ok(manifest)
}
