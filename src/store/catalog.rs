use std::path::{Path, PathBuf};

use derive_getters::Getters;
use derive_new::new;
use serde::Deserialize;

use crate::{error::ConfigurationError, models::MenuItem};

pub const CATALOG_FILE: &str = "portfolios.json";

/// A named portfolio definition file.
#[derive(Clone, Debug, Eq, Getters, PartialEq, new)]
pub struct PortfolioSource {
    label: String,
    path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct CatalogEntryDto {
    label: String,
    file: String,
}

/// The portfolio sources available in a data directory.
#[derive(Clone, Debug, Getters)]
pub struct SourceCatalog {
    root: PathBuf,
    sources: Vec<PortfolioSource>,
}

impl SourceCatalog {
    /// Reads `portfolios.json` from `root`. Without one, every other `*.json`
    /// file in `root` is a source named after its file stem.
    pub fn load(root: &Path) -> Result<Self, ConfigurationError> {
        let catalog_path = root.join(CATALOG_FILE);
        let sources = if catalog_path.is_file() {
            read_catalog(root, &catalog_path)?
        } else {
            scan_directory(root)?
        };

        if sources.is_empty() {
            return Err(ConfigurationError::NoSources(root.to_path_buf()));
        }

        Ok(Self {
            root: root.to_path_buf(),
            sources,
        })
    }

    pub fn get(&self, label: &str) -> Option<&PortfolioSource> {
        self.sources.iter().find(|source| source.label == label)
    }

    pub fn first(&self) -> Option<&PortfolioSource> {
        self.sources.first()
    }

    pub fn position(&self, label: &str) -> Option<usize> {
        self.sources.iter().position(|source| source.label == label)
    }

    pub fn labels(&self) -> Vec<&str> {
        self.sources.iter().map(|source| source.label.as_str()).collect()
    }

    pub fn menu(&self) -> Vec<MenuItem> {
        self.sources
            .iter()
            .map(|source| {
                MenuItem::new(
                    source.label.clone(),
                    source.path.to_string_lossy().to_string(),
                )
            })
            .collect()
    }
}

fn read_catalog(root: &Path, path: &Path) -> Result<Vec<PortfolioSource>, ConfigurationError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigurationError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let entries: Vec<CatalogEntryDto> =
        serde_json::from_str(&text).map_err(|source| ConfigurationError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(entries
        .into_iter()
        .map(|entry| PortfolioSource::new(entry.label, root.join(entry.file)))
        .collect())
}

fn scan_directory(root: &Path) -> Result<Vec<PortfolioSource>, ConfigurationError> {
    let read_error = |source| ConfigurationError::Read {
        path: root.to_path_buf(),
        source,
    };

    let mut sources = Vec::new();
    for entry in std::fs::read_dir(root).map_err(read_error)? {
        let path = entry.map_err(read_error)?.path();
        let is_json = path.extension().is_some_and(|ext| ext == "json");
        if !path.is_file() || !is_json {
            continue;
        }
        if let Some(stem) = path.file_stem() {
            sources.push(PortfolioSource::new(stem.to_string_lossy().to_string(), path));
        }
    }
    sources.sort_by(|a, b| a.label.cmp(&b.label));

    Ok(sources)
}
