//! Local metadata directory
//!
//! Fetched module documents are persisted one file per `group:module` so that
//! reports can be regenerated without touching the network.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

use super::{MetadataError, ModuleMetadata};

/// Directory of stored module metadata documents
#[derive(Debug, Clone)]
pub struct MetadataStore {
    dir: PathBuf,
}

impl MetadataStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File a component is stored under (`:` is not portable in file names)
    pub fn file_name(group: &str, module: &str) -> String {
        format!("{}__{}.json", group, module)
    }

    /// Merge records per `group:module` and write one document each.
    ///
    /// Component and `createdBy` come from the first record of a group;
    /// variants are the union across records, first occurrence of a name wins.
    /// Returns the number of documents written.
    pub fn save(&self, metadata: &[ModuleMetadata]) -> Result<usize, MetadataError> {
        std::fs::create_dir_all(&self.dir).map_err(|e| MetadataError::WriteError {
            path: self.dir.clone(),
            source: e,
        })?;

        let mut grouped: BTreeMap<String, Vec<&ModuleMetadata>> = BTreeMap::new();
        for record in metadata {
            grouped.entry(record.path()).or_default().push(record);
        }

        for (path, records) in &grouped {
            let first = records[0];
            let mut seen = HashSet::new();
            let variants = records
                .iter()
                .flat_map(|record| record.variants.iter())
                .filter(|variant| seen.insert(variant.name.as_str()))
                .cloned()
                .collect();

            let merged = ModuleMetadata {
                component: first.component.clone(),
                created_by: first.created_by.clone(),
                variants,
            };

            let file = self.dir.join(Self::file_name(
                &merged.component.group,
                &merged.component.module,
            ));
            let data = serde_json::to_string_pretty(&merged).map_err(|e| {
                MetadataError::SerializeError {
                    module: path.clone(),
                    source: e,
                }
            })?;
            std::fs::write(&file, data).map_err(|e| MetadataError::WriteError {
                path: file.clone(),
                source: e,
            })?;
            trace!("Stored {} ({} records)", path, records.len());
        }

        debug!(
            "Saved {} metadata documents to {}",
            grouped.len(),
            self.dir.display()
        );
        Ok(grouped.len())
    }

    /// Read every `*.json` document in file-name order
    pub fn load(&self) -> Result<Vec<ModuleMetadata>, MetadataError> {
        if !self.dir.exists() {
            warn!(
                "Metadata directory {} does not exist, nothing to load",
                self.dir.display()
            );
            return Ok(Vec::new());
        }

        let entries = std::fs::read_dir(&self.dir).map_err(|e| MetadataError::ReadError {
            path: self.dir.clone(),
            source: e,
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| MetadataError::ReadError {
                path: self.dir.clone(),
                source: e,
            })?;
            let path = entry.path();
            if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("json") {
                files.push(path);
            }
        }
        files.sort();

        let mut metadata = Vec::with_capacity(files.len());
        for path in files {
            let content =
                std::fs::read_to_string(&path).map_err(|e| MetadataError::ReadError {
                    path: path.clone(),
                    source: e,
                })?;
            let record: ModuleMetadata =
                serde_json::from_str(&content).map_err(|e| MetadataError::ParseError {
                    path: path.clone(),
                    source: e,
                })?;
            trace!("Loaded {} from {}", record.path(), path.display());
            metadata.push(record);
        }

        debug!(
            "Loaded {} metadata documents from {}",
            metadata.len(),
            self.dir.display()
        );
        Ok(metadata)
    }
}

#[cfg(test)]
mod tests {
    include!("store.test.rs");
}
