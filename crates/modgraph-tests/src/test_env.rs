//! Isolated test environment for E2E testing
//!
//! Each [`TestEnvironment`] owns a temporary directory with its own metadata
//! store and output directory, so pipeline tests never touch the working tree.

use anyhow::{Context, Result};
use modgraph_lib::application::AppConfig;
use modgraph_lib::metadata::{MetadataStore, ModuleMetadata};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestEnvironment {
    /// Temporary directory for the test environment
    pub temp_dir: TempDir,
    /// Path to the test environment root
    pub root_path: PathBuf,
    /// Where metadata documents are stored
    pub metadata_dir: PathBuf,
    /// Where reports are written
    pub output_dir: PathBuf,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new().context("Failed to create temporary directory")?;
        let root_path = temp_dir.path().to_path_buf();
        let metadata_dir = root_path.join("metadata");
        let output_dir = root_path.join("output");

        Ok(Self {
            temp_dir,
            root_path,
            metadata_dir,
            output_dir,
        })
    }

    /// Default configuration pointed at this environment's directories
    pub fn app_config(&self) -> AppConfig {
        AppConfig {
            metadata_dir: self.metadata_dir.clone(),
            output_dir: self.output_dir.clone(),
            cpu_jobs: 4,
            ..AppConfig::default()
        }
    }

    pub fn store(&self) -> MetadataStore {
        MetadataStore::new(&self.metadata_dir)
    }

    /// Save records through the metadata store
    pub fn write_metadata(&self, metadata: &[ModuleMetadata]) -> Result<usize> {
        self.store()
            .save(metadata)
            .context("Failed to write metadata fixture")
    }

    /// Write a hand-authored metadata document
    pub fn write_raw_document(&self, file_name: &str, content: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.metadata_dir)?;
        let path = self.metadata_dir.join(file_name);
        fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    pub fn read_output(&self, file_name: &str) -> Result<String> {
        let path = self.output_dir.join(file_name);
        fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))
    }
}
