//! File-backed runtime provider.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::debug;

use delegated_sign_types::ChainId;

use crate::context::RuntimeContext;
use crate::metadata::RuntimeMetadata;
use crate::provider::{RuntimeError, RuntimeProvider, RuntimeRegistry};

const METADATA_EXTENSION: &str = "json";

/// File-backed `RuntimeProvider`.
///
/// Reads runtime metadata from `<runtime_dir>/<chain_id>.json` on first use
/// and keeps the parsed context in memory afterwards.
#[derive(Debug)]
pub struct FileRuntimeProvider {
    runtime_dir: PathBuf,
    loaded: RuntimeRegistry,
}

impl FileRuntimeProvider {
    pub fn new(runtime_dir: impl AsRef<Path>) -> Self {
        Self {
            runtime_dir: runtime_dir.as_ref().to_path_buf(),
            loaded: RuntimeRegistry::new(),
        }
    }

    pub fn runtime_dir(&self) -> &Path {
        &self.runtime_dir
    }

    pub fn metadata_path(&self, chain_id: &ChainId) -> PathBuf {
        self.runtime_dir
            .join(format!("{}.{}", chain_id, METADATA_EXTENSION))
    }

    /// Write metadata into the runtime directory, creating it if needed.
    pub fn write_metadata(&self, metadata: &RuntimeMetadata) -> Result<PathBuf> {
        ensure_file_safe(&metadata.chain_id)?;

        fs::create_dir_all(&self.runtime_dir).with_context(|| {
            format!(
                "Failed to create runtime directory: {}",
                self.runtime_dir.display()
            )
        })?;

        let path = self.metadata_path(&metadata.chain_id);
        let json = serde_json::to_string_pretty(metadata)?;
        fs::write(&path, json)
            .with_context(|| format!("Failed to write runtime metadata: {}", path.display()))?;

        // A rewritten file supersedes whatever was loaded before.
        self.loaded.remove(&metadata.chain_id);
        Ok(path)
    }

    /// Chains with a metadata file in the runtime directory.
    pub fn available_chains(&self) -> Result<Vec<ChainId>> {
        if !self.runtime_dir.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.runtime_dir).with_context(|| {
            format!(
                "Failed to read runtime directory: {}",
                self.runtime_dir.display()
            )
        })?;

        let mut chains = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(METADATA_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                chains.push(ChainId::new(stem));
            }
        }
        chains.sort();
        Ok(chains)
    }

    async fn load(&self, chain_id: &ChainId) -> Result<Arc<RuntimeContext>, RuntimeError> {
        ensure_file_safe(chain_id)?;

        let path = self.metadata_path(chain_id);
        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(RuntimeError::Unavailable {
                    chain_id: chain_id.clone(),
                    reason: format!("no runtime metadata at {}", path.display()),
                });
            }
            Err(err) => {
                return Err(RuntimeError::Unavailable {
                    chain_id: chain_id.clone(),
                    reason: format!("failed to read {}: {}", path.display(), err),
                });
            }
        };

        let metadata: RuntimeMetadata =
            serde_json::from_str(&raw).map_err(|e| RuntimeError::InvalidMetadata {
                chain_id: chain_id.clone(),
                message: e.to_string(),
            })?;

        if &metadata.chain_id != chain_id {
            return Err(RuntimeError::InvalidMetadata {
                chain_id: chain_id.clone(),
                message: format!("file describes chain {}", metadata.chain_id),
            });
        }

        debug!(
            chain_id = %chain_id,
            spec_version = metadata.spec_version,
            calls = metadata.call_count(),
            "loaded runtime metadata"
        );

        Ok(self.loaded.register(metadata))
    }
}

fn ensure_file_safe(chain_id: &ChainId) -> Result<(), RuntimeError> {
    let id = chain_id.as_str();
    let safe = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if safe {
        Ok(())
    } else {
        Err(RuntimeError::Unavailable {
            chain_id: chain_id.clone(),
            reason: "chain id cannot be used as a file name".to_string(),
        })
    }
}

#[async_trait::async_trait]
impl RuntimeProvider for FileRuntimeProvider {
    async fn fetch_context(&self, chain_id: &ChainId) -> Result<Arc<RuntimeContext>, RuntimeError> {
        if let Some(context) = self.loaded.get(chain_id) {
            return Ok(context);
        }
        self.load(chain_id).await
    }
}
