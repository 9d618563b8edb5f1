//! Runtimes command - manage the runtime metadata directory

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use delegated_sign::{FileRuntimeProvider, RuntimeMetadata, RuntimeProvider};

#[derive(Parser, Debug)]
pub struct RuntimesCmd {
    #[command(subcommand)]
    pub action: RuntimesAction,
}

#[derive(Subcommand, Debug)]
pub enum RuntimesAction {
    /// List chains with runtime metadata
    List,
    /// Copy a runtime metadata file into the runtime directory
    Add {
        /// Metadata JSON: {chain_id, spec_version, pallets}
        metadata: PathBuf,
    },
}

#[derive(Serialize)]
struct RuntimeSummary {
    chain_id: String,
    spec_version: u32,
    calls: usize,
}

impl RuntimesCmd {
    pub async fn execute(&self, runtime_dir: &Path, json_output: bool) -> Result<()> {
        let provider = FileRuntimeProvider::new(runtime_dir);
        match &self.action {
            RuntimesAction::List => list(&provider, json_output).await,
            RuntimesAction::Add { metadata } => add(&provider, metadata, json_output),
        }
    }
}

async fn list(provider: &FileRuntimeProvider, json_output: bool) -> Result<()> {
    let mut summaries = Vec::new();
    for chain_id in provider.available_chains()? {
        let runtime = provider.fetch_context(&chain_id).await?;
        summaries.push(RuntimeSummary {
            chain_id: chain_id.to_string(),
            spec_version: runtime.spec_version(),
            calls: runtime.metadata().call_count(),
        });
    }

    if json_output {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
    } else if summaries.is_empty() {
        println!(
            "No runtimes in {}",
            provider.runtime_dir().display()
        );
    } else {
        for summary in &summaries {
            println!(
                "{}  spec {}  {} call(s)",
                summary.chain_id, summary.spec_version, summary.calls
            );
        }
    }
    Ok(())
}

fn add(provider: &FileRuntimeProvider, source: &Path, json_output: bool) -> Result<()> {
    let data = std::fs::read_to_string(source)
        .with_context(|| format!("failed to read metadata {}", source.display()))?;
    let metadata: RuntimeMetadata = serde_json::from_str(&data)
        .with_context(|| format!("invalid runtime metadata {}", source.display()))?;

    let path = provider.write_metadata(&metadata)?;

    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "success": true,
                "chain_id": metadata.chain_id,
                "path": path.display().to_string(),
            }))?
        );
    } else {
        println!("Added runtime {} ({})", metadata.chain_id, path.display());
    }
    Ok(())
}
