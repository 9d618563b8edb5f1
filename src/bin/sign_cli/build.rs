//! Build command - validation sequence for one request file

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use delegated_sign::{BuildRequest, FactoryConfig, FileRuntimeProvider, ValidationSequenceFactory};

use super::output::{format_sequence, format_sequence_json};

#[derive(Parser, Debug)]
pub struct BuildCmd {
    /// JSON request: {call, extrinsic_sender, call_origin, path, chain_id}
    #[arg(long)]
    pub request: PathBuf,

    /// Override the maximum delegation path length
    #[arg(long)]
    pub max_depth: Option<usize>,
}

impl BuildCmd {
    pub async fn execute(&self, runtime_dir: &Path, json_output: bool) -> Result<()> {
        let request = read_request(&self.request)?;

        let mut config = FactoryConfig::from_env();
        if let Some(max_depth) = self.max_depth {
            config.max_delegation_depth = max_depth;
        }

        let factory =
            ValidationSequenceFactory::with_config(FileRuntimeProvider::new(runtime_dir), config);
        let sequence = factory
            .build_request(&request)
            .await
            .with_context(|| {
                format!(
                    "failed to build validation sequence on chain {}",
                    request.chain_id
                )
            })?;

        if json_output {
            println!("{}", format_sequence_json(&sequence));
        } else {
            print!("{}", format_sequence(&sequence));
        }
        Ok(())
    }
}

fn read_request(path: &Path) -> Result<BuildRequest> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read request {}", path.display()))?;
    serde_json::from_str(&data).with_context(|| format!("invalid request {}", path.display()))
}
