//! Layers command - show how a call is wrapped

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use delegated_sign::{call_layers, ChainId, FactoryConfig, FileRuntimeProvider, RuntimeProvider};

use super::output::format_layers;

#[derive(Parser, Debug)]
pub struct LayersCmd {
    /// JSON file holding the call: {module, function, args}
    #[arg(long)]
    pub call: PathBuf,

    /// Chain whose runtime decodes the call
    #[arg(long)]
    pub chain: String,
}

impl LayersCmd {
    pub async fn execute(&self, runtime_dir: &Path, json_output: bool) -> Result<()> {
        let raw = std::fs::read_to_string(&self.call)
            .with_context(|| format!("failed to read call {}", self.call.display()))?;
        let raw: serde_json::Value = serde_json::from_str(&raw)
            .with_context(|| format!("invalid call JSON {}", self.call.display()))?;

        let chain_id = ChainId::new(&self.chain);
        let provider = FileRuntimeProvider::new(runtime_dir);
        let runtime = provider.fetch_context(&chain_id).await?;
        let call = runtime.decode_call(&raw)?;

        let max_depth = FactoryConfig::from_env().max_delegation_depth;
        let layers = call_layers(&runtime, &call, max_depth)?;

        if json_output {
            println!("{}", serde_json::to_string_pretty(&layers)?);
        } else {
            print!("{}", format_layers(&layers));
        }
        Ok(())
    }
}
