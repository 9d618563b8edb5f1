//! Runtime metadata: the call surface a chain exposes at a given spec version.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use delegated_sign_types::{CallPath, ChainId, WrapperKind};

/// Pallets and their callable functions for one chain runtime.
///
/// Stored on disk as:
///
/// ```json
/// {
///   "chain_id": "0x91b171bb158e2d3848fa23a9f1c25182fb8e20313b2c1eb49219da7a70ce90c3",
///   "spec_version": 1002000,
///   "pallets": {
///     "Multisig": ["as_multi", "as_multi_threshold_1"],
///     "Proxy": ["proxy"]
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeMetadata {
    pub chain_id: ChainId,
    #[serde(default)]
    pub spec_version: u32,
    #[serde(default)]
    pub pallets: BTreeMap<String, Vec<String>>,
}

impl RuntimeMetadata {
    pub fn new(chain_id: impl Into<ChainId>, spec_version: u32) -> Self {
        Self {
            chain_id: chain_id.into(),
            spec_version,
            pallets: BTreeMap::new(),
        }
    }

    /// Add (or extend) a pallet's function list.
    pub fn with_pallet<I, S>(mut self, module: impl Into<String>, functions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entry = self.pallets.entry(module.into()).or_default();
        for function in functions {
            let function = function.into();
            if !entry.contains(&function) {
                entry.push(function);
            }
        }
        self
    }

    /// Add every delegation wrapper call.
    pub fn with_delegation_pallets(self) -> Self {
        WrapperKind::ALL.iter().fold(self, |metadata, kind| {
            let path = kind.call_path();
            metadata.with_pallet(path.module, [path.function])
        })
    }

    pub fn contains(&self, path: &CallPath) -> bool {
        self.pallets
            .get(&path.module)
            .map(|functions| functions.iter().any(|f| f == &path.function))
            .unwrap_or(false)
    }

    pub fn call_count(&self) -> usize {
        self.pallets.values().map(Vec::len).sum()
    }
}
