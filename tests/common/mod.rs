#![allow(unused_imports, dead_code)]
//! Shared test utilities for integration tests.
//!
//! # Modules
//!
//! - `fixtures`: accounts, runtime metadata and wrapper call builders
//! - `mocks`: runtime providers with controlled behavior

pub mod fixtures;
pub mod mocks;

pub use fixtures::{
    account, as_multi, as_multi_component, chain, factory, proxy, proxy_component, registry,
    remark, runtime_metadata, threshold_1, threshold_1_component, transfer, CHAIN,
};
pub use mocks::{CountingProvider, PendingProvider};
