//! Runtime decoding contexts for delegated-sign.
//!
//! This crate provides [`RuntimeProvider`], the seam through which the
//! validation sequence builder obtains a chain's decoding context.
//!
//! # Example
//!
//! ```ignore
//! use delegated_sign_runtime::{FileRuntimeProvider, RuntimeProvider};
//!
//! let provider = FileRuntimeProvider::new("~/.delegated-sign/runtimes");
//! let context = provider.fetch_context(&chain_id).await?;
//! let call = context.decode_call(&raw_call)?;
//! ```

pub mod context;
pub mod file_provider;
pub mod metadata;
pub mod provider;

pub use context::{CodecError, RuntimeContext};
pub use file_provider::FileRuntimeProvider;
pub use metadata::RuntimeMetadata;
pub use provider::{RuntimeError, RuntimeProvider, RuntimeRegistry};
