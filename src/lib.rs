//! Delegated call validation.
//!
//! Given a call that may be wrapped in multisig or proxy layers, and the
//! delegation path the wallet expects, builds the ordered list of fee,
//! confirmation and multisig-operation checks that must pass before the
//! call is signed:
//!
//! - [`factory`]: async entry point ([`ValidationSequenceFactory::build`])
//! - [`resolver`]: walks the call tree in lock-step with the path
//! - [`sequence`]: validation nodes and the sequence builder
//! - [`layers`]: path-free view of a call's wrappers, for diagnostics
//!
//! # Example
//!
//! ```ignore
//! use delegated_sign::{RuntimeRegistry, ValidationSequenceFactory};
//!
//! let factory = ValidationSequenceFactory::new(registry);
//! let sequence = factory
//!     .build(&raw_call, sender, origin, &path, &chain_id)
//!     .await?;
//! for fee in sequence.fee_nodes() {
//!     println!("{} pays for {}", fee.payer, fee.call.path());
//! }
//! ```

pub mod config;
pub mod error;
pub mod factory;
pub mod layers;
pub mod resolver;
pub mod sequence;

pub use config::{FactoryConfig, DEFAULT_MAX_DELEGATION_DEPTH};
pub use error::ValidationSequenceError;
pub use factory::{BuildRequest, ValidationSequenceFactory};
pub use layers::{call_layers, CallLayer};
pub use resolver::{CallResolver, ProcessingContext};
pub use sequence::{
    ConfirmationNode, FeeNode, MultisigOperationNode, ValidationNode, ValidationSequence,
    ValidationSequenceBuilder,
};

pub use delegated_sign_runtime::{
    CodecError, FileRuntimeProvider, RuntimeContext, RuntimeError, RuntimeMetadata,
    RuntimeProvider, RuntimeRegistry,
};
pub use delegated_sign_types::{
    AccountId, Call, CallPath, ChainId, DelegationClass, DelegationMechanism, DelegationPath,
    DelegationPathComponent, ProxyType, WrapperKind,
};
