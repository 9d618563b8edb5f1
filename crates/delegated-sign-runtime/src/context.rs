//! Decoding context for one chain runtime.
//!
//! Wraps [`RuntimeMetadata`] and turns raw call values into [`Call`]s that are
//! known to exist on that runtime, and wrapper arguments back into full calls.

use std::collections::HashSet;
use std::fmt;

use serde_json::Value;

use delegated_sign_types::{Call, CallError, CallPath, ChainId, WrapperArgs};

use crate::metadata::RuntimeMetadata;

/// Decode/encode failures against a runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The value is not structurally a call.
    Malformed(String),
    /// The call identity is not part of the runtime.
    UnknownCall { chain_id: ChainId, call: CallPath },
    /// Arguments do not match the shape implied by the call identity.
    ArgsMismatch { call: CallPath, message: String },
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::Malformed(message) => write!(f, "malformed call: {}", message),
            CodecError::UnknownCall { chain_id, call } => {
                write!(f, "call {} is not available on chain {}", call, chain_id)
            }
            CodecError::ArgsMismatch { call, message } => {
                write!(f, "cannot decode arguments of {}: {}", call, message)
            }
        }
    }
}

impl std::error::Error for CodecError {}

impl From<CallError> for CodecError {
    fn from(err: CallError) -> Self {
        match err {
            CallError::Malformed(message) => CodecError::Malformed(message),
            CallError::UnexpectedCall { expected, got } => CodecError::ArgsMismatch {
                call: got,
                message: format!("expected {}", expected),
            },
            CallError::ArgsMismatch { call, message } => CodecError::ArgsMismatch { call, message },
        }
    }
}

/// Runtime-aware call codec.
#[derive(Debug, Clone)]
pub struct RuntimeContext {
    metadata: RuntimeMetadata,
    calls: HashSet<CallPath>,
}

impl RuntimeContext {
    pub fn new(metadata: RuntimeMetadata) -> Self {
        let calls = metadata
            .pallets
            .iter()
            .flat_map(|(module, functions)| {
                functions
                    .iter()
                    .map(move |function| CallPath::new(module.clone(), function.clone()))
            })
            .collect();

        Self { metadata, calls }
    }

    pub fn chain_id(&self) -> &ChainId {
        &self.metadata.chain_id
    }

    pub fn spec_version(&self) -> u32 {
        self.metadata.spec_version
    }

    pub fn metadata(&self) -> &RuntimeMetadata {
        &self.metadata
    }

    pub fn has_call(&self, path: &CallPath) -> bool {
        self.calls.contains(path)
    }

    /// Decode a raw call value and check the runtime knows it.
    pub fn decode_call(&self, value: &Value) -> Result<Call, CodecError> {
        let call = Call::from_json(value)?;
        self.ensure_known(&call)?;
        Ok(call)
    }

    /// Typed view of a wrapper call's arguments.
    pub fn decode_args<T: WrapperArgs>(&self, call: &Call) -> Result<T, CodecError> {
        self.ensure_known(call)?;
        Ok(call.decode_args::<T>()?)
    }

    /// Decode the call embedded in wrapper arguments.
    pub fn decode_inner<T: WrapperArgs>(&self, args: &T) -> Result<Call, CodecError> {
        self.decode_call(args.inner_call())
    }

    /// Reassemble wrapper arguments into the full wrapper call.
    pub fn encode_call<T: WrapperArgs>(&self, args: T) -> Result<Call, CodecError> {
        let call = args.into_call()?;
        self.ensure_known(&call)?;
        Ok(call)
    }

    fn ensure_known(&self, call: &Call) -> Result<(), CodecError> {
        let path = call.path();
        if self.calls.contains(&path) {
            Ok(())
        } else {
            Err(CodecError::UnknownCall {
                chain_id: self.metadata.chain_id.clone(),
                call: path,
            })
        }
    }
}

impl From<RuntimeMetadata> for RuntimeContext {
    fn from(metadata: RuntimeMetadata) -> Self {
        Self::new(metadata)
    }
}
