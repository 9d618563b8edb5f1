//! Decoded runtime calls.
//!
//! A call is identified by its pallet (`module`) and `function` name; its
//! arguments stay an opaque JSON object until a caller asks for a typed view.
//! Three call identities are delegation wrappers whose arguments embed
//! another call:
//!
//! | Identity | Wrapper | Args |
//! |----------|---------|------|
//! | `Multisig.as_multi` | [`WrapperKind::AsMulti`] | [`AsMultiCall`] |
//! | `Multisig.as_multi_threshold_1` | [`WrapperKind::AsMultiThreshold1`] | [`AsMultiThreshold1Call`] |
//! | `Proxy.proxy` | [`WrapperKind::Proxy`] | [`ProxyCall`] |

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::account::AccountId;
use crate::delegation::{DelegationClass, ProxyType};

pub const MULTISIG_MODULE: &str = "Multisig";
pub const AS_MULTI_FUNCTION: &str = "as_multi";
pub const AS_MULTI_THRESHOLD_1_FUNCTION: &str = "as_multi_threshold_1";
pub const PROXY_MODULE: &str = "Proxy";
pub const PROXY_FUNCTION: &str = "proxy";

/// Errors raised while interpreting a call value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallError {
    /// The value is not a `{module, function, args}` object.
    Malformed(String),
    /// Typed extraction was attempted on a call with a different identity.
    UnexpectedCall { expected: CallPath, got: CallPath },
    /// The args do not match the shape implied by the call identity.
    ArgsMismatch { call: CallPath, message: String },
}

impl fmt::Display for CallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallError::Malformed(message) => write!(f, "malformed call: {}", message),
            CallError::UnexpectedCall { expected, got } => {
                write!(f, "expected {} call, got {}", expected, got)
            }
            CallError::ArgsMismatch { call, message } => {
                write!(f, "arguments of {} do not match: {}", call, message)
            }
        }
    }
}

impl std::error::Error for CallError {}

/// Module/function identity of a call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CallPath {
    pub module: String,
    pub function: String,
}

impl CallPath {
    pub fn new(module: impl Into<String>, function: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            function: function.into(),
        }
    }
}

impl fmt::Display for CallPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.module, self.function)
    }
}

/// The closed set of recognised delegation wrappers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WrapperKind {
    AsMulti,
    AsMultiThreshold1,
    Proxy,
}

impl WrapperKind {
    pub const ALL: [WrapperKind; 3] = [
        WrapperKind::AsMulti,
        WrapperKind::AsMultiThreshold1,
        WrapperKind::Proxy,
    ];

    pub fn call_path(&self) -> CallPath {
        match self {
            WrapperKind::AsMulti => CallPath::new(MULTISIG_MODULE, AS_MULTI_FUNCTION),
            WrapperKind::AsMultiThreshold1 => {
                CallPath::new(MULTISIG_MODULE, AS_MULTI_THRESHOLD_1_FUNCTION)
            }
            WrapperKind::Proxy => CallPath::new(PROXY_MODULE, PROXY_FUNCTION),
        }
    }

    pub fn from_identity(module: &str, function: &str) -> Option<Self> {
        match (module, function) {
            (MULTISIG_MODULE, AS_MULTI_FUNCTION) => Some(WrapperKind::AsMulti),
            (MULTISIG_MODULE, AS_MULTI_THRESHOLD_1_FUNCTION) => Some(WrapperKind::AsMultiThreshold1),
            (PROXY_MODULE, PROXY_FUNCTION) => Some(WrapperKind::Proxy),
            _ => None,
        }
    }

    /// Delegation class a path component must have to match this wrapper.
    pub fn class(&self) -> DelegationClass {
        match self {
            WrapperKind::AsMulti | WrapperKind::AsMultiThreshold1 => DelegationClass::Multisig,
            WrapperKind::Proxy => DelegationClass::Proxy,
        }
    }
}

impl fmt::Display for WrapperKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.call_path(), f)
    }
}

fn empty_args() -> Value {
    Value::Object(Map::new())
}

/// A decoded call. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Call {
    pub module: String,
    pub function: String,
    #[serde(default = "empty_args")]
    pub args: Value,
}

impl Call {
    pub fn new(module: impl Into<String>, function: impl Into<String>, args: Value) -> Self {
        Self {
            module: module.into(),
            function: function.into(),
            args,
        }
    }

    /// Parse the structural `{module, function, args}` form.
    ///
    /// `args` may be absent or `null` for calls without arguments; any other
    /// non-object value is rejected.
    pub fn from_json(value: &Value) -> Result<Self, CallError> {
        let mut call: Call = serde_json::from_value(value.clone())
            .map_err(|e| CallError::Malformed(e.to_string()))?;

        if call.args.is_null() {
            call.args = empty_args();
        }
        if !call.args.is_object() {
            return Err(CallError::Malformed(format!(
                "args of {} must be an object",
                call.path()
            )));
        }

        Ok(call)
    }

    pub fn to_json(&self) -> Value {
        serde_json::json!({
            "module": self.module,
            "function": self.function,
            "args": self.args,
        })
    }

    pub fn path(&self) -> CallPath {
        CallPath::new(self.module.clone(), self.function.clone())
    }

    /// Which delegation wrapper this call is, if any.
    pub fn wrapper_kind(&self) -> Option<WrapperKind> {
        WrapperKind::from_identity(&self.module, &self.function)
    }

    /// Typed view of a wrapper's arguments.
    pub fn decode_args<T: WrapperArgs>(&self) -> Result<T, CallError> {
        let expected = T::KIND.call_path();
        if self.module != expected.module || self.function != expected.function {
            return Err(CallError::UnexpectedCall {
                expected,
                got: self.path(),
            });
        }

        serde_json::from_value(self.args.clone()).map_err(|e| CallError::ArgsMismatch {
            call: self.path(),
            message: e.to_string(),
        })
    }
}

/// Multisig timepoint of the first approval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timepoint {
    pub height: u32,
    pub index: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weight {
    pub ref_time: u64,
    pub proof_size: u64,
}

/// Argument shape shared by the delegation wrappers.
pub trait WrapperArgs: Serialize + DeserializeOwned {
    const KIND: WrapperKind;

    /// The embedded call, still in its encoded JSON form.
    fn inner_call(&self) -> &Value;

    /// Reassemble the full wrapper call from these arguments.
    fn into_call(self) -> Result<Call, CallError> {
        let path = Self::KIND.call_path();
        let args = serde_json::to_value(&self).map_err(|e| CallError::ArgsMismatch {
            call: path.clone(),
            message: e.to_string(),
        })?;

        Ok(Call::new(path.module, path.function, args))
    }
}

/// `Multisig.as_multi` arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AsMultiCall {
    pub threshold: u16,
    pub other_signatories: Vec<AccountId>,
    #[serde(default)]
    pub maybe_timepoint: Option<Timepoint>,
    pub call: Value,
    #[serde(default)]
    pub max_weight: Weight,
}

impl WrapperArgs for AsMultiCall {
    const KIND: WrapperKind = WrapperKind::AsMulti;

    fn inner_call(&self) -> &Value {
        &self.call
    }
}

/// `Multisig.as_multi_threshold_1` arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AsMultiThreshold1Call {
    pub other_signatories: Vec<AccountId>,
    pub call: Value,
}

impl WrapperArgs for AsMultiThreshold1Call {
    const KIND: WrapperKind = WrapperKind::AsMultiThreshold1;

    fn inner_call(&self) -> &Value {
        &self.call
    }
}

/// `Proxy.proxy` arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProxyCall {
    /// The account the proxy acts for.
    pub real: AccountId,
    #[serde(default)]
    pub force_proxy_type: Option<ProxyType>,
    pub call: Value,
}

impl WrapperArgs for ProxyCall {
    const KIND: WrapperKind = WrapperKind::Proxy;

    fn inner_call(&self) -> &Value {
        &self.call
    }
}
