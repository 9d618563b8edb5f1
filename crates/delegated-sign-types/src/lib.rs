//! Shared types for the delegated-sign workspace.
//!
//! - [`account`]: account handles and chain identifiers
//! - [`call`]: decoded calls and the typed argument shapes of delegation wrappers
//! - [`delegation`]: delegation mechanisms, classes and the expected delegation path

pub mod account;
pub mod call;
pub mod delegation;

pub use account::{AccountId, AccountIdError, ChainId, ACCOUNT_ID_LEN};
pub use call::{
    AsMultiCall, AsMultiThreshold1Call, Call, CallError, CallPath, ProxyCall, Timepoint, Weight,
    WrapperArgs, WrapperKind,
};
pub use delegation::{
    DelegationClass, DelegationMechanism, DelegationPath, DelegationPathComponent, ProxyType,
};
