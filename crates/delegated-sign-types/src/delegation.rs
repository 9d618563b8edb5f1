//! Delegation mechanisms and the expected delegation path.
//!
//! A delegation path is resolved upstream (from the wallet's proxy and
//! multisig relationships) and describes which account is expected to act at
//! each wrapper layer. Components are stored innermost first: index 0 is the
//! delegate closest to the real call, the last component is the account that
//! actually submits the extrinsic.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::account::AccountId;

/// On-chain proxy permission type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProxyType {
    Any,
    NonTransfer,
    Governance,
    Staking,
    IdentityJudgement,
    CancelProxy,
    Auction,
    NominationPools,
}

impl fmt::Display for ProxyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Coarse grouping of delegation mechanisms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DelegationClass {
    Multisig,
    Proxy,
}

impl fmt::Display for DelegationClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DelegationClass::Multisig => f.write_str("multisig"),
            DelegationClass::Proxy => f.write_str("proxy"),
        }
    }
}

/// How one account acts for (or together with) another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DelegationMechanism {
    /// `as_multi`: needs a separate approval round and pending-operation bookkeeping.
    MultisigAggregate,
    /// `as_multi_threshold_1`: executes immediately.
    MultisigThresholdOne,
    /// `proxy`: on-behalf-of execution by a registered proxy.
    Proxy { proxy_type: ProxyType },
}

impl DelegationMechanism {
    pub fn class(&self) -> DelegationClass {
        match self {
            DelegationMechanism::MultisigAggregate | DelegationMechanism::MultisigThresholdOne => {
                DelegationClass::Multisig
            }
            DelegationMechanism::Proxy { .. } => DelegationClass::Proxy,
        }
    }
}

impl fmt::Display for DelegationMechanism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DelegationMechanism::MultisigAggregate => f.write_str("multisig (as_multi)"),
            DelegationMechanism::MultisigThresholdOne => f.write_str("multisig (threshold 1)"),
            DelegationMechanism::Proxy { proxy_type } => write!(f, "proxy ({})", proxy_type),
        }
    }
}

/// One expected delegation step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelegationPathComponent {
    /// The delegate that acts at this layer.
    pub account: AccountId,
    pub mechanism: DelegationMechanism,
}

impl DelegationPathComponent {
    pub fn new(account: AccountId, mechanism: DelegationMechanism) -> Self {
        Self { account, mechanism }
    }
}

/// Expected delegation path, innermost component first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelegationPath {
    pub components: Vec<DelegationPathComponent>,
}

impl DelegationPath {
    pub fn new(components: Vec<DelegationPathComponent>) -> Self {
        Self { components }
    }

    /// Path with no delegation: the extrinsic sender calls directly.
    pub fn direct() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn components(&self) -> &[DelegationPathComponent] {
        &self.components
    }

    /// Components outermost first, i.e. in the order wrappers are peeled off a call.
    pub fn reversed(&self) -> Vec<DelegationPathComponent> {
        self.components.iter().rev().cloned().collect()
    }

    /// The account expected to submit the extrinsic, if any delegation is involved.
    pub fn submitter(&self) -> Option<&AccountId> {
        self.components.last().map(|c| &c.account)
    }
}

impl FromIterator<DelegationPathComponent> for DelegationPath {
    fn from_iter<I: IntoIterator<Item = DelegationPathComponent>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
