//! Fixture builders for validation sequence tests.

use serde_json::json;

use delegated_sign::{
    AccountId, Call, ChainId, DelegationMechanism, DelegationPathComponent, ProxyType,
    RuntimeMetadata, RuntimeRegistry, ValidationSequenceFactory,
};
use delegated_sign_types::{AsMultiCall, AsMultiThreshold1Call, ProxyCall, Timepoint, WrapperArgs};

pub const CHAIN: &str = "westend";

pub fn account(byte: u8) -> AccountId {
    AccountId::new([byte; 32])
}

pub fn runtime_metadata() -> RuntimeMetadata {
    RuntimeMetadata::new(CHAIN, 1_017_001)
        .with_delegation_pallets()
        .with_pallet("System", ["remark"])
        .with_pallet("Balances", ["transfer_keep_alive", "transfer_all"])
}

pub fn registry() -> RuntimeRegistry {
    let registry = RuntimeRegistry::new();
    registry.register(runtime_metadata());
    registry
}

pub fn factory() -> ValidationSequenceFactory<RuntimeRegistry> {
    ValidationSequenceFactory::new(registry())
}

pub fn chain() -> ChainId {
    ChainId::new(CHAIN)
}

pub fn remark() -> Call {
    Call::new("System", "remark", json!({"remark": "0x68656c6c6f"}))
}

pub fn transfer(dest: AccountId, value: u128) -> Call {
    Call::new(
        "Balances",
        "transfer_keep_alive",
        json!({"dest": dest.to_string(), "value": value.to_string()}),
    )
}

/// `Multisig.as_multi` wrapping `inner`, approved by `others` besides the signer.
pub fn as_multi(inner: &Call, others: &[AccountId]) -> Call {
    AsMultiCall {
        threshold: 2,
        other_signatories: others.to_vec(),
        maybe_timepoint: Some(Timepoint {
            height: 1_204,
            index: 2,
        }),
        call: inner.to_json(),
        max_weight: Default::default(),
    }
    .into_call()
    .expect("as_multi call")
}

pub fn threshold_1(inner: &Call, others: &[AccountId]) -> Call {
    AsMultiThreshold1Call {
        other_signatories: others.to_vec(),
        call: inner.to_json(),
    }
    .into_call()
    .expect("as_multi_threshold_1 call")
}

/// `Proxy.proxy` executing `inner` on behalf of `real`.
pub fn proxy(real: AccountId, inner: &Call) -> Call {
    ProxyCall {
        real,
        force_proxy_type: None,
        call: inner.to_json(),
    }
    .into_call()
    .expect("proxy call")
}

pub fn as_multi_component(account: AccountId) -> DelegationPathComponent {
    DelegationPathComponent::new(account, DelegationMechanism::MultisigAggregate)
}

pub fn threshold_1_component(account: AccountId) -> DelegationPathComponent {
    DelegationPathComponent::new(account, DelegationMechanism::MultisigThresholdOne)
}

pub fn proxy_component(account: AccountId) -> DelegationPathComponent {
    DelegationPathComponent::new(
        account,
        DelegationMechanism::Proxy {
            proxy_type: ProxyType::Any,
        },
    )
}
