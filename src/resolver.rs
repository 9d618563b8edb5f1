//! Recursive resolution of a delegated call against its delegation path.
//!
//! The call tree is walked outermost-first while `depth` indexes the
//! delegation path in the same order, so the path handed to the resolver must
//! already be reversed (see [`DelegationPath::reversed`]).
//!
//! Nodes are emitted post-order: a layer only records its obligations after
//! every layer it wraps has been processed.
//!
//! [`DelegationPath::reversed`]: delegated_sign_types::DelegationPath::reversed

use tracing::{trace, warn};

use delegated_sign_runtime::RuntimeContext;
use delegated_sign_types::{
    AccountId, AsMultiCall, AsMultiThreshold1Call, Call, DelegationClass, DelegationPathComponent,
    ProxyCall, WrapperKind,
};

use crate::error::ValidationSequenceError;
use crate::sequence::{ValidationNode, ValidationSequenceBuilder};

/// Recursion state for one layer.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessingContext {
    pub extrinsic_sender: AccountId,
    /// Account treated as the final origin once every layer is stripped.
    pub unwrapped_call_origin: AccountId,
    pub current_call: Call,
}

impl ProcessingContext {
    pub fn new(
        extrinsic_sender: AccountId,
        unwrapped_call_origin: AccountId,
        current_call: Call,
    ) -> Self {
        Self {
            extrinsic_sender,
            unwrapped_call_origin,
            current_call,
        }
    }

    fn descend(&self, inner_call: Call) -> Self {
        Self {
            extrinsic_sender: self.extrinsic_sender,
            unwrapped_call_origin: self.unwrapped_call_origin,
            current_call: inner_call,
        }
    }
}

/// Walks one call against an outermost-first delegation path.
pub struct CallResolver<'a> {
    runtime: &'a RuntimeContext,
    path: &'a [DelegationPathComponent],
}

impl<'a> CallResolver<'a> {
    pub fn new(runtime: &'a RuntimeContext, path: &'a [DelegationPathComponent]) -> Self {
        Self { runtime, path }
    }

    pub fn resolve(
        &self,
        context: &ProcessingContext,
        depth: usize,
        builder: &mut ValidationSequenceBuilder,
    ) -> Result<(), ValidationSequenceError> {
        match context.current_call.wrapper_kind() {
            Some(WrapperKind::AsMulti) => self.resolve_as_multi(context, depth, builder),
            Some(WrapperKind::AsMultiThreshold1) => {
                self.resolve_as_multi_threshold_1(context, depth, builder)
            }
            Some(WrapperKind::Proxy) => self.resolve_proxy(context, depth, builder),
            None => self.resolve_terminal(context, depth, builder),
        }
    }

    fn resolve_as_multi(
        &self,
        context: &ProcessingContext,
        depth: usize,
        builder: &mut ValidationSequenceBuilder,
    ) -> Result<(), ValidationSequenceError> {
        let component = self.expect_class(depth, DelegationClass::Multisig)?;
        let signer = component.account;
        let call_origin = self.call_origin(context, depth);

        let args: AsMultiCall = self.runtime.decode_args(&context.current_call)?;
        let inner_call = self.runtime.decode_inner(&args)?;
        trace!(
            depth,
            signer = %signer.short(),
            inner = %inner_call.path(),
            "unwrapping as_multi"
        );

        self.resolve(&context.descend(inner_call.clone()), depth + 1, builder)?;

        // The pending operation keeps the full as_multi call so threshold,
        // signatories and timepoint stay available.
        let operation_call = self.runtime.encode_call(args)?;

        builder
            .add(ValidationNode::confirmation(
                signer,
                inner_call,
                DelegationClass::Multisig,
            ))
            .add(ValidationNode::multisig_operation(
                signer,
                operation_call,
                call_origin,
            ));

        if depth == 0 {
            builder.add(ValidationNode::fee(
                signer,
                context.current_call.clone(),
                DelegationClass::Multisig,
            ));
        }

        Ok(())
    }

    fn resolve_as_multi_threshold_1(
        &self,
        context: &ProcessingContext,
        depth: usize,
        builder: &mut ValidationSequenceBuilder,
    ) -> Result<(), ValidationSequenceError> {
        let signer = self.expect_class(depth, DelegationClass::Multisig)?.account;

        let args: AsMultiThreshold1Call = self.runtime.decode_args(&context.current_call)?;
        let inner_call = self.runtime.decode_inner(&args)?;
        trace!(
            depth,
            signer = %signer.short(),
            inner = %inner_call.path(),
            "unwrapping as_multi_threshold_1"
        );

        self.resolve(&context.descend(inner_call), depth + 1, builder)?;

        // Threshold 1 executes immediately; only the submitter's fee is owed.
        if depth == 0 {
            builder.add(ValidationNode::fee(
                signer,
                context.current_call.clone(),
                DelegationClass::Multisig,
            ));
        }

        Ok(())
    }

    fn resolve_proxy(
        &self,
        context: &ProcessingContext,
        depth: usize,
        builder: &mut ValidationSequenceBuilder,
    ) -> Result<(), ValidationSequenceError> {
        let signer = self.expect_class(depth, DelegationClass::Proxy)?.account;

        let args: ProxyCall = self.runtime.decode_args(&context.current_call)?;
        let inner_call = self.runtime.decode_inner(&args)?;
        trace!(
            depth,
            signer = %signer.short(),
            real = %args.real.short(),
            inner = %inner_call.path(),
            "unwrapping proxy"
        );

        self.resolve(&context.descend(inner_call), depth + 1, builder)?;

        if depth == 0 {
            builder
                .add(ValidationNode::confirmation(
                    signer,
                    context.current_call.clone(),
                    DelegationClass::Proxy,
                ))
                .add(ValidationNode::fee(
                    signer,
                    context.current_call.clone(),
                    DelegationClass::Proxy,
                ));
        }

        Ok(())
    }

    fn resolve_terminal(
        &self,
        context: &ProcessingContext,
        depth: usize,
        builder: &mut ValidationSequenceBuilder,
    ) -> Result<(), ValidationSequenceError> {
        if let Some(component) = self.path.get(depth) {
            warn!(
                depth,
                call = %context.current_call.path(),
                expected = %component.mechanism,
                "call ends before delegation path"
            );
            return Err(ValidationSequenceError::UnexpectedDelegationType {
                depth,
                mechanism: component.mechanism,
            });
        }

        trace!(depth, call = %context.current_call.path(), "reached terminal call");

        // No delegation at all: the sender signs directly. Tagged Proxy to
        // keep the class downstream consumers already expect.
        if depth == 0 {
            builder
                .add(ValidationNode::confirmation(
                    context.extrinsic_sender,
                    context.current_call.clone(),
                    DelegationClass::Proxy,
                ))
                .add(ValidationNode::fee(
                    context.extrinsic_sender,
                    context.current_call.clone(),
                    DelegationClass::Proxy,
                ));
        }

        Ok(())
    }

    /// Path component at `depth`, checked against the wrapper's class.
    fn expect_class(
        &self,
        depth: usize,
        expected: DelegationClass,
    ) -> Result<&'a DelegationPathComponent, ValidationSequenceError> {
        let path = self.path;
        let component = path.get(depth).ok_or_else(|| {
            warn!(depth, expected = %expected, "delegation path exhausted");
            ValidationSequenceError::UnexpectedEndOfChain { depth }
        })?;

        if component.mechanism.class() != expected {
            warn!(
                depth,
                expected = %expected,
                found = %component.mechanism,
                "delegation class mismatch"
            );
            return Err(ValidationSequenceError::UnexpectedDelegationType {
                depth,
                mechanism: component.mechanism,
            });
        }

        Ok(component)
    }

    /// Multisig account an `as_multi` layer at `depth` operates for.
    ///
    /// When another delegation layer sits between this one and the final
    /// origin, that layer's account is the multisig.
    fn call_origin(&self, context: &ProcessingContext, depth: usize) -> AccountId {
        if depth + 1 < self.path.len().saturating_sub(1) {
            self.path[depth + 1].account
        } else {
            context.unwrapped_call_origin
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use delegated_sign_runtime::RuntimeMetadata;
    use delegated_sign_types::{DelegationMechanism, ProxyType, WrapperArgs};
    use serde_json::json;

    fn runtime() -> RuntimeContext {
        RuntimeContext::new(
            RuntimeMetadata::new("westend", 1)
                .with_delegation_pallets()
                .with_pallet("System", ["remark"]),
        )
    }

    fn remark() -> Call {
        Call::new("System", "remark", json!({"remark": "0x00"}))
    }

    fn account(byte: u8) -> AccountId {
        AccountId::new([byte; 32])
    }

    fn proxied(real: AccountId, inner: &Call) -> Call {
        ProxyCall {
            real,
            force_proxy_type: None,
            call: inner.to_json(),
        }
        .into_call()
        .unwrap()
    }

    #[test]
    fn test_terminal_without_path() {
        let runtime = runtime();
        let resolver = CallResolver::new(&runtime, &[]);
        let context = ProcessingContext::new(account(1), account(1), remark());

        let mut builder = ValidationSequenceBuilder::new();
        resolver.resolve(&context, 0, &mut builder).unwrap();
        let sequence = builder.build();

        assert_eq!(
            sequence.nodes(),
            &[
                ValidationNode::confirmation(account(1), remark(), DelegationClass::Proxy),
                ValidationNode::fee(account(1), remark(), DelegationClass::Proxy),
            ]
        );
    }

    #[test]
    fn test_terminal_below_root_emits_nothing() {
        let runtime = runtime();
        let path = [DelegationPathComponent::new(
            account(2),
            DelegationMechanism::MultisigThresholdOne,
        )];
        let resolver = CallResolver::new(&runtime, &path);
        let context = ProcessingContext::new(account(1), account(1), remark());

        let mut builder = ValidationSequenceBuilder::new();
        resolver.resolve(&context, 1, &mut builder).unwrap();
        assert!(builder.is_empty());
    }

    #[test]
    fn test_proxy_against_exhausted_path() {
        let runtime = runtime();
        let resolver = CallResolver::new(&runtime, &[]);
        let context =
            ProcessingContext::new(account(1), account(3), proxied(account(3), &remark()));

        let mut builder = ValidationSequenceBuilder::new();
        let err = resolver.resolve(&context, 0, &mut builder).unwrap_err();
        assert_eq!(err, ValidationSequenceError::UnexpectedEndOfChain { depth: 0 });
    }

    #[test]
    fn test_call_origin_uses_next_layer_when_deeper_layers_exist() {
        let runtime = runtime();
        let path = [
            DelegationPathComponent::new(account(10), DelegationMechanism::MultisigAggregate),
            DelegationPathComponent::new(
                account(11),
                DelegationMechanism::Proxy {
                    proxy_type: ProxyType::Any,
                },
            ),
            DelegationPathComponent::new(account(12), DelegationMechanism::MultisigAggregate),
        ];
        let resolver = CallResolver::new(&runtime, &path);
        let context = ProcessingContext::new(account(1), account(99), remark());

        assert_eq!(resolver.call_origin(&context, 0), account(11));
        assert_eq!(resolver.call_origin(&context, 1), account(99));
        assert_eq!(resolver.call_origin(&context, 2), account(99));
    }
}
