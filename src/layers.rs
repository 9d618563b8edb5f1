//! Structural view of a call's delegation wrappers.
//!
//! Unlike the resolver this walks the call alone, without an expected path,
//! so it can show what a call actually contains when the two disagree.

use serde::Serialize;

use delegated_sign_runtime::RuntimeContext;
use delegated_sign_types::{
    AsMultiCall, AsMultiThreshold1Call, Call, CallPath, ProxyCall, WrapperKind,
};

use crate::error::ValidationSequenceError;

/// One layer of a call, outermost at depth 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallLayer {
    pub depth: usize,
    pub call: CallPath,
    /// `None` for the terminal call.
    pub wrapper: Option<WrapperKind>,
}

impl CallLayer {
    pub fn is_terminal(&self) -> bool {
        self.wrapper.is_none()
    }
}

/// Unwrap `call` layer by layer.
///
/// The last entry is always the terminal call. Nesting deeper than
/// `max_depth` wrappers fails with `DelegationPathTooLong`.
pub fn call_layers(
    runtime: &RuntimeContext,
    call: &Call,
    max_depth: usize,
) -> Result<Vec<CallLayer>, ValidationSequenceError> {
    let mut layers = Vec::new();
    let mut current = call.clone();

    loop {
        let depth = layers.len();
        let wrapper = current.wrapper_kind();
        layers.push(CallLayer {
            depth,
            call: current.path(),
            wrapper,
        });

        let Some(kind) = wrapper else {
            return Ok(layers);
        };

        if depth + 1 > max_depth {
            return Err(ValidationSequenceError::DelegationPathTooLong {
                length: depth + 1,
                max: max_depth,
            });
        }

        current = match kind {
            WrapperKind::AsMulti => {
                let args: AsMultiCall = runtime.decode_args(&current)?;
                runtime.decode_inner(&args)?
            }
            WrapperKind::AsMultiThreshold1 => {
                let args: AsMultiThreshold1Call = runtime.decode_args(&current)?;
                runtime.decode_inner(&args)?
            }
            WrapperKind::Proxy => {
                let args: ProxyCall = runtime.decode_args(&current)?;
                runtime.decode_inner(&args)?
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use delegated_sign_runtime::RuntimeMetadata;
    use delegated_sign_types::{AccountId, WrapperArgs};
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

    fn proxied(inner: &Call) -> Call {
        ProxyCall {
            real: AccountId::new([4; 32]),
            force_proxy_type: None,
            call: inner.to_json(),
        }
        .into_call()
        .unwrap()
    }

    fn threshold_1(inner: &Call) -> Call {
        AsMultiThreshold1Call {
            other_signatories: vec![AccountId::new([5; 32])],
            call: inner.to_json(),
        }
        .into_call()
        .unwrap()
    }

    #[test]
    fn test_terminal_only() {
        let layers = call_layers(&runtime(), &remark(), 4).unwrap();
        assert_eq!(
            layers,
            vec![CallLayer {
                depth: 0,
                call: CallPath::new("System", "remark"),
                wrapper: None,
            }]
        );
        assert!(layers[0].is_terminal());
    }

    #[test]
    fn test_nested_layers_outermost_first() {
        let call = proxied(&threshold_1(&remark()));
        let layers = call_layers(&runtime(), &call, 4).unwrap();

        let wrappers: Vec<Option<WrapperKind>> = layers.iter().map(|l| l.wrapper).collect();
        assert_eq!(
            wrappers,
            vec![
                Some(WrapperKind::Proxy),
                Some(WrapperKind::AsMultiThreshold1),
                None
            ]
        );
        assert_eq!(layers[2].depth, 2);
    }

    #[test]
    fn test_depth_limit() {
        let call = proxied(&proxied(&proxied(&remark())));
        let err = call_layers(&runtime(), &call, 2).unwrap_err();
        assert_eq!(
            err,
            ValidationSequenceError::DelegationPathTooLong { length: 3, max: 2 }
        );
    }

    #[test]
    fn test_unknown_inner_call() {
        let inner = Call::new("Staking", "bond", json!({}));
        let err = call_layers(&runtime(), &proxied(&inner), 4).unwrap_err();
        assert!(matches!(err, ValidationSequenceError::Decoding(_)));
    }
}
