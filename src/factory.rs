//! Entry point: fetch the runtime, decode the call, resolve it against the path.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use delegated_sign_runtime::RuntimeProvider;
use delegated_sign_types::{AccountId, ChainId, DelegationPath};

use crate::config::FactoryConfig;
use crate::error::ValidationSequenceError;
use crate::resolver::{CallResolver, ProcessingContext};
use crate::sequence::{ValidationSequence, ValidationSequenceBuilder};

/// The five inputs of [`ValidationSequenceFactory::build`], bundled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildRequest {
    /// Raw call in `{module, function, args}` form.
    pub call: Value,
    pub extrinsic_sender: AccountId,
    /// Final origin once every delegation layer is stripped.
    pub call_origin: AccountId,
    #[serde(default)]
    pub path: DelegationPath,
    pub chain_id: ChainId,
}

/// Builds validation sequences for delegated calls.
///
/// Only the runtime fetch is asynchronous. Dropping the returned future
/// cancels the build; no partial sequence is ever returned.
pub struct ValidationSequenceFactory<P> {
    provider: P,
    config: FactoryConfig,
}

impl<P: RuntimeProvider> ValidationSequenceFactory<P> {
    pub fn new(provider: P) -> Self {
        Self::with_config(provider, FactoryConfig::default())
    }

    pub fn with_config(provider: P, config: FactoryConfig) -> Self {
        Self { provider, config }
    }

    pub fn config(&self) -> &FactoryConfig {
        &self.config
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub async fn build(
        &self,
        raw_call: &Value,
        extrinsic_sender: AccountId,
        unwrapped_call_origin: AccountId,
        path: &DelegationPath,
        chain_id: &ChainId,
    ) -> Result<ValidationSequence, ValidationSequenceError> {
        let max = self.config.max_delegation_depth;
        if path.len() > max {
            return Err(ValidationSequenceError::DelegationPathTooLong {
                length: path.len(),
                max,
            });
        }

        debug!(
            chain = %chain_id,
            sender = %extrinsic_sender.short(),
            path_len = path.len(),
            "building validation sequence"
        );

        let runtime = self.provider.fetch_context(chain_id).await?;
        let call = runtime.decode_call(raw_call)?;

        let outermost_first = path.reversed();
        let resolver = CallResolver::new(&runtime, &outermost_first);
        let context = ProcessingContext::new(extrinsic_sender, unwrapped_call_origin, call);

        let mut builder = ValidationSequenceBuilder::new();
        resolver.resolve(&context, 0, &mut builder)?;
        let sequence = builder.build();

        debug!(
            chain = %chain_id,
            call = %context.current_call.path(),
            nodes = sequence.len(),
            "built validation sequence"
        );

        Ok(sequence)
    }

    pub async fn build_request(
        &self,
        request: &BuildRequest,
    ) -> Result<ValidationSequence, ValidationSequenceError> {
        self.build(
            &request.call,
            request.extrinsic_sender,
            request.call_origin,
            &request.path,
            &request.chain_id,
        )
        .await
    }

    /// Build independent requests concurrently. Results keep request order.
    pub async fn build_all(
        &self,
        requests: &[BuildRequest],
    ) -> Vec<Result<ValidationSequence, ValidationSequenceError>> {
        futures::future::join_all(requests.iter().map(|request| self.build_request(request))).await
    }
}
