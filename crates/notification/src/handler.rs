//! Runs one notification through parse, gate, and dispatch.
//!
//! [`NotificationHandler`] owns its [`Dispatcher`] and nothing else, so every
//! invocation is independent: replaying an envelope yields the same outcome
//! and the same outbound request.

use serde_json::Value;
use tracing::{debug, error, info, instrument, warn};

use crate::{
    evaluate, extract_state, DispatchRequest, Dispatcher, Envelope, HandlerError, Outcome,
    PipelineState,
};

/// Handles pipeline notifications.
pub struct NotificationHandler<D> {
    dispatcher: D,
}

impl<D: Dispatcher> NotificationHandler<D> {
    /// Creates a handler that dispatches through `dispatcher`.
    pub fn new(dispatcher: D) -> Self {
        Self { dispatcher }
    }

    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }

    /// Handles an envelope delivered as raw request bytes.
    ///
    /// A body that is not a valid envelope resolves to
    /// [`PipelineState::Unknown`] and is skipped.
    #[instrument(name = "handle_notification", skip_all, fields(bytes = body.len()))]
    pub async fn handle_slice(&self, body: &[u8]) -> Result<Outcome, HandlerError> {
        let state = match Envelope::from_slice(body) {
            Ok(envelope) => self.resolve(&envelope),
            Err(err) => {
                warn!(error = %err, "Discarding undecodable notification");
                Some(PipelineState::Unknown)
            }
        };
        self.gate_and_dispatch(state).await
    }

    /// Handles an envelope delivered as an already-parsed JSON document.
    #[instrument(name = "handle_notification", skip_all)]
    pub async fn handle_value(&self, event: Value) -> Result<Outcome, HandlerError> {
        let state = match Envelope::from_value(event) {
            Ok(envelope) => self.resolve(&envelope),
            Err(err) => {
                warn!(error = %err, "Discarding undecodable notification");
                Some(PipelineState::Unknown)
            }
        };
        self.gate_and_dispatch(state).await
    }

    /// Handles a decoded envelope.
    #[instrument(name = "handle_notification", skip_all, fields(records = envelope.records.len()))]
    pub async fn handle(&self, envelope: &Envelope) -> Result<Outcome, HandlerError> {
        let state = self.resolve(envelope);
        self.gate_and_dispatch(state).await
    }

    fn resolve(&self, envelope: &Envelope) -> Option<PipelineState> {
        debug!(records = envelope.records.len(), "Received notification");
        extract_state(envelope)
    }

    async fn gate_and_dispatch(&self, state: Option<PipelineState>) -> Result<Outcome, HandlerError> {
        let decision = evaluate(state.as_ref());
        if !decision.should_dispatch() {
            info!(
                state = state.as_ref().map(PipelineState::as_str),
                decision = %decision,
                "No pipeline message or pipeline state is not SUCCEEDED, skipping"
            );
            return Ok(Outcome::Skip);
        }

        let request = DispatchRequest::e2e();
        match self.dispatcher.dispatch(&request).await {
            Ok(response) => {
                info!(status = response.status, "Dispatch delivered");
                Ok(Outcome::Ok)
            }
            Err(err) => {
                error!(error = %err, "Dispatch failed; aborting invocation");
                Err(err.into())
            }
        }
    }
}
