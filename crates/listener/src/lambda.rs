//! AWS Lambda event source.

use std::sync::Arc;

use lambda_runtime::{service_fn, LambdaEvent};
use notification::{Dispatcher, NotificationHandler, Outcome};
use serde_json::Value;
use tracing::{info, info_span, Instrument};

use crate::ListenerError;

/// Serves notifications delivered by the Lambda runtime API.
pub struct LambdaEventSource<D> {
    handler: Arc<NotificationHandler<D>>,
}

impl<D> LambdaEventSource<D>
where
    D: Dispatcher + 'static,
{
    pub fn new(handler: Arc<NotificationHandler<D>>) -> Self {
        Self { handler }
    }

    /// Polls the runtime API until the runtime shuts down.
    pub async fn run(self) -> Result<(), ListenerError> {
        info!("Starting Lambda event loop");
        let handler = self.handler;
        lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
            let handler = Arc::clone(&handler);
            async move { handle_event(&handler, event).await }
        }))
        .await
        .map_err(ListenerError::Runtime)
    }
}

/// Handles one Lambda invocation.
///
/// The error is returned through the runtime's error channel and affects only
/// this invocation.
pub async fn handle_event<D: Dispatcher>(
    handler: &NotificationHandler<D>,
    event: LambdaEvent<Value>,
) -> Result<Outcome, lambda_runtime::Error> {
    let (payload, context) = event.into_parts();
    let span = info_span!("lambda_invocation", request_id = %context.request_id);
    let outcome = handler.handle_value(payload).instrument(span).await?;
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use lambda_runtime::Context;
    use notification::{DispatchError, DispatchRequest, DispatchResponse};
    use serde_json::json;

    use super::*;

    struct StubDispatcher {
        calls: Mutex<u32>,
        fail: bool,
    }

    impl StubDispatcher {
        fn new(fail: bool) -> Self {
            Self {
                calls: Mutex::new(0),
                fail,
            }
        }
    }

    #[async_trait]
    impl Dispatcher for StubDispatcher {
        async fn dispatch(
            &self,
            _request: &DispatchRequest,
        ) -> Result<DispatchResponse, DispatchError> {
            *self.calls.lock().unwrap() += 1;
            if self.fail {
                return Err(DispatchError::Transport {
                    url: "http://dispatch.test".to_string(),
                    message: "connection reset".to_string(),
                });
            }
            Ok(DispatchResponse {
                status: 204,
                body: String::new(),
            })
        }
    }

    fn event(state: &str) -> LambdaEvent<Value> {
        let message = json!({ "detail": { "state": state } }).to_string();
        LambdaEvent::new(
            json!({ "Records": [{ "Sns": { "Message": message } }] }),
            Context::default(),
        )
    }

    #[tokio::test]
    async fn success_event_returns_ok() {
        let handler = NotificationHandler::new(StubDispatcher::new(false));

        let outcome = handle_event(&handler, event("SUCCEEDED")).await.unwrap();

        assert_eq!(outcome, Outcome::Ok);
        assert_eq!(*handler.dispatcher().calls.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn other_event_returns_skip() {
        let handler = NotificationHandler::new(StubDispatcher::new(false));

        let outcome = handle_event(&handler, event("FAILED")).await.unwrap();

        assert_eq!(outcome, Outcome::Skip);
        assert_eq!(*handler.dispatcher().calls.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn dispatch_failure_is_invocation_error() {
        let handler = NotificationHandler::new(StubDispatcher::new(true));

        let err = handle_event(&handler, event("SUCCEEDED")).await.unwrap_err();

        assert!(err.to_string().contains("connection reset"));
    }
}
