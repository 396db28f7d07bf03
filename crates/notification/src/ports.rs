//! Port through which the relay triggers downstream automation.
//!
//! The [`Dispatcher`] trait is implemented by infrastructure crates (the
//! `github` crate provides the HTTP implementation). Tests substitute an
//! in-memory recorder.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::DispatchError;

/// Event type sent to the downstream automation.
pub const E2E_EVENT_TYPE: &str = "e2e";

/// Body of the outbound dispatch request.
///
/// Serialises to exactly `{"event_type":"e2e"}` for [`DispatchRequest::e2e`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchRequest {
    pub event_type: String,
}

impl DispatchRequest {
    /// The fixed request sent on pipeline success.
    pub fn e2e() -> Self {
        Self {
            event_type: E2E_EVENT_TYPE.to_string(),
        }
    }
}

/// Response received from the dispatch endpoint.
///
/// The status is recorded for logging only; any response counts as delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchResponse {
    pub status: u16,
    pub body: String,
}

impl DispatchResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends the dispatch request to the downstream automation endpoint.
///
/// Implementations perform exactly one attempt per call. They return
/// [`DispatchError`] only for transport-level failures.
#[async_trait]
pub trait Dispatcher: Send + Sync {
    async fn dispatch(&self, request: &DispatchRequest) -> Result<DispatchResponse, DispatchError>;
}

#[async_trait]
impl<D: Dispatcher + ?Sized> Dispatcher for std::sync::Arc<D> {
    async fn dispatch(&self, request: &DispatchRequest) -> Result<DispatchResponse, DispatchError> {
        (**self).dispatch(request).await
    }
}
