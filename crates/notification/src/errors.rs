//! Error types for the relay domain.
//!
//! [`PayloadError`] never leaves this crate's parsing boundary as a failure:
//! [`crate::extract_state`] turns it into [`crate::PipelineState::Unknown`].
//! [`DispatchError`] is produced by [`crate::Dispatcher`] implementations and
//! surfaces to the invoking runtime wrapped in [`HandlerError`].

use thiserror::Error;

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Failure to turn inbound bytes into a pipeline status record.
#[derive(Debug, Error)]
pub enum PayloadError {
    /// The outer notification envelope is not valid JSON of the expected shape.
    #[error("Notification envelope could not be decoded: {0}")]
    MalformedEnvelope(#[source] serde_json::Error),

    /// The first message carried no payload, or a payload that is neither a
    /// string nor an object.
    #[error("Message payload is missing or has an unsupported JSON type")]
    MissingPayload,

    /// The payload was present but did not decode into a status record.
    #[error("Pipeline status record could not be decoded: {0}")]
    MalformedRecord(#[source] serde_json::Error),
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Failure to deliver the dispatch request.
///
/// Only transport-level conditions are errors. An HTTP response of any
/// status is a successful dispatch.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The request could not be built, e.g. the target URL is malformed.
    #[error("Dispatch request to '{url}' is invalid: {message}")]
    InvalidRequest {
        /// Target URL as configured.
        url: String,
        /// Description of the problem reported by the HTTP client.
        message: String,
    },

    /// Connection, TLS, or body transfer failure.
    #[error("Dispatch request to '{url}' failed: {message}")]
    Transport {
        /// Target URL as configured.
        url: String,
        /// Description of the problem reported by the HTTP client.
        message: String,
    },
}

// ---------------------------------------------------------------------------
// Invocation
// ---------------------------------------------------------------------------

/// Failure of a single handler invocation.
///
/// Returned to the invoking runtime; it never aborts the hosting process.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}
