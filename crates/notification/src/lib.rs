//! Core domain for the pipeline relay.
//!
//! The relay receives a pipeline completion notification, decides whether the
//! pipeline succeeded, and if so asks a [`Dispatcher`] to trigger the
//! downstream automation webhook. Infrastructure crates implement the port
//! defined here; they never add domain rules.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate has no I/O dependencies.
//! It defines *what* is needed; infrastructure crates define *how* to supply it.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers carried in notifications (`PipelineName`, `ExecutionId`, etc.) |
//! | [`types`] | Shared value types (`PipelineState`, `Outcome`) |
//! | [`envelope`] | Notification envelope model and payload resolution |
//! | [`gate`] | The success gate deciding whether to dispatch |
//! | [`ports`] | The [`Dispatcher`] trait and its request/response types |
//! | [`handler`] | [`NotificationHandler`], which runs one invocation end to end |
//! | [`errors`] | Error types for payload decoding, dispatch, and invocations |

pub mod envelope;
pub mod errors;
pub mod gate;
pub mod handler;
pub mod identifiers;
pub mod ports;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use envelope::{
    extract_state, Envelope, ExecutionTrigger, Payload, PipelineDetail, PipelineStatusRecord,
    SnsMessage, WrappedMessage,
};
pub use errors::{DispatchError, HandlerError, PayloadError};
pub use gate::{evaluate, GateDecision};
pub use handler::NotificationHandler;
pub use identifiers::{ExecutionId, MessageId, PipelineName, TopicArn};
pub use ports::{DispatchRequest, DispatchResponse, Dispatcher, E2E_EVENT_TYPE};
pub use types::{Outcome, PipelineState};
