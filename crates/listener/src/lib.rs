//! Pipeline relay event sources.
//!
//! Feeds notification envelopes to a [`notification::NotificationHandler`]:
//!
//! - [`LambdaEventSource`] runs the AWS Lambda runtime loop. Each invocation
//!   carries one SNS envelope; the handler's [`notification::Outcome`] is the
//!   function response and a [`notification::HandlerError`] fails only that
//!   invocation.
//!
//! - [`SingleShotEventSource`] reads one envelope from a file or stdin and runs
//!   the handler once. Used for local runs and for replaying captured events.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** Runtime protocols and input framing live here. The
//! [`notification`] crate sees only envelopes.

pub mod lambda;
pub mod single_shot;

use thiserror::Error;

pub use lambda::{handle_event, LambdaEventSource};
pub use single_shot::SingleShotEventSource;

/// Errors raised by event sources.
#[derive(Debug, Error)]
pub enum ListenerError {
    #[error("Failed to read notification envelope: {0}")]
    Read(#[source] std::io::Error),

    #[error("Notification handling failed: {0}")]
    Handler(#[from] notification::HandlerError),

    #[error("Lambda runtime failed: {0}")]
    Runtime(#[source] lambda_runtime::Error),
}
