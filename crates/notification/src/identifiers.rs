//! Newtype identifiers carried by pipeline notifications.
//!
//! None of these values drive a decision; they exist so that log records and
//! spans can name the pipeline execution a notification refers to without
//! passing bare strings around.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Macro for String-wrapped newtypes.
// Generates: struct, new() returning Option<Self>, as_str(), Display.
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, returning `None` if the value is empty.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                if v.is_empty() { None } else { Some(Self(v)) }
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

string_id! {
    /// Name of the pipeline whose execution the notification describes.
    PipelineName
}

string_id! {
    /// Identifier of a single pipeline execution (`execution-id`).
    ExecutionId
}

string_id! {
    /// Identifier assigned to a wrapped message by the delivering topic.
    MessageId
}

string_id! {
    /// ARN of the topic that delivered the notification.
    TopicArn
}
