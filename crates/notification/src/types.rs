//! Shared value types for the relay domain.
//!
//! [`PipelineState`] classifies the free-form `state` string reported by the
//! pipeline service. [`Outcome`] is the result signal handed back to the
//! invoking runtime.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Pipeline state
// ---------------------------------------------------------------------------

/// Execution state reported in a pipeline status record.
///
/// Matching is exact and case-sensitive: `"succeeded"` is [`PipelineState::Other`],
/// not [`PipelineState::Succeeded`]. [`PipelineState::Unknown`] is never parsed
/// from input; it is the sentinel produced when no record could be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PipelineState {
    Started,
    Succeeded,
    Failed,
    Canceled,
    Resumed,
    Stopped,
    Stopping,
    Superseded,
    /// Any value not listed above, including the empty string.
    Other(String),
    /// The status record was absent or could not be decoded.
    Unknown,
}

impl PipelineState {
    /// Classifies a raw `state` value.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "STARTED" => Self::Started,
            "SUCCEEDED" => Self::Succeeded,
            "FAILED" => Self::Failed,
            "CANCELED" => Self::Canceled,
            "RESUMED" => Self::Resumed,
            "STOPPED" => Self::Stopped,
            "STOPPING" => Self::Stopping,
            "SUPERSEDED" => Self::Superseded,
            other => Self::Other(other.to_string()),
        }
    }

    /// Returns the wire representation of this state.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Started => "STARTED",
            Self::Succeeded => "SUCCEEDED",
            Self::Failed => "FAILED",
            Self::Canceled => "CANCELED",
            Self::Resumed => "RESUMED",
            Self::Stopped => "STOPPED",
            Self::Stopping => "STOPPING",
            Self::Superseded => "SUPERSEDED",
            Self::Other(raw) => raw,
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Returns `true` only for [`PipelineState::Succeeded`].
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded)
    }
}

impl std::fmt::Display for PipelineState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Invocation outcome
// ---------------------------------------------------------------------------

/// Result signal of a completed invocation.
///
/// Serialises to the bare strings `"OK"` and `"SKIP"` expected by the
/// invoking runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// The dispatch request was sent and a response was received.
    #[serde(rename = "OK")]
    Ok,
    /// No dispatch was attempted.
    #[serde(rename = "SKIP")]
    Skip,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Skip => "SKIP",
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
