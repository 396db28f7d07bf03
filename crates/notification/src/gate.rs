//! The success gate.
//!
//! Dispatch proceeds only for [`PipelineState::Succeeded`]. Every other state,
//! the [`PipelineState::Unknown`] sentinel, and the absence of a state all
//! skip.

use crate::PipelineState;

/// Decision taken for one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Skip,
    Dispatch,
}

impl GateDecision {
    pub fn should_dispatch(self) -> bool {
        matches!(self, Self::Dispatch)
    }

    /// Human-readable outcome code for logs.
    pub fn code(self) -> &'static str {
        match self {
            Self::Skip => "SKIP",
            Self::Dispatch => "DISPATCH",
        }
    }
}

impl std::fmt::Display for GateDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Decides whether the state permits a dispatch.
pub fn evaluate(state: Option<&PipelineState>) -> GateDecision {
    match state {
        Some(state) if state.is_success() => GateDecision::Dispatch,
        _ => GateDecision::Skip,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn succeeded_dispatches() {
        let decision = evaluate(Some(&PipelineState::Succeeded));
        assert_eq!(decision, GateDecision::Dispatch);
        assert!(decision.should_dispatch());
        assert_eq!(decision.code(), "DISPATCH");
    }

    #[test]
    fn absent_state_skips() {
        assert_eq!(evaluate(None), GateDecision::Skip);
    }

    #[test]
    fn every_other_state_skips() {
        let states = [
            PipelineState::Started,
            PipelineState::Failed,
            PipelineState::Canceled,
            PipelineState::Superseded,
            PipelineState::Unknown,
            PipelineState::parse(""),
            PipelineState::parse("succeeded"),
            PipelineState::parse(" SUCCEEDED"),
        ];
        for state in &states {
            assert_eq!(evaluate(Some(state)), GateDecision::Skip, "state {state:?}");
        }
    }

    #[test]
    fn skip_code_matches_outcome_string() {
        assert_eq!(GateDecision::Skip.to_string(), crate::Outcome::Skip.as_str());
    }
}
