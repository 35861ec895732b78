//! Dictation state machine.
//!
//! The session lifecycle is deliberately small:
//! - Idle -> Listening (start dictation)
//! - Listening -> Idle (stop requested, terminal error, or stream end)
//!
//! Finalized transcript segments are not a state concern: one may arrive
//! while Idle (recognition finishing up after a stop) and is still merged.

use std::fmt;

/// Operational state of a dictation session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DictationState {
    /// No recognition in progress. Ready to start.
    Idle,
    /// The platform recognizer is running and reporting segments.
    Listening,
}

impl fmt::Display for DictationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DictationState::Idle => write!(f, "Idle"),
            DictationState::Listening => write!(f, "Listening"),
        }
    }
}

impl DictationState {
    /// Returns whether a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: &DictationState) -> bool {
        matches!(
            (self, target),
            (DictationState::Idle, DictationState::Listening)
                | (DictationState::Listening, DictationState::Idle)
        )
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_display() {
        assert_eq!(DictationState::Idle.to_string(), "Idle");
        assert_eq!(DictationState::Listening.to_string(), "Listening");
    }

    #[test]
    fn test_valid_transitions() {
        assert!(DictationState::Idle.can_transition_to(&DictationState::Listening));
        assert!(DictationState::Listening.can_transition_to(&DictationState::Idle));
    }

    #[test]
    fn test_invalid_transitions() {
        // Cannot transition to self
        assert!(!DictationState::Idle.can_transition_to(&DictationState::Idle));
        assert!(!DictationState::Listening.can_transition_to(&DictationState::Listening));
    }
}
