//! Error types for the dictation session and its platform seam.

use serde::{Deserialize, Serialize};

use scribe_core::ScribeError;

use crate::state::DictationState;

/// Errors from dictation session operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DictationError {
    #[error("speech recognition is not supported on this platform")]
    Unsupported,
    #[error("invalid state transition: {from} -> {to}")]
    InvalidTransition {
        from: DictationState,
        to: DictationState,
    },
    #[error("speech platform error: {0}")]
    Platform(String),
}

impl From<DictationError> for ScribeError {
    fn from(err: DictationError) -> Self {
        ScribeError::Dictation(err.to_string())
    }
}

/// Classification of an error reported by the recognition stream.
///
/// The three named kinds end the session: the recognizer cannot make
/// further progress without user intervention (granting microphone access,
/// plugging in a device, speaking at all). Everything else is reported but
/// leaves the stream listening.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecognitionErrorKind {
    /// No speech was detected before the recognizer gave up.
    NoSpeech,
    /// Audio capture failed; typically no microphone is available.
    AudioCaptureUnavailable,
    /// The user or platform denied microphone permission.
    PermissionDenied,
    /// Any other platform-reported error code.
    Other(String),
}

impl RecognitionErrorKind {
    /// Map a platform error code to a kind.
    ///
    /// Codes follow the Web Speech API error names; unknown codes are
    /// carried through verbatim.
    pub fn from_code(code: &str) -> Self {
        match code {
            "no-speech" => RecognitionErrorKind::NoSpeech,
            "audio-capture" => RecognitionErrorKind::AudioCaptureUnavailable,
            "not-allowed" => RecognitionErrorKind::PermissionDenied,
            other => RecognitionErrorKind::Other(other.to_string()),
        }
    }

    /// The platform error code this kind corresponds to.
    pub fn code(&self) -> &str {
        match self {
            RecognitionErrorKind::NoSpeech => "no-speech",
            RecognitionErrorKind::AudioCaptureUnavailable => "audio-capture",
            RecognitionErrorKind::PermissionDenied => "not-allowed",
            RecognitionErrorKind::Other(code) => code,
        }
    }

    /// Whether this error ends the session.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RecognitionErrorKind::Other(_))
    }
}

impl std::fmt::Display for RecognitionErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecognitionErrorKind::NoSpeech => write!(f, "no speech detected"),
            RecognitionErrorKind::AudioCaptureUnavailable => {
                write!(f, "audio capture unavailable")
            }
            RecognitionErrorKind::PermissionDenied => {
                write!(f, "microphone permission denied")
            }
            RecognitionErrorKind::Other(code) => write!(f, "recognition error: {}", code),
        }
    }
}
