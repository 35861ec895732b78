//! Scribe Dictation crate - speech session state machine and transcript merging.
//!
//! Manages the lifecycle of a continuous dictation session through a strict
//! state machine: Idle -> Listening -> Idle. Recognition itself is behind
//! the [`SpeechPlatform`] seam; this crate turns its event stream into
//! ordered buffer updates for one editor surface.

pub mod error;
pub mod merge;
pub mod platform;
pub mod session;
pub mod state;

pub use error::{DictationError, RecognitionErrorKind};
pub use merge::merge_transcript;
pub use platform::{
    ChannelPlatform, RecognitionConfig, SpeechEvent, SpeechPlatform, StreamControl, EVENT_BUFFER,
};
pub use session::{DictationSession, SessionUpdate};
pub use state::DictationState;
