//! Dictation session lifecycle.
//!
//! A session belongs to exactly one editor surface. It validates start/stop
//! transitions, owns the single event receiver for its recognition streams,
//! and classifies incoming events into updates the surface applies to its
//! buffer. The session never touches the buffer itself.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::error::{DictationError, RecognitionErrorKind};
use crate::platform::{RecognitionConfig, SpeechEvent, SpeechPlatform, StreamControl, EVENT_BUFFER};
use crate::state::DictationState;

/// Outcome of handling one speech event.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionUpdate {
    /// A finalized segment ready for merging into the buffer.
    ///
    /// Produced regardless of session state; a recognizer may finalize a
    /// segment after stop was requested and it still counts.
    Transcript(String),
    /// The recognizer reported an error. Terminal kinds have already
    /// forced the session back to Idle.
    Failed(RecognitionErrorKind),
    /// The stream ended, commanded or not.
    Ended,
}

/// State machine over one surface's speech recognition.
pub struct DictationSession {
    state: DictationState,
    config: RecognitionConfig,
    platform: Option<Arc<dyn SpeechPlatform>>,
    events: mpsc::Receiver<SpeechEvent>,
    sink: mpsc::Sender<SpeechEvent>,
    control: Option<Box<dyn StreamControl>>,
}

impl DictationSession {
    /// Create a session for the given platform, or a permanently
    /// unsupported one when `platform` is `None`.
    ///
    /// Platform availability is decided here, once; it never changes over
    /// the session's life.
    pub fn new(platform: Option<Arc<dyn SpeechPlatform>>, config: RecognitionConfig) -> Self {
        let (sink, events) = mpsc::channel(EVENT_BUFFER);
        Self {
            state: DictationState::Idle,
            config,
            platform,
            events,
            sink,
            control: None,
        }
    }

    /// Whether a speech platform is available at all.
    pub fn is_supported(&self) -> bool {
        self.platform.is_some()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> DictationState {
        self.state
    }

    /// True while a recognizer is running.
    pub fn is_listening(&self) -> bool {
        self.state == DictationState::Listening
    }

    /// The recognition settings streams are started with.
    pub fn config(&self) -> &RecognitionConfig {
        &self.config
    }

    /// Start listening.
    ///
    /// Fails with [`DictationError::Unsupported`] when no platform exists,
    /// and with an invalid-transition error when already listening. The
    /// session stays `Idle` on every failure path.
    pub fn start(&mut self) -> Result<(), DictationError> {
        if !self.state.can_transition_to(&DictationState::Listening) {
            return Err(DictationError::InvalidTransition {
                from: self.state,
                to: DictationState::Listening,
            });
        }
        let platform = self.platform.as_ref().ok_or(DictationError::Unsupported)?;
        // A stream left over from an earlier run is detached first; its
        // pending events belong to that run, not the new one. Otherwise a
        // stale Ended could knock the fresh stream back to Idle.
        if self.control.is_some() {
            let (sink, events) = mpsc::channel(EVENT_BUFFER);
            self.sink = sink;
            self.events = events;
            if let Some(mut control) = self.control.take() {
                control.stop();
            }
        }
        let control = platform.start(&self.config, self.sink.clone())?;
        self.control = Some(control);
        self.set_state(DictationState::Listening);
        tracing::info!(language = %self.config.language, "Dictation session started");
        Ok(())
    }

    /// Request the recognizer to stop.
    ///
    /// The session turns `Idle` immediately, but stays attached to the
    /// stream: segments the recognizer finalizes on the way down are still
    /// delivered and still merge. Stopping an idle session is a no-op.
    pub fn stop(&mut self) {
        if self.state != DictationState::Listening {
            return;
        }
        if let Some(control) = self.control.as_mut() {
            control.stop();
        }
        self.set_state(DictationState::Idle);
        tracing::info!("Dictation session stopped");
    }

    /// Next buffered event, if any, in arrival order.
    pub fn poll_event(&mut self) -> Option<SpeechEvent> {
        self.events.try_recv().ok()
    }

    /// Wait for the next event.
    ///
    /// Pends while the stream is quiet; the session holds one sender side
    /// itself, so this never resolves to a closed-channel `None` in normal
    /// operation.
    pub async fn recv_event(&mut self) -> Option<SpeechEvent> {
        self.events.recv().await
    }

    /// Apply one event to the session and classify it for the surface.
    ///
    /// Returns `None` for events with nothing to apply (an empty segment
    /// is dropped rather than surfaced).
    pub fn handle_event(&mut self, event: SpeechEvent) -> Option<SessionUpdate> {
        match event {
            SpeechEvent::Segment(text) => {
                let text = text.trim();
                if text.is_empty() {
                    tracing::debug!("Dropped empty transcript segment");
                    return None;
                }
                tracing::debug!(chars = text.chars().count(), "Transcript segment finalized");
                Some(SessionUpdate::Transcript(text.to_string()))
            }
            SpeechEvent::Error(kind) => {
                if kind.is_terminal() && self.state == DictationState::Listening {
                    tracing::warn!(code = kind.code(), "Recognition error ended the session");
                    self.set_state(DictationState::Idle);
                } else {
                    tracing::warn!(code = kind.code(), "Recognition error");
                }
                Some(SessionUpdate::Failed(kind))
            }
            SpeechEvent::Ended => {
                if self.state == DictationState::Listening {
                    self.set_state(DictationState::Idle);
                }
                Some(SessionUpdate::Ended)
            }
        }
    }

    /// Tear the session down for surface disposal or document switch.
    ///
    /// Detaches from the stream first, discarding in-flight events, then
    /// stops the recognizer. The session is reusable afterwards.
    pub fn shutdown(&mut self) {
        let (sink, events) = mpsc::channel(EVENT_BUFFER);
        self.sink = sink;
        self.events = events;
        if let Some(mut control) = self.control.take() {
            control.stop();
        }
        if self.state == DictationState::Listening {
            self.set_state(DictationState::Idle);
        }
        tracing::debug!("Dictation session shut down");
    }

    fn set_state(&mut self, target: DictationState) {
        tracing::debug!("Dictation state: {} -> {}", self.state, target);
        self.state = target;
    }
}

impl std::fmt::Debug for DictationSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DictationSession")
            .field("state", &self.state)
            .field("config", &self.config)
            .field("supported", &self.is_supported())
            .field("has_stream", &self.control.is_some())
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
