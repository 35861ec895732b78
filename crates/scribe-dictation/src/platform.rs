//! Speech platform seam.
//!
//! Recognition itself lives outside this workspace; the editor only needs a
//! way to start a continuous recognizer, receive its finalized segments and
//! errors, and ask it to stop. A platform implementation reports into the
//! `mpsc::Sender` handed to [`SpeechPlatform::start`], which preserves
//! arrival order through the single session receiver on the other end.
//!
//! [`ChannelPlatform`] ships in-tree: it performs no recognition and simply
//! forwards whatever the host feeds it. Hosts bridging a native recognizer
//! use it directly; tests script it.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::error::{DictationError, RecognitionErrorKind};

/// Buffered events per session before a platform send fails.
pub const EVENT_BUFFER: usize = 32;

/// Settings handed to the recognizer when a stream starts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognitionConfig {
    /// BCP 47 language tag, e.g. "ru-RU".
    pub language: String,
    /// Keep recognizing across pauses instead of stopping after one phrase.
    pub continuous: bool,
    /// Whether the recognizer should report unstable partial results.
    /// Sessions only consume finalized segments, so this stays off.
    pub interim_results: bool,
}

impl RecognitionConfig {
    /// Config for the given language with the session defaults.
    pub fn for_language(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            ..Self::default()
        }
    }
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            language: "ru-RU".to_string(),
            continuous: true,
            interim_results: false,
        }
    }
}

/// One report from a recognition stream.
#[derive(Clone, Debug, PartialEq)]
pub enum SpeechEvent {
    /// A finalized transcript segment.
    Segment(String),
    /// The recognizer reported an error.
    Error(RecognitionErrorKind),
    /// The stream ended and will produce nothing more.
    Ended,
}

/// Handle for asking a running stream to stop.
///
/// `stop` is a request: the stream may still deliver segments already in
/// flight, and signals completion with [`SpeechEvent::Ended`]. Stopping an
/// already stopped stream is harmless.
pub trait StreamControl: Send {
    fn stop(&mut self);
}

/// A speech recognition backend.
pub trait SpeechPlatform: Send + Sync {
    /// Start a recognition stream reporting into `sink`.
    ///
    /// Returns the control handle for the new stream. Implementations that
    /// cannot start (device busy, no backend) fail without sending anything.
    fn start(
        &self,
        config: &RecognitionConfig,
        sink: mpsc::Sender<SpeechEvent>,
    ) -> Result<Box<dyn StreamControl>, DictationError>;
}

// =============================================================================
// ChannelPlatform
// =============================================================================

/// A speech platform driven by externally injected events.
///
/// `start` remembers the session's sink; the host then calls [`say`],
/// [`fail`] or [`end`] to report on behalf of a recognizer it runs
/// elsewhere. Feeding returns `false` once the session has detached or the
/// buffer is full.
///
/// [`say`]: ChannelPlatform::say
/// [`fail`]: ChannelPlatform::fail
/// [`end`]: ChannelPlatform::end
#[derive(Clone, Default)]
pub struct ChannelPlatform {
    sink: Arc<Mutex<Option<mpsc::Sender<SpeechEvent>>>>,
}

impl ChannelPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inject a raw event into the active stream.
    pub fn feed(&self, event: SpeechEvent) -> bool {
        let sink = self.sink.lock().expect("platform mutex poisoned");
        match sink.as_ref() {
            Some(sender) => sender.try_send(event).is_ok(),
            None => false,
        }
    }

    /// Inject a finalized transcript segment.
    pub fn say(&self, text: &str) -> bool {
        self.feed(SpeechEvent::Segment(text.to_string()))
    }

    /// Inject a recognition error.
    pub fn fail(&self, kind: RecognitionErrorKind) -> bool {
        self.feed(SpeechEvent::Error(kind))
    }

    /// Report the end of the stream.
    pub fn end(&self) -> bool {
        self.feed(SpeechEvent::Ended)
    }
}

impl std::fmt::Debug for ChannelPlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let attached = self
            .sink
            .lock()
            .map(|guard| guard.is_some())
            .unwrap_or(false);
        f.debug_struct("ChannelPlatform")
            .field("attached", &attached)
            .finish()
    }
}

struct ChannelControl {
    sender: mpsc::Sender<SpeechEvent>,
}

impl StreamControl for ChannelControl {
    fn stop(&mut self) {
        // Mirrors a real recognizer acknowledging stop with its end event.
        let _ = self.sender.try_send(SpeechEvent::Ended);
    }
}

impl SpeechPlatform for ChannelPlatform {
    fn start(
        &self,
        config: &RecognitionConfig,
        sink: mpsc::Sender<SpeechEvent>,
    ) -> Result<Box<dyn StreamControl>, DictationError> {
        let mut current = self.sink.lock().expect("platform mutex poisoned");
        *current = Some(sink.clone());
        tracing::debug!(language = %config.language, "Channel speech stream opened");
        Ok(Box::new(ChannelControl { sender: sink }))
    }
}
