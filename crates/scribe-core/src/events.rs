use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::Timestamp;

/// All domain events that can occur in the Scribe system.
///
/// Events are emitted after state changes and consumed by:
/// - The structured event log (for audit/debugging)
/// - Host shells that mirror editor activity in their own UI
#[derive(Clone, Debug, Serialize, Deserialize)]
#[non_exhaustive]
pub enum EditorEvent {
    // =========================================================================
    // Notebook Events
    // =========================================================================
    /// A new note was created and selected.
    NoteCreated {
        note_id: Uuid,
        timestamp: Timestamp,
    },

    /// A note was deleted from the notebook.
    NoteDeleted {
        note_id: Uuid,
        timestamp: Timestamp,
    },

    /// The whole notebook was written to storage.
    NotebookSaved {
        note_count: usize,
        timestamp: Timestamp,
    },

    // =========================================================================
    // Dictation Events
    // =========================================================================
    /// A dictation session began listening.
    DictationStarted {
        note_id: Uuid,
        language: String,
        timestamp: Timestamp,
    },

    /// The user requested the session to stop.
    DictationStopped {
        note_id: Uuid,
        timestamp: Timestamp,
    },

    /// A finalized transcript segment was merged into the note buffer.
    TranscriptMerged {
        note_id: Uuid,
        segment_chars: usize,
        buffer_chars: usize,
        timestamp: Timestamp,
    },

    /// Speech recognition reported an error.
    DictationFailed {
        note_id: Uuid,
        reason: String,
        terminal: bool,
        timestamp: Timestamp,
    },

    /// The recognition stream ended on its own.
    DictationEnded {
        note_id: Uuid,
        timestamp: Timestamp,
    },

    // =========================================================================
    // Buffer Events
    // =========================================================================
    /// A literal transform rewrote the note buffer.
    BufferTransformed {
        note_id: Uuid,
        transform: String,
        timestamp: Timestamp,
    },

    /// The rewrite service returned an improved draft that was applied.
    RewriteApplied {
        note_id: Uuid,
        from_chars: usize,
        to_chars: usize,
        timestamp: Timestamp,
    },

    /// The rewrite service failed; the buffer was left untouched.
    RewriteFailed {
        note_id: Uuid,
        reason: String,
        timestamp: Timestamp,
    },
}

impl EditorEvent {
    /// Returns the timestamp of the event.
    pub fn timestamp(&self) -> Timestamp {
        match self {
            EditorEvent::NoteCreated { timestamp, .. }
            | EditorEvent::NoteDeleted { timestamp, .. }
            | EditorEvent::NotebookSaved { timestamp, .. }
            | EditorEvent::DictationStarted { timestamp, .. }
            | EditorEvent::DictationStopped { timestamp, .. }
            | EditorEvent::TranscriptMerged { timestamp, .. }
            | EditorEvent::DictationFailed { timestamp, .. }
            | EditorEvent::DictationEnded { timestamp, .. }
            | EditorEvent::BufferTransformed { timestamp, .. }
            | EditorEvent::RewriteApplied { timestamp, .. }
            | EditorEvent::RewriteFailed { timestamp, .. } => *timestamp,
        }
    }

    /// Returns a human-readable event name for logging.
    pub fn event_name(&self) -> &'static str {
        match self {
            EditorEvent::NoteCreated { .. } => "note_created",
            EditorEvent::NoteDeleted { .. } => "note_deleted",
            EditorEvent::NotebookSaved { .. } => "notebook_saved",
            EditorEvent::DictationStarted { .. } => "dictation_started",
            EditorEvent::DictationStopped { .. } => "dictation_stopped",
            EditorEvent::TranscriptMerged { .. } => "transcript_merged",
            EditorEvent::DictationFailed { .. } => "dictation_failed",
            EditorEvent::DictationEnded { .. } => "dictation_ended",
            EditorEvent::BufferTransformed { .. } => "buffer_transformed",
            EditorEvent::RewriteApplied { .. } => "rewrite_applied",
            EditorEvent::RewriteFailed { .. } => "rewrite_failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_timestamp() {
        let ts = Timestamp::now();
        let event = EditorEvent::NoteCreated {
            note_id: Uuid::new_v4(),
            timestamp: ts,
        };
        assert_eq!(event.timestamp(), ts);
    }

    #[test]
    fn test_event_name() {
        let event = EditorEvent::TranscriptMerged {
            note_id: Uuid::new_v4(),
            segment_chars: 12,
            buffer_chars: 48,
            timestamp: Timestamp::now(),
        };
        assert_eq!(event.event_name(), "transcript_merged");
    }

    #[test]
    fn test_event_serialization() {
        let event = EditorEvent::DictationStarted {
            note_id: Uuid::new_v4(),
            language: "ru-RU".to_string(),
            timestamp: Timestamp::now(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("DictationStarted"));
        assert!(json.contains("ru-RU"));
    }

    #[test]
    fn test_event_names_all_variants() {
        let ts = Timestamp::now();
        let id = Uuid::new_v4();

        let cases: Vec<(EditorEvent, &str)> = vec![
            (
                EditorEvent::NoteCreated {
                    note_id: id,
                    timestamp: ts,
                },
                "note_created",
            ),
            (
                EditorEvent::NoteDeleted {
                    note_id: id,
                    timestamp: ts,
                },
                "note_deleted",
            ),
            (
                EditorEvent::NotebookSaved {
                    note_count: 3,
                    timestamp: ts,
                },
                "notebook_saved",
            ),
            (
                EditorEvent::DictationStarted {
                    note_id: id,
                    language: "ru-RU".into(),
                    timestamp: ts,
                },
                "dictation_started",
            ),
            (
                EditorEvent::DictationStopped {
                    note_id: id,
                    timestamp: ts,
                },
                "dictation_stopped",
            ),
            (
                EditorEvent::TranscriptMerged {
                    note_id: id,
                    segment_chars: 5,
                    buffer_chars: 20,
                    timestamp: ts,
                },
                "transcript_merged",
            ),
            (
                EditorEvent::DictationFailed {
                    note_id: id,
                    reason: "microphone permission denied".into(),
                    terminal: true,
                    timestamp: ts,
                },
                "dictation_failed",
            ),
            (
                EditorEvent::DictationEnded {
                    note_id: id,
                    timestamp: ts,
                },
                "dictation_ended",
            ),
            (
                EditorEvent::BufferTransformed {
                    note_id: id,
                    transform: "remove_char".into(),
                    timestamp: ts,
                },
                "buffer_transformed",
            ),
            (
                EditorEvent::RewriteApplied {
                    note_id: id,
                    from_chars: 100,
                    to_chars: 90,
                    timestamp: ts,
                },
                "rewrite_applied",
            ),
            (
                EditorEvent::RewriteFailed {
                    note_id: id,
                    reason: "service unavailable".into(),
                    timestamp: ts,
                },
                "rewrite_failed",
            ),
        ];

        for (event, expected) in cases {
            assert_eq!(event.event_name(), expected);
            assert_eq!(event.timestamp(), ts);
        }
    }

    #[test]
    fn test_event_json_round_trip() {
        let event = EditorEvent::DictationFailed {
            note_id: Uuid::new_v4(),
            reason: "no audio input".to_string(),
            terminal: true,
            timestamp: Timestamp::now(),
        };
        let json = serde_json::to_string(&event).unwrap();
        let rt: EditorEvent = serde_json::from_str(&json).unwrap();
        match rt {
            EditorEvent::DictationFailed {
                reason, terminal, ..
            } => {
                assert_eq!(reason, "no audio input");
                assert!(terminal);
            }
            _ => panic!("Expected DictationFailed variant"),
        }
    }
}
