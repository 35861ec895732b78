//! One editing surface: a buffer with history, dictation, and transforms.
//!
//! Every content change, whatever its source, becomes one history push.
//! Dictation merges read the buffer at the moment the segment arrives, so
//! typing while listening composes with speech instead of racing it. The
//! surface takes `&mut self` for every mutation; events for it are applied
//! one at a time, in arrival order.

use std::sync::Arc;

use uuid::Uuid;

use scribe_dictation::{
    merge_transcript, DictationError, DictationSession, RecognitionConfig, RecognitionErrorKind,
    SessionUpdate, SpeechPlatform,
};
use scribe_history::TextHistory;
use scribe_rewrite::{RewriteError, RewriteService};
use scribe_transform::{remove_literal, replace_all, TransformError};

/// Something the host UI should reflect after speech events were applied.
#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceNotice {
    /// A transcript segment was merged into the buffer as one history entry.
    SegmentMerged { segment: String },
    /// Recognition failed. When `stopped` the session is back to Idle.
    DictationFailed {
        kind: RecognitionErrorKind,
        stopped: bool,
    },
    /// The recognition stream ended, commanded or not.
    DictationEnded,
}

/// One open document with its history and dictation session.
pub struct EditorSurface {
    note_id: Uuid,
    history: TextHistory,
    session: DictationSession,
}

impl EditorSurface {
    /// Create a surface for a document, seeded with its content.
    pub fn new(
        note_id: Uuid,
        content: impl Into<String>,
        platform: Option<Arc<dyn SpeechPlatform>>,
        config: RecognitionConfig,
    ) -> Self {
        Self {
            note_id,
            history: TextHistory::new(content.into()),
            session: DictationSession::new(platform, config),
        }
    }

    /// The document this surface currently edits.
    pub fn note_id(&self) -> Uuid {
        self.note_id
    }

    /// Switch the surface to another document.
    ///
    /// Any running dictation is torn down first; segments still in flight
    /// for the old document are discarded, never merged into the new one.
    /// History does not carry across documents.
    pub fn open(&mut self, note_id: Uuid, content: impl Into<String>) {
        self.session.shutdown();
        self.history.reset(content.into());
        self.note_id = note_id;
        tracing::debug!(note_id = %note_id, "Surface switched documents");
    }

    // =========================================================================
    // Buffer and history
    // =========================================================================

    /// Current buffer content.
    pub fn content(&self) -> &str {
        self.history.current()
    }

    /// Replace the buffer content, as a keystroke edit would.
    pub fn set_content(&mut self, text: impl Into<String>) {
        self.history.push(text.into());
    }

    /// Push an empty buffer. Undoable like any other edit.
    pub fn clear(&mut self) {
        self.history.push(String::new());
    }

    pub fn undo(&mut self) -> &str {
        self.history.undo()
    }

    pub fn redo(&mut self) -> &str {
        self.history.redo()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Number of snapshots currently held, including the seed.
    pub fn history_depth(&self) -> usize {
        self.history.depth()
    }

    /// Index of the current snapshot, counting from the seed at 0.
    pub fn history_position(&self) -> usize {
        self.history.position()
    }

    // =========================================================================
    // Transforms
    // =========================================================================

    /// Remove every occurrence of one literal character from the buffer.
    ///
    /// A transform that matches nothing leaves history untouched.
    pub fn remove_char(&mut self, ch: char) {
        let result = remove_literal(self.history.current(), ch);
        self.history.push(result);
    }

    /// Literal find/replace over the whole buffer.
    ///
    /// An empty `find` is rejected before the buffer or history is touched.
    pub fn replace_all(&mut self, find: &str, replace: &str) -> Result<(), TransformError> {
        let result = replace_all(self.history.current(), find, replace)?;
        self.history.push(result);
        Ok(())
    }

    // =========================================================================
    // Dictation
    // =========================================================================

    pub fn start_dictation(&mut self) -> Result<(), DictationError> {
        self.session.start()
    }

    pub fn stop_dictation(&mut self) {
        self.session.stop();
    }

    pub fn is_listening(&self) -> bool {
        self.session.is_listening()
    }

    pub fn dictation_supported(&self) -> bool {
        self.session.is_supported()
    }

    /// Apply all buffered speech events and report what changed.
    ///
    /// Each finalized segment merges with whatever the buffer holds right
    /// now and becomes exactly one history entry.
    pub fn pump(&mut self) -> Vec<SurfaceNotice> {
        let mut notices = Vec::new();
        while let Some(event) = self.session.poll_event() {
            let was_listening = self.session.is_listening();
            if let Some(update) = self.session.handle_event(event) {
                notices.push(self.apply_update(update, was_listening));
            }
        }
        notices
    }

    /// Wait for the next speech event that produces a notice.
    ///
    /// Empty segments are consumed without waking the caller.
    pub async fn next_notice(&mut self) -> Option<SurfaceNotice> {
        loop {
            let event = self.session.recv_event().await?;
            let was_listening = self.session.is_listening();
            if let Some(update) = self.session.handle_event(event) {
                return Some(self.apply_update(update, was_listening));
            }
        }
    }

    fn apply_update(&mut self, update: SessionUpdate, was_listening: bool) -> SurfaceNotice {
        match update {
            SessionUpdate::Transcript(segment) => {
                let merged = merge_transcript(self.history.current(), &segment);
                self.history.push(merged);
                tracing::info!(
                    note_id = %self.note_id,
                    segment_chars = segment.chars().count(),
                    buffer_chars = self.history.current().chars().count(),
                    "Transcript segment merged"
                );
                SurfaceNotice::SegmentMerged { segment }
            }
            SessionUpdate::Failed(kind) => {
                let stopped = was_listening && !self.session.is_listening();
                tracing::warn!(note_id = %self.note_id, reason = %kind, "Dictation failed");
                SurfaceNotice::DictationFailed { kind, stopped }
            }
            SessionUpdate::Ended => {
                tracing::info!(note_id = %self.note_id, "Dictation ended");
                SurfaceNotice::DictationEnded
            }
        }
    }

    // =========================================================================
    // Rewrite
    // =========================================================================

    /// Submit the whole buffer to the rewrite service and apply the result.
    ///
    /// On success the improved draft is pushed as one undoable entry. On
    /// failure the buffer and history are untouched and the error
    /// propagates to the caller for display.
    pub async fn improve(&mut self, service: &dyn RewriteService) -> Result<(), RewriteError> {
        let improved = service.improve(self.history.current()).await?;
        self.history.push(improved);
        tracing::info!(note_id = %self.note_id, "Rewrite applied");
        Ok(())
    }

    /// Tear the surface down, discarding in-flight speech events.
    pub fn shutdown(&mut self) {
        self.session.shutdown();
    }
}

impl std::fmt::Debug for EditorSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorSurface")
            .field("note_id", &self.note_id)
            .field("history_depth", &self.history.depth())
            .field("listening", &self.is_listening())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scribe_dictation::ChannelPlatform;

    fn make_surface() -> (EditorSurface, ChannelPlatform) {
        let platform = ChannelPlatform::new();
        let surface = EditorSurface::new(
            Uuid::new_v4(),
            String::new(),
            Some(Arc::new(platform.clone())),
            RecognitionConfig::default(),
        );
        (surface, platform)
    }

    // =========================================================================
    // Editing and history
    // =========================================================================

    #[test]
    fn test_set_content_pushes() {
        let (mut surface, _platform) = make_surface();
        surface.set_content("draft");
        assert_eq!(surface.content(), "draft");
        assert!(surface.can_undo());
        assert_eq!(surface.undo(), "");
    }

    #[test]
    fn test_clear_is_undoable() {
        let (mut surface, _platform) = make_surface();
        surface.set_content("something");
        surface.clear();
        assert_eq!(surface.content(), "");
        assert_eq!(surface.undo(), "something");
    }

    #[test]
    fn test_remove_char_pushes_once() {
        let (mut surface, _platform) = make_surface();
        surface.set_content("a.b.c");
        surface.remove_char('.');
        assert_eq!(surface.content(), "abc");
        assert_eq!(surface.undo(), "a.b.c");
    }

    #[test]
    fn test_remove_char_without_match_leaves_history_alone() {
        let (mut surface, _platform) = make_surface();
        surface.set_content("clean");
        let depth = surface.history_depth();
        surface.remove_char('@');
        assert_eq!(surface.history_depth(), depth);
    }

    #[test]
    fn test_replace_all_pushes() {
        let (mut surface, _platform) = make_surface();
        surface.set_content("a-b-c");
        surface.replace_all("-", "_").unwrap();
        assert_eq!(surface.content(), "a_b_c");
    }

    #[test]
    fn test_replace_all_empty_find_rejected_without_push() {
        let (mut surface, _platform) = make_surface();
        surface.set_content("untouched");
        let depth = surface.history_depth();
        let err = surface.replace_all("", "x").unwrap_err();
        assert_eq!(err, TransformError::EmptyFind);
        assert_eq!(surface.content(), "untouched");
        assert_eq!(surface.history_depth(), depth);
    }

    // =========================================================================
    // Dictation merging
    // =========================================================================

    #[test]
    fn test_segments_merge_one_entry_each() {
        let (mut surface, platform) = make_surface();
        surface.start_dictation().unwrap();
        platform.say("one");
        platform.say("two");

        let notices = surface.pump();
        assert_eq!(
            notices,
            vec![
                SurfaceNotice::SegmentMerged {
                    segment: "one".to_string()
                },
                SurfaceNotice::SegmentMerged {
                    segment: "two".to_string()
                },
            ]
        );
        assert_eq!(surface.content(), "one two");
        // Seed plus one entry per segment.
        assert_eq!(surface.history_depth(), 3);
    }

    #[test]
    fn test_dictation_scenario_with_manual_edit() {
        let (mut surface, platform) = make_surface();
        surface.start_dictation().unwrap();
        platform.say("one");
        platform.say("two");
        surface.stop_dictation();
        surface.pump();

        assert_eq!(surface.content(), "one two");
        assert_eq!(surface.undo(), "one");

        surface.set_content("one!");
        assert!(!surface.can_redo());
        assert_eq!(surface.content(), "one!");
    }

    #[test]
    fn test_merge_reads_buffer_at_arrival_time() {
        let (mut surface, platform) = make_surface();
        surface.start_dictation().unwrap();
        // The user types while the recognizer is still chewing.
        surface.set_content("typed meanwhile");
        platform.say("spoken");

        surface.pump();
        assert_eq!(surface.content(), "typed meanwhile spoken");
    }

    #[test]
    fn test_segment_after_stop_still_merges() {
        let (mut surface, platform) = make_surface();
        surface.start_dictation().unwrap();
        platform.say("late");
        surface.stop_dictation();

        let notices = surface.pump();
        assert!(notices.contains(&SurfaceNotice::SegmentMerged {
            segment: "late".to_string()
        }));
        assert_eq!(surface.content(), "late");
    }

    #[test]
    fn test_empty_segments_produce_no_notice() {
        let (mut surface, platform) = make_surface();
        surface.start_dictation().unwrap();
        platform.say("   ");
        assert!(surface.pump().is_empty());
        assert_eq!(surface.history_depth(), 1);
    }

    #[test]
    fn test_terminal_error_notice_reports_stop() {
        let (mut surface, platform) = make_surface();
        surface.start_dictation().unwrap();
        platform.fail(RecognitionErrorKind::PermissionDenied);

        let notices = surface.pump();
        assert_eq!(
            notices,
            vec![SurfaceNotice::DictationFailed {
                kind: RecognitionErrorKind::PermissionDenied,
                stopped: true,
            }]
        );
        assert!(!surface.is_listening());
    }

    #[test]
    fn test_non_terminal_error_keeps_listening() {
        let (mut surface, platform) = make_surface();
        surface.start_dictation().unwrap();
        platform.fail(RecognitionErrorKind::Other("network".to_string()));

        let notices = surface.pump();
        assert_eq!(
            notices,
            vec![SurfaceNotice::DictationFailed {
                kind: RecognitionErrorKind::Other("network".to_string()),
                stopped: false,
            }]
        );
        assert!(surface.is_listening());
    }

    #[test]
    fn test_uncommanded_end_surfaces() {
        let (mut surface, platform) = make_surface();
        surface.start_dictation().unwrap();
        platform.end();

        assert_eq!(surface.pump(), vec![SurfaceNotice::DictationEnded]);
        assert!(!surface.is_listening());
    }

    #[test]
    fn test_unsupported_surface_cannot_start() {
        let mut surface = EditorSurface::new(
            Uuid::new_v4(),
            String::new(),
            None,
            RecognitionConfig::default(),
        );
        assert!(!surface.dictation_supported());
        assert_eq!(
            surface.start_dictation().unwrap_err(),
            DictationError::Unsupported
        );
        assert!(!surface.is_listening());
    }

    // =========================================================================
    // Document switching
    // =========================================================================

    #[test]
    fn test_open_discards_history_and_inflight_segments() {
        let (mut surface, platform) = make_surface();
        surface.set_content("old document");
        surface.start_dictation().unwrap();
        platform.say("for the old document");

        let next_id = Uuid::new_v4();
        surface.open(next_id, "new document".to_string());

        assert_eq!(surface.note_id(), next_id);
        assert_eq!(surface.content(), "new document");
        assert!(!surface.can_undo());
        assert!(!surface.is_listening());
        assert!(surface.pump().is_empty());
    }

    // =========================================================================
    // Rewrite
    // =========================================================================

    #[tokio::test]
    async fn test_improve_pushes_replacement() {
        use scribe_rewrite::FnRewriter;

        let (mut surface, _platform) = make_surface();
        surface.set_content("rough draft");
        let service = FnRewriter::new(|text: &str| Ok(format!("{} (polished)", text)));

        surface.improve(&service).await.unwrap();
        assert_eq!(surface.content(), "rough draft (polished)");
        assert_eq!(surface.undo(), "rough draft");
    }

    #[tokio::test]
    async fn test_improve_failure_leaves_buffer_untouched() {
        use scribe_rewrite::FnRewriter;

        let (mut surface, _platform) = make_surface();
        surface.set_content("rough draft");
        let depth = surface.history_depth();
        let service =
            FnRewriter::new(|_: &str| Err(RewriteError::Unavailable("offline".to_string())));

        let err = surface.improve(&service).await.unwrap_err();
        assert_eq!(err, RewriteError::Unavailable("offline".to_string()));
        assert_eq!(surface.content(), "rough draft");
        assert_eq!(surface.history_depth(), depth);
    }

    #[tokio::test]
    async fn test_next_notice_skips_empty_segments() {
        let (mut surface, platform) = make_surface();
        surface.start_dictation().unwrap();
        platform.say("  ");
        platform.say("heard");

        let notice = surface.next_notice().await;
        assert_eq!(
            notice,
            Some(SurfaceNotice::SegmentMerged {
                segment: "heard".to_string()
            })
        );
    }
}
