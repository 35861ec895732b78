//! Transcript merging.
//!
//! Dictation appends to whatever the buffer holds at the moment the segment
//! arrives, not at the moment recognition started. Typing while listening
//! therefore composes naturally with speech.

/// Merge a finalized transcript segment into the current buffer content.
///
/// An empty buffer takes the segment verbatim. Otherwise the segment is
/// appended with a single separating space and the ends of the result are
/// trimmed. Interior whitespace is preserved as-is.
pub fn merge_transcript(current: &str, segment: &str) -> String {
    if current.is_empty() {
        segment.to_string()
    } else {
        format!("{} {}", current, segment).trim().to_string()
    }
}
