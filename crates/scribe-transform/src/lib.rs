//! Scribe transform crate - literal text cleanup operations.
//!
//! The tools panel offers one-tap removal of punctuation and markup
//! characters plus a literal find/replace. Both are pure functions of the
//! buffer: find text is escaped before compilation so regex metacharacters
//! match themselves, and replacement text is inserted verbatim. History
//! bookkeeping belongs to the caller.

use regex::{NoExpand, Regex};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use scribe_core::ScribeError;

/// Characters offered by the strip panel.
///
/// Roughly half of these are regex metacharacters, which is why patterns
/// are always built through [`regex::escape`].
pub const STRIP_CHARACTERS: [char; 31] = [
    '-', '~', ',', '>', '{', '}', '|', '\\', '^', '=', '/', ':', ';', '.', '(', ')', '[', ']',
    '"', '\'', '`', '!', '?', '@', '#', '$', '%', '&', '*', '_', '+',
];

/// Errors from transform requests.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransformError {
    #[error("find text must not be empty")]
    EmptyFind,
}

impl From<TransformError> for ScribeError {
    fn from(err: TransformError) -> Self {
        ScribeError::Transform(err.to_string())
    }
}

/// A single transform operation over a text buffer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransformRequest {
    /// Remove every occurrence of one character.
    RemoveChar { ch: char },
    /// Replace every occurrence of a literal string.
    Replace { find: String, replace: String },
}

impl TransformRequest {
    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            TransformRequest::RemoveChar { .. } => "remove_char",
            TransformRequest::Replace { .. } => "replace",
        }
    }
}

/// Compile a pattern that matches `text` literally.
fn literal_pattern(text: &str) -> Regex {
    Regex::new(&regex::escape(text)).expect("escaped literal is a valid pattern")
}

/// Remove every occurrence of `ch` from the buffer.
///
/// Metacharacters such as `.`, `(` or `\` are matched literally.
pub fn remove_literal(buffer: &str, ch: char) -> String {
    let pattern = literal_pattern(&ch.to_string());
    pattern.replace_all(buffer, "").into_owned()
}

/// Replace every occurrence of `find` with `replace`, both taken literally.
///
/// An empty `find` is rejected before anything is touched; matching the
/// empty string at every position would multiply the replacement across the
/// whole buffer.
pub fn replace_all(buffer: &str, find: &str, replace: &str) -> Result<String, TransformError> {
    if find.is_empty() {
        return Err(TransformError::EmptyFind);
    }
    let pattern = literal_pattern(find);
    Ok(pattern.replace_all(buffer, NoExpand(replace)).into_owned())
}

/// Apply a [`TransformRequest`] to the buffer and return the new content.
pub fn apply(buffer: &str, request: &TransformRequest) -> Result<String, TransformError> {
    match request {
        TransformRequest::RemoveChar { ch } => Ok(remove_literal(buffer, *ch)),
        TransformRequest::Replace { find, replace } => replace_all(buffer, find, replace),
    }
}
