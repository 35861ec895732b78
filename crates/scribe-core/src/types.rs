use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// Newtype Wrappers - Temporal
// =============================================================================

/// Unix timestamp in seconds since epoch.
///
/// Compared by value. Two Timestamps with the same inner value are equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub fn now() -> Self {
        Self(Utc::now().timestamp())
    }

    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt.timestamp())
    }

    pub fn to_datetime(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.0, 0).unwrap_or_default()
    }
}

// =============================================================================
// Newtype Wrappers - Numeric
// =============================================================================

/// Editor font size in points. Range: 10 to 32.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FontSize(pub u16);

impl FontSize {
    pub const MIN: u16 = 10;
    pub const MAX: u16 = 32;

    pub fn new(value: u16) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    /// One step larger, saturating at the maximum.
    pub fn increased(self) -> Self {
        Self::new(self.0.saturating_add(1))
    }

    /// One step smaller, saturating at the minimum.
    pub fn decreased(self) -> Self {
        Self::new(self.0.saturating_sub(1))
    }
}

impl Default for FontSize {
    fn default() -> Self {
        Self(16)
    }
}

// =============================================================================
// Entity Structs (defined in scribe-core for shared use)
// =============================================================================

/// Title shown for a note whose first line is empty.
pub const UNTITLED_NOTE: &str = "New Note";

/// Maximum number of characters of the first line used as a note title.
pub const TITLE_MAX_CHARS: usize = 50;

/// A single note in the notebook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Note {
    /// Create an empty note timestamped now.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            content: String::new(),
            created_at: Utc::now(),
        }
    }

    /// Create a note with initial content, timestamped now.
    pub fn with_content(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::new()
        }
    }

    /// Display title: the first line of the content, capped at
    /// [`TITLE_MAX_CHARS`] characters, or [`UNTITLED_NOTE`] when that line
    /// is empty.
    pub fn title(&self) -> String {
        let first_line = self.content.lines().next().unwrap_or("");
        if first_line.is_empty() {
            return UNTITLED_NOTE.to_string();
        }
        first_line.chars().take(TITLE_MAX_CHARS).collect()
    }
}

impl Default for Note {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
