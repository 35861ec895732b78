//! One-shot note commands.
//!
//! Everything except `edit` runs against the repository directly: list,
//! create, show, delete, and the one-shot text tools.

use uuid::Uuid;

use scribe_core::events::EditorEvent;
use scribe_core::{Note, Result, ScribeError, Timestamp};
use scribe_storage::NoteRepository;
use scribe_transform::{apply, TransformRequest};

/// Emit a domain event to the structured log.
pub fn log_event(event: &EditorEvent) {
    match serde_json::to_string(event) {
        Ok(payload) => tracing::info!(event = event.event_name(), %payload, "Editor event"),
        Err(e) => tracing::warn!(error = %e, "Failed to serialize editor event"),
    }
}

/// Parse a note id argument.
pub fn parse_note_id(id: &str) -> Result<Uuid> {
    Uuid::parse_str(id).map_err(|_| ScribeError::NoteNotFound { id: id.to_string() })
}

/// Fetch a note or fail with a not-found error.
pub fn require_note(repo: &NoteRepository, id: Uuid) -> Result<Note> {
    repo.find_by_id(id)?
        .ok_or(ScribeError::NoteNotFound { id: id.to_string() })
}

/// `scribe list`
pub fn list(repo: &NoteRepository) -> Result<()> {
    let notes = repo.list()?;
    if notes.is_empty() {
        println!("No notes.");
        return Ok(());
    }
    for note in &notes {
        println!(
            "{}  {}  {}",
            note.id,
            note.created_at.format("%Y-%m-%d %H:%M"),
            note.title()
        );
    }
    Ok(())
}

/// `scribe new [--text]`
pub fn new(repo: &NoteRepository, text: Option<String>) -> Result<()> {
    let note = match text {
        Some(text) => Note::with_content(text),
        None => Note::new(),
    };
    repo.save(&note)?;
    log_event(&EditorEvent::NoteCreated {
        note_id: note.id,
        timestamp: Timestamp::now(),
    });
    println!("{}", note.id);
    Ok(())
}

/// `scribe show <id>`
pub fn show(repo: &NoteRepository, id: &str) -> Result<()> {
    let note = require_note(repo, parse_note_id(id)?)?;
    println!("{}", note.content);
    Ok(())
}

/// `scribe delete <id>`
pub fn delete(repo: &NoteRepository, id: &str) -> Result<()> {
    let id = parse_note_id(id)?;
    repo.delete(id)?;
    log_event(&EditorEvent::NoteDeleted {
        note_id: id,
        timestamp: Timestamp::now(),
    });
    println!("Deleted {}", id);
    Ok(())
}

/// `scribe tools strip|replace`
pub fn transform(repo: &NoteRepository, id: &str, request: TransformRequest) -> Result<()> {
    let mut note = require_note(repo, parse_note_id(id)?)?;
    let result = apply(&note.content, &request)?;
    if result == note.content {
        println!("No occurrences; note unchanged.");
        return Ok(());
    }
    note.content = result;
    repo.save(&note)?;
    log_event(&EditorEvent::BufferTransformed {
        note_id: note.id,
        transform: request.name().to_string(),
        timestamp: Timestamp::now(),
    });
    println!("{}", note.content);
    Ok(())
}
