//! SQLite-backed note repository.
//!
//! Single-row operations for individual notes plus a transactional
//! whole-set write used by notebook autosave. The whole-set write mirrors
//! how the original application persisted its note list: one atomic
//! replacement, never a partially updated set.

use std::sync::Arc;

use chrono::DateTime;
use rusqlite::OptionalExtension;
use uuid::Uuid;

use scribe_core::Note;

use crate::db::Database;
use crate::error::StorageError;

/// Repository for note entities.
pub struct NoteRepository {
    db: Arc<Database>,
}

impl NoteRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Insert or update a single note.
    pub fn save(&self, note: &Note) -> Result<(), StorageError> {
        self.db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO notes (id, content, created_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(id) DO UPDATE SET content = excluded.content",
                rusqlite::params![
                    note.id.to_string(),
                    note.content,
                    note.created_at.timestamp(),
                ],
            )
            .map_err(|e| StorageError::Database(format!("Failed to save note: {}", e)))?;
            Ok(())
        })?;
        tracing::debug!(note_id = %note.id, "Note saved");
        Ok(())
    }

    /// Find a note by ID.
    pub fn find_by_id(&self, id: Uuid) -> Result<Option<Note>, StorageError> {
        self.db.with_conn(|conn| {
            let mut stmt = conn
                .prepare("SELECT id, content, created_at FROM notes WHERE id = ?1")
                .map_err(StorageError::from)?;

            let result = stmt
                .query_row(rusqlite::params![id.to_string()], |row| Ok(row_to_note(row)))
                .optional()
                .map_err(StorageError::from)?;

            match result {
                Some(note) => Ok(Some(note?)),
                None => Ok(None),
            }
        })
    }

    /// List all notes, newest first.
    pub fn list(&self) -> Result<Vec<Note>, StorageError> {
        self.db.with_conn(|conn| {
            let mut stmt = conn
                .prepare("SELECT id, content, created_at FROM notes ORDER BY created_at DESC")
                .map_err(StorageError::from)?;

            let rows = stmt
                .query_map([], |row| Ok(row_to_note(row)))
                .map_err(StorageError::from)?;

            let mut notes = Vec::new();
            for row in rows {
                let note = row.map_err(StorageError::from)??;
                notes.push(note);
            }
            Ok(notes)
        })
    }

    /// Delete a note by ID.
    ///
    /// Fails with [`StorageError::NotFound`] when no such note exists.
    pub fn delete(&self, id: Uuid) -> Result<(), StorageError> {
        let affected = self.db.with_conn(|conn| {
            conn.execute(
                "DELETE FROM notes WHERE id = ?1",
                rusqlite::params![id.to_string()],
            )
            .map_err(|e| StorageError::Database(format!("Failed to delete note: {}", e)))
        })?;
        if affected == 0 {
            return Err(StorageError::NotFound(id.to_string()));
        }
        tracing::debug!(note_id = %id, "Note deleted");
        Ok(())
    }

    /// Count stored notes.
    pub fn count(&self) -> Result<u64, StorageError> {
        self.db.with_conn(|conn| {
            let count: i64 = conn
                .query_row("SELECT COUNT(*) FROM notes", [], |row| row.get(0))
                .map_err(StorageError::from)?;
            Ok(count as u64)
        })
    }

    /// Replace the entire stored note set in one transaction.
    ///
    /// Either every note in `notes` is written and everything else removed,
    /// or the database is left exactly as it was.
    pub fn replace_all(&self, notes: &[Note]) -> Result<(), StorageError> {
        self.db.with_conn_mut(|conn| {
            let tx = conn
                .transaction()
                .map_err(|e| StorageError::Database(format!("Failed to begin: {}", e)))?;

            tx.execute("DELETE FROM notes", [])
                .map_err(|e| StorageError::Database(format!("Failed to clear notes: {}", e)))?;

            for note in notes {
                tx.execute(
                    "INSERT INTO notes (id, content, created_at) VALUES (?1, ?2, ?3)",
                    rusqlite::params![
                        note.id.to_string(),
                        note.content,
                        note.created_at.timestamp(),
                    ],
                )
                .map_err(|e| StorageError::Database(format!("Failed to write note: {}", e)))?;
            }

            tx.commit()
                .map_err(|e| StorageError::Database(format!("Failed to commit: {}", e)))?;
            Ok(())
        })?;
        tracing::info!(note_count = notes.len(), "Notebook written to storage");
        Ok(())
    }
}

fn row_to_note(row: &rusqlite::Row<'_>) -> Result<Note, StorageError> {
    let id_text: String = row.get(0)?;
    let content: String = row.get(1)?;
    let created_secs: i64 = row.get(2)?;

    let id = Uuid::parse_str(&id_text)
        .map_err(|e| StorageError::Database(format!("Invalid note id {}: {}", id_text, e)))?;
    let created_at = DateTime::from_timestamp(created_secs, 0)
        .ok_or_else(|| StorageError::Database(format!("Invalid timestamp {}", created_secs)))?;

    Ok(Note {
        id,
        content,
        created_at,
    })
}
