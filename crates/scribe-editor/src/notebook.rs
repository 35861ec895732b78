//! The notebook: note list, selection, and persistence wiring.
//!
//! Notes are ordered newest first. Creating a note prepends and selects
//! it; deleting one moves the selection to the first remaining note. The
//! notebook tracks whether it has unsaved changes and writes the whole set
//! back in one atomic repository call.

use uuid::Uuid;

use scribe_core::{Note, Result, ScribeError};
use scribe_storage::NoteRepository;

/// In-memory note list with a selection.
#[derive(Debug, Default)]
pub struct Notebook {
    notes: Vec<Note>,
    selected: Option<Uuid>,
    dirty: bool,
}

impl Notebook {
    /// An empty notebook with nothing selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the notebook from storage.
    ///
    /// A load failure is not fatal: the user starts with an empty notebook
    /// and a warning in the log, and manual editing works normally.
    pub fn load(repo: &NoteRepository) -> Self {
        match repo.list() {
            Ok(notes) => {
                let selected = notes.first().map(|note| note.id);
                tracing::info!(note_count = notes.len(), "Notebook loaded");
                Self {
                    notes,
                    selected,
                    dirty: false,
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load notebook; starting empty");
                Self::new()
            }
        }
    }

    /// Write the whole note set back to storage.
    pub fn save(&mut self, repo: &NoteRepository) -> Result<()> {
        repo.replace_all(&self.notes)?;
        self.dirty = false;
        Ok(())
    }

    /// Notes in display order, newest first.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Whether the in-memory set differs from what was last saved.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// The currently selected note's id.
    pub fn selected_id(&self) -> Option<Uuid> {
        self.selected
    }

    /// The currently selected note.
    pub fn selected_note(&self) -> Option<&Note> {
        let id = self.selected?;
        self.notes.iter().find(|note| note.id == id)
    }

    /// Create an empty note, prepend it, and select it.
    pub fn create(&mut self) -> Uuid {
        let note = Note::new();
        let id = note.id;
        self.notes.insert(0, note);
        self.selected = Some(id);
        self.dirty = true;
        tracing::info!(note_id = %id, "Note created");
        id
    }

    /// Look a note up by id.
    pub fn get(&self, id: Uuid) -> Result<&Note> {
        self.notes
            .iter()
            .find(|note| note.id == id)
            .ok_or(ScribeError::NoteNotFound { id: id.to_string() })
    }

    /// Select a note by id.
    pub fn select(&mut self, id: Uuid) -> Result<()> {
        self.get(id)?;
        self.selected = Some(id);
        Ok(())
    }

    /// Delete a note. Selection falls to the first remaining note.
    pub fn delete(&mut self, id: Uuid) -> Result<()> {
        let index = self
            .notes
            .iter()
            .position(|note| note.id == id)
            .ok_or(ScribeError::NoteNotFound { id: id.to_string() })?;
        self.notes.remove(index);
        if self.selected == Some(id) {
            self.selected = self.notes.first().map(|note| note.id);
        }
        self.dirty = true;
        tracing::info!(note_id = %id, "Note deleted");
        Ok(())
    }

    /// Store edited content back into a note.
    pub fn apply_edit(&mut self, id: Uuid, content: impl Into<String>) -> Result<()> {
        let content = content.into();
        let note = self
            .notes
            .iter_mut()
            .find(|note| note.id == id)
            .ok_or(ScribeError::NoteNotFound { id: id.to_string() })?;
        if note.content != content {
            note.content = content;
            self.dirty = true;
        }
        Ok(())
    }
}
