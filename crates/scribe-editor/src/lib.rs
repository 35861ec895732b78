//! Scribe editor crate - editing surfaces and the notebook model.
//!
//! An [`EditorSurface`] is one open document: its snapshot history, its
//! dictation session, and the transform and rewrite entry points that feed
//! the history. The [`Notebook`] holds the note list and selection the way
//! the surrounding application sees them.

pub mod notebook;
pub mod surface;

pub use notebook::Notebook;
pub use surface::{EditorSurface, SurfaceNotice};
