//! Scribe storage crate - SQLite-backed note persistence.
//!
//! The editor core only needs list/get/set semantics with atomic writes;
//! this crate provides them over a single SQLite database. Whole-notebook
//! saves go through one transaction so a partially written set is never
//! visible to a reader.

pub mod db;
pub mod error;
pub mod migrations;
pub mod repository;

pub use db::Database;
pub use error::StorageError;
pub use repository::NoteRepository;
