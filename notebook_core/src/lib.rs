//! # Notebook Core
//!
//! Persistence and derivation for the Academy. This crate stores the lessons
//! authored in `lesson_content`, serves them through a two-tier library that
//! falls back to the compiled-in catalog, and distills lesson content into
//! per-building notebooks.
//!
//! ## Core Components
//!
//! - **store**: SQLite and in-memory lesson stores with staged inserts
//! - **library**: Persisted-then-static lesson resolution and first-run seeding
//! - **notebook**: Notebook entries, per-building notebooks and knowledge extraction
//! - **progress**: Player progress and its persisted projection
//! - **config**: TOML configuration for the store and notebook
//!
//! ## Design Philosophy
//!
//! - **Never Empty**: A known building always resolves to a lesson, even with a broken store
//! - **Append-Only Notes**: Notebook entries are only ever added or annotated

pub mod config;
pub mod error;
pub mod library;
pub mod notebook;
pub mod progress;
pub mod store;

pub use config::*;
pub use error::*;
pub use library::*;
pub use notebook::*;
pub use progress::*;
pub use store::{LessonStore, MemoryStore, PersistedLessonRecord, SqliteStore, SCHEMA_VERSION};
