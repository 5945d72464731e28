//! Notebook module - knowledge entries distilled from lessons.
//!
//! - **Entries**: append-only knowledge records attributed to a building
//! - **Notebooks**: the per-building ordered collection, grouped on read
//! - **Extraction**: the pipeline from lesson and station content to entries

mod book;
mod entry;
mod extraction;

pub use book::*;
pub use entry::*;
pub use extraction::*;
