//! # Lesson Content
//!
//! The "authoring bible" crate - buildings, topic tags and the lesson content
//! model, together with the interchange codec used to persist lessons.
//! This crate holds no storage or player state.
//!
//! ## Modules
//!
//! - **buildings**: building identities and the closed topic/phase label sets
//! - **lesson**: the seven section kinds and the marker-text parser
//! - **codec**: JSON encoding of section lists
//! - **sketching**: proportional ratio matching for sketch challenges
//! - **catalog**: the compiled-in default content for every building

pub mod buildings;
pub mod catalog;
pub mod codec;
pub mod error;
pub mod lesson;
pub mod sketching;

pub use buildings::*;
pub use catalog::*;
pub use codec::*;
pub use error::*;
pub use lesson::*;
pub use sketching::*;
