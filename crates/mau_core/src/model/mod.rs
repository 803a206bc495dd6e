//! Domain records stored in the `projects` and `todos` collections.
//!
//! # Responsibility
//! - Define the canonical shapes read and written by the store.
//! - Keep the sentinel glyph constants in one place.
//!
//! # Invariants
//! - Every stored record is identified by a store-generated UUID.
//! - Todo-to-project linkage is a plain reference, never enforced.

pub mod project;
pub mod todo;

/// Leading glyph of an open to-do line.
pub const OPEN_SENTINEL: char = '☐';
/// Leading glyph of a completed to-do line.
pub const DONE_SENTINEL: char = '☑';
