//! Use-case services behind each panel of the application.
//!
//! # Responsibility
//! - Orchestrate repository and filesystem calls into panel-level APIs.
//! - Keep front ends decoupled from storage details.

pub mod about;
pub mod debounce;
pub mod note_pad;
pub mod project_desk;
pub mod settings;
pub mod todo_board;
