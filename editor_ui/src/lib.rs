//! Desktop UI for the editor, built on egui.
//!
//! This crate is a thin presentation layer: it forwards keyboard and
//! mouse input to `pypad_core::EditorSession` and paints whatever state
//! the session exposes. No editing logic lives here.

pub mod app;
pub mod dialogs;
pub mod launcher;
mod view;

pub use app::EditorApp;
