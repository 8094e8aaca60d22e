//! Terminal RSVP reader
//!
//! Words are flashed one at a time at a fixed focus point, each held for a
//! duration derived from its length and punctuation. Text comes from files,
//! the clipboard, or an external transform command.
//!
//! ## Module Structure
//!
//! - **reading**: tokenizer, pivot resolver, duration model, playback scheduler
//! - **transform**: external text-transform collaborator and its worker
//! - **input**: text, PDF, EPUB and clipboard loaders
//! - **engine**: configuration and shared error types
//! - **app**: application state, key handling, render snapshots
//! - **ui**: ratatui front end

pub mod app;
pub mod engine;
pub mod input;
pub mod reading;
pub mod transform;
pub mod ui;
