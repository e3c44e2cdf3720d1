//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Browser and environment concerns kept out of pages and components:
//! route guards, task spawning, form parsing, and indexed list edits.

pub mod auth;
pub mod collection;
pub mod form;
pub mod task;
