//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render dashboard chrome, tables, and dialogs while reading
//! shared state from Leptos context providers.

pub mod clause_row;
pub mod confirm_dialog;
pub mod crud_table;
pub mod field;
pub mod modal;
pub mod nav_shell;
pub mod toast_host;
