//! Client state modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! State types are plain Rust held in `RwSignal`s by pages. Transitions live
//! here so they can be tested without a browser.

pub mod resource_list;
pub mod rule_editor;
pub mod session;
pub mod toast;
