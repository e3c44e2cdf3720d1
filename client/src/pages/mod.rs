//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates rendering details
//! to `components`. List pages share fetch/save/delete plumbing through
//! `list_actions`.

pub mod approvals;
pub mod categories;
pub mod expenses;
pub mod grants;
pub mod home;
pub(crate) mod list_actions;
pub mod roles;
pub mod rule_editor;
pub mod rules;
pub mod sign_in;
pub mod users;
