//! Generic list-view state shared by every CRUD page.
//!
//! SYSTEM CONTEXT
//! ==============
//! Grants, expenses, approvals, categories, roles, users, and rules each keep
//! one `ListState<R>` in a signal. The page fetches on mount, feeds the result
//! to `finish_load`, and routes dialog actions through the methods below.
//!
//! DESIGN
//! ======
//! Saves merge the server record by id. Deletes drop the row locally without
//! re-fetching. At most one dialog is open at a time.

#[cfg(test)]
#[path = "resource_list_test.rs"]
mod resource_list_test;

use crate::net::api::Resource;
use crate::net::error::ApiError;
use crate::net::types::Page;

/// Dialog currently shown over a list.
#[derive(Clone, Debug, PartialEq)]
pub enum Dialog<R> {
    Closed,
    /// Draft of a record that has no id yet.
    Create(R),
    /// Working copy of an existing record.
    Edit(R),
    /// Delete confirmation for the record with this id.
    ConfirmDelete(String),
}

/// Which dialog is open, without the record. Views memoize this so typing
/// into a draft does not rebuild the dialog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DialogMode {
    Closed,
    Create,
    Edit,
    ConfirmDelete(String),
}

impl<R> Dialog<R> {
    pub fn mode(&self) -> DialogMode {
        match self {
            Self::Closed => DialogMode::Closed,
            Self::Create(_) => DialogMode::Create,
            Self::Edit(_) => DialogMode::Edit,
            Self::ConfirmDelete(id) => DialogMode::ConfirmDelete(id.clone()),
        }
    }
}

/// Rows, load status, and dialog for one resource collection.
#[derive(Clone, Debug, PartialEq)]
pub struct ListState<R> {
    pub items: Vec<R>,
    pub count: i64,
    pub loading: bool,
    pub error: Option<String>,
    pub dialog: Dialog<R>,
}

impl<R> Default for ListState<R> {
    fn default() -> Self {
        Self { items: Vec::new(), count: 0, loading: true, error: None, dialog: Dialog::Closed }
    }
}

impl<R: Resource> ListState<R> {
    pub fn begin_load(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Apply a fetch result. On failure existing rows are kept.
    pub fn finish_load(&mut self, result: Result<Page<R>, ApiError>) {
        self.loading = false;
        match result {
            Ok(page) => {
                self.count = page.count;
                self.items = page.data;
            }
            Err(err) => self.error = Some(err.to_string()),
        }
    }

    /// Keep only rows matching `keep`, e.g. rows of the selected grant.
    pub fn retain(&mut self, keep: impl Fn(&R) -> bool) {
        self.items.retain(keep);
    }

    pub fn find(&self, id: &str) -> Option<&R> {
        self.items.iter().find(|item| item.id() == Some(id))
    }

    // =========================================================================
    // DIALOGS
    // =========================================================================

    pub fn open_create(&mut self, draft: R) {
        self.dialog = Dialog::Create(draft);
    }

    /// Open the edit dialog on a copy of row `id`. Returns false when absent.
    pub fn open_edit(&mut self, id: &str) -> bool {
        let Some(item) = self.find(id).cloned() else {
            return false;
        };
        self.dialog = Dialog::Edit(item);
        true
    }

    pub fn open_delete(&mut self, id: &str) {
        self.dialog = Dialog::ConfirmDelete(id.to_owned());
    }

    pub fn close_dialog(&mut self) {
        self.dialog = Dialog::Closed;
    }

    /// Mutate the record inside an open create or edit dialog.
    pub fn edit_draft(&mut self, edit: impl FnOnce(&mut R)) {
        if let Dialog::Create(draft) | Dialog::Edit(draft) = &mut self.dialog {
            edit(draft);
        }
    }

    /// The record inside an open create or edit dialog.
    pub fn draft(&self) -> Option<&R> {
        match &self.dialog {
            Dialog::Create(draft) | Dialog::Edit(draft) => Some(draft),
            _ => None,
        }
    }

    // =========================================================================
    // MUTATION RESULTS
    // =========================================================================

    /// Merge a saved record: replace the row with the same id, else append.
    /// Closes the dialog on success; keeps it open on failure.
    pub fn finish_save(&mut self, result: Result<R, ApiError>) -> Result<(), String> {
        match result {
            Ok(saved) => {
                self.upsert(saved);
                self.close_dialog();
                Ok(())
            }
            Err(err) => Err(err.to_string()),
        }
    }

    pub fn upsert(&mut self, saved: R) {
        let position = saved
            .id()
            .and_then(|id| self.items.iter().position(|item| item.id() == Some(id)));
        match position {
            Some(index) => self.items[index] = saved,
            None => {
                self.items.push(saved);
                self.count += 1;
            }
        }
    }

    /// Drop row `id` after a successful delete.
    pub fn finish_delete(&mut self, id: &str, result: Result<(), ApiError>) -> Result<(), String> {
        self.close_dialog();
        result.map_err(|err| err.to_string())?;
        let before = self.items.len();
        self.items.retain(|item| item.id() != Some(id));
        if self.items.len() < before {
            self.count -= 1;
        }
        Ok(())
    }
}
