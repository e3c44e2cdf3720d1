//! Transient notification queue.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages push a success or error line after each mutation; the toast host
//! renders the queue and removes entries after `TOAST_TTL_MS`.

#[cfg(test)]
#[path = "toast_test.rs"]
mod toast_test;

use uuid::Uuid;

/// How long a toast stays on screen.
pub const TOAST_TTL_MS: u64 = 4000;

/// Oldest toasts are dropped past this many.
const MAX_TOASTS: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    pub fn class(self) -> &'static str {
        match self {
            Self::Success => "toast toast--success",
            Self::Error => "toast toast--error",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: Uuid,
    pub kind: ToastKind,
    pub text: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToastState {
    pub toasts: Vec<Toast>,
}

impl ToastState {
    /// Queue a toast and return its id for later dismissal.
    pub fn push(&mut self, kind: ToastKind, text: impl Into<String>) -> Uuid {
        let id = Uuid::new_v4();
        self.toasts.push(Toast { id, kind, text: text.into() });
        if self.toasts.len() > MAX_TOASTS {
            let overflow = self.toasts.len() - MAX_TOASTS;
            self.toasts.drain(..overflow);
        }
        id
    }

    pub fn push_success(&mut self, text: impl Into<String>) -> Uuid {
        self.push(ToastKind::Success, text)
    }

    pub fn push_error(&mut self, text: impl Into<String>) -> Uuid {
        self.push(ToastKind::Error, text)
    }

    pub fn dismiss(&mut self, id: Uuid) {
        self.toasts.retain(|toast| toast.id != id);
    }
}
