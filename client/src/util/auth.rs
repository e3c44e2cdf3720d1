//! Route guard and deferred navigation for signed-in pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every page except sign-in calls `install_signed_out_redirect` before it
//! fetches anything. The token is checked first, so a signed-out visit
//! redirects without issuing a request. A token the backend rejects later
//! raises `SessionExpiry`, which redirects the same way.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::state::session::Session;

/// Route of the sign-in page.
pub const SIGN_IN_PATH: &str = "/";

/// Decision taken when a protected page mounts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    Granted,
    Redirect(&'static str),
}

pub fn mount_access(session: &Session) -> Access {
    if session.is_signed_in() { Access::Granted } else { Access::Redirect(SIGN_IN_PATH) }
}

/// Run `load` when signed in, otherwise `redirect` to sign-in.
pub fn guard_mount(session: &Session, redirect: impl FnOnce(&str), load: impl FnOnce()) -> Access {
    let access = mount_access(session);
    match access {
        Access::Granted => load(),
        Access::Redirect(path) => redirect(path),
    }
    access
}

/// Install a mount effect that redirects signed-out visitors to `/` and
/// otherwise runs `load` once.
pub fn install_signed_out_redirect<F, L>(session: Session, navigate: F, load: L)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
    L: FnOnce() + 'static,
{
    let mut pending = Some(load);
    Effect::new(move || {
        let Some(load) = pending.take() else {
            return;
        };
        guard_mount(&session, |path| navigate(path, NavigateOptions::default()), load);
    });
}

/// Signal that navigates whenever it is set to `Some(path)`.
///
/// Callbacks and table actions set the signal instead of capturing the
/// router's navigate function.
pub fn install_pending_navigation<F>(navigate: F) -> RwSignal<Option<String>>
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    let pending = RwSignal::new(None::<String>);
    Effect::new(move || {
        if let Some(path) = pending.get() {
            pending.set(None);
            navigate(&path, NavigateOptions::default());
        }
    });
    pending
}

/// Raised by the API client when the backend stops accepting the stored
/// token; the nav shell turns it into a redirect to sign-in.
#[derive(Clone, Copy, Debug)]
pub struct SessionExpiry(RwSignal<bool>);

impl Default for SessionExpiry {
    fn default() -> Self {
        Self(RwSignal::new(false))
    }
}

impl SessionExpiry {
    pub fn raise(self) {
        self.0.set(true);
    }

    /// Clear the flag, returning whether it was raised.
    pub fn take(self) -> bool {
        self.0.try_update(std::mem::take).unwrap_or(false)
    }

    pub fn is_raised(self) -> bool {
        self.0.get_untracked()
    }
}

/// Navigate to sign-in each time `expiry` is raised.
pub fn install_expiry_redirect<F>(expiry: SessionExpiry, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if expiry.0.get() && expiry.take() {
            navigate(SIGN_IN_PATH, NavigateOptions::default());
        }
    });
}
