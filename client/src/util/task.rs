//! Browser-only task spawning.

use std::future::Future;

/// Spawn `fut` on the browser event loop. Server rendering never issues API
/// calls, so the future is dropped there.
pub fn spawn_request<F>(fut: F)
where
    F: Future<Output = ()> + 'static,
{
    #[cfg(feature = "hydrate")]
    {
        leptos::task::spawn_local(fut);
    }
    #[cfg(not(feature = "hydrate"))]
    {
        drop(fut);
    }
}
