//! Fetch, save, and delete plumbing shared by the resource list pages.
//!
//! Every helper spawns one request, folds the result into the page's
//! `ListState`, and raises a toast.

use std::future::Future;

use leptos::prelude::*;

use crate::components::toast_host::{notify_error, notify_success};
use crate::net::api::{ApiClient, PageRequest, Resource};
use crate::net::error::ApiError;
use crate::net::types::Page;
use crate::state::resource_list::{DialogMode, ListState};
use crate::state::toast::ToastState;
use crate::util::task::spawn_request;

/// Load the default page of `R`.
pub(crate) fn load_collection<R: Resource>(api: &ApiClient, state: RwSignal<ListState<R>>) {
    let api = api.clone();
    load_with(state, async move { api.list::<R>(PageRequest::default()).await });
}

/// Load rows from an arbitrary page-returning call.
pub(crate) fn load_with<R, F>(state: RwSignal<ListState<R>>, fetch: F)
where
    R: Resource,
    F: Future<Output = Result<Page<R>, ApiError>> + 'static,
{
    state.update(ListState::begin_load);
    spawn_request(async move {
        let result = fetch.await;
        state.update(|s| s.finish_load(result));
    });
}

/// Persist the open dialog's draft through `save`, then re-run `reload`.
pub(crate) fn save_draft<R, F>(
    state: RwSignal<ListState<R>>,
    toasts: RwSignal<ToastState>,
    save: F,
    success_text: &'static str,
    reload: Callback<()>,
) where
    R: Resource,
    F: Future<Output = Result<R, ApiError>> + 'static,
{
    spawn_request(async move {
        let result = save.await;
        match state.try_update(|s| s.finish_save(result)) {
            Some(Ok(())) => {
                notify_success(toasts, success_text);
                reload.run(());
            }
            Some(Err(message)) => notify_error(toasts, message),
            None => {}
        }
    });
}

/// Delete row `id` and drop it locally on success.
pub(crate) fn delete_row<R: Resource>(
    api: &ApiClient,
    state: RwSignal<ListState<R>>,
    toasts: RwSignal<ToastState>,
    id: String,
    success_text: &'static str,
) {
    let api = api.clone();
    spawn_request(async move {
        let result = api.delete::<R>(&id).await;
        match state.try_update(|s| s.finish_delete(&id, result)) {
            Some(Ok(())) => notify_success(toasts, success_text),
            Some(Err(message)) => notify_error(toasts, message),
            None => {}
        }
    });
}

/// Memoized dialog mode; changes only when a dialog opens or closes.
pub(crate) fn dialog_mode<R: Resource>(state: RwSignal<ListState<R>>) -> Memo<DialogMode> {
    Memo::new(move |_| state.with(|s| s.dialog.mode()))
}

/// Text of one draft field.
pub(crate) fn draft_text<R: Resource>(state: RwSignal<ListState<R>>, read: fn(&R) -> String) -> Signal<String> {
    Signal::derive(move || state.with(|s| s.draft().map(read).unwrap_or_default()))
}

/// Flag of one draft field.
pub(crate) fn draft_flag<R: Resource>(state: RwSignal<ListState<R>>, read: fn(&R) -> bool) -> Signal<bool> {
    Signal::derive(move || state.with(|s| s.draft().is_some_and(read)))
}

/// Writer for one draft field.
pub(crate) fn draft_setter<R: Resource, V: 'static>(
    state: RwSignal<ListState<R>>,
    write: fn(&mut R, V),
) -> Callback<V> {
    Callback::new(move |value: V| state.update(|s| s.edit_draft(|draft| write(draft, value))))
}

/// Rows as a signal for `CrudTable`.
pub(crate) fn rows<R: Resource>(state: RwSignal<ListState<R>>) -> Signal<Vec<R>> {
    Signal::derive(move || state.with(|s| s.items.clone()))
}

pub(crate) fn loading<R: Resource>(state: RwSignal<ListState<R>>) -> Signal<bool> {
    Signal::derive(move || state.with(|s| s.loading))
}
