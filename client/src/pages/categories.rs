//! Expense categories.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use super::list_actions::{
    delete_row, dialog_mode, draft_flag, draft_setter, draft_text, load_collection, loading, rows, save_draft,
};
use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::crud_table::{Column, CrudTable, RowAction};
use crate::components::field::{CheckField, TextAreaField, TextField};
use crate::components::modal::Modal;
use crate::net::api::ApiClient;
use crate::net::types::Category;
use crate::state::resource_list::{DialogMode, ListState};
use crate::state::session::Session;
use crate::state::toast::ToastState;
use crate::util::auth::install_signed_out_redirect;

fn columns() -> Vec<Column<Category>> {
    vec![
        Column::new("Code", |c: &Category| c.code.clone()),
        Column::new("Name", |c: &Category| c.name.clone()),
        Column::new("Description", |c: &Category| c.description.clone().unwrap_or_default()),
        Column::new("Active", |c: &Category| if c.is_active { "Yes" } else { "No" }.to_owned()),
    ]
}

#[component]
pub fn CategoriesPage() -> impl IntoView {
    let session = expect_context::<Session>();
    let api = expect_context::<ApiClient>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let state = RwSignal::new(ListState::<Category>::default());

    let reload = Callback::new({
        let api = api.clone();
        move |()| load_collection(&api, state)
    });
    install_signed_out_redirect(session, use_navigate(), move || reload.run(()));

    let on_new = move |_| state.update(|s| s.open_create(Category { is_active: true, ..Category::default() }));
    let on_delete = Callback::new(move |id: String| state.update(|s| s.open_delete(&id)));
    let on_close = Callback::new(move |()| state.update(ListState::close_dialog));
    let on_save = Callback::new({
        let api = api.clone();
        move |()| {
            let Some(category) = state.with_untracked(|s| s.draft().cloned()) else {
                return;
            };
            let api = api.clone();
            save_draft(state, toasts, async move { api.create(&category).await }, "Category created.", reload);
        }
    });
    let on_confirm_delete = Callback::new(move |()| {
        if let DialogMode::ConfirmDelete(id) = state.with_untracked(|s| s.dialog.mode()) {
            delete_row(&api, state, toasts, id, "Category deleted.");
        }
    });

    let mode = dialog_mode(state);
    let dialog = move || match mode.get() {
        DialogMode::Closed | DialogMode::Edit => ().into_any(),
        DialogMode::ConfirmDelete(_) => view! {
            <ConfirmDialog message="Delete this category?" on_cancel=on_close on_confirm=on_confirm_delete />
        }
        .into_any(),
        DialogMode::Create => view! {
            <Modal title="New category" on_close=on_close>
                <TextField
                    label="Name"
                    value=draft_text(state, |c| c.name.clone())
                    on_input=draft_setter(state, |c, v| c.name = v)
                />
                <TextField
                    label="Code"
                    value=draft_text(state, |c| c.code.clone())
                    on_input=draft_setter(state, |c, v| c.code = v)
                />
                <TextAreaField
                    label="Description"
                    value=draft_text(state, |c| c.description.clone().unwrap_or_default())
                    on_input=draft_setter(state, |c, v: String| c.description = (!v.is_empty()).then_some(v))
                />
                <CheckField
                    label="Active"
                    checked=draft_flag(state, |c| c.is_active)
                    on_toggle=draft_setter(state, |c, v| c.is_active = v)
                />
                <div class="dialog__actions">
                    <button class="btn" on:click=move |_| on_close.run(())>"Cancel"</button>
                    <button class="btn btn--primary" on:click=move |_| on_save.run(())>"Save"</button>
                </div>
            </Modal>
        }
        .into_any(),
    };

    view! {
        <section class="resource-page">
            <header class="resource-page__header">
                <h1>"Categories"</h1>
                <button class="btn btn--primary" on:click=on_new>"New category"</button>
            </header>
            <CrudTable
                rows=rows(state)
                loading=loading(state)
                columns=columns()
                actions=vec![RowAction::danger("Delete", on_delete)]
                empty_text="No categories yet."
            />
            {dialog}
        </section>
    }
}
