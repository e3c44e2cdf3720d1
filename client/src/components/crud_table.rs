//! Generic table for resource list pages.
//!
//! DESIGN
//! ======
//! Columns are plain function pointers so one table renders any `Resource`.
//! Row actions receive the row id; pages look the record up in their own
//! `ListState`.

#[cfg(test)]
#[path = "crud_table_test.rs"]
mod crud_table_test;

use std::sync::Arc;

use leptos::prelude::*;

use crate::net::api::Resource;

/// One rendered column.
pub struct Column<R> {
    pub header: &'static str,
    pub cell: fn(&R) -> String,
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for Column<R> {}

impl<R> Column<R> {
    pub const fn new(header: &'static str, cell: fn(&R) -> String) -> Self {
        Self { header, cell }
    }
}

/// Button shown at the end of each persisted row.
#[derive(Clone, Copy)]
pub struct RowAction {
    pub label: &'static str,
    pub class: &'static str,
    pub on_click: Callback<String>,
}

impl RowAction {
    pub fn new(label: &'static str, on_click: Callback<String>) -> Self {
        Self { label, class: "btn btn--small", on_click }
    }

    pub fn danger(label: &'static str, on_click: Callback<String>) -> Self {
        Self { label, class: "btn btn--small btn--danger", on_click }
    }
}

/// Cell text for every column of `row`.
pub fn row_cells<R>(columns: &[Column<R>], row: &R) -> Vec<String> {
    columns.iter().map(|column| (column.cell)(row)).collect()
}

#[component]
pub fn CrudTable<R>(
    #[prop(into)] rows: Signal<Vec<R>>,
    columns: Vec<Column<R>>,
    #[prop(default = Vec::new())] actions: Vec<RowAction>,
    #[prop(into)] loading: Signal<bool>,
    #[prop(default = "Nothing here yet.")] empty_text: &'static str,
) -> impl IntoView
where
    R: Resource,
{
    let columns = Arc::new(columns);
    let actions = Arc::new(actions);
    let headers = columns.iter().map(|column| column.header).collect::<Vec<_>>();
    let has_actions = !actions.is_empty();

    view! {
        <Show
            when=move || !rows.with(Vec::is_empty)
            fallback=move || {
                view! {
                    <p class="crud-table__empty">
                        {move || if loading.get() { "Loading..." } else { empty_text }}
                    </p>
                }
            }
        >
            <div class="crud-table__wrap">
                <table class="crud-table">
                    <thead>
                        <tr>
                            {headers.iter().map(|header| view! { <th>{*header}</th> }).collect_view()}
                            {has_actions.then(|| view! { <th>"Actions"</th> })}
                        </tr>
                    </thead>
                    <tbody>
                        {
                            let columns = columns.clone();
                            let actions = actions.clone();
                            move || {
                                rows.get()
                                    .into_iter()
                                    .map(|row| {
                                        let cells = row_cells(&columns, &row)
                                            .into_iter()
                                            .map(|text| view! { <td>{text}</td> })
                                            .collect_view();
                                        let buttons = row.id().map(|id| action_buttons(&actions, id));
                                        view! {
                                            <tr>
                                                {cells}
                                                {has_actions.then(|| view! { <td class="crud-table__actions">{buttons}</td> })}
                                            </tr>
                                        }
                                    })
                                    .collect_view()
                            }
                        }
                    </tbody>
                </table>
            </div>
        </Show>
    }
}

fn action_buttons(actions: &[RowAction], id: &str) -> impl IntoView + use<> {
    actions
        .iter()
        .map(|action| {
            let id = id.to_owned();
            let on_click = action.on_click;
            view! {
                <button class=action.class on:click=move |_| on_click.run(id.clone())>
                    {action.label}
                </button>
            }
        })
        .collect_view()
}
