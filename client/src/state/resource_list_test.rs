use super::*;
use crate::net::api::PageRequest;
use crate::net::testing::{RecordingTransport, signed_in_client};
use crate::net::transport::Method;
use crate::net::types::{Category, User};
use futures::executor::block_on;
use serde_json::json;

fn user(id: &str, email: &str) -> User {
    User { id: id.to_owned(), email: email.to_owned(), is_active: true, ..User::default() }
}

fn users_state() -> ListState<User> {
    let mut state = ListState::default();
    state.finish_load(Ok(Page {
        data: vec![user("u1", "a@example.com"), user("u2", "b@example.com"), user("u3", "c@example.com")],
        count: 3,
    }));
    state
}

#[test]
fn starts_loading_with_no_rows() {
    let state = ListState::<Category>::default();
    assert!(state.loading);
    assert!(state.items.is_empty());
    assert_eq!(state.dialog, Dialog::Closed);
}

#[test]
fn failed_load_records_error() {
    let mut state = ListState::<Category>::default();
    state.finish_load(Err(ApiError::Transport("offline".to_owned())));
    assert!(!state.loading);
    assert_eq!(state.error.as_deref(), Some("request failed: offline"));
}

#[test]
fn deleting_user_removes_only_that_row_with_one_request() {
    let transport = RecordingTransport::new();
    transport.respond(200, json!({ "message": "User deleted successfully" }));
    let api = signed_in_client(&transport);
    let mut state = users_state();
    state.open_delete("u2");

    let result = block_on(api.delete::<User>("u2"));
    state.finish_delete("u2", result).unwrap();

    let ids = state.items.iter().map(|u| u.id.as_str()).collect::<Vec<_>>();
    assert_eq!(ids, vec!["u1", "u3"]);
    assert_eq!(state.count, 2);
    assert_eq!(state.dialog, Dialog::Closed);
    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::Delete);
    assert_eq!(requests[0].url, "/api/v1/users/u2");
}

#[test]
fn failed_delete_keeps_rows() {
    let mut state = users_state();
    let err = state.finish_delete("u2", Err(ApiError::Status { status: 403, detail: None }));
    assert_eq!(err, Err("request failed (403)".to_owned()));
    assert_eq!(state.items.len(), 3);
}

#[test]
fn save_replaces_row_by_id() {
    let mut state = users_state();
    assert!(state.open_edit("u1"));
    state.edit_draft(|u| u.email = "z@example.com".to_owned());
    let draft = state.draft().cloned().unwrap();

    state.finish_save(Ok(draft)).unwrap();

    assert_eq!(state.items[0].email, "z@example.com");
    assert_eq!(state.items.len(), 3);
    assert_eq!(state.dialog, Dialog::Closed);
}

#[test]
fn save_of_new_record_appends() {
    let mut state = users_state();
    state.open_create(User::default());

    state.finish_save(Ok(user("u4", "d@example.com"))).unwrap();

    assert_eq!(state.items.last().map(|u| u.id.as_str()), Some("u4"));
    assert_eq!(state.count, 4);
}

#[test]
fn failed_save_keeps_dialog_open() {
    let mut state = users_state();
    state.open_create(User::default());
    assert!(state.finish_save(Err(ApiError::MissingCredential)).is_err());
    assert!(matches!(state.dialog, Dialog::Create(_)));
}

#[test]
fn open_edit_for_unknown_id_is_false() {
    let mut state = users_state();
    assert!(!state.open_edit("nope"));
    assert_eq!(state.dialog, Dialog::Closed);
}

#[test]
fn retain_filters_rows() {
    let mut state = users_state();
    state.retain(|u| u.id != "u1");
    assert_eq!(state.items.len(), 2);
}

#[test]
fn fetch_on_mount_lists_collection() {
    let transport = RecordingTransport::new();
    transport.respond(200, json!({ "data": [{ "id": "c-1", "name": "Travel", "code": "TRV" }], "count": 1 }));
    let api = signed_in_client(&transport);
    let mut state = ListState::<Category>::default();

    state.begin_load();
    state.finish_load(block_on(api.list::<Category>(PageRequest::default())));

    assert_eq!(state.items.len(), 1);
    assert!(!state.loading);
}

#[test]
fn dialog_mode_ignores_draft_contents() {
    let mut state = users_state();
    state.open_create(User::default());
    let before = state.dialog.mode();
    state.edit_draft(|u| u.email = "x@example.com".to_owned());
    assert_eq!(state.dialog.mode(), before);
    assert_eq!(before, DialogMode::Create);
    state.open_delete("u1");
    assert_eq!(state.dialog.mode(), DialogMode::ConfirmDelete("u1".to_owned()));
}
