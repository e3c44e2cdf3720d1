use super::*;
use crate::net::api::{ApiClient, PageRequest};
use crate::net::testing::{RecordingTransport, signed_in_session};
use crate::net::types::Grant;
use futures::executor::block_on;
use std::cell::RefCell;

#[test]
fn signed_out_session_redirects_to_sign_in() {
    assert_eq!(mount_access(&Session::in_memory()), Access::Redirect("/"));
}

#[test]
fn signed_in_session_is_granted() {
    assert_eq!(mount_access(&signed_in_session("tok")), Access::Granted);
}

#[test]
fn signed_out_mount_redirects_without_requests() {
    let transport = RecordingTransport::new();
    let session = Session::in_memory();
    let api = ApiClient::new(transport.clone(), session.clone());
    let redirected = RefCell::new(None::<String>);

    let access = guard_mount(
        &session,
        |path| *redirected.borrow_mut() = Some(path.to_owned()),
        || {
            let _ = block_on(api.list::<Grant>(PageRequest::default()));
        },
    );

    assert_eq!(access, Access::Redirect(SIGN_IN_PATH));
    assert_eq!(redirected.into_inner().as_deref(), Some("/"));
    assert!(transport.requests().is_empty());
}

#[test]
fn signed_in_mount_runs_loader_once() {
    let session = signed_in_session("tok");
    let loads = RefCell::new(0);

    guard_mount(&session, |_| panic!("should not redirect"), || *loads.borrow_mut() += 1);

    assert_eq!(loads.into_inner(), 1);
}

#[test]
fn rejected_call_raises_session_expiry() {
    let transport = RecordingTransport::new();
    transport.respond(401, serde_json::json!({ "detail": "Could not validate credentials" }));
    let expiry = SessionExpiry::default();
    let api = ApiClient::new(transport.clone(), signed_in_session("stale"))
        .with_rejection_handler(move || expiry.raise());

    let _ = block_on(api.list::<Grant>(PageRequest::default()));

    assert!(expiry.is_raised());
    assert!(!api.session().is_signed_in());
    assert!(expiry.take());
    assert!(!expiry.is_raised());
}

#[test]
fn expiry_starts_lowered() {
    let expiry = SessionExpiry::default();
    assert!(!expiry.is_raised());
    assert!(!expiry.take());
}
