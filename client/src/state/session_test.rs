use super::*;

#[test]
fn fresh_session_is_signed_out() {
    let session = Session::in_memory();
    assert_eq!(session.token(), None);
    assert!(!session.is_signed_in());
    assert_eq!(session.selected_grant(), None);
}

#[test]
fn sign_in_stores_token() {
    let session = Session::in_memory();
    session.sign_in("abc");
    assert_eq!(session.token().as_deref(), Some("abc"));
    assert!(session.is_signed_in());
}

#[test]
fn empty_token_counts_as_signed_out() {
    let session = Session::in_memory();
    session.sign_in("");
    assert!(!session.is_signed_in());
}

#[test]
fn clones_share_one_store() {
    let session = Session::in_memory();
    let other = session.clone();
    other.sign_in("abc");
    assert_eq!(session.token().as_deref(), Some("abc"));
}

#[test]
fn select_grant_round_trips_id_and_title() {
    let session = Session::in_memory();
    session.select_grant("g-1", "NSF Ocean");
    assert_eq!(
        session.selected_grant(),
        Some(SelectedGrant { id: "g-1".to_owned(), title: "NSF Ocean".to_owned() })
    );
}

#[test]
fn sign_out_clears_token_and_grant() {
    let session = Session::in_memory();
    session.sign_in("abc");
    session.select_grant("g-1", "NSF Ocean");

    session.sign_out();

    assert_eq!(session.token(), None);
    assert_eq!(session.selected_grant(), None);
}

#[test]
#[cfg(not(feature = "hydrate"))]
fn browser_storage_is_inert_without_hydrate() {
    let store = BrowserStorage;
    store.set(TOKEN_KEY, "abc");
    assert_eq!(store.get(TOKEN_KEY), None);
}
