use super::*;

#[test]
fn push_appends_in_order() {
    let mut state = ToastState::default();
    state.push_success("saved");
    state.push_error("failed");
    let texts = state.toasts.iter().map(|t| (t.kind, t.text.as_str())).collect::<Vec<_>>();
    assert_eq!(texts, vec![(ToastKind::Success, "saved"), (ToastKind::Error, "failed")]);
}

#[test]
fn dismiss_removes_only_matching_toast() {
    let mut state = ToastState::default();
    let first = state.push_success("one");
    state.push_success("two");
    state.dismiss(first);
    assert_eq!(state.toasts.len(), 1);
    assert_eq!(state.toasts[0].text, "two");
}

#[test]
fn queue_drops_oldest_past_limit() {
    let mut state = ToastState::default();
    for i in 0..7 {
        state.push_error(format!("e{i}"));
    }
    assert_eq!(state.toasts.len(), 5);
    assert_eq!(state.toasts[0].text, "e2");
}

#[test]
fn kind_maps_to_class() {
    assert_eq!(ToastKind::Error.class(), "toast toast--error");
}
