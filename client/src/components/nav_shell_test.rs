use super::*;

#[test]
fn chrome_hidden_on_sign_in_route() {
    assert!(!show_chrome("/", true));
}

#[test]
fn chrome_hidden_without_token() {
    assert!(!show_chrome("/grants", false));
}

#[test]
fn chrome_shown_for_signed_in_pages() {
    assert!(show_chrome("/grants", true));
    assert!(show_chrome("/rules/new", true));
}

#[test]
fn link_class_marks_nested_routes_active() {
    assert_eq!(link_class("/rules", "/rules/r-1"), "nav-shell__link nav-shell__link--active");
    assert_eq!(link_class("/rules", "/roles"), "nav-shell__link");
    assert_eq!(link_class("/users", "/users"), "nav-shell__link nav-shell__link--active");
}
