use super::*;

#[test]
fn update_at_touches_only_target_index() {
    let items = vec![1, 2, 3];
    let next = update_at(&items, 1, |v| *v = 20).unwrap();
    assert_eq!(next, vec![1, 20, 3]);
    assert_eq!(items, vec![1, 2, 3]);
}

#[test]
fn update_at_out_of_range_is_none() {
    assert_eq!(update_at(&[1, 2], 2, |v| *v = 0), None);
    assert_eq!(update_at::<i32>(&[], 0, |v| *v = 0), None);
}

#[test]
fn remove_at_shifts_later_entries() {
    let items = vec!["a", "b", "c"];
    assert_eq!(remove_at(&items, 0), Some(vec!["b", "c"]));
    assert_eq!(remove_at(&items, 3), None);
}

#[test]
fn append_keeps_existing_order() {
    assert_eq!(append(&[1, 2], 3), vec![1, 2, 3]);
    assert_eq!(append(&[], 7), vec![7]);
}
