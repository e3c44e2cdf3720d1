//! Copy-on-write helpers for index-addressed sequences.
//!
//! Each helper returns a fresh `Vec` and leaves the input untouched, so a
//! signal holding the old sequence can be swapped in one `set`. An
//! out-of-range index yields `None` and callers treat it as a no-op.

#[cfg(test)]
#[path = "collection_test.rs"]
mod collection_test;

/// New sequence where the entry at `index` has been passed through `edit`.
pub fn update_at<T: Clone>(items: &[T], index: usize, edit: impl FnOnce(&mut T)) -> Option<Vec<T>> {
    if index >= items.len() {
        return None;
    }
    let mut next = items.to_vec();
    edit(&mut next[index]);
    Some(next)
}

/// New sequence without the entry at `index`; later entries shift down.
pub fn remove_at<T: Clone>(items: &[T], index: usize) -> Option<Vec<T>> {
    if index >= items.len() {
        return None;
    }
    let mut next = items.to_vec();
    next.remove(index);
    Some(next)
}

/// New sequence with `item` appended.
pub fn append<T: Clone>(items: &[T], item: T) -> Vec<T> {
    let mut next = Vec::with_capacity(items.len() + 1);
    next.extend_from_slice(items);
    next.push(item);
    next
}
