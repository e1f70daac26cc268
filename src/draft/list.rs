//! Copy-on-write edits for list-valued fields.
//!
//! Each helper returns a new list with exactly one element changed; the
//! input is never mutated. Out-of-range indexes return `None`.

pub fn with_pushed<T: Clone>(items: &[T], item: T) -> Vec<T> {
    let mut next = items.to_vec();
    next.push(item);
    next
}

pub fn with_replaced<T: Clone>(items: &[T], index: usize, item: T) -> Option<Vec<T>> {
    if index >= items.len() {
        return None;
    }
    let mut next = items.to_vec();
    next[index] = item;
    Some(next)
}

pub fn with_removed<T: Clone>(items: &[T], index: usize) -> Option<Vec<T>> {
    if index >= items.len() {
        return None;
    }
    let mut next = items.to_vec();
    next.remove(index);
    Some(next)
}
