//! Assignmerator lazily enumerates the combinatorial search spaces
//! that show up when we compare two lists of literals: every partial
//! map from positions of one list to positions of the other
//! (`Assignments`), every non-empty subset of a list of positions
//! (`Subsets`), and every way to cut a list of positions in two
//! non-empty halves (`Splits`).
//!
//! The enumeration order is fixed and documented on each iterator:
//! callers search for the first combination that works, and tests
//! lock in which combination that is.
mod assignment;
mod subsets;

pub use assignment::Assignment;
pub use assignment::Assignments;
pub use assignment::Match;
pub use subsets::Splits;
pub use subsets::Subsets;

/// Returns the items of `items` found at `positions`, in the order
/// of `positions`.
///
/// # Panics
///
/// Panics if a position is out of bounds for `items`.
#[must_use]
pub fn select<T: Clone>(items: &[T], positions: &[usize]) -> Vec<T> {
    positions.iter().map(|index| items[*index].clone()).collect()
}

#[test]
fn test_select() {
    let items = ["a", "b", "c", "d"];

    assert_eq!(select(&items, &[]), Vec::<&str>::new());
    assert_eq!(select(&items, &[3, 0]), vec!["d", "a"]);
    assert_eq!(select(&items, &[1, 1]), vec!["b", "b"]);
}

#[test]
#[should_panic]
fn test_select_out_of_bounds() {
    let _ = select(&[1, 2], &[2]);
}
