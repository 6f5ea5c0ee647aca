//! An `Assignment` is a partial function from the positions of an
//! "assignee" list (of length m) to the positions of an "origin" list
//! (of length n).  Unmapped assignee positions are simply left out of
//! the comparison: the corresponding items are still there, but we
//! ignore them.
//!
//! `Assignments` walks every such partial function except the empty
//! one, like an odometer: the digit for assignee position 0 turns
//! fastest, and each digit cycles through "unmapped", 0, 1, ..., n-1
//! before carrying into the next position.  There are thus (n + 1)^m
//! - 1 assignments for m assignee and n origin positions.

/// A `Match` pairs an assignee position with the origin position it
/// is sent to.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Match {
    pub assignee: usize,
    pub origin: usize,
}

/// A partial map from assignee positions to origin positions.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Assignment {
    origin_len: usize,
    values: Box<[Option<usize>]>,
}

impl Assignment {
    /// Returns the assignment that sends assignee position `i` to
    /// `values[i]`, for an origin list of `origin_len` items.
    ///
    /// # Panics
    ///
    /// Panics if one of the `values` is not a position of the origin
    /// list: out of range assignments are bugs in the caller.
    #[must_use]
    pub fn new(values: Vec<Option<usize>>, origin_len: usize) -> Self {
        for value in values.iter().flatten() {
            assert!(*value < origin_len, "Assignment value out of origin range.");
        }

        Self {
            origin_len,
            values: values.into_boxed_slice(),
        }
    }

    #[must_use]
    pub fn assignee_len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn origin_len(&self) -> usize {
        self.origin_len
    }

    #[must_use]
    pub fn values(&self) -> &[Option<usize>] {
        &self.values
    }

    /// Returns true iff every assignee position is mapped.
    #[must_use]
    pub fn is_total(&self) -> bool {
        self.values.iter().all(Option::is_some)
    }

    /// Returns true iff no assignee position is mapped.  The
    /// enumerator never yields such an assignment.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }

    /// Materialises the mapped pairs, sorted by assignee position.
    #[must_use]
    pub fn matches(&self) -> Vec<Match> {
        self.values
            .iter()
            .enumerate()
            .filter_map(|(assignee, value)| value.map(|origin| Match { assignee, origin }))
            .collect()
    }

    /// Assignee positions that are mapped somewhere, ascending.
    #[must_use]
    pub fn used_assignee_positions(&self) -> Vec<usize> {
        (0..self.values.len())
            .filter(|index| self.values[*index].is_some())
            .collect()
    }

    /// Assignee positions left out of the comparison, ascending.
    #[must_use]
    pub fn unused_assignee_positions(&self) -> Vec<usize> {
        (0..self.values.len())
            .filter(|index| self.values[*index].is_none())
            .collect()
    }

    /// Origin positions hit by at least one assignee position,
    /// ascending and without repetition.
    #[must_use]
    pub fn used_origin_positions(&self) -> Vec<usize> {
        let hit = self.origin_hits();
        (0..self.origin_len).filter(|index| hit[*index]).collect()
    }

    /// Origin positions that no assignee position is sent to.
    #[must_use]
    pub fn unused_origin_positions(&self) -> Vec<usize> {
        let hit = self.origin_hits();
        (0..self.origin_len).filter(|index| !hit[*index]).collect()
    }

    fn origin_hits(&self) -> Vec<bool> {
        let mut hit = vec![false; self.origin_len];
        for origin in self.values.iter().flatten() {
            hit[*origin] = true;
        }

        hit
    }
}

/// Lazy odometer over all non-empty `Assignment`s from `assignee_len`
/// positions to `origin_len` positions.
#[derive(Clone, Debug)]
pub struct Assignments {
    origin_len: usize,
    cursor: Vec<Option<usize>>,
    exhausted: bool,
}

impl Assignments {
    #[must_use]
    pub fn new(assignee_len: usize, origin_len: usize) -> Self {
        Self {
            origin_len,
            cursor: vec![None; assignee_len],
            exhausted: assignee_len == 0 || origin_len == 0,
        }
    }

    /// Only yields the total assignments, i.e., those that map every
    /// assignee position, in the same relative order.
    pub fn total(assignee_len: usize, origin_len: usize) -> impl Iterator<Item = Assignment> {
        Self::new(assignee_len, origin_len).filter(Assignment::is_total)
    }

    /// Turns the odometer by one step.  Returns false when every
    /// digit carried back to "unmapped", i.e., when we are done.
    fn advance(&mut self) -> bool {
        for digit in self.cursor.iter_mut() {
            match *digit {
                None => {
                    *digit = Some(0);
                    return true;
                }
                Some(value) if value + 1 < self.origin_len => {
                    *digit = Some(value + 1);
                    return true;
                }
                Some(_) => *digit = None,
            }
        }

        false
    }
}

impl Iterator for Assignments {
    type Item = Assignment;

    fn next(&mut self) -> Option<Assignment> {
        if self.exhausted {
            return None;
        }

        if !self.advance() {
            self.exhausted = true;
            return None;
        }

        Some(Assignment {
            origin_len: self.origin_len,
            values: self.cursor.clone().into_boxed_slice(),
        })
    }
}

#[test]
fn test_odometer_order() {
    let seen: Vec<Vec<Option<usize>>> = Assignments::new(2, 2)
        .map(|assignment| assignment.values().to_vec())
        .collect();

    assert_eq!(
        seen,
        vec![
            vec![Some(0), None],
            vec![Some(1), None],
            vec![None, Some(0)],
            vec![Some(0), Some(0)],
            vec![Some(1), Some(0)],
            vec![None, Some(1)],
            vec![Some(0), Some(1)],
            vec![Some(1), Some(1)],
        ]
    );
}

#[test]
fn test_counts() {
    for assignee_len in 0..4 {
        for origin_len in 0..4 {
            let expected = if assignee_len == 0 || origin_len == 0 {
                0
            } else {
                (origin_len + 1usize).pow(assignee_len as u32) - 1
            };

            assert_eq!(Assignments::new(assignee_len, origin_len).count(), expected);
            assert_eq!(
                Assignments::total(assignee_len, origin_len).count(),
                if expected == 0 {
                    0
                } else {
                    origin_len.pow(assignee_len as u32)
                }
            );
        }
    }
}

#[test]
fn test_never_empty() {
    assert!(Assignments::new(3, 2).all(|assignment| !assignment.is_empty()));
}

#[test]
fn test_partitions() {
    // Assignee 0 -> origin 2, assignee 1 ignored, assignee 2 -> origin 2.
    let assignment = Assignment::new(vec![Some(2), None, Some(2)], 4);

    assert_eq!(assignment.assignee_len(), 3);
    assert_eq!(assignment.origin_len(), 4);
    assert!(!assignment.is_total());
    assert_eq!(assignment.used_assignee_positions(), vec![0, 2]);
    assert_eq!(assignment.unused_assignee_positions(), vec![1]);
    assert_eq!(assignment.used_origin_positions(), vec![2]);
    assert_eq!(assignment.unused_origin_positions(), vec![0, 1, 3]);
    assert_eq!(
        assignment.matches(),
        vec![
            Match {
                assignee: 0,
                origin: 2
            },
            Match {
                assignee: 2,
                origin: 2
            }
        ]
    );
}

#[test]
#[should_panic]
fn test_out_of_range() {
    let _ = Assignment::new(vec![Some(0), Some(3)], 3);
}
