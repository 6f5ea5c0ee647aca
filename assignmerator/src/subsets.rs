//! Subsets of positions are enumerated by counting in binary: bit `i`
//! of the counter says whether position `i` is in the subset.  Small
//! subsets of low positions thus come first, and the full set comes
//! last.
//!
//! Counters are `u64`, so we only support up to 63 positions.  That's
//! far beyond anything the callers can afford to search anyway.

const MAX_POSITIONS: usize = 63;

fn positions_in(mask: u64, len: usize) -> Vec<usize> {
    (0..len).filter(|index| mask & (1u64 << index) != 0).collect()
}

fn positions_out(mask: u64, len: usize) -> Vec<usize> {
    (0..len).filter(|index| mask & (1u64 << index) == 0).collect()
}

/// Iterates over the non-empty subsets of `0..len`, each as an
/// ascending list of positions.
#[derive(Clone, Debug)]
pub struct Subsets {
    len: usize,
    next_mask: u64,
    end: u64,
}

impl Subsets {
    /// # Panics
    ///
    /// Panics if `len` exceeds 63 positions.
    #[must_use]
    pub fn new(len: usize) -> Self {
        assert!(len <= MAX_POSITIONS, "Too many positions to enumerate subsets.");
        Self {
            len,
            next_mask: 1,
            end: 1u64 << len,
        }
    }
}

impl Iterator for Subsets {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        if self.next_mask >= self.end {
            return None;
        }

        let mask = self.next_mask;
        self.next_mask += 1;
        Some(positions_in(mask, self.len))
    }
}

/// Iterates over the ways to cut `0..len` into two complementary,
/// non-empty lists of positions.  Each cut shows up twice, once in
/// each orientation.
#[derive(Clone, Debug)]
pub struct Splits {
    len: usize,
    next_mask: u64,
    full: u64,
}

impl Splits {
    /// # Panics
    ///
    /// Panics if `len` exceeds 63 positions.
    #[must_use]
    pub fn new(len: usize) -> Self {
        assert!(len <= MAX_POSITIONS, "Too many positions to enumerate splits.");
        Self {
            len,
            next_mask: 1,
            full: (1u64 << len) - 1,
        }
    }
}

impl Iterator for Splits {
    type Item = (Vec<usize>, Vec<usize>);

    fn next(&mut self) -> Option<(Vec<usize>, Vec<usize>)> {
        if self.next_mask >= self.full {
            return None;
        }

        let mask = self.next_mask;
        self.next_mask += 1;
        Some((positions_in(mask, self.len), positions_out(mask, self.len)))
    }
}

#[test]
fn test_subsets_order() {
    assert_eq!(
        Subsets::new(3).collect::<Vec<_>>(),
        vec![
            vec![0],
            vec![1],
            vec![0, 1],
            vec![2],
            vec![0, 2],
            vec![1, 2],
            vec![0, 1, 2]
        ]
    );
}

#[test]
fn test_subsets_empty() {
    assert_eq!(Subsets::new(0).count(), 0);
    assert_eq!(Subsets::new(1).collect::<Vec<_>>(), vec![vec![0]]);
    assert_eq!(Subsets::new(10).count(), 1023);
}

#[test]
fn test_splits() {
    assert_eq!(Splits::new(0).count(), 0);
    assert_eq!(Splits::new(1).count(), 0);
    assert_eq!(
        Splits::new(2).collect::<Vec<_>>(),
        vec![(vec![0], vec![1]), (vec![1], vec![0])]
    );

    for (left, right) in Splits::new(4) {
        assert!(!left.is_empty());
        assert!(!right.is_empty());
        assert_eq!(left.len() + right.len(), 4);
        assert!(left.iter().all(|index| !right.contains(index)));
    }
    assert_eq!(Splits::new(4).count(), 14);
}

#[test]
#[should_panic]
fn test_too_wide() {
    let _ = Subsets::new(64);
}
