//! Spin completion of determinant sets.
//!
//! A set of determinants spans whole S² eigenspaces only if, for every
//! combination of closed (doubly occupied) and open (singly occupied)
//! orbitals it contains, it also contains every way of distributing the
//! open-shell alpha and beta labels over the open orbitals.
//!
//! # Algorithm
//!
//! For each input determinant with `na` alpha-only and `nb` beta-only
//! orbitals, enumerate the `C(na + nb, na)` choices of which open
//! positions carry alpha spin with [`Combinations`], build the candidate
//! and append it unless a bit-identical determinant is already present.
//!
//! The enumeration is independent per input, so the `parallel` feature
//! generates candidates on the rayon pool and merges them serially in input
//! order. Both entry points produce the same output.

use std::collections::HashSet;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::determinant::BitDeterminant;
use crate::error::{Error, Result};
use crate::spin_string::MAX_ORBITALS;

/// Restartable enumerator of the `k`-subsets of `0..n` in lexicographic order.
///
/// Yields `C(n, k)` ascending index vectors. `k == 0` yields the empty
/// subset once; `k > n` yields nothing.
#[derive(Debug, Clone)]
pub struct Combinations {
    n: usize,
    k: usize,
    indices: Vec<usize>,
    started: bool,
    done: bool,
}

impl Combinations {
    /// Create an enumerator over the `k`-subsets of `0..n`.
    pub fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            k,
            indices: (0..k).collect(),
            started: false,
            done: k > n,
        }
    }

    /// Restart the enumeration from the first subset.
    pub fn reset(&mut self) {
        *self = Self::new(self.n, self.k);
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        if self.done {
            return None;
        }
        if !self.started {
            self.started = true;
            return Some(self.indices.clone());
        }
        // Rightmost index that can still move right.
        let mut i = self.k;
        loop {
            if i == 0 {
                self.done = true;
                return None;
            }
            i -= 1;
            if self.indices[i] < self.n - self.k + i {
                break;
            }
        }
        self.indices[i] += 1;
        for j in i + 1..self.k {
            self.indices[j] = self.indices[j - 1] + 1;
        }
        Some(self.indices.clone())
    }
}

/// Binomial coefficient `C(n, k)`, or `None` if it does not fit in `usize`.
pub fn binomial(n: usize, k: usize) -> Option<usize> {
    if k > n {
        return Some(0);
    }
    let k = k.min(n - k);
    let mut result = 1u128;
    for i in 0..k {
        // Exact: the running product is C(n, i + 1) * (i + 1).
        result = result.checked_mul((n - i) as u128)? / (i as u128 + 1);
    }
    usize::try_from(result).ok()
}

/// Every spin labeling of `det`'s open orbitals, `det` itself included.
///
/// Closed-shell determinants yield nothing.
pub fn spin_labelings(det: &BitDeterminant) -> Vec<BitDeterminant> {
    let closed = det.alfa.and(&det.beta);
    let open_a = det.alfa.and_not(&det.beta);
    let open_b = det.beta.and_not(&det.alfa);
    let open: Vec<usize> = open_a.or(&open_b).ones().collect();
    if open.is_empty() {
        return Vec::new();
    }
    let na = open_a.count();

    Combinations::new(open.len(), na)
        .map(|alfa_positions| {
            let mut new_det = *det;
            new_det.alfa = closed;
            new_det.beta = closed;
            let mut chosen = alfa_positions.iter().peekable();
            for (pos, &orbital) in open.iter().enumerate() {
                if chosen.peek() == Some(&&pos) {
                    chosen.next();
                    new_det.alfa.set(orbital, true);
                } else {
                    new_det.beta.set(orbital, true);
                }
            }
            new_det
        })
        .collect()
}

fn check_sizes(det_space: &[BitDeterminant], nmo: usize) -> Result<()> {
    if nmo > MAX_ORBITALS {
        return Err(Error::CapacityExceeded {
            requested: nmo,
            capacity: MAX_ORBITALS,
        });
    }
    match det_space.iter().find(|d| d.size() != nmo) {
        Some(d) => Err(Error::SizeMismatch {
            left: d.size(),
            right: nmo,
        }),
        None => Ok(()),
    }
}

fn merge(
    det_space: &mut Vec<BitDeterminant>,
    seen: &mut HashSet<BitDeterminant>,
    candidates: impl IntoIterator<Item = BitDeterminant>,
) -> usize {
    let mut added = 0;
    for candidate in candidates {
        if seen.insert(candidate) {
            trace!(det = %candidate, "added determinant");
            det_space.push(candidate);
            added += 1;
        }
    }
    added
}

/// Close `det_space` under spin relabeling of its open orbitals.
///
/// Missing determinants are appended; existing entries keep their order.
/// Returns the number of determinants added. Fails with
/// [`Error::SizeMismatch`] before touching the set if any determinant does
/// not span `nmo` orbitals.
pub fn enforce_spin_completeness(det_space: &mut Vec<BitDeterminant>, nmo: usize) -> Result<usize> {
    check_sizes(det_space, nmo)?;
    let ninput = det_space.len();
    let mut seen: HashSet<BitDeterminant> = det_space.iter().copied().collect();

    let mut added = 0;
    for idx in 0..ninput {
        let det = det_space[idx];
        added += merge(det_space, &mut seen, spin_labelings(&det));
    }

    debug!(ninput, added, "enforced spin completeness");
    Ok(added)
}

/// Parallel [`enforce_spin_completeness`].
///
/// Candidate generation runs on the rayon pool; insertion stays on the
/// calling thread so each labeling is added once and the output order
/// matches the serial version.
#[cfg(feature = "parallel")]
pub fn par_enforce_spin_completeness(
    det_space: &mut Vec<BitDeterminant>,
    nmo: usize,
) -> Result<usize> {
    check_sizes(det_space, nmo)?;
    let ninput = det_space.len();
    let mut seen: HashSet<BitDeterminant> = det_space.iter().copied().collect();

    let candidates: Vec<Vec<BitDeterminant>> = det_space.par_iter().map(spin_labelings).collect();
    let added = merge(det_space, &mut seen, candidates.into_iter().flatten());

    debug!(ninput, added, "enforced spin completeness (parallel)");
    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn det(s: &str) -> BitDeterminant {
        let alfa: Vec<bool> = s.chars().map(|c| c == '2' || c == '+').collect();
        let beta: Vec<bool> = s.chars().map(|c| c == '2' || c == '-').collect();
        BitDeterminant::from_alfa_beta(&alfa, &beta).unwrap()
    }

    fn rendered(dets: &[BitDeterminant]) -> Vec<String> {
        dets.iter().map(|d| d.to_string()).collect()
    }

    #[test]
    fn test_combinations_basic() {
        let all: Vec<_> = Combinations::new(4, 2).collect();
        assert_eq!(
            all,
            vec![
                vec![0, 1],
                vec![0, 2],
                vec![0, 3],
                vec![1, 2],
                vec![1, 3],
                vec![2, 3]
            ]
        );
        assert_eq!(Combinations::new(3, 0).collect::<Vec<_>>(), vec![Vec::<usize>::new()]);
        assert_eq!(Combinations::new(3, 3).count(), 1);
        assert_eq!(Combinations::new(2, 3).count(), 0);
    }

    #[test]
    fn test_combinations_reset() {
        let mut c = Combinations::new(5, 2);
        let first: Vec<_> = c.by_ref().take(3).collect();
        c.reset();
        let again: Vec<_> = c.by_ref().take(3).collect();
        assert_eq!(first, again);
        c.reset();
        assert_eq!(c.count(), 10);
    }

    #[test]
    fn test_combinations_match_binomial() {
        for n in 0..9 {
            for k in 0..=n + 1 {
                assert_eq!(Some(Combinations::new(n, k).count()), binomial(n, k), "C({n},{k})");
            }
        }
        assert_eq!(binomial(10, 4), Some(210));
        assert_eq!(binomial(3, 5), Some(0));
    }

    #[test]
    fn test_binomial_large_arguments() {
        assert_eq!(binomial(64, 32), Some(1_832_624_140_942_590_534));
        assert_eq!(binomial(128, 1), Some(128));
        assert_eq!(binomial(128, 127), Some(128));
        assert_eq!(binomial(128, 64), None);
        assert_eq!(binomial(usize::MAX, 2), None);
    }

    #[test]
    fn test_one_alpha_one_beta_open() {
        let mut space = vec![det("2+-0")];
        let added = enforce_spin_completeness(&mut space, 4).unwrap();
        assert_eq!(added, 1);
        assert_eq!(rendered(&space), vec!["|2+-0>", "|2-+0>"]);
    }

    #[test]
    fn test_two_alpha_one_beta_open() {
        let mut space = vec![det("+2+-0")];
        enforce_spin_completeness(&mut space, 5).unwrap();
        assert_eq!(space.len(), 3);
        for d in &space {
            assert_eq!(d.npair(), 1);
            assert!(d.get_alfa_bit(1).unwrap() && d.get_beta_bit(1).unwrap());
            assert_eq!(d.spin_z(), 0.5);
        }
        let mut got = rendered(&space);
        got.sort();
        assert_eq!(got, vec!["|+2+-0>", "|+2-+0>", "|-2++0>"]);
    }

    #[test]
    fn test_completion_is_idempotent() {
        let mut space = vec![det("++-0"), det("2200"), det("+-+-")];
        let added = enforce_spin_completeness(&mut space, 4).unwrap();
        assert_eq!(added, 2 + 5);
        let snapshot = space.clone();
        assert_eq!(enforce_spin_completeness(&mut space, 4).unwrap(), 0);
        assert_eq!(space, snapshot);
    }

    #[test]
    fn test_shared_pattern_added_once() {
        let mut space = vec![det("+-0"), det("-+0"), det("+-0")];
        let added = enforce_spin_completeness(&mut space, 3).unwrap();
        assert_eq!(added, 0);
        assert_eq!(space.len(), 3);

        let mut space = vec![det("++-"), det("+-+")];
        assert_eq!(enforce_spin_completeness(&mut space, 3).unwrap(), 1);
        assert_eq!(space.len(), 3);
    }

    #[test]
    fn test_closed_shell_untouched() {
        let mut space = vec![det("220"), det("202")];
        assert_eq!(enforce_spin_completeness(&mut space, 3).unwrap(), 0);
        assert_eq!(space.len(), 2);
    }

    #[test]
    fn test_size_mismatch_rejected() {
        let mut space = vec![det("+-0"), det("+-")];
        let before = space.clone();
        assert_eq!(
            enforce_spin_completeness(&mut space, 3),
            Err(Error::SizeMismatch { left: 2, right: 3 })
        );
        assert_eq!(space, before);
        assert!(enforce_spin_completeness(&mut Vec::new(), 500).is_err());
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_serial() {
        let input = vec![det("++-0+"), det("2+-00"), det("0-+-2"), det("22000"), det("+---+")];
        let mut serial = input.clone();
        let mut parallel = input;
        let a = enforce_spin_completeness(&mut serial, 5).unwrap();
        let b = par_enforce_spin_completeness(&mut parallel, 5).unwrap();
        assert_eq!(a, b);
        assert_eq!(serial, parallel);
    }
}
