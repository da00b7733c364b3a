//! Bit-packed Slater determinant.
//!
//! A determinant is a pair of occupation strings, one per spin channel,
//! over `size` active orbitals:
//!
//! ```text
//! |2+-0>    alfa: 1100    beta: 1010
//!  ^^^^
//!  ||||_ empty
//!  |||__ beta only
//!  ||___ alpha only
//!  |____ doubly occupied
//! ```
//!
//! Bits at or above `size` are always zero, so equality, hashing and
//! ordering can work on the raw words without consulting `size`.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use crate::error::{Error, Result};
use crate::spin_string::{SpinString, MAX_ORBITALS, WORDS};

/// Which spin channel an operation refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpinType {
    /// Spin up.
    Alpha,
    /// Spin down.
    Beta,
}

/// A Slater determinant over at most [`MAX_ORBITALS`] active orbitals.
#[derive(Clone, Copy)]
pub struct BitDeterminant {
    pub(crate) alfa: SpinString,
    pub(crate) beta: SpinString,
    size: usize,
}

impl std::fmt::Debug for BitDeterminant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BitDeterminant")
            .field("size", &self.size)
            .field("occupation", &self.to_string())
            .finish()
    }
}

impl BitDeterminant {
    /// Create an empty determinant over `size` orbitals.
    pub fn new(size: usize) -> Result<Self> {
        if size > MAX_ORBITALS {
            return Err(Error::CapacityExceeded {
                requested: size,
                capacity: MAX_ORBITALS,
            });
        }
        Ok(Self {
            alfa: SpinString::zero(),
            beta: SpinString::zero(),
            size,
        })
    }

    /// Create a determinant from a combined occupation vector `[alfa(n), beta(n)]`.
    pub fn from_occupation(occupation: &[bool]) -> Result<Self> {
        if occupation.len() % 2 != 0 {
            return Err(Error::InvalidOccupationLength(occupation.len()));
        }
        let (alfa, beta) = occupation.split_at(occupation.len() / 2);
        Self::from_alfa_beta(alfa, beta)
    }

    /// Create a determinant from separate alpha and beta occupation vectors.
    pub fn from_alfa_beta(alfa: &[bool], beta: &[bool]) -> Result<Self> {
        if alfa.len() != beta.len() {
            return Err(Error::SizeMismatch {
                left: alfa.len(),
                right: beta.len(),
            });
        }
        let mut det = Self::new(alfa.len())?;
        for (p, (&a, &b)) in alfa.iter().zip(beta).enumerate() {
            det.alfa.set(p, a);
            det.beta.set(p, b);
        }
        Ok(det)
    }

    /// Create a determinant from lists of occupied alpha and beta orbitals.
    pub fn from_occupied(size: usize, alfa_occ: &[usize], beta_occ: &[usize]) -> Result<Self> {
        let mut det = Self::new(size)?;
        for &p in alfa_occ {
            det.check(p)?;
            det.alfa.set(p, true);
        }
        for &p in beta_occ {
            det.check(p)?;
            det.beta.set(p, true);
        }
        Ok(det)
    }

    /// Create a determinant from raw alpha/beta words.
    ///
    /// Fails if any bit at or above `size` is set.
    pub fn from_words(alfa: [u64; WORDS], beta: [u64; WORDS], size: usize) -> Result<Self> {
        let mut det = Self::new(size)?;
        det.alfa = SpinString::from_words(alfa);
        det.beta = SpinString::from_words(beta);
        let active = SpinString::mask(size);
        if !det.alfa.and_not(&active).is_empty() || !det.beta.and_not(&active).is_empty() {
            return Err(Error::StrayBits { size });
        }
        Ok(det)
    }

    /// Number of active orbitals.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The alpha occupation string.
    pub fn alfa(&self) -> &SpinString {
        &self.alfa
    }

    /// The beta occupation string.
    pub fn beta(&self) -> &SpinString {
        &self.beta
    }

    #[inline]
    pub(crate) fn check(&self, n: usize) -> Result<()> {
        if n >= self.size {
            return Err(Error::IndexOutOfRange {
                index: n,
                size: self.size,
            });
        }
        Ok(())
    }

    #[inline]
    pub(crate) fn check_size(&self, other: &Self) -> Result<()> {
        if self.size != other.size {
            return Err(Error::SizeMismatch {
                left: self.size,
                right: other.size,
            });
        }
        Ok(())
    }

    /// Return the value of alpha bit `n`.
    pub fn get_alfa_bit(&self, n: usize) -> Result<bool> {
        self.check(n)?;
        Ok(self.alfa.get(n))
    }

    /// Return the value of beta bit `n`.
    pub fn get_beta_bit(&self, n: usize) -> Result<bool> {
        self.check(n)?;
        Ok(self.beta.get(n))
    }

    /// Set the value of alpha bit `n`.
    pub fn set_alfa_bit(&mut self, n: usize, value: bool) -> Result<()> {
        self.check(n)?;
        self.alfa.set(n, value);
        Ok(())
    }

    /// Set the value of beta bit `n`.
    pub fn set_beta_bit(&mut self, n: usize, value: bool) -> Result<()> {
        self.check(n)?;
        self.beta.set(n, value);
        Ok(())
    }

    /// Number of alpha electrons.
    pub fn count_alfa(&self) -> usize {
        self.alfa.and(&SpinString::mask(self.size)).count()
    }

    /// Number of beta electrons.
    pub fn count_beta(&self) -> usize {
        self.beta.and(&SpinString::mask(self.size)).count()
    }

    /// Occupied alpha orbitals in ascending order.
    pub fn get_alfa_occ(&self) -> Vec<usize> {
        self.alfa.ones().collect()
    }

    /// Occupied beta orbitals in ascending order.
    pub fn get_beta_occ(&self) -> Vec<usize> {
        self.beta.ones().collect()
    }

    /// Empty alpha orbitals in ascending order.
    pub fn get_alfa_vir(&self) -> Vec<usize> {
        SpinString::mask(self.size).and_not(&self.alfa).ones().collect()
    }

    /// Empty beta orbitals in ascending order.
    pub fn get_beta_vir(&self) -> Vec<usize> {
        SpinString::mask(self.size).and_not(&self.beta).ones().collect()
    }

    /// Swap the alpha and beta occupations.
    pub fn spin_flip(&mut self) {
        std::mem::swap(&mut self.alfa, &mut self.beta);
    }

    /// Remove every electron of the given spin.
    pub fn zero_spin(&mut self, spin: SpinType) {
        match spin {
            SpinType::Alpha => self.alfa = SpinString::zero(),
            SpinType::Beta => self.beta = SpinString::zero(),
        }
    }

    /// Alpha and beta excitation levels separating `self` from `other`.
    ///
    /// Each level is half the number of orbitals whose occupation differs
    /// in that spin channel. When the electron counts of a channel differ,
    /// the odd leftover orbital is not counted, so `(0, 0)` alone does not
    /// mean the determinants are equal.
    pub fn excitation_level(&self, other: &Self) -> Result<(usize, usize)> {
        self.check_size(other)?;
        let na = self.alfa.xor(&other.alfa).count() / 2;
        let nb = self.beta.xor(&other.beta).count() / 2;
        Ok((na, nb))
    }

    /// Render as `|1100|1010>`: the alpha string then the beta string.
    pub fn to_bit_string(&self) -> String {
        let mut s = String::with_capacity(2 * self.size + 3);
        s.push('|');
        for p in 0..self.size {
            s.push(if self.alfa.get(p) { '1' } else { '0' });
        }
        s.push('|');
        for p in 0..self.size {
            s.push(if self.beta.get(p) { '1' } else { '0' });
        }
        s.push('>');
        s
    }

    /// Compare scanning alpha bits before beta bits.
    ///
    /// Companion to the `Ord` impl, which scans beta first. Within a
    /// channel the highest differing orbital decides and the determinant
    /// holding the electron there ranks less.
    pub fn cmp_alfa_first(&self, other: &Self) -> Ordering {
        decide(&self.alfa, &other.alfa).then_with(|| decide(&self.beta, &other.beta))
    }
}

fn decide(lhs: &SpinString, rhs: &SpinString) -> Ordering {
    match lhs.highest_difference(rhs) {
        Some(p) if lhs.get(p) => Ordering::Less,
        Some(_) => Ordering::Greater,
        None => Ordering::Equal,
    }
}

impl std::fmt::Display for BitDeterminant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "|")?;
        for p in 0..self.size {
            let c = match (self.alfa.get(p), self.beta.get(p)) {
                (true, true) => '2',
                (true, false) => '+',
                (false, true) => '-',
                (false, false) => '0',
            };
            write!(f, "{c}")?;
        }
        write!(f, ">")
    }
}

impl PartialEq for BitDeterminant {
    fn eq(&self, other: &Self) -> bool {
        self.alfa == other.alfa && self.beta == other.beta
    }
}

impl Eq for BitDeterminant {}

impl Hash for BitDeterminant {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.alfa.hash(state);
        self.beta.hash(state);
    }
}

impl Ord for BitDeterminant {
    fn cmp(&self, other: &Self) -> Ordering {
        decide(&self.beta, &other.beta).then_with(|| decide(&self.alfa, &other.alfa))
    }
}

impl PartialOrd for BitDeterminant {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
