//! Fixed-capacity occupation string for a single spin channel.
//!
//! A `SpinString` is the implicit (index-free) bit vector of the succinct
//! literature specialised to a compile-time capacity: the raw words and
//! nothing else. Rank queries are answered by whole-word population counts
//! plus one masked partial word, which is all a 128-bit string needs.
//!
//! # Layout
//!
//! Orbital `n` lives in word `n / 64`, bit `n % 64`. Bits at or above the
//! owning determinant's `size` are kept zero by every caller.

/// Maximum number of orbitals per spin channel.
pub const MAX_ORBITALS: usize = 128;

/// Number of 64-bit words backing one spin channel.
pub const WORDS: usize = MAX_ORBITALS / 64;

/// Occupation bits of one spin channel.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SpinString {
    words: [u64; WORDS],
}

impl std::fmt::Debug for SpinString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpinString")
            .field("ones", &self.count())
            .field("words", &self.words)
            .finish()
    }
}

impl SpinString {
    /// An empty string.
    pub const fn zero() -> Self {
        Self { words: [0; WORDS] }
    }

    /// Wrap raw words.
    pub const fn from_words(words: [u64; WORDS]) -> Self {
        Self { words }
    }

    /// A string with bits `[0, size)` set. `size` is clamped to the capacity.
    pub fn mask(size: usize) -> Self {
        let size = size.min(MAX_ORBITALS);
        let mut words = [0u64; WORDS];
        for (w, word) in words.iter_mut().enumerate() {
            let lo = w * 64;
            if size >= lo + 64 {
                *word = !0u64;
            } else if size > lo {
                *word = (1u64 << (size - lo)) - 1;
            }
        }
        Self { words }
    }

    /// The raw words.
    pub fn words(&self) -> [u64; WORDS] {
        self.words
    }

    /// Return true if bit `n` is set.
    ///
    /// # Panics
    ///
    /// Panics if `n >= MAX_ORBITALS`. [`crate::BitDeterminant`] accessors
    /// check against the determinant's size and return an error instead.
    #[inline]
    pub fn get(&self, n: usize) -> bool {
        assert!(n < MAX_ORBITALS, "orbital {n} out of range");
        (self.words[n / 64] >> (n % 64)) & 1 == 1
    }

    /// Set bit `n` to `value`.
    ///
    /// # Panics
    ///
    /// Panics if `n >= MAX_ORBITALS`.
    #[inline]
    pub fn set(&mut self, n: usize, value: bool) {
        assert!(n < MAX_ORBITALS, "orbital {n} out of range");
        let bit = 1u64 << (n % 64);
        if value {
            self.words[n / 64] |= bit;
        } else {
            self.words[n / 64] &= !bit;
        }
    }

    /// Flip bit `n`.
    ///
    /// # Panics
    ///
    /// Panics if `n >= MAX_ORBITALS`.
    #[inline]
    pub fn toggle(&mut self, n: usize) {
        assert!(n < MAX_ORBITALS, "orbital {n} out of range");
        self.words[n / 64] ^= 1u64 << (n % 64);
    }

    /// Number of set bits.
    #[inline]
    pub fn count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Return true if no bit is set.
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Number of set bits in `[0, n)`.
    #[inline]
    pub fn rank1(&self, n: usize) -> usize {
        let n = n.min(MAX_ORBITALS);
        let full_words = n / 64;
        let mut count = 0;
        for j in 0..full_words {
            count += self.words[j].count_ones() as usize;
        }
        let bit_offset = n % 64;
        if bit_offset > 0 {
            let mask = (1u64 << bit_offset) - 1;
            count += (self.words[full_words] & mask).count_ones() as usize;
        }
        count
    }

    /// Number of set bits strictly between `n` and `m`, in either order.
    #[inline]
    pub fn count_between(&self, n: usize, m: usize) -> usize {
        let (lo, hi) = if n < m { (n, m) } else { (m, n) };
        if hi <= lo + 1 {
            return 0;
        }
        self.rank1(hi) - self.rank1(lo + 1)
    }

    /// Bitwise AND.
    pub fn and(&self, other: &Self) -> Self {
        self.zip_with(other, |a, b| a & b)
    }

    /// Bitwise OR.
    pub fn or(&self, other: &Self) -> Self {
        self.zip_with(other, |a, b| a | b)
    }

    /// Bitwise XOR.
    pub fn xor(&self, other: &Self) -> Self {
        self.zip_with(other, |a, b| a ^ b)
    }

    /// Bits set in `self` but not in `other`.
    pub fn and_not(&self, other: &Self) -> Self {
        self.zip_with(other, |a, b| a & !b)
    }

    fn zip_with(&self, other: &Self, f: impl Fn(u64, u64) -> u64) -> Self {
        let mut words = [0u64; WORDS];
        for (w, word) in words.iter_mut().enumerate() {
            *word = f(self.words[w], other.words[w]);
        }
        Self { words }
    }

    /// Highest bit index at which `self` and `other` differ.
    pub fn highest_difference(&self, other: &Self) -> Option<usize> {
        for w in (0..WORDS).rev() {
            let diff = self.words[w] ^ other.words[w];
            if diff != 0 {
                return Some(w * 64 + 63 - diff.leading_zeros() as usize);
            }
        }
        None
    }

    /// Iterate over set-bit positions in ascending order.
    pub fn ones(&self) -> Ones {
        Ones {
            words: self.words,
            word_idx: 0,
        }
    }
}

/// Ascending iterator over the set bits of a [`SpinString`].
#[derive(Debug, Clone)]
pub struct Ones {
    words: [u64; WORDS],
    word_idx: usize,
}

impl Iterator for Ones {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        while self.word_idx < WORDS {
            let word = &mut self.words[self.word_idx];
            if *word != 0 {
                let bit = word.trailing_zeros() as usize;
                *word &= *word - 1;
                return Some(self.word_idx * 64 + bit);
            }
            self.word_idx += 1;
        }
        None
    }
}
