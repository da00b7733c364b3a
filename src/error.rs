//! Error types for determinant construction and manipulation.

use thiserror::Error;

/// Error variants for determinant operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// An orbital index was provided that is outside the active range.
    #[error("index out of range: orbital {index} with {size} active orbitals")]
    IndexOutOfRange {
        /// The offending orbital index.
        index: usize,
        /// Number of active orbitals of the determinant.
        size: usize,
    },

    /// A determinant was requested with more orbitals than the storage holds.
    #[error("capacity exceeded: {requested} orbitals requested, capacity is {capacity}")]
    CapacityExceeded {
        /// Requested number of active orbitals.
        requested: usize,
        /// Compile-time capacity per spin channel.
        capacity: usize,
    },

    /// Two determinants (or two occupation vectors) disagree on the active orbital count.
    #[error("incompatible determinant size: {left} vs {right}")]
    SizeMismatch {
        /// Size of the left operand.
        left: usize,
        /// Size of the right operand.
        right: usize,
    },

    /// A combined `[alpha, beta]` occupation vector had odd length.
    #[error("invalid occupation length: {0} is not even")]
    InvalidOccupationLength(usize),

    /// A raw bit pattern had bits set outside the active range.
    #[error("stray bits set at or above orbital {size}")]
    StrayBits {
        /// Number of active orbitals the pattern was declared with.
        size: usize,
    },
}

/// A specialized Result type for determinant operations.
pub type Result<T> = std::result::Result<T, Error>;
