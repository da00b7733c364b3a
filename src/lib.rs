//! # Bit-Packed Slater Determinants
//!
//! *Occupation bitstrings with exact fermionic sign bookkeeping.*
//!
//! ## Intuition First
//!
//! A Slater determinant over `n` orbitals is just two rows of light
//! switches: one row for spin-up (alpha) electrons, one for spin-down
//! (beta). Flipping a switch is creating or destroying an electron.
//! The catch is that electrons are fermions: every time an operator has
//! to "walk past" an occupied switch to reach its target, the amplitude
//! picks up a factor of `-1`. Getting that sign wrong silently produces
//! a different (unphysical) wavefunction.
//!
//! ## The Problem
//!
//! Configuration-interaction style methods build Hamiltonians over many
//! determinants and need, for each pair:
//! - **Occupation queries**: who is occupied, who is virtual.
//! - **Signs**: the parity of each creation/annihilation string.
//! - **Spin**: `Sz`, `S^2` matrix elements, and a basis that is closed
//!   under spin relabeling so that `S^2` eigenstates can be formed at all.
//!
//! ## Historical Context
//!
//! ```text
//! 1929  Slater      Determinantal wavefunctions for many-electron atoms
//! 1932  Fock        Occupation-number (second quantized) representation
//! 1984  Knowles     Determinant-based full CI with string addressing
//! 2016  Holmes      Heat-bath selected CI over hashed bitstring determinants
//! ```
//!
//! ## Mathematical Formulation
//!
//! For an occupation string `|n_0 n_1 ... n_{N-1}>`:
//!
//! - `a+(p) |...0_p...> = (-1)^{sum_{q<p} n_q} |...1_p...>`
//! - `a-(p) |...1_p...> = (-1)^{sum_{q<p} n_q} |...0_p...>`
//!
//! The exponent is a rank query: the number of set bits in `[0, p)`.
//! Alpha and beta strings are ordered alpha-first, so operators of
//! different spin never pick up a cross sign in the excitations here.
//!
//! ## What Could Go Wrong
//!
//! 1. **Order of evaluation**: a sign depends on the occupation at the
//!    moment its operator acts. Flipping bits first and counting later
//!    gives wrong answers for interleaved double excitations.
//! 2. **Mixed sizes**: equality and hashing ignore the active orbital
//!    count. Keep one `size` per working set.
//!
//! ## Implementation Notes
//!
//! This crate provides:
//! - **`SpinString`**: one spin channel, packed `u64` words with rank.
//! - **`BitDeterminant`**: paired storage, accessors, ordering and hashing.
//! - **Sign engine**: `create_*`, `destroy_*`, single and double excitations.
//! - **Spin algebra**: `spin_z`, `npair`, `spin2`, `spin_plus`, `spin_minus`.
//! - **Spin completion**: `enforce_spin_completeness` over a `Combinations` enumerator.
//!
//! ## References
//!
//! - Slater, J. C. (1929). "The Theory of Complex Spectra."
//! - Knowles, P. J., & Handy, N. C. (1984). "A new determinant-based full configuration interaction method."
//! - Helgaker, T., Jørgensen, P., & Olsen, J. (2000). "Molecular Electronic-Structure Theory", ch. 1-2.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod completion;
pub mod determinant;
pub mod error;
pub mod sign;
pub mod spin;
pub mod spin_string;

#[cfg(feature = "parallel")]
pub use completion::par_enforce_spin_completeness;
pub use completion::{enforce_spin_completeness, Combinations};
pub use determinant::{BitDeterminant, SpinType};
pub use error::{Error, Result};
pub use spin_string::{SpinString, MAX_ORBITALS};
