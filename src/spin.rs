//! Spin algebra over determinants.
//!
//! Uses the decomposition
//!
//! ```text
//! S^2 = S- S+ + Sz (Sz + 1)
//!     = Sz (Sz + 1) + N_beta - N_pair - sum_{p != q} a+(q,a) a+(p,b) a-(q,b) a-(p,a)
//! ```
//!
//! so S² couples a determinant only to itself and to determinants that
//! differ by exchanging the spins of two open-shell electrons.

use crate::determinant::BitDeterminant;
use crate::error::Result;
use crate::sign::parity;

impl BitDeterminant {
    /// Spin projection `(n_alpha - n_beta) / 2`.
    pub fn spin_z(&self) -> f64 {
        0.5 * (self.count_alfa() as f64 - self.count_beta() as f64)
    }

    /// Number of doubly occupied orbitals.
    pub fn npair(&self) -> usize {
        self.alfa.and(&self.beta).count()
    }

    /// Matrix element `<self|S^2|other>`.
    ///
    /// Zero unless both determinants hold the same number of alpha and of
    /// beta electrons. Fails with [`crate::Error::SizeMismatch`] if the
    /// determinants span different numbers of orbitals.
    pub fn spin2(&self, other: &Self) -> Result<f64> {
        let (nadiff, nbdiff) = self.excitation_level(other)?;
        if self.count_alfa() != other.count_alfa() || self.count_beta() != other.count_beta() {
            return Ok(0.0);
        }

        if nadiff == 0 && nbdiff == 0 {
            let ms = self.spin_z();
            let nb = self.count_beta() as f64;
            let npair = self.npair() as f64;
            return Ok(ms * (ms + 1.0) + nb - npair);
        }

        if nadiff == 1 && nbdiff == 1 {
            // i: alpha in other, beta in self. j: beta in other, alpha in self.
            let i_mask = other
                .alfa
                .and(&self.beta)
                .and_not(&other.beta)
                .and_not(&self.alfa);
            let j_mask = other
                .beta
                .and(&self.alfa)
                .and_not(&other.alfa)
                .and_not(&self.beta);
            if i_mask.count() == 1 && j_mask.count() == 1 {
                if let (Some(i), Some(j)) = (i_mask.ones().next(), j_mask.ones().next()) {
                    let sign = parity(other.alfa.rank1(i))
                        * parity(other.beta.rank1(j))
                        * parity(self.alfa.rank1(j))
                        * parity(self.beta.rank1(i));
                    return Ok(-sign);
                }
            }
        }

        Ok(0.0)
    }

    /// Apply `S+` and return every resulting determinant with its sign.
    ///
    /// One entry per beta-only orbital `i`, with the electron at `i` flipped
    /// to alpha and sign `sign_a(i) * sign_b(i)`.
    pub fn spin_plus(&self) -> Vec<(BitDeterminant, f64)> {
        self.beta
            .and_not(&self.alfa)
            .ones()
            .map(|i| {
                let sign = parity(self.alfa.rank1(i)) * parity(self.beta.rank1(i));
                let mut det = *self;
                det.alfa.set(i, true);
                det.beta.set(i, false);
                (det, sign)
            })
            .collect()
    }

    /// Apply `S-` and return every resulting determinant with its sign.
    ///
    /// One entry per alpha-only orbital `i`, with the electron at `i` flipped
    /// to beta and sign `sign_a(i) * sign_b(i)`.
    pub fn spin_minus(&self) -> Vec<(BitDeterminant, f64)> {
        self.alfa
            .and_not(&self.beta)
            .ones()
            .map(|i| {
                let sign = parity(self.alfa.rank1(i)) * parity(self.beta.rank1(i));
                let mut det = *self;
                det.alfa.set(i, false);
                det.beta.set(i, true);
                (det, sign)
            })
            .collect()
    }
}
