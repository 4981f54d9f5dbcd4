use ark_bn254::Fr;
use ark_poly::{EvaluationDomain, Radix2EvaluationDomain};

extern crate alloc;
use alloc::vec::Vec;

use crate::{consts::MAX_DOMAIN_LOG_SIZE, errors::PolynomialError};

/// Multiplicative subgroup H = {1, ω, ω², ..., ω^(n-1)} of the bn254 scalar
/// field, used as the rows of the advice column.
///
/// A [Domain] is immutable once built. It is cheap to clone and safe to share
/// by reference between any number of proving and verifying sessions.
#[derive(Debug, Clone, PartialEq)]
pub struct Domain {
    inner: Radix2EvaluationDomain<Fr>,
    /// ω^i for i in 0..n, cached so that index lookups do not exponentiate.
    expanded_roots_of_unity: Vec<Fr>,
}

impl Domain {
    /// Builds the domain of exactly `size` points. `size` must be a power of
    /// two between 1 and 2^28.
    pub fn new(size: usize) -> Result<Self, PolynomialError> {
        if size == 0 || !size.is_power_of_two() || size.trailing_zeros() > MAX_DOMAIN_LOG_SIZE {
            return Err(PolynomialError::InvalidDomainSize(size));
        }
        let inner = Radix2EvaluationDomain::<Fr>::new(size)
            .ok_or(PolynomialError::InvalidDomainSize(size))?;
        // Radix2EvaluationDomain rounds up, so a mismatch means the request was rejected.
        if inner.size() != size {
            return Err(PolynomialError::InvalidDomainSize(size));
        }
        let expanded_roots_of_unity = inner.elements().collect();
        Ok(Self {
            inner,
            expanded_roots_of_unity,
        })
    }

    pub fn size(&self) -> usize {
        self.expanded_roots_of_unity.len()
    }

    /// Returns ω^i, or `None` when `i` is not a row of the domain.
    pub fn element(&self, i: usize) -> Option<&Fr> {
        self.expanded_roots_of_unity.get(i)
    }

    pub fn elements(&self) -> &[Fr] {
        &self.expanded_roots_of_unity
    }

    /// Returns the row whose point equals `z`, if any.
    pub fn index_of(&self, z: &Fr) -> Option<usize> {
        self.expanded_roots_of_unity.iter().position(|w| w == z)
    }

    /// Z_H(z) = z^n - 1.
    pub fn evaluate_vanishing_polynomial(&self, z: &Fr) -> Fr {
        self.inner.evaluate_vanishing_polynomial(*z)
    }

    /// Coefficients to evaluations over the domain. Shorter inputs are
    /// zero-padded; longer inputs are rejected.
    pub fn fft(&self, coeffs: &[Fr]) -> Result<Vec<Fr>, PolynomialError> {
        if coeffs.len() > self.size() {
            return Err(PolynomialError::FFTError(alloc::format!(
                "{} coefficients do not fit a domain of size {}",
                coeffs.len(),
                self.size()
            )));
        }
        Ok(self.inner.fft(coeffs))
    }

    /// Evaluations over the domain to coefficients.
    pub fn ifft(&self, evals: &[Fr]) -> Result<Vec<Fr>, PolynomialError> {
        if evals.len() != self.size() {
            return Err(PolynomialError::LengthMismatch {
                expected: self.size(),
                actual: evals.len(),
            });
        }
        Ok(self.inner.ifft(evals))
    }

    /// The underlying arkworks domain, used for IFFTs over group elements.
    pub fn radix2(&self) -> &Radix2EvaluationDomain<Fr> {
        &self.inner
    }
}
