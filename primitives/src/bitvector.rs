use ark_bn254::Fr;
use ark_std::{One, Zero};

use crate::{
    errors::KzgError,
    polynomial::PolynomialEvalForm,
};

// Need to explicitly import alloc because we are in a no-std environment.
extern crate alloc;
use alloc::vec::Vec;

/// A bit vector laid out as one advice column: entry `i` is the value of the
/// column at row `i`, i.e. at the point ω^i of the evaluation domain.
///
/// The length is fixed at construction and must be a non-zero power of two.
/// Entries are deliberately not checked against {0, 1} here: that is what the
/// boolean constraint proves, and a vector with a non-bit entry must be
/// rejected by the prover rather than by this constructor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitVector {
    entries: Vec<Fr>,
}

impl BitVector {
    /// Creates a new `BitVector` from field elements.
    pub fn new(entries: Vec<Fr>) -> Result<Self, KzgError> {
        if entries.is_empty() || !entries.len().is_power_of_two() {
            return Err(KzgError::InvalidVectorLength(entries.len()));
        }
        Ok(BitVector { entries })
    }

    /// Creates a new `BitVector` from booleans. The number of bits must be a
    /// power of two; use [`BitVector::from_bits_padded`] otherwise.
    pub fn from_bits(bits: &[bool]) -> Result<Self, KzgError> {
        Self::new(bits.iter().map(|&b| bool_to_fr(b)).collect())
    }

    /// Creates a new `BitVector` from booleans, appending zero bits up to the
    /// next power of two. Padding rows are ordinary zero entries of the
    /// column and can be opened like any other row.
    pub fn from_bits_padded(bits: &[bool]) -> Result<Self, KzgError> {
        let mut entries: Vec<Fr> = bits.iter().map(|&b| bool_to_fr(b)).collect();
        let padded_len = entries.len().max(1).next_power_of_two();
        entries.resize(padded_len, Fr::zero());
        Self::new(entries)
    }

    /// Returns the entries of the vector.
    pub fn entries(&self) -> &[Fr] {
        &self.entries
    }

    pub fn get(&self, i: usize) -> Option<&Fr> {
        self.entries.get(i)
    }

    /// Returns the length of the vector, which is also the domain size.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false` for a constructed vector; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Position of the first entry that is neither 0 nor 1.
    pub fn first_non_bit(&self) -> Option<usize> {
        first_non_bit(&self.entries)
    }

    /// Convert the vector to a [PolynomialEvalForm] over the domain of the
    /// same size.
    pub fn to_polynomial_eval_form(&self) -> Result<PolynomialEvalForm, KzgError> {
        Ok(PolynomialEvalForm::new(self.entries.clone())?)
    }
}

impl TryFrom<Vec<Fr>> for BitVector {
    type Error = KzgError;

    fn try_from(entries: Vec<Fr>) -> Result<Self, Self::Error> {
        Self::new(entries)
    }
}

impl From<BitVector> for Vec<Fr> {
    fn from(bits: BitVector) -> Self {
        bits.entries
    }
}

pub(crate) fn first_non_bit(values: &[Fr]) -> Option<usize> {
    values.iter().position(|v| !v.is_zero() && !v.is_one())
}

fn bool_to_fr(bit: bool) -> Fr {
    if bit {
        Fr::one()
    } else {
        Fr::zero()
    }
}
