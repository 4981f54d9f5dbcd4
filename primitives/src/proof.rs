use ark_bn254::{Fr, G1Affine};
use ark_std::{One, Zero};
use serde::{Deserialize, Serialize};

extern crate alloc;
use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::ToString;
use alloc::vec::Vec;

use crate::{
    consts::{
        BYTES_PER_FIELD_ELEMENT, CURVE_ID_BN254, INDEXED_OPENING_SIZE, MAX_DOMAIN_LOG_SIZE,
        PROOF_FIXED_SIZE, SIZE_OF_G1_AFFINE_COMPRESSED,
    },
    errors::KzgError,
    traits::{ReadFrFromBytes, ReadPointFromBytes, WritePointToBytes},
};

/// Proof that a committed polynomial evaluates to `value` at `point`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpeningProof {
    pub point: Fr,
    pub value: Fr,
    /// Commitment to (p(X) - value) / (X - point).
    pub quotient_commitment: G1Affine,
}

/// One proof for the evaluations of several polynomials at a common set of
/// points. `values[j][i]` is the value of polynomial `j` at `points[i]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOpeningProof {
    pub points: Vec<Fr>,
    pub values: Vec<Vec<Fr>>,
    pub quotient_commitment: G1Affine,
}

/// Proof that every row of the committed advice column is a bit.
///
/// Carries the commitment to Q(X) = B(X)·(B(X) - 1) / Z_H(X), the evaluations
/// b = B(ζ) and q = Q(ζ), and the batched opening of B and Q at ζ.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintProof {
    pub quotient_commitment: G1Affine,
    pub advice_eval: Fr,
    pub quotient_eval: Fr,
    pub opening: G1Affine,
}

/// Opening of the advice column at row `index`, i.e. at ω^index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedOpening {
    pub index: usize,
    pub value: Fr,
    pub proof: G1Affine,
}

/// Everything the verifier needs besides the SRS and the claims.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitVectorProof {
    pub domain_size: usize,
    pub commitment: G1Affine,
    pub constraint: ConstraintProof,
    /// Sorted by strictly increasing index.
    pub openings: Vec<IndexedOpening>,
}

impl BitVectorProof {
    /// Encodes the proof:
    ///
    /// ```text
    /// curve id (1) | domain size (u64) | commitment (G1) |
    /// quotient commitment (G1) | constraint opening (G1) |
    /// advice eval (Fr) | quotient eval (Fr) |
    /// opening count (u64) | count × { index (u64) | value (Fr) | proof (G1) }
    /// ```
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out =
            Vec::with_capacity(PROOF_FIXED_SIZE + self.openings.len() * INDEXED_OPENING_SIZE);
        out.push(CURVE_ID_BN254);
        out.extend_from_slice(&(self.domain_size as u64).to_be_bytes());
        out.extend_from_slice(&self.commitment.write_point_to_bytes_compressed());
        out.extend_from_slice(
            &self
                .constraint
                .quotient_commitment
                .write_point_to_bytes_compressed(),
        );
        out.extend_from_slice(&self.constraint.opening.write_point_to_bytes_compressed());
        out.extend_from_slice(&self.constraint.advice_eval.to_bytes_be());
        out.extend_from_slice(&self.constraint.quotient_eval.to_bytes_be());
        out.extend_from_slice(&(self.openings.len() as u64).to_be_bytes());
        for opening in &self.openings {
            out.extend_from_slice(&(opening.index as u64).to_be_bytes());
            out.extend_from_slice(&opening.value.to_bytes_be());
            out.extend_from_slice(&opening.proof.write_point_to_bytes_compressed());
        }
        out
    }

    /// Decodes and structurally validates a proof. Any malformed input fails
    /// with [KzgError::DeserializationError]; whether the proof verifies is
    /// not checked here.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KzgError> {
        if bytes.len() < PROOF_FIXED_SIZE {
            return Err(KzgError::DeserializationError(format!(
                "proof is {} bytes, at least {} expected",
                bytes.len(),
                PROOF_FIXED_SIZE
            )));
        }
        let mut reader = ByteReader::new(bytes);

        let curve_id = reader.take(1)?[0];
        if curve_id != CURVE_ID_BN254 {
            return Err(KzgError::DeserializationError(format!(
                "unsupported curve id {curve_id:#04x}"
            )));
        }

        let domain_size = reader.read_u64()?;
        if domain_size == 0
            || !domain_size.is_power_of_two()
            || domain_size.trailing_zeros() > MAX_DOMAIN_LOG_SIZE
        {
            return Err(KzgError::DeserializationError(format!(
                "invalid domain size {domain_size}"
            )));
        }
        let domain_size = domain_size as usize;

        let commitment = reader.read_g1()?;
        let quotient_commitment = reader.read_g1()?;
        let opening = reader.read_g1()?;
        let advice_eval = reader.read_fr()?;
        let quotient_eval = reader.read_fr()?;

        let count = reader.read_u64()?;
        if count > domain_size as u64 {
            return Err(KzgError::DeserializationError(format!(
                "{count} openings for a domain of size {domain_size}"
            )));
        }
        let count = count as usize;
        if reader.remaining() != count * INDEXED_OPENING_SIZE {
            return Err(KzgError::DeserializationError(format!(
                "{} bytes of openings, {} expected",
                reader.remaining(),
                count * INDEXED_OPENING_SIZE
            )));
        }

        let mut openings: Vec<IndexedOpening> = Vec::with_capacity(count);
        for _ in 0..count {
            let index = reader.read_u64()?;
            if index >= domain_size as u64 {
                return Err(KzgError::DeserializationError(format!(
                    "opening index {index} outside a domain of size {domain_size}"
                )));
            }
            let index = index as usize;
            if let Some(previous) = openings.last() {
                if index <= previous.index {
                    return Err(KzgError::DeserializationError(
                        "opening indices are not strictly increasing".to_string(),
                    ));
                }
            }
            let value = reader.read_fr()?;
            let proof = reader.read_g1()?;
            openings.push(IndexedOpening { index, value, proof });
        }

        Ok(Self {
            domain_size,
            commitment,
            constraint: ConstraintProof {
                quotient_commitment,
                advice_eval,
                quotient_eval,
                opening,
            },
            openings,
        })
    }

    /// Value opened at `index`, if the proof opens it.
    pub fn opened_value(&self, index: usize) -> Option<&Fr> {
        self.openings
            .binary_search_by_key(&index, |o| o.index)
            .ok()
            .map(|pos| &self.openings[pos].value)
    }

    /// The openings read as bits, or `None` if some opened value is not a bit.
    pub fn opened_bits(&self) -> Option<Claims> {
        self.openings
            .iter()
            .map(|o| fr_to_bit(&o.value).map(|bit| (o.index, bit)))
            .collect()
    }
}

/// Positions of the bit vector and the bits the verifier expects there.
///
/// This is the public data handed over by the outer protocol, hence the serde
/// derive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Claims(BTreeMap<usize, bool>);

impl Claims {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn insert(&mut self, index: usize, bit: bool) -> Option<bool> {
        self.0.insert(index, bit)
    }

    pub fn get(&self, index: usize) -> Option<bool> {
        self.0.get(&index).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates by increasing index.
    pub fn iter(&self) -> impl Iterator<Item = (usize, bool)> + '_ {
        self.0.iter().map(|(index, bit)| (*index, *bit))
    }
}

impl From<BTreeMap<usize, bool>> for Claims {
    fn from(map: BTreeMap<usize, bool>) -> Self {
        Self(map)
    }
}

impl FromIterator<(usize, bool)> for Claims {
    fn from_iter<T: IntoIterator<Item = (usize, bool)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// `Some(bit)` if `value` is 0 or 1.
pub fn fr_to_bit(value: &Fr) -> Option<bool> {
    if value.is_zero() {
        Some(false)
    } else if value.is_one() {
        Some(true)
    } else {
        None
    }
}

struct ByteReader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> ByteReader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    fn remaining(&self) -> usize {
        self.bytes.len() - self.offset
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], KzgError> {
        let chunk = self
            .bytes
            .get(self.offset..self.offset + len)
            .ok_or(KzgError::DeserializationError("unexpected end of proof".to_string()))?;
        self.offset += len;
        Ok(chunk)
    }

    fn read_u64(&mut self) -> Result<u64, KzgError> {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(self.take(8)?);
        Ok(u64::from_be_bytes(buf))
    }

    fn read_g1(&mut self) -> Result<G1Affine, KzgError> {
        G1Affine::read_point_from_bytes_compressed(self.take(SIZE_OF_G1_AFFINE_COMPRESSED)?)
            .map_err(|e| KzgError::DeserializationError(format!("invalid g1 point: {e}")))
    }

    fn read_fr(&mut self) -> Result<Fr, KzgError> {
        Fr::deserialize_from_bytes_be(self.take(BYTES_PER_FIELD_ELEMENT)?)
            .map_err(|e| KzgError::DeserializationError(format!("invalid scalar: {e}")))
    }
}
