use ark_bn254::{Bn254, Fr, G1Affine, G1Projective, G2Affine, G2Projective};
use ark_ec::{pairing::Pairing, AffineRepr, CurveGroup, VariableBaseMSM};
use ark_ff::{Field, PrimeField};
use ark_std::{One, Zero};

extern crate alloc;
use alloc::string::ToString;
use alloc::vec::Vec;
use sha2::{Digest, Sha256};

use crate::{domain::Domain, errors::KzgError, polynomial::PolynomialEvalForm};

/// Computes powers of a field element up to a given exponent.
/// Ref: https://github.com/ethereum/consensus-specs/blob/master/specs/deneb/polynomial-commitments.md#compute_powers
///
/// For a given field element x, computes [1, x, x², x³, ..., x^(count-1)]
///
/// # Arguments
/// * `base` - The field element to compute powers of
/// * `count` - The number of powers to compute (0 to count-1)
///
/// # Returns
/// * Vector of field elements containing powers: [x⁰, x¹, x², ..., x^(count-1)]
pub fn compute_powers(base: &Fr, count: usize) -> Vec<Fr> {
    let mut powers = Vec::with_capacity(count);
    let mut current = Fr::one();
    for _ in 0..count {
        powers.push(current);
        current *= base;
    }
    powers
}

/// Computes a linear combination of G1 points weighted by scalar coefficients.
///
/// Given points P₁, P₂, ..., Pₙ and scalars s₁, s₂, ..., sₙ
/// Computes: s₁P₁ + s₂P₂ + ... + sₙPₙ
/// Uses Multi-Scalar Multiplication (MSM) for efficient computation.
///
/// # Arguments
/// * `points` - Array of G1 points in affine form
/// * `scalars` - Array of field elements as scalar weights
///
/// # Returns
/// * Single G1 point in affine form representing the linear combination
pub fn g1_lincomb(points: &[G1Affine], scalars: &[Fr]) -> Result<G1Affine, KzgError> {
    let lincomb =
        G1Projective::msm(points, scalars).map_err(|e| KzgError::MsmError(e.to_string()))?;
    Ok(lincomb.into_affine())
}

/// Same as [g1_lincomb] over G2. Used to commit to vanishing polynomials of
/// opening point sets.
pub fn g2_lincomb(points: &[G2Affine], scalars: &[Fr]) -> Result<G2Affine, KzgError> {
    let lincomb =
        G2Projective::msm(points, scalars).map_err(|e| KzgError::MsmError(e.to_string()))?;
    Ok(lincomb.into_affine())
}

/// Maps a byte slice to a field element (`Fr`) using SHA-256 as the hash
/// function.
pub fn hash_to_field_element(msg: &[u8]) -> Fr {
    let msg_digest = Sha256::digest(msg);
    Fr::from_be_bytes_mod_order(msg_digest.as_slice())
}

/// Checks e(a1, a2) == e(b1, b2) with a single multi-pairing.
pub fn pairings_verify(a1: G1Affine, a2: G2Affine, b1: G1Affine, b2: G2Affine) -> bool {
    let neg_b1 = -b1;
    let p = [a1, neg_b1];
    let q = [a2, b2];
    let result = Bn254::multi_pairing(p, q);
    result.is_zero()
}

/// Ref: https://github.com/ethereum/consensus-specs/blob/master/specs/deneb/polynomial-commitments.md#evaluate_polynomial_in_evaluation_form
///
/// Evaluates a polynomial given by its evaluations over `domain` at an
/// arbitrary point `z` with the barycentric formula
/// f(z) = (z^n - 1)/n · Σ f_i·ω^i/(z - ω^i).
pub fn evaluate_polynomial_in_evaluation_form(
    polynomial: &PolynomialEvalForm,
    domain: &Domain,
    z: &Fr,
) -> Result<Fr, KzgError> {
    if polynomial.len() != domain.size() {
        return Err(KzgError::InvalidInput(alloc::format!(
            "polynomial has {} evaluations but the domain has {} points",
            polynomial.len(),
            domain.size()
        )));
    }

    // If z is a row of the domain, the evaluation is stored directly.
    if let Some(index) = domain.index_of(z) {
        return polynomial.get_evaluation(index).copied().ok_or(KzgError::GenericError(
            "Polynomial element missing at the found index.".to_string(),
        ));
    }

    let width = polynomial.len();
    let inverse_width = Fr::from(width as u64)
        .inverse()
        .ok_or(KzgError::GenericError("domain size is not invertible".to_string()))?;

    let sum = polynomial
        .evaluations()
        .iter()
        .zip(domain.elements())
        .map(|(f_i, domain_i)| -> Result<Fr, KzgError> {
            let denominator = (*z - domain_i).inverse().ok_or(KzgError::GenericError(
                "Division by zero in barycentric evaluation: z equals domain element".to_string(),
            ))?;
            Ok(*f_i * domain_i * denominator)
        })
        .try_fold(Fr::zero(), |acc, term| term.map(|t| acc + t))?;

    let r = domain.evaluate_vanishing_polynomial(z);
    Ok(sum * r * inverse_width)
}

/// Converts a usize to a byte array in big-endian format always returning 8 bytes.
pub fn usize_to_be_bytes(number: usize) -> [u8; 8] {
    (number as u64).to_be_bytes()
}

/// Validates that a G1 point is on the BN254 curve and in the prime-order
/// subgroup.
///
/// The identity is accepted: the all-zero bit vector commits to it, and so do
/// the quotients of constant polynomials. The generator is accepted too, it is
/// the commitment to the all-one vector.
///
/// # Example
/// ```
/// use ark_bn254::G1Affine;
/// use ark_ff::UniformRand;
/// use bitvec_kzg_primitives::helpers::validate_g1_point;
///
/// let mut rng = ark_std::test_rng();
/// let valid_point = G1Affine::rand(&mut rng);
/// assert!(validate_g1_point(&valid_point).is_ok());
/// ```
pub fn validate_g1_point(point: &G1Affine) -> Result<(), KzgError> {
    if point.is_zero() {
        return Ok(());
    }

    if !point.is_on_curve() {
        return Err(KzgError::NotOnCurveError("G1 point not on curve".to_string()));
    }

    if !point.is_in_correct_subgroup_assuming_on_curve() {
        return Err(KzgError::NotOnCurveError(
            "G1 point not in correct subgroup".to_string(),
        ));
    }

    Ok(())
}

/// Validates that a G2 point is on the twisted BN254 curve and in the
/// prime-order subgroup. SRS points must also not be the identity.
pub fn validate_g2_point(point: &G2Affine) -> Result<(), KzgError> {
    if point.is_zero() {
        return Err(KzgError::NotOnCurveError(
            "G2 point cannot be point at infinity".to_string(),
        ));
    }

    if !point.is_on_curve() {
        return Err(KzgError::NotOnCurveError("G2 point not on curve".to_string()));
    }

    if !point.is_in_correct_subgroup_assuming_on_curve() {
        return Err(KzgError::NotOnCurveError(
            "G2 point not in correct subgroup".to_string(),
        ));
    }

    Ok(())
}
