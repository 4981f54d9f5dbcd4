use ark_bn254::{Fr, G1Affine};
use ark_ec::CurveGroup;
use bitvec_kzg_primitives::{
    consts::{BYTES_PER_FIELD_ELEMENT, SIZE_OF_G1_AFFINE_COMPRESSED},
    errors::KzgError,
    helpers,
    proof::OpeningProof,
    srs::SRS,
    traits::{ReadFrFromBytes, ReadPointFromBytes},
};

extern crate alloc;
use alloc::format;

/// This function performs verification of a KZG opening: that the polynomial
/// committed to in `commitment` evaluates to `value` at `z`. It implements the
/// core KZG verification equation using bilinear pairings:
///
/// e(C - value·G1, G2) == e(π, τ·G2 - z·G2)
///
/// # Arguments
///
/// * `commitment` - A `G1Affine` point representing the KZG commitment to a polynomial
/// * `z` - The evaluation point
/// * `value` - The claimed polynomial value at the evaluation point
/// * `proof` - A `G1Affine` point representing the KZG proof for the evaluation
/// * `srs` - The SRS the commitment and proof were computed against
///
/// # Returns
///
/// `true` if the proof is valid. Any mismatch, including a point that is not
/// on the curve or not in the prime-order subgroup, gives `false`.
///
/// # Examples
///
/// ```rust
/// use ark_bn254::{Fr, G1Affine};
/// use ark_ec::AffineRepr;
/// use bitvec_kzg_primitives::srs::SRS;
/// use bitvec_kzg_verifier::verify::verify_opening;
///
/// let srs = SRS::unsafe_setup(Fr::from(7u64), 4);
/// // The constant polynomial 1 commits to G1 and its quotient is zero.
/// let commitment = G1Affine::generator();
/// let proof = G1Affine::zero();
/// assert!(verify_opening(&commitment, &Fr::from(3u64), &Fr::from(1u64), &proof, &srs));
/// assert!(!verify_opening(&commitment, &Fr::from(3u64), &Fr::from(2u64), &proof, &srs));
/// ```
pub fn verify_opening(commitment: &G1Affine, z: &Fr, value: &Fr, proof: &G1Affine, srs: &SRS) -> bool {
    if helpers::validate_g1_point(commitment).is_err() || helpers::validate_g1_point(proof).is_err() {
        return false;
    }

    // [value]₁ and C - [value]₁
    let value_g1 = (srs.g1_generator() * value).into_affine();
    let commit_minus_value = (*commitment - value_g1).into_affine();

    // [τ - z]₂
    let z_g2 = (srs.g2_generator() * z).into_affine();
    let x_minus_z = (srs.g2_tau() - z_g2).into_affine();

    helpers::pairings_verify(commit_minus_value, srs.g2_generator(), *proof, x_minus_z)
}

/// [verify_opening] for an [OpeningProof] produced by the prover.
pub fn verify_opening_proof(commitment: &G1Affine, opening: &OpeningProof, srs: &SRS) -> bool {
    verify_opening(
        commitment,
        &opening.point,
        &opening.value,
        &opening.quotient_commitment,
        srs,
    )
}

/// Byte-level variant of [verify_opening]. Points are compressed G1 encodings,
/// scalars 32-byte big-endian canonical integers.
///
/// # Returns
///
/// * `Ok(true)` - If the proof is valid
/// * `Ok(false)` - If the proof is invalid
/// * `Err(KzgError::DeserializationError)` - If an input is not a valid encoding
pub fn verify_opening_bytes(
    commitment: &[u8; SIZE_OF_G1_AFFINE_COMPRESSED],
    z: &[u8; BYTES_PER_FIELD_ELEMENT],
    value: &[u8; BYTES_PER_FIELD_ELEMENT],
    proof: &[u8; SIZE_OF_G1_AFFINE_COMPRESSED],
    srs: &SRS,
) -> Result<bool, KzgError> {
    let commitment = G1Affine::read_point_from_bytes_compressed(commitment).map_err(|e| {
        KzgError::DeserializationError(format!("Failed to deserialize commitment: {e}"))
    })?;
    let proof = G1Affine::read_point_from_bytes_compressed(proof)
        .map_err(|e| KzgError::DeserializationError(format!("Failed to deserialize proof: {e}")))?;
    let z = Fr::deserialize_from_bytes_be(z)
        .map_err(|e| KzgError::DeserializationError(format!("Failed to deserialize z: {e}")))?;
    let value = Fr::deserialize_from_bytes_be(value)
        .map_err(|e| KzgError::DeserializationError(format!("Failed to deserialize value: {e}")))?;
    Ok(verify_opening(&commitment, &z, &value, &proof, srs))
}
