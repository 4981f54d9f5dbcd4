use ark_bn254::Fr;
use bitvec_kzg_primitives::{
    constraint::check_boolean_identity,
    domain::Domain,
    errors::KzgError,
    proof::{fr_to_bit, BatchOpeningProof, BitVectorProof, Claims},
    srs::SRS,
    transcript::Transcript,
};
use tracing::{debug, instrument};

extern crate alloc;
use alloc::vec;
use alloc::vec::Vec;

use crate::batch::{batch_verify, verify_openings_batch};

/// Verifies a serialized [BitVectorProof] against `claims`.
///
/// Accepts iff the committed advice column is boolean at every row and holds
/// `bit` at row `index` for every `(index, bit)` of `claims`. The proof may
/// open more rows than are claimed.
///
/// # Returns
///
/// * `Ok(true)` - If the proof is accepted
/// * `Ok(false)` - If the proof is rejected
/// * `Err(KzgError::DeserializationError)` - If `serialized` is malformed
/// * `Err(KzgError::SrsTooSmall)` - If the SRS cannot verify a domain of the proof's size
#[instrument(skip_all, fields(proof_len = serialized.len(), claims = claims.len()))]
pub fn verify(serialized: &[u8], srs: &SRS, claims: &Claims) -> Result<bool, KzgError> {
    let proof = BitVectorProof::from_bytes(serialized)?;
    verify_proof(&proof, srs, claims)
}

/// [verify] for an already decoded proof.
pub fn verify_proof(proof: &BitVectorProof, srs: &SRS, claims: &Claims) -> Result<bool, KzgError> {
    if proof.domain_size.saturating_sub(1) > srs.max_degree() {
        return Err(KzgError::SrsTooSmall {
            requested: proof.domain_size,
            available: srs.max_degree() + 1,
        });
    }
    let domain = Domain::new(proof.domain_size)?;

    for (index, bit) in claims.iter() {
        match proof.opened_value(index).map(fr_to_bit) {
            Some(Some(opened)) if opened == bit => {},
            Some(_) => {
                debug!(index, claimed = bit, "opened value does not match the claim");
                return Ok(false);
            },
            None => {
                debug!(index, "claimed index is not opened");
                return Ok(false);
            },
        }
    }
    if let Some(opening) = proof.openings.iter().find(|o| fr_to_bit(&o.value).is_none()) {
        debug!(index = opening.index, "opened value is not a bit");
        return Ok(false);
    }

    let constraint = &proof.constraint;
    let (mut transcript, zeta) = Transcript::constraint_challenge(
        proof.domain_size,
        &proof.commitment,
        &constraint.quotient_commitment,
    );
    if !check_boolean_identity(
        &constraint.advice_eval,
        &constraint.quotient_eval,
        &zeta,
        &domain,
    ) {
        debug!("boolean identity does not hold at the challenge point");
        return Ok(false);
    }

    let gamma =
        transcript.constraint_batch_challenge(&constraint.advice_eval, &constraint.quotient_eval);
    let constraint_opening = BatchOpeningProof {
        points: vec![zeta],
        values: vec![vec![constraint.advice_eval], vec![constraint.quotient_eval]],
        quotient_commitment: constraint.opening,
    };
    if !batch_verify(
        &[proof.commitment, constraint.quotient_commitment],
        &constraint_opening,
        &gamma,
        srs,
    ) {
        debug!("constraint opening rejected");
        return Ok(false);
    }

    let r = transcript.openings_batch_challenge(&constraint.opening, &proof.openings);
    let count = proof.openings.len();
    let commitments = vec![proof.commitment; count];
    let zs = proof
        .openings
        .iter()
        .map(|o| domain.element(o.index).copied())
        .collect::<Option<Vec<Fr>>>()
        .ok_or(KzgError::DeserializationError(
            "opening index outside the domain".into(),
        ))?;
    let ys: Vec<Fr> = proof.openings.iter().map(|o| o.value).collect();
    let proofs: Vec<_> = proof.openings.iter().map(|o| o.proof).collect();
    if !verify_openings_batch(&commitments, &zs, &ys, &proofs, &r, srs) {
        debug!(count, "indexed openings rejected");
        return Ok(false);
    }

    debug!(count, "proof accepted");
    Ok(true)
}
