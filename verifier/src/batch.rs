use ark_bn254::{Fr, G1Affine};
use ark_ec::CurveGroup;
use bitvec_kzg_primitives::{
    helpers,
    polynomial::PolynomialCoeffForm,
    proof::BatchOpeningProof,
    srs::SRS,
};
use tracing::debug;

extern crate alloc;
use alloc::vec::Vec;

/// Verifies a [BatchOpeningProof] of several polynomials at a common set of
/// points S with a single pairing check.
///
/// With γ the challenge the prover used, C = Σ γ^j·C_j and I the polynomial
/// interpolating Y_i = Σ γ^j·values[j][i] over S, the check is
///
/// e(C - [I(τ)]₁, G2) == e(π, [Z_S(τ)]₂)
///
/// which holds iff every claimed value is correct, except with probability
/// about (number of polynomials) / r over the choice of γ.
///
/// # Returns
///
/// `false` on a failed check as well as on malformed input: shapes that do
/// not match the commitments, repeated points, invalid curve points, or an
/// SRS without enough G2 powers for [Z_S(τ)]₂.
pub fn batch_verify(
    commitments: &[G1Affine],
    proof: &BatchOpeningProof,
    challenge: &Fr,
    srs: &SRS,
) -> bool {
    let num_points = proof.points.len();
    if commitments.is_empty()
        || num_points == 0
        || proof.values.len() != commitments.len()
        || proof.values.iter().any(|v| v.len() != num_points)
    {
        debug!("batch opening shape does not match the commitments");
        return false;
    }
    if commitments
        .iter()
        .chain(core::iter::once(&proof.quotient_commitment))
        .any(|p| helpers::validate_g1_point(p).is_err())
    {
        debug!("batch opening holds an invalid g1 point");
        return false;
    }

    let gammas = helpers::compute_powers(challenge, commitments.len());
    let combined_values: Vec<Fr> = (0..num_points)
        .map(|i| {
            proof
                .values
                .iter()
                .zip(gammas.iter())
                .map(|(values, gamma)| values[i] * gamma)
                .sum()
        })
        .collect();

    // Interpolation fails exactly when two points coincide.
    let Ok(interpolant) =
        PolynomialCoeffForm::interpolate_at_points(&proof.points, &combined_values)
    else {
        debug!("batch opening points are not distinct");
        return false;
    };
    let vanishing = PolynomialCoeffForm::from_roots(&proof.points);

    let (Ok(g1_bases), Ok(g2_bases)) = (
        srs.g1_powers(interpolant.len()),
        srs.g2_powers(vanishing.len()),
    ) else {
        debug!(num_points, "srs too small for the batch opening");
        return false;
    };

    let lincombs = (
        helpers::g1_lincomb(commitments, &gammas),
        helpers::g1_lincomb(g1_bases, interpolant.coeffs()),
        helpers::g2_lincomb(g2_bases, vanishing.coeffs()),
    );
    let (Ok(combined_commitment), Ok(interpolant_g1), Ok(vanishing_g2)) = lincombs else {
        return false;
    };

    let lhs = (combined_commitment - interpolant_g1).into_affine();
    helpers::pairings_verify(
        lhs,
        srs.g2_generator(),
        proof.quotient_commitment,
        vanishing_g2,
    )
}

/// Verifies N independent openings, proof i claiming that the polynomial
/// committed in `commitments[i]` evaluates to `ys[i]` at `zs[i]`, with one
/// pairing check.
/// Ref: https://github.com/ethereum/consensus-specs/blob/master/specs/deneb/polynomial-commitments.md#verify_kzg_proof_batch
///
/// Using the powers of `r`:
///
/// e(Σ r^i·π_i, [τ]₂) == e(Σ r^i·(C_i - [y_i]₁) + Σ r^i·z_i·π_i, G2)
///
/// `r` must be derived after all the proofs are fixed. An empty batch is
/// accepted; inputs of different lengths and invalid points are rejected.
pub fn verify_openings_batch(
    commitments: &[G1Affine],
    zs: &[Fr],
    ys: &[Fr],
    proofs: &[G1Affine],
    r: &Fr,
    srs: &SRS,
) -> bool {
    if !(commitments.len() == zs.len() && zs.len() == ys.len() && ys.len() == proofs.len()) {
        debug!("length's of the input are not the same");
        return false;
    }
    if commitments.is_empty() {
        return true;
    }
    if commitments
        .iter()
        .chain(proofs.iter())
        .any(|p| helpers::validate_g1_point(p).is_err())
    {
        debug!("opening batch holds an invalid g1 point");
        return false;
    }

    let n = commitments.len();
    let r_powers = helpers::compute_powers(r, n);

    // Σ r^i·π_i
    let Ok(proof_lincomb) = helpers::g1_lincomb(proofs, &r_powers) else {
        return false;
    };

    // C_i - [y_i]₁ weighted by r^i, and π_i weighted by r^i·z_i, in one MSM.
    let mut points: Vec<G1Affine> = Vec::with_capacity(2 * n);
    let mut scalars: Vec<Fr> = Vec::with_capacity(2 * n);
    for i in 0..n {
        let ys_encrypted = srs.g1_generator() * ys[i];
        points.push((commitments[i] - ys_encrypted).into_affine());
        scalars.push(r_powers[i]);
    }
    for i in 0..n {
        points.push(proofs[i]);
        scalars.push(r_powers[i] * zs[i]);
    }
    let Ok(rhs_g1) = helpers::g1_lincomb(&points, &scalars) else {
        return false;
    };

    helpers::pairings_verify(proof_lincomb, srs.g2_tau(), rhs_g1, srs.g2_generator())
}
