//! The single PLONK gate of the advice column: every row b satisfies
//! b·(b - 1) = 0.
//!
//! Over the domain H this is the polynomial identity
//! `B(X)·(B(X) - 1) = Q(X)·Z_H(X)`. The prover computes Q by exact division;
//! the verifier checks the identity at one Fiat-Shamir point ζ using opened
//! evaluations of B and Q.

use ark_bn254::Fr;
use ark_std::One;

use crate::{
    bitvector::first_non_bit,
    domain::Domain,
    errors::{KzgError, PolynomialError},
    polynomial::PolynomialCoeffForm,
};

extern crate alloc;

/// Computes the quotient Q(X) = B(X)·(B(X) - 1) / Z_H(X).
///
/// The division leaves a non-zero remainder exactly when some row of the
/// advice column is not a bit; that case fails with
/// [KzgError::ConstraintViolation] and no quotient is produced.
pub fn boolean_constraint_quotient(
    advice: &PolynomialCoeffForm,
    domain: &Domain,
) -> Result<PolynomialCoeffForm, KzgError> {
    if advice.trimmed_coeffs().len() > domain.size() {
        return Err(KzgError::InvalidInput(alloc::format!(
            "advice polynomial of degree {} does not fit a domain of size {}",
            advice.degree(),
            domain.size()
        )));
    }

    let shifted = advice.sub_constant(&Fr::one());
    let gate = advice.mul(&shifted)?;

    match gate.divide_by_vanishing(domain) {
        Ok(quotient) => Ok(quotient),
        Err(PolynomialError::NonVanishingRemainder) => {
            // Only used to report where the column breaks the gate.
            let rows = advice.to_eval_form(domain)?;
            let position = first_non_bit(rows.evaluations()).unwrap_or(0);
            Err(KzgError::ConstraintViolation { position })
        },
        Err(e) => Err(e.into()),
    }
}

/// Verifier side of the gate: b·(b - 1) == q·Z_H(ζ), where b = B(ζ) and
/// q = Q(ζ) are opened evaluations.
pub fn check_boolean_identity(advice_eval: &Fr, quotient_eval: &Fr, zeta: &Fr, domain: &Domain) -> bool {
    let lhs = *advice_eval * (*advice_eval - Fr::one());
    let rhs = *quotient_eval * domain.evaluate_vanishing_polynomial(zeta);
    lhs == rhs
}
