use ark_bn254::Fr;
use ark_ff::Field;
use ark_std::{One, Zero};

use crate::{domain::Domain, errors::PolynomialError};

extern crate alloc;
use alloc::string::ToString;
use alloc::vec;
use alloc::vec::Vec;

#[derive(Clone, Debug, PartialEq)]
pub struct PolynomialEvalForm {
    /// evaluations contains the evaluations of the polynomial over the domain
    /// of the same size. The length is always a power of two; unlike a
    /// coefficient vector, zero-padding evaluations would change the
    /// polynomial, so it is never done implicitly.
    evaluations: Vec<Fr>,
}

impl PolynomialEvalForm {
    /// Creates a new [PolynomialEvalForm] from the given evaluations. This
    /// typically wouldn't be used directly, but instead a
    /// [crate::bitvector::BitVector] would be converted using
    /// [crate::bitvector::BitVector::to_polynomial_eval_form].
    pub fn new(evals: Vec<Fr>) -> Result<Self, PolynomialError> {
        if evals.is_empty() || !evals.len().is_power_of_two() {
            return Err(PolynomialError::InvalidDomainSize(evals.len()));
        }
        Ok(Self { evaluations: evals })
    }

    pub fn evaluations(&self) -> &[Fr] {
        &self.evaluations
    }

    /// Returns the number of evaluations in the polynomial, which is also the
    /// size of the domain it lives on.
    pub fn len(&self) -> usize {
        self.evaluations.len()
    }

    /// Retrieves a reference to the element at the specified index.
    ///
    /// # Arguments
    ///
    /// * `i` - The index of the element to retrieve.
    ///
    /// # Returns
    ///
    /// An `Option` containing a reference to the `Fr` element if the index is within bounds, or `None` otherwise.
    pub fn get_evaluation(&self, i: usize) -> Option<&Fr> {
        self.evaluations.get(i)
    }

    /// Checks whether the polynomial has no elements.
    pub fn is_empty(&self) -> bool {
        self.evaluations.is_empty()
    }

    /// Converts the polynomial to coefficient form. This is done by performing
    /// an IFFT on the evaluations.
    pub fn to_coeff_form(&self, domain: &Domain) -> Result<PolynomialCoeffForm, PolynomialError> {
        interpolate(&self.evaluations, domain)
    }
}

/// Polynomial in monomial basis, `coeffs[i]` being the coefficient of X^i.
/// Trailing zero coefficients are allowed and do not change the degree.
#[derive(Clone, Debug, PartialEq)]
pub struct PolynomialCoeffForm {
    coeffs: Vec<Fr>,
}

impl PolynomialCoeffForm {
    pub fn new(coeffs: Vec<Fr>) -> Self {
        Self { coeffs }
    }

    pub fn zero() -> Self {
        Self { coeffs: vec![] }
    }

    pub fn coeffs(&self) -> &[Fr] {
        &self.coeffs
    }

    /// Number of stored coefficients, including trailing zeros.
    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    pub fn get_at_index(&self, i: usize) -> Option<&Fr> {
        self.coeffs.get(i)
    }

    /// Checks if the polynomial has no elements.
    pub fn is_empty(&self) -> bool {
        self.coeffs.is_empty()
    }

    pub fn is_zero(&self) -> bool {
        self.coeffs.iter().all(|c| c.is_zero())
    }

    /// Degree of the polynomial, ignoring trailing zeros. The zero polynomial
    /// is reported as degree 0.
    pub fn degree(&self) -> usize {
        self.coeffs
            .iter()
            .rposition(|c| !c.is_zero())
            .unwrap_or(0)
    }

    /// Coefficients without trailing zeros.
    pub fn trimmed_coeffs(&self) -> &[Fr] {
        match self.coeffs.iter().rposition(|c| !c.is_zero()) {
            Some(last) => &self.coeffs[..=last],
            None => &[],
        }
    }

    /// Evaluates the polynomial at `z` with Horner's rule.
    pub fn evaluate(&self, z: &Fr) -> Fr {
        self.coeffs
            .iter()
            .rev()
            .fold(Fr::zero(), |acc, c| acc * z + c)
    }

    /// Converts the polynomial to evaluation form over `domain`. This is done
    /// by performing an FFT on the coefficients.
    pub fn to_eval_form(&self, domain: &Domain) -> Result<PolynomialEvalForm, PolynomialError> {
        let evals = domain.fft(self.trimmed_coeffs())?;
        PolynomialEvalForm::new(evals)
    }

    /// Returns `self - c`.
    pub fn sub_constant(&self, c: &Fr) -> Self {
        let mut coeffs = self.coeffs.clone();
        if coeffs.is_empty() {
            coeffs.push(Fr::zero());
        }
        coeffs[0] -= c;
        Self { coeffs }
    }

    /// Product of two polynomials, computed with an FFT over a domain large
    /// enough to hold the result.
    pub fn mul(&self, other: &Self) -> Result<Self, PolynomialError> {
        let a = self.trimmed_coeffs();
        let b = other.trimmed_coeffs();
        if a.is_empty() || b.is_empty() {
            return Ok(Self::zero());
        }
        let result_len = a.len() + b.len() - 1;
        let domain = Domain::new(result_len.next_power_of_two())?;

        let a_evals = domain.fft(a)?;
        let b_evals = domain.fft(b)?;
        let product: Vec<Fr> = a_evals
            .iter()
            .zip(b_evals.iter())
            .map(|(x, y)| *x * y)
            .collect();

        let mut coeffs = domain.ifft(&product)?;
        coeffs.truncate(result_len);
        Ok(Self { coeffs })
    }

    /// Divides by the vanishing polynomial Z_H(X) = X^n - 1 of `domain`.
    ///
    /// Fails with [PolynomialError::NonVanishingRemainder] unless the division
    /// is exact, i.e. unless `self` is zero on every point of the domain.
    pub fn divide_by_vanishing(&self, domain: &Domain) -> Result<Self, PolynomialError> {
        let n = domain.size();
        let mut remainder = self.trimmed_coeffs().to_vec();
        if remainder.len() <= n {
            // Degree below n: only the zero polynomial is a multiple of Z_H.
            return if remainder.iter().all(|c| c.is_zero()) {
                Ok(Self::zero())
            } else {
                Err(PolynomialError::NonVanishingRemainder)
            };
        }

        // X^i = X^(i-n)·(X^n - 1) + X^(i-n), folded from the top down.
        let mut quotient = vec![Fr::zero(); remainder.len() - n];
        for i in (n..remainder.len()).rev() {
            let top = remainder[i];
            quotient[i - n] = top;
            remainder[i - n] += top;
            remainder[i] = Fr::zero();
        }

        if remainder[..n].iter().any(|c| !c.is_zero()) {
            return Err(PolynomialError::NonVanishingRemainder);
        }
        Ok(Self { coeffs: quotient })
    }

    /// Synthetic division by (X - z). Returns the quotient and the remainder,
    /// which equals `self.evaluate(z)`.
    pub fn divide_by_linear(&self, z: &Fr) -> (Self, Fr) {
        let coeffs = self.trimmed_coeffs();
        if coeffs.is_empty() {
            return (Self::zero(), Fr::zero());
        }

        let mut quotient = vec![Fr::zero(); coeffs.len() - 1];
        let mut acc = Fr::zero();
        for i in (0..coeffs.len()).rev() {
            acc = acc * z + coeffs[i];
            if i > 0 {
                quotient[i - 1] = acc;
            }
        }
        (Self { coeffs: quotient }, acc)
    }

    /// Long division by an arbitrary non-zero `divisor`.
    pub fn div_rem(&self, divisor: &Self) -> Result<(Self, Self), PolynomialError> {
        let d = divisor.trimmed_coeffs();
        let lead_inv = d
            .last()
            .and_then(|lead| lead.inverse())
            .ok_or(PolynomialError::GenericError(
                "division by the zero polynomial".to_string(),
            ))?;

        let mut remainder = self.trimmed_coeffs().to_vec();
        if remainder.len() < d.len() {
            return Ok((Self::zero(), Self { coeffs: remainder }));
        }

        let mut quotient = vec![Fr::zero(); remainder.len() - d.len() + 1];
        for i in (0..quotient.len()).rev() {
            let factor = remainder[i + d.len() - 1] * lead_inv;
            quotient[i] = factor;
            for (j, dj) in d.iter().enumerate() {
                remainder[i + j] -= factor * dj;
            }
        }
        remainder.truncate(d.len() - 1);
        Ok((Self { coeffs: quotient }, Self { coeffs: remainder }))
    }

    /// The monic polynomial Π (X - z_i) vanishing exactly on `points`.
    pub fn from_roots(points: &[Fr]) -> Self {
        let mut coeffs = vec![Fr::one()];
        for z in points {
            let mut next = vec![Fr::zero(); coeffs.len() + 1];
            for (i, c) in coeffs.iter().enumerate() {
                next[i + 1] += c;
                next[i] -= *c * z;
            }
            coeffs = next;
        }
        Self { coeffs }
    }

    /// Lagrange interpolation through `(points[i], values[i])`. The points
    /// must be pairwise distinct.
    pub fn interpolate_at_points(points: &[Fr], values: &[Fr]) -> Result<Self, PolynomialError> {
        if points.len() != values.len() {
            return Err(PolynomialError::LengthMismatch {
                expected: points.len(),
                actual: values.len(),
            });
        }

        let vanishing = Self::from_roots(points);
        let mut coeffs = vec![Fr::zero(); points.len()];
        for (z, y) in points.iter().zip(values) {
            // Z(X) / (X - z) is the Lagrange numerator for this point.
            let (numerator, _) = vanishing.divide_by_linear(z);
            let denominator = numerator.evaluate(z).inverse().ok_or(
                PolynomialError::GenericError("interpolation points must be distinct".to_string()),
            )?;
            let scale = denominator * y;
            for (acc, c) in coeffs.iter_mut().zip(numerator.coeffs()) {
                *acc += scale * c;
            }
        }
        Ok(Self { coeffs })
    }
}

/// Interpolates `values`, given as evaluations over `domain`, into coefficient
/// form with an inverse FFT.
pub fn interpolate(values: &[Fr], domain: &Domain) -> Result<PolynomialCoeffForm, PolynomialError> {
    let coeffs = domain.ifft(values)?;
    Ok(PolynomialCoeffForm::new(coeffs))
}

/// Computes Σ scalars[i]·polys[i].
pub fn linear_combine(
    polys: &[PolynomialCoeffForm],
    scalars: &[Fr],
) -> Result<PolynomialCoeffForm, PolynomialError> {
    if polys.len() != scalars.len() {
        return Err(PolynomialError::LengthMismatch {
            expected: polys.len(),
            actual: scalars.len(),
        });
    }

    let len = polys.iter().map(|p| p.len()).max().unwrap_or(0);
    let mut coeffs = vec![Fr::zero(); len];
    for (poly, scalar) in polys.iter().zip(scalars) {
        for (acc, c) in coeffs.iter_mut().zip(poly.coeffs()) {
            *acc += *scalar * c;
        }
    }
    Ok(PolynomialCoeffForm::new(coeffs))
}
