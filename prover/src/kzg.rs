use ark_bn254::{Fr, G1Affine, G1Projective};
use ark_ec::{AffineRepr, CurveGroup, VariableBaseMSM};
use ark_poly::EvaluationDomain;
use bitvec_kzg_primitives::{
    domain::Domain,
    errors::KzgError,
    helpers,
    polynomial::{linear_combine, PolynomialCoeffForm, PolynomialEvalForm},
    proof::{BatchOpeningProof, OpeningProof},
    srs::SRS,
};
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

/// Commitment engine of the prover.
///
/// [KZG] borrows an [SRS] and provides methods for committing to polynomials
/// (in coefficient form, or in evaluation form over a [Domain]) and opening
/// them at single points or, batched, at a common set of points.
///
/// Every method is deterministic: any randomness, such as the challenge of a
/// batched opening, is supplied by the caller.
#[derive(Debug, Clone, Copy)]
pub struct KZG<'a> {
    srs: &'a SRS,
}

impl<'a> KZG<'a> {
    pub fn new(srs: &'a SRS) -> Self {
        Self { srs }
    }

    pub fn srs(&self) -> &'a SRS {
        self.srs
    }

    /// Commit the polynomial with the monomial srs points: Σ c_i·τ^i·G1.
    ///
    /// Fails with [KzgError::DegreeExceeded] if the polynomial's degree is
    /// larger than the srs supports.
    pub fn commit_coeff_form(&self, polynomial: &PolynomialCoeffForm) -> Result<G1Affine, KzgError> {
        if polynomial.degree() > self.srs.max_degree() {
            return Err(KzgError::DegreeExceeded {
                degree: polynomial.degree(),
                max_degree: self.srs.max_degree(),
            });
        }
        let coeffs = polynomial.trimmed_coeffs();
        if coeffs.is_empty() {
            return Ok(G1Affine::zero());
        }
        let bases = self.srs.g1_powers(coeffs.len())?;
        helpers::g1_lincomb(bases, coeffs)
    }

    /// Commit the polynomial given by its evaluations over the domain of the
    /// same size.
    ///
    /// The monomial srs points are turned into lagrange form with an IFFT, so
    /// the result equals `commit_coeff_form` of the interpolated polynomial.
    pub fn commit_eval_form(&self, polynomial: &PolynomialEvalForm) -> Result<G1Affine, KzgError> {
        let bases = self.g1_ifft(polynomial.len())?;
        Self::commit_lagrange(polynomial, &bases)
    }

    /// Commit the polynomial against lagrange basis points previously computed
    /// with [KZG::g1_ifft].
    pub fn commit_lagrange(
        polynomial: &PolynomialEvalForm,
        lagrange_bases: &[G1Affine],
    ) -> Result<G1Affine, KzgError> {
        if polynomial.len() != lagrange_bases.len() {
            return Err(KzgError::InvalidInput(format!(
                "{} evaluations for {} lagrange bases",
                polynomial.len(),
                lagrange_bases.len()
            )));
        }
        match G1Projective::msm(lagrange_bases, polynomial.evaluations()) {
            Ok(res) => Ok(res.into_affine()),
            Err(err) => Err(KzgError::MsmError(err.to_string())),
        }
    }

    /// IFFT of the first `length` monomial srs points, i.e. the commitments to
    /// the lagrange polynomials of the domain of size `length`.
    pub fn g1_ifft(&self, length: usize) -> Result<Vec<G1Affine>, KzgError> {
        let domain = Domain::new(length)?;
        let points_projective: Vec<G1Projective> = self
            .srs
            .g1_powers(length)?
            .par_iter()
            .map(|&p| G1Projective::from(p))
            .collect();
        let ifft_result = domain.radix2().ifft(&points_projective);
        Ok(G1Projective::normalize_batch(&ifft_result))
    }

    /// Opens the polynomial at `z`: v = p(z) and π = [(p(X) - v) / (X - z)]₁.
    pub fn open(&self, polynomial: &PolynomialCoeffForm, z: &Fr) -> Result<OpeningProof, KzgError> {
        let (quotient, value) = polynomial.divide_by_linear(z);
        Ok(OpeningProof {
            point: *z,
            value,
            quotient_commitment: self.commit_coeff_form(&quotient)?,
        })
    }

    /// Opens the polynomial at the `index`-th point of the domain, ω^index.
    pub fn open_at_index(
        &self,
        polynomial: &PolynomialCoeffForm,
        domain: &Domain,
        index: usize,
    ) -> Result<OpeningProof, KzgError> {
        let z = domain.element(index).ok_or(KzgError::IndexOutOfRange {
            index,
            domain_size: domain.size(),
        })?;
        self.open(polynomial, z)
    }

    /// Opens several polynomials at a common set of distinct points with a
    /// single group element.
    ///
    /// With Z_S the vanishing polynomial of the points and I_j the polynomial
    /// interpolating p_j over them, each p_j - I_j is divisible by Z_S. The
    /// proof commits to h = Σ γ^j·(p_j - I_j) / Z_S, which is the quotient of
    /// Σ γ^j·p_j by Z_S. `challenge` is γ and must be derived by the caller
    /// after the commitments to the polynomials are fixed.
    pub fn batch_open(
        &self,
        polynomials: &[PolynomialCoeffForm],
        points: &[Fr],
        challenge: &Fr,
    ) -> Result<BatchOpeningProof, KzgError> {
        if polynomials.is_empty() || points.is_empty() {
            return Err(KzgError::InvalidInput(
                "batch opening needs at least one polynomial and one point".to_string(),
            ));
        }
        let mut sorted = points.to_vec();
        sorted.sort();
        if sorted.windows(2).any(|w| w[0] == w[1]) {
            return Err(KzgError::InvalidInput(
                "batch opening points must be distinct".to_string(),
            ));
        }
        // [Z_S(τ)]₂ has degree |S| and must be computable by the verifier.
        self.srs.g2_powers(points.len() + 1)?;

        let values: Vec<Vec<Fr>> = polynomials
            .iter()
            .map(|p| points.iter().map(|z| p.evaluate(z)).collect())
            .collect();

        let gammas = helpers::compute_powers(challenge, polynomials.len());
        let combined = linear_combine(polynomials, &gammas)?;
        let vanishing = PolynomialCoeffForm::from_roots(points);
        let (quotient, _) = combined.div_rem(&vanishing)?;

        Ok(BatchOpeningProof {
            points: points.to_vec(),
            values,
            quotient_commitment: self.commit_coeff_form(&quotient)?,
        })
    }
}
