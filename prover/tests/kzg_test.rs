#[cfg(test)]
mod tests {
    use ark_bn254::{Fr, G1Affine};
    use ark_ec::{AffineRepr, CurveGroup};
    use ark_ff::{Field, UniformRand};
    use ark_std::{One, Zero};
    use bitvec_kzg_primitives::{
        domain::Domain,
        errors::{KzgError, PolynomialError},
        polynomial::{interpolate, linear_combine, PolynomialCoeffForm, PolynomialEvalForm},
        srs::SRS,
    };
    use bitvec_kzg_prover::kzg::KZG;
    use lazy_static::lazy_static;
    use rand::Rng;

    // τ is known so that commitments can be checked directly as p(τ)·G1.
    lazy_static! {
        static ref TAU: Fr = Fr::from(0x5eed_u64);
        static ref SRS_INSTANCE: SRS = SRS::unsafe_setup(*TAU, 256);
    }

    fn g1_times(x: Fr) -> G1Affine {
        (G1Affine::generator() * x).into_affine()
    }

    fn random_poly(len: usize) -> PolynomialCoeffForm {
        let mut rng = rand::thread_rng();
        PolynomialCoeffForm::new((0..len).map(|_| Fr::rand(&mut rng)).collect())
    }

    #[test]
    fn test_commit_coeff_form() {
        let kzg = KZG::new(&SRS_INSTANCE);
        let poly = random_poly(100);
        let commitment = kzg.commit_coeff_form(&poly).unwrap();
        assert_eq!(commitment, g1_times(poly.evaluate(&TAU)));

        assert_eq!(
            kzg.commit_coeff_form(&PolynomialCoeffForm::zero()).unwrap(),
            G1Affine::zero()
        );
        assert_eq!(
            kzg.commit_coeff_form(&PolynomialCoeffForm::new(vec![Fr::one()]))
                .unwrap(),
            G1Affine::generator()
        );
    }

    #[test]
    fn test_binding() {
        let kzg = KZG::new(&SRS_INSTANCE);
        let mut rng = rand::thread_rng();

        for _ in 0..50 {
            let p = random_poly(32);
            let q = random_poly(32);
            assert_ne!(p, q);
            assert_ne!(
                kzg.commit_coeff_form(&p).unwrap(),
                kzg.commit_coeff_form(&q).unwrap()
            );
        }

        // p and p + c·X^k differ in a single coefficient.
        let p = random_poly(64);
        let base = kzg.commit_coeff_form(&p).unwrap();
        for k in [0usize, 1, 31, 63, 64, 200] {
            let c = Fr::rand(&mut rng);
            let mut coeffs = p.coeffs().to_vec();
            if coeffs.len() <= k {
                coeffs.resize(k + 1, Fr::zero());
            }
            coeffs[k] += c;
            let shifted = kzg
                .commit_coeff_form(&PolynomialCoeffForm::new(coeffs))
                .unwrap();
            assert_ne!(base, shifted, "k = {k}");
            assert_eq!(shifted, (base + g1_times(c * TAU.pow([k as u64]))).into_affine());
        }
    }

    #[test]
    fn test_commit_errors() {
        let kzg = KZG::new(&SRS_INSTANCE);
        let poly = random_poly(258);
        assert_eq!(
            kzg.commit_coeff_form(&poly),
            Err(KzgError::DegreeExceeded {
                degree: 257,
                max_degree: 256
            })
        );

        // Trailing zeros do not count towards the degree.
        let mut coeffs = random_poly(10).coeffs().to_vec();
        coeffs.resize(1000, Fr::zero());
        assert!(kzg
            .commit_coeff_form(&PolynomialCoeffForm::new(coeffs))
            .is_ok());

        let too_long = PolynomialEvalForm::new(vec![Fr::one(); 512]).unwrap();
        assert!(matches!(
            kzg.commit_eval_form(&too_long),
            Err(KzgError::SrsTooSmall { .. })
        ));
    }

    #[test]
    fn test_commit_eval_form_matches_coeff_form() {
        let kzg = KZG::new(&SRS_INSTANCE);
        let mut rng = rand::thread_rng();
        for log_size in 0..=8 {
            let size = 1usize << log_size;
            let domain = Domain::new(size).unwrap();
            let evals: Vec<Fr> = (0..size).map(|_| Fr::from(rng.gen_range(0..2u64))).collect();

            let eval_form = PolynomialEvalForm::new(evals.clone()).unwrap();
            let coeff_form = interpolate(&evals, &domain).unwrap();
            assert_eq!(
                kzg.commit_eval_form(&eval_form).unwrap(),
                kzg.commit_coeff_form(&coeff_form).unwrap(),
                "size {size}"
            );
        }
    }

    #[test]
    fn test_g1_ifft_errors() {
        let kzg = KZG::new(&SRS_INSTANCE);
        assert_eq!(
            kzg.g1_ifft(3),
            Err(KzgError::PolynomialError(PolynomialError::InvalidDomainSize(3)))
        );
        assert_eq!(kzg.g1_ifft(4).unwrap().len(), 4);
    }

    #[test]
    fn test_open() {
        let kzg = KZG::new(&SRS_INSTANCE);
        let mut rng = rand::thread_rng();
        let poly = random_poly(64);
        let z = Fr::rand(&mut rng);

        let proof = kzg.open(&poly, &z).unwrap();
        assert_eq!(proof.point, z);
        assert_eq!(proof.value, poly.evaluate(&z));

        // π = (p(τ) - v) / (τ - z)·G1
        let tau = *TAU;
        let q_tau = (poly.evaluate(&tau) - proof.value) * (tau - z).inverse().unwrap();
        assert_eq!(proof.quotient_commitment, g1_times(q_tau));
    }

    #[test]
    fn test_open_at_index() {
        let kzg = KZG::new(&SRS_INSTANCE);
        let domain = Domain::new(16).unwrap();
        let evals: Vec<Fr> = (0..16u64).map(|i| Fr::from(i % 2)).collect();
        let poly = interpolate(&evals, &domain).unwrap();

        for index in [0, 1, 7, 15] {
            let proof = kzg.open_at_index(&poly, &domain, index).unwrap();
            assert_eq!(proof.point, *domain.element(index).unwrap());
            assert_eq!(proof.value, evals[index]);
        }

        assert_eq!(
            kzg.open_at_index(&poly, &domain, 16),
            Err(KzgError::IndexOutOfRange {
                index: 16,
                domain_size: 16
            })
        );
    }

    #[test]
    fn test_batch_open() {
        let kzg = KZG::new(&SRS_INSTANCE);
        let mut rng = rand::thread_rng();
        let polys = vec![random_poly(32), random_poly(17), random_poly(1)];
        let points: Vec<Fr> = (0..4).map(|_| Fr::rand(&mut rng)).collect();
        let gamma = Fr::rand(&mut rng);

        let proof = kzg.batch_open(&polys, &points, &gamma).unwrap();
        assert_eq!(proof.points, points);
        for (poly, values) in polys.iter().zip(proof.values.iter()) {
            for (z, v) in points.iter().zip(values.iter()) {
                assert_eq!(poly.evaluate(z), *v);
            }
        }

        // h(τ) = (Σ γ^j p_j(τ) - I(τ)) / Z_S(τ)
        let tau = *TAU;
        let gammas = [Fr::one(), gamma, gamma * gamma];
        let combined = linear_combine(&polys, &gammas).unwrap();
        let combined_values: Vec<Fr> = points.iter().map(|z| combined.evaluate(z)).collect();
        let interpolant =
            PolynomialCoeffForm::interpolate_at_points(&points, &combined_values).unwrap();
        let vanishing = PolynomialCoeffForm::from_roots(&points);
        let h_tau = (combined.evaluate(&tau) - interpolant.evaluate(&tau))
            * vanishing.evaluate(&tau).inverse().unwrap();
        assert_eq!(proof.quotient_commitment, g1_times(h_tau));
    }

    #[test]
    fn test_batch_open_errors() {
        let kzg = KZG::new(&SRS_INSTANCE);
        let poly = random_poly(8);
        let z = Fr::from(3u64);

        assert!(matches!(
            kzg.batch_open(&[], &[z], &Fr::one()),
            Err(KzgError::InvalidInput(_))
        ));
        assert!(matches!(
            kzg.batch_open(&[poly.clone()], &[], &Fr::one()),
            Err(KzgError::InvalidInput(_))
        ));
        assert!(matches!(
            kzg.batch_open(&[poly.clone()], &[z, Fr::one(), z], &Fr::one()),
            Err(KzgError::InvalidInput(_))
        ));

        // Two points need [Z_S(τ)]₂ of degree 2.
        let short_g2 = SRS::from_parts(
            SRS_INSTANCE.g1_powers(16).unwrap().to_vec(),
            SRS_INSTANCE.g2_powers(2).unwrap().to_vec(),
        )
        .unwrap();
        let kzg = KZG::new(&short_g2);
        assert!(kzg.batch_open(&[poly.clone()], &[z], &Fr::one()).is_ok());
        assert_eq!(
            kzg.batch_open(&[poly], &[z, Fr::one()], &Fr::one()),
            Err(KzgError::SrsTooSmall {
                requested: 3,
                available: 2
            })
        );
    }
}
