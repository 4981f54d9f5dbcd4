#[cfg(test)]
mod tests {
    use ark_bn254::{Fr, G1Affine};
    use ark_ec::AffineRepr;
    use ark_ff::UniformRand;
    use ark_std::{One, Zero};
    use bitvec_kzg_primitives::{
        consts::{INDEXED_OPENING_SIZE, PROOF_FIXED_SIZE},
        errors::KzgError,
        proof::{fr_to_bit, BitVectorProof, Claims, ConstraintProof, IndexedOpening},
        transcript::Transcript,
    };

    fn sample_proof(domain_size: usize, indices: &[usize]) -> BitVectorProof {
        let mut rng = ark_std::test_rng();
        BitVectorProof {
            domain_size,
            commitment: G1Affine::rand(&mut rng),
            constraint: ConstraintProof {
                quotient_commitment: G1Affine::rand(&mut rng),
                advice_eval: Fr::rand(&mut rng),
                quotient_eval: Fr::rand(&mut rng),
                opening: G1Affine::zero(),
            },
            openings: indices
                .iter()
                .map(|&index| IndexedOpening {
                    index,
                    value: if index % 2 == 0 { Fr::one() } else { Fr::zero() },
                    proof: G1Affine::rand(&mut rng),
                })
                .collect(),
        }
    }

    fn assert_deserialization_error(bytes: &[u8]) {
        let result = BitVectorProof::from_bytes(bytes);
        assert!(
            matches!(result, Err(KzgError::DeserializationError(_))),
            "expected DeserializationError, got {result:?}"
        );
    }

    #[test]
    fn test_round_trip_without_openings() {
        let proof = sample_proof(8, &[]);
        let bytes = proof.to_bytes();
        assert_eq!(bytes.len(), PROOF_FIXED_SIZE);
        assert_eq!(BitVectorProof::from_bytes(&bytes).unwrap(), proof);
    }

    #[test]
    fn test_round_trip_with_every_index_opened() {
        let indices: Vec<usize> = (0..16).collect();
        let proof = sample_proof(16, &indices);
        let bytes = proof.to_bytes();
        assert_eq!(bytes.len(), PROOF_FIXED_SIZE + 16 * INDEXED_OPENING_SIZE);
        assert_eq!(BitVectorProof::from_bytes(&bytes).unwrap(), proof);
    }

    #[test]
    fn test_opened_values() {
        let proof = sample_proof(8, &[0, 3, 6]);
        assert_eq!(proof.opened_value(3), Some(&Fr::zero()));
        assert_eq!(proof.opened_value(6), Some(&Fr::one()));
        assert_eq!(proof.opened_value(1), None);

        let bits = proof.opened_bits().unwrap();
        assert_eq!(bits.iter().collect::<Vec<_>>(), vec![(0, true), (3, false), (6, true)]);

        let mut not_bits = proof.clone();
        not_bits.openings[1].value = Fr::from(2u64);
        assert!(not_bits.opened_bits().is_none());
    }

    #[test]
    fn test_trailing_and_truncated_bytes() {
        let bytes = sample_proof(8, &[1, 2]).to_bytes();
        let mut trailing = bytes.clone();
        trailing.push(0);
        assert_deserialization_error(&trailing);
        assert_deserialization_error(&bytes[..bytes.len() - 1]);
        assert_deserialization_error(&bytes[..10]);
        assert_deserialization_error(&[]);
    }

    #[test]
    fn test_unknown_curve_id() {
        let mut bytes = sample_proof(8, &[]).to_bytes();
        bytes[0] = 0x02;
        assert_deserialization_error(&bytes);
    }

    #[test]
    fn test_invalid_domain_size() {
        for domain_size in [0u64, 6, 1 << 29] {
            let mut bytes = sample_proof(8, &[]).to_bytes();
            bytes[1..9].copy_from_slice(&domain_size.to_be_bytes());
            assert_deserialization_error(&bytes);
        }
    }

    #[test]
    fn test_indices_must_be_strictly_increasing_and_in_range() {
        let mut repeated = sample_proof(8, &[2, 2]);
        repeated.openings[1].index = 2;
        assert_deserialization_error(&repeated.to_bytes());

        let decreasing = sample_proof(8, &[5, 1]);
        assert_deserialization_error(&decreasing.to_bytes());

        let out_of_range = sample_proof(8, &[1, 8]);
        assert_deserialization_error(&out_of_range.to_bytes());
    }

    #[test]
    fn test_more_openings_than_rows() {
        let proof = sample_proof(2, &[0, 1]);
        let mut bytes = proof.to_bytes();
        // Bump the count to 3 and append a well-formed opening.
        let count_offset = PROOF_FIXED_SIZE - 8;
        bytes[count_offset..count_offset + 8].copy_from_slice(&3u64.to_be_bytes());
        let extra = bytes[PROOF_FIXED_SIZE..PROOF_FIXED_SIZE + INDEXED_OPENING_SIZE].to_vec();
        bytes.extend_from_slice(&extra);
        assert_deserialization_error(&bytes);
    }

    #[test]
    fn test_non_canonical_scalar() {
        let mut bytes = sample_proof(8, &[]).to_bytes();
        // advice eval
        let offset = 1 + 8 + 3 * 32;
        bytes[offset..offset + 32].copy_from_slice(&[0xff; 32]);
        assert_deserialization_error(&bytes);
    }

    #[test]
    fn test_invalid_point() {
        let mut bytes = sample_proof(8, &[]).to_bytes();
        bytes[9..41].copy_from_slice(&[0xff; 32]);
        assert_deserialization_error(&bytes);
    }

    #[test]
    fn test_claims() {
        let mut claims = Claims::new();
        assert!(claims.is_empty());
        claims.insert(5, false);
        claims.insert(0, true);
        assert_eq!(claims.insert(5, true), Some(false));
        assert_eq!(claims.get(5), Some(true));
        assert_eq!(claims.get(1), None);
        assert_eq!(claims.iter().collect::<Vec<_>>(), vec![(0, true), (5, true)]);

        let collected: Claims = [(2, true), (1, false)].into_iter().collect();
        assert_eq!(collected.len(), 2);
    }

    #[test]
    fn test_fr_to_bit() {
        assert_eq!(fr_to_bit(&Fr::zero()), Some(false));
        assert_eq!(fr_to_bit(&Fr::one()), Some(true));
        assert_eq!(fr_to_bit(&Fr::from(2u64)), None);
        assert_eq!(fr_to_bit(&-Fr::one()), None);
    }

    #[test]
    fn test_transcript_challenges() {
        let mut rng = ark_std::test_rng();
        let c = G1Affine::rand(&mut rng);
        let q = G1Affine::rand(&mut rng);

        let (mut t1, zeta1) = Transcript::constraint_challenge(8, &c, &q);
        let (mut t2, zeta2) = Transcript::constraint_challenge(8, &c, &q);
        assert_eq!(zeta1, zeta2);

        // Every absorbed value changes the challenge.
        let (_, other_size) = Transcript::constraint_challenge(16, &c, &q);
        let (_, swapped) = Transcript::constraint_challenge(8, &q, &c);
        assert_ne!(zeta1, other_size);
        assert_ne!(zeta1, swapped);

        let b = Fr::rand(&mut rng);
        let gamma1 = t1.constraint_batch_challenge(&b, &Fr::one());
        let gamma2 = t2.constraint_batch_challenge(&b, &Fr::one());
        assert_eq!(gamma1, gamma2);
        assert_ne!(gamma1, zeta1);

        let opening = IndexedOpening {
            index: 3,
            value: Fr::one(),
            proof: G1Affine::rand(&mut rng),
        };
        let r1 = t1.openings_batch_challenge(&q, &[opening.clone()]);
        let mut tampered = opening;
        tampered.value = Fr::zero();
        let r2 = t2.openings_batch_challenge(&q, &[tampered]);
        assert_ne!(r1, r2);
    }
}
