#[cfg(test)]
mod tests {
    use ark_bn254::{Fr, G1Affine, G2Affine};
    use ark_ec::{AffineRepr, CurveGroup};
    use bitvec_kzg_primitives::{
        consts::{SIZE_OF_G1_AFFINE_COMPRESSED, SRS_HEADER_SIZE},
        errors::KzgError,
        srs::{SrsLayout, SRS},
        traits::WritePointToBytes,
    };

    fn srs_bytes(tau: u64, max_degree: usize) -> Vec<u8> {
        SRS::unsafe_setup(Fr::from(tau), max_degree).to_bytes()
    }

    fn g1_point_offset(i: usize) -> usize {
        SrsLayout::PREFIX_SIZE + i * SIZE_OF_G1_AFFINE_COMPRESSED
    }

    fn assert_format_error(result: Result<SRS, KzgError>) {
        assert!(
            matches!(result, Err(KzgError::SrsFormatError(_))),
            "expected SrsFormatError, got {result:?}"
        );
    }

    #[test]
    fn test_unsafe_setup() {
        let tau = Fr::from(5u64);
        let srs = SRS::unsafe_setup(tau, 8);
        assert_eq!(srs.max_degree(), 8);
        assert_eq!(srs.g2_max_degree(), 8);
        assert_eq!(srs.g1_generator(), G1Affine::generator());
        assert_eq!(srs.g2_generator(), G2Affine::generator());
        assert_eq!(srs.g2_tau(), (G2Affine::generator() * tau).into_affine());
        assert_eq!(
            srs.g1_powers(3).unwrap()[2],
            (G1Affine::generator() * (tau * tau)).into_affine()
        );
    }

    #[test]
    fn test_load_round_trip() {
        let srs = SRS::unsafe_setup(Fr::from(11u64), 16);
        let bytes = srs.to_bytes();
        assert_eq!(SRS::load(&bytes).unwrap(), srs);
    }

    #[test]
    fn test_load_with_degree() {
        let full = SRS::unsafe_setup(Fr::from(11u64), 16);
        let bytes = full.to_bytes();

        let partial = SRS::load_with_degree(&bytes, 7).unwrap();
        assert_eq!(partial.max_degree(), 7);
        assert_eq!(partial.g2_max_degree(), 7);
        assert_eq!(partial.g1_powers(8).unwrap(), full.g1_powers(8).unwrap());

        // Degree 0 still keeps τ in both groups.
        let minimal = SRS::load_with_degree(&bytes, 0).unwrap();
        assert_eq!(minimal.max_degree(), 1);

        assert_eq!(
            SRS::load_with_degree(&bytes, 17),
            Err(KzgError::SrsTooSmall {
                requested: 18,
                available: 17
            })
        );
    }

    #[test]
    fn test_bounded_lookups() {
        let srs = SRS::unsafe_setup(Fr::from(3u64), 4);
        assert!(srs.g1_powers(5).is_ok());
        assert_eq!(
            srs.g1_powers(6),
            Err(KzgError::SrsTooSmall {
                requested: 6,
                available: 5
            })
        );
        assert!(srs.g2_powers(6).is_err());
    }

    #[test]
    fn test_bad_magic() {
        let mut bytes = srs_bytes(3, 4);
        bytes[0] = b'X';
        assert_format_error(SRS::load(&bytes));
    }

    #[test]
    fn test_unknown_curve_id() {
        let mut bytes = srs_bytes(3, 4);
        bytes[8] = 0x02;
        assert_format_error(SRS::load(&bytes));
    }

    #[test]
    fn test_truncated_and_trailing_bytes() {
        let bytes = srs_bytes(3, 4);
        assert_format_error(SRS::load(&bytes[..bytes.len() - 1]));
        assert_format_error(SRS::load(&bytes[..SRS_HEADER_SIZE]));
        assert_format_error(SRS::load(&[]));

        let mut trailing = bytes.clone();
        trailing.push(0);
        assert_format_error(SRS::load(&trailing));
    }

    #[test]
    fn test_counts_disagree_with_header() {
        let bytes = srs_bytes(3, 4);

        // g1 count one less than max degree + 1
        let mut g1_count = bytes.clone();
        g1_count[SRS_HEADER_SIZE + 3] -= 1;
        assert_format_error(SRS::load(&g1_count));

        // a single g2 point
        let g2_count_offset = SrsLayout::g2_count_offset(4).unwrap();
        let mut g2_count = bytes[..g2_count_offset + 4].to_vec();
        g2_count[g2_count_offset + 3] = 1;
        g2_count.extend_from_slice(&bytes[g2_count_offset + 4..g2_count_offset + 4 + 64]);
        assert_format_error(SRS::load(&g2_count));
    }

    #[test]
    fn test_invalid_point() {
        let mut bytes = srs_bytes(3, 4);
        let offset = g1_point_offset(2);
        bytes[offset..offset + SIZE_OF_G1_AFFINE_COMPRESSED].copy_from_slice(&[0xff; 32]);
        assert_format_error(SRS::load(&bytes));
    }

    #[test]
    fn test_wrong_generator() {
        let mut bytes = srs_bytes(3, 4);
        let doubled = (G1Affine::generator() * Fr::from(2u64)).into_affine();
        let offset = g1_point_offset(0);
        bytes[offset..offset + SIZE_OF_G1_AFFINE_COMPRESSED]
            .copy_from_slice(&doubled.write_point_to_bytes_compressed());
        assert_format_error(SRS::load(&bytes));
    }

    #[test]
    fn test_inconsistent_tau() {
        let a = srs_bytes(3, 4);
        let b = srs_bytes(4, 4);
        let g2_count_offset = SrsLayout::g2_count_offset(4).unwrap();

        // g1 powers of one τ, g2 powers of another
        let mut mixed = a[..g2_count_offset].to_vec();
        mixed.extend_from_slice(&b[g2_count_offset..]);
        assert_format_error(SRS::load(&mixed));

        // a single g1 power out of sequence
        let mut swapped = a.clone();
        let (first, second) = (g1_point_offset(2), g1_point_offset(3));
        let tmp = swapped[first..second].to_vec();
        swapped.copy_within(second..second + SIZE_OF_G1_AFFINE_COMPRESSED, first);
        swapped[second..second + SIZE_OF_G1_AFFINE_COMPRESSED].copy_from_slice(&tmp);
        assert_format_error(SRS::load(&swapped));
    }

    #[test]
    fn test_layout() {
        let bytes = srs_bytes(3, 4);
        let layout = SrsLayout::parse(&bytes).unwrap();
        assert_eq!(layout.max_degree(), 4);
        assert_eq!(layout.g1_count(), 5);
        assert_eq!(layout.g2_count(), 5);
        assert_eq!(layout.g1_offset(), SrsLayout::PREFIX_SIZE);
        assert_eq!(layout.g2_offset(), g1_point_offset(5) + 4);
        assert_eq!(layout.points_for_degree(2).unwrap(), (3, 3));
    }

    #[test]
    fn test_layout_point_bytes_bounds() {
        let bytes = srs_bytes(3, 4);
        let layout = SrsLayout::parse(&bytes).unwrap();
        assert_eq!(
            layout.g1_bytes(&bytes, 5).unwrap().len(),
            5 * SIZE_OF_G1_AFFINE_COMPRESSED
        );
        assert_eq!(
            layout.g1_bytes(&bytes, 6),
            Err(KzgError::SrsTooSmall {
                requested: 6,
                available: 5
            })
        );

        // A layout applied to fewer bytes than it describes fails instead of
        // slicing out of bounds.
        let short = &bytes[..layout.g2_offset() + 10];
        assert!(layout.g1_bytes(short, 5).is_ok());
        assert!(matches!(
            layout.g2_bytes(short, 2),
            Err(KzgError::SrsFormatError(_))
        ));
        assert!(matches!(
            layout.g1_bytes(&bytes[..SrsLayout::PREFIX_SIZE], 1),
            Err(KzgError::SrsFormatError(_))
        ));
    }
}
