use ark_bn254::{Fr, G1Affine, G1Projective, G2Affine, G2Projective};
use ark_ec::{AffineRepr, CurveGroup};

extern crate alloc;
use alloc::format;
use alloc::string::ToString;
use alloc::vec::Vec;

use crate::{
    consts::{
        CURVE_ID_BN254, SIZE_OF_G1_AFFINE_COMPRESSED, SIZE_OF_G2_AFFINE_COMPRESSED,
        SRS_FILE_MAGIC, SRS_HEADER_SIZE,
    },
    errors::KzgError,
    helpers,
    traits::{ReadPointFromBytes, WritePointToBytes},
};

/// Represents the Structured Reference String (SRS) used in KZG commitments.
///
/// `g1[i] = τ^i·G1` for `i` in `0..=max_degree()` and `g2[i] = τ^i·G2` for
/// `i` in `0..=g2_max_degree()`. The SRS is immutable once built and is
/// passed by reference to every commit, open and verify call.
#[derive(Debug, PartialEq, Clone)]
pub struct SRS {
    // SRS points are stored in monomial form, ready to be used for commitments with polynomials
    // in coefficient form. To commit against a polynomial in evaluation form, the prover
    // transforms them to lagrange form using IFFT.
    g1: Vec<G1Affine>,
    // G2 powers beyond τ·G2 are only needed to commit to vanishing polynomials of
    // multi-point openings.
    g2: Vec<G2Affine>,
}

/// Byte layout of an SRS file, obtained by validating its header and length
/// fields without decoding any point.
///
/// ```text
/// magic "BVKZGSRS" | curve id (1) | max degree (u32) |
/// g1 count (u32) | g1 points (32 bytes each) |
/// g2 count (u32) | g2 points (64 bytes each)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SrsLayout {
    max_degree: usize,
    g1_count: usize,
    g1_offset: usize,
    g2_count: usize,
    g2_offset: usize,
}

impl SrsLayout {
    /// Size of the fixed prefix read by [SrsLayout::parse_header]: the header
    /// followed by the g1 count.
    pub const PREFIX_SIZE: usize = SRS_HEADER_SIZE + 4;

    pub fn parse(bytes: &[u8]) -> Result<Self, KzgError> {
        let max_degree = Self::parse_header(bytes)?;
        let g2_count = read_u32_be(bytes, Self::g2_count_offset(max_degree)?)?;
        Self::from_counts(max_degree, g2_count as usize, bytes.len())
    }

    /// Validates the magic, curve id, max degree and g1 count found at the
    /// start of `prefix`, returning the max degree.
    pub fn parse_header(prefix: &[u8]) -> Result<usize, KzgError> {
        if prefix.len() < Self::PREFIX_SIZE {
            return Err(KzgError::SrsFormatError("truncated header".to_string()));
        }
        if &prefix[..SRS_FILE_MAGIC.len()] != SRS_FILE_MAGIC {
            return Err(KzgError::SrsFormatError("bad magic".to_string()));
        }
        let curve_id = prefix[SRS_FILE_MAGIC.len()];
        if curve_id != CURVE_ID_BN254 {
            return Err(KzgError::SrsFormatError(format!(
                "unsupported curve id {curve_id:#04x}"
            )));
        }
        let max_degree = read_u32_be(prefix, SRS_FILE_MAGIC.len() + 1)? as usize;
        if max_degree == 0 {
            return Err(KzgError::SrsFormatError(
                "max degree must be at least 1".to_string(),
            ));
        }
        let g1_count = read_u32_be(prefix, SRS_HEADER_SIZE)? as usize;
        if g1_count != max_degree + 1 {
            return Err(KzgError::SrsFormatError(format!(
                "header declares max degree {max_degree} but the file holds {g1_count} g1 points"
            )));
        }
        Ok(max_degree)
    }

    /// Offset of the g2 count field, right after the g1 points.
    pub fn g2_count_offset(max_degree: usize) -> Result<usize, KzgError> {
        advance(
            Self::PREFIX_SIZE,
            max_degree + 1,
            SIZE_OF_G1_AFFINE_COMPRESSED,
            usize::MAX,
        )
    }

    /// Completes the layout once the g2 count is known, checking it against
    /// the total size of the file.
    pub fn from_counts(
        max_degree: usize,
        g2_count: usize,
        total_len: usize,
    ) -> Result<Self, KzgError> {
        let g1_count = max_degree + 1;
        if g2_count < 2 || g2_count > g1_count {
            return Err(KzgError::SrsFormatError(format!(
                "g2 point count {g2_count} outside [2, {g1_count}]"
            )));
        }
        let g2_offset = Self::g2_count_offset(max_degree)? + 4;
        let end = advance(g2_offset, g2_count, SIZE_OF_G2_AFFINE_COMPRESSED, total_len)?;
        if end != total_len {
            return Err(KzgError::SrsFormatError(format!(
                "{} trailing bytes",
                total_len - end
            )));
        }

        Ok(Self {
            max_degree,
            g1_count,
            g1_offset: Self::PREFIX_SIZE,
            g2_count,
            g2_offset,
        })
    }

    /// Number of (g1, g2) points to decode when only powers up to `degree`
    /// are needed. At least two points per group are always kept, τ being
    /// needed to verify anything.
    pub fn points_for_degree(&self, degree: usize) -> Result<(usize, usize), KzgError> {
        if degree > self.max_degree {
            return Err(KzgError::SrsTooSmall {
                requested: degree + 1,
                available: self.g1_count,
            });
        }
        let wanted = (degree + 1).max(2);
        Ok((wanted, self.g2_count.min(wanted)))
    }

    pub fn max_degree(&self) -> usize {
        self.max_degree
    }

    pub fn g1_count(&self) -> usize {
        self.g1_count
    }

    pub fn g1_offset(&self) -> usize {
        self.g1_offset
    }

    pub fn g2_count(&self) -> usize {
        self.g2_count
    }

    pub fn g2_offset(&self) -> usize {
        self.g2_offset
    }

    /// The encodings of the first `count` g1 points. Fails if `count` exceeds
    /// the layout or `bytes` is shorter than the layout describes.
    pub fn g1_bytes<'a>(&self, bytes: &'a [u8], count: usize) -> Result<&'a [u8], KzgError> {
        point_bytes(bytes, self.g1_offset, count, self.g1_count, SIZE_OF_G1_AFFINE_COMPRESSED)
    }

    /// [SrsLayout::g1_bytes] for the g2 points.
    pub fn g2_bytes<'a>(&self, bytes: &'a [u8], count: usize) -> Result<&'a [u8], KzgError> {
        point_bytes(bytes, self.g2_offset, count, self.g2_count, SIZE_OF_G2_AFFINE_COMPRESSED)
    }
}

fn point_bytes(
    bytes: &[u8],
    offset: usize,
    count: usize,
    available: usize,
    point_size: usize,
) -> Result<&[u8], KzgError> {
    if count > available {
        return Err(KzgError::SrsTooSmall {
            requested: count,
            available,
        });
    }
    let end = advance(offset, count, point_size, bytes.len())?;
    Ok(&bytes[offset..end])
}

impl SRS {
    /// Parses an SRS file held in memory, loading every power it contains.
    pub fn load(bytes: &[u8]) -> Result<Self, KzgError> {
        let layout = SrsLayout::parse(bytes)?;
        Self::load_layout(bytes, &layout, layout.max_degree())
    }

    /// Parses an SRS file, loading only the powers up to `degree`.
    ///
    /// Fails with [KzgError::SrsTooSmall] if the file does not reach `degree`.
    pub fn load_with_degree(bytes: &[u8], degree: usize) -> Result<Self, KzgError> {
        let layout = SrsLayout::parse(bytes)?;
        Self::load_layout(bytes, &layout, degree)
    }

    fn load_layout(bytes: &[u8], layout: &SrsLayout, degree: usize) -> Result<Self, KzgError> {
        let (g1_points, g2_points) = layout.points_for_degree(degree)?;
        let g1 = decode_points::<G1Affine>(layout.g1_bytes(bytes, g1_points)?)?;
        let g2 = decode_points::<G2Affine>(layout.g2_bytes(bytes, g2_points)?)?;
        Self::from_parts(g1, g2)
    }

    /// Builds an SRS from already decoded powers, checking that they are
    /// powers of one and the same τ in both groups.
    pub fn from_parts(g1: Vec<G1Affine>, g2: Vec<G2Affine>) -> Result<Self, KzgError> {
        if g1.len() < 2 || g2.len() < 2 {
            return Err(KzgError::SrsFormatError(format!(
                "need at least 2 points per group, got {} g1 and {} g2",
                g1.len(),
                g2.len()
            )));
        }
        if g1[0] != G1Affine::generator() || g2[0] != G2Affine::generator() {
            return Err(KzgError::SrsFormatError(
                "first powers are not the bn254 generators".to_string(),
            ));
        }
        for point in g2.iter() {
            helpers::validate_g2_point(point)
                .map_err(|e| KzgError::SrsFormatError(e.to_string()))?;
        }

        let srs = Self { g1, g2 };
        srs.check_powers_consistent()?;
        Ok(srs)
    }

    /// Deterministic setup from a known τ.
    ///
    /// Anyone who knows τ can open a commitment to any value, so this is only
    /// meant for tests and benchmarks. Real deployments load the output of a
    /// setup ceremony with [SRS::load].
    pub fn unsafe_setup(tau: Fr, max_degree: usize) -> Self {
        let powers = helpers::compute_powers(&tau, max_degree.max(1) + 1);
        let g1_projective: Vec<G1Projective> =
            powers.iter().map(|p| G1Affine::generator() * p).collect();
        let g2_projective: Vec<G2Projective> =
            powers.iter().map(|p| G2Affine::generator() * p).collect();
        Self {
            g1: G1Projective::normalize_batch(&g1_projective),
            g2: G2Projective::normalize_batch(&g2_projective),
        }
    }

    /// Writes the SRS in the file format read by [SRS::load].
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(
            SRS_HEADER_SIZE
                + 8
                + self.g1.len() * SIZE_OF_G1_AFFINE_COMPRESSED
                + self.g2.len() * SIZE_OF_G2_AFFINE_COMPRESSED,
        );
        out.extend_from_slice(SRS_FILE_MAGIC);
        out.push(CURVE_ID_BN254);
        out.extend_from_slice(&(self.max_degree() as u32).to_be_bytes());
        out.extend_from_slice(&(self.g1.len() as u32).to_be_bytes());
        for point in &self.g1 {
            out.extend_from_slice(&point.write_point_to_bytes_compressed());
        }
        out.extend_from_slice(&(self.g2.len() as u32).to_be_bytes());
        for point in &self.g2 {
            out.extend_from_slice(&point.write_point_to_bytes_compressed());
        }
        out
    }

    /// Largest degree of a polynomial that can be committed.
    pub fn max_degree(&self) -> usize {
        self.g1.len() - 1
    }

    /// Largest degree of a polynomial that can be committed in G2, which
    /// bounds the number of points of a batched opening.
    pub fn g2_max_degree(&self) -> usize {
        self.g2.len() - 1
    }

    /// First `count` G1 powers.
    pub fn g1_powers(&self, count: usize) -> Result<&[G1Affine], KzgError> {
        self.g1.get(..count).ok_or(KzgError::SrsTooSmall {
            requested: count,
            available: self.g1.len(),
        })
    }

    /// First `count` G2 powers.
    pub fn g2_powers(&self, count: usize) -> Result<&[G2Affine], KzgError> {
        self.g2.get(..count).ok_or(KzgError::SrsTooSmall {
            requested: count,
            available: self.g2.len(),
        })
    }

    pub fn g1_generator(&self) -> G1Affine {
        self.g1[0]
    }

    pub fn g2_generator(&self) -> G2Affine {
        self.g2[0]
    }

    /// τ·G2
    pub fn g2_tau(&self) -> G2Affine {
        self.g2[1]
    }

    // Random-linear-combination check that consecutive powers differ by the
    // same τ in both groups:
    //   e(Σ r^i·g1[i+1], g2[0]) == e(Σ r^i·g1[i], g2[1])
    //   e(g1[0], Σ r^i·g2[i+1]) == e(g1[1], Σ r^i·g2[i])
    // r is derived from the points themselves.
    fn check_powers_consistent(&self) -> Result<(), KzgError> {
        let mut seed = Vec::with_capacity(
            self.g1.len() * SIZE_OF_G1_AFFINE_COMPRESSED
                + self.g2.len() * SIZE_OF_G2_AFFINE_COMPRESSED,
        );
        for point in &self.g1 {
            seed.extend_from_slice(&point.write_point_to_bytes_compressed());
        }
        for point in &self.g2 {
            seed.extend_from_slice(&point.write_point_to_bytes_compressed());
        }
        let r = helpers::hash_to_field_element(&seed);

        let g1_r = helpers::compute_powers(&r, self.g1.len() - 1);
        let g1_low = helpers::g1_lincomb(&self.g1[..self.g1.len() - 1], &g1_r)?;
        let g1_high = helpers::g1_lincomb(&self.g1[1..], &g1_r)?;
        if !helpers::pairings_verify(g1_high, self.g2[0], g1_low, self.g2[1]) {
            return Err(KzgError::SrsFormatError(
                "g1 powers are inconsistent with tau in g2".to_string(),
            ));
        }

        let g2_r = helpers::compute_powers(&r, self.g2.len() - 1);
        let g2_low = helpers::g2_lincomb(&self.g2[..self.g2.len() - 1], &g2_r)?;
        let g2_high = helpers::g2_lincomb(&self.g2[1..], &g2_r)?;
        if !helpers::pairings_verify(self.g1[0], g2_high, self.g1[1], g2_low) {
            return Err(KzgError::SrsFormatError(
                "g2 powers are inconsistent with tau in g1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Decodes consecutive compressed points.
pub fn decode_points<T: ReadPointFromBytes>(bytes: &[u8]) -> Result<Vec<T>, KzgError> {
    bytes
        .chunks_exact(T::compressed_point_size())
        .enumerate()
        .map(|(i, chunk)| {
            T::read_point_from_bytes_compressed(chunk)
                .map_err(|e| KzgError::SrsFormatError(format!("point {i}: {e}")))
        })
        .collect()
}

fn read_u32_be(bytes: &[u8], offset: usize) -> Result<u32, KzgError> {
    bytes
        .get(offset..offset + 4)
        .and_then(|b| b.try_into().ok())
        .map(u32::from_be_bytes)
        .ok_or(KzgError::SrsFormatError("truncated length field".to_string()))
}

fn advance(offset: usize, count: usize, size: usize, total: usize) -> Result<usize, KzgError> {
    let end = count
        .checked_mul(size)
        .and_then(|len| offset.checked_add(len))
        .ok_or(KzgError::SrsFormatError("point count overflows".to_string()))?;
    if end > total {
        return Err(KzgError::SrsFormatError("truncated point data".to_string()));
    }
    Ok(end)
}
