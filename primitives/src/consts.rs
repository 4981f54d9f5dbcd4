pub const BYTES_PER_FIELD_ELEMENT: usize = 32;
pub const SIZE_OF_G1_AFFINE_COMPRESSED: usize = 32; // in bytes
pub const SIZE_OF_G2_AFFINE_COMPRESSED: usize = 64; // in bytes

/// Curve identifier written in SRS files and proofs. Only bn254 is supported.
pub const CURVE_ID_BN254: u8 = 0x01;

/// Largest supported domain is 2^28, the two-adicity of the bn254 scalar field.
pub const MAX_DOMAIN_LOG_SIZE: u32 = 28;

pub const SRS_FILE_MAGIC: &[u8; 8] = b"BVKZGSRS";
// magic + curve id + max degree
pub const SRS_HEADER_SIZE: usize = 8 + 1 + 4;

pub const FIAT_SHAMIR_PROTOCOL_DOMAIN: &[u8] = b"BITVECKZG_FSTRANSCRIPT_V1_";
pub const CONSTRAINT_CHALLENGE_LABEL: &[u8] = b"boolean_constraint_zeta";
pub const CONSTRAINT_BATCH_CHALLENGE_LABEL: &[u8] = b"boolean_constraint_gamma";
pub const OPENINGS_BATCH_CHALLENGE_LABEL: &[u8] = b"openings_batch_r";

// curve id + domain size + commitment + constraint proof + opening count
pub const PROOF_FIXED_SIZE: usize = 1
    + 8
    + SIZE_OF_G1_AFFINE_COMPRESSED
    + 2 * SIZE_OF_G1_AFFINE_COMPRESSED
    + 2 * BYTES_PER_FIELD_ELEMENT
    + 8;
// index + value + proof
pub const INDEXED_OPENING_SIZE: usize = 8 + BYTES_PER_FIELD_ELEMENT + SIZE_OF_G1_AFFINE_COMPRESSED;
