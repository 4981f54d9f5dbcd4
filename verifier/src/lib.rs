//! Consumer side of bit-vector KZG commitments over bn254.
//!
//! [proof::verify] checks a serialized proof from `bitvec-kzg-prover` against
//! a set of claimed bits. It builds on [verify::verify_opening] for single
//! openings and on the checks of [batch] for many openings at once. All of
//! them only need public data: the SRS, the proof and the claims.

pub mod batch;
pub mod proof;
pub mod verify;
