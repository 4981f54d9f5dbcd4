//! Producer side of bit-vector KZG commitments over bn254.
//!
//! - [kzg::KZG] commits to polynomials and opens them, singly or batched.
//! - [srs::load_srs_file] loads a powers-of-τ file with parallel point decoding.
//! - [assembler::ProofAssembler] runs one proving session; [assembler::prove]
//!   runs it end to end and returns the serialized proof.
//!
//! ```no_run
//! use ark_bn254::Fr;
//! use bitvec_kzg_primitives::{bitvector::BitVector, srs::SRS};
//! use bitvec_kzg_prover::assembler::prove;
//!
//! let srs = SRS::unsafe_setup(Fr::from(42u64), 7);
//! let bits = BitVector::from_bits(&[true, false, true, true, false, false, false, false])?;
//! let proof = prove(&srs, &bits, &[0, 2, 5])?;
//! # Ok::<(), bitvec_kzg_primitives::errors::KzgError>(())
//! ```

pub mod assembler;
pub mod kzg;
pub mod srs;
