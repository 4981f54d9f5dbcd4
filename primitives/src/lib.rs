//! ## Library Design / Architecture
//!
//! This crate holds the types and pure algorithms shared by the
//! `bitvec-kzg-prover` and `bitvec-kzg-verifier` crates, which together commit
//! to a bit vector laid out as a PLONK advice column and prove individual
//! positions of it.
//!
//! ### Data Types
//!
//! The main data pipeline goes:
//! > bits -> [bitvector::BitVector] ->
//! > [polynomial::PolynomialEvalForm] -> [polynomial::PolynomialCoeffForm] ->
//! > KZG Commitment / [proof::BitVectorProof]
//!
//! - BitVector: bn254 field elements array
//!   - meaningful to the outer laconic OT protocol
//!   - length is a power of two, every entry is expected to be 0 or 1
//! - Polynomial: bn254 field elements array, interpreted as evaluations over a
//!   radix-2 [domain::Domain] or as monomial coefficients
//! - SRS: powers of τ in G1 and G2, see [srs::SRS]
//! - BitVectorProof: commitment + [proof::ConstraintProof] + openings, encoded
//!   with [proof::BitVectorProof::to_bytes]
//!
//! The bit vector is committed as the evaluations of the advice polynomial
//! B(X) over the domain H. Boolean-ness of every entry is the polynomial
//! identity `B(X)·(B(X) - 1) = Q(X)·Z_H(X)`, see [constraint].
//!
//! ### Fiat-Shamir
//!
//! Challenges are never sampled inside the commitment engine. The prover's
//! assembler and the verifier both derive them from a [transcript::Transcript]
//! and pass them down explicitly.

pub mod bitvector;
pub mod consts;
pub mod constraint;
pub mod domain;
pub mod errors;
pub mod helpers;
pub mod polynomial;
pub mod proof;
pub mod srs;
pub mod traits;
pub mod transcript;
