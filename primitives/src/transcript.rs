//! Fiat-Shamir transcript shared by the prover's assembler and the verifier.
//!
//! Every message is absorbed as `label | length (u64 BE) | bytes` after the
//! protocol domain separator. A challenge is the SHA-256 digest of everything
//! absorbed so far followed by the challenge label, reduced mod r. The
//! challenge is then absorbed itself so that later challenges depend on it.
//!
//! The order of absorption for a bit-vector proof is:
//! 1. domain size, commitment to B, commitment to Q -> ζ
//! 2. b = B(ζ), q = Q(ζ) -> γ
//! 3. constraint opening proof, every indexed opening -> r

use ark_bn254::{Fr, G1Affine};

extern crate alloc;
use alloc::vec::Vec;

use crate::{
    consts::{
        CONSTRAINT_BATCH_CHALLENGE_LABEL, CONSTRAINT_CHALLENGE_LABEL,
        FIAT_SHAMIR_PROTOCOL_DOMAIN, OPENINGS_BATCH_CHALLENGE_LABEL,
    },
    helpers::{hash_to_field_element, usize_to_be_bytes},
    proof::IndexedOpening,
    traits::{ReadFrFromBytes, WritePointToBytes},
};

#[derive(Debug, Clone)]
pub struct Transcript {
    state: Vec<u8>,
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

impl Transcript {
    pub fn new() -> Self {
        Self {
            state: FIAT_SHAMIR_PROTOCOL_DOMAIN.to_vec(),
        }
    }

    pub fn append_bytes(&mut self, label: &'static [u8], bytes: &[u8]) {
        self.state.extend_from_slice(label);
        self.state
            .extend_from_slice(&usize_to_be_bytes(bytes.len()));
        self.state.extend_from_slice(bytes);
    }

    pub fn append_u64(&mut self, label: &'static [u8], value: u64) {
        self.append_bytes(label, &value.to_be_bytes());
    }

    pub fn append_point(&mut self, label: &'static [u8], point: &G1Affine) {
        self.append_bytes(label, &point.write_point_to_bytes_compressed());
    }

    pub fn append_scalar(&mut self, label: &'static [u8], scalar: &Fr) {
        self.append_bytes(label, &scalar.to_bytes_be());
    }

    /// Squeezes a challenge and absorbs it back into the transcript.
    pub fn challenge_scalar(&mut self, label: &'static [u8]) -> Fr {
        let mut input = Vec::with_capacity(self.state.len() + label.len());
        input.extend_from_slice(&self.state);
        input.extend_from_slice(label);
        let challenge = hash_to_field_element(&input);
        self.append_scalar(label, &challenge);
        challenge
    }

    /// Starts the transcript of a bit-vector proof and derives the point ζ at
    /// which the boolean identity is checked.
    pub fn constraint_challenge(
        domain_size: usize,
        commitment: &G1Affine,
        quotient_commitment: &G1Affine,
    ) -> (Self, Fr) {
        let mut transcript = Self::new();
        transcript.append_u64(b"domain_size", domain_size as u64);
        transcript.append_point(b"advice_commitment", commitment);
        transcript.append_point(b"quotient_commitment", quotient_commitment);
        let zeta = transcript.challenge_scalar(CONSTRAINT_CHALLENGE_LABEL);
        (transcript, zeta)
    }

    /// Derives γ, the challenge combining the openings of B and Q at ζ.
    pub fn constraint_batch_challenge(&mut self, advice_eval: &Fr, quotient_eval: &Fr) -> Fr {
        self.append_scalar(b"advice_eval", advice_eval);
        self.append_scalar(b"quotient_eval", quotient_eval);
        self.challenge_scalar(CONSTRAINT_BATCH_CHALLENGE_LABEL)
    }

    /// Derives r, the challenge combining all indexed openings.
    pub fn openings_batch_challenge(
        &mut self,
        constraint_opening: &G1Affine,
        openings: &[IndexedOpening],
    ) -> Fr {
        self.append_point(b"constraint_opening", constraint_opening);
        self.append_u64(b"opening_count", openings.len() as u64);
        for opening in openings {
            self.append_u64(b"opening_index", opening.index as u64);
            self.append_scalar(b"opening_value", &opening.value);
            self.append_point(b"opening_proof", &opening.proof);
        }
        self.challenge_scalar(OPENINGS_BATCH_CHALLENGE_LABEL)
    }
}
