//! Proof Assembler: drives one proving session for one bit vector.
//!
//! ```text
//! Empty -> VectorLoaded -> ConstraintProved -> Committed -> OpeningsReady -> Finalized
//! ```
//!
//! Transitions only go forward. An operation called in the wrong state fails
//! with [KzgError::InvalidState] and leaves the session untouched. In
//! particular no commitment is ever produced for a vector that failed the
//! boolean constraint.

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};

use ark_bn254::G1Affine;
use bitvec_kzg_primitives::{
    bitvector::BitVector,
    constraint::boolean_constraint_quotient,
    domain::Domain,
    errors::KzgError,
    polynomial::{interpolate, PolynomialCoeffForm},
    proof::{BitVectorProof, ConstraintProof, IndexedOpening},
    srs::SRS,
    transcript::Transcript,
};
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use tracing::{debug, instrument};

use crate::kzg::KZG;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblerState {
    Empty,
    VectorLoaded,
    ConstraintProved,
    Committed,
    OpeningsReady,
    Finalized,
}

impl AssemblerState {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssemblerState::Empty => "Empty",
            AssemblerState::VectorLoaded => "VectorLoaded",
            AssemblerState::ConstraintProved => "ConstraintProved",
            AssemblerState::Committed => "Committed",
            AssemblerState::OpeningsReady => "OpeningsReady",
            AssemblerState::Finalized => "Finalized",
        }
    }
}

struct Loaded<'a> {
    domain: Cow<'a, Domain>,
    advice: PolynomialCoeffForm,
}

struct Committed<'a> {
    loaded: Loaded<'a>,
    commitment: G1Affine,
    constraint: ConstraintProof,
    openings: BTreeMap<usize, IndexedOpening>,
}

enum Stage<'a> {
    Empty,
    VectorLoaded(Loaded<'a>),
    ConstraintProved(Loaded<'a>, PolynomialCoeffForm),
    Committed(Committed<'a>),
    OpeningsReady(Committed<'a>),
    Finalized,
}

impl Stage<'_> {
    fn state(&self) -> AssemblerState {
        match self {
            Stage::Empty => AssemblerState::Empty,
            Stage::VectorLoaded(_) => AssemblerState::VectorLoaded,
            Stage::ConstraintProved(..) => AssemblerState::ConstraintProved,
            Stage::Committed(_) => AssemblerState::Committed,
            Stage::OpeningsReady(_) => AssemblerState::OpeningsReady,
            Stage::Finalized => AssemblerState::Finalized,
        }
    }
}

pub struct ProofAssembler<'a> {
    kzg: KZG<'a>,
    shared_domain: Option<&'a Domain>,
    stage: Stage<'a>,
}

impl<'a> ProofAssembler<'a> {
    /// Starts a session that builds its own domain from the vector length.
    pub fn new(srs: &'a SRS) -> Self {
        Self {
            kzg: KZG::new(srs),
            shared_domain: None,
            stage: Stage::Empty,
        }
    }

    /// Starts a session reusing a domain shared with other sessions. The
    /// vector loaded later must have exactly `domain.size()` entries.
    pub fn with_domain(srs: &'a SRS, domain: &'a Domain) -> Self {
        Self {
            kzg: KZG::new(srs),
            shared_domain: Some(domain),
            stage: Stage::Empty,
        }
    }

    pub fn state(&self) -> AssemblerState {
        self.stage.state()
    }

    /// The commitment to the advice column, once [ProofAssembler::commit] ran.
    pub fn commitment(&self) -> Option<G1Affine> {
        match &self.stage {
            Stage::Committed(c) | Stage::OpeningsReady(c) => Some(c.commitment),
            _ => None,
        }
    }

    /// Loads the vector and interpolates the advice polynomial over the domain.
    pub fn load_vector(&mut self, bits: BitVector) -> Result<(), KzgError> {
        if !matches!(self.stage, Stage::Empty) {
            return Err(self.invalid_state("load_vector"));
        }

        let srs = self.kzg.srs();
        if bits.len() - 1 > srs.max_degree() {
            return Err(KzgError::SrsTooSmall {
                requested: bits.len(),
                available: srs.max_degree() + 1,
            });
        }

        let domain = match self.shared_domain {
            Some(domain) if domain.size() == bits.len() => Cow::Borrowed(domain),
            Some(domain) => {
                return Err(KzgError::InvalidInput(format!(
                    "vector of length {} does not match the shared domain of size {}",
                    bits.len(),
                    domain.size()
                )))
            },
            None => Cow::Owned(Domain::new(bits.len())?),
        };
        let advice = interpolate(bits.entries(), &domain)?;

        self.stage = Stage::VectorLoaded(Loaded { domain, advice });
        debug!(state = self.state().as_str(), "vector loaded");
        Ok(())
    }

    /// Computes the quotient of the boolean constraint, failing with
    /// [KzgError::ConstraintViolation] if some entry is not a bit.
    pub fn prove_constraint(&mut self) -> Result<(), KzgError> {
        let Stage::VectorLoaded(loaded) = &self.stage else {
            return Err(self.invalid_state("prove_constraint"));
        };

        let quotient = match boolean_constraint_quotient(&loaded.advice, &loaded.domain) {
            Ok(quotient) => quotient,
            Err(e) => {
                debug!(error = %e, "boolean constraint not satisfied");
                return Err(e);
            },
        };

        if let Stage::VectorLoaded(loaded) = std::mem::replace(&mut self.stage, Stage::Empty) {
            self.stage = Stage::ConstraintProved(loaded, quotient);
        }
        debug!(state = self.state().as_str(), "constraint proved");
        Ok(())
    }

    /// Commits to the advice column and to the constraint quotient and builds
    /// the constraint proof. Returns the commitment to the advice column.
    pub fn commit(&mut self) -> Result<G1Affine, KzgError> {
        let Stage::ConstraintProved(loaded, quotient) = &self.stage else {
            return Err(self.invalid_state("commit"));
        };

        // Equal to the Lagrange-form commitment of the bits, without an IFFT of
        // the srs points per session.
        let commitment = self.kzg.commit_coeff_form(&loaded.advice)?;
        let quotient_commitment = self.kzg.commit_coeff_form(quotient)?;

        let (mut transcript, zeta) =
            Transcript::constraint_challenge(loaded.domain.size(), &commitment, &quotient_commitment);
        let advice_eval = loaded.advice.evaluate(&zeta);
        let quotient_eval = quotient.evaluate(&zeta);
        let gamma = transcript.constraint_batch_challenge(&advice_eval, &quotient_eval);

        let batch = self.kzg.batch_open(
            &[loaded.advice.clone(), quotient.clone()],
            &[zeta],
            &gamma,
        )?;
        let constraint = ConstraintProof {
            quotient_commitment,
            advice_eval,
            quotient_eval,
            opening: batch.quotient_commitment,
        };

        if let Stage::ConstraintProved(loaded, _) = std::mem::replace(&mut self.stage, Stage::Empty)
        {
            self.stage = Stage::Committed(Committed {
                loaded,
                commitment,
                constraint,
                openings: BTreeMap::new(),
            });
        }
        debug!(state = self.state().as_str(), "committed");
        Ok(commitment)
    }

    /// Opens the advice column at `indices`. Duplicates, including indices
    /// opened by an earlier call, are opened once. The openings are computed
    /// in parallel.
    pub fn open(&mut self, indices: &[usize]) -> Result<(), KzgError> {
        let committed = match &self.stage {
            Stage::Committed(c) | Stage::OpeningsReady(c) => c,
            _ => return Err(self.invalid_state("open")),
        };

        let domain_size = committed.loaded.domain.size();
        if let Some(&index) = indices.iter().find(|&&i| i >= domain_size) {
            return Err(KzgError::IndexOutOfRange { index, domain_size });
        }
        let pending: Vec<usize> = indices
            .iter()
            .copied()
            .filter(|i| !committed.openings.contains_key(i))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let kzg = self.kzg;
        let advice = &committed.loaded.advice;
        let domain: &Domain = &committed.loaded.domain;
        let new_openings = pending
            .par_iter()
            .map(|&index| -> Result<IndexedOpening, KzgError> {
                let proof = kzg.open_at_index(advice, domain, index)?;
                Ok(IndexedOpening {
                    index,
                    value: proof.value,
                    proof: proof.quotient_commitment,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if let Stage::Committed(mut committed) | Stage::OpeningsReady(mut committed) =
            std::mem::replace(&mut self.stage, Stage::Empty)
        {
            committed
                .openings
                .extend(new_openings.into_iter().map(|o| (o.index, o)));
            self.stage = Stage::OpeningsReady(committed);
        }
        debug!(
            state = self.state().as_str(),
            opened = pending.len(),
            "openings ready"
        );
        Ok(())
    }

    /// Serializes the proof and ends the session, dropping the vector and its
    /// polynomials.
    pub fn finalize(&mut self) -> Result<Vec<u8>, KzgError> {
        if !matches!(self.stage, Stage::OpeningsReady(_)) {
            return Err(self.invalid_state("finalize"));
        }
        let Stage::OpeningsReady(committed) = std::mem::replace(&mut self.stage, Stage::Finalized)
        else {
            return Err(self.invalid_state("finalize"));
        };

        let proof = BitVectorProof {
            domain_size: committed.loaded.domain.size(),
            commitment: committed.commitment,
            constraint: committed.constraint,
            openings: committed.openings.into_values().collect(),
        };
        debug!(
            state = self.state().as_str(),
            openings = proof.openings.len(),
            "finalized"
        );
        Ok(proof.to_bytes())
    }

    fn invalid_state(&self, operation: &'static str) -> KzgError {
        KzgError::InvalidState {
            operation,
            state: self.state().as_str(),
        }
    }
}

/// Commits to `bit_vector`, proves that every entry is a bit and opens it at
/// `indices`. Returns the serialized [BitVectorProof].
#[instrument(skip_all, fields(domain_size = bit_vector.len(), indices = indices.len()))]
pub fn prove(srs: &SRS, bit_vector: &BitVector, indices: &[usize]) -> Result<Vec<u8>, KzgError> {
    run_session(ProofAssembler::new(srs), bit_vector, indices)
}

/// Same as [prove], reusing a domain shared across sessions.
#[instrument(skip_all, fields(domain_size = bit_vector.len(), indices = indices.len()))]
pub fn prove_with_domain(
    srs: &SRS,
    domain: &Domain,
    bit_vector: &BitVector,
    indices: &[usize],
) -> Result<Vec<u8>, KzgError> {
    run_session(ProofAssembler::with_domain(srs, domain), bit_vector, indices)
}

fn run_session(
    mut assembler: ProofAssembler<'_>,
    bit_vector: &BitVector,
    indices: &[usize],
) -> Result<Vec<u8>, KzgError> {
    assembler.load_vector(bit_vector.clone())?;
    assembler.prove_constraint()?;
    assembler.commit()?;
    assembler.open(indices)?;
    assembler.finalize()
}
