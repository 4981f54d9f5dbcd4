use thiserror::Error;

// Need to explicitly import alloc because we are in a no-std environment.
extern crate alloc;
use alloc::string::String;

/// Errors related to Polynomial operations.
///
/// The `PolynomialError` enum encapsulates all possible errors that can occur
/// during operations on the polynomial types, such as FFT transformations and
/// divisions that are required to be exact.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum PolynomialError {
    /// The numerator does not vanish on the evaluation domain, so it is not a
    /// multiple of the vanishing polynomial.
    #[error("polynomial does not vanish on the evaluation domain")]
    NonVanishingRemainder,

    /// Error related to Fast Fourier Transform (FFT) operations with a descriptive message.
    #[error("FFT error: {0}")]
    FFTError(String),

    #[error("invalid domain size {0}: must be a power of two no larger than 2^28")]
    InvalidDomainSize(usize),

    #[error("length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// A generic error with a descriptive message.
    #[error("generic error: {0}")]
    GenericError(String),
}

/// Errors related to KZG operations.
///
/// The `KzgError` enum encapsulates all possible errors that can occur while
/// loading an SRS, committing, opening, assembling or decoding proofs. A failed
/// verification is not an error: verifiers return `Ok(false)`.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum KzgError {
    /// Wraps errors originating from Polynomial operations.
    #[error("polynomial error: {0}")]
    PolynomialError(#[from] PolynomialError),

    #[error("MSM error: {0}")]
    MsmError(String),

    /// Error related to serialization with a descriptive message.
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// The SRS bytes are malformed, truncated or inconsistent.
    #[error("SRS format error: {0}")]
    SrsFormatError(String),

    /// More SRS powers were requested than were loaded.
    #[error("SRS too small: requested {requested} powers, {available} available")]
    SrsTooSmall { requested: usize, available: usize },

    /// Error when polynomial degree exceeds SRS capacity
    #[error("polynomial degree {degree} exceeds SRS max degree {max_degree}")]
    DegreeExceeded { degree: usize, max_degree: usize },

    /// The bit vector holds a value outside {0, 1}.
    #[error("boolean constraint violated at position {position}")]
    ConstraintViolation { position: usize },

    /// The proof assembler was driven out of order.
    #[error("cannot {operation} in state {state}")]
    InvalidState {
        operation: &'static str,
        state: &'static str,
    },

    /// Malformed wire-format input.
    #[error("deserialization error: {0}")]
    DeserializationError(String),

    /// Error related to points that are not valid group elements.
    #[error("not on curve error: {0}")]
    NotOnCurveError(String),

    #[error("invalid bit vector length {0}: must be a non-zero power of two")]
    InvalidVectorLength(usize),

    #[error("index {index} out of range for domain of size {domain_size}")]
    IndexOutOfRange { index: usize, domain_size: usize },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A generic error with a descriptive message.
    #[error("generic error: {0}")]
    GenericError(String),
}
