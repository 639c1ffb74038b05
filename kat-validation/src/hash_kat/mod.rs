#![deny(unsafe_code)]
#![allow(missing_docs)]
#![warn(clippy::unwrap_used)]
#![deny(clippy::panic)]
// JUSTIFICATION: Test result counters - overflow is impossible with realistic test counts
#![allow(clippy::arithmetic_side_effects)]

//! Hash Known Answer Test (KAT) Framework
//!
//! This module validates streaming hash engines against fixed input/digest
//! pairs. Every vector is driven through the full engine lifecycle
//! (`starts` → `update`* → `finish`), the produced digest and status codes are
//! compared against the vector's expectations, and the result is recorded
//! without stopping the rest of the suite.
//!
//! ## Supported Vector Sets
//!
//! - RIPEMD-160: KU Leuven reference vectors
//!   (<https://homes.esat.kuleuven.be/~bosselae/ripemd160.html>)
//! - RIPEMD-160 long messages: 1 MiB chunked streaming, with and without
//!   re-copying every chunk from its origin buffer
//!
//! ## Test Vector Format
//!
//! Short vectors embed their message and digest as hex strings. Long vectors
//! reference a raw origin buffer that is fed repeatedly in fixed-size chunks.

pub mod buffers;
pub mod compare;
pub mod driver;
pub mod engine;
pub mod registry;
pub mod ripemd160_kat;
pub mod runner;
pub mod timer;

pub use buffers::ScratchBuffers;
pub use engine::{DigestEngine, EngineError, HashEngine, Ripemd160Engine};
pub use registry::{TestCase, TestRegistry};
pub use runner::{KatRunner, KatSummary, VectorExecutor};
pub use timer::{DisabledTimer, InstantTimer, Timer};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from hash KAT execution
#[derive(Debug, Error)]
pub enum HashKatError {
    /// Test vector validation failed
    #[error("KAT failed: {algorithm} - {test_name}: {message}")]
    TestFailed {
        /// Algorithm name
        algorithm: String,
        /// Test name
        test_name: String,
        /// Failure message
        message: String,
    },

    /// Hex decoding error
    #[error("Hex decode error: {0}")]
    HexError(String),

    /// Decoded data does not fit the scratch buffer
    #[error("Buffer too small: need {needed} bytes, capacity is {capacity}")]
    BufferTooSmall {
        /// Bytes required
        needed: usize,
        /// Bytes available
        capacity: usize,
    },

    /// Vector descriptor is inconsistent
    #[error("Invalid test vector: {0}")]
    InvalidVector(String),

    /// Engine returned a status other than the one the vector declares
    #[error("Status mismatch in {stage}: expected {expected}, got {actual}")]
    StatusMismatch {
        /// Lifecycle step that produced the status
        stage: &'static str,
        /// Declared status code
        expected: i32,
        /// Status code returned by the engine
        actual: i32,
    },

    /// Produced digest length differs from the expected digest length
    #[error("Digest length mismatch: expected {expected} bytes, got {actual}")]
    LengthMismatch {
        /// Expected length
        expected: usize,
        /// Produced length
        actual: usize,
    },

    /// Produced digest differs from a vector expected to pass
    #[error("Hash mismatch: got {got}, expected {expected}")]
    DigestMismatch {
        /// Produced digest (hex)
        got: String,
        /// Expected digest (hex)
        expected: String,
    },

    /// Produced digest matches a vector that is expected to fail
    #[error("Incorrect hash accepted: {digest} matched a vector expected to fail")]
    UnexpectedMatch {
        /// Produced digest (hex)
        digest: String,
    },

    /// Harness configuration rejected
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Hash algorithm a vector is written for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum DigestType {
    /// RIPEMD-160 (20-byte digest)
    Ripemd160,
}

impl DigestType {
    /// Display name used in reports
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            DigestType::Ripemd160 => "RIPEMD-160",
        }
    }
}

impl std::fmt::Display for DigestType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome a vector is designed to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpectedResult {
    /// Produced digest must equal the expected digest
    Pass,
    /// Produced digest must differ from the expected digest
    Fail,
}

/// How a long vector feeds its chunks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionMode {
    /// Hash the chunk already loaded in the input buffer
    Normal,
    /// Re-copy the chunk from its origin buffer before every update,
    /// emulating reads from slow non-volatile storage
    Memcpy,
}

/// Message source of a test vector
#[derive(Debug, Clone, Copy)]
pub enum VectorInput {
    /// Hex-encoded message, hashed with a single update
    Hex(&'static str),
    /// Raw origin buffer, hashed as `update_iterations` chunks of `chunk_length` bytes
    Repeated {
        /// Origin buffer the chunk is copied from
        source: &'static [u8],
        /// Bytes per update call
        chunk_length: usize,
        /// Number of update calls
        update_iterations: usize,
        /// Chunk feeding mode
        mode: ExecutionMode,
    },
}

impl VectorInput {
    /// Total number of message bytes fed to the engine
    #[must_use]
    pub fn message_len(&self) -> usize {
        match *self {
            VectorInput::Hex(hex) => hex.len() / 2,
            VectorInput::Repeated { chunk_length, update_iterations, .. } => {
                chunk_length.saturating_mul(update_iterations)
            }
        }
    }
}

/// A single known-answer test case
#[derive(Debug, Clone, Copy)]
pub struct HashVector {
    /// Human-readable vector name
    pub name: &'static str,
    /// Algorithm under test
    pub digest_type: DigestType,
    /// Message fed to the engine
    pub input: VectorInput,
    /// Hex-encoded expected digest
    pub expected_output: &'static str,
    /// Whether the digest comparison should succeed
    pub expected_result: ExpectedResult,
    /// Status code the engine must return from `update` and `finish`
    pub expected_err_code: i32,
}

impl HashVector {
    /// True for chunked long-message vectors
    #[must_use]
    pub fn is_long(&self) -> bool {
        matches!(self.input, VectorInput::Repeated { .. })
    }
}

/// Result of running a single KAT test
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KatTestResult {
    /// Test case identifier
    pub test_case: String,
    /// Vector name
    pub vector: String,
    /// Algorithm being tested
    pub algorithm: String,
    /// Whether the test passed
    pub passed: bool,
    /// Error message if test failed
    pub error_message: Option<String>,
    /// Test execution time in microseconds
    pub execution_time_us: u128,
}

impl KatTestResult {
    /// Create a passed test result
    #[must_use]
    pub fn passed(
        test_case: String,
        vector: String,
        algorithm: String,
        execution_time_us: u128,
    ) -> Self {
        Self { test_case, vector, algorithm, passed: true, error_message: None, execution_time_us }
    }

    /// Create a failed test result
    #[must_use]
    pub fn failed(
        test_case: String,
        vector: String,
        algorithm: String,
        error: String,
        execution_time_us: u128,
    ) -> Self {
        Self {
            test_case,
            vector,
            algorithm,
            passed: false,
            error_message: Some(error),
            execution_time_us,
        }
    }
}

/// Helper function to decode hex strings
///
/// # Errors
///
/// Returns `HashKatError::HexError` if the input string is not valid hex.
pub fn decode_hex(s: &str) -> Result<Vec<u8>, HashKatError> {
    hex::decode(s).map_err(|e| HashKatError::HexError(e.to_string()))
}

/// Decode a hex string into the front of `out`, returning the byte count
///
/// # Errors
///
/// Returns `HashKatError::BufferTooSmall` if the decoded data exceeds `out`,
/// or `HashKatError::HexError` on odd length or non-hex characters.
pub fn decode_hex_into(s: &str, out: &mut [u8]) -> Result<usize, HashKatError> {
    if s.len() % 2 != 0 {
        return Err(HashKatError::HexError(hex::FromHexError::OddLength.to_string()));
    }
    let len = s.len() / 2;
    let capacity = out.len();
    let dst = out.get_mut(..len).ok_or(HashKatError::BufferTooSmall { needed: len, capacity })?;
    hex::decode_to_slice(s, dst).map_err(|e| HashKatError::HexError(e.to_string()))?;
    Ok(len)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_hex_into_writes_prefix() {
        let mut buf = [0xffu8; 8];
        let n = decode_hex_into("616263", &mut buf).unwrap();
        assert_eq!(n, 3);
        assert_eq!(&buf[..4], &[0x61, 0x62, 0x63, 0xff]);
    }

    #[test]
    fn test_decode_hex_into_empty() {
        let mut buf = [0u8; 4];
        assert_eq!(decode_hex_into("", &mut buf).unwrap(), 0);
    }

    #[test]
    fn test_decode_hex_into_rejects_odd_length() {
        let mut buf = [0u8; 8];
        let err = decode_hex_into("abc", &mut buf).unwrap_err();
        assert!(matches!(err, HashKatError::HexError(_)));
    }

    #[test]
    fn test_decode_hex_into_rejects_non_hex() {
        let mut buf = [0u8; 8];
        let err = decode_hex_into("zz11", &mut buf).unwrap_err();
        assert!(matches!(err, HashKatError::HexError(_)));
    }

    #[test]
    fn test_decode_hex_into_rejects_oversize() {
        let mut buf = [0u8; 2];
        let err = decode_hex_into("616263", &mut buf).unwrap_err();
        assert!(matches!(err, HashKatError::BufferTooSmall { needed: 3, capacity: 2 }));
    }

    #[test]
    fn test_message_len() {
        assert_eq!(VectorInput::Hex("616263").message_len(), 3);
        let long = VectorInput::Repeated {
            source: &[0u8; 16],
            chunk_length: 16,
            update_iterations: 4,
            mode: ExecutionMode::Normal,
        };
        assert_eq!(long.message_len(), 64);
    }

    #[test]
    fn test_kat_test_result_constructors() {
        let ok = KatTestResult::passed("c".into(), "v".into(), "RIPEMD-160".into(), 5);
        assert!(ok.passed);
        assert!(ok.error_message.is_none());

        let bad =
            KatTestResult::failed("c".into(), "v".into(), "RIPEMD-160".into(), "boom".into(), 7);
        assert!(!bad.passed);
        assert_eq!(bad.error_message.as_deref(), Some("boom"));
        assert_eq!(bad.execution_time_us, 7);
    }
}
