#![deny(unsafe_code)]
#![warn(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! Digest comparison honouring the vector's expected outcome.

use super::{ExpectedResult, HashKatError};
use tracing::debug;

/// Compare a produced digest against the expected digest
///
/// Lengths are compared first. A vector expected to fail passes only when
/// the digests differ.
///
/// # Errors
///
/// Returns `HashKatError::LengthMismatch`, `HashKatError::DigestMismatch`
/// or `HashKatError::UnexpectedMatch` when the outcome contradicts `expected_result`.
pub fn compare_digest(
    actual: &[u8],
    expected: &[u8],
    expected_result: ExpectedResult,
) -> Result<(), HashKatError> {
    if actual.len() != expected.len() {
        return Err(HashKatError::LengthMismatch {
            expected: expected.len(),
            actual: actual.len(),
        });
    }

    let matches = actual == expected;
    match (expected_result, matches) {
        (ExpectedResult::Pass, true) => Ok(()),
        (ExpectedResult::Pass, false) => Err(HashKatError::DigestMismatch {
            got: hex::encode(actual),
            expected: hex::encode(expected),
        }),
        (ExpectedResult::Fail, false) => {
            debug!(
                got = %hex::encode(actual),
                expected = %hex::encode(expected),
                "mismatch detected as expected"
            );
            Ok(())
        }
        (ExpectedResult::Fail, true) => {
            Err(HashKatError::UnexpectedMatch { digest: hex::encode(actual) })
        }
    }
}
