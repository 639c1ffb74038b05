#![deny(unsafe_code)]
#![allow(missing_docs)]
#![warn(clippy::unwrap_used)]
#![deny(clippy::panic)]
#![allow(clippy::indexing_slicing)]

//! RIPEMD-160 Known Answer Tests
//!
//! Test vectors from the KU Leuven RIPEMD-160 page
//! (<https://homes.esat.kuleuven.be/~bosselae/ripemd160.html>), plus 1 MiB
//! streaming vectors that replay a 4 KiB origin buffer 256 times.
//!
//! ## Vector Sets
//! - `RIPEMD160_VECTORS`: single-update messages of 0 to 80 bytes, and one
//!   vector whose expected digest belongs to a different message
//! - `RIPEMD160_LONG_VECTORS`: chunked messages, with and without re-copying
//!   every chunk from the origin buffer

use super::runner::VectorExecutor;
use super::{
    DigestType, ExecutionMode, ExpectedResult, HashKatError, HashVector, VectorInput,
};

/// Size of the origin buffer replayed by the long vectors
pub const FLASH_DATA_LEN: usize = 4096;

const fn flash_block(seed: &[u8]) -> [u8; FLASH_DATA_LEN] {
    let mut block = [0u8; FLASH_DATA_LEN];
    let mut i = 0;
    while i < seed.len() {
        block[i] = seed[i];
        i += 1;
    }
    block
}

/// Origin buffer for the 1 MiB vectors: `"1234567890"` followed by zero bytes
pub static FLASH_DATA_RIPEMD160: [u8; FLASH_DATA_LEN] = flash_block(b"1234567890");

/// Origin buffer for the one-million-`a` vector
pub static MILLION_A_CHUNK: [u8; 1000] = [b'a'; 1000];

/// Short RIPEMD-160 vectors, hashed with one update call
pub static RIPEMD160_VECTORS: &[HashVector] = &[
    // Digest of "message digest" checked against "abc"
    HashVector {
        name: "RIPEMD160 invalid hash",
        digest_type: DigestType::Ripemd160,
        input: VectorInput::Hex("616263"),
        expected_output: "5d0689ef49d2fae572b881b123a85ffa21595f36",
        expected_result: ExpectedResult::Fail,
        expected_err_code: 0,
    },
    HashVector {
        name: "RIPEMD160 message_len=0",
        digest_type: DigestType::Ripemd160,
        input: VectorInput::Hex(""),
        expected_output: "9c1185a5c5e9fc54612808977ee8f548b2258d31",
        expected_result: ExpectedResult::Pass,
        expected_err_code: 0,
    },
    HashVector {
        name: "RIPEMD160 message_len=1",
        digest_type: DigestType::Ripemd160,
        input: VectorInput::Hex("61"), // "a"
        expected_output: "0bdc9d2d256b3ee9daae347be6f4dc835a467ffe",
        expected_result: ExpectedResult::Pass,
        expected_err_code: 0,
    },
    HashVector {
        name: "RIPEMD160 \"abc\" message_len=3",
        digest_type: DigestType::Ripemd160,
        input: VectorInput::Hex("616263"),
        expected_output: "8eb208f7e05d987a9b044a8e98c6b087f15a0bfc",
        expected_result: ExpectedResult::Pass,
        expected_err_code: 0,
    },
    HashVector {
        name: "RIPEMD160 \"message digest\" message_len=14",
        digest_type: DigestType::Ripemd160,
        input: VectorInput::Hex("6d65737361676520646967657374"),
        expected_output: "5d0689ef49d2fae572b881b123a85ffa21595f36",
        expected_result: ExpectedResult::Pass,
        expected_err_code: 0,
    },
    HashVector {
        name: "RIPEMD160 \"a..z\" message_len=26",
        digest_type: DigestType::Ripemd160,
        input: VectorInput::Hex("6162636465666768696a6b6c6d6e6f707172737475767778797a"),
        expected_output: "f71c27109c692c1b56bbdceb5b9d2865b3708dbc",
        expected_result: ExpectedResult::Pass,
        expected_err_code: 0,
    },
    HashVector {
        name: "RIPEMD160 \"abcdbcde...nopq\" message_len=56",
        digest_type: DigestType::Ripemd160,
        input: VectorInput::Hex(
            "6162636462636465636465666465666765666768666768696768696a68696a6b696a6b6c6a6b6c6d6b6c6d6e6c6d6e6f6d6e6f706e6f7071",
        ),
        expected_output: "12a053384a9c0c88e405a06c27dcf49ada62eb2b",
        expected_result: ExpectedResult::Pass,
        expected_err_code: 0,
    },
    HashVector {
        name: "RIPEMD160 \"A...Za..z0...9\" message_len=62",
        digest_type: DigestType::Ripemd160,
        input: VectorInput::Hex(
            "4142434445464748494a4b4c4d4e4f505152535455565758595a6162636465666768696a6b6c6d6e6f707172737475767778797a30313233343536373839",
        ),
        expected_output: "b0e20b6e3116640286ed3a87a5713079b21f5189",
        expected_result: ExpectedResult::Pass,
        expected_err_code: 0,
    },
    HashVector {
        name: "RIPEMD160 8 times \"1234567890\" message_len=80",
        digest_type: DigestType::Ripemd160,
        input: VectorInput::Hex(
            "3132333435363738393031323334353637383930313233343536373839303132333435363738393031323334353637383930313233343536373839303132333435363738393031323334353637383930",
        ),
        expected_output: "9b752e45573d4b39f4dbd3323cab82bf63326bfb",
        expected_result: ExpectedResult::Pass,
        expected_err_code: 0,
    },
];

/// Long RIPEMD-160 vectors, hashed in fixed-size chunks
pub static RIPEMD160_LONG_VECTORS: &[HashVector] = &[
    HashVector {
        name: "RIPEMD-160 message_len=1048576",
        digest_type: DigestType::Ripemd160,
        input: VectorInput::Repeated {
            source: &FLASH_DATA_RIPEMD160,
            chunk_length: 4096,
            update_iterations: 256,
            mode: ExecutionMode::Normal,
        },
        expected_output: "2c06e0ddf8460e85b0186fab6edc97cad94c3aa9",
        expected_result: ExpectedResult::Pass,
        expected_err_code: 0,
    },
    HashVector {
        name: "RIPEMD-160 flash memcpy message_len=1048576",
        digest_type: DigestType::Ripemd160,
        input: VectorInput::Repeated {
            source: &FLASH_DATA_RIPEMD160,
            chunk_length: 4096,
            update_iterations: 256,
            mode: ExecutionMode::Memcpy,
        },
        expected_output: "2c06e0ddf8460e85b0186fab6edc97cad94c3aa9",
        expected_result: ExpectedResult::Pass,
        expected_err_code: 0,
    },
    HashVector {
        name: "RIPEMD-160 1 million times \"a\" message_len=1000000",
        digest_type: DigestType::Ripemd160,
        input: VectorInput::Repeated {
            source: &MILLION_A_CHUNK,
            chunk_length: 1000,
            update_iterations: 1000,
            mode: ExecutionMode::Normal,
        },
        expected_output: "52783243c1697bdbe16d37f97f68f08325dc1528",
        expected_result: ExpectedResult::Pass,
        expected_err_code: 0,
    },
];

/// Test case name of the short vector set
pub const RIPEMD160_CASE: &str = "RIPEMD-160";
/// Test case name of the long vector set
pub const RIPEMD160_LONG_CASE: &str = "RIPEMD-160 long";

fn run_vectors(test_case: &str, vectors: &[HashVector]) -> Result<(), HashKatError> {
    let mut executor = VectorExecutor::default();
    for vector in vectors {
        let result = executor.run_vector(test_case, vector);
        if !result.passed {
            return Err(HashKatError::TestFailed {
                algorithm: result.algorithm,
                test_name: result.vector,
                message: result.error_message.unwrap_or_default(),
            });
        }
    }
    Ok(())
}

/// Run the short RIPEMD-160 KAT
///
/// # Errors
///
/// Returns `HashKatError::TestFailed` for the first vector that fails.
pub fn run_ripemd160_kat() -> Result<(), HashKatError> {
    run_vectors(RIPEMD160_CASE, RIPEMD160_VECTORS)
}

/// Run the long-message RIPEMD-160 KAT
///
/// # Errors
///
/// Returns `HashKatError::TestFailed` for the first vector that fails.
pub fn run_ripemd160_long_kat() -> Result<(), HashKatError> {
    run_vectors(RIPEMD160_LONG_CASE, RIPEMD160_LONG_VECTORS)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::hash_kat::decode_hex;
    use crate::hash_kat::engine::{HashEngine, Ripemd160Engine};

    #[test]
    fn test_ripemd160_kat() {
        let result = run_ripemd160_kat();
        assert!(result.is_ok(), "RIPEMD-160 KAT failed: {:?}", result);
    }

    #[test]
    fn test_ripemd160_long_kat() {
        let result = run_ripemd160_long_kat();
        assert!(result.is_ok(), "RIPEMD-160 long KAT failed: {:?}", result);
    }

    #[test]
    fn test_flash_block_layout() {
        assert_eq!(&FLASH_DATA_RIPEMD160[..10], b"1234567890");
        assert!(FLASH_DATA_RIPEMD160[10..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_invalid_vector_digest_belongs_to_message_digest() {
        let invalid = &RIPEMD160_VECTORS[0];
        let message_digest = &RIPEMD160_VECTORS[4];
        assert_eq!(invalid.expected_result, ExpectedResult::Fail);
        assert_eq!(invalid.expected_err_code, 0);
        assert_eq!(invalid.expected_output, message_digest.expected_output);
    }

    #[test]
    fn test_all_short_vectors_individually() {
        for vector in RIPEMD160_VECTORS {
            let VectorInput::Hex(message) = vector.input else {
                panic!("{} is not a short vector", vector.name);
            };
            let message = decode_hex(message).unwrap();
            let expected = decode_hex(vector.expected_output).unwrap();

            let mut out = [0u8; 20];
            Ripemd160Engine::digest(&message, &mut out).unwrap();

            match vector.expected_result {
                ExpectedResult::Pass => {
                    assert_eq!(out.as_slice(), expected.as_slice(), "{}", vector.name);
                }
                ExpectedResult::Fail => {
                    assert_ne!(out.as_slice(), expected.as_slice(), "{}", vector.name);
                }
            }
        }
    }
}
