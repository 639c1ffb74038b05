#![deny(unsafe_code)]
#![warn(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! Streaming hash driver
//!
//! Loads a vector into the scratch buffers and walks one engine context
//! through `starts` → `update`* → `finish`, checking every status code
//! against the vector's declaration.

use super::buffers::ScratchBuffers;
use super::engine::{EngineError, HashContext, HashEngine, status_code};
use super::{ExecutionMode, HashKatError, HashVector, VectorInput, decode_hex_into};
use tracing::trace;

/// Byte counts established during setup
///
/// Only [`load_vector`] produces one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadedVector {
    pub(crate) input_len: usize,
    pub(crate) expected_len: usize,
}

impl LoadedVector {
    /// Bytes of the input buffer fed per update call
    #[must_use]
    pub fn input_len(&self) -> usize {
        self.input_len
    }

    /// Length of the decoded expected digest
    #[must_use]
    pub fn expected_len(&self) -> usize {
        self.expected_len
    }
}

fn prefix<'a>(
    vector: &HashVector,
    bytes: &'a [u8],
    len: usize,
) -> Result<&'a [u8], HashKatError> {
    bytes.get(..len).ok_or_else(|| {
        HashKatError::InvalidVector(format!(
            "{}: loaded length {} exceeds {} available bytes",
            vector.name,
            len,
            bytes.len()
        ))
    })
}

/// Decode or copy a vector into freshly cleared scratch buffers
///
/// Short vectors are hex-decoded. Long vectors copy one chunk of their raw
/// origin buffer, which is then replayed by [`stream_digest`].
///
/// # Errors
///
/// Returns `HashKatError::HexError`, `HashKatError::BufferTooSmall` or
/// `HashKatError::InvalidVector` when the vector cannot be loaded.
pub fn load_vector(
    vector: &HashVector,
    buffers: &mut ScratchBuffers,
) -> Result<LoadedVector, HashKatError> {
    let input_len = match vector.input {
        VectorInput::Hex(hex) => decode_hex_into(hex, buffers.input_mut())?,
        VectorInput::Repeated { source, chunk_length, .. } => {
            let chunk = source.get(..chunk_length).ok_or_else(|| {
                HashKatError::InvalidVector(format!(
                    "{}: chunk length {} exceeds origin buffer of {} bytes",
                    vector.name,
                    chunk_length,
                    source.len()
                ))
            })?;
            buffers.load_input(chunk)?;
            chunk_length
        }
    };
    let expected_len = decode_hex_into(vector.expected_output, buffers.expected_output_mut())?;
    Ok(LoadedVector { input_len, expected_len })
}

fn check_status<T>(
    stage: &'static str,
    expected: i32,
    result: &Result<T, EngineError>,
) -> Result<(), HashKatError> {
    let actual = status_code(result);
    if actual == expected {
        Ok(())
    } else {
        Err(HashKatError::StatusMismatch { stage, expected, actual })
    }
}

/// Hash the loaded vector through the streaming API
///
/// Returns the number of digest bytes written to the output buffer, or
/// `None` when `finish` failed with exactly the status the vector declares.
///
/// # Errors
///
/// Returns `HashKatError::StatusMismatch` on the first status that differs
/// from the declaration, or a buffer error if a `Memcpy` reload overflows.
pub fn stream_digest<E: HashEngine>(
    vector: &HashVector,
    loaded: LoadedVector,
    buffers: &mut ScratchBuffers,
) -> Result<Option<usize>, HashKatError> {
    let expected = vector.expected_err_code;
    let mut ctx = HashContext::<E>::acquire();

    check_status("starts", 0, &ctx.starts())?;

    match vector.input {
        VectorInput::Hex(_) => {
            let update = ctx.update(prefix(vector, buffers.input(), loaded.input_len)?);
            check_status("update", expected, &update)?;
        }
        VectorInput::Repeated { source, update_iterations, mode, .. } => {
            let chunk = prefix(vector, source, loaded.input_len)?;
            for iteration in 0..update_iterations {
                if mode == ExecutionMode::Memcpy {
                    buffers.load_input(chunk)?;
                }
                let update = ctx.update(prefix(vector, buffers.input(), loaded.input_len)?);
                check_status("update", expected, &update)?;
                trace!(iteration, chunk = loaded.input_len, "chunk absorbed");
            }
        }
    }

    let finish = ctx.finish(buffers.output_mut());
    check_status("finish", expected, &finish)?;
    Ok(finish.ok())
}

/// Hash the loaded input through the engine's one-shot API
///
/// Same return convention as [`stream_digest`].
///
/// # Errors
///
/// Returns `HashKatError::StatusMismatch` if the status differs from the declaration.
pub fn one_shot_digest<E: HashEngine>(
    vector: &HashVector,
    loaded: LoadedVector,
    buffers: &mut ScratchBuffers,
) -> Result<Option<usize>, HashKatError> {
    let (input, output) = buffers.io_mut();
    let result = E::digest(prefix(vector, input, loaded.input_len)?, output);
    check_status("digest", vector.expected_err_code, &result)?;
    Ok(result.ok())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::hash_kat::engine::Ripemd160Engine;
    use crate::hash_kat::{DigestType, ExpectedResult};

    const ABC: HashVector = HashVector {
        name: "abc",
        digest_type: DigestType::Ripemd160,
        input: VectorInput::Hex("616263"),
        expected_output: "8eb208f7e05d987a9b044a8e98c6b087f15a0bfc",
        expected_result: ExpectedResult::Pass,
        expected_err_code: 0,
    };

    #[test]
    fn test_load_short_vector() {
        let mut buffers = ScratchBuffers::default();
        let loaded = load_vector(&ABC, &mut buffers).unwrap();
        assert_eq!(loaded, LoadedVector { input_len: 3, expected_len: 20 });
        assert_eq!(&buffers.input()[..3], b"abc");
    }

    #[test]
    fn test_stream_and_one_shot_agree() {
        let mut buffers = ScratchBuffers::default();
        let loaded = load_vector(&ABC, &mut buffers).unwrap();

        let n = stream_digest::<Ripemd160Engine>(&ABC, loaded, &mut buffers).unwrap().unwrap();
        let streamed = buffers.output()[..n].to_vec();

        let m = one_shot_digest::<Ripemd160Engine>(&ABC, loaded, &mut buffers).unwrap().unwrap();
        assert_eq!(&buffers.output()[..m], streamed.as_slice());
        assert_eq!(&buffers.output()[..m], &buffers.expected_output()[..loaded.expected_len]);
    }

    #[test]
    fn test_chunk_longer_than_origin_is_invalid() {
        static ORIGIN: [u8; 4] = *b"1234";
        let vector = HashVector {
            name: "short origin",
            input: VectorInput::Repeated {
                source: &ORIGIN,
                chunk_length: 8,
                update_iterations: 2,
                mode: ExecutionMode::Normal,
            },
            ..ABC
        };
        let mut buffers = ScratchBuffers::default();
        let err = load_vector(&vector, &mut buffers).unwrap_err();
        assert!(matches!(err, HashKatError::InvalidVector(_)));
    }

    #[test]
    fn test_declared_error_code_mismatch() {
        let vector = HashVector { expected_err_code: EngineError::BAD_INPUT_DATA, ..ABC };
        let mut buffers = ScratchBuffers::default();
        let loaded = load_vector(&vector, &mut buffers).unwrap();
        let err = stream_digest::<Ripemd160Engine>(&vector, loaded, &mut buffers).unwrap_err();
        assert!(matches!(
            err,
            HashKatError::StatusMismatch { stage: "update", expected: EngineError::BAD_INPUT_DATA, actual: 0 }
        ));
    }

    #[test]
    fn test_memcpy_mode_matches_normal_mode() {
        static ORIGIN: [u8; 64] = [0x5a; 64];
        let normal = HashVector {
            name: "normal",
            input: VectorInput::Repeated {
                source: &ORIGIN,
                chunk_length: 64,
                update_iterations: 3,
                mode: ExecutionMode::Normal,
            },
            ..ABC
        };
        let memcpy = HashVector {
            name: "memcpy",
            input: VectorInput::Repeated {
                source: &ORIGIN,
                chunk_length: 64,
                update_iterations: 3,
                mode: ExecutionMode::Memcpy,
            },
            ..ABC
        };

        let mut buffers = ScratchBuffers::default();
        let loaded = load_vector(&normal, &mut buffers).unwrap();
        let n = stream_digest::<Ripemd160Engine>(&normal, loaded, &mut buffers).unwrap().unwrap();
        let first = buffers.output()[..n].to_vec();

        buffers.clear();
        let loaded = load_vector(&memcpy, &mut buffers).unwrap();
        let n = stream_digest::<Ripemd160Engine>(&memcpy, loaded, &mut buffers).unwrap().unwrap();
        assert_eq!(&buffers.output()[..n], first.as_slice());

        let mut whole = [0u8; 20];
        Ripemd160Engine::digest(&[0x5a; 192], &mut whole).unwrap();
        assert_eq!(first.as_slice(), &whole);
    }

    fn repeated(mode: ExecutionMode) -> HashVector {
        static ORIGIN: [u8; 64] = [0x5a; 64];
        HashVector {
            name: "repeated",
            input: VectorInput::Repeated {
                source: &ORIGIN,
                chunk_length: 64,
                update_iterations: 3,
                mode,
            },
            ..ABC
        }
    }

    fn whole_digest() -> [u8; 20] {
        let mut whole = [0u8; 20];
        Ripemd160Engine::digest(&[0x5a; 192], &mut whole).unwrap();
        whole
    }

    #[test]
    fn test_memcpy_mode_recopies_origin_before_each_update() {
        let vector = repeated(ExecutionMode::Memcpy);
        let mut buffers = ScratchBuffers::default();
        let loaded = load_vector(&vector, &mut buffers).unwrap();
        buffers.input_mut()[..64].fill(0);

        let n = stream_digest::<Ripemd160Engine>(&vector, loaded, &mut buffers).unwrap().unwrap();
        assert_eq!(&buffers.output()[..n], &whole_digest());
    }

    #[test]
    fn test_normal_mode_replays_input_buffer() {
        let vector = repeated(ExecutionMode::Normal);
        let mut buffers = ScratchBuffers::default();
        let loaded = load_vector(&vector, &mut buffers).unwrap();
        buffers.input_mut()[..64].fill(0);

        let n = stream_digest::<Ripemd160Engine>(&vector, loaded, &mut buffers).unwrap().unwrap();
        assert_ne!(&buffers.output()[..n], &whole_digest());

        let mut zeros = [0u8; 20];
        Ripemd160Engine::digest(&[0; 192], &mut zeros).unwrap();
        assert_eq!(&buffers.output()[..n], &zeros);
    }

    #[test]
    fn test_loaded_length_beyond_buffers_is_invalid() {
        let vector = repeated(ExecutionMode::Memcpy);
        let mut buffers = ScratchBuffers::default();
        let loaded = load_vector(&vector, &mut buffers).unwrap();

        let mut small = ScratchBuffers::new(16, 64);
        let err = stream_digest::<Ripemd160Engine>(&vector, loaded, &mut small).unwrap_err();
        assert!(matches!(err, HashKatError::BufferTooSmall { needed: 64, capacity: 16 }));

        let oversized = LoadedVector { input_len: 100, ..loaded };
        let err = stream_digest::<Ripemd160Engine>(&vector, oversized, &mut buffers).unwrap_err();
        assert!(matches!(err, HashKatError::InvalidVector(_)));

        let err = one_shot_digest::<Ripemd160Engine>(&ABC, oversized, &mut small).unwrap_err();
        assert!(matches!(err, HashKatError::InvalidVector(_)));
    }
}
