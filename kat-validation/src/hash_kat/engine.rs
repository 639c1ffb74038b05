#![deny(unsafe_code)]
#![warn(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! Hash engine seam
//!
//! The harness only depends on the lifecycle below; the hashing itself is
//! delegated to a RustCrypto `digest` implementation.

use super::DigestType;
use digest::{Digest, FixedOutputReset};
use std::ops::{Deref, DerefMut};
use thiserror::Error;
use tracing::trace;

/// Errors reported by a hash engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Lifecycle violation or unusable argument
    #[error("bad input data: {0}")]
    BadInputData(&'static str),
}

impl EngineError {
    /// Status code for [`EngineError::BadInputData`]
    pub const BAD_INPUT_DATA: i32 = -0x5100;

    /// Signed status code of this error; success is `0`
    #[must_use]
    pub fn code(&self) -> i32 {
        match self {
            EngineError::BadInputData(_) => Self::BAD_INPUT_DATA,
        }
    }
}

/// Collapse an engine result into its status code
#[must_use]
pub fn status_code<T>(result: &Result<T, EngineError>) -> i32 {
    result.as_ref().err().map_or(0, EngineError::code)
}

/// Streaming hash engine contract
///
/// `new` is the init step. A context must be started before it accepts data;
/// `finish` writes the digest into the front of `output` and returns its length.
pub trait HashEngine: Sized {
    /// Algorithm implemented by this engine
    const DIGEST_TYPE: DigestType;

    /// Allocate an idle context
    fn new() -> Self;

    /// Digest length in bytes
    fn output_size(&self) -> usize;

    /// Begin a new message
    ///
    /// # Errors
    ///
    /// Engine-specific.
    fn starts(&mut self) -> Result<(), EngineError>;

    /// Absorb message bytes
    ///
    /// # Errors
    ///
    /// Returns `EngineError::BadInputData` if the context was not started.
    fn update(&mut self, input: &[u8]) -> Result<(), EngineError>;

    /// Write the digest and leave the context idle
    ///
    /// # Errors
    ///
    /// Returns `EngineError::BadInputData` if the context was not started or
    /// `output` is shorter than the digest.
    fn finish(&mut self, output: &mut [u8]) -> Result<usize, EngineError>;

    /// Release any state held by the context
    fn free(&mut self);

    /// Hash `input` in a single call
    ///
    /// # Errors
    ///
    /// Returns `EngineError::BadInputData` if `output` is shorter than the digest.
    fn digest(input: &[u8], output: &mut [u8]) -> Result<usize, EngineError>;
}

/// RustCrypto hashers the harness knows how to label
pub trait KnownDigest: Digest + FixedOutputReset {
    /// Algorithm identifier of the hasher
    const DIGEST_TYPE: DigestType;
}

impl KnownDigest for ripemd::Ripemd160 {
    const DIGEST_TYPE: DigestType = DigestType::Ripemd160;
}

/// [`HashEngine`] adapter over any fixed-output RustCrypto hasher
pub struct DigestEngine<D> {
    hasher: D,
    started: bool,
}

/// RIPEMD-160 engine backed by the `ripemd` crate
pub type Ripemd160Engine = DigestEngine<ripemd::Ripemd160>;

fn write_digest(digest: &[u8], output: &mut [u8]) -> Result<usize, EngineError> {
    let dst = output
        .get_mut(..digest.len())
        .ok_or(EngineError::BadInputData("output buffer shorter than digest"))?;
    dst.copy_from_slice(digest);
    Ok(digest.len())
}

impl<D: KnownDigest> DigestEngine<D> {
    fn ensure_started(&self) -> Result<(), EngineError> {
        if self.started { Ok(()) } else { Err(EngineError::BadInputData("context not started")) }
    }
}

impl<D: KnownDigest> HashEngine for DigestEngine<D> {
    const DIGEST_TYPE: DigestType = D::DIGEST_TYPE;

    fn new() -> Self {
        Self { hasher: <D as Digest>::new(), started: false }
    }

    fn output_size(&self) -> usize {
        <D as Digest>::output_size()
    }

    fn starts(&mut self) -> Result<(), EngineError> {
        Digest::reset(&mut self.hasher);
        self.started = true;
        Ok(())
    }

    fn update(&mut self, input: &[u8]) -> Result<(), EngineError> {
        self.ensure_started()?;
        Digest::update(&mut self.hasher, input);
        Ok(())
    }

    fn finish(&mut self, output: &mut [u8]) -> Result<usize, EngineError> {
        self.ensure_started()?;
        if output.len() < self.output_size() {
            return Err(EngineError::BadInputData("output buffer shorter than digest"));
        }
        let digest = Digest::finalize_reset(&mut self.hasher);
        self.started = false;
        write_digest(&digest, output)
    }

    fn free(&mut self) {
        Digest::reset(&mut self.hasher);
        self.started = false;
    }

    fn digest(input: &[u8], output: &mut [u8]) -> Result<usize, EngineError> {
        let digest = <D as Digest>::digest(input);
        write_digest(&digest, output)
    }
}

/// Scoped owner of one engine context
///
/// Dropping the guard frees the context, so an early return from a failed
/// check never leaks it.
pub struct HashContext<E: HashEngine> {
    engine: E,
}

impl<E: HashEngine> HashContext<E> {
    /// Initialise a fresh context
    #[must_use]
    pub fn acquire() -> Self {
        trace!(algorithm = %E::DIGEST_TYPE, "hash context acquired");
        Self { engine: E::new() }
    }
}

impl<E: HashEngine> Deref for HashContext<E> {
    type Target = E;

    fn deref(&self) -> &E {
        &self.engine
    }
}

impl<E: HashEngine> DerefMut for HashContext<E> {
    fn deref_mut(&mut self) -> &mut E {
        &mut self.engine
    }
}

impl<E: HashEngine> Drop for HashContext<E> {
    fn drop(&mut self) {
        self.engine.free();
        trace!(algorithm = %E::DIGEST_TYPE, "hash context freed");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_streaming_matches_one_shot() {
        let mut ctx = Ripemd160Engine::new();
        ctx.starts().unwrap();
        ctx.update(b"ab").unwrap();
        ctx.update(b"c").unwrap();
        let mut streamed = [0u8; 20];
        assert_eq!(ctx.finish(&mut streamed).unwrap(), 20);

        let mut one_shot = [0u8; 20];
        assert_eq!(Ripemd160Engine::digest(b"abc", &mut one_shot).unwrap(), 20);

        assert_eq!(streamed, one_shot);
        assert_eq!(hex::encode(streamed), "8eb208f7e05d987a9b044a8e98c6b087f15a0bfc");
    }

    #[test]
    fn test_update_before_starts_is_rejected() {
        let mut ctx = Ripemd160Engine::new();
        let result = ctx.update(b"abc");
        assert_eq!(status_code(&result), EngineError::BAD_INPUT_DATA);
    }

    #[test]
    fn test_finish_leaves_context_idle() {
        let mut ctx = Ripemd160Engine::new();
        ctx.starts().unwrap();
        let mut out = [0u8; 20];
        ctx.finish(&mut out).unwrap();
        assert!(ctx.update(b"x").is_err());
        assert!(ctx.finish(&mut out).is_err());
    }

    #[test]
    fn test_short_output_buffer() {
        let mut ctx = Ripemd160Engine::new();
        ctx.starts().unwrap();
        let mut out = [0u8; 19];
        let result = ctx.finish(&mut out);
        assert_eq!(status_code(&result), EngineError::BAD_INPUT_DATA);
        assert!(Ripemd160Engine::digest(b"", &mut out).is_err());
    }

    #[test]
    fn test_restart_discards_previous_message() {
        let mut ctx = Ripemd160Engine::new();
        ctx.starts().unwrap();
        ctx.update(b"garbage").unwrap();
        ctx.starts().unwrap();
        let mut out = [0u8; 20];
        ctx.finish(&mut out).unwrap();
        assert_eq!(hex::encode(out), "9c1185a5c5e9fc54612808977ee8f548b2258d31");
    }

    #[test]
    fn test_guard_frees_on_drop() {
        let mut ctx = HashContext::<Ripemd160Engine>::acquire();
        ctx.starts().unwrap();
        ctx.update(b"abc").unwrap();
        assert_eq!(ctx.output_size(), 20);
        drop(ctx);
    }

    #[test]
    fn test_status_code_success_is_zero() {
        let ok: Result<(), EngineError> = Ok(());
        assert_eq!(status_code(&ok), 0);
    }
}
