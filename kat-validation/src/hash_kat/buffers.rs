#![deny(unsafe_code)]
#![warn(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! Fixed-capacity scratch buffers shared by consecutive test cases.

use super::HashKatError;
use zeroize::Zeroize;

/// Default input buffer capacity in bytes
pub const INPUT_BUF_SIZE: usize = 4125;
/// Default output and expected-output buffer capacity in bytes
pub const OUTPUT_BUF_SIZE: usize = 64;

/// Input, output and expected-output buffers owned by one executor
///
/// Every test starts with [`ScratchBuffers::clear`], so nothing a previous
/// vector wrote can leak into the next comparison.
pub struct ScratchBuffers {
    input: Vec<u8>,
    output: Vec<u8>,
    expected_output: Vec<u8>,
}

impl ScratchBuffers {
    /// Allocate zeroed buffers of the given capacities
    #[must_use]
    pub fn new(input_capacity: usize, output_capacity: usize) -> Self {
        Self {
            input: vec![0u8; input_capacity],
            output: vec![0u8; output_capacity],
            expected_output: vec![0u8; output_capacity],
        }
    }

    /// Zero all three buffers
    pub fn clear(&mut self) {
        // zeroize() on a Vec also truncates it, so wipe the slices instead
        self.input.as_mut_slice().zeroize();
        self.output.as_mut_slice().zeroize();
        self.expected_output.as_mut_slice().zeroize();
    }

    #[must_use]
    pub fn input(&self) -> &[u8] {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut [u8] {
        &mut self.input
    }

    #[must_use]
    pub fn output(&self) -> &[u8] {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut [u8] {
        &mut self.output
    }

    #[must_use]
    pub fn expected_output(&self) -> &[u8] {
        &self.expected_output
    }

    pub fn expected_output_mut(&mut self) -> &mut [u8] {
        &mut self.expected_output
    }

    /// Copy `chunk` into the front of the input buffer
    ///
    /// # Errors
    ///
    /// Returns `HashKatError::BufferTooSmall` if `chunk` exceeds the input capacity.
    pub fn load_input(&mut self, chunk: &[u8]) -> Result<(), HashKatError> {
        let capacity = self.input.len();
        let dst = self
            .input
            .get_mut(..chunk.len())
            .ok_or(HashKatError::BufferTooSmall { needed: chunk.len(), capacity })?;
        dst.copy_from_slice(chunk);
        Ok(())
    }

    /// Split borrow of the input (read) and output (write) buffers
    pub fn io_mut(&mut self) -> (&[u8], &mut [u8]) {
        (&self.input, &mut self.output)
    }
}

impl Default for ScratchBuffers {
    fn default() -> Self {
        Self::new(INPUT_BUF_SIZE, OUTPUT_BUF_SIZE)
    }
}

impl Drop for ScratchBuffers {
    fn drop(&mut self) {
        self.clear();
    }
}
