#![deny(unsafe_code)]
#![allow(missing_docs)]
#![warn(clippy::unwrap_used)]
#![deny(clippy::panic)]
// JUSTIFICATION: Summary counters - overflow is impossible with realistic test counts
#![allow(clippy::arithmetic_side_effects)]
// JUSTIFICATION: digest slices are bounded by lengths the engine and decoder just wrote
#![allow(clippy::indexing_slicing)]
// JUSTIFICATION: summary printing is the runner's report output
#![allow(clippy::print_stdout)]

//! KAT Test Runner
//!
//! Executes registered vectors one at a time (setup, exec, teardown) and
//! aggregates the per-vector results into a summary.

use super::buffers::ScratchBuffers;
use super::compare::compare_digest;
use super::driver::{self, LoadedVector};
use super::engine::{HashEngine, Ripemd160Engine};
use super::registry::TestRegistry;
use super::timer::{DisabledTimer, InstantTimer, Timer};
use super::{DigestType, HashKatError, HashVector, KatTestResult};
use crate::config::HarnessConfig;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Summary of KAT test execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KatSummary {
    /// When the run started
    pub started_at: DateTime<Utc>,
    /// Total number of tests run
    pub total: usize,
    /// Number of tests passed
    pub passed: usize,
    /// Number of tests failed
    pub failed: usize,
    /// Number of vectors excluded by the name filter
    pub skipped: usize,
    /// Individual test results
    pub results: Vec<KatTestResult>,
    /// Total execution time in milliseconds
    pub total_time_ms: u128,
}

impl KatSummary {
    /// Create a new empty summary
    #[must_use]
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            total: 0,
            passed: 0,
            failed: 0,
            skipped: 0,
            results: Vec::new(),
            total_time_ms: 0,
        }
    }

    /// Add a test result
    pub fn add_result(&mut self, result: KatTestResult) {
        self.total += 1;
        if result.passed {
            self.passed += 1;
        } else {
            self.failed += 1;
        }
        self.total_time_ms += result.execution_time_us / 1000;
        self.results.push(result);
    }

    /// Check if all tests passed
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Get pass rate as percentage
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // Precision loss acceptable for percentage display
    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 { 0.0 } else { (self.passed as f64 / self.total as f64) * 100.0 }
    }

    /// Serialize the summary as pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns the serializer error, which cannot occur for this type in practice.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Print summary to stdout
    pub fn print(&self) {
        println!("\n========================================");
        println!("Hash KAT Test Summary");
        println!("========================================");
        println!("Total Tests:  {}", self.total);
        println!("Passed:       {} ({:.1}%)", self.passed, self.pass_rate());
        println!("Failed:       {}", self.failed);
        if self.skipped > 0 {
            println!("Skipped:      {}", self.skipped);
        }
        println!("Total Time:   {} ms", self.total_time_ms);

        if !self.results.is_empty() {
            println!("\nPer-Test-Case Breakdown:");
            println!("----------------------------------------");

            let mut by_case: BTreeMap<&str, Vec<&KatTestResult>> = BTreeMap::new();
            for result in &self.results {
                by_case.entry(result.test_case.as_str()).or_default().push(result);
            }

            for (test_case, tests) in by_case {
                let passed = tests.iter().filter(|t| t.passed).count();
                let total = tests.len();
                let time_us: u128 = tests.iter().map(|t| t.execution_time_us).sum();
                println!("  {:<20} {}/{} passed  ({} us)", test_case, passed, total, time_us);
            }
        }

        if self.failed > 0 {
            println!("\nFailed Tests:");
            println!("----------------------------------------");
            for result in &self.results {
                if !result.passed {
                    println!("  {} - {}", result.test_case, result.vector);
                    if let Some(ref err) = result.error_message {
                        println!("    Error: {}", err);
                    }
                }
            }
        }

        println!("========================================\n");
    }
}

impl Default for KatSummary {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs single vectors against their engine
///
/// Owns the scratch buffers and the timer for the whole run; the buffers are
/// cleared at the start of every vector.
pub struct VectorExecutor {
    config: HarnessConfig,
    buffers: ScratchBuffers,
    timer: Box<dyn Timer>,
}

impl VectorExecutor {
    /// Create an executor; the timer follows `config.measure_time`
    #[must_use]
    pub fn new(config: HarnessConfig) -> Self {
        let timer: Box<dyn Timer> =
            if config.measure_time { Box::new(InstantTimer::new()) } else { Box::new(DisabledTimer) };
        Self::with_timer(config, timer)
    }

    /// Create an executor with a caller-supplied timer
    #[must_use]
    pub fn with_timer(config: HarnessConfig, timer: Box<dyn Timer>) -> Self {
        let buffers = ScratchBuffers::new(config.input_capacity, config.output_capacity);
        Self { config, buffers, timer }
    }

    #[must_use]
    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Run one vector through setup and exec and report the outcome
    pub fn run_vector(&mut self, test_case: &str, vector: &HashVector) -> KatTestResult {
        match vector.digest_type {
            DigestType::Ripemd160 => self.run_vector_with::<Ripemd160Engine>(test_case, vector),
        }
    }

    /// Run one vector against engine `E`, whatever its declared digest type
    pub fn run_vector_with<E: HashEngine>(
        &mut self,
        test_case: &str,
        vector: &HashVector,
    ) -> KatTestResult {
        let algorithm = vector.digest_type.name().to_string();
        let mut elapsed = Duration::ZERO;

        debug!(test_case, vector = vector.name, "setup");
        self.buffers.clear();
        let outcome = driver::load_vector(vector, &mut self.buffers)
            .and_then(|loaded| self.exec_with::<E>(vector, loaded, &mut elapsed));

        let elapsed_us = elapsed.as_micros();
        match outcome {
            Ok(()) => {
                info!(test_case, vector = vector.name, ?elapsed, "passed");
                KatTestResult::passed(
                    test_case.to_string(),
                    vector.name.to_string(),
                    algorithm,
                    elapsed_us,
                )
            }
            Err(e) => {
                warn!(test_case, vector = vector.name, error = %e, "failed");
                KatTestResult::failed(
                    test_case.to_string(),
                    vector.name.to_string(),
                    algorithm,
                    e.to_string(),
                    elapsed_us,
                )
            }
        }
    }

    fn exec_with<E: HashEngine>(
        &mut self,
        vector: &HashVector,
        loaded: LoadedVector,
        elapsed: &mut Duration,
    ) -> Result<(), HashKatError> {
        debug!(vector = vector.name, input_len = loaded.input_len(), "exec");
        self.timer.start();
        let streamed = driver::stream_digest::<E>(vector, loaded, &mut self.buffers);
        *elapsed = self.timer.stop();

        let Some(out_len) = streamed? else {
            debug!(
                vector = vector.name,
                code = vector.expected_err_code,
                "engine failed as declared"
            );
            return Ok(());
        };
        self.verify_output(vector, loaded, out_len)?;

        if !self.config.verify_one_shot || vector.is_long() {
            return Ok(());
        }

        let streamed_digest = self.buffers.output()[..out_len].to_vec();
        self.buffers.output_mut().fill(0);
        let one_shot = driver::one_shot_digest::<E>(vector, loaded, &mut self.buffers)?;
        if let Some(one_shot_len) = one_shot {
            self.verify_output(vector, loaded, one_shot_len)?;
            let one_shot_digest = &self.buffers.output()[..one_shot_len];
            if one_shot_digest != streamed_digest.as_slice() {
                return Err(HashKatError::DigestMismatch {
                    got: hex::encode(one_shot_digest),
                    expected: hex::encode(&streamed_digest),
                });
            }
        }
        Ok(())
    }

    fn verify_output(
        &self,
        vector: &HashVector,
        loaded: LoadedVector,
        out_len: usize,
    ) -> Result<(), HashKatError> {
        compare_digest(
            &self.buffers.output()[..out_len],
            &self.buffers.expected_output()[..loaded.expected_len()],
            vector.expected_result,
        )
    }
}

impl Default for VectorExecutor {
    fn default() -> Self {
        Self::new(HarnessConfig::default())
    }
}

/// KAT test runner
pub struct KatRunner {
    summary: KatSummary,
}

impl KatRunner {
    /// Create a new runner
    #[must_use]
    pub fn new() -> Self {
        Self { summary: KatSummary::new() }
    }

    /// Run a test and record the result
    pub fn run_test<F>(&mut self, test_case: &str, algorithm: &str, test_fn: F)
    where
        F: FnOnce() -> Result<(), HashKatError>,
    {
        let start = Instant::now();
        let result = test_fn();
        let elapsed = start.elapsed().as_micros();

        let test_result = match result {
            Ok(()) => KatTestResult::passed(
                test_case.to_string(),
                test_case.to_string(),
                algorithm.to_string(),
                elapsed,
            ),
            Err(e) => KatTestResult::failed(
                test_case.to_string(),
                test_case.to_string(),
                algorithm.to_string(),
                e.to_string(),
                elapsed,
            ),
        };

        self.summary.add_result(test_result);
    }

    /// Run every registered vector, in registration order
    ///
    /// A failing vector is recorded and the run moves on to the next one.
    pub fn run_suite(&mut self, registry: &TestRegistry, executor: &mut VectorExecutor) {
        for case in registry.iter() {
            info!(test_case = case.name, vectors = case.vectors.len(), "running test case");
            for (index, vector) in case.vectors.iter().enumerate() {
                if !executor.config().selects(case.name, vector.name) {
                    self.summary.skipped += 1;
                    continue;
                }
                let result = executor.run_vector(case.name, vector);
                self.summary.add_result(result);
                debug!(test_case = case.name, index, "teardown");
            }
        }
        info!(
            total = self.summary.total,
            failed = self.summary.failed,
            skipped = self.summary.skipped,
            "suite complete"
        );
    }

    /// Get the summary
    #[must_use]
    pub fn summary(&self) -> &KatSummary {
        &self.summary
    }

    /// Consume the runner and return the summary
    #[must_use]
    pub fn finish(self) -> KatSummary {
        self.summary
    }
}

impl Default for KatRunner {
    fn default() -> Self {
        Self::new()
    }
}
