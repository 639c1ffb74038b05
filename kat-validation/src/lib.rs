#![deny(unsafe_code)]
#![allow(missing_docs)]
#![warn(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! Hash KAT Validation
//!
//! Known-answer test harness for streaming hash engines. Ships the KU Leuven
//! RIPEMD-160 vectors and drives them through both the streaming and the
//! one-shot engine API.
//!
//! ## Modules
//!
//! - **hash_kat**: vectors, engine seam, driver, comparator and runner
//! - **config**: harness configuration
//! - **logging**: tracing subscriber setup

pub mod config;
pub mod hash_kat;
pub mod logging;

pub use config::HarnessConfig;
pub use hash_kat::{
    DigestType, ExecutionMode, ExpectedResult, HashKatError, HashVector, KatRunner, KatSummary,
    KatTestResult, TestCase, TestRegistry, VectorExecutor, VectorInput,
};
