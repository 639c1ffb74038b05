#![deny(unsafe_code)]
#![warn(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! Test case registry
//!
//! Test cases are registered explicitly, in order, when the registry is
//! built. The runner walks them in registration order.

use super::HashVector;
use super::ripemd160_kat::{
    RIPEMD160_CASE, RIPEMD160_LONG_CASE, RIPEMD160_LONG_VECTORS, RIPEMD160_VECTORS,
};

/// A named group of vectors executed back to back
#[derive(Debug, Clone, Copy)]
pub struct TestCase {
    /// Test case name
    pub name: &'static str,
    /// Vectors of this case, in execution order
    pub vectors: &'static [HashVector],
}

impl TestCase {
    #[must_use]
    pub const fn new(name: &'static str, vectors: &'static [HashVector]) -> Self {
        Self { name, vectors }
    }
}

/// Ordered collection of registered test cases
#[derive(Debug, Clone, Default)]
pub struct TestRegistry {
    cases: Vec<TestCase>,
}

impl TestRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the RIPEMD-160 short and long test cases
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(TestCase::new(RIPEMD160_CASE, RIPEMD160_VECTORS));
        registry.register(TestCase::new(RIPEMD160_LONG_CASE, RIPEMD160_LONG_VECTORS));
        registry
    }

    /// Append a test case; it runs after every case registered before it
    pub fn register(&mut self, case: TestCase) -> &mut Self {
        self.cases.push(case);
        self
    }

    /// Look up a test case by exact name
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&TestCase> {
        self.cases.iter().find(|case| case.name == name)
    }

    /// Iterate test cases in registration order
    pub fn iter(&self) -> impl Iterator<Item = &TestCase> {
        self.cases.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Total number of vectors across all cases
    #[must_use]
    pub fn vector_count(&self) -> usize {
        self.cases.iter().map(|case| case.vectors.len()).sum()
    }
}
