#![deny(unsafe_code)]
#![warn(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! Execution timers
//!
//! Timing is observational only; verdicts never depend on it.

use std::time::{Duration, Instant};

/// Start/stop time measurement around the hash-driving calls
pub trait Timer {
    /// Begin a measurement
    fn start(&mut self);

    /// End the current measurement and return the elapsed time
    fn stop(&mut self) -> Duration;
}

/// Wall-clock timer backed by [`Instant`]
#[derive(Debug, Default)]
pub struct InstantTimer {
    started_at: Option<Instant>,
}

impl InstantTimer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Timer for InstantTimer {
    fn start(&mut self) {
        self.started_at = Some(Instant::now());
    }

    fn stop(&mut self) -> Duration {
        self.started_at.take().map_or(Duration::ZERO, |start| start.elapsed())
    }
}

/// Timer that never measures anything
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledTimer;

impl Timer for DisabledTimer {
    fn start(&mut self) {}

    fn stop(&mut self) -> Duration {
        Duration::ZERO
    }
}
