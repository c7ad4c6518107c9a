//! STFU Core Library
//!
//! Simple Test Framework Utility: a small harness that groups named tests
//! into suites, providing:
//! - Synchronous and asynchronous tests in one suite
//! - A per-test context built by a before-each function
//! - Millisecond timing of each test body
//! - Failures and panics captured as data, never thrown out of a run
//!
//! # Quick Start
//!
//! ```
//! use stfu_core::Suite;
//!
//! let mut suite = Suite::named("math");
//! suite.register_sync("adds", |_ctx| assert_eq!(1 + 1, 2));
//! suite.register_sync("fails", |_ctx| Err::<(), _>(anyhow::anyhow!("Fail")));
//!
//! let results = suite.run_blocking().unwrap();
//! assert_eq!(results.tests[0].test_name, "adds");
//! assert!(results.tests[0].err.is_none());
//! assert!(results.tests[1].err.is_some());
//! ```
//!
//! # Features
//!
//! ## One-off tests
//!
//! A single test can be run without building a suite. The result has the
//! same shape as a full run:
//!
//! ```
//! use stfu_core::{run_async_test_blocking, run_test_blocking};
//!
//! let results = run_test_blocking(|_ctx| {}).unwrap();
//! assert!(results.tests[0].passed());
//!
//! let results = run_async_test_blocking(|_ctx| async {}).unwrap();
//! assert!(results.async_tests[0].passed());
//! ```
//!
//! ## Test context
//!
//! Every test gets its own empty [`Context`], populated by the most recently
//! registered before-each function:
//!
//! ```
//! use stfu_core::Suite;
//!
//! let mut suite = Suite::new();
//! suite.register_setup(|ctx| ctx.insert("user", String::from("alice")));
//! suite.register_async("greets", |ctx| async move {
//!     let user = ctx.get::<String>("user").cloned().unwrap_or_default();
//!     assert_eq!(format!("hi {}", user), "hi alice");
//! });
//!
//! assert!(suite.run_blocking().unwrap().all_passed());
//! ```

mod config;
mod context;
mod error;
mod runner;
mod suite;
mod types;

pub use config::{RunConfig, CONFIG_FILE_NAME};
pub use context::Context;
pub use error::{HarnessError, Result};
pub use runner::{
    run_async_test, run_async_test_blocking, run_test, run_test_blocking, SINGLE_TEST_NAME,
};
pub use suite::Suite;
pub use types::*;

use std::time::Instant;

/// Millisecond clock used to time test bodies.
///
/// Any `Fn() -> u64` closure is a clock, which lets tests inject controlled
/// time via [`Suite::with_clock`].
pub trait Clock: Send + Sync {
    /// Returns the current time in milliseconds from an arbitrary origin.
    fn now_ms(&self) -> u64;
}

impl<F> Clock for F
where
    F: Fn() -> u64 + Send + Sync,
{
    fn now_ms(&self) -> u64 {
        self()
    }
}

/// Default clock, measuring milliseconds since its creation.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}
