//! Core data types: test kinds, faults, and per-run results.

use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;

/// Which registration sequence a test belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestKind {
    /// Plain function, run to completion on the calling thread.
    Sync,
    /// Function returning a future, awaited to completion.
    Async,
}

impl fmt::Display for TestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sync => write!(f, "sync"),
            Self::Async => write!(f, "async"),
        }
    }
}

/// Whatever a failing test produced, kept as-is.
///
/// Returned errors and panic payloads are stored without re-wrapping so the
/// caller can downcast back to the original value.
pub enum TestFault {
    /// The test returned `Err(..)`.
    Error(anyhow::Error),
    /// The test panicked; holds the raw panic payload.
    Panic(Box<dyn Any + Send>),
}

impl TestFault {
    /// Returns true if the fault came from a panic.
    pub fn is_panic(&self) -> bool {
        matches!(self, Self::Panic(_))
    }

    /// Attempts to view the fault as the value the test failed with.
    ///
    /// For returned errors this looks through anyhow to the original error
    /// type. For panics it inspects the payload, so `panic!("x")` downcasts
    /// to `&'static str` and formatted panics to `String`.
    pub fn downcast_ref<T>(&self) -> Option<&T>
    where
        T: fmt::Display + fmt::Debug + Send + Sync + 'static,
    {
        match self {
            Self::Error(err) => err.downcast_ref::<T>(),
            Self::Panic(payload) => payload.downcast_ref::<T>(),
        }
    }

    /// Human-readable description of the fault.
    pub fn message(&self) -> String {
        match self {
            Self::Error(err) => format!("{:#}", err),
            Self::Panic(payload) => panic_message(payload.as_ref()),
        }
    }

    /// Consumes the fault, returning the error if the test returned one.
    pub fn into_error(self) -> Option<anyhow::Error> {
        match self {
            Self::Error(err) => Some(err),
            Self::Panic(_) => None,
        }
    }
}

impl fmt::Display for TestFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error(err) => write!(f, "{:#}", err),
            Self::Panic(payload) => write!(f, "panicked: {}", panic_message(payload.as_ref())),
        }
    }
}

impl fmt::Debug for TestFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error(err) => f.debug_tuple("Error").field(err).finish(),
            Self::Panic(payload) => f
                .debug_tuple("Panic")
                .field(&panic_message(payload.as_ref()))
                .finish(),
        }
    }
}

impl From<anyhow::Error> for TestFault {
    fn from(err: anyhow::Error) -> Self {
        Self::Error(err)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "<non-string panic payload>".to_string()
    }
}

/// Values a test function may return.
///
/// Lets tests be written as plain `()`-returning closures or as closures
/// returning `Result<(), E>` for any error convertible into `anyhow::Error`.
pub trait TestOutput {
    /// Converts the test's return value into an outcome.
    fn into_outcome(self) -> std::result::Result<(), TestFault>;
}

impl TestOutput for () {
    fn into_outcome(self) -> std::result::Result<(), TestFault> {
        Ok(())
    }
}

impl<E> TestOutput for std::result::Result<(), E>
where
    E: Into<anyhow::Error>,
{
    fn into_outcome(self) -> std::result::Result<(), TestFault> {
        self.map_err(|e| TestFault::Error(e.into()))
    }
}

/// Outcome record for one test execution.
#[derive(Debug)]
pub struct TestResult {
    /// Name the test was registered under.
    pub test_name: String,
    /// Which sequence the test ran in.
    pub kind: TestKind,
    /// Milliseconds spent in the test body, setup excluded.
    pub duration: u64,
    /// `None` on success, otherwise the fault the test produced.
    pub err: Option<TestFault>,
}

impl TestResult {
    /// Returns true if the test completed without a fault.
    pub fn passed(&self) -> bool {
        self.err.is_none()
    }

    /// Returns true if the test produced a fault.
    pub fn failed(&self) -> bool {
        self.err.is_some()
    }
}

/// Results of one `run` call, split by test kind.
///
/// Both sequences are in registration order.
#[derive(Debug, Default)]
pub struct SuiteResults {
    /// Results of synchronous tests.
    pub tests: Vec<TestResult>,
    /// Results of asynchronous tests.
    pub async_tests: Vec<TestResult>,
}

impl SuiteResults {
    /// Iterates synchronous results followed by asynchronous results.
    pub fn iter(&self) -> impl Iterator<Item = &TestResult> {
        self.tests.iter().chain(self.async_tests.iter())
    }

    /// Total number of results.
    pub fn len(&self) -> usize {
        self.tests.len() + self.async_tests.len()
    }

    /// Returns true if no tests were run.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn passed_count(&self) -> usize {
        self.iter().filter(|r| r.passed()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.iter().filter(|r| r.failed()).count()
    }

    /// Returns true if every test passed. Vacuously true for an empty run.
    pub fn all_passed(&self) -> bool {
        self.iter().all(TestResult::passed)
    }

    /// Sum of all test durations in milliseconds.
    pub fn total_duration_ms(&self) -> u64 {
        self.iter().map(|r| r.duration).sum()
    }

    /// Iterates the failing results in run order.
    pub fn failures(&self) -> impl Iterator<Item = &TestResult> {
        self.iter().filter(|r| r.failed())
    }

    /// Builds a serializable summary for reporters.
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            total: self.len(),
            passed: self.passed_count(),
            failed: self.failed_count(),
            duration_ms: self.total_duration_ms(),
            failures: self
                .failures()
                .map(|r| FailureSummary {
                    test_name: r.test_name.clone(),
                    kind: r.kind,
                    duration_ms: r.duration,
                    message: r.err.as_ref().map(TestFault::message).unwrap_or_default(),
                    panicked: r.err.as_ref().is_some_and(TestFault::is_panic),
                })
                .collect(),
        }
    }
}

/// Serializable digest of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub duration_ms: u64,
    pub failures: Vec<FailureSummary>,
}

impl RunSummary {
    /// Renders the summary as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// One failing test inside a [`RunSummary`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureSummary {
    pub test_name: String,
    pub kind: TestKind,
    pub duration_ms: u64,
    pub message: String,
    pub panicked: bool,
}
