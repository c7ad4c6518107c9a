use std::time::Duration;

use super::assertions::Assertion;

/// Behaviour of a registered test body
#[derive(Debug, Clone)]
pub enum TestBody {
    /// Returns without error
    Pass,
    /// Returns an error with this message
    Fail { message: String },
    /// Panics with this message
    Panic { message: String },
    /// Advances the mock clock, then passes
    Advance { ms: u64 },
    /// Sleeps (tokio timer for async tests, thread sleep for sync), then passes
    Sleep { duration: Duration },
    /// Fails unless the context holds exactly `value` under `key`
    ExpectKey { key: String, value: Option<i64> },
    /// Fails unless the context is empty apart from `allowed` keys
    ExpectOnlyKeys { allowed: Vec<String> },
}

/// Behaviour of a before-each function
#[derive(Debug, Clone)]
pub enum SetupBody {
    /// Inserts each `(key, value)` into the context
    Insert { values: Vec<(String, i64)> },
    /// Advances the mock clock, then inserts nothing
    Advance { ms: u64 },
    /// Returns an error with this message
    Fail { message: String },
}

/// All possible actions in a test scenario
#[derive(Debug)]
pub enum ScenarioStep {
    // Registration
    RegisterSetup { body: SetupBody },
    RegisterSync { name: String, body: TestBody },
    RegisterAsync { name: String, body: TestBody },

    // Execution
    Run,

    // Assertions on the latest run
    Assert { assertion: Assertion },
}
