//! One-off test runners.
//!
//! Each runner builds a throwaway [`Suite`] holding a single test and returns
//! the full [`SuiteResults`]; inspect `tests[0]` or `async_tests[0]`.

use crate::context::Context;
use crate::error::Result;
use crate::suite::Suite;
use crate::types::{SuiteResults, TestOutput};
use std::future::Future;

/// Name given to the test registered by the one-off runners.
pub const SINGLE_TEST_NAME: &str = "test";

/// Runs one synchronous test in an anonymous suite.
pub async fn run_test<F, O>(test_fn: F) -> Result<SuiteResults>
where
    F: Fn(&mut Context) -> O + Send + Sync + 'static,
    O: TestOutput,
{
    let mut suite = Suite::new();
    suite.register_sync(SINGLE_TEST_NAME, test_fn);
    suite.run().await
}

/// Runs one asynchronous test in an anonymous suite.
pub async fn run_async_test<F, Fut>(test_fn: F) -> Result<SuiteResults>
where
    F: Fn(Context) -> Fut + Send + Sync + 'static,
    Fut: Future + Send + 'static,
    Fut::Output: TestOutput,
{
    let mut suite = Suite::new();
    suite.register_async(SINGLE_TEST_NAME, test_fn);
    suite.run().await
}

/// Blocking variant of [`run_test`].
pub fn run_test_blocking<F, O>(test_fn: F) -> Result<SuiteResults>
where
    F: Fn(&mut Context) -> O + Send + Sync + 'static,
    O: TestOutput,
{
    futures::executor::block_on(run_test(test_fn))
}

/// Blocking variant of [`run_async_test`].
pub fn run_async_test_blocking<F, Fut>(test_fn: F) -> Result<SuiteResults>
where
    F: Fn(Context) -> Fut + Send + Sync + 'static,
    Fut: Future + Send + 'static,
    Fut::Output: TestOutput,
{
    futures::executor::block_on(run_async_test(test_fn))
}
