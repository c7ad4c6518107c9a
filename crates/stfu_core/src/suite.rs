//! Suite registration and the execution engine.

use crate::config::RunConfig;
use crate::context::Context;
use crate::error::{HarnessError, Result};
use crate::types::{SuiteResults, TestFault, TestKind, TestOutput, TestResult};
use crate::{Clock, MonotonicClock};
use futures::future::BoxFuture;
use futures::FutureExt;
use std::fmt;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{debug, info, warn};

type SetupFn = Box<dyn Fn(&mut Context) -> std::result::Result<(), TestFault> + Send + Sync>;
type SyncTestFn = Box<dyn Fn(&mut Context) -> std::result::Result<(), TestFault> + Send + Sync>;
type AsyncTestFn =
    Box<dyn Fn(Context) -> BoxFuture<'static, std::result::Result<(), TestFault>> + Send + Sync>;

fn noop_setup(_ctx: &mut Context) -> std::result::Result<(), TestFault> {
    Ok(())
}

struct TestEntry<F> {
    test_name: String,
    test_fn: F,
}

/// A group of tests that closely relate in purpose or functionality.
///
/// Tests are registered into two ordered sequences, synchronous and
/// asynchronous, and run by [`Suite::run`]. Before every test a fresh
/// [`Context`] is built and handed to the active before-each function; the
/// same context is then passed to the test.
///
/// ```
/// use stfu_core::{Context, Suite};
///
/// let mut suite = Suite::new();
/// suite.register_setup(|ctx: &mut Context| ctx.insert("x", 1i32));
/// suite.register_sync("reads x", |ctx| {
///     assert_eq!(ctx.get::<i32>("x"), Some(&1));
/// });
/// suite.register_async("fails", |_ctx| async { Err::<(), _>(anyhow::anyhow!("fail")) });
///
/// let results = suite.run_blocking().unwrap();
/// assert!(results.tests[0].passed());
/// assert!(results.async_tests[0].failed());
/// ```
pub struct Suite {
    name: Option<String>,
    tests: Vec<TestEntry<SyncTestFn>>,
    async_tests: Vec<TestEntry<AsyncTestFn>>,
    setup_ctx: SetupFn,
    config: RunConfig,
    clock: Arc<dyn Clock>,
}

impl Suite {
    /// Creates an empty, unnamed suite with a no-op before-each function.
    pub fn new() -> Self {
        Self {
            name: None,
            tests: Vec::new(),
            async_tests: Vec::new(),
            setup_ctx: Box::new(noop_setup),
            config: RunConfig::default(),
            clock: Arc::new(MonotonicClock::new()),
        }
    }

    /// Creates an empty suite with a name used in log output.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::new()
        }
    }

    /// Replaces the run configuration.
    pub fn with_config(mut self, config: RunConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the clock used to time tests.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Number of registered synchronous tests.
    pub fn sync_len(&self) -> usize {
        self.tests.len()
    }

    /// Number of registered asynchronous tests.
    pub fn async_len(&self) -> usize {
        self.async_tests.len()
    }

    pub fn len(&self) -> usize {
        self.sync_len() + self.async_len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sets the function run before each test to populate its context.
    ///
    /// Only the most recently registered function is active. It is not
    /// timed and not fault-isolated: if it returns an error, `run` stops and
    /// returns [`HarnessError::Setup`]; if it panics, the panic unwinds out
    /// of `run`.
    pub fn register_setup<F, O>(&mut self, setup_fn: F) -> &mut Self
    where
        F: Fn(&mut Context) -> O + Send + Sync + 'static,
        O: TestOutput,
    {
        self.setup_ctx = Box::new(move |ctx: &mut Context| setup_fn(ctx).into_outcome());
        self
    }

    /// Alias for [`Suite::register_setup`].
    pub fn before_each<F, O>(&mut self, setup_fn: F) -> &mut Self
    where
        F: Fn(&mut Context) -> O + Send + Sync + 'static,
        O: TestOutput,
    {
        self.register_setup(setup_fn)
    }

    /// Appends a synchronous test. Names need not be unique.
    pub fn register_sync<F, O>(&mut self, test_name: impl Into<String>, test_fn: F) -> &mut Self
    where
        F: Fn(&mut Context) -> O + Send + Sync + 'static,
        O: TestOutput,
    {
        self.tests.push(TestEntry {
            test_name: test_name.into(),
            test_fn: Box::new(move |ctx: &mut Context| test_fn(ctx).into_outcome()),
        });
        self
    }

    /// Appends an asynchronous test. Names need not be unique.
    ///
    /// The test takes ownership of its context and returns a future whose
    /// output decides the result.
    pub fn register_async<F, Fut>(&mut self, test_name: impl Into<String>, test_fn: F) -> &mut Self
    where
        F: Fn(Context) -> Fut + Send + Sync + 'static,
        Fut: Future + Send + 'static,
        Fut::Output: TestOutput,
    {
        self.async_tests.push(TestEntry {
            test_name: test_name.into(),
            test_fn: Box::new(move |ctx: Context| {
                let fut = test_fn(ctx);
                async move { fut.await.into_outcome() }.boxed()
            }),
        });
        self
    }

    /// Runs every registered test and collects the results.
    ///
    /// Synchronous tests run first, then asynchronous tests, each in
    /// registration order. Async tests are awaited one at a time; a test that
    /// never completes stalls the run. Test failures are recorded in the
    /// returned [`SuiteResults`]; only a failing before-each function makes
    /// this return `Err`.
    pub async fn run(&self) -> Result<SuiteResults> {
        debug!(
            suite = self.display_name(),
            sync_tests = self.tests.len(),
            async_tests = self.async_tests.len(),
            "Running suite"
        );

        let mut results = SuiteResults {
            tests: Vec::with_capacity(self.tests.len()),
            async_tests: Vec::with_capacity(self.async_tests.len()),
        };

        for test in &self.tests {
            let mut ctx = self.prepare_context(&test.test_name, TestKind::Sync)?;

            let start = self.clock.now_ms();
            let outcome = if self.config.catch_panics {
                panic::catch_unwind(AssertUnwindSafe(|| (test.test_fn)(&mut ctx)))
                    .unwrap_or_else(|payload| Err(TestFault::Panic(payload)))
            } else {
                (test.test_fn)(&mut ctx)
            };
            let end = self.clock.now_ms();

            results
                .tests
                .push(self.record(&test.test_name, TestKind::Sync, start, end, outcome));
        }

        for test in &self.async_tests {
            let ctx = self.prepare_context(&test.test_name, TestKind::Async)?;

            let start = self.clock.now_ms();
            let outcome = if self.config.catch_panics {
                // The test function itself may panic before handing back a future.
                match panic::catch_unwind(AssertUnwindSafe(|| (test.test_fn)(ctx))) {
                    Ok(fut) => AssertUnwindSafe(fut)
                        .catch_unwind()
                        .await
                        .unwrap_or_else(|payload| Err(TestFault::Panic(payload))),
                    Err(payload) => Err(TestFault::Panic(payload)),
                }
            } else {
                (test.test_fn)(ctx).await
            };
            let end = self.clock.now_ms();

            results
                .async_tests
                .push(self.record(&test.test_name, TestKind::Async, start, end, outcome));
        }

        if self.config.log_results {
            info!(
                suite = self.display_name(),
                passed = results.passed_count(),
                failed = results.failed_count(),
                duration_ms = results.total_duration_ms(),
                "Suite finished"
            );
        }

        Ok(results)
    }

    /// Runs the suite to completion on the current thread.
    ///
    /// Async tests that rely on a specific runtime (for example tokio
    /// timers) should be driven through [`Suite::run`] on that runtime.
    pub fn run_blocking(&self) -> Result<SuiteResults> {
        futures::executor::block_on(self.run())
    }

    fn prepare_context(&self, test_name: &str, kind: TestKind) -> Result<Context> {
        let mut ctx = Context::new();
        match (self.setup_ctx)(&mut ctx) {
            Ok(()) => Ok(ctx),
            Err(TestFault::Error(source)) => {
                warn!(test = test_name, %kind, error = %source, "Context setup failed, aborting run");
                Err(HarnessError::Setup {
                    test_name: test_name.to_string(),
                    kind,
                    source,
                })
            }
            Err(TestFault::Panic(payload)) => panic::resume_unwind(payload),
        }
    }

    fn record(
        &self,
        test_name: &str,
        kind: TestKind,
        start: u64,
        end: u64,
        outcome: std::result::Result<(), TestFault>,
    ) -> TestResult {
        let duration = end.saturating_sub(start);

        match &outcome {
            Ok(()) => debug!(test = test_name, %kind, duration_ms = duration, "Test passed"),
            Err(fault) => warn!(
                test = test_name,
                %kind,
                duration_ms = duration,
                error = %fault,
                "Test failed"
            ),
        }

        if self.config.is_slow(duration) {
            warn!(
                test = test_name,
                %kind,
                duration_ms = duration,
                threshold_ms = self.config.slow_test_threshold_ms,
                "Slow test"
            );
        }

        TestResult {
            test_name: test_name.to_string(),
            kind,
            duration,
            err: outcome.err(),
        }
    }

    fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }
}

impl Default for Suite {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Suite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Suite")
            .field("name", &self.name)
            .field(
                "tests",
                &self.tests.iter().map(|t| &t.test_name).collect::<Vec<_>>(),
            )
            .field(
                "async_tests",
                &self
                    .async_tests
                    .iter()
                    .map(|t| &t.test_name)
                    .collect::<Vec<_>>(),
            )
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
