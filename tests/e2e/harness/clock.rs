use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Controllable millisecond clock for duration assertions.
///
/// Pass `as_provider()` to `Suite::with_clock`; tests advance it from inside
/// their bodies to simulate work without sleeping.
#[derive(Clone)]
pub struct MockClock {
    current: Arc<AtomicU64>,
}

impl MockClock {
    /// Creates a clock function suitable for passing to a Suite.
    pub fn as_provider(&self) -> impl Fn() -> u64 + Send + Sync + 'static {
        let current = self.current.clone();
        move || current.load(Ordering::SeqCst)
    }
}

impl MockClock {
    /// Create a new mock clock at an arbitrary non-zero origin
    pub fn new() -> Self {
        Self {
            current: Arc::new(AtomicU64::new(1_000_000)),
        }
    }

    /// Get current time in milliseconds
    pub fn now(&self) -> u64 {
        self.current.load(Ordering::SeqCst)
    }

    /// Advance time by duration
    pub fn advance(&self, duration: Duration) {
        let millis = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        self.current.fetch_add(millis, Ordering::SeqCst);
    }

    /// Advance time by milliseconds
    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }
}

impl Default for MockClock {
    fn default() -> Self {
        Self::new()
    }
}
