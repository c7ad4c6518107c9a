//! Per-test scratch context.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;

/// Scratch state handed to a single test invocation.
///
/// A new, empty `Context` is created for every test, filled in by the
/// suite's before-each function, passed to the test, and dropped once the
/// test finishes. Nothing is ever shared between two tests and a fresh
/// context has no keys at all.
///
/// Values are stored by name and retrieved by type:
///
/// ```
/// use stfu_core::Context;
///
/// let mut ctx = Context::new();
/// ctx.insert("x", 1i32);
/// assert_eq!(ctx.get::<i32>("x"), Some(&1));
/// assert_eq!(ctx.get::<u64>("x"), None);
/// assert!(ctx.get::<i32>("y").is_none());
/// ```
#[derive(Default)]
pub struct Context {
    values: HashMap<String, Box<dyn Any + Send>>,
}

impl Context {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub fn insert<T: Any + Send>(&mut self, key: impl Into<String>, value: T) {
        self.values.insert(key.into(), Box::new(value));
    }

    /// Returns the value under `key` if it exists and has type `T`.
    pub fn get<T: Any>(&self, key: &str) -> Option<&T> {
        self.values.get(key).and_then(|v| v.downcast_ref::<T>())
    }

    /// Mutable variant of [`Context::get`].
    pub fn get_mut<T: Any>(&mut self, key: &str) -> Option<&mut T> {
        self.values.get_mut(key).and_then(|v| v.downcast_mut::<T>())
    }

    /// Removes and returns the value under `key` if it has type `T`.
    ///
    /// A value of a different type is left in place.
    pub fn take<T: Any>(&mut self, key: &str) -> Option<T> {
        if !self.values.get(key).is_some_and(|v| v.is::<T>()) {
            return None;
        }
        self.values
            .remove(key)
            .and_then(|v| v.downcast::<T>().ok())
            .map(|b| *b)
    }

    /// Removes `key` regardless of its type. Returns true if it was present.
    pub fn remove(&mut self, key: &str) -> bool {
        self.values.remove(key).is_some()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Iterates the stored keys in arbitrary order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&str> = self.keys().collect();
        keys.sort_unstable();
        f.debug_struct("Context").field("keys", &keys).finish()
    }
}
