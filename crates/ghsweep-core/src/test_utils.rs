//! Test-only helpers for ghsweep-core.

use std::sync::{Mutex, MutexGuard, PoisonError};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Scoped change to one environment variable.
///
/// Holds a process-wide lock while alive, so tests that touch the
/// environment run one at a time. Take at most one guard per test.
#[derive(Debug)]
pub struct EnvVarGuard {
    key: &'static str,
    previous: Option<String>,
    _lock: MutexGuard<'static, ()>,
}

impl EnvVarGuard {
    /// Set `key` to `value` until the guard drops.
    pub fn set(key: &'static str, value: &str) -> Self {
        let guard = Self::take(key);
        // SAFETY: every env mutation in these tests happens under ENV_LOCK.
        unsafe { std::env::set_var(key, value) };
        guard
    }

    /// Remove `key` until the guard drops.
    pub fn unset(key: &'static str) -> Self {
        let guard = Self::take(key);
        // SAFETY: as in `set`.
        unsafe { std::env::remove_var(key) };
        guard
    }

    fn take(key: &'static str) -> Self {
        let lock = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        Self {
            key,
            previous: std::env::var(key).ok(),
            _lock: lock,
        }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        // SAFETY: the lock field is released only after this body runs.
        unsafe {
            match self.previous.take() {
                Some(value) => std::env::set_var(self.key, value),
                None => std::env::remove_var(self.key),
            }
        }
    }
}
