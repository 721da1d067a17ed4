//! Durable key-value substrate the knowledge store persists into.
//!
//! The store only ever needs "get string by key" and "set string by key". Both
//! calls are synchronous and writes replace the whole value. [`SqliteSubstrate`]
//! is the on-disk implementation; [`MemorySubstrate`] is an in-process fake for
//! tests and throwaway sessions.

pub mod sqlite;

pub use sqlite::SqliteSubstrate;

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::error::PersistenceError;

/// A synchronous string key-value store.
pub trait Substrate: Send {
    /// Read the value stored under `key`, or `None` if the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    /// Replace the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError>;
}

/// In-memory substrate. Clones share the same map, so a test can keep one
/// handle to inspect what the store wrote through another.
#[derive(Debug, Clone, Default)]
pub struct MemorySubstrate {
    values: Arc<Mutex<HashMap<String, String>>>,
    fail_writes: Arc<AtomicBool>,
    fail_reads: Arc<AtomicBool>,
    writes: Arc<AtomicUsize>,
}

impl MemorySubstrate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value without counting it as a write.
    pub fn with_value(key: &str, value: &str) -> Self {
        let substrate = Self::new();
        substrate.lock().insert(key.to_string(), value.to_string());
        substrate
    }

    /// Make every subsequent `set` fail, like a browser store over quota.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Current raw value for `key`, bypassing failure injection.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.values.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Substrate for MemorySubstrate {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(PersistenceError::Read {
                key: key.to_string(),
                reason: "simulated read failure".into(),
            });
        }
        Ok(self.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(PersistenceError::Write {
                key: key.to_string(),
                reason: "quota exceeded".into(),
            });
        }
        self.lock().insert(key.to_string(), value.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
