//! Tests for the structure loader.
//!
//! Responsibilities:
//! - Test field discovery, skipping, and resolution through `Loader`.
//! - Test `.env` overlay loading and the `DOTENV_DISABLED` gate.
//! - Test error reporting and logging of struct loads.
//!
//! Does NOT handle:
//! - Individual validators (tested in validation.rs).
//! - Rule string syntax in isolation (tested in rule.rs).
//!
//! Invariants:
//! - Tests that touch the process environment or cwd use `serial_test`.
//! - Tests use `global_test_lock()` for additional synchronization.
//! - Temporary directories are cleaned up automatically via `tempfile`.

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::loader::Environment;

pub mod validation_tests;

/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}

/// Map-backed environment that records every key looked up.
#[derive(Default)]
pub struct RecordingEnv {
    values: HashMap<String, String>,
    reads: RefCell<Vec<String>>,
}

impl RecordingEnv {
    pub fn new(pairs: &[(&str, &str)]) -> Self {
        Self {
            values: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            reads: RefCell::new(Vec::new()),
        }
    }

    pub fn reads(&self) -> Vec<String> {
        self.reads.borrow().clone()
    }
}

impl Environment for RecordingEnv {
    fn get(&self, key: &str) -> Option<String> {
        self.reads.borrow_mut().push(key.to_string());
        self.values.get(key).cloned()
    }
}
