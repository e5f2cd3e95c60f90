//! Shared helpers for integration tests.

use std::sync::{Arc, Mutex};

use fleet_rust::http::Logger;

/// Logger that records lines in memory so tests can assert on log output
/// without touching process stdout.
#[derive(Clone, Default)]
pub struct CapturingLogger {
    info_lines: Arc<Mutex<Vec<String>>>,
    error_lines: Arc<Mutex<Vec<String>>>,
}

impl CapturingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn infos(&self) -> Vec<String> {
        self.info_lines.lock().expect("info lines poisoned").clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.error_lines
            .lock()
            .expect("error lines poisoned")
            .clone()
    }
}

impl Logger for CapturingLogger {
    fn info(&self, line: &str) {
        self.info_lines
            .lock()
            .expect("info lines poisoned")
            .push(line.to_string());
    }

    fn error(&self, line: &str) {
        self.error_lines
            .lock()
            .expect("error lines poisoned")
            .push(line.to_string());
    }
}
