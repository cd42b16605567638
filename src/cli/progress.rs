//! Console progress indication for long scans.

use std::io::{self, Write};

use crate::core::ProgressReporter;

/// Progress bar on stderr, rewritten in place and erased on clear.
///
/// Write errors are ignored; progress never affects scan results.
#[derive(Default)]
pub struct ConsoleProgress {
    active: bool,
}

impl ConsoleProgress {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressReporter for ConsoleProgress {
    fn report(&mut self, current: usize, total: usize, label: &str) {
        let mut stderr = io::stderr().lock();
        let _ = write!(stderr, "\rScanning for {} ... {} / {}", label, current, total);
        let _ = stderr.flush();
        self.active = true;
    }

    fn clear(&mut self) {
        if self.active {
            let mut stderr = io::stderr().lock();
            // Erase the progress line.
            let _ = write!(stderr, "\r\x1b[2K");
            let _ = stderr.flush();
            self.active = false;
        }
    }
}
