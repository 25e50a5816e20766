//! # Explicit diagnostics handle
//!
//! The readers, the merger and the case loader report progress and anomalies
//! (skipped corrupt files, dropped duplicate timesteps, continuity violations)
//! through a [`Diagnostics`] value passed in by the caller instead of a
//! process-wide console object.
//!
//! A [`Diagnostics`] wraps any [`log::Log`] implementation together with a
//! target string. [`Diagnostics::global`] forwards to whatever backend the
//! embedding binary installed with the `log` facade; tests and library users
//! can hand in their own logger to capture or silence output.
//!
//! ```rust
//! use simhist::diagnostics::Diagnostics;
//!
//! let diag = Diagnostics::global();
//! diag.info(format_args!("merged {} segments", 3));
//! ```
use std::fmt;

use log::{Level, Log, Record};

/// Default `log` target used by [`Diagnostics::global`].
pub const DEFAULT_TARGET: &str = "simhist";

/// Borrowed logger handle threaded through the decoding and merge calls.
///
/// The handle is `Copy`: callers pass it by value to every operation that may
/// emit messages.
#[derive(Clone, Copy)]
pub struct Diagnostics<'a> {
    logger: &'a dyn Log,
    target: &'a str,
}

impl Diagnostics<'static> {
    /// Forward to the logger installed through the `log` facade (a no-op logger
    /// when none was installed).
    pub fn global() -> Self {
        Diagnostics {
            logger: log::logger(),
            target: DEFAULT_TARGET,
        }
    }
}

impl<'a> Diagnostics<'a> {
    /// Wrap an explicit logger.
    ///
    /// Arguments
    /// -----------------
    /// * `logger`: the sink receiving every record.
    /// * `target`: the `log` target attached to the records.
    pub fn new(logger: &'a dyn Log, target: &'a str) -> Self {
        Diagnostics { logger, target }
    }

    pub fn target(&self) -> &str {
        self.target
    }

    /// Emit one record at `level` if the wrapped logger accepts it.
    pub fn emit(&self, level: Level, args: fmt::Arguments<'_>) {
        let record = Record::builder()
            .args(args)
            .level(level)
            .target(self.target)
            .build();
        if self.logger.enabled(record.metadata()) {
            self.logger.log(&record);
        }
    }

    pub fn debug(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Debug, args);
    }

    pub fn info(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Info, args);
    }

    pub fn warn(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Warn, args);
    }
}

impl Default for Diagnostics<'static> {
    fn default() -> Self {
        Self::global()
    }
}

impl fmt::Debug for Diagnostics<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagnostics")
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) mod capture {
    use std::sync::Mutex;

    use log::{Level, Log, Metadata, Record};

    #[derive(Debug, Clone, PartialEq)]
    pub(crate) struct CapturedRecord {
        pub(crate) level: Level,
        pub(crate) target: String,
        pub(crate) module_path: Option<String>,
        pub(crate) message: String,
    }

    /// Logger keeping every record in memory, for assertions in tests.
    #[derive(Default)]
    pub(crate) struct CaptureLogger {
        pub(crate) records: Mutex<Vec<CapturedRecord>>,
    }

    impl CaptureLogger {
        pub(crate) fn messages(&self, level: Level) -> Vec<String> {
            self.records
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.level == level)
                .map(|r| r.message.clone())
                .collect()
        }

        pub(crate) fn records(&self) -> Vec<CapturedRecord> {
            self.records.lock().unwrap().clone()
        }
    }

    impl Log for CaptureLogger {
        fn enabled(&self, _metadata: &Metadata) -> bool {
            true
        }

        fn log(&self, record: &Record) {
            self.records.lock().unwrap().push(CapturedRecord {
                level: record.level(),
                target: record.target().to_string(),
                module_path: record.module_path().map(String::from),
                message: record.args().to_string(),
            });
        }

        fn flush(&self) {}
    }
}

#[cfg(test)]
mod test_diagnostics {
    use super::capture::CaptureLogger;
    use super::*;

    #[test]
    fn test_records_reach_explicit_logger() {
        let logger = CaptureLogger::default();
        let diag = Diagnostics::new(&logger, "test");

        diag.warn(format_args!("segment {} skipped", "run1.othd"));
        diag.debug(format_args!("decoded"));

        assert_eq!(logger.messages(Level::Warn), vec!["segment run1.othd skipped"]);
        assert_eq!(logger.messages(Level::Debug), vec!["decoded"]);
        assert_eq!(diag.target(), "test");
    }

    #[test]
    fn test_records_carry_target_without_fixed_module_path() {
        let logger = CaptureLogger::default();
        Diagnostics::new(&logger, "simhist::merge").info(format_args!("merged"));

        let records = logger.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].target, "simhist::merge");
        assert_eq!(records[0].module_path, None);
        assert_eq!(records[0].level, Level::Info);
    }
}
