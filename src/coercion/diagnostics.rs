//! Diagnostic sinks for per-cell coercion failures.
//!
//! A failed coercion is never an error: the field is omitted and the
//! failure is handed to whichever sink the caller supplied.

use crate::models::{LogicalType, NumberFormat};
use std::fmt;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::warn;

/// Why a cell could not be resolved to its declared type
#[derive(Debug, Clone, PartialEq)]
pub enum FailureReason {
    /// The source cell holds an error value such as `#DIV/0!`
    CellError { kind: String, message: String },
    /// The number format rules the value out for this target
    UnsupportedFormat(NumberFormat),
    /// The value's kind cannot represent the target (a boolean as a timestamp)
    IncompatibleValue,
    /// Text did not parse as the target type
    Unparseable,
    /// Serial day number outside the representable date range
    SerialOutOfRange,
    /// Nothing in the cell
    Blank,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::CellError { kind, message } => {
                write!(f, "cell error {}: {}", kind, message)
            }
            FailureReason::UnsupportedFormat(format) => {
                write!(f, "number format {:?} not supported", format)
            }
            FailureReason::IncompatibleValue => f.write_str("incompatible value kind"),
            FailureReason::Unparseable => f.write_str("unparseable text"),
            FailureReason::SerialOutOfRange => f.write_str("serial date out of range"),
            FailureReason::Blank => f.write_str("blank cell"),
        }
    }
}

/// One absent field, with enough context to find the cell again
#[derive(Debug, Clone, PartialEq)]
pub struct CoercionFailure {
    pub column: String,
    pub target: LogicalType,
    /// The cell's display text, verbatim
    pub display: String,
    pub reason: FailureReason,
}

pub trait DiagnosticSink {
    fn report(&self, failure: CoercionFailure);
}

/// Logs failures through `tracing` and counts them for the run summary.
/// Blank cells are logged like any other failure but left out of the count.
#[derive(Debug, Default)]
pub struct TracingSink {
    reported: AtomicUsize,
}

impl TracingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failure_count(&self) -> usize {
        self.reported.load(Ordering::Relaxed)
    }
}

impl DiagnosticSink for TracingSink {
    fn report(&self, failure: CoercionFailure) {
        if failure.reason == FailureReason::Blank {
            warn!(
                column = %failure.column,
                target = %failure.target,
                "Blank cell omitted"
            );
            return;
        }

        self.reported.fetch_add(1, Ordering::Relaxed);
        warn!(
            column = %failure.column,
            target = %failure.target,
            value = %failure.display,
            reason = %failure.reason,
            "Failed to parse {}",
            failure.target
        );
    }
}

/// Keeps every failure in memory
#[derive(Debug, Default)]
pub struct CollectingSink {
    failures: Mutex<Vec<CoercionFailure>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failures(&self) -> Vec<CoercionFailure> {
        self.failures
            .lock()
            .map(|failures| failures.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.failures.lock().map(|f| f.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&self, failure: CoercionFailure) {
        if let Ok(mut failures) = self.failures.lock() {
            failures.push(failure);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tracing_subscriber::fmt::MakeWriter;

    fn failure(reason: FailureReason) -> CoercionFailure {
        CoercionFailure {
            column: "amount".to_string(),
            target: LogicalType::Number,
            display: "hello".to_string(),
            reason,
        }
    }

    #[test]
    fn test_tracing_sink_skips_blanks_in_count() {
        let sink = TracingSink::new();
        sink.report(failure(FailureReason::Unparseable));
        sink.report(failure(FailureReason::Blank));
        sink.report(failure(FailureReason::IncompatibleValue));
        assert_eq!(sink.failure_count(), 2);
    }

    #[derive(Clone, Default)]
    struct CapturedLog(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLog {
        type Writer = CapturedLog;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_blank_cells_log_at_warn() {
        let log = CapturedLog::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(log.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();

        let sink = TracingSink::new();
        tracing::subscriber::with_default(subscriber, || {
            sink.report(failure(FailureReason::Blank));
        });

        let output = String::from_utf8(log.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("WARN"), "unexpected log output: {}", output);
        assert!(output.contains("Blank cell omitted"));
        assert!(output.contains("column=amount"));
        assert_eq!(sink.failure_count(), 0);
    }

    #[test]
    fn test_collecting_sink_keeps_order() {
        let sink = CollectingSink::new();
        assert!(sink.is_empty());

        sink.report(failure(FailureReason::Unparseable));
        sink.report(failure(FailureReason::SerialOutOfRange));

        let reasons: Vec<_> = sink.failures().into_iter().map(|f| f.reason).collect();
        assert_eq!(
            reasons,
            vec![FailureReason::Unparseable, FailureReason::SerialOutOfRange]
        );
    }

    #[test]
    fn test_reason_display() {
        let reason = FailureReason::CellError {
            kind: "DIVIDE_BY_ZERO".to_string(),
            message: "Function DIVIDE parameter 2 cannot be zero.".to_string(),
        };
        assert_eq!(
            reason.to_string(),
            "cell error DIVIDE_BY_ZERO: Function DIVIDE parameter 2 cannot be zero."
        );
        assert_eq!(
            FailureReason::UnsupportedFormat(NumberFormat::Date).to_string(),
            "number format Date not supported"
        );
    }
}
