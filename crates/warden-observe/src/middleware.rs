//! # Operation Middleware
//!
//! Explicit wrapper functions, not implicit decoration: an operation is
//! passed in as a closure and comes back with its result untouched, while
//! the middleware emits start/complete/fail diagnostics and checks a
//! responsiveness heuristic.

use std::rc::Rc;
use std::time::{Duration, Instant};

use warden_core::{DiagnosticSink, ServicePath};

/// Responsiveness score below which a completed operation draws a warning.
pub const DEFAULT_RESPONSIVENESS_THRESHOLD: f64 = 0.9;

/// Score an operation's elapsed time into `(0, 1]`.
///
/// `min(1.0, 1.0 / (seconds + 0.1))`: anything under ~0.9s scores 1.0,
/// slower operations decay toward 0.
pub fn responsiveness_score(elapsed: Duration) -> f64 {
    (1.0 / (elapsed.as_secs_f64() + 0.1)).min(1.0)
}

/// Timing and logging wrapper applied around individual operations.
pub struct Middleware {
    sink: Rc<dyn DiagnosticSink>,
    responsiveness_threshold: f64,
}

impl std::fmt::Debug for Middleware {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Middleware")
            .field("responsiveness_threshold", &self.responsiveness_threshold)
            .finish_non_exhaustive()
    }
}

impl Middleware {
    /// Create a middleware with the default responsiveness threshold.
    pub fn new(sink: Rc<dyn DiagnosticSink>) -> Self {
        Self {
            sink,
            responsiveness_threshold: DEFAULT_RESPONSIVENESS_THRESHOLD,
        }
    }

    /// Replace the responsiveness threshold, clamped to `[0, 1]`.
    pub fn with_responsiveness_threshold(mut self, threshold: f64) -> Self {
        self.responsiveness_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    /// Run an infallible operation with start/complete diagnostics and a
    /// responsiveness check.
    pub fn run<T>(&self, path: &ServicePath, operation: &str, f: impl FnOnce() -> T) -> T {
        self.sink
            .info(path, &format!("starting operation: {operation}"));
        let started = Instant::now();
        let value = f();
        self.finish(path, operation, started.elapsed());
        value
    }

    /// Run a fallible operation; failures draw a warning and propagate.
    pub fn try_run<T, E: std::fmt::Display>(
        &self,
        path: &ServicePath,
        operation: &str,
        f: impl FnOnce() -> Result<T, E>,
    ) -> Result<T, E> {
        self.sink
            .info(path, &format!("starting operation: {operation}"));
        let started = Instant::now();
        match f() {
            Ok(value) => {
                self.finish(path, operation, started.elapsed());
                Ok(value)
            }
            Err(err) => {
                self.sink
                    .warning(path, &format!("operation failed: {operation}: {err}"));
                Err(err)
            }
        }
    }

    fn finish(&self, path: &ServicePath, operation: &str, elapsed: Duration) {
        self.sink.info(
            path,
            &format!(
                "operation completed: {operation} in {}ms",
                elapsed.as_millis()
            ),
        );
        let score = responsiveness_score(elapsed);
        if score < self.responsiveness_threshold {
            self.sink.warning(
                path,
                &format!("low responsiveness score {score:.2} for operation: {operation}"),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use warden_core::{MemorySink, Severity};

    use super::*;

    fn path() -> ServicePath {
        ServicePath::new("svc.op.dept.div.region").unwrap()
    }

    #[test]
    fn score_is_one_for_fast_operations() {
        assert_eq!(responsiveness_score(Duration::ZERO), 1.0);
        assert_eq!(responsiveness_score(Duration::from_millis(100)), 1.0);
    }

    #[test]
    fn score_decays_for_slow_operations() {
        let slow = responsiveness_score(Duration::from_secs(2));
        assert!(slow < 0.5);
        let slower = responsiveness_score(Duration::from_secs(10));
        assert!(slower < slow);
    }

    #[test]
    fn run_emits_start_and_completion() {
        let sink = Rc::new(MemorySink::new());
        let middleware = Middleware::new(sink.clone());
        let result = middleware.run(&path(), "insert", || 42);
        assert_eq!(result, 42);

        let records = sink.records();
        assert_eq!(records.len(), 2);
        assert!(records[0].message.contains("starting operation: insert"));
        assert!(records[1].message.contains("operation completed: insert"));
    }

    #[test]
    fn try_run_warns_on_failure_and_propagates() {
        let sink = Rc::new(MemorySink::new());
        let middleware = Middleware::new(sink.clone());
        let result: Result<(), String> =
            middleware.try_run(&path(), "insert", || Err("rejected".to_string()));
        assert!(result.is_err());
        assert!(sink
            .warnings()
            .iter()
            .any(|w| w.contains("operation failed: insert: rejected")));
    }

    #[test]
    fn try_run_success_has_no_warnings() {
        let sink = Rc::new(MemorySink::new());
        let middleware = Middleware::new(sink.clone());
        let result: Result<i32, String> = middleware.try_run(&path(), "insert", || Ok(7));
        assert_eq!(result.unwrap(), 7);
        assert!(sink.warnings().is_empty());
    }

    #[test]
    fn slow_operation_draws_responsiveness_warning() {
        let sink = Rc::new(MemorySink::new());
        let middleware = Middleware::new(sink.clone());
        // A two-second operation scores ~0.48, well under the 0.9 default.
        middleware.finish(&path(), "bulk_rebuild", Duration::from_secs(2));
        assert!(sink
            .warnings()
            .iter()
            .any(|w| w.contains("low responsiveness score")));
        assert!(sink
            .records()
            .iter()
            .any(|d| d.severity == Severity::Warning));
    }

    #[test]
    fn threshold_is_clamped_to_unit_interval() {
        let sink = Rc::new(MemorySink::new());
        let middleware = Middleware::new(sink).with_responsiveness_threshold(3.0);
        assert_eq!(middleware.responsiveness_threshold, 1.0);
    }
}
