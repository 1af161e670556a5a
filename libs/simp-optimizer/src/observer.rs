//! # Iteration Observers
//!
//! Hooks invoked once per optimization iteration so callers can stream
//! progress without the optimizer printing anything itself.

use crate::metrics::IterationReport;

/// Receives a report after every completed iteration.
///
/// Any `FnMut(&IterationReport)` closure is an observer.
///
/// # Example
///
/// ```rust
/// use simp_optimizer::{IterationObserver, IterationReport};
///
/// fn drive(observer: &mut dyn IterationObserver) {
///     let _ = observer;
/// }
///
/// let mut count = 0;
/// drive(&mut |_: &IterationReport| count += 1);
/// ```
pub trait IterationObserver {
    /// Called after the density update and support enforcement.
    fn on_iteration(&mut self, report: &IterationReport);
}

impl<F> IterationObserver for F
where
    F: FnMut(&IterationReport),
{
    fn on_iteration(&mut self, report: &IterationReport) {
        self(report)
    }
}

/// Observer that ignores every report.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl IterationObserver for NoopObserver {
    fn on_iteration(&mut self, _report: &IterationReport) {}
}

/// Observer that keeps every report in order.
#[derive(Debug, Default, Clone)]
pub struct HistoryObserver {
    /// Reports received so far
    pub reports: Vec<IterationReport>,
}

impl IterationObserver for HistoryObserver {
    fn on_iteration(&mut self, report: &IterationReport) {
        self.reports.push(*report);
    }
}
