use ::log::error;
use ::std::cell::RefCell;
use ::std::mem;
use ::std::thread;

use crate::FailureReporter;

///
/// The default [`FailureReporter`].
///
/// Failures are stored as they are reported, allowing the rest of the test to continue.
/// When the collector is dropped, it panics listing every failure it holds.
/// This fails the test at the end, with all of the mismatches found along the way.
///
/// Failures taken out with [`FailureCollector::take_failures()`] are not panicked on.
///
#[derive(Debug, Default)]
pub struct FailureCollector {
    failures: RefCell<Vec<String>>,
}

impl FailureCollector {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failures.borrow().is_empty()
    }

    /// A copy of the failures reported so far.
    #[must_use]
    pub fn failures(&self) -> Vec<String> {
        self.failures.borrow().clone()
    }

    /// Removes and returns the failures reported so far.
    pub fn take_failures(&self) -> Vec<String> {
        mem::take(&mut *self.failures.borrow_mut())
    }
}

impl FailureReporter for FailureCollector {
    fn report(&self, message: &str) {
        error!("{message}");
        self.failures.borrow_mut().push(message.to_string());
    }
}

impl Drop for FailureCollector {
    fn drop(&mut self) {
        let failures = mem::take(self.failures.get_mut());

        // Avoid a double panic, which would abort the test run.
        if failures.is_empty() || thread::panicking() {
            return;
        }

        panic!(
            "{} failure(s) reported:\n{}",
            failures.len(),
            failures.join("\n")
        );
    }
}

#[cfg(test)]
mod test_report {
    use super::*;
    use ::pretty_assertions::assert_eq;

    #[test]
    fn it_should_keep_failures_in_order() {
        let collector = FailureCollector::new();

        collector.report("first");
        collector.report("second");

        assert!(collector.has_failures());
        assert_eq!(collector.failures(), vec!["first", "second"]);
        collector.take_failures();
    }

    #[test]
    fn it_should_empty_on_take() {
        let collector = FailureCollector::new();
        collector.report("first");

        let failures = collector.take_failures();

        assert_eq!(failures, vec!["first"]);
        assert!(!collector.has_failures());
    }
}
