use crate::FailureReporter;

///
/// A [`FailureReporter`] which panics on the first failure.
///
/// Use this to stop a test at the first mismatch,
/// in the same way `assert_eq!` would.
///
#[derive(Debug, Default, Clone, Copy)]
pub struct PanicReporter;

impl FailureReporter for PanicReporter {
    #[track_caller]
    fn report(&self, message: &str) {
        panic!("{message}");
    }
}
