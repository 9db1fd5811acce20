use ::std::rc::Rc;
use ::std::sync::Arc;

mod failure_collector;
pub use self::failure_collector::*;

mod panic_reporter;
pub use self::panic_reporter::*;

///
/// The sink that assertion failures are sent to.
///
/// Reporting a failure must not stop the test,
/// so the remaining assertions in a chain can still run.
/// It is up to the reporter to decide how the test fails,
/// e.g. [`FailureCollector`] panics once it is dropped.
///
pub trait FailureReporter {
    fn report(&self, message: &str);
}

impl<T> FailureReporter for &T
where
    T: FailureReporter + ?Sized,
{
    fn report(&self, message: &str) {
        (**self).report(message)
    }
}

impl<T> FailureReporter for Rc<T>
where
    T: FailureReporter + ?Sized,
{
    fn report(&self, message: &str) {
        (**self).report(message)
    }
}

impl<T> FailureReporter for Arc<T>
where
    T: FailureReporter + ?Sized,
{
    fn report(&self, message: &str) {
        (**self).report(message)
    }
}

impl<T> FailureReporter for Box<T>
where
    T: FailureReporter + ?Sized,
{
    fn report(&self, message: &str) {
        (**self).report(message)
    }
}

#[cfg(test)]
mod test_report {
    use super::*;
    use ::pretty_assertions::assert_eq;

    #[test]
    fn it_should_forward_through_references() {
        let collector = FailureCollector::new();

        (&collector).report("one");
        Rc::new(&collector).report("two");
        let boxed: Box<dyn FailureReporter + '_> = Box::new(&collector);
        boxed.report("three");

        assert_eq!(collector.take_failures(), vec!["one", "two", "three"]);
    }

    #[test]
    fn it_should_forward_through_arc() {
        let collector = Arc::new(FailureCollector::new());

        Arc::clone(&collector).report("shared");

        assert_eq!(collector.take_failures(), vec!["shared"]);
    }
}
