use ::bytes::Bytes;
use ::http::Request;

use crate::ResponseRecorder;

/// The code under test: something which takes a request,
/// and writes its response into a [`ResponseRecorder`].
///
/// Handlers are called synchronously, once per executed test case.
///
/// It is implemented for plain functions and closures with a matching signature.
///
/// ```rust
/// use ::handler_test::ResponseRecorder;
/// use ::handler_test::http::Request;
/// use ::handler_test::http::StatusCode;
/// use ::handler_test::bytes::Bytes;
///
/// fn bad_handler(_request: &Request<Bytes>, recorder: &mut ResponseRecorder) {
///     recorder.error(StatusCode::BAD_REQUEST, "not a regular name or password");
/// }
/// ```
///
/// For an Axum [`Router`](::axum::Router), or any other Tower service,
/// see [`ServiceHandler`](crate::ServiceHandler).
pub trait Handler {
    fn serve(&self, request: &Request<Bytes>, recorder: &mut ResponseRecorder);
}

impl<F> Handler for F
where
    F: Fn(&Request<Bytes>, &mut ResponseRecorder),
{
    fn serve(&self, request: &Request<Bytes>, recorder: &mut ResponseRecorder) {
        self(request, recorder)
    }
}
