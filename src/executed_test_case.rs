use ::bytes::Bytes;
use ::http::Request;
use ::http::StatusCode;

use crate::CapturedResponse;
use crate::FailureReporter;
use crate::internals::DebugResponseBody;
use crate::internals::FormatStatusCode;
use crate::internals::RequestPathFormatter;

///
/// A test case after its request has been dispatched.
///
/// This is produced by [`RequestTestCase::execute()`](crate::RequestTestCase::execute()),
/// and holds the request as it was sent, and the response the handler wrote.
///
/// The `assert_*` functions do not panic on a mismatch.
/// Instead they send a message to the [`FailureReporter`], and return `&Self`.
/// This allows chaining many assertions, and seeing every mismatch from one run.
///
/// ```rust
/// use ::handler_test::RequestTestCase;
/// use ::handler_test::ResponseRecorder;
/// use ::handler_test::bytes::Bytes;
/// use ::handler_test::http::Request;
/// use ::handler_test::http::StatusCode;
///
/// fn bad_handler(_request: &Request<Bytes>, recorder: &mut ResponseRecorder) {
///     recorder.error(StatusCode::BAD_REQUEST, "not a regular name or password");
/// }
///
/// RequestTestCase::new("/bad", bad_handler)
///     .execute()
///     .assert_status(StatusCode::BAD_REQUEST)
///     .assert_body_contains("regular name");
/// ```
#[derive(Debug)]
pub struct ExecutedTestCase<R> {
    request_format: RequestPathFormatter,
    request: Request<Bytes>,
    response: CapturedResponse,
    reporter: R,
}

impl<R> ExecutedTestCase<R>
where
    R: FailureReporter,
{
    pub(crate) fn new(
        request_format: RequestPathFormatter,
        request: Request<Bytes>,
        response: CapturedResponse,
        reporter: R,
    ) -> Self {
        Self {
            request_format,
            request,
            response,
            reporter,
        }
    }

    /// Reports a failure if the status code is not the one given.
    pub fn assert_status(&self, expected_status_code: StatusCode) -> &Self {
        let received_status_code = self.response.status_code();
        if received_status_code != expected_status_code {
            self.report(format!(
                "Expected status code {}, received {}, for request {}",
                FormatStatusCode(expected_status_code),
                FormatStatusCode(received_status_code),
                self.request_format
            ));
        }

        self
    }

    /// Reports a failure if the status code is not 200.
    pub fn assert_status_ok(&self) -> &Self {
        self.assert_status(StatusCode::OK)
    }

    /// Reports a failure if the status code is not 400.
    pub fn assert_status_bad_request(&self) -> &Self {
        self.assert_status(StatusCode::BAD_REQUEST)
    }

    /// Reports a failure if the status code is not 404.
    pub fn assert_status_not_found(&self) -> &Self {
        self.assert_status(StatusCode::NOT_FOUND)
    }

    /// Reports a failure if the first header with the name given does not match.
    ///
    /// The name is case insensitive. A missing header is compared as an empty string.
    pub fn assert_header(&self, header_name: &str, expected_value: &str) -> &Self {
        let received_value = self.response.header_text(header_name);
        if received_value != expected_value {
            self.report(format!(
                "Expected header '{header_name}' to be '{expected_value}', received '{received_value}', for request {}",
                self.request_format
            ));
        }

        self
    }

    /// Reports a failure if the body does not contain the text given.
    pub fn assert_body_contains(&self, expected_contents: &str) -> &Self {
        if !self.text().contains(expected_contents) {
            self.report(format!(
                "Expected response body to contain '{expected_contents}', received {}, for request {}",
                DebugResponseBody(&self.response),
                self.request_format
            ));
        }

        self
    }

    /// The body of the response as text.
    #[must_use]
    pub fn text(&self) -> String {
        self.response.text()
    }

    #[must_use]
    pub fn as_bytes(&self) -> &Bytes {
        self.response.as_bytes()
    }

    /// The full response captured from the handler.
    #[must_use]
    pub fn response(&self) -> &CapturedResponse {
        &self.response
    }

    /// The request exactly as it was given to the handler.
    #[must_use]
    pub fn request(&self) -> &Request<Bytes> {
        &self.request
    }

    #[must_use]
    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    #[must_use]
    pub fn into_response(self) -> CapturedResponse {
        self.response
    }

    fn report(&self, message: String) {
        self.reporter.report(&message);
    }
}
