use ::anyhow::Context;
use ::anyhow::Error as AnyhowError;
use ::anyhow::Result;
use ::bytes::Bytes;
use ::cookie::Cookie;
use ::http::HeaderValue;
use ::http::Method;
use ::http::Request;
use ::http::Uri;
use ::http::header;
use ::http::uri::PathAndQuery;
use ::log::debug;
use ::serde::Serialize;
use ::std::fmt::Debug;
use ::std::fmt::Formatter;
use ::std::fmt::Result as FmtResult;

use crate::ExecutedTestCase;
use crate::FailureCollector;
use crate::FailureReporter;
use crate::Handler;
use crate::ResponseRecorder;
use crate::TestCaseConfig;
use crate::internals::BasicAuth;
use crate::internals::FormParams;
use crate::internals::FormatStatusCode;
use crate::internals::RequestPathFormatter;

const FORM_URLENCODED_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const MULTIPART_CONTENT_TYPE: &str = "multipart/form-data";

///
/// A `RequestTestCase` builds up a request to send to a [`Handler`].
///
/// Configure it by chaining calls, then call [`RequestTestCase::execute()`].
/// That dispatches the request directly to the handler, with no network in between,
/// and returns an [`ExecutedTestCase`] to assert against.
///
/// ```rust
/// use ::handler_test::RequestExt;
/// use ::handler_test::RequestTestCase;
/// use ::handler_test::ResponseRecorder;
/// use ::handler_test::bytes::Bytes;
/// use ::handler_test::http::Request;
/// use ::handler_test::http::StatusCode;
///
/// fn dump_handler(request: &Request<Bytes>, recorder: &mut ResponseRecorder) {
///     for (name, value) in request.form_values() {
///         recorder.insert_header(&name, &value).unwrap();
///     }
/// }
///
/// RequestTestCase::new("/dump", dump_handler)
///     .post()
///     .add_param("name", "value1")
///     .add_param("nam22", "value3")
///     .execute()
///     .assert_status(StatusCode::OK)
///     .assert_header("name", "value1")
///     .assert_header("nam22", "value3");
/// ```
///
/// Defaults are a `GET` request, with no params, cookies, or authentication.
/// A `POST` is sent as `application/x-www-form-urlencoded` unless told otherwise.
///
/// Assertion failures go to a [`FailureReporter`].
/// By default this is a [`FailureCollector`], which fails the test once the
/// executed test case is dropped.
///
#[must_use = "a test case does nothing until it is executed"]
pub struct RequestTestCase<H, R = FailureCollector> {
    path: String,
    handler: H,
    reporter: R,

    /// `None` means `GET` for built requests,
    /// and means keeping the method of a raw request.
    method: Option<Method>,
    params: FormParams,
    content_type: Option<String>,
    default_content_type: Option<String>,
    cookies: Vec<Cookie<'static>>,
    basic_auth: Option<BasicAuth>,
    raw_request: Option<Request<Bytes>>,

    /// Errors found whilst configuring, returned when executing.
    configuration_error: Option<AnyhowError>,
}

impl<H> RequestTestCase<H, FailureCollector>
where
    H: Handler,
{
    /// Creates a test case for the path given,
    /// reporting failures to a new [`FailureCollector`].
    pub fn new(path: &str, handler: H) -> Self {
        Self::new_with_reporter(path, handler, FailureCollector::new())
    }
}

impl<H, R> RequestTestCase<H, R>
where
    H: Handler,
    R: FailureReporter,
{
    pub fn new_with_reporter(path: &str, handler: H, reporter: R) -> Self {
        Self::new_with_config(path, handler, reporter, TestCaseConfig::default())
    }

    pub fn new_with_config(path: &str, handler: H, reporter: R, config: TestCaseConfig) -> Self {
        Self {
            path: path.to_string(),
            handler,
            reporter,
            method: None,
            params: FormParams::new(),
            content_type: None,
            default_content_type: config.default_content_type,
            cookies: config.cookies,
            basic_auth: config
                .basic_auth
                .map(|(username, password)| BasicAuth::new(&username, &password)),
            raw_request: None,
            configuration_error: None,
        }
    }

    /// Sets the method to use. The last method set wins.
    ///
    /// When a raw request is used, this replaces the raw request's method.
    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn get(self) -> Self {
        self.method(Method::GET)
    }

    /// Sets the method to `POST`.
    ///
    /// Unless a content type is set, this will be sent as `application/x-www-form-urlencoded`.
    pub fn post(self) -> Self {
        self.method(Method::POST)
    }

    pub fn put(self) -> Self {
        self.method(Method::PUT)
    }

    pub fn delete(self) -> Self {
        self.method(Method::DELETE)
    }

    pub fn patch(self) -> Self {
        self.method(Method::PATCH)
    }

    pub fn head(self) -> Self {
        self.method(Method::HEAD)
    }

    /// Sets the content type to send.
    ///
    /// This is ignored for `GET` requests.
    pub fn content_type(mut self, content_type: &str) -> Self {
        self.content_type = Some(content_type.to_string());
        self
    }

    pub fn form_urlencoded(self) -> Self {
        self.content_type(FORM_URLENCODED_CONTENT_TYPE)
    }

    pub fn multipart(self) -> Self {
        self.content_type(MULTIPART_CONTENT_TYPE)
    }

    /// Sends HTTP Basic authentication, in the `Authorization` header.
    pub fn basic_auth(mut self, username: &str, password: &str) -> Self {
        self.basic_auth = Some(BasicAuth::new(username, password));
        self
    }

    /// Adds a cookie to be sent with the request.
    ///
    /// Only the name and value are sent, any attributes are dropped.
    pub fn add_cookie<'c>(mut self, cookie: Cookie<'c>) -> Self {
        self.cookies.push(cookie.into_owned());
        self
    }

    /// Adds many cookies, sent in the order given.
    pub fn add_cookies<'c, I>(mut self, cookies: I) -> Self
    where
        I: IntoIterator<Item = Cookie<'c>>,
    {
        self.cookies
            .extend(cookies.into_iter().map(Cookie::into_owned));
        self
    }

    /// Adds a parameter. Adding the same key again keeps both values.
    ///
    /// For `GET` requests these are sent in the url query,
    /// and for all other methods these are url encoded into the body.
    pub fn add_param(mut self, key: &str, value: &str) -> Self {
        self.params.add(key, value);
        self
    }

    /// Adds each of the key values within the value given,
    /// such as a struct, a map, or a list of pairs.
    ///
    /// If it cannot be serialized as an url encoded form,
    /// then executing this test case will fail.
    pub fn add_params<V>(mut self, params: V) -> Self
    where
        V: Serialize,
    {
        if let Err(err) = self.params.add_serialized(params) {
            let err = err.context(format!(
                "It should serialize params, for request {}",
                self.debug_request_format()
            ));
            self.configuration_error.get_or_insert(err);
        }

        self
    }

    /// Uses the request given, instead of building one.
    ///
    /// Cookies, basic auth, content type, and an explicitly set method, are still applied to it.
    /// For `GET` requests, params are added to the end of its query.
    pub fn raw_request(mut self, request: Request<Bytes>) -> Self {
        self.raw_request = Some(request);
        self
    }

    /// Dispatches the request to the handler, and captures its response.
    ///
    /// This will panic if the request cannot be built,
    /// such as when the path is not a valid uri.
    /// See [`RequestTestCase::try_execute()`] for a version returning an error.
    pub fn execute(self) -> ExecutedTestCase<R> {
        self.try_execute().expect("Executing request failed")
    }

    /// An alias for [`RequestTestCase::execute()`].
    pub fn do_request(self) -> ExecutedTestCase<R> {
        self.execute()
    }

    pub fn try_execute(self) -> Result<ExecutedTestCase<R>> {
        let debug_request_format = self.debug_request_format();
        if let Some(err) = self.configuration_error {
            return Err(err);
        }

        let mut request = match self.raw_request {
            Some(mut raw_request) => {
                if let Some(method) = self.method {
                    *raw_request.method_mut() = method;
                }
                raw_request
            }
            None => {
                let method = self.method.unwrap_or(Method::GET);
                build_request(method, &self.path, &self.params)
                    .with_context(|| format!("Failed to build request {debug_request_format}"))?
            }
        };

        add_cookie_header(&mut request, &self.cookies).with_context(|| {
            format!("Failed to set cookies, for request {debug_request_format}")
        })?;

        if let Some(basic_auth) = &self.basic_auth {
            let header_value = basic_auth.to_header_value().with_context(|| {
                format!("Failed to set basic auth, for request {debug_request_format}")
            })?;
            request
                .headers_mut()
                .insert(header::AUTHORIZATION, header_value);
        }

        if request.method() == Method::GET && self.params.has_content() {
            let uri = build_uri_with_params(request.uri(), &self.params).with_context(|| {
                format!("Failed to add params to query, for request {debug_request_format}")
            })?;
            *request.uri_mut() = uri;
        }

        let maybe_content_type = resolve_content_type(
            request.method(),
            self.content_type,
            self.default_content_type,
        );
        if let Some(content_type) = maybe_content_type {
            let header_value = HeaderValue::from_str(&content_type).with_context(|| {
                format!(
                    "Failed to store header content type '{content_type}', for request {debug_request_format}"
                )
            })?;
            request
                .headers_mut()
                .insert(header::CONTENT_TYPE, header_value);
        }

        let request_format = RequestPathFormatter::new(request.method().clone(), &self.path);
        debug!("Dispatching request {request_format}, to {}", request.uri());

        let mut recorder = ResponseRecorder::new();
        self.handler.serve(&request, &mut recorder);
        let response = recorder.finish();

        debug!(
            "Captured response {} for request {request_format}",
            FormatStatusCode(response.status_code())
        );

        Ok(ExecutedTestCase::new(
            request_format,
            request,
            response,
            self.reporter,
        ))
    }

    fn debug_request_format(&self) -> RequestPathFormatter {
        let method = match (&self.method, &self.raw_request) {
            (Some(method), _) => method.clone(),
            (None, Some(raw_request)) => raw_request.method().clone(),
            (None, None) => Method::GET,
        };

        RequestPathFormatter::new(method, &self.path)
    }
}

impl<H, R> Debug for RequestTestCase<H, R>
where
    R: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("RequestTestCase")
            .field("path", &self.path)
            .field("method", &self.method)
            .field("params", &self.params)
            .field("content_type", &self.content_type)
            .field("cookies", &self.cookies)
            .field("basic_auth", &self.basic_auth.is_some())
            .field("raw_request", &self.raw_request)
            .field("reporter", &self.reporter)
            .finish_non_exhaustive()
    }
}

fn build_request(method: Method, path: &str, params: &FormParams) -> Result<Request<Bytes>> {
    let body = if method == Method::GET {
        Bytes::new()
    } else {
        Bytes::from(params.to_string())
    };

    let request = Request::builder().method(method).uri(path).body(body)?;

    Ok(request)
}

/// Cookies are joined into one header, after any cookies already present.
fn add_cookie_header(request: &mut Request<Bytes>, cookies: &[Cookie<'static>]) -> Result<()> {
    if cookies.is_empty() {
        return Ok(());
    }

    let mut cookie_header_raw = match request.headers().get(header::COOKIE) {
        Some(header_value) => header_value.as_bytes().to_vec(),
        None => Vec::new(),
    };

    for cookie in cookies {
        if !cookie_header_raw.is_empty() {
            cookie_header_raw.extend_from_slice(b"; ");
        }
        cookie_header_raw.extend_from_slice(cookie.stripped().to_string().as_bytes());
    }

    let header_value = HeaderValue::from_bytes(&cookie_header_raw)?;
    request.headers_mut().insert(header::COOKIE, header_value);

    Ok(())
}

fn build_uri_with_params(uri: &Uri, params: &FormParams) -> Result<Uri> {
    let query = params.merged_after_query(uri.query());
    let path_and_query = format!("{}?{query}", uri.path());

    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(PathAndQuery::try_from(path_and_query)?);

    Ok(Uri::from_parts(parts)?)
}

fn resolve_content_type(
    method: &Method,
    content_type: Option<String>,
    default_content_type: Option<String>,
) -> Option<String> {
    match *method {
        Method::GET => None,
        Method::POST => Some(
            content_type
                .or(default_content_type)
                .unwrap_or_else(|| FORM_URLENCODED_CONTENT_TYPE.to_string()),
        ),
        _ => content_type,
    }
}



#[cfg(test)]
mod test_add_cookie_header {
    use super::*;

    #[test]
    fn it_should_join_cookies_and_drop_attributes() {
        let mut request = Request::new(Bytes::new());
        let mut cookie = Cookie::new("first", "1");
        cookie.set_path("/");

        add_cookie_header(&mut request, &[cookie, Cookie::new("second", "2")]).unwrap();

        assert_eq!(request.headers()[header::COOKIE], "first=1; second=2");
    }

    #[test]
    fn it_should_append_to_existing_cookie_header() {
        let mut request = Request::builder()
            .header(header::COOKIE, "existing=0")
            .body(Bytes::new())
            .unwrap();

        add_cookie_header(&mut request, &[Cookie::new("added", "1")]).unwrap();

        assert_eq!(request.headers()[header::COOKIE], "existing=0; added=1");
    }

    #[test]
    fn it_should_append_to_existing_non_ascii_cookie_header() {
        let mut request = Request::builder()
            .header(
                header::COOKIE,
                HeaderValue::from_bytes(b"existing=caf\xe9").unwrap(),
            )
            .body(Bytes::new())
            .unwrap();

        add_cookie_header(&mut request, &[Cookie::new("added", "1")]).unwrap();

        assert_eq!(
            request.headers()[header::COOKIE].as_bytes(),
            b"existing=caf\xe9; added=1"
        );
    }

    #[test]
    fn it_should_leave_request_alone_without_cookies() {
        let mut request = Request::new(Bytes::new());

        add_cookie_header(&mut request, &[]).unwrap();

        assert!(request.headers().get(header::COOKIE).is_none());
    }
}

#[cfg(test)]
mod test_do_request {
    use super::*;
    use ::pretty_assertions::assert_eq;

    fn echo_handler(request: &Request<Bytes>, recorder: &mut ResponseRecorder) {
        recorder.write_str(format!("{} {}", request.method(), request.uri()));
    }

    #[test]
    fn it_should_dispatch_like_execute() {
        let executed = RequestTestCase::new("/echo", echo_handler)
            .add_param("a", "1")
            .do_request();

        assert_eq!(executed.text(), "GET /echo?a=1");
    }
}
