use ::bytes::Bytes;
use ::cookie::Cookie;
use ::http::HeaderMap;
use ::http::HeaderValue;
use ::http::StatusCode;
use ::http::header::AsHeaderName;
use ::http::header::SET_COOKIE;
use ::log::warn;

///
/// The status, headers, and body that a handler wrote to its
/// [`ResponseRecorder`](crate::ResponseRecorder).
///
/// This is read only, and is produced once per dispatch.
/// It can be retrieved from an executed test case using
/// [`ExecutedTestCase::response()`](crate::ExecutedTestCase::response()).
///
#[derive(Clone, Debug)]
pub struct CapturedResponse {
    status_code: StatusCode,
    headers: HeaderMap<HeaderValue>,
    response_body: Bytes,
}

impl CapturedResponse {
    pub(crate) fn new(
        status_code: StatusCode,
        headers: HeaderMap<HeaderValue>,
        response_body: Bytes,
    ) -> Self {
        Self {
            status_code,
            headers,
            response_body,
        }
    }

    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        self.status_code
    }

    #[must_use]
    pub fn headers(&self) -> &HeaderMap<HeaderValue> {
        &self.headers
    }

    /// Finds the first header with the given name.
    /// Lookup is case insensitive.
    ///
    /// `None` is returned when no header was found.
    #[must_use]
    pub fn maybe_header<N>(&self, header_name: N) -> Option<&HeaderValue>
    where
        N: AsHeaderName,
    {
        self.headers.get(header_name)
    }

    /// Returns the first header with the given name as text.
    ///
    /// A missing header is returned as an empty string.
    #[must_use]
    pub fn header_text<N>(&self, header_name: N) -> String
    where
        N: AsHeaderName,
    {
        self.maybe_header(header_name)
            .map(|header_value| String::from_utf8_lossy(header_value.as_bytes()).to_string())
            .unwrap_or_default()
    }

    /// The `Content-Type` of the response, if one was set.
    #[must_use]
    pub fn maybe_content_type(&self) -> Option<String> {
        self.maybe_header(::http::header::CONTENT_TYPE)
            .and_then(|header_value| header_value.to_str().ok())
            .map(str::to_string)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &Bytes {
        &self.response_body
    }

    #[must_use]
    pub fn into_bytes(self) -> Bytes {
        self.response_body
    }

    /// Returns the body, extracted as a UTF-8 string.
    ///
    /// Invalid UTF-8 sequences are replaced.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(self.as_bytes()).to_string()
    }

    /// Iterates over the cookies set by the response, using `Set-Cookie` headers.
    ///
    /// Headers which cannot be parsed as a cookie are skipped.
    pub fn iter_cookies(&self) -> impl Iterator<Item = Cookie<'_>> {
        self.headers
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|header_value| {
                let header_str = header_value.to_str().ok()?;
                match Cookie::parse(header_str) {
                    Ok(cookie) => Some(cookie),
                    Err(err) => {
                        warn!("Skipping malformed 'Set-Cookie' header '{header_str}', {err}");
                        None
                    }
                }
            })
    }

    /// Finds the first cookie set by the response with the given name.
    #[must_use]
    pub fn maybe_cookie(&self, cookie_name: &str) -> Option<Cookie<'static>> {
        self.iter_cookies()
            .find(|cookie| cookie.name() == cookie_name)
            .map(Cookie::into_owned)
    }
}

impl From<CapturedResponse> for Bytes {
    fn from(response: CapturedResponse) -> Self {
        response.into_bytes()
    }
}


#[cfg(test)]
mod test_cookies {
    use crate::ResponseRecorder;

    #[test]
    fn it_should_find_cookie_by_name() {
        let mut recorder = ResponseRecorder::new();
        recorder
            .append_header("set-cookie", "session=abc123; Path=/; HttpOnly")
            .unwrap();
        recorder.append_header("set-cookie", "theme=dark").unwrap();

        let response = recorder.finish();
        let cookie = response.maybe_cookie("session").unwrap();

        assert_eq!(cookie.value(), "abc123");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(response.iter_cookies().count(), 2);
    }

    #[test]
    fn it_should_return_none_for_missing_cookie() {
        let response = ResponseRecorder::new().finish();

        assert!(response.maybe_cookie("session").is_none());
    }
}
