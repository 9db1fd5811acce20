use ::anyhow::Context;
use ::anyhow::Result;
use ::bytes::BufMut;
use ::bytes::BytesMut;
use ::http::HeaderMap;
use ::http::HeaderName;
use ::http::HeaderValue;
use ::http::StatusCode;
use ::http::header;
use ::std::io;

use crate::CapturedResponse;

/// An in-memory sink given to a [`Handler`](crate::Handler),
/// which records the response it writes.
///
/// The status code defaults to `200 OK` if never set.
/// Headers and body can be written in any order.
///
/// ```rust
/// use ::handler_test::ResponseRecorder;
/// use ::handler_test::http::StatusCode;
///
/// let mut recorder = ResponseRecorder::new();
/// recorder.set_status(StatusCode::CREATED);
/// recorder.write_str("created!");
///
/// let response = recorder.finish();
/// assert_eq!(response.status_code(), StatusCode::CREATED);
/// assert_eq!(response.text(), "created!");
/// ```
#[derive(Debug, Clone)]
pub struct ResponseRecorder {
    status_code: StatusCode,
    headers: HeaderMap<HeaderValue>,
    body: BytesMut,
}

impl ResponseRecorder {
    pub fn new() -> Self {
        Self {
            status_code: StatusCode::OK,
            headers: HeaderMap::new(),
            body: BytesMut::new(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        self.status_code
    }

    pub fn set_status(&mut self, status_code: StatusCode) {
        self.status_code = status_code;
    }

    pub fn headers(&self) -> &HeaderMap<HeaderValue> {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap<HeaderValue> {
        &mut self.headers
    }

    /// Sets a header, replacing any existing values under the same name.
    pub fn insert_header(&mut self, name: &str, value: &str) -> Result<()> {
        let (header_name, header_value) = parse_header(name, value)?;
        self.headers.insert(header_name, header_value);

        Ok(())
    }

    /// Adds a header, keeping any existing values under the same name.
    pub fn append_header(&mut self, name: &str, value: &str) -> Result<()> {
        let (header_name, header_value) = parse_header(name, value)?;
        self.headers.append(header_name, header_value);

        Ok(())
    }

    pub fn write_bytes<B>(&mut self, bytes: B)
    where
        B: AsRef<[u8]>,
    {
        self.body.put_slice(bytes.as_ref());
    }

    pub fn write_str<S>(&mut self, text: S)
    where
        S: AsRef<str>,
    {
        self.write_bytes(text.as_ref().as_bytes());
    }

    /// Replies with a plain text error message,
    /// and the status code given.
    ///
    /// The message is appended to anything already written,
    /// followed by a newline.
    pub fn error<S>(&mut self, status_code: StatusCode, message: S)
    where
        S: AsRef<str>,
    {
        self.headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        );
        self.headers.insert(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        );
        self.status_code = status_code;
        self.write_str(message);
        self.write_str("\n");
    }

    /// Freezes what was recorded into a [`CapturedResponse`].
    pub fn finish(self) -> CapturedResponse {
        CapturedResponse::new(self.status_code, self.headers, self.body.freeze())
    }
}

impl Default for ResponseRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl io::Write for ResponseRecorder {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_bytes(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn parse_header(name: &str, value: &str) -> Result<(HeaderName, HeaderValue)> {
    let header_name = HeaderName::try_from(name)
        .with_context(|| format!("Failed to parse header name '{name}'"))?;
    let header_value = HeaderValue::from_str(value)
        .with_context(|| format!("Failed to parse value for header '{name}'"))?;

    Ok((header_name, header_value))
}



#[cfg(test)]
mod test_headers {
    use super::*;

    #[test]
    fn it_should_replace_on_insert() {
        let mut recorder = ResponseRecorder::new();

        recorder.insert_header("x-name", "first").unwrap();
        recorder.insert_header("X-Name", "second").unwrap();

        let values: Vec<_> = recorder.headers().get_all("x-name").iter().collect();
        assert_eq!(values, vec!["second"]);
    }

    #[test]
    fn it_should_keep_both_on_append() {
        let mut recorder = ResponseRecorder::new();

        recorder.append_header("x-name", "first").unwrap();
        recorder.append_header("x-name", "second").unwrap();

        let values: Vec<_> = recorder.headers().get_all("x-name").iter().collect();
        assert_eq!(values, vec!["first", "second"]);
    }

    #[test]
    fn it_should_reject_invalid_header_names() {
        let mut recorder = ResponseRecorder::new();

        let result = recorder.insert_header("bad header", "value");

        assert!(result.is_err());
    }
}
