use ::bytes::Bytes;
use ::cookie::Cookie;
use ::http::Method;
use ::http::Request;
use ::http::header;
use ::mime::Mime;
use ::url::form_urlencoded;

use crate::internals::BasicAuth;

///
/// Helpers for reading a dispatched request from within a [`Handler`](crate::Handler).
///
/// ```rust
/// use ::handler_test::RequestExt;
/// use ::handler_test::ResponseRecorder;
/// use ::handler_test::bytes::Bytes;
/// use ::handler_test::http::Request;
///
/// fn greet_handler(request: &Request<Bytes>, recorder: &mut ResponseRecorder) {
///     let name = request.form_value("name");
///     recorder.write_str(format!("hello {name}"));
/// }
/// ```
pub trait RequestExt {
    /// All form values, from an url encoded body followed by the url query.
    ///
    /// The body is only read for `POST`, `PUT`, and `PATCH` requests,
    /// with a content type of `application/x-www-form-urlencoded`.
    fn form_values(&self) -> Vec<(String, String)>;

    /// The first form value with the name given,
    /// or an empty string if there is none.
    fn form_value(&self, name: &str) -> String;

    /// Finds a cookie sent with the request.
    fn cookie(&self, name: &str) -> Option<Cookie<'static>>;

    /// The username and password from a Basic `Authorization` header.
    fn basic_auth(&self) -> Option<(String, String)>;
}

impl RequestExt for Request<Bytes> {
    fn form_values(&self) -> Vec<(String, String)> {
        let mut values = Vec::new();

        if has_form_body(self) {
            values.extend(parse_pairs(self.body()));
        }

        if let Some(query) = self.uri().query() {
            values.extend(parse_pairs(query.as_bytes()));
        }

        values
    }

    fn form_value(&self, name: &str) -> String {
        self.form_values()
            .into_iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
            .unwrap_or_default()
    }

    fn cookie(&self, name: &str) -> Option<Cookie<'static>> {
        self.headers()
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|header_value| header_value.to_str().ok())
            .flat_map(Cookie::split_parse)
            .filter_map(Result::ok)
            .find(|cookie| cookie.name() == name)
            .map(Cookie::into_owned)
    }

    fn basic_auth(&self) -> Option<(String, String)> {
        let header_value = self.headers().get(header::AUTHORIZATION)?;
        let basic_auth = BasicAuth::from_header_value(header_value)?;

        Some((basic_auth.username, basic_auth.password))
    }
}

fn has_form_body(request: &Request<Bytes>) -> bool {
    let is_body_method = matches!(
        *request.method(),
        Method::POST | Method::PUT | Method::PATCH
    );
    if !is_body_method {
        return false;
    }

    request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|header_value| header_value.to_str().ok())
        .and_then(|content_type| content_type.parse::<Mime>().ok())
        .map(|mime| mime.essence_str() == mime::APPLICATION_WWW_FORM_URLENCODED.essence_str())
        .unwrap_or(false)
}

fn parse_pairs(raw: &[u8]) -> impl Iterator<Item = (String, String)> + '_ {
    form_urlencoded::parse(raw).map(|(key, value)| (key.into_owned(), value.into_owned()))
}

#[cfg(test)]
mod test_form_values {
    use super::*;
    use ::pretty_assertions::assert_eq;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn it_should_read_query_values() {
        let request = Request::get("/search?q=rust&page=2")
            .body(Bytes::new())
            .unwrap();

        assert_eq!(
            request.form_values(),
            pairs(&[("q", "rust"), ("page", "2")])
        );
    }

    #[test]
    fn it_should_read_body_before_query() {
        let request = Request::post("/dump?name=from-query")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Bytes::from_static(b"name=from-body"))
            .unwrap();

        assert_eq!(request.form_value("name"), "from-body");
        assert_eq!(
            request.form_values(),
            pairs(&[("name", "from-body"), ("name", "from-query")])
        );
    }

    #[test]
    fn it_should_ignore_body_without_form_content_type() {
        let request = Request::post("/dump")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Bytes::from_static(b"name=value"))
            .unwrap();

        assert!(request.form_values().is_empty());
    }

    #[test]
    fn it_should_ignore_body_on_delete() {
        let request = Request::delete("/dump")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Bytes::from_static(b"name=value"))
            .unwrap();

        assert!(request.form_values().is_empty());
    }

    #[test]
    fn it_should_return_empty_string_for_missing_value() {
        let request = Request::get("/").body(Bytes::new()).unwrap();

        assert_eq!(request.form_value("missing"), "");
    }
}

#[cfg(test)]
mod test_cookie {
    use super::*;

    #[test]
    fn it_should_find_cookie_amongst_many() {
        let request = Request::get("/")
            .header(header::COOKIE, "first=1; testcookiename=testcookievalue")
            .body(Bytes::new())
            .unwrap();

        let cookie = request.cookie("testcookiename").unwrap();

        assert_eq!(cookie.value(), "testcookievalue");
    }

    #[test]
    fn it_should_return_none_without_cookie_header() {
        let request = Request::get("/").body(Bytes::new()).unwrap();

        assert!(request.cookie("testcookiename").is_none());
    }
}
