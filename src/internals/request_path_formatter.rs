use ::http::Method;
use ::std::fmt;

/// Formats a request as `METHOD /path`, for use in failure messages.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestPathFormatter {
    method: Method,

    /// This is the path the test case was created with.
    user_requested_path: String,
}

impl RequestPathFormatter {
    pub fn new(method: Method, user_requested_path: &str) -> Self {
        Self {
            method,
            user_requested_path: user_requested_path.to_string(),
        }
    }
}

impl fmt::Display for RequestPathFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let method = &self.method;
        let user_requested_path = &self.user_requested_path;

        write!(f, "{method} {user_requested_path}")
    }
}

#[cfg(test)]
mod test_fmt {
    use super::*;

    #[test]
    fn it_should_format_with_path_given() {
        let debug = RequestPathFormatter::new(Method::POST, "/dump");
        let output = format!("{debug}");

        assert_eq!(output, "POST /dump");
    }

    #[test]
    fn it_should_format_extension_methods() {
        let method = Method::from_bytes(b"PURGE").unwrap();
        let debug = RequestPathFormatter::new(method, "/cache");
        let output = format!("{debug}");

        assert_eq!(output, "PURGE /cache");
    }
}
