use ::http::StatusCode;
use ::std::fmt;

/// Displays a status code with its reason, such as `400 (Bad Request)`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FormatStatusCode(pub StatusCode);

impl fmt::Display for FormatStatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = self.0.as_u16();

        match self.0.canonical_reason() {
            Some(reason) => write!(f, "{code} ({reason})"),
            None => write!(f, "{code}"),
        }
    }
}

#[cfg(test)]
mod test_fmt {
    use super::*;

    #[test]
    fn it_should_format_with_reason_where_available() {
        let output = format!("{}", FormatStatusCode(StatusCode::BAD_REQUEST));

        assert_eq!(output, "400 (Bad Request)");
    }

    #[test]
    fn it_should_provide_only_number_where_reason_is_unavailable() {
        let status_code = StatusCode::from_u16(599).unwrap();
        let output = format!("{}", FormatStatusCode(status_code));

        assert_eq!(output, "599");
    }
}
