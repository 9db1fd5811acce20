use ::anyhow::Context;
use ::anyhow::Result;
use ::base64::Engine;
use ::base64::engine::general_purpose::STANDARD;
use ::http::HeaderValue;

const BASIC_PREFIX: &str = "Basic ";

/// Credentials for HTTP Basic authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicAuth {
    pub username: String,
    pub password: String,
}

impl BasicAuth {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    /// Builds the value for an `Authorization` header.
    pub fn to_header_value(&self) -> Result<HeaderValue> {
        let credentials = format!("{}:{}", self.username, self.password);
        let encoded = STANDARD.encode(credentials.as_bytes());

        HeaderValue::from_str(&format!("{BASIC_PREFIX}{encoded}")).with_context(|| {
            format!(
                "Failed to build basic auth header for user '{}'",
                self.username
            )
        })
    }

    /// Decodes an `Authorization` header.
    ///
    /// Returns `None` if the header is not using the Basic scheme,
    /// or is malformed.
    pub fn from_header_value(header_value: &HeaderValue) -> Option<Self> {
        let raw = header_value.to_str().ok()?;
        let (scheme, encoded) = raw.split_at_checked(BASIC_PREFIX.len())?;
        if !scheme.eq_ignore_ascii_case(BASIC_PREFIX) {
            return None;
        }

        let decoded = STANDARD.decode(encoded.trim()).ok()?;
        let credentials = String::from_utf8(decoded).ok()?;
        let (username, password) = credentials.split_once(':')?;

        Some(Self::new(username, password))
    }
}

#[cfg(test)]
mod test_to_header_value {
    use super::*;

    #[test]
    fn it_should_encode_as_basic_scheme() {
        let header_value = BasicAuth::new("Aladdin", "open sesame")
            .to_header_value()
            .unwrap();

        assert_eq!(header_value, "Basic QWxhZGRpbjpvcGVuIHNlc2FtZQ==");
    }
}
