use ::cookie::Cookie;

use crate::TestCaseConfig;

/// This is for easing the building of [`TestCaseConfig`](crate::TestCaseConfig).
///
/// For full documentation see there.
///
/// ```rust
/// use ::handler_test::TestCaseConfig;
/// use ::handler_test::cookie::Cookie;
///
/// let config = TestCaseConfig::builder()
///     .default_content_type("multipart/form-data")
///     .add_cookie(Cookie::new("session", "abc123"))
///     .basic_auth("admin", "hunter2")
///     .build();
/// ```
#[derive(Debug, Clone, Default)]
pub struct TestCaseConfigBuilder {
    config: TestCaseConfig,
}

impl TestCaseConfigBuilder {
    pub fn default_content_type(mut self, content_type: &str) -> Self {
        self.config.default_content_type = Some(content_type.to_string());
        self
    }

    pub fn add_cookie<'c>(mut self, cookie: Cookie<'c>) -> Self {
        self.config.cookies.push(cookie.into_owned());
        self
    }

    pub fn basic_auth(mut self, username: &str, password: &str) -> Self {
        self.config.basic_auth = Some((username.to_string(), password.to_string()));
        self
    }

    pub fn build(self) -> TestCaseConfig {
        self.config
    }
}
