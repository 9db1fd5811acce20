use ::cookie::Cookie;

use crate::TestCaseConfigBuilder;

/// Defaults shared across many [`RequestTestCase`](crate::RequestTestCase)s.
///
/// Pass this to [`RequestTestCase::new_with_config`](crate::RequestTestCase::new_with_config).
/// It is easiest built using [`TestCaseConfig::builder()`].
#[derive(Debug, Clone, Default)]
pub struct TestCaseConfig {
    /// The content type used for a `POST`,
    /// when the test case does not set one itself.
    ///
    /// **Defaults** to `None`, which means `application/x-www-form-urlencoded` is used.
    pub default_content_type: Option<String>,

    /// Cookies sent on every test case using this config.
    /// These come before cookies added on the test case.
    ///
    /// **Defaults** to no cookies.
    pub cookies: Vec<Cookie<'static>>,

    /// Basic auth credentials used on every test case,
    /// unless the test case sets its own.
    ///
    /// **Defaults** to `None`.
    pub basic_auth: Option<(String, String)>,
}

impl TestCaseConfig {
    pub fn builder() -> TestCaseConfigBuilder {
        TestCaseConfigBuilder::default()
    }
}
