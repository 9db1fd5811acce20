//!
//! Handler Test is a library for testing HTTP handlers in process,
//! without starting a server or opening a socket:
//!
//!  * You create a [`RequestTestCase`] for a path and a [`Handler`],
//!  * configure the request it will send,
//!  * call [`RequestTestCase::execute()`] to dispatch it directly to the handler,
//!  * then assert against the [`ExecutedTestCase`] it returns.
//!
//! ## Getting Started
//!
//! A handler is any function taking a request, and writing into a [`ResponseRecorder`].
//!
//! ```rust
//! use ::handler_test::RequestExt;
//! use ::handler_test::RequestTestCase;
//! use ::handler_test::ResponseRecorder;
//! use ::handler_test::bytes::Bytes;
//! use ::handler_test::http::Request;
//! use ::handler_test::http::StatusCode;
//!
//! fn content_handler(request: &Request<Bytes>, recorder: &mut ResponseRecorder) {
//!     for (name, value) in request.form_values() {
//!         recorder.write_str(name);
//!         recorder.write_str(value);
//!     }
//! }
//!
//! RequestTestCase::new("/content", content_handler)
//!     .post()
//!     .add_param("name", "value1")
//!     .add_param("nam22", "value3")
//!     .execute()
//!     .assert_status(StatusCode::OK)
//!     .assert_body_contains("nam22")
//!     .assert_body_contains("value3");
//! ```
//!
//! Axum routers, and other Tower services, can be tested by wrapping them in a [`ServiceHandler`].
//!
//! ## Reporting Failures
//!
//! Assertions never stop the chain. Every mismatch is sent to a [`FailureReporter`],
//! and the following assertions still run.
//!
//! By default this is a [`FailureCollector`], owned by the test case.
//! It panics when dropped, listing every failure, which fails the test.
//! To inspect failures yourself, pass in a reporter by reference.
//!
//! ```rust
//! use ::handler_test::FailureCollector;
//! use ::handler_test::RequestTestCase;
//! use ::handler_test::ResponseRecorder;
//! use ::handler_test::bytes::Bytes;
//! use ::handler_test::http::Request;
//! use ::handler_test::http::StatusCode;
//!
//! fn ok_handler(_request: &Request<Bytes>, _recorder: &mut ResponseRecorder) {}
//!
//! let reporter = FailureCollector::new();
//! RequestTestCase::new_with_reporter("/ok", ok_handler, &reporter)
//!     .execute()
//!     .assert_status(StatusCode::BAD_REQUEST)
//!     .assert_header("x-missing", "value");
//!
//! assert_eq!(reporter.take_failures().len(), 2);
//! ```
//!
//! Use a [`PanicReporter`] to stop at the first failure instead.
//!
//! ## Content Type 📇
//!
//! A `POST` is sent with `application/x-www-form-urlencoded` by default.
//! Use [`RequestTestCase::content_type()`] to send another,
//! or set `default_content_type` on a [`TestCaseConfig`] shared across test cases.
//!
//! `GET` requests never have a content type, as their params are sent in the url query.
//!

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

pub(crate) mod internals;

mod captured_response;
pub use self::captured_response::*;

mod executed_test_case;
pub use self::executed_test_case::*;

mod failure_reporter;
pub use self::failure_reporter::*;

mod handler;
pub use self::handler::*;

mod request_ext;
pub use self::request_ext::*;

mod request_test_case;
pub use self::request_test_case::*;

mod response_recorder;
pub use self::response_recorder::*;

mod service_handler;
pub use self::service_handler::*;

mod test_case_config;
pub use self::test_case_config::*;

mod test_case_config_builder;
pub use self::test_case_config_builder::*;

pub use ::bytes;
pub use ::cookie;
pub use ::http;
