use ::anyhow::Context;
use ::anyhow::Error as AnyhowError;
use ::anyhow::Result;
use ::axum::body::Body;
use ::bytes::Bytes;
use ::http::Request;
use ::http::Response;
use ::http::StatusCode;
use ::http::response::Parts;
use ::http_body_util::BodyExt;
use ::log::error;
use ::std::fmt::Debug;
use ::tokio::runtime::Builder as RuntimeBuilder;
use ::tokio::runtime::Runtime;
use ::tower::Service;
use ::tower::util::ServiceExt;

use crate::Handler;
use crate::ResponseRecorder;

///
/// Runs a Tower service, such as an Axum [`Router`](::axum::Router),
/// as a synchronous [`Handler`].
///
/// Each request is driven to completion on a private single threaded Tokio runtime,
/// and the response is copied into the recorder.
/// If the service returns an error, the recorder is given a `500` with the error text.
///
/// As this blocks on the runtime, it must not be used from within an async context
/// (i.e. use `#[test]`, not `#[tokio::test]`).
///
/// ```rust
/// # fn test() -> Result<(), Box<dyn ::std::error::Error>> {
/// #
/// use ::axum::Router;
/// use ::axum::routing::get;
/// use ::handler_test::RequestTestCase;
/// use ::handler_test::ServiceHandler;
/// use ::handler_test::http::StatusCode;
///
/// let app = Router::new().route("/ping", get(|| async { "pong!" }));
/// let handler = ServiceHandler::new(app)?;
///
/// RequestTestCase::new("/ping", handler)
///     .execute()
///     .assert_status(StatusCode::OK)
///     .assert_body_contains("pong!");
/// #
/// # Ok(())
/// # }
/// ```
pub struct ServiceHandler<S> {
    service: S,
    runtime: Runtime,
}

impl<S> ServiceHandler<S>
where
    S: Service<Request<Body>, Response = Response<Body>> + Clone,
    AnyhowError: From<S::Error>,
{
    pub fn new(service: S) -> Result<Self> {
        let runtime = RuntimeBuilder::new_current_thread()
            .enable_all()
            .build()
            .context("Failed to build Tokio runtime for ServiceHandler")?;

        Ok(Self { service, runtime })
    }

    fn try_serve(&self, request: &Request<Bytes>) -> Result<(Parts, Bytes)> {
        let service_request = into_service_request(request)?;
        let service = self.service.clone();

        self.runtime.block_on(async move {
            let response = service.oneshot(service_request).await?;
            let (parts, response_body) = response.into_parts();
            let response_bytes = response_body.collect().await?.to_bytes();

            Ok::<_, AnyhowError>((parts, response_bytes))
        })
    }
}

impl<S> Handler for ServiceHandler<S>
where
    S: Service<Request<Body>, Response = Response<Body>> + Clone,
    AnyhowError: From<S::Error>,
{
    fn serve(&self, request: &Request<Bytes>, recorder: &mut ResponseRecorder) {
        match self.try_serve(request) {
            Ok((parts, response_bytes)) => {
                recorder.set_status(parts.status);
                *recorder.headers_mut() = parts.headers;
                recorder.write_bytes(&response_bytes);
            }
            Err(err) => {
                error!(
                    "Service failed for {} {}, {err:?}",
                    request.method(),
                    request.uri()
                );
                recorder.error(StatusCode::INTERNAL_SERVER_ERROR, format!("{err:?}"));
            }
        }
    }
}

impl<S> Debug for ServiceHandler<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ServiceHandler {{ service: {{unknown}} }}")
    }
}

fn into_service_request(request: &Request<Bytes>) -> Result<Request<Body>> {
    let mut request_builder = Request::builder()
        .method(request.method().clone())
        .uri(request.uri().clone())
        .version(request.version());

    for (header_name, header_value) in request.headers() {
        request_builder = request_builder.header(header_name, header_value);
    }

    request_builder
        .body(Body::from(request.body().clone()))
        .with_context(|| {
            format!(
                "Expect valid service request to be built for {} {}",
                request.method(),
                request.uri()
            )
        })
}
