//! Correlation middleware attaching a request-scoped identifier.
//!
//! Each incoming request carries a correlation identifier: the value of the
//! `correlation-id` header when the caller supplied one, a fresh UUID
//! otherwise. The identifier is opaque; it is stored in task-local storage
//! for the request's lifetime, echoed back on the response, and must be
//! propagated unchanged to downstream calls and log statements.
//!
//! Tokio task-local variables are not inherited across spawned tasks. Use
//! [`CorrelationId::scope`] when spawning new tasks or moving work onto
//! blocking threads to keep the active identifier in scope.

use std::task::{Context, Poll};

use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::Error;
use futures_util::future::{ready, LocalBoxFuture, Ready};
use std::future::Future;
use tokio::task_local;
use tracing::error;
use uuid::Uuid;

/// Header used to receive and echo the correlation identifier.
pub const CORRELATION_ID_HEADER: &str = "correlation-id";

task_local! {
    static CORRELATION_ID: CorrelationId;
}

/// Per-request correlation identifier exposed via task-local storage.
///
/// # Examples
/// ```
/// use backend::middleware::correlation::CorrelationId;
///
/// async fn handler() {
///     if let Some(id) = CorrelationId::current() {
///         tracing::debug!(correlation_id = %id, "handling request");
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrelationId(String);

impl CorrelationId {
    /// Wrap a caller-supplied identifier. The value is opaque and kept
    /// verbatim.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    fn from_header(value: &HeaderValue) -> Option<Self> {
        let raw = value.to_str().ok()?.trim();
        if raw.is_empty() {
            return None;
        }
        Some(Self(raw.to_owned()))
    }

    /// Returns the current correlation identifier if one is in scope.
    pub fn current() -> Option<Self> {
        CORRELATION_ID.try_with(|id| id.clone()).ok()
    }

    /// Execute the provided future with the supplied identifier in scope.
    pub async fn scope<Fut>(id: CorrelationId, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        CORRELATION_ID.scope(id, fut).await
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Middleware installing the request-scoped correlation identifier and
/// adding a `correlation-id` header to every response.
///
/// Handlers read the identifier via [`CorrelationId::current`].
#[derive(Clone)]
pub struct Correlation;

impl<S, B> Transform<S, ServiceRequest> for Correlation
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = CorrelationMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(CorrelationMiddleware { service }))
    }
}

/// Service wrapper produced by [`Correlation`].
///
/// Applications should not use this type directly.
pub struct CorrelationMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for CorrelationMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let correlation_id = req
            .headers()
            .get(CORRELATION_ID_HEADER)
            .and_then(CorrelationId::from_header)
            .unwrap_or_else(CorrelationId::generate);
        let header_value = correlation_id.to_string();
        let fut = self.service.call(req);
        Box::pin(CorrelationId::scope(correlation_id.clone(), async move {
            let mut res = fut.await?;
            match HeaderValue::from_str(&header_value) {
                Ok(value) => {
                    res.response_mut()
                        .headers_mut()
                        .insert(HeaderName::from_static(CORRELATION_ID_HEADER), value);
                }
                Err(error) => {
                    error!(
                        %error,
                        correlation_id = %correlation_id,
                        "failed to encode correlation identifier header"
                    );
                }
            }
            Ok(res)
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, web, App, HttpResponse};

    #[tokio::test]
    async fn current_reflects_scope() {
        let expected = CorrelationId::new("test-correlation-123");
        let observed =
            CorrelationId::scope(expected.clone(), async move { CorrelationId::current() }).await;
        assert_eq!(observed, Some(expected));
    }

    #[tokio::test]
    async fn current_is_none_out_of_scope() {
        assert!(CorrelationId::current().is_none());
    }

    #[actix_web::test]
    async fn generates_an_identifier_when_the_header_is_absent() {
        let app = test::init_service(
            App::new()
                .wrap(Correlation)
                .route("/", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;
        let req = test::TestRequest::get().uri("/").to_request();
        let res = test::call_service(&app, req).await;

        let header = res
            .headers()
            .get(CORRELATION_ID_HEADER)
            .expect("correlation id header")
            .to_str()
            .expect("header is ascii");
        Uuid::parse_str(header).expect("generated identifier is a UUID");
    }

    #[actix_web::test]
    async fn echoes_the_caller_supplied_identifier_unchanged() {
        let app = test::init_service(App::new().wrap(Correlation).route(
            "/",
            web::get().to(|| async {
                let id = CorrelationId::current().expect("id in scope");
                HttpResponse::Ok().body(id.to_string())
            }),
        ))
        .await;
        let req = test::TestRequest::get()
            .uri("/")
            .insert_header((CORRELATION_ID_HEADER, "caller-supplied-id"))
            .to_request();
        let res = test::call_service(&app, req).await;

        let header = res
            .headers()
            .get(CORRELATION_ID_HEADER)
            .expect("correlation id header")
            .to_str()
            .expect("header is ascii")
            .to_owned();
        assert_eq!(header, "caller-supplied-id");

        let body = test::read_body(res).await;
        assert_eq!(std::str::from_utf8(&body).expect("utf8 body"), "caller-supplied-id");
    }

    #[actix_web::test]
    async fn blank_header_values_are_replaced() {
        let app = test::init_service(
            App::new()
                .wrap(Correlation)
                .route("/", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;
        let req = test::TestRequest::get()
            .uri("/")
            .insert_header((CORRELATION_ID_HEADER, "   "))
            .to_request();
        let res = test::call_service(&app, req).await;

        let header = res
            .headers()
            .get(CORRELATION_ID_HEADER)
            .expect("correlation id header")
            .to_str()
            .expect("header is ascii");
        Uuid::parse_str(header).expect("blank values fall back to a generated UUID");
    }
}
