//! Informational endpoints: build info, runtime version, contact details.
//!
//! The build-info and java-version lookups are guarded by the resilience
//! policies; when a policy gives up the handler answers with a static
//! fallback value instead of an error.

use std::time::Duration;

use actix_web::{get, web, HttpResponse};
use tracing::debug;

use crate::models::ContactInfoDto;
use crate::resilience::{RateLimiter, Retry};

/// Fallback build version returned when the retry policy is exhausted.
const FALLBACK_BUILD_VERSION: &str = "0.9";

/// Fallback runtime description returned on rate-limit rejection.
const FALLBACK_JAVA_VERSION: &str = "Java 17";

/// Shared state for the informational endpoints.
pub struct InfoState {
    /// Build version reported by `/api/build-info`.
    pub build_version: Option<String>,
    /// `JAVA_HOME` value captured at startup.
    pub java_home: Option<String>,
    /// Static contact information.
    pub contact: ContactInfoDto,
    /// Retry policy guarding the build-info lookup.
    pub retry: Retry,
    /// Rate limiter guarding the java-version lookup.
    pub limiter: RateLimiter,
}

impl InfoState {
    /// Build the state with the default policies: three retry attempts and
    /// one java-version call per five seconds.
    pub fn new(
        build_version: Option<String>,
        java_home: Option<String>,
        contact: ContactInfoDto,
    ) -> Self {
        Self {
            build_version,
            java_home,
            contact,
            retry: Retry::new(3),
            limiter: RateLimiter::new(1, Duration::from_secs(5)),
        }
    }
}

/// Report the build version.
#[utoipa::path(
    get,
    path = "/api/build-info",
    responses(
        (status = 200, description = "Build version, or the static fallback on retry exhaustion", body = String)
    ),
    tags = ["info"],
    operation_id = "getBuildInfo"
)]
#[get("/build-info")]
pub async fn build_info(state: web::Data<InfoState>) -> HttpResponse {
    debug!("build info requested");
    let version = state
        .retry
        .run(|| async { state.build_version.clone().ok_or(()) })
        .await
        .unwrap_or_else(|()| FALLBACK_BUILD_VERSION.to_owned());
    HttpResponse::Ok().body(version)
}

/// Report the runtime the deployment targets.
#[utoipa::path(
    get,
    path = "/api/java-version",
    responses(
        (status = 200, description = "Runtime description, or the static fallback on rate-limit rejection", body = String)
    ),
    tags = ["info"],
    operation_id = "getJavaVersion"
)]
#[get("/java-version")]
pub async fn java_version(state: web::Data<InfoState>) -> HttpResponse {
    if !state.limiter.try_acquire() {
        return HttpResponse::Ok().body(FALLBACK_JAVA_VERSION);
    }
    let version = state
        .java_home
        .clone()
        .unwrap_or_else(|| FALLBACK_JAVA_VERSION.to_owned());
    HttpResponse::Ok().body(version)
}

/// Report the service's contact information.
#[utoipa::path(
    get,
    path = "/api/contact-info",
    responses(
        (status = 200, description = "Contact information", body = ContactInfoDto)
    ),
    tags = ["info"],
    operation_id = "getContactInfo"
)]
#[get("/contact-info")]
pub async fn contact_info(state: web::Data<InfoState>) -> HttpResponse {
    HttpResponse::Ok().json(state.contact.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ContactDetailsDto;
    use actix_web::{http::StatusCode, test, App};

    fn contact() -> ContactInfoDto {
        ContactInfoDto {
            message: "Welcome to the accounts microservice".into(),
            contact_details: ContactDetailsDto {
                name: "Aria Byrne".into(),
                email: "aria@example.com".into(),
            },
            on_call_support: vec!["(555) 123-4567".into()],
        }
    }

    macro_rules! body_string {
        ($app:expr, $uri:expr) => {{
            let req = test::TestRequest::get().uri($uri).to_request();
            let res = test::call_service($app, req).await;
            assert_eq!(res.status(), StatusCode::OK);
            let bytes = test::read_body(res).await;
            String::from_utf8(bytes.to_vec()).expect("utf8 body")
        }};
    }

    macro_rules! init_app {
        ($state:expr) => {
            test::init_service(
                App::new().app_data(web::Data::new($state)).service(
                    web::scope("/api")
                        .service(build_info)
                        .service(java_version)
                        .service(contact_info),
                ),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn build_info_reports_the_configured_version() {
        let state = InfoState::new(Some("3.2.1".into()), None, contact());
        let app = init_app!(state);

        assert_eq!(body_string!(&app, "/api/build-info"), "3.2.1");
    }

    #[actix_web::test]
    async fn build_info_falls_back_when_retries_are_exhausted() {
        let state = InfoState {
            build_version: None,
            java_home: None,
            contact: contact(),
            retry: Retry::new(2).with_base_delay(Duration::from_millis(1)),
            limiter: RateLimiter::new(1, Duration::from_secs(5)),
        };
        let app = init_app!(state);

        assert_eq!(body_string!(&app, "/api/build-info"), "0.9");
    }

    #[actix_web::test]
    async fn java_version_reports_the_captured_value() {
        let state = InfoState::new(None, Some("/opt/java/openjdk".into()), contact());
        let app = init_app!(state);

        assert_eq!(body_string!(&app, "/api/java-version"), "/opt/java/openjdk");
    }

    #[actix_web::test]
    async fn java_version_falls_back_on_rate_limit_rejection() {
        let state = InfoState {
            build_version: None,
            java_home: Some("/opt/java/openjdk".into()),
            contact: contact(),
            retry: Retry::new(3),
            limiter: RateLimiter::new(1, Duration::from_secs(60)),
        };
        let app = init_app!(state);

        assert_eq!(body_string!(&app, "/api/java-version"), "/opt/java/openjdk");
        assert_eq!(body_string!(&app, "/api/java-version"), "Java 17");
    }

    #[actix_web::test]
    async fn contact_info_reports_the_configured_object() {
        let state = InfoState::new(None, None, contact());
        let app = init_app!(state);

        let req = test::TestRequest::get().uri("/api/contact-info").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);

        let body: ContactInfoDto = test::read_body_json(res).await;
        assert_eq!(body.contact_details.name, "Aria Byrne");
    }
}
