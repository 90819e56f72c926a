//! Cross-origin resource sharing for browser clients.

use std::sync::Arc;

use axum::http::{
    HeaderValue, Method,
    header::{AUTHORIZATION, CONTENT_TYPE},
    request,
};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// The origins of the web client's local development and preview servers and
/// its production deployment.
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 3] = [
    "http://localhost:5173",
    "http://localhost:4173",
    "https://fintech-sass.vercel.app",
];

/// Any origin ending with this suffix is allowed, which covers preview deployments.
pub const DEFAULT_ORIGIN_SUFFIX: &str = ".vercel.app";

/// Which origins may call the API from a browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsConfig {
    /// Origins that are allowed exactly, e.g. "http://localhost:5173".
    pub allowed_origins: Vec<String>,
    /// Origins ending with this suffix are allowed, e.g. ".vercel.app".
    pub origin_suffix: Option<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: DEFAULT_ALLOWED_ORIGINS
                .iter()
                .map(|origin| origin.to_string())
                .collect(),
            origin_suffix: Some(DEFAULT_ORIGIN_SUFFIX.to_owned()),
        }
    }
}

impl CorsConfig {
    /// Whether a browser at `origin` may call the API.
    pub fn is_allowed(&self, origin: &str) -> bool {
        self.allowed_origins
            .iter()
            .any(|allowed| allowed.as_str() == origin)
            || self
                .origin_suffix
                .as_deref()
                .is_some_and(|suffix| origin.ends_with(suffix))
    }

    /// Build the CORS layer for the router.
    ///
    /// Credentials are allowed, so the allowed origins, methods and headers
    /// are listed explicitly rather than using wildcards.
    pub fn layer(&self) -> CorsLayer {
        let config = Arc::new(self.clone());

        CorsLayer::new()
            .allow_origin(AllowOrigin::predicate(
                move |origin: &HeaderValue, _: &request::Parts| {
                    origin
                        .to_str()
                        .is_ok_and(|origin| config.is_allowed(origin))
                },
            ))
            .allow_credentials(true)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([CONTENT_TYPE, AUTHORIZATION])
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        Router,
        http::{
            HeaderValue, Method,
            header::{
                ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_ORIGIN,
                ACCESS_CONTROL_REQUEST_METHOD, ORIGIN,
            },
        },
        routing::get,
    };
    use axum_test::TestServer;

    use super::CorsConfig;

    fn get_test_server(config: CorsConfig) -> TestServer {
        let app = Router::new()
            .route("/", get(|| async { "API is running..." }))
            .layer(config.layer());

        TestServer::new(app).expect("Could not create test server.")
    }

    #[test]
    fn default_allows_local_and_hosted_clients() {
        let config = CorsConfig::default();

        assert!(config.is_allowed("http://localhost:5173"));
        assert!(config.is_allowed("http://localhost:4173"));
        assert!(config.is_allowed("https://fintech-sass.vercel.app"));
        assert!(!config.is_allowed("https://evil.example.com"));
        assert!(!config.is_allowed("http://localhost:3000"));
    }

    #[test]
    fn suffix_can_be_disabled() {
        let config = CorsConfig {
            allowed_origins: vec!["https://app.example.com".to_owned()],
            origin_suffix: None,
        };

        assert!(config.is_allowed("https://app.example.com"));
        assert!(!config.is_allowed("https://preview.vercel.app"));
    }

    #[tokio::test]
    async fn allowed_origin_gets_cors_headers() {
        let server = get_test_server(CorsConfig::default());

        let response = server
            .get("/")
            .add_header(ORIGIN, HeaderValue::from_static("http://localhost:5173"))
            .await;

        response.assert_status_ok();
        let headers = response.headers();
        assert_eq!(
            headers.get(ACCESS_CONTROL_ALLOW_ORIGIN),
            Some(&HeaderValue::from_static("http://localhost:5173"))
        );
        assert_eq!(
            headers.get(ACCESS_CONTROL_ALLOW_CREDENTIALS),
            Some(&HeaderValue::from_static("true"))
        );
    }

    #[tokio::test]
    async fn disallowed_origin_gets_no_cors_headers() {
        let server = get_test_server(CorsConfig::default());

        let response = server
            .get("/")
            .add_header(ORIGIN, HeaderValue::from_static("https://evil.example.com"))
            .await;

        assert!(response.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    }

    #[tokio::test]
    async fn preflight_succeeds_for_allowed_origin() {
        let server = get_test_server(CorsConfig::default());

        let response = server
            .method(Method::OPTIONS, "/")
            .add_header(ORIGIN, HeaderValue::from_static("https://preview.vercel.app"))
            .add_header(ACCESS_CONTROL_REQUEST_METHOD, HeaderValue::from_static("POST"))
            .await;

        response.assert_status_ok();
        assert_eq!(
            response.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN),
            Some(&HeaderValue::from_static("https://preview.vercel.app"))
        );
    }
}
