use crate::error::ProberError;
use crate::normalize::normalize;
use async_trait::async_trait;
use linkcheck_core::{Prober, ValidationError, Verdict};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, trace};
use typed_builder::TypedBuilder;
use url::Url;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_USER_AGENT: &str = concat!("linkcheck/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_MAX_REDIRECTS: usize = 10;

/// Configures an [`HttpProber`].
#[derive(Debug, Clone, TypedBuilder)]
pub struct ProberSettings {
    /// Timeout applied to each individual HEAD or GET request.
    #[builder(default = DEFAULT_TIMEOUT)]
    pub timeout: Duration,
    #[builder(default = DEFAULT_USER_AGENT.to_string(), setter(into))]
    pub user_agent: String,
    #[builder(default = DEFAULT_MAX_REDIRECTS)]
    pub max_redirects: usize,
}

impl Default for ProberSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Probes links over HTTP with a HEAD request, falling back to GET when the
/// server answers 405 or 501.
///
/// Transport failures (refused connections, DNS, TLS, timeouts) are folded
/// into [`Verdict::NotAvailable`]; only invalid input is reported as an error.
/// The underlying client is shared, so cloning the prober is cheap.
#[derive(Debug, Clone)]
pub struct HttpProber {
    client: Client,
}

impl HttpProber {
    pub fn new(settings: ProberSettings) -> Result<Self, ProberError> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .user_agent(settings.user_agent)
            .redirect(reqwest::redirect::Policy::limited(settings.max_redirects))
            .build()?;
        Ok(Self { client })
    }

    /// Probes an already normalized URL.
    pub async fn probe(&self, url: &Url) -> Verdict {
        let status = match self.client.head(url.clone()).send().await {
            // the response (and its body) is dropped right here
            Ok(response) => response.status(),
            Err(err) => {
                debug!(url = %url, error = %err, "head request failed");
                return Verdict::NotAvailable;
            }
        };

        let status = if needs_get_fallback(status) {
            trace!(url = %url, status = status.as_u16(), "head not supported, retrying with get");
            match self.client.get(url.clone()).send().await {
                Ok(response) => response.status(),
                Err(err) => {
                    debug!(url = %url, error = %err, "get request failed");
                    return Verdict::NotAvailable;
                }
            }
        } else {
            status
        };

        let verdict = Verdict::from_status(status.as_u16());
        trace!(url = %url, status = status.as_u16(), verdict = %verdict, "probed link");
        verdict
    }
}

fn needs_get_fallback(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::METHOD_NOT_ALLOWED | StatusCode::NOT_IMPLEMENTED
    )
}

#[async_trait]
impl Prober for HttpProber {
    async fn check(&self, link: &str) -> Result<Verdict, ValidationError> {
        let url = normalize(link)?;
        Ok(self.probe(&url).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::State;
    use axum::http::StatusCode as AxumStatus;
    use axum::response::Redirect;
    use axum::routing::get;
    use axum::Router;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::net::TcpListener;

    #[derive(Clone, Default)]
    struct Hits {
        get: Arc<AtomicUsize>,
    }

    async fn counted_ok(State(hits): State<Hits>) -> AxumStatus {
        hits.get.fetch_add(1, Ordering::SeqCst);
        AxumStatus::OK
    }

    async fn start_test_server() -> (String, Hits) {
        let hits = Hits::default();
        let app = Router::new()
            .route("/ok", get(|| async { AxumStatus::OK }))
            .route("/missing", get(|| async { AxumStatus::NOT_FOUND }))
            .route(
                "/error",
                get(|| async { AxumStatus::INTERNAL_SERVER_ERROR }),
            )
            .route(
                "/no-head",
                get(counted_ok).head(|| async { AxumStatus::METHOD_NOT_ALLOWED }),
            )
            .route(
                "/head-not-implemented",
                get(|| async { AxumStatus::SERVICE_UNAVAILABLE })
                    .head(|| async { AxumStatus::NOT_IMPLEMENTED }),
            )
            .route(
                "/head-not-implemented-get-ok",
                get(|| async { AxumStatus::OK }).head(|| async { AxumStatus::NOT_IMPLEMENTED }),
            )
            .route(
                "/no-head-slow-get",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(2)).await;
                    AxumStatus::OK
                })
                .head(|| async { AxumStatus::METHOD_NOT_ALLOWED }),
            )
            .route("/moved", get(|| async { Redirect::temporary("/ok") }))
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(2)).await;
                    AxumStatus::OK
                }),
            )
            .with_state(hits.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{}", addr), hits)
    }

    fn prober() -> HttpProber {
        HttpProber::new(ProberSettings::default()).unwrap()
    }

    #[tokio::test]
    async fn success_is_available() {
        let (base, _) = start_test_server().await;
        let verdict = prober().check(&format!("{base}/ok")).await.unwrap();
        assert_eq!(verdict, Verdict::Available);
    }

    #[tokio::test]
    async fn client_and_server_errors_are_not_available() {
        let (base, _) = start_test_server().await;
        let prober = prober();

        assert_eq!(
            prober.check(&format!("{base}/missing")).await.unwrap(),
            Verdict::NotAvailable
        );
        assert_eq!(
            prober.check(&format!("{base}/error")).await.unwrap(),
            Verdict::NotAvailable
        );
    }

    #[tokio::test]
    async fn method_not_allowed_falls_back_to_get() {
        let (base, hits) = start_test_server().await;

        let verdict = prober().check(&format!("{base}/no-head")).await.unwrap();

        assert_eq!(verdict, Verdict::Available);
        assert_eq!(hits.get.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn fallback_get_status_decides() {
        let (base, _) = start_test_server().await;
        let verdict = prober()
            .check(&format!("{base}/head-not-implemented"))
            .await
            .unwrap();
        assert_eq!(verdict, Verdict::NotAvailable);
    }

    #[tokio::test]
    async fn not_implemented_head_falls_back_to_get() {
        let (base, _) = start_test_server().await;
        let verdict = prober()
            .check(&format!("{base}/head-not-implemented-get-ok"))
            .await
            .unwrap();
        assert_eq!(verdict, Verdict::Available);
    }

    #[tokio::test]
    async fn fallback_get_timeout_is_not_available() {
        let (base, _) = start_test_server().await;
        let prober = HttpProber::new(
            ProberSettings::builder()
                .timeout(Duration::from_millis(200))
                .build(),
        )
        .unwrap();

        let verdict = prober
            .check(&format!("{base}/no-head-slow-get"))
            .await
            .unwrap();
        assert_eq!(verdict, Verdict::NotAvailable);
    }

    #[tokio::test]
    async fn redirects_are_followed() {
        let (base, _) = start_test_server().await;
        let verdict = prober().check(&format!("{base}/moved")).await.unwrap();
        assert_eq!(verdict, Verdict::Available);
    }

    #[tokio::test]
    async fn refused_connection_is_not_available() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let verdict = prober().check(&format!("http://{addr}/")).await.unwrap();
        assert_eq!(verdict, Verdict::NotAvailable);
    }

    #[tokio::test]
    async fn timeout_is_not_available() {
        let (base, _) = start_test_server().await;
        let prober = HttpProber::new(
            ProberSettings::builder()
                .timeout(Duration::from_millis(200))
                .build(),
        )
        .unwrap();

        let verdict = prober.check(&format!("{base}/slow")).await.unwrap();
        assert_eq!(verdict, Verdict::NotAvailable);
    }

    #[tokio::test]
    async fn bare_host_is_probed_over_https() {
        // The test server only speaks plain http, so the https handshake fails.
        let (base, _) = start_test_server().await;
        let bare = base.trim_start_matches("http://");

        let verdict = prober().check(&format!("{bare}/ok")).await.unwrap();
        assert_eq!(verdict, Verdict::NotAvailable);
    }

    #[tokio::test]
    async fn invalid_input_is_an_error() {
        let prober = prober();

        assert_eq!(prober.check("  ").await, Err(ValidationError::EmptyUrl));
        assert!(matches!(
            prober.check("ftp://x.com").await,
            Err(ValidationError::UnsupportedScheme(_))
        ));
    }
}
