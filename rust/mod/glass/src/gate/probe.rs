use std::time::Duration;

use reqwest::Url;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::GlassError;

/// What a single access check concluded.
#[derive(Debug, Clone, PartialEq)]
pub enum ProbeOutcome {
    /// Show the remote destination. `payload` is the checker's full reply.
    Approved { payload: Value, destination: String },
    UseNative,
}

/// Pluggable launch-time access check.
///
/// Implementations must not fail: anything that goes wrong is `UseNative`.
#[async_trait::async_trait]
pub trait AccessProbe: Send + Sync + 'static {
    async fn check(&self) -> ProbeOutcome;
}

/// No remote checker configured: always native.
pub struct NativeOnly;

#[async_trait::async_trait]
impl AccessProbe for NativeOnly {
    async fn check(&self) -> ProbeOutcome {
        ProbeOutcome::UseNative
    }
}

/// One GET to a remote checker.
///
/// A 2xx reply whose JSON body carries a non-empty, parseable `url` string
/// approves that URL. Transport errors, other statuses and other bodies all
/// fall back to native.
pub struct HttpProbe {
    http: reqwest::Client,
    endpoint: Url,
}

impl HttpProbe {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, GlassError> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| GlassError::Probe(format!("invalid endpoint '{}': {}", endpoint, e)))?;
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GlassError::Probe(format!("http client: {}", e)))?;
        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Decide from a successful response body.
    pub fn outcome_from_body(body: &[u8]) -> ProbeOutcome {
        let payload: Value = match serde_json::from_slice(body) {
            Ok(v) => v,
            Err(e) => {
                warn!("HttpProbe: reply is not JSON: {}", e);
                return ProbeOutcome::UseNative;
            }
        };
        let destination = payload
            .get("url")
            .and_then(Value::as_str)
            .filter(|url| !url.is_empty() && Url::parse(url).is_ok())
            .map(str::to_string);
        match destination {
            Some(destination) => ProbeOutcome::Approved {
                payload,
                destination,
            },
            None => {
                debug!("HttpProbe: reply carries no usable url");
                ProbeOutcome::UseNative
            }
        }
    }
}

#[async_trait::async_trait]
impl AccessProbe for HttpProbe {
    async fn check(&self) -> ProbeOutcome {
        let resp = match self.http.get(self.endpoint.clone()).send().await {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HttpProbe: request to {} failed: {}", self.endpoint, e);
                return ProbeOutcome::UseNative;
            }
        };
        if !resp.status().is_success() {
            warn!("HttpProbe: {} answered {}", self.endpoint, resp.status());
            return ProbeOutcome::UseNative;
        }
        match resp.bytes().await {
            Ok(body) => Self::outcome_from_body(&body),
            Err(e) => {
                warn!("HttpProbe: reading reply failed: {}", e);
                ProbeOutcome::UseNative
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::http::StatusCode;
    use axum::routing::get;

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn probe(url: &str) -> HttpProbe {
        HttpProbe::new(url, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn body_with_url_approves() {
        let outcome = HttpProbe::outcome_from_body(br#"{"url":"https://portal.example/app","ttl":60}"#);
        match outcome {
            ProbeOutcome::Approved {
                payload,
                destination,
            } => {
                assert_eq!(destination, "https://portal.example/app");
                assert_eq!(payload["ttl"], 60);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn unusable_bodies_fall_back() {
        let bodies: [&[u8]; 5] = [
            b"not json",
            br#"{"url":""}"#,
            br#"{"url":"not a url"}"#,
            br#"{"url":42}"#,
            br#"{}"#,
        ];
        for body in bodies {
            assert_eq!(HttpProbe::outcome_from_body(body), ProbeOutcome::UseNative);
        }
    }

    #[test]
    fn bad_endpoint_is_rejected() {
        assert!(matches!(
            HttpProbe::new("::nope", Duration::from_secs(1)),
            Err(GlassError::Probe(_))
        ));
    }

    #[tokio::test]
    async fn approved_over_http() {
        let app = Router::new().route(
            "/gate",
            get(|| async { r#"{"url":"https://portal.example/start"}"# }),
        );
        let base = serve(app).await;

        let outcome = probe(&format!("{}/gate", base)).check().await;
        assert!(matches!(
            outcome,
            ProbeOutcome::Approved { ref destination, .. } if destination == "https://portal.example/start"
        ));
    }

    #[tokio::test]
    async fn error_status_uses_native() {
        let app = Router::new().route(
            "/gate",
            get(|| async {
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    r#"{"url":"https://portal.example/start"}"#,
                )
            }),
        );
        let base = serve(app).await;

        assert_eq!(
            probe(&format!("{}/gate", base)).check().await,
            ProbeOutcome::UseNative
        );
    }

    #[tokio::test]
    async fn unreachable_endpoint_uses_native() {
        // Bind then drop to get a port nothing listens on.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        assert_eq!(
            probe(&format!("http://{}/gate", addr)).check().await,
            ProbeOutcome::UseNative
        );
    }

    #[tokio::test]
    async fn native_only_never_approves() {
        assert_eq!(NativeOnly.check().await, ProbeOutcome::UseNative);
    }
}
