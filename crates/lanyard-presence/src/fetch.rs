//! One-shot presence lookup over the Lanyard REST API.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use lanyard_common::PresenceError;

use crate::model::{LanyardPresence, PresenceRecord};

/// Source of point-in-time presence snapshots.
#[async_trait]
pub trait SnapshotFetcher: Send + Sync {
    async fn fetch(&self, user_id: &str) -> Result<PresenceRecord, PresenceError>;
}

/// `GET {api_base}/v1/users/{user_id}` with `reqwest`.
pub struct HttpFetcher {
    api_base: String,
    http: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(api_base: impl Into<String>, timeout: Duration) -> Result<Self, PresenceError> {
        let http = reqwest::Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()
            .map_err(|e| PresenceError::Network(format!("failed to build HTTP client: {e}")))?;
        Ok(Self::with_client(api_base, http))
    }

    /// Use a preconfigured HTTP client.
    pub fn with_client(api_base: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            api_base: api_base.into(),
            http,
        }
    }

    pub(crate) fn user_url(&self, user_id: &str) -> String {
        format!("{}/v1/users/{user_id}", self.api_base.trim_end_matches('/'))
    }
}

#[async_trait]
impl SnapshotFetcher for HttpFetcher {
    async fn fetch(&self, user_id: &str) -> Result<PresenceRecord, PresenceError> {
        let url = self.user_url(user_id);
        debug!(url = %url, "Fetching presence snapshot");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| PresenceError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PresenceError::Network(e.to_string()))?;

        parse_lookup_response(status, &body).inspect_err(|e| {
            warn!(user_id = %user_id, error = %e, "Presence lookup failed");
        })
    }
}

#[derive(Deserialize)]
struct LookupResponse {
    success: bool,
    #[serde(default)]
    data: Option<LanyardPresence>,
    #[serde(default)]
    error: Option<LookupError>,
}

#[derive(Deserialize)]
struct LookupError {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Interpret a lookup response body.
///
/// The service answers unknown users with a non-2xx status and a
/// `success: false` body, so the body wins over the status whenever it
/// decodes.
pub(crate) fn parse_lookup_response(
    status: reqwest::StatusCode,
    body: &str,
) -> Result<PresenceRecord, PresenceError> {
    let parsed: LookupResponse = match serde_json::from_str(body) {
        Ok(parsed) => parsed,
        Err(_) if !status.is_success() => {
            return Err(PresenceError::Network(format!("HTTP {status}")));
        }
        Err(e) => {
            let reason = format!("invalid response body: {e}");
            return Err(PresenceError::Network(reason));
        }
    };

    if !parsed.success {
        let reason = parsed
            .error
            .and_then(|e| e.message.or(e.code))
            .unwrap_or_else(|| "service reported failure".into());
        return Err(PresenceError::ServiceRejected(reason));
    }

    parsed
        .data
        .map(PresenceRecord::from)
        .ok_or_else(|| PresenceError::Network("response has no data".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::presence_json;
    use crate::model::Status;
    use reqwest::StatusCode;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    #[test]
    fn user_url_joins_base_and_id() {
        let fetcher =
            HttpFetcher::new("https://api.lanyard.rest/", Duration::from_secs(5)).unwrap();
        assert_eq!(
            fetcher.user_url("94490510688792576"),
            "https://api.lanyard.rest/v1/users/94490510688792576"
        );
    }

    #[test]
    fn success_body_yields_record() {
        let body = serde_json::json!({ "success": true, "data": presence_json("online") });
        let record = parse_lookup_response(StatusCode::OK, &body.to_string()).unwrap();
        assert_eq!(record.status, Status::Online);
        assert_eq!(record.activities.len(), 1);
        assert!(record.music.is_some());
    }

    #[test]
    fn success_false_is_service_rejected() {
        let body = r#"{"success":false,"error":{"code":"user_not_monitored","message":"User is not being monitored by Lanyard"}}"#;
        let err = parse_lookup_response(StatusCode::NOT_FOUND, body).unwrap_err();
        assert_eq!(
            err,
            PresenceError::ServiceRejected("User is not being monitored by Lanyard".into())
        );
    }

    #[test]
    fn success_false_without_detail() {
        let err = parse_lookup_response(StatusCode::OK, r#"{"success":false}"#).unwrap_err();
        assert!(matches!(err, PresenceError::ServiceRejected(_)));
    }

    #[test]
    fn non_json_error_status_is_network_error() {
        let err = parse_lookup_response(StatusCode::BAD_GATEWAY, "<html>502</html>").unwrap_err();
        assert_eq!(err, PresenceError::Network("HTTP 502 Bad Gateway".into()));
    }

    #[test]
    fn success_without_data_is_network_error() {
        let err = parse_lookup_response(StatusCode::OK, r#"{"success":true}"#).unwrap_err();
        assert!(matches!(err, PresenceError::Network(_)));
    }

    /// Serve a single canned HTTP response on a local port.
    async fn serve_once(status_line: &'static str, body: String) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn local_fetcher(base: String) -> HttpFetcher {
        let http = reqwest::Client::builder().no_proxy().build().unwrap();
        HttpFetcher::with_client(base, http)
    }

    #[tokio::test]
    async fn http_fetcher_reads_snapshot() {
        let body = serde_json::json!({ "success": true, "data": presence_json("dnd") }).to_string();
        let base = serve_once("200 OK", body).await;
        let fetcher = local_fetcher(base);

        let record = fetcher.fetch("94490510688792576").await.unwrap();
        assert_eq!(record.status, Status::DoNotDisturb);
    }

    #[tokio::test]
    async fn http_fetcher_surfaces_rejection() {
        let body = r#"{"success":false,"error":{"code":"user_not_monitored","message":"nope"}}"#;
        let base = serve_once("404 Not Found", body.to_string()).await;
        let fetcher = local_fetcher(base);

        let err = fetcher.fetch("1").await.unwrap_err();
        assert_eq!(err, PresenceError::ServiceRejected("nope".into()));
    }

    #[tokio::test]
    async fn http_fetcher_connection_refused_is_network_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let fetcher = local_fetcher(format!("http://{addr}"));

        let err = fetcher.fetch("1").await.unwrap_err();
        assert!(matches!(err, PresenceError::Network(_)));
    }
}
