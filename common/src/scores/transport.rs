use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::header::{ACCEPT, CONTENT_TYPE};
use hyper::{Method, Request, Uri};
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::TokioExecutor;
use serde_json::Value;
use std::time::Duration;

use super::{ScoreRecord, ScoreTransport, SubmitError};

pub const SAVE_SCORE_PATH: &str = "/save_score";

/// Posts score records as JSON over plain HTTP.
#[derive(Clone)]
pub struct HttpScoreTransport {
    client: Client<HttpConnector, Full<Bytes>>,
    uri: Uri,
    timeout: Duration,
}

impl HttpScoreTransport {
    /// `base_url` is the server root, e.g. `http://127.0.0.1:5000`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, SubmitError> {
        let uri: Uri = format!("{}{}", base_url.trim_end_matches('/'), SAVE_SCORE_PATH)
            .parse()
            .map_err(|e: hyper::http::uri::InvalidUri| SubmitError::InvalidEndpoint(e.to_string()))?;
        if uri.scheme_str() != Some("http") || uri.host().is_none() {
            return Err(SubmitError::InvalidEndpoint(format!("{} is not an http:// URL", base_url)));
        }

        let mut connector = HttpConnector::new();
        connector.set_nodelay(true);
        connector.set_connect_timeout(Some(timeout));

        let client = Client::builder(TokioExecutor::new())
            .pool_idle_timeout(Duration::from_secs(90))
            .build(connector);

        Ok(Self { client, uri, timeout })
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }
}

impl ScoreTransport for HttpScoreTransport {
    async fn post_score(&self, record: &ScoreRecord) -> Result<Value, SubmitError> {
        let body = serde_json::to_vec(record).map_err(|e| SubmitError::InvalidBody(e.to_string()))?;
        let request = Request::builder()
            .method(Method::POST)
            .uri(self.uri.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(Full::new(Bytes::from(body)))
            .map_err(|e| SubmitError::Transport(e.to_string()))?;

        let response = tokio::time::timeout(self.timeout, self.client.request(request))
            .await
            .map_err(|_| SubmitError::Timeout)?
            .map_err(|e| SubmitError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SubmitError::Status(status.as_u16()));
        }

        let bytes = tokio::time::timeout(self.timeout, response.into_body().collect())
            .await
            .map_err(|_| SubmitError::Timeout)?
            .map_err(|e| SubmitError::Transport(e.to_string()))?
            .to_bytes();

        serde_json::from_slice(&bytes).map_err(|e| SubmitError::InvalidBody(e.to_string()))
    }
}
