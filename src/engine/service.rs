//! HTTP client for the classification service.

use crate::model::{ParsedFeatures, Prediction, ServiceConfig};
use serde::Serialize;
use thiserror::Error;

/// Failures from a single submission attempt.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The service answered with an error status. `detail` holds the
    /// structured body message when one was present.
    #[error("service returned status {status}")]
    Service { status: u16, detail: Option<String> },
    /// Connection, timeout, or body-decoding failure.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

pub struct ServiceClient {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Serialize)]
struct UsernamePayload<'a> {
    username: &'a str,
}

impl ServiceClient {
    pub fn new(cfg: &ServiceConfig) -> Result<Self, SubmitError> {
        let http = reqwest::Client::builder()
            .user_agent(cfg.user_agent.clone())
            .timeout(cfg.timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// `POST /predict/username` with a trimmed, non-empty handle.
    pub async fn predict_by_username(&self, username: &str) -> Result<Prediction, SubmitError> {
        self.post("/predict/username", &UsernamePayload { username })
            .await
    }

    /// `POST /predict/features` with the five profile statistics.
    pub async fn predict_by_features(
        &self,
        features: &ParsedFeatures,
    ) -> Result<Prediction, SubmitError> {
        self.post("/predict/features", features).await
    }

    async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Prediction, SubmitError> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self.http.post(&url).json(body).send().await?;
        let status = resp.status();
        if status.is_success() {
            Ok(resp.json::<Prediction>().await?)
        } else {
            let detail = resp.text().await.ok().and_then(|t| detail_from_body(&t));
            Err(SubmitError::Service {
                status: status.as_u16(),
                detail,
            })
        }
    }
}

/// Extract FastAPI's `{"detail": "..."}` message from an error body.
/// Non-JSON bodies and non-string details yield `None`.
fn detail_from_body(body: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()?
        .get("detail")?
        .as_str()
        .map(|s| s.to_string())
}
