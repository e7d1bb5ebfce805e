//! Single-submission engine for the classification service.

mod service;

pub use service::{ServiceClient, SubmitError};

use crate::model::{Prediction, ServiceConfig, SubmitRequest};

pub struct PredictEngine {
    client: ServiceClient,
}

impl PredictEngine {
    pub fn new(cfg: &ServiceConfig) -> Result<Self, SubmitError> {
        Ok(Self {
            client: ServiceClient::new(cfg)?,
        })
    }

    /// Issue exactly one request for the given submission; no retries.
    pub async fn run(&self, request: &SubmitRequest) -> Result<Prediction, SubmitError> {
        match request {
            SubmitRequest::Handle(username) => self.client.predict_by_username(username).await,
            SubmitRequest::Features(features) => self.client.predict_by_features(features).await,
        }
    }
}
