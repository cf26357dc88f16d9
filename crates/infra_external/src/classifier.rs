//! HTTP damage classifier
//!
//! Posts the raw photo to an object-detection inference service that
//! answers with bounding boxes:
//!
//! ```json
//! {"detections": [{"class_id": 0, "x1": 12.0, "y1": 40.5, "x2": 980.0, "y2": 700.0, "confidence": 0.91}]}
//! ```

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use core_kernel::{DomainPort, PortError};
use domain_claims::{DamageAssessment, DamageClassifier, Detection};

use crate::config::ClassifierConfig;
use crate::http::{build_client, check_status, decode_json, map_transport_error};

const SERVICE: &str = "damage-classifier";

#[derive(Debug, Deserialize)]
struct DetectionResponse {
    #[serde(default)]
    detections: Vec<Detection>,
}

/// `DamageClassifier` backed by a remote inference endpoint
#[derive(Debug, Clone)]
pub struct HttpDamageClassifier {
    client: Client,
    config: ClassifierConfig,
}

impl HttpDamageClassifier {
    pub fn new(config: ClassifierConfig) -> Result<Self, PortError> {
        if config.endpoint.trim().is_empty() {
            return Err(PortError::validation_field(
                "classifier endpoint is not configured",
                "classifier.endpoint",
            ));
        }
        Ok(Self {
            client: build_client(config.timeout_secs)?,
            config,
        })
    }
}

impl DomainPort for HttpDamageClassifier {}

#[async_trait]
impl DamageClassifier for HttpDamageClassifier {
    #[instrument(skip(self, photo), fields(photo_bytes = photo.len()))]
    async fn classify(&self, photo: &[u8]) -> Result<DamageAssessment, PortError> {
        let response = self
            .client
            .post(&self.config.endpoint)
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(photo.to_vec())
            .send()
            .await
            .map_err(|e| map_transport_error(SERVICE, self.config.timeout_secs, e))?;
        let response = check_status(SERVICE, response).await?;
        let body: DetectionResponse = decode_json(SERVICE, response).await?;

        debug!(detections = body.detections.len(), "Classifier responded");
        Ok(DamageAssessment::from_detections(&body.detections))
    }
}
