use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{ConvertError, FailureKind};

pub const DEFAULT_ENDPOINT: &str = "https://haml2erb.org/api/convert";

/// Substring the service embeds in the `erb` payload when template processing
/// failed despite the success envelope. Heuristic: a legitimate template
/// containing this word would be misclassified.
const EMBEDDED_FAILURE_MARKER: &str = "unexpected";

#[derive(Debug, Clone)]
pub struct ConvertSettings {
    pub endpoint: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ConvertSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Serialize)]
struct ConvertRequest<'a> {
    haml: &'a str,
}

#[derive(Debug, Deserialize)]
struct ConvertResponse {
    #[serde(default)]
    erb: String,
    #[serde(default)]
    error: String,
    #[serde(default)]
    success: bool,
}

/// Capability seam for the transformation service, so the pipeline can run
/// against a scripted implementation in tests.
#[async_trait::async_trait]
pub trait Converter: Send + Sync {
    async fn convert(&self, haml: &str) -> Result<String, ConvertError>;
}

/// HTTP client for the haml2erb.org conversion API.
#[derive(Debug, Clone)]
pub struct Haml2ErbConverter {
    client: reqwest::Client,
    settings: ConvertSettings,
}

impl Haml2ErbConverter {
    pub fn new(settings: ConvertSettings) -> Result<Self, ConvertError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ConvertError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { client, settings })
    }
}

#[async_trait::async_trait]
impl Converter for Haml2ErbConverter {
    async fn convert(&self, haml: &str) -> Result<String, ConvertError> {
        let response = self
            .client
            .post(&self.settings.endpoint)
            .json(&ConvertRequest { haml })
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ConvertError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let data: ConvertResponse = response.json().await.map_err(|err| {
            if err.is_decode() {
                ConvertError::new(FailureKind::MalformedResponse, err.to_string())
            } else {
                map_reqwest_error(err)
            }
        })?;

        if !data.success {
            return Err(ConvertError::new(FailureKind::Unprocessable, data.error));
        }
        if data.erb.contains(EMBEDDED_FAILURE_MARKER) {
            return Err(ConvertError::new(FailureKind::Unprocessable, data.erb));
        }
        Ok(data.erb)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ConvertError {
    if err.is_timeout() {
        return ConvertError::new(FailureKind::Timeout, err.to_string());
    }
    ConvertError::new(FailureKind::Network, err.to_string())
}
