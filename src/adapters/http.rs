use crate::domain::model::{FormPayload, SubmitMethod};
use crate::domain::ports::Transport;
use crate::utils::error::{FormError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>, timeout_seconds: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, method: SubmitMethod, payload: &FormPayload) -> Result<()> {
        let request = match method {
            SubmitMethod::Post => self.client.post(&self.endpoint),
            SubmitMethod::Put => self.client.put(&self.endpoint),
        };

        tracing::debug!("{} {}", method.as_str(), self.endpoint);
        let response = request.json(payload).send().await?;
        let status = response.status();
        tracing::debug!("Transport response status: {}", status);

        if status.is_success() {
            Ok(())
        } else {
            Err(FormError::TransportStatusError {
                status: status.as_u16(),
            })
        }
    }
}
