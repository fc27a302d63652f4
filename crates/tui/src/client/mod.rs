use std::time::Duration;

use api_types::{command::MutationCommand, snapshot::Snapshot};
use reqwest::{StatusCode, Url};

use crate::error::{AppError, Result};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("endpoint not configured")]
    MissingEndpoint,
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(StatusCode),
    #[error("invalid snapshot body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Receipt for a write.
///
/// The sheet script accepts every POST and applies it later, so an `Ack`
/// only says the request left this process. Whether the command took effect
/// is known only after the next snapshot read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ack;

#[derive(Debug, Clone)]
pub struct Client {
    endpoint: Option<Url>,
    http: reqwest::Client,
}

impl Client {
    pub fn new(endpoint: Option<&str>) -> Result<Self> {
        let endpoint = endpoint
            .map(|raw| {
                Url::parse(raw).map_err(|err| AppError::InvalidEndpoint {
                    url: raw.to_string(),
                    reason: err.to_string(),
                })
            })
            .transpose()?;
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { endpoint, http })
    }

    pub fn is_configured(&self) -> bool {
        self.endpoint.is_some()
    }

    /// Host shown in the info bar.
    pub fn endpoint_host(&self) -> Option<&str> {
        self.endpoint.as_ref().and_then(Url::host_str)
    }

    pub async fn read_snapshot(&self) -> std::result::Result<Snapshot, ClientError> {
        let endpoint = self.endpoint.clone().ok_or(ClientError::MissingEndpoint)?;
        tracing::debug!("reading snapshot from {endpoint}");

        let res = self.http.get(endpoint).send().await?;
        let status = res.status();
        if !status.is_success() {
            return Err(ClientError::Status(status));
        }

        let body = res.text().await?;
        let snapshot = serde_json::from_str::<Snapshot>(&body)?;
        tracing::info!(
            items = snapshot.stock.len(),
            transactions = snapshot.transactions.len(),
            dashboard = snapshot.dashboard.is_some(),
            "snapshot loaded"
        );
        Ok(snapshot)
    }

    /// Sends a mutation without looking at the response.
    pub async fn write(&self, command: &MutationCommand) -> std::result::Result<Ack, ClientError> {
        let endpoint = self.endpoint.clone().ok_or(ClientError::MissingEndpoint)?;
        tracing::debug!(action = ?command.action, barcode = %command.barcode, "sending command");

        let res = self.http.post(endpoint).json(command).send().await?;
        tracing::debug!(status = %res.status(), "command handed to remote");
        Ok(Ack)
    }
}
