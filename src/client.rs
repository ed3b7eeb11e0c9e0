use crate::controller::Api;
use crate::errors::ClientError;
use crate::models::StateSnapshot;
use reqwest::{header, Client, Response};
use serde::de::DeserializeOwned;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// [`Api`] over HTTP JSON.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.base_url)
    }
}

impl Api for HttpApi {
    async fn fetch_state(&self) -> Result<StateSnapshot, ClientError> {
        let url = self.url("/api/state");
        let response = self
            .client
            .get(&url)
            .header(header::CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|source| ClientError::Http {
                url: url.clone(),
                source,
            })?;
        read_json(url, response).await
    }

    async fn post_json(
        &self,
        endpoint: &str,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, ClientError> {
        let url = self.url(endpoint);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|source| ClientError::Http {
                url: url.clone(),
                source,
            })?;
        read_json(url, response).await
    }
}

async fn read_json<T: DeserializeOwned>(url: String, response: Response) -> Result<T, ClientError> {
    let status = response.status();
    let bytes = response.bytes().await.map_err(|source| ClientError::Http {
        url: url.clone(),
        source,
    })?;

    if !status.is_success() {
        return Err(ClientError::Status {
            url,
            status: status.as_u16(),
            message: error_message(&bytes),
        });
    }

    serde_json::from_slice(&bytes).map_err(|err| ClientError::Decode {
        url,
        message: err.to_string(),
    })
}

/// Prefers the server's `{"error": ...}` body over the raw text.
fn error_message(body: &[u8]) -> String {
    serde_json::from_slice::<crate::models::ErrorResponse>(body)
        .map(|parsed| parsed.error)
        .unwrap_or_else(|_| String::from_utf8_lossy(body).trim().to_string())
}
