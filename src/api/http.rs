use reqwest::StatusCode;
use serde::Deserialize;

use super::{
    ApiClient, CombinationSet, ExportFormat, InteractionList, InteractionMatrix, PatientInput,
};
use crate::config::Config;
use crate::error::{AppError, AppResult};

pub struct HttpApiClient {
    client: reqwest::Client,
    base_url: String,
}

/// Structured error body produced by the backend for non-2xx responses.
#[derive(Deserialize)]
struct ErrorBody {
    detail: String,
}

impl HttpApiClient {
    pub fn new(config: &Config) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AppError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> AppResult<T>
    where
        B: serde::Serialize + ?Sized,
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::Transport(transport_detail(&e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(AppError::Transport(error_detail(status, &error_body)));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| AppError::Transport(format!("invalid response from {path}: {e}")))
    }
}

fn error_detail(status: StatusCode, body: &str) -> String {
    if let Ok(err) = serde_json::from_str::<ErrorBody>(body) {
        return err.detail;
    }
    if body.trim().is_empty() {
        format!("request failed with status {status}")
    } else {
        format!("request failed with status {status}: {body}")
    }
}

fn transport_detail(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        "request timed out".to_string()
    } else if err.is_connect() {
        "could not connect to the MediCombine API".to_string()
    } else {
        format!("transport error: {err}")
    }
}

#[async_trait::async_trait]
impl ApiClient for HttpApiClient {
    async fn generate(&self, patient: &PatientInput) -> AppResult<CombinationSet> {
        self.post_json("/api/generate", patient).await
    }

    async fn interaction_matrix(&self, drugs: &[String]) -> AppResult<InteractionMatrix> {
        self.post_json("/api/interaction-matrix", drugs).await
    }

    async fn check_interactions(&self, drugs: &[String]) -> AppResult<InteractionList> {
        self.post_json("/api/interactions", drugs).await
    }

    async fn export(&self, format: ExportFormat, combinations: &CombinationSet) -> AppResult<()> {
        let path = match format {
            ExportFormat::Csv => "/api/export-csv",
            ExportFormat::Pdf => "/api/export-pdf",
        };
        // Response body is an opaque success signal.
        let _: serde_json::Value = self.post_json(path, combinations).await?;
        Ok(())
    }
}
