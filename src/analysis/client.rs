//! Scoring service client

use crate::analysis::request::AnalysisRequest;
use crate::analysis::response::AnalysisResponse;
use crate::config::ServiceConfig;
use crate::error::{AtsMatchError, Result};
use async_trait::async_trait;
use log::{debug, error, info};

#[async_trait]
pub trait ScoringClient: Send + Sync {
    async fn analyze(&self, request: &AnalysisRequest<'_>) -> Result<AnalysisResponse>;

    async fn supported_industries(&self) -> Result<Vec<String>>;
}

/// Talks to the scoring service over HTTP. No timeout and no retry: a
/// request settles when the transport settles.
pub struct HttpScoringClient {
    client: reqwest::Client,
    analysis_url: String,
    industries_url: String,
}

impl HttpScoringClient {
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| AtsMatchError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        let base_url = config.base_url.trim_end_matches('/');
        Ok(Self {
            client,
            analysis_url: format!("{}{}", base_url, config.analysis_path),
            industries_url: format!("{}{}", base_url, config.industries_path),
        })
    }

    pub fn analysis_url(&self) -> &str {
        &self.analysis_url
    }

    async fn read_json<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("Scoring service error response {}: {}", status, message);
            return Err(AtsMatchError::Server {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        debug!("Scoring service response: {}", body);

        serde_json::from_str(&body).map_err(|e| AtsMatchError::Server {
            status: status.as_u16(),
            message: format!("Malformed response body: {}", e),
        })
    }
}

#[async_trait]
impl ScoringClient for HttpScoringClient {
    async fn analyze(&self, request: &AnalysisRequest<'_>) -> Result<AnalysisResponse> {
        let form = request.to_form()?;
        info!("Calling scoring service: {}", self.analysis_url);

        let response = self
            .client
            .post(&self.analysis_url)
            .multipart(form)
            .send()
            .await?;

        debug!("Response status: {}", response.status());
        Self::read_json(response).await
    }

    async fn supported_industries(&self) -> Result<Vec<String>> {
        info!("Fetching supported industries: {}", self.industries_url);

        let response = self.client.get(&self.industries_url).send().await?;
        Self::read_json(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_join_without_double_slash() {
        let config = ServiceConfig {
            base_url: "http://localhost:8080/".to_string(),
            analysis_path: "/api/analysis".to_string(),
            industries_path: "/api/analysis/industries".to_string(),
        };

        let client = HttpScoringClient::new(&config).unwrap();
        assert_eq!(client.analysis_url(), "http://localhost:8080/api/analysis");
        assert_eq!(client.industries_url, "http://localhost:8080/api/analysis/industries");
    }
}
