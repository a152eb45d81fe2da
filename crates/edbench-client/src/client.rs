//! HTTP client for the evaluation service.

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::error::{ClientError, ClientResult};
use crate::system::System;
use edbench_types::{DatasetInfo, SystemResponse};

/// Client for the EDB evaluation service.
///
/// Holds one persistent HTTP session. When an API key is supplied, the
/// bearer authorization and JSON content-type headers are fixed on the
/// session at construction and sent with every request. The key is never
/// rotated; reconfiguration means constructing a new client.
#[derive(Debug, Clone)]
pub struct EvalClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl EvalClient {
    /// Create an unauthenticated client. Dataset endpoints work without a
    /// key; evaluation endpoints will fail locally.
    pub fn new(api_url: impl Into<String>) -> ClientResult<Self> {
        Self::build(api_url.into(), None)
    }

    /// Create a client with an API key for the evaluation endpoints.
    pub fn with_api_key(api_url: impl Into<String>, api_key: impl Into<String>) -> ClientResult<Self> {
        Self::build(api_url.into(), Some(api_key.into()))
    }

    fn build(api_url: String, api_key: Option<String>) -> ClientResult<Self> {
        let mut headers = HeaderMap::new();
        if let Some(key) = &api_key {
            let bearer =
                HeaderValue::from_str(&format!("Bearer {key}")).map_err(|e| ClientError::Config {
                    message: format!("api key is not a valid header value: {e}"),
                })?;
            headers.insert(AUTHORIZATION, bearer);
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ClientError::Config {
                message: format!("failed to create HTTP client: {e}"),
            })?;

        // Normalize base URL (remove trailing slash)
        let base_url = api_url.trim_end_matches('/').to_string();

        Ok(Self {
            http,
            base_url,
            api_key,
        })
    }

    /// Get dataset metadata (version, dimensions, total cases).
    pub async fn dataset_info(&self) -> ClientResult<DatasetInfo> {
        let url = format!("{}/dataset/info", self.base_url);
        self.get_json(url).await
    }

    /// List all test case ids.
    pub async fn list_cases(&self) -> ClientResult<Vec<String>> {
        let url = format!("{}/dataset/cases", self.base_url);
        let body: Value = self.get_json(url).await?;

        let cases = body.get("cases").ok_or_else(|| ClientError::InvalidResponse {
            message: "missing 'cases' field in dataset listing".to_string(),
        })?;

        serde_json::from_value(cases.clone()).map_err(|e| ClientError::InvalidResponse {
            message: format!("malformed 'cases' field: {e}"),
        })
    }

    /// Fetch a single test case: input context and query. The service
    /// withholds the scoring criteria.
    pub async fn get_case(&self, case_id: &str) -> ClientResult<Value> {
        let url = format!("{}/dataset/case/{}", self.base_url, case_id);
        self.get_json(url).await
    }

    /// Submit one response for evaluation. Returns the scored result with
    /// overall score, pass flag, and per-dimension scores.
    pub async fn evaluate_case(
        &self,
        case_id: &str,
        response: &SystemResponse,
    ) -> ClientResult<Value> {
        self.require_api_key()?;

        let url = format!("{}/evaluate/case", self.base_url);
        let payload = json!({
            "case_id": case_id,
            "system_response": response.to_payload(),
        });

        self.post_json(url, &payload).await
    }

    /// Submit responses for multiple cases in one batch, preserving the
    /// caller-supplied ordering. Returns the aggregated result.
    pub async fn evaluate_batch(
        &self,
        system_name: &str,
        responses: &[(String, SystemResponse)],
    ) -> ClientResult<Value> {
        self.require_api_key()?;

        let url = format!("{}/evaluate/batch", self.base_url);
        let entries: Vec<Value> = responses
            .iter()
            .map(|(case_id, response)| {
                json!({
                    "case_id": case_id,
                    "system_response": response.to_payload(),
                })
            })
            .collect();
        let payload = json!({
            "system_name": system_name,
            "responses": entries,
        });

        self.post_json(url, &payload).await
    }

    /// Run a system over every test case and submit the batch.
    ///
    /// Lists the cases once, then fetches each case in the listed order and
    /// hands it to the system. The collected responses go to the batch
    /// endpoint in one call. The first failure anywhere aborts the run;
    /// nothing already scored is submitted.
    pub async fn evaluate_all(
        &self,
        system_name: &str,
        system: Arc<dyn System>,
    ) -> ClientResult<Value> {
        let case_ids = self.list_cases().await?;

        let mut responses = Vec::with_capacity(case_ids.len());
        for case_id in case_ids {
            let case = self.get_case(&case_id).await?;
            let response = system.respond(&case).await?;
            responses.push((case_id, response));
        }

        self.evaluate_batch(system_name, &responses).await
    }

    /// Base URL after normalization.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether an API key was supplied at construction.
    pub fn is_authenticated(&self) -> bool {
        matches!(&self.api_key, Some(key) if !key.is_empty())
    }

    fn require_api_key(&self) -> ClientResult<()> {
        if self.is_authenticated() {
            Ok(())
        } else {
            Err(ClientError::MissingApiKey)
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> ClientResult<T> {
        let response = self.http.get(&url).send().await?;
        Self::decode(url, response).await
    }

    async fn post_json<T: DeserializeOwned>(&self, url: String, payload: &Value) -> ClientResult<T> {
        let response = self.http.post(&url).json(payload).send().await?;
        Self::decode(url, response).await
    }

    async fn decode<T: DeserializeOwned>(
        url: String,
        response: reqwest::Response,
    ) -> ClientResult<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Http { status, url, body });
        }

        response.json().await.map_err(|e| ClientError::InvalidResponse {
            message: format!("failed to decode response from {url}: {e}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_stripped() {
        let client = EvalClient::new("https://bench.example.com/edb/v1/").unwrap();
        assert_eq!(client.base_url(), "https://bench.example.com/edb/v1");

        let client = EvalClient::new("https://bench.example.com/edb/v1").unwrap();
        assert_eq!(client.base_url(), "https://bench.example.com/edb/v1");
    }

    #[test]
    fn authenticated_only_with_nonempty_key() {
        let anonymous = EvalClient::new("http://localhost:8080").unwrap();
        assert!(!anonymous.is_authenticated());

        let keyed = EvalClient::with_api_key("http://localhost:8080", "secret").unwrap();
        assert!(keyed.is_authenticated());

        let empty = EvalClient::with_api_key("http://localhost:8080", "").unwrap();
        assert!(!empty.is_authenticated());
    }
}
