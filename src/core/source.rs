//! The data source seam: where the professional list comes from.

use super::error::FetchError;
use super::normalize::normalize_professionals;
use super::registry::ProfessionType;
use super::{FetchFilters, Professional};
use crate::config::AppConfig;
use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// Anything that can produce a professional list for a set of filters.
#[async_trait]
pub trait ProfessionalSource: Send + Sync + 'static {
    async fn fetch_professionals(
        &self,
        filters: &FetchFilters,
    ) -> Result<Vec<Professional>, FetchError>;
}

/// The `{ success, data, message? }` envelope every listing endpoint returns.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    success: bool,
    #[serde(default)]
    data: Value,
    #[serde(default)]
    message: Option<String>,
}

impl ApiResponse {
    /// `data` is usually the array itself; paginated endpoints nest it one level.
    fn records(&self) -> &[Value] {
        match &self.data {
            Value::Array(items) => items,
            Value::Object(obj) => ["items", "products", "data", "results"]
                .iter()
                .find_map(|k| obj.get(*k).and_then(Value::as_array))
                .map(Vec::as_slice)
                .unwrap_or(&[]),
            _ => &[],
        }
    }
}

/// Fetches `GET {base}/{domain}/{profession}/products` over HTTP.
pub struct HttpProfessionalSource {
    client: reqwest::Client,
    endpoint: Url,
    page_limit: u32,
}

impl HttpProfessionalSource {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        let endpoint = listing_url(&config.api_base_url, &config.api_domain, config.profession)?;
        tracing::info!("Professional source endpoint: {}", endpoint);
        Ok(Self {
            client,
            endpoint,
            page_limit: config.page_limit,
        })
    }

    /// `search` and `location` are only sent when non-empty.
    fn query_params(&self, filters: &FetchFilters) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(4);
        if !filters.search.trim().is_empty() {
            params.push(("search", filters.search.trim().to_string()));
        }
        if !filters.location.trim().is_empty() {
            params.push(("location", filters.location.trim().to_string()));
        }
        params.push(("limit", self.page_limit.to_string()));
        params.push(("page", "1".to_string()));
        params
    }
}

#[async_trait]
impl ProfessionalSource for HttpProfessionalSource {
    async fn fetch_professionals(
        &self,
        filters: &FetchFilters,
    ) -> Result<Vec<Professional>, FetchError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&self.query_params(filters))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        let parsed = serde_json::from_str::<ApiResponse>(&body);

        if !status.is_success() {
            let message = parsed
                .ok()
                .and_then(|r| r.message)
                .unwrap_or_else(|| format!("HTTP {status}"));
            return Err(FetchError::Server {
                status: Some(status.as_u16()),
                message,
            });
        }

        let envelope = parsed.map_err(|e| FetchError::Server {
            status: Some(status.as_u16()),
            message: format!("Malformed response: {e}"),
        })?;

        if !envelope.success {
            return Err(FetchError::Server {
                status: Some(status.as_u16()),
                message: envelope
                    .message
                    .unwrap_or_else(|| "Erreur serveur".to_string()),
            });
        }

        let professionals = normalize_professionals(envelope.records());
        tracing::debug!(
            "Fetched {} professionals (search='{}', location='{}')",
            professionals.len(),
            filters.search,
            filters.location
        );
        Ok(professionals)
    }
}

/// Appends `{domain}/{profession}/products` to the base URL.
pub fn listing_url(base: &str, domain: &str, profession: ProfessionType) -> Result<Url> {
    let mut url = Url::parse(base)?;
    url.path_segments_mut()
        .map_err(|_| anyhow::anyhow!("API base URL cannot be a base: {}", base))?
        .pop_if_empty()
        .extend(
            domain
                .split('/')
                .filter(|s| !s.is_empty())
                .chain([profession.path_segment(), "products"]),
        );
    Ok(url)
}
