//! Origin/destination ridership API client.

use futures::future::join_all;
use tracing::debug;

use super::error::RidershipError;
use super::query::RidershipQuery;
use super::types::{RidershipRow, parse_rows};

/// Default endpoint of the subway origin/destination ridership dataset.
pub const DEFAULT_BASE_URL: &str = "https://data.ny.gov/resource/y2qv-fytt.json";

/// Configuration for the ridership client.
#[derive(Debug, Clone)]
pub struct RidershipClientConfig {
    /// Application token for higher rate limits
    pub app_token: Option<String>,
    /// Dataset endpoint
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Queries sent concurrently by `fetch_many`
    pub batch_size: usize,
}

impl RidershipClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_app_token(mut self, token: impl Into<String>) -> Self {
        self.app_token = Some(token.into());
        self
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }
}

impl Default for RidershipClientConfig {
    fn default() -> Self {
        Self {
            app_token: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            batch_size: 4,
        }
    }
}

/// Client for the ridership dataset.
#[derive(Debug, Clone)]
pub struct RidershipClient {
    http: reqwest::Client,
    base_url: String,
    app_token: Option<String>,
    batch_size: usize,
}

impl RidershipClient {
    pub fn new(config: RidershipClientConfig) -> Result<Self, RidershipError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            app_token: config.app_token,
            batch_size: config.batch_size.max(1),
        })
    }

    /// Fetch every row matching `query`.
    pub async fn fetch(&self, query: &RidershipQuery) -> Result<Vec<RidershipRow>, RidershipError> {
        query.validate()?;
        let params = query.to_params(self.app_token.as_deref());

        debug!(
            url = %self.base_url,
            filter = ?query.where_clause(),
            "Fetching ridership rows"
        );

        let response = self.http.get(&self.base_url).query(&params).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(RidershipError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(RidershipError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RidershipError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        let rows = parse_rows(&body)?;

        debug!(rows = rows.len(), "Fetched ridership rows");
        Ok(rows)
    }

    /// Fetch several queries, `batch_size` at a time.
    ///
    /// Results are in query order; one failing query does not affect the others.
    pub async fn fetch_many(
        &self,
        queries: &[RidershipQuery],
    ) -> Vec<Result<Vec<RidershipRow>, RidershipError>> {
        let mut results = Vec::with_capacity(queries.len());

        for batch in queries.chunks(self.batch_size) {
            let futures: Vec<_> = batch.iter().map(|query| self.fetch(query)).collect();
            results.extend(join_all(futures).await);
        }

        results
    }
}
