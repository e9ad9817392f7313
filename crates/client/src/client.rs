//! Scoring HTTP client and the extract→score→write-back orchestration.
//!
//! Blocking reqwest client (no async runtime required). One outbound
//! call per scoring operation, bounded by a hard deadline; exceeding it
//! cancels the in-flight request and surfaces as `ScoreError::Timeout`,
//! distinct from other transport failures.

use std::time::Duration;

use riskgrid_grid::{
    risk, to_grid, to_records, GridSelector, GridTarget, Record, RiskLevel, TabularHost,
};

use crate::env::Environment;
use crate::error::ScoreError;
use crate::normalize::normalize_response;

/// Hard deadline for one scoring request.
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(120);

const USER_AGENT: &str = concat!("rgrid/", env!("CARGO_PKG_VERSION"));

/// Scoring API client (blocking).
pub struct ScoreClient {
    http: reqwest::blocking::Client,
    api_key: String,
    environment: Environment,
    proxy_url: Option<String>,
    endpoint_override: Option<String>,
}

/// What a completed scoring operation did.
#[derive(Debug)]
pub struct ScoreOutcome {
    /// Normalized scored records, in response order.
    pub records: Vec<Record>,
    /// Per-row classifications, (row index into the written grid, level).
    /// Empty when the response carried no risk-level attribute.
    pub fills: Vec<(usize, RiskLevel)>,
}

impl ScoreClient {
    pub fn new(
        api_key: impl Into<String>,
        environment: Environment,
        proxy_url: Option<String>,
    ) -> Result<Self, ScoreError> {
        Self::with_deadline(api_key, environment, proxy_url, DEFAULT_DEADLINE)
    }

    /// Client with an explicit deadline (tests use a short one).
    pub fn with_deadline(
        api_key: impl Into<String>,
        environment: Environment,
        proxy_url: Option<String>,
        deadline: Duration,
    ) -> Result<Self, ScoreError> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(deadline)
            .build()
            .map_err(|e| ScoreError::Network(e.to_string()))?;

        Ok(Self {
            http,
            api_key: api_key.into(),
            environment,
            proxy_url,
            endpoint_override: None,
        })
    }

    /// Point direct calls at an explicit URL instead of the environment's
    /// vendor host. Tests use this to stand in a local server.
    pub fn with_endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoint_override = Some(url.into());
        self
    }

    /// Send records to the scoring service and normalize the response.
    ///
    /// With a proxy configured the records go in the proxy envelope and
    /// the proxy resolves the real endpoint; otherwise the call goes
    /// directly to the environment's endpoint with the credential in the
    /// `X-API-KEY` header.
    pub fn score_records(&self, records: &[Record]) -> Result<Vec<Record>, ScoreError> {
        if self.api_key.trim().is_empty() {
            return Err(ScoreError::MissingApiKey);
        }
        if records.is_empty() {
            return Err(ScoreError::EmptyInput);
        }

        let request = match &self.proxy_url {
            Some(proxy) => self.http.post(proxy).json(&serde_json::json!({
                "environment": self.environment.selector(),
                "apiKey": self.api_key,
                "data": records,
            })),
            None => {
                let payload = serde_json::to_string(records)
                    .map_err(|e| ScoreError::Parse(e.to_string()))?;
                let endpoint = match &self.endpoint_override {
                    Some(url) => url.clone(),
                    None => self.environment.endpoint(),
                };
                self.http
                    .post(endpoint)
                    .header("X-API-KEY", &self.api_key)
                    .json(&serde_json::json!({
                        "userInput": payload,
                        "asyncOutput": false,
                    }))
            }
        };

        let response = request.send().map_err(|e| {
            if e.is_timeout() {
                ScoreError::Timeout(format!(
                    "scoring request exceeded its deadline: {}",
                    e
                ))
            } else {
                ScoreError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        let body = response.text().map_err(|e| {
            if e.is_timeout() {
                ScoreError::Timeout(format!(
                    "scoring request exceeded its deadline: {}",
                    e
                ))
            } else {
                ScoreError::Network(e.to_string())
            }
        })?;

        if !status.is_success() {
            let detail = if body.is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("no response body")
                    .to_string()
            } else {
                body
            };
            return Err(ScoreError::Http(status.as_u16(), detail));
        }

        normalize_response(&body)
    }

    /// Full pipeline: read the source grid through the host, convert to
    /// records, score, write the scored grid back, then apply per-row
    /// fills. Formatting is best-effort: a failure on one row is warned
    /// about and the rest still get their fill; formatting is skipped
    /// entirely when no scored record carries the risk-level attribute.
    pub fn score_and_write<H: TabularHost>(
        &self,
        host: &mut H,
        source: &GridSelector,
        target: &GridTarget,
    ) -> Result<ScoreOutcome, ScoreError> {
        let grid = host.read_grid(source).map_err(ScoreError::Host)?;
        let records = to_records(&grid);

        let scored = self.score_records(&records)?;

        let scored_grid = to_grid(&scored);
        host.write_grid(target, &scored_grid)
            .map_err(ScoreError::Host)?;

        let mut fills = Vec::new();
        if risk::has_risk_fields(&scored) {
            for (i, record) in scored.iter().enumerate() {
                let level = RiskLevel::classify(record);
                let row = i + 1; // row 0 of the written grid is the header
                match host.set_row_fill(row, level) {
                    Ok(()) => fills.push((row, level)),
                    Err(e) => {
                        eprintln!("warning: row {} formatting failed: {}", row, e);
                    }
                }
            }
        }

        Ok(ScoreOutcome {
            records: scored,
            fills,
        })
    }
}
