use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::blocking::Client as HttpClient;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use std::time::{Duration, Instant};

use crate::config::load_config;
use crate::error::format_http_error;
use crate::payload::SearchRequest;
use crate::response::SearchResponse;

/// Public RePORTER v2 search endpoint.
pub const API_URL: &str = "https://api.reporter.nih.gov/v2/projects/search";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Search endpoint, normally [`API_URL`].
    pub url: String,
    /// Whether to verify TLS certificates.
    pub verify: bool,
}

#[derive(Debug, Clone)]
pub struct Client {
    url: String,
    timeout: Duration,
    progress: bool,
    http: HttpClient,
}

impl Client {
    /// Creates a client for the endpoint resolved from the environment.
    ///
    /// This is equivalent to `Client::new(None)`.
    pub fn from_env() -> Result<Self> {
        Self::new(None)
    }

    /// Creates a client using (in order of precedence):
    /// - an explicit `url`
    /// - the `NIH_REPORTER_URL` environment variable
    /// - `url:` from `NIH_REPORTER_RC` or `.reporterrc`
    /// - [`API_URL`]
    pub fn new(url: Option<String>) -> Result<Self> {
        let cfg = load_config(url)?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&format!("nih-reporter-rs/{}", env!("CARGO_PKG_VERSION")))
                .unwrap_or(HeaderValue::from_static("nih-reporter-rs")),
        );

        let mut builder = HttpClient::builder().default_headers(default_headers);
        if !cfg.verify {
            builder = builder.danger_accept_invalid_certs(true);
        }

        let http = builder.build().context("failed to build HTTP client")?;

        Ok(Self {
            url: cfg.url,
            timeout: Duration::from_secs(60),
            progress: true,
            http,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.url
    }

    /// Sends one `projects/search` request and decodes the reply.
    ///
    /// Non-2xx replies fail with `HTTP <code>: <body>`. There is no retry.
    pub fn search(&self, request: &SearchRequest) -> Result<SearchResponse> {
        let spinner = self.progress.then(|| {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::with_template("{spinner:.green} {msg} ({elapsed})")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            pb.set_message("querying NIH RePORTER");
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        });

        let started = Instant::now();
        let sent = self
            .http
            .post(&self.url)
            .timeout(self.timeout)
            .json(request)
            .send();

        if let Some(pb) = &spinner {
            pb.finish_and_clear();
        }

        let resp = sent.with_context(|| format!("request to {} failed", self.url))?;
        let status = resp.status();
        tracing::debug!(
            url = %self.url,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "search response"
        );

        let text = resp
            .text()
            .with_context(|| format!("failed to read response from {}", self.url))?;
        if !status.is_success() {
            return Err(format_http_error(status, &self.url, &text));
        }

        serde_json::from_str::<SearchResponse>(&text).with_context(|| {
            format!(
                "failed to parse API JSON (url={}, status={})",
                self.url, status
            )
        })
    }
}
