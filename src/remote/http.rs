//! HTTP status client with timeout and error handling.
//!
//! # Responsibilities
//! - Issue one `GET <base>/status` per check
//! - Bound the call by the per-call timeout
//! - Map HTTP and transport outcomes onto `PollResult` / `FetchError`

use std::time::Duration;

use reqwest::{Client, StatusCode};
use url::Url;

use crate::config::PollerConfig;
use crate::poller::ClientError;
use crate::remote::source::StatusSource;
use crate::remote::types::{FetchError, PollResult, StatusBody};
use crate::resilience::timeouts::with_timeout;

/// Status endpoint path, relative to the base URL.
pub const STATUS_PATH: &str = "status";

/// Remote call adapter backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpStatusSource {
    client: Client,
    status_url: Url,
    job_id_param: Option<String>,
    request_timeout: Duration,
}

impl HttpStatusSource {
    /// Build the adapter from configuration.
    pub fn new(config: &PollerConfig) -> Result<Self, ClientError> {
        let status_url = status_url(&config.base_url)?;
        let mut builder = Client::builder();
        if config.no_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build().map_err(ClientError::Http)?;

        tracing::debug!(url = %status_url, timeout = ?config.timeouts.request(), "Status client ready");

        Ok(Self {
            client,
            status_url,
            job_id_param: config.job_id_param.clone(),
            request_timeout: config.timeouts.request(),
        })
    }

    /// URL queried for `job_id`.
    pub fn url_for(&self, job_id: &str) -> Url {
        let mut url = self.status_url.clone();
        if let Some(param) = &self.job_id_param {
            url.query_pairs_mut().append_pair(param, job_id);
        }
        url
    }

    async fn request(&self, url: Url) -> Result<PollResult, FetchError> {
        let response = self.client.get(url).send().await.map_err(map_reqwest)?;
        if response.status() != StatusCode::OK {
            return Err(FetchError::Status(response.status().as_u16()));
        }
        let body: StatusBody = response.json().await.map_err(map_reqwest)?;
        Ok(PollResult::from(body))
    }
}

impl StatusSource for HttpStatusSource {
    async fn fetch_status(&self, job_id: &str) -> Result<PollResult, FetchError> {
        let url = self.url_for(job_id);
        with_timeout(self.request_timeout, self.request(url)).await
    }
}

/// `<base>/status`, tolerating a trailing slash on the base.
fn status_url(base_url: &str) -> Result<Url, ClientError> {
    let mut url = Url::parse(base_url).map_err(ClientError::InvalidBaseUrl)?;
    let path = format!("{}/{STATUS_PATH}", url.path().trim_end_matches('/'));
    url.set_path(&path);
    Ok(url)
}

fn map_reqwest(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout
    } else if err.is_decode() {
        FetchError::Decode(err.to_string())
    } else {
        FetchError::Transport(err.to_string())
    }
}
