//! Tesla Fleet API client
//!
//! A [`FleetClient`] is built once from an ordered list of [`ClientOption`]s
//! and is immutable afterwards, so it can be shared freely between tasks.
//! Each call performs exactly one request; retry policy belongs to the caller.
//!
//! Most deployments should point the client at their own instance of
//! Tesla's `vehicle-command` proxy via [`ClientOption::BaseUrl`].

use crate::error::{FleetError, Result};
use crate::fleet_status::{self, FleetStatus};
use once_cell::sync::Lazy;
use reqwest::Url;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use std::time::Duration;
use tracing::debug;

/// Fleet API base URL serving North America and Asia-Pacific
pub const DEFAULT_BASE_URL: &str = "https://fleet-api.prd.na.vn.cloud.tesla.com";

const FLEET_STATUS_PATH: [&str; 4] = ["api", "1", "vehicles", "fleet_status"];

#[allow(clippy::expect_used)]
static DEFAULT_URL: Lazy<Url> =
    Lazy::new(|| Url::parse(DEFAULT_BASE_URL).expect("default base URL is a valid literal"));

fn user_agent() -> String {
    format!("tesla-fleet/{}", env!("APP_VERSION"))
}

/// A single configuration override applied by [`FleetClient::new`]
#[derive(Debug, Clone)]
pub enum ClientOption {
    /// Transport to use (custom TLS, proxying, timeouts)
    HttpClient(reqwest::Client),
    /// Base URL of an API-compatible deployment
    BaseUrl(Url),
}

/// Use `hc` as the HTTP transport
pub const fn with_http_client(hc: reqwest::Client) -> ClientOption {
    ClientOption::HttpClient(hc)
}

/// Send requests to `url` instead of [`DEFAULT_BASE_URL`]
pub const fn with_base_url(url: Url) -> ClientOption {
    ClientOption::BaseUrl(url)
}

/// Fleet API client
#[derive(Debug, Clone)]
pub struct FleetClient {
    hc: reqwest::Client,
    base_url: Url,
}

impl Default for FleetClient {
    fn default() -> Self {
        Self::new([])
    }
}

impl FleetClient {
    /// Create a new client. Options are applied in order, so a later option
    /// overrides an earlier one for the same setting.
    pub fn new<I>(options: I) -> Self
    where
        I: IntoIterator<Item = ClientOption>,
    {
        let mut client = Self {
            hc: reqwest::Client::new(),
            base_url: DEFAULT_URL.clone(),
        };
        for opt in options {
            match opt {
                ClientOption::HttpClient(hc) => client.hc = hc,
                ClientOption::BaseUrl(url) => client.base_url = url,
            }
        }
        client
    }

    /// Base URL requests are sent to
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Endpoint URL for `fleet_status`, appended to the base URL's own path
    pub fn fleet_status_url(&self) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                FleetError::build_request(format!(
                    "base URL {} cannot carry a path",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(FLEET_STATUS_PATH);
        Ok(url)
    }

    /// Retrieve fleet status for the vehicle with the given VIN, using the
    /// `fleet_status` endpoint.
    ///
    /// Dropping the returned future aborts the request.
    pub async fn get_fleet_status(&self, token: &str, vin: &str) -> Result<FleetStatus> {
        let body = fleet_status::encode_request(vin)?;
        let url = self.fleet_status_url()?;

        let request = self
            .hc
            .post(url)
            .header(AUTHORIZATION, format!("Bearer {}", token))
            .header(CONTENT_TYPE, "application/json")
            .header(USER_AGENT, user_agent())
            .body(body)
            .build()
            .map_err(|source| FleetError::BuildRequest {
                message: "invalid request parameters".to_string(),
                source: Some(source),
            })?;

        debug!(url = %request.url(), vin, "sending fleet_status request");
        let resp = self
            .hc
            .execute(request)
            .await
            .map_err(|source| FleetError::Transport { source })?;

        let status = resp.status();
        // Consumes the response; the connection is released on both paths
        let bytes = resp
            .bytes()
            .await
            .map_err(|source| FleetError::ReadBody { source })?;
        debug!(status = status.as_u16(), len = bytes.len(), "fleet_status response");

        if status != reqwest::StatusCode::OK {
            return Err(FleetError::Status {
                status: status.as_u16(),
            });
        }

        fleet_status::decode_response(&bytes, vin)
    }

    /// Like [`Self::get_fleet_status`], but gives up with
    /// [`FleetError::Cancelled`] as soon as `cancel` completes.
    pub async fn get_fleet_status_until<F>(
        &self,
        cancel: F,
        token: &str,
        vin: &str,
    ) -> Result<FleetStatus>
    where
        F: Future<Output = ()>,
    {
        tokio::select! {
            biased;
            () = cancel => Err(FleetError::Cancelled),
            res = self.get_fleet_status(token, vin) => res,
        }
    }

    /// Like [`Self::get_fleet_status`] with a deadline of `timeout` from now
    pub async fn get_fleet_status_with_timeout(
        &self,
        timeout: Duration,
        token: &str,
        vin: &str,
    ) -> Result<FleetStatus> {
        self.get_fleet_status_until(tokio::time::sleep(timeout), token, vin)
            .await
    }

    /// Blocking wrapper around [`Self::get_fleet_status`].
    ///
    /// Spins up a current-thread runtime, so it must not be called from
    /// within an async context.
    pub fn get_fleet_status_blocking(&self, token: &str, vin: &str) -> Result<FleetStatus> {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        rt.block_on(self.get_fleet_status(token, vin))
    }
}
