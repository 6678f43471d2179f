//! HTTP client for the TIMS control unit.

use std::net::ToSocketAddrs;
use std::time::Duration;

use crate::core::Payload;

use super::response::{DeviceError, DeviceResponse};

/// Connection settings for one control unit.
#[derive(Debug, Clone)]
pub struct DeviceConfig {
    /// Device IP or hostname.
    pub host: String,
    pub port: u16,
    /// Request timeout (default 60 s — device signing is slow).
    pub timeout: Duration,
    /// Timeout for the TCP connect probe (default 5 s).
    pub probe_timeout: Duration,
}

impl DeviceConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            timeout: Duration::from_secs(60),
            probe_timeout: Duration::from_secs(5),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Submission endpoint URL.
    pub fn endpoint(&self) -> String {
        format!("https://{}:{}/api/values/PostTims", self.host, self.port)
    }
}

/// Async client for payload submission.
///
/// Any schema-valid response — accepted or rejected — is returned as `Ok`
/// so the caller can record it for audit before calling
/// [`DeviceResponse::ensure_accepted`].
pub struct DeviceClient {
    config: DeviceConfig,
    http: reqwest::Client,
}

impl DeviceClient {
    pub fn new(config: DeviceConfig) -> Result<Self, DeviceError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| DeviceError::Connection(e.to_string()))?;
        Ok(Self { config, http })
    }

    /// POST the payload to the control unit.
    pub async fn submit(&self, payload: &Payload) -> Result<DeviceResponse, DeviceError> {
        let endpoint = self.config.endpoint();
        tracing::debug!(%endpoint, rct_no = %payload.rct_no, "submitting payload");

        let resp = self
            .http
            .post(&endpoint)
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DeviceError::Timeout
                } else {
                    DeviceError::Connection(e.to_string())
                }
            })?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| DeviceError::Connection(e.to_string()))?;

        if !status.is_success() {
            tracing::warn!(%endpoint, status = status.as_u16(), "device returned error status");
            return Err(DeviceError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let response = DeviceResponse::from_json(&body)?;
        if !response.is_accepted() {
            tracing::warn!(
                code = %response.response_code,
                message = %response.message,
                "submission rejected"
            );
        }
        Ok(response)
    }

    /// Plain TCP connect test against the device, used during setup to
    /// verify the device is reachable before any submission.
    pub fn probe(&self) -> Result<(), DeviceError> {
        let target = format!("{}:{}", self.config.host, self.config.port);
        let addrs = target
            .to_socket_addrs()
            .map_err(|e| DeviceError::Connection(format!("cannot resolve {target}: {e}")))?;
        let mut last_err = None;
        for addr in addrs {
            match std::net::TcpStream::connect_timeout(&addr, self.config.probe_timeout) {
                Ok(_) => return Ok(()),
                Err(e) => last_err = Some(e),
            }
        }
        Err(DeviceError::Connection(match last_err {
            Some(e) => format!("cannot connect to {target}: {e}"),
            None => format!("{target} resolved to no addresses"),
        }))
    }
}
