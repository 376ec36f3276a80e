// src/core/net.rs

// Blocking HTTP over reqwest. One GET per run for the page.

use std::time::Duration;

use reqwest::blocking::Client;

use crate::config::consts::USER_AGENT;
use crate::error::TransportError;

/// Source of raw page markup.
pub trait Fetch {
    fn fetch(&self, url: &str) -> Result<String, TransportError>;
}

/// Shared client builder. Timeouts are hard: an expired timer is a failure.
pub fn client(timeout: Duration) -> Result<Client, TransportError> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(TransportError::Client)
}

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        Ok(Self { client: client(timeout)? })
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String, TransportError> {
        let t = std::time::Instant::now();
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| TransportError::from_reqwest(url, e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(TransportError::Status { status: status.as_u16(), url: s!(url) });
        }

        let body = resp.text().map_err(|e| TransportError::from_reqwest(url, e))?;
        logd!("GET {url}: {} bytes in {:?}", body.len(), t.elapsed());
        Ok(body)
    }
}
