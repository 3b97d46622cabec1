// src/core/net.rs
//
// HTTP GET for the published sheet. Blocking, one request at a time; no
// timeout is layered on top of the client's own defaults.

use reqwest::blocking::Client;
use tracing::{debug, info};

use crate::error::FetchError;

/// Source of raw CSV text. The service only ever calls this sequentially.
pub trait Fetch {
    fn fetch_text(&self, url: &str) -> Result<String, FetchError>;
}

impl<F: Fetch + ?Sized> Fetch for &F {
    fn fetch_text(&self, url: &str) -> Result<String, FetchError> { (**self).fetch_text(url) }
}

impl<F: Fetch + ?Sized> Fetch for Box<F> {
    fn fetch_text(&self, url: &str) -> Result<String, FetchError> { (**self).fetch_text(url) }
}

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(concat!("family_sheet/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        info!(url, "fetching sheet");
        let resp = self.client.get(url).send()?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status { status: status.as_u16(), url: s!(url) });
        }

        let body = resp.text()?;
        debug!(bytes = body.len(), "sheet fetched");
        Ok(body)
    }
}
