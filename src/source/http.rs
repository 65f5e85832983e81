// HTTP sales source backed by the remote products API
// Author: Gabriel Demetrios Lafis

use std::time::Duration;

use log::{debug, error, info};
use reqwest::blocking::Client;

use crate::data::{JsonRecordDecoder, MalformedRecordPolicy, SaleRecord};
use super::{SalesQuery, SalesSource, SourceError};

/// Default endpoint of the remote products API
pub const DEFAULT_BASE_URL: &str = "https://labdados.com/produtos";

/// Reads sale records with one GET against the remote API
///
/// The blocking client is built per fetch, so the source can be created
/// from async code and fetched from a blocking thread.
#[derive(Debug, Clone)]
pub struct HttpSource {
    base_url: String,
    timeout: Option<Duration>,
    decoder: JsonRecordDecoder,
}

impl HttpSource {
    /// Create a new HTTP source for the given endpoint
    pub fn new<S: Into<String>>(base_url: S) -> Self {
        HttpSource {
            base_url: base_url.into(),
            timeout: None,
            decoder: JsonRecordDecoder::default(),
        }
    }

    /// Set the request timeout; without one the transport default applies
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set how undecodable records are handled
    pub fn with_policy(mut self, policy: MalformedRecordPolicy) -> Self {
        self.decoder = JsonRecordDecoder::new(policy);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn client(&self) -> Result<Client, SourceError> {
        let mut builder = Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(builder.build()?)
    }

    fn request(&self, query: &SalesQuery) -> Result<String, SourceError> {
        let client = self.client()?;
        let response = client
            .get(&self.base_url)
            .query(&query.query_pairs())
            .send()?
            .error_for_status()?;

        debug!("GET {} -> {}", response.url(), response.status());
        Ok(response.text()?)
    }
}

impl Default for HttpSource {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl SalesSource for HttpSource {
    fn fetch(&self, query: &SalesQuery) -> Result<Vec<SaleRecord>, SourceError> {
        query.validate()?;

        let body = self.request(query).map_err(|err| {
            error!("Fetching {} failed: {}", self.base_url, err);
            err
        })?;

        let records = self.decoder.decode_str(&body)?;
        info!(
            "Fetched {} records from {} (regiao={:?}, ano={:?})",
            records.len(),
            self.base_url,
            query.region,
            query.year
        );

        Ok(records)
    }

    fn name(&self) -> &str {
        &self.base_url
    }
}
