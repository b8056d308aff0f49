//! Reading source backed by a collection endpoint (`GET {base_url}/bins`)

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::SmartbinError;
use crate::io::HttpClient;
use crate::reading::BinReading;
use crate::source::ReadingSource;

pub struct HttpSource {
    url: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for HttpSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpSource").field("url", &self.url).finish()
    }
}

impl HttpSource {
    pub fn new(base_url: &str, http: Arc<dyn HttpClient>) -> Self {
        let url = format!("{}/bins", base_url.trim_end_matches('/'));
        tracing::debug!("Created HTTP reading source at {}", url);
        Self { url, http }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ReadingSource for HttpSource {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch_readings(&self) -> crate::Result<Vec<BinReading>> {
        let response = self.http.get(&self.url).await?;

        if !response.is_success() {
            return Err(SmartbinError::Network(format!(
                "GET {} returned status {}",
                self.url, response.status
            )));
        }

        let readings: Vec<BinReading> = serde_json::from_str(&response.body).map_err(|e| {
            SmartbinError::Validation(format!("Malformed readings from {}: {}", self.url, e))
        })?;

        for reading in &readings {
            reading.validate()?;
        }

        tracing::debug!("Fetched {} readings from {}", readings.len(), self.url);
        Ok(readings)
    }
}
