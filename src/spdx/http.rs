use reqwest::blocking::Client;
use reqwest::StatusCode;
use std::time::Duration;

use super::{parse_license_list, LicenseSource};
use crate::domain::LicenseRecord;
use crate::error::{InfoSyncError, Result};

/// Root of the raw SPDX license-list-data repository.
pub const DEFAULT_SPDX_BASE_URL: &str = "https://raw.githubusercontent.com/spdx/license-list-data";

/// Default bound on a single license list download.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// License source backed by the published SPDX license list.
pub struct HttpLicenseSource {
    client: Client,
    base_url: String,
}

impl HttpLicenseSource {
    /// Creates a source for `base_url` whose requests give up after `timeout`.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("openapi-info-sync/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| InfoSyncError::fetch(format!("failed to create HTTP client: {}", e)))?;

        Ok(HttpLicenseSource {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// URL of `licenses.json` for SPDX data-set `spdx_version`.
    pub fn licenses_url(&self, spdx_version: &str) -> String {
        format!("{}/v{}/json/licenses.json", self.base_url, spdx_version)
    }
}

impl LicenseSource for HttpLicenseSource {
    fn fetch_licenses(&self, spdx_version: &str) -> Result<Vec<LicenseRecord>> {
        let url = self.licenses_url(spdx_version);
        tracing::debug!(%url, "fetching SPDX license list");

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| InfoSyncError::fetch(format!("GET {} failed: {}", url, e)))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(InfoSyncError::fetch(format!("GET {} returned {}", url, status)));
        }

        let body = response
            .text()
            .map_err(|e| InfoSyncError::fetch(format!("failed to read body of {}: {}", url, e)))?;

        parse_license_list(&body)
    }
}
