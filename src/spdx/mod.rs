//! SPDX license data access
//!
//! License lookups go through the [LicenseSource] trait so the resolver can
//! run against the published SPDX license list or an in-memory list:
//!
//! - [http::HttpLicenseSource]: fetches `licenses.json` from the SPDX
//!   license-list-data repository
//! - [mock::MockLicenseSource]: serves a fixed list, used in tests

pub mod http;
pub mod mock;

pub use http::HttpLicenseSource;
pub use mock::MockLicenseSource;

use serde::Deserialize;

use crate::domain::{License, LicenseRecord};
use crate::error::{InfoSyncError, Result};

/// Provider of the complete SPDX license list for a data-set version.
///
/// ## Error Handling
///
/// Transport problems map to [InfoSyncError::Fetch] and bodies that are not
/// a license list map to [InfoSyncError::LicenseData]. Both are fatal to the
/// caller; implementations never retry.
pub trait LicenseSource: Send + Sync {
    /// Fetch every license record of SPDX data-set `spdx_version` (e.g. `3.17`).
    fn fetch_licenses(&self, spdx_version: &str) -> Result<Vec<LicenseRecord>>;
}

#[derive(Debug, Deserialize)]
struct LicenseList {
    licenses: Vec<LicenseRecord>,
}

/// Parse the body of an SPDX `licenses.json` document.
pub fn parse_license_list(body: &str) -> Result<Vec<LicenseRecord>> {
    serde_json::from_str::<LicenseList>(body)
        .map(|list| list.licenses)
        .map_err(|e| InfoSyncError::license_data(format!("invalid SPDX license list: {}", e)))
}

/// Resolve `spdx_identifier` to the License Object for an `openapi_version` document.
///
/// Every call fetches the list anew. An identifier that is not in the list
/// (including `NONE`, `UNLICENSED` and license URLs) resolves to `Ok(None)`.
///
/// # Errors
/// Fails when the license list cannot be fetched or parsed.
pub fn resolve_license<S: LicenseSource + ?Sized>(
    source: &S,
    spdx_identifier: &str,
    spdx_version: &str,
    openapi_version: &str,
) -> Result<Option<License>> {
    let licenses = source.fetch_licenses(spdx_version)?;
    tracing::debug!(
        count = licenses.len(),
        spdx_version,
        "loaded SPDX license list"
    );

    let Some(record) = licenses
        .iter()
        .find(|record| record.identifier == spdx_identifier)
    else {
        tracing::debug!(spdx_identifier, "no SPDX license with this identifier");
        return Ok(None);
    };

    Ok(Some(License::from_record(record, openapi_version)))
}
