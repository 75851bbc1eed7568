use serde::{Deserialize, Serialize};
use serde_yaml::Mapping;

use super::version::supports_license_identifier;

/// One entry of the SPDX license list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseRecord {
    #[serde(rename = "licenseId")]
    pub identifier: String,
    pub name: String,
    #[serde(rename = "reference", default)]
    pub reference_url: String,
}

impl LicenseRecord {
    pub fn new(
        identifier: impl Into<String>,
        name: impl Into<String>,
        reference_url: impl Into<String>,
    ) -> Self {
        LicenseRecord {
            identifier: identifier.into(),
            name: name.into(),
            reference_url: reference_url.into(),
        }
    }
}

/// OpenAPI License Object.
///
/// Objects built from an SPDX record carry either `identifier` (3.1.0 and
/// later) or `url` (earlier versions), never both. Objects read back from an
/// existing document keep whatever they held, `x-` extensions included.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct License {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(flatten)]
    pub extensions: Mapping,
}

impl License {
    /// `{ name, identifier }` form used by OpenAPI 3.1.0 and later.
    pub fn with_identifier(name: impl Into<String>, identifier: impl Into<String>) -> Self {
        License {
            name: name.into(),
            identifier: Some(identifier.into()),
            ..License::default()
        }
    }

    /// `{ name, url }` form used before OpenAPI 3.1.0.
    pub fn with_url(name: impl Into<String>, url: impl Into<String>) -> Self {
        License {
            name: name.into(),
            url: Some(url.into()),
            ..License::default()
        }
    }

    /// Shape an SPDX record for a document declaring `openapi_version`.
    pub fn from_record(record: &LicenseRecord, openapi_version: &str) -> Self {
        if supports_license_identifier(openapi_version) {
            // identifier and url are mutually exclusive from 3.1.0 on
            License::with_identifier(&record.name, &record.identifier)
        } else {
            License::with_url(&record.name, &record.reference_url)
        }
    }
}
