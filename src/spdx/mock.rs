use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{parse_license_list, LicenseSource};
use crate::domain::LicenseRecord;
use crate::error::{InfoSyncError, Result};

/// In-memory license source for tests and offline runs
pub struct MockLicenseSource {
    lists: HashMap<String, Vec<LicenseRecord>>,
    failing: bool,
    fetches: AtomicUsize,
}

impl MockLicenseSource {
    /// Create a source with no license lists
    pub fn new() -> Self {
        MockLicenseSource {
            lists: HashMap::new(),
            failing: false,
            fetches: AtomicUsize::new(0),
        }
    }

    /// Create a source whose every fetch fails like an unreachable server
    pub fn failing() -> Self {
        MockLicenseSource {
            failing: true,
            ..MockLicenseSource::new()
        }
    }

    /// Create a source serving a `licenses.json` body as data-set `spdx_version`
    pub fn from_json(spdx_version: impl Into<String>, body: &str) -> Result<Self> {
        let mut source = MockLicenseSource::new();
        source.lists.insert(spdx_version.into(), parse_license_list(body)?);
        Ok(source)
    }

    /// Add a license record to data-set `spdx_version`
    pub fn add_license(&mut self, spdx_version: impl Into<String>, record: LicenseRecord) {
        self.lists.entry(spdx_version.into()).or_default().push(record);
    }

    /// Number of fetches served so far
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl Default for MockLicenseSource {
    fn default() -> Self {
        Self::new()
    }
}

impl LicenseSource for MockLicenseSource {
    fn fetch_licenses(&self, spdx_version: &str) -> Result<Vec<LicenseRecord>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);

        if self.failing {
            return Err(InfoSyncError::fetch("mock source is unreachable"));
        }

        // Unknown data-set versions behave like a 404 from the real server
        self.lists.get(spdx_version).cloned().ok_or_else(|| {
            InfoSyncError::fetch(format!("no SPDX license list for version {}", spdx_version))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_serves_added_licenses() {
        let mut source = MockLicenseSource::new();
        source.add_license("3.17", LicenseRecord::new("MIT", "MIT License", "https://spdx.org/licenses/MIT.html"));

        let licenses = source.fetch_licenses("3.17").unwrap();
        assert_eq!(licenses.len(), 1);
        assert_eq!(source.fetch_count(), 1);
    }

    #[test]
    fn test_mock_unknown_version() {
        let source = MockLicenseSource::default();
        assert!(matches!(source.fetch_licenses("9.99"), Err(InfoSyncError::Fetch(_))));
    }

    #[test]
    fn test_mock_from_json() {
        let source = MockLicenseSource::from_json(
            "3.17",
            r#"{"licenses": [{"licenseId": "ISC", "name": "ISC License", "reference": "https://spdx.org/licenses/ISC.html"}]}"#,
        )
        .unwrap();
        assert_eq!(source.fetch_licenses("3.17").unwrap()[0].name, "ISC License");
    }

    #[test]
    fn test_mock_failing() {
        let source = MockLicenseSource::failing();
        assert!(source.fetch_licenses("3.17").is_err());
        assert_eq!(source.fetch_count(), 1);
    }
}
