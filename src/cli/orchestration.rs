//! The sync pipeline: load document → resolve license → merge → write.
//!
//! Every fallible step runs before the document is touched, so a failure
//! leaves the target file exactly as it was.

use std::path::PathBuf;

use crate::cli::parameters::SyncParameters;
use crate::document::{OpenApiDocument, WriteKind};
use crate::domain::{InfoFields, License};
use crate::error::Result;
use crate::spdx::{resolve_license, LicenseSource};
use crate::warning::SyncWarning;

/// Result of a completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncOutcome {
    /// The target document
    pub path: PathBuf,
    /// The merged `info` fields
    pub info: InfoFields,
    /// The `info:` entry as written (or as it would be written)
    pub rendered_info: String,
    /// What the write did; `None` for dry runs
    pub write: Option<WriteKind>,
    pub warnings: Vec<SyncWarning>,
}

/// Run the sync pipeline for resolved `params`.
///
/// # Arguments
///
/// * `params` - Resolved run parameters
/// * `source` - Where SPDX license lists are fetched from
/// * `dry_run` - Compute everything but leave the document untouched
///
/// # Errors
///
/// Fails without writing when the existing document is unreadable or the
/// license list cannot be fetched or parsed.
pub fn run_sync<S: LicenseSource + ?Sized>(
    params: &SyncParameters,
    source: &S,
    dry_run: bool,
) -> Result<SyncOutcome> {
    let mut warnings = Vec::new();

    let document = OpenApiDocument::load(&params.openapi_file)?;
    let existing = document.existing_fields()?;

    // an existing document keeps its declared version, so shape the license for it
    let target_version = match document.declared_openapi_version() {
        Some(declared) => {
            if declared.trim() != params.openapi_version.trim() {
                tracing::debug!(
                    declared,
                    requested = %params.openapi_version,
                    "keeping declared OpenAPI version"
                );
                warnings.push(SyncWarning::OpenApiVersionKept {
                    declared: declared.to_string(),
                    requested: params.openapi_version.clone(),
                });
            }
            declared
        }
        None => params.openapi_version.as_str(),
    };

    let license = desired_license(params, source, target_version, &mut warnings)?;

    let desired = InfoFields {
        title: params.title.clone(),
        description: params.description.clone(),
        version: params.version.clone(),
        license,
        contact: params.contact.clone(),
    };
    let info = InfoFields::merge(&desired, &existing, &params.overrides);
    let rendered_info = document.render_info(&info)?;

    let write = if dry_run {
        tracing::info!(path = %document.path().display(), "dry run, document left untouched");
        None
    } else {
        let kind = document.write(&info, &params.openapi_version)?;
        if kind == WriteKind::InfoInserted {
            warnings.push(SyncWarning::InfoInserted);
        }
        Some(kind)
    };

    Ok(SyncOutcome {
        path: document.path().to_path_buf(),
        info,
        rendered_info,
        write,
        warnings,
    })
}

fn desired_license<S: LicenseSource + ?Sized>(
    params: &SyncParameters,
    source: &S,
    target_version: &str,
    warnings: &mut Vec<SyncWarning>,
) -> Result<Option<License>> {
    let Some(identifier) = params
        .license
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
    else {
        tracing::debug!("no license given, skipping SPDX lookup");
        return Ok(None);
    };

    let license = resolve_license(
        source,
        identifier,
        &params.spdx_license_data_version,
        target_version,
    )?;

    if license.is_none() {
        tracing::warn!(identifier, "license not found in SPDX list");
        warnings.push(SyncWarning::LicenseNotFound {
            identifier: identifier.to_string(),
            spdx_version: params.spdx_license_data_version.clone(),
        });
    }

    Ok(license)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LicenseRecord, OverrideSelection};
    use crate::spdx::MockLicenseSource;
    use std::fs;

    fn source() -> MockLicenseSource {
        let mut source = MockLicenseSource::new();
        source.add_license(
            "3.17",
            LicenseRecord::new("MIT", "MIT License", "https://spdx.org/licenses/MIT.html"),
        );
        source
    }

    fn params(openapi_file: PathBuf) -> SyncParameters {
        SyncParameters {
            openapi_file,
            openapi_version: "3.1.0".to_string(),
            title: Some("petstore".to_string()),
            description: None,
            version: Some("2.0.0".to_string()),
            license: Some("MIT".to_string()),
            contact: None,
            overrides: OverrideSelection::standard(),
            spdx_license_data_version: "3.17".to_string(),
        }
    }

    #[test]
    fn test_dry_run_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("openapi.yaml");

        let outcome = run_sync(&params(path.clone()), &source(), true).unwrap();
        assert_eq!(outcome.write, None);
        assert!(!path.exists());
        assert!(outcome.rendered_info.contains("identifier: MIT"));
    }

    #[test]
    fn test_license_shaped_for_declared_version() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("openapi.yaml");
        fs::write(&path, "openapi: 3.0.3\ninfo:\n  title: t\npaths: {}\n").unwrap();

        let outcome = run_sync(&params(path), &source(), false).unwrap();
        assert_eq!(
            outcome.info.license,
            Some(License::with_url("MIT License", "https://spdx.org/licenses/MIT.html"))
        );
        assert!(outcome.warnings.contains(&SyncWarning::OpenApiVersionKept {
            declared: "3.0.3".to_string(),
            requested: "3.1.0".to_string(),
        }));
    }

    #[test]
    fn test_matching_declared_version_is_quiet() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("openapi.yaml");
        fs::write(&path, "openapi: 3.1.0\ninfo:\n  title: t\npaths: {}\n").unwrap();

        let outcome = run_sync(&params(path), &source(), false).unwrap();
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_blank_license_skips_fetch() {
        let dir = tempfile::tempdir().unwrap();
        let mut params = params(dir.path().join("openapi.yaml"));
        params.license = Some("  ".to_string());

        let source = MockLicenseSource::failing();
        let outcome = run_sync(&params, &source, true).unwrap();
        assert_eq!(source.fetch_count(), 0);
        assert!(outcome.info.license.is_none());
    }

    #[test]
    fn test_unknown_license_warns() {
        let dir = tempfile::tempdir().unwrap();
        let mut params = params(dir.path().join("openapi.yaml"));
        params.license = Some("UNLICENSED".to_string());

        let outcome = run_sync(&params, &source(), true).unwrap();
        assert!(matches!(
            outcome.warnings.as_slice(),
            [SyncWarning::LicenseNotFound { .. }]
        ));
    }

    #[test]
    fn test_missing_info_is_inserted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("openapi.yaml");
        fs::write(&path, "openapi: 3.1.0\npaths: {}\n").unwrap();

        let outcome = run_sync(&params(path), &source(), false).unwrap();
        assert_eq!(outcome.write, Some(WriteKind::InfoInserted));
        assert!(outcome.warnings.contains(&SyncWarning::InfoInserted));
    }
}
