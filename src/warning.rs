use std::fmt;

/// Conditions worth telling the user about that do not stop a run.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncWarning {
    /// The license identifier is not in the SPDX list
    LicenseNotFound {
        identifier: String,
        spdx_version: String,
    },
    /// No manifest was found to derive defaults from
    ManifestNotFound { searched: Vec<String> },
    /// The manifest lacks a field a parameter defaults to
    ManifestFieldMissing { field: String },
    /// No local identity could be determined for the contact
    LocalIdentityUnavailable,
    /// The existing document had no `info` entry; a new one was added
    InfoInserted,
    /// The existing document declares another `openapi` version than requested
    OpenApiVersionKept { declared: String, requested: String },
}

impl fmt::Display for SyncWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncWarning::LicenseNotFound {
                identifier,
                spdx_version,
            } => write!(
                f,
                "License '{}' is not in SPDX license list {}; license left as it was",
                identifier, spdx_version
            ),
            SyncWarning::ManifestNotFound { searched } => {
                write!(f, "No project manifest found (looked for {})", searched.join(", "))
            }
            SyncWarning::ManifestFieldMissing { field } => {
                write!(f, "Manifest has no '{}' field", field)
            }
            SyncWarning::LocalIdentityUnavailable => {
                write!(f, "Could not determine a local identity for the contact")
            }
            SyncWarning::InfoInserted => {
                write!(f, "Document had no info block; a new one was added")
            }
            SyncWarning::OpenApiVersionKept {
                declared,
                requested,
            } => write!(
                f,
                "Document declares OpenAPI {}; keeping it instead of {} and shaping the license for it",
                declared, requested
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_license_not_found_display() {
        let warning = SyncWarning::LicenseNotFound {
            identifier: "NOT-A-REAL-LICENSE".to_string(),
            spdx_version: "3.17".to_string(),
        };
        let msg = warning.to_string();
        assert!(msg.contains("NOT-A-REAL-LICENSE"));
        assert!(msg.contains("3.17"));
    }

    #[test]
    fn test_manifest_not_found_display() {
        let warning = SyncWarning::ManifestNotFound {
            searched: vec!["package.json".to_string(), "Cargo.toml".to_string()],
        };
        assert_eq!(
            warning.to_string(),
            "No project manifest found (looked for package.json, Cargo.toml)"
        );
    }

    #[test]
    fn test_field_missing_display() {
        let warning = SyncWarning::ManifestFieldMissing {
            field: "description".to_string(),
        };
        assert!(warning.to_string().contains("'description'"));
    }

    #[test]
    fn test_openapi_version_kept_display() {
        let warning = SyncWarning::OpenApiVersionKept {
            declared: "3.0.3".to_string(),
            requested: "3.1.0".to_string(),
        };
        let msg = warning.to_string();
        assert!(msg.contains("OpenAPI 3.0.3"));
        assert!(msg.contains("instead of 3.1.0"));
    }
}
