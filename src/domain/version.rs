use std::cmp::Ordering;

/// The version at which the License Object switched from `url` to `identifier`.
pub const LICENSE_IDENTIFIER_SINCE: &str = "3.1.0";

/// Dotted `major.minor.patch` version as read from a document or prompt.
///
/// Components that are missing or not numeric are kept as `None` and never
/// compare lower, higher or equal to anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecVersion {
    pub major: Option<u64>,
    pub minor: Option<u64>,
    pub patch: Option<u64>,
}

impl SpecVersion {
    /// Parse the first three dot-separated components of `version`.
    ///
    /// Parsing never fails: anything beyond the third component is ignored,
    /// blank components read as zero.
    pub fn parse(version: &str) -> Self {
        let mut parts = version.split('.');
        SpecVersion {
            major: parse_component(parts.next()),
            minor: parse_component(parts.next()),
            patch: parse_component(parts.next()),
        }
    }

    /// True only when every component needed to decide is numeric and `self`
    /// sorts strictly before `other`.
    fn is_lower_than(&self, other: &SpecVersion) -> bool {
        lower(self.major, other.major)
            || (same(self.major, other.major)
                && (lower(self.minor, other.minor)
                    || (same(self.minor, other.minor) && lower(self.patch, other.patch))))
    }
}

fn parse_component(part: Option<&str>) -> Option<u64> {
    let part = part?.trim();
    if part.is_empty() {
        return Some(0);
    }
    part.parse::<u64>().ok()
}

fn lower(a: Option<u64>, b: Option<u64>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a < b)
}

fn same(a: Option<u64>, b: Option<u64>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a == b)
}

/// Compare two version strings.
///
/// Identical strings are `Equal` without parsing. Otherwise the result is
/// `Less` only when `a` parses as strictly lower than `b`; every other case,
/// malformed components included, is `Greater`.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }

    if SpecVersion::parse(a).is_lower_than(&SpecVersion::parse(b)) {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}

/// Whether documents of `openapi_version` describe licenses by SPDX identifier.
pub fn supports_license_identifier(openapi_version: &str) -> bool {
    compare_versions(openapi_version, LICENSE_IDENTIFIER_SINCE) != Ordering::Less
}
