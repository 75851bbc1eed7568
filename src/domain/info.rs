use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use super::contact::Contact;
use super::license::License;
use crate::error::InfoSyncError;

/// The five `info` fields this tool maintains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InfoField {
    Title,
    Description,
    Version,
    License,
    Contact,
}

impl InfoField {
    pub const ALL: [InfoField; 5] = [
        InfoField::Title,
        InfoField::Description,
        InfoField::Version,
        InfoField::License,
        InfoField::Contact,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InfoField::Title => "title",
            InfoField::Description => "description",
            InfoField::Version => "version",
            InfoField::License => "license",
            InfoField::Contact => "contact",
        }
    }
}

impl fmt::Display for InfoField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InfoField {
    type Err = InfoSyncError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InfoField::ALL
            .into_iter()
            .find(|field| field.as_str() == s.trim())
            .ok_or_else(|| {
                InfoSyncError::config(format!(
                    "unknown info field '{}' (expected one of: title, description, version, license, contact)",
                    s.trim()
                ))
            })
    }
}

/// Fields whose new value replaces whatever the document already holds.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OverrideSelection(BTreeSet<InfoField>);

impl OverrideSelection {
    pub fn new(fields: impl IntoIterator<Item = InfoField>) -> Self {
        OverrideSelection(fields.into_iter().collect())
    }

    /// `version` and `license`, the selection used when nothing else is configured.
    pub fn standard() -> Self {
        OverrideSelection::new([InfoField::Version, InfoField::License])
    }

    /// Parse a comma-separated list such as `"title, version"`.
    ///
    /// Duplicates collapse; an empty list or `none` selects nothing.
    pub fn parse_list(list: &str) -> crate::error::Result<Self> {
        if list.trim().eq_ignore_ascii_case("none") {
            return Ok(OverrideSelection::default());
        }

        list.split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(InfoField::from_str)
            .collect::<crate::error::Result<BTreeSet<_>>>()
            .map(OverrideSelection)
    }

    pub fn contains(&self, field: InfoField) -> bool {
        self.0.contains(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = InfoField> + '_ {
        self.0.iter().copied()
    }
}

impl fmt::Display for OverrideSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(|field| field.as_str()).collect();
        write!(f, "{}", names.join(", "))
    }
}

/// Values of the maintained `info` fields.
///
/// `None` means the value is unknown: for desired values nothing was
/// supplied, for existing values the document does not hold the field.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InfoFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<License>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,
}

impl InfoFields {
    /// Combine `desired` values with the document's `existing` ones.
    ///
    /// Each field is decided on its own: an overridden field takes the
    /// desired value, any other field keeps the existing value and only
    /// falls back to the desired one when the document has none. A desired
    /// value that is unknown never overrides anything.
    pub fn merge(
        desired: &InfoFields,
        existing: &InfoFields,
        overrides: &OverrideSelection,
    ) -> InfoFields {
        InfoFields {
            title: pick(InfoField::Title, &desired.title, &existing.title, overrides),
            description: pick(
                InfoField::Description,
                &desired.description,
                &existing.description,
                overrides,
            ),
            version: pick(InfoField::Version, &desired.version, &existing.version, overrides),
            license: pick(InfoField::License, &desired.license, &existing.license, overrides),
            contact: pick(InfoField::Contact, &desired.contact, &existing.contact, overrides),
        }
    }
}

fn pick<T: Clone>(
    field: InfoField,
    desired: &Option<T>,
    existing: &Option<T>,
    overrides: &OverrideSelection,
) -> Option<T> {
    if overrides.contains(field) && desired.is_some() {
        tracing::debug!(%field, "taking overridden value");
        return desired.clone();
    }

    if existing.is_some() {
        tracing::debug!(%field, "keeping existing value");
        existing.clone()
    } else {
        tracing::debug!(%field, "no existing value, using default");
        desired.clone()
    }
}
