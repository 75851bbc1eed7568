//! Project manifest reader.
//!
//! Supports npm `package.json` and Cargo `Cargo.toml` manifests, reduced to
//! the handful of fields that feed the OpenAPI `info` block.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{Author, Contact};
use crate::error::{InfoSyncError, Result};

/// Manifest file names probed, in order, when no path is configured.
pub const MANIFEST_CANDIDATES: [&str; 2] = ["package.json", "Cargo.toml"];

/// The manifest fields the tool cares about.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Manifest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub version: Option<String>,
    pub license: Option<String>,
    pub author: Option<Author>,
}

impl Manifest {
    /// Read the manifest at `path`, picking the format from its file name.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            InfoSyncError::manifest(format!("cannot read {}: {}", path.display(), e))
        })?;

        let is_cargo = path
            .file_name()
            .is_some_and(|name| name.eq_ignore_ascii_case("Cargo.toml"));

        let manifest = if is_cargo {
            Manifest::from_cargo_toml(&content)
        } else {
            Manifest::from_package_json(&content)
        };
        manifest.map_err(|e| InfoSyncError::manifest(format!("{}: {}", path.display(), e)))
    }

    /// Parse an npm `package.json`.
    pub fn from_package_json(content: &str) -> Result<Self> {
        let package: PackageJson = serde_json::from_str(content)
            .map_err(|e| InfoSyncError::manifest(format!("invalid package.json: {}", e)))?;

        Ok(Manifest {
            name: package.name,
            description: package.description,
            version: package.version,
            license: package.license.and_then(PackageLicense::into_identifier),
            author: package.author.map(PackageAuthor::into_author),
        })
    }

    /// Parse the `[package]` table of a `Cargo.toml`.
    pub fn from_cargo_toml(content: &str) -> Result<Self> {
        let cargo: CargoToml = toml::from_str(content)
            .map_err(|e| InfoSyncError::manifest(format!("invalid Cargo.toml: {}", e)))?;
        let package = cargo
            .package
            .ok_or_else(|| InfoSyncError::manifest("Cargo.toml has no [package] table"))?;

        Ok(Manifest {
            name: package.name,
            description: package.description,
            version: package.version.and_then(CargoField::into_value),
            license: package.license.and_then(CargoField::into_value),
            author: package
                .authors
                .and_then(CargoField::into_value)
                .and_then(|authors| authors.into_iter().next())
                .map(Author::Text),
        })
    }
}

/// Find the manifest to use: `configured` if given, else the first of
/// [MANIFEST_CANDIDATES] present in `dir`.
pub fn discover(dir: &Path, configured: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = configured {
        return Some(path.to_path_buf());
    }

    MANIFEST_CANDIDATES
        .iter()
        .map(|name| dir.join(name))
        .find(|candidate| candidate.is_file())
}

#[derive(Debug, Deserialize)]
struct PackageJson {
    name: Option<String>,
    description: Option<String>,
    version: Option<String>,
    license: Option<PackageLicense>,
    author: Option<PackageAuthor>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PackageLicense {
    Identifier(String),
    // deprecated `{ "type": "MIT", "url": "..." }` form
    Legacy {
        #[serde(rename = "type")]
        kind: Option<String>,
    },
}

impl PackageLicense {
    fn into_identifier(self) -> Option<String> {
        match self {
            PackageLicense::Identifier(id) => Some(id),
            PackageLicense::Legacy { kind } => kind,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PackageAuthor {
    Text(String),
    Structured(Contact),
}

impl PackageAuthor {
    fn into_author(self) -> Author {
        match self {
            PackageAuthor::Text(text) => Author::Text(text),
            PackageAuthor::Structured(contact) => Author::Structured(contact),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CargoToml {
    package: Option<CargoPackage>,
}

#[derive(Debug, Deserialize)]
struct CargoPackage {
    name: Option<String>,
    description: Option<String>,
    version: Option<CargoField<String>>,
    license: Option<CargoField<String>>,
    authors: Option<CargoField<Vec<String>>>,
}

/// A `[package]` value that may be inherited with `{ workspace = true }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CargoField<T> {
    Value(T),
    #[allow(dead_code)]
    Inherited { workspace: bool },
}

impl<T> CargoField<T> {
    fn into_value(self) -> Option<T> {
        match self {
            CargoField::Value(value) => Some(value),
            CargoField::Inherited { .. } => None,
        }
    }
}
