//! Resolution of run parameters.
//!
//! Each parameter comes from, in order of precedence: an explicit value
//! (command-line flag), an interactive answer, the configuration file, the
//! project manifest, or a built-in literal. Resolution happens once, before
//! the pipeline runs.

use std::path::PathBuf;

use crate::config::Config;
use crate::domain::{infer_contact, Contact, OverrideSelection};
use crate::error::Result;
use crate::manifest::Manifest;
use crate::ui;
use crate::warning::SyncWarning;

/// Fully resolved parameters of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncParameters {
    /// Target document path
    pub openapi_file: PathBuf,
    /// OpenAPI version for new documents and license shaping
    pub openapi_version: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub version: Option<String>,
    /// SPDX identifier, `NONE`, `UNLICENSED` or a license URL
    pub license: Option<String>,
    pub contact: Option<Contact>,
    pub overrides: OverrideSelection,
    /// SPDX license list release to resolve against
    pub spdx_license_data_version: String,
}

/// Values given explicitly, typically as command-line flags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExplicitParameters {
    pub openapi_file: Option<PathBuf>,
    pub openapi_version: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub version: Option<String>,
    pub license: Option<String>,
    /// Contact in `Name <email> (url)` form
    pub contact: Option<String>,
    pub overrides: Option<OverrideSelection>,
    pub spdx_license_data_version: Option<String>,
}

/// Parameters plus what went missing while deriving them.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedParameters {
    pub parameters: SyncParameters,
    pub warnings: Vec<SyncWarning>,
}

/// Source of interactive answers.
pub trait Prompter {
    /// Ask for a free-text value; `None` when left empty without default.
    fn input(&mut self, message: &str, default: Option<&str>) -> Result<Option<String>>;

    /// Ask which fields to override.
    fn overrides(&mut self, default: &OverrideSelection) -> Result<OverrideSelection>;
}

/// [Prompter] reading answers from the terminal.
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn input(&mut self, message: &str, default: Option<&str>) -> Result<Option<String>> {
        ui::prompt_input(message, default)
    }

    fn overrides(&mut self, default: &OverrideSelection) -> Result<OverrideSelection> {
        ui::prompt_overrides(default)
    }
}

/// Resolve every run parameter.
///
/// `local_identity` is only called when neither a flag nor the manifest
/// provides a contact. Without a `prompter` the defaults are taken as they are.
pub fn resolve_parameters<F>(
    explicit: &ExplicitParameters,
    config: &Config,
    manifest: &Manifest,
    local_identity: F,
    mut prompter: Option<&mut dyn Prompter>,
) -> Result<ResolvedParameters>
where
    F: FnOnce() -> Contact,
{
    let mut warnings = Vec::new();

    let openapi_file = match &explicit.openapi_file {
        Some(path) => path.clone(),
        None => ask(
            &mut prompter,
            "OpenAPI document path (including subpath)",
            Some(config.openapi_file.display().to_string()),
        )?
        .map(PathBuf::from)
        .unwrap_or_else(|| config.openapi_file.clone()),
    };

    let openapi_version = choose(
        explicit.openapi_version.clone(),
        &mut prompter,
        "OpenAPI specification version",
        Some(config.openapi_version.clone()),
    )?
    .unwrap_or_else(|| config.openapi_version.clone());

    let title = choose(
        explicit.title.clone(),
        &mut prompter,
        "Title of the API",
        manifest_default(&manifest.name, "name", explicit.title.is_some(), &mut warnings),
    )?;

    let description = choose(
        explicit.description.clone(),
        &mut prompter,
        "Description of the API",
        manifest_default(
            &manifest.description,
            "description",
            explicit.description.is_some(),
            &mut warnings,
        ),
    )?;

    let version = choose(
        explicit.version.clone(),
        &mut prompter,
        "Version",
        manifest_default(&manifest.version, "version", explicit.version.is_some(), &mut warnings),
    )?;

    let license = choose(
        explicit.license.clone(),
        &mut prompter,
        "License identifier (SPDX), NONE, UNLICENSED, or URL to a custom license",
        manifest_default(&manifest.license, "license", explicit.license.is_some(), &mut warnings),
    )?;

    let contact = match &explicit.contact {
        Some(text) => Some(Contact::parse_author(text)),
        None => {
            let inferred = infer_contact(manifest.author.as_ref(), local_identity);
            if inferred.is_empty() && manifest.author.is_none() {
                warnings.push(SyncWarning::LocalIdentityUnavailable);
            }
            prompt_contact(&mut prompter, inferred)?
        }
    }
    .filter(|contact| !contact.is_empty());

    let overrides = match (&explicit.overrides, prompter.as_mut()) {
        (Some(overrides), _) => overrides.clone(),
        (None, Some(prompter)) => prompter.overrides(&config.overrides)?,
        (None, None) => config.overrides.clone(),
    };

    let spdx_license_data_version = choose(
        explicit.spdx_license_data_version.clone(),
        &mut prompter,
        "SPDX license list version",
        Some(config.spdx_license_data_version.clone()),
    )?
    .unwrap_or_else(|| config.spdx_license_data_version.clone());

    Ok(ResolvedParameters {
        parameters: SyncParameters {
            openapi_file,
            openapi_version,
            title,
            description,
            version,
            license,
            contact,
            overrides,
            spdx_license_data_version,
        },
        warnings,
    })
}

fn choose(
    explicit: Option<String>,
    prompter: &mut Option<&mut dyn Prompter>,
    message: &str,
    default: Option<String>,
) -> Result<Option<String>> {
    if explicit.is_some() {
        return Ok(explicit);
    }
    ask(prompter, message, default)
}

fn ask(
    prompter: &mut Option<&mut dyn Prompter>,
    message: &str,
    default: Option<String>,
) -> Result<Option<String>> {
    match prompter {
        Some(prompter) => prompter.input(message, default.as_deref()),
        None => Ok(default),
    }
}

fn manifest_default(
    value: &Option<String>,
    field: &str,
    explicit: bool,
    warnings: &mut Vec<SyncWarning>,
) -> Option<String> {
    if value.is_none() && !explicit {
        warnings.push(SyncWarning::ManifestFieldMissing {
            field: field.to_string(),
        });
    }
    value.clone()
}

/// Offer the inferred contact for editing as an author string.
///
/// An unchanged answer keeps the inferred object as it is.
fn prompt_contact(
    prompter: &mut Option<&mut dyn Prompter>,
    inferred: Contact,
) -> Result<Option<Contact>> {
    let Some(prompter) = prompter else {
        return Ok(Some(inferred));
    };

    let default = inferred.to_string();
    let answer = prompter.input("Point of contact for the API", Some(&default))?;
    Ok(match answer {
        Some(text) if text == default => Some(inferred),
        Some(text) => Some(Contact::parse_author(&text)),
        None => None,
    })
}
