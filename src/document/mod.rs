//! OpenAPI target document: reading the current `info` block and writing the
//! merged one back.
//!
//! A document that does not exist yet is written in canonical form. An
//! existing document is never re-serialized as a whole: only the text of its
//! top-level `info` entry is replaced (see [splice]), so comments, key order
//! and formatting everywhere else stay byte-for-byte the same.

pub mod splice;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::InfoFields;
use crate::error::{InfoSyncError, Result};

/// Default location of the target document.
pub const DEFAULT_OPENAPI_FILE: &str = "openapi.yaml";

const INFO_KEY: &str = "info";

/// An OpenAPI document that already exists on disk.
#[derive(Debug, Clone)]
pub struct ExistingDocument {
    /// Raw file content
    pub source: String,
    /// The `info` mapping as parsed, empty when the document has none
    pub info: Mapping,
    /// Whether the document has a top-level `info` key
    pub has_info: bool,
    /// The declared `openapi` version, if any
    pub openapi_version: Option<String>,
}

/// The target document of a run.
#[derive(Debug, Clone)]
pub enum OpenApiDocument {
    /// Nothing at the target path yet
    New { path: PathBuf },
    /// A document that will be edited in place
    Existing {
        path: PathBuf,
        document: ExistingDocument,
    },
}

/// How [OpenApiDocument::write] changed the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteKind {
    /// A new document was created
    Created,
    /// The existing `info` entry was replaced
    Updated,
    /// The document had no `info` entry and one was added
    InfoInserted,
}

impl OpenApiDocument {
    /// Load the document at `path`, or note that it does not exist yet.
    ///
    /// # Errors
    /// Fails when the file exists but cannot be read or parsed, or when its
    /// `info` entry is not a mapping.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "target document does not exist");
            return Ok(OpenApiDocument::New { path });
        }

        let source = fs::read_to_string(&path).map_err(|e| {
            InfoSyncError::document(format!("cannot read {}: {}", path.display(), e))
        })?;
        let document = ExistingDocument::parse(source).map_err(|e| match e {
            InfoSyncError::Document(msg) => {
                InfoSyncError::document(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })?;

        Ok(OpenApiDocument::Existing { path, document })
    }

    pub fn path(&self) -> &Path {
        match self {
            OpenApiDocument::New { path } | OpenApiDocument::Existing { path, .. } => path,
        }
    }

    pub fn exists(&self) -> bool {
        matches!(self, OpenApiDocument::Existing { .. })
    }

    /// The maintained fields as the document currently holds them.
    pub fn existing_fields(&self) -> Result<InfoFields> {
        match self {
            OpenApiDocument::New { .. } => Ok(InfoFields::default()),
            OpenApiDocument::Existing { document, .. } => fields_from_mapping(&document.info),
        }
    }

    /// Render just the `info:` entry as it would be written.
    pub fn render_info(&self, fields: &InfoFields) -> Result<String> {
        let mut info = match self {
            OpenApiDocument::New { .. } => Mapping::new(),
            OpenApiDocument::Existing { document, .. } => document.info.clone(),
        };
        apply_fields(&mut info, fields)?;
        render_info_entry(&info)
    }

    /// The `openapi` version an existing document declares.
    pub fn declared_openapi_version(&self) -> Option<&str> {
        match self {
            OpenApiDocument::New { .. } => None,
            OpenApiDocument::Existing { document, .. } => document.openapi_version.as_deref(),
        }
    }

    /// Render the full document content with `fields` applied.
    pub fn render(&self, fields: &InfoFields, openapi_version: &str) -> Result<(String, WriteKind)> {
        match self {
            OpenApiDocument::New { .. } => {
                Ok((render_new_document(fields, openapi_version)?, WriteKind::Created))
            }
            OpenApiDocument::Existing { document, .. } => document.render_update(fields),
        }
    }

    /// Persist `fields` into the document.
    ///
    /// `openapi_version` is only used when the document is created.
    pub fn write(&self, fields: &InfoFields, openapi_version: &str) -> Result<WriteKind> {
        let (content, kind) = self.render(fields, openapi_version)?;

        if let Some(parent) = self.path().parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(self.path(), content)?;

        tracing::info!(path = %self.path().display(), ?kind, "wrote OpenAPI document");
        Ok(kind)
    }
}

impl ExistingDocument {
    /// Parse raw document content.
    pub fn parse(source: String) -> Result<Self> {
        let root: Value = serde_yaml::from_str(&source)
            .map_err(|e| InfoSyncError::document(format!("invalid YAML: {}", e)))?;

        let root = match root {
            Value::Mapping(mapping) => mapping,
            // an empty file is an empty document
            Value::Null => Mapping::new(),
            _ => return Err(InfoSyncError::document("document root is not a mapping")),
        };

        let (info, has_info) = match root.get(INFO_KEY) {
            None => (Mapping::new(), false),
            Some(Value::Null) => (Mapping::new(), true),
            Some(Value::Mapping(info)) => (info.clone(), true),
            Some(_) => return Err(InfoSyncError::document("`info` is not a mapping")),
        };

        let openapi_version = root.get("openapi").and_then(scalar_to_string);

        Ok(ExistingDocument {
            source,
            info,
            has_info,
            openapi_version,
        })
    }

    /// Replace or insert the `info` entry, leaving the rest of the text alone.
    pub fn render_update(&self, fields: &InfoFields) -> Result<(String, WriteKind)> {
        if splice::is_flow_document(&self.source) {
            return Err(InfoSyncError::document(
                "flow-style documents cannot be edited in place",
            ));
        }

        let mut info = self.info.clone();
        apply_fields(&mut info, fields)?;
        if self.has_info && info == self.info {
            tracing::debug!("info block unchanged, keeping its text");
            return Ok((self.source.clone(), WriteKind::Updated));
        }
        let rendered = render_info_entry(&info)?;

        let (content, kind) = if self.has_info {
            let content = splice::replace_top_level_entry(&self.source, INFO_KEY, &rendered)
                .ok_or_else(|| {
                    InfoSyncError::document("`info` is not a block-style top-level entry")
                })?;
            (content, WriteKind::Updated)
        } else {
            let content = splice::insert_top_level_entry(&self.source, "openapi", &rendered);
            (content, WriteKind::InfoInserted)
        };

        verify_info(&content, &info)?;
        Ok((content, kind))
    }
}

/// Render the `info:` entry for `info` as block YAML.
pub fn render_info_entry(info: &Mapping) -> Result<String> {
    let mut entry = Mapping::new();
    entry.insert(Value::from(INFO_KEY), Value::Mapping(info.clone()));
    to_yaml(&entry)
}

/// Render a brand-new document holding `fields`.
pub fn render_new_document(fields: &InfoFields, openapi_version: &str) -> Result<String> {
    let mut info = Mapping::new();
    apply_fields(&mut info, fields)?;

    let mut root = Mapping::new();
    root.insert(Value::from("openapi"), Value::from(openapi_version));
    root.insert(Value::from(INFO_KEY), Value::Mapping(info));
    root.insert(Value::from("paths"), Value::Mapping(Mapping::new()));
    to_yaml(&root)
}

/// Read the maintained fields out of an `info` mapping.
pub fn fields_from_mapping(info: &Mapping) -> Result<InfoFields> {
    Ok(InfoFields {
        title: scalar_field(info, "title")?,
        description: scalar_field(info, "description")?,
        version: scalar_field(info, "version")?,
        license: typed_field(info, "license")?,
        contact: typed_field(info, "contact")?,
    })
}

/// Write every changed field of `fields` into `info`.
///
/// Keys that already exist keep their position; new keys are appended.
/// Unknown (`None`) fields and fields equal to what `info` already holds
/// keep their original YAML value, so a kept `version: 1.10` stays a number
/// instead of turning into a string.
pub fn apply_fields(info: &mut Mapping, fields: &InfoFields) -> Result<()> {
    let current = fields_from_mapping(info)?;
    set(info, "title", &fields.title, &current.title)?;
    set(info, "description", &fields.description, &current.description)?;
    set(info, "version", &fields.version, &current.version)?;
    set(info, "license", &fields.license, &current.license)?;
    set(info, "contact", &fields.contact, &current.contact)?;
    Ok(())
}

fn set<T: Serialize + PartialEq>(
    info: &mut Mapping,
    key: &str,
    value: &Option<T>,
    current: &Option<T>,
) -> Result<()> {
    match value {
        Some(value) if current.as_ref() != Some(value) => {
            let value = serde_yaml::to_value(value).map_err(|e| {
                InfoSyncError::document(format!("cannot serialize info.{}: {}", key, e))
            })?;
            info.insert(Value::from(key), value);
        }
        _ => {}
    }
    Ok(())
}

fn scalar_field(info: &Mapping, key: &str) -> Result<Option<String>> {
    match info.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => scalar_to_string(value)
            .map(Some)
            .ok_or_else(|| InfoSyncError::document(format!("info.{} is not a scalar", key))),
    }
}

fn typed_field<T: DeserializeOwned>(info: &Mapping, key: &str) -> Result<Option<T>> {
    match info.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_yaml::from_value(value.clone())
            .map(Some)
            .map_err(|e| InfoSyncError::document(format!("invalid info.{}: {}", key, e))),
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn to_yaml<T: Serialize>(value: &T) -> Result<String> {
    serde_yaml::to_string(value)
        .map_err(|e| InfoSyncError::document(format!("cannot serialize document: {}", e)))
}

/// Re-parse spliced content and make sure it carries exactly `info`.
fn verify_info(content: &str, info: &Mapping) -> Result<()> {
    let root: Value = serde_yaml::from_str(content)
        .map_err(|e| InfoSyncError::document(format!("edited document is invalid: {}", e)))?;

    match root.get(INFO_KEY) {
        Some(Value::Mapping(written)) if written == info => Ok(()),
        _ => Err(InfoSyncError::document(
            "edited document does not hold the expected info block",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Contact, License};

    fn fields() -> InfoFields {
        InfoFields {
            title: Some("petstore".to_string()),
            description: Some("Pets as a service".to_string()),
            version: Some("2.0.0".to_string()),
            license: Some(License::with_identifier("MIT License", "MIT")),
            contact: Some(Contact::parse_author("Jane Doe <jane@example.com>")),
        }
    }

    #[test]
    fn test_render_new_document() {
        let content = render_new_document(&fields(), "3.1.0").unwrap();
        assert_eq!(
            content,
            "openapi: 3.1.0\n\
             info:\n  \
               title: petstore\n  \
               description: Pets as a service\n  \
               version: 2.0.0\n  \
               license:\n    \
                 name: MIT License\n    \
                 identifier: MIT\n  \
               contact:\n    \
                 name: Jane Doe\n    \
                 email: jane@example.com\n\
             paths: {}\n"
        );
    }

    #[test]
    fn test_parse_existing_fields() {
        let doc = ExistingDocument::parse(
            "openapi: 3.0.3\ninfo:\n  title: Old Title\n  version: 1.0\n  license:\n    name: MIT\n"
                .to_string(),
        )
        .unwrap();
        let existing = fields_from_mapping(&doc.info).unwrap();

        assert_eq!(doc.openapi_version.as_deref(), Some("3.0.3"));
        assert_eq!(existing.title.as_deref(), Some("Old Title"));
        assert_eq!(existing.version.as_deref(), Some("1.0"));
        assert_eq!(existing.license.map(|l| l.name), Some("MIT".to_string()));
        assert!(existing.contact.is_none());
    }

    #[test]
    fn test_parse_rejects_bad_documents() {
        assert!(ExistingDocument::parse("openapi: [unclosed".to_string()).is_err());
        assert!(ExistingDocument::parse("- a\n- b\n".to_string()).is_err());
        assert!(ExistingDocument::parse("info: just text\n".to_string()).is_err());
    }

    #[test]
    fn test_parse_empty_document() {
        let doc = ExistingDocument::parse(String::new()).unwrap();
        assert!(!doc.has_info);
        assert!(doc.info.is_empty());
    }

    #[test]
    fn test_apply_keeps_key_order_and_other_keys() {
        let mut info: Mapping =
            serde_yaml::from_str("version: 1.0.0\nx-logo: logo.png\ntitle: Old\n").unwrap();
        apply_fields(
            &mut info,
            &InfoFields {
                title: Some("New".to_string()),
                ..InfoFields::default()
            },
        )
        .unwrap();

        let yaml = serde_yaml::to_string(&info).unwrap();
        assert_eq!(yaml, "version: 1.0.0\nx-logo: logo.png\ntitle: New\n");
    }

    #[test]
    fn test_render_update_unchanged_info_keeps_text() {
        let source = "openapi: 3.1.0\ninfo:\n  title: 2024  # year\n  version: 1.10\n  x-rank: 1e3\npaths: {}\n";
        let doc = ExistingDocument::parse(source.to_string()).unwrap();
        let kept = fields_from_mapping(&doc.info).unwrap();
        assert_eq!(kept.version.as_deref(), Some("1.1"));

        let (content, kind) = doc.render_update(&kept).unwrap();
        assert_eq!(kind, WriteKind::Updated);
        assert_eq!(content, source);
    }

    #[test]
    fn test_render_update_keeps_scalar_types_of_kept_fields() {
        let source = "openapi: 3.1.0\ninfo:\n  title: 2024\n  version: 1.10\n";
        let doc = ExistingDocument::parse(source.to_string()).unwrap();
        let mut fields = fields_from_mapping(&doc.info).unwrap();
        fields.description = Some("Pets".to_string());

        let (content, _) = doc.render_update(&fields).unwrap();
        assert!(!content.contains("'1.1'"));
        assert!(!content.contains("'2024'"));

        let reparsed = ExistingDocument::parse(content).unwrap();
        assert_eq!(reparsed.info.get("title"), doc.info.get("title"));
        assert_eq!(reparsed.info.get("version"), doc.info.get("version"));
        assert_eq!(
            reparsed.info.get("description"),
            Some(&Value::from("Pets"))
        );
    }

    #[test]
    fn test_render_update_rewrites_changed_scalars() {
        let doc =
            ExistingDocument::parse("openapi: 3.1.0\ninfo:\n  version: 1.10\n".to_string()).unwrap();
        let (content, _) = doc
            .render_update(&InfoFields {
                version: Some("1.10".to_string()),
                ..InfoFields::default()
            })
            .unwrap();
        assert!(content.contains("version: '1.10'"));
    }

    #[test]
    fn test_render_update_preserves_outside_info() {
        let source = "# header comment\nopenapi: 3.1.0\ninfo:\n  title: Old Title   # inline\n  termsOfService: https://example.com/tos\npaths:\n  /pets: {}  # pets\n";
        let doc = ExistingDocument::parse(source.to_string()).unwrap();
        let (content, kind) = doc
            .render_update(&InfoFields {
                version: Some("2.0.0".to_string()),
                ..InfoFields::default()
            })
            .unwrap();

        assert_eq!(kind, WriteKind::Updated);
        assert!(content.starts_with("# header comment\nopenapi: 3.1.0\ninfo:\n"));
        assert!(content.ends_with("paths:\n  /pets: {}  # pets\n"));
        assert!(content.contains("  termsOfService: https://example.com/tos\n"));
        assert!(content.contains("  version: 2.0.0\n"));
    }

    #[test]
    fn test_render_update_inserts_missing_info() {
        let doc = ExistingDocument::parse("openapi: 3.1.0\npaths: {}\n".to_string()).unwrap();
        let (content, kind) = doc
            .render_update(&InfoFields {
                title: Some("t".to_string()),
                ..InfoFields::default()
            })
            .unwrap();
        assert_eq!(kind, WriteKind::InfoInserted);
        assert_eq!(content, "openapi: 3.1.0\ninfo:\n  title: t\npaths: {}\n");
    }

    #[test]
    fn test_render_update_rejects_flow_documents() {
        let doc = ExistingDocument::parse(r#"{"openapi": "3.1.0", "info": {"title": "t"}}"#.to_string())
            .unwrap();
        assert!(doc.render_update(&fields()).is_err());
    }

    #[test]
    fn test_load_missing_is_new() {
        let dir = tempfile::tempdir().unwrap();
        let document = OpenApiDocument::load(dir.path().join("openapi.yaml")).unwrap();
        assert!(!document.exists());
        assert_eq!(document.existing_fields().unwrap(), InfoFields::default());
    }
}
