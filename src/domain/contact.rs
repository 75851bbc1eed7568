use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_yaml::Mapping;
use std::fmt;

/// `Name <email> (url)`, every part optional.
const AUTHOR_PATTERN: &str = r"(?m)^([^<(]+?)?[ \t]*(?:<([^>(]+?)>)?[ \t]*(?:\(([^)]+?)\)|$)";

/// OpenAPI Contact Object.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(flatten)]
    pub extensions: Mapping,
}

impl Contact {
    pub fn new(name: Option<String>, email: Option<String>, url: Option<String>) -> Self {
        Contact {
            name,
            email,
            url,
            extensions: Mapping::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.url.is_none() && self.extensions.is_empty()
    }

    /// Parse a conventional author string such as
    /// `Jane Doe <jane@example.com> (https://example.com)`.
    ///
    /// Parsing is best effort: parts the grammar does not match are left out,
    /// and input it cannot match at all yields an empty contact.
    pub fn parse_author(author: &str) -> Self {
        let Some(captures) = Regex::new(AUTHOR_PATTERN)
            .ok()
            .and_then(|re| re.captures(author))
        else {
            return Contact::default();
        };

        let part = |index: usize| {
            captures
                .get(index)
                .map(|m| m.as_str().trim().to_string())
                .filter(|s| !s.is_empty())
        };

        Contact::new(part(1), part(2), part(3))
    }
}

impl fmt::Display for Contact {
    /// Renders the contact back into author-string form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(name) = &self.name {
            parts.push(name.clone());
        }
        if let Some(email) = &self.email {
            parts.push(format!("<{}>", email));
        }
        if let Some(url) = &self.url {
            parts.push(format!("({})", url));
        }
        write!(f, "{}", parts.join(" "))
    }
}

/// The `author` field of a project manifest.
#[derive(Debug, Clone, PartialEq)]
pub enum Author {
    /// Already split into name, email and url.
    Structured(Contact),
    /// Free text in `Name <email> (url)` form.
    Text(String),
}

/// Derive the API contact from a manifest author.
///
/// Structured authors are used as they are and text authors are parsed.
/// Without an author the `local_identity` fallback is consulted.
pub fn infer_contact<F>(author: Option<&Author>, local_identity: F) -> Contact
where
    F: FnOnce() -> Contact,
{
    match author {
        Some(Author::Structured(contact)) => contact.clone(),
        Some(Author::Text(text)) => Contact::parse_author(text),
        None => local_identity(),
    }
}
