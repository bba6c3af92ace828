//! # Alias File Formats
//!
//! Each supported alias file syntax is a backend implementing [`AliasFormat`]: it names
//! the file for a group, writes the banner at its top, and converts an [`AliasMap`] to
//! and from text. The generator, the merge engine and the store never look at syntax,
//! so adding a format means adding a backend and a variant to [`AliasFormatKind`].
//!
//! ## Backends
//!
//! - **`yaml_format`**: Drush-style `<group>.site.yml` files.
//! - **`toml_format`**: `<group>.aliases.toml` files, one table per alias.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

use crate::{
    core::ownership::OwnershipKey,
    models::{AliasFields, AliasMap, AliasRecord, Project},
};

pub mod toml_format;
pub mod yaml_format;

pub use toml_format::TomlFormat;
pub use yaml_format::YamlFormat;

/// Errors raised while converting aliases to or from text.
#[derive(Error, Debug)]
pub enum FormatError {
    /// The YAML text could not be parsed, or aliases could not be written as YAML.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// The TOML text could not be parsed.
    #[error("Failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),
    /// Aliases could not be written as TOML.
    #[error("Failed to serialize to TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
    /// The document is not a mapping of alias names to alias definitions.
    #[error("Expected a mapping of alias names to aliases, found {found}.")]
    NotAMapping {
        /// A short description of what was found instead.
        found: String,
    },
    /// An alias is defined as something other than a mapping of fields.
    #[error("Alias '{name}' must be a mapping of fields, found {found}.")]
    InvalidAlias {
        /// The alias name.
        name: String,
        /// A short description of what was found instead.
        found: String,
    },
}

/// A pluggable alias file syntax.
pub trait AliasFormat: fmt::Debug {
    /// The file name, relative to the alias directory, holding `group`.
    fn file_name(&self, group: &str) -> String;

    /// The banner written at the top of the file.
    fn header(&self, project: &Project, key: &OwnershipKey) -> String;

    /// Renders `aliases` as the body of the file.
    fn serialize(&self, aliases: &AliasMap, key: &OwnershipKey) -> Result<String, FormatError>;

    /// Reads the aliases defined in `text`.
    fn parse(&self, text: &str, key: &OwnershipKey) -> Result<AliasMap, FormatError>;
}

/// The closed set of formats selectable from configuration.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AliasFormatKind {
    /// Drush site alias YAML (`<group>.site.yml`).
    #[default]
    Yaml,
    /// TOML tables (`<group>.aliases.toml`).
    Toml,
}

impl AliasFormatKind {
    /// Instantiates the backend for this format.
    pub fn backend(self) -> Box<dyn AliasFormat> {
        match self {
            Self::Yaml => Box::new(YamlFormat),
            Self::Toml => Box::new(TomlFormat),
        }
    }
}

impl fmt::Display for AliasFormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yaml => f.write_str("yaml"),
            Self::Toml => f.write_str("toml"),
        }
    }
}

// --- Helpers shared by the backends ---

/// Builds the `#`-commented banner used by both backends.
pub(crate) fn comment_banner(kind: &str, project: &Project, key: &OwnershipKey) -> String {
    let id = single_line(&project.id);
    let project_label = if project.title.is_empty() {
        id
    } else {
        format!("\"{}\" ({})", single_line(&project.title), id)
    };

    [
        format!("# {kind} for the project {project_label}."),
        "#".to_string(),
        format!("# Aliases marked with `{key}` are managed by sitealias:"),
        "# they are refreshed on every sync and removed once their environment".to_string(),
        "# no longer exists. Aliases without the marker are kept as they are.".to_string(),
    ]
    .join("\n")
}

/// Replaces control characters with spaces so `text` cannot break out of a comment line.
fn single_line(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

/// Converts aliases into plain field maps, ready for any serde serializer.
pub(crate) fn encode(aliases: &AliasMap, key: &OwnershipKey) -> BTreeMap<String, AliasFields> {
    aliases
        .iter()
        .map(|(name, alias)| (name.clone(), alias.to_fields(key)))
        .collect()
}

/// Converts a parsed document back into aliases.
///
/// An empty document (`null`) holds no aliases.
pub(crate) fn decode(document: Value, key: &OwnershipKey) -> Result<AliasMap, FormatError> {
    let entries = match document {
        Value::Null => return Ok(AliasMap::new()),
        Value::Object(entries) => entries,
        other => {
            return Err(FormatError::NotAMapping {
                found: describe(&other),
            });
        }
    };

    entries
        .into_iter()
        .map(|(name, value)| match value {
            Value::Object(fields) => Ok((name, AliasRecord::from_fields(fields, key))),
            other => Err(FormatError::InvalidAlias {
                name,
                found: describe(&other),
            }),
        })
        .collect()
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "nothing".to_string(),
        Value::Bool(_) => "a boolean".to_string(),
        Value::Number(_) => "a number".to_string(),
        Value::String(_) => "a string".to_string(),
        Value::Array(_) => "a list".to_string(),
        Value::Object(_) => "a mapping".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn key() -> OwnershipKey {
        OwnershipKey::from_product_name("Platform.sh CLI")
    }

    #[test]
    fn test_backend_selection() {
        assert_eq!(AliasFormatKind::Yaml.backend().file_name("abc"), "abc.site.yml");
        assert_eq!(
            AliasFormatKind::Toml.backend().file_name("abc"),
            "abc.aliases.toml"
        );
        assert_eq!(AliasFormatKind::default(), AliasFormatKind::Yaml);
        assert_eq!(AliasFormatKind::Toml.to_string(), "toml");
    }

    #[test]
    fn test_banner_mentions_project_and_key() {
        let project = Project {
            id: "abc123".to_string(),
            title: "Shop".to_string(),
        };
        let banner = comment_banner("Site aliases", &project, &key());

        assert!(banner.starts_with("# Site aliases for the project \"Shop\" (abc123)."));
        assert!(banner.contains("`platformsh-cli-auto-remove`"));
        assert!(banner.lines().all(|line| line.starts_with('#')));
    }

    #[test]
    fn test_banner_keeps_multi_line_titles_commented() {
        let project = Project {
            id: "abc\r\n123".to_string(),
            title: "Shop\nWest: [".to_string(),
        };
        let banner = comment_banner("Site aliases", &project, &key());

        assert!(banner.starts_with("# Site aliases for the project \"Shop West: [\" (abc  123)."));
        assert!(banner.lines().all(|line| line.starts_with('#')));
    }

    #[test]
    fn test_decode_rejects_non_mapping_documents() {
        let err = decode(json!(["a", "b"]), &key()).unwrap_err();
        assert!(matches!(err, FormatError::NotAMapping { .. }));

        let err = decode(json!({ "main": "ssh://x" }), &key()).unwrap_err();
        assert!(err.to_string().contains("Alias 'main'"));
    }

    #[test]
    fn test_decode_null_is_empty() {
        assert!(decode(Value::Null, &key()).unwrap().is_empty());
    }
}
