// src/models.rs

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};

use crate::core::ownership::{self, OwnershipKey};

// --- PLATFORM TOPOLOGY MODELS ---
// These are read-only inputs produced by the platform API client. They are
// deserialized from the topology document handed to `sitealias sync`.

/// A project on the hosted platform.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: String,
    #[serde(default)]
    pub title: String,
}

/// An application of a project, as checked out locally.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Application {
    pub id: String,
    /// Display name of the application. Falls back to `id` when absent.
    #[serde(default)]
    pub name: Option<String>,
    /// True when the project contains exactly one application. When absent, the number
    /// of applications handed to the generator decides.
    #[serde(default)]
    pub is_single: Option<bool>,
    /// Document root, relative to the application root.
    #[serde(default)]
    pub document_root: String,
    /// Local directory holding the application's source code.
    pub source_dir: String,
}

impl Application {
    /// Creates an application whose name equals its id.
    pub fn new(
        id: impl Into<String>,
        is_single: bool,
        document_root: impl Into<String>,
        source_dir: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: None,
            is_single: Some(is_single),
            document_root: document_root.into(),
            source_dir: source_dir.into(),
        }
    }

    /// The name used in remote SSH users and multi-app route URLs.
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    /// Whether the application is the only one of its project, given that the
    /// project has `app_count` applications.
    pub fn is_single_of(&self, app_count: usize) -> bool {
        self.is_single.unwrap_or(app_count == 1)
    }
}

/// A deployed environment of a project.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    pub id: String,
    /// Named hyperlinks exposed by the API (e.g. `ssh`, `public-url`).
    #[serde(default)]
    pub links: HashMap<String, String>,
    /// Every URL routed to this environment.
    #[serde(default)]
    pub route_urls: Vec<String>,
}

impl Environment {
    /// Creates an environment with no links and no routes.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Adds a named link, consuming and returning the environment.
    pub fn with_link(mut self, name: &str, href: impl Into<String>) -> Self {
        self.links.insert(name.to_string(), href.into());
        self
    }

    /// Adds a route URL, consuming and returning the environment.
    pub fn with_route(mut self, url: impl Into<String>) -> Self {
        self.route_urls.push(url.into());
        self
    }

    /// Returns the link registered under `name`, if any.
    pub fn link(&self, name: &str) -> Option<&str> {
        self.links.get(name).map(String::as_str)
    }
}

/// The document consumed by `sitealias sync`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Topology {
    pub project: Project,
    #[serde(default)]
    pub applications: Vec<Application>,
    #[serde(default)]
    pub environments: Vec<Environment>,
}

// --- ALIAS MODELS ---

/// Loosely-typed fields of an alias, as found in an alias file.
pub type AliasFields = Map<String, Value>;

/// A group of aliases keyed by alias name. Ordered, so serialization is stable.
pub type AliasMap = BTreeMap<String, AliasRecord>;

// Names of the fields the generator controls.
/// Document root of the alias.
pub const ROOT_FIELD: &str = "root";
/// Public URL of the site.
pub const URI_FIELD: &str = "uri";
/// SSH host of a remote alias.
pub const HOST_FIELD: &str = "host";
/// SSH user of a remote alias.
pub const USER_FIELD: &str = "user";

/// A single alias.
///
/// The fields the generator produces are typed; everything else an alias file
/// may contain lives in `extra` and is carried through untouched. `managed`
/// is the ownership marker: it is stored on disk under the configured
/// [`OwnershipKey`] rather than a fixed field name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AliasRecord {
    pub root: Option<String>,
    pub uri: Option<String>,
    pub host: Option<String>,
    pub user: Option<String>,
    pub managed: bool,
    pub extra: AliasFields,
}

impl AliasRecord {
    /// A managed alias for a local checkout.
    pub fn local(root: impl Into<String>) -> Self {
        Self {
            root: Some(root.into()),
            managed: true,
            ..Default::default()
        }
    }

    /// A managed alias for a remote environment.
    pub fn remote(
        uri: impl Into<String>,
        host: impl Into<String>,
        user: impl Into<String>,
        root: impl Into<String>,
    ) -> Self {
        Self {
            root: Some(root.into()),
            uri: Some(uri.into()),
            host: Some(host.into()),
            user: Some(user.into()),
            managed: true,
            extra: AliasFields::new(),
        }
    }

    /// Decodes an alias from the fields found on disk.
    ///
    /// Known fields holding something other than a string stay in `extra`, as
    /// does a marker that is present but not truthy, so user-authored aliases
    /// are written back exactly as they were read.
    pub fn from_fields(mut fields: AliasFields, key: &OwnershipKey) -> Self {
        let managed = match fields.remove(key.as_str()) {
            Some(marker) if ownership::is_truthy(&marker) => true,
            Some(marker) => {
                fields.insert(key.as_str().to_string(), marker);
                false
            }
            None => false,
        };

        Self {
            root: take_string(&mut fields, ROOT_FIELD),
            uri: take_string(&mut fields, URI_FIELD),
            host: take_string(&mut fields, HOST_FIELD),
            user: take_string(&mut fields, USER_FIELD),
            managed,
            extra: fields,
        }
    }

    /// Encodes the alias as loosely-typed fields, ready to be serialized.
    pub fn to_fields(&self, key: &OwnershipKey) -> AliasFields {
        let mut fields = self.extra.clone();
        for (name, value) in self.typed_fields() {
            if let Some(value) = value {
                fields.insert(name.to_string(), Value::String(value.clone()));
            }
        }
        if self.managed {
            fields.insert(key.as_str().to_string(), Value::Bool(true));
        }
        fields
    }

    /// The generator-controlled fields, paired with their on-disk names.
    pub(crate) fn typed_fields(&self) -> [(&'static str, &Option<String>); 4] {
        [
            (URI_FIELD, &self.uri),
            (HOST_FIELD, &self.host),
            (USER_FIELD, &self.user),
            (ROOT_FIELD, &self.root),
        ]
    }
}

/// Removes `name` from `fields` if it holds a string.
fn take_string(fields: &mut AliasFields, name: &str) -> Option<String> {
    match fields.get(name) {
        Some(Value::String(_)) => match fields.remove(name) {
            Some(Value::String(s)) => Some(s),
            _ => None,
        },
        _ => None,
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

    fn fields(value: Value) -> AliasFields {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_application_name_falls_back_to_id() {
        let mut app = Application::new("web", true, "public", "/src");
        assert_eq!(app.name(), "web");
        app.name = Some("frontend".to_string());
        assert_eq!(app.name(), "frontend");
    }

    #[test]
    fn test_explicit_single_flag_wins_over_app_count() {
        let app = Application::new("web", false, "public", "/src");
        assert!(!app.is_single_of(1));

        let app = Application::new("web", true, "public", "/src");
        assert!(app.is_single_of(3));

        let mut app = Application::new("web", true, "public", "/src");
        app.is_single = None;
        assert!(app.is_single_of(1));
        assert!(!app.is_single_of(2));
    }

    #[test]
    fn test_topology_deserializes_with_defaults() {
        let topology: Topology = serde_json::from_value(json!({
            "project": { "id": "abc123" },
            "applications": [{ "id": "app", "source_dir": "/home/me/abc123" }],
            "environments": [{ "id": "main", "links": { "ssh": "ssh://u@h" } }]
        }))
        .unwrap();

        assert_eq!(topology.project.title, "");
        assert_eq!(topology.applications[0].is_single, None);
        assert!(topology.applications[0].is_single_of(1));
        assert_eq!(topology.environments[0].link("ssh"), Some("ssh://u@h"));
        assert!(topology.environments[0].route_urls.is_empty());
    }

    #[test]
    fn test_from_fields_extracts_typed_fields_and_marker() {
        let record = AliasRecord::from_fields(
            fields(json!({
                "root": "/app/public",
                "host": "ssh.example",
                "platformsh-cli-auto-remove": true,
                "options": { "strict": 0 }
            })),
            &key(),
        );

        assert!(record.managed);
        assert_eq!(record.root.as_deref(), Some("/app/public"));
        assert_eq!(record.host.as_deref(), Some("ssh.example"));
        assert_eq!(record.uri, None);
        assert_eq!(Value::Object(record.extra), json!({ "options": { "strict": 0 } }));
    }

    #[test]
    fn test_false_marker_and_odd_values_round_trip() {
        let original = fields(json!({
            "root": 42,
            "uri": "http://example.com",
            "platformsh-cli-auto-remove": false
        }));
        let record = AliasRecord::from_fields(original.clone(), &key());

        assert!(!record.managed);
        assert_eq!(record.root, None);
        assert_eq!(record.to_fields(&key()), original);
    }

    #[test]
    fn test_to_fields_typed_values_win_over_extra() {
        let mut record = AliasRecord::local("/src/_www");
        record.extra.insert("root".to_string(), json!(["stale"]));

        let encoded = record.to_fields(&key());
        assert_eq!(
            Value::Object(encoded),
            json!({ "root": "/src/_www", "platformsh-cli-auto-remove": true })
        );
    }
}
