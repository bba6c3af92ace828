// src/formats/toml_format.rs

use serde_json::Value;

use super::{AliasFormat, FormatError, comment_banner, decode, encode};
use crate::{
    core::ownership::OwnershipKey,
    models::{AliasMap, Project},
};

/// `<group>.aliases.toml` files, one table per alias.
#[derive(Debug, Clone, Copy, Default)]
pub struct TomlFormat;

impl AliasFormat for TomlFormat {
    fn file_name(&self, group: &str) -> String {
        format!("{group}.aliases.toml")
    }

    fn header(&self, project: &Project, key: &OwnershipKey) -> String {
        comment_banner("Site aliases", project, key)
    }

    fn serialize(&self, aliases: &AliasMap, key: &OwnershipKey) -> Result<String, FormatError> {
        Ok(toml::to_string_pretty(&encode(aliases, key))?)
    }

    fn parse(&self, text: &str, key: &OwnershipKey) -> Result<AliasMap, FormatError> {
        let document: Value = toml::from_str(text)?;
        decode(document, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AliasRecord;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn key() -> OwnershipKey {
        OwnershipKey::from_product_name("Acme Cloud")
    }

    #[test]
    fn test_parse_tables() {
        let text = r#"
# hand-written
[staging]
host = "stage.example"
user = "deploy"
port = 2222

[main]
root = "/app/public"
acme-cloud-auto-remove = true
"#;
        let aliases = TomlFormat.parse(text, &key()).unwrap();

        let staging = aliases.get("staging").unwrap();
        assert!(!staging.managed);
        assert_eq!(staging.host.as_deref(), Some("stage.example"));
        assert_eq!(staging.extra.get("port"), Some(&json!(2222)));

        let main = aliases.get("main").unwrap();
        assert!(main.managed);
        assert_eq!(main.root.as_deref(), Some("/app/public"));
    }

    #[test]
    fn test_parse_empty_file() {
        assert!(TomlFormat.parse("", &key()).unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_scalar_alias() {
        let err = TomlFormat.parse("main = \"ssh://x\"\n", &key()).unwrap_err();
        assert!(matches!(err, FormatError::InvalidAlias { .. }));
    }

    #[test]
    fn test_serialized_text_parses_back() {
        let mut staging = AliasRecord::remote("https://s.example", "h.example", "u", "/app/");
        staging.extra.insert("options".to_string(), json!({ "strict": 0 }));
        let aliases: AliasMap = [
            ("_local--web".to_string(), AliasRecord::local("/src/_www/web")),
            ("staging".to_string(), staging),
        ]
        .into_iter()
        .collect();

        let text = TomlFormat.serialize(&aliases, &key()).unwrap();
        assert!(text.contains("[_local--web]"));
        assert!(text.contains("acme-cloud-auto-remove = true"));
        assert_eq!(TomlFormat.parse(&text, &key()).unwrap(), aliases);
    }
}
