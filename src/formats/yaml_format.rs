// src/formats/yaml_format.rs

use serde_json::Value;

use super::{AliasFormat, FormatError, comment_banner, decode, encode};
use crate::{
    core::ownership::OwnershipKey,
    models::{AliasMap, Project},
};

/// Drush site alias files: `<group>.site.yml`, one top-level mapping per alias.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlFormat;

impl AliasFormat for YamlFormat {
    fn file_name(&self, group: &str) -> String {
        format!("{group}.site.yml")
    }

    fn header(&self, project: &Project, key: &OwnershipKey) -> String {
        comment_banner("Drush site aliases", project, key)
    }

    fn serialize(&self, aliases: &AliasMap, key: &OwnershipKey) -> Result<String, FormatError> {
        Ok(serde_yaml::to_string(&encode(aliases, key))?)
    }

    fn parse(&self, text: &str, key: &OwnershipKey) -> Result<AliasMap, FormatError> {
        // A file holding only comments is an empty document.
        let document: Value = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_yaml::from_str(text)?
        };
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
        OwnershipKey::from_product_name("Platform.sh CLI")
    }

    #[test]
    fn test_serialize_layout() {
        let aliases: AliasMap = [
            ("_local".to_string(), AliasRecord::local("/src/_www")),
            (
                "main".to_string(),
                AliasRecord::remote("http://m.example", "ssh.example", "abc-main", "/app/web"),
            ),
        ]
        .into_iter()
        .collect();

        let text = YamlFormat.serialize(&aliases, &key()).unwrap();
        assert_eq!(
            text,
            "_local:\n  platformsh-cli-auto-remove: true\n  root: /src/_www\n\
             main:\n  host: ssh.example\n  platformsh-cli-auto-remove: true\n  root: /app/web\n  uri: http://m.example\n  user: abc-main\n"
        );
    }

    #[test]
    fn test_parse_user_file_with_comments_and_extras() {
        let text = "# my aliases\n\
                    prod:\n  host: example.com\n  user: deploy\n  options:\n    ssh: -p 2222\n\
                    main:\n  root: /app/web\n  platformsh-cli-auto-remove: true\n";

        let aliases = YamlFormat.parse(text, &key()).unwrap();
        let prod = aliases.get("prod").unwrap();
        assert!(!prod.managed);
        assert_eq!(prod.user.as_deref(), Some("deploy"));
        assert_eq!(prod.extra.get("options"), Some(&json!({ "ssh": "-p 2222" })));
        assert!(aliases.get("main").unwrap().managed);
    }

    #[test]
    fn test_parse_comment_only_file() {
        let aliases = YamlFormat.parse("# nothing yet\n", &key()).unwrap();
        assert!(aliases.is_empty());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(YamlFormat.parse("- just\n- a list\n", &key()).is_err());
        assert!(YamlFormat.parse("main: [unclosed\n", &key()).is_err());
    }

    #[test]
    fn test_parse_reads_back_serialized_extras() {
        let mut alias = AliasRecord::local("/src/_www");
        alias.extra.insert("paths".to_string(), json!({ "files": "sites/default/files" }));
        let aliases: AliasMap = [("_local".to_string(), alias)].into_iter().collect();

        let text = YamlFormat.serialize(&aliases, &key()).unwrap();
        assert_eq!(YamlFormat.parse(&text, &key()).unwrap(), aliases);
    }
}
