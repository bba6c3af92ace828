//! # Merge Engine
//!
//! Folds freshly generated aliases over the ones already on disk. For an alias present
//! on both sides the existing record is the base: generator-controlled fields are
//! refreshed, anything a human added survives.
//!
//! The result contains exactly the generated names. Carrying over user-defined aliases
//! that were not regenerated is the store's job, so that a stale managed alias is never
//! confused with a user alias.

use serde_json::Value;

use crate::models::{AliasFields, AliasMap, AliasRecord};

/// Merges `generated` over `existing`. See the module docs for the rules.
pub fn merge(generated: AliasMap, existing: &AliasMap) -> AliasMap {
    generated
        .into_iter()
        .map(|(name, fresh)| {
            let merged = match existing.get(&name) {
                Some(base) => merge_record(base.clone(), fresh),
                None => fresh,
            };
            (name, merged)
        })
        .collect()
}

/// Overlays `fresh` on `base`, field by field.
fn merge_record(mut base: AliasRecord, fresh: AliasRecord) -> AliasRecord {
    let AliasRecord {
        root,
        uri,
        host,
        user,
        managed,
        extra,
    } = fresh;

    overlay_field(&mut base.root, root);
    overlay_field(&mut base.uri, uri);
    overlay_field(&mut base.host, host);
    overlay_field(&mut base.user, user);
    base.managed |= managed;

    // A typed value replaces whatever the file held under the same name.
    let typed: Vec<&'static str> = base
        .typed_fields()
        .iter()
        .filter(|(_, value)| value.is_some())
        .map(|(name, _)| *name)
        .collect();
    for name in typed {
        base.extra.remove(name);
    }

    merge_fields(&mut base.extra, extra);
    base
}

fn overlay_field(base: &mut Option<String>, fresh: Option<String>) {
    if fresh.is_some() {
        *base = fresh;
    }
}

/// Recursively merges `overlay` into `base`. Nested maps are merged key by key;
/// any other value in `overlay` replaces the one in `base`.
pub fn merge_fields(base: &mut AliasFields, overlay: AliasFields) {
    for (key, value) in overlay {
        match value {
            Value::Object(overlay_map) => {
                if let Some(Value::Object(base_map)) = base.get_mut(&key) {
                    merge_fields(base_map, overlay_map);
                } else {
                    base.insert(key, Value::Object(overlay_map));
                }
            }
            value => {
                base.insert(key, value);
            }
        }
    }
}
