//! # Ownership Tracking
//!
//! Every alias the generator produces is stamped with a boolean marker stored under the
//! [`OwnershipKey`]. The key is derived from the configured product name, so differently
//! branded builds can share an alias directory without mistaking each other's aliases
//! for their own.
//!
//! Aliases without a truthy marker are user-authored: they are kept verbatim across
//! syncs. Managed aliases that are not regenerated are dropped, which is how aliases of
//! deleted environments disappear.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;
use std::fmt;

use crate::{constants::OWNERSHIP_KEY_SUFFIX, models::AliasMap};

lazy_static! {
    static ref NON_KEY_CHARS: Regex = Regex::new(r"[^a-z-]+").expect("static regex is valid");
}

/// The field name under which the ownership marker is stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OwnershipKey(String);

impl OwnershipKey {
    /// Derives the key from a product name.
    ///
    /// The name is lower-cased, dots are removed, every run of characters outside
    /// `[a-z-]` becomes a single `-`, and `-auto-remove` is appended:
    /// `"Platform.sh CLI"` becomes `"platformsh-cli-auto-remove"`.
    pub fn from_product_name(product_name: &str) -> Self {
        let lowered = product_name.to_lowercase().replace('.', "");
        let normalized = NON_KEY_CHARS.replace_all(&lowered, "-");
        Self(format!("{normalized}{OWNERSHIP_KEY_SUFFIX}"))
    }

    /// The key as it appears in alias files.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OwnershipKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether a marker value read from disk counts as set.
///
/// `true`, non-zero numbers and non-empty strings other than `"0"` are set;
/// `false`, `null`, zero, `""`, `"0"` and empty collections are not.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty() && s != "0",
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Splits existing aliases into `(managed, user_defined)`.
pub fn partition(existing: AliasMap) -> (AliasMap, AliasMap) {
    existing.into_iter().partition(|(_, alias)| alias.managed)
}
