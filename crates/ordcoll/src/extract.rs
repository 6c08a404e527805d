//! Turning entries into named bindings.
//!
//! [`Collection::extract`] computes the variable bindings a scripting host
//! would create from the collection's entries and hands them back to the
//! caller, who decides what to do with them.

use serde::{Deserialize, Serialize};

use crate::collection::Collection;
use crate::value::Value;

/// How entry keys become binding names.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractMode {
    /// Keys that are valid names bind as-is; the rest are dropped.
    #[default]
    Overwrite,
    /// Every key, integers included, is bound as `prefix_key`.
    PrefixAll(String),
    /// Valid names bind as-is; integer keys and invalid names are bound as
    /// `prefix_key`.
    PrefixInvalid(String),
}

/// Whether `name` is a valid binding name: a letter, underscore or
/// non-ASCII byte, followed by any of those or digits. `this` is reserved.
pub fn is_valid_name(name: &str) -> bool {
    let mut bytes = name.bytes();
    let Some(first) = bytes.next() else {
        return false;
    };
    let starts = first.is_ascii_alphabetic() || first == b'_' || first >= 0x80;
    starts
        && bytes.all(|b| b.is_ascii_alphanumeric() || b == b'_' || b >= 0x80)
        && name != "this"
}

impl Collection {
    /// The `(name, value)` bindings for this collection's entries, in store
    /// order. Entries whose final name is not valid are left out.
    pub fn extract(&self, mode: &ExtractMode) -> Vec<(String, Value)> {
        self.iter()
            .filter_map(|(key, value)| {
                let name = match (mode, key.as_str()) {
                    (ExtractMode::Overwrite, Some(s)) => s.to_owned(),
                    (ExtractMode::Overwrite, None) => return None,
                    (ExtractMode::PrefixAll(prefix), _) => format!("{}_{}", prefix, key),
                    (ExtractMode::PrefixInvalid(_), Some(s)) if is_valid_name(s) => s.to_owned(),
                    (ExtractMode::PrefixInvalid(prefix), _) => format!("{}_{}", prefix, key),
                };
                is_valid_name(&name).then(|| (name, value.clone()))
            })
            .collect()
    }
}
