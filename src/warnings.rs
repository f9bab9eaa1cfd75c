//! Stale/typo detection for the override layer.
//!
//! [`detect`] diffs the override document's entries against the base schema
//! and reports every override entry with no base counterpart. The check is
//! shallow — section names, then keys within shared sections — and purely
//! advisory: it never blocks loading or mutation. Like the merge, it is a
//! pure function over pre-loaded documents, so tests feed it synthetic input.

use serde::Serialize;

use crate::document::{Document, Value};

/// An override entry with no counterpart in the base schema.
///
/// Serializes as `{"type": "section" | "key", "key": <name or path>}` for
/// display in a UI or CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "key", rename_all = "lowercase")]
pub enum Warning {
    /// A whole top-level section unknown to the base schema. Its keys are
    /// not inspected further.
    Section(String),
    /// A single key unknown within a known section, as `"section.key"`,
    /// or an unknown top-level leaf.
    Key(String),
}

/// Diff `overrides` against `base`, two levels deep.
pub fn detect(base: &Document, overrides: &Document) -> Vec<Warning> {
    let mut warnings = Vec::new();

    for (name, value) in overrides.iter() {
        let Some(base_entry) = base.entry(name) else {
            match value {
                Value::Section(_) => warnings.push(Warning::Section(name.clone())),
                _ => warnings.push(Warning::Key(name.clone())),
            }
            continue;
        };

        if let Value::Section(section) = value {
            let base_section = base_entry.as_section();
            for (key, _) in section.iter() {
                if base_section.is_none_or(|base| base.entry(key).is_none()) {
                    warnings.push(Warning::Key(format!("{name}.{key}")));
                }
            }
        }
    }

    warnings
}
