//! Comment-preserving render of the override document.
//!
//! Uses `toml_edit` to patch the override file's existing text instead of
//! serializing from scratch, so comments and formatting the user added by
//! hand survive every `set`. When the file doesn't exist yet, patching an
//! empty document produces a fresh file.

use std::path::Path;

use crate::document::{Document, Value};
use crate::error::ConfigError;

/// Pure function: patch `content` (the file's current text, if any) so that
/// every entry of `doc` is present with its current value. Entries the text
/// already has keep their surrounding comments and formatting.
pub fn patch(content: Option<&str>, doc: &Document, file: &Path) -> Result<String, ConfigError> {
    let mut out: toml_edit::DocumentMut = content.unwrap_or_default().parse().map_err(
        |e: toml_edit::TomlError| ConfigError::Render {
            path: file.to_path_buf(),
            reason: e.to_string(),
        },
    )?;

    patch_item(out.as_item_mut(), doc);
    Ok(out.to_string())
}

fn patch_item(item: &mut toml_edit::Item, doc: &Document) {
    for (name, value) in doc.iter() {
        let name = name.as_str();
        match value {
            Value::Scalar(s) => {
                item[name] = toml_edit::value(s.as_str());
            }
            Value::List(entries) => {
                let mut array = toml_edit::Array::new();
                for entry in entries {
                    array.push(entry.as_str());
                }
                item[name] = toml_edit::value(array);
            }
            Value::Section(section) => {
                if !item.get(name).is_some_and(toml_edit::Item::is_table_like) {
                    item[name] = toml_edit::Item::Table(toml_edit::Table::new());
                }
                patch_item(&mut item[name], section);
            }
        }
    }
}
