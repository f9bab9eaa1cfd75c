//! The document codec: an opaque parse/serialize collaborator.
//!
//! The rest of the crate never touches the on-disk syntax. Loaders hand text
//! to a [`Codec`] and get a [`Document`] of tagged values back; persistence
//! hands a document over and gets text. The shipped implementation is TOML,
//! with a comment-preserving [`render`](Codec::render) built on `toml_edit`.

use std::path::Path;

use crate::document::{Document, Value};
use crate::error::ConfigError;
use crate::persist;

/// Parse/serialize capability for one on-disk config format.
pub trait Codec {
    /// Parse `text` into a document. `file` is only used for error reporting.
    fn parse(&self, text: &str, file: &Path) -> Result<Document, ConfigError>;

    /// Serialize a document from scratch.
    fn serialize(&self, doc: &Document) -> Result<String, ConfigError>;

    /// Render `doc` for writing, given the file's current text.
    ///
    /// The default implementation ignores `existing` and serializes from
    /// scratch. Implementations may instead patch the existing text so user
    /// comments and formatting survive a write.
    fn render(
        &self,
        existing: Option<&str>,
        doc: &Document,
        file: &Path,
    ) -> Result<String, ConfigError> {
        let _ = (existing, file);
        self.serialize(doc)
    }

    /// Coerce a raw value into the override layer's storable scalar form.
    ///
    /// The default strips control characters; scalars are single-line strings.
    fn sanitize(&self, raw: &str) -> String {
        raw.chars().filter(|c| !c.is_control()).collect()
    }
}

/// The shipped TOML codec.
///
/// Scalars of any TOML type are stringified at parse time, so the document
/// tree carries string leaves only. Arrays become string lists; nested tables
/// become sections.
#[derive(Debug, Clone, Copy, Default)]
pub struct TomlCodec;

impl Codec for TomlCodec {
    fn parse(&self, text: &str, file: &Path) -> Result<Document, ConfigError> {
        let table: toml::Table = text.parse().map_err(|e| ConfigError::Parse {
            path: file.to_path_buf(),
            source: e,
        })?;
        Ok(from_table(table))
    }

    fn serialize(&self, doc: &Document) -> Result<String, ConfigError> {
        let table = to_table(doc);
        toml::to_string(&table).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    fn render(
        &self,
        existing: Option<&str>,
        doc: &Document,
        file: &Path,
    ) -> Result<String, ConfigError> {
        persist::patch(existing, doc, file)
    }
}

fn from_table(table: toml::Table) -> Document {
    let mut doc = Document::new();
    for (name, value) in table {
        doc.insert(name, from_value(value));
    }
    doc
}

fn from_value(value: toml::Value) -> Value {
    match value {
        toml::Value::Table(table) => Value::Section(from_table(table)),
        toml::Value::Array(items) => Value::List(items.into_iter().map(stringify).collect()),
        other => Value::Scalar(stringify(other)),
    }
}

/// String form of a TOML scalar. Quoted strings lose their quotes; everything
/// else keeps its literal TOML spelling.
fn stringify(value: toml::Value) -> String {
    match value {
        toml::Value::String(s) => s,
        other => other.to_string(),
    }
}

fn to_table(doc: &Document) -> toml::Table {
    let mut table = toml::Table::new();
    for (name, value) in doc.iter() {
        let converted = match value {
            Value::Scalar(s) => toml::Value::String(s.clone()),
            Value::List(items) => toml::Value::Array(
                items
                    .iter()
                    .map(|s| toml::Value::String(s.clone()))
                    .collect(),
            ),
            Value::Section(section) => toml::Value::Table(to_table(section)),
        };
        table.insert(name.clone(), converted);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn file() -> PathBuf {
        PathBuf::from("/test/config.toml")
    }

    #[test]
    fn parses_string_scalars() {
        let doc = TomlCodec.parse("theme = \"dark\"\n", &file()).unwrap();
        assert_eq!(doc.entry("theme").unwrap().as_scalar(), Some("dark"));
    }

    #[test]
    fn stringifies_non_string_scalars() {
        let doc = TomlCodec
            .parse("port = 5432\nverbose = true\nratio = 1.5\n", &file())
            .unwrap();
        assert_eq!(doc.entry("port").unwrap().as_scalar(), Some("5432"));
        assert_eq!(doc.entry("verbose").unwrap().as_scalar(), Some("true"));
        assert_eq!(doc.entry("ratio").unwrap().as_scalar(), Some("1.5"));
    }

    #[test]
    fn parses_arrays_as_lists() {
        let doc = TomlCodec
            .parse("[keybindings]\nsave = [\"ctrl+s\", \"f2\"]\n", &file())
            .unwrap();
        let section = doc.entry("keybindings").unwrap().as_section().unwrap();
        assert_eq!(
            section.entry("save").unwrap().as_list().unwrap(),
            ["ctrl+s", "f2"]
        );
    }

    #[test]
    fn parses_nested_tables_as_sections() {
        let doc = TomlCodec
            .parse("[db]\nhost = \"x\"\n[db.pool]\nsize = 5\n", &file())
            .unwrap();
        let db = doc.entry("db").unwrap().as_section().unwrap();
        let pool = db.entry("pool").unwrap().as_section().unwrap();
        assert_eq!(pool.entry("size").unwrap().as_scalar(), Some("5"));
    }

    #[test]
    fn malformed_text_is_parse_error() {
        let result = TomlCodec.parse("not == toml", &file());
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn serialize_then_parse_round_trips() {
        let text = "theme = \"dark\"\n\n[keybindings]\nsave = [\"ctrl+s\"]\n";
        let doc = TomlCodec.parse(text, &file()).unwrap();
        let out = TomlCodec.serialize(&doc).unwrap();
        let reparsed = TomlCodec.parse(&out, &file()).unwrap();
        assert_eq!(doc, reparsed);
    }

    #[test]
    fn sanitize_strips_control_characters() {
        assert_eq!(TomlCodec.sanitize("a\nb\tc"), "abc");
        assert_eq!(TomlCodec.sanitize("plain"), "plain");
    }

    #[test]
    fn default_render_falls_back_to_serialize() {
        struct Plain;
        impl Codec for Plain {
            fn parse(&self, _: &str, _: &Path) -> Result<Document, ConfigError> {
                Ok(Document::new())
            }
            fn serialize(&self, _: &Document) -> Result<String, ConfigError> {
                Ok("fresh".into())
            }
        }
        let out = Plain
            .render(Some("# old comment"), &Document::new(), &file())
            .unwrap();
        assert_eq!(out, "fresh");
    }
}
