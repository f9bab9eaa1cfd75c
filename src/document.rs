//! The in-memory document tree and its structured-path accessor.
//!
//! A [`Document`] is an ordered mapping from entry name to [`Value`], where a
//! value is a scalar string, an ordered list of strings, or a nested section.
//! The variant is fixed at parse time by the codec, so nothing downstream ever
//! probes "is this an array" against raw parser output.
//!
//! Lookup and mutation go through [`ConfigPath`]s. `get`/`contains` are silent
//! on unknown paths — absent is a valid outcome, and only the store façade
//! turns it into a diagnostic. `set` creates intermediate sections as needed.

use std::collections::BTreeMap;
use std::collections::btree_map;

use serde::Serialize;

use crate::path::ConfigPath;

/// A single entry in a config document, tagged at parse time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// A scalar, always stored in string form.
    Scalar(String),
    /// An ordered list of scalar strings.
    List(Vec<String>),
    /// A nested section.
    Section(Document),
}

impl Value {
    pub fn scalar(s: impl Into<String>) -> Value {
        Value::Scalar(s.into())
    }

    pub fn list<I, S>(items: I) -> Value
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Value::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_section(&self) -> Option<&Document> {
        match self {
            Value::Section(doc) => Some(doc),
            _ => None,
        }
    }

    /// True for scalars and lists — the values `debug_all` enumerates.
    pub fn is_leaf(&self) -> bool {
        !matches!(self, Value::Section(_))
    }
}

/// An ordered name → value mapping. Traversal order is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Document {
    entries: BTreeMap<String, Value>,
}

impl Document {
    pub fn new() -> Document {
        Document::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Top-level entries in traversal order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, Value> {
        self.entries.iter()
    }

    /// Look up a top-level entry by name.
    pub fn entry(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    /// Insert a top-level entry, replacing any existing one.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.entries.insert(name.into(), value);
    }

    pub(crate) fn remove_entry(&mut self, name: &str) -> Option<Value> {
        self.entries.remove(name)
    }

    pub(crate) fn into_entries(self) -> btree_map::IntoIter<String, Value> {
        self.entries.into_iter()
    }

    /// Resolve `path` to a value, or `None` if any segment is absent or
    /// crosses a non-section. Never errors: absent is a valid outcome.
    pub fn get(&self, path: &ConfigPath) -> Option<&Value> {
        let (leaf, sections) = path.segments().split_last()?;
        let mut current = self;
        for segment in sections {
            current = current.entries.get(segment)?.as_section()?;
        }
        current.entries.get(leaf)
    }

    /// True iff `path` resolves to a present value.
    pub fn contains(&self, path: &ConfigPath) -> bool {
        self.get(path).is_some()
    }

    /// Write `value` at `path`, creating intermediate sections as needed.
    /// A non-section value standing where a section is required is replaced.
    pub fn set(&mut self, path: &ConfigPath, value: Value) {
        let Some((leaf, sections)) = path.segments().split_last() else {
            return;
        };
        let mut current = self;
        for segment in sections {
            let entry = current
                .entries
                .entry(segment.clone())
                .or_insert_with(|| Value::Section(Document::new()));
            if !matches!(entry, Value::Section(_)) {
                *entry = Value::Section(Document::new());
            }
            let Value::Section(section) = entry else {
                unreachable!()
            };
            current = section;
        }
        current.entries.insert(leaf.clone(), value);
    }

    /// Every scalar/list leaf in the document, in traversal order — sections
    /// are descended into as encountered.
    pub fn leaf_paths(&self) -> Vec<ConfigPath> {
        let mut paths = Vec::new();
        for (name, value) in &self.entries {
            collect_leaves(value, ConfigPath::root(name), &mut paths);
        }
        paths
    }
}

fn collect_leaves(value: &Value, path: ConfigPath, out: &mut Vec<ConfigPath>) {
    match value {
        Value::Scalar(_) | Value::List(_) => out.push(path),
        Value::Section(doc) => {
            for (name, nested) in doc.iter() {
                collect_leaves(nested, path.child(name), out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(s: &str) -> ConfigPath {
        s.parse().unwrap()
    }

    fn sample() -> Document {
        let mut db = Document::new();
        db.insert("host", Value::scalar("localhost"));
        db.insert("port", Value::scalar("5432"));

        let mut doc = Document::new();
        doc.insert("theme", Value::scalar("dark"));
        doc.insert("db", Value::Section(db));
        doc
    }

    #[test]
    fn get_flat_entry() {
        let doc = sample();
        assert_eq!(doc.get(&path("theme")).unwrap().as_scalar(), Some("dark"));
    }

    #[test]
    fn get_nested_entry() {
        let doc = sample();
        assert_eq!(
            doc.get(&path("db.host")).unwrap().as_scalar(),
            Some("localhost")
        );
    }

    #[test]
    fn get_section_returns_section() {
        let doc = sample();
        assert!(doc.get(&path("db")).unwrap().as_section().is_some());
    }

    #[test]
    fn get_absent_is_none_not_error() {
        let doc = sample();
        assert!(doc.get(&path("nope")).is_none());
        assert!(doc.get(&path("db.nope")).is_none());
        assert!(doc.get(&path("nope.deeper")).is_none());
    }

    #[test]
    fn get_through_scalar_is_none() {
        let doc = sample();
        // "theme" is a scalar, so "theme.x" cannot resolve.
        assert!(doc.get(&path("theme.x")).is_none());
    }

    #[test]
    fn empty_scalar_is_present_not_absent() {
        let mut doc = Document::new();
        doc.insert("blank", Value::scalar(""));
        assert!(doc.contains(&path("blank")));
        assert_eq!(doc.get(&path("blank")).unwrap().as_scalar(), Some(""));
    }

    #[test]
    fn set_creates_intermediate_sections() {
        let mut doc = Document::new();
        doc.set(&path("a.b.c"), Value::scalar("1"));
        assert_eq!(doc.get(&path("a.b.c")).unwrap().as_scalar(), Some("1"));
        assert!(doc.get(&path("a.b")).unwrap().as_section().is_some());
    }

    #[test]
    fn set_replaces_existing_leaf() {
        let mut doc = sample();
        doc.set(&path("db.host"), Value::scalar("remote"));
        assert_eq!(
            doc.get(&path("db.host")).unwrap().as_scalar(),
            Some("remote")
        );
    }

    #[test]
    fn set_through_scalar_replaces_it_with_section() {
        let mut doc = sample();
        doc.set(&path("theme.variant"), Value::scalar("high-contrast"));
        assert_eq!(
            doc.get(&path("theme.variant")).unwrap().as_scalar(),
            Some("high-contrast")
        );
    }

    #[test]
    fn leaf_paths_enumerates_every_leaf_once() {
        let doc = sample();
        let paths: Vec<String> = doc.leaf_paths().iter().map(|p| p.to_string()).collect();
        assert_eq!(paths, ["db.host", "db.port", "theme"]);
    }

    #[test]
    fn leaf_paths_includes_lists() {
        let mut doc = sample();
        doc.set(
            &path("keybindings.save"),
            Value::list(["ctrlorcmd+s"]),
        );
        let paths: Vec<String> = doc.leaf_paths().iter().map(|p| p.to_string()).collect();
        assert!(paths.contains(&"keybindings.save".to_string()));
    }

    #[test]
    fn serializes_untagged() {
        let mut doc = Document::new();
        doc.insert("name", Value::scalar("x"));
        doc.insert("keys", Value::list(["a", "b"]));
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["name"], "x");
        assert_eq!(json["keys"][1], "b");
    }
}
