//! Loading and persisting the two config layers.
//!
//! The base layer is required — a missing file is fatal because the schema is
//! undefined without it. The override layer is optional — a missing file is an
//! empty document, but a *malformed* one is a surfaced parse error, never
//! silently downgraded to empty. Persisting writes the override layer only;
//! the base file is never rewritten by this crate.

use std::path::PathBuf;

use tracing::debug;

use crate::codec::{Codec, TomlCodec};
use crate::document::Document;
use crate::error::ConfigError;
use crate::platform::PlatformInfo;

/// Concrete locations of the two layer files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerPaths {
    /// The required base (default) config file.
    pub base: PathBuf,
    /// The optional user override file.
    pub user: PathBuf,
}

impl LayerPaths {
    /// Resolve layer locations from injected platform facts.
    pub fn resolve(info: &PlatformInfo) -> LayerPaths {
        LayerPaths {
            base: info.base_path(),
            user: info.override_path(),
        }
    }
}

/// Reads, parses, and writes the layer files through a [`Codec`].
pub struct LayerLoader<C: Codec = TomlCodec> {
    paths: LayerPaths,
    codec: C,
}

impl LayerLoader<TomlCodec> {
    pub fn new(paths: LayerPaths) -> LayerLoader<TomlCodec> {
        LayerLoader::with_codec(paths, TomlCodec)
    }
}

impl<C: Codec> LayerLoader<C> {
    pub fn with_codec(paths: LayerPaths, codec: C) -> LayerLoader<C> {
        LayerLoader { paths, codec }
    }

    pub fn paths(&self) -> &LayerPaths {
        &self.paths
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Load the base layer. Its absence is fatal.
    pub fn load_base(&self) -> Result<Document, ConfigError> {
        debug!(path = %self.paths.base.display(), "reading base config");
        match std::fs::read_to_string(&self.paths.base) {
            Ok(text) => self.codec.parse(&text, &self.paths.base),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(ConfigError::BaseMissing {
                path: self.paths.base.clone(),
            }),
            Err(e) => Err(ConfigError::Io {
                path: self.paths.base.clone(),
                source: e,
            }),
        }
    }

    /// Load the override layer. Absence yields an empty document; malformed
    /// content propagates as a parse error.
    pub fn load_override(&self) -> Result<Document, ConfigError> {
        debug!(path = %self.paths.user.display(), "reading override config");
        match std::fs::read_to_string(&self.paths.user) {
            Ok(text) => self.codec.parse(&text, &self.paths.user),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Document::new()),
            Err(e) => Err(ConfigError::Io {
                path: self.paths.user.clone(),
                source: e,
            }),
        }
    }

    /// Render and write the override document to its file, creating parent
    /// directories as needed. Failures propagate so the caller of `set` knows
    /// memory and disk now disagree.
    pub fn persist_override(&self, doc: &Document) -> Result<(), ConfigError> {
        let existing = match std::fs::read_to_string(&self.paths.user) {
            Ok(text) => Some(text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                return Err(ConfigError::Io {
                    path: self.paths.user.clone(),
                    source: e,
                });
            }
        };

        let content = self.codec.render(existing.as_deref(), doc, &self.paths.user)?;

        if let Some(parent) = self.paths.user.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Persist {
                path: self.paths.user.clone(),
                source: e,
            })?;
        }

        std::fs::write(&self.paths.user, &content).map_err(|e| ConfigError::Persist {
            path: self.paths.user.clone(),
            source: e,
        })?;
        debug!(path = %self.paths.user.display(), "wrote override config");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn loader_in(dir: &TempDir) -> LayerLoader {
        LayerLoader::new(LayerPaths {
            base: dir.path().join("default.config.toml"),
            user: dir.path().join("user.config.toml"),
        })
    }

    #[test]
    fn missing_base_is_fatal() {
        let dir = TempDir::new().unwrap();
        let result = loader_in(&dir).load_base();
        assert!(matches!(result, Err(ConfigError::BaseMissing { .. })));
    }

    #[test]
    fn base_loads_and_parses() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("default.config.toml"),
            "[db]\nhost = \"x\"\n",
        )
        .unwrap();
        let base = loader_in(&dir).load_base().unwrap();
        assert_eq!(
            base.get(&"db.host".parse().unwrap()).unwrap().as_scalar(),
            Some("x")
        );
    }

    #[test]
    fn malformed_base_is_parse_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("default.config.toml"), "not == toml").unwrap();
        let result = loader_in(&dir).load_base();
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn missing_override_is_empty_document() {
        let dir = TempDir::new().unwrap();
        let overrides = loader_in(&dir).load_override().unwrap();
        assert!(overrides.is_empty());
    }

    #[test]
    fn malformed_override_is_parse_error_not_empty() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("user.config.toml"), "not == toml").unwrap();
        let result = loader_in(&dir).load_override();
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn persist_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let loader = loader_in(&dir);

        let mut doc = Document::new();
        doc.set(&"db.port".parse().unwrap(), crate::document::Value::scalar("9"));
        loader.persist_override(&doc).unwrap();

        let reloaded = loader.load_override().unwrap();
        assert_eq!(reloaded, doc);
    }

    #[test]
    fn persist_keeps_hand_written_comments() {
        let dir = TempDir::new().unwrap();
        let loader = loader_in(&dir);
        fs::write(
            dir.path().join("user.config.toml"),
            "# tuned for my laptop\ntheme = \"light\"\n",
        )
        .unwrap();

        let mut doc = loader.load_override().unwrap();
        doc.set(
            &"theme".parse().unwrap(),
            crate::document::Value::scalar("dark"),
        );
        loader.persist_override(&doc).unwrap();

        let text = fs::read_to_string(dir.path().join("user.config.toml")).unwrap();
        assert!(text.contains("# tuned for my laptop"));
        assert!(text.contains("theme = \"dark\""));
    }

    #[test]
    fn persist_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let loader = LayerLoader::new(LayerPaths {
            base: dir.path().join("default.config.toml"),
            user: dir.path().join("sub").join("dir").join("user.config.toml"),
        });
        loader.persist_override(&Document::new()).unwrap();
        assert!(dir.path().join("sub").join("dir").join("user.config.toml").exists());
    }
}
