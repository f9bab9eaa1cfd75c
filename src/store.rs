//! The config store façade.
//!
//! One explicitly constructed instance owns the base document, the user
//! override document, their deep merge, and the cached warnings. There is no
//! global handle: the composition root builds a store from injected
//! collaborators and decides how to share it (typically behind a `Mutex`,
//! which together with `&mut self` on the mutating methods serializes
//! `set`/`reload` against concurrent reads — see the crate docs).
//!
//! Reads resolve against the effective document; writes go into the override
//! layer only, re-merge, and persist synchronously. Unknown paths never
//! error — lookup misses degrade to a `warn!` diagnostic and an absent
//! result. Only structural failures (missing base, malformed documents,
//! persist I/O) surface as [`ConfigError`].

use std::fmt;

use serde::Serialize;
use tracing::{debug, warn};

use crate::codec::{Codec, TomlCodec};
use crate::document::{Document, Value};
use crate::error::ConfigError;
use crate::keybindings::{self, Keybinding, KeybindingTarget};
use crate::loader::{LayerLoader, LayerPaths};
use crate::merge::deep_merge;
use crate::path::ConfigPath;
use crate::platform::{Platform, PlatformInfo};
use crate::warnings::{self, Warning};

/// Which layer a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Default,
    User,
}

/// Clones of both raw layers, attached to every [`DebugInfo`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerSnapshot {
    pub user: Document,
    pub default: Document,
}

/// Read-only snapshot of one path, for UI/audit introspection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DebugInfo {
    pub path: String,
    pub value: Option<Value>,
    pub source: Source,
    pub configs: LayerSnapshot,
}

/// The process-facing configuration handle.
pub struct ConfigStore<C: Codec = TomlCodec> {
    loader: LayerLoader<C>,
    platform: Platform,
    base: Document,
    user: Document,
    effective: Document,
    warnings: Vec<Warning>,
}

impl ConfigStore<TomlCodec> {
    /// Load both layers from the locations `info` resolves to.
    pub fn open(info: &PlatformInfo) -> Result<ConfigStore<TomlCodec>, ConfigError> {
        ConfigStore::with_codec(LayerPaths::resolve(info), info.platform, TomlCodec)
    }

    /// Load both layers from explicit file locations.
    pub fn with_paths(
        paths: LayerPaths,
        platform: Platform,
    ) -> Result<ConfigStore<TomlCodec>, ConfigError> {
        ConfigStore::with_codec(paths, platform, TomlCodec)
    }
}

impl<C: Codec> ConfigStore<C> {
    /// Load both layers through a custom codec.
    pub fn with_codec(
        paths: LayerPaths,
        platform: Platform,
        codec: C,
    ) -> Result<ConfigStore<C>, ConfigError> {
        let loader = LayerLoader::with_codec(paths, codec);
        let base = loader.load_base()?;
        let user = loader.load_override()?;
        let warnings = warnings::detect(&base, &user);
        let effective = deep_merge(base.clone(), user.clone());
        debug!(warnings = warnings.len(), "config layers loaded");
        Ok(ConfigStore {
            loader,
            platform,
            base,
            user,
            effective,
            warnings,
        })
    }

    /// True iff `path` has been explicitly overridden by the user layer.
    /// Presence of an ancestor section alone does not count.
    pub fn has(&self, path: &str) -> bool {
        parse_path(path).is_some_and(|p| self.user.contains(&p))
    }

    /// Look up `path` in the effective document. A miss logs a diagnostic
    /// and returns `None`; it is never an error.
    pub fn get(&self, path: &str) -> Option<&Value> {
        let parsed = parse_path(path)?;
        let value = self.effective.get(&parsed);
        if value.is_none() {
            warn!(%path, "config key not found");
        }
        value
    }

    /// Write `value` into the override layer, re-merge, and persist.
    ///
    /// The value is coerced to the codec's storable scalar form. Setting a
    /// path with no existing override logs a diagnostic but writes anyway —
    /// the warning detector is advisory, not a schema validator. A persist
    /// failure propagates; in-memory layers are already updated at that
    /// point, and the error says so.
    pub fn set(&mut self, path: &str, value: impl fmt::Display) -> Result<(), ConfigError> {
        let parsed: ConfigPath = path.parse()?;
        if !self.user.contains(&parsed) {
            warn!(%path, "key not found in overrides, writing anyway");
        }
        let scalar = self.loader.codec().sanitize(&value.to_string());
        self.user.set(&parsed, Value::Scalar(scalar));
        self.effective = deep_merge(self.base.clone(), self.user.clone());
        self.loader.persist_override(&self.user)
    }

    /// Snapshot one path: effective value, attribution, and both raw layers.
    pub fn debug(&self, path: &str) -> DebugInfo {
        DebugInfo {
            path: path.to_string(),
            value: self.get(path).cloned(),
            source: if self.has(path) {
                Source::User
            } else {
                Source::Default
            },
            configs: LayerSnapshot {
                user: self.user.clone(),
                default: self.base.clone(),
            },
        }
    }

    /// One [`DebugInfo`] per leaf of the effective document, in traversal
    /// order.
    pub fn debug_all(&self) -> Vec<DebugInfo> {
        self.effective
            .leaf_paths()
            .iter()
            .map(|path| self.debug(&path.to_string()))
            .collect()
    }

    /// The warnings computed at the last load or reload.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Resolve a keybinding under `keybindings.<path>` for `target`.
    pub fn keybindings(
        &self,
        target: KeybindingTarget,
        path: &str,
    ) -> Result<Keybinding, ConfigError> {
        keybindings::resolve(&self.effective, self.platform, target, path)
    }

    /// Re-run both layer loads, the merge, and the warning detector.
    ///
    /// Loads into temporaries first: a failed reload (missing base, malformed
    /// file) leaves the previous documents intact.
    pub fn reload(&mut self) -> Result<(), ConfigError> {
        let base = self.loader.load_base()?;
        let user = self.loader.load_override()?;
        self.warnings = warnings::detect(&base, &user);
        self.effective = deep_merge(base.clone(), user.clone());
        self.base = base;
        self.user = user;
        debug!("config layers reloaded");
        Ok(())
    }

    /// The file locations both layers load from.
    pub fn paths(&self) -> &LayerPaths {
        self.loader.paths()
    }

    /// The effective (merged) document.
    pub fn effective(&self) -> &Document {
        &self.effective
    }
}

/// Parse a dotted path, degrading syntax errors to a logged miss.
fn parse_path(path: &str) -> Option<ConfigPath> {
    match path.parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            warn!(%path, "invalid config path");
            None
        }
    }
}
