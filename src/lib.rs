//! Two-layer configuration for desktop applications: shipped defaults plus
//! user overrides, with per-key attribution, staleness warnings, and live
//! reload.
//!
//! ```ignore
//! let info = PlatformInfo::detect("myapp", Mode::Packaged).unwrap();
//! let mut config = ConfigStore::open(&info)?;
//!
//! config.get("db.host");                 // reads the merged view
//! config.set("db.host", "remote")?;      // writes the override layer, persists
//! ```
//!
//! # The two layers
//!
//! Layerfig manages exactly two documents with different trust levels:
//!
//! - The **base** layer (`default.config.toml`) ships with the application
//!   and defines the full schema. It must exist — loading fails with
//!   [`ConfigError::BaseMissing`] otherwise — and this crate never rewrites
//!   it.
//! - The **override** layer (`user.config.toml`, or `local.config.toml` in
//!   development) is optional, sparse, and user-edited. A missing file is an
//!   empty layer; a *malformed* file is a surfaced parse error, because
//!   silently treating a user's broken edits as "no overrides" would discard
//!   their intent.
//!
//! Every read resolves against their deep merge: override leaves replace
//! base leaves, override sections merge recursively, and list values replace
//! wholesale rather than concatenating. The merged view is recomputed from
//! the two layers after every mutation — it is never itself the system of
//! record.
//!
//! # Attribution
//!
//! For any path, [`ConfigStore::debug`] reports whether the resolved value
//! came from the `default` or `user` layer. The rule is exact-path presence
//! in the override document: overriding `db.host` does not mark `db.port` as
//! user-set just because both live under `[db]`. `has` answers the same
//! question as a plain bool, and `debug_all` snapshots every leaf of the
//! merged view for a settings UI or support dump.
//!
//! # Warnings, not validation
//!
//! After each load the override layer is diffed against the base schema:
//! unknown sections and unknown keys produce [`Warning`]s — a best-effort
//! typo and staleness signal. Warnings never block anything; `set` on an
//! unknown path logs and writes anyway. The schema is advisory here by
//! design choice of the host application, not a validator.
//!
//! # Documents and paths
//!
//! Parsed config is a tree of tagged values — scalar string, ordered string
//! list, or nested section — fixed at parse time by the [`Codec`], so
//! nothing downstream probes raw parser output. Addressing is by dotted
//! [`ConfigPath`] (`"keybindings.save"`); lookups on absent paths are silent
//! `None`s, and only the store façade logs a diagnostic.
//!
//! The on-disk syntax is opaque behind the [`Codec`] trait. The shipped
//! [`TomlCodec`] parses TOML and renders override writes through `toml_edit`,
//! so comments and formatting a user added by hand survive every `set`.
//!
//! # Keybindings
//!
//! [`ConfigStore::keybindings`] resolves an entry under the `keybindings`
//! section and translates each `+`-separated chord for a consumer target —
//! `electron` accelerator casing or lowercase `v-hotkey` — resolving the
//! `ctrlorcmd` pseudo-modifier per platform. List-valued bindings translate
//! entry by entry, preserving order.
//!
//! # Watching and reload
//!
//! [`OverrideWatcher`] observes the override file for external edits and
//! delivers debounced [`ChangeEvent`]s on a channel. The watcher never
//! touches the documents itself: whoever owns the store drains the channel
//! and calls [`ConfigStore::reload`], which re-reads both layers into
//! temporaries and swaps them in only on success.
//!
//! # Concurrency
//!
//! The store has no internal locking. Mutating operations take `&mut self`,
//! so the borrow checker already serializes them on a single owner; a
//! process-wide handle is a store behind a `Mutex` at the composition root.
//! Tests construct isolated instances against temp directories instead of
//! sharing global state.
//!
//! # Error policy
//!
//! Structural failures are errors: missing base file, malformed documents,
//! and persist I/O failures (which also mean the in-memory override and the
//! file on disk now disagree — the caller of `set` decides whether to retry
//! or alert). Lookup-time absences are not errors anywhere: `get`, `has`,
//! and `debug` degrade to logged diagnostics, and keybinding misses return
//! [`ConfigError::UnresolvedKeybinding`] rather than panicking. See
//! [`error`] for the full set.

pub mod error;

mod codec;
mod document;
mod keybindings;
mod loader;
mod merge;
mod path;
mod persist;
mod platform;
mod store;
mod warnings;
mod watch;

pub use codec::{Codec, TomlCodec};
pub use document::{Document, Value};
pub use error::ConfigError;
pub use keybindings::{Keybinding, KeybindingTarget};
pub use loader::{LayerLoader, LayerPaths};
pub use path::ConfigPath;
pub use platform::{Mode, Platform, PlatformInfo};
pub use store::{ConfigStore, DebugInfo, LayerSnapshot, Source};
pub use warnings::Warning;
pub use watch::{ChangeEvent, OverrideWatcher};
