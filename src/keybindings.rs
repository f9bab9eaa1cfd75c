//! Keybinding lookup and target-specific translation.
//!
//! Raw bindings live under the `keybindings` section of the effective
//! document as `+`-separated chords, e.g. `ctrlorcmd+shift+s`. The
//! pseudo-modifier `ctrlorcmd` resolves per platform before encoding, and
//! each consumer target gets its own output syntax:
//!
//! - `electron` — accelerator casing, `Cmd+Shift+S`
//! - `v-hotkey` — lowercase with `meta` for the command key, `meta+shift+s`
//!
//! A list-valued binding translates entry by entry, preserving order.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::document::{Document, Value};
use crate::error::ConfigError;
use crate::path::ConfigPath;
use crate::platform::Platform;

/// Output encoding for a resolved keybinding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeybindingTarget {
    Electron,
    VHotkey,
}

impl FromStr for KeybindingTarget {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "electron" => Ok(KeybindingTarget::Electron),
            "v-hotkey" => Ok(KeybindingTarget::VHotkey),
            other => Err(ConfigError::UnknownTarget {
                target: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for KeybindingTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeybindingTarget::Electron => write!(f, "electron"),
            KeybindingTarget::VHotkey => write!(f, "v-hotkey"),
        }
    }
}

/// A keybinding translated for one target: one chord or an ordered list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Keybinding {
    Single(String),
    List(Vec<String>),
}

/// Resolve `keybindings.<path>` in `effective` and translate it for `target`.
pub fn resolve(
    effective: &Document,
    platform: Platform,
    target: KeybindingTarget,
    path: &str,
) -> Result<Keybinding, ConfigError> {
    let full = format!("keybindings.{path}");
    let parsed: ConfigPath = full.parse().map_err(|_| ConfigError::UnresolvedKeybinding {
        path: full.clone(),
    })?;

    match effective.get(&parsed) {
        Some(Value::Scalar(raw)) => Ok(Keybinding::Single(convert(target, raw, platform))),
        Some(Value::List(entries)) => Ok(Keybinding::List(
            entries
                .iter()
                .map(|raw| convert(target, raw, platform))
                .collect(),
        )),
        Some(Value::Section(_)) | None => Err(ConfigError::UnresolvedKeybinding { path: full }),
    }
}

/// Translate one raw chord into the target encoding.
pub fn convert(target: KeybindingTarget, raw: &str, platform: Platform) -> String {
    raw.split('+')
        .map(|token| {
            let token = token.trim().to_ascii_lowercase();
            let token = resolve_platform_modifier(&token, platform);
            match target {
                KeybindingTarget::Electron => electron_token(&token),
                KeybindingTarget::VHotkey => vhotkey_token(&token),
            }
        })
        .collect::<Vec<_>>()
        .join("+")
}

/// `ctrlorcmd` means the command key on macOS and control everywhere else.
fn resolve_platform_modifier(token: &str, platform: Platform) -> String {
    if token == "ctrlorcmd" {
        match platform {
            Platform::Mac => "cmd".to_string(),
            Platform::Windows | Platform::Linux => "ctrl".to_string(),
        }
    } else {
        token.to_string()
    }
}

fn electron_token(token: &str) -> String {
    match token {
        "ctrl" => "Ctrl".to_string(),
        "cmd" => "Cmd".to_string(),
        "alt" => "Alt".to_string(),
        "shift" => "Shift".to_string(),
        "meta" => "Meta".to_string(),
        "plus" => "Plus".to_string(),
        key => capitalize(key),
    }
}

fn vhotkey_token(token: &str) -> String {
    match token {
        "cmd" => "meta".to_string(),
        other => other.to_string(),
    }
}

fn capitalize(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}
