//! Configuration loading and editing settings.
//!
//! Parses `vimcore.toml` (or an override path provided by the binary) into a
//! [`ConfigFile`] and derives the runtime [`Settings`] every operator reads:
//!
//! ```toml
//! [editing]
//! shiftwidth = 4
//! scroll = 0          # 0 = half of window_lines
//! window_lines = 24
//!
//! [selection]
//! selectmode = ["mouse", "key"]
//! keymodel = ["startsel", "stopsel"]
//! selection = "exclusive"
//! ```
//!
//! Missing files and parse errors fall back to defaults. Unknown option names inside
//! `selectmode` / `keymodel` are ignored with a warning.

use anyhow::Result;
use bitflags::bitflags;
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::{info, warn};

bitflags! {
    /// Events that start Select mode instead of Visual mode (`'selectmode'`).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SelectModeOptions: u8 {
        const MOUSE = 1 << 0;
        const KEY = 1 << 1;
        const CMD = 1 << 2;
    }
}

bitflags! {
    /// Shifted-key behavior (`'keymodel'`).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct KeyModelOptions: u8 {
        /// Shifted special keys start a selection.
        const START_SELECTION = 1 << 0;
        /// Unshifted special keys stop a selection.
        const STOP_SELECTION = 1 << 1;
    }
}

/// Whether the char under the active end of a selection belongs to it (`'selection'`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionInclusivity {
    #[default]
    Inclusive,
    Exclusive,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EditingConfig {
    #[serde(default = "EditingConfig::default_shiftwidth")]
    pub shiftwidth: u16,
    #[serde(default)]
    pub scroll: u16,
    #[serde(default = "EditingConfig::default_window_lines")]
    pub window_lines: u16,
}

impl Default for EditingConfig {
    fn default() -> Self {
        Self {
            shiftwidth: Self::default_shiftwidth(),
            scroll: 0,
            window_lines: Self::default_window_lines(),
        }
    }
}

impl EditingConfig {
    const fn default_shiftwidth() -> u16 {
        2
    }
    const fn default_window_lines() -> u16 {
        24
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SelectionConfig {
    #[serde(default = "SelectionConfig::default_selectmode")]
    pub selectmode: Vec<String>,
    #[serde(default = "SelectionConfig::default_keymodel")]
    pub keymodel: Vec<String>,
    #[serde(default)]
    pub selection: SelectionInclusivity,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            selectmode: Self::default_selectmode(),
            keymodel: Self::default_keymodel(),
            selection: SelectionInclusivity::default(),
        }
    }
}

impl SelectionConfig {
    fn default_selectmode() -> Vec<String> {
        vec!["mouse".into(), "key".into()]
    }
    fn default_keymodel() -> Vec<String> {
        vec!["startsel".into(), "stopsel".into()]
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ConfigFile {
    #[serde(default)]
    pub editing: EditingConfig,
    #[serde(default)]
    pub selection: SelectionConfig,
}

/// Session settings handed by reference to every operator call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub shift_width: usize,
    /// Lines moved by `<C-d>`-style scrolling; 0 means half the window.
    pub scroll: usize,
    pub window_lines: usize,
    pub select_mode: SelectModeOptions,
    pub key_model: KeyModelOptions,
    pub selection: SelectionInclusivity,
}

impl Default for Settings {
    fn default() -> Self {
        Settings::from_file(&ConfigFile::default())
    }
}

impl Settings {
    pub fn from_file(file: &ConfigFile) -> Self {
        let raw = file.editing.shiftwidth;
        let shift_width = raw.max(1);
        if shift_width != raw {
            info!(target: "config", raw, clamped = shift_width, "shiftwidth_clamped");
        }
        Self {
            shift_width: shift_width as usize,
            scroll: file.editing.scroll as usize,
            window_lines: file.editing.window_lines.max(1) as usize,
            select_mode: parse_flags(&file.selection.selectmode, "selectmode", |name| match name {
                "mouse" => Some(SelectModeOptions::MOUSE),
                "key" => Some(SelectModeOptions::KEY),
                "cmd" => Some(SelectModeOptions::CMD),
                _ => None,
            }),
            key_model: parse_flags(&file.selection.keymodel, "keymodel", |name| match name {
                "startsel" => Some(KeyModelOptions::START_SELECTION),
                "stopsel" => Some(KeyModelOptions::STOP_SELECTION),
                _ => None,
            }),
            selection: file.selection.selection,
        }
    }

    /// Scroll amount with the "0 = half a window" rule applied.
    pub fn effective_scroll(&self) -> usize {
        if self.scroll == 0 {
            (self.window_lines / 2).max(1)
        } else {
            self.scroll
        }
    }
}

fn parse_flags<F: bitflags::Flags + Copy>(
    names: &[String],
    option: &str,
    lookup: impl Fn(&str) -> Option<F>,
) -> F {
    names.iter().fold(F::empty(), |acc, name| match lookup(name.as_str()) {
        Some(flag) => acc.union(flag),
        None => {
            warn!(target: "config", option, value = name.as_str(), "unknown_option_value_ignored");
            acc
        }
    })
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>, // original file string (optional)
    pub file: ConfigFile,    // parsed (or default) data
    pub settings: Settings,
}

/// Best-effort config path following platform conventions (XDG / AppData Roaming).
pub fn discover() -> PathBuf {
    let local = PathBuf::from("vimcore.toml");
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("vimcore").join("vimcore.toml");
    }
    PathBuf::from("vimcore.toml")
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => {
            let settings = Settings::from_file(&file);
            info!(target: "config", path = %path.display(), "config_loaded");
            Ok(Config {
                raw: Some(content),
                file,
                settings,
            })
        }
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %e, "config_parse_failed_using_defaults");
            Ok(Config::default())
        }
    }
}
