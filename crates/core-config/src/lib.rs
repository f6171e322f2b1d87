//! Configuration loading and parsing.
//!
//! Reads `quill.toml` (or a path given by the binary). Two tables:
//!
//! ```toml
//! [editor]
//! profile = "cpp"          # cpp | python | javascript
//! tab_size = 4
//! auto_close_braces = true
//!
//! [layout]
//! line_height = 48
//! top_margin = 10
//! cell_advance = 24
//! origin_x = 0.0
//! ```
//!
//! Missing fields take defaults and unknown fields are ignored. A file that
//! fails to parse is logged and replaced by the defaults; a missing file is
//! not an error. Out-of-range numbers are clamped by `Config::apply_limits`.

use anyhow::Result;
use core_syntax::ProfileKind;
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::{info, warn};

pub const CONFIG_FILE_NAME: &str = "quill.toml";
pub const MAX_TAB_SIZE: u8 = 16;
/// Upper bound for `line_height` and `cell_advance`, in pixels.
pub const MAX_LAYOUT_PX: u32 = 4096;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct EditorConfig {
    #[serde(default = "EditorConfig::default_profile")]
    pub profile: ProfileKind,
    #[serde(default = "EditorConfig::default_tab_size")]
    pub tab_size: u8,
    #[serde(default = "EditorConfig::default_auto_close")]
    pub auto_close_braces: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            profile: Self::default_profile(),
            tab_size: Self::default_tab_size(),
            auto_close_braces: Self::default_auto_close(),
        }
    }
}

impl EditorConfig {
    const fn default_profile() -> ProfileKind {
        ProfileKind::Cpp
    }
    const fn default_tab_size() -> u8 {
        4
    }
    const fn default_auto_close() -> bool {
        true
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LayoutConfig {
    #[serde(default = "LayoutConfig::default_line_height")]
    pub line_height: u32,
    #[serde(default = "LayoutConfig::default_top_margin")]
    pub top_margin: u32,
    #[serde(default = "LayoutConfig::default_cell_advance")]
    pub cell_advance: u32,
    #[serde(default)]
    pub origin_x: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            line_height: Self::default_line_height(),
            top_margin: Self::default_top_margin(),
            cell_advance: Self::default_cell_advance(),
            origin_x: 0.0,
        }
    }
}

impl LayoutConfig {
    const fn default_line_height() -> u32 {
        48
    }
    const fn default_top_margin() -> u32 {
        10
    }
    const fn default_cell_advance() -> u32 {
        24
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct ConfigFile {
    #[serde(default)]
    pub editor: EditorConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>, // original file contents, when one was read
    pub source: Option<PathBuf>,
    pub file: ConfigFile,
}

/// Config path: `./quill.toml` when present, else the platform config dir.
pub fn discover() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("quill").join(CONFIG_FILE_NAME);
    }
    local
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        info!(target: "config", path = %path.display(), "config_missing_using_defaults");
        return Ok(Config::default());
    };
    let mut cfg = match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => Config {
            raw: Some(content),
            source: Some(path),
            file,
        },
        Err(e) => {
            warn!(
                target: "config",
                path = %path.display(),
                error = %e,
                "config_parse_failed_using_defaults"
            );
            Config::default()
        }
    };
    cfg.apply_limits();
    Ok(cfg)
}

impl Config {
    /// Clamp values the editor cannot honour. Returns true if anything changed.
    pub fn apply_limits(&mut self) -> bool {
        let mut changed = false;
        let raw_tab = self.file.editor.tab_size;
        let tab = raw_tab.clamp(1, MAX_TAB_SIZE);
        if tab != raw_tab {
            info!(target: "config", raw = raw_tab, clamped = tab, "tab_size_clamped");
            self.file.editor.tab_size = tab;
            changed = true;
        }
        let raw_height = self.file.layout.line_height;
        let height = raw_height.clamp(1, MAX_LAYOUT_PX);
        if height != raw_height {
            info!(target: "config", raw = raw_height, clamped = height, "line_height_clamped");
            self.file.layout.line_height = height;
            changed = true;
        }
        let raw_advance = self.file.layout.cell_advance;
        let advance = raw_advance.clamp(1, MAX_LAYOUT_PX);
        if advance != raw_advance {
            info!(target: "config", raw = raw_advance, clamped = advance, "cell_advance_clamped");
            self.file.layout.cell_advance = advance;
            changed = true;
        }
        changed
    }

    pub fn profile(&self) -> ProfileKind {
        self.file.editor.profile
    }

    pub fn tab_size(&self) -> usize {
        usize::from(self.file.editor.tab_size)
    }

    pub fn auto_close_braces(&self) -> bool {
        self.file.editor.auto_close_braces
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.file.layout
    }
}
