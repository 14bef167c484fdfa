// src/config.rs

//! Project configuration loaded from an optional `Siteflow.toml`.
//!
//! Every section and field has a default matching the conventional project
//! layout (`site/` for Hugo sources, `src/{css,js,fonts}` for assets,
//! `dist/` for output), so a project that follows the layout needs no config
//! file at all. A present-but-malformed file is a fatal startup error.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::errors::Result;

/// Top-level configuration as read from `Siteflow.toml`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SiteConfig {
    #[serde(default)]
    pub hugo: HugoSection,
    #[serde(default)]
    pub css: CssSection,
    #[serde(default)]
    pub js: JsSection,
    #[serde(default)]
    pub fonts: FontsSection,
    #[serde(default)]
    pub server: ServerSection,
}

/// `[hugo]` section: the site generator invocation.
#[derive(Debug, Clone, Deserialize)]
pub struct HugoSection {
    /// Generator binary name or path.
    #[serde(default = "default_hugo_bin")]
    pub bin: String,

    /// Site source directory, passed as `-s`.
    #[serde(default = "default_hugo_source")]
    pub source: String,

    /// Output directory passed as `-d`, relative to `source`.
    #[serde(default = "default_hugo_output")]
    pub output: String,
}

fn default_hugo_bin() -> String {
    "hugo".to_string()
}

fn default_hugo_source() -> String {
    "site".to_string()
}

fn default_hugo_output() -> String {
    "../dist".to_string()
}

impl Default for HugoSection {
    fn default() -> Self {
        Self {
            bin: default_hugo_bin(),
            source: default_hugo_source(),
            output: default_hugo_output(),
        }
    }
}

/// `[css]` section: the stylesheet post-processor invocation.
#[derive(Debug, Clone, Deserialize)]
pub struct CssSection {
    #[serde(default = "default_css_bin")]
    pub bin: String,

    #[serde(default = "default_css_source")]
    pub source: String,

    #[serde(default = "default_css_output")]
    pub output: String,
}

fn default_css_bin() -> String {
    "postcss".to_string()
}

fn default_css_source() -> String {
    "src/css".to_string()
}

fn default_css_output() -> String {
    "dist/css".to_string()
}

impl Default for CssSection {
    fn default() -> Self {
        Self {
            bin: default_css_bin(),
            source: default_css_source(),
            output: default_css_output(),
        }
    }
}

/// `[js]` section: the script bundler invocation.
#[derive(Debug, Clone, Deserialize)]
pub struct JsSection {
    #[serde(default = "default_js_bin")]
    pub bin: String,

    /// Bundler config file, passed as `--config`.
    #[serde(default = "default_js_config")]
    pub config: String,

    /// Source tree used for watch rules (the bundle graph itself is the
    /// bundler's business).
    #[serde(default = "default_js_source")]
    pub source: String,
}

fn default_js_bin() -> String {
    "webpack".to_string()
}

fn default_js_config() -> String {
    "webpack.conf.js".to_string()
}

fn default_js_source() -> String {
    "src/js".to_string()
}

impl Default for JsSection {
    fn default() -> Self {
        Self {
            bin: default_js_bin(),
            config: default_js_config(),
            source: default_js_source(),
        }
    }
}

/// `[fonts]` section: font assets flattened into the output directory.
#[derive(Debug, Clone, Deserialize)]
pub struct FontsSection {
    #[serde(default = "default_fonts_source")]
    pub source: String,

    #[serde(default = "default_fonts_output")]
    pub output: String,
}

fn default_fonts_source() -> String {
    "src/fonts".to_string()
}

fn default_fonts_output() -> String {
    "dist/fonts".to_string()
}

impl Default for FontsSection {
    fn default() -> Self {
        Self {
            source: default_fonts_source(),
            output: default_fonts_output(),
        }
    }
}

/// `[server]` section: the development HTTP server.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSection {
    #[serde(default = "default_server_port")]
    pub port: u16,

    /// Directory served during development; the generated output tree.
    #[serde(default = "default_server_root")]
    pub root: String,
}

fn default_server_port() -> u16 {
    3000
}

fn default_server_root() -> String {
    "dist".to_string()
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            port: default_server_port(),
            root: default_server_root(),
        }
    }
}

/// Load configuration from `path`, falling back to defaults when the file
/// does not exist.
pub fn load_config(path: impl AsRef<Path>) -> Result<SiteConfig> {
    let path = path.as_ref();

    if !path.exists() {
        debug!(?path, "no config file found; using defaults");
        return Ok(SiteConfig::default());
    }

    let contents = fs::read_to_string(path)?;
    let config: SiteConfig = toml::from_str(&contents)?;
    Ok(config)
}

/// Project root for watching and subprocess working directories.
/// Currently: directory containing the config file, or `.`.
pub fn project_root(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(p) if p.as_os_str().is_empty() => PathBuf::from("."),
        Some(p) => p.to_path_buf(),
        None => PathBuf::from("."),
    }
}
