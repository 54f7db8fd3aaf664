use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "mdsite.json";

/// Top-level mdsite.json schema.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    #[serde(default = "default_content_dir")]
    pub content_dir: PathBuf,

    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,

    #[serde(default = "default_template_path")]
    pub template_path: PathBuf,

    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Wipe the output directory before copying static assets.
    #[serde(default = "default_true")]
    pub clean_output: bool,

    /// Keep code block contents literal instead of applying inline styling.
    #[serde(default)]
    pub opaque_code: bool,

    /// Turn a fence info string such as ```` ```rust ```` into a
    /// `language-rust` class on the code element.
    #[serde(default)]
    pub language_class: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            content_dir: default_content_dir(),
            static_dir: default_static_dir(),
            template_path: default_template_path(),
            output_dir: default_output_dir(),
            clean_output: true,
            opaque_code: false,
            language_class: false,
        }
    }
}

fn default_content_dir() -> PathBuf {
    PathBuf::from("content")
}
fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}
fn default_template_path() -> PathBuf {
    PathBuf::from("template.html")
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("public")
}
fn default_true() -> bool {
    true
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub content_dir: Option<PathBuf>,
    pub static_dir: Option<PathBuf>,
    pub template_path: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
}

impl SiteConfig {
    pub fn apply(mut self, overrides: Overrides) -> Self {
        if let Some(dir) = overrides.content_dir {
            self.content_dir = dir;
        }
        if let Some(dir) = overrides.static_dir {
            self.static_dir = dir;
        }
        if let Some(path) = overrides.template_path {
            self.template_path = path;
        }
        if let Some(dir) = overrides.output_dir {
            self.output_dir = dir;
        }
        self
    }

    pub fn convert_options(&self) -> md_html::ConvertOptions {
        md_html::ConvertOptions {
            opaque_code: self.opaque_code,
            language_class: self.language_class,
        }
    }
}

/// Load config from the given file, or `mdsite.json` in the current
/// directory. A missing default file yields defaults; a missing explicit file
/// is an error.
pub fn load_config(explicit: Option<&Path>) -> Result<SiteConfig> {
    let config_path = match explicit {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file {} does not exist", path.display());
            }
            path.to_path_buf()
        }
        None => PathBuf::from(CONFIG_FILE),
    };

    if config_path.exists() {
        let raw = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;
        let config: SiteConfig = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;
        log::info!("loaded config from {}", config_path.display());
        Ok(config)
    } else {
        log::debug!("no {} found, using defaults", CONFIG_FILE);
        Ok(SiteConfig::default())
    }
}
