//! Site configuration module.
//!
//! Handles loading and validating an optional `paperstack.toml`. All values
//! have stock defaults tuned for the PSL Institute deployment, so a bare
//! checkout builds without any config file at all.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! base_url = "https://psl.institute"   # Published site origin, no trailing slash
//! site_name = "PSL Institute"          # Used in titles and as journal fallback
//! publisher = "PSL Institute"
//! description = "Academic papers without peer-review but with love."
//! # issn = "2950-1234"                 # Emitted as citation_issn when set
//!
//! [paths]
//! articles = "articles.json"           # Article source file
//! pdfs = "pdfs"                        # Directory of <id>.pdf source documents
//! previews = "previews"                # Output directory name for thumbnails
//!
//! [previews]
//! width = 600                          # Preview width in pixels
//! density = 150                        # Rasterization DPI
//! quality = 85                         # JPEG quality (0-100)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `paperstack.toml`.
///
/// Config files are sparse — override just the values you want. Unknown
/// keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Published site origin. Trailing slashes are stripped on load.
    pub base_url: String,
    /// Site display name; also the `citation_journal_title` fallback.
    pub site_name: String,
    pub publisher: String,
    /// Site-level description for the homepage and global metadata.
    pub description: String,
    /// Serial number emitted as `citation_issn` when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issn: Option<String>,
    pub paths: PathsConfig,
    pub previews: PreviewConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Article source file, relative to the working directory.
    pub articles: String,
    /// Directory containing `<id>.pdf` source documents.
    pub pdfs: String,
    /// Directory name for generated preview thumbnails.
    pub previews: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PreviewConfig {
    /// Preview width in pixels; height follows the page aspect ratio.
    pub width: u32,
    /// Rasterization density in DPI.
    pub density: u32,
    /// JPEG quality, 0-100.
    pub quality: u8,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://psl.institute".to_string(),
            site_name: "PSL Institute".to_string(),
            publisher: "PSL Institute".to_string(),
            description: "Academic papers without peer-review but with love.".to_string(),
            issn: None,
            paths: PathsConfig::default(),
            previews: PreviewConfig::default(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            articles: "articles.json".to_string(),
            pdfs: "pdfs".to_string(),
            previews: "previews".to_string(),
        }
    }
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            width: 600,
            density: 150,
            quality: 85,
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ConfigError::Validation(
                "base_url must be an absolute http(s) URL".into(),
            ));
        }
        if self.site_name.trim().is_empty() {
            return Err(ConfigError::Validation("site_name must not be empty".into()));
        }
        if self.previews.quality > 100 {
            return Err(ConfigError::Validation(
                "previews.quality must be 0-100".into(),
            ));
        }
        if self.previews.width == 0 || self.previews.density == 0 {
            return Err(ConfigError::Validation(
                "previews.width and previews.density must be non-zero".into(),
            ));
        }
        Ok(())
    }
}

/// Load configuration from `paperstack.toml` in `dir`, falling back to
/// stock defaults when the file doesn't exist. The base URL is normalized
/// (trailing slashes stripped) and the result validated.
pub fn load_config(dir: &Path) -> Result<SiteConfig, ConfigError> {
    let path = dir.join("paperstack.toml");
    let mut config = if path.exists() {
        let content = fs::read_to_string(&path)?;
        toml::from_str(&content)?
    } else {
        SiteConfig::default()
    };
    config.base_url = config.base_url.trim_end_matches('/').to_string();
    config.validate()?;
    Ok(config)
}

/// A documented stock `paperstack.toml`, printed by `paperstack gen-config`.
pub fn stock_config_toml() -> &'static str {
    r#"# paperstack site configuration.
# All options are optional - the values below are the stock defaults.

# Published site origin (no trailing slash). Relative PDF paths and all
# generated URLs (canonical links, sitemap entries) resolve against this.
base_url = "https://psl.institute"

# Site display name. Also used as citation_journal_title when an article
# has no journal of its own.
site_name = "PSL Institute"

publisher = "PSL Institute"
description = "Academic papers without peer-review but with love."

# Serial number, emitted as citation_issn when set.
# issn = "2950-1234"

[paths]
articles = "articles.json"  # Article source file
pdfs = "pdfs"               # Directory of <id>.pdf source documents
previews = "previews"       # Output directory name for preview thumbnails

[previews]
width = 600    # Preview width in pixels
density = 150  # Rasterization DPI
quality = 85   # JPEG quality (0-100)
"#
}
