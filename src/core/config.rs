use crate::errors::{LazyLoadError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sources: SourceSettings,
    pub browser: BrowserConfig,
    pub render: RenderConfig,
}

/// Which staged (dataset) keys feed which live attributes
///
/// Keys use dataset naming, so `data_srcset: "originalSet"` reads the
/// `data-original-set` attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    pub data_src: String,
    pub data_srcset: String,
    pub data_sizes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    pub headless: bool,
    pub viewport: Viewport,
    pub user_agent: Option<String>,
    pub disable_images: bool,
    pub args: Vec<String>,
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// CSS selector picking the elements to resolve
    pub selector: String,
    pub pretty_report: bool,
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            LazyLoadError::ConfigurationError(format!("{}: {}", path.display(), e))
        })?;
        Self::from_json(&contents)
    }
}

impl SourceSettings {
    pub fn new(data_src: impl Into<String>, data_srcset: impl Into<String>) -> Self {
        Self {
            data_src: data_src.into(),
            data_srcset: data_srcset.into(),
            data_sizes: None,
        }
    }

    pub fn with_sizes(mut self, data_sizes: impl Into<String>) -> Self {
        self.data_sizes = Some(data_sizes.into());
        self
    }
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self::new("src", "srcset")
    }
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            viewport: Viewport::default(),
            user_agent: None,
            disable_images: false,
            args: vec![],
            timeout_ms: 30000,
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            selector: "img".to_string(),
            pretty_report: true,
        }
    }
}
