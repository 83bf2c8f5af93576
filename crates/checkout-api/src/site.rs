//! # Site Configuration
//!
//! Declarative front-end wiring: which stylesheets the storefront loads,
//! which optional modules are switched on, and where static files live.
//! Loaded from `config/site.toml`; every field has a default.

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

/// URL prefix the asset directory is served under
pub const ASSETS_ROUTE: &str = "/assets";

/// Optional front-end modules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SiteModule {
    /// Markdown/content pages
    Content,
    /// Lint integration for the front-end build
    Eslint,
    /// Web font loading
    Fonts,
    /// Icon sets
    Icon,
    /// Responsive image optimisation
    Image,
    /// Third-party script loading
    Scripts,
}

/// Front-end asset pipeline configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Stylesheets in load order, relative to `assets_dir`
    #[serde(default = "default_stylesheets")]
    pub stylesheets: Vec<String>,

    /// Enabled optional modules
    #[serde(default = "default_modules")]
    pub modules: Vec<SiteModule>,

    /// Directory served under `/assets`
    #[serde(default = "default_assets_dir")]
    pub assets_dir: PathBuf,

    /// Directory served for any path no API route matches
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
}

fn default_stylesheets() -> Vec<String> {
    vec!["css/tailwind.css".to_string(), "css/theme.css".to_string()]
}

fn default_modules() -> Vec<SiteModule> {
    vec![
        SiteModule::Content,
        SiteModule::Eslint,
        SiteModule::Fonts,
        SiteModule::Icon,
        SiteModule::Image,
        SiteModule::Scripts,
    ]
}

fn default_assets_dir() -> PathBuf {
    PathBuf::from("assets")
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("public")
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            stylesheets: default_stylesheets(),
            modules: default_modules(),
            assets_dir: default_assets_dir(),
            static_dir: default_static_dir(),
        }
    }
}

impl SiteConfig {
    /// Load from `SITE_CONFIG` if set, else the first `config/site.toml`
    /// found walking up from the working directory, else defaults.
    pub fn load() -> anyhow::Result<Self> {
        if let Ok(path) = std::env::var("SITE_CONFIG") {
            return Self::from_file(Path::new(&path));
        }

        let config_paths = [
            "config/site.toml",
            "../config/site.toml",
            "../../config/site.toml",
        ];

        for path in config_paths {
            let path = Path::new(path);
            if path.exists() {
                return Self::from_file(path);
            }
        }

        tracing::warn!("No site config found, using defaults");
        Ok(Self::default())
    }

    /// Load from a specific file
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        tracing::info!(
            "Loaded site config from {}: {} stylesheets, {} modules",
            path.display(),
            config.stylesheets.len(),
            config.modules.len()
        );
        Ok(config)
    }

    /// Parse and validate TOML
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let mut config: SiteConfig = toml::from_str(content)?;
        config.validate()?;

        let mut seen = Vec::with_capacity(config.modules.len());
        config.modules.retain(|m| {
            let first = !seen.contains(m);
            seen.push(*m);
            first
        });

        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        for sheet in &self.stylesheets {
            let path = Path::new(sheet);
            let escapes = path
                .components()
                .any(|c| !matches!(c, Component::Normal(_)));
            if escapes {
                bail!("Stylesheet must be a relative path inside assets_dir: {}", sheet);
            }
            if path.extension().and_then(|e| e.to_str()) != Some("css") {
                bail!("Stylesheet must be a .css file: {}", sheet);
            }
        }
        Ok(())
    }

    /// Whether an optional module is switched on
    pub fn is_enabled(&self, module: SiteModule) -> bool {
        self.modules.contains(&module)
    }

    /// Public URLs of the stylesheets, in load order
    pub fn stylesheet_urls(&self) -> Vec<String> {
        self.stylesheets
            .iter()
            .map(|s| format!("{}/{}", ASSETS_ROUTE, s.replace('\\', "/")))
            .collect()
    }
}
