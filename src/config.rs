use std::path::PathBuf;

use anyhow::Context;
use serde::Deserialize;

const DEFAULT_CONFIG_FILE: &str = "lighthouse.yaml";

/// Top-level server configuration.
///
/// Loaded once at startup from an optional YAML file, then overridden by
/// environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub site: SiteConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the listener binds to (e.g. "127.0.0.1:8080")
    pub listen_addr: String,
}

/// What gets served and from where.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Directory below which every served file must resolve
    pub document_root: PathBuf,
    /// File served when a directory is requested
    pub index_file: String,
    /// Page at the document root served with 404 for missing resources
    pub not_found_page: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".to_string(),
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            document_root: PathBuf::from("./public"),
            index_file: "index.html".to_string(),
            not_found_page: "not-found.html".to_string(),
        }
    }
}

impl SiteConfig {
    pub fn not_found_path(&self) -> PathBuf {
        self.document_root.join(&self.not_found_page)
    }
}

impl Config {
    /// Loads the configuration.
    ///
    /// The file named by `LIGHTHOUSE_CONFIG` is read if set; otherwise
    /// `lighthouse.yaml` is read when present. `LISTEN` and `DOCUMENT_ROOT`
    /// override whatever the file says.
    pub fn load() -> anyhow::Result<Self> {
        let mut cfg = match std::env::var("LIGHTHOUSE_CONFIG") {
            Ok(path) => Self::from_file(&path)?,
            Err(_) if std::path::Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(DEFAULT_CONFIG_FILE)?
            }
            Err(_) => Self::default(),
        };

        cfg.apply_env();
        Ok(cfg)
    }

    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {path}"))?;
        Self::from_yaml(&raw).with_context(|| format!("invalid config file {path}"))
    }

    pub fn from_yaml(raw: &str) -> anyhow::Result<Self> {
        // An empty document deserializes to unit, not to a mapping.
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(raw)?)
    }

    fn apply_env(&mut self) {
        if let Ok(addr) = std::env::var("LISTEN") {
            self.server.listen_addr = addr;
        }
        if let Ok(root) = std::env::var("DOCUMENT_ROOT") {
            self.site.document_root = PathBuf::from(root);
        }
    }
}
