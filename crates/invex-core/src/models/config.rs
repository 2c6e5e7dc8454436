//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{InvexError, Result};
use crate::invoice::LayoutProfile;
use crate::invoice::rules::dynamic::{DEFAULT_MAX_NAME_LEN, DEFAULT_SIZE_LIMIT};

/// Main configuration for invex.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InvexConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// HTTP server configuration.
    pub server: ServerConfig,
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Layout profile selecting the fixed rule set.
    pub profile: LayoutProfile,

    /// Longest accepted extra field name, in characters.
    pub max_field_name_len: usize,

    /// Maximum number of distinct extra fields per request.
    pub max_extra_fields: usize,

    /// Compiled size limit for each extra field pattern, in bytes.
    pub dynamic_pattern_size_limit: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            profile: LayoutProfile::default(),
            max_field_name_len: DEFAULT_MAX_NAME_LEN,
            max_extra_fields: 64,
            dynamic_pattern_size_limit: DEFAULT_SIZE_LIMIT,
        }
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind.
    pub host: String,

    /// Port to bind.
    pub port: u16,

    /// Largest accepted upload, in bytes.
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            max_upload_bytes: 20 * 1024 * 1024,
        }
    }
}

impl InvexConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| InvexError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| InvexError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Apply overrides from a variable lookup.
    ///
    /// Recognizes `INVEX_HOST`, `PORT` and `INVEX_PROFILE`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("INVEX_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|_| InvexError::Config(format!("PORT must be a valid port number, got {:?}", port)))?;
        }
        if let Some(profile) = lookup("INVEX_PROFILE") {
            self.extraction.profile = profile
                .parse()
                .map_err(|e: crate::error::ExtractionError| InvexError::Config(e.to_string()))?;
        }
        Ok(())
    }

    /// Apply overrides from the process environment.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }
}
