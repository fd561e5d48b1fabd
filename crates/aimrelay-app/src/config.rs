//! Relay configuration
//!
//! Layered lowest to highest: built-in defaults, an optional TOML file,
//! environment variables, then command-line flags.

use std::fs;
use std::path::Path;

use aimrelay_llm_api::{BackendType, ProviderSettings};
use aimrelay_search::SearchSettings;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::cli::Cli;

pub const DEFAULT_BIND: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;

/// Main configuration structure, resolved once at startup
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    pub server: ServerConfig,
    pub providers: ProvidersConfig,
    pub search: SearchSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// Connection settings for each upstream provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    pub perplexity: ProviderSettings,
    pub deepseek: ProviderSettings,
    pub grok: ProviderSettings,
    pub openai: ProviderSettings,
}

impl ProvidersConfig {
    pub fn get(&self, backend: BackendType) -> &ProviderSettings {
        match backend {
            BackendType::Perplexity => &self.perplexity,
            BackendType::DeepSeek => &self.deepseek,
            BackendType::Grok => &self.grok,
            BackendType::OpenAI => &self.openai,
        }
    }

    pub fn get_mut(&mut self, backend: BackendType) -> &mut ProviderSettings {
        match backend {
            BackendType::Perplexity => &mut self.perplexity,
            BackendType::DeepSeek => &mut self.deepseek,
            BackendType::Grok => &mut self.grok,
            BackendType::OpenAI => &mut self.openai,
        }
    }
}

impl RelayConfig {
    /// Read a TOML configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Resolve the full configuration from CLI flags and the process environment
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        config.apply_env(|name| std::env::var(name).ok());
        config.apply_cli(cli);
        config.validate()?;

        Ok(config)
    }

    /// Overlay values from environment variables
    ///
    /// `lookup` is `std::env::var` in production; tests pass a map.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        for backend in BackendType::ALL {
            let settings = self.providers.get_mut(backend);
            if let Some(key) = lookup(backend.api_key_env()) {
                settings.api_key = Some(key);
            }
            if let Some(url) = lookup(backend.base_url_env()) {
                settings.base_url = Some(url);
            }
        }

        if let Some(key) = lookup("GOOGLE_API_KEY") {
            self.search.api_key = Some(key);
        }
        if let Some(cx) = lookup("GOOGLE_CX") {
            self.search.engine_id = Some(cx);
        }
        if let Some(url) = lookup("GOOGLE_SEARCH_URL") {
            self.search.endpoint = url;
        }
        if let Some(sites) = lookup("SEARCH_TRUSTED_SITES") {
            self.search.trusted_sites = sites
                .split(',')
                .map(|site| site.trim().to_string())
                .filter(|site| !site.is_empty())
                .collect();
        }
        if let Some(language) = lookup("SEARCH_LANGUAGE") {
            self.search.language = Some(language);
        }
    }

    /// Overlay command-line flags
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(bind) = &cli.bind {
            self.server.bind = bind.clone();
        }
        if let Some(port) = cli.port {
            self.server.port = port;
        }
        if let Some(context_results) = cli.context_results {
            self.search.context_results = context_results;
        }
    }

    /// Validate the configuration
    ///
    /// Missing credentials are not an error here; they fail the affected
    /// requests instead.
    pub fn validate(&self) -> Result<()> {
        if self.server.bind.trim().is_empty() {
            return Err(anyhow::anyhow!("Server bind address must not be empty"));
        }

        if self.search.context_results == 0 {
            return Err(anyhow::anyhow!("search.context_results must be at least 1"));
        }

        if self.search.timeout_secs == 0 {
            return Err(anyhow::anyhow!("search.timeout_secs must be greater than 0"));
        }

        for backend in BackendType::ALL {
            if self.providers.get(backend).timeout_secs == Some(0) {
                return Err(anyhow::anyhow!(
                    "providers.{}.timeout_secs must be greater than 0",
                    backend
                ));
            }
        }

        Ok(())
    }

    /// Names of credentials that are not configured
    pub fn missing_credentials(&self) -> Vec<&'static str> {
        let mut missing: Vec<&'static str> = BackendType::ALL
            .into_iter()
            .filter(|backend| self.providers.get(*backend).api_key().is_none())
            .map(|backend| backend.api_key_env())
            .collect();

        if self.search.api_key().is_none() {
            missing.push("GOOGLE_API_KEY");
        }
        if self.search.engine_id().is_none() {
            missing.push("GOOGLE_CX");
        }

        missing
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.bind, self.server.port)
    }
}
