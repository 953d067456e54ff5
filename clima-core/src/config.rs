use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf, time::Duration};

use crate::provider::{viacep, weatherapi};

/// Address the HTTP server listens on.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".to_string(), port: 8080 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViaCepConfig {
    pub base_url: String,
}

impl Default for ViaCepConfig {
    fn default() -> Self {
        Self { base_url: viacep::DEFAULT_BASE_URL.to_string() }
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherApiConfig {
    pub base_url: String,
    pub api_key: String,
}

impl Default for WeatherApiConfig {
    fn default() -> Self {
        Self { base_url: weatherapi::DEFAULT_BASE_URL.to_string(), api_key: String::new() }
    }
}

impl std::fmt::Debug for WeatherApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherApiConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &if self.api_key.is_empty() { "" } else { "<redacted>" })
            .finish()
    }
}

/// Outbound HTTP client settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Absent means the client default (no timeout).
    pub timeout_secs: Option<u64>,
}

impl HttpConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Top-level configuration.
///
/// Example TOML:
/// [server]
/// port = 8080
///
/// [weatherapi]
/// api_key = "..."
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub viacep: ViaCepConfig,
    pub weatherapi: WeatherApiConfig,
    pub http: HttpConfig,
}

impl Config {
    /// Load config from `path`, or from the platform config file when no path is given.
    ///
    /// A missing platform file yields defaults; a missing explicit file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let path = Self::config_file_path()?;
                if !path.exists() {
                    return Ok(Self::default());
                }
                path
            }
        };

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "clima", "clima")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Override fields from the process environment.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_env_from(|name| std::env::var(name).ok())
    }

    pub fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(key) = lookup("WEATHERAPI_KEY") {
            self.weatherapi.api_key = key;
        }
        if let Some(url) = lookup("WEATHERAPI_BASE_URL") {
            self.weatherapi.base_url = url;
        }
        if let Some(url) = lookup("VIACEP_BASE_URL") {
            self.viacep.base_url = url;
        }
        if let Some(host) = lookup("CLIMA_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("CLIMA_PORT") {
            self.server.port =
                port.parse().with_context(|| format!("Invalid CLIMA_PORT value '{port}'"))?;
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.weatherapi.api_key.trim().is_empty() {
            return Err(anyhow!(
                "No WeatherAPI key configured.\n\
                 Hint: set WEATHERAPI_KEY or add `api_key` under [weatherapi] in {}.",
                Self::config_file_path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|_| "config.toml".to_string())
            ));
        }

        Ok(())
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{collections::HashMap, io::Write};

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_point_at_public_upstreams() {
        let cfg = Config::default();

        assert_eq!(cfg.listen_addr(), "0.0.0.0:8080");
        assert_eq!(cfg.viacep.base_url, "https://viacep.com.br");
        assert_eq!(cfg.weatherapi.base_url, "http://api.weatherapi.com");
        assert!(cfg.http.timeout().is_none());
    }

    #[test]
    fn validate_errors_without_api_key() {
        let err = Config::default().validate().unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("No WeatherAPI key configured"));
        assert!(msg.contains("Hint: set WEATHERAPI_KEY"));
    }

    #[test]
    fn env_overrides_fields() {
        let mut cfg = Config::default();
        cfg.apply_env_from(env(&[
            ("WEATHERAPI_KEY", "ENV_KEY"),
            ("CLIMA_PORT", "9090"),
            ("VIACEP_BASE_URL", "http://localhost:1234"),
        ]))
        .unwrap();

        assert_eq!(cfg.weatherapi.api_key, "ENV_KEY");
        assert_eq!(cfg.server.port, 9090);
        assert_eq!(cfg.viacep.base_url, "http://localhost:1234");
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn invalid_port_in_env_is_rejected() {
        let mut cfg = Config::default();
        let err = cfg.apply_env_from(env(&[("CLIMA_PORT", "eighty")])).unwrap_err();

        assert!(err.to_string().contains("Invalid CLIMA_PORT"));
    }

    #[test]
    fn loads_partial_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[weatherapi]\napi_key = \"FILE_KEY\"\n\n[http]\ntimeout_secs = 5").unwrap();

        let cfg = Config::load(Some(file.path())).unwrap();

        assert_eq!(cfg.weatherapi.api_key, "FILE_KEY");
        assert_eq!(cfg.weatherapi.base_url, "http://api.weatherapi.com");
        assert_eq!(cfg.http.timeout(), Some(Duration::from_secs(5)));
        assert_eq!(cfg.server.port, 8080);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = Config::load(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let mut cfg = Config::default();
        cfg.weatherapi.api_key = "super-secret".into();

        assert!(!format!("{cfg:?}").contains("super-secret"));
    }
}
