use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ambari: ClientConfig,
    pub cli: CliConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// API root of the Ambari server, e.g. "http://ambari:8080/api/v1"
    pub base_url: String,

    pub login: String,

    pub password: String,

    /// Accept self-signed or otherwise invalid TLS certificates
    pub disable_verify_ssl: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Cluster used when --cluster is not given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_cluster: Option<String>,

    /// Pretty-print privileges instead of one JSON line
    pub pretty_json: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api/v1".to_string(),
            login: "admin".to_string(),
            password: "admin".to_string(),
            disable_verify_ssl: false,
        }
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            default_cluster: None,
            pretty_json: true,
        }
    }
}

impl Config {
    /// Load config from the default location
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            // Create default config if it doesn't exist
            let default_config = Self::default();
            default_config.save()?;
            return Ok(default_config);
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        tracing::debug!(target: "config", "Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;

        Ok(())
    }

    /// Get the default config file path
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("ambari-client").join("config.toml"))
    }

    /// Create a default config file with comments
    pub fn create_default_with_comments() -> String {
        r#"# Ambari client configuration
# Location: ~/.config/ambari-client/config.toml (Linux)
#           ~/Library/Application Support/ambari-client/config.toml (macOS)
#           %APPDATA%\ambari-client\config.toml (Windows)

[ambari]
# API root of the Ambari server
base_url = "http://localhost:8080/api/v1"

# Credentials sent with HTTP basic auth
login = "admin"
password = "admin"

# Accept invalid TLS certificates (self-signed lab clusters)
disable_verify_ssl = false

[cli]
# Cluster used when --cluster is not given
# default_cluster = "my-cluster"

# Pretty-print privileges as indented JSON
pretty_json = true
"#
        .to_string()
    }
}
