//! Configuration file handling

use serde::Deserialize;
use std::path::Path;

use super::paths::config_path;
use super::Result;

/// Main configuration structure
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Go toolchain and environment requirements
    #[serde(default)]
    pub runtime: RuntimeConfig,

    /// Server endpoint settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Installable tools
    #[serde(default)]
    pub tools: ToolsConfig,

    /// Test sequence settings
    #[serde(default)]
    pub tests: TestsConfig,
}

/// Runtime requirements checked before any test runs
#[derive(Debug, Deserialize)]
pub struct RuntimeConfig {
    /// Minimum Go toolchain version, without the `go` prefix
    #[serde(default = "default_min_go_version")]
    pub min_go_version: String,

    /// Environment variable naming the Go workspace root
    #[serde(default = "default_required_env")]
    pub required_env: String,

    /// Executable search path variable that must contain `required_env`
    #[serde(default = "default_path_env")]
    pub path_env: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            min_go_version: default_min_go_version(),
            required_env: default_required_env(),
            path_env: default_path_env(),
        }
    }
}

fn default_min_go_version() -> String {
    "1.5.1".to_string()
}
fn default_required_env() -> String {
    "GOPATH".to_string()
}
fn default_path_env() -> String {
    "PATH".to_string()
}

/// Server endpoint settings
#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    /// URL that must answer 200 before tests proceed
    #[serde(default = "default_health_url")]
    pub health_url: String,

    /// Health check request timeout, 0 uses the HTTP client default
    #[serde(default)]
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            health_url: default_health_url(),
            request_timeout_secs: 0,
        }
    }
}

fn default_health_url() -> String {
    "http://localhost:9000/".to_string()
}

/// A tool that is installed with the Go toolchain
#[derive(Debug, Deserialize, Clone)]
pub struct ToolConfig {
    /// Executable name or path
    pub binary: String,

    /// Module path passed to `go install`
    pub package: String,
}

#[derive(Debug, Deserialize)]
pub struct ToolsConfig {
    #[serde(default = "default_server_tool")]
    pub server: ToolConfig,

    #[serde(default = "default_client_tool")]
    pub client: ToolConfig,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            server: default_server_tool(),
            client: default_client_tool(),
        }
    }
}

fn default_server_tool() -> ToolConfig {
    ToolConfig {
        binary: "minio".to_string(),
        package: "github.com/minio/minio@latest".to_string(),
    }
}
fn default_client_tool() -> ToolConfig {
    ToolConfig {
        binary: "mc".to_string(),
        package: "github.com/minio/mc@latest".to_string(),
    }
}

/// Test sequence settings
#[derive(Debug, Deserialize)]
pub struct TestsConfig {
    #[serde(default = "default_bucket")]
    pub bucket: String,

    #[serde(default = "default_access_policy")]
    pub access_policy: String,
}

impl Default for TestsConfig {
    fn default() -> Self {
        Self {
            bucket: default_bucket(),
            access_policy: default_access_policy(),
        }
    }
}

fn default_bucket() -> String {
    "testbucket".to_string()
}
fn default_access_policy() -> String {
    "readonly".to_string()
}

impl Config {
    /// Load configuration from the default config file
    ///
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        match config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from an explicit path, which must exist
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| super::Error::FileRead {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| super::Error::ConfigParse(e.to_string()))
    }

    /// Load from `path` when given, the default location otherwise
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load_from(p),
            None => Self::load(),
        }
    }
}
