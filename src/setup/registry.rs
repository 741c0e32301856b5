//! The tools the harness installs and drives

use std::fmt;

use crate::common::config::{ToolConfig, ToolsConfig};

/// An installable tool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    /// The object-storage server
    Server,
    /// The command-line client used by the test sequence
    Client,
}

impl Tool {
    /// Human-readable name used in log lines
    pub fn display_name(&self) -> &'static str {
        match self {
            Tool::Server => "minio server",
            Tool::Client => "minio client",
        }
    }

    /// Look up this tool's binary and package in the configuration
    pub fn config<'a>(&self, tools: &'a ToolsConfig) -> &'a ToolConfig {
        match self {
            Tool::Server => &tools.server,
            Tool::Client => &tools.client,
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
