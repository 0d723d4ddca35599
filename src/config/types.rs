use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub protocol: ProtocolConfig,
    #[serde(default)]
    pub sessions: SessionsConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address for the HTTP server (host:port).
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

/// Wire protocol settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolConfig {
    /// Emit `setHtmlId` calls so UI tests can address widgets by id.
    #[serde(default)]
    pub ui_tests: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionsConfig {
    /// Maximum number of concurrently open sessions (default: 256).
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
}

fn default_bind_addr() -> String {
    "127.0.0.1:8090".to_string()
}

fn default_max_sessions() -> usize {
    256
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

impl Default for SessionsConfig {
    fn default() -> Self {
        Self {
            max_sessions: default_max_sessions(),
        }
    }
}
