//! Server configuration module

use serde::{Deserialize, Serialize};

use super::{env_opt, env_or};

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server host address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Worker threads (0 = number of CPU cores)
    #[serde(default)]
    pub workers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("0.0.0.0"),
            port: 8080,
            workers: 0, // Use all CPU cores
        }
    }
}

impl ServerConfig {
    /// Create a new server configuration
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Create from environment variables
    ///
    /// `IP_ADDR` is accepted as a fallback for the port, matching older
    /// deployments that only set that variable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let port = env_opt("SERVER_PORT")
            .or_else(|| env_opt("IP_ADDR"))
            .and_then(|value| value.trim().trim_start_matches(':').parse().ok())
            .unwrap_or(defaults.port);

        Self {
            host: env_opt("SERVER_HOST").unwrap_or(defaults.host),
            port,
            workers: env_or("SERVER_WORKERS", defaults.workers),
        }
    }

    /// Get the bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorsConfig {
    /// Allowed origins; `*` allows any origin
    #[serde(default)]
    pub allowed_origins: Vec<String>,

    /// Max age for preflight cache in seconds
    #[serde(default = "default_max_age")]
    pub max_age: usize,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![],
            max_age: default_max_age(),
        }
    }
}

impl CorsConfig {
    /// Create a permissive CORS configuration for development
    pub fn development() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
            max_age: 3600,
        }
    }

    /// Create from `ALLOWED_ORIGINS` (comma separated) and `CORS_MAX_AGE`
    pub fn from_env() -> Self {
        let allowed_origins = env_opt("ALLOWED_ORIGINS")
            .map(|origins| {
                origins
                    .split(',')
                    .map(|origin| origin.trim().to_string())
                    .filter(|origin| !origin.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Self {
            allowed_origins,
            max_age: env_or("CORS_MAX_AGE", default_max_age()),
        }
    }

    /// Whether any origin is allowed
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|origin| origin == "*")
    }
}

fn default_max_age() -> usize {
    86400 // 24 hours
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config_default() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.workers, 0);
    }

    #[test]
    fn test_bind_address() {
        let config = ServerConfig::new("localhost", 3000);
        assert_eq!(config.bind_address(), "localhost:3000");
    }

    #[test]
    fn test_cors_config_development() {
        let config = CorsConfig::development();
        assert!(config.allows_any_origin());
        assert!(!CorsConfig::default().allows_any_origin());
    }
}
