//! HTTP server configuration: bind address, log filter, timeouts and CORS.

use axum::http::HeaderValue;
use serde::Deserialize;
use std::net::SocketAddr;

use super::error::ValidationError;

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Environment name
    #[serde(default = "default_environment")]
    pub environment: Environment,

    /// Log filter directive, overridden by `RUST_LOG`
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// CORS allowed origins (comma-separated)
    pub cors_origins: Option<String>,
}

/// Application environment
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl ServerConfig {
    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> Result<SocketAddr, ValidationError> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse()
            .map_err(|_| ValidationError::InvalidAddress(raw))
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Get CORS origins as a vector
    pub fn cors_origins_list(&self) -> Vec<String> {
        self.cors_origins
            .as_ref()
            .map(|s| {
                s.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Parses the CORS origins into header values.
    ///
    /// Each origin must be an `http://` or `https://` origin that is a valid
    /// header value.
    pub fn cors_origin_headers(&self) -> Result<Vec<HeaderValue>, ValidationError> {
        self.cors_origins_list()
            .into_iter()
            .map(|origin| {
                let has_scheme = origin.starts_with("http://") || origin.starts_with("https://");
                match HeaderValue::from_str(&origin) {
                    Ok(value) if has_scheme => Ok(value),
                    _ => Err(ValidationError::InvalidCorsOrigin(origin)),
                }
            })
            .collect()
    }

    /// Validate server configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        if self.request_timeout_secs == 0 || self.request_timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        self.socket_addr()?;
        self.cors_origin_headers()?;
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            environment: default_environment(),
            log_level: default_log_level(),
            request_timeout_secs: default_request_timeout(),
            cors_origins: None,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_environment() -> Environment {
    Environment::Development
}

fn default_log_level() -> String {
    "info,innovation_index=debug".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local(port: u16) -> ServerConfig {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port,
            ..Default::default()
        }
    }

    #[test]
    fn defaults_bind_all_interfaces_in_development() {
        let config = ServerConfig::default();
        assert_eq!(config.socket_addr().unwrap().to_string(), "0.0.0.0:8080");
        assert!(!config.is_production());
        assert!(config.log_level.starts_with("info,innovation_index"));
        assert!(config.cors_origins_list().is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn socket_addr_rejects_hostnames() {
        let config = ServerConfig {
            host: "assessment.local".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.socket_addr(),
            Err(ValidationError::InvalidAddress(ref raw)) if raw == "assessment.local:8080"
        ));
        assert!(config.validate().is_err());
    }

    #[test]
    fn cors_origins_skip_blank_entries() {
        let config = ServerConfig {
            cors_origins: Some("https://apply.example.com, ,https://admin.example.com,".into()),
            ..local(3000)
        };
        assert_eq!(
            config.cors_origins_list(),
            vec!["https://apply.example.com", "https://admin.example.com"]
        );
    }

    #[test]
    fn cors_origins_parse_to_header_values() {
        let config = ServerConfig {
            cors_origins: Some("https://apply.example.com,http://localhost:5173".into()),
            ..local(3000)
        };
        let headers = config.cors_origin_headers().unwrap();
        assert_eq!(headers.len(), 2);
        assert_eq!(headers[1], "http://localhost:5173");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn malformed_cors_origin_is_rejected() {
        for origin in ["apply.example.com", "https://apply\u{7f}.example.com", "*"] {
            let config = ServerConfig {
                cors_origins: Some(format!("https://ok.example.com,{}", origin)),
                ..local(3000)
            };
            assert!(matches!(
                config.validate(),
                Err(ValidationError::InvalidCorsOrigin(ref raw)) if raw == origin
            ));
        }
    }

    #[test]
    fn port_zero_is_rejected() {
        assert!(matches!(local(0).validate(), Err(ValidationError::InvalidPort)));
    }

    #[test]
    fn timeout_must_be_within_five_minutes() {
        for secs in [0, 301] {
            let config = ServerConfig {
                request_timeout_secs: secs,
                ..local(3000)
            };
            assert!(matches!(config.validate(), Err(ValidationError::InvalidTimeout)));
        }
        let config = ServerConfig {
            request_timeout_secs: 300,
            ..local(3000)
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn environment_deserializes_lowercase() {
        let env: Environment = serde_json::from_str("\"production\"").unwrap();
        assert_eq!(env, Environment::Production);
    }
}
