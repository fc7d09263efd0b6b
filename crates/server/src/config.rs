//! HTTP server bind configuration

use std::net::SocketAddr;

use crate::error::{Result, ServerError};

/// Default bind host (all interfaces)
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 4321;

/// Where the HTTP server listens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Resolve `host:port` into a socket address
    ///
    /// Port 0 asks the OS for an ephemeral port.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse()
            .map_err(|_| ServerError::InvalidAddress(addr))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_HOST, DEFAULT_PORT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 4321);
        assert_eq!(config.bind_addr().unwrap().port(), 4321);
    }

    #[test]
    fn test_invalid_host() {
        let config = ServerConfig::new("not a host", 8080);
        assert_matches!(
            config.bind_addr(),
            Err(ServerError::InvalidAddress(addr)) if addr == "not a host:8080"
        );
    }
}
