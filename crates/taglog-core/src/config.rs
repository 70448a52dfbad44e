use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use thiserror::Error;

/// Default TCP port of the log listener.
pub const DEFAULT_PORT: u16 = 9000;
/// Default size of a single socket read.
pub const DEFAULT_READ_BUFFER: usize = 1024;

/// Listener settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Interface to bind; all interfaces by default.
    pub host: IpAddr,
    pub port: u16,
    /// Bytes requested per read.
    pub read_buffer: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            read_buffer: DEFAULT_READ_BUFFER,
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// # Errors
    /// Returns `ConfigError::ZeroReadBuffer` for an empty read buffer.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.read_buffer == 0 {
            return Err(ConfigError::ZeroReadBuffer);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("read buffer must be at least 1 byte")]
    ZeroReadBuffer,
}
