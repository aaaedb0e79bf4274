use std::net::SocketAddr;
use std::time::Duration;

use crate::definitions::{DEFAULT_ACCT_PORT, DEFAULT_AUTH_PORT};

use super::errors::TransportError;

/// Correlator configuration.
///
/// Constructed programmatically; loading from a file or environment is
/// left to the caller.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub(super) host: String,
    pub(super) secret: Vec<u8>,
    pub(super) auth_port: u16,
    pub(super) acct_port: u16,
    pub(super) socket_timeout: Duration,
    pub(super) local_endpoint: Option<SocketAddr>,
}

impl ClientConfig {
    /// Builds a configuration with `auth_port = 1812`, `acct_port = 1813`,
    /// `socket_timeout = 3000ms`, no local bind. Fails with `InvalidArgument`
    /// if `secret` is not strict ASCII (non-ASCII is a fatal error, not
    /// silently substituted).
    pub fn new(host: impl Into<String>, secret: &str) -> Result<Self, TransportError> {
        if !secret.is_ascii() {
            return Err(TransportError::InvalidArgument(
                "shared secret must be strict ASCII".into(),
            ));
        }
        if secret.is_empty() {
            return Err(TransportError::InvalidArgument(
                "shared secret must not be empty".into(),
            ));
        }

        Ok(ClientConfig {
            host: host.into(),
            secret: secret.as_bytes().to_vec(),
            auth_port: DEFAULT_AUTH_PORT,
            acct_port: DEFAULT_ACCT_PORT,
            socket_timeout: Duration::from_millis(3000),
            local_endpoint: None,
        })
    }

    /// Overrides the authentication/authorization port. Fails with
    /// `InvalidArgument` if `port == 0`.
    pub fn with_auth_port(mut self, port: u16) -> Result<Self, TransportError> {
        if port == 0 {
            return Err(TransportError::InvalidArgument(
                "auth_port must be in [1, 65535]".into(),
            ));
        }
        self.auth_port = port;
        Ok(self)
    }

    /// Overrides the accounting port. Fails with `InvalidArgument` if
    /// `port == 0`.
    pub fn with_acct_port(mut self, port: u16) -> Result<Self, TransportError> {
        if port == 0 {
            return Err(TransportError::InvalidArgument(
                "acct_port must be in [1, 65535]".into(),
            ));
        }
        self.acct_port = port;
        Ok(self)
    }

    /// Overrides the per-attempt socket timeout. Fails with
    /// `InvalidArgument` if `timeout` is zero.
    pub fn with_socket_timeout(mut self, timeout: Duration) -> Result<Self, TransportError> {
        if timeout.is_zero() {
            return Err(TransportError::InvalidArgument(
                "socket_timeout must be greater than zero".into(),
            ));
        }
        self.socket_timeout = timeout;
        Ok(self)
    }

    /// Sets a local endpoint to bind before connecting. Its address family
    /// must match the resolved server address; that check happens at
    /// correlator construction time, once the server address is known.
    pub fn with_local_endpoint(mut self, endpoint: SocketAddr) -> Self {
        self.local_endpoint = Some(endpoint);
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn secret(&self) -> &[u8] {
        &self.secret
    }

    pub fn auth_port(&self) -> u16 {
        self.auth_port
    }

    pub fn acct_port(&self) -> u16 {
        self.acct_port
    }

    pub fn socket_timeout(&self) -> Duration {
        self.socket_timeout
    }

    pub fn local_endpoint(&self) -> Option<SocketAddr> {
        self.local_endpoint
    }
}

impl Drop for ClientConfig {
    fn drop(&mut self) {
        crate::binary::secure_zero(&mut self.secret);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_spec() {
        let config = ClientConfig::new("radius.example.com", "s3cret").unwrap();
        assert_eq!(config.auth_port(), 1812);
        assert_eq!(config.acct_port(), 1813);
        assert_eq!(config.socket_timeout(), Duration::from_millis(3000));
        assert!(config.local_endpoint().is_none());
    }

    #[test]
    fn non_ascii_secret_is_rejected() {
        assert!(ClientConfig::new("host", "sëcret").is_err());
    }

    #[test]
    fn empty_secret_is_rejected() {
        assert!(ClientConfig::new("host", "").is_err());
    }

    #[test]
    fn zero_port_is_rejected() {
        let config = ClientConfig::new("host", "secret").unwrap();
        assert!(config.with_auth_port(0).is_err());
    }
}
