//! Server endpoint.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Host used when no endpoint is configured.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Port used when no endpoint is configured.
pub const DEFAULT_PORT: u16 = 5000;

/// Validated server address.
///
/// # Invariants
///
/// - `host` is non-empty and carries no surrounding whitespace.
/// - `port` is in `1..=65535`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawEndpoint")]
pub struct Endpoint {
    host: String,
    port: u16,
}

impl Endpoint {
    /// Create an endpoint, rejecting a blank host or port zero.
    pub fn new(host: impl AsRef<str>, port: u16) -> Result<Self, ValidationError> {
        let host = host.as_ref().trim();
        if host.is_empty() {
            return Err(ValidationError::EmptyHost);
        }
        if port == 0 {
            return Err(ValidationError::InvalidPort(port.to_string()));
        }
        Ok(Self { host: host.to_owned(), port })
    }

    /// Create an endpoint from user-entered host and port text.
    pub fn from_parts(host: &str, port: &str) -> Result<Self, ValidationError> {
        let port = port
            .trim()
            .parse::<u16>()
            .map_err(|_| ValidationError::InvalidPort(port.trim().to_owned()))?;
        Self::new(host, port)
    }

    /// Host name or address.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// TCP port.
    pub fn port(&self) -> u16 {
        self.port
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self { host: DEFAULT_HOST.to_owned(), port: DEFAULT_PORT }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

/// Parses `host:port`, or `[v6-addr]:port` for IPv6 literals.
impl FromStr for Endpoint {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (host, port) =
            s.rsplit_once(':').ok_or_else(|| ValidationError::MalformedEndpoint(s.to_owned()))?;
        let host = host.strip_prefix('[').and_then(|h| h.strip_suffix(']')).unwrap_or(host);
        Self::from_parts(host, port)
    }
}

/// On-disk form. Port is wider than `u16` so out-of-range values surface as
/// [`ValidationError::InvalidPort`] rather than an integer overflow.
#[derive(Deserialize)]
struct RawEndpoint {
    host: String,
    port: u32,
}

impl TryFrom<RawEndpoint> for Endpoint {
    type Error = ValidationError;

    fn try_from(raw: RawEndpoint) -> Result<Self, Self::Error> {
        let port = u16::try_from(raw.port)
            .map_err(|_| ValidationError::InvalidPort(raw.port.to_string()))?;
        Self::new(raw.host, port)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_host_and_port() {
        let endpoint: Endpoint = "chat.local:6000".parse().unwrap();
        assert_eq!(endpoint.host(), "chat.local");
        assert_eq!(endpoint.port(), 6000);
        assert_eq!(endpoint.to_string(), "chat.local:6000");
    }

    #[test]
    fn parses_bracketed_ipv6() {
        let endpoint: Endpoint = "[::1]:5000".parse().unwrap();
        assert_eq!(endpoint.host(), "::1");
        assert_eq!(endpoint.to_string(), "[::1]:5000");
    }

    #[test]
    fn rejects_out_of_range_ports() {
        for port in ["0", "65536", "-1", "abc", ""] {
            let result = Endpoint::from_parts("localhost", port);
            assert!(matches!(result, Err(ValidationError::InvalidPort(_))), "{port:?}");
        }
        assert!(Endpoint::from_parts("localhost", "65535").is_ok());
        assert!(Endpoint::from_parts("localhost", "1").is_ok());
    }

    #[test]
    fn rejects_blank_host() {
        assert_eq!(Endpoint::new("   ", 5000), Err(ValidationError::EmptyHost));
        assert_eq!(":5000".parse::<Endpoint>(), Err(ValidationError::EmptyHost));
    }

    #[test]
    fn rejects_missing_port_separator() {
        assert!(matches!(
            "localhost".parse::<Endpoint>(),
            Err(ValidationError::MalformedEndpoint(_))
        ));
    }

    #[test]
    fn host_is_trimmed() {
        let endpoint = Endpoint::from_parts(" 10.0.0.1 ", " 5001 ").unwrap();
        assert_eq!(endpoint.to_string(), "10.0.0.1:5001");
    }

    #[test]
    fn default_is_local_server() {
        assert_eq!(Endpoint::default().to_string(), "127.0.0.1:5000");
    }
}
