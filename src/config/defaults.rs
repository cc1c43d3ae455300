//! Default values for configuration options.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Environment variable holding the API bearer token.
pub const TOKEN_VAR: &str = crate::vikunja::TOKEN_VAR;

/// Environment variable holding the API base URL.
pub const BASE_URL_VAR: &str = crate::vikunja::BASE_URL_VAR;

/// Port the webhook endpoint listens on.
pub const BIND_PORT: u16 = 8080;

/// Route the webhook endpoint is mounted at.
pub const PATH: &str = "/";

/// Object key checked for enveloped webhook bodies.
pub const ENVELOPE_KEY: &str = crate::webhook::DEFAULT_ENVELOPE_KEY;

/// Address the webhook endpoint listens on (all interfaces).
#[must_use]
pub const fn bind_addr() -> SocketAddr {
    SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), BIND_PORT)
}
