//! TOML file configuration structures.
//!
//! These structs directly map to the `ceats-config.toml` file format.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Root configuration structure as read from the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    pub server: ServerSection,
    pub auth: AuthSection,
}

/// Server configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSection {
    /// The address and port to listen on (e.g., "0.0.0.0:8080").
    #[serde(default = "default_listen_addr")]
    pub listen: SocketAddr,
}

fn default_listen_addr() -> SocketAddr {
    "0.0.0.0:8080".parse().expect("valid default address")
}

/// Auth configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSection {
    /// Secret used to sign bearer tokens. Must be at least 32 bytes.
    pub token_secret: String,
    /// Token lifetime in minutes.
    #[serde(default = "default_token_ttl_minutes")]
    pub token_ttl_minutes: i64,
}

fn default_token_ttl_minutes() -> i64 {
    // 24 hours
    1440
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_config_parses() {
        let toml_str = r#"
[server]
listen = "127.0.0.1:3000"

[auth]
token_secret = "an-example-secret-of-enough-length!!"
token_ttl_minutes = 60
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.listen.port(), 3000);
        assert_eq!(config.auth.token_ttl_minutes, 60);
    }

    #[test]
    fn token_ttl_defaults_to_a_day() {
        let toml_str = r#"
[server]
listen = "0.0.0.0:8080"

[auth]
token_secret = "an-example-secret-of-enough-length!!"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.auth.token_ttl_minutes, 1440);
    }
}
