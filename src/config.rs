// Runtime configuration
// Read once at startup from the environment (after `.env` is loaded)

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use thiserror::Error;

const DEFAULT_DATABASE_URL: &str = "sqlite://fullstack.db?mode=rwc";
const DEFAULT_JWT_SECRET: &str = "dev-secret-key";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be {expected}, got {value:?}")]
    Malformed {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub bind_addr: IpAddr,
    pub listings_port: u16,
    pub trivia_port: u16,
    pub coffee_port: u16,
    pub jwt_secret: String,
    pub jwt_audience: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds the config from any variable source
    ///
    /// # Example
    /// ```
    /// use fullstack_api::config::Config;
    ///
    /// let config = Config::from_lookup(|var| match var {
    ///     "TRIVIA_PORT" => Some("8081".to_string()),
    ///     _ => None,
    /// })
    /// .unwrap();
    /// assert_eq!(config.trivia_port, 8081);
    /// assert_eq!(config.listings_port, 5000);
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let jwt_secret = lookup("JWT_SECRET").unwrap_or_else(|| {
            tracing::warn!("JWT_SECRET not set, using the development secret");
            DEFAULT_JWT_SECRET.to_string()
        });

        Ok(Self {
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            database_max_connections: positive_or(&lookup, "DATABASE_MAX_CONNECTIONS", 5)?,
            bind_addr: parse_or(
                &lookup,
                "BIND_ADDR",
                IpAddr::V4(Ipv4Addr::UNSPECIFIED),
                "an IP address",
            )?,
            listings_port: parse_or(&lookup, "LISTINGS_PORT", 5000, "a port number")?,
            trivia_port: parse_or(&lookup, "TRIVIA_PORT", 5001, "a port number")?,
            coffee_port: parse_or(&lookup, "COFFEE_PORT", 5002, "a port number")?,
            jwt_secret,
            jwt_audience: lookup("JWT_AUDIENCE").filter(|aud| !aud.trim().is_empty()),
        })
    }

    pub fn listings_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.listings_port)
    }

    pub fn trivia_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.trivia_port)
    }

    pub fn coffee_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.coffee_port)
    }
}

fn parse_or<F, T>(
    lookup: &F,
    var: &'static str,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(var) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Malformed {
            var,
            expected,
            value: raw,
        }),
    }
}

fn positive_or<F>(lookup: &F, var: &'static str, default: u32) -> Result<u32, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    const EXPECTED: &str = "a positive integer";

    match parse_or(lookup, var, default, EXPECTED)? {
        0 => Err(ConfigError::Malformed {
            var,
            expected: EXPECTED,
            value: lookup(var).unwrap_or_default(),
        }),
        n => Ok(n),
    }
}
