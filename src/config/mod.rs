use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

pub mod cors;
pub mod security;

pub use cors::create_cors_layer;
pub use security::create_security_headers_layer;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3001;
const DEFAULT_BASE_PATH: &str = "/events";
const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
const DEFAULT_UPLOAD_DIR: &str = "uploads";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
pub const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub mail: MailConfig,
    pub uploads: UploadConfig,
    pub cors_allowed_origins: String,
    pub production: bool,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    /// Mount point of the event routes, e.g. `/events`.
    pub base_path: String,
}

/// Sender identity and SMTP credential handed to the mail relay.
#[derive(Clone)]
pub struct MailConfig {
    pub sender: String,
    pub app_password: String,
    pub smtp_host: String,
}

impl std::fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailConfig")
            .field("sender", &self.sender)
            .field("app_password", &"<redacted>")
            .field("smtp_host", &self.smtp_host)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub dir: PathBuf,
    pub max_bytes: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
            max_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port: u16 = parse_or("PORT", &lookup, DEFAULT_PORT)?;
        let addr = format!("{}:{}", host, port)
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::Invalid {
                name: "HOST",
                value: host.clone(),
            })?;

        let base_path = normalize_base_path(
            &lookup("EVENTS_BASE_PATH").unwrap_or_else(|| DEFAULT_BASE_PATH.to_string()),
        );

        Ok(Self {
            database: DatabaseConfig {
                url: required("DATABASE_URL")?,
                max_connections: parse_or("DATABASE_MAX_CONNECTIONS", &lookup, 5)?,
                acquire_timeout_secs: parse_or("DATABASE_ACQUIRE_TIMEOUT_SECS", &lookup, 3)?,
            },
            server: ServerConfig { addr, base_path },
            mail: MailConfig {
                sender: required("EMAIL_USER")?,
                app_password: required("EMAIL_APP_PASSWORD")?,
                smtp_host: lookup("SMTP_HOST").unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string()),
            },
            uploads: UploadConfig {
                dir: lookup("UPLOAD_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_UPLOAD_DIR)),
                max_bytes: parse_or("MAX_UPLOAD_BYTES", &lookup, DEFAULT_MAX_UPLOAD_BYTES)?,
            },
            cors_allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGINS.to_string()),
            production: lookup("RUST_ENV")
                .map(|v| v.to_lowercase() == "production")
                .unwrap_or(false),
        })
    }
}

fn parse_or<T, F>(name: &'static str, lookup: &F, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value: raw }),
        None => Ok(default),
    }
}

fn normalize_base_path(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return String::new();
    }
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    const REQUIRED: [(&str, &str); 3] = [
        ("DATABASE_URL", "postgres://localhost/events"),
        ("EMAIL_USER", "calendar@example.com"),
        ("EMAIL_APP_PASSWORD", "app-secret"),
    ];

    #[test]
    fn test_defaults_applied() {
        let config = Config::from_lookup(lookup_from(&REQUIRED)).unwrap();

        assert_eq!(config.server.addr.port(), 3001);
        assert_eq!(config.server.base_path, "/events");
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.mail.smtp_host, "smtp.gmail.com");
        assert_eq!(config.uploads.dir, PathBuf::from("uploads"));
        assert!(!config.production);
    }

    #[test]
    fn test_missing_mail_credential_is_reported() {
        let err = Config::from_lookup(lookup_from(&REQUIRED[..2])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("EMAIL_APP_PASSWORD")));
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("PORT", "not-a-port"));
        let err = Config::from_lookup(lookup_from(&pairs)).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "PORT", .. }));
    }

    #[test]
    fn test_base_path_is_normalized() {
        assert_eq!(normalize_base_path("api/events/"), "/api/events");
        assert_eq!(normalize_base_path("/"), "");
    }

    #[test]
    fn test_mail_credential_not_in_debug_output() {
        let config = Config::from_lookup(lookup_from(&REQUIRED)).unwrap();
        let rendered = format!("{:?}", config.mail);
        assert!(!rendered.contains("app-secret"));
    }
}
