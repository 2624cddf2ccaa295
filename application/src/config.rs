//! [`Config`]-related definitions.

use std::{path::PathBuf, time};

use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use serde::Deserialize;
use smart_default::SmartDefault;

/// Application configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: Server,

    /// Service configuration.
    pub service: Service,

    /// Storage configuration.
    pub storage: Storage,

    /// Log configuration.
    pub log: Log,
}

impl Config {
    /// Creates a new [`Config`] by:
    /// - loading it from the provided `path` (if any);
    /// - merging it with the environment variables (if any);
    /// - using default values for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::with_name(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("CONF").separator("."))
            .build()?
            .try_deserialize()
    }
}

/// Server configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Server {
    /// Host to bind the server to.
    #[default("0.0.0.0".to_owned())]
    pub host: String,

    /// Port to bind the server to.
    #[default(5050)]
    pub port: u16,

    /// [CORS] configuration.
    ///
    /// [CORS]: https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS
    pub cors: Cors,
}

/// [CORS] configuration.
///
/// [CORS]: https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Cors {
    /// List of allowed origins.
    #[default(vec!["*".to_owned()])]
    pub origins: Vec<String>,
}

/// Service configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Service {
    /// [JWT] secret.
    ///
    /// [JWT]: https://wikipedia.org/wiki/JSON_Web_Token
    #[default("secret".to_owned())]
    pub jwt_secret: String,

    /// Time a session stays valid after authorization.
    #[default(service::Config::DEFAULT_SESSION_TTL)]
    #[serde(with = "humantime_serde")]
    pub session_ttl: time::Duration,

    /// Mode of matching user credentials on authorization.
    pub credentials_matching: CredentialsMatching,
}

impl From<Service> for service::Config {
    fn from(value: Service) -> Self {
        let Service {
            jwt_secret,
            session_ttl,
            credentials_matching,
        } = value;
        Self {
            jwt_encoding_key: jsonwebtoken::EncodingKey::from_secret(
                jwt_secret.as_bytes(),
            ),
            jwt_decoding_key: jsonwebtoken::DecodingKey::from_secret(
                jwt_secret.as_bytes(),
            ),
            session_ttl,
            credentials_matching: credentials_matching.into(),
        }
    }
}

/// Mode of matching user credentials on authorization.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum CredentialsMatching {
    /// Login and password must belong to the same user.
    #[default]
    SameUser,

    /// Login and password may belong to different users.
    ///
    /// Insecure, kept for compatibility with existing deployments only.
    AnyUser,
}

impl From<CredentialsMatching> for service::CredentialsMatching {
    fn from(value: CredentialsMatching) -> Self {
        match value {
            CredentialsMatching::SameUser => Self::SameUser,
            CredentialsMatching::AnyUser => Self::AnyUser,
        }
    }
}

/// Storage configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Storage {
    /// Directory to store the data files in.
    #[default(PathBuf::from("data"))]
    pub dir: PathBuf,
}

impl From<Storage> for service::infra::fs::Config {
    fn from(value: Storage) -> Self {
        let Storage { dir } = value;
        Self { dir }
    }
}

/// Log configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Log {
    /// Log level.
    pub level: LogLevel,
}

/// Log level.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    /// Designates very low priority, often extremely verbose, information.
    Trace,

    /// Designates lower priority information.
    Debug,

    /// Designates useful information.
    #[default]
    Info,

    /// Designates hazardous situations.
    Warn,

    /// Designates very serious errors.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use super::{Config, CredentialsMatching};

    #[test]
    fn uses_defaults_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let conf = Config::new(path.to_str().unwrap()).unwrap();

        assert_eq!(conf.server.port, 5050);
        assert_eq!(conf.server.cors.origins, ["*"]);
        assert_eq!(conf.service.jwt_secret, "secret");
        assert_eq!(conf.service.session_ttl, Duration::from_secs(12 * 60 * 60));
        assert_eq!(
            conf.service.credentials_matching,
            CredentialsMatching::SameUser,
        );
        assert_eq!(conf.storage.dir.to_str(), Some("data"));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.toml");
        std::fs::write(
            &path,
            r#"
                [server]
                port = 8000

                [service]
                session_ttl = "30m"
                credentials_matching = "any_user"

                [storage]
                dir = "/var/lib/tasks"
            "#,
        )
        .unwrap();

        let conf = Config::new(path.to_str().unwrap()).unwrap();

        assert_eq!(conf.server.port, 8000);
        assert_eq!(conf.server.host, "0.0.0.0");
        assert_eq!(conf.service.session_ttl, Duration::from_secs(30 * 60));
        assert_eq!(
            conf.service.credentials_matching,
            CredentialsMatching::AnyUser,
        );
        assert_eq!(conf.storage.dir.to_str(), Some("/var/lib/tasks"));
    }
}
