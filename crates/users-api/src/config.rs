//! Service configuration.
//!
//! Layered, later layers win:
//! 1) built-in defaults -> 2) YAML file (if given) -> 3) env (`USERS_API_*`) -> 4) CLI overrides

use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use resource_actor::IdPolicy;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Prefix of environment variables read by [`ServiceConfig::load`],
/// e.g. `USERS_API_BIND_ADDR=127.0.0.1:8080`.
pub const ENV_PREFIX: &str = "USERS_API_";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file does not exist: {0}")]
    MissingFile(PathBuf),
    #[error("invalid configuration: {0}")]
    Invalid(#[from] Box<figment::Error>),
    #[error("invalid bind address `{addr}`: {source}")]
    BindAddr {
        addr: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("channel_capacity must be greater than zero")]
    ZeroCapacity,
}

/// Effective settings of the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Socket address the HTTP server binds to.
    pub bind_addr: String,
    /// How ids of created users are chosen.
    pub id_policy: IdPolicy,
    /// Queue depth between the HTTP handlers and the store actor.
    pub channel_capacity: usize,
    /// Log every request and response (method, URL, status).
    pub log_requests: bool,
    /// With `log_requests`, also log headers and bodies.
    pub log_bodies: bool,
    /// Filter used when `RUST_LOG` is not set.
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".to_string(),
            id_policy: IdPolicy::CollectionLength,
            channel_capacity: 32,
            log_requests: true,
            log_bodies: true,
            log_level: "info".to_string(),
        }
    }
}

/// Command-line overrides, applied last.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub bind: Option<String>,
    pub port: Option<u16>,
    pub id_policy: Option<IdPolicy>,
    pub quiet: bool,
    pub verbose: u8,
}

impl ServiceConfig {
    /// Defaults, then the optional YAML file, then `USERS_API_*` variables.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(ServiceConfig::default()));

        if let Some(path) = path {
            if !path.is_file() {
                return Err(ConfigError::MissingFile(path.to_path_buf()));
            }
            figment = figment.merge(Yaml::file(path));
        }

        let config: ServiceConfig = figment
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()
            .map_err(Box::new)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.socket_addr()?;
        if self.channel_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(())
    }

    /// `--bind` replaces the whole address, `--port` only its port.
    pub fn apply_cli_overrides(&mut self, cli: &CliOverrides) {
        if let Some(bind) = &cli.bind {
            self.bind_addr = bind.clone();
        }
        if let Some(port) = cli.port {
            let host = self
                .bind_addr
                .rsplit_once(':')
                .map(|(host, _)| host.to_string())
                .unwrap_or_else(|| self.bind_addr.clone());
            self.bind_addr = format!("{host}:{port}");
        }
        if let Some(policy) = cli.id_policy {
            self.id_policy = policy;
        }
        if cli.quiet {
            self.log_requests = false;
        }
        match cli.verbose {
            0 => {}
            1 => self.log_level = "debug".to_string(),
            _ => self.log_level = "trace".to_string(),
        }
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.bind_addr
            .parse()
            .map_err(|source| ConfigError::BindAddr {
                addr: self.bind_addr.clone(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_bind_port_3000_with_length_ids() {
        let config = ServiceConfig::default();
        assert_eq!(config.socket_addr().unwrap().port(), 3000);
        assert_eq!(config.id_policy, IdPolicy::CollectionLength);
        assert!(config.log_requests);
    }

    #[test]
    fn yaml_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "bind_addr: \"127.0.0.1:8081\"\nid_policy: monotonic\nlog_bodies: false").unwrap();

        let config = ServiceConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:8081");
        assert_eq!(config.id_policy, IdPolicy::Monotonic);
        assert!(!config.log_bodies);
        assert_eq!(config.channel_capacity, 32);
    }

    #[test]
    fn missing_file_is_reported() {
        let err = ServiceConfig::load(Some(Path::new("/nonexistent/users-api.yaml"))).unwrap_err();
        assert!(matches!(err, ConfigError::MissingFile(_)));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "channel_capacity: 0").unwrap();
        let err = ServiceConfig::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroCapacity));

        let config = ServiceConfig {
            bind_addr: "not-an-address".into(),
            ..ServiceConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::BindAddr { .. })));
    }

    #[test]
    fn cli_port_keeps_host() {
        let mut config = ServiceConfig::default();
        config.apply_cli_overrides(&CliOverrides {
            port: Some(8080),
            verbose: 1,
            ..CliOverrides::default()
        });
        assert_eq!(config.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn cli_bind_then_port() {
        let mut config = ServiceConfig::default();
        config.apply_cli_overrides(&CliOverrides {
            bind: Some("127.0.0.1:1".into()),
            port: Some(9000),
            id_policy: Some(IdPolicy::Monotonic),
            quiet: true,
            verbose: 0,
        });
        assert_eq!(config.bind_addr, "127.0.0.1:9000");
        assert_eq!(config.id_policy, IdPolicy::Monotonic);
        assert!(!config.log_requests);
    }
}
