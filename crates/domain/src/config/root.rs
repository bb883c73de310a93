use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::dns::DnsConfig;
use super::domain::DomainConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use crate::resolver_config::AddressFamily;
use crate::untaint::{untaint_suffix, ValidatedDomainName};

const LOCAL_CONFIG_PATH: &str = "acme-zonefile.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/acme-zonefile/config.toml";

/// Main configuration structure
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub dns: DnsConfig,

    /// Certificate names this host answers challenges for
    #[serde(default, rename = "domain")]
    pub domains: Vec<DomainConfig>,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. acme-zonefile.toml in current directory
    /// 3. /etc/acme-zonefile/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new(LOCAL_CONFIG_PATH).exists() {
            Self::from_file(LOCAL_CONFIG_PATH)?
        } else if std::path::Path::new(SYSTEM_CONFIG_PATH).exists() {
            Self::from_file(SYSTEM_CONFIG_PATH)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if let Some(family) = overrides.address_family {
            self.dns.address_family = family;
        }
        if overrides.dnssec {
            self.dns.dnssec = true;
        }
        if overrides.debug_dns {
            self.dns.debug = true;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dns.query_timeout == 0 {
            return Err(ConfigError::Validation(
                "query_timeout must be at least 1 second".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for domain in &self.domains {
            let name = ValidatedDomainName::new(&domain.name)
                .map_err(|e| ConfigError::Validation(e.to_string()))?;
            ValidatedDomainName::new(&domain.zone)
                .map_err(|e| ConfigError::Validation(e.to_string()))?;
            untaint_suffix("host suffix", &domain.host_suffix)
                .map_err(|e| ConfigError::Validation(e.to_string()))?;
            domain
                .fragment_set()
                .validate()
                .map_err(|e| ConfigError::Validation(format!("{}: {}", domain.name, e)))?;

            if !seen.insert(name) {
                return Err(ConfigError::Validation(format!(
                    "Domain '{}' is configured more than once",
                    domain.name
                )));
            }
        }

        Ok(())
    }

    /// Entry for `fqdn`, compared after untainting.
    pub fn domain(&self, fqdn: &ValidatedDomainName) -> Option<&DomainConfig> {
        self.domains.iter().find(|d| {
            ValidatedDomainName::new(&d.name)
                .map(|name| name.without_root() == fqdn.without_root())
                .unwrap_or(false)
        })
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<String> {
        if std::path::Path::new(LOCAL_CONFIG_PATH).exists() {
            Some(LOCAL_CONFIG_PATH.to_string())
        } else if std::path::Path::new(SYSTEM_CONFIG_PATH).exists() {
            Some(SYSTEM_CONFIG_PATH.to_string())
        } else {
            None
        }
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub log_level: Option<String>,
    pub address_family: Option<AddressFamily>,
    pub dnssec: bool,
    pub debug_dns: bool,
}
