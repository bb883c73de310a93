use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::zone_fragment::{
    ZoneFragmentSet, DEFAULT_CHALLENGE_SUFFIX, DEFAULT_CHALLENGE_TTL, DEFAULT_NEW_FILE_SUFFIX,
    DEFAULT_SOA_SUFFIX,
};

/// One certificate name and the zone fragments that serve its challenge.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DomainConfig {
    /// Name the certificate is issued for, e.g. `www.example.com`.
    pub name: String,

    /// Zone handed to the reload command.
    pub zone: String,

    pub base_name: PathBuf,

    pub host_suffix: String,

    /// Nameservers to verify against. Empty means discover them via NS lookup.
    #[serde(default)]
    pub nameservers: Vec<String>,

    /// Overrides `[dns] query_timeout` for this domain.
    #[serde(default)]
    pub query_timeout: Option<u64>,

    /// Program run after the fragments change; the zone is appended as last argument.
    #[serde(default)]
    pub reload_command: Option<String>,

    #[serde(default = "default_challenge_suffix")]
    pub challenge_suffix: String,

    #[serde(default = "default_new_file_suffix")]
    pub new_file_suffix: String,

    #[serde(default)]
    pub old_file_suffix: Option<String>,

    #[serde(default = "default_soa_suffix")]
    pub soa_suffix: String,

    #[serde(default = "default_ttl")]
    pub ttl: u32,
}

impl DomainConfig {
    pub fn fragment_set(&self) -> ZoneFragmentSet {
        ZoneFragmentSet::new(self.base_name.clone())
            .with_challenge_suffix(self.challenge_suffix.clone())
            .with_new_file_suffix(self.new_file_suffix.clone())
            .with_old_file_suffix(self.old_file_suffix.clone())
            .with_soa_suffix(self.soa_suffix.clone())
            .with_ttl(self.ttl)
    }
}

fn default_challenge_suffix() -> String {
    DEFAULT_CHALLENGE_SUFFIX.to_string()
}

fn default_new_file_suffix() -> String {
    DEFAULT_NEW_FILE_SUFFIX.to_string()
}

fn default_soa_suffix() -> String {
    DEFAULT_SOA_SUFFIX.to_string()
}

fn default_ttl() -> u32 {
    DEFAULT_CHALLENGE_TTL
}
