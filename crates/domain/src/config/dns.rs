use serde::{Deserialize, Serialize};

use crate::resolver_config::{AddressFamily, ResolverConfig};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DnsConfig {
    /// Recursive resolvers used for discovery and address lookups.
    /// Empty means the servers of the host resolver configuration.
    #[serde(default)]
    pub resolvers: Vec<String>,

    /// Propagation deadline in seconds.
    #[serde(default = "default_query_timeout")]
    pub query_timeout: u64,

    /// Pause between polling rounds in seconds, clamped to [1, 30].
    #[serde(default = "default_query_pause")]
    pub query_pause: u64,

    /// Timeout of a single DNS query in milliseconds.
    #[serde(default = "default_per_query_timeout_ms")]
    pub per_query_timeout_ms: u64,

    #[serde(default = "default_false")]
    pub dnssec: bool,

    #[serde(default = "default_false")]
    pub debug: bool,

    #[serde(default)]
    pub address_family: AddressFamily,
}

impl DnsConfig {
    pub fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig::recursive(self.dnssec, self.debug, self.address_family)
    }
}

impl Default for DnsConfig {
    fn default() -> Self {
        Self {
            resolvers: Vec::new(),
            query_timeout: default_query_timeout(),
            query_pause: default_query_pause(),
            per_query_timeout_ms: default_per_query_timeout_ms(),
            dnssec: false,
            debug: false,
            address_family: AddressFamily::Both,
        }
    }
}

fn default_query_timeout() -> u64 {
    60
}

fn default_query_pause() -> u64 {
    2
}

fn default_per_query_timeout_ms() -> u64 {
    3000
}

fn default_false() -> bool {
    false
}
