use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressFamily {
    #[default]
    Both,
    V4Only,
    V6Only,
}

impl AddressFamily {
    pub fn wants_v4(&self) -> bool {
        !matches!(self, AddressFamily::V6Only)
    }

    pub fn wants_v6(&self) -> bool {
        !matches!(self, AddressFamily::V4Only)
    }

    pub fn allows(&self, addr: &IpAddr) -> bool {
        match addr {
            IpAddr::V4(_) => self.wants_v4(),
            IpAddr::V6(_) => self.wants_v6(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AddressFamily::Both => "both",
            AddressFamily::V4Only => "v4only",
            AddressFamily::V6Only => "v6only",
        }
    }
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AddressFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "both" | "any" => Ok(AddressFamily::Both),
            "v4only" | "ipv4" | "4" => Ok(AddressFamily::V4Only),
            "v6only" | "ipv6" | "6" => Ok(AddressFamily::V6Only),
            _ => Err(format!("Unknown address family: {}", s)),
        }
    }
}

/// Per-resolver query flags. Fixed once the resolver is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverConfig {
    pub recurse: bool,
    pub dnssec: bool,
    pub debug: bool,
    pub address_family: AddressFamily,
}

impl ResolverConfig {
    /// Flags for lookups through the system's recursive resolver.
    pub fn recursive(dnssec: bool, debug: bool, address_family: AddressFamily) -> Self {
        Self {
            recurse: true,
            dnssec,
            debug,
            address_family,
        }
    }

    /// Same flags with recursion turned off, for questions put directly to
    /// an authoritative server.
    pub fn authoritative(&self) -> Self {
        Self {
            recurse: false,
            ..*self
        }
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self::recursive(false, false, AddressFamily::Both)
    }
}

/// Where a query is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryTarget {
    /// The configured recursive resolver(s).
    SystemDefault,
    /// Exactly this server on port 53, and nothing else.
    Nameserver(IpAddr),
}

impl fmt::Display for QueryTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryTarget::SystemDefault => f.write_str("system resolver"),
            QueryTarget::Nameserver(ip) => write!(f, "{}", ip),
        }
    }
}
