//! Validation of externally supplied strings.
//!
//! Domain names, addresses, challenge values and file-name suffixes may come
//! from another process. Anything that ends up in a DNS query, a filesystem
//! path or a command line must go through one of these constructors first;
//! the resulting wrapper types are the only way to reach those call sites.

use fancy_regex::Regex;
use std::fmt;
use std::net::IpAddr;
use std::sync::{Arc, LazyLock};

use crate::DomainError;

static FQDN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[a-z0-9][-a-z0-9.]*$").expect("static fqdn pattern"));

static IP_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:[0-9.]+|[0-9a-f:]+)$").expect("static address pattern")
});

static CHALLENGE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[-_a-z0-9]+$").expect("static challenge pattern"));

static SUFFIX_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[-_.a-z0-9]+$").expect("static suffix pattern"));

fn full_match(pattern: &Regex, value: &str) -> bool {
    pattern.is_match(value).unwrap_or(false)
}

/// A trimmed, lower-cased domain name matching `[a-z0-9][-a-z0-9.]*`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ValidatedDomainName(Arc<str>);

impl ValidatedDomainName {
    pub fn new(value: &str) -> Result<Self, DomainError> {
        let trimmed = value.trim();
        if !full_match(&FQDN_PATTERN, trimmed) {
            return Err(DomainError::InvalidDomainName(value.to_string()));
        }
        Ok(Self(Arc::from(trimmed.to_ascii_lowercase())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The name with exactly one trailing dot, as sent in DNS queries.
    pub fn to_absolute(&self) -> String {
        if self.0.ends_with('.') {
            self.0.to_string()
        } else {
            format!("{}.", self.0)
        }
    }

    /// The name without any trailing dot.
    pub fn without_root(&self) -> &str {
        self.0.trim_end_matches('.')
    }
}

impl fmt::Display for ValidatedDomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ValidatedDomainName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// An IPv4 or IPv6 literal. The original spelling is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValidatedIp {
    text: Arc<str>,
    addr: IpAddr,
}

impl ValidatedIp {
    pub fn new(value: &str) -> Result<Self, DomainError> {
        let trimmed = value.trim();
        if !full_match(&IP_PATTERN, trimmed) {
            return Err(DomainError::InvalidIpAddress(value.to_string()));
        }
        let addr = trimmed
            .parse::<IpAddr>()
            .map_err(|_| DomainError::InvalidIpAddress(value.to_string()))?;
        Ok(Self {
            text: Arc::from(trimmed),
            addr,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn addr(&self) -> IpAddr {
        self.addr
    }

    pub fn is_ipv4(&self) -> bool {
        self.addr.is_ipv4()
    }

    pub fn is_ipv6(&self) -> bool {
        self.addr.is_ipv6()
    }
}

impl From<IpAddr> for ValidatedIp {
    fn from(addr: IpAddr) -> Self {
        Self {
            text: Arc::from(addr.to_string()),
            addr,
        }
    }
}

impl fmt::Display for ValidatedIp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Returns the lower-cased domain name, or `None` if the value is absent or malformed.
pub fn untaint_fqdn(value: Option<&str>) -> Option<ValidatedDomainName> {
    value.and_then(|v| ValidatedDomainName::new(v).ok())
}

/// Returns the address verbatim, or `None` if the value is absent or malformed.
pub fn untaint_ip(value: Option<&str>) -> Option<ValidatedIp> {
    value.and_then(|v| ValidatedIp::new(v).ok())
}

pub fn untaint_challenge(value: &str) -> Result<&str, DomainError> {
    if full_match(&CHALLENGE_PATTERN, value) {
        Ok(value)
    } else {
        Err(DomainError::InvalidInput(format!(
            "challenge value '{}' contains characters outside [-_a-z0-9]",
            value
        )))
    }
}

pub fn untaint_suffix<'a>(label: &str, value: &'a str) -> Result<&'a str, DomainError> {
    if full_match(&SUFFIX_PATTERN, value) {
        Ok(value)
    } else {
        Err(DomainError::InvalidInput(format!(
            "{} '{}' contains characters outside [-_.a-z0-9]",
            label, value
        )))
    }
}
