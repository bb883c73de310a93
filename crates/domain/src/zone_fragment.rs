//! On-disk layout and text format of the zone fragments this tool owns.
//!
//! Each zone has two single-record files that the nameserver includes into
//! the real zone: the challenge TXT fragment and the SOA fragment.
//!
//! ```text
//! challenge file = base_name + challenge_suffix + host_suffix
//! soa file       = base_name + soa_suffix
//! ```
//!
//! Both files must already exist; the editor never creates them.

use fancy_regex::Regex;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use crate::untaint::{untaint_challenge, untaint_suffix};
use crate::{DomainError, ValidatedDomainName};

pub const DEFAULT_CHALLENGE_SUFFIX: &str = ".acme.";
pub const DEFAULT_NEW_FILE_SUFFIX: &str = ".new";
pub const DEFAULT_SOA_SUFFIX: &str = ".soa";
pub const DEFAULT_CHALLENGE_TTL: u32 = 1;

static SOA_SERIAL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"IN\s+SOA\s+\S+\s+\S+\s*\(\s*(\d+)").expect("static soa pattern")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneFragmentSet {
    base_name: PathBuf,
    challenge_suffix: String,
    new_file_suffix: String,
    old_file_suffix: Option<String>,
    soa_suffix: String,
    ttl: u32,
}

impl ZoneFragmentSet {
    pub fn new(base_name: impl Into<PathBuf>) -> Self {
        Self {
            base_name: base_name.into(),
            challenge_suffix: DEFAULT_CHALLENGE_SUFFIX.to_string(),
            new_file_suffix: DEFAULT_NEW_FILE_SUFFIX.to_string(),
            old_file_suffix: None,
            soa_suffix: DEFAULT_SOA_SUFFIX.to_string(),
            ttl: DEFAULT_CHALLENGE_TTL,
        }
    }

    pub fn with_challenge_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.challenge_suffix = suffix.into();
        self
    }

    pub fn with_new_file_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.new_file_suffix = suffix.into();
        self
    }

    pub fn with_old_file_suffix(mut self, suffix: Option<String>) -> Self {
        self.old_file_suffix = suffix;
        self
    }

    pub fn with_soa_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.soa_suffix = suffix.into();
        self
    }

    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn base_name(&self) -> &Path {
        &self.base_name
    }

    pub fn ttl(&self) -> u32 {
        self.ttl
    }

    /// Checks every configured suffix against the file-name pattern.
    pub fn validate(&self) -> Result<(), DomainError> {
        untaint_suffix("challenge suffix", &self.challenge_suffix)?;
        untaint_suffix("new file suffix", &self.new_file_suffix)?;
        untaint_suffix("soa suffix", &self.soa_suffix)?;
        if let Some(old) = &self.old_file_suffix {
            untaint_suffix("old file suffix", old)?;
        }
        if self.base_name.as_os_str().is_empty() {
            return Err(DomainError::InvalidInput("base name is empty".to_string()));
        }
        Ok(())
    }

    pub fn challenge_file(&self, host_suffix: &str) -> Result<PathBuf, DomainError> {
        self.validate()?;
        let host_suffix = untaint_suffix("host suffix", host_suffix)?;
        Ok(append(&self.base_name, &[&self.challenge_suffix, host_suffix]))
    }

    pub fn soa_file(&self) -> Result<PathBuf, DomainError> {
        self.validate()?;
        Ok(append(&self.base_name, &[&self.soa_suffix]))
    }

    /// Temp file a new version of `target` is written to before the rename.
    pub fn new_file_for(&self, target: &Path) -> PathBuf {
        append(target, &[&self.new_file_suffix])
    }

    /// Backup location for `target`, when backups are configured.
    pub fn old_file_for(&self, target: &Path) -> Option<PathBuf> {
        self.old_file_suffix
            .as_deref()
            .map(|suffix| append(target, &[suffix]))
    }
}

fn append(base: &Path, suffixes: &[&str]) -> PathBuf {
    let mut joined: OsString = base.as_os_str().to_owned();
    for suffix in suffixes {
        joined.push(suffix);
    }
    PathBuf::from(joined)
}

/// Body of the challenge fragment: one TXT record, tab separated.
pub fn render_challenge_fragment(
    fqdn: &ValidatedDomainName,
    challenge: &str,
    ttl: u32,
) -> Result<String, DomainError> {
    let challenge = untaint_challenge(challenge)?;
    Ok(format!(
        "_acme-challenge.{}.\t{}\tIN\tTXT\t\"{}\"\n",
        fqdn.without_root(),
        ttl,
        challenge
    ))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerialBump {
    pub content: String,
    pub previous: u64,
    pub current: u64,
}

/// Increments the first SOA serial found in `content` by one.
///
/// Only the digits of the serial change; every other byte is kept.
pub fn increment_soa_serial(content: &str, path: &Path) -> Result<SerialBump, DomainError> {
    let malformed = || DomainError::MalformedZoneFragment {
        path: path.display().to_string(),
    };

    let captures = SOA_SERIAL_PATTERN
        .captures(content)
        .map_err(|_| malformed())?
        .ok_or_else(malformed)?;
    let serial = captures.get(1).ok_or_else(malformed)?;

    let previous: u64 = serial.as_str().parse().map_err(|_| malformed())?;
    let current = previous.checked_add(1).ok_or_else(malformed)?;

    let mut updated = String::with_capacity(content.len() + 1);
    updated.push_str(&content[..serial.start()]);
    updated.push_str(&current.to_string());
    updated.push_str(&content[serial.end()..]);

    Ok(SerialBump {
        content: updated,
        previous,
        current,
    })
}
