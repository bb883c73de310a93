use acme_zonefile_domain::{DomainError, ValidatedDomainName};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoaUpdate {
    pub path: PathBuf,
    pub previous_serial: u64,
    pub serial: u64,
    pub backup: Option<PathBuf>,
}

/// Edits the challenge and SOA fragments of one zone.
///
/// Both operations replace their file with write-to-temp and rename, so a
/// reader never sees a partially written fragment.
pub trait ZoneEditor: Send + Sync {
    /// Returns the path of the challenge fragment that was replaced.
    fn write_challenge(
        &self,
        fqdn: &ValidatedDomainName,
        challenge: &str,
        host_suffix: &str,
    ) -> Result<PathBuf, DomainError>;

    fn increment_soa(&self) -> Result<SoaUpdate, DomainError>;
}
