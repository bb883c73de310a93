use async_trait::async_trait;
use acme_zonefile_domain::{DomainError, ValidatedDomainName};

#[async_trait]
pub trait ZoneReloader: Send + Sync {
    /// Makes the nameserver pick up the edited fragments of `zone`.
    async fn reload(&self, zone: &ValidatedDomainName) -> Result<(), DomainError>;
}
