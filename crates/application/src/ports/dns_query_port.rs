use async_trait::async_trait;
use acme_zonefile_domain::{DnsLookup, DnsQuery, DomainError, QueryTarget, ResolverConfig};

/// Sends one DNS question and returns the response as received.
///
/// `Err` means no usable response at all (timeout, unreachable, garbage on
/// the wire). Any response code, NXDOMAIN included, comes back as `Ok`.
/// Implementations must not cache.
#[async_trait]
pub trait DnsQueryPort: Send + Sync {
    async fn query(
        &self,
        target: QueryTarget,
        query: &DnsQuery,
        config: &ResolverConfig,
    ) -> Result<DnsLookup, DomainError>;
}
