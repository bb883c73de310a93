use acme_zonefile_domain::{
    DnsQuery, DomainError, QueryTarget, RecordType, ResolverConfig, ResponseStatus,
    ValidatedDomainName, ValidatedIp,
};
use futures::future::BoxFuture;
use futures::FutureExt;
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

use super::ResolveAddressesUseCase;
use crate::ports::DnsQueryPort;

/// How many times discovery may follow an authority-section SOA to its owner.
pub const MAX_DELEGATION_DEPTH: u8 = 1;

/// Finds the addresses of a zone's authoritative nameservers.
pub struct DiscoverNameserversUseCase {
    query_port: Arc<dyn DnsQueryPort>,
    resolve_addresses: Arc<ResolveAddressesUseCase>,
    config: ResolverConfig,
}

impl DiscoverNameserversUseCase {
    pub fn new(
        query_port: Arc<dyn DnsQueryPort>,
        resolve_addresses: Arc<ResolveAddressesUseCase>,
        config: ResolverConfig,
    ) -> Self {
        Self {
            query_port,
            resolve_addresses,
            config,
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self, fqdn: &str) -> Result<Vec<ValidatedIp>, DomainError> {
        let fqdn = ValidatedDomainName::new(fqdn)?;
        self.discover(fqdn, 0).await
    }

    fn discover(
        &self,
        fqdn: ValidatedDomainName,
        depth: u8,
    ) -> BoxFuture<'_, Result<Vec<ValidatedIp>, DomainError>> {
        async move {
            let query = DnsQuery::new(fqdn.to_absolute(), RecordType::NS);
            let lookup = self
                .query_port
                .query(QueryTarget::SystemDefault, &query, &self.config)
                .await
                .map_err(|e| {
                    error!(domain = %fqdn, error = %e, "Nameservers unreachable");
                    DomainError::ResolutionError(format!("NS lookup for {}: {}", fqdn, e))
                })?;

            match lookup.status {
                ResponseStatus::NoError if !lookup.answers.is_empty() => {
                    let mut addresses = Vec::new();
                    for target in lookup.answers.iter().filter_map(|r| r.ns_target()) {
                        match self.resolve_addresses.execute(target).await {
                            Ok(found) => addresses.extend(found),
                            Err(e) => {
                                debug!(nameserver = %target, error = %e, "Skipping nameserver");
                            }
                        }
                    }
                    // Re-validate everything leaving this function.
                    let mut distinct: Vec<ValidatedIp> = Vec::with_capacity(addresses.len());
                    for ip in addresses {
                        let Ok(ip) = ValidatedIp::new(ip.as_str()) else {
                            continue;
                        };
                        if !distinct.iter().any(|seen| seen.addr() == ip.addr()) {
                            distinct.push(ip);
                        }
                    }
                    let addresses = distinct;
                    info!(
                        domain = %fqdn,
                        nameservers = addresses.len(),
                        "Discovered authoritative nameservers"
                    );
                    Ok(addresses)
                }
                ResponseStatus::NoError => match lookup.authority_soa_owner() {
                    Some(owner) => {
                        if depth >= MAX_DELEGATION_DEPTH {
                            error!(
                                domain = %fqdn,
                                owner = %owner,
                                "Refusing to follow SOA owner again"
                            );
                            return Err(DomainError::RecursionLimitExceeded(fqdn.to_string()));
                        }
                        let owner = ValidatedDomainName::new(owner)?;
                        debug!(domain = %fqdn, zone = %owner, "No NS records, retrying at zone apex");
                        self.discover(owner, depth + 1).await
                    }
                    None => Ok(vec![]),
                },
                ResponseStatus::NxDomain => {
                    debug!(domain = %fqdn, "NXDOMAIN while looking up nameservers");
                    Ok(vec![])
                }
                ResponseStatus::Other(code) => {
                    error!(domain = %fqdn, rcode = code, "NS lookup failed");
                    Ok(vec![])
                }
            }
        }
        .boxed()
    }
}
