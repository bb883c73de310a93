use acme_zonefile_domain::{
    AddressFamily, DnsQuery, DomainError, QueryTarget, RecordData, RecordType, ResolverConfig,
    ValidatedDomainName, ValidatedIp,
};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::ports::DnsQueryPort;

/// Turns a hostname or address literal into addresses of the wanted family.
pub struct ResolveAddressesUseCase {
    query_port: Arc<dyn DnsQueryPort>,
    config: ResolverConfig,
}

impl ResolveAddressesUseCase {
    pub fn new(query_port: Arc<dyn DnsQueryPort>, config: ResolverConfig) -> Self {
        Self { query_port, config }
    }

    pub async fn execute(&self, host: &str) -> Result<Vec<ValidatedIp>, DomainError> {
        let family = self.config.address_family;
        if let Ok(literal) = ValidatedIp::new(host) {
            return Ok(if family.allows(&literal.addr()) {
                vec![literal]
            } else {
                vec![]
            });
        }

        let name = ValidatedDomainName::new(host)?;
        let mut addresses = Vec::new();

        if family.wants_v4() {
            self.collect(&name, RecordType::A, family, &mut addresses)
                .await;
        }
        if family.wants_v6() {
            self.collect(&name, RecordType::AAAA, family, &mut addresses)
                .await;
        }

        debug!(host = %name, family = %family, found = addresses.len(), "Resolved host addresses");
        Ok(addresses)
    }

    async fn collect(
        &self,
        name: &ValidatedDomainName,
        record_type: RecordType,
        family: AddressFamily,
        out: &mut Vec<ValidatedIp>,
    ) {
        let query = DnsQuery::new(name.to_absolute(), record_type);
        match self
            .query_port
            .query(QueryTarget::SystemDefault, &query, &self.config).await {
            Ok(lookup) => {
                for record in &lookup.answers {
                    let ip = match &record.data {
                        RecordData::A(v4) => ValidatedIp::from(std::net::IpAddr::V4(*v4)),
                        RecordData::AAAA(v6) => ValidatedIp::from(std::net::IpAddr::V6(*v6)),
                        _ => continue,
                    };
                    if family.allows(&ip.addr()) {
                        out.push(ip);
                    }
                }
            }
            Err(e) => {
                warn!(
                    host = %name,
                    record_type = %record_type,
                    error = %e,
                    "Address lookup failed"
                );
            }
        }
    }
}
