use acme_zonefile_domain::{
    challenge_record_name, DnsQuery, DomainError, QueryTarget, RecordType, ResolverConfig,
    ValidatedDomainName, ValidatedIp,
};
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, instrument, warn};

use super::PropagationSettings;
use crate::ports::DnsQueryPort;
use crate::use_cases::nameservers::{DiscoverNameserversUseCase, ResolveAddressesUseCase};

/// Deadline offset used when the configured timeout does not fit in an `Instant`.
const FAR_FUTURE: Duration = Duration::from_secs(86400 * 365 * 30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropagationReport {
    pub record_name: String,
    pub rounds: u32,
    pub satisfied: Vec<ValidatedIp>,
    /// Nameservers that never answered with the expected value.
    pub pending: Vec<ValidatedIp>,
    pub elapsed: Duration,
}

impl PropagationReport {
    pub fn is_propagated(&self) -> bool {
        self.pending.is_empty()
    }

    /// Turns a timed-out report into `DomainError::PropagationTimeout`.
    pub fn into_result(self) -> Result<Self, DomainError> {
        if self.is_propagated() {
            Ok(self)
        } else {
            Err(DomainError::PropagationTimeout {
                pending: self.pending.iter().map(|ip| ip.to_string()).collect(),
            })
        }
    }
}

/// Polls every authoritative nameserver until all of them serve the
/// expected challenge TXT value, or the deadline passes.
pub struct WaitForPropagationUseCase {
    query_port: Arc<dyn DnsQueryPort>,
    resolve_addresses: Arc<ResolveAddressesUseCase>,
    discover_nameservers: Arc<DiscoverNameserversUseCase>,
    config: ResolverConfig,
}

impl WaitForPropagationUseCase {
    pub fn new(
        query_port: Arc<dyn DnsQueryPort>,
        resolve_addresses: Arc<ResolveAddressesUseCase>,
        discover_nameservers: Arc<DiscoverNameserversUseCase>,
        config: ResolverConfig,
    ) -> Self {
        Self {
            query_port,
            resolve_addresses,
            discover_nameservers,
            // Verification never goes through a recursive resolver.
            config: config.authoritative(),
        }
    }

    /// `nameservers` may hold hostnames or address literals; when empty the
    /// zone's nameservers are discovered through an NS lookup.
    #[instrument(skip(self, nameservers, settings), fields(expected = %expected_value))]
    pub async fn execute(
        &self,
        fqdn: &str,
        expected_value: &str,
        nameservers: &[String],
        settings: &PropagationSettings,
    ) -> Result<PropagationReport, DomainError> {
        let fqdn = ValidatedDomainName::new(fqdn)
            .map_err(|_| DomainError::InvalidInput(format!("invalid domain name '{}'", fqdn)))?;
        if expected_value.is_empty() {
            return Err(DomainError::InvalidInput(
                "expected challenge value is required".to_string(),
            ));
        }

        let record_name = challenge_record_name(fqdn.as_str())?;
        let mut pending = self.seed_nameservers(&fqdn, nameservers).await?;
        if pending.is_empty() {
            return Err(DomainError::NoNameserversFound(fqdn.to_string()));
        }

        info!(
            record = %record_name,
            nameservers = %join(&pending),
            timeout_secs = settings.timeout().as_secs(),
            "Waiting for challenge propagation"
        );

        let query = DnsQuery::new(&record_name, RecordType::TXT);
        let start = Instant::now();
        let deadline = start
            .checked_add(settings.timeout())
            .unwrap_or_else(|| start + FAR_FUTURE);
        let mut satisfied = Vec::new();
        let mut rounds = 0u32;

        loop {
            rounds += 1;
            let answers = join_all(
                pending
                    .iter()
                    .map(|ns| self.serves_value(ns, &query, expected_value)),
            )
            .await;

            let mut still_pending = Vec::with_capacity(pending.len());
            for (ns, ok) in pending.into_iter().zip(answers) {
                if ok {
                    debug!(nameserver = %ns, round = rounds, "Nameserver serves challenge");
                    satisfied.push(ns);
                } else {
                    still_pending.push(ns);
                }
            }
            pending = still_pending;

            if pending.is_empty() {
                info!(
                    record = %record_name,
                    rounds = rounds,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Challenge visible on all nameservers"
                );
                return Ok(PropagationReport {
                    record_name,
                    rounds,
                    satisfied,
                    pending,
                    elapsed: start.elapsed(),
                });
            }

            if Instant::now() > deadline {
                warn!(
                    record = %record_name,
                    rounds = rounds,
                    pending = %join(&pending),
                    "Timed out waiting for nameservers"
                );
                return Ok(PropagationReport {
                    record_name,
                    rounds,
                    satisfied,
                    pending,
                    elapsed: start.elapsed(),
                });
            }

            debug!(
                round = rounds,
                pending = %join(&pending),
                pause_secs = settings.query_pause().as_secs(),
                "Challenge not visible everywhere yet"
            );
            tokio::time::sleep(settings.query_pause()).await;
        }
    }

    async fn seed_nameservers(
        &self,
        fqdn: &ValidatedDomainName,
        nameservers: &[String],
    ) -> Result<Vec<ValidatedIp>, DomainError> {
        let mut found = Vec::new();

        if nameservers.is_empty() {
            match self.discover_nameservers.execute(fqdn.as_str()).await {
                Ok(addresses) => found = addresses,
                Err(e) if !e.is_fatal() => {
                    warn!(domain = %fqdn, error = %e, "Nameserver discovery failed");
                }
                Err(e) => return Err(e),
            }
        } else {
            for entry in nameservers {
                match self.resolve_addresses.execute(entry).await {
                    Ok(addresses) => found.extend(addresses),
                    Err(e) => warn!(nameserver = %entry, error = %e, "Ignoring nameserver"),
                }
            }
        }

        let mut distinct: Vec<ValidatedIp> = Vec::with_capacity(found.len());
        for ip in found {
            if !distinct.iter().any(|seen| seen.addr() == ip.addr()) {
                distinct.push(ip);
            }
        }
        Ok(distinct)
    }

    async fn serves_value(&self, nameserver: &ValidatedIp, query: &DnsQuery, expected: &str) -> bool {
        match self
            .query_port
            .query(QueryTarget::Nameserver(nameserver.addr()), query, &self.config)
            .await
        {
            Ok(lookup) => lookup.txt_values().any(|value| value == expected),
            Err(e) => {
                debug!(nameserver = %nameserver, error = %e, "TXT query failed");
                false
            }
        }
    }
}

fn join(addresses: &[ValidatedIp]) -> String {
    addresses
        .iter()
        .map(|ip| ip.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
