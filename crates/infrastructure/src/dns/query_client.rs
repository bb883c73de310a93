use acme_zonefile_application::ports::DnsQueryPort;
use acme_zonefile_domain::{DnsLookup, DnsQuery, DomainError, QueryTarget, ResolverConfig};
use async_trait::async_trait;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use super::forwarding::{MessageBuilder, ParsedResponse, ResponseParser};
use super::system_resolvers::{for_family, DNS_PORT};
use super::transport::{tcp::TcpTransport, udp::UdpTransport, DnsTransport};

pub const DEFAULT_QUERY_TIMEOUT_MS: u64 = 3000;

/// Sends questions over UDP with TCP fallback. Nothing is cached.
pub struct HickoryQueryClient {
    system_resolvers: Vec<SocketAddr>,
    nameserver_port: u16,
    timeout: Duration,
}

impl HickoryQueryClient {
    pub fn new(system_resolvers: Vec<SocketAddr>, timeout: Duration) -> Self {
        Self {
            system_resolvers,
            nameserver_port: DNS_PORT,
            timeout,
        }
    }

    /// Port used for `QueryTarget::Nameserver`; 53 unless overridden.
    pub fn with_nameserver_port(mut self, port: u16) -> Self {
        self.nameserver_port = port;
        self
    }

    fn servers_for(&self, target: QueryTarget, config: &ResolverConfig) -> Vec<SocketAddr> {
        match target {
            QueryTarget::SystemDefault => {
                for_family(&self.system_resolvers, config.address_family)
            }
            QueryTarget::Nameserver(ip) => vec![SocketAddr::new(ip, self.nameserver_port)],
        }
    }

    async fn exchange(
        &self,
        server: SocketAddr,
        query: &DnsQuery,
        config: &ResolverConfig,
    ) -> Result<DnsLookup, DomainError> {
        let (id, bytes) = MessageBuilder::build_query(query, config)?;
        let deadline = Instant::now() + self.timeout;

        let udp = UdpTransport::new(server).send(&bytes, self.timeout).await?;
        let mut response = Self::checked(id, &udp.bytes, server)?;
        let mut protocol = udp.protocol_used;

        if response.truncated {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Err(DomainError::QueryTimeout);
            }
            debug!(server = %server, domain = %query.domain, "Truncated response, retrying over TCP");
            let tcp = TcpTransport::new(server).send(&bytes, remaining).await?;
            response = Self::checked(id, &tcp.bytes, server)?;
            protocol = tcp.protocol_used;
        }

        if config.debug {
            info!(
                server = %server,
                protocol = protocol,
                domain = %query.domain,
                record_type = %query.record_type,
                status = response.lookup.status.as_str(),
                answers = ?response.lookup.answers,
                authority = ?response.lookup.authority,
                "DNS exchange"
            );
        }

        Ok(response.lookup)
    }

    fn checked(id: u16, bytes: &[u8], server: SocketAddr) -> Result<ParsedResponse, DomainError> {
        let response = ResponseParser::parse(bytes)?;
        if response.id != id {
            return Err(DomainError::InvalidDnsResponse(format!(
                "response id {} from {} does not match query id {}",
                response.id, server, id
            )));
        }
        Ok(response)
    }
}

#[async_trait]
impl DnsQueryPort for HickoryQueryClient {
    async fn query(
        &self,
        target: QueryTarget,
        query: &DnsQuery,
        config: &ResolverConfig,
    ) -> Result<DnsLookup, DomainError> {
        let mut last_error = DomainError::ResolutionError(format!("no server for {}", target));

        for server in self.servers_for(target, config) {
            match self.exchange(server, query, config).await {
                Ok(lookup) => return Ok(lookup),
                Err(e) => {
                    warn!(
                        server = %server,
                        domain = %query.domain,
                        record_type = %query.record_type,
                        error = %e,
                        "DNS query failed"
                    );
                    last_error = e;
                }
            }
        }

        Err(last_error)
    }
}
