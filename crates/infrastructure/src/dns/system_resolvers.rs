//! Recursive resolvers used for `QueryTarget::SystemDefault`.

use acme_zonefile_domain::{AddressFamily, ValidatedIp};
use hickory_resolver::config::ResolverConfig;
use hickory_resolver::system_conf::read_system_conf;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use tracing::{debug, warn};

pub const DNS_PORT: u16 = 53;

/// Configured resolvers, else the host's resolver configuration, else 127.0.0.1.
///
/// Configured entries that are not address literals are skipped with a warning.
pub fn system_resolvers(configured: &[String]) -> Vec<SocketAddr> {
    let configured = configured_resolvers(configured);
    if !configured.is_empty() {
        return configured;
    }

    let discovered = match read_system_conf() {
        Ok((config, _opts)) => name_server_addrs(&config),
        Err(e) => {
            debug!(error = %e, "Cannot read system resolver configuration");
            Vec::new()
        }
    };
    or_localhost(discovered)
}

fn configured_resolvers(configured: &[String]) -> Vec<SocketAddr> {
    configured
        .iter()
        .filter_map(|entry| match ValidatedIp::new(entry) {
            Ok(ip) => Some(SocketAddr::new(ip.addr(), DNS_PORT)),
            Err(e) => {
                warn!(resolver = %entry, error = %e, "Ignoring configured resolver");
                None
            }
        })
        .collect()
}

/// Distinct server addresses of a resolver configuration, in listed order.
///
/// hickory lists every server once per protocol; those entries collapse into one.
fn name_server_addrs(config: &ResolverConfig) -> Vec<SocketAddr> {
    let mut addrs: Vec<SocketAddr> = Vec::new();
    for server in config.name_servers() {
        if !addrs.contains(&server.socket_addr) {
            addrs.push(server.socket_addr);
        }
    }
    addrs
}

fn or_localhost(addrs: Vec<SocketAddr>) -> Vec<SocketAddr> {
    if addrs.is_empty() {
        vec![SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), DNS_PORT)]
    } else {
        addrs
    }
}

/// Resolvers of the wanted family; all of them when none match.
pub fn for_family(resolvers: &[SocketAddr], family: AddressFamily) -> Vec<SocketAddr> {
    let matching: Vec<SocketAddr> = resolvers
        .iter()
        .copied()
        .filter(|addr| family.allows(&addr.ip()))
        .collect();
    if matching.is_empty() {
        resolvers.to_vec()
    } else {
        matching
    }
}
