//! Domain layer of the ACME zone-file challenge tool
pub mod challenge;
pub mod config;
pub mod dns_query;
pub mod dns_record;
pub mod errors;
pub mod resolver_config;
pub mod untaint;
pub mod zone_fragment;

pub use challenge::{challenge_record_name, encode_challenge};
pub use config::{CliOverrides, Config, ConfigError, DomainConfig};
pub use dns_query::{DnsLookup, DnsQuery, ResponseStatus};
pub use dns_record::{DnsRecord, RecordData, RecordType};
pub use errors::DomainError;
pub use resolver_config::{AddressFamily, QueryTarget, ResolverConfig};
pub use untaint::{untaint_fqdn, untaint_ip, ValidatedDomainName, ValidatedIp};
pub use zone_fragment::{SerialBump, ZoneFragmentSet};
