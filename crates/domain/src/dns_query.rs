use super::RecordType;
use std::sync::Arc;

use crate::dns_record::DnsRecord;

#[derive(Debug, Clone)]
pub struct DnsQuery {
    /// Query name; always absolute (trailing dot).
    pub domain: Arc<str>,
    pub record_type: RecordType,
}

impl DnsQuery {
    /// Builds a query, appending the root dot when it is missing.
    pub fn new(domain: impl AsRef<str>, record_type: RecordType) -> Self {
        let domain = domain.as_ref();
        let domain: Arc<str> = if domain.ends_with('.') {
            Arc::from(domain)
        } else {
            Arc::from(format!("{}.", domain))
        };
        Self {
            domain,
            record_type,
        }
    }
}

/// Response code of a DNS answer, reduced to what the workflow branches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseStatus {
    NoError,
    NxDomain,
    Other(&'static str),
}

impl ResponseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseStatus::NoError => "NOERROR",
            ResponseStatus::NxDomain => "NXDOMAIN",
            ResponseStatus::Other(name) => name,
        }
    }
}

/// A response received from a nameserver. "No response at all" is an `Err`
/// from the query port, never a `DnsLookup`.
#[derive(Debug, Clone)]
pub struct DnsLookup {
    pub status: ResponseStatus,
    pub answers: Vec<DnsRecord>,
    pub authority: Vec<DnsRecord>,
}

impl DnsLookup {
    pub fn new(status: ResponseStatus, answers: Vec<DnsRecord>, authority: Vec<DnsRecord>) -> Self {
        Self {
            status,
            answers,
            authority,
        }
    }

    pub fn txt_values(&self) -> impl Iterator<Item = &str> {
        self.answers.iter().filter_map(DnsRecord::txt)
    }

    /// Owner of the first SOA record in the authority section.
    pub fn authority_soa_owner(&self) -> Option<&str> {
        self.authority
            .iter()
            .find(|r| r.is_soa())
            .map(|r| r.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dns_record::RecordData;

    #[test]
    fn test_query_name_gets_root_dot() {
        assert_eq!(&*DnsQuery::new("example.com", RecordType::NS).domain, "example.com.");
        assert_eq!(&*DnsQuery::new("example.com.", RecordType::NS).domain, "example.com.");
    }

    #[test]
    fn test_lookup_helpers() {
        let lookup = DnsLookup::new(
            ResponseStatus::NoError,
            vec![
                DnsRecord::new("_acme-challenge.example.com.", 1, RecordData::TXT("abc".into())),
                DnsRecord::new("_acme-challenge.example.com.", 1, RecordData::TXT("def".into())),
            ],
            vec![DnsRecord::new(
                "example.com.",
                300,
                RecordData::SOA {
                    mname: "ns1.example.com.".into(),
                },
            )],
        );
        assert_eq!(lookup.txt_values().collect::<Vec<_>>(), vec!["abc", "def"]);
        assert_eq!(lookup.authority_soa_owner(), Some("example.com."));
    }
}
