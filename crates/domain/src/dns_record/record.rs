use std::net::{Ipv4Addr, Ipv6Addr};

/// Record payloads the workflow understands. Everything else is kept only
/// by its numeric type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordData {
    A(Ipv4Addr),
    AAAA(Ipv6Addr),
    /// Target host of an NS record, fully qualified.
    NS(String),
    /// Character-strings of one TXT record, concatenated.
    TXT(String),
    /// Primary nameserver of an SOA record.
    SOA { mname: String },
    Other(u16),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsRecord {
    /// Owner name, fully qualified.
    pub name: String,

    pub ttl: u32,

    pub data: RecordData,
}

impl DnsRecord {
    pub fn new(name: impl Into<String>, ttl: u32, data: RecordData) -> Self {
        Self {
            name: name.into(),
            ttl,
            data,
        }
    }

    pub fn txt(&self) -> Option<&str> {
        match &self.data {
            RecordData::TXT(text) => Some(text),
            _ => None,
        }
    }

    pub fn ns_target(&self) -> Option<&str> {
        match &self.data {
            RecordData::NS(target) => Some(target),
            _ => None,
        }
    }

    pub fn is_soa(&self) -> bool {
        matches!(self.data, RecordData::SOA { .. })
    }
}
