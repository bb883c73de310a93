//! DNS Message Builder
//!
//! Constructs query messages in wire format using `hickory-proto`.

use super::record_type_map::RecordTypeMapper;
use acme_zonefile_domain::{DnsQuery, DomainError, ResolverConfig};
use hickory_proto::op::{Edns, Message, MessageType, OpCode, Query};
use hickory_proto::rr::{DNSClass, Name};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::str::FromStr;

/// Advertised UDP payload size when EDNS(0) is attached.
pub const EDNS_MAX_PAYLOAD: u16 = 4096;

pub struct MessageBuilder;

impl MessageBuilder {
    /// Builds a query with a random id and returns the id with the wire bytes.
    ///
    /// RD follows `config.recurse`. With `config.dnssec` an OPT record with
    /// the DO bit is added.
    pub fn build_query(
        query: &DnsQuery,
        config: &ResolverConfig,
    ) -> Result<(u16, Vec<u8>), DomainError> {
        let name = Name::from_str(&query.domain).map_err(|e| {
            DomainError::InvalidDomainName(format!("Invalid domain '{}': {}", query.domain, e))
        })?;

        let mut question = Query::new();
        question.set_name(name);
        question.set_query_type(RecordTypeMapper::to_hickory(&query.record_type));
        question.set_query_class(DNSClass::IN);

        let id = fastrand::u16(..);
        let mut message = Message::new(id, MessageType::Query, OpCode::Query);
        message.set_recursion_desired(config.recurse);
        message.add_query(question);

        if config.dnssec {
            let edns = message.extensions_mut().get_or_insert_with(Edns::new);
            edns.set_dnssec_ok(true);
            edns.set_max_payload(EDNS_MAX_PAYLOAD);
        }

        let bytes = Self::serialize_message(&message)?;
        Ok((id, bytes))
    }

    fn serialize_message(message: &Message) -> Result<Vec<u8>, DomainError> {
        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);

        message.emit(&mut encoder).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to serialize DNS message: {}", e))
        })?;

        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use acme_zonefile_domain::{AddressFamily, RecordType};

    fn config(recurse: bool, dnssec: bool) -> ResolverConfig {
        let base = ResolverConfig::recursive(dnssec, false, AddressFamily::Both);
        if recurse {
            base
        } else {
            base.authoritative()
        }
    }

    #[test]
    fn test_id_is_written_to_header() {
        let query = DnsQuery::new("example.com", RecordType::NS);
        let (id, bytes) = MessageBuilder::build_query(&query, &config(true, false)).unwrap();
        assert_eq!(u16::from_be_bytes([bytes[0], bytes[1]]), id);
    }

    #[test]
    fn test_rd_flag_follows_config() {
        let query = DnsQuery::new("_acme-challenge.example.com", RecordType::TXT);

        let (_, recursive) = MessageBuilder::build_query(&query, &config(true, false)).unwrap();
        assert_eq!(recursive[2] & 0x01, 0x01, "RD flag should be set");

        let (_, direct) = MessageBuilder::build_query(&query, &config(false, false)).unwrap();
        assert_eq!(direct[2] & 0x01, 0x00, "RD flag should be clear");
    }

    #[test]
    fn test_dnssec_adds_opt_record() {
        let query = DnsQuery::new("example.com", RecordType::SOA);

        let (_, plain) = MessageBuilder::build_query(&query, &config(true, false)).unwrap();
        assert_eq!(u16::from_be_bytes([plain[10], plain[11]]), 0);

        let (_, signed) = MessageBuilder::build_query(&query, &config(true, true)).unwrap();
        assert_eq!(u16::from_be_bytes([signed[10], signed[11]]), 1, "ARCOUNT");
        let parsed = Message::from_vec(&signed).unwrap();
        let edns = parsed.extensions().as_ref().unwrap();
        assert!(edns.flags().dnssec_ok);
    }
}
