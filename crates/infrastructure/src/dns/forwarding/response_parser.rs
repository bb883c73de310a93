use acme_zonefile_domain::{DnsLookup, DnsRecord, DomainError, RecordData, ResponseStatus};
use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::{RData, Record};
use tracing::debug;

/// A decoded response, before the caller checks id and TC.
#[derive(Debug, Clone)]
pub struct ParsedResponse {
    pub id: u16,
    pub truncated: bool,
    pub lookup: DnsLookup,
}

pub struct ResponseParser;

impl ResponseParser {
    pub fn parse(response_bytes: &[u8]) -> Result<ParsedResponse, DomainError> {
        let message = Message::from_vec(response_bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to parse DNS response: {}", e))
        })?;

        let rcode = message.response_code();
        let truncated = message.truncated();

        let answers: Vec<DnsRecord> = message.answers().iter().map(Self::convert).collect();
        let authority: Vec<DnsRecord> =
            message.name_servers().iter().map(Self::convert).collect();

        debug!(
            rcode = Self::rcode_to_status(rcode),
            answers = answers.len(),
            authority = authority.len(),
            truncated = truncated,
            "DNS response parsed"
        );

        Ok(ParsedResponse {
            id: message.id(),
            truncated,
            lookup: DnsLookup::new(Self::status(rcode), answers, authority),
        })
    }

    fn convert(record: &Record) -> DnsRecord {
        let data = match record.data() {
            RData::A(a) => RecordData::A(a.0),
            RData::AAAA(aaaa) => RecordData::AAAA(aaaa.0),
            RData::NS(ns) => RecordData::NS(ns.0.to_utf8()),
            RData::TXT(txt) => RecordData::TXT(
                txt.txt_data()
                    .iter()
                    .map(|data| String::from_utf8_lossy(data))
                    .collect(),
            ),
            RData::SOA(soa) => RecordData::SOA {
                mname: soa.mname().to_utf8(),
            },
            other => RecordData::Other(u16::from(other.record_type())),
        };
        DnsRecord::new(record.name().to_utf8(), record.ttl(), data)
    }

    fn status(rcode: ResponseCode) -> ResponseStatus {
        match rcode {
            ResponseCode::NoError => ResponseStatus::NoError,
            ResponseCode::NXDomain => ResponseStatus::NxDomain,
            other => ResponseStatus::Other(Self::rcode_to_status(other)),
        }
    }

    pub fn rcode_to_status(rcode: ResponseCode) -> &'static str {
        match rcode {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::NXDomain => "NXDOMAIN",
            ResponseCode::ServFail => "SERVFAIL",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::NotImp => "NOTIMP",
            ResponseCode::FormErr => "FORMERR",
            _ => "UNKNOWN",
        }
    }
}
