use acme_zonefile_application::ports::DnsQueryPort;
use acme_zonefile_domain::{
    DnsLookup, DnsQuery, DnsRecord, DomainError, QueryTarget, RecordData, RecordType,
    ResolverConfig, ResponseStatus,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Mutex;

type Key = (QueryTarget, String, RecordType);

/// Answers from a fixed table; anything not in the table times out.
#[derive(Default)]
pub struct MockDnsQueryPort {
    responses: Mutex<HashMap<Key, Result<DnsLookup, DomainError>>>,
    calls: Mutex<Vec<(QueryTarget, String, RecordType, ResolverConfig)>>,
}

impl MockDnsQueryPort {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_response(
        &self,
        target: QueryTarget,
        name: &str,
        record_type: RecordType,
        response: DnsLookup,
    ) {
        self.responses
            .lock()
            .unwrap()
            .insert((target, absolute(name), record_type), Ok(response));
    }

    pub fn set_error(&self, target: QueryTarget, name: &str, record_type: RecordType, error: DomainError) {
        self.responses
            .lock()
            .unwrap()
            .insert((target, absolute(name), record_type), Err(error));
    }

    /// Shorthand for a system-resolver A answer.
    pub fn set_host(&self, host: &str, ip: &str) {
        let addr: IpAddr = ip.parse().unwrap();
        let (record_type, record) = match addr {
            IpAddr::V4(v4) => (RecordType::A, v4_record(host, v4.to_string().as_str())),
            IpAddr::V6(v6) => (RecordType::AAAA, v6_record(host, v6.to_string().as_str())),
        };
        let key = (QueryTarget::SystemDefault, absolute(host), record_type);
        let mut responses = self.responses.lock().unwrap();
        match responses.get_mut(&key) {
            Some(Ok(existing)) => existing.answers.push(record),
            _ => {
                responses.insert(key, Ok(lookup(ResponseStatus::NoError, vec![record], vec![])));
            }
        }
    }

    pub fn calls(&self) -> Vec<(QueryTarget, String, RecordType, ResolverConfig)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, target: QueryTarget) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(t, ..)| *t == target)
            .count()
    }
}

#[async_trait]
impl DnsQueryPort for MockDnsQueryPort {
    async fn query(
        &self,
        target: QueryTarget,
        query: &DnsQuery,
        config: &ResolverConfig,
    ) -> Result<DnsLookup, DomainError> {
        self.calls.lock().unwrap().push((
            target,
            query.domain.to_string(),
            query.record_type,
            *config,
        ));
        self.responses
            .lock()
            .unwrap()
            .get(&(target, query.domain.to_string(), query.record_type))
            .cloned()
            .unwrap_or(Err(DomainError::QueryTimeout))
    }
}

fn absolute(name: &str) -> String {
    if name.ends_with('.') {
        name.to_string()
    } else {
        format!("{}.", name)
    }
}

pub fn lookup(status: ResponseStatus, answers: Vec<DnsRecord>, authority: Vec<DnsRecord>) -> DnsLookup {
    DnsLookup::new(status, answers, authority)
}

pub fn ns_record(owner: &str, target: &str) -> DnsRecord {
    DnsRecord::new(absolute(owner), 3600, RecordData::NS(absolute(target)))
}

pub fn soa_record(owner: &str, mname: &str) -> DnsRecord {
    DnsRecord::new(
        absolute(owner),
        300,
        RecordData::SOA {
            mname: absolute(mname),
        },
    )
}

pub fn txt_record(owner: &str, value: &str) -> DnsRecord {
    DnsRecord::new(absolute(owner), 1, RecordData::TXT(value.to_string()))
}

pub fn v4_record(owner: &str, ip: &str) -> DnsRecord {
    DnsRecord::new(absolute(owner), 300, RecordData::A(ip.parse().unwrap()))
}

pub fn v6_record(owner: &str, ip: &str) -> DnsRecord {
    DnsRecord::new(absolute(owner), 300, RecordData::AAAA(ip.parse().unwrap()))
}
