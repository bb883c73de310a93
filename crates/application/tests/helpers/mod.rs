#![allow(dead_code)]
#![allow(unused_imports)]

mod mock_dns;
mod mock_zone;

pub use mock_dns::{lookup, ns_record, soa_record, txt_record, v4_record, v6_record, MockDnsQueryPort};
pub use mock_zone::{MockZoneEditor, MockZoneReloader};
