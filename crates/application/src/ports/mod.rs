mod dns_query_port;
mod zone_editor;
mod zone_reloader;

pub use dns_query_port::DnsQueryPort;
pub use zone_editor::{SoaUpdate, ZoneEditor};
pub use zone_reloader::ZoneReloader;
