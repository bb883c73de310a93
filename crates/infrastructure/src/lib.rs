//! Adapters of the ACME zone-file challenge tool: DNS over hickory-proto,
//! the zone fragment files and the reload command.
pub mod dns;
pub mod system;
pub mod zone;
