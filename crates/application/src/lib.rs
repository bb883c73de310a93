//! Use cases and ports of the ACME zone-file challenge tool
pub mod ports;
pub mod use_cases;
