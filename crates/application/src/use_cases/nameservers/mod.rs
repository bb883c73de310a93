mod discover_nameservers;
mod resolve_addresses;

pub use discover_nameservers::{DiscoverNameserversUseCase, MAX_DELEGATION_DEPTH};
pub use resolve_addresses::ResolveAddressesUseCase;
