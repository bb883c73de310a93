pub mod forwarding;
pub mod query_client;
pub mod system_resolvers;
pub mod transport;

pub use query_client::{HickoryQueryClient, DEFAULT_QUERY_TIMEOUT_MS};
pub use system_resolvers::system_resolvers;
