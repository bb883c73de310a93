pub mod challenge;
pub mod nameservers;
pub mod propagation;

pub use challenge::{DeployChallengeUseCase, DeployRequest};
pub use nameservers::{DiscoverNameserversUseCase, ResolveAddressesUseCase, MAX_DELEGATION_DEPTH};
pub use propagation::{PropagationReport, PropagationSettings, WaitForPropagationUseCase};
