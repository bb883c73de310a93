mod deploy_challenge;

pub use deploy_challenge::{DeployChallengeUseCase, DeployRequest};
