use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid IP address: {0}")]
    InvalidIpAddress(String),

    #[error("Required file {path} does not exist (it must be provisioned before first use)")]
    PreconditionFailed { path: String },

    #[error("No SOA serial found in {path}")]
    MalformedZoneFragment { path: String },

    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },

    #[error("No response from nameservers: {0}")]
    ResolutionError(String),

    #[error("No authoritative nameservers found for {0}")]
    NoNameserversFound(String),

    #[error("Nameserver discovery for {0} exceeded the delegation recursion limit")]
    RecursionLimitExceeded(String),

    #[error("Challenge not visible on nameservers: {}", .pending.join(", "))]
    PropagationTimeout { pending: Vec<String> },

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("Query timeout")]
    QueryTimeout,

    #[error("Transport error talking to {server}: {message}")]
    Transport { server: String, message: String },

    #[error("Zone reload failed: {0}")]
    ReloadFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl DomainError {
    pub fn io(path: impl AsRef<std::path::Path>, err: std::io::Error) -> Self {
        DomainError::Io {
            path: path.as_ref().display().to_string(),
            message: err.to_string(),
        }
    }

    /// Fatal errors abort the whole workflow; the rest are absorbed by the caller.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            DomainError::ResolutionError(_)
                | DomainError::InvalidDnsResponse(_)
                | DomainError::QueryTimeout
                | DomainError::Transport { .. }
                | DomainError::PropagationTimeout { .. }
        )
    }
}
