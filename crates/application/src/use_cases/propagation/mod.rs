mod settings;
mod wait_for_propagation;

pub use settings::{
    PropagationSettings, DEFAULT_QUERY_PAUSE_SECS, MAX_QUERY_PAUSE_SECS, MIN_QUERY_PAUSE_SECS,
};
pub use wait_for_propagation::{PropagationReport, WaitForPropagationUseCase};
