use std::time::Duration;

pub const MIN_QUERY_PAUSE_SECS: u64 = 1;
pub const MAX_QUERY_PAUSE_SECS: u64 = 30;
pub const DEFAULT_QUERY_PAUSE_SECS: u64 = 2;

/// Deadline and polling interval of one propagation wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropagationSettings {
    timeout: Duration,
    query_pause: Duration,
}

impl PropagationSettings {
    /// `query_pause_secs` is clamped to [1, 30].
    pub fn new(timeout_secs: u64, query_pause_secs: u64) -> Self {
        let pause = query_pause_secs.clamp(MIN_QUERY_PAUSE_SECS, MAX_QUERY_PAUSE_SECS);
        Self {
            timeout: Duration::from_secs(timeout_secs),
            query_pause: Duration::from_secs(pause),
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn query_pause(&self) -> Duration {
        self.query_pause
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pause_is_clamped() {
        assert_eq!(PropagationSettings::new(60, 0).query_pause(), Duration::from_secs(1));
        assert_eq!(PropagationSettings::new(60, 2).query_pause(), Duration::from_secs(2));
        assert_eq!(PropagationSettings::new(60, 300).query_pause(), Duration::from_secs(30));
    }
}
