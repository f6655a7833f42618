//! Backend-neutral solve limits and output switches.

/// Options every backend is asked to honour; `None` keeps the backend's own
/// default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolverConfig {
    /// Wall-clock limit in seconds.
    pub time_limit: Option<f64>,
    /// Relative MIP gap at which the search stops.
    pub mip_gap: Option<f64>,
    pub threads: Option<u32>,
    /// Echo the backend's own log to the console.
    pub log_to_console: Option<bool>,
}

impl SolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_time_limit(mut self, seconds: f64) -> Self {
        self.time_limit = Some(seconds);
        self
    }

    pub fn with_mip_gap(mut self, gap: f64) -> Self {
        self.mip_gap = Some(gap);
        self
    }

    pub fn with_threads(mut self, count: u32) -> Self {
        self.threads = Some(count);
        self
    }

    pub fn with_log_to_console(mut self, enabled: bool) -> Self {
        self.log_to_console = Some(enabled);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_only_requested_fields() {
        let config = SolverConfig::new().with_time_limit(60.0).with_threads(4);
        assert_eq!(config.time_limit, Some(60.0));
        assert_eq!(config.threads, Some(4));
        assert_eq!(config.mip_gap, None);
        assert_eq!(config.log_to_console, None);
        assert_ne!(config, SolverConfig::default());
    }
}
