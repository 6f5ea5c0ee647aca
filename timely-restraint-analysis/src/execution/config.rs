/// Knobs for `analyse_program`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AnalysisConfig {
    workers: usize,
    memoize: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            workers: 1,
            memoize: true,
        }
    }
}

impl AnalysisConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of timely worker threads.
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Enables or disables the verdict cache shared by all workers.
    #[must_use]
    pub fn with_memoize(mut self, memoize: bool) -> Self {
        self.memoize = memoize;
        self
    }

    #[must_use]
    pub fn workers(&self) -> usize {
        self.workers
    }

    #[must_use]
    pub fn memoize(&self) -> bool {
        self.memoize
    }

    /// Returns the timely configuration for a single process with
    /// `workers` threads.
    ///
    /// # Errors
    ///
    /// Returns `Err` when no worker is configured.
    pub fn timely_config(&self) -> Result<timely::Config, &'static str> {
        if self.workers == 0 {
            return Err("Analysis needs at least one worker.");
        }

        Ok(timely::Config::process(self.workers))
    }
}

#[test]
fn test_builder() {
    let config = AnalysisConfig::new().with_workers(4).with_memoize(false);

    assert_eq!(config.workers(), 4);
    assert!(!config.memoize());
    assert_eq!(AnalysisConfig::default().workers(), 1);
    assert!(AnalysisConfig::default().memoize());
}

#[test]
fn test_zero_workers() {
    assert!(AnalysisConfig::new().with_workers(0).timely_config().is_err());
    assert!(AnalysisConfig::new().with_workers(2).timely_config().is_ok());
}
