//! Counter store configuration.

/// Configuration for opening a counter store.
#[derive(Debug, Clone)]
pub struct Config {
    /// Whether to sync the allocation log to disk after every allocation.
    ///
    /// When enabled (the default), `allocate_next` does not return until
    /// the allocation record is durable. Disabling trades durability of
    /// the most recent allocations for throughput; uniqueness within a
    /// process is unaffected either way.
    pub sync_on_write: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sync_on_write: true,
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether to sync the log after every allocation.
    #[must_use]
    pub const fn sync_on_write(mut self, value: bool) -> Self {
        self.sync_on_write = value;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_syncs() {
        let config = Config::default();
        assert!(config.sync_on_write);
    }

    #[test]
    fn builder_pattern() {
        let config = Config::new().sync_on_write(false);
        assert!(!config.sync_on_write);
    }
}
