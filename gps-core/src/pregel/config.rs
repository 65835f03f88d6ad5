//! Superstep engine configuration
//!
//! Parallelism, partition statistics, history retention, and the superstep
//! cap used by the run driver.

use serde::{Deserialize, Serialize};

use crate::graph::PartitionStrategy;

use super::error::PregelError;

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Worker threads used to compute vertices within one round
    pub parallelism: usize,

    /// Logical partitions reported in round statistics (1 = no stats)
    pub partitions: usize,

    /// How vertices are assigned to partitions
    pub partition_strategy: PartitionStrategy,

    /// Keep every round's deliveries in the history
    pub record_history: bool,

    /// Superstep cap for the run driver
    pub max_supersteps: usize,

    /// Emit per-round tracing events
    pub tracing_enabled: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            parallelism: num_cpus::get(),
            partitions: 1,
            partition_strategy: PartitionStrategy::default(),
            record_history: true,
            max_supersteps: 100,
            tracing_enabled: true,
        }
    }
}

impl EngineConfig {
    /// Create a new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-threaded configuration
    pub fn sequential() -> Self {
        Self::default().with_parallelism(1)
    }

    /// Set parallelism level
    pub fn with_parallelism(mut self, parallelism: usize) -> Self {
        self.parallelism = parallelism.max(1);
        self
    }

    /// Set the number of logical partitions
    pub fn with_partitions(mut self, partitions: usize) -> Self {
        self.partitions = partitions.max(1);
        self
    }

    /// Set the partition strategy
    pub fn with_partition_strategy(mut self, strategy: PartitionStrategy) -> Self {
        self.partition_strategy = strategy;
        self
    }

    /// Enable or disable history retention
    pub fn with_history(mut self, enabled: bool) -> Self {
        self.record_history = enabled;
        self
    }

    /// Set maximum supersteps
    pub fn with_max_supersteps(mut self, max: usize) -> Self {
        self.max_supersteps = max;
        self
    }

    /// Enable or disable tracing
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.tracing_enabled = enabled;
        self
    }

    /// Check if rounds run on a worker pool
    pub fn is_parallel(&self) -> bool {
        self.parallelism > 1
    }

    /// Check if per-partition statistics are collected
    pub fn partition_stats_enabled(&self) -> bool {
        self.partitions > 1
    }

    /// Reject settings no engine can run with.
    ///
    /// The builders clamp to valid minimums, but the fields are public and
    /// deserializable.
    pub fn validate(&self) -> Result<(), PregelError> {
        if self.parallelism == 0 {
            return Err(PregelError::config_error("parallelism must be at least 1"));
        }
        if self.partitions == 0 {
            return Err(PregelError::config_error("partitions must be at least 1"));
        }
        if self.max_supersteps == 0 {
            return Err(PregelError::config_error("max_supersteps must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.max_supersteps, 100);
        assert!(config.parallelism > 0);
        assert_eq!(config.partitions, 1);
        assert!(config.record_history);
        assert!(!config.partition_stats_enabled());
    }

    #[test]
    fn test_config_builder() {
        let config = EngineConfig::default()
            .with_max_supersteps(50)
            .with_parallelism(4)
            .with_partitions(3)
            .with_partition_strategy(PartitionStrategy::Range);

        assert_eq!(config.max_supersteps, 50);
        assert_eq!(config.parallelism, 4);
        assert_eq!(config.partitions, 3);
        assert_eq!(config.partition_strategy, PartitionStrategy::Range);
        assert!(config.is_parallel());
        assert!(config.partition_stats_enabled());
    }

    #[test]
    fn test_minimums() {
        let config = EngineConfig::default().with_parallelism(0).with_partitions(0);
        assert_eq!(config.parallelism, 1);
        assert_eq!(config.partitions, 1);
        assert!(!config.is_parallel());
    }

    #[test]
    fn test_sequential() {
        assert_eq!(EngineConfig::sequential().parallelism, 1);
    }

    #[test]
    fn test_validate() {
        assert!(EngineConfig::default().validate().is_ok());

        let err = EngineConfig::default().with_max_supersteps(0).validate().unwrap_err();
        assert!(matches!(err, PregelError::ConfigError(_)));
        assert_eq!(err.to_string(), "Configuration error: max_supersteps must be at least 1");

        let config: EngineConfig = serde_json::from_str(
            r#"{
                "parallelism": 0,
                "partitions": 1,
                "partition_strategy": "Hash",
                "record_history": true,
                "max_supersteps": 10,
                "tracing_enabled": true
            }"#,
        )
        .unwrap();
        assert!(matches!(config.validate(), Err(PregelError::ConfigError(_))));
    }

    #[test]
    fn test_config_from_json() {
        let config: EngineConfig = serde_json::from_str(
            r#"{
                "parallelism": 2,
                "partitions": 4,
                "partition_strategy": "Range",
                "record_history": false,
                "max_supersteps": 10,
                "tracing_enabled": false
            }"#,
        )
        .unwrap();
        assert_eq!(config.parallelism, 2);
        assert_eq!(config.partition_strategy, PartitionStrategy::Range);
        assert!(!config.record_history);
    }
}
