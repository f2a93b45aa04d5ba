//! Configuration system for the pipeline simulator.
//!
//! This module defines the structures that parameterize a run. It provides:
//! 1. **Defaults:** Baseline machine constants (core count, memory size).
//! 2. **Structures:** Hierarchical config for system, pipeline, and general settings.
//!
//! Configuration is supplied as JSON (see the CLI's `--config`) or built from
//! `Config::default()` and adjusted field by field.

use std::collections::HashMap;

use serde::Deserialize;

use crate::isa::{LatencyTable, Opcode};

/// Default configuration constants for the simulator.
mod defaults {
    /// Number of simulated cores.
    pub const NUM_CORES: usize = 4;

    /// Shared memory size in words. Partitioned evenly across cores.
    pub const MEMORY_WORDS: usize = 4096;

    /// Operand forwarding is on unless explicitly disabled; without it the
    /// hazard unit stalls dependent instructions instead.
    pub const FORWARDING: bool = true;
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use mcsim_core::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.system.num_cores, 4);
/// assert!(config.pipeline.forwarding);
/// ```
///
/// Deserializing from JSON:
///
/// ```
/// use mcsim_core::config::Config;
///
/// let json = r#"{
///     "system": { "num_cores": 2, "memory_words": 1024 },
///     "pipeline": { "forwarding": false, "latencies": { "ADD": 3 } }
/// }"#;
/// let config: Config = serde_json::from_str(json).unwrap();
/// assert_eq!(config.system.num_cores, 2);
/// assert!(!config.pipeline.forwarding);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Machine shape: core count and memory size.
    #[serde(default)]
    pub system: SystemConfig,
    /// Pipeline behavior: forwarding and execute latencies.
    #[serde(default)]
    pub pipeline: PipelineConfig,
    /// General simulation settings.
    #[serde(default)]
    pub general: GeneralConfig,
}

/// Machine shape settings.
#[derive(Debug, Clone, Deserialize)]
pub struct SystemConfig {
    /// Number of simulated cores, each running its own copy of the program.
    #[serde(default = "SystemConfig::default_num_cores")]
    pub num_cores: usize,

    /// Shared memory size in words.
    #[serde(default = "SystemConfig::default_memory_words")]
    pub memory_words: usize,
}

impl SystemConfig {
    fn default_num_cores() -> usize {
        defaults::NUM_CORES
    }

    fn default_memory_words() -> usize {
        defaults::MEMORY_WORDS
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            num_cores: defaults::NUM_CORES,
            memory_words: defaults::MEMORY_WORDS,
        }
    }
}

/// Pipeline behavior settings.
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Enable the forwarding network. When off, RAW dependencies stall.
    #[serde(default = "PipelineConfig::default_forwarding")]
    pub forwarding: bool,

    /// Per-opcode execute latency overrides, keyed by mnemonic.
    /// Unlisted opcodes run at 1 cycle.
    #[serde(default)]
    pub latencies: HashMap<String, u64>,
}

impl PipelineConfig {
    fn default_forwarding() -> bool {
        defaults::FORWARDING
    }

    /// Builds the latency table the scheduler consults, dropping entries
    /// whose key is not a known mnemonic.
    pub fn latency_table(&self) -> LatencyTable {
        let mut table = LatencyTable::default();
        for (mnemonic, cycles) in &self.latencies {
            let op = Opcode::from_mnemonic(mnemonic);
            if op != Opcode::Unknown {
                table.set(op, *cycles);
            }
        }
        table
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            forwarding: defaults::FORWARDING,
            latencies: HashMap::new(),
        }
    }
}

/// General simulation settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneralConfig {
    /// Emit a per-cycle pipeline occupancy diagram through `tracing`.
    #[serde(default)]
    pub trace_pipeline: bool,
}
