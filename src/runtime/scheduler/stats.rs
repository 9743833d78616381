/*!
 * Scheduler Statistics
 * Per-scheduler and per-context counters for monitoring
 */

use crate::core::types::ContextId;
use crate::runtime::quantum::QuantumConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

fn is_zero_u64(v: &u64) -> bool {
    *v == 0
}

/// Scheduler-wide statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SchedulerStats {
    pub contexts: usize,
    pub finished: usize,
    /// Slices handed to a context
    pub slices: u64,
    /// Turns where control moved to a different context
    #[serde(skip_serializing_if = "is_zero_u64", default)]
    pub context_switches: u64,
    #[serde(skip_serializing_if = "is_zero_u64", default)]
    pub quantum_yields: u64,
    #[serde(skip_serializing_if = "is_zero_u64", default)]
    pub explicit_yields: u64,
    pub quantum_micros: u64,
}

impl SchedulerStats {
    pub(super) fn new(contexts: usize, quantum: QuantumConfig) -> Self {
        Self {
            contexts,
            quantum_micros: quantum.latency.as_micros() as u64,
            ..Default::default()
        }
    }
}

/// Per-context statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ContextStats {
    pub id: ContextId,
    pub running_time_micros: u64,
    pub resumptions: u64,
    pub checkpoints: u64,
    pub yields: u64,
    /// Deepest escape-return nesting reached
    pub max_call_depth: usize,
    pub finished: bool,
}

impl ContextStats {
    pub fn running_time(&self) -> Duration {
        Duration::from_micros(self.running_time_micros)
    }

    pub fn running_time_ms(&self) -> f64 {
        self.running_time_micros as f64 / 1000.0
    }
}
