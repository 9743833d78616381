/*!
 * Run Report
 * Latency, per-context running time, and whole-run timing
 */

use crate::runtime::{ClockSource, ContextStats, SchedulerStats};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Report for one worker context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ContextReport {
    #[serde(flatten)]
    pub stats: ContextStats,
    pub path: PathBuf,
    /// Integers parsed from the input
    pub values: usize,
    pub bytes_read: usize,
    /// Polls of the pending read before it completed
    pub read_polls: u64,
    /// Deepest sort recursion
    pub sort_depth: usize,
}

/// Report for one pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RunReport {
    pub latency_micros: u64,
    pub clock: ClockSource,
    /// Wall time of the whole run
    pub total_micros: u64,
    pub scheduler: SchedulerStats,
    pub contexts: Vec<ContextReport>,
}

impl RunReport {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Latency: {}µs", self.latency_micros)?;
        for ctx in &self.contexts {
            writeln!(
                f,
                "Coroutine {} ran for {}µs ({} yields, {})",
                ctx.stats.id,
                ctx.stats.running_time_micros,
                ctx.stats.yields,
                ctx.path.display()
            )?;
        }
        write!(f, "Whole program ran for {}µs", self.total_micros)
    }
}
