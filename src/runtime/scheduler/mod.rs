/*!
 * Cooperative Scheduler
 * Round-robin over a fixed set of execution contexts with a time-quantum
 * checkpoint policy
 */

use super::context::ExecutionContext;
use super::quantum::{Clock, QuantumConfig};
use super::transfer::Program;
use crate::core::types::ContextId;

mod builder;
mod operations;
mod stats;

pub use builder::SchedulerBuilder;
pub use stats::{ContextStats, SchedulerStats};

/// Cooperative scheduler
///
/// Owns every context; exactly one of them runs at a time, on the calling
/// thread. Rotation order is fixed by context index. Finished contexts stay
/// in place and are skipped.
///
/// Liveness is the programs' responsibility: a context that never reaches a
/// checkpoint, yield, or finish starves all others, and `wait_for_all` only
/// returns once every program has finished.
pub struct Scheduler<P: Program> {
    contexts: Vec<ExecutionContext<P>>,
    current: ContextId,
    quantum: QuantumConfig,
    clock: Clock,
    stats: SchedulerStats,
}

impl<P: Program> Scheduler<P> {
    /// Start building a scheduler
    pub fn builder() -> SchedulerBuilder<P> {
        SchedulerBuilder::new()
    }

    pub fn quantum(&self) -> QuantumConfig {
        self.quantum
    }

    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    /// Always false: construction rejects an empty context set
    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }

    /// Context that runs on the next turn
    pub fn current(&self) -> ContextId {
        self.current
    }

    pub fn context(&self, id: ContextId) -> Option<&ExecutionContext<P>> {
        self.contexts.get(id)
    }

    pub fn program(&self, id: ContextId) -> Option<&P> {
        self.contexts.get(id).map(ExecutionContext::program)
    }

    /// Hand the programs back in context order
    pub fn into_programs(self) -> Vec<P> {
        self.contexts
            .into_iter()
            .map(ExecutionContext::into_program)
            .collect()
    }
}
