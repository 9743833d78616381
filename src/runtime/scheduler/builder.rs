/*!
 * Scheduler Builder
 * Builder pattern for Scheduler construction
 */

use super::stats::SchedulerStats;
use super::Scheduler;
use crate::core::errors::RuntimeError;
use crate::core::types::{ContextId, RuntimeResult};
use crate::runtime::context::ExecutionContext;
use crate::runtime::quantum::{ClockSource, Clock, QuantumConfig};
use crate::runtime::transfer::Program;
use std::time::Duration;
use tracing::info;

/// Builder for Scheduler
pub struct SchedulerBuilder<P: Program> {
    programs: Vec<P>,
    quantum: QuantumConfig,
}

impl<P: Program> SchedulerBuilder<P> {
    /// Create a new Scheduler builder
    pub fn new() -> Self {
        Self {
            programs: Vec::new(),
            quantum: QuantumConfig::default(),
        }
    }

    /// Use a complete quantum configuration
    pub fn with_quantum(mut self, quantum: QuantumConfig) -> Self {
        self.quantum = quantum;
        self
    }

    /// Set the quantum latency budget
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.quantum.latency = latency;
        self
    }

    /// Set the clock used for quantum accounting
    pub fn with_clock(mut self, clock: ClockSource) -> Self {
        self.quantum.clock = clock;
        self
    }

    /// Add one context running `program`
    pub fn with_context(mut self, program: P) -> Self {
        self.spawn(program);
        self
    }

    /// Add one context per program, in order
    pub fn with_contexts(mut self, programs: impl IntoIterator<Item = P>) -> Self {
        self.programs.extend(programs);
        self
    }

    /// Create a context and return its stable index
    pub fn spawn(&mut self, program: P) -> ContextId {
        self.programs.push(program);
        self.programs.len() - 1
    }

    /// Build the scheduler
    ///
    /// Fails with `NoContexts` when no context was added; round-robin over
    /// nothing is undefined.
    pub fn build(self) -> RuntimeResult<Scheduler<P>> {
        if self.programs.is_empty() {
            return Err(RuntimeError::NoContexts);
        }

        let contexts: Vec<_> = self
            .programs
            .into_iter()
            .enumerate()
            .map(|(id, program)| ExecutionContext::new(id, program))
            .collect();

        info!(
            contexts = contexts.len(),
            latency_micros = self.quantum.latency.as_micros() as u64,
            clock = self.quantum.clock.as_str(),
            "Scheduler initialized"
        );

        Ok(Scheduler {
            stats: SchedulerStats::new(contexts.len(), self.quantum),
            contexts,
            current: 0,
            clock: Clock::new(self.quantum.clock),
            quantum: self.quantum,
        })
    }
}

impl<P: Program> Default for SchedulerBuilder<P> {
    fn default() -> Self {
        Self::new()
    }
}
