/*!
 * Scheduler Core Operations
 * Turn taking, round-robin rotation, and completion detection
 */

use super::stats::{ContextStats, SchedulerStats};
use super::Scheduler;
use crate::core::types::{ContextId, RuntimeResult};
use crate::runtime::context::{ExecutionContext, Suspension};
use crate::runtime::transfer::Program;
use tracing::{debug, error, info, trace};

impl<P: Program> Scheduler<P> {
    /// Whether every context has finished
    pub fn is_all_finished(&self) -> bool {
        self.contexts.iter().all(ExecutionContext::is_finished)
    }

    /// Next context after `from` that has not finished
    ///
    /// Wraps modulo the context count; `from` itself comes last, after every
    /// other runnable context.
    fn next_runnable(&self, from: ContextId) -> Option<ContextId> {
        let n = self.contexts.len();
        (1..=n)
            .map(|offset| (from + offset) % n)
            .find(|&id| !self.contexts[id].is_finished())
    }

    /// Give the current context one slice, then rotate
    fn turn(&mut self) -> RuntimeResult<()> {
        let id = self.current;
        let ctx = &mut self.contexts[id];

        if !ctx.is_finished() {
            self.stats.slices += 1;
            match ctx.run_slice(&self.clock, &self.quantum) {
                Ok(Suspension::Quantum) => self.stats.quantum_yields += 1,
                Ok(Suspension::Yielded) => self.stats.explicit_yields += 1,
                Ok(Suspension::Finished) => {
                    self.stats.finished += 1;
                    info!(
                        context = id,
                        remaining = self.contexts.len() - self.stats.finished,
                        "Context finished"
                    );
                }
                Err(e) => {
                    error!(context = id, error = %e, "Context failed, aborting run");
                    return Err(e);
                }
            }
        }

        if let Some(next) = self.next_runnable(id) {
            if next != id {
                self.stats.context_switches += 1;
                trace!(from = id, to = next, "Context switch");
            }
            self.current = next;
        }
        Ok(())
    }

    /// Yield from the scheduler's own position until every context finishes
    ///
    /// This is a busy-poll: it returns only if every program reaches its
    /// finish within a bounded number of turns.
    pub fn wait_for_all(&mut self) -> RuntimeResult<()> {
        while !self.is_all_finished() {
            self.turn()?;
        }
        debug!(
            slices = self.stats.slices,
            switches = self.stats.context_switches,
            "No more active contexts"
        );
        Ok(())
    }

    /// Take at most `turns` turns
    ///
    /// Returns whether every context has finished.
    pub fn run_turns(&mut self, turns: usize) -> RuntimeResult<bool> {
        for _ in 0..turns {
            if self.is_all_finished() {
                break;
            }
            self.turn()?;
        }
        Ok(self.is_all_finished())
    }

    /// Run every context to completion and hand back the finished programs
    pub fn run_to_completion(mut self) -> RuntimeResult<Vec<P>> {
        self.wait_for_all()?;
        Ok(self.into_programs())
    }

    pub fn stats(&self) -> SchedulerStats {
        self.stats.clone()
    }

    /// Read-only running-time report, in context order
    pub fn context_stats(&self) -> Vec<ContextStats> {
        self.contexts.iter().map(ExecutionContext::stats).collect()
    }
}
