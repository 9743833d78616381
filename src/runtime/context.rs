/*!
 * Execution Context
 * One cooperatively scheduled worker: saved resume point, escape-return
 * stack, quantum accounting, and the program it drives
 */

use super::continuation::Continuations;
use super::quantum::{Clock, QuantumAccount, QuantumConfig};
use super::scheduler::ContextStats;
use super::transfer::{Program, Transfer};
use crate::core::errors::LogicViolation;
use crate::core::types::{ContextId, RuntimeResult};
use tracing::{debug, trace};

/// Why a slice ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suspension {
    /// A checkpoint found the quantum spent
    Quantum,
    /// The program yielded explicitly
    Yielded,
    /// The program finished; the context is terminal
    Finished,
}

/// A logical thread of execution
///
/// The saved `resume` label is the scheduler-level suspension point; the
/// escape-return stack handles call/return inside the context. The two are
/// never mixed: switching contexts touches only `resume`.
pub struct ExecutionContext<P: Program> {
    id: ContextId,
    program: P,
    resume: Option<P::Label>,
    finished: bool,
    continuations: Continuations<P::Label>,
    account: QuantumAccount,
    resumptions: u64,
    checkpoints: u64,
    yields: u64,
}

impl<P: Program> ExecutionContext<P> {
    pub fn new(id: ContextId, program: P) -> Self {
        let entry = program.entry();
        Self {
            id,
            program,
            resume: Some(entry),
            finished: false,
            continuations: Continuations::new(),
            account: QuantumAccount::default(),
            resumptions: 0,
            checkpoints: 0,
            yields: 0,
        }
    }

    pub fn id(&self) -> ContextId {
        self.id
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn program(&self) -> &P {
        &self.program
    }

    pub fn into_program(self) -> P {
        self.program
    }

    /// Current escape-return depth
    pub fn call_depth(&self) -> usize {
        self.continuations.depth()
    }

    /// Label the context will resume at, if it is not finished
    pub fn resume_point(&self) -> Option<P::Label> {
        self.resume
    }

    /// Resume the program and drive it until it suspends or finishes
    ///
    /// Calls and escape-returns are resolved in place; only checkpoints
    /// (when the quantum is spent), explicit yields and finishing hand
    /// control back to the scheduler.
    pub fn run_slice(&mut self, clock: &Clock, quantum: &QuantumConfig) -> RuntimeResult<Suspension> {
        if self.finished {
            return Err(LogicViolation::AlreadyFinished(self.id).into());
        }
        let mut at = self
            .resume
            .take()
            .ok_or(LogicViolation::AlreadyFinished(self.id))?;

        self.account.begin_slice(clock.now());
        self.resumptions += 1;
        trace!(context = self.id, label = ?at, "context resumed");

        loop {
            match self.program.step(at)? {
                Transfer::Continue(next) => at = next,
                Transfer::Checkpoint(next) => {
                    self.checkpoints += 1;
                    let now = clock.now();
                    if quantum.is_due(self.account.elapsed(now)) {
                        self.account.charge(now);
                        self.yields += 1;
                        self.resume = Some(next);
                        return Ok(Suspension::Quantum);
                    }
                    at = next;
                }
                Transfer::Yield(next) => {
                    self.account.charge(clock.now());
                    self.yields += 1;
                    self.resume = Some(next);
                    return Ok(Suspension::Yielded);
                }
                Transfer::Call { entry, resume } => {
                    self.continuations.call(resume)?;
                    at = entry;
                }
                Transfer::EscapeReturn => at = self.continuations.escape_return()?,
                Transfer::Finish => {
                    self.finish(clock)?;
                    return Ok(Suspension::Finished);
                }
            }
        }
    }

    /// Mark the context terminal
    ///
    /// The escape-return stack must be empty: every call the program made
    /// has been returned from.
    fn finish(&mut self, clock: &Clock) -> RuntimeResult<()> {
        if self.finished {
            return Err(LogicViolation::AlreadyFinished(self.id).into());
        }
        let depth = self.continuations.depth();
        if depth != 0 {
            return Err(LogicViolation::UnbalancedCalls { depth }.into());
        }

        self.account.charge(clock.now());
        self.finished = true;
        debug!(
            context = self.id,
            running_micros = self.account.running().as_micros() as u64,
            "context finished"
        );
        Ok(())
    }

    pub fn stats(&self) -> ContextStats {
        ContextStats {
            id: self.id,
            running_time_micros: self.account.running().as_micros() as u64,
            resumptions: self.resumptions,
            checkpoints: self.checkpoints,
            yields: self.yields,
            max_call_depth: self.continuations.deepest(),
            finished: self.finished,
        }
    }
}
