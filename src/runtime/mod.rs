/*!
 * Cooperative Runtime
 * Single-threaded coroutine contexts, escape-return call emulation,
 * resumable algorithm frames, and the quantum-driven scheduler
 */

pub mod context;
pub mod continuation;
pub mod frames;
pub mod quantum;
pub mod scheduler;
pub mod transfer;

// Re-export public API
pub use context::{ExecutionContext, Suspension};
pub use continuation::Continuations;
pub use frames::FrameStack;
pub use quantum::{Clock, ClockSource, QuantumAccount, QuantumConfig};
pub use scheduler::{ContextStats, Scheduler, SchedulerBuilder, SchedulerStats};
pub use transfer::{Program, Transfer};
