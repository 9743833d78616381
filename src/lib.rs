/*!
 * cosort
 * Cooperative single-threaded coroutine runtime with a resumable sort pipeline
 */

pub mod config;
pub mod core;
pub mod monitoring;
pub mod pipeline;
pub mod runtime;
pub mod sort;

// Re-exports
pub use crate::config::{Cli, Config};
pub use crate::core::errors::{LogicViolation, ReadError, RuntimeError};
pub use crate::core::types::{ContextId, RuntimeResult, Value};
pub use crate::monitoring::{init_tracing, ContextReport, RunReport};
pub use crate::pipeline::{merge_into, merge_sorted, parse, run_pipeline, MemoryReader, ReadAdapter, TokioReader};
pub use crate::runtime::{ClockSource, Program, QuantumConfig, Scheduler, Transfer};
pub use crate::sort::{ResumableSort, SortProgram};
