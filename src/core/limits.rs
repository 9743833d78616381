/*!
 * Runtime Limits and Constants
 *
 * Centralized location for defaults and growth rules shared by the
 * scheduler, the per-context stacks, and the pipeline.
 */

use std::time::Duration;

// =============================================================================
// QUANTUM
// =============================================================================

/// Default quantum latency budget (1ms)
/// A context that has run this long yields at its next checkpoint
pub const DEFAULT_LATENCY_MICROS: u64 = 1_000;

/// Default quantum latency as a `Duration`
pub const DEFAULT_LATENCY: Duration = Duration::from_micros(DEFAULT_LATENCY_MICROS);

// =============================================================================
// PER-CONTEXT STACKS
// =============================================================================

/// Capacity an empty escape-return or frame stack grows to on first push
pub const INITIAL_STACK_CAPACITY: usize = 2;

/// Next capacity for a full stack
///
/// Amortized doubling: 0 -> 2 -> 6 -> 14 -> ...
#[inline]
pub const fn grown_capacity(current: usize) -> usize {
    (current + 1) * INITIAL_STACK_CAPACITY
}

// =============================================================================
// PIPELINE
// =============================================================================

/// Default path of the merged output file
pub const DEFAULT_OUTPUT_PATH: &str = "mergedFile";

/// Initial capacity of a freshly parsed array
pub const INITIAL_ARRAY_CAPACITY: usize = 10;

/// Name of the background I/O threads used by the tokio read adapter
pub const IO_THREAD_NAME: &str = "cosort-io";

/// Worker threads in the background I/O runtime
pub const IO_WORKER_THREADS: usize = 1;
