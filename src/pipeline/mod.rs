/*!
 * Sort Pipeline
 * One worker context per input file: async read, parse, resumable sort;
 * the sorted arrays are merged and written once every context finishes
 */

mod merge;
mod output;
mod parser;
mod reader;
mod worker;

pub use merge::merge_sorted;
pub use output::{write_output, write_values};
pub use parser::parse;
pub use reader::{MemoryReadHandle, MemoryReader, ReadAdapter, TokioReadHandle, TokioReader};
pub use worker::{FileSlot, Worker, WorkerStep};

use crate::core::errors::RuntimeError;
use crate::core::types::{RuntimeResult, Value};
use crate::monitoring::{ContextReport, RunReport};
use crate::runtime::{QuantumConfig, Scheduler};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

/// Sorted per-input arrays plus the run report
#[derive(Debug)]
pub struct PipelineOutput {
    /// One sorted array per input, in input order
    pub arrays: Vec<Vec<Value>>,
    pub report: RunReport,
}

/// Run one worker context per input until all of them finish
///
/// Any read failure or runtime violation aborts the whole run.
pub fn run_pipeline<R>(
    inputs: &[PathBuf],
    reader: R,
    quantum: QuantumConfig,
) -> RuntimeResult<PipelineOutput>
where
    R: ReadAdapter + Clone,
{
    let started = Instant::now();

    let mut scheduler = Scheduler::builder()
        .with_quantum(quantum)
        .with_contexts(
            inputs
                .iter()
                .map(|path| Worker::new(path.clone(), reader.clone())),
        )
        .build()?;

    scheduler.wait_for_all()?;

    let scheduler_stats = scheduler.stats();
    let context_stats = scheduler.context_stats();
    let workers = scheduler.into_programs();

    let contexts = context_stats
        .into_iter()
        .zip(&workers)
        .map(|(stats, worker)| ContextReport {
            stats,
            path: worker.path().to_path_buf(),
            values: worker.array().len(),
            bytes_read: worker.bytes_read().unwrap_or(0),
            read_polls: worker.read_polls(),
            sort_depth: worker.sort_depth(),
        })
        .collect();

    let report = RunReport {
        latency_micros: quantum.latency.as_micros() as u64,
        clock: quantum.clock,
        total_micros: started.elapsed().as_micros() as u64,
        scheduler: scheduler_stats,
        contexts,
    };

    info!(
        contexts = report.contexts.len(),
        total_micros = report.total_micros,
        "Pipeline complete"
    );

    Ok(PipelineOutput {
        arrays: workers.into_iter().map(Worker::into_array).collect(),
        report,
    })
}

/// Merge the sorted arrays and write them to `path`
pub fn merge_into(path: &Path, arrays: Vec<Vec<Value>>) -> RuntimeResult<Vec<Value>> {
    let merged = merge_sorted(arrays);
    write_output(path, &merged).map_err(|source| RuntimeError::Output {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), values = merged.len(), "Merged output written");
    Ok(merged)
}
