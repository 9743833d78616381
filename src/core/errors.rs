/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use crate::core::types::ContextId;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::collections::TryReserveError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Broken call/return or frame discipline inside a context
///
/// These are caller bugs. The runtime checks them instead of continuing with
/// a corrupted stack.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "violation", content = "details", rename_all = "snake_case")]
pub enum LogicViolation {
    #[error("escape-return with an empty continuation stack")]
    #[diagnostic(
        code(runtime::escape_underflow),
        help("Every escape-return must match exactly one earlier call.")
    )]
    EscapeUnderflow,

    #[error("program finished with {depth} unmatched call(s)")]
    #[diagnostic(
        code(runtime::unbalanced_calls),
        help("Each call must be closed by an escape-return before the program finishes.")
    )]
    UnbalancedCalls { depth: usize },

    #[error("context {0} is already finished")]
    #[diagnostic(
        code(runtime::already_finished),
        help("A finished context must never be resumed, returned into, or finished again.")
    )]
    AlreadyFinished(ContextId),

    #[error("frame stack depth is {found}, expected {expected}")]
    #[diagnostic(
        code(sort::corrupt_frame_stack),
        help("A nested call returned to a frame that is no longer on top of the stack.")
    )]
    CorruptFrameStack { expected: usize, found: usize },

    #[error("no algorithm frame to resume")]
    #[diagnostic(code(sort::missing_frame))]
    MissingFrame,

    #[error("segment {start}..{start}+{len} exceeds array of {size} elements")]
    #[diagnostic(code(sort::segment_out_of_bounds))]
    SegmentOutOfBounds {
        start: usize,
        len: usize,
        size: usize,
    },

    #[error("file buffer is not in the {expected} state")]
    #[diagnostic(code(pipeline::file_state))]
    FileState { expected: String },
}

/// Failures reported by a read adapter
#[derive(Error, Debug, Diagnostic)]
pub enum ReadError {
    #[error("failed to read {path}: {source}")]
    #[diagnostic(
        code(read::io),
        help("Check that the input file exists and is readable.")
    )]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("read of {path} did not complete: {reason}")]
    #[diagnostic(code(read::aborted))]
    Aborted { path: PathBuf, reason: String },

    #[error("failed to start read adapter: {0}")]
    #[diagnostic(code(read::adapter))]
    Adapter(#[source] io::Error),
}

/// Unified runtime error
///
/// Every variant is fatal for the whole run; contexts have no way to fail
/// independently of the process.
#[derive(Error, Debug, Diagnostic)]
pub enum RuntimeError {
    #[error("failed to grow the {stack} beyond {capacity} entries")]
    #[diagnostic(
        code(runtime::resource_exhaustion),
        help("The process is out of memory; no partial recovery is attempted.")
    )]
    ResourceExhaustion {
        stack: &'static str,
        capacity: usize,
        #[source]
        source: TryReserveError,
    },

    #[error("scheduler needs at least one context")]
    #[diagnostic(
        code(runtime::no_contexts),
        help("Create one context per input before building the scheduler.")
    )]
    NoContexts,

    #[error("logic violation: {0}")]
    #[diagnostic(transparent)]
    Logic(#[from] LogicViolation),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Read(#[from] ReadError),

    #[error("failed to write {path}: {source}")]
    #[diagnostic(code(pipeline::output))]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl RuntimeError {
    /// Whether this error is a checked caller bug rather than an environment failure
    pub fn is_logic_violation(&self) -> bool {
        matches!(self, RuntimeError::Logic(_))
    }
}
