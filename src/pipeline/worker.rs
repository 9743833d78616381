/*!
 * Pipeline Worker
 * Per-file context program: async read, parse, resumable sort, finish
 */

use super::parser::parse;
use super::reader::ReadAdapter;
use crate::core::errors::LogicViolation;
use crate::core::types::{RuntimeResult, Value};
use crate::runtime::{Program, Transfer};
use crate::sort::{ResumableSort, SortStep};
use std::mem;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Lifecycle of the worker's input file
#[derive(Debug)]
pub enum FileSlot<H> {
    /// No read submitted yet
    Idle,
    /// Read submitted, not yet taken
    Pending(H),
    /// Whole file in memory, not yet parsed
    Loaded(Vec<u8>),
    /// Buffer parsed and dropped
    Released { bytes: usize },
}

impl<H> FileSlot<H> {
    fn state(&self) -> &'static str {
        match self {
            FileSlot::Idle => "idle",
            FileSlot::Pending(_) => "pending",
            FileSlot::Loaded(_) => "loaded",
            FileSlot::Released { .. } => "released",
        }
    }
}

fn expected_state(expected: &str) -> LogicViolation {
    LogicViolation::FileState {
        expected: expected.to_string(),
    }
}

/// Resumption points of a worker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerStep {
    Start,
    RequestRead,
    PollRead,
    AfterRead,
    ParseBuffer,
    Parse,
    AfterParse,
    SortArray,
    Sort(SortStep),
    AfterSort,
    Finish,
}

/// One input file's journey through the pipeline
///
/// Reading and parsing are nested calls, the sort is a nested call into the
/// resumable sort machine, and a checkpoint separates every stage.
pub struct Worker<R: ReadAdapter> {
    path: PathBuf,
    reader: R,
    file: FileSlot<R::Handle>,
    array: Vec<Value>,
    sort: ResumableSort,
    read_polls: u64,
}

impl<R: ReadAdapter> Worker<R> {
    pub fn new(path: impl Into<PathBuf>, reader: R) -> Self {
        Self {
            path: path.into(),
            reader,
            file: FileSlot::Idle,
            array: Vec::new(),
            sort: ResumableSort::new(),
            read_polls: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file(&self) -> &FileSlot<R::Handle> {
        &self.file
    }

    pub fn array(&self) -> &[Value] {
        &self.array
    }

    /// Size of the input once it has been parsed
    pub fn bytes_read(&self) -> Option<usize> {
        match self.file {
            FileSlot::Released { bytes } => Some(bytes),
            _ => None,
        }
    }

    /// Times the pending read was polled
    pub fn read_polls(&self) -> u64 {
        self.read_polls
    }

    /// Deepest recursion the sort reached
    pub fn sort_depth(&self) -> usize {
        self.sort.deepest()
    }

    /// Hand off the sorted array
    pub fn into_array(self) -> Vec<Value> {
        self.array
    }

    fn request_read(&mut self) -> RuntimeResult<Transfer<WorkerStep>> {
        if !matches!(self.file, FileSlot::Idle) {
            return Err(expected_state("idle").into());
        }
        let handle = self.reader.request_read(&self.path)?;
        self.file = FileSlot::Pending(handle);
        Ok(Transfer::Checkpoint(WorkerStep::PollRead))
    }

    fn poll_read(&mut self) -> RuntimeResult<Transfer<WorkerStep>> {
        self.read_polls += 1;
        match &self.file {
            FileSlot::Pending(handle) if !self.reader.is_ready(handle) => {
                return Ok(Transfer::Checkpoint(WorkerStep::PollRead));
            }
            FileSlot::Pending(_) => {}
            _ => return Err(expected_state("pending").into()),
        }

        let FileSlot::Pending(handle) = mem::replace(&mut self.file, FileSlot::Idle) else {
            return Err(expected_state("pending").into());
        };
        let buffer = self.reader.take_buffer(handle)?;
        debug!(
            path = %self.path.display(),
            bytes = buffer.len(),
            polls = self.read_polls,
            "Read complete"
        );
        self.file = FileSlot::Loaded(buffer);
        Ok(Transfer::EscapeReturn)
    }

    fn parse_buffer(&mut self) -> RuntimeResult<Transfer<WorkerStep>> {
        let FileSlot::Loaded(buffer) = mem::replace(&mut self.file, FileSlot::Idle) else {
            return Err(expected_state("loaded").into());
        };
        self.array = parse(&buffer);
        self.file = FileSlot::Released {
            bytes: buffer.len(),
        };
        debug!(
            path = %self.path.display(),
            values = self.array.len(),
            "Buffer parsed and released"
        );
        Ok(Transfer::EscapeReturn)
    }
}

impl<R: ReadAdapter> Program for Worker<R> {
    type Label = WorkerStep;

    fn entry(&self) -> WorkerStep {
        WorkerStep::Start
    }

    fn step(&mut self, at: WorkerStep) -> RuntimeResult<Transfer<WorkerStep>> {
        match at {
            WorkerStep::Start => Ok(Transfer::call(WorkerStep::RequestRead, WorkerStep::AfterRead)),
            WorkerStep::RequestRead => self.request_read(),
            WorkerStep::PollRead => self.poll_read(),
            WorkerStep::AfterRead => Ok(Transfer::Checkpoint(WorkerStep::ParseBuffer)),
            WorkerStep::ParseBuffer => Ok(Transfer::call(WorkerStep::Parse, WorkerStep::AfterParse)),
            WorkerStep::Parse => self.parse_buffer(),
            WorkerStep::AfterParse => Ok(Transfer::Checkpoint(WorkerStep::SortArray)),
            WorkerStep::SortArray => Ok(Transfer::call(
                WorkerStep::Sort(SortStep::Begin),
                WorkerStep::AfterSort,
            )),
            WorkerStep::Sort(step) => Ok(self
                .sort
                .step(step, &mut self.array)?
                .map(WorkerStep::Sort)),
            WorkerStep::AfterSort => Ok(Transfer::Checkpoint(WorkerStep::Finish)),
            WorkerStep::Finish => {
                debug!(
                    path = %self.path.display(),
                    file = self.file.state(),
                    "Worker done"
                );
                Ok(Transfer::Finish)
            }
        }
    }
}
