/*!
 * Async Read Adapters
 * Submit a whole-file read, poll it for completion, take the buffer
 *
 * The cooperative thread never blocks on a read: a worker submits the
 * request, then checkpoints until the adapter reports the read complete.
 */

use crate::core::errors::ReadError;
use crate::core::limits::{IO_THREAD_NAME, IO_WORKER_THREADS};
use std::cell::Cell;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::runtime::{Builder, Runtime};
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Boundary toward the asynchronous read mechanism
pub trait ReadAdapter {
    /// One in-flight read
    type Handle;

    /// Submit a read of the whole file at `path`
    fn request_read(&self, path: &Path) -> Result<Self::Handle, ReadError>;

    /// Whether the read has completed, successfully or not
    fn is_ready(&self, handle: &Self::Handle) -> bool;

    /// Consume a completed read
    ///
    /// Calling this before [`is_ready`](ReadAdapter::is_ready) reports true
    /// may block the calling thread.
    fn take_buffer(&self, handle: Self::Handle) -> Result<Vec<u8>, ReadError>;
}

/// Reads files on a background tokio runtime
///
/// Clones share the runtime.
#[derive(Clone)]
pub struct TokioReader {
    runtime: Arc<Runtime>,
}

/// In-flight read on a [`TokioReader`]
pub struct TokioReadHandle {
    path: PathBuf,
    task: JoinHandle<io::Result<Vec<u8>>>,
}

impl TokioReader {
    pub fn new() -> Result<Self, ReadError> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(IO_WORKER_THREADS)
            .thread_name(IO_THREAD_NAME)
            .build()
            .map_err(ReadError::Adapter)?;

        info!(threads = IO_WORKER_THREADS, "Background read runtime started");
        Ok(Self {
            runtime: Arc::new(runtime),
        })
    }
}

impl ReadAdapter for TokioReader {
    type Handle = TokioReadHandle;

    fn request_read(&self, path: &Path) -> Result<TokioReadHandle, ReadError> {
        let path = path.to_path_buf();
        let task = self.runtime.spawn(tokio::fs::read(path.clone()));
        debug!(path = %path.display(), "Read submitted");
        Ok(TokioReadHandle { path, task })
    }

    fn is_ready(&self, handle: &TokioReadHandle) -> bool {
        handle.task.is_finished()
    }

    fn take_buffer(&self, handle: TokioReadHandle) -> Result<Vec<u8>, ReadError> {
        let TokioReadHandle { path, task } = handle;
        match self.runtime.block_on(task) {
            Ok(Ok(bytes)) => Ok(bytes),
            Ok(Err(source)) => Err(ReadError::Io { path, source }),
            Err(join) => Err(ReadError::Aborted {
                path,
                reason: join.to_string(),
            }),
        }
    }
}

/// In-memory files that complete after a fixed number of polls
///
/// Every read reports not-ready for `pending_polls` calls to `is_ready`,
/// which makes the pending-read checkpoint loop observable in tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryReader {
    files: HashMap<PathBuf, Vec<u8>>,
    pending_polls: usize,
}

/// In-flight read on a [`MemoryReader`]
#[derive(Debug)]
pub struct MemoryReadHandle {
    path: PathBuf,
    remaining: Cell<usize>,
}

impl MemoryReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file
    pub fn with_file(mut self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) -> Self {
        self.files.insert(path.into(), contents.into());
        self
    }

    /// Polls each read stays pending for
    pub fn with_pending_polls(mut self, polls: usize) -> Self {
        self.pending_polls = polls;
        self
    }
}

impl ReadAdapter for MemoryReader {
    type Handle = MemoryReadHandle;

    fn request_read(&self, path: &Path) -> Result<MemoryReadHandle, ReadError> {
        if !self.files.contains_key(path) {
            return Err(ReadError::Io {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
            });
        }
        Ok(MemoryReadHandle {
            path: path.to_path_buf(),
            remaining: Cell::new(self.pending_polls),
        })
    }

    fn is_ready(&self, handle: &MemoryReadHandle) -> bool {
        match handle.remaining.get() {
            0 => true,
            left => {
                handle.remaining.set(left - 1);
                false
            }
        }
    }

    fn take_buffer(&self, handle: MemoryReadHandle) -> Result<Vec<u8>, ReadError> {
        self.files
            .get(&handle.path)
            .cloned()
            .ok_or_else(|| ReadError::Io {
                path: handle.path,
                source: io::Error::new(io::ErrorKind::NotFound, "file removed"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_reader_pending_polls() {
        let reader = MemoryReader::new()
            .with_file("a", "1 2 3")
            .with_pending_polls(2);

        let handle = reader.request_read(Path::new("a")).unwrap();
        assert!(!reader.is_ready(&handle));
        assert!(!reader.is_ready(&handle));
        assert!(reader.is_ready(&handle));
        assert_eq!(reader.take_buffer(handle).unwrap(), b"1 2 3".to_vec());
    }

    #[test]
    fn test_memory_reader_missing_file() {
        let reader = MemoryReader::new();
        let err = reader.request_read(Path::new("missing")).unwrap_err();
        assert!(matches!(err, ReadError::Io { .. }));
    }
}
