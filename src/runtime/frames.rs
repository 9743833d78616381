/*!
 * Algorithm Frame Stack
 * Arena of recursive-algorithm snapshots indexed by recursion depth
 */

use super::continuation::reserve_one;
use crate::core::errors::LogicViolation;
use crate::core::types::RuntimeResult;

/// Snapshots of in-progress recursive invocations
///
/// The frame at depth `d - 1` belongs to the invocation `d` levels deep.
/// A resumable algorithm keeps every local it needs across a checkpoint in
/// its top frame, so resuming never depends on native stack frames.
#[derive(Debug, Clone)]
pub struct FrameStack<F> {
    frames: Vec<F>,
    deepest: usize,
}

impl<F> FrameStack<F> {
    pub fn new() -> Self {
        Self {
            frames: Vec::new(),
            deepest: 0,
        }
    }

    /// Enter one recursion level
    pub fn push(&mut self, frame: F) -> RuntimeResult<()> {
        reserve_one(&mut self.frames, "algorithm frame stack")?;
        self.frames.push(frame);
        self.deepest = self.deepest.max(self.frames.len());
        Ok(())
    }

    /// Leave the current recursion level
    pub fn pop(&mut self) -> Result<F, LogicViolation> {
        self.frames.pop().ok_or(LogicViolation::MissingFrame)
    }

    pub fn top(&self) -> Result<&F, LogicViolation> {
        self.frames.last().ok_or(LogicViolation::MissingFrame)
    }

    pub fn top_mut(&mut self) -> Result<&mut F, LogicViolation> {
        self.frames.last_mut().ok_or(LogicViolation::MissingFrame)
    }

    /// Frame of the invocation at `depth` (1-based)
    pub fn at_depth(&self, depth: usize) -> Option<&F> {
        depth.checked_sub(1).and_then(|i| self.frames.get(i))
    }

    /// Fail unless exactly `expected` frames are live
    pub fn expect_depth(&self, expected: usize) -> Result<(), LogicViolation> {
        if self.frames.len() == expected {
            Ok(())
        } else {
            Err(LogicViolation::CorruptFrameStack {
                expected,
                found: self.frames.len(),
            })
        }
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Highest recursion depth ever reached
    pub fn deepest(&self) -> usize {
        self.deepest
    }
}

impl<F> Default for FrameStack<F> {
    fn default() -> Self {
        Self::new()
    }
}
