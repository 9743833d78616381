/*!
 * Resumable Sort
 * In-place Lomuto quicksort that can be suspended at every loop iteration
 *
 * Recursion goes through escape-return calls and all loop state lives in
 * the frame stack, so a context can be switched away at any checkpoint and
 * resume from the top frame alone.
 */

use super::frame::PartitionFrame;
use crate::core::errors::LogicViolation;
use crate::core::types::{RuntimeResult, Value};
use crate::runtime::{FrameStack, Transfer};

/// Resumption points of the sort
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortStep {
    /// Sort the whole array
    Begin,
    /// Whole-array sort returned
    Done,
    /// Entry of `sort(segment)`
    Enter { start: usize, len: usize },
    /// One scan iteration over the top frame
    Partition,
    /// Swap the pivot into its final slot
    PlacePivot,
    /// Recurse into the left part
    RecurseLeft,
    /// Left recursion returned to the frame at `depth`
    AfterLeft { depth: usize },
    /// Recurse into the right part
    RecurseRight { depth: usize },
    /// Right recursion returned to the frame at `depth`
    AfterRight { depth: usize },
}

/// Sort state machine
///
/// Drive it with [`step`](ResumableSort::step) starting from
/// [`SortStep::Begin`], inside a `Transfer::Call` so that the final
/// escape-return lands back in the caller.
#[derive(Debug, Default)]
pub struct ResumableSort {
    frames: FrameStack<PartitionFrame>,
}

impl ResumableSort {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> &FrameStack<PartitionFrame> {
        &self.frames
    }

    /// Current logical recursion depth
    pub fn depth(&self) -> usize {
        self.frames.depth()
    }

    /// Deepest recursion reached so far
    pub fn deepest(&self) -> usize {
        self.frames.deepest()
    }

    pub fn step(&mut self, at: SortStep, data: &mut [Value]) -> RuntimeResult<Transfer<SortStep>> {
        let transfer = match at {
            SortStep::Begin => Transfer::call(
                SortStep::Enter {
                    start: 0,
                    len: data.len(),
                },
                SortStep::Done,
            ),
            SortStep::Done => {
                self.frames.expect_depth(0)?;
                Transfer::EscapeReturn
            }
            SortStep::Enter { start, len } => {
                if len < 2 {
                    return Ok(Transfer::EscapeReturn);
                }
                if start + len > data.len() {
                    return Err(LogicViolation::SegmentOutOfBounds {
                        start,
                        len,
                        size: data.len(),
                    }
                    .into());
                }
                let pivot = data[start + len - 1];
                self.frames.push(PartitionFrame::new(start, len, pivot))?;
                Transfer::Checkpoint(SortStep::Partition)
            }
            SortStep::Partition => {
                let frame = self.frames.top_mut()?;
                if !frame.scanning() {
                    return Ok(Transfer::Continue(SortStep::PlacePivot));
                }
                let at = frame.start + frame.i;
                if data[at] <= frame.pivot {
                    data.swap(frame.start + frame.j, at);
                    frame.j += 1;
                }
                frame.i += 1;
                Transfer::Checkpoint(SortStep::Partition)
            }
            SortStep::PlacePivot => {
                let frame = self.frames.top_mut()?;
                data.swap(frame.start + frame.j, frame.pivot_index());
                frame.j += 1;
                Transfer::Checkpoint(SortStep::RecurseLeft)
            }
            SortStep::RecurseLeft => {
                let depth = self.frames.depth();
                let (start, len) = self.frames.top()?.left();
                Transfer::call(SortStep::Enter { start, len }, SortStep::AfterLeft { depth })
            }
            SortStep::AfterLeft { depth } => {
                self.frames.expect_depth(depth)?;
                Transfer::Checkpoint(SortStep::RecurseRight { depth })
            }
            SortStep::RecurseRight { depth } => {
                self.frames.expect_depth(depth)?;
                let (start, len) = self.frames.top()?.right();
                Transfer::call(SortStep::Enter { start, len }, SortStep::AfterRight { depth })
            }
            SortStep::AfterRight { depth } => {
                self.frames.expect_depth(depth)?;
                self.frames.pop()?;
                Transfer::EscapeReturn
            }
        };
        Ok(transfer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::RuntimeError;
    use crate::runtime::Continuations;

    /// Drive the machine without a scheduler, resolving calls in place
    fn drive(data: &mut [Value]) -> RuntimeResult<(usize, usize)> {
        let mut sort = ResumableSort::new();
        let mut calls = Continuations::new();
        let mut checkpoints = 0;
        let mut at = SortStep::Begin;

        // Outer caller continuation
        calls.call(None)?;
        loop {
            let next = match sort.step(at, data)? {
                Transfer::Continue(l) => Some(l),
                Transfer::Checkpoint(l) => {
                    checkpoints += 1;
                    Some(l)
                }
                Transfer::Call { entry, resume } => {
                    calls.call(Some(resume))?;
                    Some(entry)
                }
                Transfer::EscapeReturn => calls.escape_return()?,
                other => panic!("unexpected transfer {:?}", other),
            };
            match next {
                Some(l) => at = l,
                None => break,
            }
        }
        assert!(calls.is_empty());
        Ok((checkpoints, sort.deepest()))
    }

    #[test]
    fn test_sorts_small_arrays() {
        let mut data = vec![5, 3, 8, 1];
        drive(&mut data).unwrap();
        assert_eq!(data, vec![1, 3, 5, 8]);

        let mut data = vec![9, 2];
        drive(&mut data).unwrap();
        assert_eq!(data, vec![2, 9]);
    }

    #[test]
    fn test_trivial_inputs_push_no_frames() {
        let mut empty: Vec<Value> = vec![];
        assert_eq!(drive(&mut empty).unwrap(), (0, 0));

        let mut single = vec![42];
        assert_eq!(drive(&mut single).unwrap(), (0, 0));
        assert_eq!(single, vec![42]);
    }

    #[test]
    fn test_duplicates_and_negatives() {
        let mut data = vec![0, -3, 7, -3, 7, 0, 2, -100, 2];
        drive(&mut data).unwrap();
        assert_eq!(data, vec![-100, -3, -3, 0, 0, 2, 2, 7, 7]);
    }

    #[test]
    fn test_checkpoint_per_iteration() {
        // Two elements: entry, one scan iteration, pivot placement, and the
        // checkpoint between the two recursive calls
        let mut data = vec![2, 1];
        let (checkpoints, deepest) = drive(&mut data).unwrap();
        assert_eq!(checkpoints, 4);
        assert_eq!(deepest, 1);
    }

    #[test]
    fn test_return_to_wrong_frame_is_detected() {
        let mut sort = ResumableSort::new();
        let mut data = vec![3, 1, 2];
        sort.step(SortStep::Enter { start: 0, len: 3 }, &mut data)
            .unwrap();

        let err = sort
            .step(SortStep::AfterLeft { depth: 2 }, &mut data)
            .unwrap_err();
        assert!(matches!(
            err,
            RuntimeError::Logic(LogicViolation::CorruptFrameStack {
                expected: 2,
                found: 1
            })
        ));
    }

    #[test]
    fn test_resume_without_frame_is_detected() {
        let mut sort = ResumableSort::new();
        let err = sort.step(SortStep::Partition, &mut [1, 2]).unwrap_err();
        assert!(matches!(err, RuntimeError::Logic(LogicViolation::MissingFrame)));
    }

    #[test]
    fn test_out_of_bounds_segment_is_detected() {
        let mut sort = ResumableSort::new();
        let err = sort
            .step(SortStep::Enter { start: 1, len: 4 }, &mut [1, 2, 3])
            .unwrap_err();
        assert!(matches!(
            err,
            RuntimeError::Logic(LogicViolation::SegmentOutOfBounds { .. })
        ));
    }
}
