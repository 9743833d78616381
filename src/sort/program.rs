/*!
 * Sort Program
 * A context program that sorts one owned array and finishes
 */

use super::resumable::{ResumableSort, SortStep};
use crate::core::types::{RuntimeResult, Value};
use crate::runtime::{Program, Transfer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortProgramStep {
    Start,
    Sort(SortStep),
    Sorted,
}

/// Sorts its array in place, checkpointing at every partition iteration
#[derive(Debug)]
pub struct SortProgram {
    data: Vec<Value>,
    sort: ResumableSort,
}

impl SortProgram {
    pub fn new(data: Vec<Value>) -> Self {
        Self {
            data,
            sort: ResumableSort::new(),
        }
    }

    pub fn data(&self) -> &[Value] {
        &self.data
    }

    /// Deepest recursion the sort reached
    pub fn deepest(&self) -> usize {
        self.sort.deepest()
    }

    pub fn into_sorted(self) -> Vec<Value> {
        self.data
    }
}

impl Program for SortProgram {
    type Label = SortProgramStep;

    fn entry(&self) -> SortProgramStep {
        SortProgramStep::Start
    }

    fn step(&mut self, at: SortProgramStep) -> RuntimeResult<Transfer<SortProgramStep>> {
        Ok(match at {
            SortProgramStep::Start => Transfer::call(
                SortProgramStep::Sort(SortStep::Begin),
                SortProgramStep::Sorted,
            ),
            SortProgramStep::Sort(step) => self
                .sort
                .step(step, &mut self.data)?
                .map(SortProgramStep::Sort),
            SortProgramStep::Sorted => Transfer::Finish,
        })
    }
}
