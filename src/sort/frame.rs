/*!
 * Partition Frame
 * Snapshot of one in-progress Lomuto partition step
 */

use crate::core::types::Value;

/// Locals of one `sort(segment)` invocation
///
/// `i` is the scan cursor; `j` is the boundary: every element in
/// `segment[..j]` is `<= pivot`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartitionFrame {
    /// Offset of the segment in the array
    pub start: usize,
    pub len: usize,
    /// Last element of the segment when the frame was taken
    pub pivot: Value,
    pub i: usize,
    pub j: usize,
}

impl PartitionFrame {
    pub fn new(start: usize, len: usize, pivot: Value) -> Self {
        Self {
            start,
            len,
            pivot,
            i: 0,
            j: 0,
        }
    }

    /// Whether the scan still has elements before the pivot
    #[inline]
    pub fn scanning(&self) -> bool {
        self.i + 1 < self.len
    }

    /// Absolute index of the pivot slot
    #[inline]
    pub fn pivot_index(&self) -> usize {
        self.start + self.len - 1
    }

    /// Segment left of the placed pivot, as `(start, len)`
    pub fn left(&self) -> (usize, usize) {
        (self.start, self.j - 1)
    }

    /// Segment right of the placed pivot, as `(start, len)`
    pub fn right(&self) -> (usize, usize) {
        (self.start + self.j, self.len - self.j)
    }
}
