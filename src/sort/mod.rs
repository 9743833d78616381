/*!
 * Resumable Sort
 * Recursive in-place partition sort built on escape-return calls and an
 * algorithm frame stack
 */

mod frame;
mod program;
mod resumable;

pub use frame::PartitionFrame;
pub use program::{SortProgram, SortProgramStep};
pub use resumable::{ResumableSort, SortStep};
