/*!
 * Control Transfers
 * The values a program step hands back to the scheduler
 */

use crate::core::types::RuntimeResult;
use std::fmt::Debug;

/// Where control goes after one program step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transfer<L> {
    /// Run `L` next without consulting the quantum
    Continue(L),
    /// Run `L` next, suspending first if the quantum is spent
    Checkpoint(L),
    /// Suspend unconditionally and run `L` on the next turn
    Yield(L),
    /// Push `resume` as an escape-return continuation, then run `entry`
    Call { entry: L, resume: L },
    /// Pop the most recent continuation and run it
    EscapeReturn,
    /// Mark the context terminal
    Finish,
}

impl<L> Transfer<L> {
    /// Nested invocation of `entry` that comes back to `resume`
    #[inline]
    pub fn call(entry: L, resume: L) -> Self {
        Transfer::Call { entry, resume }
    }

    /// Lift the labels of a sub-program into an enclosing label space
    pub fn map<M>(self, f: impl Fn(L) -> M) -> Transfer<M> {
        match self {
            Transfer::Continue(l) => Transfer::Continue(f(l)),
            Transfer::Checkpoint(l) => Transfer::Checkpoint(f(l)),
            Transfer::Yield(l) => Transfer::Yield(f(l)),
            Transfer::Call { entry, resume } => Transfer::Call {
                entry: f(entry),
                resume: f(resume),
            },
            Transfer::EscapeReturn => Transfer::EscapeReturn,
            Transfer::Finish => Transfer::Finish,
        }
    }
}

/// A cooperatively scheduled program
///
/// A program is an explicit state machine: every label names a resumption
/// point, and all state that must survive a suspension lives in `self`.
/// The scheduler calls [`step`](Program::step) repeatedly and acts on the
/// returned [`Transfer`].
///
/// There is no preemption. A program that keeps returning
/// [`Transfer::Continue`] never gives its peers a turn.
pub trait Program {
    /// Resumption point
    type Label: Copy + Debug;

    /// Label the program starts at
    fn entry(&self) -> Self::Label;

    /// Run from `at` up to the next control transfer
    fn step(&mut self, at: Self::Label) -> RuntimeResult<Transfer<Self::Label>>;
}
