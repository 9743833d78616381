/*!
 * Escape-Return Stack
 * Per-context call/return emulation across suspension boundaries
 */

use crate::core::errors::{LogicViolation, RuntimeError};
use crate::core::limits::grown_capacity;
use crate::core::types::RuntimeResult;

/// Make room for one more element, growing by amortized doubling
///
/// Allocation failure is reported as `ResourceExhaustion` rather than
/// aborting inside the allocator.
pub(crate) fn reserve_one<T>(stack: &mut Vec<T>, name: &'static str) -> RuntimeResult<()> {
    if stack.len() < stack.capacity() {
        return Ok(());
    }

    let target = grown_capacity(stack.capacity());
    stack
        .try_reserve_exact(target - stack.len())
        .map_err(|source| RuntimeError::ResourceExhaustion {
            stack: name,
            capacity: stack.capacity(),
            source,
        })
}

/// Stack of "resume here" points for nested calls
///
/// Depth equals the number of calls whose matching escape-return has not
/// happened yet. It must be zero when the owning program finishes.
#[derive(Debug, Clone)]
pub struct Continuations<L> {
    stack: Vec<L>,
    deepest: usize,
}

impl<L: Copy> Continuations<L> {
    pub fn new() -> Self {
        Self {
            stack: Vec::new(),
            deepest: 0,
        }
    }

    /// Record where to resume once the nested call escapes back
    pub fn call(&mut self, resume: L) -> RuntimeResult<()> {
        reserve_one(&mut self.stack, "escape-return stack")?;
        self.stack.push(resume);
        self.deepest = self.deepest.max(self.stack.len());
        Ok(())
    }

    /// Pop the most recent continuation
    ///
    /// Whatever ran since the matching call is abandoned; the caller jumps
    /// straight to the returned label.
    pub fn escape_return(&mut self) -> Result<L, LogicViolation> {
        self.stack.pop().ok_or(LogicViolation::EscapeUnderflow)
    }

    /// Most recent continuation without popping it
    pub fn peek(&self) -> Option<L> {
        self.stack.last().copied()
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.stack.capacity()
    }

    /// Highest depth ever reached
    pub fn deepest(&self) -> usize {
        self.deepest
    }
}

impl<L: Copy> Default for Continuations<L> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifo_order() {
        let mut stack = Continuations::new();
        stack.call('a').unwrap();
        stack.call('b').unwrap();
        stack.call('c').unwrap();

        assert_eq!(stack.depth(), 3);
        assert_eq!(stack.peek(), Some('c'));
        assert_eq!(stack.escape_return(), Ok('c'));
        assert_eq!(stack.escape_return(), Ok('b'));
        assert_eq!(stack.escape_return(), Ok('a'));
        assert!(stack.is_empty());
        assert_eq!(stack.deepest(), 3);
    }

    #[test]
    fn test_underflow_is_checked() {
        let mut stack: Continuations<u32> = Continuations::new();
        assert_eq!(stack.escape_return(), Err(LogicViolation::EscapeUnderflow));

        stack.call(1).unwrap();
        stack.escape_return().unwrap();
        assert_eq!(stack.escape_return(), Err(LogicViolation::EscapeUnderflow));
    }

    #[test]
    fn test_growth_doubles() {
        let mut stack = Continuations::new();
        assert_eq!(stack.capacity(), 0);

        stack.call(0u8).unwrap();
        assert!(stack.capacity() >= 2);

        for i in 1..7 {
            stack.call(i).unwrap();
        }
        assert!(stack.capacity() >= 7);
        assert_eq!(stack.depth(), 7);
    }
}
