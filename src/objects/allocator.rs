// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*!
Heap accounting for recorded objects.

Two things are paid for through an [Allocator]: the storage tapes grow into
(a chunk of instruction slots at a time), and the duplicates of array, matrix
and string arguments, which are copied because the caller's memory is not
guaranteed to live until replay.  Either request may be refused.  A refused
duplication turns the instruction inert; a tape that can't grow drops the
call with a warning.  Neither fails the caller.

Every path that removes an instruction or gives back tape storage
[Allocator::release]s what it was granted.
*/

use std::fmt::Debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Can't allocate {bytes} bytes for a recorded object")]
pub struct AllocError {
    pub bytes: usize,
}

/// Allocate/free pair consulted for argument duplication.
pub trait Allocator: Debug {
    /// Reserves `bytes` of heap, or reports why it can't.
    fn allocate(&mut self, bytes: usize) -> Result<(), AllocError>;
    /// Returns `bytes` previously granted by [Allocator::allocate].
    fn release(&mut self, bytes: usize);
    /// Bytes currently held by recorded buffers.
    fn in_use(&self) -> usize;
}

/// Grants every request; actual exhaustion is still caught by `try_reserve`.
#[derive(Debug, Default, Clone)]
pub struct SystemAllocator {
    in_use: usize,
}

impl Allocator for SystemAllocator {
    fn allocate(&mut self, bytes: usize) -> Result<(), AllocError> {
        self.in_use = self.in_use.saturating_add(bytes);
        Ok(())
    }
    fn release(&mut self, bytes: usize) {
        self.in_use = self.in_use.saturating_sub(bytes);
    }
    fn in_use(&self) -> usize {
        self.in_use
    }
}

/**
An allocator with a fixed byte budget.

Useful for hosts that want to bound how much memory display lists can pin, and
for observing that removed instructions really give their buffers back.
*/
#[derive(Debug, Clone)]
pub struct BudgetAllocator {
    budget: usize,
    in_use: usize,
}

impl BudgetAllocator {
    pub fn new(budget: usize) -> Self {
        BudgetAllocator { budget, in_use: 0 }
    }
}

impl Allocator for BudgetAllocator {
    fn allocate(&mut self, bytes: usize) -> Result<(), AllocError> {
        match self.in_use.checked_add(bytes) {
            Some(total) if total <= self.budget => {
                self.in_use = total;
                Ok(())
            }
            _ => Err(AllocError { bytes }),
        }
    }

    fn release(&mut self, bytes: usize) {
        debug_assert!(bytes <= self.in_use, "released more than allocated");
        self.in_use = self.in_use.saturating_sub(bytes);
    }

    fn in_use(&self) -> usize {
        self.in_use
    }
}

/// Deep-copies `source` into an owned buffer accounted against `allocator`.
pub(crate) fn duplicate<T: Copy>(
    allocator: &mut dyn Allocator,
    source: &[T],
) -> Result<Box<[T]>, AllocError> {
    let bytes = std::mem::size_of_val(source);
    allocator.allocate(bytes)?;
    let mut copy = Vec::new();
    if copy.try_reserve_exact(source.len()).is_err() {
        allocator.release(bytes);
        return Err(AllocError { bytes });
    }
    copy.extend_from_slice(source);
    Ok(copy.into_boxed_slice())
}

/// Duplicates a string with a trailing NUL, as the legacy API stores them.
pub(crate) fn duplicate_str(
    allocator: &mut dyn Allocator,
    source: &str,
) -> Result<Box<[u8]>, AllocError> {
    let bytes = source.len() + 1;
    allocator.allocate(bytes)?;
    let mut copy = Vec::new();
    if copy.try_reserve_exact(bytes).is_err() {
        allocator.release(bytes);
        return Err(AllocError { bytes });
    }
    copy.extend_from_slice(source.as_bytes());
    copy.push(0);
    Ok(copy.into_boxed_slice())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_refuses_past_limit() {
        let mut allocator = BudgetAllocator::new(16);
        assert!(allocator.allocate(12).is_ok());
        assert_eq!(allocator.allocate(8), Err(AllocError { bytes: 8 }));
        assert_eq!(allocator.in_use(), 12);
        allocator.release(12);
        assert_eq!(allocator.in_use(), 0);
    }

    #[test]
    fn duplicate_copies_and_accounts() {
        let mut allocator = BudgetAllocator::new(64);
        let source = [1.0f32, 2.0, 3.0];
        let copy = duplicate(&mut allocator, &source).unwrap();
        assert_eq!(&*copy, &source);
        assert_eq!(allocator.in_use(), 12);
    }

    #[test]
    fn duplicate_str_appends_terminator() {
        let mut allocator = BudgetAllocator::new(64);
        let copy = duplicate_str(&mut allocator, "hi").unwrap();
        assert_eq!(&*copy, b"hi\0");
        assert_eq!(allocator.in_use(), 3);
    }

    #[test]
    fn failed_duplicate_leaves_budget_untouched() {
        let mut allocator = BudgetAllocator::new(4);
        assert!(duplicate(&mut allocator, &[0.0f64]).is_err());
        assert_eq!(allocator.in_use(), 0);
    }
}
