// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*!
The instruction tape of one object.

Positions are gaps: position `p` sits just before the instruction at index `p`,
so a tape of `n` instructions has positions `0..=n`.  Tags resolve to
positions; this module only deals in positions and leaves tag bookkeeping to
[crate::objects::tags].

Storage grows in chunks of [Tape::chunk_size] instructions.  Every path that
drops instructions hands their buffer bytes back to the [Allocator].
*/

use std::ops::Range;

use crate::objects::allocator::{AllocError, Allocator};
use crate::objects::instruction::Instruction;

/// Bytes one instruction slot of tape storage is accounted at.
pub const SLOT_BYTES: usize = std::mem::size_of::<Instruction>();

#[derive(Debug)]
pub struct Tape {
    instructions: Vec<Instruction>,
    chunk_size: usize,
    /// Slots granted by the allocator; never less than the instruction count.
    reserved: usize,
}

impl Tape {
    pub fn new(chunk_size: usize) -> Self {
        Tape {
            instructions: Vec::new(),
            chunk_size: chunk_size.max(1),
            reserved: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Instruction slots currently paid for.
    #[cfg(test)]
    pub fn reserved(&self) -> usize {
        self.reserved
    }

    #[cfg(test)]
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn set_chunk_size(&mut self, chunk_size: usize) {
        self.chunk_size = chunk_size.max(1);
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    fn reserve(&mut self, slots: usize, allocator: &mut dyn Allocator) -> Result<(), AllocError> {
        let bytes = slots.saturating_mul(SLOT_BYTES);
        allocator.allocate(bytes)?;
        if self.instructions.try_reserve_exact(slots).is_err() {
            allocator.release(bytes);
            return Err(AllocError { bytes });
        }
        self.reserved += slots;
        Ok(())
    }

    /// Makes room for one more instruction, a chunk at a time when possible.
    fn grow(&mut self, allocator: &mut dyn Allocator) -> Result<(), AllocError> {
        if self.instructions.len() < self.reserved {
            return Ok(());
        }
        match self.reserve(self.chunk_size, allocator) {
            Err(err) if self.chunk_size > 1 => {
                logwise::warn_sync!(
                    "Can't grow tape by a chunk of {chunk}; growing by one",
                    chunk = self.chunk_size
                );
                self.reserve(1, allocator).map_err(|_| err)
            }
            result => result,
        }
    }

    /// Room for one more instruction, or the instruction's buffers go back.
    fn make_room(
        &mut self,
        instruction: &Instruction,
        allocator: &mut dyn Allocator,
    ) -> Result<(), AllocError> {
        self.grow(allocator)
            .inspect_err(|_| allocator.release(instruction.heap_bytes()))
    }

    /// Adds an instruction at the end and returns its position.
    ///
    /// If the tape can't grow the instruction is dropped and its buffers released.
    pub fn append(
        &mut self,
        instruction: Instruction,
        allocator: &mut dyn Allocator,
    ) -> Result<usize, AllocError> {
        self.make_room(&instruction, allocator)?;
        self.instructions.push(instruction);
        Ok(self.instructions.len() - 1)
    }

    /**
    Inserts before the instruction at `position`.

    Positions past the end are clamped to the end.  Returns where the
    instruction landed.
    */
    pub fn insert_at(
        &mut self,
        position: usize,
        instruction: Instruction,
        allocator: &mut dyn Allocator,
    ) -> Result<usize, AllocError> {
        let position = position.min(self.instructions.len());
        self.make_room(&instruction, allocator)?;
        self.instructions.insert(position, instruction);
        Ok(position)
    }

    /**
    Swaps the instruction at `index` for `instruction`, releasing the old one's buffers.

    Returns `false` (and keeps `instruction` out of the tape) if `index` is out of range.
    */
    pub fn replace(
        &mut self,
        index: usize,
        instruction: Instruction,
        allocator: &mut dyn Allocator,
    ) -> bool {
        match self.instructions.get_mut(index) {
            Some(slot) => {
                let old = std::mem::replace(slot, instruction);
                allocator.release(old.heap_bytes());
                true
            }
            None => {
                allocator.release(instruction.heap_bytes());
                false
            }
        }
    }

    /// Removes `range`, returning how many instructions were removed.
    ///
    /// The storage they occupied stays reserved until [Tape::compact].
    pub fn delete_range(&mut self, range: Range<usize>, allocator: &mut dyn Allocator) -> usize {
        let len = self.instructions.len();
        let end = range.end.min(len);
        let start = range.start.min(end);
        for removed in self.instructions.drain(start..end) {
            allocator.release(removed.heap_bytes());
        }
        end - start
    }

    /// Drops everything from `position` on.
    pub fn truncate(&mut self, position: usize, allocator: &mut dyn Allocator) -> usize {
        let len = self.instructions.len();
        self.delete_range(position..len, allocator)
    }

    /// Gives back storage slack left over from chunked growth and deletions.
    pub fn compact(&mut self, allocator: &mut dyn Allocator) {
        self.instructions.shrink_to_fit();
        let slack = self.reserved - self.instructions.len();
        allocator.release(slack * SLOT_BYTES);
        self.reserved = self.instructions.len();
    }

    /// Drops every instruction and gives back all storage.
    pub fn free(mut self, allocator: &mut dyn Allocator) {
        self.truncate(0, allocator);
        self.compact(allocator);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::allocator::{BudgetAllocator, SystemAllocator, duplicate};
    use crate::objects::opcode::Opcode;
    use crate::objects::slot::{Buffer, Slot};

    fn color(c: u32) -> Instruction {
        Instruction::new(Opcode::Color, [Slot::UInt(c)])
    }

    fn colors(tape: &Tape) -> Vec<u32> {
        tape.instructions().iter().filter_map(|i| i.slot(0).uint()).collect()
    }

    fn vertex(allocator: &mut dyn Allocator) -> Instruction {
        let buffer = duplicate(allocator, &[1.0f32, 2.0, 3.0]).unwrap();
        Instruction::new(Opcode::V3f, [Slot::Buffer(Buffer::Floats(buffer))])
    }

    fn filled(values: &[u32], allocator: &mut dyn Allocator) -> Tape {
        let mut tape = Tape::new(1);
        for v in values {
            tape.append(color(*v), allocator).unwrap();
        }
        tape
    }

    #[test]
    fn append_returns_positions_in_order() {
        let mut allocator = SystemAllocator::default();
        let mut tape = Tape::new(1);
        assert_eq!(tape.append(color(1), &mut allocator), Ok(0));
        assert_eq!(tape.append(color(2), &mut allocator), Ok(1));
        assert_eq!(colors(&tape), vec![1, 2]);
    }

    #[test]
    fn growth_is_chunked_and_accounted() {
        let mut allocator = SystemAllocator::default();
        let mut tape = Tape::new(8);
        tape.append(color(1), &mut allocator).unwrap();
        assert_eq!(tape.reserved(), 8);
        assert_eq!(allocator.in_use(), 8 * SLOT_BYTES);
        tape.compact(&mut allocator);
        assert_eq!(tape.reserved(), 1);
        assert_eq!(allocator.in_use(), SLOT_BYTES);
        tape.free(&mut allocator);
        assert_eq!(allocator.in_use(), 0);
    }

    #[test]
    fn refused_chunks_fall_back_to_single_slots() {
        let mut allocator = BudgetAllocator::new(3 * SLOT_BYTES);
        let mut tape = Tape::new(4);
        assert_eq!(tape.append(color(1), &mut allocator), Ok(0));
        assert_eq!(tape.reserved(), 1);
        tape.append(color(2), &mut allocator).unwrap();
        tape.append(color(3), &mut allocator).unwrap();
        assert_eq!(
            tape.append(color(4), &mut allocator),
            Err(AllocError { bytes: 4 * SLOT_BYTES })
        );
        assert_eq!(colors(&tape), vec![1, 2, 3]);
        assert_eq!(allocator.in_use(), 3 * SLOT_BYTES);
    }

    #[test]
    fn refused_growth_releases_the_dropped_instruction() {
        let mut allocator = BudgetAllocator::new(SLOT_BYTES + 12);
        let mut tape = filled(&[1], &mut allocator);
        let v = vertex(&mut allocator);
        assert_eq!(allocator.in_use(), SLOT_BYTES + 12);
        assert!(tape.insert_at(0, v, &mut allocator).is_err());
        assert_eq!(allocator.in_use(), SLOT_BYTES);
        assert_eq!(colors(&tape), vec![1]);
    }

    #[test]
    fn zero_chunk_size_is_clamped() {
        let mut tape = Tape::new(0);
        assert_eq!(tape.chunk_size(), 1);
        tape.set_chunk_size(0);
        assert_eq!(tape.chunk_size(), 1);
    }

    #[test]
    fn insert_lands_before_position() {
        let mut allocator = SystemAllocator::default();
        let mut tape = filled(&[1, 3], &mut allocator);
        assert_eq!(tape.insert_at(1, color(2), &mut allocator), Ok(1));
        assert_eq!(tape.insert_at(99, color(4), &mut allocator), Ok(3));
        assert_eq!(colors(&tape), vec![1, 2, 3, 4]);
    }

    #[test]
    fn delete_range_is_half_open_and_frees_buffers() {
        let mut allocator = SystemAllocator::default();
        let mut tape = filled(&[1], &mut allocator);
        let v = vertex(&mut allocator);
        tape.append(v, &mut allocator).unwrap();
        tape.append(color(3), &mut allocator).unwrap();
        assert_eq!(allocator.in_use(), 3 * SLOT_BYTES + 12);
        assert_eq!(tape.delete_range(1..2, &mut allocator), 1);
        assert_eq!(colors(&tape), vec![1, 3]);
        //the slot is kept for reuse
        assert_eq!(allocator.in_use(), 3 * SLOT_BYTES);
    }

    #[test]
    fn out_of_range_operations_do_nothing() {
        let mut allocator = SystemAllocator::default();
        let mut tape = Tape::new(1);
        assert_eq!(tape.delete_range(0..5, &mut allocator), 0);
        assert_eq!(tape.truncate(3, &mut allocator), 0);
        tape.append(color(1), &mut allocator).unwrap();
        assert_eq!(tape.delete_range(4..9, &mut allocator), 0);
        let (start, end) = (1, 0);
        assert_eq!(tape.delete_range(start..end, &mut allocator), 0);
        assert!(!tape.replace(5, color(9), &mut allocator));
        assert_eq!(colors(&tape), vec![1]);
    }

    #[test]
    fn replace_releases_the_old_instruction() {
        let mut allocator = SystemAllocator::default();
        let mut tape = Tape::new(1);
        let v = vertex(&mut allocator);
        tape.append(v, &mut allocator).unwrap();
        assert!(tape.replace(0, color(5), &mut allocator));
        assert_eq!(allocator.in_use(), SLOT_BYTES);
        assert_eq!(colors(&tape), vec![5]);
    }

    #[test]
    fn truncate_and_free() {
        let mut allocator = SystemAllocator::default();
        let mut tape = filled(&[0, 1, 2, 3, 4], &mut allocator);
        assert_eq!(tape.truncate(2, &mut allocator), 3);
        assert_eq!(colors(&tape), vec![0, 1]);
        let v = vertex(&mut allocator);
        tape.append(v, &mut allocator).unwrap();
        tape.free(&mut allocator);
        assert_eq!(allocator.in_use(), 0);
    }
}
