// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
use crate::objects::opcode::Opcode;
use crate::objects::slot::Slot;

/// Most slots any recordable entry point needs.
pub const MAX_SLOTS: usize = 10;

/**
One recorded call: an opcode plus its arguments.

Slots past the entry point's arity are [Slot::Empty].
*/
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    opcode: Opcode,
    slots: [Slot; MAX_SLOTS],
}

impl Instruction {
    pub fn new<I: IntoIterator<Item = Slot>>(opcode: Opcode, slots: I) -> Self {
        let mut slots = slots.into_iter();
        let filled = std::array::from_fn(|_| slots.next().unwrap_or_default());
        debug_assert!(slots.next().is_none(), "{opcode} has more than {MAX_SLOTS} slots");
        Instruction {
            opcode,
            slots: filled,
        }
    }

    /// An instruction that keeps its place in the tape but does nothing.
    pub fn inert() -> Self {
        Instruction::new(Opcode::Nop, [])
    }

    pub fn opcode(&self) -> Opcode {
        self.opcode
    }

    pub fn slot(&self, index: usize) -> &Slot {
        &self.slots[index]
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn is_inert(&self) -> bool {
        self.opcode.is_inert()
    }

    /// Heap bytes owned through buffer slots.
    pub fn heap_bytes(&self) -> usize {
        self.slots.iter().map(Slot::heap_bytes).sum()
    }
}
