// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*!
Recorded objects: opcodes, parameter slots, instruction tapes, tags and the
table that owns them.

An *object* here is the legacy sense of the word: a named, replayable sequence
of graphics calls (a display list).
*/

pub mod allocator;
pub mod instruction;
pub mod opcode;
pub(crate) mod recorder;
pub mod slot;
pub(crate) mod table;
pub(crate) mod tags;
pub(crate) mod tape;

pub use allocator::{AllocError, Allocator, BudgetAllocator, SystemAllocator};
pub use instruction::{Instruction, MAX_SLOTS};
pub use opcode::Opcode;
pub(crate) use recorder::Recorder;
pub use slot::{Buffer, Slot};
pub(crate) use table::ObjectTable;
pub use tags::TagError;
pub(crate) use tape::Tape;

use crate::types::Object;

/// Where an object is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectState {
    /// No such object.
    Free,
    Closed,
    /// Being defined by `makeobj`.
    Open,
    /// Reopened by `editobj`.
    Editing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ObjectError {
    #[error("object {0} already exists")]
    AlreadyExists(Object),
    #[error("object {0} is already open; close it first")]
    AlreadyRecording(Object),
    #[error("object {0} does not exist")]
    NotFound(Object),
    #[error("object {0} is open, being edited or being replayed")]
    Busy(Object),
    #[error("no object is open")]
    NothingOpen,
}
