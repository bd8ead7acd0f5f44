// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*!
Mutable state shared by both dispatch tables and the replay interpreter.
*/

use crate::gl::Config;
use crate::imp::Backend;
use crate::objects::{AllocError, Allocator, Instruction, MAX_SLOTS, ObjectTable, Opcode, Recorder, Slot};

#[derive(Debug)]
pub struct Context<B> {
    pub(crate) backend: B,
    pub(crate) objects: ObjectTable,
    /// The recorder for the open object, if any.
    pub(crate) recorder: Option<Recorder>,
    pub(crate) allocator: Box<dyn Allocator>,
    pub(crate) config: Config,
    /// Current `callobj` nesting.
    pub(crate) depth: usize,
}

impl<B: Backend> Context<B> {
    pub(crate) fn new(backend: B, config: Config, allocator: Box<dyn Allocator>) -> Self {
        Context {
            backend,
            objects: ObjectTable::new(),
            recorder: None,
            allocator,
            config,
            depth: 0,
        }
    }

    /// Records an instruction whose slots own no heap.
    pub(crate) fn record<I: IntoIterator<Item = Slot>>(&mut self, opcode: Opcode, slots: I) {
        self.store(Instruction::new(opcode, slots));
    }

    /**
    Records an instruction whose slots are built by `build`, which may duplicate
    buffers through the allocator it is handed.

    If `build` fails the slots it already pushed are released and an inert
    instruction takes the place of the call.
    */
    pub(crate) fn record_with<F>(&mut self, opcode: Opcode, build: F)
    where
        F: FnOnce(&mut dyn Allocator, &mut Vec<Slot>) -> Result<(), AllocError>,
    {
        let mut slots = Vec::with_capacity(MAX_SLOTS);
        match build(&mut *self.allocator, &mut slots) {
            Ok(()) => self.store(Instruction::new(opcode, slots)),
            Err(err) => {
                let partial: usize = slots.iter().map(Slot::heap_bytes).sum();
                self.allocator.release(partial);
                logwise::warn_sync!(
                    "{opcode} recorded as a no-op: {err}",
                    opcode = opcode.name(),
                    err = logwise::privacy::LogIt(&err)
                );
                self.store(Instruction::inert());
            }
        }
    }

    fn store(&mut self, instruction: Instruction) {
        let Some(recorder) = self.recorder.as_mut() else {
            //only the record table calls here, and it is only active while a recorder exists
            logwise::warn_sync!("Nothing open to record {opcode} into", opcode = instruction.opcode().name());
            self.allocator.release(instruction.heap_bytes());
            return;
        };
        let opcode = instruction.opcode();
        match recorder.record(instruction, self.objects.tags_mut(), &mut *self.allocator) {
            Ok(position) => {
                logwise::trace_sync!(
                    "recorded {opcode} into object {object} at {position}",
                    opcode = opcode.name(),
                    object = recorder.object(),
                    position = position
                );
            }
            Err(err) => logwise::warn_sync!(
                "Can't grow object {object} to record {opcode}: {err}",
                object = recorder.object(),
                opcode = opcode.name(),
                err = logwise::privacy::LogIt(&err)
            ),
        }
    }
}
