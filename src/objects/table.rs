// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*!
The object table.

Maps object ids to their tapes and tracks the
`free → open → closed → editing → closed → free` lifecycle.  While an object
is open or being edited its tape lives in the [Recorder]; while it is being
replayed its tape is checked out to the interpreter.  Either way the table
entry stays, so the id can't be reused or deleted underneath.
*/

use std::collections::HashMap;

use crate::objects::allocator::Allocator;
use crate::objects::recorder::Recorder;
use crate::objects::tags::TagTable;
use crate::objects::tape::Tape;
use crate::objects::{ObjectError, ObjectState};
use crate::types::Object;

#[derive(Debug)]
enum Entry {
    Closed(Tape),
    /// Tape is held by the outstanding recorder.
    Recording { editing: bool },
    /// Tape is checked out for replay.
    Replaying,
}

#[derive(Debug)]
pub struct ObjectTable {
    entries: HashMap<Object, Entry>,
    tags: TagTable,
    open: Option<Object>,
    next_object: Object,
}

impl Default for ObjectTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectTable {
    pub fn new() -> Self {
        ObjectTable {
            entries: HashMap::new(),
            tags: TagTable::new(),
            open: None,
            next_object: 1,
        }
    }

    pub fn tags(&self) -> &TagTable {
        &self.tags
    }

    pub fn tags_mut(&mut self) -> &mut TagTable {
        &mut self.tags
    }

    /// The object currently open or being edited.
    pub fn open_object(&self) -> Option<Object> {
        self.open
    }

    pub fn contains(&self, object: Object) -> bool {
        self.entries.contains_key(&object)
    }

    pub fn state(&self, object: Object) -> ObjectState {
        match self.entries.get(&object) {
            None => ObjectState::Free,
            Some(Entry::Closed(_)) | Some(Entry::Replaying) => ObjectState::Closed,
            Some(Entry::Recording { editing: false }) => ObjectState::Open,
            Some(Entry::Recording { editing: true }) => ObjectState::Editing,
        }
    }

    /// A closed object's tape.
    pub fn tape(&self, object: Object) -> Option<&Tape> {
        match self.entries.get(&object) {
            Some(Entry::Closed(tape)) => Some(tape),
            _ => None,
        }
    }

    /// An id with no entry.
    pub fn generate(&mut self) -> Object {
        loop {
            let candidate = self.next_object;
            self.next_object = self.next_object.checked_add(1).unwrap_or(1);
            if candidate > 0 && !self.entries.contains_key(&candidate) {
                return candidate;
            }
        }
    }

    fn ensure_nothing_open(&self) -> Result<(), ObjectError> {
        match self.open {
            Some(open) => Err(ObjectError::AlreadyRecording(open)),
            None => Ok(()),
        }
    }

    /// Starts defining a new object.
    pub fn make(&mut self, object: Object, chunk_size: usize) -> Result<Recorder, ObjectError> {
        self.ensure_nothing_open()?;
        if self.entries.contains_key(&object) {
            return Err(ObjectError::AlreadyExists(object));
        }
        self.entries
            .insert(object, Entry::Recording { editing: false });
        self.open = Some(object);
        Ok(Recorder::new(object, Tape::new(chunk_size)))
    }

    /// Reopens a closed object; recording resumes at the end of its tape.
    pub fn edit(&mut self, object: Object, chunk_size: usize) -> Result<Recorder, ObjectError> {
        self.ensure_nothing_open()?;
        let entry = self
            .entries
            .get_mut(&object)
            .ok_or(ObjectError::NotFound(object))?;
        let mut tape = match std::mem::replace(entry, Entry::Recording { editing: true }) {
            Entry::Closed(tape) => tape,
            other => {
                *entry = other;
                return Err(ObjectError::Busy(object));
            }
        };
        tape.set_chunk_size(chunk_size);
        self.open = Some(object);
        Ok(Recorder::new(object, tape))
    }

    /// Takes back the recorder, closing its object.
    pub fn close(&mut self, recorder: Recorder) {
        let (object, tape) = recorder.into_parts();
        debug_assert_eq!(self.open, Some(object), "closing a recorder the table didn't issue");
        self.entries.insert(object, Entry::Closed(tape));
        self.open = None;
    }

    /// Frees a closed object, its buffers and every tag pointing into it.
    pub fn delete(&mut self, object: Object, allocator: &mut dyn Allocator) -> Result<(), ObjectError> {
        match self.entries.get(&object) {
            None => return Err(ObjectError::NotFound(object)),
            Some(Entry::Closed(_)) => {}
            Some(_) => return Err(ObjectError::Busy(object)),
        }
        if let Some(Entry::Closed(tape)) = self.entries.remove(&object) {
            tape.free(allocator);
        }
        self.tags.forget_object(object);
        Ok(())
    }

    /// Shrinks a closed object's storage to its instruction count.
    pub fn compact(
        &mut self,
        object: Object,
        allocator: &mut dyn Allocator,
    ) -> Result<(), ObjectError> {
        match self.entries.get_mut(&object) {
            Some(Entry::Closed(tape)) => {
                tape.compact(allocator);
                Ok(())
            }
            Some(_) => Err(ObjectError::Busy(object)),
            None => Err(ObjectError::NotFound(object)),
        }
    }

    /**
    Lends a closed object's tape to the replay interpreter.

    While checked out the object reports [ObjectError::Busy] to a second
    checkout, which is how replay notices an object invoking itself.
    */
    pub(crate) fn checkout(&mut self, object: Object) -> Result<Tape, ObjectError> {
        let entry = self
            .entries
            .get_mut(&object)
            .ok_or(ObjectError::NotFound(object))?;
        match std::mem::replace(entry, Entry::Replaying) {
            Entry::Closed(tape) => Ok(tape),
            other => {
                *entry = other;
                Err(ObjectError::Busy(object))
            }
        }
    }

    pub(crate) fn checkin(&mut self, object: Object, tape: Tape) {
        self.entries.insert(object, Entry::Closed(tape));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::allocator::SystemAllocator;

    #[test]
    fn lifecycle_states() {
        let mut table = ObjectTable::new();
        assert_eq!(table.state(1), ObjectState::Free);
        let recorder = table.make(1, 1).unwrap();
        assert_eq!(table.state(1), ObjectState::Open);
        assert_eq!(table.open_object(), Some(1));
        table.close(recorder);
        assert_eq!(table.state(1), ObjectState::Closed);
        let recorder = table.edit(1, 1).unwrap();
        assert_eq!(table.state(1), ObjectState::Editing);
        table.close(recorder);
        table.delete(1, &mut SystemAllocator::default()).unwrap();
        assert_eq!(table.state(1), ObjectState::Free);
    }

    #[test]
    fn only_one_recorder_at_a_time() {
        let mut table = ObjectTable::new();
        let recorder = table.make(1, 1).unwrap();
        assert_eq!(table.make(2, 1).unwrap_err(), ObjectError::AlreadyRecording(1));
        assert!(!table.contains(2));
        table.close(recorder);
        let recorder = table.make(2, 1).unwrap();
        assert_eq!(table.edit(1, 1).unwrap_err(), ObjectError::AlreadyRecording(2));
        table.close(recorder);
    }

    #[test]
    fn existing_ids_cannot_be_made_again() {
        let mut table = ObjectTable::new();
        let recorder = table.make(1, 1).unwrap();
        table.close(recorder);
        assert_eq!(table.make(1, 1).unwrap_err(), ObjectError::AlreadyExists(1));
    }

    #[test]
    fn open_objects_cannot_be_deleted_or_edited() {
        let mut table = ObjectTable::new();
        let recorder = table.make(3, 1).unwrap();
        assert_eq!(
            table.delete(3, &mut SystemAllocator::default()),
            Err(ObjectError::Busy(3))
        );
        table.close(recorder);
        assert_eq!(table.edit(9, 1).unwrap_err(), ObjectError::NotFound(9));
    }

    #[test]
    fn checkout_detects_reentry() {
        let mut table = ObjectTable::new();
        let recorder = table.make(1, 1).unwrap();
        table.close(recorder);
        let tape = table.checkout(1).unwrap();
        assert_eq!(table.checkout(1).unwrap_err(), ObjectError::Busy(1));
        assert_eq!(table.state(1), ObjectState::Closed);
        table.checkin(1, tape);
        assert!(table.tape(1).is_some());
        assert_eq!(table.checkout(2).unwrap_err(), ObjectError::NotFound(2));
    }

    #[test]
    fn generated_ids_are_unused() {
        let mut table = ObjectTable::new();
        let recorder = table.make(1, 1).unwrap();
        table.close(recorder);
        assert_eq!(table.generate(), 2);
    }
}
