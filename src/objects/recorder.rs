// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*!
The recording cursor.

A [Recorder] owns the tape of the one object being defined or edited, plus the
edit cursor saying where the next instruction goes.  Only
[crate::objects::ObjectTable] hands out recorders, and it won't hand out a second
one until the first is given back through [crate::objects::ObjectTable::close].
*/

use crate::objects::allocator::{AllocError, Allocator};
use crate::objects::instruction::Instruction;
use crate::objects::tags::{TagError, TagTable};
use crate::objects::tape::Tape;
use crate::types::{Object, Tag};

/// Where the next recorded instruction goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    /// Append at the end of the tape.
    End,
    /// Insert at this position; tags already there name the new instruction.
    Insert(usize),
    /**
    Insert at this position, following the instruction just recorded.

    Tags already there keep naming the instruction they named before, so
    they move along.  Tags made at the cursor since the last instruction
    name the new one.
    */
    Continue(usize),
    /// Replace the instruction at this position, then continue after it.
    Overwrite(usize),
}

#[derive(Debug)]
pub struct Recorder {
    object: Object,
    tape: Tape,
    cursor: Cursor,
    /// Tags made at the cursor since the last recorded instruction.
    held: Vec<Tag>,
}

impl Recorder {
    pub(crate) fn new(object: Object, tape: Tape) -> Self {
        Recorder {
            object,
            tape,
            cursor: Cursor::End,
            held: Vec::new(),
        }
    }

    pub fn object(&self) -> Object {
        self.object
    }

    #[cfg(test)]
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    pub(crate) fn tape_mut(&mut self) -> &mut Tape {
        &mut self.tape
    }

    pub(crate) fn into_parts(self) -> (Object, Tape) {
        (self.object, self.tape)
    }

    fn cursor_position(&self) -> usize {
        match self.cursor {
            Cursor::End => self.tape.len(),
            Cursor::Insert(p) | Cursor::Continue(p) | Cursor::Overwrite(p) => {
                p.min(self.tape.len())
            }
        }
    }

    fn move_cursor(&mut self, cursor: Cursor) {
        self.cursor = cursor;
        self.held.clear();
    }

    /**
    Stores `instruction` at the cursor and returns the position it took.

    Fails only if the tape can't grow, in which case the instruction's
    buffers have been released and the cursor is unchanged.
    */
    pub(crate) fn record(
        &mut self,
        instruction: Instruction,
        tags: &mut TagTable,
        allocator: &mut dyn Allocator,
    ) -> Result<usize, AllocError> {
        let landed = match self.cursor {
            Cursor::End => {
                let landed = self.tape.append(instruction, allocator)?;
                self.held.clear();
                return Ok(landed);
            }
            Cursor::Insert(p) => {
                let landed = self.tape.insert_at(p, instruction, allocator)?;
                tags.inserted(self.object, landed);
                landed
            }
            Cursor::Continue(p) => {
                let landed = self.tape.insert_at(p, instruction, allocator)?;
                tags.inserted_ahead(self.object, landed, &self.held);
                landed
            }
            Cursor::Overwrite(p) if p < self.tape.len() => {
                self.tape.replace(p, instruction, allocator);
                p
            }
            Cursor::Overwrite(_) => self.tape.append(instruction, allocator)?,
        };
        self.move_cursor(Cursor::Continue(landed + 1));
        Ok(landed)
    }

    fn resolve(&self, tag: Tag, tags: &TagTable) -> Result<usize, TagError> {
        tags.resolve(tag, self.object, self.tape.len())
    }

    /// Names the cursor position `tag`; the next recorded instruction is what it names.
    pub(crate) fn make_tag(&mut self, tag: Tag, tags: &mut TagTable) -> Result<(), TagError> {
        tags.set(tag, self.object, self.cursor_position())?;
        self.held.push(tag);
        Ok(())
    }

    pub(crate) fn delete_tag(&mut self, tag: Tag, tags: &mut TagTable) -> Result<(), TagError> {
        tags.remove(tag, self.object)?;
        self.held.retain(|held| *held != tag);
        Ok(())
    }

    pub(crate) fn is_tag(&self, tag: Tag, tags: &TagTable) -> bool {
        self.resolve(tag, tags).is_ok()
    }

    /// Subsequent instructions are inserted at `tag`.
    pub(crate) fn insert_at(&mut self, tag: Tag, tags: &TagTable) -> Result<usize, TagError> {
        let position = self.resolve(tag, tags)?;
        self.move_cursor(Cursor::Insert(position));
        Ok(position)
    }

    /// The next instruction replaces the one at `tag`.
    pub(crate) fn overwrite_at(&mut self, tag: Tag, tags: &TagTable) -> Result<usize, TagError> {
        let position = self.resolve(tag, tags)?;
        self.move_cursor(Cursor::Overwrite(position));
        Ok(position)
    }

    /// Removes the instructions in `[start, end)`; returns how many went.
    pub(crate) fn delete_range(
        &mut self,
        start: Tag,
        end: Tag,
        tags: &mut TagTable,
        allocator: &mut dyn Allocator,
    ) -> Result<usize, TagError> {
        let from = self.resolve(start, tags)?;
        let to = self.resolve(end, tags)?;
        if from >= to {
            return Err(TagError::EmptyRange(start, end));
        }
        let removed = self.tape.delete_range(from..to, allocator);
        tags.deleted(self.object, from, to);
        self.cursor = match self.cursor {
            Cursor::End => Cursor::End,
            Cursor::Insert(p) => Cursor::Insert(shift_after_delete(p, from, to)),
            Cursor::Continue(p) => Cursor::Continue(shift_after_delete(p, from, to)),
            Cursor::Overwrite(p) => Cursor::Overwrite(shift_after_delete(p, from, to)),
        };
        Ok(removed)
    }

    /// Drops everything from `tag` on and continues recording there.
    pub(crate) fn replace_from(
        &mut self,
        tag: Tag,
        tags: &mut TagTable,
        allocator: &mut dyn Allocator,
    ) -> Result<usize, TagError> {
        let position = self.resolve(tag, tags)?;
        let removed = self.tape.truncate(position, allocator);
        tags.truncated(self.object, position);
        self.move_cursor(Cursor::End);
        Ok(removed)
    }
}

fn shift_after_delete(position: usize, start: usize, end: usize) -> usize {
    if position >= end {
        position - (end - start)
    } else if position > start {
        start
    } else {
        position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::allocator::SystemAllocator;
    use crate::objects::opcode::Opcode;
    use crate::objects::slot::Slot;
    use crate::types::{ENDTAG, STARTTAG};

    fn color(c: u32) -> Instruction {
        Instruction::new(Opcode::Color, [Slot::UInt(c)])
    }

    fn colors(recorder: &Recorder) -> Vec<u32> {
        recorder
            .tape()
            .instructions()
            .iter()
            .filter_map(|i| i.slot(0).uint())
            .collect()
    }

    fn record(recorder: &mut Recorder, tags: &mut TagTable, c: u32) -> usize {
        recorder
            .record(color(c), tags, &mut SystemAllocator::default())
            .unwrap()
    }

    fn recorder_with(values: &[u32], tags: &mut TagTable) -> Recorder {
        let mut recorder = Recorder::new(1, Tape::new(1));
        for v in values {
            record(&mut recorder, tags, *v);
        }
        recorder
    }

    #[test]
    fn tag_marks_the_next_recorded_instruction() {
        let mut tags = TagTable::new();
        let mut recorder = recorder_with(&[0], &mut tags);
        recorder.make_tag(5, &mut tags).unwrap();
        record(&mut recorder, &mut tags, 1);
        record(&mut recorder, &mut tags, 2);
        assert_eq!(tags.resolve(5, 1, 3), Ok(1));
    }

    #[test]
    fn inserts_advance_the_cursor() {
        let mut tags = TagTable::new();
        let mut recorder = recorder_with(&[1, 4], &mut tags);
        recorder.insert_at(ENDTAG, &tags).unwrap();
        record(&mut recorder, &mut tags, 5);
        recorder.insert_at(STARTTAG, &tags).unwrap();
        assert_eq!(record(&mut recorder, &mut tags, 0), 0);
        assert_eq!(recorder.cursor(), Cursor::Continue(1));
        record(&mut recorder, &mut tags, 0);
        assert_eq!(colors(&recorder), vec![0, 0, 1, 4, 5]);
    }

    #[test]
    fn cursor_follows_deletions() {
        let mut tags = TagTable::new();
        let mut recorder = recorder_with(&[0, 1, 2, 3, 4], &mut tags);
        tags.set(10, 1, 1).unwrap();
        tags.set(11, 1, 3).unwrap();
        tags.set(12, 1, 4).unwrap();
        recorder.insert_at(12, &tags).unwrap();
        assert_eq!(
            recorder.delete_range(10, 11, &mut tags, &mut SystemAllocator::default()),
            Ok(2)
        );
        assert_eq!(recorder.cursor(), Cursor::Insert(2));
        record(&mut recorder, &mut tags, 9);
        assert_eq!(colors(&recorder), vec![0, 3, 9, 4]);
    }

    #[test]
    fn empty_or_reversed_ranges_are_refused() {
        let mut tags = TagTable::new();
        let mut recorder = recorder_with(&[0, 1], &mut tags);
        assert_eq!(
            recorder.delete_range(ENDTAG, STARTTAG, &mut tags, &mut SystemAllocator::default()),
            Err(TagError::EmptyRange(ENDTAG, STARTTAG))
        );
        assert_eq!(colors(&recorder), vec![0, 1]);
    }

    #[test]
    fn overwrite_replaces_one_instruction() {
        let mut tags = TagTable::new();
        let mut recorder = recorder_with(&[0, 1, 2], &mut tags);
        tags.set(3, 1, 1).unwrap();
        recorder.overwrite_at(3, &tags).unwrap();
        record(&mut recorder, &mut tags, 7);
        record(&mut recorder, &mut tags, 8);
        assert_eq!(colors(&recorder), vec![0, 7, 8, 2]);
    }

    #[test]
    fn instructions_after_an_overwrite_leave_the_next_tag_alone() {
        let mut tags = TagTable::new();
        let mut recorder = recorder_with(&[0, 1, 2], &mut tags);
        tags.set(3, 1, 1).unwrap();
        tags.set(4, 1, 2).unwrap();
        recorder.overwrite_at(3, &tags).unwrap();
        record(&mut recorder, &mut tags, 7);
        record(&mut recorder, &mut tags, 8);
        //tag 4 still names the 2
        assert_eq!(tags.resolve(4, 1, 4), Ok(3));
        assert_eq!(tags.resolve(3, 1, 4), Ok(1));
    }

    #[test]
    fn tags_made_while_continuing_name_the_next_instruction() {
        let mut tags = TagTable::new();
        let mut recorder = recorder_with(&[0, 1], &mut tags);
        tags.set(3, 1, 1).unwrap();
        recorder.overwrite_at(3, &tags).unwrap();
        record(&mut recorder, &mut tags, 7);
        recorder.make_tag(5, &mut tags).unwrap();
        record(&mut recorder, &mut tags, 8);
        record(&mut recorder, &mut tags, 9);
        assert_eq!(colors(&recorder), vec![0, 7, 8, 9]);
        assert_eq!(tags.resolve(5, 1, 4), Ok(2));
    }

    #[test]
    fn overwrite_at_end_appends() {
        let mut tags = TagTable::new();
        let mut recorder = recorder_with(&[0], &mut tags);
        recorder.overwrite_at(ENDTAG, &tags).unwrap();
        record(&mut recorder, &mut tags, 1);
        assert_eq!(colors(&recorder), vec![0, 1]);
    }

    #[test]
    fn replace_from_truncates() {
        let mut tags = TagTable::new();
        let mut recorder = recorder_with(&[0, 1, 2], &mut tags);
        tags.set(4, 1, 1).unwrap();
        tags.set(5, 1, 2).unwrap();
        assert_eq!(
            recorder.replace_from(4, &mut tags, &mut SystemAllocator::default()),
            Ok(2)
        );
        assert!(recorder.is_tag(4, &tags));
        assert!(!recorder.is_tag(5, &tags));
        record(&mut recorder, &mut tags, 6);
        assert_eq!(colors(&recorder), vec![0, 6]);
    }

    #[test]
    fn unknown_tags_are_not_found() {
        let mut tags = TagTable::new();
        let mut recorder = recorder_with(&[], &mut tags);
        assert_eq!(recorder.insert_at(42, &tags), Err(TagError::NotFound(42, 1)));
        assert!(recorder.delete_tag(42, &mut tags).is_err());
    }
}
