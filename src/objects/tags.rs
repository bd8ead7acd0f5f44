// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*!
Tag bookkeeping.

Tags are global to a [crate::Gl]: a tag value names at most one position in
one object at a time.  The table is updated together with every structural
change to a tape, so a tag either resolves to a position that exists or does
not resolve at all.

Conventions:

* Inserting at position `p` shifts tags strictly after `p`.  A tag *at* `p`
  stays at `p`, which now holds the inserted instruction.
* Inserting after an instruction just recorded ([TagTable::inserted_ahead])
  also shifts the tags at `p`, so they keep naming what they named before.
* Deleting `[start, end)` drops tags strictly inside the range; tags at
  `start` and `end` both end up at `start`.
* [STARTTAG] and [ENDTAG] are never stored; they resolve against the tape
  length on demand.
*/

use std::collections::HashMap;

use crate::types::{ENDTAG, Object, STARTTAG, Tag};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Mark {
    object: Object,
    position: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum TagError {
    #[error("tag {0} is reserved")]
    Reserved(Tag),
    #[error("tag {0} does not name a position in object {1}")]
    NotFound(Tag, Object),
    #[error("no object is being edited")]
    NotEditing,
    #[error("range {0}..{1} is empty or reversed")]
    EmptyRange(Tag, Tag),
}

#[derive(Debug, Default)]
pub struct TagTable {
    marks: HashMap<Tag, Mark>,
    next: Tag,
}

pub fn is_reserved(tag: Tag) -> bool {
    tag == STARTTAG || tag == ENDTAG
}

impl TagTable {
    pub fn new() -> Self {
        TagTable {
            marks: HashMap::new(),
            next: 1,
        }
    }

    /// Points `tag` at `position` in `object`, dropping any older mapping.
    pub fn set(&mut self, tag: Tag, object: Object, position: usize) -> Result<(), TagError> {
        if is_reserved(tag) {
            return Err(TagError::Reserved(tag));
        }
        self.marks.insert(tag, Mark { object, position });
        Ok(())
    }

    /// Resolves `tag` within `object`, whose tape is `len` instructions long.
    pub fn resolve(&self, tag: Tag, object: Object, len: usize) -> Result<usize, TagError> {
        match tag {
            STARTTAG => Ok(0),
            ENDTAG => Ok(len),
            _ => match self.marks.get(&tag) {
                Some(mark) if mark.object == object && mark.position <= len => Ok(mark.position),
                _ => Err(TagError::NotFound(tag, object)),
            },
        }
    }

    pub fn contains(&self, tag: Tag, object: Object) -> bool {
        self.marks
            .get(&tag)
            .is_some_and(|mark| mark.object == object)
    }

    pub fn remove(&mut self, tag: Tag, object: Object) -> Result<(), TagError> {
        if is_reserved(tag) {
            return Err(TagError::Reserved(tag));
        }
        if !self.contains(tag, object) {
            return Err(TagError::NotFound(tag, object));
        }
        self.marks.remove(&tag);
        Ok(())
    }

    /// A tag value with no live mapping.
    pub fn generate(&mut self) -> Tag {
        loop {
            let candidate = self.next;
            self.next = match self.next.checked_add(1) {
                Some(n) => n,
                None => 1,
            };
            if candidate > 0 && !self.marks.contains_key(&candidate) {
                return candidate;
            }
        }
    }

    /// Accounts for one instruction inserted at `position` in `object`.
    pub fn inserted(&mut self, object: Object, position: usize) {
        for mark in self.marks.values_mut() {
            if mark.object == object && mark.position > position {
                mark.position += 1;
            }
        }
    }

    /**
    Accounts for one instruction inserted at `position` in `object` ahead of
    whatever tags already sit there.

    Tags at `position` shift with the instructions after it, except those in
    `held`, which were made for the inserted instruction.
    */
    pub fn inserted_ahead(&mut self, object: Object, position: usize, held: &[Tag]) {
        for (tag, mark) in self.marks.iter_mut() {
            if mark.object == object
                && (mark.position > position
                    || (mark.position == position && !held.contains(tag)))
            {
                mark.position += 1;
            }
        }
    }

    /// Accounts for `[start, end)` having been removed from `object`.
    pub fn deleted(&mut self, object: Object, start: usize, end: usize) {
        if end <= start {
            return;
        }
        let removed = end - start;
        self.marks.retain(|_, mark| {
            mark.object != object || mark.position <= start || mark.position >= end
        });
        for mark in self.marks.values_mut() {
            if mark.object == object && mark.position >= end {
                mark.position -= removed;
            }
        }
    }

    /// Accounts for `object` having been cut short at `position`.
    pub fn truncated(&mut self, object: Object, position: usize) {
        self.marks
            .retain(|_, mark| mark.object != object || mark.position <= position);
    }

    /// Forgets every tag pointing into `object`.
    pub fn forget_object(&mut self, object: Object) {
        self.marks.retain(|_, mark| mark.object != object);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_tags_resolve_against_length() {
        let tags = TagTable::new();
        assert_eq!(tags.resolve(STARTTAG, 1, 5), Ok(0));
        assert_eq!(tags.resolve(ENDTAG, 1, 5), Ok(5));
        assert_eq!(tags.resolve(ENDTAG, 1, 0), Ok(0));
    }

    #[test]
    fn reserved_tags_cannot_be_set_or_removed() {
        let mut tags = TagTable::new();
        assert_eq!(tags.set(STARTTAG, 1, 0), Err(TagError::Reserved(STARTTAG)));
        assert_eq!(tags.remove(ENDTAG, 1), Err(TagError::Reserved(ENDTAG)));
    }

    #[test]
    fn tags_are_scoped_by_object_on_lookup() {
        let mut tags = TagTable::new();
        tags.set(10, 1, 2).unwrap();
        assert_eq!(tags.resolve(10, 1, 4), Ok(2));
        assert_eq!(tags.resolve(10, 2, 4), Err(TagError::NotFound(10, 2)));
        //moving the tag to another object drops the old mapping
        tags.set(10, 2, 0).unwrap();
        assert!(!tags.contains(10, 1));
        assert!(tags.contains(10, 2));
    }

    #[test]
    fn insertion_shifts_only_later_tags() {
        let mut tags = TagTable::new();
        tags.set(1, 7, 1).unwrap();
        tags.set(2, 7, 3).unwrap();
        tags.set(3, 8, 3).unwrap();
        tags.inserted(7, 1);
        assert_eq!(tags.resolve(1, 7, 5), Ok(1));
        assert_eq!(tags.resolve(2, 7, 5), Ok(4));
        assert_eq!(tags.resolve(3, 8, 5), Ok(3));
    }

    #[test]
    fn inserting_ahead_shifts_tags_at_the_position() {
        let mut tags = TagTable::new();
        tags.set(1, 7, 1).unwrap();
        tags.set(2, 7, 2).unwrap();
        tags.set(3, 7, 2).unwrap();
        tags.inserted_ahead(7, 2, &[3]);
        assert_eq!(tags.resolve(1, 7, 4), Ok(1));
        assert_eq!(tags.resolve(2, 7, 4), Ok(3));
        assert_eq!(tags.resolve(3, 7, 4), Ok(2));
    }

    #[test]
    fn deletion_drops_inner_tags_and_shifts_later_ones() {
        let mut tags = TagTable::new();
        tags.set(1, 7, 1).unwrap();
        tags.set(2, 7, 2).unwrap();
        tags.set(3, 7, 4).unwrap();
        tags.set(4, 7, 6).unwrap();
        tags.deleted(7, 1, 4);
        assert_eq!(tags.resolve(1, 7, 3), Ok(1));
        assert!(tags.resolve(2, 7, 3).is_err());
        assert_eq!(tags.resolve(3, 7, 3), Ok(1));
        assert_eq!(tags.resolve(4, 7, 3), Ok(3));
    }

    #[test]
    fn truncation_keeps_the_cut_point() {
        let mut tags = TagTable::new();
        tags.set(1, 7, 2).unwrap();
        tags.set(2, 7, 3).unwrap();
        tags.truncated(7, 2);
        assert_eq!(tags.resolve(1, 7, 2), Ok(2));
        assert!(!tags.contains(2, 7));
    }

    #[test]
    fn generated_tags_skip_live_ones() {
        let mut tags = TagTable::new();
        tags.set(1, 1, 0).unwrap();
        tags.set(2, 1, 0).unwrap();
        assert_eq!(tags.generate(), 3);
        assert_eq!(tags.generate(), 4);
    }

    #[test]
    fn forgetting_an_object() {
        let mut tags = TagTable::new();
        tags.set(1, 1, 0).unwrap();
        tags.set(2, 2, 0).unwrap();
        tags.forget_object(1);
        assert!(!tags.contains(1, 1));
        assert!(tags.contains(2, 2));
    }
}
