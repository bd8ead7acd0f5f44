// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*!
Object lifecycle, tags and editing.

Lifecycle calls act immediately in either mode; they are what switches the
mode.  Tag and editing calls go through the dispatch table so that outside a
`makeobj`/`editobj` session they fail rather than touch anything.

Each call that can fail comes in two forms: the legacy name, which logs the
failure and carries on, and a `try_` form that returns it.
*/

use crate::dispatch::{ExecuteTable, RecordTable};
use crate::gl::Gl;
use crate::imp::Backend;
use crate::objects::tags::is_reserved;
use crate::objects::{ObjectError, TagError};
use crate::replay::ReplayError;
use crate::types::{Object, Tag};

fn report<E: std::fmt::Debug>(entry: &'static str, result: Result<(), E>) {
    if let Err(err) = result {
        logwise::warn_sync!(
            "{entry} failed: {err}",
            entry = entry,
            err = logwise::privacy::LogIt(&err)
        );
    }
}

impl<B: Backend> Gl<B> {
    /// Opens `object` for definition; calls are recorded into it until [Gl::closeobj].
    pub fn try_makeobj(&mut self, object: Object) -> Result<(), ObjectError> {
        let recorder = self
            .context
            .objects
            .make(object, self.context.config.chunk_size)?;
        self.context.recorder = Some(recorder);
        self.active = &RecordTable;
        logwise::info_sync!("makeobj {object}", object = object);
        Ok(())
    }

    pub fn makeobj(&mut self, object: Object) {
        report("makeobj", self.try_makeobj(object));
    }

    /// Reopens a closed object.  Recording resumes after its last instruction.
    pub fn try_editobj(&mut self, object: Object) -> Result<(), ObjectError> {
        let recorder = self
            .context
            .objects
            .edit(object, self.context.config.chunk_size)?;
        self.context.recorder = Some(recorder);
        self.active = &RecordTable;
        logwise::info_sync!("editobj {object}", object = object);
        Ok(())
    }

    pub fn editobj(&mut self, object: Object) {
        report("editobj", self.try_editobj(object));
    }

    pub fn try_closeobj(&mut self) -> Result<(), ObjectError> {
        let recorder = self
            .context
            .recorder
            .take()
            .ok_or(ObjectError::NothingOpen)?;
        let object = recorder.object();
        self.context.objects.close(recorder);
        self.active = &ExecuteTable;
        logwise::info_sync!("closeobj {object}", object = object);
        Ok(())
    }

    /// Closes the open object.  Does nothing if none is open.
    pub fn closeobj(&mut self) {
        match self.try_closeobj() {
            Ok(()) | Err(ObjectError::NothingOpen) => {}
            Err(err) => report("closeobj", Err(err)),
        }
    }

    /// Frees a closed object and its tags.  Objects that call it keep a dangling reference.
    pub fn try_delobj(&mut self, object: Object) -> Result<(), ObjectError> {
        self.context
            .objects
            .delete(object, &mut *self.context.allocator)?;
        logwise::info_sync!("delobj {object}", object = object);
        Ok(())
    }

    pub fn delobj(&mut self, object: Object) {
        report("delobj", self.try_delobj(object));
    }

    pub fn isobj(&self, object: Object) -> bool {
        self.context.objects.contains(object)
    }

    /// An object id not currently in use.
    pub fn genobj(&mut self) -> Object {
        self.context.objects.generate()
    }

    /// The object being defined or edited.
    pub fn getopenobj(&self) -> Option<Object> {
        self.context.objects.open_object()
    }

    /**
    Sets how many instructions tapes grow by.

    Applies to the open object (if any) and every object opened later.
    */
    pub fn chunksize(&mut self, chunk: usize) {
        if chunk < 1 {
            return super::rejected("chunksize", "chunk must be at least 1");
        }
        self.context.config.chunk_size = chunk;
        if let Some(recorder) = self.context.recorder.as_mut() {
            recorder.tape_mut().set_chunk_size(chunk);
        }
    }

    /// Releases storage a closed object's tape reserved beyond its length.
    pub fn try_compactify(&mut self, object: Object) -> Result<(), ObjectError> {
        self.context
            .objects
            .compact(object, &mut *self.context.allocator)
    }

    pub fn compactify(&mut self, object: Object) {
        report("compactify", self.try_compactify(object));
    }

    /// Invokes `object`: executes it now, or records the call into the open object.
    pub fn try_callobj(&mut self, object: Object) -> Result<(), ReplayError> {
        if self.context.objects.open_object() == Some(object) {
            return Err(ReplayError::Recording(object));
        }
        self.active.callobj(&mut self.context, object)
    }

    pub fn callobj(&mut self, object: Object) {
        if let Err(err) = self.try_callobj(object) {
            logwise::error_sync!(
                "callobj {object} aborted: {err}",
                object = object,
                err = logwise::privacy::LogIt(&err)
            );
        }
    }

    /// Names the current edit position `tag` in the open object.
    pub fn try_maketag(&mut self, tag: Tag) -> Result<(), TagError> {
        self.active.maketag(&mut self.context, tag)
    }

    pub fn maketag(&mut self, tag: Tag) {
        report("maketag", self.try_maketag(tag));
    }

    /// A tag value not currently in use.
    pub fn gentag(&mut self) -> Tag {
        self.context.objects.tags_mut().generate()
    }

    /**
    Whether `tag` names a position in the open object.

    The reserved start and end tags always do while an object is open.
    */
    pub fn istag(&self, tag: Tag) -> bool {
        match &self.context.recorder {
            Some(recorder) => recorder.is_tag(tag, self.context.objects.tags()),
            None => false,
        }
    }

    pub fn try_deltag(&mut self, tag: Tag) -> Result<(), TagError> {
        if is_reserved(tag) {
            return Err(TagError::Reserved(tag));
        }
        self.active.deltag(&mut self.context, tag)
    }

    pub fn deltag(&mut self, tag: Tag) {
        report("deltag", self.try_deltag(tag));
    }

    /**
    Moves the edit cursor to `tag`.

    Later calls are inserted there, each one after the previous, and the tag
    ends up naming the first of them.
    */
    pub fn try_objinsert(&mut self, tag: Tag) -> Result<(), TagError> {
        self.active.objinsert(&mut self.context, tag)
    }

    pub fn objinsert(&mut self, tag: Tag) {
        report("objinsert", self.try_objinsert(tag));
    }

    /// Deletes the instructions from `start` up to (not including) `end`; returns how many.
    pub fn try_objdelete(&mut self, start: Tag, end: Tag) -> Result<usize, TagError> {
        self.active.objdelete(&mut self.context, start, end)
    }

    pub fn objdelete(&mut self, start: Tag, end: Tag) {
        report("objdelete", self.try_objdelete(start, end).map(|_| ()));
    }

    /// Deletes everything from `tag` to the end and continues recording there.
    pub fn try_objreplace(&mut self, tag: Tag) -> Result<usize, TagError> {
        self.active.objreplace(&mut self.context, tag)
    }

    pub fn objreplace(&mut self, tag: Tag) {
        report("objreplace", self.try_objreplace(tag).map(|_| ()));
    }

    /// The next call replaces the instruction at `tag`; calls after it are inserted.
    pub fn try_objoverwrite(&mut self, tag: Tag) -> Result<(), TagError> {
        self.active.objoverwrite(&mut self.context, tag)
    }

    pub fn objoverwrite(&mut self, tag: Tag) {
        report("objoverwrite", self.try_objoverwrite(tag));
    }
}
