// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*!
The public API surface.

[Gl] exposes the legacy entry points as methods with their legacy names.  Each
recordable method checks its cheap preconditions, converts integer enumerants,
and then goes through the active dispatch table: straight to the backend
normally, into the open object while one is open.

A method whose preconditions fail logs a warning and does nothing, in both
modes, so a tape never holds a call that could not have executed.

The entry points are split by family:

* `state`: colors, depth and blend modes, clearing
* `transforms`: matrix mode and stack, projections, viewport
* `primitives`: rectangles, lines, points, polygons, vertex calls, text, curves
* `lifecycle`: `makeobj` and friends, tags and editing, `callobj`
* `queries`: entry points that never record
*/

mod lifecycle;
mod primitives;
mod queries;
mod state;
mod transforms;

use crate::context::Context;
use crate::dispatch::{DispatchTable, ExecuteTable};
use crate::imp::Backend;
use crate::objects::{Allocator, Instruction, ObjectState, SystemAllocator};
use crate::types::Object;

/**
Tunables for a [Gl].

Construct with struct-update syntax from [Config::default]:

```
let config = irisobj::Config {
    chunk_size: 32,
    ..Default::default()
};
assert_eq!(config.max_call_depth, Some(256));
```
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Instructions a tape grows by when it fills up.  Values below 1 are treated as 1.
    pub chunk_size: usize,
    /**
    How deeply `callobj` may nest during replay.

    `None` removes the limit.  A cyclic object graph is caught regardless, so
    this only bounds legitimately deep (or very long) chains.
    */
    pub max_call_depth: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            chunk_size: 1,
            max_call_depth: Some(256),
        }
    }
}

/**
A graphics context: backend, object table and the current dispatch mode.

All state lives here; nothing is global.  Every entry point takes `&mut self`,
so one context is driven from one place at a time.
*/
pub struct Gl<B: Backend> {
    context: Context<B>,
    active: &'static dyn DispatchTable<B>,
}

impl<B: Backend> std::fmt::Debug for Gl<B>
where
    B: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gl")
            .field("context", &self.context)
            .field("recording", &self.active.records())
            .finish()
    }
}

impl<B: Backend> Gl<B> {
    pub fn new(backend: B) -> Self {
        Self::with_config(backend, Config::default())
    }

    pub fn with_config(backend: B, config: Config) -> Self {
        Self::with_allocator(backend, config, SystemAllocator::default())
    }

    /// Uses `allocator` to account for tape storage and every recorded argument buffer.
    pub fn with_allocator<A: Allocator + 'static>(backend: B, config: Config, allocator: A) -> Self {
        Gl {
            context: Context::new(backend, config, Box::new(allocator)),
            active: &ExecuteTable,
        }
    }

    pub fn backend(&self) -> &B {
        &self.context.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.context.backend
    }

    pub fn into_backend(self) -> B {
        self.context.backend
    }

    pub fn config(&self) -> &Config {
        &self.context.config
    }

    pub fn allocator(&self) -> &dyn Allocator {
        &*self.context.allocator
    }

    /// Whether calls are currently being recorded rather than executed.
    pub fn is_recording(&self) -> bool {
        self.active.records()
    }

    pub fn object_state(&self, object: Object) -> ObjectState {
        self.context.objects.state(object)
    }

    /**
    The instructions recorded for `object` so far.

    Works for closed objects and for the object that is open.  `None` for
    anything else.
    */
    pub fn instructions(&self, object: Object) -> Option<&[Instruction]> {
        match &self.context.recorder {
            Some(recorder) if recorder.object() == object => Some(recorder.tape().instructions()),
            _ => self
                .context
                .objects
                .tape(object)
                .map(|tape| tape.instructions()),
        }
    }
}

/// Logs a dropped call.
fn rejected(entry: &'static str, reason: &'static str) {
    logwise::warn_sync!("{entry} ignored: {reason}", entry = entry, reason = reason);
}
