// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*! irisobj runs programs written against the IRIS GL family of immediate-mode
graphics APIs on top of a modern renderer, including their retained-mode
display lists ("objects").

In the legacy API every drawing call does one of two things.  Normally it draws.
Between `makeobj` and `closeobj` it is instead written down into the open
object, and a later `callobj` plays the whole sequence back.  Objects can call
other objects, and can be reopened with `editobj` and edited in place through
named positions called *tags*.

| Legacy concept | Here                                      |
|----------------|-------------------------------------------|
| GL context     | [Gl]                                      |
| Drawing calls  | methods on [Gl] with their legacy names   |
| Object         | a tape of [objects::Instruction]s         |
| Tag            | a [Tag] resolved by the context           |
| Renderer       | your [Backend] implementation             |

# Execute and record

[Gl] holds a pointer to one of two dispatch tables.  The execute table forwards
each call to the [Backend]; the record table encodes it into an
[objects::Instruction] and stores it at the edit cursor.  The pointer changes
only when an object is opened or closed, so calls don't test the mode.

Queries, buffer swaps and the object lifecycle calls themselves never record.

```
use irisobj::{Gl, TraceBackend, BackendCall};

let mut gl = Gl::new(TraceBackend::new());
gl.makeobj(1);
gl.color(7);
gl.rectf(0.0, 0.0, 1.0, 1.0);
gl.closeobj();
//nothing was drawn yet
assert!(gl.backend().calls().is_empty());

gl.callobj(1);
assert_eq!(
    gl.backend().calls(),
    &[BackendCall::Color(7), BackendCall::Rectf(0.0, 0.0, 1.0, 1.0)]
);
```

# Errors

The legacy API has no error returns, and ported code doesn't check for any.
Calls with bad arguments are logged and ignored; lifecycle and editing calls
that can't proceed are logged and ignored.  Each of the latter also has a
`try_` form returning a typed error ([ObjectError], [TagError],
[ReplayError]) for new code that wants to know.

Recorded array arguments are copied through an [objects::Allocator].  If the
allocator refuses, the call is still recorded, as an instruction that does
nothing, so positions and tags stay where the program expects them.

# Nesting

Replay recurses through `callobj`.  An object that reaches itself again is
detected and the whole call chain is abandoned; so is one that nests deeper
than [Config::max_call_depth].  A call to an object that was deleted is
skipped.
*/

mod context;
mod dispatch;
mod gl;
mod imp;
pub mod objects;
mod replay;
pub mod types;

pub use gl::{Config, Gl};
pub use imp::{Backend, BackendCall, DEFAULT_VIEWPORT, NopBackend, TraceBackend};
pub use objects::{ObjectError, ObjectState, TagError};
pub use replay::ReplayError;
pub use types::{ENDTAG, Object, STARTTAG, Tag};
