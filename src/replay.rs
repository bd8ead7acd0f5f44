// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*!
The replay interpreter.

[call_object] checks an object's tape out of the table, walks it and hands
each instruction to [ExecuteTable], then checks the tape back in.  A
`callobj` instruction recurses.

Because the tape is out of the table while it plays, an object that reaches
itself again (directly or through others) finds itself busy.  That, and the
optional depth limit, abort the whole chain.  A reference to an object that
doesn't exist is skipped.
*/

use crate::context::Context;
use crate::dispatch::{DispatchTable, ExecuteTable};
use crate::imp::Backend;
use crate::objects::{Instruction, ObjectError, ObjectState, Opcode, Slot};
use crate::types::{
    Axis, BlendFactor, Colorindex, CurveType, DepthFunction, LightTarget, Matrix, MatrixMode,
    Object, Primitive, ShadeModel,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ReplayError {
    #[error("object {0} calls itself")]
    Cycle(Object),
    #[error("calling object {object} would nest {depth} deep")]
    DepthExceeded { object: Object, depth: usize },
    #[error("object {0} is still being recorded")]
    Recording(Object),
}

/// Replays `object` against the backend.
pub(crate) fn call_object<B: Backend>(
    cx: &mut Context<B>,
    object: Object,
) -> Result<(), ReplayError> {
    if let Some(limit) = cx.config.max_call_depth {
        if cx.depth >= limit {
            return Err(ReplayError::DepthExceeded {
                object,
                depth: cx.depth + 1,
            });
        }
    }
    if matches!(
        cx.objects.state(object),
        ObjectState::Open | ObjectState::Editing
    ) {
        return Err(ReplayError::Recording(object));
    }
    let tape = match cx.objects.checkout(object) {
        Ok(tape) => tape,
        Err(ObjectError::NotFound(_)) => {
            logwise::trace_sync!("callobj {object}: no such object", object = object);
            return Ok(());
        }
        Err(_) => return Err(ReplayError::Cycle(object)),
    };
    logwise::trace_sync!(
        "replaying object {object} ({len} instructions) at depth {depth}",
        object = object,
        len = tape.len(),
        depth = cx.depth
    );
    cx.depth += 1;
    let result = tape
        .instructions()
        .iter()
        .try_for_each(|instruction| execute(cx, instruction));
    cx.depth -= 1;
    cx.objects.checkin(object, tape);
    result
}

/// Runs one instruction.  Inert and undecodable instructions are skipped.
fn execute<B: Backend>(cx: &mut Context<B>, instruction: &Instruction) -> Result<(), ReplayError> {
    if instruction.is_inert() {
        return Ok(());
    }
    match decode(cx, instruction) {
        Some(result) => result,
        None => {
            logwise::warn_sync!(
                "Skipping malformed {opcode} instruction",
                opcode = instruction.opcode().name()
            );
            Ok(())
        }
    }
}

fn floats<const N: usize>(slots: &[Slot]) -> Option<[f32; N]> {
    let mut out = [0.0; N];
    for (value, slot) in out.iter_mut().zip(slots.get(..N)?) {
        *value = slot.float()?;
    }
    Some(out)
}

fn fixed<const N: usize>(slot: &Slot) -> Option<&[f32; N]> {
    slot.floats()?.try_into().ok()
}

/// A count slot followed by a flattened buffer of `N`-tuples.
fn points<'a, const N: usize>(count: &Slot, buffer: &'a Slot) -> Option<&'a [[f32; N]]> {
    let (points, rest) = buffer.floats()?.as_chunks::<N>();
    let count = usize::try_from(count.int()?).ok()?;
    (rest.is_empty() && points.len() == count).then_some(points)
}

fn matrix(slot: &Slot) -> Option<Matrix> {
    let (rows, _) = fixed::<16>(slot)?.as_chunks::<4>();
    rows.try_into().ok()
}

fn enumerant<T: TryFrom<i32>>(slot: &Slot) -> Option<T> {
    T::try_from(slot.int()?).ok()
}

fn axis(slot: &Slot) -> Option<Axis> {
    Axis::try_from(slot.char()?).ok()
}

fn flag(slot: &Slot) -> Option<bool> {
    Some(slot.int()? != 0)
}

fn length(slot: &Slot) -> Option<usize> {
    usize::try_from(slot.int()?).ok()
}

/**
Decodes the slots of `instruction` and dispatches it.

Returns `None` before touching the backend if any slot is not what the
recording side writes for that opcode.
*/
fn decode<B: Backend>(
    cx: &mut Context<B>,
    instruction: &Instruction,
) -> Option<Result<(), ReplayError>> {
    let table: &dyn DispatchTable<B> = &ExecuteTable;
    let s = instruction.slots();
    match instruction.opcode() {
        Opcode::Nop => {}
        Opcode::Color => table.color(cx, Colorindex::try_from(s[0].uint()?).ok()?),
        Opcode::Cpack => table.cpack(cx, s[0].uint()?),
        Opcode::RgbColor => table.rgbcolor(cx, s[0].short()?, s[1].short()?, s[2].short()?),
        Opcode::C3f => table.c3f(cx, fixed::<3>(&s[0])?),
        Opcode::LineWidth => table.linewidth(cx, s[0].short()?),
        Opcode::ZBuffer => table.zbuffer(cx, flag(&s[0])?),
        Opcode::ShadeModel => table.shademodel(cx, enumerant::<ShadeModel>(&s[0])?),
        Opcode::Backface => table.backface(cx, flag(&s[0])?),
        Opcode::WriteMask => table.writemask(cx, s[0].uint()?),
        Opcode::ZFunction => table.zfunction(cx, enumerant::<DepthFunction>(&s[0])?),
        Opcode::BlendFunction => table.blendfunction(
            cx,
            enumerant::<BlendFactor>(&s[0])?,
            enumerant::<BlendFactor>(&s[1])?,
        ),
        Opcode::Font => table.font(cx, s[0].short()?),
        Opcode::LmBind => table.lmbind(cx, enumerant::<LightTarget>(&s[0])?, s[1].short()?),
        Opcode::Clear => table.clear(cx),
        Opcode::ZClear => table.zclear(cx),
        Opcode::CzClear => table.czclear(cx, s[0].uint()?, s[1].int()?),
        Opcode::MatrixMode => table.mmode(cx, enumerant::<MatrixMode>(&s[0])?),
        Opcode::PushMatrix => table.pushmatrix(cx),
        Opcode::PopMatrix => table.popmatrix(cx),
        Opcode::LoadMatrix => table.loadmatrix(cx, &matrix(&s[0])?),
        Opcode::MultMatrix => table.multmatrix(cx, &matrix(&s[0])?),
        Opcode::Translate => {
            let [x, y, z] = floats(s)?;
            table.translate(cx, x, y, z)
        }
        Opcode::Rotate => table.rotate(cx, s[0].short()?, axis(&s[1])?),
        Opcode::Rot => table.rot(cx, s[0].float()?, axis(&s[1])?),
        Opcode::Scale => {
            let [x, y, z] = floats(s)?;
            table.scale(cx, x, y, z)
        }
        Opcode::Ortho2 => {
            let [left, right, bottom, top] = floats(s)?;
            table.ortho2(cx, left, right, bottom, top)
        }
        Opcode::Ortho => {
            let [left, right, bottom, top, near, far] = floats(s)?;
            table.ortho(cx, left, right, bottom, top, near, far)
        }
        Opcode::Perspective => table.perspective(
            cx,
            s[0].short()?,
            s[1].float()?,
            s[2].float()?,
            s[3].float()?,
        ),
        Opcode::LookAt => {
            let [vx, vy, vz, px, py, pz] = floats(s)?;
            table.lookat(cx, [vx, vy, vz], [px, py, pz], s[6].short()?)
        }
        Opcode::PolarView => table.polarview(
            cx,
            s[0].float()?,
            s[1].short()?,
            s[2].short()?,
            s[3].short()?,
        ),
        Opcode::Viewport => table.viewport(
            cx,
            s[0].short()?,
            s[1].short()?,
            s[2].short()?,
            s[3].short()?,
        ),
        Opcode::Rect => {
            let [x1, y1, x2, y2] = floats(s)?;
            table.rect(cx, x1, y1, x2, y2)
        }
        Opcode::Rectf => {
            let [x1, y1, x2, y2] = floats(s)?;
            table.rectf(cx, x1, y1, x2, y2)
        }
        Opcode::Recti => table.recti(cx, s[0].int()?, s[1].int()?, s[2].int()?, s[3].int()?),
        Opcode::Rectfi => table.rectfi(cx, s[0].int()?, s[1].int()?, s[2].int()?, s[3].int()?),
        Opcode::Move => {
            let [x, y, z] = floats(s)?;
            table.r#move(cx, x, y, z)
        }
        Opcode::Draw => {
            let [x, y, z] = floats(s)?;
            table.draw(cx, x, y, z)
        }
        Opcode::Move2 => {
            let [x, y] = floats(s)?;
            table.move2(cx, x, y)
        }
        Opcode::Draw2 => {
            let [x, y] = floats(s)?;
            table.draw2(cx, x, y)
        }
        Opcode::Pnt => {
            let [x, y, z] = floats(s)?;
            table.pnt(cx, x, y, z)
        }
        Opcode::Pnt2 => {
            let [x, y] = floats(s)?;
            table.pnt2(cx, x, y)
        }
        Opcode::Circ => {
            let [x, y, radius] = floats(s)?;
            table.circ(cx, x, y, radius)
        }
        Opcode::Circf => {
            let [x, y, radius] = floats(s)?;
            table.circf(cx, x, y, radius)
        }
        Opcode::Arc => {
            let [x, y, radius] = floats(s)?;
            table.arc(cx, x, y, radius, s[3].short()?, s[4].short()?)
        }
        Opcode::Arcf => {
            let [x, y, radius] = floats(s)?;
            table.arcf(cx, x, y, radius, s[3].short()?, s[4].short()?)
        }
        Opcode::Poly => table.poly(cx, points::<3>(&s[0], &s[1])?),
        Opcode::Polf => table.polf(cx, points::<3>(&s[0], &s[1])?),
        Opcode::Poly2 => table.poly2(cx, points::<2>(&s[0], &s[1])?),
        Opcode::Polf2 => table.polf2(cx, points::<2>(&s[0], &s[1])?),
        Opcode::Begin => table.begin(cx, enumerant::<Primitive>(&s[0])?),
        Opcode::End => table.end(cx, enumerant::<Primitive>(&s[0])?),
        Opcode::V2f => table.v2f(cx, fixed::<2>(&s[0])?),
        Opcode::V3f => table.v3f(cx, fixed::<3>(&s[0])?),
        Opcode::N3f => table.n3f(cx, fixed::<3>(&s[0])?),
        Opcode::Cmov => {
            let [x, y, z] = floats(s)?;
            table.cmov(cx, x, y, z)
        }
        Opcode::Cmov2 => {
            let [x, y] = floats(s)?;
            table.cmov2(cx, x, y)
        }
        Opcode::Charstr => table.charstr(cx, s[0].string()?),
        Opcode::CurveBasis => table.curvebasis(cx, s[0].short()?),
        Opcode::CurvePrecision => table.curveprecision(cx, s[0].short()?),
        Opcode::Crv => {
            let (rows, _) = fixed::<12>(&s[0])?.as_chunks::<3>();
            table.crv(cx, rows.try_into().ok()?)
        }
        Opcode::NurbsCurve => {
            let knots = s[1].doubles()?;
            if length(&s[0])? != knots.len() {
                return None;
            }
            table.nurbscurve(
                cx,
                knots,
                length(&s[2])?,
                s[3].doubles()?,
                length(&s[4])?,
                enumerant::<CurveType>(&s[5])?,
            )
        }
        Opcode::CallObject => return Some(table.callobj(cx, s[0].int()?)),
    }
    Some(Ok(()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gl::Config;
    use crate::imp::{BackendCall, TraceBackend};
    use crate::objects::{Buffer, SystemAllocator, Tape};

    fn context() -> Context<TraceBackend> {
        Context::new(
            TraceBackend::new(),
            Config::default(),
            Box::new(SystemAllocator::default()),
        )
    }

    fn define(cx: &mut Context<TraceBackend>, object: Object, instructions: Vec<Instruction>) {
        let mut recorder = cx.objects.make(object, 1).unwrap();
        let tape: &mut Tape = recorder.tape_mut();
        for instruction in instructions {
            tape.append(instruction, &mut *cx.allocator).unwrap();
        }
        cx.objects.close(recorder);
    }

    #[test]
    fn malformed_instructions_are_skipped() {
        let mut cx = context();
        define(
            &mut cx,
            1,
            vec![
                Instruction::new(Opcode::Color, [Slot::Float(1.0)]),
                Instruction::new(
                    Opcode::Poly2,
                    [
                        Slot::Int(2),
                        Slot::Buffer(Buffer::Floats(vec![0.0; 3].into_boxed_slice())),
                    ],
                ),
                Instruction::inert(),
                Instruction::new(Opcode::Color, [Slot::UInt(5)]),
            ],
        );
        assert_eq!(call_object(&mut cx, 1), Ok(()));
        assert_eq!(cx.backend.calls(), &[BackendCall::Color(5)]);
    }

    #[test]
    fn matrices_decode_row_major() {
        let mut cx = context();
        let flat: Vec<f32> = (0..16).map(|v| v as f32).collect();
        define(
            &mut cx,
            1,
            vec![Instruction::new(
                Opcode::LoadMatrix,
                [Slot::Buffer(Buffer::Floats(flat.into_boxed_slice()))],
            )],
        );
        call_object(&mut cx, 1).unwrap();
        let BackendCall::LoadMatrix(m) = &cx.backend.calls()[0] else {
            panic!("expected loadmatrix");
        };
        assert_eq!(m[1], [4.0, 5.0, 6.0, 7.0]);
    }

    #[test]
    fn self_reference_is_a_cycle() {
        let mut cx = context();
        define(
            &mut cx,
            7,
            vec![
                Instruction::new(Opcode::Clear, []),
                Instruction::new(Opcode::CallObject, [Slot::Int(7)]),
                Instruction::new(Opcode::ZClear, []),
            ],
        );
        assert_eq!(call_object(&mut cx, 7), Err(ReplayError::Cycle(7)));
        assert_eq!(cx.backend.calls(), &[BackendCall::Clear]);
        assert_eq!(cx.depth, 0);
        //the tape came back
        assert!(cx.objects.tape(7).is_some());
    }

    #[test]
    fn depth_limit_stops_deep_chains() {
        let mut cx = context();
        cx.config.max_call_depth = Some(2);
        define(&mut cx, 1, vec![Instruction::new(Opcode::CallObject, [Slot::Int(2)])]);
        define(&mut cx, 2, vec![Instruction::new(Opcode::CallObject, [Slot::Int(3)])]);
        define(&mut cx, 3, vec![Instruction::new(Opcode::Clear, [])]);
        assert_eq!(
            call_object(&mut cx, 1),
            Err(ReplayError::DepthExceeded {
                object: 3,
                depth: 3
            })
        );
        assert!(cx.backend.calls().is_empty());
        cx.config.max_call_depth = None;
        assert_eq!(call_object(&mut cx, 1), Ok(()));
        assert_eq!(cx.backend.calls(), &[BackendCall::Clear]);
    }

    #[test]
    fn missing_objects_are_skipped() {
        let mut cx = context();
        define(
            &mut cx,
            1,
            vec![
                Instruction::new(Opcode::CallObject, [Slot::Int(99)]),
                Instruction::new(Opcode::Clear, []),
            ],
        );
        assert_eq!(call_object(&mut cx, 1), Ok(()));
        assert_eq!(cx.backend.calls(), &[BackendCall::Clear]);
    }
}
