// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*!
Encodes calls into the open object's tape.

Slot layouts written here are the ones [crate::replay] reads back.  Array
arguments are duplicated through the context's allocator; nothing reaches the
backend.
*/

use crate::context::Context;
use crate::dispatch::DispatchTable;
use crate::imp::Backend;
use crate::objects::allocator::{duplicate, duplicate_str};
use crate::objects::{AllocError, Allocator, Buffer, Opcode, Slot, TagError};
use crate::replay::ReplayError;
use crate::types::{
    Angle, Axis, BlendFactor, Colorindex, Coord, CurveType, DepthFunction, Icoord, LightTarget,
    Matrix, MatrixMode, Object, Primitive, Screencoord, ShadeModel, Tag,
};

/// Appends (or inserts) into the open object instead of executing.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordTable;

fn floats(allocator: &mut dyn Allocator, source: &[f32]) -> Result<Slot, AllocError> {
    Ok(Slot::Buffer(Buffer::Floats(duplicate(allocator, source)?)))
}

fn doubles(allocator: &mut dyn Allocator, source: &[f64]) -> Result<Slot, AllocError> {
    Ok(Slot::Buffer(Buffer::Doubles(duplicate(allocator, source)?)))
}

fn flag(enabled: bool) -> Slot {
    Slot::Int(i32::from(enabled))
}

fn axis_slot(axis: Axis) -> Slot {
    //as_char is always ascii
    Slot::Char(axis.as_char() as u8)
}

fn count(len: usize) -> Slot {
    Slot::Int(i32::try_from(len).unwrap_or(i32::MAX))
}

impl RecordTable {
    fn matrix<B: Backend>(cx: &mut Context<B>, opcode: Opcode, matrix: &Matrix) {
        cx.record_with(opcode, |allocator, slots| {
            slots.push(floats(allocator, matrix.as_flattened())?);
            Ok(())
        });
    }

    fn vector<B: Backend>(cx: &mut Context<B>, opcode: Opcode, vector: &[f32]) {
        cx.record_with(opcode, |allocator, slots| {
            slots.push(floats(allocator, vector)?);
            Ok(())
        });
    }

    fn points<B: Backend>(cx: &mut Context<B>, opcode: Opcode, len: usize, flattened: &[f32]) {
        cx.record_with(opcode, |allocator, slots| {
            slots.push(count(len));
            slots.push(floats(allocator, flattened)?);
            Ok(())
        });
    }
}

impl<B: Backend> DispatchTable<B> for RecordTable {
    fn records(&self) -> bool {
        true
    }

    fn color(&self, cx: &mut Context<B>, index: Colorindex) {
        cx.record(Opcode::Color, [Slot::UInt(u32::from(index))]);
    }
    fn cpack(&self, cx: &mut Context<B>, rgba: u32) {
        cx.record(Opcode::Cpack, [Slot::UInt(rgba)]);
    }
    fn rgbcolor(&self, cx: &mut Context<B>, red: i16, green: i16, blue: i16) {
        cx.record(
            Opcode::RgbColor,
            [Slot::Short(red), Slot::Short(green), Slot::Short(blue)],
        );
    }
    fn c3f(&self, cx: &mut Context<B>, rgb: &[f32; 3]) {
        Self::vector(cx, Opcode::C3f, rgb);
    }
    fn linewidth(&self, cx: &mut Context<B>, width: i16) {
        cx.record(Opcode::LineWidth, [Slot::Short(width)]);
    }
    fn zbuffer(&self, cx: &mut Context<B>, enabled: bool) {
        cx.record(Opcode::ZBuffer, [flag(enabled)]);
    }
    fn shademodel(&self, cx: &mut Context<B>, model: ShadeModel) {
        cx.record(Opcode::ShadeModel, [Slot::Int(model.into())]);
    }
    fn backface(&self, cx: &mut Context<B>, enabled: bool) {
        cx.record(Opcode::Backface, [flag(enabled)]);
    }
    fn writemask(&self, cx: &mut Context<B>, mask: u32) {
        cx.record(Opcode::WriteMask, [Slot::UInt(mask)]);
    }
    fn zfunction(&self, cx: &mut Context<B>, function: DepthFunction) {
        cx.record(Opcode::ZFunction, [Slot::Int(function.into())]);
    }
    fn blendfunction(&self, cx: &mut Context<B>, source: BlendFactor, destination: BlendFactor) {
        cx.record(
            Opcode::BlendFunction,
            [Slot::Int(source.into()), Slot::Int(destination.into())],
        );
    }
    fn font(&self, cx: &mut Context<B>, index: i16) {
        cx.record(Opcode::Font, [Slot::Short(index)]);
    }
    fn lmbind(&self, cx: &mut Context<B>, target: LightTarget, index: i16) {
        cx.record(Opcode::LmBind, [Slot::Int(target.into()), Slot::Short(index)]);
    }

    fn clear(&self, cx: &mut Context<B>) {
        cx.record(Opcode::Clear, []);
    }
    fn zclear(&self, cx: &mut Context<B>) {
        cx.record(Opcode::ZClear, []);
    }
    fn czclear(&self, cx: &mut Context<B>, color: u32, depth: i32) {
        cx.record(Opcode::CzClear, [Slot::UInt(color), Slot::Int(depth)]);
    }

    fn mmode(&self, cx: &mut Context<B>, mode: MatrixMode) {
        cx.record(Opcode::MatrixMode, [Slot::Int(mode.into())]);
    }
    fn pushmatrix(&self, cx: &mut Context<B>) {
        cx.record(Opcode::PushMatrix, []);
    }
    fn popmatrix(&self, cx: &mut Context<B>) {
        cx.record(Opcode::PopMatrix, []);
    }
    fn loadmatrix(&self, cx: &mut Context<B>, matrix: &Matrix) {
        Self::matrix(cx, Opcode::LoadMatrix, matrix);
    }
    fn multmatrix(&self, cx: &mut Context<B>, matrix: &Matrix) {
        Self::matrix(cx, Opcode::MultMatrix, matrix);
    }
    fn translate(&self, cx: &mut Context<B>, x: Coord, y: Coord, z: Coord) {
        cx.record(Opcode::Translate, [Slot::Float(x), Slot::Float(y), Slot::Float(z)]);
    }
    fn rotate(&self, cx: &mut Context<B>, angle: Angle, axis: Axis) {
        cx.record(Opcode::Rotate, [Slot::Short(angle), axis_slot(axis)]);
    }
    fn rot(&self, cx: &mut Context<B>, degrees: f32, axis: Axis) {
        cx.record(Opcode::Rot, [Slot::Float(degrees), axis_slot(axis)]);
    }
    fn scale(&self, cx: &mut Context<B>, x: f32, y: f32, z: f32) {
        cx.record(Opcode::Scale, [Slot::Float(x), Slot::Float(y), Slot::Float(z)]);
    }
    fn ortho2(&self, cx: &mut Context<B>, left: Coord, right: Coord, bottom: Coord, top: Coord) {
        cx.record(
            Opcode::Ortho2,
            [left, right, bottom, top].map(Slot::Float),
        );
    }
    fn ortho(
        &self,
        cx: &mut Context<B>,
        left: Coord,
        right: Coord,
        bottom: Coord,
        top: Coord,
        near: Coord,
        far: Coord,
    ) {
        cx.record(
            Opcode::Ortho,
            [left, right, bottom, top, near, far].map(Slot::Float),
        );
    }
    fn perspective(&self, cx: &mut Context<B>, fovy: Angle, aspect: f32, near: Coord, far: Coord) {
        cx.record(
            Opcode::Perspective,
            [
                Slot::Short(fovy),
                Slot::Float(aspect),
                Slot::Float(near),
                Slot::Float(far),
            ],
        );
    }
    fn lookat(&self, cx: &mut Context<B>, view: [Coord; 3], point: [Coord; 3], twist: Angle) {
        let coordinates = view.into_iter().chain(point).map(Slot::Float);
        cx.record(
            Opcode::LookAt,
            coordinates.chain(std::iter::once(Slot::Short(twist))),
        );
    }
    fn polarview(
        &self,
        cx: &mut Context<B>,
        distance: Coord,
        azimuth: Angle,
        incidence: Angle,
        twist: Angle,
    ) {
        cx.record(
            Opcode::PolarView,
            [
                Slot::Float(distance),
                Slot::Short(azimuth),
                Slot::Short(incidence),
                Slot::Short(twist),
            ],
        );
    }
    fn viewport(
        &self,
        cx: &mut Context<B>,
        left: Screencoord,
        right: Screencoord,
        bottom: Screencoord,
        top: Screencoord,
    ) {
        cx.record(Opcode::Viewport, [left, right, bottom, top].map(Slot::Short));
    }

    fn rect(&self, cx: &mut Context<B>, x1: Coord, y1: Coord, x2: Coord, y2: Coord) {
        cx.record(Opcode::Rect, [x1, y1, x2, y2].map(Slot::Float));
    }
    fn rectf(&self, cx: &mut Context<B>, x1: Coord, y1: Coord, x2: Coord, y2: Coord) {
        cx.record(Opcode::Rectf, [x1, y1, x2, y2].map(Slot::Float));
    }
    fn recti(&self, cx: &mut Context<B>, x1: Icoord, y1: Icoord, x2: Icoord, y2: Icoord) {
        cx.record(Opcode::Recti, [x1, y1, x2, y2].map(Slot::Int));
    }
    fn rectfi(&self, cx: &mut Context<B>, x1: Icoord, y1: Icoord, x2: Icoord, y2: Icoord) {
        cx.record(Opcode::Rectfi, [x1, y1, x2, y2].map(Slot::Int));
    }
    fn r#move(&self, cx: &mut Context<B>, x: Coord, y: Coord, z: Coord) {
        cx.record(Opcode::Move, [x, y, z].map(Slot::Float));
    }
    fn draw(&self, cx: &mut Context<B>, x: Coord, y: Coord, z: Coord) {
        cx.record(Opcode::Draw, [x, y, z].map(Slot::Float));
    }
    fn move2(&self, cx: &mut Context<B>, x: Coord, y: Coord) {
        cx.record(Opcode::Move2, [x, y].map(Slot::Float));
    }
    fn draw2(&self, cx: &mut Context<B>, x: Coord, y: Coord) {
        cx.record(Opcode::Draw2, [x, y].map(Slot::Float));
    }
    fn pnt(&self, cx: &mut Context<B>, x: Coord, y: Coord, z: Coord) {
        cx.record(Opcode::Pnt, [x, y, z].map(Slot::Float));
    }
    fn pnt2(&self, cx: &mut Context<B>, x: Coord, y: Coord) {
        cx.record(Opcode::Pnt2, [x, y].map(Slot::Float));
    }
    fn circ(&self, cx: &mut Context<B>, x: Coord, y: Coord, radius: Coord) {
        cx.record(Opcode::Circ, [x, y, radius].map(Slot::Float));
    }
    fn circf(&self, cx: &mut Context<B>, x: Coord, y: Coord, radius: Coord) {
        cx.record(Opcode::Circf, [x, y, radius].map(Slot::Float));
    }
    fn arc(&self, cx: &mut Context<B>, x: Coord, y: Coord, radius: Coord, start: Angle, end: Angle) {
        cx.record(
            Opcode::Arc,
            [
                Slot::Float(x),
                Slot::Float(y),
                Slot::Float(radius),
                Slot::Short(start),
                Slot::Short(end),
            ],
        );
    }
    fn arcf(&self, cx: &mut Context<B>, x: Coord, y: Coord, radius: Coord, start: Angle, end: Angle) {
        cx.record(
            Opcode::Arcf,
            [
                Slot::Float(x),
                Slot::Float(y),
                Slot::Float(radius),
                Slot::Short(start),
                Slot::Short(end),
            ],
        );
    }
    fn poly(&self, cx: &mut Context<B>, points: &[[Coord; 3]]) {
        Self::points(cx, Opcode::Poly, points.len(), points.as_flattened());
    }
    fn polf(&self, cx: &mut Context<B>, points: &[[Coord; 3]]) {
        Self::points(cx, Opcode::Polf, points.len(), points.as_flattened());
    }
    fn poly2(&self, cx: &mut Context<B>, points: &[[Coord; 2]]) {
        Self::points(cx, Opcode::Poly2, points.len(), points.as_flattened());
    }
    fn polf2(&self, cx: &mut Context<B>, points: &[[Coord; 2]]) {
        Self::points(cx, Opcode::Polf2, points.len(), points.as_flattened());
    }
    fn begin(&self, cx: &mut Context<B>, primitive: Primitive) {
        cx.record(Opcode::Begin, [Slot::Int(primitive.into())]);
    }
    fn end(&self, cx: &mut Context<B>, primitive: Primitive) {
        cx.record(Opcode::End, [Slot::Int(primitive.into())]);
    }
    fn v2f(&self, cx: &mut Context<B>, vertex: &[f32; 2]) {
        Self::vector(cx, Opcode::V2f, vertex);
    }
    fn v3f(&self, cx: &mut Context<B>, vertex: &[f32; 3]) {
        Self::vector(cx, Opcode::V3f, vertex);
    }
    fn n3f(&self, cx: &mut Context<B>, normal: &[f32; 3]) {
        Self::vector(cx, Opcode::N3f, normal);
    }

    fn cmov(&self, cx: &mut Context<B>, x: Coord, y: Coord, z: Coord) {
        cx.record(Opcode::Cmov, [x, y, z].map(Slot::Float));
    }
    fn cmov2(&self, cx: &mut Context<B>, x: Coord, y: Coord) {
        cx.record(Opcode::Cmov2, [x, y].map(Slot::Float));
    }
    fn charstr(&self, cx: &mut Context<B>, text: &str) {
        cx.record_with(Opcode::Charstr, |allocator, slots| {
            slots.push(Slot::Buffer(Buffer::Bytes(duplicate_str(allocator, text)?)));
            Ok(())
        });
    }

    fn curvebasis(&self, cx: &mut Context<B>, basis: i16) {
        cx.record(Opcode::CurveBasis, [Slot::Short(basis)]);
    }
    fn curveprecision(&self, cx: &mut Context<B>, segments: i16) {
        cx.record(Opcode::CurvePrecision, [Slot::Short(segments)]);
    }
    fn crv(&self, cx: &mut Context<B>, geometry: &[[Coord; 3]; 4]) {
        Self::vector(cx, Opcode::Crv, geometry.as_flattened());
    }
    fn nurbscurve(
        &self,
        cx: &mut Context<B>,
        knots: &[f64],
        stride: usize,
        control_points: &[f64],
        order: usize,
        kind: CurveType,
    ) {
        cx.record_with(Opcode::NurbsCurve, |allocator, slots| {
            slots.push(count(knots.len()));
            slots.push(doubles(allocator, knots)?);
            slots.push(count(stride));
            slots.push(doubles(allocator, control_points)?);
            slots.push(count(order));
            slots.push(Slot::Int(kind.into()));
            Ok(())
        });
    }

    fn callobj(&self, cx: &mut Context<B>, object: Object) -> Result<(), ReplayError> {
        cx.record(Opcode::CallObject, [Slot::Int(object)]);
        Ok(())
    }

    fn maketag(&self, cx: &mut Context<B>, tag: Tag) -> Result<(), TagError> {
        let recorder = cx.recorder.as_mut().ok_or(TagError::NotEditing)?;
        recorder.make_tag(tag, cx.objects.tags_mut())
    }
    fn deltag(&self, cx: &mut Context<B>, tag: Tag) -> Result<(), TagError> {
        let recorder = cx.recorder.as_mut().ok_or(TagError::NotEditing)?;
        recorder.delete_tag(tag, cx.objects.tags_mut())
    }
    fn objinsert(&self, cx: &mut Context<B>, tag: Tag) -> Result<(), TagError> {
        let recorder = cx.recorder.as_mut().ok_or(TagError::NotEditing)?;
        recorder.insert_at(tag, cx.objects.tags()).map(|_| ())
    }
    fn objoverwrite(&self, cx: &mut Context<B>, tag: Tag) -> Result<(), TagError> {
        let recorder = cx.recorder.as_mut().ok_or(TagError::NotEditing)?;
        recorder.overwrite_at(tag, cx.objects.tags()).map(|_| ())
    }
    fn objdelete(&self, cx: &mut Context<B>, start: Tag, end: Tag) -> Result<usize, TagError> {
        let recorder = cx.recorder.as_mut().ok_or(TagError::NotEditing)?;
        recorder.delete_range(start, end, cx.objects.tags_mut(), &mut *cx.allocator)
    }
    fn objreplace(&self, cx: &mut Context<B>, tag: Tag) -> Result<usize, TagError> {
        let recorder = cx.recorder.as_mut().ok_or(TagError::NotEditing)?;
        recorder.replace_from(tag, cx.objects.tags_mut(), &mut *cx.allocator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gl::Config;
    use crate::imp::NopBackend;
    use crate::objects::tape::SLOT_BYTES;
    use crate::objects::{BudgetAllocator, SystemAllocator};

    fn recording(allocator: Box<dyn Allocator>) -> Context<NopBackend> {
        let mut cx = Context::new(NopBackend, Config::default(), allocator);
        let recorder = cx.objects.make(1, 1).unwrap();
        cx.recorder = Some(recorder);
        cx
    }

    fn tape(cx: &Context<NopBackend>) -> &crate::objects::Tape {
        cx.recorder.as_ref().unwrap().tape()
    }

    #[test]
    fn scalars_fill_leading_slots() {
        let mut cx = recording(Box::new(SystemAllocator::default()));
        RecordTable.rotate(&mut cx, 900, Axis::Y);
        let instruction = &tape(&cx).instructions()[0];
        assert_eq!(instruction.opcode(), Opcode::Rotate);
        assert_eq!(instruction.slot(0), &Slot::Short(900));
        assert_eq!(instruction.slot(1).char(), Some('y'));
        assert!(instruction.slot(2).is_empty());
    }

    #[test]
    fn polygons_store_count_and_copy() {
        let mut cx = recording(Box::new(SystemAllocator::default()));
        let points = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]];
        RecordTable.polf2(&mut cx, &points);
        let instruction = &tape(&cx).instructions()[0];
        assert_eq!(instruction.slot(0).int(), Some(3));
        assert_eq!(instruction.slot(1).floats(), Some(&[0.0, 0.0, 1.0, 0.0, 1.0, 1.0][..]));
        assert_eq!(cx.allocator.in_use(), SLOT_BYTES + 24);
    }

    #[test]
    fn refused_buffers_leave_an_inert_instruction() {
        let mut cx = recording(Box::new(BudgetAllocator::new(SLOT_BYTES + 20)));
        let knots = [0.0; 2];
        let control_points = [0.0; 6];
        RecordTable.nurbscurve(&mut cx, &knots, 24, &control_points, 2, CurveType::V3d);
        let instructions = tape(&cx).instructions();
        assert_eq!(instructions.len(), 1);
        assert!(instructions[0].is_inert());
        //the knots fitted, and were given back when the control points didn't
        assert_eq!(cx.allocator.in_use(), SLOT_BYTES);
    }

    #[test]
    fn strings_keep_their_terminator() {
        let mut cx = recording(Box::new(SystemAllocator::default()));
        RecordTable.charstr(&mut cx, "label");
        assert_eq!(tape(&cx).instructions()[0].slot(0).string(), Some("label"));
        assert_eq!(cx.allocator.in_use(), SLOT_BYTES + 6);
    }

    #[test]
    fn editing_needs_a_recorder() {
        let mut cx = Context::new(NopBackend, Config::default(), Box::new(SystemAllocator::default()));
        assert_eq!(RecordTable.objinsert(&mut cx, 1), Err(TagError::NotEditing));
    }
}
