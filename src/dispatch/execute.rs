// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
use crate::context::Context;
use crate::dispatch::DispatchTable;
use crate::imp::Backend;
use crate::objects::TagError;
use crate::replay::{self, ReplayError};
use crate::types::{
    Angle, Axis, BlendFactor, Colorindex, Coord, CurveType, DepthFunction, Icoord, LightTarget,
    Matrix, MatrixMode, Object, Primitive, Screencoord, ShadeModel, Tag,
};

/// Forwards every call to the backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExecuteTable;

impl<B: Backend> DispatchTable<B> for ExecuteTable {
    fn records(&self) -> bool {
        false
    }

    fn color(&self, cx: &mut Context<B>, index: Colorindex) {
        cx.backend.color(index);
    }
    fn cpack(&self, cx: &mut Context<B>, rgba: u32) {
        cx.backend.cpack(rgba);
    }
    fn rgbcolor(&self, cx: &mut Context<B>, red: i16, green: i16, blue: i16) {
        cx.backend.rgbcolor(red, green, blue);
    }
    fn c3f(&self, cx: &mut Context<B>, rgb: &[f32; 3]) {
        cx.backend.c3f(rgb);
    }
    fn linewidth(&self, cx: &mut Context<B>, width: i16) {
        cx.backend.linewidth(width);
    }
    fn zbuffer(&self, cx: &mut Context<B>, enabled: bool) {
        cx.backend.zbuffer(enabled);
    }
    fn shademodel(&self, cx: &mut Context<B>, model: ShadeModel) {
        cx.backend.shademodel(model);
    }
    fn backface(&self, cx: &mut Context<B>, enabled: bool) {
        cx.backend.backface(enabled);
    }
    fn writemask(&self, cx: &mut Context<B>, mask: u32) {
        cx.backend.writemask(mask);
    }
    fn zfunction(&self, cx: &mut Context<B>, function: DepthFunction) {
        cx.backend.zfunction(function);
    }
    fn blendfunction(&self, cx: &mut Context<B>, source: BlendFactor, destination: BlendFactor) {
        cx.backend.blendfunction(source, destination);
    }
    fn font(&self, cx: &mut Context<B>, index: i16) {
        cx.backend.font(index);
    }
    fn lmbind(&self, cx: &mut Context<B>, target: LightTarget, index: i16) {
        cx.backend.lmbind(target, index);
    }

    fn clear(&self, cx: &mut Context<B>) {
        cx.backend.clear();
    }
    fn zclear(&self, cx: &mut Context<B>) {
        cx.backend.zclear();
    }
    fn czclear(&self, cx: &mut Context<B>, color: u32, depth: i32) {
        cx.backend.czclear(color, depth);
    }

    fn mmode(&self, cx: &mut Context<B>, mode: MatrixMode) {
        cx.backend.mmode(mode);
    }
    fn pushmatrix(&self, cx: &mut Context<B>) {
        cx.backend.pushmatrix();
    }
    fn popmatrix(&self, cx: &mut Context<B>) {
        cx.backend.popmatrix();
    }
    fn loadmatrix(&self, cx: &mut Context<B>, matrix: &Matrix) {
        cx.backend.loadmatrix(matrix);
    }
    fn multmatrix(&self, cx: &mut Context<B>, matrix: &Matrix) {
        cx.backend.multmatrix(matrix);
    }
    fn translate(&self, cx: &mut Context<B>, x: Coord, y: Coord, z: Coord) {
        cx.backend.translate(x, y, z);
    }
    fn rotate(&self, cx: &mut Context<B>, angle: Angle, axis: Axis) {
        cx.backend.rotate(angle, axis);
    }
    fn rot(&self, cx: &mut Context<B>, degrees: f32, axis: Axis) {
        cx.backend.rot(degrees, axis);
    }
    fn scale(&self, cx: &mut Context<B>, x: f32, y: f32, z: f32) {
        cx.backend.scale(x, y, z);
    }
    fn ortho2(&self, cx: &mut Context<B>, left: Coord, right: Coord, bottom: Coord, top: Coord) {
        cx.backend.ortho2(left, right, bottom, top);
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
        cx.backend.ortho(left, right, bottom, top, near, far);
    }
    fn perspective(&self, cx: &mut Context<B>, fovy: Angle, aspect: f32, near: Coord, far: Coord) {
        cx.backend.perspective(fovy, aspect, near, far);
    }
    fn lookat(&self, cx: &mut Context<B>, view: [Coord; 3], point: [Coord; 3], twist: Angle) {
        let [vx, vy, vz] = view;
        let [px, py, pz] = point;
        cx.backend.lookat(vx, vy, vz, px, py, pz, twist);
    }
    fn polarview(
        &self,
        cx: &mut Context<B>,
        distance: Coord,
        azimuth: Angle,
        incidence: Angle,
        twist: Angle,
    ) {
        cx.backend.polarview(distance, azimuth, incidence, twist);
    }
    fn viewport(
        &self,
        cx: &mut Context<B>,
        left: Screencoord,
        right: Screencoord,
        bottom: Screencoord,
        top: Screencoord,
    ) {
        cx.backend.viewport(left, right, bottom, top);
    }

    fn rect(&self, cx: &mut Context<B>, x1: Coord, y1: Coord, x2: Coord, y2: Coord) {
        cx.backend.rect(x1, y1, x2, y2);
    }
    fn rectf(&self, cx: &mut Context<B>, x1: Coord, y1: Coord, x2: Coord, y2: Coord) {
        cx.backend.rectf(x1, y1, x2, y2);
    }
    fn recti(&self, cx: &mut Context<B>, x1: Icoord, y1: Icoord, x2: Icoord, y2: Icoord) {
        cx.backend.recti(x1, y1, x2, y2);
    }
    fn rectfi(&self, cx: &mut Context<B>, x1: Icoord, y1: Icoord, x2: Icoord, y2: Icoord) {
        cx.backend.rectfi(x1, y1, x2, y2);
    }
    fn r#move(&self, cx: &mut Context<B>, x: Coord, y: Coord, z: Coord) {
        cx.backend.r#move(x, y, z);
    }
    fn draw(&self, cx: &mut Context<B>, x: Coord, y: Coord, z: Coord) {
        cx.backend.draw(x, y, z);
    }
    fn move2(&self, cx: &mut Context<B>, x: Coord, y: Coord) {
        cx.backend.move2(x, y);
    }
    fn draw2(&self, cx: &mut Context<B>, x: Coord, y: Coord) {
        cx.backend.draw2(x, y);
    }
    fn pnt(&self, cx: &mut Context<B>, x: Coord, y: Coord, z: Coord) {
        cx.backend.pnt(x, y, z);
    }
    fn pnt2(&self, cx: &mut Context<B>, x: Coord, y: Coord) {
        cx.backend.pnt2(x, y);
    }
    fn circ(&self, cx: &mut Context<B>, x: Coord, y: Coord, radius: Coord) {
        cx.backend.circ(x, y, radius);
    }
    fn circf(&self, cx: &mut Context<B>, x: Coord, y: Coord, radius: Coord) {
        cx.backend.circf(x, y, radius);
    }
    fn arc(&self, cx: &mut Context<B>, x: Coord, y: Coord, radius: Coord, start: Angle, end: Angle) {
        cx.backend.arc(x, y, radius, start, end);
    }
    fn arcf(&self, cx: &mut Context<B>, x: Coord, y: Coord, radius: Coord, start: Angle, end: Angle) {
        cx.backend.arcf(x, y, radius, start, end);
    }
    fn poly(&self, cx: &mut Context<B>, points: &[[Coord; 3]]) {
        cx.backend.poly(points);
    }
    fn polf(&self, cx: &mut Context<B>, points: &[[Coord; 3]]) {
        cx.backend.polf(points);
    }
    fn poly2(&self, cx: &mut Context<B>, points: &[[Coord; 2]]) {
        cx.backend.poly2(points);
    }
    fn polf2(&self, cx: &mut Context<B>, points: &[[Coord; 2]]) {
        cx.backend.polf2(points);
    }
    fn begin(&self, cx: &mut Context<B>, primitive: Primitive) {
        cx.backend.begin(primitive);
    }
    fn end(&self, cx: &mut Context<B>, primitive: Primitive) {
        cx.backend.end(primitive);
    }
    fn v2f(&self, cx: &mut Context<B>, vertex: &[f32; 2]) {
        cx.backend.v2f(vertex);
    }
    fn v3f(&self, cx: &mut Context<B>, vertex: &[f32; 3]) {
        cx.backend.v3f(vertex);
    }
    fn n3f(&self, cx: &mut Context<B>, normal: &[f32; 3]) {
        cx.backend.n3f(normal);
    }

    fn cmov(&self, cx: &mut Context<B>, x: Coord, y: Coord, z: Coord) {
        cx.backend.cmov(x, y, z);
    }
    fn cmov2(&self, cx: &mut Context<B>, x: Coord, y: Coord) {
        cx.backend.cmov2(x, y);
    }
    fn charstr(&self, cx: &mut Context<B>, text: &str) {
        cx.backend.charstr(text);
    }

    fn curvebasis(&self, cx: &mut Context<B>, basis: i16) {
        cx.backend.curvebasis(basis);
    }
    fn curveprecision(&self, cx: &mut Context<B>, segments: i16) {
        cx.backend.curveprecision(segments);
    }
    fn crv(&self, cx: &mut Context<B>, geometry: &[[Coord; 3]; 4]) {
        cx.backend.crv(geometry);
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
        cx.backend.nurbscurve(knots, stride, control_points, order, kind);
    }

    fn callobj(&self, cx: &mut Context<B>, object: Object) -> Result<(), ReplayError> {
        replay::call_object(cx, object)
    }

    fn maketag(&self, _cx: &mut Context<B>, _tag: Tag) -> Result<(), TagError> {
        Err(TagError::NotEditing)
    }
    fn deltag(&self, _cx: &mut Context<B>, _tag: Tag) -> Result<(), TagError> {
        Err(TagError::NotEditing)
    }
    fn objinsert(&self, _cx: &mut Context<B>, _tag: Tag) -> Result<(), TagError> {
        Err(TagError::NotEditing)
    }
    fn objoverwrite(&self, _cx: &mut Context<B>, _tag: Tag) -> Result<(), TagError> {
        Err(TagError::NotEditing)
    }
    fn objdelete(&self, _cx: &mut Context<B>, _start: Tag, _end: Tag) -> Result<usize, TagError> {
        Err(TagError::NotEditing)
    }
    fn objreplace(&self, _cx: &mut Context<B>, _tag: Tag) -> Result<usize, TagError> {
        Err(TagError::NotEditing)
    }
}
