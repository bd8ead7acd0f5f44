// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*!
The rendering backend seam.

[Backend] is what immediate mode (and replay) ultimately calls.  Its methods
take the legacy arguments already validated and converted to their typed form.
A backend must never try to record: it only ever sees calls that are meant to
take effect now.

Every method has a do-nothing default so a backend implements only what it
renders.  Two backends ship with the crate:

* [NopBackend] discards everything.
* [TraceBackend] keeps an ordered log of [BackendCall]s and enough state to
  answer queries.  It is the diagnostic trace facility and the test double.
*/

mod nop;
mod trace;

pub use nop::NopBackend;
pub use trace::{BackendCall, TraceBackend};

use crate::types::{
    Angle, Axis, BlendFactor, Colorindex, Coord, CurveType, DepthFunction, IDENTITY, Icoord,
    LightTarget, Matrix, MatrixMode, Primitive, Screencoord, ShadeModel,
};

/// Default screen extent reported before any `viewport` call.
pub const DEFAULT_VIEWPORT: (Screencoord, Screencoord, Screencoord, Screencoord) =
    (0, 1279, 0, 1023);

#[allow(unused_variables)]
pub trait Backend: 'static {
    // state
    fn color(&mut self, index: Colorindex) {}
    fn cpack(&mut self, rgba: u32) {}
    fn rgbcolor(&mut self, red: i16, green: i16, blue: i16) {}
    fn c3f(&mut self, rgb: &[f32; 3]) {}
    fn linewidth(&mut self, width: i16) {}
    fn zbuffer(&mut self, enabled: bool) {}
    fn shademodel(&mut self, model: ShadeModel) {}
    fn backface(&mut self, enabled: bool) {}
    fn writemask(&mut self, mask: u32) {}
    fn zfunction(&mut self, function: DepthFunction) {}
    fn blendfunction(&mut self, source: BlendFactor, destination: BlendFactor) {}
    fn font(&mut self, index: i16) {}
    fn lmbind(&mut self, target: LightTarget, index: i16) {}

    // clearing
    fn clear(&mut self) {}
    fn zclear(&mut self) {}
    fn czclear(&mut self, color: u32, depth: i32) {}

    // transforms
    fn mmode(&mut self, mode: MatrixMode) {}
    fn pushmatrix(&mut self) {}
    fn popmatrix(&mut self) {}
    fn loadmatrix(&mut self, matrix: &Matrix) {}
    fn multmatrix(&mut self, matrix: &Matrix) {}
    fn translate(&mut self, x: Coord, y: Coord, z: Coord) {}
    fn rotate(&mut self, angle: Angle, axis: Axis) {}
    fn rot(&mut self, degrees: f32, axis: Axis) {}
    fn scale(&mut self, x: f32, y: f32, z: f32) {}
    fn ortho2(&mut self, left: Coord, right: Coord, bottom: Coord, top: Coord) {}
    fn ortho(
        &mut self,
        left: Coord,
        right: Coord,
        bottom: Coord,
        top: Coord,
        near: Coord,
        far: Coord,
    ) {
    }
    fn perspective(&mut self, fovy: Angle, aspect: f32, near: Coord, far: Coord) {}
    #[allow(clippy::too_many_arguments)]
    fn lookat(
        &mut self,
        view_x: Coord,
        view_y: Coord,
        view_z: Coord,
        point_x: Coord,
        point_y: Coord,
        point_z: Coord,
        twist: Angle,
    ) {
    }
    fn polarview(&mut self, distance: Coord, azimuth: Angle, incidence: Angle, twist: Angle) {}
    fn viewport(
        &mut self,
        left: Screencoord,
        right: Screencoord,
        bottom: Screencoord,
        top: Screencoord,
    ) {
    }

    // primitives
    fn rect(&mut self, x1: Coord, y1: Coord, x2: Coord, y2: Coord) {}
    fn rectf(&mut self, x1: Coord, y1: Coord, x2: Coord, y2: Coord) {}
    fn recti(&mut self, x1: Icoord, y1: Icoord, x2: Icoord, y2: Icoord) {}
    fn rectfi(&mut self, x1: Icoord, y1: Icoord, x2: Icoord, y2: Icoord) {}
    fn r#move(&mut self, x: Coord, y: Coord, z: Coord) {}
    fn draw(&mut self, x: Coord, y: Coord, z: Coord) {}
    fn move2(&mut self, x: Coord, y: Coord) {}
    fn draw2(&mut self, x: Coord, y: Coord) {}
    fn pnt(&mut self, x: Coord, y: Coord, z: Coord) {}
    fn pnt2(&mut self, x: Coord, y: Coord) {}
    fn circ(&mut self, x: Coord, y: Coord, radius: Coord) {}
    fn circf(&mut self, x: Coord, y: Coord, radius: Coord) {}
    fn arc(&mut self, x: Coord, y: Coord, radius: Coord, start: Angle, end: Angle) {}
    fn arcf(&mut self, x: Coord, y: Coord, radius: Coord, start: Angle, end: Angle) {}
    fn poly(&mut self, points: &[[Coord; 3]]) {}
    fn polf(&mut self, points: &[[Coord; 3]]) {}
    fn poly2(&mut self, points: &[[Coord; 2]]) {}
    fn polf2(&mut self, points: &[[Coord; 2]]) {}
    fn begin(&mut self, primitive: Primitive) {}
    fn end(&mut self, primitive: Primitive) {}
    fn v2f(&mut self, vertex: &[f32; 2]) {}
    fn v3f(&mut self, vertex: &[f32; 3]) {}
    fn n3f(&mut self, normal: &[f32; 3]) {}

    // text
    fn cmov(&mut self, x: Coord, y: Coord, z: Coord) {}
    fn cmov2(&mut self, x: Coord, y: Coord) {}
    fn charstr(&mut self, text: &str) {}

    // curves
    fn curvebasis(&mut self, basis: i16) {}
    fn curveprecision(&mut self, segments: i16) {}
    fn crv(&mut self, geometry: &[[Coord; 3]; 4]) {}
    fn nurbscurve(
        &mut self,
        knots: &[f64],
        stride: usize,
        control_points: &[f64],
        order: usize,
        kind: CurveType,
    ) {
    }

    // never recorded
    fn swapbuffers(&mut self) {}
    fn gflush(&mut self) {}
    fn mapcolor(&mut self, index: Colorindex, red: i16, green: i16, blue: i16) {}
    fn defbasis(&mut self, id: i16, basis: &Matrix) {}

    // queries
    fn getcolor(&self) -> Colorindex {
        0
    }
    fn getmmode(&self) -> MatrixMode {
        MatrixMode::Single
    }
    fn getmatrix(&self) -> Matrix {
        IDENTITY
    }
    fn getlwidth(&self) -> i16 {
        1
    }
    fn getviewport(&self) -> (Screencoord, Screencoord, Screencoord, Screencoord) {
        DEFAULT_VIEWPORT
    }
}
