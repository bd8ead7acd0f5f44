// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*!
The two dispatch tables.

Every recordable entry point goes through a [DispatchTable].  [crate::Gl]
holds a `&'static dyn DispatchTable` that points at [ExecuteTable] normally
and at [RecordTable] while an object is open, so the mode switch happens once
at `makeobj`/`editobj`/`closeobj` instead of being tested on every call.

Arguments arrive already validated and typed.  Entry points that never record
(queries, `swapbuffers`, object lifecycle) don't appear here at all.
*/

mod execute;
mod record;

pub use execute::ExecuteTable;
pub use record::RecordTable;

use crate::context::Context;
use crate::imp::Backend;
use crate::objects::TagError;
use crate::replay::ReplayError;
use crate::types::{
    Angle, Axis, BlendFactor, Colorindex, Coord, CurveType, DepthFunction, Icoord, LightTarget,
    Matrix, MatrixMode, Object, Primitive, Screencoord, ShadeModel, Tag,
};

pub trait DispatchTable<B: Backend>: Sync {
    /// Whether calls through this table are recorded.
    fn records(&self) -> bool;

    // state
    fn color(&self, cx: &mut Context<B>, index: Colorindex);
    fn cpack(&self, cx: &mut Context<B>, rgba: u32);
    fn rgbcolor(&self, cx: &mut Context<B>, red: i16, green: i16, blue: i16);
    fn c3f(&self, cx: &mut Context<B>, rgb: &[f32; 3]);
    fn linewidth(&self, cx: &mut Context<B>, width: i16);
    fn zbuffer(&self, cx: &mut Context<B>, enabled: bool);
    fn shademodel(&self, cx: &mut Context<B>, model: ShadeModel);
    fn backface(&self, cx: &mut Context<B>, enabled: bool);
    fn writemask(&self, cx: &mut Context<B>, mask: u32);
    fn zfunction(&self, cx: &mut Context<B>, function: DepthFunction);
    fn blendfunction(&self, cx: &mut Context<B>, source: BlendFactor, destination: BlendFactor);
    fn font(&self, cx: &mut Context<B>, index: i16);
    fn lmbind(&self, cx: &mut Context<B>, target: LightTarget, index: i16);

    // clearing
    fn clear(&self, cx: &mut Context<B>);
    fn zclear(&self, cx: &mut Context<B>);
    fn czclear(&self, cx: &mut Context<B>, color: u32, depth: i32);

    // transforms
    fn mmode(&self, cx: &mut Context<B>, mode: MatrixMode);
    fn pushmatrix(&self, cx: &mut Context<B>);
    fn popmatrix(&self, cx: &mut Context<B>);
    fn loadmatrix(&self, cx: &mut Context<B>, matrix: &Matrix);
    fn multmatrix(&self, cx: &mut Context<B>, matrix: &Matrix);
    fn translate(&self, cx: &mut Context<B>, x: Coord, y: Coord, z: Coord);
    fn rotate(&self, cx: &mut Context<B>, angle: Angle, axis: Axis);
    fn rot(&self, cx: &mut Context<B>, degrees: f32, axis: Axis);
    fn scale(&self, cx: &mut Context<B>, x: f32, y: f32, z: f32);
    fn ortho2(&self, cx: &mut Context<B>, left: Coord, right: Coord, bottom: Coord, top: Coord);
    #[allow(clippy::too_many_arguments)]
    fn ortho(
        &self,
        cx: &mut Context<B>,
        left: Coord,
        right: Coord,
        bottom: Coord,
        top: Coord,
        near: Coord,
        far: Coord,
    );
    fn perspective(&self, cx: &mut Context<B>, fovy: Angle, aspect: f32, near: Coord, far: Coord);
    fn lookat(&self, cx: &mut Context<B>, view: [Coord; 3], point: [Coord; 3], twist: Angle);
    fn polarview(
        &self,
        cx: &mut Context<B>,
        distance: Coord,
        azimuth: Angle,
        incidence: Angle,
        twist: Angle,
    );
    fn viewport(
        &self,
        cx: &mut Context<B>,
        left: Screencoord,
        right: Screencoord,
        bottom: Screencoord,
        top: Screencoord,
    );

    // primitives
    fn rect(&self, cx: &mut Context<B>, x1: Coord, y1: Coord, x2: Coord, y2: Coord);
    fn rectf(&self, cx: &mut Context<B>, x1: Coord, y1: Coord, x2: Coord, y2: Coord);
    fn recti(&self, cx: &mut Context<B>, x1: Icoord, y1: Icoord, x2: Icoord, y2: Icoord);
    fn rectfi(&self, cx: &mut Context<B>, x1: Icoord, y1: Icoord, x2: Icoord, y2: Icoord);
    fn r#move(&self, cx: &mut Context<B>, x: Coord, y: Coord, z: Coord);
    fn draw(&self, cx: &mut Context<B>, x: Coord, y: Coord, z: Coord);
    fn move2(&self, cx: &mut Context<B>, x: Coord, y: Coord);
    fn draw2(&self, cx: &mut Context<B>, x: Coord, y: Coord);
    fn pnt(&self, cx: &mut Context<B>, x: Coord, y: Coord, z: Coord);
    fn pnt2(&self, cx: &mut Context<B>, x: Coord, y: Coord);
    fn circ(&self, cx: &mut Context<B>, x: Coord, y: Coord, radius: Coord);
    fn circf(&self, cx: &mut Context<B>, x: Coord, y: Coord, radius: Coord);
    fn arc(&self, cx: &mut Context<B>, x: Coord, y: Coord, radius: Coord, start: Angle, end: Angle);
    fn arcf(&self, cx: &mut Context<B>, x: Coord, y: Coord, radius: Coord, start: Angle, end: Angle);
    fn poly(&self, cx: &mut Context<B>, points: &[[Coord; 3]]);
    fn polf(&self, cx: &mut Context<B>, points: &[[Coord; 3]]);
    fn poly2(&self, cx: &mut Context<B>, points: &[[Coord; 2]]);
    fn polf2(&self, cx: &mut Context<B>, points: &[[Coord; 2]]);
    fn begin(&self, cx: &mut Context<B>, primitive: Primitive);
    fn end(&self, cx: &mut Context<B>, primitive: Primitive);
    fn v2f(&self, cx: &mut Context<B>, vertex: &[f32; 2]);
    fn v3f(&self, cx: &mut Context<B>, vertex: &[f32; 3]);
    fn n3f(&self, cx: &mut Context<B>, normal: &[f32; 3]);

    // text
    fn cmov(&self, cx: &mut Context<B>, x: Coord, y: Coord, z: Coord);
    fn cmov2(&self, cx: &mut Context<B>, x: Coord, y: Coord);
    fn charstr(&self, cx: &mut Context<B>, text: &str);

    // curves
    fn curvebasis(&self, cx: &mut Context<B>, basis: i16);
    fn curveprecision(&self, cx: &mut Context<B>, segments: i16);
    fn crv(&self, cx: &mut Context<B>, geometry: &[[Coord; 3]; 4]);
    fn nurbscurve(
        &self,
        cx: &mut Context<B>,
        knots: &[f64],
        stride: usize,
        control_points: &[f64],
        order: usize,
        kind: CurveType,
    );

    // objects
    fn callobj(&self, cx: &mut Context<B>, object: Object) -> Result<(), ReplayError>;

    // editing; only meaningful while recording
    fn maketag(&self, cx: &mut Context<B>, tag: Tag) -> Result<(), TagError>;
    fn deltag(&self, cx: &mut Context<B>, tag: Tag) -> Result<(), TagError>;
    fn objinsert(&self, cx: &mut Context<B>, tag: Tag) -> Result<(), TagError>;
    fn objoverwrite(&self, cx: &mut Context<B>, tag: Tag) -> Result<(), TagError>;
    fn objdelete(&self, cx: &mut Context<B>, start: Tag, end: Tag) -> Result<usize, TagError>;
    fn objreplace(&self, cx: &mut Context<B>, tag: Tag) -> Result<usize, TagError>;
}
