// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
use crate::gl::{Gl, rejected};
use crate::imp::Backend;
use crate::types::{Angle, Coord, CurveType, Icoord, Primitive};

/// Bytes per control point coordinate in `nurbscurve` arrays.
const DOUBLE: usize = std::mem::size_of::<f64>();

impl<B: Backend> Gl<B> {
    pub fn rect(&mut self, x1: Coord, y1: Coord, x2: Coord, y2: Coord) {
        self.active.rect(&mut self.context, x1, y1, x2, y2);
    }

    pub fn rectf(&mut self, x1: Coord, y1: Coord, x2: Coord, y2: Coord) {
        self.active.rectf(&mut self.context, x1, y1, x2, y2);
    }

    pub fn recti(&mut self, x1: Icoord, y1: Icoord, x2: Icoord, y2: Icoord) {
        self.active.recti(&mut self.context, x1, y1, x2, y2);
    }

    pub fn rectfi(&mut self, x1: Icoord, y1: Icoord, x2: Icoord, y2: Icoord) {
        self.active.rectfi(&mut self.context, x1, y1, x2, y2);
    }

    pub fn r#move(&mut self, x: Coord, y: Coord, z: Coord) {
        self.active.r#move(&mut self.context, x, y, z);
    }

    pub fn draw(&mut self, x: Coord, y: Coord, z: Coord) {
        self.active.draw(&mut self.context, x, y, z);
    }

    pub fn move2(&mut self, x: Coord, y: Coord) {
        self.active.move2(&mut self.context, x, y);
    }

    pub fn draw2(&mut self, x: Coord, y: Coord) {
        self.active.draw2(&mut self.context, x, y);
    }

    pub fn pnt(&mut self, x: Coord, y: Coord, z: Coord) {
        self.active.pnt(&mut self.context, x, y, z);
    }

    pub fn pnt2(&mut self, x: Coord, y: Coord) {
        self.active.pnt2(&mut self.context, x, y);
    }

    pub fn circ(&mut self, x: Coord, y: Coord, radius: Coord) {
        if radius < 0.0 {
            return rejected("circ", "negative radius");
        }
        self.active.circ(&mut self.context, x, y, radius);
    }

    pub fn circf(&mut self, x: Coord, y: Coord, radius: Coord) {
        if radius < 0.0 {
            return rejected("circf", "negative radius");
        }
        self.active.circf(&mut self.context, x, y, radius);
    }

    /// Angles are in tenths of a degree, counterclockwise from the positive x axis.
    pub fn arc(&mut self, x: Coord, y: Coord, radius: Coord, start: Angle, end: Angle) {
        if radius < 0.0 {
            return rejected("arc", "negative radius");
        }
        self.active.arc(&mut self.context, x, y, radius, start, end);
    }

    pub fn arcf(&mut self, x: Coord, y: Coord, radius: Coord, start: Angle, end: Angle) {
        if radius < 0.0 {
            return rejected("arcf", "negative radius");
        }
        self.active.arcf(&mut self.context, x, y, radius, start, end);
    }

    pub fn poly(&mut self, points: &[[Coord; 3]]) {
        if points.is_empty() {
            return rejected("poly", "no vertices");
        }
        self.active.poly(&mut self.context, points);
    }

    pub fn polf(&mut self, points: &[[Coord; 3]]) {
        if points.is_empty() {
            return rejected("polf", "no vertices");
        }
        self.active.polf(&mut self.context, points);
    }

    pub fn poly2(&mut self, points: &[[Coord; 2]]) {
        if points.is_empty() {
            return rejected("poly2", "no vertices");
        }
        self.active.poly2(&mut self.context, points);
    }

    pub fn polf2(&mut self, points: &[[Coord; 2]]) {
        if points.is_empty() {
            return rejected("polf2", "no vertices");
        }
        self.active.polf2(&mut self.context, points);
    }

    pub fn bgnpoint(&mut self) {
        self.active.begin(&mut self.context, Primitive::Point);
    }
    pub fn endpoint(&mut self) {
        self.active.end(&mut self.context, Primitive::Point);
    }
    pub fn bgnline(&mut self) {
        self.active.begin(&mut self.context, Primitive::Line);
    }
    pub fn endline(&mut self) {
        self.active.end(&mut self.context, Primitive::Line);
    }
    pub fn bgnclosedline(&mut self) {
        self.active.begin(&mut self.context, Primitive::ClosedLine);
    }
    pub fn endclosedline(&mut self) {
        self.active.end(&mut self.context, Primitive::ClosedLine);
    }
    pub fn bgnpolygon(&mut self) {
        self.active.begin(&mut self.context, Primitive::Polygon);
    }
    pub fn endpolygon(&mut self) {
        self.active.end(&mut self.context, Primitive::Polygon);
    }
    pub fn bgntmesh(&mut self) {
        self.active.begin(&mut self.context, Primitive::TriangleMesh);
    }
    pub fn endtmesh(&mut self) {
        self.active.end(&mut self.context, Primitive::TriangleMesh);
    }
    pub fn bgncurve(&mut self) {
        self.active.begin(&mut self.context, Primitive::Curve);
    }
    pub fn endcurve(&mut self) {
        self.active.end(&mut self.context, Primitive::Curve);
    }

    pub fn v2f(&mut self, vertex: &[f32; 2]) {
        self.active.v2f(&mut self.context, vertex);
    }

    pub fn v3f(&mut self, vertex: &[f32; 3]) {
        self.active.v3f(&mut self.context, vertex);
    }

    pub fn n3f(&mut self, normal: &[f32; 3]) {
        self.active.n3f(&mut self.context, normal);
    }

    pub fn cmov(&mut self, x: Coord, y: Coord, z: Coord) {
        self.active.cmov(&mut self.context, x, y, z);
    }

    pub fn cmov2(&mut self, x: Coord, y: Coord) {
        self.active.cmov2(&mut self.context, x, y);
    }

    /**
    Draws `text` at the character position.

    Text after an embedded NUL is ignored, the way a C string would end there.
    */
    pub fn charstr(&mut self, text: &str) {
        let text = text.split('\0').next().unwrap_or_default();
        self.active.charstr(&mut self.context, text);
    }

    pub fn curvebasis(&mut self, basis: i16) {
        self.active.curvebasis(&mut self.context, basis);
    }

    pub fn curveprecision(&mut self, segments: i16) {
        if segments < 1 {
            return rejected("curveprecision", "need at least one segment");
        }
        self.active.curveprecision(&mut self.context, segments);
    }

    /// One cubic segment from four control points, in the current basis.
    pub fn crv(&mut self, geometry: &[[Coord; 3]; 4]) {
        self.active.crv(&mut self.context, geometry);
    }

    /**
    A NURBS curve.  Call between `bgncurve` and `endcurve`.

    `stride` is the byte distance between consecutive control points in
    `control_points`; `kind` is the control point layout (3 or 4 doubles per
    point).  The curve has `knots.len() - order` control points, which must all
    lie within `control_points`.
    */
    pub fn nurbscurve(
        &mut self,
        knots: &[f64],
        stride: i32,
        control_points: &[f64],
        order: i32,
        kind: i32,
    ) {
        let Ok(kind) = CurveType::try_from(kind) else {
            return rejected("nurbscurve", "unknown control point type");
        };
        let (Ok(stride), Ok(order)) = (usize::try_from(stride), usize::try_from(order)) else {
            return rejected("nurbscurve", "negative stride or order");
        };
        if order < 2 || knots.len() <= order {
            return rejected("nurbscurve", "need more knots than the order");
        }
        let coordinates = kind.coordinates();
        if stride % DOUBLE != 0 || stride / DOUBLE < coordinates {
            return rejected("nurbscurve", "stride shorter than a control point");
        }
        let points = knots.len() - order;
        let Some(needed) = (points - 1)
            .checked_mul(stride / DOUBLE)
            .and_then(|n| n.checked_add(coordinates))
        else {
            return rejected("nurbscurve", "control point array too large");
        };
        if control_points.len() < needed {
            return rejected("nurbscurve", "too few control points");
        }
        self.active
            .nurbscurve(&mut self.context, knots, stride, control_points, order, kind);
    }
}

#[cfg(test)]
mod tests {
    use crate::Gl;
    use crate::imp::{BackendCall, TraceBackend};
    use crate::types::Primitive;

    #[test]
    fn empty_polygons_are_dropped() {
        let mut gl = Gl::new(TraceBackend::new());
        gl.polf(&[]);
        gl.poly2(&[]);
        gl.circf(0.0, 0.0, -1.0);
        assert!(gl.backend().calls().is_empty());
    }

    #[test]
    fn charstr_stops_at_nul() {
        let mut gl = Gl::new(TraceBackend::new());
        gl.charstr("abc\0def");
        assert_eq!(gl.backend().calls(), &[BackendCall::Charstr("abc".to_owned())]);
    }

    #[test]
    fn begin_and_end_carry_the_primitive() {
        let mut gl = Gl::new(TraceBackend::new());
        gl.bgntmesh();
        gl.v3f(&[0.0, 1.0, 2.0]);
        gl.endtmesh();
        assert_eq!(
            gl.backend().calls(),
            &[
                BackendCall::Begin(Primitive::TriangleMesh),
                BackendCall::V3f([0.0, 1.0, 2.0]),
                BackendCall::End(Primitive::TriangleMesh),
            ]
        );
    }

    #[test]
    fn nurbs_shape_is_checked() {
        let knots = [0.0, 0.0, 0.0, 1.0, 2.0, 3.0, 3.0, 3.0];
        //order 3 leaves 5 control points of 3 doubles each
        let control_points = [0.5; 15];
        let mut gl = Gl::new(TraceBackend::new());
        gl.nurbscurve(&knots, 24, &control_points[..14], 3, 0x4c);
        gl.nurbscurve(&knots, 16, &control_points, 3, 0x4c);
        gl.nurbscurve(&knots, 24, &control_points, 3, 0x99);
        gl.nurbscurve(&knots[..3], 24, &control_points, 3, 0x4c);
        assert!(gl.backend().calls().is_empty());
        gl.nurbscurve(&knots, 24, &control_points, 3, 0x4c);
        assert_eq!(gl.backend().calls().len(), 1);
    }

    #[test]
    fn huge_strides_are_rejected() {
        let knots = [0.0; 20];
        let control_points = [0.5; 3];
        let stride = i32::MAX - i32::MAX % 8;
        let mut gl = Gl::new(TraceBackend::new());
        gl.nurbscurve(&knots, stride, &control_points, 2, 0x4c);
        assert!(gl.backend().calls().is_empty());
        gl.makeobj(1);
        gl.nurbscurve(&knots, stride, &control_points, 2, 0x4c);
        gl.closeobj();
        assert_eq!(gl.instructions(1).map(<[_]>::len), Some(0));
    }
}
