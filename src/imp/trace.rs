// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*!
A backend that writes down what it was asked to do.

Every call is appended to [TraceBackend::calls] as an owned [BackendCall], so
two runs can be compared for equality.  Alongside the log it keeps the small
amount of state the query entry points report: current color, matrix mode, a
matrix stack per mode, line width and viewport.
*/

use std::collections::HashMap;

use crate::imp::{Backend, DEFAULT_VIEWPORT};
use crate::types::{
    Angle, Axis, BlendFactor, Colorindex, Coord, CurveType, DepthFunction, IDENTITY, Icoord,
    LightTarget, Matrix, MatrixMode, Primitive, Screencoord, ShadeModel,
};

/// One call received by a [TraceBackend].
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    Color(Colorindex),
    Cpack(u32),
    RgbColor(i16, i16, i16),
    C3f([f32; 3]),
    LineWidth(i16),
    ZBuffer(bool),
    ShadeModel(ShadeModel),
    Backface(bool),
    WriteMask(u32),
    ZFunction(DepthFunction),
    BlendFunction(BlendFactor, BlendFactor),
    Font(i16),
    LmBind(LightTarget, i16),
    Clear,
    ZClear,
    CzClear(u32, i32),
    MatrixMode(MatrixMode),
    PushMatrix,
    PopMatrix,
    LoadMatrix(Matrix),
    MultMatrix(Matrix),
    Translate(Coord, Coord, Coord),
    Rotate(Angle, Axis),
    Rot(f32, Axis),
    Scale(f32, f32, f32),
    Ortho2(Coord, Coord, Coord, Coord),
    Ortho(Coord, Coord, Coord, Coord, Coord, Coord),
    Perspective(Angle, f32, Coord, Coord),
    LookAt([Coord; 3], [Coord; 3], Angle),
    PolarView(Coord, Angle, Angle, Angle),
    Viewport(Screencoord, Screencoord, Screencoord, Screencoord),
    Rect(Coord, Coord, Coord, Coord),
    Rectf(Coord, Coord, Coord, Coord),
    Recti(Icoord, Icoord, Icoord, Icoord),
    Rectfi(Icoord, Icoord, Icoord, Icoord),
    Move(Coord, Coord, Coord),
    Draw(Coord, Coord, Coord),
    Move2(Coord, Coord),
    Draw2(Coord, Coord),
    Pnt(Coord, Coord, Coord),
    Pnt2(Coord, Coord),
    Circ(Coord, Coord, Coord),
    Circf(Coord, Coord, Coord),
    Arc(Coord, Coord, Coord, Angle, Angle),
    Arcf(Coord, Coord, Coord, Angle, Angle),
    Poly(Vec<[Coord; 3]>),
    Polf(Vec<[Coord; 3]>),
    Poly2(Vec<[Coord; 2]>),
    Polf2(Vec<[Coord; 2]>),
    Begin(Primitive),
    End(Primitive),
    V2f([f32; 2]),
    V3f([f32; 3]),
    N3f([f32; 3]),
    Cmov(Coord, Coord, Coord),
    Cmov2(Coord, Coord),
    Charstr(String),
    CurveBasis(i16),
    CurvePrecision(i16),
    Crv([[Coord; 3]; 4]),
    NurbsCurve {
        knots: Vec<f64>,
        stride: usize,
        control_points: Vec<f64>,
        order: usize,
        kind: CurveType,
    },
    SwapBuffers,
    Gflush,
    MapColor(Colorindex, i16, i16, i16),
    DefBasis(i16, Matrix),
}

#[derive(Debug, Clone)]
pub struct TraceBackend {
    calls: Vec<BackendCall>,
    color: Colorindex,
    mode: MatrixMode,
    stacks: HashMap<MatrixMode, Vec<Matrix>>,
    line_width: i16,
    viewport: (Screencoord, Screencoord, Screencoord, Screencoord),
}

impl Default for TraceBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl TraceBackend {
    pub fn new() -> Self {
        TraceBackend {
            calls: Vec::new(),
            color: 0,
            mode: MatrixMode::Single,
            stacks: HashMap::new(),
            line_width: 1,
            viewport: DEFAULT_VIEWPORT,
        }
    }

    pub fn calls(&self) -> &[BackendCall] {
        &self.calls
    }

    /// Takes the log, leaving it empty.  Bookkeeping state is kept.
    pub fn take_calls(&mut self) -> Vec<BackendCall> {
        std::mem::take(&mut self.calls)
    }

    fn log(&mut self, call: BackendCall) {
        logwise::trace_sync!("backend {call}", call = logwise::privacy::LogIt(&call));
        self.calls.push(call);
    }

    fn stack(&mut self) -> &mut Vec<Matrix> {
        self.stacks.entry(self.mode).or_insert_with(|| vec![IDENTITY])
    }

    fn top(&mut self) -> &mut Matrix {
        let stack = self.stack();
        if stack.is_empty() {
            stack.push(IDENTITY);
        }
        let last = stack.len() - 1;
        &mut stack[last]
    }

    /// Premultiplies the current matrix, as the legacy transforms do.
    fn premultiply(&mut self, m: &Matrix) {
        let top = self.top();
        *top = multiply(m, top);
    }
}

fn multiply(a: &Matrix, b: &Matrix) -> Matrix {
    let mut out = [[0.0; 4]; 4];
    for (r, row) in out.iter_mut().enumerate() {
        for (c, cell) in row.iter_mut().enumerate() {
            *cell = (0..4).map(|k| a[r][k] * b[k][c]).sum();
        }
    }
    out
}

fn rotation(degrees: f32, axis: Axis) -> Matrix {
    let (s, c) = degrees.to_radians().sin_cos();
    let mut m = IDENTITY;
    let (i, j) = match axis {
        Axis::X => (1, 2),
        Axis::Y => (2, 0),
        Axis::Z => (0, 1),
    };
    m[i][i] = c;
    m[i][j] = s;
    m[j][i] = -s;
    m[j][j] = c;
    m
}

fn orthographic(left: Coord, right: Coord, bottom: Coord, top: Coord, near: Coord, far: Coord) -> Matrix {
    let mut m = IDENTITY;
    m[0][0] = 2.0 / (right - left);
    m[1][1] = 2.0 / (top - bottom);
    m[2][2] = -2.0 / (far - near);
    m[3][0] = -(right + left) / (right - left);
    m[3][1] = -(top + bottom) / (top - bottom);
    m[3][2] = -(far + near) / (far - near);
    m
}

impl Backend for TraceBackend {
    fn color(&mut self, index: Colorindex) {
        self.color = index;
        self.log(BackendCall::Color(index));
    }
    fn cpack(&mut self, rgba: u32) {
        self.log(BackendCall::Cpack(rgba));
    }
    fn rgbcolor(&mut self, red: i16, green: i16, blue: i16) {
        self.log(BackendCall::RgbColor(red, green, blue));
    }
    fn c3f(&mut self, rgb: &[f32; 3]) {
        self.log(BackendCall::C3f(*rgb));
    }
    fn linewidth(&mut self, width: i16) {
        self.line_width = width;
        self.log(BackendCall::LineWidth(width));
    }
    fn zbuffer(&mut self, enabled: bool) {
        self.log(BackendCall::ZBuffer(enabled));
    }
    fn shademodel(&mut self, model: ShadeModel) {
        self.log(BackendCall::ShadeModel(model));
    }
    fn backface(&mut self, enabled: bool) {
        self.log(BackendCall::Backface(enabled));
    }
    fn writemask(&mut self, mask: u32) {
        self.log(BackendCall::WriteMask(mask));
    }
    fn zfunction(&mut self, function: DepthFunction) {
        self.log(BackendCall::ZFunction(function));
    }
    fn blendfunction(&mut self, source: BlendFactor, destination: BlendFactor) {
        self.log(BackendCall::BlendFunction(source, destination));
    }
    fn font(&mut self, index: i16) {
        self.log(BackendCall::Font(index));
    }
    fn lmbind(&mut self, target: LightTarget, index: i16) {
        self.log(BackendCall::LmBind(target, index));
    }

    fn clear(&mut self) {
        self.log(BackendCall::Clear);
    }
    fn zclear(&mut self) {
        self.log(BackendCall::ZClear);
    }
    fn czclear(&mut self, color: u32, depth: i32) {
        self.log(BackendCall::CzClear(color, depth));
    }

    fn mmode(&mut self, mode: MatrixMode) {
        self.mode = mode;
        self.log(BackendCall::MatrixMode(mode));
    }
    fn pushmatrix(&mut self) {
        let top = *self.top();
        self.stack().push(top);
        self.log(BackendCall::PushMatrix);
    }
    fn popmatrix(&mut self) {
        //the bottom matrix is never popped
        let stack = self.stack();
        if stack.len() > 1 {
            stack.pop();
        }
        self.log(BackendCall::PopMatrix);
    }
    fn loadmatrix(&mut self, matrix: &Matrix) {
        *self.top() = *matrix;
        self.log(BackendCall::LoadMatrix(*matrix));
    }
    fn multmatrix(&mut self, matrix: &Matrix) {
        self.premultiply(matrix);
        self.log(BackendCall::MultMatrix(*matrix));
    }
    fn translate(&mut self, x: Coord, y: Coord, z: Coord) {
        let mut m = IDENTITY;
        m[3] = [x, y, z, 1.0];
        self.premultiply(&m);
        self.log(BackendCall::Translate(x, y, z));
    }
    fn rotate(&mut self, angle: Angle, axis: Axis) {
        self.premultiply(&rotation(f32::from(angle) / 10.0, axis));
        self.log(BackendCall::Rotate(angle, axis));
    }
    fn rot(&mut self, degrees: f32, axis: Axis) {
        self.premultiply(&rotation(degrees, axis));
        self.log(BackendCall::Rot(degrees, axis));
    }
    fn scale(&mut self, x: f32, y: f32, z: f32) {
        let mut m = IDENTITY;
        m[0][0] = x;
        m[1][1] = y;
        m[2][2] = z;
        self.premultiply(&m);
        self.log(BackendCall::Scale(x, y, z));
    }
    fn ortho2(&mut self, left: Coord, right: Coord, bottom: Coord, top: Coord) {
        *self.top() = orthographic(left, right, bottom, top, -1.0, 1.0);
        self.log(BackendCall::Ortho2(left, right, bottom, top));
    }
    fn ortho(
        &mut self,
        left: Coord,
        right: Coord,
        bottom: Coord,
        top: Coord,
        near: Coord,
        far: Coord,
    ) {
        *self.top() = orthographic(left, right, bottom, top, near, far);
        self.log(BackendCall::Ortho(left, right, bottom, top, near, far));
    }
    fn perspective(&mut self, fovy: Angle, aspect: f32, near: Coord, far: Coord) {
        let f = 1.0 / (f32::from(fovy) / 20.0).to_radians().tan();
        let mut m = [[0.0; 4]; 4];
        m[0][0] = f / aspect;
        m[1][1] = f;
        m[2][2] = -(far + near) / (far - near);
        m[2][3] = -1.0;
        m[3][2] = -2.0 * far * near / (far - near);
        *self.top() = m;
        self.log(BackendCall::Perspective(fovy, aspect, near, far));
    }
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
        self.log(BackendCall::LookAt(
            [view_x, view_y, view_z],
            [point_x, point_y, point_z],
            twist,
        ));
    }
    fn polarview(&mut self, distance: Coord, azimuth: Angle, incidence: Angle, twist: Angle) {
        self.log(BackendCall::PolarView(distance, azimuth, incidence, twist));
    }
    fn viewport(
        &mut self,
        left: Screencoord,
        right: Screencoord,
        bottom: Screencoord,
        top: Screencoord,
    ) {
        self.viewport = (left, right, bottom, top);
        self.log(BackendCall::Viewport(left, right, bottom, top));
    }

    fn rect(&mut self, x1: Coord, y1: Coord, x2: Coord, y2: Coord) {
        self.log(BackendCall::Rect(x1, y1, x2, y2));
    }
    fn rectf(&mut self, x1: Coord, y1: Coord, x2: Coord, y2: Coord) {
        self.log(BackendCall::Rectf(x1, y1, x2, y2));
    }
    fn recti(&mut self, x1: Icoord, y1: Icoord, x2: Icoord, y2: Icoord) {
        self.log(BackendCall::Recti(x1, y1, x2, y2));
    }
    fn rectfi(&mut self, x1: Icoord, y1: Icoord, x2: Icoord, y2: Icoord) {
        self.log(BackendCall::Rectfi(x1, y1, x2, y2));
    }
    fn r#move(&mut self, x: Coord, y: Coord, z: Coord) {
        self.log(BackendCall::Move(x, y, z));
    }
    fn draw(&mut self, x: Coord, y: Coord, z: Coord) {
        self.log(BackendCall::Draw(x, y, z));
    }
    fn move2(&mut self, x: Coord, y: Coord) {
        self.log(BackendCall::Move2(x, y));
    }
    fn draw2(&mut self, x: Coord, y: Coord) {
        self.log(BackendCall::Draw2(x, y));
    }
    fn pnt(&mut self, x: Coord, y: Coord, z: Coord) {
        self.log(BackendCall::Pnt(x, y, z));
    }
    fn pnt2(&mut self, x: Coord, y: Coord) {
        self.log(BackendCall::Pnt2(x, y));
    }
    fn circ(&mut self, x: Coord, y: Coord, radius: Coord) {
        self.log(BackendCall::Circ(x, y, radius));
    }
    fn circf(&mut self, x: Coord, y: Coord, radius: Coord) {
        self.log(BackendCall::Circf(x, y, radius));
    }
    fn arc(&mut self, x: Coord, y: Coord, radius: Coord, start: Angle, end: Angle) {
        self.log(BackendCall::Arc(x, y, radius, start, end));
    }
    fn arcf(&mut self, x: Coord, y: Coord, radius: Coord, start: Angle, end: Angle) {
        self.log(BackendCall::Arcf(x, y, radius, start, end));
    }
    fn poly(&mut self, points: &[[Coord; 3]]) {
        self.log(BackendCall::Poly(points.to_vec()));
    }
    fn polf(&mut self, points: &[[Coord; 3]]) {
        self.log(BackendCall::Polf(points.to_vec()));
    }
    fn poly2(&mut self, points: &[[Coord; 2]]) {
        self.log(BackendCall::Poly2(points.to_vec()));
    }
    fn polf2(&mut self, points: &[[Coord; 2]]) {
        self.log(BackendCall::Polf2(points.to_vec()));
    }
    fn begin(&mut self, primitive: Primitive) {
        self.log(BackendCall::Begin(primitive));
    }
    fn end(&mut self, primitive: Primitive) {
        self.log(BackendCall::End(primitive));
    }
    fn v2f(&mut self, vertex: &[f32; 2]) {
        self.log(BackendCall::V2f(*vertex));
    }
    fn v3f(&mut self, vertex: &[f32; 3]) {
        self.log(BackendCall::V3f(*vertex));
    }
    fn n3f(&mut self, normal: &[f32; 3]) {
        self.log(BackendCall::N3f(*normal));
    }

    fn cmov(&mut self, x: Coord, y: Coord, z: Coord) {
        self.log(BackendCall::Cmov(x, y, z));
    }
    fn cmov2(&mut self, x: Coord, y: Coord) {
        self.log(BackendCall::Cmov2(x, y));
    }
    fn charstr(&mut self, text: &str) {
        self.log(BackendCall::Charstr(text.to_owned()));
    }

    fn curvebasis(&mut self, basis: i16) {
        self.log(BackendCall::CurveBasis(basis));
    }
    fn curveprecision(&mut self, segments: i16) {
        self.log(BackendCall::CurvePrecision(segments));
    }
    fn crv(&mut self, geometry: &[[Coord; 3]; 4]) {
        self.log(BackendCall::Crv(*geometry));
    }
    fn nurbscurve(
        &mut self,
        knots: &[f64],
        stride: usize,
        control_points: &[f64],
        order: usize,
        kind: CurveType,
    ) {
        self.log(BackendCall::NurbsCurve {
            knots: knots.to_vec(),
            stride,
            control_points: control_points.to_vec(),
            order,
            kind,
        });
    }

    fn swapbuffers(&mut self) {
        self.log(BackendCall::SwapBuffers);
    }
    fn gflush(&mut self) {
        self.log(BackendCall::Gflush);
    }
    fn mapcolor(&mut self, index: Colorindex, red: i16, green: i16, blue: i16) {
        self.log(BackendCall::MapColor(index, red, green, blue));
    }
    fn defbasis(&mut self, id: i16, basis: &Matrix) {
        self.log(BackendCall::DefBasis(id, *basis));
    }

    fn getcolor(&self) -> Colorindex {
        self.color
    }
    fn getmmode(&self) -> MatrixMode {
        self.mode
    }
    fn getmatrix(&self) -> Matrix {
        self.stacks
            .get(&self.mode)
            .and_then(|stack| stack.last())
            .copied()
            .unwrap_or(IDENTITY)
    }
    fn getlwidth(&self) -> i16 {
        self.line_width
    }
    fn getviewport(&self) -> (Screencoord, Screencoord, Screencoord, Screencoord) {
        self.viewport
    }
}
