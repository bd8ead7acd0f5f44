// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Opcodes of recordable entry points.

/**
Identifies one recordable operation.

The opcode space is closed: every recordable entry point has a variant here
and nothing is registered at runtime.  Entry points that differ only in the
primitive they open (`bgnline`, `bgnpolygon`, ...) share [Opcode::Begin] /
[Opcode::End] and carry the primitive in their first slot.

[Opcode::Nop] marks an inert instruction, one whose arguments could not be
duplicated at record time.  Replay skips it.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum Opcode {
    Nop = 0,

    // state
    Color,
    Cpack,
    RgbColor,
    C3f,
    LineWidth,
    ZBuffer,
    ShadeModel,
    Backface,
    WriteMask,
    ZFunction,
    BlendFunction,
    Font,
    LmBind,

    // clearing
    Clear,
    ZClear,
    CzClear,

    // transforms
    MatrixMode,
    PushMatrix,
    PopMatrix,
    LoadMatrix,
    MultMatrix,
    Translate,
    Rotate,
    Rot,
    Scale,
    Ortho2,
    Ortho,
    Perspective,
    LookAt,
    PolarView,
    Viewport,

    // primitives
    Rect,
    Rectf,
    Recti,
    Rectfi,
    Move,
    Draw,
    Move2,
    Draw2,
    Pnt,
    Pnt2,
    Circ,
    Circf,
    Arc,
    Arcf,
    Poly,
    Polf,
    Poly2,
    Polf2,
    Begin,
    End,
    V2f,
    V3f,
    N3f,

    // text
    Cmov,
    Cmov2,
    Charstr,

    // curves
    CurveBasis,
    CurvePrecision,
    Crv,
    NurbsCurve,

    // objects
    CallObject,
}

impl Opcode {
    /// Whether replay should skip this instruction.
    pub fn is_inert(self) -> bool {
        self == Opcode::Nop
    }

    /// Legacy name of the entry point, for tracing.
    pub fn name(self) -> &'static str {
        match self {
            Opcode::Nop => "nop",
            Opcode::Color => "color",
            Opcode::Cpack => "cpack",
            Opcode::RgbColor => "RGBcolor",
            Opcode::C3f => "c3f",
            Opcode::LineWidth => "linewidth",
            Opcode::ZBuffer => "zbuffer",
            Opcode::ShadeModel => "shademodel",
            Opcode::Backface => "backface",
            Opcode::WriteMask => "writemask",
            Opcode::ZFunction => "zfunction",
            Opcode::BlendFunction => "blendfunction",
            Opcode::Font => "font",
            Opcode::LmBind => "lmbind",
            Opcode::Clear => "clear",
            Opcode::ZClear => "zclear",
            Opcode::CzClear => "czclear",
            Opcode::MatrixMode => "mmode",
            Opcode::PushMatrix => "pushmatrix",
            Opcode::PopMatrix => "popmatrix",
            Opcode::LoadMatrix => "loadmatrix",
            Opcode::MultMatrix => "multmatrix",
            Opcode::Translate => "translate",
            Opcode::Rotate => "rotate",
            Opcode::Rot => "rot",
            Opcode::Scale => "scale",
            Opcode::Ortho2 => "ortho2",
            Opcode::Ortho => "ortho",
            Opcode::Perspective => "perspective",
            Opcode::LookAt => "lookat",
            Opcode::PolarView => "polarview",
            Opcode::Viewport => "viewport",
            Opcode::Rect => "rect",
            Opcode::Rectf => "rectf",
            Opcode::Recti => "recti",
            Opcode::Rectfi => "rectfi",
            Opcode::Move => "move",
            Opcode::Draw => "draw",
            Opcode::Move2 => "move2",
            Opcode::Draw2 => "draw2",
            Opcode::Pnt => "pnt",
            Opcode::Pnt2 => "pnt2",
            Opcode::Circ => "circ",
            Opcode::Circf => "circf",
            Opcode::Arc => "arc",
            Opcode::Arcf => "arcf",
            Opcode::Poly => "poly",
            Opcode::Polf => "polf",
            Opcode::Poly2 => "poly2",
            Opcode::Polf2 => "polf2",
            Opcode::Begin => "bgn",
            Opcode::End => "end",
            Opcode::V2f => "v2f",
            Opcode::V3f => "v3f",
            Opcode::N3f => "n3f",
            Opcode::Cmov => "cmov",
            Opcode::Cmov2 => "cmov2",
            Opcode::Charstr => "charstr",
            Opcode::CurveBasis => "curvebasis",
            Opcode::CurvePrecision => "curveprecision",
            Opcode::Crv => "crv",
            Opcode::NurbsCurve => "nurbscurve",
            Opcode::CallObject => "callobj",
        }
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
