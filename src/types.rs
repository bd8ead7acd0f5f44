// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*!
Scalar types and enumerants of the legacy API.

The legacy API passes most modes as plain integers.  The public surface keeps
accepting integers so that ported code compiles unchanged, and converts them
into the enums here with `TryFrom<i32>`.  A value that does not convert is a
precondition violation and the call is dropped.
*/

use std::fmt::{Display, Formatter};

/// Identifier of a recorded object (display list).
pub type Object = i32;
/// A named position inside an object's tape.
pub type Tag = i32;
/// Index into the color map.
pub type Colorindex = u16;
/// Angle in tenths of a degree.
pub type Angle = i16;
pub type Coord = f32;
pub type Icoord = i32;
pub type Screencoord = i16;
/// Row-major 4x4 matrix, as the legacy API lays it out.
pub type Matrix = [[f32; 4]; 4];

/// Tag naming the position before the first instruction.
pub const STARTTAG: Tag = -2;
/// Tag naming the position after the last instruction.
pub const ENDTAG: Tag = -3;

pub const IDENTITY: Matrix = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// Returned when an integer does not name a known enumerant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{value} is not a valid {kind}")]
pub struct InvalidEnumerant {
    pub kind: &'static str,
    pub value: i32,
}

macro_rules! enumerant {
    (
        $(#[$meta:meta])*
        pub enum $name:ident { $($variant:ident = $value:expr),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(i32)]
        pub enum $name {
            $($variant = $value),+
        }

        impl TryFrom<i32> for $name {
            type Error = InvalidEnumerant;
            fn try_from(value: i32) -> Result<Self, Self::Error> {
                match value {
                    $(v if v == $value => Ok($name::$variant),)+
                    _ => Err(InvalidEnumerant {
                        kind: stringify!($name),
                        value,
                    }),
                }
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> i32 {
                value as i32
            }
        }
    };
}

enumerant! {
    /// Which matrix stack subsequent transforms apply to.
    pub enum MatrixMode {
        Single = 0,
        Projection = 1,
        Viewing = 2,
        Texture = 3,
    }
}

enumerant! {
    pub enum ShadeModel {
        Flat = 0,
        Gouraud = 1,
    }
}

enumerant! {
    pub enum DepthFunction {
        Never = 0,
        Less = 1,
        Equal = 2,
        LessEqual = 3,
        Greater = 4,
        NotEqual = 5,
        GreaterEqual = 6,
        Always = 7,
    }
}

enumerant! {
    pub enum BlendFactor {
        Zero = 0,
        One = 1,
        DestinationColor = 2,
        MinusDestinationColor = 3,
        SourceAlpha = 4,
        MinusSourceAlpha = 5,
        DestinationAlpha = 6,
        MinusDestinationAlpha = 7,
        SourceColor = 8,
        MinusSourceColor = 9,
    }
}

enumerant! {
    /// Target of `lmbind`.
    pub enum LightTarget {
        Material = 1000,
        BackMaterial = 1001,
        Light0 = 1100,
        Light1 = 1101,
        Light2 = 1102,
        Light3 = 1103,
        Light4 = 1104,
        Light5 = 1105,
        Light6 = 1106,
        Light7 = 1107,
        LightModel = 1200,
    }
}

enumerant! {
    /// Control point layout passed to `nurbscurve`.
    pub enum CurveType {
        V3d = 0x4c,
        V3dr = 0x51,
    }
}

enumerant! {
    /// The primitive opened by one of the `bgn*` calls.
    pub enum Primitive {
        Point = 0,
        Line = 1,
        ClosedLine = 2,
        Polygon = 3,
        TriangleMesh = 4,
        Curve = 5,
    }
}

impl CurveType {
    /// Doubles per control point.
    pub fn coordinates(self) -> usize {
        match self {
            CurveType::V3d => 3,
            CurveType::V3dr => 4,
        }
    }
}

/// Rotation axis, given as a character in the legacy API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn as_char(self) -> char {
        match self {
            Axis::X => 'x',
            Axis::Y => 'y',
            Axis::Z => 'z',
        }
    }
}

impl TryFrom<char> for Axis {
    type Error = InvalidEnumerant;
    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            'x' | 'X' => Ok(Axis::X),
            'y' | 'Y' => Ok(Axis::Y),
            'z' | 'Z' => Ok(Axis::Z),
            other => Err(InvalidEnumerant {
                kind: "Axis",
                value: other as i32,
            }),
        }
    }
}

impl Display for Axis {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}
