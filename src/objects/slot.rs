// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*!
Parameter slots.

A recorded instruction stores its arguments in a fixed number of slots.  Each
slot is a tagged value; array arguments live in an owned [Buffer] that is freed
together with the instruction.
*/

/// An owned copy of an array argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Buffer {
    Floats(Box<[f32]>),
    Doubles(Box<[f64]>),
    Ints(Box<[i32]>),
    /// Strings, NUL-terminated.
    Bytes(Box<[u8]>),
}

impl Buffer {
    /// Heap bytes owned by this buffer.
    pub fn byte_len(&self) -> usize {
        match self {
            Buffer::Floats(b) => std::mem::size_of_val(&**b),
            Buffer::Doubles(b) => std::mem::size_of_val(&**b),
            Buffer::Ints(b) => std::mem::size_of_val(&**b),
            Buffer::Bytes(b) => b.len(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum Slot {
    #[default]
    Empty,
    Int(i32),
    UInt(u32),
    Short(i16),
    Float(f32),
    Char(u8),
    Buffer(Buffer),
}

impl Slot {
    pub fn int(&self) -> Option<i32> {
        match self {
            Slot::Int(v) => Some(*v),
            _ => None,
        }
    }
    pub fn uint(&self) -> Option<u32> {
        match self {
            Slot::UInt(v) => Some(*v),
            _ => None,
        }
    }
    pub fn short(&self) -> Option<i16> {
        match self {
            Slot::Short(v) => Some(*v),
            _ => None,
        }
    }
    pub fn float(&self) -> Option<f32> {
        match self {
            Slot::Float(v) => Some(*v),
            _ => None,
        }
    }
    pub fn char(&self) -> Option<char> {
        match self {
            Slot::Char(v) => Some(*v as char),
            _ => None,
        }
    }
    pub fn floats(&self) -> Option<&[f32]> {
        match self {
            Slot::Buffer(Buffer::Floats(b)) => Some(&**b),
            _ => None,
        }
    }
    pub fn doubles(&self) -> Option<&[f64]> {
        match self {
            Slot::Buffer(Buffer::Doubles(b)) => Some(&**b),
            _ => None,
        }
    }
    pub fn ints(&self) -> Option<&[i32]> {
        match self {
            Slot::Buffer(Buffer::Ints(b)) => Some(&**b),
            _ => None,
        }
    }
    /// A recorded string without its terminator.
    pub fn string(&self) -> Option<&str> {
        match self {
            Slot::Buffer(Buffer::Bytes(b)) => {
                let (terminator, text) = b.split_last()?;
                if *terminator != 0 {
                    return None;
                }
                std::str::from_utf8(text).ok()
            }
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    pub fn heap_bytes(&self) -> usize {
        match self {
            Slot::Buffer(b) => b.byte_len(),
            _ => 0,
        }
    }
}
