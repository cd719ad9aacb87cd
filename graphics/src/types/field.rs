//! Field types for structured buffer data.
//!
//! A [`FieldType`] identifies one scalar, vector, or matrix element inside
//! a buffer record. The set is closed: downstream consumers (vertex
//! fetch, uniform block packing, buffer upload) index the metadata table
//! directly and must agree with it byte for byte.
//!
//! Tags parse with a small alias grammar: a trailing `s` is ignored
//! (`"floats"`), `vec2`/`vec3`/`vec4` name the float vectors, and
//! `byte`/`int`/`float`/`color` name the common scalar and color cases.
//! Matching is case-sensitive.

use std::fmt;
use std::str::FromStr;

use crate::error::GraphicsError;

/// Data type of a single field in a buffer record.
///
/// Vector types are suffixed with their component count (`I8x2`); the
/// `N` infix marks normalized types whose integer payload maps to
/// [0, 1] or [-1, 1] when fetched (`U8Nx4`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    // Scalars
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    F32,
    F64,

    // Two-component vectors
    I8x2,
    U8x2,
    I8Nx2,
    U8Nx2,
    I16x2,
    U16x2,
    I16Nx2,
    U16Nx2,
    I32x2,
    U32x2,
    F32x2,

    // Three-component vectors (32-bit only)
    I32x3,
    U32x3,
    F32x3,

    // Four-component vectors
    I8x4,
    U8x4,
    I8Nx4,
    U8Nx4,
    I16x4,
    U16x4,
    I16Nx4,
    U16Nx4,
    I32x4,
    U32x4,
    F32x4,

    // Matrices
    Mat2,
    Mat3,
    Mat4,
}

/// Size and alignment metadata for a [`FieldType`].
///
/// `scalar_align` is the natural component alignment used for tightly
/// packed layouts; `base_align` is the coarser alignment required by
/// uniform/storage block rules (a vec3 aligns to 16, not 12).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldInfo {
    /// Size of the field in bytes.
    pub size: u32,
    /// Alignment in tightly packed layouts.
    pub scalar_align: u32,
    /// Alignment under block (uniform/storage) layout rules.
    pub base_align: u32,
    /// Number of scalar components.
    pub components: u32,
}

const fn info(size: u32, scalar_align: u32, base_align: u32, components: u32) -> FieldInfo {
    FieldInfo {
        size,
        scalar_align,
        base_align,
        components,
    }
}

impl FieldType {
    /// Every field type, in declaration order.
    pub const ALL: [FieldType; 36] = [
        Self::I8,
        Self::U8,
        Self::I16,
        Self::U16,
        Self::I32,
        Self::U32,
        Self::F32,
        Self::F64,
        Self::I8x2,
        Self::U8x2,
        Self::I8Nx2,
        Self::U8Nx2,
        Self::I16x2,
        Self::U16x2,
        Self::I16Nx2,
        Self::U16Nx2,
        Self::I32x2,
        Self::U32x2,
        Self::F32x2,
        Self::I32x3,
        Self::U32x3,
        Self::F32x3,
        Self::I8x4,
        Self::U8x4,
        Self::I8Nx4,
        Self::U8Nx4,
        Self::I16x4,
        Self::U16x4,
        Self::I16Nx4,
        Self::U16Nx4,
        Self::I32x4,
        Self::U32x4,
        Self::F32x4,
        Self::Mat2,
        Self::Mat3,
        Self::Mat4,
    ];

    /// Size/alignment metadata for this type.
    pub const fn info(self) -> FieldInfo {
        match self {
            Self::I8 | Self::U8 => info(1, 1, 1, 1),
            Self::I16 | Self::U16 => info(2, 2, 2, 1),
            Self::I32 | Self::U32 | Self::F32 => info(4, 4, 4, 1),
            Self::F64 => info(8, 8, 8, 1),
            Self::I8x2 | Self::U8x2 | Self::I8Nx2 | Self::U8Nx2 => info(2, 1, 2, 2),
            Self::I16x2 | Self::U16x2 | Self::I16Nx2 | Self::U16Nx2 => info(4, 2, 4, 2),
            Self::I32x2 | Self::U32x2 | Self::F32x2 => info(8, 4, 8, 2),
            Self::I32x3 | Self::U32x3 | Self::F32x3 => info(12, 4, 16, 3),
            Self::I8x4 | Self::U8x4 | Self::I8Nx4 | Self::U8Nx4 => info(4, 1, 4, 4),
            Self::I16x4 | Self::U16x4 | Self::I16Nx4 | Self::U16Nx4 => info(8, 2, 8, 4),
            Self::I32x4 | Self::U32x4 | Self::F32x4 => info(16, 4, 16, 4),
            Self::Mat2 => info(16, 4, 8, 4),
            Self::Mat3 => info(64, 4, 16, 9),
            Self::Mat4 => info(64, 4, 16, 16),
        }
    }

    /// Size of the field in bytes.
    pub const fn size(self) -> u32 {
        self.info().size
    }

    /// Number of scalar components.
    pub const fn components(self) -> u32 {
        self.info().components
    }

    /// The canonical tag for this type.
    pub const fn name(self) -> &'static str {
        match self {
            Self::I8 => "i8",
            Self::U8 => "u8",
            Self::I16 => "i16",
            Self::U16 => "u16",
            Self::I32 => "i32",
            Self::U32 => "u32",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::I8x2 => "i8x2",
            Self::U8x2 => "u8x2",
            Self::I8Nx2 => "i8nx2",
            Self::U8Nx2 => "u8nx2",
            Self::I16x2 => "i16x2",
            Self::U16x2 => "u16x2",
            Self::I16Nx2 => "i16nx2",
            Self::U16Nx2 => "u16nx2",
            Self::I32x2 => "i32x2",
            Self::U32x2 => "u32x2",
            Self::F32x2 => "f32x2",
            Self::I32x3 => "i32x3",
            Self::U32x3 => "u32x3",
            Self::F32x3 => "f32x3",
            Self::I8x4 => "i8x4",
            Self::U8x4 => "u8x4",
            Self::I8Nx4 => "i8nx4",
            Self::U8Nx4 => "u8nx4",
            Self::I16x4 => "i16x4",
            Self::U16x4 => "u16x4",
            Self::I16Nx4 => "i16nx4",
            Self::U16Nx4 => "u16nx4",
            Self::I32x4 => "i32x4",
            Self::U32x4 => "u32x4",
            Self::F32x4 => "f32x4",
            Self::Mat2 => "mat2",
            Self::Mat3 => "mat3",
            Self::Mat4 => "mat4",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FieldType {
    type Err = GraphicsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Plural tags are allowed and ignored
        let tag = s.strip_suffix('s').unwrap_or(s);

        let alias = match tag {
            "vec2" => Some(Self::F32x2),
            "vec3" => Some(Self::F32x3),
            "vec4" => Some(Self::F32x4),
            "byte" => Some(Self::U8),
            "int" => Some(Self::I32),
            "float" => Some(Self::F32),
            "color" => Some(Self::U8Nx4),
            _ => None,
        };
        if let Some(ty) = alias {
            return Ok(ty);
        }

        Self::ALL
            .iter()
            .copied()
            .find(|ty| ty.name() == tag)
            .ok_or_else(|| GraphicsError::UnknownFieldType(s.to_string()))
    }
}
