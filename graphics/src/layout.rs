//! Field layout resolution for structured buffers.
//!
//! A buffer format declares the fields of one buffer element; resolving
//! it assigns each field a byte offset and computes the element stride.
//! Two alignment regimes exist: tightly packed layouts (vertex and index
//! data) align fields to their component width, while block layouts
//! (uniform/storage visible data) use the coarser base alignment the GPU
//! requires for constant blocks. Resolution is a pure function of the
//! declaration and the rules; layouts are immutable once built.
//!
//! # Example
//!
//! ```ignore
//! // position + texcoord, tightly packed: offsets 0 and 12, stride 20
//! let layout = FieldLayout::resolve(
//!     &BufferFormat::from(vec![
//!         FormatEntry::from(FieldType::F32x3),
//!         FormatEntry::from(FieldType::F32x2),
//!     ]),
//!     LayoutRules::packed(),
//! )?;
//! ```

use std::str::FromStr;

use crate::error::GraphicsError;
use crate::types::field::FieldType;

/// One entry in a buffer format declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatEntry {
    /// A typed field, placed at the next suitably aligned offset.
    Field(FieldType),
    /// Raw padding: advances the cursor by this many bytes, unaligned.
    Pad(u32),
}

impl From<FieldType> for FormatEntry {
    fn from(ty: FieldType) -> Self {
        Self::Field(ty)
    }
}

impl From<u32> for FormatEntry {
    fn from(bytes: u32) -> Self {
        Self::Pad(bytes)
    }
}

/// A buffer format declaration.
///
/// The single-type shorthand mirrors declaring a buffer of one bare type:
/// no alignment is applied and the stride is the type's plain size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BufferFormat {
    /// One bare field type.
    Single(FieldType),
    /// An ordered list of fields and padding.
    List(Vec<FormatEntry>),
}

impl From<FieldType> for BufferFormat {
    fn from(ty: FieldType) -> Self {
        Self::Single(ty)
    }
}

impl From<Vec<FormatEntry>> for BufferFormat {
    fn from(entries: Vec<FormatEntry>) -> Self {
        Self::List(entries)
    }
}

impl BufferFormat {
    /// Parse a format from text: whitespace- or comma-separated tokens,
    /// each either a field type tag or an integer padding advance.
    ///
    /// A single type token parses as the bare-type shorthand.
    pub fn parse(text: &str) -> Result<Self, GraphicsError> {
        let tokens: Vec<&str> = text
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty())
            .collect();

        if let [token] = tokens.as_slice() {
            if token.parse::<u32>().is_err() {
                return Ok(Self::Single(FieldType::from_str(token)?));
            }
        }

        let mut entries = Vec::with_capacity(tokens.len());
        for token in tokens {
            let entry = match token.parse::<u32>() {
                Ok(bytes) => FormatEntry::Pad(bytes),
                Err(_) => FormatEntry::Field(FieldType::from_str(token)?),
            };
            entries.push(entry);
        }
        Ok(Self::List(entries))
    }
}

/// Alignment rules a format is resolved under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutRules {
    /// Align fields to their block base alignment instead of their
    /// component width.
    pub block_alignment: bool,
    /// Round the final stride up to a multiple of 16 (skipped for
    /// single-byte "byte format" layouts).
    pub round_stride: bool,
}

impl LayoutRules {
    /// Tightly packed rules for vertex and index data.
    pub const fn packed() -> Self {
        Self {
            block_alignment: false,
            round_stride: false,
        }
    }

    /// Block alignment for storage-visible data; stride is not rounded.
    pub const fn storage() -> Self {
        Self {
            block_alignment: true,
            round_stride: false,
        }
    }

    /// Constant-block rules for uniform-visible data: block alignment
    /// plus 16-byte stride rounding.
    pub const fn uniform() -> Self {
        Self {
            block_alignment: true,
            round_stride: true,
        }
    }
}

/// A resolved field: its type and byte offset within the element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldBinding {
    /// Field data type.
    pub ty: FieldType,
    /// Byte offset from the start of the element.
    pub offset: u32,
}

/// The resolved layout of one buffer element: field offsets and stride.
///
/// Computed once when a buffer format is defined and immutable afterward;
/// upload and binding code interpret raw bytes through it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldLayout {
    fields: Vec<FieldBinding>,
    stride: u32,
}

fn align_up(value: u32, align: u32) -> u32 {
    debug_assert!(align.is_power_of_two());
    (value + align - 1) & !(align - 1)
}

impl FieldLayout {
    /// Maximum number of fields in one layout.
    pub const MAX_FIELDS: usize = 16;

    /// Resolve a format declaration into offsets and a stride.
    pub fn resolve(format: &BufferFormat, rules: LayoutRules) -> Result<Self, GraphicsError> {
        let mut layout = match format {
            BufferFormat::Single(ty) => Self {
                fields: vec![FieldBinding { ty: *ty, offset: 0 }],
                stride: ty.info().size,
            },
            BufferFormat::List(entries) => {
                let mut fields = Vec::new();
                let mut cursor = 0u32;
                for entry in entries {
                    match *entry {
                        FormatEntry::Pad(bytes) => cursor += bytes,
                        FormatEntry::Field(ty) => {
                            if fields.len() == Self::MAX_FIELDS {
                                return Err(GraphicsError::TooManyFields {
                                    count: fields.len() + 1,
                                    max: Self::MAX_FIELDS,
                                });
                            }
                            let info = ty.info();
                            let align = if rules.block_alignment {
                                info.base_align
                            } else {
                                info.scalar_align
                            };
                            let offset = align_up(cursor, align);
                            fields.push(FieldBinding { ty, offset });
                            cursor = offset + info.size;
                        }
                    }
                }
                if fields.is_empty() {
                    return Err(GraphicsError::EmptyFormat);
                }
                Self {
                    fields,
                    stride: cursor,
                }
            }
        };

        // Constant blocks are padded out to 16, except single-byte formats
        if rules.round_stride && layout.stride > 1 {
            layout.stride = align_up(layout.stride, 16);
        }

        Ok(layout)
    }

    /// Parse and resolve a text format in one step.
    pub fn parse(text: &str, rules: LayoutRules) -> Result<Self, GraphicsError> {
        Self::resolve(&BufferFormat::parse(text)?, rules)
    }

    /// The resolved fields, in declaration order.
    pub fn fields(&self) -> &[FieldBinding] {
        &self.fields
    }

    /// Byte stride of one element, including trailing padding.
    pub fn stride(&self) -> u32 {
        self.stride
    }

    /// Number of fields.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Total scalar components across all fields of one element.
    pub fn component_count(&self) -> u32 {
        self.fields.iter().map(|f| f.ty.components()).sum()
    }
}
