//! Graphics error types.

use std::fmt;

/// Errors that can occur in the graphics data layer.
///
/// All of these are input-validation failures detected synchronously when
/// a descriptor or layout is defined; there is no partial-success mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphicsError {
    /// A field type tag did not match any known type or alias.
    UnknownFieldType(String),
    /// A buffer format contained no fields.
    EmptyFormat,
    /// A buffer format declared more fields than a layout can hold.
    TooManyFields { count: usize, max: usize },
    /// A color target index was out of range.
    InvalidAttachmentIndex { index: usize, max: usize },
    /// A canvas declared more color attachments than supported.
    TooManyAttachments { count: usize, max: usize },
    /// A view index was out of range.
    InvalidViewIndex { index: usize, max: usize },
    /// The transform stack exceeded its maximum depth.
    TransformStackOverflow,
    /// Pop was called with no matching push.
    TransformStackUnderflow,
    /// A shader declared more dynamic buffers than supported.
    TooManyDynamicBuffers { count: usize, max: usize },
    /// A pass was begun while already recording.
    PassActive,
    /// A pass was finished without being begun.
    PassNotActive,
    /// A descriptor failed validation.
    InvalidDescriptor(String),
}

impl fmt::Display for GraphicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownFieldType(tag) => write!(f, "invalid field type '{tag}'"),
            Self::EmptyFormat => write!(f, "buffer format contains no fields"),
            Self::TooManyFields { count, max } => {
                write!(f, "too many fields in buffer format (max is {max}, got {count})")
            }
            Self::InvalidAttachmentIndex { index, max } => {
                write!(f, "invalid color target index {index} (max is {max})")
            }
            Self::TooManyAttachments { count, max } => {
                write!(f, "too many color attachments (max is {max}, got {count})")
            }
            Self::InvalidViewIndex { index, max } => {
                write!(f, "invalid view index {index} (max is {max})")
            }
            Self::TransformStackOverflow => write!(f, "transform stack overflow"),
            Self::TransformStackUnderflow => write!(f, "transform stack underflow"),
            Self::TooManyDynamicBuffers { count, max } => {
                write!(f, "too many dynamic buffers (max is {max}, got {count})")
            }
            Self::PassActive => write!(f, "pass is already active"),
            Self::PassNotActive => write!(f, "pass is not active"),
            Self::InvalidDescriptor(msg) => write!(f, "invalid descriptor: {msg}"),
        }
    }
}

impl std::error::Error for GraphicsError {}
