//! # Parallax Graphics
//!
//! Data layer for the Parallax renderer: strongly-typed resource
//! descriptors and the pure computations that define them.
//!
//! ## Overview
//!
//! This crate provides:
//! - [`FieldType`] and [`FieldLayout`] - field metadata and layout
//!   resolution for structured buffers (packed and block rules)
//! - [`types`] - buffer, texture, shader, and device descriptors
//! - [`canvas`] - render target descriptors, pass state, and the model
//!   transform stack
//!
//! There is no GPU backend here: everything is synchronous, allocation-
//! light plain data that a backend consumes. All validation happens at
//! descriptor definition time and reports [`GraphicsError`].
//!
//! ## Example
//!
//! ```ignore
//! use parallax_graphics::{BufferDescriptor, BufferFormat, BufferUsage};
//!
//! // position + texcoord vertex buffer: offsets 0/12, stride 20
//! let vertices = BufferDescriptor::new(
//!     BufferFormat::parse("vec3 vec2")?,
//!     BufferUsage::VERTEX,
//! )?;
//! ```

pub mod canvas;
pub mod error;
pub mod layout;
pub mod types;

// Re-export main types for convenience
pub use canvas::{
    Blend, Canvas, CanvasDescriptor, ColorAttachment, DepthAttachment, MAX_COLOR_ATTACHMENTS,
    MAX_TRANSFORM_DEPTH, MAX_VIEWS, PassState, TransformStack,
};
pub use error::GraphicsError;
pub use layout::{BufferFormat, FieldBinding, FieldLayout, FormatEntry, LayoutRules};
pub use types::{
    BindGroupLayout, BindingSlot, BindingType, BlendAlphaMode, BlendMode, BufferDescriptor,
    BufferUsage, ColorMask, CompareMode, CullMode, DeviceFeatures, DeviceLimits, DrawArgs,
    DrawIndexedArgs, DrawMode, Extent3d, FieldInfo, FieldType, LoadAction, SaveAction,
    ShaderDescriptor, ShaderKind, ShaderStages, StencilAction, TextureDescriptor, TextureFormat,
    TextureKind, TextureUsage, TextureViewDescriptor, Winding,
};

/// Graphics library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the graphics subsystem.
pub fn init() {
    log::info!("Parallax Graphics v{} initialized", VERSION);
}
