//! Strongly-typed descriptors and enumerations for graphics resources.

pub mod buffer;
pub mod common;
pub mod device;
pub mod field;
pub mod shader;
pub mod texture;

pub use buffer::{BufferDescriptor, BufferUsage, DrawArgs, DrawIndexedArgs};
pub use common::{
    BlendAlphaMode, BlendMode, ColorMask, CompareMode, CullMode, DrawMode, Extent3d, LoadAction,
    SaveAction, StencilAction, Winding,
};
pub use device::{DeviceFeatures, DeviceLimits};
pub use field::{FieldInfo, FieldType};
pub use shader::{
    BindGroupLayout, BindingSlot, BindingType, MAX_DYNAMIC_BUFFERS, ShaderDescriptor, ShaderKind,
    ShaderStages,
};
pub use texture::{
    TextureDescriptor, TextureFormat, TextureKind, TextureUsage, TextureViewDescriptor,
};
