//! Shader and binding descriptors.
//!
//! Shaders are opaque code blobs plus the metadata the binding model
//! needs. Name-based slot resolution requires reflection and lives in
//! the backend; this layer only carries the declarations.

use bitflags::bitflags;

use super::DeviceLimits;
use crate::error::GraphicsError;

/// What kind of pipeline a shader drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderKind {
    /// Vertex + fragment stages.
    Graphics,
    /// A compute kernel.
    Compute,
}

bitflags! {
    /// Shader stages that can access a binding.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ShaderStages: u32 {
        /// Vertex shader stage.
        const VERTEX = 1 << 0;
        /// Fragment shader stage.
        const FRAGMENT = 1 << 1;
        /// Compute shader stage.
        const COMPUTE = 1 << 2;
    }
}

/// Maximum dynamic buffers one shader may declare.
pub const MAX_DYNAMIC_BUFFERS: usize = 64;

/// Descriptor for creating a shader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderDescriptor {
    /// Pipeline kind.
    pub kind: ShaderKind,
    /// Vertex stage code (graphics shaders).
    pub vertex: Option<Vec<u8>>,
    /// Fragment stage code (graphics shaders).
    pub fragment: Option<Vec<u8>>,
    /// Kernel code (compute shaders).
    pub compute: Option<Vec<u8>>,
    /// Buffer variables bound with dynamic offsets.
    pub dynamic_buffers: Vec<String>,
    /// Debug label for the shader.
    pub label: Option<String>,
}

impl ShaderDescriptor {
    /// Create a graphics shader from vertex and fragment code.
    pub fn graphics(vertex: impl Into<Vec<u8>>, fragment: impl Into<Vec<u8>>) -> Self {
        Self {
            kind: ShaderKind::Graphics,
            vertex: Some(vertex.into()),
            fragment: Some(fragment.into()),
            compute: None,
            dynamic_buffers: Vec::new(),
            label: None,
        }
    }

    /// Create a compute shader from kernel code.
    pub fn compute(code: impl Into<Vec<u8>>) -> Self {
        Self {
            kind: ShaderKind::Compute,
            vertex: None,
            fragment: None,
            compute: Some(code.into()),
            dynamic_buffers: Vec::new(),
            label: None,
        }
    }

    /// Declare buffer variables bound with dynamic offsets.
    pub fn with_dynamic_buffers<I, S>(mut self, names: I) -> Result<Self, GraphicsError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dynamic_buffers = names.into_iter().map(Into::into).collect();
        if self.dynamic_buffers.len() > MAX_DYNAMIC_BUFFERS {
            return Err(GraphicsError::TooManyDynamicBuffers {
                count: self.dynamic_buffers.len(),
                max: MAX_DYNAMIC_BUFFERS,
            });
        }
        Ok(self)
    }

    /// Set the debug label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Type of resource a binding slot expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingType {
    /// Uniform buffer (read-only, small, frequently updated).
    UniformBuffer,
    /// Storage buffer (read-write, larger data).
    StorageBuffer,
    /// Sampled texture.
    Texture,
    /// Storage image.
    StorageTexture,
}

/// One binding slot in a bind group layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingSlot {
    /// Binding index within the group.
    pub binding: u32,
    /// Type of resource expected at this binding.
    pub binding_type: BindingType,
    /// Shader stages that can access this binding.
    pub visibility: ShaderStages,
}

impl BindingSlot {
    /// Create a new binding slot visible to vertex and fragment stages.
    pub fn new(binding: u32, binding_type: BindingType) -> Self {
        Self {
            binding,
            binding_type,
            visibility: ShaderStages::VERTEX | ShaderStages::FRAGMENT,
        }
    }

    /// Set the shader stage visibility.
    pub fn with_visibility(mut self, visibility: ShaderStages) -> Self {
        self.visibility = visibility;
        self
    }
}

/// Describes one bind group: a group index and its slots.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BindGroupLayout {
    /// Group index this layout binds to.
    pub group: u32,
    /// The binding slots in this group.
    pub slots: Vec<BindingSlot>,
    /// Debug label for the group.
    pub label: Option<String>,
}

impl BindGroupLayout {
    /// Create an empty layout for a group index.
    pub fn new(group: u32) -> Self {
        Self {
            group,
            slots: Vec::new(),
            label: None,
        }
    }

    /// Add a binding slot.
    pub fn with_slot(mut self, slot: BindingSlot) -> Self {
        self.slots.push(slot);
        self
    }

    /// Set a debug label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Look up a slot by binding index.
    pub fn slot(&self, binding: u32) -> Option<&BindingSlot> {
        self.slots.iter().find(|s| s.binding == binding)
    }

    /// Validate the layout against device limits.
    ///
    /// Rejects duplicate binding indices and groups or slot counts past
    /// what the device exposes.
    pub fn validate(&self, limits: &DeviceLimits) -> Result<(), GraphicsError> {
        if self.group >= limits.bundle_count {
            return Err(GraphicsError::InvalidDescriptor(format!(
                "bind group index {} exceeds device limit {}",
                self.group, limits.bundle_count
            )));
        }
        if self.slots.len() as u32 > limits.bundle_slots {
            return Err(GraphicsError::InvalidDescriptor(format!(
                "bind group has {} slots, device limit is {}",
                self.slots.len(),
                limits.bundle_slots
            )));
        }
        for (i, slot) in self.slots.iter().enumerate() {
            if self.slots[..i].iter().any(|s| s.binding == slot.binding) {
                return Err(GraphicsError::InvalidDescriptor(format!(
                    "duplicate binding index {}",
                    slot.binding
                )));
            }
        }
        Ok(())
    }
}
