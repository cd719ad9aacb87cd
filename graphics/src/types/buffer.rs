//! Buffer types and descriptors.

use bitflags::bitflags;
use bytemuck::{Pod, Zeroable};
use static_assertions::const_assert_eq;

use crate::error::GraphicsError;
use crate::layout::{BufferFormat, FieldLayout, LayoutRules};

bitflags! {
    /// Usage flags for buffers.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BufferUsage: u32 {
        /// Buffer can be used as a vertex buffer.
        const VERTEX = 1 << 0;
        /// Buffer can be used as an index buffer.
        const INDEX = 1 << 1;
        /// Buffer can back a uniform block.
        const UNIFORM = 1 << 2;
        /// Buffer is visible to compute as a storage buffer.
        const STORAGE = 1 << 3;
        /// Buffer holds indirect draw/dispatch parameters.
        const PARAMETER = 1 << 4;
        /// Buffer can be a copy source or destination.
        const COPY = 1 << 5;
        /// Buffer contents can be written from the CPU.
        const WRITE = 1 << 6;
        /// Keep a CPU-side copy of the contents resident.
        const RETAIN = 1 << 7;
    }
}

impl Default for BufferUsage {
    fn default() -> Self {
        Self::WRITE | Self::RETAIN
    }
}

impl BufferUsage {
    /// The layout rules a buffer with these flags is resolved under.
    ///
    /// Uniform- or storage-visible buffers use block alignment; only
    /// uniform blocks additionally round their stride to 16.
    pub fn layout_rules(self) -> LayoutRules {
        if self.contains(Self::UNIFORM) {
            LayoutRules::uniform()
        } else if self.contains(Self::STORAGE) {
            LayoutRules::storage()
        } else {
            LayoutRules::packed()
        }
    }
}

/// Descriptor for creating a structured buffer.
///
/// The format is resolved into a [`FieldLayout`] at construction time
/// under the rules implied by the usage flags; an invalid format rejects
/// the whole descriptor before any buffer exists.
#[derive(Debug, Clone, PartialEq)]
pub struct BufferDescriptor {
    /// Debug label for the buffer.
    pub label: Option<String>,
    /// Usage flags.
    pub usage: BufferUsage,
    /// Resolved element layout.
    pub layout: FieldLayout,
    /// Number of elements.
    pub length: u32,
}

impl BufferDescriptor {
    /// Create a descriptor from a format declaration and usage flags.
    pub fn new(
        format: impl Into<BufferFormat>,
        usage: BufferUsage,
    ) -> Result<Self, GraphicsError> {
        let layout = FieldLayout::resolve(&format.into(), usage.layout_rules())?;
        Ok(Self {
            label: None,
            usage,
            layout,
            length: 0,
        })
    }

    /// Set the debug label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the element count directly.
    pub fn with_length(mut self, length: u32) -> Self {
        self.length = length;
        self
    }

    /// Infer the element count from a raw byte size (e.g. a blob).
    pub fn with_length_for_bytes(mut self, bytes: u64) -> Self {
        self.length = (bytes / self.layout.stride() as u64) as u32;
        self
    }

    /// Infer the element count from a flat count of scalar components.
    pub fn with_length_for_components(mut self, components: u32) -> Self {
        self.length = components / self.layout.component_count();
        self
    }

    /// Infer the element count from a count of per-field items.
    pub fn with_length_for_items(mut self, items: u32) -> Self {
        self.length = items / self.layout.field_count() as u32;
        self
    }

    /// Total size of the buffer in bytes.
    pub fn size(&self) -> u64 {
        self.layout.stride() as u64 * self.length as u64
    }
}

// ============================================================================
// Indirect Draw Parameters
// ============================================================================

/// Parameters for a non-indexed indirect draw.
///
/// Matches the GPU layout indirect draw commands read from a
/// [`BufferUsage::PARAMETER`] buffer.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Pod, Zeroable)]
pub struct DrawArgs {
    /// Number of vertices to draw.
    pub vertex_count: u32,
    /// Number of instances to draw.
    pub instance_count: u32,
    /// Index of the first vertex to draw.
    pub first_vertex: u32,
    /// Instance ID of the first instance to draw.
    pub first_instance: u32,
}

const_assert_eq!(std::mem::size_of::<DrawArgs>(), 16);

impl DrawArgs {
    /// Create new indirect draw parameters.
    pub fn new(vertex_count: u32, instance_count: u32) -> Self {
        Self {
            vertex_count,
            instance_count,
            first_vertex: 0,
            first_instance: 0,
        }
    }

    /// Convert to bytes for uploading to a buffer.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

/// Parameters for an indexed indirect draw.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Pod, Zeroable)]
pub struct DrawIndexedArgs {
    /// Number of indices to draw.
    pub index_count: u32,
    /// Number of instances to draw.
    pub instance_count: u32,
    /// Index of the first index to draw.
    pub first_index: u32,
    /// Value added to each index before vertex fetch.
    pub base_vertex: i32,
    /// Instance ID of the first instance to draw.
    pub first_instance: u32,
}

const_assert_eq!(std::mem::size_of::<DrawIndexedArgs>(), 20);

impl DrawIndexedArgs {
    /// Create new indexed indirect draw parameters.
    pub fn new(index_count: u32, instance_count: u32) -> Self {
        Self {
            index_count,
            instance_count,
            first_index: 0,
            base_vertex: 0,
            first_instance: 0,
        }
    }

    /// Convert to bytes for uploading to a buffer.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::field::FieldType;

    #[test]
    fn default_usage_is_writable_and_retained() {
        let usage = BufferUsage::default();
        assert!(usage.contains(BufferUsage::WRITE));
        assert!(usage.contains(BufferUsage::RETAIN));
        assert!(!usage.contains(BufferUsage::UNIFORM));
    }

    #[test]
    fn usage_selects_layout_rules() {
        assert_eq!(BufferUsage::VERTEX.layout_rules(), LayoutRules::packed());
        assert_eq!(BufferUsage::STORAGE.layout_rules(), LayoutRules::storage());
        assert_eq!(BufferUsage::UNIFORM.layout_rules(), LayoutRules::uniform());
        // Uniform visibility wins when both block kinds are set
        assert_eq!(
            (BufferUsage::UNIFORM | BufferUsage::STORAGE).layout_rules(),
            LayoutRules::uniform()
        );
    }

    #[test]
    fn descriptor_resolves_layout_from_usage() {
        let vertex = BufferDescriptor::new(
            BufferFormat::List(vec![FieldType::F32x3.into(), FieldType::F32x2.into()]),
            BufferUsage::VERTEX | BufferUsage::default(),
        )
        .unwrap();
        assert_eq!(vertex.layout.stride(), 20);

        let uniform = BufferDescriptor::new(
            BufferFormat::List(vec![FieldType::F32x3.into(), FieldType::F32x2.into()]),
            BufferUsage::UNIFORM | BufferUsage::default(),
        )
        .unwrap();
        assert_eq!(uniform.layout.stride(), 32);
    }

    #[test]
    fn length_inference() {
        let desc = BufferDescriptor::new(
            BufferFormat::List(vec![FieldType::F32x3.into(), FieldType::F32x2.into()]),
            BufferUsage::VERTEX,
        )
        .unwrap();

        // 100 elements of 20 bytes
        assert_eq!(desc.clone().with_length_for_bytes(2000).length, 100);
        // 5 components per element
        assert_eq!(desc.clone().with_length_for_components(500).length, 100);
        // 2 fields per element
        assert_eq!(desc.clone().with_length_for_items(200).length, 100);
        assert_eq!(desc.with_length(100).size(), 2000);
    }

    #[test]
    fn draw_args_bytes() {
        let args = DrawArgs::new(36, 100);
        assert_eq!(args.as_bytes().len(), 16);
        let indexed = DrawIndexedArgs::new(36, 1);
        assert_eq!(indexed.as_bytes().len(), 20);
    }
}
