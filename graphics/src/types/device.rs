//! Device capability reporting.
//!
//! Plain data describing what a GPU device supports. A backend fills
//! these in at init; descriptor validation consults them so invalid work
//! is rejected before any resource exists.

/// Optional features a device may support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeviceFeatures {
    /// BC6/BC7 compressed texture support.
    pub bptc: bool,
    /// ASTC compressed texture support.
    pub astc: bool,
    /// Adjustable point rasterization size.
    pub point_size: bool,
    /// Wireframe fill mode.
    pub wireframe: bool,
    /// Independent blend state per color target.
    pub multiblend: bool,
    /// Anisotropic filtering.
    pub anisotropy: bool,
    /// Depth clamping.
    pub depth_clamp: bool,
    /// Clamped depth bias.
    pub depth_nudge_clamp: bool,
    /// Clip distance outputs.
    pub clip_distance: bool,
    /// Cull distance outputs.
    pub cull_distance: bool,
    /// Full 32-bit index buffer range.
    pub full_index_buffer_range: bool,
    /// First-instance parameter in indirect draws.
    pub indirect_draw_first_instance: bool,
    /// Extra shader input attributes.
    pub extra_shader_inputs: bool,
    /// Dynamic indexing of resource arrays.
    pub dynamic_indexing: bool,
    /// 64-bit floats in shaders.
    pub float64: bool,
    /// 64-bit integers in shaders.
    pub int64: bool,
    /// 16-bit integers in shaders.
    pub int16: bool,
}

/// Size and count limits a device enforces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceLimits {
    /// Maximum 2D texture dimension.
    pub texture_size_2d: u32,
    /// Maximum 3D texture dimension.
    pub texture_size_3d: u32,
    /// Maximum cubemap face dimension.
    pub texture_size_cube: u32,
    /// Maximum array texture layer count.
    pub texture_layers: u32,
    /// Maximum render target width.
    pub render_width: u32,
    /// Maximum render target height.
    pub render_height: u32,
    /// Maximum simultaneous render views (multiview).
    pub render_views: u32,
    /// Maximum bound bind groups.
    pub bundle_count: u32,
    /// Maximum bindings per bind group.
    pub bundle_slots: u32,
    /// Maximum uniform buffer binding range in bytes.
    pub uniform_buffer_range: u32,
    /// Maximum storage buffer binding range in bytes.
    pub storage_buffer_range: u32,
    /// Required uniform buffer offset alignment.
    pub uniform_buffer_align: u32,
    /// Required storage buffer offset alignment.
    pub storage_buffer_align: u32,
    /// Maximum vertex attributes.
    pub vertex_attributes: u32,
    /// Maximum vertex attribute offset.
    pub vertex_attribute_offset: u32,
    /// Maximum bound vertex buffers.
    pub vertex_buffers: u32,
    /// Maximum vertex buffer stride.
    pub vertex_buffer_stride: u32,
    /// Maximum vertex shader output components.
    pub vertex_shader_outputs: u32,
    /// Maximum compute dispatch count per dimension.
    pub compute_count: [u32; 3],
    /// Maximum compute workgroup size per dimension.
    pub compute_group_size: [u32; 3],
    /// Maximum total invocations in one workgroup.
    pub compute_group_volume: u32,
    /// Maximum compute shared memory in bytes.
    pub compute_shared_memory: u32,
    /// Maximum draws in one indirect multi-draw.
    pub indirect_draw_count: u32,
    /// Maximum single allocation size in bytes.
    pub allocation_size: u64,
    /// Supported point size range.
    pub point_size: [f32; 2],
    /// Maximum anisotropy.
    pub anisotropy: f32,
}

impl Default for DeviceLimits {
    /// Conservative baseline every target device is expected to meet.
    fn default() -> Self {
        Self {
            texture_size_2d: 8192,
            texture_size_3d: 2048,
            texture_size_cube: 8192,
            texture_layers: 256,
            render_width: 8192,
            render_height: 8192,
            render_views: 2,
            bundle_count: 4,
            bundle_slots: 32,
            uniform_buffer_range: 65536,
            storage_buffer_range: 128 << 20,
            uniform_buffer_align: 256,
            storage_buffer_align: 64,
            vertex_attributes: 16,
            vertex_attribute_offset: 2047,
            vertex_buffers: 16,
            vertex_buffer_stride: 2048,
            vertex_shader_outputs: 64,
            compute_count: [65535; 3],
            compute_group_size: [1024, 1024, 64],
            compute_group_volume: 1024,
            compute_shared_memory: 16384,
            indirect_draw_count: 1 << 20,
            allocation_size: 1 << 30,
            point_size: [1.0, 64.0],
            anisotropy: 16.0,
        }
    }
}
