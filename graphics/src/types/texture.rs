//! Texture types and descriptors.

use bitflags::bitflags;

use super::{DeviceLimits, Extent3d};
use crate::error::GraphicsError;

/// Dimensionality of a texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextureKind {
    /// A regular 2D texture.
    #[default]
    D2,
    /// A cubemap with six square faces.
    Cube,
    /// A 3D volume texture.
    Volume,
    /// An array of 2D layers.
    Array,
}

/// Texture format enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum TextureFormat {
    /// 8-bit red channel, unsigned normalized.
    R8Unorm,
    /// 16-bit red channel, unsigned normalized.
    R16Unorm,
    /// 16-bit red channel, float.
    R16Float,
    /// 8-bit RG channels, unsigned normalized.
    Rg8Unorm,
    /// 32-bit red channel, float.
    R32Float,
    /// 16-bit RG channels, float.
    Rg16Float,
    /// 8-bit RGBA channels, unsigned normalized.
    #[default]
    Rgba8Unorm,
    /// 8-bit BGRA channels, unsigned normalized.
    Bgra8Unorm,
    /// 10-bit RGB with 2-bit alpha, unsigned normalized.
    Rgb10a2Unorm,
    /// 16-bit RGBA channels, float.
    Rgba16Float,
    /// 32-bit RG channels, float.
    Rg32Float,
    /// 32-bit RGBA channels, float.
    Rgba32Float,
    /// 16-bit depth.
    Depth16Unorm,
    /// 24-bit depth with 8-bit stencil.
    Depth24PlusStencil8,
    /// 32-bit depth, float.
    Depth32Float,
}

impl TextureFormat {
    /// Returns true if this is a depth or stencil format.
    pub fn is_depth_stencil(&self) -> bool {
        matches!(
            self,
            Self::Depth16Unorm | Self::Depth24PlusStencil8 | Self::Depth32Float
        )
    }

    /// Returns true if this format has a stencil component.
    pub fn has_stencil(&self) -> bool {
        matches!(self, Self::Depth24PlusStencil8)
    }

    /// Returns the size in bytes per pixel.
    pub fn block_size(&self) -> u32 {
        match self {
            Self::R8Unorm => 1,
            Self::R16Unorm | Self::R16Float | Self::Rg8Unorm | Self::Depth16Unorm => 2,
            Self::R32Float
            | Self::Rg16Float
            | Self::Rgba8Unorm
            | Self::Bgra8Unorm
            | Self::Rgb10a2Unorm
            | Self::Depth24PlusStencil8
            | Self::Depth32Float => 4,
            Self::Rgba16Float | Self::Rg32Float => 8,
            Self::Rgba32Float => 16,
        }
    }
}

bitflags! {
    /// Usage flags for textures.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TextureUsage: u32 {
        /// Texture can be sampled in a shader.
        const SAMPLE = 1 << 0;
        /// Texture can be rendered to.
        const RENDER = 1 << 1;
        /// Texture is visible to compute as a storage image.
        const STORAGE = 1 << 2;
        /// Texture can be a copy source or destination.
        const COPY = 1 << 3;
        /// Texture contents only live within one pass.
        const TRANSIENT = 1 << 4;
    }
}

impl Default for TextureUsage {
    fn default() -> Self {
        Self::SAMPLE
    }
}

/// Descriptor for creating a texture.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureDescriptor {
    /// Debug label for the texture.
    pub label: Option<String>,
    /// Dimensionality.
    pub kind: TextureKind,
    /// Pixel format.
    pub format: TextureFormat,
    /// Size of the base mip level.
    pub size: Extent3d,
    /// Layer count (6 for cubes, array length for arrays, 1 otherwise).
    pub layers: u32,
    /// Mip level count; 0 requests the full chain.
    pub mip_levels: u32,
    /// Sample count for multisampling.
    pub samples: u32,
    /// Whether sampling converts from sRGB.
    pub srgb: bool,
    /// Usage flags.
    pub usage: TextureUsage,
}

impl Default for TextureDescriptor {
    fn default() -> Self {
        Self {
            label: None,
            kind: TextureKind::D2,
            format: TextureFormat::Rgba8Unorm,
            size: Extent3d::new_2d(1, 1),
            layers: 1,
            mip_levels: 0,
            samples: 1,
            srgb: true,
            usage: TextureUsage::default(),
        }
    }
}

impl TextureDescriptor {
    /// Create a 2D texture descriptor.
    pub fn new_2d(width: u32, height: u32, format: TextureFormat) -> Self {
        Self {
            format,
            size: Extent3d::new_2d(width, height),
            ..Self::default()
        }
    }

    /// Create a cubemap descriptor with square faces.
    pub fn new_cube(size: u32, format: TextureFormat) -> Self {
        Self {
            kind: TextureKind::Cube,
            format,
            size: Extent3d::new_2d(size, size),
            layers: 6,
            ..Self::default()
        }
    }

    /// Create a volume texture descriptor.
    pub fn new_volume(width: u32, height: u32, depth: u32, format: TextureFormat) -> Self {
        Self {
            kind: TextureKind::Volume,
            format,
            size: Extent3d::new_3d(width, height, depth),
            ..Self::default()
        }
    }

    /// Set the debug label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the layer count (for array textures).
    pub fn with_layers(mut self, layers: u32) -> Self {
        self.layers = layers;
        if layers > 1 && self.kind == TextureKind::D2 {
            self.kind = TextureKind::Array;
        }
        self
    }

    /// Set an explicit mip level count (0 = full chain).
    pub fn with_mip_levels(mut self, count: u32) -> Self {
        self.mip_levels = count;
        self
    }

    /// Set the sample count for multisampling.
    pub fn with_samples(mut self, samples: u32) -> Self {
        self.samples = samples;
        // Multisampled textures cannot be mipmapped
        if samples > 1 {
            self.mip_levels = 1;
        }
        self
    }

    /// Interpret texel data as linear instead of sRGB.
    pub fn linear(mut self) -> Self {
        self.srgb = false;
        self
    }

    /// Set the usage flags.
    pub fn with_usage(mut self, usage: TextureUsage) -> Self {
        self.usage = usage;
        self
    }

    /// The effective mip level count (resolving 0 to the full chain).
    pub fn mip_level_count(&self) -> u32 {
        if self.mip_levels != 0 {
            self.mip_levels
        } else {
            self.size.mip_chain_len()
        }
    }

    /// Validate the descriptor's internal consistency.
    pub fn validate(&self) -> Result<(), GraphicsError> {
        if self.size.width == 0 || self.size.height == 0 || self.size.depth == 0 {
            return Err(GraphicsError::InvalidDescriptor(
                "texture dimensions must be nonzero".to_string(),
            ));
        }
        if self.kind == TextureKind::Cube && self.layers != 6 {
            return Err(GraphicsError::InvalidDescriptor(format!(
                "cubemaps require 6 layers, got {}",
                self.layers
            )));
        }
        if self.kind != TextureKind::Volume && self.size.depth != 1 {
            return Err(GraphicsError::InvalidDescriptor(
                "only volume textures may have depth".to_string(),
            ));
        }
        if self.samples > 1 && self.mip_level_count() != 1 {
            return Err(GraphicsError::InvalidDescriptor(
                "multisampled textures cannot have mipmaps".to_string(),
            ));
        }
        Ok(())
    }

    /// Check the descriptor against device limits.
    pub fn fits(&self, limits: &DeviceLimits) -> Result<(), GraphicsError> {
        let max = match self.kind {
            TextureKind::D2 | TextureKind::Array => limits.texture_size_2d,
            TextureKind::Cube => limits.texture_size_cube,
            TextureKind::Volume => limits.texture_size_3d,
        };
        if self.size.max_dimension() > max {
            return Err(GraphicsError::InvalidDescriptor(format!(
                "texture dimension {} exceeds device limit {max}",
                self.size.max_dimension()
            )));
        }
        if self.layers > limits.texture_layers {
            return Err(GraphicsError::InvalidDescriptor(format!(
                "layer count {} exceeds device limit {}",
                self.layers, limits.texture_layers
            )));
        }
        Ok(())
    }
}

/// Descriptor for a view over a subset of a texture's layers and mips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureViewDescriptor {
    /// Dimensionality of the view.
    pub kind: TextureKind,
    /// First layer included in the view.
    pub base_layer: u32,
    /// Number of layers in the view.
    pub layer_count: u32,
    /// First mip level included in the view.
    pub base_mip: u32,
    /// Number of mip levels; 0 means all remaining levels.
    pub mip_count: u32,
}

impl TextureViewDescriptor {
    /// Create a single-layer, all-mips view.
    pub fn new(kind: TextureKind) -> Self {
        Self {
            kind,
            base_layer: 0,
            layer_count: 1,
            base_mip: 0,
            mip_count: 0,
        }
    }

    /// Select a layer range.
    pub fn with_layers(mut self, base: u32, count: u32) -> Self {
        self.base_layer = base;
        self.layer_count = count;
        self
    }

    /// Select a mip range (count 0 = all remaining).
    pub fn with_mips(mut self, base: u32, count: u32) -> Self {
        self.base_mip = base;
        self.mip_count = count;
        self
    }

    /// Validate this view against its parent descriptor.
    pub fn validate(&self, parent: &TextureDescriptor) -> Result<(), GraphicsError> {
        if self.base_layer + self.layer_count > parent.layers {
            return Err(GraphicsError::InvalidDescriptor(format!(
                "view layers {}..{} exceed parent layer count {}",
                self.base_layer,
                self.base_layer + self.layer_count,
                parent.layers
            )));
        }
        let parent_mips = parent.mip_level_count();
        let mips = if self.mip_count == 0 {
            parent_mips.saturating_sub(self.base_mip)
        } else {
            self.mip_count
        };
        if mips == 0 || self.base_mip + mips > parent_mips {
            return Err(GraphicsError::InvalidDescriptor(format!(
                "view mips {}..{} exceed parent mip count {parent_mips}",
                self.base_mip,
                self.base_mip + mips
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_creation_rules() {
        let desc = TextureDescriptor::new_2d(256, 128, TextureFormat::Rgba8Unorm);
        assert_eq!(desc.kind, TextureKind::D2);
        assert!(desc.srgb);
        assert_eq!(desc.samples, 1);
        assert_eq!(desc.usage, TextureUsage::SAMPLE);
        // Full mip chain for 256x128
        assert_eq!(desc.mip_level_count(), 9);
        assert!(desc.validate().is_ok());
    }

    #[test]
    fn cube_layer_rule() {
        let cube = TextureDescriptor::new_cube(64, TextureFormat::Rgba8Unorm);
        assert_eq!(cube.layers, 6);
        assert!(cube.validate().is_ok());

        let broken = TextureDescriptor {
            layers: 5,
            ..TextureDescriptor::new_cube(64, TextureFormat::Rgba8Unorm)
        };
        assert!(broken.validate().is_err());
    }

    #[test]
    fn multisample_disables_mips() {
        let desc = TextureDescriptor::new_2d(512, 512, TextureFormat::Rgba8Unorm).with_samples(4);
        assert_eq!(desc.mip_level_count(), 1);
        assert!(desc.validate().is_ok());

        let broken = TextureDescriptor {
            samples: 4,
            mip_levels: 0,
            ..TextureDescriptor::new_2d(512, 512, TextureFormat::Rgba8Unorm)
        };
        assert!(broken.validate().is_err());
    }

    #[test]
    fn array_kind_inferred_from_layers() {
        let desc = TextureDescriptor::new_2d(64, 64, TextureFormat::R8Unorm).with_layers(8);
        assert_eq!(desc.kind, TextureKind::Array);
        assert!(desc.validate().is_ok());
    }

    #[test]
    fn view_ranges_validated() {
        let parent = TextureDescriptor::new_2d(256, 256, TextureFormat::Rgba8Unorm).with_layers(4);

        let view = TextureViewDescriptor::new(TextureKind::D2).with_layers(2, 2);
        assert!(view.validate(&parent).is_ok());

        let view = TextureViewDescriptor::new(TextureKind::D2).with_layers(3, 2);
        assert!(view.validate(&parent).is_err());

        let view = TextureViewDescriptor::new(TextureKind::D2).with_mips(20, 0);
        assert!(view.validate(&parent).is_err());
    }

    #[test]
    fn limits_checked() {
        let limits = DeviceLimits::default();
        let desc = TextureDescriptor::new_2d(limits.texture_size_2d + 1, 4, TextureFormat::R8Unorm);
        assert!(desc.fits(&limits).is_err());
        let desc = TextureDescriptor::new_2d(1024, 1024, TextureFormat::R8Unorm);
        assert!(desc.fits(&limits).is_ok());
    }

    #[test]
    fn depth_format_predicates() {
        assert!(TextureFormat::Depth16Unorm.is_depth_stencil());
        assert!(!TextureFormat::Depth16Unorm.has_stencil());
        assert!(TextureFormat::Depth24PlusStencil8.has_stencil());
        assert!(!TextureFormat::Rgba8Unorm.is_depth_stencil());
        assert_eq!(TextureFormat::Rgba16Float.block_size(), 8);
    }
}
