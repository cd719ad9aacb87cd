//! Render target descriptors and per-pass state.
//!
//! A [`Canvas`] is a render destination: up to four color attachments and
//! an optional depth attachment, plus the mutable state a pass records
//! against it (blending, depth/stencil tests, culling, a model transform
//! stack, and per-view camera matrices for stereo rendering). All of it
//! is plain data; executing a pass belongs to a backend.

use parallax_core::math::{Mat4, Quat, Vec3, mat4_from_quat, perspective_fov_rh, quat_from_mat4};

use crate::error::GraphicsError;
use crate::types::common::{
    BlendAlphaMode, BlendMode, ColorMask, CompareMode, CullMode, LoadAction, SaveAction,
    StencilAction, Winding,
};
use crate::types::texture::TextureFormat;

/// Maximum color attachments per canvas.
pub const MAX_COLOR_ATTACHMENTS: usize = 4;

/// Maximum simultaneous views (stereo + quad views).
pub const MAX_VIEWS: usize = 6;

/// Maximum transform stack depth.
pub const MAX_TRANSFORM_DEPTH: usize = 64;

// ============================================================================
// Canvas Descriptor
// ============================================================================

/// One color attachment of a canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorAttachment {
    /// Pixel format of the attachment.
    pub format: TextureFormat,
    /// What happens to existing contents when a pass begins.
    pub load: LoadAction,
    /// What happens to rendered contents when a pass ends.
    pub save: SaveAction,
    /// Clear color used when `load` is [`LoadAction::Clear`].
    pub clear: [f32; 4],
}

impl ColorAttachment {
    /// Create an attachment that clears to transparent black.
    pub fn new(format: TextureFormat) -> Self {
        Self {
            format,
            load: LoadAction::Clear,
            save: SaveAction::Keep,
            clear: [0.0; 4],
        }
    }

    /// Set the clear color.
    pub fn with_clear(mut self, clear: [f32; 4]) -> Self {
        self.clear = clear;
        self
    }

    /// Set the load action.
    pub fn with_load(mut self, load: LoadAction) -> Self {
        self.load = load;
        self
    }

    /// Set the save action.
    pub fn with_save(mut self, save: SaveAction) -> Self {
        self.save = save;
        self
    }
}

/// The depth/stencil attachment of a canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthAttachment {
    /// Depth format.
    pub format: TextureFormat,
    /// Load action for the depth aspect.
    pub load: LoadAction,
    /// Load action for the stencil aspect.
    pub stencil_load: LoadAction,
    /// Save action for the depth aspect.
    pub save: SaveAction,
    /// Save action for the stencil aspect.
    pub stencil_save: SaveAction,
    /// Depth clear value.
    pub clear: f32,
    /// Stencil clear value.
    pub stencil_clear: u8,
}

impl Default for DepthAttachment {
    fn default() -> Self {
        Self {
            format: TextureFormat::Depth16Unorm,
            load: LoadAction::Clear,
            stencil_load: LoadAction::Clear,
            // Depth is scratch data for most passes, drop it by default
            save: SaveAction::Discard,
            stencil_save: SaveAction::Discard,
            clear: 1.0,
            stencil_clear: 0,
        }
    }
}

impl DepthAttachment {
    /// Create a depth attachment with the given format.
    pub fn new(format: TextureFormat) -> Self {
        Self {
            format,
            ..Self::default()
        }
    }

    /// Keep the depth contents after the pass.
    pub fn saved(mut self) -> Self {
        self.save = SaveAction::Keep;
        self.stencil_save = SaveAction::Keep;
        self
    }
}

/// Descriptor for creating a canvas (render target).
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasDescriptor {
    /// Debug label for the canvas.
    pub label: Option<String>,
    /// Color attachments, outermost first.
    pub color: Vec<ColorAttachment>,
    /// Optional depth/stencil attachment.
    pub depth: Option<DepthAttachment>,
    /// MSAA sample count.
    pub samples: u32,
}

impl Default for CanvasDescriptor {
    fn default() -> Self {
        Self {
            label: None,
            color: Vec::new(),
            depth: Some(DepthAttachment::default()),
            samples: 4,
        }
    }
}

impl CanvasDescriptor {
    /// Create an empty canvas descriptor with default depth and 4x MSAA.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a color attachment.
    pub fn with_color(mut self, attachment: ColorAttachment) -> Result<Self, GraphicsError> {
        if self.color.len() == MAX_COLOR_ATTACHMENTS {
            return Err(GraphicsError::TooManyAttachments {
                count: self.color.len() + 1,
                max: MAX_COLOR_ATTACHMENTS,
            });
        }
        self.color.push(attachment);
        Ok(self)
    }

    /// Replace the depth attachment.
    pub fn with_depth(mut self, depth: DepthAttachment) -> Self {
        self.depth = Some(depth);
        self
    }

    /// Disable the depth attachment.
    pub fn without_depth(mut self) -> Self {
        self.depth = None;
        self
    }

    /// Set the MSAA sample count.
    pub fn with_samples(mut self, samples: u32) -> Self {
        self.samples = samples;
        self
    }

    /// Set the debug label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Validate the descriptor.
    pub fn validate(&self) -> Result<(), GraphicsError> {
        if self.color.is_empty() && self.depth.is_none() {
            return Err(GraphicsError::InvalidDescriptor(
                "canvas needs at least one attachment".to_string(),
            ));
        }
        if self.samples == 0 {
            return Err(GraphicsError::InvalidDescriptor(
                "sample count must be at least 1".to_string(),
            ));
        }
        for (i, att) in self.color.iter().enumerate() {
            if att.format.is_depth_stencil() {
                return Err(GraphicsError::InvalidDescriptor(format!(
                    "color attachment {i} has depth format"
                )));
            }
        }
        if let Some(depth) = &self.depth {
            if !depth.format.is_depth_stencil() {
                return Err(GraphicsError::InvalidDescriptor(
                    "depth attachment has color format".to_string(),
                ));
            }
        }
        Ok(())
    }
}

// ============================================================================
// Pass State
// ============================================================================

/// Color blend state for one target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Blend {
    /// Blend function.
    pub mode: BlendMode,
    /// Alpha handling.
    pub alpha: BlendAlphaMode,
}

/// Mutable render state tracked per canvas.
///
/// Mirrors what a pass encoder consumes; setters validate target indices
/// so bad state is caught at record time rather than at submit.
#[derive(Debug, Clone, PartialEq)]
pub struct PassState {
    blend: [Option<Blend>; MAX_COLOR_ATTACHMENTS],
    color_mask: [ColorMask; MAX_COLOR_ATTACHMENTS],
    cull: CullMode,
    depth_test: CompareMode,
    depth_write: bool,
    depth_nudge: (f32, f32, f32),
    depth_clamp: bool,
    stencil_test: CompareMode,
    stencil_value: u8,
    stencil_action: StencilAction,
    stencil_depth_fail: StencilAction,
    stencil_write_value: u8,
    winding: Winding,
    wireframe: bool,
    alpha_to_coverage: bool,
}

impl Default for PassState {
    fn default() -> Self {
        Self {
            blend: [Some(Blend::default()); MAX_COLOR_ATTACHMENTS],
            color_mask: [ColorMask::ALL; MAX_COLOR_ATTACHMENTS],
            cull: CullMode::None,
            depth_test: CompareMode::LessEqual,
            depth_write: true,
            depth_nudge: (0.0, 0.0, 0.0),
            depth_clamp: false,
            stencil_test: CompareMode::None,
            stencil_value: 0,
            stencil_action: StencilAction::Replace,
            stencil_depth_fail: StencilAction::Keep,
            stencil_write_value: 1,
            winding: Winding::CounterClockwise,
            wireframe: false,
            alpha_to_coverage: false,
        }
    }
}

fn check_target(target: usize) -> Result<(), GraphicsError> {
    if target >= MAX_COLOR_ATTACHMENTS {
        return Err(GraphicsError::InvalidAttachmentIndex {
            index: target,
            max: MAX_COLOR_ATTACHMENTS - 1,
        });
    }
    Ok(())
}

impl PassState {
    /// Create the default pass state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the blend state of one color target; `None` disables blending.
    pub fn set_blend(&mut self, target: usize, blend: Option<Blend>) -> Result<(), GraphicsError> {
        check_target(target)?;
        self.blend[target] = blend;
        Ok(())
    }

    /// Set the blend state of every color target.
    pub fn set_blend_all(&mut self, blend: Option<Blend>) {
        self.blend = [blend; MAX_COLOR_ATTACHMENTS];
    }

    /// The blend state of one color target.
    pub fn blend(&self, target: usize) -> Result<Option<Blend>, GraphicsError> {
        check_target(target)?;
        Ok(self.blend[target])
    }

    /// Set the color write mask of one target.
    pub fn set_color_mask(&mut self, target: usize, mask: ColorMask) -> Result<(), GraphicsError> {
        check_target(target)?;
        self.color_mask[target] = mask;
        Ok(())
    }

    /// Set the color write mask of every target.
    pub fn set_color_mask_all(&mut self, mask: ColorMask) {
        self.color_mask = [mask; MAX_COLOR_ATTACHMENTS];
    }

    /// The color write mask of one target.
    pub fn color_mask(&self, target: usize) -> Result<ColorMask, GraphicsError> {
        check_target(target)?;
        Ok(self.color_mask[target])
    }

    /// Set the face culling mode.
    pub fn set_cull_mode(&mut self, cull: CullMode) {
        self.cull = cull;
    }

    /// The face culling mode.
    pub fn cull_mode(&self) -> CullMode {
        self.cull
    }

    /// Set the depth test and whether depth writes happen.
    pub fn set_depth_test(&mut self, test: CompareMode, write: bool) {
        self.depth_test = test;
        self.depth_write = write;
    }

    /// The depth test and write flag.
    pub fn depth_test(&self) -> (CompareMode, bool) {
        (self.depth_test, self.depth_write)
    }

    /// Set the depth bias: constant nudge, slope-scaled nudge, and clamp.
    pub fn set_depth_nudge(&mut self, nudge: f32, sloped: f32, clamp: f32) {
        self.depth_nudge = (nudge, sloped, clamp);
    }

    /// The depth bias parameters.
    pub fn depth_nudge(&self) -> (f32, f32, f32) {
        self.depth_nudge
    }

    /// Enable or disable depth clamping.
    pub fn set_depth_clamp(&mut self, clamp: bool) {
        self.depth_clamp = clamp;
    }

    /// Whether depth clamping is enabled.
    pub fn depth_clamp(&self) -> bool {
        self.depth_clamp
    }

    /// Set the stencil test; [`CompareMode::None`] disables it.
    pub fn set_stencil_test(&mut self, test: CompareMode, value: u8) {
        self.stencil_test = test;
        self.stencil_value = value;
    }

    /// The stencil test and reference value.
    pub fn stencil_test(&self) -> (CompareMode, u8) {
        (self.stencil_test, self.stencil_value)
    }

    /// Configure how stencil-marking draws write the buffer: the action
    /// on pass, the action when the depth test fails, and the value.
    pub fn set_stencil_write(&mut self, action: StencilAction, depth_fail: StencilAction, value: u8) {
        self.stencil_action = action;
        self.stencil_depth_fail = depth_fail;
        self.stencil_write_value = value;
    }

    /// The stencil write configuration.
    pub fn stencil_write(&self) -> (StencilAction, StencilAction, u8) {
        (self.stencil_action, self.stencil_depth_fail, self.stencil_write_value)
    }

    /// Set the front-face winding.
    pub fn set_winding(&mut self, winding: Winding) {
        self.winding = winding;
    }

    /// The front-face winding.
    pub fn winding(&self) -> Winding {
        self.winding
    }

    /// Enable or disable wireframe fill.
    pub fn set_wireframe(&mut self, wireframe: bool) {
        self.wireframe = wireframe;
    }

    /// Whether wireframe fill is enabled.
    pub fn is_wireframe(&self) -> bool {
        self.wireframe
    }

    /// Enable or disable alpha-to-coverage.
    pub fn set_alpha_to_coverage(&mut self, enabled: bool) {
        self.alpha_to_coverage = enabled;
    }

    /// Whether alpha-to-coverage is enabled.
    pub fn alpha_to_coverage(&self) -> bool {
        self.alpha_to_coverage
    }
}

// ============================================================================
// Transform Stack
// ============================================================================

/// A model transform stack with balanced push/pop.
///
/// There is always a current transform; [`pop`](Self::pop) below the
/// base is an error, as is pushing past [`MAX_TRANSFORM_DEPTH`].
#[derive(Debug, Clone, PartialEq)]
pub struct TransformStack {
    current: Mat4,
    saved: Vec<Mat4>,
}

impl Default for TransformStack {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformStack {
    /// Create a stack holding the identity transform.
    pub fn new() -> Self {
        Self {
            current: Mat4::identity(),
            saved: Vec::new(),
        }
    }

    /// Save the current transform so a later pop can restore it.
    pub fn push(&mut self) -> Result<(), GraphicsError> {
        if self.saved.len() + 1 == MAX_TRANSFORM_DEPTH {
            return Err(GraphicsError::TransformStackOverflow);
        }
        self.saved.push(self.current);
        Ok(())
    }

    /// Restore the transform saved by the matching push.
    pub fn pop(&mut self) -> Result<(), GraphicsError> {
        self.current = self
            .saved
            .pop()
            .ok_or(GraphicsError::TransformStackUnderflow)?;
        Ok(())
    }

    /// Reset the current transform to identity.
    pub fn origin(&mut self) {
        self.current = Mat4::identity();
    }

    /// Translate the current transform.
    pub fn translate(&mut self, translation: Vec3) {
        self.current *= Mat4::new_translation(&translation);
    }

    /// Rotate the current transform by a unit quaternion.
    pub fn rotate(&mut self, rotation: Quat) {
        self.current *= mat4_from_quat(rotation);
    }

    /// Scale the current transform.
    pub fn scale(&mut self, scale: Vec3) {
        self.current *= Mat4::new_nonuniform_scaling(&scale);
    }

    /// Multiply the current transform by an arbitrary matrix.
    pub fn transform(&mut self, matrix: &Mat4) {
        self.current *= *matrix;
    }

    /// The current transform.
    pub fn current(&self) -> &Mat4 {
        &self.current
    }

    /// Current stack depth (1 = just the base transform).
    pub fn depth(&self) -> usize {
        self.saved.len() + 1
    }
}

// ============================================================================
// Canvas
// ============================================================================

// Inverse of a rotation+translation matrix, without a general solve.
fn rigid_inverse(m: &Mat4) -> Mat4 {
    let r = m.fixed_view::<3, 3>(0, 0).transpose();
    let t = Vec3::new(m[(0, 3)], m[(1, 3)], m[(2, 3)]);
    let it = -(r * t);
    let mut out = Mat4::identity();
    out.fixed_view_mut::<3, 3>(0, 0).copy_from(&r);
    out[(0, 3)] = it.x;
    out[(1, 3)] = it.y;
    out[(2, 3)] = it.z;
    out
}

/// A render destination plus the state recorded against it.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    descriptor: CanvasDescriptor,
    state: PassState,
    transforms: TransformStack,
    view: [Mat4; MAX_VIEWS],
    projection: [Mat4; MAX_VIEWS],
    active: bool,
}

fn check_view(index: usize) -> Result<(), GraphicsError> {
    if index >= MAX_VIEWS {
        return Err(GraphicsError::InvalidViewIndex {
            index,
            max: MAX_VIEWS - 1,
        });
    }
    Ok(())
}

impl Canvas {
    /// Create a canvas from a validated descriptor.
    pub fn new(descriptor: CanvasDescriptor) -> Result<Self, GraphicsError> {
        descriptor.validate()?;
        log::debug!(
            "canvas created: {} color attachment(s), depth {}, {}x msaa",
            descriptor.color.len(),
            if descriptor.depth.is_some() { "on" } else { "off" },
            descriptor.samples
        );
        Ok(Self {
            descriptor,
            state: PassState::default(),
            transforms: TransformStack::new(),
            view: [Mat4::identity(); MAX_VIEWS],
            projection: [Mat4::identity(); MAX_VIEWS],
            active: false,
        })
    }

    /// The canvas descriptor.
    pub fn descriptor(&self) -> &CanvasDescriptor {
        &self.descriptor
    }

    /// The render state.
    pub fn state(&self) -> &PassState {
        &self.state
    }

    /// The render state, mutable.
    pub fn state_mut(&mut self) -> &mut PassState {
        &mut self.state
    }

    /// The transform stack.
    pub fn transforms(&self) -> &TransformStack {
        &self.transforms
    }

    /// The transform stack, mutable.
    pub fn transforms_mut(&mut self) -> &mut TransformStack {
        &mut self.transforms
    }

    /// Begin recording a pass. Resets the transform stack.
    pub fn begin(&mut self) -> Result<(), GraphicsError> {
        if self.active {
            return Err(GraphicsError::PassActive);
        }
        self.transforms = TransformStack::new();
        self.active = true;
        Ok(())
    }

    /// Finish the active pass.
    pub fn finish(&mut self) -> Result<(), GraphicsError> {
        if !self.active {
            return Err(GraphicsError::PassNotActive);
        }
        self.active = false;
        Ok(())
    }

    /// Whether a pass is being recorded.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Set a view's camera pose; the stored view matrix is its inverse.
    ///
    /// `orientation` must be a unit quaternion.
    pub fn set_view_pose(
        &mut self,
        index: usize,
        position: Vec3,
        orientation: Quat,
    ) -> Result<(), GraphicsError> {
        check_view(index)?;
        let mut pose = mat4_from_quat(orientation);
        pose[(0, 3)] = position.x;
        pose[(1, 3)] = position.y;
        pose[(2, 3)] = position.z;
        self.view[index] = rigid_inverse(&pose);
        Ok(())
    }

    /// Recover a view's camera pose from its view matrix.
    pub fn view_pose(&self, index: usize) -> Result<(Vec3, Quat), GraphicsError> {
        check_view(index)?;
        let pose = rigid_inverse(&self.view[index]);
        let position = Vec3::new(pose[(0, 3)], pose[(1, 3)], pose[(2, 3)]);
        Ok((position, quat_from_mat4(&pose)))
    }

    /// Set a view matrix directly.
    pub fn set_view_matrix(&mut self, index: usize, matrix: Mat4) -> Result<(), GraphicsError> {
        check_view(index)?;
        self.view[index] = matrix;
        Ok(())
    }

    /// A view matrix.
    pub fn view_matrix(&self, index: usize) -> Result<&Mat4, GraphicsError> {
        check_view(index)?;
        Ok(&self.view[index])
    }

    /// Set a view's projection matrix directly.
    pub fn set_projection(&mut self, index: usize, matrix: Mat4) -> Result<(), GraphicsError> {
        check_view(index)?;
        self.projection[index] = matrix;
        Ok(())
    }

    /// Set a view's projection from four half-angles (radians).
    #[allow(clippy::too_many_arguments)]
    pub fn set_projection_fov(
        &mut self,
        index: usize,
        left: f32,
        right: f32,
        up: f32,
        down: f32,
        znear: f32,
        zfar: f32,
    ) -> Result<(), GraphicsError> {
        check_view(index)?;
        self.projection[index] = perspective_fov_rh(left, right, up, down, znear, zfar);
        Ok(())
    }

    /// A view's projection matrix.
    pub fn projection(&self, index: usize) -> Result<&Mat4, GraphicsError> {
        check_view(index)?;
        Ok(&self.projection[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parallax_core::math::{quat_from_angle_axis, quat_rotate_vec3};
    use std::f32::consts::FRAC_PI_2;

    fn test_canvas() -> Canvas {
        Canvas::new(
            CanvasDescriptor::new()
                .with_color(ColorAttachment::new(TextureFormat::Rgba8Unorm))
                .unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn descriptor_defaults() {
        let desc = CanvasDescriptor::new();
        assert_eq!(desc.samples, 4);
        let depth = desc.depth.unwrap();
        assert_eq!(depth.format, TextureFormat::Depth16Unorm);
        assert_eq!(depth.load, LoadAction::Clear);
        assert_eq!(depth.save, SaveAction::Discard);
        assert_eq!(depth.clear, 1.0);
    }

    #[test]
    fn attachment_cap() {
        let mut desc = CanvasDescriptor::new();
        for _ in 0..MAX_COLOR_ATTACHMENTS {
            desc = desc
                .with_color(ColorAttachment::new(TextureFormat::Rgba8Unorm))
                .unwrap();
        }
        let err = desc
            .with_color(ColorAttachment::new(TextureFormat::Rgba8Unorm))
            .unwrap_err();
        assert!(matches!(err, GraphicsError::TooManyAttachments { .. }));
    }

    #[test]
    fn descriptor_validation() {
        // No attachments at all
        let empty = CanvasDescriptor::new().without_depth();
        assert!(empty.validate().is_err());

        // Depth format in a color slot
        let bad = CanvasDescriptor::new()
            .with_color(ColorAttachment::new(TextureFormat::Depth16Unorm))
            .unwrap();
        assert!(bad.validate().is_err());

        // Color format in the depth slot
        let bad = CanvasDescriptor::new().with_depth(DepthAttachment::new(TextureFormat::R8Unorm));
        assert!(bad.validate().is_err());
    }

    #[test]
    fn pass_lifecycle() {
        let mut canvas = test_canvas();
        assert!(!canvas.is_active());
        assert_eq!(canvas.finish(), Err(GraphicsError::PassNotActive));

        canvas.begin().unwrap();
        assert!(canvas.is_active());
        assert_eq!(canvas.begin(), Err(GraphicsError::PassActive));

        canvas.finish().unwrap();
        assert!(!canvas.is_active());
    }

    #[test]
    fn begin_resets_transforms() {
        let mut canvas = test_canvas();
        canvas.begin().unwrap();
        canvas.transforms_mut().translate(Vec3::new(1.0, 0.0, 0.0));
        canvas.transforms_mut().push().unwrap();
        canvas.finish().unwrap();

        canvas.begin().unwrap();
        assert_eq!(canvas.transforms().depth(), 1);
        assert_eq!(*canvas.transforms().current(), Mat4::identity());
    }

    #[test]
    fn state_defaults() {
        let state = PassState::default();
        assert_eq!(state.blend(0).unwrap(), Some(Blend::default()));
        assert_eq!(state.color_mask(3).unwrap(), ColorMask::ALL);
        assert_eq!(state.depth_test(), (CompareMode::LessEqual, true));
        assert_eq!(state.cull_mode(), CullMode::None);
        assert_eq!(state.winding(), Winding::CounterClockwise);
        assert_eq!(state.stencil_test(), (CompareMode::None, 0));
        assert_eq!(
            state.stencil_write(),
            (StencilAction::Replace, StencilAction::Keep, 1)
        );
        assert!(!state.is_wireframe());
    }

    #[test]
    fn stencil_write_config() {
        let mut state = PassState::default();
        state.set_stencil_write(StencilAction::IncrementWrap, StencilAction::Invert, 3);
        assert_eq!(
            state.stencil_write(),
            (StencilAction::IncrementWrap, StencilAction::Invert, 3)
        );
        state.set_stencil_test(CompareMode::Equal, 3);
        assert_eq!(state.stencil_test(), (CompareMode::Equal, 3));
    }

    #[test]
    fn blend_targets_validated() {
        let mut state = PassState::default();
        assert!(state.set_blend(3, None).is_ok());
        assert_eq!(
            state.set_blend(4, None),
            Err(GraphicsError::InvalidAttachmentIndex { index: 4, max: 3 })
        );
        assert!(state.blend(7).is_err());

        state.set_blend_all(Some(Blend {
            mode: BlendMode::Add,
            alpha: BlendAlphaMode::Premultiplied,
        }));
        for target in 0..MAX_COLOR_ATTACHMENTS {
            assert_eq!(state.blend(target).unwrap().unwrap().mode, BlendMode::Add);
        }
    }

    #[test]
    fn transform_stack_balance() {
        let mut stack = TransformStack::new();
        assert_eq!(stack.pop(), Err(GraphicsError::TransformStackUnderflow));

        stack.translate(Vec3::new(1.0, 2.0, 3.0));
        stack.push().unwrap();
        stack.translate(Vec3::new(10.0, 0.0, 0.0));
        assert_eq!(stack.current()[(0, 3)], 11.0);

        stack.pop().unwrap();
        assert_eq!(stack.current()[(0, 3)], 1.0);
    }

    #[test]
    fn transform_stack_overflow() {
        let mut stack = TransformStack::new();
        for _ in 1..MAX_TRANSFORM_DEPTH {
            stack.push().unwrap();
        }
        assert_eq!(stack.push(), Err(GraphicsError::TransformStackOverflow));
    }

    #[test]
    fn transforms_compose_locally() {
        let mut stack = TransformStack::new();
        stack.translate(Vec3::new(1.0, 0.0, 0.0));
        stack.rotate(quat_from_angle_axis(FRAC_PI_2, Vec3::new(0.0, 1.0, 0.0)));
        stack.scale(Vec3::new(2.0, 2.0, 2.0));

        // Local-space composition: point (1,0,0) scales to (2,0,0),
        // rotates to (0,0,-2), then translates to (1,0,-2)
        let p = stack.current() * parallax_core::math::Vec4::new(1.0, 0.0, 0.0, 1.0);
        assert!((p.x - 1.0).abs() < 1e-5);
        assert!((p.z - (-2.0)).abs() < 1e-5);
    }

    #[test]
    fn view_pose_roundtrip() {
        let mut canvas = test_canvas();
        let position = Vec3::new(1.0, 2.0, 3.0);
        let orientation = quat_from_angle_axis(0.7, Vec3::new(0.0, 1.0, 0.0));
        canvas.set_view_pose(0, position, orientation).unwrap();

        let (p, q) = canvas.view_pose(0).unwrap();
        assert!((p - position).norm() < 1e-5);
        let v = Vec3::new(0.0, 0.0, -1.0);
        assert!((quat_rotate_vec3(q, v) - quat_rotate_vec3(orientation, v)).norm() < 1e-4);
    }

    #[test]
    fn view_index_validated() {
        let mut canvas = test_canvas();
        assert!(canvas.set_view_matrix(5, Mat4::identity()).is_ok());
        assert_eq!(
            canvas.set_view_matrix(6, Mat4::identity()),
            Err(GraphicsError::InvalidViewIndex { index: 6, max: 5 })
        );
        assert!(canvas.projection(6).is_err());
    }

    #[test]
    fn projection_fov_set() {
        let mut canvas = test_canvas();
        canvas
            .set_projection_fov(0, 0.6, 0.6, 0.5, 0.5, 0.1, 100.0)
            .unwrap();
        let proj = canvas.projection(0).unwrap();
        // Perspective matrices put -1 in the w row
        assert_eq!(proj[(3, 2)], -1.0);
    }
}
