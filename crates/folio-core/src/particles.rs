#![forbid(unsafe_code)]

//! Decorative particle field: point cloud, camera and per-frame pose.
//!
//! Everything here is GPU-agnostic. The web crate uploads
//! [`ParticleField::bytes`] once as an instance buffer and writes
//! [`FrameUniforms`] every animation frame.
//!
//! # Invariants
//!
//! 1. The point count and buffer layout are fixed at generation time.
//! 2. Every coordinate lies in `[-spread / 2, spread / 2]`.
//! 3. Pointer offsets are clamped to `[-1, 1]` on both axes.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::config::ParticleConfig;

/// Floats per point (x, y, z).
pub const POINT_COMPONENTS: usize = 3;

/// Byte stride of one point in the instance buffer.
pub const POINT_STRIDE: u64 = (POINT_COMPONENTS * std::mem::size_of::<f32>()) as u64;

// ---------------------------------------------------------------------------
// Random source
// ---------------------------------------------------------------------------

/// Small linear-congruential generator.
///
/// Deterministic for a given seed so fields can be reproduced in tests and
/// benches.
#[derive(Debug, Clone)]
pub struct Lcg {
    state: u64,
}

impl Lcg {
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Next value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1);
        (self.state >> 33) as f64 / (1u64 << 31) as f64
    }
}

// ---------------------------------------------------------------------------
// Point cloud
// ---------------------------------------------------------------------------

/// Fixed-size cloud of points scattered uniformly in a centered cube.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleField {
    positions: Vec<f32>,
}

impl ParticleField {
    #[must_use]
    pub fn generate(count: u32, spread: f32, seed: u64) -> Self {
        let mut rng = Lcg::new(seed);
        let len = count as usize * POINT_COMPONENTS;
        let positions = (0..len)
            .map(|_| ((rng.next_f64() - 0.5) * f64::from(spread)) as f32)
            .collect();
        Self { positions }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len() / POINT_COMPONENTS
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Flat `[x0, y0, z0, x1, ...]` coordinates.
    #[must_use]
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// Instance buffer contents.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }
}

// ---------------------------------------------------------------------------
// Pointer and pose
// ---------------------------------------------------------------------------

/// Map a client coordinate to `[-1, 1]` across a viewport extent.
///
/// A degenerate viewport maps to the center.
#[must_use]
pub fn normalize_pointer(client: f64, extent: f64) -> f32 {
    if extent <= 0.0 || !extent.is_finite() || !client.is_finite() {
        return 0.0;
    }
    ((client / extent) * 2.0 - 1.0).clamp(-1.0, 1.0) as f32
}

/// Last known pointer position, normalized to the viewport.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct PointerOffset {
    pub x: f32,
    pub y: f32,
}

impl PointerOffset {
    #[must_use]
    pub fn from_client(client_x: f64, client_y: f64, width: f64, height: f64) -> Self {
        Self {
            x: normalize_pointer(client_x, width),
            y: normalize_pointer(client_y, height),
        }
    }
}

/// Rotation and vertical offset of the whole field at one instant.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct FieldPose {
    pub rotation_x: f32,
    pub rotation_y: f32,
    pub offset_y: f32,
}

impl FieldPose {
    /// Compute the pose from the page clock (milliseconds) and pointer.
    #[must_use]
    pub fn at(now_ms: f64, pointer: PointerOffset, cfg: &ParticleConfig) -> Self {
        let time = (now_ms * f64::from(cfg.time_scale)) as f32;
        Self {
            rotation_y: time * cfg.spin + pointer.x * cfg.pointer_tilt,
            rotation_x: pointer.y * cfg.pointer_tilt,
            offset_y: (time * cfg.breathe_rate).sin() * cfg.breathe_amplitude,
        }
    }

    /// Model matrix: translate, then rotate X, then rotate Y.
    #[must_use]
    pub fn model(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(0.0, self.offset_y, 0.0))
            * Mat4::from_rotation_x(self.rotation_x)
            * Mat4::from_rotation_y(self.rotation_y)
    }
}

// ---------------------------------------------------------------------------
// Camera
// ---------------------------------------------------------------------------

/// Fixed perspective camera on the +Z axis looking at the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    fov_y_rad: f32,
    aspect: f32,
    near: f32,
    far: f32,
    z: f32,
}

impl Camera {
    #[must_use]
    pub fn new(cfg: &ParticleConfig, aspect: f32) -> Self {
        Self {
            fov_y_rad: cfg.fov_deg.to_radians(),
            aspect: sanitize_aspect(aspect),
            near: cfg.near,
            far: cfg.far,
            z: cfg.camera_z,
        }
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = sanitize_aspect(aspect);
    }

    #[must_use]
    pub const fn aspect(&self) -> f32 {
        self.aspect
    }

    #[must_use]
    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_rad, self.aspect, self.near, self.far)
    }

    #[must_use]
    pub fn view(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(0.0, 0.0, -self.z))
    }
}

fn sanitize_aspect(aspect: f32) -> f32 {
    if aspect.is_finite() && aspect > 0.0 {
        aspect
    } else {
        1.0
    }
}

// ---------------------------------------------------------------------------
// Uniforms
// ---------------------------------------------------------------------------

/// Per-frame uniform block (WGSL layout: two `mat4x4<f32>`, two `vec4<f32>`).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct FrameUniforms {
    pub model_view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    /// Linear RGB plus opacity.
    pub color: [f32; 4],
    /// `x`: point size in view units; `yzw` reserved.
    pub params: [f32; 4],
}

/// Unpack `0xRRGGBB` into `[r, g, b]` in `[0, 1]`.
#[must_use]
pub fn unpack_rgb(color: u32) -> [f32; 3] {
    let channel = |shift: u32| ((color >> shift) & 0xFF) as f32 / 255.0;
    [channel(16), channel(8), channel(0)]
}

// ---------------------------------------------------------------------------
// Animator
// ---------------------------------------------------------------------------

/// Per-frame state of the field: camera, latest pointer and material.
#[derive(Debug, Clone)]
pub struct FieldAnimator {
    cfg: ParticleConfig,
    camera: Camera,
    pointer: PointerOffset,
}

impl FieldAnimator {
    #[must_use]
    pub fn new(cfg: ParticleConfig, aspect: f32) -> Self {
        let camera = Camera::new(&cfg, aspect);
        Self {
            cfg,
            camera,
            pointer: PointerOffset::default(),
        }
    }

    /// Latest pointer sample; last write wins.
    pub fn set_pointer(&mut self, pointer: PointerOffset) {
        self.pointer = pointer;
    }

    #[must_use]
    pub const fn pointer(&self) -> PointerOffset {
        self.pointer
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        if height > 0.0 {
            self.camera.set_aspect((width / height) as f32);
        }
    }

    #[must_use]
    pub const fn camera(&self) -> &Camera {
        &self.camera
    }

    #[must_use]
    pub fn pose(&self, now_ms: f64) -> FieldPose {
        FieldPose::at(now_ms, self.pointer, &self.cfg)
    }

    /// Uniforms for the frame at `now_ms`.
    #[must_use]
    pub fn frame(&self, now_ms: f64) -> FrameUniforms {
        let model_view = self.camera.view() * self.pose(now_ms).model();
        let [r, g, b] = unpack_rgb(self.cfg.color);
        FrameUniforms {
            model_view: model_view.to_cols_array_2d(),
            projection: self.camera.projection().to_cols_array_2d(),
            color: [r, g, b, self.cfg.opacity],
            params: [self.cfg.point_size, 0.0, 0.0, 0.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const EPS: f32 = 1e-5;

    #[test]
    fn lcg_is_deterministic_and_in_unit_interval() {
        let mut a = Lcg::new(42);
        let mut b = Lcg::new(42);
        for _ in 0..1000 {
            let x = a.next_f64();
            assert_eq!(x, b.next_f64());
            assert!((0.0..1.0).contains(&x));
        }
    }

    #[test]
    fn field_has_fixed_count_and_layout() {
        let field = ParticleField::generate(1800, 15.0, 7);
        assert_eq!(field.len(), 1800);
        assert_eq!(field.positions().len(), 5400);
        assert_eq!(field.bytes().len() as u64, 1800 * POINT_STRIDE);
    }

    #[test]
    fn field_stays_inside_cube() {
        let field = ParticleField::generate(500, 15.0, 99);
        assert!(field.positions().iter().all(|c| (-7.5..=7.5).contains(c)));
    }

    #[test]
    fn same_seed_same_field() {
        assert_eq!(
            ParticleField::generate(64, 15.0, 3),
            ParticleField::generate(64, 15.0, 3)
        );
        assert_ne!(
            ParticleField::generate(64, 15.0, 3),
            ParticleField::generate(64, 15.0, 4)
        );
    }

    #[test]
    fn pointer_normalization() {
        assert_eq!(normalize_pointer(0.0, 800.0), -1.0);
        assert_eq!(normalize_pointer(400.0, 800.0), 0.0);
        assert_eq!(normalize_pointer(800.0, 800.0), 1.0);
        assert_eq!(normalize_pointer(2000.0, 800.0), 1.0);
        assert_eq!(normalize_pointer(10.0, 0.0), 0.0);
    }

    #[test]
    fn pose_follows_time_and_pointer() {
        let cfg = ParticleConfig::default();
        let pointer = PointerOffset { x: 1.0, y: -1.0 };
        let pose = FieldPose::at(5000.0, pointer, &cfg);
        // time = 5000 * 0.0002 = 1.0
        assert!((pose.rotation_y - (0.1 + 0.05)).abs() < EPS);
        assert!((pose.rotation_x + 0.05).abs() < EPS);
        assert!((pose.offset_y - 2.0f32.sin() * 0.1).abs() < EPS);
    }

    #[test]
    fn pose_at_origin_is_identity() {
        let pose = FieldPose::at(0.0, PointerOffset::default(), &ParticleConfig::default());
        assert_eq!(pose, FieldPose::default());
        assert_eq!(pose.model(), Mat4::IDENTITY);
    }

    #[test]
    fn camera_aspect_rejects_degenerate_values() {
        let mut cam = Camera::new(&ParticleConfig::default(), 0.0);
        assert_eq!(cam.aspect(), 1.0);
        cam.set_aspect(f32::NAN);
        assert_eq!(cam.aspect(), 1.0);
        cam.set_aspect(1.5);
        assert_eq!(cam.aspect(), 1.5);
    }

    #[test]
    fn view_places_origin_in_front_of_camera() {
        let cam = Camera::new(&ParticleConfig::default(), 1.0);
        let p = cam.view().transform_point3(Vec3::ZERO);
        assert!((p.z + 3.0).abs() < EPS);
    }

    #[test]
    fn resize_updates_aspect() {
        let mut anim = FieldAnimator::new(ParticleConfig::default(), 1.0);
        anim.resize(1600.0, 800.0);
        assert_eq!(anim.camera().aspect(), 2.0);
        anim.resize(100.0, 0.0);
        assert_eq!(anim.camera().aspect(), 2.0);
    }

    #[test]
    fn uniform_layout_is_160_bytes() {
        assert_eq!(std::mem::size_of::<FrameUniforms>(), 160);
        let anim = FieldAnimator::new(ParticleConfig::default(), 1.0);
        let u = anim.frame(0.0);
        assert_eq!(bytemuck::bytes_of(&u).len(), 160);
    }

    #[test]
    fn frame_carries_material() {
        let anim = FieldAnimator::new(ParticleConfig::default(), 1.0);
        let u = anim.frame(0.0);
        assert!((u.color[0] - 226.0 / 255.0).abs() < EPS);
        assert!((u.color[1] - 232.0 / 255.0).abs() < EPS);
        assert!((u.color[2] - 240.0 / 255.0).abs() < EPS);
        assert_eq!(u.color[3], 0.8);
        assert_eq!(u.params[0], 0.015);
        // View translation lands in the last column.
        assert!((u.model_view[3][2] + 3.0).abs() < EPS);
    }

    #[test]
    fn unpack_rgb_channels() {
        assert_eq!(unpack_rgb(0xFF0000), [1.0, 0.0, 0.0]);
        assert_eq!(unpack_rgb(0x0000FF), [0.0, 0.0, 1.0]);
    }
}
