//! Math type aliases and helper functions.
//!
//! Rendering math is always f32. Quaternions are stored as `[x, y, z, w]`
//! in memory; use [`quat_from_xyzw`] or `Quaternion::new(w, x, y, z)` to
//! construct one.

pub use nalgebra;

/// 2D vector (f32).
pub type Vec2 = nalgebra::Vector2<f32>;

/// 3D vector (f32).
pub type Vec3 = nalgebra::Vector3<f32>;

/// 4D vector (f32).
pub type Vec4 = nalgebra::Vector4<f32>;

/// 4x4 matrix (f32).
pub type Mat4 = nalgebra::Matrix4<f32>;

/// Quaternion (f32). Stored as `[x, y, z, w]` in memory.
pub type Quat = nalgebra::Quaternion<f32>;

// ===== Quaternion helpers =====

/// Create a quaternion from x, y, z, w components.
pub fn quat_from_xyzw(x: f32, y: f32, z: f32, w: f32) -> Quat {
    nalgebra::Quaternion::new(w, x, y, z)
}

/// Convert a quaternion to a `[x, y, z, w]` array.
pub fn quat_to_array(q: Quat) -> [f32; 4] {
    [q.coords.x, q.coords.y, q.coords.z, q.coords.w]
}

/// Create a quaternion rotating by `angle` radians around `axis`.
///
/// The axis is normalized first; a zero axis yields the identity rotation.
pub fn quat_from_angle_axis(angle: f32, axis: Vec3) -> Quat {
    let len = axis.norm();
    if len == 0.0 {
        return Quat::identity();
    }
    let axis = axis / len;
    let s = (angle * 0.5).sin();
    let c = (angle * 0.5).cos();
    quat_from_xyzw(s * axis.x, s * axis.y, s * axis.z, c)
}

/// Build the shortest-arc rotation taking `forward` onto `up`.
///
/// The result is not normalized; callers that need a unit quaternion
/// should pass it through [`quat_normalize`].
pub fn quat_from_direction(forward: Vec3, up: Vec3) -> Quat {
    let len = forward.norm();
    let f = if len == 0.0 { forward } else { forward / len };
    let xyz = f.cross(&up);
    quat_from_xyzw(xyz.x, xyz.y, xyz.z, 1.0 + f.dot(&up))
}

/// Extract a rotation quaternion from the upper 3x3 of a transform matrix.
///
/// Uses per-component square roots with sign correction from the
/// off-diagonal elements, so it stays stable for all rotation angles.
pub fn quat_from_mat4(m: &Mat4) -> Quat {
    let x = (1.0 + m[(0, 0)] - m[(1, 1)] - m[(2, 2)]).max(0.0).sqrt() / 2.0;
    let y = (1.0 - m[(0, 0)] + m[(1, 1)] - m[(2, 2)]).max(0.0).sqrt() / 2.0;
    let z = (1.0 - m[(0, 0)] - m[(1, 1)] + m[(2, 2)]).max(0.0).sqrt() / 2.0;
    let w = (1.0 + m[(0, 0)] + m[(1, 1)] + m[(2, 2)]).max(0.0).sqrt() / 2.0;
    let x = if m[(1, 2)] - m[(2, 1)] > 0.0 { -x } else { x };
    let y = if m[(2, 0)] - m[(0, 2)] > 0.0 { -y } else { y };
    let z = if m[(0, 1)] - m[(1, 0)] > 0.0 { -z } else { z };
    quat_from_xyzw(x, y, z, w)
}

/// Length of a quaternion.
pub fn quat_length(q: Quat) -> f32 {
    q.coords.norm()
}

/// Normalize a quaternion. A zero quaternion is returned unchanged.
pub fn quat_normalize(q: Quat) -> Quat {
    let len = quat_length(q);
    if len == 0.0 {
        return q;
    }
    Quat::from(q.coords / len)
}

/// Rotate a vector by a unit quaternion.
pub fn quat_rotate_vec3(q: Quat, v: Vec3) -> Vec3 {
    let s = q.coords.w;
    let u = Vec3::new(q.coords.x, q.coords.y, q.coords.z);
    let c = u.cross(&v);
    u * (2.0 * u.dot(&v)) + v * (s * s - u.dot(&u)) + c * (2.0 * s)
}

/// Extract the rotation angle and axis of a quaternion.
///
/// Quaternions with |w| > 1 are normalized first. Near-identity rotations
/// return the raw vector part as the axis.
pub fn quat_to_angle_axis(q: Quat) -> (f32, Vec3) {
    let q = if q.coords.w > 1.0 || q.coords.w < -1.0 {
        quat_normalize(q)
    } else {
        q
    };
    let w = q.coords.w;
    let s = (1.0 - w * w).max(0.0).sqrt();
    let s = if s < 1e-4 { 1.0 } else { 1.0 / s };
    let angle = 2.0 * w.acos();
    (angle, Vec3::new(q.coords.x * s, q.coords.y * s, q.coords.z * s))
}

// ===== Matrix helpers =====

/// Build a translation-only 4x4 matrix.
pub fn mat4_from_translation(t: Vec3) -> Mat4 {
    Mat4::new_translation(&t)
}

/// Build a rotation matrix from a unit quaternion.
pub fn mat4_from_quat(q: Quat) -> Mat4 {
    nalgebra::UnitQuaternion::new_unchecked(q).to_homogeneous()
}

/// Build a right-handed perspective projection with depth range [0, 1]
/// (wgpu/Vulkan convention).
pub fn perspective_rh(yfov: f32, aspect: f32, znear: f32, zfar: f32) -> Mat4 {
    let f = 1.0 / (yfov / 2.0).tan();
    let nf = 1.0 / (znear - zfar);
    #[rustfmt::skip]
    let result = Mat4::new(
        f / aspect, 0.0,  0.0,              0.0,
        0.0,        f,    0.0,              0.0,
        0.0,        0.0,  zfar * nf,        znear * zfar * nf,
        0.0,        0.0,  -1.0,             0.0,
    );
    result
}

/// Build an asymmetric perspective projection from four half-angles
/// (radians, all positive), depth range [0, 1].
///
/// This is the projection shape VR runtimes report per eye; symmetric
/// inputs reduce to [`perspective_rh`] with `yfov = up + down`.
pub fn perspective_fov_rh(
    left: f32,
    right: f32,
    up: f32,
    down: f32,
    znear: f32,
    zfar: f32,
) -> Mat4 {
    let tan_l = left.tan();
    let tan_r = right.tan();
    let tan_u = up.tan();
    let tan_d = down.tan();
    let w = tan_l + tan_r;
    let h = tan_u + tan_d;
    let nf = 1.0 / (znear - zfar);
    #[rustfmt::skip]
    let result = Mat4::new(
        2.0 / w, 0.0,     (tan_r - tan_l) / w, 0.0,
        0.0,     2.0 / h, (tan_u - tan_d) / h, 0.0,
        0.0,     0.0,     zfar * nf,           znear * zfar * nf,
        0.0,     0.0,     -1.0,                0.0,
    );
    result
}

/// Right-handed look-at view matrix.
pub fn look_at_rh(eye: &Vec3, target: &Vec3, up: &Vec3) -> Mat4 {
    let eye_point = nalgebra::Point3::from(*eye);
    let target_point = nalgebra::Point3::from(*target);
    nalgebra::Isometry3::look_at_rh(&eye_point, &target_point, up).to_homogeneous()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn angle_axis_roundtrip() {
        let q = quat_from_angle_axis(1.2, Vec3::new(0.0, 1.0, 0.0));
        let (angle, axis) = quat_to_angle_axis(q);
        assert!((angle - 1.2).abs() < 1e-5);
        assert!((axis - Vec3::new(0.0, 1.0, 0.0)).norm() < 1e-5);
    }

    #[test]
    fn angle_axis_normalizes_input_axis() {
        let q = quat_from_angle_axis(FRAC_PI_2, Vec3::new(0.0, 10.0, 0.0));
        let r = quat_from_angle_axis(FRAC_PI_2, Vec3::new(0.0, 1.0, 0.0));
        assert!((q.coords - r.coords).norm() < 1e-6);
    }

    #[test]
    fn zero_axis_is_identity() {
        let q = quat_from_angle_axis(1.0, Vec3::zeros());
        assert_eq!(quat_to_array(q), [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn rotate_y_90() {
        let q = quat_from_angle_axis(FRAC_PI_2, Vec3::new(0.0, 1.0, 0.0));
        let v = quat_rotate_vec3(q, Vec3::new(1.0, 0.0, 0.0));
        assert!(v.x.abs() < 1e-5);
        assert!((v.z - (-1.0)).abs() < 1e-5);
    }

    #[test]
    fn from_mat4_recovers_rotation() {
        for &angle in &[0.3, 1.1, 2.9, -0.7] {
            let q = quat_from_angle_axis(angle, Vec3::new(0.0, 1.0, 0.0));
            let m = mat4_from_quat(q);
            let r = quat_from_mat4(&m);
            let v = Vec3::new(0.3, -0.2, 0.9);
            assert!(
                (quat_rotate_vec3(q, v) - quat_rotate_vec3(r, v)).norm() < 1e-4,
                "angle {angle} not recovered"
            );
        }
    }

    #[test]
    fn from_direction_takes_forward_onto_up() {
        let forward = Vec3::new(0.0, 0.0, -1.0);
        let up = Vec3::new(0.0, 1.0, 0.0);
        let q = quat_normalize(quat_from_direction(forward, up));
        let v = quat_rotate_vec3(q, forward);
        assert!((v - up).norm() < 1e-5);
    }

    #[test]
    fn normalize_zero_unchanged() {
        let q = quat_from_xyzw(0.0, 0.0, 0.0, 0.0);
        assert_eq!(quat_to_array(quat_normalize(q)), [0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn normalize_unit_length() {
        let q = quat_normalize(quat_from_xyzw(1.0, 2.0, 3.0, 4.0));
        assert!((quat_length(q) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn half_turn_angle_axis() {
        let q = quat_from_angle_axis(PI, Vec3::new(1.0, 0.0, 0.0));
        let (angle, axis) = quat_to_angle_axis(q);
        assert!((angle - PI).abs() < 1e-4);
        assert!((axis.x - 1.0).abs() < 1e-4);
    }

    #[test]
    fn symmetric_fov_matches_perspective() {
        let half = 0.5f32;
        let a = perspective_fov_rh(half, half, half, half, 0.1, 100.0);
        let b = perspective_rh(2.0 * half, 1.0, 0.1, 100.0);
        assert!((a - b).norm() < 1e-5);
    }

    #[test]
    fn translation_matrix() {
        let m = mat4_from_translation(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(m[(0, 3)], 1.0);
        assert_eq!(m[(1, 3)], 2.0);
        assert_eq!(m[(2, 3)], 3.0);
    }
}
