//! Plain-data output handed to the host that owns the renderable transform.

use cgmath::{Point3, Quaternion, Vector3};

/// What changed during one tick, expressed the way a scene transform applies it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOutput {
    /// Translation to add to the host transform
    pub translation: Vector3<f32>,
    /// Local-space rotation increment: axis scaled by the angle in degrees
    pub rotation_axis_angle_deg: Vector3<f32>,
}

/// Current placement of a body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Point3<f32>,
    /// Composition of every per-tick rotation increment, in body-local order
    pub orientation: Quaternion<f32>,
    /// Accumulated angle vector in radians, one entry per principal axis
    pub angles: Vector3<f32>,
    /// Scale of the host object: (length, height, width)
    pub scale: Vector3<f32>,
}

/// GPU-friendly copy of a [`Pose`].
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct RawPose {
    pub position: [f32; 3],
    pub scale: [f32; 3],
    /// Quaternion as [x, y, z, w]
    pub orientation: [f32; 4],
}

impl Pose {
    pub fn to_raw(&self) -> RawPose {
        let q = self.orientation;
        RawPose {
            position: self.position.into(),
            scale: self.scale.into(),
            orientation: [q.v.x, q.v.y, q.v.z, q.s],
        }
    }
}
