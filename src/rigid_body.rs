use cgmath::InnerSpace;
use cgmath::Point3;
use cgmath::Quaternion;
use cgmath::Rad;
use cgmath::Rotation3;
use cgmath::Vector3;
use cgmath::Zero;

use crate::transform::TickOutput;

const RAD_TO_DEG: f32 = 180.0 / std::f32::consts::PI;

/// Kinematic state of a body, advanced with explicit Euler steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidBody {
    // Linear
    pub position: Point3<f32>,
    pub velocity: Vector3<f32>,
    pub acceleration: Vector3<f32>,

    // Angular, one entry per principal axis
    pub angles: Vector3<f32>,
    pub angular_velocity: Vector3<f32>,
    pub angular_acceleration: Vector3<f32>,
    pub torque: Vector3<f32>,

    /// Host-facing composition of the per-step rotations
    pub orientation: Quaternion<f32>,
}

impl Default for RigidBody {
    fn default() -> Self {
        RigidBody {
            position: Point3::new(0.0, 0.0, 0.0),
            velocity: Vector3::zero(),
            acceleration: Vector3::zero(),
            angles: Vector3::zero(),
            angular_velocity: Vector3::zero(),
            angular_acceleration: Vector3::zero(),
            torque: Vector3::zero(),
            orientation: Quaternion::new(1.0, 0.0, 0.0, 0.0),
        }
    }
}

impl RigidBody {
    pub fn at_rest(
        acceleration: Vector3<f32>,
        angular_acceleration: Vector3<f32>,
        torque: Vector3<f32>,
    ) -> RigidBody {
        RigidBody {
            acceleration,
            angular_acceleration,
            torque,
            ..RigidBody::default()
        }
    }

    /// Advance by `time` seconds with both accelerations scaled by `thrust_factor`.
    ///
    /// Linear motion is integrated first, then angular motion. The rotation
    /// increment is applied in body-local space.
    pub fn integration_step(&mut self, thrust_factor: f32, time: f32) -> TickOutput {
        self.velocity += self.acceleration * thrust_factor * time;
        let translation = self.velocity * time;
        self.position += translation;

        self.angular_velocity += self.angular_acceleration * thrust_factor * time;
        let turn = self.angular_velocity * time;
        self.angles += turn;

        let angle = turn.magnitude();
        if angle > 0.0 {
            let increment = Quaternion::from_axis_angle(turn / angle, Rad(angle));
            self.orientation = (self.orientation * increment).normalize();
        }

        TickOutput {
            translation,
            rotation_axis_angle_deg: turn * RAD_TO_DEG,
        }
    }
}
