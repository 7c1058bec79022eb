//! Box-shaped body pushed by one off-center thruster.
//!
//! The thrust is split once, at construction, into a radial part (along the
//! line from the center of mass to the attachment point) that translates the
//! body and a tangential part that produces torque. Each principal axis then
//! spins on its own, using the box moment of inertia for that axis and no
//! cross-axis coupling, so combined spins trace Lissajous-like figures rather
//! than a single rotation about the torque axis.

use cgmath::{ElementWise, InnerSpace, Vector3, Zero};

use crate::config::{is_zero_vector, ConfigFallback, ThrustBodyConfig, EPSILON};
use crate::rigid_body::RigidBody;
use crate::transform::{Pose, TickOutput};

/// Moment of inertia of a uniform box about an axis normal to one of its faces.
///
/// `p1` and `p2` are the two extents perpendicular to the axis.
pub fn box_inertia(mass: f32, p1: f32, p2: f32) -> f32 {
    mass * (p1 * p1 + p2 * p2) / 12.0
}

/// Component of `v` along `onto`. Zero when `onto` is the zero vector.
fn project(v: Vector3<f32>, onto: Vector3<f32>) -> Vector3<f32> {
    let len2 = onto.magnitude2();
    if len2 < f32::MIN_POSITIVE {
        return Vector3::zero();
    }
    onto * (v.dot(onto) / len2)
}

#[derive(Debug, Clone)]
pub struct ThrustBody {
    config: ThrustBodyConfig,
    fallbacks: Vec<ConfigFallback>,
    inertia: Vector3<f32>,
    thrust_factor: f32,
    state: RigidBody,
}

impl ThrustBody {
    /// Sanitize `config` and derive the constant accelerations and torque.
    pub fn new(config: ThrustBodyConfig) -> ThrustBody {
        let (config, fallbacks) = config.sanitize();

        let inertia = Vector3::new(
            box_inertia(config.mass, config.width, config.height),
            box_inertia(config.mass, config.width, config.length),
            box_inertia(config.mass, config.length, config.height),
        );

        // The body starts at the origin, so the radius is the attachment point itself.
        let radius = config.thruster_attachment_point;
        let radius_len = radius.magnitude();
        let radius_scale = if radius_len <= EPSILON { 1.0 } else { radius_len };
        let radial = radius / radius_scale;

        let linear = project(config.thrust_vector, radial);
        let tangential = config.thrust_vector - linear;

        let mut acceleration = linear / config.mass;
        let (torque, angular_acceleration) = if is_zero_vector(tangential) || radius_len <= EPSILON
        {
            // Thrust aimed through the center of mass: translation only.
            (Vector3::zero(), Vector3::zero())
        } else {
            let torque = tangential.cross(radial * radius_scale);
            (torque, torque.div_element_wise(inertia))
        };

        if is_zero_vector(acceleration) {
            // Thrust perpendicular to the radius: rotation only.
            acceleration = Vector3::zero();
        }

        log::debug!(
            "thrust body: accel {:?}, angular accel {:?}, torque {:?}, inertia {:?}",
            acceleration,
            angular_acceleration,
            torque,
            inertia
        );

        ThrustBody {
            config,
            fallbacks,
            inertia,
            thrust_factor: 0.0,
            state: RigidBody::at_rest(acceleration, angular_acceleration, torque),
        }
    }

    /// Advance the simulation by `dt` seconds.
    ///
    /// The thrust factor ramps first and the ramp is per call: each tick adds
    /// `thrust_ramp_time_secs` regardless of `dt`, so the spool-up duration
    /// depends on the tick rate.
    pub fn tick(&mut self, dt: f32) -> TickOutput {
        self.ramp_thrust();
        self.state.integration_step(self.thrust_factor, dt)
    }

    fn ramp_thrust(&mut self) {
        let step = self.config.thrust_ramp_time_secs;
        if self.thrust_factor + step - 1.0 <= EPSILON {
            self.thrust_factor = (self.thrust_factor + step).min(1.0);
        } else if self.thrust_factor - 1.0 <= EPSILON && self.thrust_factor != 1.0 {
            self.thrust_factor = 1.0;
            log::debug!("thrust at full power");
        }
    }

    /// Configuration after fallbacks were applied.
    pub fn config(&self) -> &ThrustBodyConfig {
        &self.config
    }

    pub fn fallbacks(&self) -> &[ConfigFallback] {
        &self.fallbacks
    }

    pub fn thrust_factor(&self) -> f32 {
        self.thrust_factor
    }

    pub fn state(&self) -> &RigidBody {
        &self.state
    }

    /// Per-axis moments of inertia (x, y, z).
    pub fn moments_of_inertia(&self) -> Vector3<f32> {
        self.inertia
    }

    /// Host object scale: X = length, Y = height, Z = width.
    pub fn scale(&self) -> Vector3<f32> {
        Vector3::new(self.config.length, self.config.height, self.config.width)
    }

    pub fn pose(&self) -> Pose {
        Pose {
            position: self.state.position,
            orientation: self.state.orientation,
            angles: self.state.angles,
            scale: self.scale(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use cgmath::Point3;

    fn body(attachment: Vector3<f32>, thrust: Vector3<f32>) -> ThrustBody {
        ThrustBody::new(ThrustBodyConfig {
            thruster_attachment_point: attachment,
            thrust_vector: thrust,
            ..Default::default()
        })
    }

    #[test]
    fn box_inertia_formula() {
        assert_abs_diff_eq!(box_inertia(1.0, 1.0, 1.0), 1.0 / 6.0, epsilon = 1e-7);
        assert_abs_diff_eq!(box_inertia(12.0, 1.0, 3.0), 10.0, epsilon = 1e-5);
    }

    #[test]
    fn inertia_uses_perpendicular_extents() {
        let body = ThrustBody::new(ThrustBodyConfig {
            length: 2.0,
            width: 1.0,
            height: 3.0,
            mass: 12.0,
            ..Default::default()
        });
        assert_abs_diff_eq!(
            body.moments_of_inertia(),
            Vector3::new(10.0, 5.0, 13.0),
            epsilon = 1e-5
        );
        assert_eq!(body.scale(), Vector3::new(2.0, 3.0, 1.0));
    }

    #[test]
    fn thrust_along_radius_only_translates() {
        let body = body(Vector3::new(0.0, 2.0, 0.0), Vector3::new(0.0, 3.0, 0.0));
        let state = body.state();
        assert_eq!(state.torque, Vector3::zero());
        assert_eq!(state.angular_acceleration, Vector3::zero());
        assert_abs_diff_eq!(state.acceleration, Vector3::new(0.0, 3.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn oblique_parallel_thrust_only_translates() {
        let body = body(Vector3::new(1.0, 1.0, 1.0), Vector3::new(-2.0, -2.0, -2.0));
        let state = body.state();
        assert_eq!(state.torque, Vector3::zero());
        assert_eq!(state.angular_acceleration, Vector3::zero());
        assert_abs_diff_eq!(state.acceleration, Vector3::new(-2.0, -2.0, -2.0), epsilon = 1e-5);
    }

    #[test]
    fn perpendicular_thrust_only_rotates() {
        let body = body(Vector3::new(0.0, 0.0, 3.0), Vector3::new(1.0, 0.0, 0.0));
        let state = body.state();
        assert_eq!(state.acceleration, Vector3::zero());
        assert_ne!(state.angular_acceleration, Vector3::zero());
    }

    #[test]
    fn unit_cube_torque_and_angular_acceleration() {
        let body = body(Vector3::new(1.0, 0.0, 0.0), Vector3::new(0.0, 1.0, 0.0));
        let state = body.state();

        assert_eq!(state.torque, Vector3::new(0.0, 0.0, -1.0));
        assert_abs_diff_eq!(
            body.moments_of_inertia(),
            Vector3::new(1.0 / 6.0, 1.0 / 6.0, 1.0 / 6.0),
            epsilon = 1e-7
        );
        assert_abs_diff_eq!(
            state.angular_acceleration,
            Vector3::new(0.0, 0.0, -6.0),
            epsilon = 1e-5
        );
        assert_eq!(state.acceleration, Vector3::zero());
    }

    #[test]
    fn torque_uses_full_lever_arm() {
        let body = body(Vector3::new(2.0, 0.0, 0.0), Vector3::new(0.0, 1.0, 0.0));
        assert_abs_diff_eq!(body.state().torque, Vector3::new(0.0, 0.0, -2.0), epsilon = 1e-6);
    }

    #[test]
    fn oblique_thrust_splits_into_both_parts() {
        let body = ThrustBody::new(ThrustBodyConfig {
            mass: 2.0,
            thruster_attachment_point: Vector3::new(1.0, 0.0, 0.0),
            thrust_vector: Vector3::new(1.0, 1.0, 0.0),
            ..Default::default()
        });
        let state = body.state();

        assert_abs_diff_eq!(state.acceleration, Vector3::new(0.5, 0.0, 0.0), epsilon = 1e-6);
        assert_eq!(state.torque, Vector3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn attachment_at_center_of_mass_is_inert() {
        let mut body = body(Vector3::zero(), Vector3::new(0.0, 5.0, 0.0));
        let state = *body.state();
        assert_eq!(state.acceleration, Vector3::zero());
        assert_eq!(state.angular_acceleration, Vector3::zero());
        assert_eq!(state.torque, Vector3::zero());

        body.tick(1.0);
        assert_eq!(body.pose().position, Point3::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn tiny_attachment_radius_still_translates() {
        let mut body = body(Vector3::new(1e-6, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0));
        let state = *body.state();
        assert_abs_diff_eq!(state.acceleration, Vector3::new(1.0, 0.0, 0.0), epsilon = 1e-5);
        assert_eq!(state.torque, Vector3::zero());
        assert_eq!(state.angular_acceleration, Vector3::zero());

        body.tick(1.0);
        assert!(body.pose().position.x > 0.0);
    }

    #[test]
    fn zero_mass_falls_back_to_one() {
        let body = ThrustBody::new(ThrustBodyConfig {
            mass: 0.0,
            thruster_attachment_point: Vector3::new(0.0, 1.0, 0.0),
            thrust_vector: Vector3::new(0.0, 4.0, 0.0),
            ..Default::default()
        });

        assert_eq!(body.config().mass, 1.0);
        assert_eq!(body.fallbacks(), &[ConfigFallback::Mass { given: 0.0 }]);
        assert_abs_diff_eq!(body.state().acceleration, Vector3::new(0.0, 4.0, 0.0), epsilon = 1e-6);
        assert_abs_diff_eq!(
            body.moments_of_inertia(),
            Vector3::new(1.0 / 6.0, 1.0 / 6.0, 1.0 / 6.0),
            epsilon = 1e-7
        );
    }

    #[test]
    fn zero_thrust_falls_back_to_up() {
        let body = body(Vector3::new(0.0, 1.0, 0.0), Vector3::zero());
        assert_eq!(body.config().thrust_vector, Vector3::new(0.0, 1.0, 0.0));
        assert_abs_diff_eq!(body.state().acceleration, Vector3::new(0.0, 1.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn thrust_ramps_to_one_and_stays() {
        let mut body = body(Vector3::new(0.0, 1.0, 0.0), Vector3::new(0.0, 1.0, 0.0));
        assert_eq!(body.thrust_factor(), 0.0);

        let mut previous = 0.0;
        for tick in 1..=30 {
            body.tick(1.0 / 60.0);
            let factor = body.thrust_factor();
            assert!(factor >= previous, "tick {tick}: {factor} < {previous}");
            assert!(factor <= 1.0, "tick {tick}: {factor} > 1");
            if tick < 10 {
                assert_abs_diff_eq!(factor, 0.1 * tick as f32, epsilon = 1e-5);
            }
            if tick == 10 {
                assert_abs_diff_eq!(factor, 1.0, epsilon = 1e-5);
            }
            if tick > 10 {
                assert_eq!(factor, 1.0);
            }
            previous = factor;
        }
    }

    #[test]
    fn ramp_step_above_one_saturates_immediately() {
        let mut body = ThrustBody::new(ThrustBodyConfig {
            thrust_ramp_time_secs: 2.0,
            ..Default::default()
        });
        body.tick(0.1);
        assert_eq!(body.thrust_factor(), 1.0);
        body.tick(0.1);
        assert_eq!(body.thrust_factor(), 1.0);
    }

    #[test]
    fn zero_dt_only_advances_the_ramp() {
        let mut body = body(Vector3::new(1.0, 0.0, 0.0), Vector3::new(1.0, 1.0, 0.0));
        for _ in 0..5 {
            body.tick(1.0 / 60.0);
        }
        let pose = body.pose();
        let state = *body.state();
        let factor = body.thrust_factor();

        for _ in 0..3 {
            let out = body.tick(0.0);
            assert_eq!(out.translation, Vector3::zero());
        }

        assert_eq!(body.pose(), pose);
        assert_eq!(body.state().velocity, state.velocity);
        assert_eq!(body.state().angular_velocity, state.angular_velocity);
        assert!(body.thrust_factor() > factor);
    }

    #[test]
    fn tick_integrates_with_ramped_thrust() {
        let mut body = ThrustBody::new(ThrustBodyConfig {
            thruster_attachment_point: Vector3::new(0.0, 1.0, 0.0),
            thrust_vector: Vector3::new(0.0, 2.0, 0.0),
            thrust_ramp_time_secs: 0.5,
            ..Default::default()
        });

        // factor 0.5: v = 2 * 0.5 * 1 = 1, p = 1
        let out = body.tick(1.0);
        assert_abs_diff_eq!(out.translation, Vector3::new(0.0, 1.0, 0.0), epsilon = 1e-6);

        // factor 1.0: v = 1 + 2 = 3, p = 4
        body.tick(1.0);
        assert_abs_diff_eq!(body.state().velocity, Vector3::new(0.0, 3.0, 0.0), epsilon = 1e-6);
        assert_abs_diff_eq!(
            body.pose().position,
            Point3::new(0.0, 4.0, 0.0),
            epsilon = 1e-6
        );
    }

    #[test]
    fn spin_accumulates_per_axis() {
        let mut body = body(Vector3::new(1.0, 0.0, 0.0), Vector3::new(0.0, 1.0, 0.0));
        for _ in 0..10 {
            body.tick(0.1);
        }
        let angles = body.pose().angles;
        assert_eq!(angles.x, 0.0);
        assert_eq!(angles.y, 0.0);
        assert!(angles.z < 0.0);
        assert_eq!(body.pose().position, Point3::new(0.0, 0.0, 0.0));
    }
}
