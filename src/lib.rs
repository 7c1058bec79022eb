//! Thrust-driven rigid body integration and mesh centroid computation.
//!
//! [`ThrustBody`] is built once from a [`ThrustBodyConfig`] and advanced with
//! [`ThrustBody::tick`]; the host applies the returned [`TickOutput`] (or reads
//! [`ThrustBody::pose`]) to whatever it renders. [`compute_centroid`] finds the
//! center of mass of a hull mesh, which can anchor the thruster position via
//! [`ThrustBodyConfig::with_center_of_mass`].

pub mod centroid;
pub mod config;
pub mod error;
pub mod rigid_body;
pub mod thrust_body;
pub mod transform;

pub use centroid::{compute_centroid, Mesh};
pub use config::{ConfigFallback, ThrustBodyConfig, EPSILON};
pub use error::{ConfigError, MeshError};
pub use rigid_body::RigidBody;
pub use thrust_body::{box_inertia, ThrustBody};
pub use transform::{Pose, RawPose, TickOutput};
