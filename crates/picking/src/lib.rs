//! Ray picking over the parcel grid using Rapier3D queries.
//!
//! The viewer never steps a simulation; Rapier is used purely as a static
//! collider set plus query pipeline. Every parcel registers one fixed
//! cuboid whose `user_data` carries the parcel's arena index, and pointer
//! positions are unprojected into world rays cast against that set.

pub mod raycast;
pub mod world;

pub use raycast::*;
pub use world::*;

// Re-export Rapier for downstream crates
pub use rapier3d;

// Re-export common Rapier types
pub use rapier3d::prelude::ColliderHandle;
