//! Island and parcel-grid generation for the Dogglands viewer.
//!
//! Produces the static world the marketplace sells: named islands with a
//! color palette, and one purchasable parcel per grid cell. Generation is
//! deterministic under a fixed seed; ownership of the canonical parcel list
//! belongs to the application store once generated.

pub mod grid;
pub mod island;
pub mod parcel;

pub use grid::*;
pub use island::*;
pub use parcel::*;
