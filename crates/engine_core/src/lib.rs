//! Core types and utilities for the Dogglands viewer.
//!
//! This crate provides the foundational types used across all viewer systems:
//! - Transform for spatial positioning
//! - Frame time management
//! - Linear color handling

pub mod color;
pub mod time;
pub mod transform;

pub use color::*;
pub use time::*;
pub use transform::*;

// Re-export commonly used types
pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
