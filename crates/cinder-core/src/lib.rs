//! Cinder Core - Foundational types for the Cinder particle engine
//!
//! This crate provides the types shared by the simulation and the CLI:
//! - `Vec2` - 2D positions and velocities
//! - `Rgb` - floating-point color with 0-255 channels
//! - Error types and Result alias

mod error;
mod types;

pub use error::{CinderError, Result};
pub use types::{Rgb, Vec2};
