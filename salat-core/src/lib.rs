//! Shared primitives for the salat workspace.
//!
//! This crate carries the pieces every other member depends on: degree-domain
//! angle helpers and trig lookup tables, validated geographic coordinates,
//! astronomical constants, and the workspace's validation error type.
//!
//! Nothing here performs I/O or allocates after the lookup tables are built.

pub mod angle;
pub mod constants;
pub mod errors;
pub mod location;

pub use errors::{CoreError, CoreResult};
pub use location::Coordinates;
