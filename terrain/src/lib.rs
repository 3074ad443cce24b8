// src/lib.rs

//! Shared terrain domain types for the track core, the CLI and the viewer.
//! Enable the `serde` feature to make every type (de)serializable.

pub mod coords;
pub mod mesh;
pub mod outline;
pub mod prelude;
