//! Geometry and material takeoff engine for round ductwork layouts.
//!
//! Parts live in a [`part::PartStore`] and expose world-space connectors.
//! [`operations::snap`] joins connectors while dragging, and
//! [`operations::takeoff`] turns a finished layout into a bill of materials.
//! [`session::Session`] ties these together with undo history and a camera.

pub mod config;
pub mod dimension;
pub mod error;
pub mod math;
pub mod operations;
pub mod part;
pub mod session;

pub use error::{ConfigError, DuctError, Result, SessionError};
