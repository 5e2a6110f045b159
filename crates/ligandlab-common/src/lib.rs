//! ligandlab-common — shared error taxonomy and configuration.

pub mod config;
pub mod error;

pub use error::{FetchError, GeometryError, PipelineError, Result};
