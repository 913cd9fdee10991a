#![warn(clippy::all, missing_docs)]

//! Core domain logic for the ICT resource inventory.
//!
//! This crate hosts the resource model and its validating builder, the
//! prototype catalogue, the in-memory registry, and configuration handling
//! used by the console frontend.

pub mod config;
pub mod error;
pub mod models;
pub mod resource;

pub use config::{AppConfig, OutputFormat};
pub use error::{RegistryError, ValidationError};
pub use models::{Resource, ResourceBuilder};
pub use resource::{PrototypeKind, Registry};
