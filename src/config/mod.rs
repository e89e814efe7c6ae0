// src/config/mod.rs

//! Pipeline file loading and validation.
//!
//! - `model.rs`: the TOML-backed data model.
//! - `loader.rs`: reading a file from disk.
//! - `validate.rs`: checks that only need the file itself (unknown
//!   references, empty paths, scheduler settings).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path};
pub use model::{ConfigSection, JobConfig, PipelineFile, RawPipelineFile, SchedulerSection};
