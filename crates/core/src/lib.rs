//! gxwf-core: Core library for the gxwf Galaxy workflow client
//!
//! This crate provides the core functionality for the gxwf CLI, including:
//! - Configuration management (logins and aliases, stored in ~/.gxwf)
//! - Alias resolution
//! - Invocation requests and their saved-file format
//! - GalaxyApi trait for Galaxy server operations
//!
//! This crate does not talk HTTP itself; the `gxwf-galaxy` crate provides the
//! GalaxyApi implementation.

pub mod alias;
pub mod config;
pub mod error;
pub mod history;
pub mod invocation;
pub mod login;
pub mod traits;

/// Tag attached to every history, dataset and workflow gxwf manages
pub const GXWF_TAG: &str = "gxwf";

pub use alias::{AliasManager, AliasMap};
pub use config::{Config, ConfigManager, Login};
pub use error::{Error, Result};
pub use invocation::{InputValue, InvocationRequest, Submission};
pub use login::SwitchOutcome;
pub use traits::{
    DatasetDetails, DatasetSummary, GalaxyApi, History, Invocation, InvocationSummary,
    WorkflowDetails, WorkflowInput, WorkflowSummary,
};
