//! gxwf-galaxy: Galaxy REST API adapter for the gxwf CLI
//!
//! This crate provides the implementation of the GalaxyApi trait on top of
//! reqwest. It is the only crate that speaks HTTP to a Galaxy server.

pub mod client;

pub use client::{GalaxyClient, workflow_editor_url};
