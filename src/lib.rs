//! opsboard: a terminal admin console for a small service deployment.
//!
//! This library exposes the core modules for use by the binary and by tests.

pub mod error;
pub mod model;
pub mod events;
pub mod config;
pub mod router;
pub mod probe;
pub mod docker;
pub mod sampler;
pub mod scheduler;
pub mod settings;
pub mod links;
pub mod logging;
pub mod check;
pub mod view;
pub mod app;
