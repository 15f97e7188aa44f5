//! Bootstrap layer: modules that run before the server starts.
//!
//! - **logger**: tracing-subscriber initialisation.

pub mod logger;
