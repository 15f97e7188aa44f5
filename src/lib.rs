// Library root: exposes internals for integration tests and the binary.
// The binary entry point is src/main.rs.

pub mod bootstrap;
pub mod core;
pub mod http;
pub mod source;

pub use bootstrap::logger;
pub use self::core::{config, error};
