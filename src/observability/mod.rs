//! Observability for the butterfly catalog
//!
//! Logging only: events go through `tracing`, request spans come from the
//! `tower-http` trace layer, and `logger` installs the subscriber.

mod logger;

pub use logger::{env_filter, init_logging, LogFormat};
