//! Tracing subscriber setup shared by the workspace binaries.

mod subscriber;

pub use subscriber::init_with_verbosity;
