//! Value types shared by the prober, the config store and the monitor.

mod host;
mod status;

pub use host::Host;
pub use status::{ConnectionType, HostStatusChange, Status};
