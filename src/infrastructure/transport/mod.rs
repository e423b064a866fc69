//! Transports
//!
//! Concrete implementations of the `Transport` port, selected by URL scheme
//! through the `TransportRegistry`.

mod local;
mod registry;
mod scp;

pub use local::LocalTransport;
pub use registry::{TransportFactory, TransportRegistry};
pub use scp::{ScpSettings, ScpTransport};
