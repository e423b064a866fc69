//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `transport/` - Transport implementations (local directory, ssh/scp) and the registry

pub mod transport;

// Re-export for convenience
pub use transport::{LocalTransport, ScpTransport, TransportRegistry};
