//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod transport;

pub use transport::{Capabilities, Transport, TransportError};
