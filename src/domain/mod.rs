//! Domain Layer
//!
//! Pure upload logic without I/O dependencies.
//!
//! ## Structure
//!
//! - `value_objects/` - Immutable value types (Repository, RemoteCommand, Artifact)
//! - `services/` - Path logic (target path resolution, repository layouts)
//! - `ports/` - Interface definitions for infrastructure (Transport)
//!
//! ## Design Principles
//!
//! 1. **No I/O** - This layer never touches the file system or network directly
//! 2. **Ports & Adapters** - All remote access goes through the `Transport` port

pub mod ports;
pub mod services;
pub mod value_objects;
