//! Domain Services
//!
//! Stateless path logic shared by the upload and deploy use cases.

pub mod layout;
mod target_path;

pub use layout::{
    layout_for, DefaultRepositoryLayout, LayoutError, P2RepositoryLayout, RepositoryLayout,
};
pub use target_path::{resolve_target_path, TARGET_SEPARATOR};
