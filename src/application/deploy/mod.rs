//! Deploy Module
//!
//! Plain artifact deployment through a repository layout.
//!
//! ## Usage
//!
//! ```ignore
//! use uploadfiles::application::deploy::PlainDeployer;
//!
//! let deployer = PlainDeployer::with_layout_id(TransportRegistry::with_defaults(), settings, "p2")?;
//! let report = deployer.deploy(&source, &artifact, &repo_config, true)?;
//! ```

mod result;
mod use_case;

pub use result::DeployReport;
pub use use_case::PlainDeployer;

#[cfg(test)]
mod tests;
