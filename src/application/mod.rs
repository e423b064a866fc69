//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (value objects, services, ports)
//! - Does NOT contain path or permission rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `UploadUseCase` - Connect, pre-commands, transfer, post-commands, chmod, disconnect
//! - `PlainDeployer` - Store one artifact at its repository layout path

pub mod deploy;
pub mod upload;

pub use deploy::{DeployReport, PlainDeployer};
pub use upload::{
    CommandFailure, CommandPhase, TransferRequest, UploadOptions, UploadReport, UploadState,
    UploadUseCase,
};
