//! Upload Module
//!
//! Uploads a file or directory tree to a repository URL and runs remote
//! commands around the transfer.
//!
//! ## Structure
//!
//! - `options` - Configuration types (`UploadOptions`, `TransferRequest`)
//! - `result` - Result types (`UploadReport`, `UploadState`)
//! - `commands` - Pre/post command phases
//! - `use_case` - Core use case logic (`UploadUseCase`)
//!
//! ## Usage
//!
//! ```ignore
//! use uploadfiles::application::upload::{UploadOptions, UploadUseCase};
//!
//! let use_case = UploadUseCase::new(TransportRegistry::with_defaults(), settings);
//! let report = use_case.execute(&UploadOptions::from(&config.upload), config.repository.as_ref(), None)?;
//! ```

mod commands;
mod options;
mod result;
mod use_case;

pub use commands::run_command_phase;
pub use options::{TransferRequest, UploadOptions};
pub use result::{CommandFailure, CommandPhase, PhaseOutcome, UploadReport, UploadState};
pub use use_case::{
    acquire_transport, apply_server_config, resolve_credentials, resolve_repository,
    TransportHandle, UploadUseCase,
};
pub(crate) use use_case::disconnect_quietly;
