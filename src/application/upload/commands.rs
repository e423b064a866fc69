//! Remote command phases
//!
//! Runs the pre- or post-transfer commands against a connected transport.

use crate::domain::ports::TransportError;
use crate::domain::value_objects::RemoteCommand;

use super::result::{CommandFailure, CommandPhase, PhaseOutcome};
use super::use_case::TransportHandle;

/// Run `commands` in order.
///
/// A failing unmarked command stops the phase only when `fail_fast` is set;
/// otherwise it is logged and the next command runs. Marked (`@`) commands
/// are always just logged. An empty phase succeeds; a non-empty phase on a
/// transport that cannot execute commands does not.
pub fn run_command_phase(
    handle: &mut TransportHandle,
    phase: CommandPhase,
    commands: &[RemoteCommand],
    fail_fast: bool,
) -> PhaseOutcome {
    let mut outcome = PhaseOutcome {
        succeeded: true,
        ..PhaseOutcome::default()
    };
    if commands.is_empty() {
        return outcome;
    }

    if !handle.capabilities().command_execution {
        tracing::warn!(
            protocol = handle.protocol(),
            "{} commands configured but the transport cannot execute commands",
            phase
        );
        outcome.succeeded = false;
        return outcome;
    }

    for command in commands {
        outcome.executed.push(command.command().to_string());
        tracing::info!("running {}-command: {}", phase, command);

        let Err(err) = handle.transport_mut().execute_command(command.command()) else {
            continue;
        };

        let ignored = command.ignores_failure();
        if !ignored {
            outcome.succeeded = false;
        }
        log_command_failure(command, &err, !ignored && fail_fast);
        outcome.failures.push(CommandFailure {
            phase,
            command: command.command().to_string(),
            ignored,
            error: err.to_string(),
        });

        if fail_fast && !outcome.succeeded {
            break;
        }
    }

    outcome
}

/// Plain exit-status failures get a two-line message; execution faults carry the error
fn log_command_failure(command: &RemoteCommand, err: &TransportError, fatal: bool) {
    match (fatal, err.is_exit_status()) {
        (true, true) => {
            tracing::error!("command failed: {}", command);
            tracing::error!("  {}", err);
        }
        (true, false) => tracing::error!(error = %err, "command failed: {}", command),
        (false, true) => {
            tracing::warn!("command failed: {}", command);
            tracing::warn!("  {}", err);
        }
        (false, false) => tracing::warn!(error = %err, "command failed: {}", command),
    }
}
