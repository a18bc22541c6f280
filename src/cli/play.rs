//! Play command implementation.

use std::io;

use warlight::Agent;

use super::{AgentOptions, CliError};

/// Execute the play command.
///
/// Serves the host on stdin/stdout until stdin closes.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded, the host sends an
/// inconsistent map, or stdin/stdout fail.
pub(crate) fn execute(options: &AgentOptions) -> Result<(), CliError> {
    let config = options.resolve()?;
    let mut agent = Agent::from_config(&config);

    let stdin = io::stdin();
    let stdout = io::stdout();
    agent.run(stdin.lock(), stdout.lock())?;
    Ok(())
}
