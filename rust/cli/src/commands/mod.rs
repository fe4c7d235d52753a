//! Command handler modules for the pokeher CLI.
//!
//! Each command is implemented in its own module file with a consistent pattern:
//!
//! - Public handler function: `pub fn handle_COMMAND_command(...) -> Result<(), CliError>`
//! - Dependency injection: Output streams (`&mut dyn Write`) passed as parameters
//! - Error propagation: All errors propagated via `CliError` enum

pub mod cfg;
pub mod showdown;
pub mod sim;

pub use cfg::handle_cfg_command;
pub use showdown::handle_showdown_command;
pub use sim::handle_sim_command;
