//! Terminal messages written to the error stream.

use std::io::Write;

pub fn write_error(err: &mut dyn Write, msg: &str) -> std::io::Result<()> {
    writeln!(err, "Error: {}", msg)
}

/// Display a warning message to stderr with "WARNING:" prefix
pub fn display_warning(err: &mut dyn Write, message: &str) -> std::io::Result<()> {
    writeln!(err, "WARNING: {}", message)
}

/// Short usage block listing the available subcommands.
pub fn write_usage(err: &mut dyn Write, commands: &[&str]) -> std::io::Result<()> {
    writeln!(err, "pokeher hand engine")?;
    writeln!(err, "Usage: pokeher <command> [options]\n")?;
    writeln!(err, "Commands:")?;
    for c in commands {
        writeln!(err, "  {}", c)?;
    }
    writeln!(err, "\nFor full help, run: pokeher --help")
}
