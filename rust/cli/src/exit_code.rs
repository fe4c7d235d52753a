//! Process exit codes.

use crate::error::CliError;

pub const SUCCESS: i32 = 0;

/// Any failure: bad arguments, bad configuration, or an engine error.
pub const ERROR: i32 = 2;

/// Exit code for a command's result.
pub fn for_result(result: &Result<(), CliError>) -> i32 {
    match result {
        Ok(()) => SUCCESS,
        Err(_) => ERROR,
    }
}
