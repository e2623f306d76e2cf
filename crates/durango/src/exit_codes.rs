//! Exit codes for the CLI
//!
//! A failed child command passes its own status through unchanged.

#![allow(dead_code)]

use durango_core::error::EXIT_PROGRAM_NOT_FOUND;
use durango_core::DurangoError;

/// Success
pub const SUCCESS: i32 = 0;

/// General error
pub const ERROR: i32 = 1;

/// Configuration error
pub const CONFIG_ERROR: i32 = 2;

/// Invalid task arguments
pub const VALIDATION_ERROR: i32 = 5;

/// Base program not found on PATH
pub const PROGRAM_NOT_FOUND: i32 = EXIT_PROGRAM_NOT_FOUND;

/// Map an error from a command to the process exit status
pub fn for_error(err: &anyhow::Error) -> i32 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<DurangoError>())
        .map(DurangoError::exit_code)
        .unwrap_or(ERROR)
}

/// Narrow an error status to a process exit byte, falling back to the
/// general error code when it does not fit or would read as success.
pub fn exit_byte(code: i32) -> u8 {
    match u8::try_from(code) {
        Ok(byte) if i32::from(byte) != SUCCESS => byte,
        _ => ERROR as u8,
    }
}
