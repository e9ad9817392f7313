//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract — scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Range   | Domain    | Description                                |
//! |---------|-----------|--------------------------------------------|
//! | 0       | Universal | Success                                    |
//! | 1       | Universal | General error (unspecified)                |
//! | 2       | Universal | CLI usage error (bad args, missing file)   |
//! | 10-19   | input     | User input and payload format errors       |
//! | 20-29   | score     | Scoring service errors                     |

// =============================================================================
// Universal (0-2)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

// =============================================================================
// Input (10-19)
// =============================================================================

/// Required user input missing or unusable: no API key, no data rows,
/// unknown sheet, bad range address.
pub const EXIT_INPUT: u8 = 10;

/// Insert payload is not valid structured text or not a non-empty array.
pub const EXIT_FORMAT: u8 = 11;

// =============================================================================
// Scoring (20-29)
// =============================================================================

/// Transport failure reaching the scoring service.
pub const EXIT_NETWORK: u8 = 20;

/// Scoring request exceeded its deadline.
pub const EXIT_TIMEOUT: u8 = 21;

/// Scoring service returned a non-success HTTP status.
pub const EXIT_HTTP: u8 = 22;

/// Scoring response could not be normalized into records.
pub const EXIT_RESPONSE: u8 = 23;
