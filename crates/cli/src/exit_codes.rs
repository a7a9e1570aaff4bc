//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract — scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Range   | Domain           | Description                              |
//! |---------|------------------|------------------------------------------|
//! | 0       | Universal        | Success                                  |
//! | 1       | Universal        | General error (unspecified)              |
//! | 2       | Universal        | CLI usage error (bad args, bad count)    |
//! | 50-59   | puzzle           | Daily puzzle fetch and parse             |
//! | 60-69   | local inputs     | Entity catalog and settings file         |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant in the appropriate range
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into the relevant command's error handling

// =============================================================================
// Universal (0-2)
// =============================================================================

/// Success - grid solved and printed (individual cells may still be empty).
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure (e.g. stdout closed).
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, non-positive display count.
pub const EXIT_USAGE: u8 = 2;

// =============================================================================
// Puzzle (50-59) — daily puzzle source
// =============================================================================

/// Auth rejected by upstream (401/403).
pub const EXIT_FETCH_AUTH: u8 = 51;

/// Request rejected by upstream (other 4xx).
pub const EXIT_FETCH_VALIDATION: u8 = 52;

/// Rate limited after retries (429).
pub const EXIT_FETCH_RATE_LIMIT: u8 = 53;

/// Upstream error (5xx) or network failure after retries.
pub const EXIT_FETCH_UPSTREAM: u8 = 54;

/// Puzzle body is not a valid puzzle (bad JSON, wrong shape, no categories).
pub const EXIT_PUZZLE_PARSE: u8 = 57;

// =============================================================================
// Local inputs (60-69)
// =============================================================================

/// No entity catalog configured (neither flag, env var, nor settings).
pub const EXIT_CATALOG_MISSING: u8 = 60;

/// Catalog file could not be read.
pub const EXIT_CATALOG_READ: u8 = 61;

/// Catalog file is not a valid catalog.
pub const EXIT_CATALOG_PARSE: u8 = 62;

/// Settings file could not be read or parsed.
pub const EXIT_SETTINGS: u8 = 65;
