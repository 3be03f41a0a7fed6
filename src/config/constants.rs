//! # Configuration Constants
//!
//! This module centralizes the tunable values used by the list and its buffer
//! pool. Constants that depend on each other are co-located and their
//! relationships are enforced with compile-time assertions.
//!
//! ## Dependency Graph
//!
//! ```text
//! MIN_BUFFER_CAPACITY (64 bytes)
//!       │
//!       └─> DEFAULT_INITIAL_CAPACITY (must be >=)
//!             A list never starts with a buffer smaller than the minimum,
//!             so builder-supplied capacities are clamped upwards.
//!
//! MIN_GROWTH_FACTOR (1.5)
//!       │
//!       └─> DEFAULT_GROWTH_FACTOR (must be >=)
//!             Growth below 1.5x turns appends quadratic for large stores.
//!
//! MAX_NESTING_DEPTH (16)
//!       │
//!       └─> Schema derivation refuses deeper record graphs. Record types that
//!           reach themselves through a `Box` would otherwise recurse forever.
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use contiguous::config::{DEFAULT_INITIAL_CAPACITY, MAX_NESTING_DEPTH};
//! ```

// ============================================================================
// BUFFER SIZING
// ============================================================================

/// Capacity of the buffer a new list acquires from its pool.
pub const DEFAULT_INITIAL_CAPACITY: usize = 4096;

/// Smallest buffer a list will ever hold.
pub const MIN_BUFFER_CAPACITY: usize = 64;

/// Factor applied to the buffer capacity each time an append does not fit.
pub const DEFAULT_GROWTH_FACTOR: f64 = 1.5;

/// Smallest growth factor accepted by the list builder.
pub const MIN_GROWTH_FACTOR: f64 = 1.5;

const _: () = assert!(
    MIN_BUFFER_CAPACITY <= DEFAULT_INITIAL_CAPACITY,
    "DEFAULT_INITIAL_CAPACITY must be >= MIN_BUFFER_CAPACITY"
);

const _: () = assert!(
    MIN_GROWTH_FACTOR <= DEFAULT_GROWTH_FACTOR,
    "DEFAULT_GROWTH_FACTOR must be >= MIN_GROWTH_FACTOR"
);

// ============================================================================
// SCHEMA LIMITS
// ============================================================================

/// Maximum depth of nested compound fields below the root record.
pub const MAX_NESTING_DEPTH: usize = 16;

// ============================================================================
// RENDERING
// ============================================================================

/// Initial capacity of the string a single element is rendered into.
pub const RENDER_CAPACITY_HINT: usize = 300;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn growth_factor_is_at_least_one_and_a_half() {
        assert!(DEFAULT_GROWTH_FACTOR >= 1.5);
    }

    #[test]
    fn initial_capacity_matches_minimum_constraint() {
        assert!(DEFAULT_INITIAL_CAPACITY >= MIN_BUFFER_CAPACITY);
    }
}
