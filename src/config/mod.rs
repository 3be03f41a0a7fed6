//! # Configuration Module
//!
//! Centralizes the constants that size buffers, bound schema depth and hint
//! rendering capacity. Runtime configuration of an individual list goes
//! through [`crate::list::ListBuilder`], whose defaults come from here.
//!
//! ## Module Organization
//!
//! - [`constants`]: All numeric configuration values with dependency documentation

pub mod constants;
pub use constants::*;
