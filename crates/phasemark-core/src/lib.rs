//! # Phasemark-Core
//!
//! Core types and utilities for the Phasemark CSI phase-fingerprinting
//! system.

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::*;
