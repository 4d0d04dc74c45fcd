//! CLI utilities for Cordova build hooks
//!
//! Provides shared CLI functionality:
//! - Terminal output formatting
//! - The console implementation of the hook logger

#![warn(missing_docs)]

pub mod logger;
pub mod output;
