//! Domain layer - Pure computational logic
//!
//! This module contains pure functions and algorithms without I/O dependencies.

pub mod candidate;
pub mod config;
pub mod crypt_table;
pub mod hash;
pub mod matcher;
pub mod partition;
