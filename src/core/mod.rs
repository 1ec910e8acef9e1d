/*!
 * Core Module
 * Shared type aliases and workload defaults
 */

pub mod limits;
pub mod types;

// Re-export commonly used types
pub use types::*;
