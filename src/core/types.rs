/*!
 * Core Types
 * Common type aliases used across the workload
 */

/// Size type for byte accounting
pub type Size = usize;

/// Remaining-lifetime counter for long-lived blocks
///
/// Signed: the fixed-slot strategy decrements occupied slots without a
/// floor, so the counter can sit below zero between passes.
pub type Lifetime = i64;
