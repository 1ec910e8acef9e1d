/*!
 * Workload Types
 * Block records and workload errors
 */

use crate::core::types::{Lifetime, Size};
use std::collections::TryReserveError;
use thiserror::Error;

/// Owned heap buffer standing in for one application allocation.
///
/// Acquisition is fallible and reserves the requested capacity up front;
/// dropping the payload is the release half of the pairing. The contents
/// are never read.
#[derive(Debug)]
pub struct Payload {
    buf: Vec<u8>,
}

impl Payload {
    /// Acquire `size` bytes from the process heap
    pub fn acquire(size: Size) -> Result<Self, TryReserveError> {
        let mut buf = Vec::new();
        buf.try_reserve_exact(size)?;
        Ok(Self { buf })
    }

    /// Capacity actually reserved, at least the requested size
    pub fn capacity(&self) -> Size {
        self.buf.capacity()
    }
}

/// Bookkeeping record for one allocated block
#[derive(Debug)]
pub struct BlockRecord {
    /// The live buffer this record accounts for
    pub payload: Payload,
    /// Requested size in bytes
    pub size: Size,
    /// Aging passes left before the block expires
    pub lifetime_remaining: Lifetime,
}

impl BlockRecord {
    /// Record for a block reclaimed within its own iteration
    pub fn transient(payload: Payload, size: Size) -> Self {
        Self {
            payload,
            size,
            lifetime_remaining: 0,
        }
    }

    /// Record for a block that survives across iterations
    pub fn long_lived(payload: Payload, size: Size, lifetime: Lifetime) -> Self {
        Self {
            payload,
            size,
            lifetime_remaining: lifetime,
        }
    }

    /// Eligible for reclamation by an aging pass
    pub fn is_expired(&self) -> bool {
        self.lifetime_remaining <= 0
    }
}

/// Workload errors
#[derive(Error, Debug, Clone)]
pub enum WorkloadError {
    #[error("allocation refused at batch position {position}: requested {requested} bytes")]
    AllocationRefused {
        position: usize,
        requested: Size,
        #[source]
        source: TryReserveError,
    },

    #[error("invalid configuration: {parameter} must be a positive integer")]
    InvalidConfig { parameter: &'static str },

    #[error("unknown strategy {0:?}, expected \"tracked_list\" or \"fixed_slot\"")]
    UnknownStrategy(String),
}

/// Workload operation result
pub type WorkloadResult<T> = Result<T, WorkloadError>;
