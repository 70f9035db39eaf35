//! Storage layer for `sweep_stats`.
//!
//! The analysis core only talks to the [`Repository`] trait. The filesystem
//! backend reads the record tree written by the optimizer runs; the memory
//! backend lets tests build repetition sets without touching disk.

pub mod fs;
pub mod layout;
pub mod memory;

pub use fs::FsRepository;
pub use layout::{address, repetition_location, timing_location};
pub use memory::MemoryRepository;

use crate::error::Result;
use crate::model::{RunKey, Series, TimingSample};

/// Read access to recorded runs.
///
/// Implementations must be shareable across worker threads: the loader fans
/// out over independent run keys.
pub trait Repository: Send + Sync {
    /// Repetition ids available for `key`, ascending.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the key's location does not exist.
    fn list_repetitions(&self, key: &RunKey) -> Result<Vec<u32>>;

    /// Read one repetition's trace.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the repetition is missing and `Parse` if it
    /// cannot be decoded.
    fn read_series(&self, key: &RunKey, repetition: u32) -> Result<Series>;

    /// Read every timing sample logged for `key`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no timing log exists for the key.
    fn read_timing_log(&self, key: &RunKey) -> Result<Vec<TimingSample>>;
}
