//! Error types surfaced by the encoder.
//!
//! Bad caller input is reported through [`Error`]; violated internal
//! invariants (wrong codeword counts handed to the low-level constructor,
//! length mismatches after padding) are bugs and stay assertions.

use thiserror::Error;

/// Errors returned by encoding operations and checked accessors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The string contains a character that the requested mode cannot encode.
    #[error("string contains a character unencodable in {0} mode")]
    InvalidCharacter(&'static str),

    /// A numeric argument is outside its legal bounds.
    #[error("{0} out of range")]
    ValueOutOfRange(&'static str),

    /// No version in the requested range can hold the segments.
    #[error("data too long: {0}")]
    DataTooLong(#[from] DataTooLong),

    /// The encoding parameters contradict each other.
    #[error("invalid encoding parameters: {0}")]
    InvalidValue(&'static str),

    /// A bit buffer would exceed its 31-bit length counter.
    #[error("bit buffer capacity exceeded")]
    CapacityExceeded,

    /// An out-of-bounds module or bit read.
    #[error("index out of range")]
    IndexOutOfRange,
}

/// Detail for [`Error::DataTooLong`].
///
/// Ways to handle this include decreasing the error correction level,
/// raising the maximum version, or shortening the data.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataTooLong {
    /// A segment is longer than its character count field can express at
    /// any allowed version.
    #[error("segment too long")]
    SegmentTooLong,

    /// The segments need more bits than the largest allowed version holds.
    #[error("data length = {0} bits, max capacity = {1} bits")]
    DataOverCapacity(usize, usize),
}
