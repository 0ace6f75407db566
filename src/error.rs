use thiserror::Error;

/// Errors surfaced by the crate.
///
/// Frame-level corruption is not represented here: the decoder recovers from
/// it locally, one discarded byte at a time, and only counts it (see
/// [`crate::RejectReason`]).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// There is no enough space in tx buffer. The value is the size of bytes overflowed.
    #[error("no enough tx space: oversize={0}")]
    NoEnoughTxSpace(u16),
    /// No decoded reading is waiting in the decoder queue.
    #[error("no reading available")]
    NoReading,
    /// Peek offset is beyond the buffered bytes.
    #[error("offset {offset} out of range: only {len} bytes buffered")]
    OutOfRange {
        /// Requested offset from the front of the buffer.
        offset: usize,
        /// Number of bytes currently buffered.
        len: usize,
    },
    /// Pop from an empty buffer.
    #[error("buffer is empty")]
    Empty,
}
