use alloc::vec::Vec;

use thiserror::Error;

/// Unrecoverable input fault detected while transcoding.
///
/// Recoverable stalls (short destination, short source) are not errors;
/// they are reported directly through
/// [`TransformResult`](crate::TransformResult).
///
/// The two variants are deliberately asymmetric. `InvalidUtf8` is a
/// sentinel: the failing call already returns the fault offset as its
/// `consumed` count, and the caller still owns the full source span, so
/// nothing needs to be copied. `InvalidCesu8` snapshots the offending run,
/// because diagnostics downstream of a result-set decode must not retain a
/// reference into the caller's live buffer after the call returns.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranscodeError {
    /// The UTF-8 source contains a malformed run. The fault offset is the
    /// `consumed` count returned by the failing call.
    #[error("invalid UTF-8")]
    InvalidUtf8,
    /// The CESU-8 source contains a malformed run or an unpaired surrogate
    /// unit.
    #[error("invalid CESU-8: {run:02x?} at pos: {at}")]
    InvalidCesu8 {
        /// Byte offset of the offending run within the source span.
        at: usize,
        /// Owned copy of the offending run, detached from the source span.
        run: Vec<u8>,
    },
}
