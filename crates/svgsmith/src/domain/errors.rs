//! Domain-specific errors.

use thiserror::Error;

/// A collection operation was handed an out-of-range position.
///
/// These indicate a caller bug (typically a host holding a stale index after
/// a removal), not a recoverable user-facing condition. The operation that
/// produced the error leaves the collection untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("group index {index} out of range ({len} groups)")]
    GroupIndexOutOfRange { index: usize, len: usize },
    #[error("fragment index {index} out of range in group {group} ({len} fragments)")]
    FragmentIndexOutOfRange {
        group: usize,
        index: usize,
        len: usize,
    },
}
