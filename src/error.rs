use thiserror::Error;

/// Errors from owned buffer operations.
///
/// Every variant guarantees the buffer was left exactly as it was before the
/// failed call.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringError {
    #[error("allocation failed")]
    AllocationFailed,

    #[error("capacity overflow")]
    CapacityOverflow,
}
