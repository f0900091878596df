#[derive(Debug, PartialEq, thiserror::Error)]
pub enum RingError {
    /// No servers to build the ring from.
    #[error("No servers to build the ring from")]
    NoServers,

    /// All servers have zero weight.
    #[error("Total weight of servers is zero")]
    ZeroTotalWeight,

    /// Sum of server weights does not fit into `u64`.
    #[error("Total weight of servers overflows")]
    WeightOverflow,

    /// Server identifier is an empty string.
    #[error("Empty server identifier")]
    EmptyIdentifier,

    /// Lookup attempted before any ring has been built.
    #[error("Ring has not been built")]
    EmptyRing,

    /// Malformed line in server definitions.
    #[error("Invalid server definition at line {line}: {reason}")]
    InvalidDefinition { line: usize, reason: String },
}

pub type RingResult<T> = Result<T, RingError>;
