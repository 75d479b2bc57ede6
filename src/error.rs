#[derive(Debug, PartialEq, thiserror::Error)]
pub enum RingError {
    /// Node is not part of the ring
    #[error("Unknown node: {0}")]
    UnknownNode(String),
}

pub type RingResult<T> = Result<T, RingError>;
