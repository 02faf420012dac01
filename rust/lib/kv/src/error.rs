use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KVError {
    #[error("storage error: {0}")]
    Storage(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}
