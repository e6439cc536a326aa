use thiserror::Error;

/// Failure raised by a reducer while computing the next state.
///
/// The store never commits a transition whose reduction failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("reducer rejected '{kind}': {message}")]
pub struct ReducerError {
    /// Discriminant of the action that was being reduced.
    pub kind: String,
    pub message: String,
}

impl ReducerError {
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
        }
    }
}

/// Errors surfaced to the caller of a dispatch.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid action: {reason}")]
    InvalidAction { reason: String },

    #[error("Malformed payload for action '{kind}': {source}")]
    MalformedPayload {
        kind: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Reducer(#[from] ReducerError),

    #[error("Dispatch called while the store is already dispatching")]
    ReentrantDispatch,

    #[error("Deferred dispatch requires a running tokio runtime")]
    NoRuntime,
}

impl StoreError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        StoreError::InvalidAction {
            reason: reason.into(),
        }
    }
}
