use std::any::Any;
use rayon::ThreadPoolBuildError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SortError {
    /// Bad configuration or a range outside the sequence.
    #[error("precondition violated: {reason}")]
    PreconditionViolation { reason: String },

    /// The comparator panicked somewhere in the call tree.
    #[error("comparison failed: {reason}")]
    ComparisonFailure { reason: String },

    #[error("could not create worker pool: {0}")]
    ResourceExhaustion(#[from] ThreadPoolBuildError),
}

impl SortError {
    pub(crate) fn precondition(reason: impl Into<String>) -> SortError {
        SortError::PreconditionViolation {
            reason: reason.into(),
        }
    }

    pub(crate) fn from_panic(payload: Box<dyn Any + Send>) -> SortError {
        let reason = if let Some(s) = payload.downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            String::from("comparator panicked")
        };
        SortError::ComparisonFailure { reason }
    }
}
