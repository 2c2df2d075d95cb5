use thiserror::Error;

/// Failures of the two generation operations.
///
/// `Display` is the short, user-facing message. Internal causes (transport
/// errors, parser positions, raw model output) are logged where they occur
/// and never carried here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// Caller-supplied data failed validation; fixable by the caller.
    #[error("{0}")]
    InvalidInput(String),

    /// No usable credential for the generation endpoint.
    #[error("Server misconfigured: missing {key_name}.")]
    Unconfigured { key_name: String },

    /// The model answered without any usable text.
    #[error("{0}")]
    EmptyResponse(String),

    /// The model's output could not be parsed as JSON.
    #[error("{0}")]
    MalformedOutput(String),

    /// Valid JSON that does not fit the budget even when compacted.
    #[error("Generated prompt exceeded the {limit} character limit. Please refine your input.")]
    BudgetExceeded { limit: usize },

    /// Transport, quota, or protocol failure talking to the endpoint.
    #[error("{0}")]
    UpstreamFailure(String),
}

impl GenerationError {
    /// Stable machine-readable code for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            GenerationError::InvalidInput(_) => "INVALID_INPUT",
            GenerationError::Unconfigured { .. } => "UNCONFIGURED",
            GenerationError::EmptyResponse(_) => "EMPTY_RESPONSE",
            GenerationError::MalformedOutput(_) => "MALFORMED_OUTPUT",
            GenerationError::BudgetExceeded { .. } => "BUDGET_EXCEEDED",
            GenerationError::UpstreamFailure(_) => "UPSTREAM_FAILURE",
        }
    }

    /// Whether the caller can fix this by changing their input.
    pub fn is_caller_error(&self) -> bool {
        matches!(self, GenerationError::InvalidInput(_))
    }
}

/// Errors from secret backends (used by trait definitions in promptsmith-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("backend unavailable: {0}")]
    Unavailable(String),
}
