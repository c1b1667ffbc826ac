use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// How a caller should treat an ingestion failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// The upload itself is unusable (wrong type, wrong columns, no rows).
    InvalidInput,
    /// Something broke while decoding a file that looked acceptable.
    Internal,
}

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Unsupported file type: {0:?}")]
    UnsupportedFormat(String),

    #[error("Missing required columns: {}", .0.join(", "))]
    Schema(Vec<String>),

    #[error("No valid records found")]
    EmptyData,

    #[error("Error processing file ({context}): {source}")]
    Processing {
        context: String,
        #[source]
        source: BoxError,
    },
}

impl IngestError {
    pub fn processing(context: impl Into<String>, source: impl Into<BoxError>) -> Self {
        IngestError::Processing {
            context: context.into(),
            source: source.into(),
        }
    }

    pub fn class(&self) -> FailureClass {
        match self {
            IngestError::UnsupportedFormat(_) | IngestError::Schema(_) | IngestError::EmptyData => {
                FailureClass::InvalidInput
            }
            IngestError::Processing { .. } => FailureClass::Internal,
        }
    }
}
