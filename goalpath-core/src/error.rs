use thiserror::Error;

/// Rejections raised while validating a projection request.
///
/// Validation happens up front; the projector never runs on a partially
/// valid request.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputValidationError {
    /// The request body was not a JSON object.
    #[error("request must be a JSON object")]
    NotAnObject,

    /// A required key was absent.
    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    /// A value that must be a number was something else.
    #[error("field '{field}' is not numeric: {value}")]
    NotNumeric { field: String, value: String },

    /// An optional mapping field held a non-object value.
    #[error("field '{0}' must be a mapping")]
    NotAMapping(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_display() {
        let err = InputValidationError::MissingField("goal_cost");
        assert_eq!(err.to_string(), "missing required field 'goal_cost'");
    }

    #[test]
    fn test_not_numeric_display() {
        let err = InputValidationError::NotNumeric {
            field: "monthly_income".to_string(),
            value: "\"lots\"".to_string(),
        };
        assert_eq!(err.to_string(), "field 'monthly_income' is not numeric: \"lots\"");
    }
}
