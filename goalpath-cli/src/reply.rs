use serde_json::{json, Value};
use std::process::ExitCode;

/// How a command finished, mirroring success / bad request / server error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    InvalidInput,
    Internal,
}

impl Status {
    pub fn exit_code(self) -> ExitCode {
        match self {
            Status::Ok => ExitCode::SUCCESS,
            Status::InvalidInput => ExitCode::from(2),
            Status::Internal => ExitCode::from(1),
        }
    }
}

/// JSON body printed to stdout plus the status it maps to.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: Status,
    pub body: Value,
}

impl Reply {
    pub fn ok(body: Value) -> Self {
        Self {
            status: Status::Ok,
            body,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            status: Status::InvalidInput,
            body: json!({ "error": message.into() }),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: Status::Internal,
            body: json!({ "error": message.into() }),
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        self.body.get("error").and_then(Value::as_str)
    }
}
