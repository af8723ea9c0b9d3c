use serde::Serialize;
use thiserror::Error;

use crate::chroma::protocol::ResultCode;

/// Unified error type for chroma-fx operations.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", content = "message")]
pub enum ChromaError {
    /// Malformed input shape or count, rejected before any native call.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A grid index, row or column outside its valid range.
    #[error("{name} {index} is out of range (must be less than {bound})")]
    OutOfRange {
        name: &'static str,
        index: usize,
        bound: usize,
    },

    /// The native SDK returned a non-success status.
    #[error("Call to native Chroma SDK function {function} failed with error: {result}")]
    NativeCall {
        function: &'static str,
        result: ResultCode,
    },

    #[error("Operation not supported: {0}")]
    NotSupported(String),

    /// The native SDK library could not be loaded or is missing an export.
    #[error("Library error: {0}")]
    Library(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl ChromaError {
    /// The native status code, if this error came from the SDK.
    #[must_use]
    pub const fn result_code(&self) -> Option<ResultCode> {
        match self {
            Self::NativeCall { result, .. } => Some(*result),
            _ => None,
        }
    }
}

/// Convenience Result type alias with `ChromaError`.
pub type Result<T> = std::result::Result<T, ChromaError>;

#[cfg(windows)]
impl From<windows::core::Error> for ChromaError {
    fn from(err: windows::core::Error) -> Self {
        Self::Library(format!("HRESULT 0x{:08X}: {err}", err.code().0))
    }
}

impl From<ChromaError> for String {
    fn from(err: ChromaError) -> Self {
        err.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_call_message_names_function_and_code() {
        let err = ChromaError::NativeCall {
            function: "CreateMousepadEffect",
            result: ResultCode::DEVICE_NOT_CONNECTED,
        };
        let msg = err.to_string();
        assert!(msg.contains("CreateMousepadEffect"));
        assert!(msg.contains("1167"));
        assert_eq!(err.result_code(), Some(ResultCode::DEVICE_NOT_CONNECTED));
    }

    #[test]
    fn out_of_range_serializes_with_kind_tag() {
        let err = ChromaError::OutOfRange {
            name: "row",
            index: 31,
            bound: 30,
        };
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["kind"], "OutOfRange");
        assert_eq!(json["message"]["index"], 31);
        assert_eq!(json["message"]["bound"], 30);
    }
}
