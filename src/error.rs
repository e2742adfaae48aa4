//! Error types for COMET RPC calls.

use thiserror::Error;

use crate::status::ErrorCode;

/// Result type alias for COMET operations.
pub type Result<T> = std::result::Result<T, CometError>;

/// Errors that can occur while invoking a COMET procedure.
#[derive(Debug, Error)]
pub enum CometError {
    /// The controller rejected the request with HTTP 401.
    #[error("Authentication failed (Karel?)")]
    Authentication,

    /// The controller rejected the request with HTTP 403.
    #[error("Access is forbidden/locked (Karel?)")]
    LockedResource,

    /// The controller answered with an HTTP status other than 200, 401 or 403.
    #[error("Unexpected HTTP status: expected {expected}, got {actual}")]
    UnexpectedResultCode {
        /// The status code that was expected (always 200).
        expected: u16,
        /// The status code that was received.
        actual: u16,
    },

    /// The response document was malformed or did not have the expected shape.
    #[error("Unexpected response content: {reason}")]
    UnexpectedResponseContent {
        /// Description of what was wrong with the response.
        reason: String,
    },

    /// The response document parsed, but its structure could not be mapped.
    #[error("Deserialisation failed: {reason}")]
    Deserialisation {
        /// Description of the deserialisation problem.
        reason: String,
    },

    /// The controller does not know the requested procedure.
    #[error("Unsupported RPC: '{procedure}'")]
    UnsupportedProcedure {
        /// Name and code of the requested procedure.
        procedure: String,
    },

    /// The controller echoed a different procedure code than was requested.
    #[error("RPC mismatch: expected {expected}, received {received}")]
    ProcedureMismatch {
        /// Code of the requested procedure.
        expected: i64,
        /// Code found in the response.
        received: i64,
    },

    /// Non-zero RPC status without a more specific mapping.
    #[error("Unexpected RPC status: 0x{0:06X}")]
    UnexpectedStatus(u32),

    /// PRIO-001: illegal port type.
    #[error("Illegal port type: {io_type}")]
    InvalidIoType {
        /// The port type that was requested.
        io_type: i32,
    },

    /// PRIO-002: illegal port number.
    #[error("Illegal port number for port: {index}")]
    InvalidIoIndex {
        /// The port index that was requested.
        index: i64,
    },

    /// PRIO-023: no ports of this type.
    #[error("No ports of this type, port number: {index}")]
    NoPortsOfThisType {
        /// The port index that was requested.
        index: i64,
    },

    /// PRIO-030: port has no comment.
    #[error("No comment available for port: {index}")]
    NoCommentOnIoPort {
        /// The port index that was requested.
        index: i64,
    },

    /// PRIO-007 reported in `asg_stat`.
    #[error("No such I/O assignment")]
    NoSuchAssignment,

    /// PRIO-011 reported in `asg_stat`.
    #[error("I/O assignment overlaps an existing one")]
    AssignmentOverlapsExistingOne,

    /// VARS-006: unknown variable.
    #[error("Unknown variable: '{name}'")]
    UnknownVariable {
        /// Variable name as sent.
        name: String,
    },

    /// VARS-011: no data defined for program.
    #[error("No data defined for program: '{program}'")]
    NoDataDefinedForProgram {
        /// Program name as sent.
        program: String,
    },

    /// VARS-024: bad variable or register index.
    #[error("Bad variable or register index: '{name}'")]
    BadVariableOrRegisterIndex {
        /// Variable name as sent.
        name: String,
    },

    /// VARS-049: bad element in structure.
    #[error("Bad element in structure: '{name}'")]
    BadElementInStructure {
        /// Variable name as sent.
        name: String,
    },

    /// MEMO-071: position does not exist.
    #[error("No position defined at index {index} in '{program}'")]
    PositionDoesNotExist {
        /// Program name as sent.
        program: String,
        /// Position index that was requested.
        index: i64,
    },

    /// MEMO-073: program does not exist.
    #[error("Program does not exist: '{program}'")]
    ProgramDoesNotExist {
        /// Program name as sent.
        program: String,
    },

    /// DICT-004: dictionary not found.
    #[error("No such dictionary: '{dict}'")]
    DictNotFound {
        /// Dictionary name as sent.
        dict: String,
    },

    /// DICT-005: dictionary element not found.
    #[error("No such element: {element}")]
    DictElementNotFound {
        /// The element (number or error code) that was requested.
        element: String,
    },

    /// MEMO-027: line does not exist.
    #[error("No such line: {line}")]
    NoSuchLine {
        /// Line number that was requested.
        line: i64,
    },

    /// HRTL-022: invalid argument.
    #[error("Invalid argument")]
    InvalidArgument,

    /// Invalid parameter provided by the caller.
    #[error("Invalid parameter '{parameter}': {reason}")]
    InvalidParameter {
        /// Name of the invalid parameter.
        parameter: String,
        /// Description of why the parameter is invalid.
        reason: String,
    },

    /// The request timed out.
    #[error("Communication timeout")]
    Timeout,

    /// Any other HTTP transport failure.
    #[error("HTTP error: {0}")]
    Http(#[from] ureq::Error),
}

impl CometError {
    /// Creates a new `UnexpectedResponseContent` error.
    ///
    /// # Example
    ///
    /// ```
    /// use comet_rpc::CometError;
    ///
    /// let err = CometError::unexpected_response_content("No 'FANUC' in response");
    /// ```
    pub fn unexpected_response_content(reason: impl Into<String>) -> Self {
        Self::UnexpectedResponseContent {
            reason: reason.into(),
        }
    }

    /// Creates a new `Deserialisation` error.
    pub fn deserialisation(reason: impl Into<String>) -> Self {
        Self::Deserialisation {
            reason: reason.into(),
        }
    }

    /// Creates a new `InvalidParameter` error.
    ///
    /// # Example
    ///
    /// ```
    /// use comet_rpc::CometError;
    ///
    /// let err = CometError::invalid_parameter("query", "cannot be combined with parameters");
    /// ```
    pub fn invalid_parameter(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// Returns the RPC status code behind this error, if it is a status-class error.
    ///
    /// Specific errors report their dictionary value, `UnexpectedStatus` its raw code.
    /// Transport and decoding errors return `None`.
    ///
    /// # Example
    ///
    /// ```
    /// use comet_rpc::{CometError, ErrorCode};
    ///
    /// let err = CometError::InvalidIoIndex { index: 5 };
    /// assert_eq!(err.status(), Some(ErrorCode::Prio002.value()));
    ///
    /// assert_eq!(CometError::UnexpectedStatus(0x123456).status(), Some(0x123456));
    /// assert_eq!(CometError::Timeout.status(), None);
    /// ```
    pub fn status(&self) -> Option<u32> {
        let code = match self {
            Self::UnexpectedStatus(status) => return Some(*status),
            Self::InvalidIoType { .. } => ErrorCode::Prio001,
            Self::InvalidIoIndex { .. } => ErrorCode::Prio002,
            Self::NoPortsOfThisType { .. } => ErrorCode::Prio023,
            Self::NoCommentOnIoPort { .. } => ErrorCode::Prio030,
            Self::NoSuchAssignment => ErrorCode::Prio007,
            Self::AssignmentOverlapsExistingOne => ErrorCode::Prio011,
            Self::UnknownVariable { .. } => ErrorCode::Vars006,
            Self::NoDataDefinedForProgram { .. } => ErrorCode::Vars011,
            Self::BadVariableOrRegisterIndex { .. } => ErrorCode::Vars024,
            Self::BadElementInStructure { .. } => ErrorCode::Vars049,
            Self::PositionDoesNotExist { .. } => ErrorCode::Memo071,
            Self::ProgramDoesNotExist { .. } => ErrorCode::Memo073,
            Self::DictNotFound { .. } => ErrorCode::Dict004,
            Self::DictElementNotFound { .. } => ErrorCode::Dict005,
            Self::NoSuchLine { .. } => ErrorCode::Memo027,
            Self::InvalidArgument => ErrorCode::Hrtl022,
            _ => return None,
        };
        Some(code.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unexpected_result_code_display() {
        let err = CometError::UnexpectedResultCode {
            expected: 200,
            actual: 500,
        };
        assert_eq!(err.to_string(), "Unexpected HTTP status: expected 200, got 500");
    }

    #[test]
    fn test_unexpected_status_display() {
        let err = CometError::UnexpectedStatus(0x0D0001);
        assert_eq!(err.to_string(), "Unexpected RPC status: 0x0D0001");
    }

    #[test]
    fn test_invalid_parameter_display() {
        let err = CometError::invalid_parameter("query", "must not be empty");
        assert_eq!(err.to_string(), "Invalid parameter 'query': must not be empty");
    }

    #[test]
    fn test_status_of_specific_errors() {
        assert_eq!(
            CometError::UnknownVariable {
                name: "$FOO".to_string()
            }
            .status(),
            Some(0x100006)
        );
        assert_eq!(CometError::NoSuchAssignment.status(), Some(0x0D0007));
        assert_eq!(CometError::InvalidArgument.status(), Some(0x420016));
    }

    #[test]
    fn test_status_of_transport_errors() {
        assert_eq!(CometError::Authentication.status(), None);
        assert_eq!(CometError::LockedResource.status(), None);
        assert_eq!(CometError::deserialisation("x").status(), None);
    }
}
