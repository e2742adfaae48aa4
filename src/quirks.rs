//! Repairs for malformed response documents.
//!
//! Some system software versions return response bodies that are not valid
//! JSON, or that echo the wrong procedure code. The patcher works on the raw
//! text before decoding, so the decoder only ever sees well-formed documents.
//!
//! Known cases:
//!
//! | Quirk | Procedures | Observed on |
//! |-------|------------|-------------|
//! | [`Quirk::EmptyResultList`] | IOVALSET, IOUNSIM, VMIP_WRITEVA | R-30iB+ V9.30, Roboguide V9.40, Roboguide V8.30 |
//! | [`Quirk::EchoedReadCode`] | IOCKSIM, IOSIM | V9.40 |
//!
//! Results produced by a patch are reported as
//! [`Confirmation::Unverified`](crate::Confirmation::Unverified): the
//! controller did not actually tell us the call succeeded.

use std::borrow::Cow;
use std::fmt;

use crate::error::{CometError, Result};
use crate::procedure::Procedure;

/// Marker of a result list that was emitted without its content.
const EMPTY_RESULT_LIST: &str = r#""RPC":]}}"#;

/// Procedures for which an empty result list is treated as success.
pub const EMPTY_RESULT_LIST_PROCEDURES: [Procedure; 3] = [
    Procedure::IoValSet,
    Procedure::IoUnsim,
    Procedure::VmIpWriteVa,
];

/// Procedures answered with the IOVALRD code on some controllers.
pub const ECHOED_READ_CODE_PROCEDURES: [Procedure; 2] = [Procedure::IoCkSim, Procedure::IoSim];

/// A repair applied to a response document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quirk {
    /// The result list was empty and a generic success result was inserted.
    EmptyResultList,
    /// The result carried the IOVALRD code and was relabelled.
    EchoedReadCode,
}

impl fmt::Display for Quirk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quirk::EmptyResultList => write!(f, "empty result list"),
            Quirk::EchoedReadCode => write!(f, "echoed IOVALRD code"),
        }
    }
}

/// Response text after patching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patched<'a> {
    /// The text to decode.
    pub text: Cow<'a, str>,
    /// The repair that was applied, if any.
    pub quirk: Option<Quirk>,
}

/// Inspects `text` and repairs the known malformed shapes for `requested`.
///
/// # Errors
///
/// Returns `UnexpectedResponseContent` if the result list is empty and
/// `requested` is not known to produce that shape.
///
/// # Example
///
/// ```
/// use comet_rpc::{patch, Procedure, Quirk};
///
/// let body = r#"{"FANUC":{"name":"R1","fastclock":1,"RPC":]}}"#;
/// let patched = patch(body, Procedure::IoValSet).unwrap();
/// assert_eq!(patched.quirk, Some(Quirk::EmptyResultList));
/// assert_eq!(
///     patched.text,
///     r#"{"FANUC":{"name":"R1","fastclock":1,"RPC":[{"rpc":"63","status":"0x0"}]}}"#
/// );
///
/// assert!(patch(body, Procedure::IoValRd).is_err());
/// ```
pub fn patch(text: &str, requested: Procedure) -> Result<Patched<'_>> {
    if text.contains(EMPTY_RESULT_LIST) {
        if !EMPTY_RESULT_LIST_PROCEDURES.contains(&requested) {
            return Err(CometError::unexpected_response_content(format!(
                "Malformed response: '{text}'"
            )));
        }

        log::debug!("{requested}: patching empty result list");
        let replacement = format!(
            r#""RPC":[{{"rpc":"{}","status":"0x0"}}]}}}}"#,
            requested.code()
        );
        return Ok(Patched {
            text: Cow::Owned(text.replace(EMPTY_RESULT_LIST, &replacement)),
            quirk: Some(Quirk::EmptyResultList),
        });
    }

    if ECHOED_READ_CODE_PROCEDURES.contains(&requested) {
        let echoed = format!(r#""rpc":"{}""#, Procedure::IoValRd.code());
        if text.contains(&echoed) {
            log::debug!("{requested}: relabelling echoed IOVALRD result");
            let expected = format!(r#""rpc":"{}""#, requested.code());
            return Ok(Patched {
                text: Cow::Owned(text.replace(&echoed, &expected)),
                quirk: Some(Quirk::EchoedReadCode),
            });
        }
    }

    Ok(Patched {
        text: Cow::Borrowed(text),
        quirk: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMPTY: &str = r#"{"FANUC":{"name":"ROBOT","fastclock":"12345","RPC":]}}"#;

    #[test]
    fn test_empty_result_list_patched_for_allow_list() {
        for p in EMPTY_RESULT_LIST_PROCEDURES {
            let patched = patch(EMPTY, p).unwrap();
            assert_eq!(patched.quirk, Some(Quirk::EmptyResultList));
            let expected = format!(
                r#"{{"FANUC":{{"name":"ROBOT","fastclock":"12345","RPC":[{{"rpc":"{}","status":"0x0"}}]}}}}"#,
                p.code()
            );
            assert_eq!(patched.text, expected);
            assert!(serde_json::from_str::<serde_json::Value>(&patched.text).is_ok());
        }
    }

    #[test]
    fn test_empty_result_list_rejected_otherwise() {
        let err = patch(EMPTY, Procedure::VmIpReadVa).unwrap_err();
        match err {
            CometError::UnexpectedResponseContent { reason } => {
                assert!(reason.contains(EMPTY));
            }
            e => panic!("Expected UnexpectedResponseContent, got {e:?}"),
        }
    }

    #[test]
    fn test_echoed_read_code_relabelled() {
        let body = r#"{"FANUC":{"name":"R","fastclock":1,"RPC":[{"rpc":"62","status":"0x0","type":1,"index":3,"value":1}]}}"#;
        let patched = patch(body, Procedure::IoSim).unwrap();
        assert_eq!(patched.quirk, Some(Quirk::EchoedReadCode));
        assert!(patched.text.contains(r#""rpc":"64""#));
        assert!(!patched.text.contains(r#""rpc":"62""#));

        let patched = patch(body, Procedure::IoCkSim).unwrap();
        assert!(patched.text.contains(r#""rpc":"66""#));
    }

    #[test]
    fn test_echoed_read_code_left_alone_for_read() {
        let body = r#"{"FANUC":{"name":"R","fastclock":1,"RPC":[{"rpc":"62","status":"0x0"}]}}"#;
        let patched = patch(body, Procedure::IoValRd).unwrap();
        assert_eq!(patched.quirk, None);
        assert!(matches!(patched.text, Cow::Borrowed(_)));
    }

    #[test]
    fn test_correct_code_not_marked() {
        let body = r#"{"FANUC":{"name":"R","fastclock":1,"RPC":[{"rpc":"64","status":"0x0"}]}}"#;
        let patched = patch(body, Procedure::IoSim).unwrap();
        assert_eq!(patched.quirk, None);
        assert_eq!(patched.text, body);
    }
}
