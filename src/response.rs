//! COMET response decoding.
//!
//! Every response is a JSON document with a single `FANUC` key wrapping a
//! common envelope:
//!
//! ```text
//! {"FANUC":{"name":"R1","fastclock":123,"RPC":[{"rpc":"62","status":"0x0", ...}]}}
//! ```
//!
//! | Field | Description |
//! |-------|-------------|
//! | `name` | Host name of the controller |
//! | `fastclock` | Controller clock (plain or quoted integer) |
//! | `RPC` | Result elements, exactly one in practice |
//!
//! Each result element carries the echoed procedure code (`rpc`, quoted) and
//! a hex status (`status`), plus procedure-specific fields. The decoder picks
//! the result shape registered for the echoed code. If there is none, the
//! code is the unsupported-procedure sentinel, or the fields don't match the
//! shape (usually because the status is non-zero), the element decodes to
//! [`ResultBody::Generic`].
//!
//! # Example
//!
//! ```
//! use comet_rpc::{IoType, ResultBody, RpcResponse};
//!
//! let text = r#"{"FANUC":{"name":"R1","fastclock":123,"RPC":[{"rpc":"62","status":"0x0","type":1,"index":5,"value":1}]}}"#;
//! let response = RpcResponse::from_json(text).unwrap();
//! assert_eq!(response.name, "R1");
//!
//! let result = &response.results[0];
//! assert_eq!(result.status, 0);
//! match &result.body {
//!     ResultBody::IoPort(port) => {
//!         assert_eq!(port.io_type, IoType::DigitalIn);
//!         assert_eq!(port.index, 5);
//!         assert_eq!(port.value, 1);
//!     }
//!     other => panic!("unexpected body: {other:?}"),
//! }
//! ```

use serde::Deserialize;
use serde_json::Value;

use crate::de;
use crate::error::{CometError, Result};
use crate::procedure::{is_unsupported_code, Procedure};
use crate::quirks::Quirk;
use crate::status::{ErrorCode, STATUS_OK};
use crate::types::{IoType, PositionType};

/// Top-level key of every response document.
pub const ENVELOPE_TAG: &str = "FANUC";

/// Whether the controller actually reported the outcome of a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Confirmation {
    /// The result came from the controller as-is.
    Confirmed,
    /// The result was reconstructed from a malformed response; success is
    /// assumed, not reported.
    Unverified(Quirk),
}

impl Confirmation {
    /// Returns whether the controller reported the result itself.
    pub fn is_confirmed(self) -> bool {
        matches!(self, Confirmation::Confirmed)
    }
}

/// Decoded response envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct RpcResponse {
    /// Host name of the controller.
    pub name: String,
    /// Controller clock.
    pub fastclock: i64,
    /// Result elements. Always exactly one after decoding.
    pub results: Vec<RpcResult>,
    /// The quirk that was patched before decoding, if any.
    pub quirk: Option<Quirk>,
}

#[derive(Deserialize)]
struct EnvelopeWire {
    name: String,
    #[serde(deserialize_with = "de::integer")]
    fastclock: i64,
    #[serde(rename = "RPC")]
    results: Vec<Value>,
}

#[derive(Deserialize)]
struct ResultHeader {
    #[serde(deserialize_with = "de::integer")]
    rpc: i64,
    #[serde(deserialize_with = "de::hex_status")]
    status: u32,
}

impl RpcResponse {
    /// Decodes a response document.
    ///
    /// # Errors
    ///
    /// - `UnexpectedResponseContent` if the text is not JSON, or not an object
    ///   with `FANUC` as its only key
    /// - `Deserialisation` if the envelope fields are invalid, the result list
    ///   does not hold exactly one element, or that element lacks `rpc`/`status`
    pub fn from_json(text: &str) -> Result<Self> {
        Self::parse(text, None)
    }

    /// Decodes a response to a request for `requested`.
    ///
    /// Unlike [`RpcResponse::from_json`], result bodies take the shape
    /// registered for `requested` whatever code the controller echoed, unless
    /// it echoed an unsupported-procedure sentinel.
    ///
    /// # Errors
    ///
    /// Same as [`RpcResponse::from_json`].
    pub fn from_json_as(text: &str, requested: Procedure) -> Result<Self> {
        Self::parse(text, Some(requested))
    }

    fn parse(text: &str, requested: Option<Procedure>) -> Result<Self> {
        let doc: Value = serde_json::from_str(text).map_err(|e| {
            CometError::unexpected_response_content(format!("invalid JSON ({e}): '{text}'"))
        })?;

        let envelope = match doc.as_object() {
            Some(outer) if outer.len() == 1 => outer.get(ENVELOPE_TAG),
            _ => None,
        }
        .ok_or_else(|| CometError::unexpected_response_content("No 'FANUC' in response"))?;

        let wire = EnvelopeWire::deserialize(envelope)
            .map_err(|e| CometError::deserialisation(format!("invalid envelope: {e}")))?;

        if wire.results.len() != 1 {
            return Err(CometError::deserialisation(format!(
                "Unexpected number of response elements: expected 1, got {}",
                wire.results.len()
            )));
        }

        let results = wire
            .results
            .iter()
            .map(|element| RpcResult::from_value(element, requested))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            name: wire.name,
            fastclock: wire.fastclock,
            results,
            quirk: None,
        })
    }

    /// Returns whether the controller reported the result itself.
    pub fn confirmation(&self) -> Confirmation {
        match self.quirk {
            Some(quirk) => Confirmation::Unverified(quirk),
            None => Confirmation::Confirmed,
        }
    }

    /// Consumes the envelope and returns its single result.
    ///
    /// # Errors
    ///
    /// Returns `Deserialisation` if the envelope holds no result.
    pub fn into_result(self) -> Result<RpcResult> {
        self.results
            .into_iter()
            .next()
            .ok_or_else(|| CometError::deserialisation("response holds no result element"))
    }
}

/// One decoded result element.
#[derive(Debug, Clone, PartialEq)]
pub struct RpcResult {
    /// Procedure code echoed by the controller.
    pub rpc: i64,
    /// 24-bit status, `0` on success.
    pub status: u32,
    /// Procedure-specific payload.
    pub body: ResultBody,
}

impl RpcResult {
    fn from_value(element: &Value, requested: Option<Procedure>) -> Result<Self> {
        let header = ResultHeader::deserialize(element)
            .map_err(|e| CometError::deserialisation(format!("invalid result element: {e}")))?;

        let procedure = if is_unsupported_code(header.rpc) {
            None
        } else {
            requested.or_else(|| Procedure::from_code(header.rpc))
        };

        let body = match procedure {
            Some(p) => ResultBody::decode(p, element).unwrap_or_else(|e| {
                log::debug!("{p}: using generic result (status 0x{:06X}): {e}", header.status);
                ResultBody::Generic
            }),
            None => {
                log::debug!("unregistered RPC code {}: using generic result", header.rpc);
                ResultBody::Generic
            }
        };

        Ok(Self {
            rpc: header.rpc,
            status: header.status,
            body,
        })
    }

    /// Returns the registered procedure for the echoed code.
    pub fn procedure(&self) -> Option<Procedure> {
        Procedure::from_code(self.rpc)
    }

    /// Returns whether the status indicates success.
    pub fn is_success(&self) -> bool {
        self.status == STATUS_OK
    }

    /// Looks the status up in the status dictionary.
    pub fn error_code(&self) -> Option<ErrorCode> {
        ErrorCode::from_status(self.status)
    }

    /// Fails with `UnexpectedStatus` on a non-zero status.
    pub fn check_status(&self) -> Result<()> {
        if self.is_success() {
            Ok(())
        } else {
            Err(CometError::UnexpectedStatus(self.status))
        }
    }
}

/// Procedure-specific result payloads.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultBody {
    /// Only `rpc` and `status`. Procedures without payload, unregistered
    /// codes and results that did not match their registered shape.
    Generic,
    /// IOVALRD, IOSIM, IOCKSIM, IOUNSIM.
    IoPort(IoPortValue),
    /// IOGTALL.
    IoPorts(Vec<IoPortState>),
    /// IOASGLOG.
    AssignmentUpdate(AssignmentUpdate),
    /// IOGETASG.
    Assignments(Vec<IoAssignment>),
    /// IOGETHDB.
    HardwareDb(Vec<HardwareEntry>),
    /// VMIP_READVA.
    Variable(VariableValue),
    /// REGVALRD.
    Register(RegisterContents),
    /// POSREGVALRD.
    PositionRegister(PositionRegister),
    /// DPREAD, DPEWRITE_STR, IOGETPN, SCGETPOS, TXML_CURPOS, TXML_CURANG.
    Text(String),
    /// GTFILIST, GTMCRLST.
    Names(Vec<String>),
    /// GTPIDLST.
    PositionIds(Vec<i64>),
    /// GET_RAW_FILE.
    FileLines(Vec<FileLine>),
    /// MMGETTYP.
    ProgramType(ProgramTypeInfo),
}

#[derive(Deserialize)]
struct TextWire {
    #[serde(deserialize_with = "de::text")]
    value: String,
}

#[derive(Deserialize)]
struct NamesWire {
    #[serde(deserialize_with = "de::string_list")]
    value: Vec<String>,
}

#[derive(Deserialize)]
struct PositionIdsWire {
    #[serde(deserialize_with = "de::integer_list")]
    value: Vec<i64>,
}

#[derive(Deserialize)]
struct IoPortsWire {
    value: Vec<IoPortState>,
}

#[derive(Deserialize)]
struct AssignmentsWire {
    data: Vec<IoAssignment>,
}

#[derive(Deserialize)]
struct HardwareDbWire {
    value: Vec<HardwareEntry>,
}

#[derive(Deserialize)]
struct FileLinesWire {
    lines: Vec<FileLine>,
}

impl ResultBody {
    fn decode(procedure: Procedure, element: &Value) -> serde_json::Result<Self> {
        let body = match procedure {
            Procedure::IoValRd | Procedure::IoSim | Procedure::IoCkSim | Procedure::IoUnsim => {
                ResultBody::IoPort(IoPortValue::deserialize(element)?)
            }
            Procedure::IoGtAll => ResultBody::IoPorts(IoPortsWire::deserialize(element)?.value),
            Procedure::IoAsgLog => {
                ResultBody::AssignmentUpdate(AssignmentUpdate::deserialize(element)?)
            }
            Procedure::IoGetAsg => {
                ResultBody::Assignments(AssignmentsWire::deserialize(element)?.data)
            }
            Procedure::IoGetHdb => {
                ResultBody::HardwareDb(HardwareDbWire::deserialize(element)?.value)
            }
            Procedure::VmIpReadVa => ResultBody::Variable(VariableValue::deserialize(element)?),
            Procedure::RegValRd => ResultBody::Register(RegisterContents::deserialize(element)?),
            Procedure::PosRegValRd => {
                ResultBody::PositionRegister(PositionRegister::deserialize(element)?)
            }
            Procedure::DpRead
            | Procedure::DpeWriteStr
            | Procedure::IoGetPn
            | Procedure::ScGetPos
            | Procedure::TxMlCurPos
            | Procedure::TxMlCurAng => ResultBody::Text(TextWire::deserialize(element)?.value),
            Procedure::GtFiList | Procedure::GtMcrLst => {
                ResultBody::Names(NamesWire::deserialize(element)?.value)
            }
            Procedure::GtPIdLst => {
                ResultBody::PositionIds(PositionIdsWire::deserialize(element)?.value)
            }
            Procedure::GetRawFile => {
                ResultBody::FileLines(FileLinesWire::deserialize(element)?.lines)
            }
            Procedure::MmGetTyp => ResultBody::ProgramType(ProgramTypeInfo::deserialize(element)?),
            Procedure::ChgOvrd
            | Procedure::CpKcl
            | Procedure::ErPost
            | Procedure::IoDefPn
            | Procedure::IoDryRun
            | Procedure::IoValSet
            | Procedure::IoWetRun
            | Procedure::LocalStart
            | Procedure::MmCreMn
            | Procedure::MmMsOpen
            | Procedure::PasteLin
            | Procedure::PgAbort
            | Procedure::RecPos
            | Procedure::RemarkLin
            | Procedure::RPrintf
            | Procedure::TxChgPrg
            | Procedure::TxSetLin
            | Procedure::VmIpWriteVa => ResultBody::Generic,
        };
        Ok(body)
    }
}

/// Value of a single I/O port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct IoPortValue {
    /// Port type.
    #[serde(rename = "type", deserialize_with = "de::code")]
    pub io_type: IoType,
    /// Port index (1-based).
    #[serde(deserialize_with = "de::integer")]
    pub index: i64,
    /// Port value. Booleans are `0`/`1`.
    #[serde(deserialize_with = "de::integer")]
    pub value: i64,
}

/// State of one port in an IOGTALL listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IoPortState {
    /// Port index.
    #[serde(deserialize_with = "de::integer")]
    pub index: i64,
    /// Port value.
    #[serde(rename = "val", deserialize_with = "de::integer")]
    pub value: i64,
    /// Whether the port is simulated.
    #[serde(rename = "sim", deserialize_with = "de::flag")]
    pub simulated: bool,
    /// Port comment.
    #[serde(default)]
    pub comment: String,
}

/// Secondary outcome of an IOASGLOG call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct AssignmentUpdate {
    /// Assignment status, independent of the result's `status`.
    #[serde(rename = "asg_stat", deserialize_with = "de::hex_status")]
    pub assignment_status: u32,
}

/// One I/O range assignment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IoAssignment {
    /// Logical port type code.
    #[serde(deserialize_with = "de::integer")]
    pub log_port_type: i64,
    /// First logical port.
    #[serde(rename = "fst_log_port", deserialize_with = "de::integer")]
    pub first_log_port: i64,
    /// Number of logical ports.
    #[serde(rename = "n_log_ports", deserialize_with = "de::integer")]
    pub log_port_count: i64,
    /// Rack number.
    #[serde(rename = "rack_no", deserialize_with = "de::integer")]
    pub rack: i64,
    /// Slot number.
    #[serde(rename = "slot_no", deserialize_with = "de::integer")]
    pub slot: i64,
    /// Physical port type codes.
    #[serde(rename = "phy_port_type", deserialize_with = "de::integer_list")]
    pub phy_port_types: Vec<i64>,
    /// First physical port.
    #[serde(rename = "fst_phy_port", deserialize_with = "de::integer")]
    pub first_phy_port: i64,
    /// Whether the assignment is active (`false` while pending a restart).
    #[serde(deserialize_with = "de::flag")]
    pub valid: bool,
}

/// One entry of the I/O hardware database.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HardwareEntry {
    /// Rack number.
    #[serde(deserialize_with = "de::integer")]
    pub rack: i64,
    /// Slot number.
    #[serde(deserialize_with = "de::integer")]
    pub slot: i64,
    /// Physical port types supported by the device.
    #[serde(rename = "type", deserialize_with = "de::integer_list")]
    pub port_types: Vec<i64>,
}

/// A variable read with VMIP_READVA.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VariableValue {
    /// Program hosting the variable.
    pub prog_name: String,
    /// Variable name.
    pub var_name: String,
    /// Controller type code of the variable.
    #[serde(deserialize_with = "de::integer")]
    pub type_code: i64,
    /// String rendering of the value, as in `.VA` files.
    #[serde(deserialize_with = "de::text")]
    pub value: String,
}

/// Numeric register value.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RegisterValue {
    /// Integer register.
    Int(i64),
    /// Real register.
    Real(f64),
}

/// Contents of a numeric register.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RegisterContents {
    /// Register type code.
    #[serde(rename = "type", deserialize_with = "de::integer")]
    pub reg_type: i64,
    /// Register value.
    pub value: RegisterValue,
    /// Register comment.
    #[serde(default)]
    pub comment: String,
}

/// Contents of a position register.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PositionRegister {
    /// Representation of the position.
    #[serde(rename = "type", deserialize_with = "de::code")]
    pub pos_type: PositionType,
    /// Register comment.
    #[serde(default)]
    pub comment: String,
    /// String rendering of the position.
    #[serde(deserialize_with = "de::text")]
    pub value: String,
}

/// One line of a downloaded file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FileLine {
    /// Line bytes, including any terminator.
    #[serde(deserialize_with = "de::base64_bytes")]
    pub buf: Vec<u8>,
}

/// Program type as reported by MMGETTYP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ProgramTypeInfo {
    /// Program type code.
    #[serde(deserialize_with = "de::integer")]
    pub prog_type: i64,
    /// Program sub-type code.
    #[serde(deserialize_with = "de::integer")]
    pub sub_type: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope(element: &str) -> String {
        format!(r#"{{"FANUC":{{"name":"R1","fastclock":123,"RPC":[{element}]}}}}"#)
    }

    fn decode_one(element: &str) -> RpcResult {
        RpcResponse::from_json(&envelope(element))
            .unwrap()
            .into_result()
            .unwrap()
    }

    #[test]
    fn test_io_read() {
        let result = decode_one(r#"{"rpc":"62","status":"0x0","type":1,"index":5,"value":1}"#);
        assert_eq!(result.rpc, 62);
        assert_eq!(result.procedure(), Some(Procedure::IoValRd));
        assert!(result.is_success());
        assert_eq!(
            result.body,
            ResultBody::IoPort(IoPortValue {
                io_type: IoType::DigitalIn,
                index: 5,
                value: 1
            })
        );
    }

    #[test]
    fn test_quoted_port_type() {
        let result = decode_one(r#"{"rpc":"62","status":"0x0","type":"1","index":"5","value":"0"}"#);
        match result.body {
            ResultBody::IoPort(port) => {
                assert_eq!(port.io_type, IoType::DigitalIn);
                assert_eq!(port.index, 5);
                assert_eq!(port.value, 0);
            }
            other => panic!("Expected IoPort, got {other:?}"),
        }
    }

    #[test]
    fn test_from_json_as_uses_requested_shape() {
        let text = envelope(r#"{"rpc":"40","status":"0x0","type":1,"index":3,"value":1}"#);

        let by_echo = RpcResponse::from_json(&text).unwrap().into_result().unwrap();
        assert_eq!(by_echo.body, ResultBody::Generic);

        let by_request = RpcResponse::from_json_as(&text, Procedure::IoSim)
            .unwrap()
            .into_result()
            .unwrap();
        assert_eq!(by_request.rpc, 40);
        assert!(matches!(by_request.body, ResultBody::IoPort(_)));
    }

    #[test]
    fn test_from_json_as_sentinel_stays_generic() {
        let text = envelope(r#"{"rpc":"-1","status":"0x0"}"#);
        let result = RpcResponse::from_json_as(&text, Procedure::IoValRd)
            .unwrap()
            .into_result()
            .unwrap();
        assert_eq!(result.body, ResultBody::Generic);
    }

    #[test]
    fn test_envelope_fields() {
        let text = r#"{"FANUC":{"name":"ROBOT","fastclock":"987654","RPC":[{"rpc":"63","status":"0x0"}]}}"#;
        let response = RpcResponse::from_json(text).unwrap();
        assert_eq!(response.name, "ROBOT");
        assert_eq!(response.fastclock, 987654);
        assert_eq!(response.results.len(), 1);
        assert_eq!(response.quirk, None);
        assert_eq!(response.confirmation(), Confirmation::Confirmed);
    }

    #[test]
    fn test_non_zero_status_falls_back_to_generic() {
        let result = decode_one(r#"{"rpc":"62","status":"0xD0002"}"#);
        assert_eq!(result.status, 0x0D0002);
        assert_eq!(result.body, ResultBody::Generic);
        assert_eq!(result.error_code(), Some(ErrorCode::Prio002));
        assert!(matches!(
            result.check_status(),
            Err(CometError::UnexpectedStatus(0x0D0002))
        ));
    }

    #[test]
    fn test_unregistered_code_is_generic() {
        let result = decode_one(r#"{"rpc":"999","status":"0x0","value":"x"}"#);
        assert_eq!(result.rpc, 999);
        assert_eq!(result.procedure(), None);
        assert_eq!(result.body, ResultBody::Generic);
    }

    #[test]
    fn test_sentinel_codes_are_generic() {
        for code in ["-1", "0"] {
            let result = decode_one(&format!(r#"{{"rpc":"{code}","status":"0x0"}}"#));
            assert_eq!(result.body, ResultBody::Generic);
        }
    }

    #[test]
    fn test_not_json() {
        let err = RpcResponse::from_json("<html>nope</html>").unwrap_err();
        assert!(matches!(err, CometError::UnexpectedResponseContent { .. }));
    }

    #[test]
    fn test_wrong_outer_key() {
        let err = RpcResponse::from_json(r#"{"ROBOT":{}}"#).unwrap_err();
        match err {
            CometError::UnexpectedResponseContent { reason } => {
                assert_eq!(reason, "No 'FANUC' in response");
            }
            e => panic!("Expected UnexpectedResponseContent, got {e:?}"),
        }
    }

    #[test]
    fn test_extra_outer_key() {
        let text = r#"{"FANUC":{"name":"R","fastclock":1,"RPC":[]},"X":1}"#;
        assert!(matches!(
            RpcResponse::from_json(text),
            Err(CometError::UnexpectedResponseContent { .. })
        ));
    }

    #[test]
    fn test_outer_not_object() {
        assert!(matches!(
            RpcResponse::from_json("[1,2]"),
            Err(CometError::UnexpectedResponseContent { .. })
        ));
    }

    #[test]
    fn test_zero_results() {
        let text = r#"{"FANUC":{"name":"R","fastclock":1,"RPC":[]}}"#;
        match RpcResponse::from_json(text).unwrap_err() {
            CometError::Deserialisation { reason } => assert!(reason.contains("got 0")),
            e => panic!("Expected Deserialisation, got {e:?}"),
        }
    }

    #[test]
    fn test_two_results() {
        let element = r#"{"rpc":"63","status":"0x0"}"#;
        let text = format!(
            r#"{{"FANUC":{{"name":"R","fastclock":1,"RPC":[{element},{element}]}}}}"#
        );
        match RpcResponse::from_json(&text).unwrap_err() {
            CometError::Deserialisation { reason } => assert!(reason.contains("got 2")),
            e => panic!("Expected Deserialisation, got {e:?}"),
        }
    }

    #[test]
    fn test_missing_status_is_deserialisation_error() {
        let text = envelope(r#"{"rpc":"62"}"#);
        assert!(matches!(
            RpcResponse::from_json(&text),
            Err(CometError::Deserialisation { .. })
        ));
    }

    #[test]
    fn test_variable_read() {
        let result = decode_one(
            r#"{"rpc":"31","status":"0x0","prog_name":"*SYSTEM*","var_name":"$MCR.$GENOVERRIDE","type_code":16,"value":"100"}"#,
        );
        match result.body {
            ResultBody::Variable(v) => {
                assert_eq!(v.prog_name, "*SYSTEM*");
                assert_eq!(v.var_name, "$MCR.$GENOVERRIDE");
                assert_eq!(v.type_code, 16);
                assert_eq!(v.value, "100");
            }
            other => panic!("unexpected body: {other:?}"),
        }
    }

    #[test]
    fn test_register_read_int_and_real() {
        let int = decode_one(r#"{"rpc":"247","status":"0x0","type":16,"value":42,"comment":"count"}"#);
        match int.body {
            ResultBody::Register(r) => {
                assert_eq!(r.value, RegisterValue::Int(42));
                assert_eq!(r.comment, "count");
            }
            other => panic!("unexpected body: {other:?}"),
        }

        let real = decode_one(r#"{"rpc":"247","status":"0x0","type":17,"value":1.5,"comment":""}"#);
        match real.body {
            ResultBody::Register(r) => assert_eq!(r.value, RegisterValue::Real(1.5)),
            other => panic!("unexpected body: {other:?}"),
        }
    }

    #[test]
    fn test_position_register() {
        let result = decode_one(
            r#"{"rpc":"248","status":"0x0","type":9,"comment":"home","value":"0.0,0.0,0.0"}"#,
        );
        match result.body {
            ResultBody::PositionRegister(p) => {
                assert_eq!(p.pos_type, PositionType::JointPos);
                assert_eq!(p.comment, "home");
            }
            other => panic!("unexpected body: {other:?}"),
        }
    }

    #[test]
    fn test_text_results() {
        for code in [148, 83, 67, 24, 90, 91] {
            let result = decode_one(&format!(
                r#"{{"rpc":"{code}","status":"0x0","value":"some text"}}"#
            ));
            assert_eq!(result.body, ResultBody::Text("some text".to_string()));
        }
    }

    #[test]
    fn test_io_get_all() {
        let result = decode_one(
            r#"{"rpc":"226","status":"0x0","value":[{"index":1,"val":1,"sim":false,"comment":"a"},{"index":2,"val":0,"sim":true,"comment":""}]}"#,
        );
        match result.body {
            ResultBody::IoPorts(ports) => {
                assert_eq!(ports.len(), 2);
                assert_eq!(ports[0].value, 1);
                assert!(!ports[0].simulated);
                assert!(ports[1].simulated);
                assert_eq!(ports[0].comment, "a");
            }
            other => panic!("unexpected body: {other:?}"),
        }
    }

    #[test]
    fn test_file_listing_is_split() {
        let result = decode_one(
            r#"{"rpc":"234","status":"0x0","value":"MD:ERRALL.LS,MD:SUMMARY.DG,MD:MAIN.TP"}"#,
        );
        assert_eq!(
            result.body,
            ResultBody::Names(vec![
                "MD:ERRALL.LS".to_string(),
                "MD:SUMMARY.DG".to_string(),
                "MD:MAIN.TP".to_string()
            ])
        );
    }

    #[test]
    fn test_position_ids_are_parsed() {
        let result = decode_one(r#"{"rpc":"238","status":"0x0","value":"1,2,5,10"}"#);
        assert_eq!(result.body, ResultBody::PositionIds(vec![1, 2, 5, 10]));
    }

    #[test]
    fn test_raw_file_lines_keep_terminators() {
        let result = decode_one(
            r#"{"rpc":"251","status":"0x0","lines":[{"buf":"L1BST0c="},{"buf":"bGluZSAxDQoA"}]}"#,
        );
        match result.body {
            ResultBody::FileLines(lines) => {
                assert_eq!(lines.len(), 2);
                assert_eq!(lines[0].buf, b"/PROG".to_vec());
                assert_eq!(lines[1].buf, b"line 1\r\n\0".to_vec());
            }
            other => panic!("unexpected body: {other:?}"),
        }
    }

    #[test]
    fn test_assignment_status_is_hex() {
        let result = decode_one(r#"{"rpc":"70","status":"0x0","asg_stat":"0xD0007"}"#);
        assert_eq!(
            result.body,
            ResultBody::AssignmentUpdate(AssignmentUpdate {
                assignment_status: ErrorCode::Prio007.value()
            })
        );
    }

    #[test]
    fn test_assignments() {
        let result = decode_one(
            r#"{"rpc":"69","status":"0x0","data":[{"log_port_type":1,"fst_log_port":1,"n_log_ports":8,"rack_no":0,"slot_no":1,"phy_port_type":"1,2","fst_phy_port":1,"valid":1}]}"#,
        );
        match result.body {
            ResultBody::Assignments(asgs) => {
                assert_eq!(asgs.len(), 1);
                assert_eq!(asgs[0].log_port_count, 8);
                assert_eq!(asgs[0].phy_port_types, vec![1, 2]);
                assert!(asgs[0].valid);
            }
            other => panic!("unexpected body: {other:?}"),
        }
    }

    #[test]
    fn test_hardware_db() {
        let result = decode_one(
            r#"{"rpc":"71","status":"0x0","value":[{"rack":0,"slot":1,"type":"1,2"},{"rack":48,"slot":1,"type":"3"}]}"#,
        );
        match result.body {
            ResultBody::HardwareDb(entries) => {
                assert_eq!(entries.len(), 2);
                assert_eq!(entries[0].port_types, vec![1, 2]);
                assert_eq!(entries[1].rack, 48);
                assert_eq!(entries[1].port_types, vec![3]);
            }
            other => panic!("unexpected body: {other:?}"),
        }
    }

    #[test]
    fn test_program_type() {
        let result = decode_one(r#"{"rpc":"23","status":"0x0","prog_type":"1","sub_type":0}"#);
        assert_eq!(
            result.body,
            ResultBody::ProgramType(ProgramTypeInfo {
                prog_type: 1,
                sub_type: 0
            })
        );
    }

    #[test]
    fn test_payloadless_procedures_are_generic() {
        for p in [Procedure::IoValSet, Procedure::TxSetLin, Procedure::RPrintf] {
            let result = decode_one(&format!(r#"{{"rpc":"{}","status":"0x0"}}"#, p.code()));
            assert_eq!(result.procedure(), Some(p));
            assert_eq!(result.body, ResultBody::Generic);
        }
    }

    #[test]
    fn test_decoding_is_deterministic() {
        let element = r#"{"rpc":"62","status":"0x0","type":2,"index":7,"value":0}"#;
        assert_eq!(decode_one(element), decode_one(element));
    }
}
