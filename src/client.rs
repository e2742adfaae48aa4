//! High-level COMET client for FANUC robot controllers.
//!
//! This module provides the [`Client`] struct, which is the primary interface
//! for invoking COMET procedures.
//!
//! # Overview
//!
//! Every call goes through the same pipeline:
//! - Query construction and the HTTP exchange ([`HttpTransport`])
//! - Repair of known malformed responses ([`patch`](crate::patch))
//! - Envelope decoding ([`RpcResponse::from_json`])
//! - Correlation of the echoed procedure code with the requested one
//!
//! The per-procedure methods then map the result status to specific errors
//! and return the payload.
//!
//! # Example
//!
//! ```no_run
//! use comet_rpc::{Client, ClientConfig, IoType};
//!
//! let client = Client::new(ClientConfig::new("192.168.1.10"))?;
//!
//! // Read DI[5]
//! let value = client.iovalrd(IoType::DigitalIn, 5)?;
//!
//! // Write DO[3]
//! client.iovalset(IoType::DigitalOut, 3, 1)?;
//!
//! // Read a system variable
//! let var = client.vmip_readva("*SYSTEM*", "$MCR.$GENOVERRIDE")?;
//! println!("override: {}", var.value);
//! # Ok::<(), comet_rpc::CometError>(())
//! ```
//!
//! # Thread Safety
//!
//! The `Client` only holds immutable configuration and an HTTP agent, so it
//! can be shared between threads. Each call blocks until the response arrives
//! or the timeout expires.

use std::fmt::Display;
use std::time::Duration;

use crate::error::{CometError, Result};
use crate::procedure::{is_unsupported_code, Procedure};
use crate::quirks;
use crate::request::{FuncEncoding, Request};
use crate::response::{
    Confirmation, FileLine, HardwareEntry, IoAssignment, IoPortState, PositionRegister,
    ProgramTypeInfo, RegisterContents, ResultBody, RpcResponse, RpcResult, VariableValue,
};
use crate::status::ErrorCode;
use crate::transport::{HttpTransport, DEFAULT_COMET_PORT, DEFAULT_TIMEOUT};
use crate::types::{AssignmentSpec, IoType, Override, PasteLineOper, RemarkLineOper};

/// Task name that makes PGABORT abort every running program.
pub const ABORT_ALL: &str = "*ALL*";

/// Configuration for creating a COMET client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Controller host name or IP address.
    pub host: String,
    /// HTTP port of the controller's web server.
    pub port: u16,
    /// Timeout of a single call.
    pub timeout: Duration,
    /// How the `func` parameter identifies the procedure.
    pub func_encoding: FuncEncoding,
}

impl ClientConfig {
    /// Creates a new client configuration for `host`.
    ///
    /// Uses port 80, a 1 second timeout and numeric procedure codes.
    ///
    /// # Example
    ///
    /// ```
    /// use comet_rpc::ClientConfig;
    ///
    /// let config = ClientConfig::new("192.168.1.10");
    /// assert_eq!(config.port, 80);
    /// ```
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_COMET_PORT,
            timeout: DEFAULT_TIMEOUT,
            func_encoding: FuncEncoding::default(),
        }
    }

    /// Sets a custom port (default is 80).
    ///
    /// # Example
    ///
    /// ```
    /// use comet_rpc::ClientConfig;
    ///
    /// let config = ClientConfig::new("127.0.0.1").with_port(8080);
    /// ```
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets a custom timeout (default is 1 second).
    ///
    /// # Example
    ///
    /// ```
    /// use comet_rpc::ClientConfig;
    /// use std::time::Duration;
    ///
    /// let config = ClientConfig::new("192.168.1.10").with_timeout(Duration::from_secs(5));
    /// ```
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets how the `func` parameter is encoded (default is the numeric code).
    ///
    /// Some system software versions only accept symbolic names.
    pub fn with_func_encoding(mut self, encoding: FuncEncoding) -> Self {
        self.func_encoding = encoding;
        self
    }
}

/// A result together with its confirmation state.
///
/// Returned by the procedures that are affected by malformed responses on
/// some controllers (IOVALSET, IOUNSIM, VMIP_WRITEVA, IOSIM and IOCKSIM).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reply<T> {
    /// The decoded value.
    pub value: T,
    /// Whether the controller reported the outcome itself.
    pub confirmation: Confirmation,
}

impl<T> Reply<T> {
    /// Returns whether the controller reported the outcome itself.
    pub fn is_confirmed(&self) -> bool {
        self.confirmation.is_confirmed()
    }

    /// Discards the confirmation state.
    pub fn into_value(self) -> T {
        self.value
    }
}

/// COMET client for FANUC robot controllers.
///
/// Each operation produces exactly 1 HTTP request and decodes exactly 1
/// response. No automatic retries or caching.
///
/// # Example
///
/// ```no_run
/// use comet_rpc::{Client, ClientConfig};
///
/// let client = Client::new(ClientConfig::new("192.168.1.10")).unwrap();
///
/// for file in client.gtfilist("MD:*.tp").unwrap() {
///     println!("{file}");
/// }
/// ```
#[derive(Clone)]
pub struct Client {
    transport: HttpTransport,
    host: String,
}

impl Client {
    /// Creates a new COMET client with the given configuration.
    ///
    /// No connection is made until the first call.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the host is empty or contains whitespace.
    ///
    /// # Example
    ///
    /// ```
    /// use comet_rpc::{Client, ClientConfig};
    ///
    /// let client = Client::new(ClientConfig::new("192.168.1.10")).unwrap();
    /// assert!(Client::new(ClientConfig::new("")).is_err());
    /// ```
    pub fn new(config: ClientConfig) -> Result<Self> {
        if config.host.is_empty() {
            return Err(CometError::invalid_parameter("host", "must not be empty"));
        }
        if config.host.chars().any(char::is_whitespace) {
            return Err(CometError::invalid_parameter(
                "host",
                format!("must not contain whitespace: '{}'", config.host),
            ));
        }

        let transport = HttpTransport::new(
            &config.host,
            config.port,
            config.timeout,
            config.func_encoding,
        );
        Ok(Self {
            transport,
            host: config.host,
        })
    }

    /// Invokes a procedure and returns the decoded response.
    ///
    /// The result status is not interpreted; callers inspect
    /// [`RpcResult::status`] themselves.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The HTTP exchange fails or returns a status other than 200
    /// - The response document is malformed and cannot be repaired
    /// - The controller does not support the procedure (`UnsupportedProcedure`)
    /// - The controller answered for another procedure with a confirmed
    ///   code (`ProcedureMismatch`)
    ///
    /// # Example
    ///
    /// ```no_run
    /// use comet_rpc::{Client, ClientConfig, Procedure, Request};
    ///
    /// let client = Client::new(ClientConfig::new("192.168.1.10")).unwrap();
    ///
    /// let request = Request::new(Procedure::IoValRd).param("type", 1).param("index", 5);
    /// let response = client.call(&request).unwrap();
    /// println!("status: 0x{:06X}", response.results[0].status);
    /// ```
    pub fn call(&self, request: &Request) -> Result<RpcResponse> {
        let text = self.transport.send(request)?;
        decode_response(request.procedure(), &text)
    }

    /// Invokes a procedure and returns the response body unparsed.
    ///
    /// HTTP errors are still reported; the body itself is neither patched nor
    /// decoded.
    pub fn call_raw(&self, request: &Request) -> Result<String> {
        self.transport.send(request)
    }

    /// Returns the controller host.
    pub fn host(&self) -> &str {
        &self.host
    }

    fn invoke(&self, request: Request) -> Result<(RpcResult, Confirmation)> {
        let response = self.call(&request)?;
        let confirmation = response.confirmation();
        Ok((response.into_result()?, confirmation))
    }

    /// Changes the general override.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use comet_rpc::{Client, ClientConfig, Override};
    ///
    /// let client = Client::new(ClientConfig::new("192.168.1.10")).unwrap();
    /// client.change_override(Override::Percent(50)).unwrap();
    /// ```
    pub fn change_override(&self, value: Override) -> Result<()> {
        let req = Request::new(Procedure::ChgOvrd).param("ovrd_val", value.value());
        let (result, _) = self.invoke(req)?;
        check(&result, no_mapping)
    }

    /// Reads element `ele_no` from dictionary `dict_name`.
    ///
    /// # Errors
    ///
    /// - `DictNotFound` if the dictionary does not exist
    /// - `DictElementNotFound` if the element does not exist
    pub fn dpread(&self, dict_name: &str, ele_no: u32) -> Result<String> {
        let req = Request::new(Procedure::DpRead)
            .param("dict_name", dict_name)
            .param("ele_no", ele_no);
        let (result, _) = self.invoke(req)?;
        check(&result, |code| match code {
            ErrorCode::Dict004 => Some(CometError::DictNotFound {
                dict: dict_name.to_string(),
            }),
            ErrorCode::Dict005 => Some(CometError::DictElementNotFound {
                element: ele_no.to_string(),
            }),
            _ => None,
        })?;
        into_text(Procedure::DpRead, result.body)
    }

    /// Renders a status code as the controller's error text.
    ///
    /// # Errors
    ///
    /// Returns `DictElementNotFound` if the code is not in any dictionary.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use comet_rpc::{Client, ClientConfig, ErrorCode};
    ///
    /// let client = Client::new(ClientConfig::new("192.168.1.10")).unwrap();
    /// let text = client.dpewrite_str(ErrorCode::Prio001.value()).unwrap();
    /// ```
    pub fn dpewrite_str(&self, ercode: u32) -> Result<String> {
        let req = Request::new(Procedure::DpeWriteStr).param("ercode", ercode);
        let (result, _) = self.invoke(req)?;
        check(&result, |code| match code {
            ErrorCode::Dict005 => Some(CometError::DictElementNotFound {
                element: format!("0x{ercode:06X}"),
            }),
            _ => None,
        })?;
        into_text(Procedure::DpeWriteStr, result.body)
    }

    /// Executes a KCL command.
    ///
    /// The command's console output is not returned; only the status is checked.
    pub fn exec_kcl(&self, cmd: &str) -> Result<()> {
        let (result, _) = self.invoke(Request::new(Procedure::CpKcl).param("kcl_cmd", cmd))?;
        check(&result, no_mapping)
    }

    /// Downloads `file` line by line.
    ///
    /// Lines are returned exactly as stored, including terminators. The
    /// response body is capped at [`MAX_RESPONSE_SIZE`](crate::MAX_RESPONSE_SIZE),
    /// which limits files to about 48 MiB.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use comet_rpc::{Client, ClientConfig};
    ///
    /// let client = Client::new(ClientConfig::new("192.168.1.10")).unwrap();
    /// let lines = client.get_raw_file("MD:ERRALL.LS").unwrap();
    /// let contents: Vec<u8> = lines.into_iter().flat_map(|l| l.buf).collect();
    /// ```
    pub fn get_raw_file(&self, file: &str) -> Result<Vec<FileLine>> {
        let (result, _) = self.invoke(Request::new(Procedure::GetRawFile).param("file", file))?;
        check(&result, no_mapping)?;
        match result.body {
            ResultBody::FileLines(lines) => Ok(lines),
            other => Err(unexpected_shape(Procedure::GetRawFile, &other)),
        }
    }

    /// Lists the files matching `path_name` (for instance `MD:*.tp`).
    ///
    /// `*` lists everything on the default device.
    pub fn gtfilist(&self, path_name: &str) -> Result<Vec<String>> {
        let req = Request::new(Procedure::GtFiList).param("path_name", path_name);
        let (result, _) = self.invoke(req)?;
        check(&result, no_mapping)?;
        into_names(Procedure::GtFiList, result.body)
    }

    /// Lists the configured macros.
    ///
    /// The controller terminates the list with an empty element, which is kept.
    pub fn get_macro_list(&self) -> Result<Vec<String>> {
        let (result, _) = self.invoke(Request::new(Procedure::GtMcrLst))?;
        check(&result, no_mapping)?;
        into_names(Procedure::GtMcrLst, result.body)
    }

    /// Lists the position ids used in `prog_name`.
    ///
    /// # Errors
    ///
    /// Returns `ProgramDoesNotExist` if there is no such program.
    pub fn get_pos_id_list(&self, prog_name: &str) -> Result<Vec<i64>> {
        let prog_name = prog_name.to_uppercase();
        let req = Request::new(Procedure::GtPIdLst).param("prog_name", &prog_name);
        let (result, _) = self.invoke(req)?;
        check(&result, |code| match code {
            ErrorCode::Memo073 => Some(CometError::ProgramDoesNotExist { program: prog_name }),
            _ => None,
        })?;
        match result.body {
            ResultBody::PositionIds(ids) => Ok(ids),
            other => Err(unexpected_shape(Procedure::GtPIdLst, &other)),
        }
    }

    /// Creates, updates or deletes an I/O range assignment.
    ///
    /// The outcome is reported in `asg_stat`, separately from the RPC status.
    /// New assignments stay pending until the controller is restarted.
    ///
    /// # Errors
    ///
    /// - `NoSuchAssignment` when deleting a range that does not exist
    /// - `AssignmentOverlapsExistingOne` when the range overlaps another
    /// - `UnexpectedStatus` for any other non-zero status or `asg_stat`
    ///
    /// # Example
    ///
    /// ```no_run
    /// use comet_rpc::{AssignmentSpec, Client, ClientConfig, IoType};
    ///
    /// let client = Client::new(ClientConfig::new("192.168.1.10")).unwrap();
    /// client.ioasglog(&AssignmentSpec::delete(IoType::DigitalIn, 101)).unwrap();
    /// ```
    pub fn ioasglog(&self, assignment: &AssignmentSpec) -> Result<()> {
        let req = Request::new(Procedure::IoAsgLog)
            .param("log_port_type", assignment.log_port_type.code())
            .param("fst_log_port", assignment.first_log_port)
            .param("n_log_ports", assignment.log_port_count)
            .param("rack_no", assignment.rack)
            .param("slot_no", assignment.slot)
            .param("phy_port_type", assignment.phy_port_type.code())
            .param("fst_phy_port", assignment.first_phy_port);
        let (result, _) = self.invoke(req)?;

        if let ResultBody::AssignmentUpdate(update) = &result.body {
            match ErrorCode::from_status(update.assignment_status) {
                Some(ErrorCode::Prio007) => return Err(CometError::NoSuchAssignment),
                Some(ErrorCode::Prio011) => return Err(CometError::AssignmentOverlapsExistingOne),
                _ => {}
            }
            check(&result, no_mapping)?;
            if update.assignment_status != 0 {
                return Err(CometError::UnexpectedStatus(update.assignment_status));
            }
            return Ok(());
        }
        check(&result, no_mapping)
    }

    /// Checks whether a port is simulated.
    ///
    /// # Errors
    ///
    /// - `InvalidIoType` / `InvalidIoIndex` for an illegal port
    /// - `NoPortsOfThisType` if the controller has no ports of that type
    pub fn iocksim(&self, io_type: IoType, index: u32) -> Result<Reply<bool>> {
        let req = io_request(Procedure::IoCkSim, io_type, index);
        let (result, confirmation) = self.invoke(req)?;
        check(&result, |code| match code {
            ErrorCode::Prio023 => Some(CometError::NoPortsOfThisType {
                index: i64::from(index),
            }),
            code => io_status(io_type, index, code),
        })?;
        match result.body {
            ResultBody::IoPort(port) => Ok(Reply {
                value: port.value != 0,
                confirmation,
            }),
            other => Err(unexpected_shape(Procedure::IoCkSim, &other)),
        }
    }

    /// Sets the comment of a port.
    pub fn iodefpn(&self, io_type: IoType, index: u32, comment: &str) -> Result<()> {
        let req = io_request(Procedure::IoDefPn, io_type, index).param("comment", comment);
        let (result, _) = self.invoke(req)?;
        check(&result, |code| io_status(io_type, index, code))
    }

    /// Simulates all I/O.
    pub fn iodryrun(&self) -> Result<()> {
        let (result, _) = self.invoke(Request::new(Procedure::IoDryRun))?;
        check(&result, no_mapping)
    }

    /// Retrieves the range assignments for ports of `io_type`.
    pub fn iogetasg(&self, io_type: IoType) -> Result<Vec<IoAssignment>> {
        let req = Request::new(Procedure::IoGetAsg).param("type", io_type.code());
        let (result, _) = self.invoke(req)?;
        check(&result, no_mapping)?;
        match result.body {
            ResultBody::Assignments(assignments) => Ok(assignments),
            other => Err(unexpected_shape(Procedure::IoGetAsg, &other)),
        }
    }

    /// Retrieves the I/O hardware database.
    pub fn iogethdb(&self) -> Result<Vec<HardwareEntry>> {
        let (result, _) = self.invoke(Request::new(Procedure::IoGetHdb))?;
        check(&result, no_mapping)?;
        match result.body {
            ResultBody::HardwareDb(entries) => Ok(entries),
            other => Err(unexpected_shape(Procedure::IoGetHdb, &other)),
        }
    }

    /// Returns the comment of a port.
    ///
    /// # Errors
    ///
    /// - `InvalidIoType` / `InvalidIoIndex` for an illegal port
    /// - `NoCommentOnIoPort` if the port has no comment
    pub fn iogetpn(&self, io_type: IoType, index: u32) -> Result<String> {
        let (result, _) = self.invoke(io_request(Procedure::IoGetPn, io_type, index))?;
        check(&result, |code| match code {
            ErrorCode::Prio030 => Some(CometError::NoCommentOnIoPort {
                index: i64::from(index),
            }),
            code => io_status(io_type, index, code),
        })?;
        into_text(Procedure::IoGetPn, result.body)
    }

    /// Reads `count` ports of `io_type`, starting at `index`.
    ///
    /// Reading more ports than exist is not reported as an error; the excess
    /// entries hold whatever the controller returns.
    pub fn iogtall(&self, io_type: IoType, index: u32, count: u32) -> Result<Vec<IoPortState>> {
        let req = io_request(Procedure::IoGtAll, io_type, index).param("cnt", count);
        let (result, _) = self.invoke(req)?;
        check(&result, |code| io_status(io_type, index, code))?;
        match result.body {
            ResultBody::IoPorts(ports) => Ok(ports),
            other => Err(unexpected_shape(Procedure::IoGtAll, &other)),
        }
    }

    /// Simulates a port.
    ///
    /// Some controllers answer with the IOVALRD code; such results are
    /// returned as unverified.
    pub fn iosim(&self, io_type: IoType, index: u32) -> Result<Reply<()>> {
        let (result, confirmation) = self.invoke(io_request(Procedure::IoSim, io_type, index))?;
        check(&result, |code| io_status(io_type, index, code))?;
        Ok(Reply {
            value: (),
            confirmation,
        })
    }

    /// Unsimulates a port.
    ///
    /// Some controllers answer with an empty result list; such results are
    /// returned as unverified.
    pub fn iounsim(&self, io_type: IoType, index: u32) -> Result<Reply<()>> {
        let (result, confirmation) = self.invoke(io_request(Procedure::IoUnsim, io_type, index))?;
        check(&result, |code| io_status(io_type, index, code))?;
        Ok(Reply {
            value: (),
            confirmation,
        })
    }

    /// Reads a port.
    ///
    /// Booleans are returned as `0`/`1`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidIoType` or `InvalidIoIndex` for an illegal port.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use comet_rpc::{Client, ClientConfig, IoType};
    ///
    /// let client = Client::new(ClientConfig::new("192.168.1.10")).unwrap();
    /// let value = client.iovalrd(IoType::DigitalIn, 5).unwrap();
    /// println!("DI[5] = {value}");
    /// ```
    pub fn iovalrd(&self, io_type: IoType, index: u32) -> Result<i64> {
        let (result, _) = self.invoke(io_request(Procedure::IoValRd, io_type, index))?;
        check(&result, |code| io_status(io_type, index, code))?;
        match result.body {
            ResultBody::IoPort(port) => Ok(port.value),
            other => Err(unexpected_shape(Procedure::IoValRd, &other)),
        }
    }

    /// Writes a port.
    ///
    /// Some controllers answer with an empty result list; such results are
    /// returned as unverified.
    ///
    /// # Errors
    ///
    /// Returns `InvalidIoType` or `InvalidIoIndex` for an illegal port.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use comet_rpc::{Client, ClientConfig, IoType};
    ///
    /// let client = Client::new(ClientConfig::new("192.168.1.10")).unwrap();
    /// let reply = client.iovalset(IoType::DigitalOut, 3, 1).unwrap();
    /// if !reply.is_confirmed() {
    ///     println!("controller did not confirm the write");
    /// }
    /// ```
    pub fn iovalset(&self, io_type: IoType, index: u32, value: i64) -> Result<Reply<()>> {
        let req = io_request(Procedure::IoValSet, io_type, index).param("value", value);
        let (result, confirmation) = self.invoke(req)?;
        check(&result, |code| io_status(io_type, index, code))?;
        Ok(Reply {
            value: (),
            confirmation,
        })
    }

    /// Unsimulates all I/O.
    pub fn iowetrun(&self) -> Result<()> {
        let (result, _) = self.invoke(Request::new(Procedure::IoWetRun))?;
        check(&result, no_mapping)
    }

    /// Triggers a local start.
    pub fn local_start(&self, value: i32) -> Result<()> {
        let req = Request::new(Procedure::LocalStart).param("value", value);
        let (result, _) = self.invoke(req)?;
        check(&result, no_mapping)
    }

    /// Returns the type of program `prog_name`.
    pub fn mmgettyp(&self, prog_name: &str) -> Result<ProgramTypeInfo> {
        let req = Request::new(Procedure::MmGetTyp).param("prog_name", prog_name);
        let (result, _) = self.invoke(req)?;
        check(&result, no_mapping)?;
        match result.body {
            ResultBody::ProgramType(info) => Ok(info),
            other => Err(unexpected_shape(Procedure::MmGetTyp, &other)),
        }
    }

    /// Copies or cuts lines `[start, end]` of TP program `prog_name` and
    /// inserts them at line `insert_at`.
    ///
    /// # Errors
    ///
    /// - `NoSuchLine` if `insert_at` is not a line of the program
    /// - `InvalidArgument` if `end < start`
    pub fn paste_line(
        &self,
        prog_name: &str,
        start: u32,
        end: u32,
        insert_at: u32,
        oper: PasteLineOper,
    ) -> Result<()> {
        let req = Request::new(Procedure::PasteLin)
            .param("prog_name", prog_name.to_uppercase())
            .param("start", start)
            .param("end", end)
            .param("insert", insert_at)
            .param("opt_sw", oper.code());
        let (result, _) = self.invoke(req)?;
        check(&result, |code| match code {
            ErrorCode::Memo027 => Some(CometError::NoSuchLine {
                line: i64::from(insert_at),
            }),
            ErrorCode::Hrtl022 => Some(CometError::InvalidArgument),
            _ => None,
        })
    }

    /// Remarks (comments out) or unremarks lines `[start, end]` of TP program
    /// `prog_name`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `end < start`.
    pub fn remark_line(
        &self,
        prog_name: &str,
        start: u32,
        end: u32,
        oper: RemarkLineOper,
    ) -> Result<()> {
        let req = Request::new(Procedure::RemarkLin)
            .param("prog_name", prog_name.to_uppercase())
            .param("start", start)
            .param("end", end)
            .param("remark", oper.code());
        let (result, _) = self.invoke(req)?;
        check(&result, |code| match code {
            ErrorCode::Hrtl022 => Some(CometError::InvalidArgument),
            _ => None,
        })
    }

    /// Reads position register `index` of motion group `grp_num`.
    pub fn posregvalrd(&self, index: u32, grp_num: u32) -> Result<PositionRegister> {
        let req = Request::new(Procedure::PosRegValRd)
            .param("grp_num", grp_num)
            .param("index", index);
        let (result, _) = self.invoke(req)?;
        check(&result, no_mapping)?;
        match result.body {
            ResultBody::PositionRegister(reg) => Ok(reg),
            other => Err(unexpected_shape(Procedure::PosRegValRd, &other)),
        }
    }

    /// Aborts the task `task_name`, or every task when `None`.
    pub fn prog_abort(&self, task_name: Option<&str>) -> Result<()> {
        let req = Request::new(Procedure::PgAbort).param("task_name", task_name.unwrap_or(ABORT_ALL));
        let (result, _) = self.invoke(req)?;
        check(&result, no_mapping)
    }

    /// Reads numeric register `index`.
    ///
    /// The value is an integer or a real, depending on what the register holds.
    pub fn regvalrd(&self, index: u32) -> Result<RegisterContents> {
        let (result, _) = self.invoke(Request::new(Procedure::RegValRd).param("index", index))?;
        check(&result, no_mapping)?;
        match result.body {
            ResultBody::Register(reg) => Ok(reg),
            other => Err(unexpected_shape(Procedure::RegValRd, &other)),
        }
    }

    /// Appends `line` to the controller's console log.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use comet_rpc::{Client, ClientConfig};
    ///
    /// let client = Client::new(ClientConfig::new("192.168.1.10")).unwrap();
    /// client.rprintf("cell 3: pallet complete").unwrap();
    /// ```
    pub fn rprintf(&self, line: &str) -> Result<()> {
        // the line is passed as an anonymous parameter
        let req = Request::new(Procedure::RPrintf).raw_query(format!("={}", urlencoding::encode(line)));
        let (result, _) = self.invoke(req)?;
        check(&result, no_mapping)
    }

    /// Returns the position at `index` in `prog_name`, as text.
    ///
    /// # Errors
    ///
    /// - `PositionDoesNotExist` if the program has no such position
    /// - `ProgramDoesNotExist` if there is no such program
    pub fn scgetpos(&self, prog_name: &str, index: u32) -> Result<String> {
        let prog_name = prog_name.to_uppercase();
        let req = Request::new(Procedure::ScGetPos)
            .param("prog_name", &prog_name)
            .param("pos_idx", index);
        let (result, _) = self.invoke(req)?;
        check(&result, |code| match code {
            ErrorCode::Memo071 => Some(CometError::PositionDoesNotExist {
                program: prog_name.clone(),
                index: i64::from(index),
            }),
            ErrorCode::Memo073 => Some(CometError::ProgramDoesNotExist {
                program: prog_name.clone(),
            }),
            _ => None,
        })?;
        into_text(Procedure::ScGetPos, result.body)
    }

    /// Opens `prog_name` on the teach pendant.
    ///
    /// # Errors
    ///
    /// Returns `ProgramDoesNotExist` if there is no such program.
    pub fn txchgprg(&self, prog_name: &str) -> Result<()> {
        let prog_name = prog_name.to_uppercase();
        let req = Request::new(Procedure::TxChgPrg).param("prog_name", &prog_name);
        let (result, _) = self.invoke(req)?;
        check(&result, |code| match code {
            ErrorCode::Memo073 => Some(CometError::ProgramDoesNotExist { program: prog_name }),
            _ => None,
        })
    }

    /// Returns the current pose of motion group `grp_num` in joint angles.
    pub fn txml_curang(&self, grp_num: u32) -> Result<String> {
        let req = Request::new(Procedure::TxMlCurAng).param("grp_num", grp_num);
        let (result, _) = self.invoke(req)?;
        check(&result, no_mapping)?;
        into_text(Procedure::TxMlCurAng, result.body)
    }

    /// Returns the current Cartesian pose of motion group `grp_num`.
    pub fn txml_curpos(&self, pos_rep: i32, pos_type: i32, grp_num: u32) -> Result<String> {
        let req = Request::new(Procedure::TxMlCurPos)
            .param("pos_rep", pos_rep)
            .param("pos_type", pos_type)
            .param("grp_num", grp_num);
        let (result, _) = self.invoke(req)?;
        check(&result, no_mapping)?;
        into_text(Procedure::TxMlCurPos, result.body)
    }

    /// Opens `prog_name` with the cursor at `line_num` (1-based).
    pub fn txsetlin(&self, prog_name: &str, line_num: u32) -> Result<()> {
        let req = Request::new(Procedure::TxSetLin)
            .param("prog_name", prog_name.to_uppercase())
            .param("line_num", line_num);
        let (result, _) = self.invoke(req)?;
        check(&result, no_mapping)
    }

    /// Reads variable `var_name` of program `prog_name`.
    ///
    /// Use `*SYSTEM*` as the program name for system variables.
    ///
    /// # Errors
    ///
    /// - `UnknownVariable` if the variable does not exist
    /// - `NoDataDefinedForProgram` if the program has no variable data
    /// - `BadVariableOrRegisterIndex` if the name is malformed
    ///
    /// # Example
    ///
    /// ```no_run
    /// use comet_rpc::{Client, ClientConfig};
    ///
    /// let client = Client::new(ClientConfig::new("192.168.1.10")).unwrap();
    /// let var = client.vmip_readva("*SYSTEM*", "$MNUTOOLNUM[1]").unwrap();
    /// println!("{} = {}", var.var_name, var.value);
    /// ```
    pub fn vmip_readva(&self, prog_name: &str, var_name: &str) -> Result<VariableValue> {
        let prog_name = prog_name.to_uppercase();
        let var_name = var_name.to_uppercase();
        let req = Request::new(Procedure::VmIpReadVa)
            .param("prog_name", &prog_name)
            .param("var_name", &var_name);
        let (result, _) = self.invoke(req)?;
        check(&result, |code| variable_status(&prog_name, &var_name, code))?;
        match result.body {
            ResultBody::Variable(var) => Ok(var),
            other => Err(unexpected_shape(Procedure::VmIpReadVa, &other)),
        }
    }

    /// Writes `value` to variable `var_name` of program `prog_name`.
    ///
    /// The value is sent as text, formatted as in `.VA` files; the controller
    /// converts it to the variable's type.
    ///
    /// # Errors
    ///
    /// Same as [`vmip_readva`](Self::vmip_readva), plus
    /// `BadElementInStructure` if a structure field does not exist.
    pub fn vmip_writeva(
        &self,
        prog_name: &str,
        var_name: &str,
        value: impl Display,
    ) -> Result<Reply<()>> {
        let prog_name = prog_name.to_uppercase();
        let var_name = var_name.to_uppercase();
        let req = Request::new(Procedure::VmIpWriteVa)
            .param("prog_name", &prog_name)
            .param("var_name", &var_name)
            .param("value", value);
        let (result, confirmation) = self.invoke(req)?;
        check(&result, |code| match code {
            ErrorCode::Vars049 => Some(CometError::BadElementInStructure {
                name: var_name.clone(),
            }),
            code => variable_status(&prog_name, &var_name, code),
        })?;
        Ok(Reply {
            value: (),
            confirmation,
        })
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("host", &self.host)
            .field("transport", &self.transport)
            .finish()
    }
}

/// Patches and decodes a response body for `requested`, then checks the
/// echoed procedure code.
///
/// This is the part of [`Client::call`] after the HTTP exchange, for bodies
/// fetched with [`Client::call_raw`].
///
/// # Errors
///
/// - `UnexpectedResponseContent` / `Deserialisation` for malformed bodies
/// - `UnsupportedProcedure` if the controller echoed a sentinel code
/// - `ProcedureMismatch` if it echoed another procedure's code and the
///   requested code is confirmed ([`Procedure::code_is_confirmed`]).
///   Otherwise the echoed code is kept on [`RpcResult::rpc`].
///
/// # Example
///
/// ```
/// use comet_rpc::{decode_response, CometError, Procedure};
///
/// let text = r#"{"FANUC":{"name":"R1","fastclock":1,"RPC":[{"rpc":"-1","status":"0x0"}]}}"#;
/// let err = decode_response(Procedure::TxMlCurPos, text).unwrap_err();
/// assert!(matches!(err, CometError::UnsupportedProcedure { .. }));
/// ```
pub fn decode_response(requested: Procedure, text: &str) -> Result<RpcResponse> {
    let patched = quirks::patch(text, requested)?;
    let mut response = RpcResponse::from_json_as(&patched.text, requested)?;
    response.quirk = patched.quirk;

    for result in &response.results {
        if is_unsupported_code(result.rpc) {
            return Err(CometError::UnsupportedProcedure {
                procedure: requested.name().to_string(),
            });
        }
        if result.rpc != requested.code() {
            if requested.code_is_confirmed() {
                return Err(CometError::ProcedureMismatch {
                    expected: requested.code(),
                    received: result.rpc,
                });
            }
            log::debug!("{requested}: controller echoed code {}", result.rpc);
        }
    }
    Ok(response)
}

fn io_request(procedure: Procedure, io_type: IoType, index: u32) -> Request {
    Request::new(procedure)
        .param("type", io_type.code())
        .param("index", index)
}

/// Maps a non-zero status to an error, preferring the mapping `specific` provides.
fn check<F>(result: &RpcResult, specific: F) -> Result<()>
where
    F: FnOnce(ErrorCode) -> Option<CometError>,
{
    if result.is_success() {
        return Ok(());
    }
    Err(result
        .error_code()
        .and_then(specific)
        .unwrap_or(CometError::UnexpectedStatus(result.status)))
}

fn no_mapping(_: ErrorCode) -> Option<CometError> {
    None
}

fn io_status(io_type: IoType, index: u32, code: ErrorCode) -> Option<CometError> {
    match code {
        ErrorCode::Prio001 => Some(CometError::InvalidIoType {
            io_type: io_type.code(),
        }),
        ErrorCode::Prio002 => Some(CometError::InvalidIoIndex {
            index: i64::from(index),
        }),
        _ => None,
    }
}

fn variable_status(prog_name: &str, var_name: &str, code: ErrorCode) -> Option<CometError> {
    match code {
        ErrorCode::Vars006 => Some(CometError::UnknownVariable {
            name: var_name.to_string(),
        }),
        ErrorCode::Vars011 => Some(CometError::NoDataDefinedForProgram {
            program: prog_name.to_string(),
        }),
        ErrorCode::Vars024 => Some(CometError::BadVariableOrRegisterIndex {
            name: var_name.to_string(),
        }),
        _ => None,
    }
}

fn unexpected_shape(procedure: Procedure, body: &ResultBody) -> CometError {
    CometError::deserialisation(format!("{procedure}: unexpected result: {body:?}"))
}

fn into_text(procedure: Procedure, body: ResultBody) -> Result<String> {
    match body {
        ResultBody::Text(text) => Ok(text),
        other => Err(unexpected_shape(procedure, &other)),
    }
}

fn into_names(procedure: Procedure, body: ResultBody) -> Result<Vec<String>> {
    match body {
        ResultBody::Names(names) => Ok(names),
        other => Err(unexpected_shape(procedure, &other)),
    }
}
