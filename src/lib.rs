//! # COMET RPC Client Library
//!
//! A Rust library for invoking procedures on FANUC robot controllers through
//! COMET, the JSON-over-HTTP RPC interface served by the controller's web server.
//!
//! This is a **protocol-only** library: no polling, schedulers or
//! application-level features. Each call produces exactly 1 HTTP request and
//! decodes exactly 1 response. No automatic retries, caching, or reconnection.
//!
//! ## Features
//!
//! - **Typed results**: every known procedure decodes to its own result shape
//! - **Quirk handling**: known malformed responses are repaired, and the
//!   repaired results are marked as unverified
//! - **Status mapping**: controller status codes map to specific error variants
//! - **No panics**: all errors returned as `Result<T, CometError>`
//!
//! ## Quick Start
//!
//! ```no_run
//! use comet_rpc::{Client, ClientConfig, IoType};
//!
//! fn main() -> comet_rpc::Result<()> {
//!     let client = Client::new(ClientConfig::new("192.168.1.10"))?;
//!
//!     // Read DI[5]
//!     let value = client.iovalrd(IoType::DigitalIn, 5)?;
//!     println!("DI[5] = {value}");
//!
//!     // Write to a system variable
//!     client.vmip_writeva("*SYSTEM*", "$MNUTOOLNUM[1]", 2)?;
//!
//!     // Append a line to the console log
//!     client.rprintf("hello from Rust")?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Wire Format
//!
//! Requests are plain GETs:
//!
//! ```text
//! GET /COMET/rpc?func=62&type=1&index=5
//! ```
//!
//! Responses wrap a single result element in an envelope:
//!
//! ```text
//! {"FANUC":{"name":"R1","fastclock":123,"RPC":[{"rpc":"62","status":"0x0","type":1,"index":5,"value":1}]}}
//! ```
//!
//! See [`RpcResponse`] for the decoding rules and [`patch`] for the malformed
//! responses that are repaired.
//!
//! ## Generic Calls
//!
//! Procedures can also be invoked directly, leaving the status to the caller:
//!
//! ```no_run
//! # use comet_rpc::{Client, ClientConfig};
//! use comet_rpc::{ErrorCode, Procedure, Request};
//!
//! # let client = Client::new(ClientConfig::new("192.168.1.10")).unwrap();
//! let request = Request::new(Procedure::IoGetPn).param("type", 2).param("index", 1);
//! let result = client.call(&request)?.into_result()?;
//! if result.error_code() == Some(ErrorCode::Prio030) {
//!     println!("DO[1] has no comment");
//! }
//! # Ok::<(), comet_rpc::CometError>(())
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, CometError>`]. The library never panics in public code.
//!
//! ```no_run
//! use comet_rpc::{Client, ClientConfig, CometError};
//!
//! let client = Client::new(ClientConfig::new("192.168.1.10"))?;
//!
//! match client.vmip_readva("*SYSTEM*", "$NOT_A_VAR") {
//!     Ok(var) => println!("{}", var.value),
//!     Err(CometError::UnknownVariable { name }) => println!("no such variable: {name}"),
//!     Err(CometError::LockedResource) => println!("COMET access is locked"),
//!     Err(CometError::Timeout) => println!("Communication timeout"),
//!     Err(e) => println!("Error: {}", e),
//! }
//! # Ok::<(), CometError>(())
//! ```
//!
//! ## Configuration
//!
//! ```no_run
//! use comet_rpc::{ClientConfig, FuncEncoding};
//! use std::time::Duration;
//!
//! let config = ClientConfig::new("192.168.1.10")
//!     .with_port(8080)                          // Custom port (default: 80)
//!     .with_timeout(Duration::from_secs(5))     // Custom timeout (default: 1s)
//!     .with_func_encoding(FuncEncoding::Name);  // Send procedure names instead of codes
//! ```
//!
//! ## Logging
//!
//! Requests, HTTP statuses and applied repairs are logged through the [`log`]
//! facade at debug level; response bodies at trace level. No logger is installed.

#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

mod client;
mod de;
mod error;
mod procedure;
pub mod query;
mod quirks;
mod request;
mod response;
mod status;
mod transport;
mod types;

// Public re-exports
pub use client::{decode_response, Client, ClientConfig, Reply, ABORT_ALL};
pub use error::{CometError, Result};
pub use procedure::{is_unsupported_code, Procedure, UNSUPPORTED_PROCEDURE_CODES};
pub use quirks::{patch, Patched, Quirk, ECHOED_READ_CODE_PROCEDURES, EMPTY_RESULT_LIST_PROCEDURES};
pub use request::{FuncEncoding, Request};
pub use response::{
    AssignmentUpdate, Confirmation, FileLine, HardwareEntry, IoAssignment, IoPortState,
    IoPortValue, PositionRegister, ProgramTypeInfo, RegisterContents, RegisterValue, ResultBody,
    RpcResponse, RpcResult, VariableValue, ENVELOPE_TAG,
};
pub use status::{ErrorCode, Facility, STATUS_OK};
pub use transport::{
    HttpTransport, ACCEPT, DEFAULT_COMET_PORT, DEFAULT_TIMEOUT, MAX_RESPONSE_SIZE, RPC_PATH,
};
pub use types::{AssignmentSpec, IoType, Override, PasteLineOper, PositionType, RemarkLineOper};
