//! HTTP transport layer for COMET communication.
//!
//! This module provides the [`HttpTransport`] struct which performs the HTTP
//! exchange with the controller's web server. It knows about URLs, headers and
//! HTTP status codes, but nothing about the response document.
//!
//! # Constants
//!
//! - [`DEFAULT_COMET_PORT`] - Default HTTP port (80)
//! - [`DEFAULT_TIMEOUT`] - Default timeout (1 second)
//! - [`RPC_PATH`] - Path of the COMET endpoint
//! - [`MAX_RESPONSE_SIZE`] - Largest response body accepted (64 MiB)
//!
//! # Example
//!
//! The transport is typically used through the [`Client`](crate::Client) struct,
//! but can be used directly to fetch unparsed response documents:
//!
//! ```no_run
//! use comet_rpc::{FuncEncoding, HttpTransport, Procedure, Request};
//! use std::time::Duration;
//!
//! let transport = HttpTransport::new("192.168.1.10", 80, Duration::from_secs(1), FuncEncoding::Code);
//!
//! let request = Request::new(Procedure::IoValRd).param("type", 1).param("index", 5);
//! let text = transport.send(&request).unwrap();
//! ```

use std::time::Duration;

use crate::error::{CometError, Result};
use crate::request::{FuncEncoding, Request};

/// Default COMET HTTP port.
pub const DEFAULT_COMET_PORT: u16 = 80;

/// Default timeout for a single request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

/// Path of the COMET RPC endpoint.
pub const RPC_PATH: &str = "/COMET/rpc";

/// Largest response body accepted, in bytes.
///
/// GET_RAW_FILE returns the whole file base64-encoded in one document, so
/// this bounds the size of downloadable files to roughly three quarters of it.
pub const MAX_RESPONSE_SIZE: u64 = 64 * 1024 * 1024;

/// Value of the `Accept` header.
pub const ACCEPT: &str = "application/json, text/javascript, */*";

/// HTTP transport for COMET communication.
///
/// Issues one blocking GET per call, bounded by the configured timeout.
#[derive(Clone)]
pub struct HttpTransport {
    agent: ureq::Agent,
    origin: String,
    encoding: FuncEncoding,
}

impl HttpTransport {
    /// Creates a transport for the COMET server at `host:port`.
    pub fn new(host: &str, port: u16, timeout: Duration, encoding: FuncEncoding) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            origin: format!("http://{host}:{port}"),
            encoding,
        }
    }

    /// Creates a transport with the default port and timeout.
    pub fn with_defaults(host: &str) -> Self {
        Self::new(host, DEFAULT_COMET_PORT, DEFAULT_TIMEOUT, FuncEncoding::default())
    }

    /// Returns the full URL `request` is sent to.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the request combines keyword parameters
    /// with a raw query fragment.
    ///
    /// # Example
    ///
    /// ```
    /// use comet_rpc::{HttpTransport, Procedure, Request};
    ///
    /// let transport = HttpTransport::with_defaults("robot");
    /// let url = transport.url(&Request::new(Procedure::IoGetHdb)).unwrap();
    /// assert_eq!(url, "http://robot:80/COMET/rpc?func=71");
    /// ```
    pub fn url(&self, request: &Request) -> Result<String> {
        let query = request.query_string(self.encoding)?;
        Ok(format!("{}{RPC_PATH}?{query}", self.origin))
    }

    /// Sends `request` and returns the response body.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The request is invalid (`InvalidParameter`), before anything is sent
    /// - The request times out (`CometError::Timeout`)
    /// - The controller answers with a status other than 200
    /// - Other HTTP failures occur (`CometError::Http`)
    pub fn send(&self, request: &Request) -> Result<String> {
        let url = self.url(request)?;
        log::debug!("GET {url}");

        let response = self
            .agent
            .get(&url)
            .header("Referer", &self.origin)
            .header("Accept", ACCEPT)
            .call()
            .map_err(map_ureq_error)?;

        let status = response.status().as_u16();
        log::debug!("{}: HTTP {status}", request.procedure());
        check_http_status(status)?;

        let mut body = response.into_body();
        let text = body
            .with_config()
            .limit(MAX_RESPONSE_SIZE)
            .read_to_string()
            .map_err(map_ureq_error)?;
        log::trace!("response body: {text}");
        Ok(text)
    }

    /// Returns the `http://host:port` origin, also sent as the `Referer`.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Returns how the `func` parameter is encoded.
    pub fn func_encoding(&self) -> FuncEncoding {
        self.encoding
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("origin", &self.origin)
            .field("encoding", &self.encoding)
            .finish()
    }
}

/// Maps an HTTP status code to the matching error.
pub(crate) fn check_http_status(status: u16) -> Result<()> {
    match status {
        200 => Ok(()),
        401 => Err(CometError::Authentication),
        403 => Err(CometError::LockedResource),
        actual => Err(CometError::UnexpectedResultCode {
            expected: 200,
            actual,
        }),
    }
}

fn map_ureq_error(e: ureq::Error) -> CometError {
    match e {
        ureq::Error::Timeout(_) => CometError::Timeout,
        ureq::Error::Io(ref io) if io.kind() == std::io::ErrorKind::TimedOut => {
            CometError::Timeout
        }
        e => CometError::Http(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::procedure::Procedure;

    #[test]
    fn test_default_constants() {
        assert_eq!(DEFAULT_COMET_PORT, 80);
        assert_eq!(DEFAULT_TIMEOUT, Duration::from_secs(1));
        assert_eq!(RPC_PATH, "/COMET/rpc");
    }

    #[test]
    fn test_url_with_code() {
        let transport = HttpTransport::with_defaults("192.168.1.10");
        let req = Request::new(Procedure::IoValRd).param("type", 1).param("index", 5);
        assert_eq!(
            transport.url(&req).unwrap(),
            "http://192.168.1.10:80/COMET/rpc?func=62&type=1&index=5"
        );
    }

    #[test]
    fn test_url_with_name_and_port() {
        let transport = HttpTransport::new(
            "robot.local",
            8080,
            Duration::from_millis(100),
            FuncEncoding::Name,
        );
        let req = Request::new(Procedure::GtFiList).param("path_name", "MD:*.tp");
        assert_eq!(
            transport.url(&req).unwrap(),
            "http://robot.local:8080/COMET/rpc?func=GTFILIST&path_name=MD%3A%2A.tp"
        );
        assert_eq!(transport.origin(), "http://robot.local:8080");
        assert_eq!(transport.func_encoding(), FuncEncoding::Name);
    }

    #[test]
    fn test_invalid_request_rejected_before_sending() {
        // nothing listens here; the error must come from request validation
        let transport = HttpTransport::new("127.0.0.1", 9, Duration::from_millis(50), FuncEncoding::Code);
        let req = Request::new(Procedure::RPrintf).param("a", 1).raw_query("=b");
        assert!(matches!(
            transport.send(&req),
            Err(CometError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_http_status_mapping() {
        assert!(check_http_status(200).is_ok());
        assert!(matches!(check_http_status(401), Err(CometError::Authentication)));
        assert!(matches!(check_http_status(403), Err(CometError::LockedResource)));
        match check_http_status(500) {
            Err(CometError::UnexpectedResultCode { expected, actual }) => {
                assert_eq!(expected, 200);
                assert_eq!(actual, 500);
            }
            other => panic!("Expected UnexpectedResultCode, got {other:?}"),
        }
        assert!(matches!(
            check_http_status(404),
            Err(CometError::UnexpectedResultCode { actual: 404, .. })
        ));
    }

    #[test]
    fn test_transport_debug() {
        let transport = HttpTransport::with_defaults("127.0.0.1");
        let debug_str = format!("{:?}", transport);
        assert!(debug_str.contains("HttpTransport"));
        assert!(debug_str.contains("http://127.0.0.1:80"));
    }
}
