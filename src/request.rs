//! Outbound procedure calls.
//!
//! A [`Request`] names the procedure to invoke and carries its arguments,
//! either as keyword parameters (percent-encoded for you) or as a pre-built
//! raw query fragment (sent verbatim). The two are mutually exclusive.
//!
//! # Example
//!
//! ```
//! use comet_rpc::{FuncEncoding, Procedure, Request};
//!
//! let req = Request::new(Procedure::IoValRd).param("type", 1).param("index", 5);
//! assert_eq!(req.query_string(FuncEncoding::Code).unwrap(), "func=62&type=1&index=5");
//! assert_eq!(req.query_string(FuncEncoding::Name).unwrap(), "func=IOVALRD&type=1&index=5");
//! ```

use crate::error::{CometError, Result};
use crate::procedure::Procedure;
use crate::query;

/// How the `func` query parameter identifies the procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FuncEncoding {
    /// Decimal procedure code, e.g. `func=62`.
    #[default]
    Code,
    /// Symbolic procedure name, e.g. `func=IOVALRD`.
    Name,
}

impl FuncEncoding {
    fn func_value(self, procedure: Procedure) -> String {
        match self {
            FuncEncoding::Code => procedure.code().to_string(),
            FuncEncoding::Name => procedure.name().to_string(),
        }
    }
}

/// A single COMET procedure call.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    procedure: Procedure,
    params: Vec<(String, String)>,
    raw_query: Option<String>,
}

impl Request {
    /// Creates a request for `procedure` without arguments.
    pub fn new(procedure: Procedure) -> Self {
        Self {
            procedure,
            params: Vec::new(),
            raw_query: None,
        }
    }

    /// Adds a keyword parameter. Parameters are sent in the order they are added.
    pub fn param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((name.into(), value.to_string()));
        self
    }

    /// Sets a raw query fragment, appended to the URL after `func` as-is.
    ///
    /// One leading `?` and one leading `&` are stripped. Anything inside the
    /// fragment that needs percent-encoding must already be encoded.
    pub fn raw_query(mut self, fragment: impl Into<String>) -> Self {
        self.raw_query = Some(fragment.into());
        self
    }

    /// Returns the procedure this request invokes.
    pub fn procedure(&self) -> Procedure {
        self.procedure
    }

    /// Returns the keyword parameters.
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// Builds the query string, `func` first.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if both keyword parameters and a raw query
    /// fragment are set.
    pub fn query_string(&self, encoding: FuncEncoding) -> Result<String> {
        let func = encoding.func_value(self.procedure);

        match &self.raw_query {
            Some(_) if !self.params.is_empty() => Err(CometError::invalid_parameter(
                "query",
                "keyword parameters cannot be combined with a raw query fragment",
            )),
            Some(fragment) => {
                let fragment = fragment.as_str();
                let fragment = fragment.strip_prefix('?').unwrap_or(fragment);
                let fragment = fragment.strip_prefix('&').unwrap_or(fragment);
                if fragment.is_empty() {
                    Ok(format!("func={func}"))
                } else {
                    Ok(format!("func={func}&{fragment}"))
                }
            }
            None => Ok(query::encode(
                std::iter::once(("func", func.as_str()))
                    .chain(self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))),
            )),
        }
    }
}
