//! Query string encoding.
//!
//! COMET expects percent-quoted entities (`%20` for a space, never `+`).
//! Only the RFC 3986 unreserved characters are left as-is.
//!
//! # Example
//!
//! ```
//! use comet_rpc::query;
//!
//! let q = query::encode([("kcl_cmd", "show var $version")]);
//! assert_eq!(q, "kcl_cmd=show%20var%20%24version");
//!
//! let pairs = query::decode(&q).unwrap();
//! assert_eq!(pairs, vec![("kcl_cmd".to_string(), "show var $version".to_string())]);
//! ```

use crate::error::{CometError, Result};

/// Percent-encodes `pairs` into a `key=value&key=value` query string.
pub fn encode<I, K, V>(pairs: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    pairs
        .into_iter()
        .map(|(k, v)| {
            format!(
                "{}={}",
                urlencoding::encode(k.as_ref()),
                urlencoding::encode(v.as_ref())
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Splits a query string into percent-decoded key/value pairs.
///
/// A component without `=` decodes to a key with an empty value.
///
/// # Errors
///
/// Returns `InvalidParameter` if a component does not decode to UTF-8.
pub fn decode(query: &str) -> Result<Vec<(String, String)>> {
    let query = query.strip_prefix('?').unwrap_or(query);
    if query.is_empty() {
        return Ok(Vec::new());
    }

    query
        .split('&')
        .map(|component| {
            let (k, v) = component.split_once('=').unwrap_or((component, ""));
            Ok((decode_component(k)?, decode_component(v)?))
        })
        .collect()
}

fn decode_component(s: &str) -> Result<String> {
    urlencoding::decode(s)
        .map(|c| c.into_owned())
        .map_err(|e| CometError::invalid_parameter("query", e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_unreserved_kept() {
        assert_eq!(encode([("prog_name", "MY_PROG-1.TP~")]), "prog_name=MY_PROG-1.TP~");
    }

    #[test]
    fn test_encode_reserved_quoted() {
        assert_eq!(
            encode([("path_name", "MD:*.tp"), ("x", "a&b=c")]),
            "path_name=MD%3A%2A.tp&x=a%26b%3Dc"
        );
        assert_eq!(encode([("file", "MD:\\errall.ls")]), "file=MD%3A%5Cerrall.ls");
    }

    #[test]
    fn test_encode_empty() {
        let empty: [(&str, &str); 0] = [];
        assert_eq!(encode(empty), "");
    }

    #[test]
    fn test_roundtrip() {
        let pairs = vec![
            ("func".to_string(), "IOVALRD".to_string()),
            ("comment".to_string(), "gripper open / closed?".to_string()),
            ("var_name".to_string(), "$MCR.$GENOVERRIDE".to_string()),
            ("unicode".to_string(), "Grüße".to_string()),
        ];
        let q = encode(pairs.iter().map(|(k, v)| (k, v)));
        assert_eq!(decode(&q).unwrap(), pairs);
    }

    #[test]
    fn test_decode_missing_value() {
        assert_eq!(
            decode("?func=RPRINTF&flag").unwrap(),
            vec![
                ("func".to_string(), "RPRINTF".to_string()),
                ("flag".to_string(), String::new())
            ]
        );
    }

    #[test]
    fn test_decode_anonymous_value() {
        assert_eq!(
            decode("=hello%20world").unwrap(),
            vec![(String::new(), "hello world".to_string())]
        );
    }

    #[test]
    fn test_decode_invalid_utf8() {
        assert!(decode("x=%FF").is_err());
    }
}
