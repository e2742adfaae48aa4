//! Field decoders for COMET's loosely-typed JSON.
//!
//! The controller quotes integers, sends status codes as hex strings and
//! joins list values with commas. These helpers are used through
//! `#[serde(deserialize_with = "...")]`.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use serde::de::{Deserializer, Error};
use serde::Deserialize;
use serde_json::Value;

/// URL-safe alphabet, padding optional.
const LINE_BUFFER: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Integer sent as a JSON number or as a quoted decimal.
pub(crate) fn integer<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
    match Value::deserialize(d)? {
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| D::Error::custom(format!("not an integer: {n}"))),
        Value::String(s) => parse_integer(&s).map_err(D::Error::custom),
        other => Err(D::Error::custom(format!("expected integer, got {other}"))),
    }
}

/// Wire code (plain or quoted) converted into one of the code enums.
pub(crate) fn code<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i32>,
    T::Error: std::fmt::Display,
{
    let value = integer(d)?;
    let code = i32::try_from(value)
        .map_err(|_| D::Error::custom(format!("code out of range: {value}")))?;
    T::try_from(code).map_err(D::Error::custom)
}

/// Status code sent as a hex string (`"0x0"`, `"0D0001"`) or as a JSON number.
pub(crate) fn hex_status<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
    match Value::deserialize(d)? {
        Value::Number(n) => n
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| D::Error::custom(format!("invalid status: {n}"))),
        Value::String(s) => parse_hex(&s).map_err(D::Error::custom),
        other => Err(D::Error::custom(format!("expected status, got {other}"))),
    }
}

/// Boolean sent as `true`/`false`, `0`/`1` or a quoted version of either.
pub(crate) fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    match Value::deserialize(d)? {
        Value::Bool(b) => Ok(b),
        Value::Number(n) => Ok(n.as_f64().is_some_and(|v| v != 0.0)),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "t" => Ok(true),
            "0" | "false" | "f" | "" => Ok(false),
            _ => Err(D::Error::custom(format!("expected boolean, got '{s}'"))),
        },
        other => Err(D::Error::custom(format!("expected boolean, got {other}"))),
    }
}

/// Text value; numbers are rendered as they appear in the document.
pub(crate) fn text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    match Value::deserialize(d)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(D::Error::custom(format!("expected text, got {other}"))),
    }
}

/// List of strings, comma-joined on the wire.
///
/// Empty elements are kept (the controller terminates some lists with a
/// trailing comma). An empty string is an empty list. JSON arrays are
/// accepted as well.
pub(crate) fn string_list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    match Value::deserialize(d)? {
        Value::String(s) if s.is_empty() => Ok(Vec::new()),
        Value::String(s) => Ok(s.split(',').map(str::to_string).collect()),
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => Ok(s),
                other => Err(D::Error::custom(format!("expected string, got {other}"))),
            })
            .collect(),
        other => Err(D::Error::custom(format!("expected list, got {other}"))),
    }
}

/// List of integers, comma-joined on the wire. Empty elements are skipped.
pub(crate) fn integer_list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<i64>, D::Error> {
    match Value::deserialize(d)? {
        Value::String(s) => s
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| parse_integer(part).map_err(D::Error::custom))
            .collect(),
        Value::Number(n) => n
            .as_i64()
            .map(|v| vec![v])
            .ok_or_else(|| D::Error::custom(format!("not an integer: {n}"))),
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::Number(n) => n
                    .as_i64()
                    .ok_or_else(|| D::Error::custom(format!("not an integer: {n}"))),
                Value::String(s) => parse_integer(&s).map_err(D::Error::custom),
                other => Err(D::Error::custom(format!("expected integer, got {other}"))),
            })
            .collect(),
        other => Err(D::Error::custom(format!("expected list, got {other}"))),
    }
}

/// Base64-encoded bytes, decoded verbatim.
///
/// Both the URL-safe and the standard alphabet are accepted.
pub(crate) fn base64_bytes<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<u8>, D::Error> {
    let encoded = String::deserialize(d)?;
    let normalized: String = encoded
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            c => c,
        })
        .collect();
    LINE_BUFFER
        .decode(normalized.as_bytes())
        .map_err(|e| D::Error::custom(format!("invalid base64: {e}")))
}

fn parse_integer(s: &str) -> Result<i64, String> {
    s.trim()
        .parse::<i64>()
        .map_err(|e| format!("invalid integer '{s}': {e}"))
}

fn parse_hex(s: &str) -> Result<u32, String> {
    let trimmed = s.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    u32::from_str_radix(digits, 16).map_err(|e| format!("invalid hex status '{s}': {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::IoType;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Fields {
        #[serde(default, deserialize_with = "integer")]
        int: i64,
        #[serde(default, deserialize_with = "hex_status")]
        status: u32,
        #[serde(default, deserialize_with = "flag")]
        flag: bool,
        #[serde(default, deserialize_with = "text")]
        text: String,
        #[serde(default, deserialize_with = "string_list")]
        names: Vec<String>,
        #[serde(default, deserialize_with = "integer_list")]
        ints: Vec<i64>,
        #[serde(default, deserialize_with = "base64_bytes")]
        buf: Vec<u8>,
    }

    fn fields(v: Value) -> Fields {
        Fields::deserialize(&v).unwrap()
    }

    #[test]
    fn test_integer_quoted_and_plain() {
        assert_eq!(fields(json!({"int": "62"})).int, 62);
        assert_eq!(fields(json!({"int": "-1"})).int, -1);
        assert_eq!(fields(json!({"int": 123})).int, 123);
        assert!(Fields::deserialize(&json!({"int": "abc"})).is_err());
        assert!(Fields::deserialize(&json!({"int": 1.5})).is_err());
    }

    #[derive(Debug, Deserialize)]
    struct Coded {
        #[serde(deserialize_with = "code")]
        io_type: IoType,
    }

    #[test]
    fn test_code_quoted_and_plain() {
        let quoted = Coded::deserialize(&json!({"io_type": "1"})).unwrap();
        assert_eq!(quoted.io_type, IoType::DigitalIn);
        let plain = Coded::deserialize(&json!({"io_type": 18})).unwrap();
        assert_eq!(plain.io_type, IoType::GroupedIn);
        assert!(Coded::deserialize(&json!({"io_type": "99"})).is_err());
        assert!(Coded::deserialize(&json!({"io_type": 4_294_967_296_i64})).is_err());
    }

    #[test]
    fn test_hex_status() {
        assert_eq!(fields(json!({"status": "0x0"})).status, 0);
        assert_eq!(fields(json!({"status": "0x0D0001"})).status, 0x0D0001);
        assert_eq!(fields(json!({"status": "0X10000B"})).status, 0x10000B);
        assert_eq!(fields(json!({"status": "210005"})).status, 0x210005);
        assert_eq!(fields(json!({"status": 0})).status, 0);
        assert!(Fields::deserialize(&json!({"status": "0xZZ"})).is_err());
    }

    #[test]
    fn test_flag() {
        assert!(fields(json!({"flag": true})).flag);
        assert!(fields(json!({"flag": 1})).flag);
        assert!(!fields(json!({"flag": 0})).flag);
        assert!(fields(json!({"flag": "1"})).flag);
        assert!(!fields(json!({"flag": "FALSE"})).flag);
    }

    #[test]
    fn test_text_accepts_numbers() {
        assert_eq!(fields(json!({"text": "abc"})).text, "abc");
        assert_eq!(fields(json!({"text": 42})).text, "42");
    }

    #[test]
    fn test_string_list_keeps_trailing_empty() {
        assert_eq!(
            fields(json!({"names": "MACRO1,MACRO2,"})).names,
            vec!["MACRO1", "MACRO2", ""]
        );
        assert!(fields(json!({"names": ""})).names.is_empty());
        assert_eq!(fields(json!({"names": ["A", "B"]})).names, vec!["A", "B"]);
    }

    #[test]
    fn test_integer_list() {
        assert_eq!(fields(json!({"ints": "1,2, 3,"})).ints, vec![1, 2, 3]);
        assert_eq!(fields(json!({"ints": ""})).ints, Vec::<i64>::new());
        assert_eq!(fields(json!({"ints": [1, "2"]})).ints, vec![1, 2]);
        assert_eq!(fields(json!({"ints": 7})).ints, vec![7]);
        assert!(Fields::deserialize(&json!({"ints": "1,x"})).is_err());
    }

    #[test]
    fn test_base64_bytes_verbatim() {
        // "line 1\r\n\0"
        assert_eq!(
            fields(json!({"buf": "bGluZSAxDQoA"})).buf,
            b"line 1\r\n\0".to_vec()
        );
        // padding optional
        assert_eq!(fields(json!({"buf": "YWI"})).buf, b"ab".to_vec());
        assert_eq!(fields(json!({"buf": "YWI="})).buf, b"ab".to_vec());
        // both alphabets: 0xFB 0xFF
        assert_eq!(fields(json!({"buf": "-_8="})).buf, vec![0xFB, 0xFF]);
        assert_eq!(fields(json!({"buf": "+/8="})).buf, vec![0xFB, 0xFF]);
    }
}
