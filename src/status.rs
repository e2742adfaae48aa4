//! Controller status dictionary.
//!
//! COMET reports the outcome of a procedure as a 24-bit status: the upper
//! byte identifies the facility (subsystem) and the lower 16 bits the code
//! within that facility. `0` always means success.
//!
//! Only the codes that the [`Client`](crate::Client) methods translate into
//! specific errors are listed here. Anything else surfaces as
//! [`CometError::UnexpectedStatus`](crate::CometError::UnexpectedStatus).
//!
//! # Example
//!
//! ```
//! use comet_rpc::{ErrorCode, Facility};
//!
//! let code = ErrorCode::from_status(0x0D0002).unwrap();
//! assert_eq!(code, ErrorCode::Prio002);
//! assert_eq!(code.facility(), Facility::Prio);
//! assert_eq!(code.to_string(), "PRIO-002");
//! ```

use std::fmt;

/// Status value that indicates success.
pub const STATUS_OK: u32 = 0;

/// Controller facilities that report the statuses in [`ErrorCode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facility {
    /// Memory manager.
    Memo,
    /// Port I/O.
    Prio,
    /// Variable manager.
    Vars,
    /// Dictionary manager.
    Dict,
    /// Hardware / runtime library.
    Hrtl,
}

impl Facility {
    /// Returns the numeric facility identifier (bits 16-23 of a status).
    pub fn id(self) -> u8 {
        match self {
            Facility::Memo => 0x07,
            Facility::Prio => 0x0D,
            Facility::Vars => 0x10,
            Facility::Dict => 0x21,
            Facility::Hrtl => 0x42,
        }
    }

    /// Returns the facility mnemonic as printed by the controller.
    pub fn mnemonic(self) -> &'static str {
        match self {
            Facility::Memo => "MEMO",
            Facility::Prio => "PRIO",
            Facility::Vars => "VARS",
            Facility::Dict => "DICT",
            Facility::Hrtl => "HRTL",
        }
    }
}

impl fmt::Display for Facility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// Known controller status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// DICT-004: dictionary not found.
    Dict004,
    /// DICT-005: dictionary element not found.
    Dict005,
    /// HRTL-022: invalid argument.
    Hrtl022,
    /// MEMO-027: specified line does not exist.
    Memo027,
    /// MEMO-071: specified position does not exist.
    Memo071,
    /// MEMO-073: specified program does not exist.
    Memo073,
    /// PRIO-001: illegal port type.
    Prio001,
    /// PRIO-002: illegal port number.
    Prio002,
    /// PRIO-007: no such assignment.
    Prio007,
    /// PRIO-011: assignment overlaps an existing one.
    Prio011,
    /// PRIO-023: no ports of this type.
    Prio023,
    /// PRIO-030: no comment on port.
    Prio030,
    /// VARS-006: unknown variable name.
    Vars006,
    /// VARS-011: no data defined for program.
    Vars011,
    /// VARS-024: bad variable or register index.
    Vars024,
    /// VARS-049: bad element in structure.
    Vars049,
}

impl ErrorCode {
    /// Every code in the dictionary.
    pub const ALL: [ErrorCode; 16] = [
        ErrorCode::Dict004,
        ErrorCode::Dict005,
        ErrorCode::Hrtl022,
        ErrorCode::Memo027,
        ErrorCode::Memo071,
        ErrorCode::Memo073,
        ErrorCode::Prio001,
        ErrorCode::Prio002,
        ErrorCode::Prio007,
        ErrorCode::Prio011,
        ErrorCode::Prio023,
        ErrorCode::Prio030,
        ErrorCode::Vars006,
        ErrorCode::Vars011,
        ErrorCode::Vars024,
        ErrorCode::Vars049,
    ];

    /// Returns the facility that reports this code.
    pub fn facility(self) -> Facility {
        match self {
            ErrorCode::Dict004 | ErrorCode::Dict005 => Facility::Dict,
            ErrorCode::Hrtl022 => Facility::Hrtl,
            ErrorCode::Memo027 | ErrorCode::Memo071 | ErrorCode::Memo073 => Facility::Memo,
            ErrorCode::Prio001
            | ErrorCode::Prio002
            | ErrorCode::Prio007
            | ErrorCode::Prio011
            | ErrorCode::Prio023
            | ErrorCode::Prio030 => Facility::Prio,
            ErrorCode::Vars006 | ErrorCode::Vars011 | ErrorCode::Vars024 | ErrorCode::Vars049 => {
                Facility::Vars
            }
        }
    }

    /// Returns the code number within the facility.
    pub fn number(self) -> u16 {
        match self {
            ErrorCode::Dict004 => 4,
            ErrorCode::Dict005 => 5,
            ErrorCode::Hrtl022 => 22,
            ErrorCode::Memo027 => 27,
            ErrorCode::Memo071 => 71,
            ErrorCode::Memo073 => 73,
            ErrorCode::Prio001 => 1,
            ErrorCode::Prio002 => 2,
            ErrorCode::Prio007 => 7,
            ErrorCode::Prio011 => 11,
            ErrorCode::Prio023 => 23,
            ErrorCode::Prio030 => 30,
            ErrorCode::Vars006 => 6,
            ErrorCode::Vars011 => 11,
            ErrorCode::Vars024 => 24,
            ErrorCode::Vars049 => 49,
        }
    }

    /// Returns the 24-bit status value as reported by the controller.
    ///
    /// # Example
    ///
    /// ```
    /// use comet_rpc::ErrorCode;
    ///
    /// assert_eq!(ErrorCode::Vars049.value(), 0x100031);
    /// ```
    pub fn value(self) -> u32 {
        (u32::from(self.facility().id()) << 16) | u32::from(self.number())
    }

    /// Looks up a status value in the dictionary.
    ///
    /// Returns `None` for success and for codes not in the dictionary.
    pub fn from_status(status: u32) -> Option<ErrorCode> {
        Self::ALL.into_iter().find(|code| code.value() == status)
    }

    /// Returns a short description of the code.
    pub fn description(self) -> &'static str {
        match self {
            ErrorCode::Dict004 => "Dictionary not found",
            ErrorCode::Dict005 => "Dictionary element not found",
            ErrorCode::Hrtl022 => "Invalid argument",
            ErrorCode::Memo027 => "Specified line does not exist",
            ErrorCode::Memo071 => "Specified position does not exist",
            ErrorCode::Memo073 => "Specified program does not exist",
            ErrorCode::Prio001 => "Illegal port type",
            ErrorCode::Prio002 => "Illegal port number",
            ErrorCode::Prio007 => "No such assignment",
            ErrorCode::Prio011 => "Assignment overlaps an existing one",
            ErrorCode::Prio023 => "No ports of this type",
            ErrorCode::Prio030 => "No comment on port",
            ErrorCode::Vars006 => "Unknown variable name",
            ErrorCode::Vars011 => "No data defined for program",
            ErrorCode::Vars024 => "Bad variable or register index",
            ErrorCode::Vars049 => "Bad element in structure",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:03}", self.facility(), self.number())
    }
}
