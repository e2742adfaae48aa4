//! Typed tags consumed by the COMET procedures.
//!
//! # Example
//!
//! ```
//! use comet_rpc::IoType;
//!
//! assert_eq!(IoType::DigitalIn.code(), 1);
//! assert_eq!(IoType::try_from(2).unwrap(), IoType::DigitalOut);
//! assert_eq!(IoType::DigitalOut.to_string(), "DO");
//! ```

use std::fmt;

use serde::Deserialize;

use crate::error::{CometError, Result};

/// I/O port types (`kliotyps.kl`, V9.40).
///
/// Numeric codes 11 and 12 are named operator panel ports on older system
/// software and SOP on newer; see [`IoType::SO_PANEL_IN`] and
/// [`IoType::SO_PANEL_OUT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "i32")]
#[repr(i32)]
pub enum IoType {
    /// No port type.
    None = 0,
    /// Digital input.
    DigitalIn = 1,
    /// Digital output.
    DigitalOut = 2,
    /// Analog input.
    AnalogIn = 3,
    /// Analog output.
    AnalogOut = 4,
    /// Tool output.
    ToolOut = 5,
    /// PLC input.
    PlcIn = 6,
    /// PLC output.
    PlcOut = 7,
    /// Robot digital input.
    RobotDigitalIn = 8,
    /// Robot digital output.
    RobotDigitalOut = 9,
    /// Brake output.
    BrakeOut = 10,
    /// Operator panel input.
    OpPanelIn = 11,
    /// Operator panel output.
    OpPanelOut = 12,
    /// Emergency stop.
    Estop = 13,
    /// Teach pendant digital input.
    TpIn = 14,
    /// Teach pendant digital output.
    TpOut = 15,
    /// Weld input.
    WeldDigitalIn = 16,
    /// Weld output.
    WeldDigitalOut = 17,
    /// Grouped input (16 bits).
    GroupedIn = 18,
    /// Grouped output (16 bits).
    GroupedOut = 19,
    /// User operator panel input.
    UserOpPanelIn = 20,
    /// User operator panel output.
    UserOpPanelOut = 21,
    /// Laser digital input.
    LaserDigIn = 22,
    /// Laser digital output.
    LaserDigOut = 23,
    /// Laser analog input.
    LaserAnaIn = 24,
    /// Laser analog output.
    LaserAnaOut = 25,
    /// Weld stick input.
    WeldStickInput = 26,
    /// Weld stick output.
    WeldStickOutput = 27,
    /// Memory image booleans.
    MemImgBoolean = 28,
    /// Memory image digital inputs.
    MemImgDigIn = 29,
    /// Dummy boolean port.
    DummyBoolPort = 30,
    /// Dummy numeric port.
    DummyNumPort = 31,
    /// Process axis.
    ProcessAxis = 32,
    /// Internal operator panel input.
    InternalOpPanelInput = 33,
    /// Internal operator panel output.
    InternalOpPanelOutput = 34,
    /// Flag (`F[]`).
    Flag = 35,
    /// Marker (`M[]`).
    Marker = 36,
    /// Grouped input (32 bits).
    GroupedIn32 = 37,
    /// Grouped output (32 bits).
    GroupedOut32 = 38,
    /// Backed-up internal relay (physical only).
    InternalRelayBackup = 41,
    /// Internal relay (physical only).
    InternalRelay = 42,
    /// Backed-up internal register (physical only).
    InternalRegBackup = 43,
    /// Internal register (physical only).
    InternalReg = 44,
}

impl IoType {
    /// SOP input; same code as [`IoType::OpPanelIn`].
    pub const SO_PANEL_IN: IoType = IoType::OpPanelIn;
    /// SOP output; same code as [`IoType::OpPanelOut`].
    pub const SO_PANEL_OUT: IoType = IoType::OpPanelOut;

    /// Returns the numeric port type code.
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Returns the short mnemonic shown on the teach pendant, if there is one.
    pub fn mnemonic(self) -> Option<&'static str> {
        let s = match self {
            IoType::DigitalIn => "DI",
            IoType::DigitalOut => "DO",
            IoType::AnalogIn => "AI",
            IoType::AnalogOut => "AO",
            IoType::PlcIn => "PI",
            IoType::PlcOut => "PO",
            IoType::RobotDigitalIn => "RI",
            IoType::RobotDigitalOut => "RO",
            IoType::OpPanelIn => "SI",
            IoType::OpPanelOut => "SO",
            IoType::WeldDigitalIn => "WI",
            IoType::WeldDigitalOut => "WO",
            IoType::GroupedIn => "GI",
            IoType::GroupedOut => "GO",
            IoType::UserOpPanelIn => "UI",
            IoType::UserOpPanelOut => "UO",
            IoType::Flag => "F",
            IoType::Marker => "M",
            _ => return None,
        };
        Some(s)
    }
}

impl TryFrom<i32> for IoType {
    type Error = CometError;

    fn try_from(code: i32) -> Result<Self> {
        let io_type = match code {
            0 => IoType::None,
            1 => IoType::DigitalIn,
            2 => IoType::DigitalOut,
            3 => IoType::AnalogIn,
            4 => IoType::AnalogOut,
            5 => IoType::ToolOut,
            6 => IoType::PlcIn,
            7 => IoType::PlcOut,
            8 => IoType::RobotDigitalIn,
            9 => IoType::RobotDigitalOut,
            10 => IoType::BrakeOut,
            11 => IoType::OpPanelIn,
            12 => IoType::OpPanelOut,
            13 => IoType::Estop,
            14 => IoType::TpIn,
            15 => IoType::TpOut,
            16 => IoType::WeldDigitalIn,
            17 => IoType::WeldDigitalOut,
            18 => IoType::GroupedIn,
            19 => IoType::GroupedOut,
            20 => IoType::UserOpPanelIn,
            21 => IoType::UserOpPanelOut,
            22 => IoType::LaserDigIn,
            23 => IoType::LaserDigOut,
            24 => IoType::LaserAnaIn,
            25 => IoType::LaserAnaOut,
            26 => IoType::WeldStickInput,
            27 => IoType::WeldStickOutput,
            28 => IoType::MemImgBoolean,
            29 => IoType::MemImgDigIn,
            30 => IoType::DummyBoolPort,
            31 => IoType::DummyNumPort,
            32 => IoType::ProcessAxis,
            33 => IoType::InternalOpPanelInput,
            34 => IoType::InternalOpPanelOutput,
            35 => IoType::Flag,
            36 => IoType::Marker,
            37 => IoType::GroupedIn32,
            38 => IoType::GroupedOut32,
            41 => IoType::InternalRelayBackup,
            42 => IoType::InternalRelay,
            43 => IoType::InternalRegBackup,
            44 => IoType::InternalReg,
            _ => {
                return Err(CometError::invalid_parameter(
                    "type",
                    format!("unknown I/O type code {code}"),
                ))
            }
        };
        Ok(io_type)
    }
}

impl fmt::Display for IoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mnemonic() {
            Some(m) => f.write_str(m),
            None => write!(f, "{:?}", self),
        }
    }
}

/// Position representation of a position register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "i32")]
#[repr(i32)]
pub enum PositionType {
    /// Cartesian (XYZWPR).
    XyzWpr = 2,
    /// Joint angles.
    JointPos = 9,
}

impl PositionType {
    /// Returns the numeric representation code.
    pub fn code(self) -> i32 {
        self as i32
    }
}

impl TryFrom<i32> for PositionType {
    type Error = CometError;

    fn try_from(code: i32) -> Result<Self> {
        match code {
            2 => Ok(PositionType::XyzWpr),
            9 => Ok(PositionType::JointPos),
            _ => Err(CometError::invalid_parameter(
                "type",
                format!("unknown position type code {code}"),
            )),
        }
    }
}

/// Operation performed by [`Client::paste_line`](crate::Client::paste_line).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PasteLineOper {
    /// Duplicate the selected lines.
    Copy,
    /// Move the selected lines.
    Cut,
}

impl PasteLineOper {
    /// Returns the `opt_sw` value sent to the controller.
    pub fn code(self) -> i32 {
        match self {
            PasteLineOper::Copy => 0,
            PasteLineOper::Cut => 1,
        }
    }
}

/// Operation performed by [`Client::remark_line`](crate::Client::remark_line).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemarkLineOper {
    /// Turn remarked lines back into instructions.
    Unremark,
    /// Comment out the selected lines.
    Remark,
}

impl RemarkLineOper {
    /// Returns the `remark` value sent to the controller.
    pub fn code(self) -> i32 {
        match self {
            RemarkLineOper::Unremark => 0,
            RemarkLineOper::Remark => 1,
        }
    }
}

/// General override setting.
///
/// The controller does not report out-of-range percentages, so no range
/// check is done here either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Override {
    /// VFINE.
    VFine,
    /// FINE.
    Fine,
    /// Percentage, nominally 1-100.
    Percent(u8),
}

impl Override {
    /// Returns the `ovrd_val` value sent to the controller.
    pub fn value(self) -> i32 {
        match self {
            Override::VFine => -1,
            Override::Fine => 0,
            Override::Percent(p) => i32::from(p),
        }
    }
}

/// I/O range assignment passed to [`Client::ioasglog`](crate::Client::ioasglog).
///
/// To delete a range, set `log_port_type` and `first_log_port` and leave the
/// rest at their defaults (zero, [`IoType::None`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssignmentSpec {
    /// Type of the logical range.
    pub log_port_type: IoType,
    /// First logical port of the range.
    pub first_log_port: u32,
    /// Number of logical ports in the range.
    pub log_port_count: u32,
    /// Rack number.
    pub rack: u32,
    /// Slot number.
    pub slot: u32,
    /// Type of the physical ports the range maps to.
    pub phy_port_type: IoType,
    /// First physical port.
    pub first_phy_port: u32,
}

impl AssignmentSpec {
    /// Describes the deletion of the range of `log_port_type` starting at
    /// `first_log_port`.
    pub fn delete(log_port_type: IoType, first_log_port: u32) -> Self {
        Self {
            log_port_type,
            first_log_port,
            log_port_count: 0,
            rack: 0,
            slot: 0,
            phy_port_type: IoType::None,
            first_phy_port: 0,
        }
    }
}
