//! Procedure identifiers.
//!
//! Every COMET procedure has a symbolic name (sent as the `func` query
//! parameter) and a numeric code that the controller echoes back in the
//! `rpc` field of each result element. The controller quotes that code,
//! so it arrives as a JSON string of digits.
//!
//! # Example
//!
//! ```
//! use comet_rpc::Procedure;
//!
//! assert_eq!(Procedure::IoValRd.code(), 62);
//! assert_eq!(Procedure::IoValRd.name(), "IOVALRD");
//! assert_eq!(Procedure::from_code(62), Some(Procedure::IoValRd));
//! assert_eq!(Procedure::from_code(-1), None);
//! ```

use std::fmt;

/// Codes the controller echoes instead of the requested one when it does not
/// know a procedure. Older system software uses `0`.
pub const UNSUPPORTED_PROCEDURE_CODES: [i64; 2] = [-1, 0];

/// Returns whether `code` is one of the unsupported-procedure sentinels.
pub fn is_unsupported_code(code: i64) -> bool {
    UNSUPPORTED_PROCEDURE_CODES.contains(&code)
}

/// The COMET procedures known to this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Procedure {
    /// Change the general override.
    ChgOvrd,
    /// Execute a KCL command.
    CpKcl,
    /// Render an error code as text.
    DpeWriteStr,
    /// Read a dictionary element.
    DpRead,
    /// Post an error.
    ErPost,
    /// Download a file.
    GetRawFile,
    /// List a directory.
    GtFiList,
    /// List the macros.
    GtMcrLst,
    /// List the positions in a program.
    GtPIdLst,
    /// Update an I/O assignment.
    IoAsgLog,
    /// Check whether a port is simulated.
    IoCkSim,
    /// Set a port comment.
    IoDefPn,
    /// Simulate all I/O.
    IoDryRun,
    /// Retrieve I/O assignments.
    IoGetAsg,
    /// Retrieve the I/O hardware database.
    IoGetHdb,
    /// Get a port comment.
    IoGetPn,
    /// Read a range of ports.
    IoGtAll,
    /// Simulate a port.
    IoSim,
    /// Unsimulate a port.
    IoUnsim,
    /// Read a port.
    IoValRd,
    /// Write a port.
    IoValSet,
    /// Unsimulate all I/O.
    IoWetRun,
    /// Local start.
    LocalStart,
    /// Create a program.
    MmCreMn,
    /// Get the type of a program.
    MmGetTyp,
    /// Open a program.
    MmMsOpen,
    /// Copy or cut lines in a TP program.
    PasteLin,
    /// Abort a program.
    PgAbort,
    /// Read a position register.
    PosRegValRd,
    /// Record a position.
    RecPos,
    /// Read a numeric register.
    RegValRd,
    /// (Un)remark lines in a TP program.
    RemarkLin,
    /// Append a line to the console log.
    RPrintf,
    /// Get a position from a program.
    ScGetPos,
    /// Open a program on the TP.
    TxChgPrg,
    /// Current pose in joint angles.
    TxMlCurAng,
    /// Current Cartesian pose.
    TxMlCurPos,
    /// Open a program at a line.
    TxSetLin,
    /// Read a variable.
    VmIpReadVa,
    /// Write a variable.
    VmIpWriteVa,
}

impl Procedure {
    /// Every registered procedure.
    pub const ALL: [Procedure; 40] = [
        Procedure::ChgOvrd,
        Procedure::CpKcl,
        Procedure::DpeWriteStr,
        Procedure::DpRead,
        Procedure::ErPost,
        Procedure::GetRawFile,
        Procedure::GtFiList,
        Procedure::GtMcrLst,
        Procedure::GtPIdLst,
        Procedure::IoAsgLog,
        Procedure::IoCkSim,
        Procedure::IoDefPn,
        Procedure::IoDryRun,
        Procedure::IoGetAsg,
        Procedure::IoGetHdb,
        Procedure::IoGetPn,
        Procedure::IoGtAll,
        Procedure::IoSim,
        Procedure::IoUnsim,
        Procedure::IoValRd,
        Procedure::IoValSet,
        Procedure::IoWetRun,
        Procedure::LocalStart,
        Procedure::MmCreMn,
        Procedure::MmGetTyp,
        Procedure::MmMsOpen,
        Procedure::PasteLin,
        Procedure::PgAbort,
        Procedure::PosRegValRd,
        Procedure::RecPos,
        Procedure::RegValRd,
        Procedure::RemarkLin,
        Procedure::RPrintf,
        Procedure::ScGetPos,
        Procedure::TxChgPrg,
        Procedure::TxMlCurAng,
        Procedure::TxMlCurPos,
        Procedure::TxSetLin,
        Procedure::VmIpReadVa,
        Procedure::VmIpWriteVa,
    ];

    /// Returns the numeric code of this procedure.
    pub fn code(self) -> i64 {
        match self {
            Procedure::MmMsOpen => 9,
            Procedure::MmCreMn => 22,
            Procedure::MmGetTyp => 23,
            Procedure::ScGetPos => 24,
            Procedure::VmIpReadVa => 31,
            Procedure::VmIpWriteVa => 32,
            Procedure::TxChgPrg => 43,
            Procedure::IoValRd => 62,
            Procedure::IoValSet => 63,
            Procedure::IoSim => 64,
            Procedure::IoUnsim => 65,
            Procedure::IoCkSim => 66,
            Procedure::IoGetPn => 67,
            Procedure::IoDefPn => 68,
            Procedure::IoGetAsg => 69,
            Procedure::IoAsgLog => 70,
            Procedure::IoGetHdb => 71,
            Procedure::IoDryRun => 72,
            Procedure::IoWetRun => 73,
            Procedure::DpeWriteStr => 83,
            Procedure::ChgOvrd => 84,
            Procedure::ErPost => 85,
            Procedure::CpKcl => 87,
            Procedure::RPrintf => 89,
            Procedure::TxMlCurPos => 90,
            Procedure::TxMlCurAng => 91,
            Procedure::PgAbort => 102,
            Procedure::DpRead => 148,
            Procedure::IoGtAll => 226,
            Procedure::GtFiList => 234,
            Procedure::GtMcrLst => 235,
            Procedure::RecPos => 236,
            Procedure::TxSetLin => 237,
            Procedure::GtPIdLst => 238,
            Procedure::PasteLin => 239,
            Procedure::RemarkLin => 240,
            Procedure::LocalStart => 245,
            Procedure::RegValRd => 247,
            Procedure::PosRegValRd => 248,
            Procedure::GetRawFile => 251,
        }
    }

    /// Returns whether [`Procedure::code`] has been seen echoed by a
    /// controller.
    ///
    /// The other codes are inferred from their neighbours and may differ on
    /// real hardware, so an echo that does not match them is not an error.
    pub fn code_is_confirmed(self) -> bool {
        !matches!(
            self,
            Procedure::MmGetTyp
                | Procedure::ScGetPos
                | Procedure::IoSim
                | Procedure::IoUnsim
                | Procedure::IoCkSim
                | Procedure::IoGetAsg
                | Procedure::IoAsgLog
                | Procedure::IoGetHdb
                | Procedure::IoDryRun
                | Procedure::IoWetRun
                | Procedure::ChgOvrd
                | Procedure::GtMcrLst
                | Procedure::GtPIdLst
                | Procedure::PasteLin
                | Procedure::RemarkLin
        )
    }

    /// Returns the symbolic name of this procedure.
    pub fn name(self) -> &'static str {
        match self {
            Procedure::ChgOvrd => "CHGOVRD",
            Procedure::CpKcl => "CPKCL",
            Procedure::DpeWriteStr => "DPEWRITE_STR",
            Procedure::DpRead => "DPREAD",
            Procedure::ErPost => "ERPOST",
            Procedure::GetRawFile => "GET_RAW_FILE",
            Procedure::GtFiList => "GTFILIST",
            Procedure::GtMcrLst => "GTMCRLST",
            Procedure::GtPIdLst => "GTPIDLST",
            Procedure::IoAsgLog => "IOASGLOG",
            Procedure::IoCkSim => "IOCKSIM",
            Procedure::IoDefPn => "IODEFPN",
            Procedure::IoDryRun => "IODRYRUN",
            Procedure::IoGetAsg => "IOGETASG",
            Procedure::IoGetHdb => "IOGETHDB",
            Procedure::IoGetPn => "IOGETPN",
            Procedure::IoGtAll => "IOGTALL",
            Procedure::IoSim => "IOSIM",
            Procedure::IoUnsim => "IOUNSIM",
            Procedure::IoValRd => "IOVALRD",
            Procedure::IoValSet => "IOVALSET",
            Procedure::IoWetRun => "IOWETRUN",
            Procedure::LocalStart => "LOCAL_START",
            Procedure::MmCreMn => "MMCREMN",
            Procedure::MmGetTyp => "MMGETTYP",
            Procedure::MmMsOpen => "MMMSOPEN",
            Procedure::PasteLin => "PASTELIN",
            Procedure::PgAbort => "PGABORT",
            Procedure::PosRegValRd => "POSREGVALRD",
            Procedure::RecPos => "RECPOS",
            Procedure::RegValRd => "REGVALRD",
            Procedure::RemarkLin => "REMARKLIN",
            Procedure::RPrintf => "RPRINTF",
            Procedure::ScGetPos => "SCGETPOS",
            Procedure::TxChgPrg => "TXCHGPRG",
            Procedure::TxMlCurAng => "TXML_CURANG",
            Procedure::TxMlCurPos => "TXML_CURPOS",
            Procedure::TxSetLin => "TXSETLIN",
            Procedure::VmIpReadVa => "VMIP_READVA",
            Procedure::VmIpWriteVa => "VMIP_WRITEVA",
        }
    }

    /// Looks up the procedure with the given numeric code.
    pub fn from_code(code: i64) -> Option<Procedure> {
        Self::ALL.into_iter().find(|p| p.code() == code)
    }

    /// Looks up the procedure with the given symbolic name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Procedure> {
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Procedure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.code())
    }
}
