//! Common types used throughout the protocol

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Protocol errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("Payload too large: {0} bytes (maximum 65535)")]
    PayloadTooLarge(usize),

    #[error("Unknown command ID: {0:#04X}")]
    UnknownCommand(u8),

    #[error("Unknown command name: {0}")]
    UnknownCommandName(String),

    #[error("Unknown status code: {0}")]
    UnknownStatus(u16),
}

/// Status codes returned by the device in response frames
///
/// Names and values follow the command set manual (`E_SUCCESS` through
/// `E_FILE_EXISTS`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
#[repr(u16)]
pub enum StatusCode {
    /// E_SUCCESS: No error
    Success = 0,
    /// E_NOT_AVAILABLE: Device, service or data is not available
    NotAvailable = 1,
    /// E_NO_SENSOR: No sensor connected
    NoSensor = 2,
    /// E_NOT_INITIALIZED: The device is not initialized
    NotInitialized = 3,
    /// E_ALREADY_RUNNING: Service is already running
    AlreadyRunning = 4,
    /// E_FEATURE_NOT_SUPPORTED: The asked feature is not supported
    FeatureNotSupported = 5,
    /// E_INCONSISTENT_DATA: One or more dependent parameters mismatch
    InconsistentData = 6,
    /// E_TIMEOUT: Timeout error
    Timeout = 7,
    /// E_READ_ERROR: Error while reading from a device
    ReadError = 8,
    /// E_WRITE_ERROR: Error while writing to a device
    WriteError = 9,
    /// E_INSUFFICIENT_RESOURCES: No memory available
    InsufficientResources = 10,
    /// E_CHECKSUM_ERROR: Checksum error
    ChecksumError = 11,
    /// E_NO_PARAM_EXPECTED: No parameters expected
    NoParamExpected = 12,
    /// E_NOT_ENOUGH_PARAMS: Not enough parameters
    NotEnoughParams = 13,
    /// E_CMD_UNKNOWN: Unknown command
    CmdUnknown = 14,
    /// E_CMD_FORMAT_ERROR: Command format error
    CmdFormatError = 15,
    /// E_ACCESS_DENIED: Access denied
    AccessDenied = 16,
    /// E_ALREADY_OPEN: The interface is already open
    AlreadyOpen = 17,
    /// E_CMD_FAILED: Command failed
    CmdFailed = 18,
    /// E_CMD_ABORTED: Command aborted
    CmdAborted = 19,
    /// E_INVALID_HANDLE: Invalid handle
    InvalidHandle = 20,
    /// E_NOT_FOUND: Device not found
    NotFound = 21,
    /// E_NOT_OPEN: Device not open
    NotOpen = 22,
    /// E_IO_ERROR: I/O error
    IoError = 23,
    /// E_INVALID_PARAMETER: Invalid parameter
    InvalidParameter = 24,
    /// E_INDEX_OUT_OF_BOUNDS: Index out of bounds
    IndexOutOfBounds = 25,
    /// E_CMD_PENDING: Command execution needs more time
    CmdPending = 26,
    /// E_OVERRUN: Data overrun
    Overrun = 27,
    /// E_RANGE_ERROR: Range error
    RangeError = 28,
    /// E_AXIS_BLOCKED: Axis is blocked
    AxisBlocked = 29,
    /// E_FILE_EXISTS: File already exists
    FileExists = 30,
}

impl StatusCode {
    #[must_use]
    pub fn is_success(self) -> bool {
        self == StatusCode::Success
    }

    /// Description from the command set manual
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            StatusCode::Success => "No error",
            StatusCode::NotAvailable => "Device, service or data is not available",
            StatusCode::NoSensor => "No sensor connected",
            StatusCode::NotInitialized => "The device is not initialized",
            StatusCode::AlreadyRunning => "Service is already running",
            StatusCode::FeatureNotSupported => "The asked feature is not supported",
            StatusCode::InconsistentData => "One or more dependent parameters mismatch",
            StatusCode::Timeout => "Timeout error",
            StatusCode::ReadError => "Error while reading from a device",
            StatusCode::WriteError => "Error while writing to a device",
            StatusCode::InsufficientResources => "No memory available",
            StatusCode::ChecksumError => "Checksum error",
            StatusCode::NoParamExpected => "No parameters expected",
            StatusCode::NotEnoughParams => "Not enough parameters",
            StatusCode::CmdUnknown => "Unknown command",
            StatusCode::CmdFormatError => "Command format error",
            StatusCode::AccessDenied => "Access denied",
            StatusCode::AlreadyOpen => "The interface is already open",
            StatusCode::CmdFailed => "Command failed",
            StatusCode::CmdAborted => "Command aborted",
            StatusCode::InvalidHandle => "Invalid handle",
            StatusCode::NotFound => "Device not found",
            StatusCode::NotOpen => "Device not open",
            StatusCode::IoError => "I/O error",
            StatusCode::InvalidParameter => "Invalid parameter",
            StatusCode::IndexOutOfBounds => "Index out of bounds",
            StatusCode::CmdPending => "Command execution needs more time",
            StatusCode::Overrun => "Data overrun",
            StatusCode::RangeError => "Range error",
            StatusCode::AxisBlocked => "Axis is blocked",
            StatusCode::FileExists => "File already exists",
        }
    }
}

impl TryFrom<u16> for StatusCode {
    type Error = ProtocolError;

    fn try_from(value: u16) -> Result<Self, ProtocolError> {
        match value {
            0 => Ok(StatusCode::Success),
            1 => Ok(StatusCode::NotAvailable),
            2 => Ok(StatusCode::NoSensor),
            3 => Ok(StatusCode::NotInitialized),
            4 => Ok(StatusCode::AlreadyRunning),
            5 => Ok(StatusCode::FeatureNotSupported),
            6 => Ok(StatusCode::InconsistentData),
            7 => Ok(StatusCode::Timeout),
            8 => Ok(StatusCode::ReadError),
            9 => Ok(StatusCode::WriteError),
            10 => Ok(StatusCode::InsufficientResources),
            11 => Ok(StatusCode::ChecksumError),
            12 => Ok(StatusCode::NoParamExpected),
            13 => Ok(StatusCode::NotEnoughParams),
            14 => Ok(StatusCode::CmdUnknown),
            15 => Ok(StatusCode::CmdFormatError),
            16 => Ok(StatusCode::AccessDenied),
            17 => Ok(StatusCode::AlreadyOpen),
            18 => Ok(StatusCode::CmdFailed),
            19 => Ok(StatusCode::CmdAborted),
            20 => Ok(StatusCode::InvalidHandle),
            21 => Ok(StatusCode::NotFound),
            22 => Ok(StatusCode::NotOpen),
            23 => Ok(StatusCode::IoError),
            24 => Ok(StatusCode::InvalidParameter),
            25 => Ok(StatusCode::IndexOutOfBounds),
            26 => Ok(StatusCode::CmdPending),
            27 => Ok(StatusCode::Overrun),
            28 => Ok(StatusCode::RangeError),
            29 => Ok(StatusCode::AxisBlocked),
            30 => Ok(StatusCode::FileExists),
            _ => Err(ProtocolError::UnknownStatus(value)),
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Device state flags (`SF_*` in the manual)
///
/// Bits 8, 10, 11 and 21-31 are reserved: they are dropped when a raw value
/// is read and never set by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StateFlags(u32);

impl StateFlags {
    /// Fingers are referenced
    pub const REFERENCED: Self = Self(1 << 0);
    /// Fingers are moving
    pub const MOVING: Self = Self(1 << 1);
    /// Axis blocked in negative direction
    pub const BLOCKED_MINUS: Self = Self(1 << 2);
    /// Axis blocked in positive direction
    pub const BLOCKED_PLUS: Self = Self(1 << 3);
    /// Negative soft limit reached
    pub const SOFT_LIMIT_MINUS: Self = Self(1 << 4);
    /// Positive soft limit reached
    pub const SOFT_LIMIT_PLUS: Self = Self(1 << 5);
    /// Axis stopped
    pub const AXIS_STOPPED: Self = Self(1 << 6);
    /// Target position reached
    pub const TARGET_POS_REACHED: Self = Self(1 << 7);
    /// Force control mode active
    pub const FORCECNTL_MODE: Self = Self(1 << 9);
    /// Fast stop engaged
    pub const FAST_STOP: Self = Self(1 << 12);
    /// Temperature warning
    pub const TEMP_WARNING: Self = Self(1 << 13);
    /// Temperature fault
    pub const TEMP_FAULT: Self = Self(1 << 14);
    /// Power fault
    pub const POWER_FAULT: Self = Self(1 << 15);
    /// Current fault
    pub const CURR_FAULT: Self = Self(1 << 16);
    /// Finger fault
    pub const FINGER_FAULT: Self = Self(1 << 17);
    /// Last command failed
    pub const CMD_FAILURE: Self = Self(1 << 18);
    /// A script is running
    pub const SCRIPT_RUNNING: Self = Self(1 << 19);
    /// Script failure
    pub const SCRIPT_FAILURE: Self = Self(1 << 20);

    const NAMED: [(Self, &'static str); 18] = [
        (Self::REFERENCED, "referenced"),
        (Self::MOVING, "moving"),
        (Self::BLOCKED_MINUS, "blocked_minus"),
        (Self::BLOCKED_PLUS, "blocked_plus"),
        (Self::SOFT_LIMIT_MINUS, "soft_limit_minus"),
        (Self::SOFT_LIMIT_PLUS, "soft_limit_plus"),
        (Self::AXIS_STOPPED, "axis_stopped"),
        (Self::TARGET_POS_REACHED, "target_pos_reached"),
        (Self::FORCECNTL_MODE, "forcecntl_mode"),
        (Self::FAST_STOP, "fast_stop"),
        (Self::TEMP_WARNING, "temp_warning"),
        (Self::TEMP_FAULT, "temp_fault"),
        (Self::POWER_FAULT, "power_fault"),
        (Self::CURR_FAULT, "curr_fault"),
        (Self::FINGER_FAULT, "finger_fault"),
        (Self::CMD_FAILURE, "cmd_failure"),
        (Self::SCRIPT_RUNNING, "script_running"),
        (Self::SCRIPT_FAILURE, "script_failure"),
    ];

    /// Mask of every named bit
    pub const ALL_BITS: u32 = 0x001F_F2FF;

    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Build from a raw status word, discarding reserved bits
    #[must_use]
    pub const fn from_bits_truncate(bits: u32) -> Self {
        Self(bits & Self::ALL_BITS)
    }

    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True if every bit of `other` is set
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// True if any bit of `other` is set
    #[must_use]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }

    /// Names of the flags that are set, lowest bit first
    pub fn iter_names(self) -> impl Iterator<Item = &'static str> {
        Self::NAMED
            .into_iter()
            .filter(move |(flag, _)| self.contains(*flag))
            .map(|(_, name)| name)
    }
}

impl BitOr for StateFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for StateFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for StateFlags {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl From<u32> for StateFlags {
    fn from(bits: u32) -> Self {
        Self::from_bits_truncate(bits)
    }
}

impl fmt::Display for StateFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("(none)");
        }
        for (i, name) in self.iter_names().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            f.write_str(name)?;
        }
        Ok(())
    }
}

impl Serialize for StateFlags {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter_names())
    }
}
