//! WSG command identifiers
//!
//! Values follow the WSG Command Set Reference Manual and must not be
//! renumbered.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::types::ProtocolError;

/// Command IDs for the WSG command set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum CommandId {
    /// Loop back the payload (connectivity check)
    Loop = 0x06,
    /// Announce disconnection
    DisconnectAnnounce = 0x07,
    /// Home the fingers (reference run)
    Home = 0x20,
    /// Move fingers to a position
    PrePosition = 0x21,
    /// Stop the current motion
    Stop = 0x22,
    /// Issue a fast stop
    FastStop = 0x23,
    /// Acknowledge a fast stop or fault
    AcknowledgeStopOrFault = 0x24,
    /// Grasp a part
    Grasp = 0x25,
    /// Release a part
    Release = 0x26,
    /// Set acceleration
    SetAccel = 0x30,
    /// Get acceleration
    GetAccel = 0x31,
    /// Set force limit
    SetForceLimit = 0x32,
    /// Get force limit
    GetForceLimit = 0x33,
    /// Set soft limits
    SetSoftLimits = 0x34,
    /// Get soft limits
    GetSoftLimits = 0x35,
    /// Clear soft limits
    ClearSoftLimits = 0x36,
    /// Tare the force sensor
    TareForceSensor = 0x38,
    /// Get system state flags
    GetSystemState = 0x40,
    /// Get grasping state
    GetGraspState = 0x41,
    /// Get grasping statistics
    GetGraspStats = 0x42,
    /// Get opening width
    GetOpeningWidth = 0x43,
    /// Get finger speed
    GetSpeed = 0x44,
    /// Get grasping force
    GetForce = 0x45,
    /// Get device temperature
    GetTemperature = 0x46,
    /// Get system information
    GetSystemInfo = 0x50,
    /// Set device tag
    SetDeviceTag = 0x51,
    /// Get device tag
    GetDeviceTag = 0x52,
    /// Get system limits
    GetSystemLimits = 0x53,
    /// Get finger info
    GetFingerInfo = 0x60,
    /// Get finger flags
    GetFingerFlags = 0x61,
    /// Finger power control
    FingerPowerControl = 0x62,
    /// Get finger data
    GetFingerData = 0x63,
}

impl CommandId {
    /// Every command in the manual, in ascending id order
    pub const ALL: [CommandId; 32] = [
        CommandId::Loop,
        CommandId::DisconnectAnnounce,
        CommandId::Home,
        CommandId::PrePosition,
        CommandId::Stop,
        CommandId::FastStop,
        CommandId::AcknowledgeStopOrFault,
        CommandId::Grasp,
        CommandId::Release,
        CommandId::SetAccel,
        CommandId::GetAccel,
        CommandId::SetForceLimit,
        CommandId::GetForceLimit,
        CommandId::SetSoftLimits,
        CommandId::GetSoftLimits,
        CommandId::ClearSoftLimits,
        CommandId::TareForceSensor,
        CommandId::GetSystemState,
        CommandId::GetGraspState,
        CommandId::GetGraspStats,
        CommandId::GetOpeningWidth,
        CommandId::GetSpeed,
        CommandId::GetForce,
        CommandId::GetTemperature,
        CommandId::GetSystemInfo,
        CommandId::SetDeviceTag,
        CommandId::GetDeviceTag,
        CommandId::GetSystemLimits,
        CommandId::GetFingerInfo,
        CommandId::GetFingerFlags,
        CommandId::FingerPowerControl,
        CommandId::GetFingerData,
    ];

    #[must_use]
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x06 => Some(CommandId::Loop),
            0x07 => Some(CommandId::DisconnectAnnounce),
            0x20 => Some(CommandId::Home),
            0x21 => Some(CommandId::PrePosition),
            0x22 => Some(CommandId::Stop),
            0x23 => Some(CommandId::FastStop),
            0x24 => Some(CommandId::AcknowledgeStopOrFault),
            0x25 => Some(CommandId::Grasp),
            0x26 => Some(CommandId::Release),
            0x30 => Some(CommandId::SetAccel),
            0x31 => Some(CommandId::GetAccel),
            0x32 => Some(CommandId::SetForceLimit),
            0x33 => Some(CommandId::GetForceLimit),
            0x34 => Some(CommandId::SetSoftLimits),
            0x35 => Some(CommandId::GetSoftLimits),
            0x36 => Some(CommandId::ClearSoftLimits),
            0x38 => Some(CommandId::TareForceSensor),
            0x40 => Some(CommandId::GetSystemState),
            0x41 => Some(CommandId::GetGraspState),
            0x42 => Some(CommandId::GetGraspStats),
            0x43 => Some(CommandId::GetOpeningWidth),
            0x44 => Some(CommandId::GetSpeed),
            0x45 => Some(CommandId::GetForce),
            0x46 => Some(CommandId::GetTemperature),
            0x50 => Some(CommandId::GetSystemInfo),
            0x51 => Some(CommandId::SetDeviceTag),
            0x52 => Some(CommandId::GetDeviceTag),
            0x53 => Some(CommandId::GetSystemLimits),
            0x60 => Some(CommandId::GetFingerInfo),
            0x61 => Some(CommandId::GetFingerFlags),
            0x62 => Some(CommandId::FingerPowerControl),
            0x63 => Some(CommandId::GetFingerData),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Snake-case name, as accepted by [`FromStr`]
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            CommandId::Loop => "loop",
            CommandId::DisconnectAnnounce => "disconnect_announce",
            CommandId::Home => "home",
            CommandId::PrePosition => "pre_position",
            CommandId::Stop => "stop",
            CommandId::FastStop => "fast_stop",
            CommandId::AcknowledgeStopOrFault => "acknowledge_stop_or_fault",
            CommandId::Grasp => "grasp",
            CommandId::Release => "release",
            CommandId::SetAccel => "set_accel",
            CommandId::GetAccel => "get_accel",
            CommandId::SetForceLimit => "set_force_limit",
            CommandId::GetForceLimit => "get_force_limit",
            CommandId::SetSoftLimits => "set_soft_limits",
            CommandId::GetSoftLimits => "get_soft_limits",
            CommandId::ClearSoftLimits => "clear_soft_limits",
            CommandId::TareForceSensor => "tare_force_sensor",
            CommandId::GetSystemState => "get_system_state",
            CommandId::GetGraspState => "get_grasp_state",
            CommandId::GetGraspStats => "get_grasp_stats",
            CommandId::GetOpeningWidth => "get_opening_width",
            CommandId::GetSpeed => "get_speed",
            CommandId::GetForce => "get_force",
            CommandId::GetTemperature => "get_temperature",
            CommandId::GetSystemInfo => "get_system_info",
            CommandId::SetDeviceTag => "set_device_tag",
            CommandId::GetDeviceTag => "get_device_tag",
            CommandId::GetSystemLimits => "get_system_limits",
            CommandId::GetFingerInfo => "get_finger_info",
            CommandId::GetFingerFlags => "get_finger_flags",
            CommandId::FingerPowerControl => "finger_power_control",
            CommandId::GetFingerData => "get_finger_data",
        }
    }
}

impl TryFrom<u8> for CommandId {
    type Error = ProtocolError;

    fn try_from(value: u8) -> Result<Self, ProtocolError> {
        Self::from_u8(value).ok_or(ProtocolError::UnknownCommand(value))
    }
}

impl From<CommandId> for u8 {
    fn from(command: CommandId) -> Self {
        command as u8
    }
}

impl FromStr for CommandId {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|cmd| cmd.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| ProtocolError::UnknownCommandName(name.to_string()))
    }
}

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:#04X})", self.name(), self.as_u8())
    }
}
