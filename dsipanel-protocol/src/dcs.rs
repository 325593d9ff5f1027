//! Display Command Set (DCS) commands
//!
//! Only the user command set subset panel drivers need for power
//! sequencing and basic configuration.

/// DCS command opcodes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum DcsCommand {
    Nop = 0x00,
    SoftReset = 0x01,
    /// Enter sleep mode (panel off, registers retained)
    EnterSleepMode = 0x10,
    /// Leave sleep mode; needs 120 ms before the next sleep command
    ExitSleepMode = 0x11,
    SetDisplayOff = 0x28,
    SetDisplayOn = 0x29,
    SetTearOff = 0x34,
    /// One parameter: tearing effect output mode
    SetTearOn = 0x35,
    ExitIdleMode = 0x38,
    EnterIdleMode = 0x39,
    /// One parameter: interface pixel format
    SetPixelFormat = 0x3A,
}

impl DcsCommand {
    /// Get the opcode byte
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Look up a command by opcode
    pub fn from_code(code: u8) -> Option<Self> {
        use DcsCommand::*;

        match code {
            0x00 => Some(Nop),
            0x01 => Some(SoftReset),
            0x10 => Some(EnterSleepMode),
            0x11 => Some(ExitSleepMode),
            0x28 => Some(SetDisplayOff),
            0x29 => Some(SetDisplayOn),
            0x34 => Some(SetTearOff),
            0x35 => Some(SetTearOn),
            0x38 => Some(ExitIdleMode),
            0x39 => Some(EnterIdleMode),
            0x3A => Some(SetPixelFormat),
            _ => None,
        }
    }

    /// Number of parameter bytes the command takes
    pub fn param_count(self) -> usize {
        match self {
            DcsCommand::SetTearOn | DcsCommand::SetPixelFormat => 1,
            _ => 0,
        }
    }
}
