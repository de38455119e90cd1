//! Translator mode flags
//!
//! Modes persist for the whole session until a reset or a mode-setting
//! sequence changes them.

use serde::{Deserialize, Serialize};

/// Mode flags affecting how bytes are passed to the printer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Modes {
    /// DECAWM - Auto wrap mode
    /// When enabled, a printable byte arriving at the right margin is
    /// preceded by CR LF
    pub autowrap: bool,

    /// LF is sent to the printer as CR LF
    pub newline_crlf: bool,

    /// NUL filler bytes follow every LF, giving the carriage time to settle
    pub nul_delays: bool,
}

impl Modes {
    /// Apply one APC flag byte, returning whether it was recognized
    ///
    /// - `a` / `A`: disable / enable LF to CR LF translation
    /// - `b` / `B`: disable / enable NUL delays
    pub fn apply_apc_flag(&mut self, flag: u8) -> bool {
        match flag {
            b'a' => self.newline_crlf = false,
            b'A' => self.newline_crlf = true,
            b'b' => self.nul_delays = false,
            b'B' => self.nul_delays = true,
            _ => return false,
        }
        true
    }

    /// Set or reset a DEC private mode by number
    ///
    /// Only mode 7 (DECAWM) is supported. Returns whether the mode was known.
    pub fn set_dec_mode(&mut self, mode: u16, enable: bool) -> bool {
        match mode {
            7 => {
                self.autowrap = enable;
                true
            },
            _ => false,
        }
    }
}
