//! Replies to host status queries
//!
//! Only `ESC [ ? <N> n` produces a reply. The payloads are short stand-ins
//! for VT100 conventions, not a full device-status implementation:
//!
//! | Query          | Reply                          |
//! |----------------|--------------------------------|
//! | `ESC[?n`, `ESC[?0n` | `ESC[?1;0c` (VT101, no options) |
//! | `ESC[?5n`      | `ESC[0n` (no malfunction)      |
//! | `ESC[?6n`      | `ESC[1;<col>;1R` (1-based col) |
//! | `ESC[?15n`     | `ESC[?13n` (no printer)        |
//! | `ESC[?75n`     | `ESC[?70n` (data integrity ok) |

use super::chunk::{CapacityError, ResponseChunk};

/// Terminal type: VT101 with no options
pub const IDENTIFICATION: &[u8] = b"\x1b[?1;0c";
/// Device status: no malfunction
pub const STATUS_OK: &[u8] = b"\x1b[0n";
/// Printer status: no printer attached
pub const NO_PRINTER: &[u8] = b"\x1b[?13n";
/// Data integrity: ready, no errors since last report
pub const DATA_INTEGRITY_OK: &[u8] = b"\x1b[?70n";

/// A recognized status query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusQuery {
    Identify,
    DeviceStatus,
    CursorPosition,
    PrinterStatus,
    DataIntegrity,
}

impl StatusQuery {
    /// Map a query parameter to a query, `None` if unsupported
    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            0 => Some(Self::Identify),
            5 => Some(Self::DeviceStatus),
            6 => Some(Self::CursorPosition),
            15 => Some(Self::PrinterStatus),
            75 => Some(Self::DataIntegrity),
            _ => None,
        }
    }

    /// Write the reply for this query into `out`
    ///
    /// `column` is the zero-based tracked column; the printer only ever has
    /// one line and one page, so both are reported as 1.
    pub fn write_reply(self, column: usize, out: &mut ResponseChunk) -> Result<(), CapacityError> {
        match self {
            Self::Identify => out.extend_from_slice(IDENTIFICATION),
            Self::DeviceStatus => out.extend_from_slice(STATUS_OK),
            Self::CursorPosition => {
                let report = format!("\x1b[1;{};1R", column + 1);
                out.extend_from_slice(report.as_bytes())
            },
            Self::PrinterStatus => out.extend_from_slice(NO_PRINTER),
            Self::DataIntegrity => out.extend_from_slice(DATA_INTEGRITY_OK),
        }
    }
}
