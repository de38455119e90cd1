//! Escape sequence accumulation
//!
//! Collects the bytes following an ESC until the sequence is terminated,
//! classifying it from its first one or two bytes:
//!
//! - `ESC x` where `x` is a letter or digit: simple
//! - `ESC [ ... x`: CSI
//! - `ESC [ ? ... x`: private CSI
//! - `ESC _ ... ST`: APC, terminated only by the single byte 0x9C
//!
//! Anything else is collected until a letter and then ignored.

use super::chunk::ByteChunk;

/// Maximum number of bytes held between the ESC and the final byte
pub const MAX_ESC_LEN: usize = 32;

/// String Terminator (8-bit C1 form)
pub const ST: u8 = 0x9C;

/// Byte skipped anywhere inside an APC payload
const APC_IGNORED: u8 = 0xC2;

/// Kind of escape sequence, fixed once its discriminating bytes are seen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceKind {
    /// ESC followed by a single letter or digit
    Simple,
    /// ESC [
    Csi,
    /// ESC [ ?
    CsiPrivate,
    /// ESC _
    Apc,
    /// Any other introducer; absorbed and ignored
    Other,
}

/// Result of feeding one byte into the accumulator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// More bytes are needed
    Pending,
    /// The sequence is complete and can be dispatched
    Complete,
    /// The byte didn't fit; the rest of the sequence up to its terminator
    /// is discarded and it is never dispatched
    Overflow,
}

/// In-progress escape sequence
#[derive(Debug, Clone, Default)]
pub struct EscapeAccumulator {
    /// Bytes after ESC, excluding the final byte
    bytes: ByteChunk<MAX_ESC_LEN>,
    kind: Option<SequenceKind>,
    final_byte: Option<u8>,
    /// Set once a byte didn't fit
    overflowed: bool,
}

impl EscapeAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget any collected bytes, ready for a new ESC
    pub fn clear(&mut self) {
        self.bytes.clear();
        self.kind = None;
        self.final_byte = None;
        self.overflowed = false;
    }

    /// Whether bytes were discarded because the sequence was too long
    pub fn is_overflowed(&self) -> bool {
        self.overflowed
    }

    /// Classification so far, `None` until the first byte after ESC
    pub fn kind(&self) -> Option<SequenceKind> {
        self.kind
    }

    /// The byte that terminated the sequence
    pub fn final_byte(&self) -> Option<u8> {
        self.final_byte
    }

    /// Raw bytes collected after ESC, excluding the final byte
    pub fn bytes(&self) -> &[u8] {
        self.bytes.as_slice()
    }

    /// Feed the next byte of the sequence
    pub fn push(&mut self, byte: u8) -> Advance {
        if self.kind == Some(SequenceKind::Apc) {
            return match byte {
                ST => {
                    self.final_byte = Some(byte);
                    Advance::Complete
                },
                APC_IGNORED => Advance::Pending,
                _ => self.store(byte),
            };
        }

        let position = self.bytes.len();
        if is_terminator(byte, position == 0) {
            if position == 0 {
                self.kind = Some(SequenceKind::Simple);
            }
            self.final_byte = Some(byte);
            return Advance::Complete;
        }

        match (position, self.kind, byte) {
            (0, _, b'[') => self.kind = Some(SequenceKind::Csi),
            (0, _, b'_') => self.kind = Some(SequenceKind::Apc),
            (0, _, _) => self.kind = Some(SequenceKind::Other),
            (1, Some(SequenceKind::Csi), b'?') => self.kind = Some(SequenceKind::CsiPrivate),
            _ => {},
        }

        self.store(byte)
    }

    fn store(&mut self, byte: u8) -> Advance {
        if self.overflowed {
            return Advance::Pending;
        }
        match self.bytes.push(byte) {
            Ok(()) => Advance::Pending,
            Err(_) => {
                self.overflowed = true;
                Advance::Overflow
            },
        }
    }

    /// Bytes between the introducer and the final byte
    ///
    /// For CSI this follows `[`, for private CSI it follows `[?`, and for APC
    /// it is the payload after `_`.
    pub fn body(&self) -> &[u8] {
        let skip = match self.kind {
            Some(SequenceKind::Csi | SequenceKind::Apc) => 1,
            Some(SequenceKind::CsiPrivate) => 2,
            _ => 0,
        };
        self.bytes().get(skip..).unwrap_or(&[])
    }

    /// Numeric parameter immediately after the introducer, or `default`
    pub fn param(&self, default: u16) -> u16 {
        parse_param(self.body(), default)
    }
}

/// Whether `byte` ends a simple or CSI sequence
///
/// Letters always terminate. Digits only terminate a simple sequence, i.e.
/// when they are the first byte after ESC (`ESC 7`, `ESC 8`).
pub fn is_terminator(byte: u8, first: bool) -> bool {
    byte.is_ascii_alphabetic() || (first && byte.is_ascii_digit())
}

/// Parse the leading run of decimal digits, stopping at the first non-digit
pub fn parse_param(bytes: &[u8], default: u16) -> u16 {
    let digits = bytes.iter().take_while(|b| b.is_ascii_digit());
    let mut seen = false;
    let value = digits.fold(0u16, |acc, &b| {
        seen = true;
        acc.saturating_mul(10).saturating_add(u16::from(b - b'0'))
    });
    if seen {
        value
    } else {
        default
    }
}
