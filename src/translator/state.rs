//! Translator State Machine
//!
//! Consumes host bytes one at a time. Outside an escape sequence each byte
//! passes through to the printer, with line breaks inserted for auto-wrap
//! and filler added for the mode flags. An ESC starts collecting a sequence,
//! which is swallowed and, once terminated, dispatched:
//!
//! - Simple: `ESC B`, `ESC C`, `ESC D`, `ESC 7`, `ESC 8`, `ESC c`
//! - CSI: `ESC [ N C`, `ESC [ N D`, `ESC [ N G`, `ESC [ ! p`
//!   (`B`, `I` and `Z` are accepted without motion)
//! - Private CSI: `ESC [ ? 7 h`, `ESC [ ? 7 l`, `ESC [ ? N n`, `ESC [ ? p`
//! - APC: `ESC _ <flags> ST`
//!
//! Motion is approximated with spaces and carriage returns, and the column
//! is tracked from the bytes actually sent to the printer.

use super::chunk::{OutputChunk, ResponseChunk};
use super::event::{ResetEvent, ResetFlags};
use super::modes::Modes;
use super::motion::{self, CR, LF, MAX_COLUMNS};
use super::response::StatusQuery;
use super::sequence::{Advance, EscapeAccumulator, SequenceKind};

const ESC: u8 = 0x1B;
const NUL: u8 = 0x00;

/// Upper bound on NUL filler bytes after a line feed
pub const MAX_NUL_DELAY: usize = 32;

/// NUL filler bytes after a line feed unless configured otherwise
pub const DEFAULT_NUL_DELAY: usize = 4;

/// Translator state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    CollectingSequence,
}

/// Bytes produced by a single input byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Translation<'a> {
    output: &'a [u8],
    response: &'a [u8],
}

impl<'a> Translation<'a> {
    /// Bytes to write to the printer, unmodified
    pub fn output(&self) -> &'a [u8] {
        self.output
    }

    /// Bytes to return to the host
    pub fn response(&self) -> &'a [u8] {
        self.response
    }
}

/// Everything produced by a slice of input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Translated {
    pub output: Vec<u8>,
    pub response: Vec<u8>,
}

/// Escape sequence translator for a hardcopy printer
#[derive(Debug, Clone)]
pub struct Translator {
    state: State,
    accumulator: EscapeAccumulator,
    /// Current carriage position, 0..=MAX_COLUMNS
    column: usize,
    /// Column recorded by ESC 7
    saved_column: Option<usize>,
    modes: Modes,
    /// Modes restored by a hard reset
    default_modes: Modes,
    nul_delay: usize,
    resets: ResetFlags,
    output: OutputChunk,
    response: ResponseChunk,
}

impl Default for Translator {
    fn default() -> Self {
        Self::new()
    }
}

impl Translator {
    /// Create a translator at column 0 with all modes off
    pub fn new() -> Self {
        Self::with_defaults(Modes::default(), DEFAULT_NUL_DELAY)
    }

    /// Create a translator starting in `modes`
    ///
    /// A hard reset returns to these modes. `nul_delay` is the number of NUL
    /// bytes sent after each line feed while NUL delays are enabled, capped at
    /// [`MAX_NUL_DELAY`].
    pub fn with_defaults(modes: Modes, nul_delay: usize) -> Self {
        Self {
            state: State::Idle,
            accumulator: EscapeAccumulator::new(),
            column: 0,
            saved_column: None,
            modes,
            default_modes: modes,
            nul_delay: nul_delay.min(MAX_NUL_DELAY),
            resets: ResetFlags::default(),
            output: OutputChunk::new(),
            response: ResponseChunk::new(),
        }
    }

    /// Current carriage column
    pub fn column(&self) -> usize {
        self.column
    }

    /// Column saved by the last `ESC 7`, if any
    pub fn saved_column(&self) -> Option<usize> {
        self.saved_column
    }

    pub fn modes(&self) -> Modes {
        self.modes
    }

    pub fn nul_delay(&self) -> usize {
        self.nul_delay
    }

    /// Whether an escape sequence is partially collected
    pub fn is_collecting(&self) -> bool {
        self.state == State::CollectingSequence
    }

    /// Check and clear the soft reset flag
    pub fn take_soft_reset(&mut self) -> bool {
        self.resets.take_soft()
    }

    /// Check and clear the hard reset flag
    pub fn take_hard_reset(&mut self) -> bool {
        self.resets.take_hard()
    }

    /// Take the next pending reset event
    pub fn take_event(&mut self) -> Option<ResetEvent> {
        self.resets.take()
    }

    /// Process one byte from the host
    ///
    /// The returned chunks borrow the translator and are overwritten by the
    /// next call, so they must be consumed first.
    pub fn process(&mut self, byte: u8) -> Translation<'_> {
        self.output.clear();
        self.response.clear();

        match self.state {
            State::Idle => self.process_idle(byte),
            State::CollectingSequence => self.process_sequence_byte(byte),
        }

        self.column = motion::advance_column(self.column, self.output.as_slice());

        Translation {
            output: self.output.as_slice(),
            response: self.response.as_slice(),
        }
    }

    /// Process a slice of bytes, collecting all output and responses
    pub fn translate(&mut self, data: &[u8]) -> Translated {
        let mut translated = Translated::default();
        for &byte in data {
            let step = self.process(byte);
            translated.output.extend_from_slice(step.output());
            translated.response.extend_from_slice(step.response());
        }
        translated
    }

    /// Process a byte outside any escape sequence
    fn process_idle(&mut self, byte: u8) {
        if byte == ESC {
            self.accumulator.clear();
            self.state = State::CollectingSequence;
            return;
        }

        if self.modes.autowrap && self.column == MAX_COLUMNS && motion::is_printable(byte) {
            self.emit(&[CR]);
            self.line_feed();
        }

        if byte == LF {
            if self.modes.newline_crlf {
                self.emit(&[CR]);
            }
            self.line_feed();
        } else {
            self.emit(&[byte]);
        }
    }

    /// Process a byte while collecting an escape sequence
    fn process_sequence_byte(&mut self, byte: u8) {
        match self.accumulator.push(byte) {
            Advance::Pending => {},
            Advance::Complete => {
                self.state = State::Idle;
                if self.accumulator.is_overflowed() {
                    tracing::debug!("Dropped oversized escape sequence");
                } else {
                    self.dispatch();
                }
            },
            Advance::Overflow => {
                tracing::warn!(
                    "Escape sequence too long, discarding up to its terminator: {}",
                    self.accumulator.bytes().escape_ascii()
                );
            },
        }
    }

    /// Dispatch a completed sequence
    fn dispatch(&mut self) {
        let (Some(kind), Some(final_byte)) =
            (self.accumulator.kind(), self.accumulator.final_byte())
        else {
            return;
        };
        tracing::trace!(
            "Dispatch {:?}: {} {}",
            kind,
            self.accumulator.bytes().escape_ascii(),
            final_byte.escape_ascii()
        );

        match kind {
            SequenceKind::Simple => self.dispatch_simple(final_byte),
            SequenceKind::Csi => self.dispatch_csi(final_byte),
            SequenceKind::CsiPrivate => self.dispatch_csi_private(final_byte),
            SequenceKind::Apc => self.dispatch_apc(),
            SequenceKind::Other => {
                tracing::debug!(
                    "Ignored escape sequence: {} {}",
                    self.accumulator.bytes().escape_ascii(),
                    final_byte.escape_ascii()
                );
            },
        }
    }

    /// Dispatch ESC followed by a single letter or digit
    fn dispatch_simple(&mut self, cmd: u8) {
        match cmd {
            b'B' => {
                // CUD - the paper only moves up, so cursor down is a line feed
                self.line_feed();
            },
            b'C' => {
                // CUF
                self.move_to_column(self.column + 1);
            },
            b'D' => {
                // CUB
                self.move_to_column(self.column.saturating_sub(1));
            },
            b'7' => {
                // DECSC
                self.saved_column = Some(self.column);
            },
            b'8' => {
                // DECRC
                match self.saved_column {
                    Some(column) => self.move_to_column(column),
                    None => tracing::debug!("Restore without a saved column"),
                }
            },
            b'c' => {
                // RIS
                self.hard_reset();
            },
            _ => {
                tracing::debug!("Unsupported escape: ESC {}", cmd.escape_ascii());
            },
        }
    }

    /// Dispatch ESC [ ... cmd
    fn dispatch_csi(&mut self, cmd: u8) {
        match cmd {
            b'C' => {
                // CUF - Cursor Forward
                let n = usize::from(self.accumulator.param(1));
                self.move_to_column(self.column.saturating_add(n));
            },
            b'D' => {
                // CUB - Cursor Backward
                let n = usize::from(self.accumulator.param(1));
                self.move_to_column(self.column.saturating_sub(n));
            },
            b'G' => {
                // CHA - Cursor Horizontal Absolute, zero-based
                let n = usize::from(self.accumulator.param(0));
                self.move_to_column(n);
            },
            b'B' | b'I' | b'Z' => {
                // CUD, CHT, CBT: no motion on a single line
                tracing::debug!("Unimplemented CSI: {}", cmd.escape_ascii());
            },
            b'p' if self.accumulator.body().contains(&b'!') => {
                // DECSTR - Soft Terminal Reset
                self.soft_reset();
            },
            _ => {
                tracing::debug!(
                    "Unknown CSI sequence: {} {}",
                    self.accumulator.body().escape_ascii(),
                    cmd.escape_ascii()
                );
            },
        }
    }

    /// Dispatch ESC [ ? ... cmd
    fn dispatch_csi_private(&mut self, cmd: u8) {
        match cmd {
            b'h' | b'l' => {
                // DECSET / DECRST
                let mode = self.accumulator.param(0);
                if !self.modes.set_dec_mode(mode, cmd == b'h') {
                    tracing::debug!("Unhandled DEC mode: {} = {}", mode, cmd == b'h');
                }
            },
            b'n' => {
                // DSR - Device Status Report
                let code = self.accumulator.param(0);
                match StatusQuery::from_code(code) {
                    Some(query) => {
                        if let Err(e) = query.write_reply(self.column, &mut self.response) {
                            tracing::warn!("Response truncated: {}", e);
                        }
                        tracing::debug!("DSR {}: responding to {:?}", code, query);
                    },
                    None => tracing::debug!("DSR request with unknown code: {}", code),
                }
            },
            b'p' => {
                // DECSTR - Soft Terminal Reset
                self.soft_reset();
            },
            _ => {
                tracing::debug!(
                    "Unknown private CSI: ?{} {}",
                    self.accumulator.body().escape_ascii(),
                    cmd.escape_ascii()
                );
            },
        }
    }

    /// Apply the flag bytes of an APC payload in order
    fn dispatch_apc(&mut self) {
        for &flag in self.accumulator.body() {
            if !self.modes.apply_apc_flag(flag) {
                tracing::debug!("Ignored APC flag: {}", flag.escape_ascii());
            }
        }
    }

    fn soft_reset(&mut self) {
        self.resets.raise(ResetEvent::Soft);
        self.modes.autowrap = false;
        self.emit(&[CR]);
        self.line_feed();
    }

    fn hard_reset(&mut self) {
        self.resets.raise(ResetEvent::Hard);
        self.modes = self.default_modes;
        self.saved_column = None;
        self.emit(&[CR]);
        self.line_feed();
    }

    fn move_to_column(&mut self, target: usize) {
        if let Err(e) = motion::move_to_column(self.column, target, &mut self.output) {
            tracing::warn!("Motion truncated: {}", e);
        }
    }

    /// Emit LF followed by any NUL filler
    fn line_feed(&mut self) {
        self.emit(&[LF]);
        if self.modes.nul_delays {
            if let Err(e) = self.output.push_repeated(NUL, self.nul_delay) {
                tracing::warn!("NUL delay truncated: {}", e);
            }
        }
    }

    fn emit(&mut self, bytes: &[u8]) {
        if let Err(e) = self.output.extend_from_slice(bytes) {
            tracing::warn!("Output truncated: {}", e);
        }
    }
}
