//! Hardcopy escape sequence translator
//!
//! A byte-at-a-time transducer from VT100/ANSI cursor-control output to a
//! stream a teleprinter can print. The printer has no addressable cursor and
//! can't erase, so the translator tracks the carriage column itself and
//! approximates horizontal motion with spaces and carriage returns.

mod chunk;
mod event;
mod modes;
mod motion;
mod response;
mod sequence;
mod state;

pub use chunk::{
    ByteChunk, CapacityError, OutputChunk, ResponseChunk, OUTPUT_CAPACITY, RESPONSE_CAPACITY,
};
pub use event::{ResetEvent, ResetFlags};
pub use modes::Modes;
pub use motion::MAX_COLUMNS;
pub use response::StatusQuery;
pub use sequence::{EscapeAccumulator, SequenceKind, MAX_ESC_LEN, ST};
pub use state::{Translated, Translation, Translator, DEFAULT_NUL_DELAY, MAX_NUL_DELAY};
