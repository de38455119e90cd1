//! Column tracking and motion synthesis
//!
//! The printer can't report or seek its position. Moving right means
//! printing spaces; moving left means a carriage return followed by spaces,
//! since backspacing can't remove ink that is already on the paper.

use super::chunk::{CapacityError, OutputChunk};

/// Physical line width of the printer
pub const MAX_COLUMNS: usize = 72;

pub const CR: u8 = b'\r';
pub const LF: u8 = b'\n';

/// Whether `byte` advances the carriage when printed
#[inline]
pub fn is_printable(byte: u8) -> bool {
    (0x20..=0x7E).contains(&byte)
}

/// Column after the printer receives `byte`
pub fn column_after(column: usize, byte: u8) -> usize {
    if byte == CR {
        0
    } else if is_printable(byte) {
        (column + 1).min(MAX_COLUMNS)
    } else {
        column
    }
}

/// Column after the printer receives every byte of `bytes`
pub fn advance_column(column: usize, bytes: &[u8]) -> usize {
    bytes.iter().fold(column, |col, &byte| column_after(col, byte))
}

/// Write the bytes that move the carriage from `column` to `target`
///
/// `target` is clamped to the line. Nothing is written when already there.
pub fn move_to_column(column: usize, target: usize, out: &mut OutputChunk) -> Result<(), CapacityError> {
    let target = target.min(MAX_COLUMNS);

    if target > column {
        out.push_repeated(b' ', target - column)
    } else if target < column {
        out.push(CR)?;
        out.push_repeated(b' ', target)
    } else {
        Ok(())
    }
}
