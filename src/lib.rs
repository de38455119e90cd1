//! Hardcopy Terminal Library
//!
//! Translates the cursor-control escape sequences emitted by full-screen
//! host software into a byte stream that is safe to send to a hardcopy
//! teleprinter. This crate provides:
//!
//! - `translator`: the escape sequence state machine, column tracking and
//!   motion synthesis
//! - `app`: configuration for the filter binary
//!
//! ```
//! use hardcopy_term::translator::Translator;
//!
//! let mut translator = Translator::new();
//! let out = translator.translate(b"abc\x1b7def\x1b8");
//! assert_eq!(out.output, b"abcdef\r   ");
//! assert_eq!(translator.column(), 3);
//! ```

pub mod app;
pub mod translator;
