//! Scenario tests for the hardcopy translator
//!
//! Each test feeds a host byte stream through a fresh translator and checks
//! the bytes sent to the printer and the resulting carriage column.

use hardcopy_term::app::Config;
use hardcopy_term::translator::{Modes, ResetEvent, Translator, MAX_COLUMNS};

fn run(input: &[u8]) -> (Translator, Vec<u8>) {
    let mut translator = Translator::new();
    let output = translator.translate(input).output;
    (translator, output)
}

fn assert_column(input: &[u8], expected: usize) {
    let (translator, _) = run(input);
    assert_eq!(
        translator.column(),
        expected,
        "column after {:?}",
        String::from_utf8_lossy(input)
    );
}

fn digits(count: usize) -> Vec<u8> {
    (0..count).map(|i| b'0' + (i % 10) as u8).collect()
}

#[test]
fn test_empty_input() {
    assert_column(b"", 0);
}

#[test]
fn test_plain_text_columns() {
    assert_column(b"abc", 3);
    assert_column(b"abcd", 4);
    assert_column(&digits(MAX_COLUMNS), MAX_COLUMNS);
}

#[test]
fn test_long_line_clamps_without_wrap() {
    let (translator, output) = run(&digits(MAX_COLUMNS + 3));
    assert_eq!(translator.column(), MAX_COLUMNS);
    assert!(!output.contains(&b'\n'));
    assert!(!output.contains(&b'\r'));
}

#[test]
fn test_long_line_wraps_once() {
    let mut input = b"\x1b[?7h".to_vec();
    input.extend(digits(MAX_COLUMNS + 3));
    let (translator, output) = run(&input);

    assert_eq!(translator.column(), 3);
    assert_eq!(output.iter().filter(|&&b| b == b'\n').count(), 1);

    let mut expected = digits(MAX_COLUMNS);
    expected.extend_from_slice(b"\r\n");
    expected.extend_from_slice(&digits(MAX_COLUMNS + 3)[MAX_COLUMNS..]);
    assert_eq!(output, expected);
}

#[test]
fn test_explicit_crlf_matches_wrap() {
    let explicit = b"123456789 123456789 123456789 123456789 123456789 123456789 123456789 12\r\n3456789 123456789 123456789 123456789";
    assert_column(explicit, 37);

    let wrapped = b"123456789 \x1b[?7h123456789 123456789 123456789 123456789 123456789 123456789 123456789 123456789 123456789 123456789";
    assert_column(wrapped, 37);
}

#[test]
fn test_wrap_disabled_again() {
    let input = b"123456789 \x1b[?7h123456789 123456789 123456789 123456789 123456789 123456789 123456789 \x1b[?7l123456789 123456789 123456789 123456789 123456789 123456789 123456789";
    assert_column(input, MAX_COLUMNS);
}

#[test]
fn test_wrap_over_several_lines() {
    let mut input = b"123456789 \x1b[?7h".to_vec();
    for _ in 0..14 {
        input.extend_from_slice(b"123456789 ");
    }
    input.pop();
    assert_column(&input, 5);
}

#[test]
fn test_line_feed_and_carriage_return() {
    assert_column(b"abc\nd", 4);
    assert_column(b"abc\rd_", 2);
}

#[test]
fn test_save_restore() {
    assert_column(b"abc\x1b7defghijkl", 12);
    assert_column(b"abc\x1b7def\x1b8", 3);
    assert_column(b"abc\x1b7def\x1b8g", 4);
}

#[test]
fn test_restore_moves_forward_too() {
    let (translator, output) = run(b"abcdefgh\x1b7\r\x1b8");
    assert_eq!(translator.column(), 8);
    assert!(output.ends_with(b"\r        "));
}

#[test]
fn test_simple_motion() {
    assert_column(b"abc\x1bAdefghijkl", 12);
    assert_column(b"abc\x1bBdefghijkl", 12);
    assert_column(b"abc\x1bCdefghijkl", 13);
    assert_column(b"abc\x1bDdefghijkl", 11);
    assert_column(b"\x1bDabcdefghijkl", 12);
    assert_column(b"abc\x1bMdefghijkl", 12);
}

#[test]
fn test_csi_motion() {
    assert_column(b"abc\x1b[Cdefghijkl", 13);
    assert_column(b"abc\x1b[Ddefghijkl", 11);
    assert_column(b"abc\x1b[2Cdefghijkl", 14);
    assert_column(b"abc\x1b[2Ddefghijkl", 10);
    assert_column(b"abc\x1b[5Ddefghijkl", 9);
    assert_column(b"abc\x1b[8Gdefghijkl", 17);
}

#[test]
fn test_backward_clamps_at_margin() {
    let (translator, output) = run(b"abc\x1b[5D");
    assert_eq!(translator.column(), 0);
    assert_eq!(output, b"abc\r");
}

#[test]
fn test_absolute_column_from_either_side() {
    let (left, left_output) = run(b"ab\x1b[8G");
    assert_eq!(left.column(), 8);
    assert_eq!(left_output, b"ab      ");

    let (right, right_output) = run(b"abcdefghijkl\x1b[8G");
    assert_eq!(right.column(), 8);
    assert_eq!(right_output, b"abcdefghijkl\r        ");
}

#[test]
fn test_forward_clamps_at_right_margin() {
    let (translator, _) = run(b"abc\x1b[200C");
    assert_eq!(translator.column(), MAX_COLUMNS);
}

#[test]
fn test_garbage_before_terminator_ignored() {
    assert_column(b"abc\x1b[2;9Cx", 6);
    assert_column(b"abc\x1b[x", 3);
}

#[test]
fn test_escape_bytes_never_reach_printer() {
    let (_, output) = run(b"a\x1b[?7h\x1b_AB\x9c\x1b[1;31mb\x1b(Bc");
    assert!(!output.contains(&0x1B));
    assert_eq!(output, b"abc");
}

#[test]
fn test_oversized_sequences_print_nothing() {
    let mut csi = b"ab\x1b[".to_vec();
    csi.extend(digits(48));
    csi.extend_from_slice(b"Ccd");
    let (translator, output) = run(&csi);
    assert_eq!(output, b"abcd");
    assert_eq!(translator.column(), 4);

    let mut apc = b"\x1b_Gf=100,a=T;".to_vec();
    apc.extend(std::iter::repeat(b'Q').take(64));
    apc.extend_from_slice(b"\x9cok");
    let (translator, output) = run(&apc);
    assert_eq!(output, b"ok");
    assert_eq!(translator.modes(), Modes::default());
}

#[test]
fn test_utf8_encoded_string_terminator() {
    // U+009C arrives from UTF-8 hosts as C2 9C
    let mut translator = Translator::new();
    let output = translator.translate("\x1b_A\u{9c}x\n".as_bytes()).output;

    assert!(translator.modes().newline_crlf);
    assert_eq!(output, b"x\r\n");
}

#[test]
fn test_status_replies_go_to_host() {
    let mut translator = Translator::new();
    let translated = translator.translate(b"hello\x1b[?6n\x1b[?15n");

    assert_eq!(translated.output, b"hello");
    assert_eq!(translated.response, b"\x1b[1;6;1R\x1b[?13n");
}

#[test]
fn test_reset_events_taken_once() {
    let mut translator = Translator::new();
    translator.translate(b"\x1b[?p");

    assert_eq!(translator.take_event(), Some(ResetEvent::Soft));
    assert_eq!(translator.take_event(), None);

    translator.translate(b"\x1bc");
    assert!(translator.take_hard_reset());
    assert!(!translator.take_hard_reset());
}

#[test]
fn test_configured_session() {
    let config = Config {
        modes: Modes {
            autowrap: true,
            newline_crlf: true,
            nul_delays: true,
        },
        nul_delay_count: 1,
    };
    let mut translator = config.translator();
    let output = translator.translate(b"one\ntwo\x1b_b\x9c\nthree").output;

    assert_eq!(output, b"one\r\n\0two\r\nthree");
    assert_eq!(translator.column(), 5);
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn column_stays_on_the_line(input in proptest::collection::vec(any::<u8>(), 0..512)) {
            let mut translator = Translator::new();
            for byte in input {
                translator.process(byte);
                prop_assert!(translator.column() <= MAX_COLUMNS);
            }
        }

        #[test]
        fn printable_text_passes_through(text in "[ -~]{0,72}") {
            let (translator, output) = run(text.as_bytes());
            prop_assert_eq!(&output, text.as_bytes());
            prop_assert_eq!(translator.column(), text.len());
        }

        #[test]
        fn absolute_move_lands_on_target(prefix in "[a-z]{0,72}", target in 0usize..=MAX_COLUMNS) {
            let mut input = prefix.clone().into_bytes();
            input.extend_from_slice(format!("\x1b[{}G", target).as_bytes());
            let (translator, output) = run(&input);

            prop_assert_eq!(translator.column(), target);
            let motion = &output[prefix.len()..];
            prop_assert!(motion.iter().all(|&b| b == b' ' || b == b'\r'));
        }

        #[test]
        fn tracked_column_matches_output(input in proptest::collection::vec(any::<u8>(), 0..512)) {
            let mut translator = Translator::new();
            let output = translator.translate(&input).output;

            let mut column = 0usize;
            for byte in output {
                column = match byte {
                    b'\r' => 0,
                    0x20..=0x7E => (column + 1).min(MAX_COLUMNS),
                    _ => column,
                };
            }
            prop_assert_eq!(translator.column(), column);
        }
    }
}
