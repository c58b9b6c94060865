//! Terminal-facing error reporting and exit-code mapping.

use std::io::{self, Write};

use crate::BrainfuckError;

/// Process exit code for an error kind. Usage errors use 2, so the kinds
/// start at 3; each kind maps to a distinct code.
pub fn exit_code(err: &BrainfuckError) -> i32 {
    match err {
        BrainfuckError::EmptyCode => 3,
        BrainfuckError::NoValidTokens => 4,
        BrainfuckError::UnmatchedLoopStart { .. } => 5,
        BrainfuckError::UnmatchedLoopEnd { .. } => 6,
        BrainfuckError::NegativePointer { .. } => 7,
        BrainfuckError::Input { .. } => 8,
        BrainfuckError::Output { .. } => 9,
    }
}

/// Pretty-print a [`BrainfuckError`] to stderr.
/// If `program` is `Some("bft")`, messages are prefixed with "bft: ..." for
/// CLI run mode. Bracket errors get a caret context window into the source.
pub fn print_error(program: Option<&str>, code: &str, err: &BrainfuckError) {
    let prefix_program = |msg: &str| {
        if let Some(p) = program {
            format!("{p}: {msg}")
        } else {
            msg.to_string()
        }
    };

    match err {
        BrainfuckError::UnmatchedLoopStart { ip } => {
            let msg = prefix_program("Parse error: unmatched '['");
            print_error_with_context(&msg, code, *ip);
        }
        BrainfuckError::UnmatchedLoopEnd { ip } => {
            let msg = prefix_program("Parse error: unmatched ']'");
            print_error_with_context(&msg, code, *ip);
        }
        BrainfuckError::EmptyCode | BrainfuckError::NoValidTokens => {
            eprintln!("{}", prefix_program(&format!("Parse error: {err}")));
        }
        BrainfuckError::NegativePointer { .. } => {
            eprintln!("{}", prefix_program(&format!("Runtime error: {err}")));
        }
        BrainfuckError::Input { .. } | BrainfuckError::Output { .. } => {
            eprintln!("{}", prefix_program(&format!("I/O error: {err}")));
        }
    }
    let _ = io::stderr().flush();
}

/// Print a concise error with instruction index and a caret context window,
/// working with UTF-8 by slicing using char indices.
pub fn print_error_with_context(prefix: &str, code: &str, pos: usize) {
    eprintln!("{prefix} at instruction {pos}");

    // Show a short window around the position for context
    const WINDOW_CHARS: usize = 32;

    let total_chars = code.chars().count();
    let start_char = pos.saturating_sub(WINDOW_CHARS);
    let end_char = (pos + WINDOW_CHARS + 1).min(total_chars);

    let start_byte = char_to_byte_index(code, start_char);
    let end_byte = char_to_byte_index(code, end_char);
    let slice = &code[start_byte..end_byte];

    eprintln!("  {}", slice);

    // Caret under the exact position
    let caret_offset_chars = pos.saturating_sub(start_char);
    let mut underline = String::new();
    for _ in 0..caret_offset_chars {
        underline.push(' ');
    }
    underline.push('^');
    eprintln!("  {}", underline);
    let _ = io::stderr().flush();
}

/// Convert a char index into a byte index in the given UTF-8 string.
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    if char_idx == 0 {
        return 0;
    }

    let mut count = 0usize;
    let mut byte_idx = 0usize;

    for ch in s.chars() {
        if count == char_idx {
            break;
        }
        byte_idx += ch.len_utf8();
        count += 1;
    }

    byte_idx
}
