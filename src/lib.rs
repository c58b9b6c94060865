//! A Brainfuck interpreter built on an unbounded tape.
//!
//! This crate provides a Brainfuck interpreter whose memory tape starts as a
//! single zeroed cell and grows on demand, plus a generator that produces
//! Brainfuck code printing arbitrary bytes.
//!
//! Features and behaviors:
//! - Unbounded tape: moving right grows the tape geometrically; new cells are 0.
//! - Strict left bound: moving the data pointer below cell 0 is an error.
//! - Runs of repeated `>` `<` `+` `-` are applied as one batched step.
//! - Input `,` reads a single byte from the caller's input; on end of stream
//!   the current cell is set to 0.
//! - Output `.` writes the byte at the current cell to the caller's output.
//! - Properly handles nested loops `[]` via a precomputed jump table;
//!   unmatched brackets are reported as errors before execution begins.
//! - Any non-Brainfuck character is a comment and is skipped.
//!
//! Quick start:
//!
//! ```
//! use bft::execute;
//!
//! // Count down from 5, printing each value as a raw byte.
//! let mut output = Vec::new();
//! execute("+++++[.-]", &b""[..], &mut output).expect("program should run");
//! assert_eq!(output, [5, 4, 3, 2, 1]);
//! ```

use std::io;

pub mod cli_util;
pub mod generator;
pub mod interpreter;
pub mod program;

pub use generator::{Generator, GeneratorOptions};
pub use interpreter::{Interpreter, execute};
pub use program::{Program, Token};

/// Errors that can occur while parsing or interpreting Brainfuck code.
///
/// Every variant is fatal to the current execution; nothing is retried and
/// no tape state is rolled back.
#[derive(Debug, thiserror::Error)]
pub enum BrainfuckError {
    /// The source text had zero characters.
    #[error("empty program: the source text has no characters")]
    EmptyCode,

    /// The source text had characters, but none were Brainfuck operators.
    #[error("no valid tokens: the source text contains no Brainfuck operators")]
    NoValidTokens,

    /// A `[` had no matching `]` by the end of the source.
    #[error("unmatched '[' at instruction {ip}")]
    UnmatchedLoopStart { ip: usize },

    /// A `]` was encountered with no loop open.
    #[error("unmatched ']' at instruction {ip}")]
    UnmatchedLoopEnd { ip: usize },

    /// A run of `<` would have taken the data pointer below cell 0.
    #[error("data pointer would move below cell 0 (ptr={ptr}, run of {count} '<')")]
    NegativePointer { ptr: usize, count: usize },

    /// The input source failed with something other than end of stream.
    #[error("input error: {source}")]
    Input {
        #[source]
        source: io::Error,
    },

    /// The output sink failed.
    #[error("output error: {source}")]
    Output {
        #[source]
        source: io::Error,
    },
}
