//! The execution engine.
//!
//! Walks a parsed [`Program`] against a growable tape and a data pointer.
//! Runs of repeated `>` `<` `+` `-` are applied as one batched step using the
//! program's run-length lookup, and loop brackets jump through the
//! precomputed jump table.

use std::io::{Read, Write};

use crate::BrainfuckError;
use crate::program::{Program, Token};

/// Parse and run `source`, wiring `,` to `input` and `.` to `output`.
///
/// A zero-length source fails with [`BrainfuckError::EmptyCode`] before any
/// tokenization happens; a non-empty source with no operator characters fails
/// with [`BrainfuckError::NoValidTokens`].
///
/// ```
/// use bft::execute;
///
/// let mut output = Vec::new();
/// execute(",.,.", &b"Z"[..], &mut output).unwrap();
/// // The second ',' hits end of input and zeroes the cell.
/// assert_eq!(output, [b'Z', 0]);
/// ```
pub fn execute<R: Read, W: Write>(
    source: &str,
    input: R,
    output: W,
) -> Result<(), BrainfuckError> {
    if source.is_empty() {
        return Err(BrainfuckError::EmptyCode);
    }
    let program = Program::parse(source)?;
    Interpreter::new(input, output).run(&program)
}

/// A Brainfuck interpreter bound to an input source and an output sink.
///
/// The tape and data pointer live inside [`Interpreter::run`]; every run
/// starts from a fresh single-cell tape and nothing survives the call.
pub struct Interpreter<R, W> {
    input: R,
    output: W,
}

impl<R: Read, W: Write> Interpreter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Execute `program` until the last token is processed.
    pub fn run(&mut self, program: &Program) -> Result<(), BrainfuckError> {
        let mut tape: Vec<u8> = vec![0];
        let mut pointer: usize = 0;
        let mut ip = 0;

        while ip < program.len() {
            match program.token(ip) {
                Token::MoveRight => {
                    let count = program.run_length(ip);
                    let target = pointer + count;
                    if target >= tape.len() {
                        // Double or reach the target, whichever is larger.
                        let grown = (target + 1).max(tape.len() * 2);
                        tape.resize(grown, 0);
                    }
                    pointer = target;
                    ip += count - 1;
                }
                Token::MoveLeft => {
                    let count = program.run_length(ip);
                    if count > pointer {
                        // Pointer stays where it was; the whole run is refused.
                        return Err(BrainfuckError::NegativePointer { ptr: pointer, count });
                    }
                    pointer -= count;
                    ip += count - 1;
                }
                Token::Increment => {
                    let count = program.run_length(ip);
                    // A full wrap of 256 is a no-op, so only the remainder matters.
                    tape[pointer] = tape[pointer].wrapping_add((count % 256) as u8);
                    ip += count - 1;
                }
                Token::Decrement => {
                    let count = program.run_length(ip);
                    tape[pointer] = tape[pointer].wrapping_sub((count % 256) as u8);
                    ip += count - 1;
                }
                Token::LoopOpen => {
                    if tape[pointer] == 0 {
                        ip = program.jump_target(ip).expect("bracket paired during parsing");
                    }
                }
                Token::LoopClose => {
                    if tape[pointer] != 0 {
                        ip = program.jump_target(ip).expect("bracket paired during parsing");
                    }
                }
                Token::Read => {
                    // Read exactly one byte; end of stream zeroes the cell.
                    let mut buf = [0u8; 1];
                    match self.input.read(&mut buf) {
                        Ok(0) => tape[pointer] = 0,
                        Ok(_) => tape[pointer] = buf[0],
                        Err(e) => return Err(BrainfuckError::Input { source: e }),
                    }
                }
                Token::Write => {
                    if let Err(e) = self.output.write_all(&[tape[pointer]]) {
                        return Err(BrainfuckError::Output { source: e });
                    }
                }
            }
            // Move to the next token
            ip += 1;
        }

        Ok(())
    }
}
