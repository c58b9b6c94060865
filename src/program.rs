//! Tokenizer and loop resolver.
//!
//! Source text is scanned once into a compact [`Token`] sequence; every
//! character outside the eight-operator alphabet is a comment and is dropped.
//! Loop brackets are paired up front into a bidirectional jump table so the
//! interpreter never rescans for a matching bracket at run time.

use crate::BrainfuckError;

/// One Brainfuck operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// `>` — move the data pointer one cell right.
    MoveRight,
    /// `<` — move the data pointer one cell left.
    MoveLeft,
    /// `+` — increment the current cell, wrapping at 255.
    Increment,
    /// `-` — decrement the current cell, wrapping at 0.
    Decrement,
    /// `[` — enter the loop body, or skip past the matching `]` if the
    /// current cell is 0.
    LoopOpen,
    /// `]` — jump back to the matching `[` if the current cell is non-zero.
    LoopClose,
    /// `,` — read one byte of input into the current cell.
    Read,
    /// `.` — write the current cell to the output.
    Write,
}

impl Token {
    fn from_char(c: char) -> Option<Token> {
        match c {
            '>' => Some(Token::MoveRight),
            '<' => Some(Token::MoveLeft),
            '+' => Some(Token::Increment),
            '-' => Some(Token::Decrement),
            '[' => Some(Token::LoopOpen),
            ']' => Some(Token::LoopClose),
            ',' => Some(Token::Read),
            '.' => Some(Token::Write),
            _ => None,
        }
    }

    /// The source character this token was scanned from.
    pub fn as_char(self) -> char {
        match self {
            Token::MoveRight => '>',
            Token::MoveLeft => '<',
            Token::Increment => '+',
            Token::Decrement => '-',
            Token::LoopOpen => '[',
            Token::LoopClose => ']',
            Token::Read => ',',
            Token::Write => '.',
        }
    }
}

/// A parsed Brainfuck program: the token sequence plus its jump table.
///
/// Immutable once built; the interpreter only reads from it.
pub struct Program {
    tokens: Vec<Token>,
    // jumps[i] holds the matching token index for '[' or ']' at token i.
    // For non-bracket tokens it is None.
    jumps: Vec<Option<usize>>,
}

impl Program {
    /// Scan `source` into tokens and pair up its loop brackets.
    ///
    /// Non-operator characters are skipped silently. Fails with
    /// [`BrainfuckError::NoValidTokens`] when nothing was recognized, and
    /// with [`BrainfuckError::UnmatchedLoopEnd`] /
    /// [`BrainfuckError::UnmatchedLoopStart`] for unbalanced brackets; the
    /// bracket errors carry the character index in the original source.
    pub fn parse(source: &str) -> Result<Program, BrainfuckError> {
        let mut tokens: Vec<Token> = Vec::new();
        // Source character index of each token, kept for error reporting.
        let mut origins: Vec<usize> = Vec::new();

        for (i, c) in source.chars().enumerate() {
            if let Some(token) = Token::from_char(c) {
                tokens.push(token);
                origins.push(i);
            }
        }

        if tokens.is_empty() {
            return Err(BrainfuckError::NoValidTokens);
        }

        let mut jumps: Vec<Option<usize>> = vec![None; tokens.len()];
        let mut stack: Vec<usize> = Vec::new();
        for (i, &token) in tokens.iter().enumerate() {
            match token {
                Token::LoopOpen => stack.push(i),
                Token::LoopClose => {
                    let Some(open) = stack.pop() else {
                        return Err(BrainfuckError::UnmatchedLoopEnd { ip: origins[i] });
                    };
                    jumps[open] = Some(i);
                    jumps[i] = Some(open);
                }
                _ => {}
            }
        }

        if let Some(&open) = stack.last() {
            return Err(BrainfuckError::UnmatchedLoopStart { ip: origins[open] });
        }

        Ok(Program { tokens, jumps })
    }

    /// Number of tokens in the program.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The token at `index`. Panics when out of range, like slice indexing.
    pub fn token(&self, index: usize) -> Token {
        self.tokens[index]
    }

    /// The matching bracket index for the loop token at `index`, or `None`
    /// for non-loop tokens.
    pub fn jump_target(&self, index: usize) -> Option<usize> {
        self.jumps[index]
    }

    /// How many tokens starting at `index` (inclusive) are identical to the
    /// token at `index`.
    ///
    /// The interpreter uses this to collapse a run of repeated `>` `<` `+`
    /// `-` into a single batched step. It is defined for loop tokens too,
    /// though there is nothing useful to batch for them.
    pub fn run_length(&self, index: usize) -> usize {
        let token = self.tokens[index];
        self.tokens[index..].iter().take_while(|&&t| t == token).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comments_are_dropped() {
        let program = Program::parse("+ add one\n> move right\n.").unwrap();
        let scanned: Vec<char> = (0..program.len()).map(|i| program.token(i).as_char()).collect();
        assert_eq!(scanned, ['+', '>', '.']);
    }

    #[test]
    fn source_without_operators_is_rejected() {
        let result = Program::parse("just a comment");
        assert!(matches!(result, Err(BrainfuckError::NoValidTokens)));
    }

    #[test]
    fn jump_table_round_trips() {
        let program = Program::parse("+[>[-]<]").unwrap();
        for i in 0..program.len() {
            match program.token(i) {
                Token::LoopOpen => {
                    let close = program.jump_target(i).unwrap();
                    assert!(close > i);
                    assert_eq!(program.jump_target(close), Some(i));
                    assert_eq!(program.token(close), Token::LoopClose);
                }
                Token::LoopClose => {
                    assert!(program.jump_target(i).unwrap() < i);
                }
                _ => assert_eq!(program.jump_target(i), None),
            }
        }
    }

    #[test]
    fn unmatched_open_bracket_is_rejected() {
        let result = Program::parse("+[+");
        assert!(matches!(result, Err(BrainfuckError::UnmatchedLoopStart { ip: 1 })));
    }

    #[test]
    fn unmatched_close_bracket_is_rejected() {
        let result = Program::parse("+]+");
        assert!(matches!(result, Err(BrainfuckError::UnmatchedLoopEnd { ip: 1 })));
    }

    #[test]
    fn bracket_error_position_counts_comment_characters() {
        // The ']' is the fifth source character even though comments are
        // dropped from the token sequence.
        let result = Program::parse("+ ab ]");
        assert!(matches!(result, Err(BrainfuckError::UnmatchedLoopEnd { ip: 5 })));
    }

    #[test]
    fn run_length_counts_inclusive_runs() {
        let program = Program::parse("+++>>-").unwrap();
        assert_eq!(program.run_length(0), 3);
        assert_eq!(program.run_length(1), 2);
        assert_eq!(program.run_length(3), 2);
        assert_eq!(program.run_length(5), 1);
    }

    #[test]
    fn run_length_is_defined_for_loop_tokens() {
        let program = Program::parse("[[-]]").unwrap();
        assert_eq!(program.run_length(0), 2);
        assert_eq!(program.run_length(2), 1);
    }
}
