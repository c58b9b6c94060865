//! Brainfuck code generation.
//!
//! Produces a program that, when interpreted, writes a given byte sequence to
//! its output. Each byte is encoded either as a wrapping delta from the
//! previous byte or by clearing the cell and rebuilding the value, whichever
//! is shorter.

use std::cmp::Ordering;

/// Tuning knobs for [`Generator`].
pub struct GeneratorOptions {
    /// Consider loop-based multiplication when rebuilding a value from zero.
    pub use_loops: bool,
    /// Largest outer loop counter tried during multiplication search.
    pub max_loop_factor: u8,
    /// Assume the target interpreter wraps cells at 256 (this crate's does).
    pub assume_wrapping_u8: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            use_loops: true,
            max_loop_factor: 16,
            assume_wrapping_u8: true,
        }
    }
}

/// Generates Brainfuck code that prints a byte sequence.
pub struct Generator<'a> {
    input: &'a [u8],
    options: GeneratorOptions,
}

impl<'a> Generator<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            options: GeneratorOptions::default(),
        }
    }

    pub fn with_options(input: &'a [u8], options: GeneratorOptions) -> Self {
        Self { input, options }
    }

    /// Produce the program text.
    pub fn generate(&self) -> String {
        let mut output = String::new();
        let mut cursor = 0u8;

        for &byte in self.input {
            let delta = self.encode_delta(cursor, byte);
            let rebuilt = self.encode_from_scratch(byte);

            // Pick whichever encoding is shorter for this byte.
            let best = if delta.len() <= rebuilt.len() { delta } else { rebuilt };
            output.push_str(&best);
            output.push('.');

            cursor = byte;
        }

        output
    }

    /// Shortest `+`/`-` run taking the cell from `cursor` to `target`.
    ///
    /// With wrapping assumed this is the shorter direction around the ring of
    /// 256; otherwise it is the plain signed difference.
    fn encode_delta(&self, cursor: u8, target: u8) -> String {
        if cursor == target {
            return String::new();
        }

        if self.options.assume_wrapping_u8 {
            let forward = target.wrapping_sub(cursor);
            let backward = cursor.wrapping_sub(target);
            if forward <= backward {
                "+".repeat(forward as usize)
            } else {
                "-".repeat(backward as usize)
            }
        } else {
            match target.cmp(&cursor) {
                Ordering::Greater => "+".repeat((target - cursor) as usize),
                Ordering::Less => "-".repeat((cursor - target) as usize),
                Ordering::Equal => String::new(),
            }
        }
    }

    /// Build `target` in the current cell regardless of its prior value.
    ///
    /// The fallback is `[-]` followed by `target` plus signs. When loops are
    /// enabled, multiplication candidates of the form `a * b + r` are tried:
    ///
    /// ```text
    /// [-] >[-]<  '+' * a  [> '+' * b < -]  >  '+'|'-' * |r|  [<+>-] <
    /// ```
    ///
    /// which leaves the current cell at `target`, the temp cell right of it
    /// at 0, and the pointer back where it started.
    fn encode_from_scratch(&self, target: u8) -> String {
        let mut best = String::from("[-]");
        best.push_str(&"+".repeat(target as usize));

        if !self.options.use_loops || target == 0 {
            return best;
        }

        for a in 1..=self.options.max_loop_factor {
            let b = ((target as f32 / a as f32).round() as i32).clamp(1, 255);
            let remainder = target as i32 - a as i32 * b;

            let mut seq = String::from("[-]>[-]<");
            seq.push_str(&"+".repeat(a as usize));
            seq.push('[');
            seq.push('>');
            seq.push_str(&"+".repeat(b as usize));
            seq.push_str("<-]");

            seq.push('>');
            match remainder.cmp(&0) {
                Ordering::Greater => seq.push_str(&"+".repeat(remainder as usize)),
                Ordering::Less => seq.push_str(&"-".repeat(-remainder as usize)),
                Ordering::Equal => {}
            }
            seq.push_str("[<+>-]<");

            if seq.len() < best.len() {
                best = seq;
            }
        }

        best
    }
}
