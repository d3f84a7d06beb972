//! Line-oriented terminal prompts
//!
//! [`Prompter`] wraps an input and an output stream so the interactive flow
//! can be driven by stdin/stdout in the binary and by in-memory buffers in
//! tests.

use bikeshare_core::error::{BikeshareError, Result};
use std::io::{BufRead, Write};
use tracing::debug;

/// The single answer that counts as "yes"
pub const AFFIRMATIVE: &str = "yes";

/// Question/answer helper over a reader and a writer
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Create a prompter reading answers from `input` and writing to `output`
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Write a line of text
    pub fn say(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{message}")?;
        Ok(())
    }

    /// Print `question` and read one answer line, trimmed
    ///
    /// # Errors
    ///
    /// Returns [`BikeshareError::InputClosed`] when the input is exhausted
    pub fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(BikeshareError::InputClosed);
        }
        Ok(line.trim().to_string())
    }

    /// Ask until `parse` accepts the answer
    ///
    /// Every rejected answer is followed by `correction` and the question is
    /// asked again. Only a closed input or a failing terminal ends the loop
    /// without a value.
    pub fn prompt_until_valid<T>(
        &mut self,
        question: &str,
        correction: &str,
        parse: impl Fn(&str) -> Option<T>,
    ) -> Result<T> {
        loop {
            let answer = self.ask(question)?;
            match parse(&answer) {
                Some(value) => return Ok(value),
                None => {
                    debug!("Rejected answer {:?}", answer);
                    self.say(correction)?;
                }
            }
        }
    }

    /// Ask a yes/no question; only `yes` (any case) is affirmative
    pub fn confirm(&mut self, question: &str) -> Result<bool> {
        let answer = self.ask(question)?;
        Ok(answer.eq_ignore_ascii_case(AFFIRMATIVE))
    }

    /// Give back the wrapped streams
    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }
}
