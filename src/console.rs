use std::fmt::Display;
use std::io::{self, BufRead, Write};

/// The terminal as seen by the command handlers: messages go to `output`,
/// answers to confirmation prompts are read from `input`.
pub struct Console<'a> {
    input: &'a mut dyn BufRead,
    output: &'a mut dyn Write,
}

impl<'a> Console<'a> {
    pub fn new(input: &'a mut dyn BufRead, output: &'a mut dyn Write) -> Self {
        Self { input, output }
    }

    pub fn say(&mut self, message: impl Display) -> io::Result<()> {
        writeln!(self.output, "{}", message)
    }

    /// Asks `<question> (y/N)? ` and reads one line. Only `y` (any case)
    /// counts as yes, end of input counts as no.
    pub fn confirm(&mut self, question: impl Display) -> io::Result<bool> {
        write!(self.output, "{} (y/N)? ", question)?;
        self.output.flush()?;

        let mut answer = String::new();
        self.input.read_line(&mut answer)?;
        Ok(answer.trim().eq_ignore_ascii_case("y"))
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.output.flush()
    }
}
