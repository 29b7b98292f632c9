//! Line-oriented terminal interaction.
//!
//! Every interactive flow talks to the user through a `Console`, which wraps
//! a reader and a writer so tests can script a whole session from a string.

use anyhow::{Context, Result};
use std::io::{BufRead, Write};

pub struct Console<R, W> {
    reader: R,
    writer: W,
}

impl Console<std::io::BufReader<std::io::Stdin>, std::io::Stdout> {
    /// Console over the process's stdin/stdout.
    pub fn stdio() -> Self {
        Console {
            reader: std::io::BufReader::new(std::io::stdin()),
            writer: std::io::stdout(),
        }
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Console { reader, writer }
    }

    /// Print a line to the user.
    pub fn say(&mut self, message: &str) -> Result<()> {
        writeln!(self.writer, "{}", message).context("Failed to write to console")?;
        self.writer.flush().context("Failed to flush console")?;
        Ok(())
    }

    /// Print a prompt and read one trimmed line of input.
    ///
    /// EOF on the input is treated as an empty answer so a closed stdin
    /// falls through the "no/exit" paths instead of erroring.
    pub fn prompt(&mut self, message: &str) -> Result<String> {
        write!(self.writer, "{}", message).context("Failed to write prompt")?;
        self.writer.flush().context("Failed to flush prompt")?;

        let mut line = String::new();
        self.reader
            .read_line(&mut line)
            .context("Failed to read input")?;
        Ok(line.trim().to_string())
    }

    /// Yes/no question. Anything other than "no" counts as yes, matching the
    /// forgiving behavior of the prompts this program grew out of.
    pub fn confirm(&mut self, message: &str) -> Result<bool> {
        let answer = self.prompt(message)?;
        Ok(!answer.eq_ignore_ascii_case("no"))
    }

    /// Consume the console and return the writer, for output assertions.
    #[cfg(test)]
    pub fn into_writer(self) -> W {
        self.writer
    }
}
