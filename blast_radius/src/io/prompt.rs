//! Operator interaction: status lines and blocking questions.

use std::io::{BufRead, StdinLock, Stdout, Write};

use anyhow::{Context, Result, anyhow};

/// Line-oriented conversation with the operator.
pub trait Prompter {
    /// Print a status line.
    fn say(&mut self, line: &str) -> Result<()>;

    /// Print `question` without a newline and block for one line of input.
    ///
    /// The returned answer has its line terminator removed. End of input is
    /// an error.
    fn ask(&mut self, question: &str) -> Result<String>;
}

/// Prompter over any reader/writer pair.
pub struct LinePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    #[cfg(test)]
    fn into_output(self) -> W {
        self.output
    }
}

impl LinePrompter<StdinLock<'static>, Stdout> {
    /// Prompter bound to the process's stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn say(&mut self, line: &str) -> Result<()> {
        writeln!(self.output, "{line}").context("write status line")
    }

    fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{question}").context("write prompt")?;
        self.output.flush().context("flush prompt")?;
        let mut answer = String::new();
        let n = self
            .input
            .read_line(&mut answer)
            .context("read operator input")?;
        if n == 0 {
            return Err(anyhow!("input closed while waiting for an answer"));
        }
        let trimmed = answer.trim_end_matches(['\n', '\r']).len();
        answer.truncate(trimmed);
        Ok(answer)
    }
}
