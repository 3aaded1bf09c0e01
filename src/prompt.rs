//! Interactive confirmation prompt.

use std::io::{self, BufRead, Write};

use idier_analyze::ProjectFolder;
use idier_ops::Confirmation;

const PROMPT: &str = "Archive above projects? y/N: ";

/// Asks once on `output` and reads a single line from `input`.
pub struct PromptConfirmation<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptConfirmation<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Confirmation for PromptConfirmation<R, W> {
    fn confirm(&mut self, _stale: &[ProjectFolder]) -> io::Result<bool> {
        write!(self.output, "{PROMPT}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            // EOF: nobody said yes.
            writeln!(self.output)?;
            return Ok(false);
        }
        Ok(is_yes(&line))
    }
}

fn is_yes(answer: &str) -> bool {
    answer
        .trim_start()
        .chars()
        .next()
        .is_some_and(|c| c.eq_ignore_ascii_case(&'y'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer(input: &str) -> (bool, String) {
        let mut output = Vec::new();
        let decision = PromptConfirmation::new(input.as_bytes(), &mut output)
            .confirm(&[])
            .unwrap();
        (decision, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_yes_answers() {
        assert!(answer("y\n").0);
        assert!(answer("Y\n").0);
        assert!(answer("  yes please\n").0);
    }

    #[test]
    fn test_everything_else_declines() {
        assert!(!answer("\n").0);
        assert!(!answer("n\n").0);
        assert!(!answer("maybe\n").0);
        assert!(!answer("").0);
    }

    #[test]
    fn test_prompt_written_once() {
        let (_, output) = answer("n\nn\ny\n");
        assert_eq!(output.matches(PROMPT).count(), 1);
    }
}
