//! Console prompts
//!
//! The rename pipeline only talks to the operator through [`Prompter`], so runs
//! can be scripted or answered from configuration.

use std::io::{self, BufRead, Write};

use crate::{Error, Result};

/// Question/answer channel to the operator
pub trait Prompter {
    /// Ask a free-form question
    ///
    /// Returns `None` when input is exhausted.
    fn ask(&mut self, question: &str) -> Result<Option<String>>;

    /// Ask a yes/no question
    ///
    /// Exhausted input counts as "no".
    fn confirm(&mut self, question: &str) -> Result<bool> {
        let answer = self.ask(&format!("{} (y/n): ", question))?;
        Ok(answer.as_deref().map(is_affirmative).unwrap_or(false))
    }
}

/// `y` or `yes`, ignoring case and surrounding whitespace
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Prompter over a line-oriented reader and a writer
pub struct ConsolePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsolePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consume the prompter, returning everything written to the operator
    pub fn into_output(self) -> W {
        self.output
    }
}

impl ConsolePrompter<io::StdinLock<'static>, io::Stdout> {
    /// Prompter on the process's stdin/stdout
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter for ConsolePrompter<R, W> {
    fn ask(&mut self, question: &str) -> Result<Option<String>> {
        write!(self.output, "{}", question).map_err(|e| Error::Prompt(e.to_string()))?;
        self.output
            .flush()
            .map_err(|e| Error::Prompt(e.to_string()))?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|e| Error::Prompt(e.to_string()))?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

/// Ask for a path until a non-empty answer is given
///
/// Surrounding whitespace and one pair of matching quotes are removed, so paths
/// dragged into a terminal work as typed.
pub fn ask_path(prompter: &mut dyn Prompter, question: &str) -> Result<std::path::PathBuf> {
    loop {
        let Some(answer) = prompter.ask(question)? else {
            return Err(Error::Prompt(format!(
                "input closed before answering: {}",
                question.trim()
            )));
        };
        let path = unquote(answer.trim());
        if !path.is_empty() {
            return Ok(std::path::PathBuf::from(path));
        }
    }
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> ConsolePrompter<Cursor<Vec<u8>>, Vec<u8>> {
        ConsolePrompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_is_affirmative() {
        assert!(is_affirmative("y"));
        assert!(is_affirmative("Y"));
        assert!(is_affirmative(" yes "));
        assert!(!is_affirmative("n"));
        assert!(!is_affirmative(""));
        assert!(!is_affirmative("yep"));
    }

    #[test]
    fn test_ask_writes_question_and_reads_line() {
        let mut p = prompter("/music\r\n");
        let answer = p.ask("Enter the input directory path: ").unwrap();
        assert_eq!(answer.as_deref(), Some("/music"));
        assert_eq!(p.output, b"Enter the input directory path: ");
    }

    #[test]
    fn test_confirm_eof_is_no() {
        let mut p = prompter("");
        assert!(!p.confirm("Continue?").unwrap());
        assert_eq!(p.output, b"Continue? (y/n): ");
    }

    #[test]
    fn test_ask_path_skips_blank_and_unquotes() {
        let mut p = prompter("\n   \n'/tmp/my exports'\n");
        let path = ask_path(&mut p, "Path: ").unwrap();
        assert_eq!(path, std::path::PathBuf::from("/tmp/my exports"));
    }

    #[test]
    fn test_ask_path_eof_is_error() {
        let mut p = prompter("");
        assert!(matches!(ask_path(&mut p, "Path: "), Err(Error::Prompt(_))));
    }
}
