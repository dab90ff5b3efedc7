use std::io::{self, BufRead, Stderr, StdinLock, Write};

use modelforge_generate::Prompt;

/// Line-based prompt on a terminal.
///
/// Empty input selects the first choice. With more than one choice, answers
/// outside the list are asked again.
pub struct TerminalPrompt<R, W> {
    input: R,
    output: W,
}

impl TerminalPrompt<StdinLock<'static>, Stderr> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Prompt for TerminalPrompt<R, W> {
    fn prompt(&mut self, message: &str, choices: &[&str]) -> io::Result<String> {
        loop {
            if choices.is_empty() {
                write!(self.output, "{message}: ")?;
            } else {
                write!(self.output, "{message} [{}]: ", choices.join(", "))?;
            }
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    format!("no answer for `{message}`"),
                ));
            }

            let answer = line.trim();
            if answer.is_empty() {
                return Ok(choices.first().map(|choice| choice.to_string()).unwrap_or_default());
            }
            if choices.len() > 1 && !choices.contains(&answer) {
                writeln!(self.output, "Please choose one of: {}", choices.join(", "))?;
                continue;
            }
            return Ok(answer.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn prompt_with(input: &str) -> TerminalPrompt<Cursor<Vec<u8>>, Vec<u8>> {
        TerminalPrompt::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn empty_input_selects_first_choice() {
        let mut prompt = prompt_with("\n");
        let answer = prompt.prompt("Set Created date?", &["y", "n"]).expect("answer");
        assert_eq!(answer, "y");
        assert_eq!(String::from_utf8_lossy(&prompt.output), "Set Created date? [y, n]: ");
    }

    #[test]
    fn free_text_returns_raw_input() {
        let mut prompt = prompt_with("  blog_post \n");
        assert_eq!(prompt.prompt("Model name", &[]).expect("answer"), "blog_post");

        let mut prompt = prompt_with("members\n");
        assert_eq!(prompt.prompt("Table name", &["users"]).expect("answer"), "members");
    }

    #[test]
    fn asks_again_on_answer_outside_choices() {
        let mut prompt = prompt_with("maybe\nn\n");
        assert_eq!(prompt.prompt("Use Soft Deletes?", &["y", "n"]).expect("answer"), "n");
        assert!(String::from_utf8_lossy(&prompt.output).contains("Please choose one of: y, n"));
    }

    #[test]
    fn end_of_input_is_an_error() {
        let mut prompt = prompt_with("");
        let err = prompt.prompt("Model name", &[]).expect_err("eof");
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
