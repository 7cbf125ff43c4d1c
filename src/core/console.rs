use crate::utils::error::{JournalError, Result};
use std::io::{self, BufRead, StdinLock, Stdout, Write};

/// Prompt/response channel every exercise talks through.
///
/// Exercises never touch stdin/stdout directly, so a test can feed a
/// scripted transcript through a `Cursor` and read back what was printed.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl Console<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn say(&mut self, text: impl AsRef<str>) -> Result<()> {
        writeln!(self.output, "{}", text.as_ref())?;
        Ok(())
    }

    /// Writes without a trailing newline.
    pub fn say_inline(&mut self, text: impl AsRef<str>) -> Result<()> {
        write!(self.output, "{}", text.as_ref())?;
        self.output.flush()?;
        Ok(())
    }

    /// Prints `prompt` and reads one line with the line terminator removed.
    pub fn ask(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            tracing::debug!("console input reached end of stream");
            return Err(JournalError::EndOfInput);
        }

        let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed_len);
        Ok(line)
    }

    pub fn ask_trimmed(&mut self, prompt: &str) -> Result<String> {
        Ok(self.ask(prompt)?.trim().to_string())
    }

    /// Re-asks until `parse` accepts the answer, printing its complaint each time.
    pub fn ask_until<T, F>(&mut self, prompt: &str, parse: F) -> Result<T>
    where
        F: FnMut(&str) -> std::result::Result<T, String>,
    {
        self.ask_until_with(prompt, parse, false)
    }

    fn ask_until_with<T, F>(&mut self, prompt: &str, mut parse: F, run_on: bool) -> Result<T>
    where
        F: FnMut(&str) -> std::result::Result<T, String>,
    {
        loop {
            let answer = self.ask(prompt)?;
            match parse(&answer) {
                Ok(value) => return Ok(value),
                Err(complaint) if run_on => self.say_inline(complaint)?,
                Err(complaint) => self.say(complaint)?,
            }
        }
    }

    /// Strict `yes`/`no` question (case-insensitive).
    pub fn ask_yes_no(&mut self, prompt: &str, complaint: &str) -> Result<bool> {
        self.ask_until(prompt, |answer| yes_or_no(answer, complaint))
    }

    /// Like `ask_yes_no`, but the complaint runs straight into the next prompt.
    pub fn ask_yes_no_run_on(&mut self, prompt: &str, complaint: &str) -> Result<bool> {
        self.ask_until_with(prompt, |answer| yes_or_no(answer, complaint), true)
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

fn yes_or_no(answer: &str, complaint: &str) -> std::result::Result<bool, String> {
    match answer.trim().to_lowercase().as_str() {
        "yes" => Ok(true),
        "no" => Ok(false),
        _ => Err(complaint.to_string()),
    }
}

/// Parses a whole number the way the exercises accept it: surrounding
/// whitespace allowed, anything else rejected.
pub fn parse_int(answer: &str) -> Option<i64> {
    answer.trim().parse::<i64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn scripted(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_ask_strips_line_endings() {
        let mut console = scripted("Jim Hawkins\r\n");
        assert_eq!(console.ask("Name?\n> ").unwrap(), "Jim Hawkins");
    }

    #[test]
    fn test_end_of_input() {
        let mut console = scripted("");
        assert!(matches!(console.ask("> "), Err(JournalError::EndOfInput)));
    }

    #[test]
    fn test_ask_until_reprompts() {
        let mut console = scripted("seven\n-1\n7\n");
        let value = console
            .ask_until("> ", |a| match parse_int(a) {
                Some(n) if n > 0 => Ok(n),
                _ => Err("positive please".to_string()),
            })
            .unwrap();
        assert_eq!(value, 7);

        let transcript = String::from_utf8(console.into_output()).unwrap();
        assert_eq!(transcript.matches("positive please").count(), 2);
    }

    #[test]
    fn test_yes_no_is_case_insensitive() {
        let mut console = scripted("maybe\nYES\n");
        assert!(console.ask_yes_no("> ", "yes or no").unwrap());
    }

    #[test]
    fn test_run_on_complaint_shares_the_prompt_line() {
        let mut console = scripted("maybe\nno\n");
        assert!(!console.ask_yes_no_run_on("Again?\n> ", "yes or no.\n\nSo...").unwrap());

        let transcript = String::from_utf8(console.into_output()).unwrap();
        assert_eq!(transcript, "Again?\n> yes or no.\n\nSo...Again?\n> ");
    }

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int(" 42 "), Some(42));
        assert_eq!(parse_int("-3"), Some(-3));
        assert_eq!(parse_int("4.2"), None);
        assert_eq!(parse_int("nine"), None);
    }
}
