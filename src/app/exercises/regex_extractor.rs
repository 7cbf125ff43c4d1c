use crate::core::console::Console;
use crate::domain::ports::{Exercise, Storage};
use crate::utils::error::Result;
use regex::{Regex, RegexBuilder};
use std::io::{BufRead, Write};

const PHONE_PATTERN: &str = r"(
    (\+\d{1,4}|\d{2,4})?      # country or local code, e.g. +44 or 07
    (\s|-|\.)?                # separator
    (\d{3,4})                 # first block
    (\s|-|\.)?
    (\d{3,4})                 # second block
    (\s|-|\.)?
    (\d{3,4})                 # third block
)";

const EMAIL_PATTERN: &str = r"(
    [a-zA-Z0-9._%+-]+         # user
    @
    [a-zA-Z0-9._%+-]+         # domain
    (\.[a-zA-Z]{2,4})         # top level domain
)";

const STARDATE_PATTERN: &str = r"^[A-Za-z][^\s]{7}$";

const STAR_COMMAND_ID_PATTERN: &str = r"(\d{3})-?\d{2}-?\d{4}(-?\d{1,2})?";

const PREVIEW_CHARS: usize = 80;

/// The compiled patterns of the chapter.
#[derive(Debug, Clone)]
pub struct Patterns {
    phone: Regex,
    email: Regex,
    stardate: Regex,
    star_command_id: Regex,
}

impl Patterns {
    pub fn compile() -> Result<Self> {
        Ok(Self {
            phone: RegexBuilder::new(PHONE_PATTERN)
                .ignore_whitespace(true)
                .build()?,
            email: RegexBuilder::new(EMAIL_PATTERN)
                .ignore_whitespace(true)
                .build()?,
            stardate: RegexBuilder::new(STARDATE_PATTERN)
                .case_insensitive(true)
                .build()?,
            star_command_id: Regex::new(STAR_COMMAND_ID_PATTERN)?,
        })
    }

    /// Phone numbers (code and blocks joined by a space) followed by email addresses.
    pub fn extract_contacts(&self, text: &str) -> Vec<String> {
        let phones = self.phone.captures_iter(text).map(|caps| {
            [2, 4, 6, 8]
                .iter()
                .filter_map(|group| caps.get(*group).map(|m| m.as_str()))
                .collect::<Vec<_>>()
                .join(" ")
        });
        let emails = self
            .email
            .find_iter(text)
            .map(|m| m.as_str().to_string());
        phones.chain(emails).collect()
    }

    pub fn is_stardate_id(&self, candidate: &str) -> bool {
        self.stardate.is_match(candidate)
    }

    /// Keeps the first three digits of every Star Command ID.
    pub fn mask_ids(&self, text: &str) -> String {
        self.star_command_id
            .replace_all(text, "${1}-XX-XXXX")
            .into_owned()
    }
}

/// Where the chapter reads its text from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextSource {
    /// A file, re-read by every station that needs it.
    File(String),
    /// Lines pasted at the prompt, ended by an empty line.
    Paste,
}

/// Chapter 9: pattern extraction, validation and masking.
pub struct RegexExtractor<S: Storage> {
    patterns: Patterns,
    storage: S,
    source: TextSource,
    output: Option<String>,
}

impl<S: Storage> RegexExtractor<S> {
    pub fn new(storage: S, source: TextSource, output: Option<String>) -> Result<Self> {
        Ok(Self {
            patterns: Patterns::compile()?,
            storage,
            source,
            output,
        })
    }

    fn read_source<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> Result<String> {
        match &self.source {
            TextSource::File(path) => {
                let data = self.storage.read_file(path)?;
                tracing::debug!("read {} bytes from {}", data.len(), path);
                Ok(String::from_utf8_lossy(&data).into_owned())
            }
            TextSource::Paste => {
                console.say("Paste the text to scan, then finish with an empty line.")?;
                let mut lines = Vec::new();
                loop {
                    let line = console.ask("")?;
                    if line.is_empty() {
                        break;
                    }
                    lines.push(line);
                }
                Ok(lines.join("\n"))
            }
        }
    }

    pub fn station_one<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<()> {
        console.say("\n--- STATION 1: Phone number and Email data extraction ---")?;

        let text = self.read_source(console)?;
        let matches = self.patterns.extract_contacts(&text);
        tracing::info!("found {} contacts", matches.len());

        if matches.is_empty() {
            console.say("No phone numbers or email addresses found.")?;
            return Ok(());
        }

        let joined = matches.join("\n");
        match &self.output {
            Some(path) => {
                self.storage.write_file(path, joined.as_bytes())?;
                console.say(format!("Written to {}:", path))?;
            }
            None => console.say("Found:")?,
        }
        console.say(joined)
    }

    pub fn station_two<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<()> {
        console.say("\n--- STATION 2: Advanced Validation and Formatting ---")?;
        console.say("Goal: Validate a 'Stardate ID' using Anchors and Negative Character Classes.")?;
        console.say("-".repeat(50))?;

        loop {
            let candidate = console.ask(
                "Enter an 8-character Stardate ID (must start with a letter, no spaces).\n> ",
            )?;
            if self.patterns.is_stardate_id(&candidate) {
                console.say(format!(
                    "VALIDATION SUCCESS: '{}' is a valid 8-character Stardate ID.",
                    candidate
                ))?;
                return Ok(());
            }
            console.say("VALIDATION FAILED. Remember: must be 8 chars, start with a letter, and contain no spaces.")?;
        }
    }

    pub fn station_three<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<()> {
        console.say("\n--- STATION 3: Data Masking and Cleaning ---")?;

        let raw = self.read_source(console)?;
        let preview: String = raw.chars().take(PREVIEW_CHARS).collect();
        console.say(format!("Original Text:\n{}...", preview))?;

        let censored = self.patterns.mask_ids(&raw);
        console.say("-".repeat(50))?;
        console.say("Masking with replace_all:")?;
        console.say(format!("Censored Version: {}", censored))?;

        if let Some(path) = &self.output {
            self.storage
                .append_file(path, format!("\n\n{}", censored).as_bytes())?;
            console.say(format!("\nCensored text appended to {}.", path))?;
        }
        Ok(())
    }
}

impl<S: Storage> Exercise for RegexExtractor<S> {
    fn chapter(&self) -> &'static str {
        "Chapter 9"
    }

    fn title(&self) -> &'static str {
        "Text Pattern Matching"
    }

    fn announces_finish(&self) -> bool {
        true
    }

    fn run<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<()> {
        self.station_one(console)?;
        self.station_two(console)?;
        self.station_three(console)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_phones_then_emails() {
        let patterns = Patterns::compile().unwrap();
        let found = patterns.extract_contacts(
            "Call +44 7700 900 123 or 0161-496-0000, mail amelia@legacy.com",
        );
        assert_eq!(
            found,
            vec![
                "+44 7700 900 123".to_string(),
                "0161 496 0000".to_string(),
                "amelia@legacy.com".to_string(),
            ]
        );
    }

    #[test]
    fn test_phone_without_code_skips_empty_group() {
        let patterns = Patterns::compile().unwrap();
        let found = patterns.extract_contacts("555 1234 987");
        assert_eq!(found, vec!["555 1234 987"]);
        assert!(!found[0].starts_with(' '));
    }

    #[test]
    fn test_stardate_ids() {
        let patterns = Patterns::compile().unwrap();
        assert!(patterns.is_stardate_id("a1234567"));
        assert!(patterns.is_stardate_id("Zx-9.!@#"));
        assert!(!patterns.is_stardate_id("12345678"));
        assert!(!patterns.is_stardate_id("abc defg"));
        assert!(!patterns.is_stardate_id("abcdefghi"));
        assert!(!patterns.is_stardate_id("abcdefg"));
    }

    #[test]
    fn test_masking_keeps_first_three_digits() {
        let patterns = Patterns::compile().unwrap();
        assert_eq!(
            patterns.mask_ids("Officer 123-45-6789-12 and 987654321 reported."),
            "Officer 123-XX-XXXX and 987-XX-XXXX reported."
        );
    }
}
