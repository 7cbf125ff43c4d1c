use crate::core::console::Console;
use crate::core::text::{center, char_slice, is_alpha, is_decimal, ljust, quoted_list, strip_chars, title_case};
use crate::domain::ports::Exercise;
use crate::utils::error::Result;
use std::io::{BufRead, Write};

pub const RAW_PATH: &str = r"C:\Users\CaptainAmelia\StarCharts\Legacy_Manifests\Treasure_Map_Coords.dat";
pub const PIN_LENGTH: usize = 4;
const STRIP_SET: &str = ".,! ";

/// `"anna, BOB ,carl"` -> `"Crewman Anna, Crewman Bob, Crewman Carl"`.
pub fn crew_roll_call(raw: &str) -> String {
    raw.split(',')
        .map(|name| format!("Crewman {}", title_case(name.trim())))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn valid_username(username: &str) -> bool {
    is_alpha(username)
}

pub fn valid_pin(pin: &str) -> bool {
    is_decimal(pin) && pin.chars().count() == PIN_LENGTH
}

/// Chapter 8: slicing, validation, stripping and columnar output.
#[derive(Debug, Default)]
pub struct TextPrep;

impl TextPrep {
    pub fn station_one<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> Result<()> {
        console.say("\n--- STATION 1: Raw Strings and Indexing ---")?;
        console.say(format!("File Path (Raw String): {}", RAW_PATH))?;
        console.say("-".repeat(40))?;

        console.say(format!(
            "Segment [9:22] (Username): {}",
            char_slice(RAW_PATH, 9, 22)
        ))?;
        console.say(format!(
            "Last 4 chars (Extension): {}",
            char_slice(RAW_PATH, -4, i64::MAX)
        ))?;
        Ok(())
    }

    pub fn station_two<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> Result<()> {
        console.say("\n--- STATION 2: Text Validation and Cleaning ---")?;
        console.say("Welcome Spacefarer! Please create an account at the Montressor Spaceport.")?;

        loop {
            let username = console.ask_trimmed("Please enter a username (letters only).\n> ")?;
            if !valid_username(&username) {
                console.say("Username must contain only letters and cannot be empty.")?;
                continue;
            }

            let pin = console.ask_trimmed("Please enter a PIN (numbers only).\n> ")?;
            if valid_pin(&pin) {
                console.say(format!("Thank you, {}. Account PIN verified.", username))?;
                break;
            }
            tracing::debug!("rejected PIN of length {}", pin.chars().count());
            console.say("PIN must be exactly 4 digits and contain only numbers.")?;
        }

        let raw = console.ask("\nEnter a message (include some punctuation at the ends).\n> ")?;
        console.say(format!("Original Input: '{}'", raw))?;
        console.say(format!(
            "Cleaned Input (strip '{}'): '{}'",
            STRIP_SET,
            strip_chars(&raw, STRIP_SET)
        ))?;
        Ok(())
    }

    pub fn station_three<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> Result<()> {
        console.say("\n--- STATION 3: Data Parsing and Reconstruction ---")?;

        let raw = console
            .ask_trimmed("Please enter the names of your individual crew members, separating each with a comma.\n> ")?
            .to_lowercase();
        let pieces: Vec<&str> = raw.split(',').collect();
        console.say(format!(
            "List of names created by split(','): {}",
            quoted_list(&pieces)
        ))?;
        console.say(format!("Reconstructed String (join): {}", crew_roll_call(&raw)))?;

        console.say("\n--- Columnar Formatting (ljust/center) ---")?;
        console.say(format!(
            "{}{}",
            ljust("SYSTEM STATUS", 30),
            center("ACCESS LEVEL", 15, '=')
        ))?;
        console.say(format!("{}{}", ljust("Active User", 30), center("Alpha", 15, ' ')))?;
        console.say(format!(
            "{}{}",
            ljust("Secure Connection", 30),
            center("Beta", 15, ' ')
        ))?;
        Ok(())
    }
}

impl Exercise for TextPrep {
    fn chapter(&self) -> &'static str {
        "Chapter 8"
    }

    fn title(&self) -> &'static str {
        "Strings and Text Editing"
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
    fn test_username_segment() {
        assert_eq!(char_slice(RAW_PATH, 9, 22), "CaptainAmelia");
        assert_eq!(char_slice(RAW_PATH, -4, i64::MAX), ".dat");

        let mut console = Console::new(std::io::Cursor::new(Vec::new()), Vec::new());
        TextPrep.station_one(&mut console).unwrap();
        let output = String::from_utf8(console.into_output()).unwrap();
        assert!(output.contains("Segment [9:22] (Username): CaptainAmelia\n"));
    }

    #[test]
    fn test_crew_roll_call() {
        assert_eq!(
            crew_roll_call("jim hawkins, silver ,  doppler"),
            "Crewman Jim Hawkins, Crewman Silver, Crewman Doppler"
        );
        assert_eq!(crew_roll_call(""), "Crewman ");
    }

    #[test]
    fn test_pin_rules() {
        assert!(valid_pin("0420"));
        assert!(!valid_pin("042"));
        assert!(!valid_pin("04a0"));
        assert!(!valid_pin("04200"));
    }

    #[test]
    fn test_username_rules() {
        assert!(valid_username("Amelia"));
        assert!(!valid_username(""));
        assert!(!valid_username("Amelia1"));
    }
}
