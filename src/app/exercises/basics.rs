use crate::core::console::Console;
use crate::domain::ports::Exercise;
use crate::utils::error::Result;
use std::io::{BufRead, Write};

/// Chapter 1: print, input, f-strings and converting text to a number.
#[derive(Debug, Default)]
pub struct Basics;

impl Exercise for Basics {
    fn chapter(&self) -> &'static str {
        "Chapter 1"
    }

    fn title(&self) -> &'static str {
        "Basics"
    }

    fn run<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<()> {
        console.say("Hello, world!")?;

        let name = console.ask("What is your name?\n")?;
        console.say(format!(
            "It is good to meet you, {}. My name is TheSingingKnight.",
            name
        ))?;
        console.say(format!(
            "Fun fact, your name is {} letters long!",
            name.chars().count()
        ))?;

        let age: u32 = console.ask_until("What is your age?\n", |answer| {
            answer
                .trim()
                .parse::<u32>()
                .map_err(|_| "Please give your age as a whole number.".to_string())
        })?;
        console.say(format!("You will be {} in a year.", u64::from(age) + 1))?;

        Ok(())
    }
}
