use crate::core::console::Console;
use crate::domain::ports::Exercise;
use crate::utils::error::{JournalError, Result};
use std::io::{BufRead, Write};

const WELCOME: &str = "
Welcome to the Collatz Sequence Script!

The Collatz Sequence is a famous mathematical problem.

Starting with any positive number, the sequence does one of two calculations.
Depending whether the number is even or odd.

If even, the number is divided by 2.
If odd, the number is multiplied by 3 with 1 added at the end.

This repeats until the final number reaches 1.

Amazingly enough, this sequence actually works for any integer; sooner or later, you'll arrive at 1.
Even mathematicians aren't sure why!

With this script you can test out any number and see the process play out.
";

pub fn collatz_step(number: u64) -> Result<u64> {
    if number % 2 == 0 {
        Ok(number / 2)
    } else {
        number
            .checked_mul(3)
            .and_then(|n| n.checked_add(1))
            .ok_or_else(|| JournalError::OverflowError {
                message: format!("3 * {} + 1 does not fit in 64 bits", number),
            })
    }
}

/// Every value from `start` down to the terminating 1, inclusive.
pub fn collatz_sequence(start: u64) -> Result<Vec<u64>> {
    if start == 0 {
        return Err(JournalError::validation("the sequence needs a positive start"));
    }

    let mut sequence = vec![start];
    let mut number = start;
    while number != 1 {
        number = collatz_step(number)?;
        sequence.push(number);
    }
    Ok(sequence)
}

/// Chapter 4: functions, return values and a session-wide step counter.
#[derive(Debug, Default)]
pub struct CollatzSession {
    total_steps: u64,
}

impl CollatzSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }

    /// Prints one sequence and returns its step count.
    pub fn show_sequence<R: BufRead, W: Write>(
        &mut self,
        console: &mut Console<R, W>,
        start: u64,
    ) -> Result<usize> {
        let sequence = collatz_sequence(start)?;
        let steps = sequence.len() - 1;
        self.total_steps += steps as u64;

        let rendered: Vec<String> = sequence.iter().map(u64::to_string).collect();
        console.say(format!("Sequence for {}: {}", start, rendered.join(" -> ")))?;
        console.say(format!("(Finished in {} steps)", steps))?;
        Ok(steps)
    }
}

impl Exercise for CollatzSession {
    fn chapter(&self) -> &'static str {
        "Chapter 4"
    }

    fn title(&self) -> &'static str {
        "Functions"
    }

    fn run<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<()> {
        console.say(WELCOME)?;

        loop {
            let start: u64 = console.ask_until(
                "Care to give it a whirl?\n Enter a positive integer here...\n> ",
                |answer| match answer.trim().parse::<i128>() {
                    Ok(n) if n <= 0 => {
                        Err("Sorry, input must be a positive integer, try again.".to_string())
                    }
                    Ok(n) => u64::try_from(n)
                        .map_err(|_| "That number is too large for this script.".to_string()),
                    Err(_) => Err("Please enter a valid integer.".to_string()),
                },
            )?;

            match self.show_sequence(console, start) {
                Ok(steps) => {
                    console.say("\n-- Incredibly exciting visual representation of steps in * ! --")?;
                    console.say_inline(" * ".repeat(steps))?;
                    console.say(format!(
                        "\n\nTotal steps calculated this session: {}",
                        self.total_steps
                    ))?;
                }
                Err(JournalError::OverflowError { message }) => {
                    tracing::warn!("Collatz overflow for {}: {}", start, message);
                    console.say(format!(
                        "That sequence climbs beyond what this script can count ({}).",
                        message
                    ))?;
                }
                Err(e) => return Err(e),
            }

            let again = console.ask("\nRun another sequence, ye old math addict? (yes/no): ")?;
            if again.to_lowercase().starts_with('n') {
                console.say("Thank you for using the Collatz Sequence Script. Ciao!")?;
                return Ok(());
            }
        }
    }
}
