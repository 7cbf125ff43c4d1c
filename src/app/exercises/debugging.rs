use crate::core::console::{parse_int, Console};
use crate::domain::ports::Exercise;
use crate::utils::error::{JournalError, Result};
use std::io::{BufRead, Write};

const WELCOME: &str = "
Welcome to my Division calculator!
It is a calculator which can only use division!
Not only that, but you can only input integers.
";

const ZERO_DIVISOR: &str = "This number can't be zero, it would break the mathematical world!";

/// Integer division rounding toward negative infinity.
pub fn floor_div(dividend: i64, divisor: i64) -> Result<i64> {
    if divisor == 0 {
        return Err(JournalError::validation(ZERO_DIVISOR));
    }
    let overflow = || JournalError::OverflowError {
        message: format!("{} / {} does not fit in 64 bits", dividend, divisor),
    };
    let quotient = dividend.checked_div(divisor).ok_or_else(overflow)?;
    let remainder = dividend.checked_rem(divisor).ok_or_else(overflow)?;
    if remainder != 0 && ((remainder < 0) != (divisor < 0)) {
        Ok(quotient - 1)
    } else {
        Ok(quotient)
    }
}

/// Chapter 5: validation loops, raised errors and logging levels.
#[derive(Debug)]
pub struct DivisionCalculator {
    dividend: i64,
    divisor: i64,
}

impl Default for DivisionCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl DivisionCalculator {
    pub fn new() -> Self {
        Self {
            dividend: 1,
            divisor: 1,
        }
    }

    fn read_operands<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<()> {
        tracing::debug!("Starting loop for first number input.");
        self.dividend = console.ask_until("First, enter the number you want divided.\n> ", |answer| {
            parse_int(answer).ok_or_else(|| {
                tracing::warn!("User entered non-integer value for first number.");
                "Please enter only whole numbers (integers) for the first number. Try again, you old maverick!"
                    .to_string()
            })
        })?;

        tracing::debug!("Starting loop for second number input validation.");
        self.divisor = console.ask_until("Now enter the number you want to divide it by.\n> ", |answer| {
            match parse_int(answer) {
                Some(0) => {
                    tracing::error!("Attempted input of zero for the divisor.");
                    Err(format!("Error Caught: {}", ZERO_DIVISOR))
                }
                Some(n) => Ok(n),
                None => {
                    tracing::warn!("User entered non-integer value for second number.");
                    Err("Please enter only whole numbers (integers) for the second number. Try again, you old maverick!".to_string())
                }
            }
        })?;

        tracing::info!("User successfully validated input numbers.");
        Ok(())
    }

    /// Returns `false` when the division could not be carried out.
    fn divide<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> Result<bool> {
        debug_assert!(self.divisor != 0, "divisor validated before division");
        tracing::debug!("Starting division: {} / {}", self.dividend, self.divisor);

        match floor_div(self.dividend, self.divisor) {
            Ok(answer) => {
                tracing::info!(
                    "SUCCESS: {} / {} resulted in {}.",
                    self.dividend,
                    self.divisor,
                    answer
                );
                console.say(format!(
                    "\nThis old dinosaur calculator says that {} / {} = {}",
                    self.dividend, self.divisor, answer
                ))?;
                Ok(true)
            }
            Err(e) => {
                tracing::error!("Division failed after validation: {}", e);
                console.say(format!("\nFATAL ERROR: {}", e))?;
                Ok(false)
            }
        }
    }
}

impl Exercise for DivisionCalculator {
    fn chapter(&self) -> &'static str {
        "Chapter 5"
    }

    fn title(&self) -> &'static str {
        "Debugging"
    }

    fn run<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<()> {
        const FAREWELL: &str = "Ah fair enough, I guess I understand.\nSee you soon, I hope!";

        console.say(WELCOME)?;
        let wants_to_play = console.ask_yes_no_run_on(
            "Care to try out this dinosaur?\n> ",
            "A simple yes or no is required here, my friend.\n\nSo...",
        )?;
        if !wants_to_play {
            console.say(FAREWELL)?;
            return Ok(());
        }
        console.say("I knew you were a good soul!\n")?;

        loop {
            self.read_operands(console)?;

            if !self.divide(console)? {
                continue;
            }

            tracing::info!("Program will attempt next calculation.");
            console.say("\nNot bad for an ancient being!")?;
            let again = console.ask_yes_no_run_on(
                "Care for another calculation?\n> ",
                "Remember, a simple yes or no is required here, my good friend.\n\nSo...",
            )?;
            if !again {
                console.say(FAREWELL)?;
                return Ok(());
            }
            console.say("That's the spirit!\nHere we go again...")?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_div_rounds_down() {
        assert_eq!(floor_div(7, 2).unwrap(), 3);
        assert_eq!(floor_div(-7, 2).unwrap(), -4);
        assert_eq!(floor_div(7, -2).unwrap(), -4);
        assert_eq!(floor_div(-7, -2).unwrap(), 3);
        assert_eq!(floor_div(6, 3).unwrap(), 2);
    }

    #[test]
    fn test_floor_div_errors() {
        assert!(matches!(floor_div(1, 0), Err(JournalError::ValidationError { .. })));
        assert!(matches!(
            floor_div(i64::MIN, -1),
            Err(JournalError::OverflowError { .. })
        ));
    }
}
