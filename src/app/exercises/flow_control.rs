use crate::core::console::{parse_int, Console};
use crate::domain::ports::Exercise;
use crate::utils::error::Result;
use std::io::{BufRead, Write};

pub const PASSWORD: &str = "mellon";
pub const FELLOWSHIP_COUNT: i64 = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateResponse {
    Welcome,
    Misheard,
    Enemy,
    Riddle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FellowshipVerdict {
    Friend,
    Close,
    Joke,
    Failed,
}

pub fn judge_password(answer: &str) -> GateResponse {
    match answer.to_lowercase().as_str() {
        PASSWORD => GateResponse::Welcome,
        "bellon" => GateResponse::Misheard,
        "join the dark lord and be spared his wroth" => GateResponse::Enemy,
        _ => GateResponse::Riddle,
    }
}

pub fn judge_fellowship(count: i64) -> FellowshipVerdict {
    if count == FELLOWSHIP_COUNT {
        FellowshipVerdict::Friend
    } else if 1 < count && count < FELLOWSHIP_COUNT {
        FellowshipVerdict::Close
    } else if count >= 100 {
        FellowshipVerdict::Joke
    } else {
        FellowshipVerdict::Failed
    }
}

/// Chapter 2: the two-part riddle at the gates of Moria.
#[derive(Debug, Default)]
pub struct GateRiddle;

impl Exercise for GateRiddle {
    fn chapter(&self) -> &'static str {
        "Chapter 2"
    }

    fn title(&self) -> &'static str {
        "If-Else and Flow Control"
    }

    fn run<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<()> {
        let password = console.ask("What say you at the gates of Moria?\n> ")?;

        match judge_password(&password) {
            GateResponse::Welcome => {
                console.say("Greetings, friend of Moria, you may enter our hallowed halls.")?;
            }
            GateResponse::Misheard => {
                console.say("I may have misheard you, try again Mr McKellen.")?;
            }
            GateResponse::Enemy => {
                console.say("You are no friend of ours, away with you!")?;
            }
            GateResponse::Riddle => {
                console.say(
                    "You know not the password. You must answer a different riddle to prove your friendship.",
                )?;
                let answer =
                    console.ask("How many set off from Rivendell as the Fellowship?\n> ")?;

                let Some(count) = parse_int(&answer) else {
                    console.say(
                        "I am searching for an exact number, try again. The gates remain shut.",
                    )?;
                    return Ok(());
                };

                let reply = match judge_fellowship(count) {
                    FellowshipVerdict::Friend => {
                        "You are indeed a friend or a well-informed spy. One more riddle you shall face."
                    }
                    FellowshipVerdict::Close => {
                        "That's close, but short. The fellowship must be stronger!"
                    }
                    FellowshipVerdict::Joke => {
                        "Wouldn't that be nice! Assuming you were joking, what was the real strength of the fellowship?"
                    }
                    FellowshipVerdict::Failed => {
                        "You have failed the test, there is no hope for you. Begone!"
                    }
                };
                console.say(reply)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_is_case_insensitive() {
        assert_eq!(judge_password("MeLLoN"), GateResponse::Welcome);
        assert_eq!(judge_password("bellon"), GateResponse::Misheard);
        assert_eq!(judge_password("speak friend"), GateResponse::Riddle);
    }

    #[test]
    fn test_fellowship_boundaries() {
        assert_eq!(judge_fellowship(9), FellowshipVerdict::Friend);
        assert_eq!(judge_fellowship(2), FellowshipVerdict::Close);
        assert_eq!(judge_fellowship(8), FellowshipVerdict::Close);
        assert_eq!(judge_fellowship(1), FellowshipVerdict::Failed);
        assert_eq!(judge_fellowship(10), FellowshipVerdict::Failed);
        assert_eq!(judge_fellowship(100), FellowshipVerdict::Joke);
        assert_eq!(judge_fellowship(-9), FellowshipVerdict::Failed);
    }
}
