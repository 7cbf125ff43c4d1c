use crate::core::console::Console;
use crate::domain::ports::Exercise;
use crate::utils::error::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use std::io::{BufRead, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Rock,
    Paper,
    Scissors,
    Lizard,
    Spock,
}

impl Move {
    pub const ALL: [Move; 5] = [
        Move::Rock,
        Move::Paper,
        Move::Scissors,
        Move::Lizard,
        Move::Spock,
    ];

    /// Matches on the first letter; `k` is Spock so it does not clash with scissors.
    pub fn from_input(input: &str) -> Option<Move> {
        match input.chars().next()? {
            'r' => Some(Move::Rock),
            'p' => Some(Move::Paper),
            's' => Some(Move::Scissors),
            'l' => Some(Move::Lizard),
            'k' => Some(Move::Spock),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Move::Rock => "rock",
            Move::Paper => "paper",
            Move::Scissors => "scissors",
            Move::Lizard => "lizard",
            Move::Spock => "spock",
        }
    }

    pub fn beats(self, other: Move) -> bool {
        matches!(
            (self, other),
            (Move::Rock, Move::Scissors | Move::Lizard)
                | (Move::Paper, Move::Rock | Move::Spock)
                | (Move::Scissors, Move::Paper | Move::Lizard)
                | (Move::Lizard, Move::Spock | Move::Paper)
                | (Move::Spock, Move::Scissors | Move::Rock)
        )
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Loss,
    Tie,
}

pub fn judge(player: Move, computer: Move) -> Outcome {
    if player == computer {
        Outcome::Tie
    } else if player.beats(computer) {
        Outcome::Win
    } else {
        Outcome::Loss
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scoreboard {
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
}

impl Scoreboard {
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Loss => self.losses += 1,
            Outcome::Tie => self.ties += 1,
        }
    }
}

impl fmt::Display for Scoreboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "W: {}, L: {}, T: {}", self.wins, self.losses, self.ties)
    }
}

const RULES: &str = "
Now, for those who don't know the rules to this iconic game, they are as follows...

Scissors cuts Paper, Paper covers Rock, Rock crushes Lizard, Lizard poisons Spock,
Spock smashes Scissors, Scissors decapitates Lizard, Lizard eats Paper,
Paper disproves Spock, Spock vaporizes Rock, and as it always has, Rock crushes Scissors.

If that's a lot to take in, simply remember the order of ...

**Rock, Spock, Paper, Lizard, Scissors.** Each one beats the two before it and is beaten by the two after it.
";

/// Chapter 3: Rock, Paper, Scissors, Lizard, Spock against Sheldon.
pub struct RockPaperScissors<G: Rng> {
    rng: G,
    score: Scoreboard,
}

impl RockPaperScissors<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<G: Rng> RockPaperScissors<G> {
    pub fn new(rng: G) -> Self {
        Self {
            rng,
            score: Scoreboard::default(),
        }
    }

    pub fn score(&self) -> Scoreboard {
        self.score
    }

    pub fn computer_move(&mut self) -> Move {
        Move::ALL[self.rng.gen_range(0..Move::ALL.len())]
    }

    /// Returns `false` when the player backs out before the first round.
    fn pre_game<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<bool> {
        console.say("Welcome to the fan-favourite game Rock, Paper, Scissors, Lizard, Spock!")?;
        console.say("Here you will play against our resident champion of the game, Sheldon.")?;

        let brave = console.ask_yes_no(
            "\nDo you have what it takes to go toe to toe with this legend?\n> ",
            "\nWhat is required here is a simple, yet resolute, yes or no.",
        )?;
        if brave {
            console.say("\nThat's the spirit!")?;
        } else {
            console.say("\nThis is understandable, the (figuratively) towering figure of our resident Dr. has that effect on many.")?;
        }

        console.say(RULES)?;

        let still_brave = console.ask_yes_no(
            "Still think you can take on Captain Cooper?\n> ",
            "\nBe true to yourself and singular in mind. Answer either yes or no.",
        )?;
        if still_brave {
            console.say("\nExcellent! Let the battle commence!")?;
        } else {
            console.say("\nPerhaps another time. Farewell.")?;
        }
        Ok(still_brave)
    }

    /// `None` means the player quit.
    fn read_move<R: BufRead, W: Write>(
        &mut self,
        console: &mut Console<R, W>,
    ) -> Result<Option<Move>> {
        loop {
            console.say(
                "\nEnter your move: (r)ock (p)aper (s)cissors (l)izard (k)spock or (q)uit",
            )?;
            let answer = console.ask("> ")?.to_lowercase();

            if answer == "q" {
                return Ok(None);
            }
            match Move::from_input(&answer) {
                Some(player_move) => return Ok(Some(player_move)),
                None => console.say("Invalid move. Please choose r, p, s, l, k, or q.")?,
            }
        }
    }

    pub fn play_round<R: BufRead, W: Write>(
        &mut self,
        console: &mut Console<R, W>,
        player_move: Move,
    ) -> Result<Outcome> {
        let computer_move = self.computer_move();
        console.say(format!(
            "Sheldon chooses: {}!",
            computer_move.name().to_uppercase()
        ))?;

        let outcome = judge(player_move, computer_move);
        match outcome {
            Outcome::Tie => console.say("It is a TIE!")?,
            Outcome::Win => console.say("YOU WIN! Bazinga!")?,
            Outcome::Loss => console.say("You lose. Sheldon reigns supreme!")?,
        }
        self.score.record(outcome);
        tracing::debug!(player = %player_move, computer = %computer_move, ?outcome, "round played");
        Ok(outcome)
    }
}

impl<G: Rng> Exercise for RockPaperScissors<G> {
    fn chapter(&self) -> &'static str {
        "Chapter 3"
    }

    fn title(&self) -> &'static str {
        "Loops"
    }

    fn run<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<()> {
        if !self.pre_game(console)? {
            return Ok(());
        }

        loop {
            console.say("\n----------------------------------------")?;
            console.say(self.score.to_string())?;

            let Some(player_move) = self.read_move(console)? else {
                tracing::info!("Player left with score {}", self.score);
                return Ok(());
            };
            self.play_round(console, player_move)?;
        }
    }
}
