use crate::core::console::{parse_int, Console};
use crate::core::text::quoted_list;
use crate::domain::model::CatRoster;
use crate::domain::ports::Exercise;
use crate::utils::error::Result;
use std::io::{BufRead, Write};

const FAREWELL: &str = "Thank you for visiting, we hope to see you soon!";

const MAIN_MENU: &str = "
        Please input one of the following numbers.
        1 To see a list of the cats here.
        2 To search for a cat by ID.
        3 To search for a cat by name.
        4 To delete a cat from our records.
        5 To modify a cat from our records.
        6 To copy our records to a new file.
        7 To exit the application.
        > ";

/// Where a sub-menu sends the user next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Repeat,
    MainMenu,
    Exit,
}

/// Chapter 6: list indexing, slicing and CRUD behind nested menu loops.
#[derive(Debug)]
pub struct CatHaven {
    roster: CatRoster,
}

impl Default for CatHaven {
    fn default() -> Self {
        Self::new(CatRoster::seeded())
    }
}

impl CatHaven {
    pub fn new(roster: CatRoster) -> Self {
        Self { roster }
    }

    pub fn roster(&self) -> &CatRoster {
        &self.roster
    }

    fn valid_ids(&self) -> String {
        format!("Valid IDs are 0 to {}.", self.roster.len().saturating_sub(1))
    }

    /// The "again / main menu / exit" question closing every sub-flow.
    fn next_step<R: BufRead, W: Write>(
        console: &mut Console<R, W>,
        again: &str,
        complain: bool,
    ) -> Result<Flow> {
        let prompt = format!(
            "Enter\n1 to {}.\n2 to return to the main menu.\n3 to exit the application.\n> ",
            again
        );
        loop {
            match console.ask_trimmed(&prompt)?.as_str() {
                "1" => return Ok(Flow::Repeat),
                "2" => return Ok(Flow::MainMenu),
                "3" => return Ok(Flow::Exit),
                _ if complain => console.say("Invalid option. Please try again.")?,
                _ => {}
            }
        }
    }

    /// Parses an ID, logging the non-numeric case under `action`.
    fn parse_id(answer: &str, action: &str) -> Option<i64> {
        let id = parse_int(answer);
        if id.is_none() {
            tracing::warn!("User entered non-integer value for cat ID during {}.", action);
        }
        id
    }

    fn in_range(&self, id: i64) -> Option<usize> {
        usize::try_from(id).ok().filter(|id| *id < self.roster.len())
    }

    pub fn list_cats<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<Flow> {
        loop {
            let choice = console.ask(
                "Enter\n1 to list all cats here in our Ripon home.\n2 to view a select range of cats.\n3 to return to the main menu.\n4 to exit the application.\n> ",
            )?;

            match choice.as_str() {
                "1" => {
                    console.say("\n--- Full List of Cats in Ripon CatHaven ---")?;
                    for (id, cat) in self.roster.cats().iter().enumerate() {
                        console.say(format!("ID {}: {}", id, cat))?;
                    }
                    console.say("--------------------------------------------\n")?;
                }
                "2" => loop {
                    let first = console.ask("Enter the starting ID from which you want to search from.\n> ")?;
                    let last = console.ask("Enter the last ID from which you want to search up to.\n> ")?;

                    match (parse_int(&first), parse_int(&last)) {
                        (Some(start), Some(end)) => {
                            console.say("\n--- Selected Range of Cats ---")?;
                            console.say(quoted_list(self.roster.slice(start, end)))?;
                            console.say("------------------------------\n")?;
                            break;
                        }
                        _ => console.say(format!(
                            "Invalid ID entered. Please use only numbers, and ensure they are within the range 0 to {}.",
                            self.roster.len()
                        ))?,
                    }
                },
                "3" => return Ok(Flow::MainMenu),
                "4" => return Ok(Flow::Exit),
                _ => console.say("You must enter a number from the options to continue.")?,
            }
        }
    }

    pub fn search_by_id<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<Flow> {
        let last_id = self.roster.len().saturating_sub(1);
        let id = loop {
            let answer = console.ask("Enter the cat's ID number to pull up their information.\n> ")?;
            match parse_int(&answer) {
                Some(id) => match self.in_range(id) {
                    Some(index) => break index,
                    None => {
                        tracing::warn!("User entered ID {}, which is outside the valid range.", id);
                        console.say(format!(
                            "ID {} is not a valid index. Please try a number between 0 and {}.",
                            id, last_id
                        ))?;
                    }
                },
                None => {
                    tracing::warn!("User entered non-numeric value for cat ID.");
                    console.say("Please enter a number.")?;
                }
            }
        };

        if let Some(cat) = self.roster.get(id) {
            console.say(format!("Cat found at ID {}: {}", id, cat))?;
        }

        Self::next_step(console, "search another cat by ID number", false)
    }

    pub fn search_by_name<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<Flow> {
        let name = console.ask_trimmed("Please enter the cat name you would like to search.\n> ")?;

        match self.roster.position(&name) {
            Some(id) => {
                console.say(format!("\nWe do have a cat called {}.", name))?;
                console.say(format!("The little one's ID is {}.\n", id))?;
            }
            None => console.say(format!("I'm sorry, we don't have a cat named {} here.\n", name))?,
        }

        Self::next_step(console, "search another cat by name", true)
    }

    /// Shared shape of delete and modify: pick an ID, confirm, act.
    fn confirmed_edit<R, W, F>(
        &mut self,
        console: &mut Console<R, W>,
        action: &str,
        id_prompt: &str,
        describe: impl Fn(usize, &str) -> (String, String),
        mut apply: F,
    ) -> Result<()>
    where
        R: BufRead,
        W: Write,
        F: FnMut(&mut CatRoster, &mut Console<R, W>, usize, &str) -> Result<()>,
    {
        let id = loop {
            let answer = console.ask_trimmed(id_prompt)?;
            match Self::parse_id(&answer, action) {
                Some(id) => break id,
                None => console.say("Invalid input. Please enter a number for the ID.\n")?,
            }
        };

        let Some(index) = self.in_range(id) else {
            console.say(format!(
                "We do not have a cat with ID {}. {}\n",
                id,
                self.valid_ids()
            ))?;
            return Ok(());
        };

        let current = self.roster.get(index).unwrap_or_default().to_string();
        let (intro, question) = describe(index, &current);
        console.say(intro)?;

        loop {
            match console.ask_trimmed(&question)?.as_str() {
                "1" => return apply(&mut self.roster, console, index, &current),
                "2" => {
                    console.say(format!("{} aborted.\n", capitalize(action)))?;
                    return Ok(());
                }
                _ => console.say("You must enter 1 or 2 to continue.")?,
            }
        }
    }

    pub fn delete_cat<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<Flow> {
        self.confirmed_edit(
            console,
            "removal",
            "Please enter the ID of the cat you wish to remove from our list.\n> ",
            |id, name| {
                (
                    format!("\nThe cat with ID {} is {}.", id, name),
                    format!(
                        "Are you sure you want to remove {}?\nPress 1 to confirm or 2 to abort.\n> ",
                        name
                    ),
                )
            },
            |roster, console, id, name| {
                roster.remove(id)?;
                tracing::info!("Cat ID {} ({}) successfully removed.", id, name);
                console.say(format!(
                    "ID {} - {} has been successfully removed from our list.\n",
                    id, name
                ))
            },
        )?;

        Self::next_step(console, "remove another cat from the list", true)
    }

    pub fn modify_cat<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<Flow> {
        self.confirmed_edit(
            console,
            "modification",
            "Please enter the ID of the cat you wish to modify from our list.\n> ",
            |id, name| {
                (
                    format!("\nThe cat with ID {} is currently named {}.", id, name),
                    "Are you sure you want to modify this record?\nPress 1 to confirm or 2 to abort.\n> "
                        .to_string(),
                )
            },
            |roster, console, id, name| {
                let new_name = console.ask_trimmed("Please enter the new name for the cat.\n> ")?;
                roster.rename(id, &new_name)?;
                tracing::info!(
                    "Cat ID {} successfully changed from {} to {}.",
                    id,
                    name,
                    new_name
                );
                console.say(format!(
                    "\nID {} - has been successfully changed to {}.\n",
                    id, new_name
                ))
            },
        )?;

        Self::next_step(console, "modify another record from the list", true)
    }

    pub fn copy_roster<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<Flow> {
        let copy_name = console.ask_trimmed(
            "Please enter the file name for the copied version of our cat list, or leave blank to abort.\n> ",
        )?;

        if copy_name.is_empty() {
            console.say("List copy aborted.\n")?;
        } else {
            let copy = quoted_list(self.roster.save_copy(&copy_name));
            tracing::info!("Roster copied under '{}'.", copy_name);
            console.say(format!(
                "\nSUCCESS: A copy of the list has been created and saved under the name: \"{}\"",
                copy_name
            ))?;
            console.say(format!("The new list now contains: {}\n", copy))?;
        }

        Self::next_step(console, "make another copy", true)
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl Exercise for CatHaven {
    fn chapter(&self) -> &'static str {
        "Chapter 6"
    }

    fn title(&self) -> &'static str {
        "Lists"
    }

    fn run<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<()> {
        tracing::debug!("Start of program execution.");
        console.say(
            "\n    Welcome to CatHaven in Ripon.\n    Here we look after lots of little ones, all hoping to find their forever home with a special family.\n",
        )?;

        loop {
            let choice = console.ask_trimmed(MAIN_MENU)?;

            let flow = match choice.as_str() {
                "1" => self.list_cats(console)?,
                "2" => repeat_until_done(console, |c| self.search_by_id(c))?,
                "3" => repeat_until_done(console, |c| self.search_by_name(c))?,
                "4" => repeat_until_done(console, |c| self.delete_cat(c))?,
                "5" => repeat_until_done(console, |c| self.modify_cat(c))?,
                "6" => repeat_until_done(console, |c| self.copy_roster(c))?,
                "7" => Flow::Exit,
                _ => {
                    console.say("Invalid option. Please try again.")?;
                    Flow::MainMenu
                }
            };

            if flow == Flow::Exit {
                console.say(FAREWELL)?;
                return Ok(());
            }
        }
    }
}

/// Re-runs a sub-flow while it asks to repeat.
fn repeat_until_done<R, W, F>(console: &mut Console<R, W>, mut step: F) -> Result<Flow>
where
    R: BufRead,
    W: Write,
    F: FnMut(&mut Console<R, W>) -> Result<Flow>,
{
    loop {
        match step(console)? {
            Flow::Repeat => continue,
            other => return Ok(other),
        }
    }
}
