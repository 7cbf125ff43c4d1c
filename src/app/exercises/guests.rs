use crate::core::console::{parse_int, Console};
use crate::core::text::{display_name, snake_key, title_case};
use crate::domain::model::{Guest, GuestRegister, DEFAULT_RANK};
use crate::domain::ports::{Exercise, Storage};
use crate::utils::error::Result;
use std::io::{BufRead, Write};

const TAVERN: &str = "The Starboard Tankard";

const MENU: &str = "
Welcome to The Starboard Tankard guest register. Please choose an option.
1 List all guests.
2 Retrieve a guest file.
3 Register a new guest.
4 Record a payment.
5 Record a service or meal.
6 Check a guest's ship status.
7 Export the register to CSV.
8 Leave the register.
> ";

/// `"transient_hammock"` -> `"Transient Hammock"`.
fn pretty(value: &str) -> String {
    title_case(&value.replace('_', " "))
}

/// Chapter 7: nested records with defaulted optional fields.
pub struct GuestRegisterDesk<S: Storage> {
    register: GuestRegister,
    storage: S,
    export_file: String,
}

impl<S: Storage> GuestRegisterDesk<S> {
    pub fn new(register: GuestRegister, storage: S, export_file: &str) -> Self {
        Self {
            register,
            storage,
            export_file: export_file.to_string(),
        }
    }

    pub fn register(&self) -> &GuestRegister {
        &self.register
    }

    pub fn list_all_guests<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<()> {
        console.say(format!("\n--- Current Guests at {} ---", TAVERN))?;

        console.say("-".repeat(55))?;
        console.say(format!("| {:<20} | {:<30} |", "NAME", "RANK"))?;
        console.say("-".repeat(55))?;

        for (key, guest) in self.register.iter_mut() {
            let rank = pretty(guest.rank_or_default());
            console.say(format!("| {:<20} | {:<30} |", display_name(key), rank))?;
        }

        console.say("-".repeat(55))?;
        Ok(())
    }

    /// Prints one guest file, filling in any missing fields first.
    pub fn retrieve_guest_file<R: BufRead, W: Write>(
        &mut self,
        console: &mut Console<R, W>,
        key: &str,
    ) -> Result<()> {
        let Some(guest) = self.register.get_mut(key) else {
            console.say(format!(
                "\nError: Guest '{}' not found in {} system.",
                title_case(key),
                TAVERN
            ))?;
            return Ok(());
        };
        guest.fill_defaults();

        console.say(format!("\n--- {} Guest File ---", TAVERN))?;
        console.say(format!("Name: {}", display_name(key)))?;

        let text_field = |value: &Option<String>| pretty(value.as_deref().unwrap_or_default());
        console.say(format!("- Rank: {}", text_field(&guest.rank)))?;
        console.say(format!("- Credits Owed: {}", guest.credits_owed))?;
        console.say(format!("- Meals Consumed: {}", guest.meals_consumed))?;
        console.say(format!("- Room Type: {}", text_field(&guest.room_type)))?;
        console.say(format!("- Docked Ship: {}", text_field(&guest.docked_ship)))?;

        console.say("-".repeat(30))?;
        Ok(())
    }

    pub fn add_guest<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<()> {
        console.say(format!("\n--- Registering New Guest at {} ---", TAVERN))?;

        let name = console
            .ask_trimmed("Please enter the name of the new guest.\n> ")?
            .to_lowercase();
        if name.is_empty() {
            console.say("\nError: A guest cannot be registered without a name.")?;
            return Ok(());
        }

        let key = snake_key(&name);
        if self.register.contains(&key) {
            console.say(format!(
                "\nError: Guest '{}' already exists in the system.",
                title_case(&name)
            ))?;
            return Ok(());
        }

        let rank = console
            .ask_trimmed("Please enter the guest's rank (e.g., pilot, crew).\n> ")?
            .to_lowercase();
        let room = console
            .ask_trimmed("Please enter the room type (e.g., standard bunk).\n> ")?
            .to_lowercase();
        // Ship names keep their capitalisation.
        let ship = console.ask_trimmed("Please enter the ship name (e.g., Serenity).\n> ")?;

        let rank = if rank.is_empty() { DEFAULT_RANK.to_string() } else { rank };
        let room = if room.is_empty() { "transient hammock".to_string() } else { room };
        let ship = if ship.is_empty() { "none".to_string() } else { ship };

        let guest = Guest::new(&snake_key(&rank), 0, 0)
            .with_room(&snake_key(&room))
            .with_ship(&ship);
        self.register.insert(&key, guest)?;
        tracing::info!("Registered guest {}", key);

        console.say(format!(
            "\nSuccessfully added {} to {} system.",
            title_case(&name),
            TAVERN
        ))?;
        self.retrieve_guest_file(console, &key)
    }

    /// Asks for a guest by name; `None` (after telling the user) when unknown.
    fn ask_known_guest<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
        prompt: &str,
    ) -> Result<Option<String>> {
        let name = console.ask(prompt)?;
        let key = snake_key(&name);
        if self.register.contains(&key) {
            Ok(Some(key))
        } else {
            tracing::warn!("Lookup for unknown guest '{}'", key);
            console.say(format!(
                "Error: We do not have a '{}' on our system.",
                title_case(&name)
            ))?;
            Ok(None)
        }
    }

    fn ask_positive_amount<R: BufRead, W: Write>(
        console: &mut Console<R, W>,
        prompt: &str,
        not_positive: &str,
    ) -> Result<i64> {
        console.ask_until(prompt, |answer| match parse_int(answer) {
            Some(amount) if amount > 0 => Ok(amount),
            Some(_) => Err(not_positive.to_string()),
            None => Err("Please enter only a positive whole number (integer).".to_string()),
        })
    }

    pub fn record_payment<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<()> {
        console.say("\n--- Recording Guest Payment ---")?;
        let Some(key) =
            self.ask_known_guest(console, "Enter the name of the guest making a payment.\n> ")?
        else {
            return Ok(());
        };

        let amount = Self::ask_positive_amount(
            console,
            "Enter the amount paid (must be a positive whole number).\n> ",
            "Payment must be a positive number greater than zero.",
        )?;
        self.register.record_payment(&key, amount)?;
        tracing::info!("Payment of {} recorded for {}", amount, key);

        console.say(format!("\nTab updated successfully for {}.", display_name(&key)))?;
        self.retrieve_guest_file(console, &key)
    }

    pub fn record_service<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<()> {
        console.say("\n--- Recording New Service/Meal ---")?;
        let Some(key) = self.ask_known_guest(
            console,
            "Please input the name of the guest who has received a service.\n> ",
        )?
        else {
            return Ok(());
        };

        let cost = Self::ask_positive_amount(
            console,
            "Enter the cost of the service (must be a positive whole number).\n> ",
            "The service cost must be a positive number greater than zero.",
        )?;
        self.register.record_service(&key, cost)?;
        tracing::info!("Service costing {} recorded for {}", cost, key);

        console.say(format!(
            "\nTab and meal counter successfully updated for {}.",
            display_name(&key)
        ))?;
        self.retrieve_guest_file(console, &key)
    }

    pub fn check_ship_status<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<()> {
        console.say("\n--- Ship Status Inquiry ---")?;
        let Some(key) = self.ask_known_guest(
            console,
            "Please input the name of the guest whose ship status you want to check.\n> ",
        )?
        else {
            return Ok(());
        };

        let ship = self
            .register
            .get(&key)
            .and_then(|guest| guest.docked_ship.as_deref())
            .unwrap_or("No ship listed");

        console.say(format!("\nThe ship status for {} is:", display_name(&key)))?;
        console.say(format!("- Docked Ship: {}", ship))?;
        console.say("-".repeat(30))?;
        Ok(())
    }

    pub fn export<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<()> {
        let mut buffer = Vec::new();
        self.register.export_csv(&mut buffer)?;
        self.storage.write_file(&self.export_file, &buffer)?;

        tracing::info!("Exported {} guests to {}", self.register.len(), self.export_file);
        console.say(format!(
            "\nGuest register exported to {} ({} guests).",
            self.export_file,
            self.register.len()
        ))?;
        Ok(())
    }
}

impl<S: Storage> Exercise for GuestRegisterDesk<S> {
    fn chapter(&self) -> &'static str {
        "Chapter 7"
    }

    fn title(&self) -> &'static str {
        "Nested Dictionaries"
    }

    fn run<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<()> {
        loop {
            match console.ask_trimmed(MENU)?.as_str() {
                "1" => self.list_all_guests(console)?,
                "2" => {
                    let name = console.ask("Please enter the name of the guest.\n> ")?;
                    self.retrieve_guest_file(console, &snake_key(&name))?;
                }
                "3" => self.add_guest(console)?,
                "4" => self.record_payment(console)?,
                "5" => self.record_service(console)?,
                "6" => self.check_ship_status(console)?,
                "7" => self.export(console)?,
                "8" => {
                    console.say(format!("Fair winds from {}!", TAVERN))?;
                    return Ok(());
                }
                _ => console.say("Invalid option. Please try again.")?,
            }
        }
    }
}
