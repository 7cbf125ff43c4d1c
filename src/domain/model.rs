use crate::core::text::slice_bounds;
use crate::utils::error::{JournalError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Write;

pub const DEFAULT_RANK: &str = "unknown";
pub const DEFAULT_ROOM: &str = "transient_hammock";
pub const DEFAULT_SHIP: &str = "None";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guest {
    pub rank: Option<String>,
    pub credits_owed: i64,
    pub meals_consumed: u32,
    pub room_type: Option<String>,
    pub docked_ship: Option<String>,
}

impl Guest {
    pub fn new(rank: &str, credits_owed: i64, meals_consumed: u32) -> Self {
        Self {
            rank: Some(rank.to_string()),
            credits_owed,
            meals_consumed,
            room_type: None,
            docked_ship: None,
        }
    }

    pub fn with_room(mut self, room: &str) -> Self {
        self.room_type = Some(room.to_string());
        self
    }

    pub fn with_ship(mut self, ship: &str) -> Self {
        self.docked_ship = Some(ship.to_string());
        self
    }

    pub fn rank_or_default(&mut self) -> &str {
        self.rank.get_or_insert_with(|| DEFAULT_RANK.to_string())
    }

    /// Fills every optional field that is still missing; the defaults stick.
    pub fn fill_defaults(&mut self) {
        self.rank.get_or_insert_with(|| DEFAULT_RANK.to_string());
        self.room_type.get_or_insert_with(|| DEFAULT_ROOM.to_string());
        self.docked_ship.get_or_insert_with(|| DEFAULT_SHIP.to_string());
    }
}

/// Insertion-ordered guest files keyed by snake_case name.
#[derive(Debug, Clone, Default)]
pub struct GuestRegister {
    guests: Vec<(String, Guest)>,
}

impl GuestRegister {
    pub fn new() -> Self {
        Self::default()
    }

    /// The Starboard Tankard's guests at opening time.
    pub fn seeded() -> Self {
        let mut register = Self::new();
        let seed = [
            (
                "jim_hawkins",
                Guest::new("cabin boy", 175, 3)
                    .with_room("transient_hammock")
                    .with_ship("RLS Legacy"),
            ),
            (
                "captain_amelia",
                Guest::new("ship captain", 440, 3)
                    .with_room("captain_quarters")
                    .with_ship("RLS Legacy"),
            ),
            ("morph", Guest::new("companion pet", 0, 7).with_ship("RLS Legacy")),
            (
                "mr_arrow",
                Guest::new("first mate", 360, 3)
                    .with_room("standard_bunk")
                    .with_ship("RLS Legacy"),
            ),
            ("long_john_silver", Guest::new("cook", 295, 4).with_ship("RLS Legacy")),
            (
                "dr_delbert_doppler",
                Guest::new("astronomer", 720, 6).with_room("premium_bunk"),
            ),
            ("delilah", Guest::new("beast_of_burden", 0, 4).with_room("stables")),
        ];
        for (key, guest) in seed {
            register.guests.push((key.to_string(), guest));
        }
        register
    }

    pub fn len(&self) -> usize {
        self.guests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guests.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.guests.iter().any(|(k, _)| k == key)
    }

    pub fn get(&self, key: &str) -> Option<&Guest> {
        self.guests.iter().find(|(k, _)| k == key).map(|(_, g)| g)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Guest> {
        self.guests.iter_mut().find(|(k, _)| k == key).map(|(_, g)| g)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Guest)> {
        self.guests.iter().map(|(k, g)| (k.as_str(), g))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut Guest)> {
        self.guests.iter_mut().map(|(k, g)| (k.as_str(), g))
    }

    pub fn insert(&mut self, key: &str, guest: Guest) -> Result<()> {
        if self.contains(key) {
            return Err(JournalError::validation(format!(
                "guest '{}' is already registered",
                key
            )));
        }
        self.guests.push((key.to_string(), guest));
        Ok(())
    }

    fn require_mut(&mut self, key: &str) -> Result<&mut Guest> {
        self.get_mut(key)
            .ok_or_else(|| JournalError::validation(format!("no guest named '{}'", key)))
    }

    /// Payments may take the tab below zero; the tavern then owes the guest.
    pub fn record_payment(&mut self, key: &str, amount: i64) -> Result<&Guest> {
        if amount <= 0 {
            return Err(JournalError::validation("payment must be greater than zero"));
        }
        let guest = self.require_mut(key)?;
        guest.credits_owed = guest.credits_owed.checked_sub(amount).ok_or_else(|| {
            JournalError::OverflowError {
                message: format!("credits owed by '{}' out of range", key),
            }
        })?;
        Ok(guest)
    }

    pub fn record_service(&mut self, key: &str, cost: i64) -> Result<&Guest> {
        if cost <= 0 {
            return Err(JournalError::validation(
                "service cost must be greater than zero",
            ));
        }
        let guest = self.require_mut(key)?;
        guest.credits_owed = guest.credits_owed.checked_add(cost).ok_or_else(|| {
            JournalError::OverflowError {
                message: format!("credits owed by '{}' out of range", key),
            }
        })?;
        guest.meals_consumed += 1;
        Ok(guest)
    }

    pub fn export_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record([
            "name",
            "rank",
            "credits_owed",
            "meals_consumed",
            "room_type",
            "docked_ship",
        ])?;
        for (key, guest) in self.iter() {
            let credits = guest.credits_owed.to_string();
            let meals = guest.meals_consumed.to_string();
            csv_writer.write_record([
                key,
                guest.rank.as_deref().unwrap_or(""),
                credits.as_str(),
                meals.as_str(),
                guest.room_type.as_deref().unwrap_or(""),
                guest.docked_ship.as_deref().unwrap_or(""),
            ])?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

/// The Ripon home's cats; a cat's ID is its position in the list.
#[derive(Debug, Clone, Default)]
pub struct CatRoster {
    cats: Vec<String>,
    copies: BTreeMap<String, Vec<String>>,
}

impl CatRoster {
    pub fn new(cats: Vec<String>) -> Self {
        Self {
            cats,
            copies: BTreeMap::new(),
        }
    }

    pub fn seeded() -> Self {
        let names = [
            "Luna",
            "Crookshanks",
            "Dobby",
            "Minerva",
            "Neville",
            "Hagrid",
            "Ginny",
            "Sirius",
            "Bellatrix",
            "Lumos",
            "Draco",
            "Nox",
        ];
        Self::new(names.iter().map(|n| n.to_string()).collect())
    }

    pub fn cats(&self) -> &[String] {
        &self.cats
    }

    pub fn len(&self) -> usize {
        self.cats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cats.is_empty()
    }

    pub fn get(&self, id: usize) -> Option<&str> {
        self.cats.get(id).map(String::as_str)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.cats.iter().position(|c| c == name)
    }

    /// Bounds clamp; negative indices count from the end.
    pub fn slice(&self, start: i64, end: i64) -> &[String] {
        let (from, to) = slice_bounds(self.cats.len(), start, end);
        &self.cats[from..to]
    }

    pub fn remove(&mut self, id: usize) -> Result<String> {
        if id >= self.cats.len() {
            return Err(self.out_of_range(id));
        }
        Ok(self.cats.remove(id))
    }

    /// Returns the previous name.
    pub fn rename(&mut self, id: usize, new_name: &str) -> Result<String> {
        if id >= self.cats.len() {
            return Err(self.out_of_range(id));
        }
        Ok(std::mem::replace(&mut self.cats[id], new_name.to_string()))
    }

    pub fn save_copy(&mut self, name: &str) -> &[String] {
        self.copies.insert(name.to_string(), self.cats.clone());
        &self.copies[name]
    }

    pub fn copy(&self, name: &str) -> Option<&[String]> {
        self.copies.get(name).map(Vec::as_slice)
    }

    fn out_of_range(&self, id: usize) -> JournalError {
        JournalError::validation(format!("cat ID {} is outside 0..{}", id, self.cats.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_register_keeps_insertion_order() {
        let register = GuestRegister::seeded();
        let keys: Vec<&str> = register.iter().map(|(k, _)| k).collect();
        assert_eq!(keys.first(), Some(&"jim_hawkins"));
        assert_eq!(keys.last(), Some(&"delilah"));
        assert_eq!(register.len(), 7);
    }

    #[test]
    fn test_duplicate_guest_rejected() {
        let mut register = GuestRegister::seeded();
        let result = register.insert("morph", Guest::new("pet", 0, 0));
        assert!(result.is_err());
        assert_eq!(register.len(), 7);
    }

    #[test]
    fn test_payment_can_overshoot_into_credit() {
        let mut register = GuestRegister::seeded();
        let guest = register.record_payment("jim_hawkins", 200).unwrap();
        assert_eq!(guest.credits_owed, -25);
    }

    #[test]
    fn test_service_adds_cost_and_meal() {
        let mut register = GuestRegister::seeded();
        let guest = register.record_service("morph", 12).unwrap();
        assert_eq!(guest.credits_owed, 12);
        assert_eq!(guest.meals_consumed, 8);
    }

    #[test]
    fn test_non_positive_amounts_rejected() {
        let mut register = GuestRegister::seeded();
        assert!(register.record_payment("morph", 0).is_err());
        assert!(register.record_service("morph", -3).is_err());
        assert!(register.record_service("nobody", 5).is_err());
    }

    #[test]
    fn test_fill_defaults_only_touches_missing_fields() {
        let mut register = GuestRegister::seeded();
        let morph = register.get_mut("morph").unwrap();
        morph.fill_defaults();
        assert_eq!(morph.room_type.as_deref(), Some(DEFAULT_ROOM));
        assert_eq!(morph.docked_ship.as_deref(), Some("RLS Legacy"));

        let delilah = register.get_mut("delilah").unwrap();
        delilah.fill_defaults();
        assert_eq!(delilah.docked_ship.as_deref(), Some(DEFAULT_SHIP));
    }

    #[test]
    fn test_export_csv_has_header_and_rows() {
        let register = GuestRegister::seeded();
        let mut buffer = Vec::new();
        register.export_csv(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "name,rank,credits_owed,meals_consumed,room_type,docked_ship");
        assert_eq!(lines[1], "jim_hawkins,cabin boy,175,3,transient_hammock,RLS Legacy");
        assert_eq!(lines.len(), 8);
    }

    #[test]
    fn test_roster_slice_clamps_out_of_range_bounds() {
        let roster = CatRoster::seeded();
        assert_eq!(roster.slice(0, 2), &["Luna".to_string(), "Crookshanks".to_string()]);
        assert_eq!(roster.slice(10, 99).len(), 2);
        assert!(roster.slice(5, 2).is_empty());
        assert_eq!(roster.slice(-2, 12), &["Draco".to_string(), "Nox".to_string()]);
    }

    #[test]
    fn test_roster_remove_and_rename() {
        let mut roster = CatRoster::seeded();
        assert_eq!(roster.remove(0).unwrap(), "Luna");
        assert_eq!(roster.get(0), Some("Crookshanks"));
        assert_eq!(roster.rename(0, "Pip").unwrap(), "Crookshanks");
        assert_eq!(roster.position("Pip"), Some(0));
        assert!(roster.remove(40).is_err());
    }

    #[test]
    fn test_saved_copy_is_independent() {
        let mut roster = CatRoster::seeded();
        roster.save_copy("backup");
        roster.remove(0).unwrap();
        assert_eq!(roster.copy("backup").unwrap().len(), 12);
        assert_eq!(roster.len(), 11);
    }
}
