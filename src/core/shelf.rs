use crate::domain::ports::Storage;
use crate::utils::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;

/// A tiny persistent key-value store kept as one pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct Shelf {
    file_name: String,
    entries: BTreeMap<String, serde_json::Value>,
}

impl Shelf {
    /// Loads `<name>.json` through `storage`, or starts empty when absent.
    pub fn open<S: Storage>(storage: &S, name: &str) -> Result<Self> {
        let file_name = format!("{}.json", name);
        let entries = if storage.exists(&file_name) {
            let data = storage.read_file(&file_name)?;
            serde_json::from_slice(&data)?
        } else {
            tracing::debug!("shelf {} not found, starting empty", file_name);
            BTreeMap::new()
        };

        Ok(Self { file_name, entries })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn set<T: Serialize>(&mut self, key: &str, value: &T) -> Result<()> {
        self.entries
            .insert(key.to_string(), serde_json::to_value(value)?);
        Ok(())
    }

    /// `Ok(None)` when the key is missing; an error when the stored value has another shape.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.entries.get(key) {
            Some(value) => Ok(Some(serde_json::from_value(value.clone())?)),
            None => Ok(None),
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<serde_json::Value> {
        self.entries.remove(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn save<S: Storage>(&self, storage: &S) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.entries)?;
        storage.write_file(&self.file_name, json.as_bytes())?;
        tracing::debug!("shelf {} saved with {} keys", self.file_name, self.entries.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::cli::LocalStorage;
    use tempfile::TempDir;

    #[test]
    fn test_shelf_round_trip_through_storage() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());

        let mut shelf = Shelf::open(&storage, "critical_data").unwrap();
        assert!(shelf.is_empty());
        shelf
            .set("critical_events", &vec!["Hull Scan", "Drone Activity"])
            .unwrap();
        shelf.set("last_update", &"2025-11-10").unwrap();
        shelf.save(&storage).unwrap();

        let reopened = Shelf::open(&storage, "critical_data").unwrap();
        let events: Vec<String> = reopened.get("critical_events").unwrap().unwrap();
        assert_eq!(events, vec!["Hull Scan", "Drone Activity"]);
        assert_eq!(reopened.keys().collect::<Vec<_>>(), vec!["critical_events", "last_update"]);
        assert!(reopened.get::<String>("missing").unwrap().is_none());
    }

    #[test]
    fn test_removed_key_stays_gone_after_save() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());

        let mut shelf = Shelf::open(&storage, "critical_data").unwrap();
        shelf.set("critical_events", &vec!["Hull Scan"]).unwrap();
        shelf.set("last_update", &"2025-11-10").unwrap();
        shelf.save(&storage).unwrap();

        let mut shelf = Shelf::open(&storage, "critical_data").unwrap();
        assert_eq!(shelf.remove("last_update"), Some(serde_json::json!("2025-11-10")));
        assert_eq!(shelf.remove("last_update"), None);
        shelf.save(&storage).unwrap();

        let reopened = Shelf::open(&storage, "critical_data").unwrap();
        assert_eq!(reopened.len(), 1);
        assert!(reopened.get::<String>("last_update").unwrap().is_none());
        let events: Vec<String> = reopened.get("critical_events").unwrap().unwrap();
        assert_eq!(events, vec!["Hull Scan"]);
    }

    #[test]
    fn test_wrong_shape_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());

        let mut shelf = Shelf::open(&storage, "data").unwrap();
        shelf.set("count", &3).unwrap();
        assert!(shelf.get::<Vec<String>>("count").is_err());
    }

    #[test]
    fn test_corrupt_shelf_file_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
        storage.write_file("broken.json", b"{not json").unwrap();

        assert!(Shelf::open(&storage, "broken").is_err());
    }
}
