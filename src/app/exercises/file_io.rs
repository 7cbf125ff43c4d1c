use crate::config::cli::LocalStorage;
use crate::config::toml_config::CRITICAL_EVENT_COUNT;
use crate::core::console::Console;
use crate::core::shelf::Shelf;
use crate::core::text::{center, quoted_list};
use crate::domain::ports::{ConfigProvider, Exercise, Storage};
use crate::utils::error::{JournalError, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::io::{BufRead, Write};
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

pub const CRITICAL_EVENTS: [&str; CRITICAL_EVENT_COUNT] = [
    "Unauthorized Hull Scan (Sector Beta)",
    "Suspicious Drone Activity (Cargo Bay 4)",
    "Life Support Fluctuation (Airlock 7)",
    "Unknown Signal Intercept (Deep Space Array)",
];

pub const SUMMARY_FILE: &str = "Critical_Logs_Summary.txt";
pub const CONFIRMATION: &str = "\n\n--- CONFIRMED by MS Security Officer (APPEND MODE) ---";

/// `MS-LOG-1092_2025.txt` through `MS-LOG-1097_2025.txt`.
pub fn placeholder_log_names() -> Vec<String> {
    (1092..=1097)
        .map(|number| format!("MS-LOG-{}_2025.txt", number))
        .collect()
}

/// Names of the `*.txt` files directly inside `dir`, sorted.
pub fn text_files_in(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry?;
        let is_txt = entry.path().extension().is_some_and(|ext| ext == "txt");
        if entry.file_type().is_file() && is_txt {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    Ok(names)
}

/// Settings the stations read from the journal configuration.
#[derive(Debug, Clone)]
pub struct FileIoSettings {
    pub base_dir: String,
    pub security_dir: String,
    pub shelf_name: String,
    pub sample_size: usize,
    pub last_update: Option<String>,
}

impl FileIoSettings {
    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self {
            base_dir: config.base_dir().to_string(),
            security_dir: config.security_dir().to_string(),
            shelf_name: config.shelf_name().to_string(),
            sample_size: config.sample_size(),
            last_update: config.last_update().map(str::to_string),
        }
    }
}

/// Chapter 10: path inspection, text files and the shelf.
pub struct FileIoStations<G: Rng> {
    settings: FileIoSettings,
    rng: G,
    work_dir: PathBuf,
}

impl FileIoStations<StdRng> {
    pub fn seeded(settings: FileIoSettings, seed: u64) -> Self {
        Self::new(settings, StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy(settings: FileIoSettings) -> Self {
        Self::new(settings, StdRng::from_entropy())
    }
}

impl<G: Rng> FileIoStations<G> {
    pub fn new(settings: FileIoSettings, rng: G) -> Self {
        let work_dir = PathBuf::from(&settings.base_dir);
        Self {
            settings,
            rng,
            work_dir,
        }
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    pub fn station_one<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<()> {
        console.say(format!(
            "\n{}",
            center("Montressor Spaceport: AdHoc Security Station", 60, '=')
        ))?;
        console.say("Attempting to navigate to Security Command Directory...")?;

        let security_dir = PathBuf::from(&self.settings.security_dir);
        if security_dir.is_dir() {
            self.work_dir = security_dir;
        } else {
            tracing::info!(
                "security directory {} not found, staying in {}",
                self.settings.security_dir,
                self.settings.base_dir
            );
            console.say("Note: Cannot change directory. Using the base directory instead.")?;
            self.work_dir = PathBuf::from(&self.settings.base_dir);
        }
        console.say(format!("Working directory:\n{}", self.work_dir.display()))?;
        console.say("-".repeat(60))?;

        let log_file = self.work_dir.join("MS-LOG-1092_2025.txt");
        let lossy = |value: Option<&std::ffi::OsStr>| {
            value
                .map(|v| v.to_string_lossy().into_owned())
                .unwrap_or_default()
        };
        let drive = log_file
            .components()
            .find_map(|c| match c {
                Component::Prefix(prefix) => Some(prefix.as_os_str().to_string_lossy().into_owned()),
                _ => None,
            })
            .unwrap_or_default();

        console.say(format!(
            "Inspecting Path Properties of a simulated file: {}",
            lossy(log_file.file_name())
        ))?;
        console.say(format!(
            "\n    Parent Directory = {}\n    File Name        = {}\n    File Stem (Base) = {}\n    File Suffix (Ext)= {}\n    Drive (if present) = {}\n",
            log_file.parent().map(|p| p.display().to_string()).unwrap_or_default(),
            lossy(log_file.file_name()),
            lossy(log_file.file_stem()),
            log_file
                .extension()
                .map(|ext| format!(".{}", ext.to_string_lossy()))
                .unwrap_or_default(),
            drive
        ))?;
        console.say("-".repeat(60))?;

        let parts: Vec<String> = log_file
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        console.say("Breaking file path down into parts for easier viewing:")?;
        console.say(quoted_list(&parts))?;
        console.say("\nDetailed Breakdown:")?;
        for (index, part) in parts.iter().enumerate() {
            console.say(format!("Part {}: {}", index, part))?;
        }

        let parents: Vec<String> = log_file
            .ancestors()
            .skip(1)
            .filter(|p| !p.as_os_str().is_empty())
            .map(|p| p.display().to_string())
            .collect();
        console.say(format!("\nParent Traversal:\n{}", quoted_list(&parents)))?;
        console.say("-".repeat(60))?;

        console.say(format!(
            "Checking for existence of the log file: {} -> {}",
            lossy(log_file.file_name()),
            log_file.exists()
        ))?;

        console.say("\nScanning directory for all *.txt files:")?;
        let found = text_files_in(&self.work_dir)?;
        if found.is_empty() {
            console.say("No *.txt files found to list.")?;
        } else {
            console.say(format!("Found {} files: {}", found.len(), quoted_list(&found)))?;
        }
        Ok(())
    }

    pub fn station_two<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<()> {
        console.say(format!(
            "\n{}",
            center("Montressor Spaceport: Log Analysis", 60, '=')
        ))?;

        let storage = LocalStorage::new(self.work_dir.to_string_lossy().into_owned());

        if self.settings.sample_size > CRITICAL_EVENTS.len() {
            return Err(JournalError::InvalidConfigValueError {
                field: "file_io.sample_size".to_string(),
                value: self.settings.sample_size.to_string(),
                reason: format!("Only {} critical events exist", CRITICAL_EVENTS.len()),
            });
        }
        console.say("Creating placeholder logs for security testing...")?;
        let placeholders = placeholder_log_names();
        for name in &placeholders {
            storage.write_file(name, b"Log body entry placeholder.")?;
        }
        console.say("Placeholder Logs created.")?;
        console.say("-".repeat(60))?;

        console.say("Sampling a random selection of critical events for immediate action...")?;
        let selected: Vec<&str> = CRITICAL_EVENTS
            .choose_multiple(&mut self.rng, self.settings.sample_size)
            .copied()
            .collect();
        console.say("Selected for Review:")?;
        for event in &selected {
            console.say(format!("- {}", event))?;
        }
        console.say("-".repeat(60))?;

        console.say(format!("Generating new summary file: {}", SUMMARY_FILE))?;
        storage.write_file(SUMMARY_FILE, CRITICAL_EVENTS.join("\n").as_bytes())?;
        console.say("NOTE: Writing the summary completely OVERWROTE the previous file content.")?;
        console.say("-".repeat(60))?;

        console.say("Verifying content of the new summary file:")?;
        let content = storage.read_file(SUMMARY_FILE)?;
        console.say(String::from_utf8_lossy(&content))?;
        console.say("-".repeat(60))?;

        console.say("Opening file in append mode to log confirmation signature.")?;
        storage.append_file(SUMMARY_FILE, CONFIRMATION.as_bytes())?;
        console.say("Confirmation appended.")?;
        console.say("-".repeat(60))?;

        console.say("Shelving the complete list of critical events for permanent storage...")?;
        let last_update = self
            .settings
            .last_update
            .clone()
            .unwrap_or_else(|| chrono::Local::now().format("%Y-%m-%d").to_string());
        let mut shelf = Shelf::open(&storage, &self.settings.shelf_name)?;
        shelf.set("critical_events", &CRITICAL_EVENTS)?;
        shelf.set("last_update", &last_update)?;
        shelf.save(&storage)?;
        tracing::info!("shelf {} updated ({})", shelf.file_name(), last_update);
        console.say(format!(
            "Critical event list saved to '{}'.",
            shelf.file_name()
        ))?;

        for name in &placeholders {
            if storage.exists(name) {
                storage.remove_file(name)?;
            }
        }
        tracing::debug!("removed {} placeholder logs", placeholders.len());
        Ok(())
    }
}

impl<G: Rng> Exercise for FileIoStations<G> {
    fn chapter(&self) -> &'static str {
        "Chapter 10"
    }

    fn title(&self) -> &'static str {
        "Reading and Writing Files"
    }

    fn announces_finish(&self) -> bool {
        true
    }

    fn run<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<()> {
        self.station_one(console)?;
        self.station_two(console)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_placeholder_names() {
        let names = placeholder_log_names();
        assert_eq!(names.len(), 6);
        assert_eq!(names[0], "MS-LOG-1092_2025.txt");
        assert_eq!(names[5], "MS-LOG-1097_2025.txt");
    }

    #[test]
    fn test_text_files_are_sorted_and_filtered() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("b.txt"), "b").unwrap();
        fs::write(temp_dir.path().join("a.txt"), "a").unwrap();
        fs::write(temp_dir.path().join("c.log"), "c").unwrap();
        fs::create_dir(temp_dir.path().join("nested.txt")).unwrap();

        let found = text_files_in(temp_dir.path()).unwrap();
        assert_eq!(found, vec!["a.txt".to_string(), "b.txt".to_string()]);
    }
}
