use crate::config::cli::LocalStorage;
use crate::core::console::Console;
use crate::core::text::{center, quoted_list};
use crate::domain::ports::{ConfigProvider, Exercise, Storage};
use crate::utils::error::{JournalError, Result};
use std::fs;
use std::io::{BufRead, Cursor, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

pub const SOURCE_FOLDER: &str = "Critical_Data";
pub const BACKUP_FOLDER: &str = "Initial_Backup";
pub const FULL_COPY: &str = "CRITICAL_COPY_full";
pub const EXTRACTION_FOLDER: &str = "Extracted_Restore_FULL";
pub const LOG_FILE: &str = "security_log_L4.txt";

/// One folder visited by [`walk_tree`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderListing {
    pub folder: PathBuf,
    pub dirs: Vec<String>,
    pub files: Vec<String>,
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Top-down listing of every folder under `root`, children sorted by name.
pub fn walk_tree(root: &Path) -> Result<Vec<FolderListing>> {
    let mut listings = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_dir() {
            continue;
        }

        let mut listing = FolderListing {
            folder: entry.path().to_path_buf(),
            dirs: Vec::new(),
            files: Vec::new(),
        };
        for child in WalkDir::new(entry.path())
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let child = child?;
            let name = child.file_name().to_string_lossy().into_owned();
            if child.file_type().is_dir() {
                listing.dirs.push(name);
            } else {
                listing.files.push(name);
            }
        }
        listings.push(listing);
    }
    Ok(listings)
}

/// Recursively copies `source` to `destination`, which must not exist yet.
pub fn copy_tree(source: &Path, destination: &Path) -> Result<u64> {
    if destination.exists() {
        return Err(JournalError::IoError(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            format!("{} already exists", destination.display()),
        )));
    }

    let mut copied = 0;
    for entry in WalkDir::new(source).sort_by_file_name() {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|e| JournalError::validation(e.to_string()))?;
        let target = destination.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    tracing::debug!("copied {} files into {}", copied, destination.display());
    Ok(copied)
}

/// Zips `source` with entry names relative to its parent, directories included.
pub fn zip_tree(source: &Path) -> Result<Vec<u8>> {
    let root = source.parent().unwrap_or(source);
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

    for entry in WalkDir::new(source).sort_by_file_name() {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(root)
            .map_err(|e| JournalError::validation(e.to_string()))?;
        let name = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("/");

        if entry.file_type().is_dir() {
            zip.add_directory(name, SimpleFileOptions::default())?;
        } else {
            zip.start_file(name, SimpleFileOptions::default())?;
            zip.write_all(&fs::read(entry.path())?)?;
        }
    }

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

/// Chapter 11: directory setup, tree copies and full-tree zip backups.
#[derive(Debug, Clone)]
pub struct BackupUtility {
    storage: LocalStorage,
    folder: String,
    archive_name: String,
    cleanup: bool,
}

impl BackupUtility {
    pub fn new(base_dir: &str, folder: &str, archive_name: &str, cleanup: bool) -> Self {
        Self {
            storage: LocalStorage::new(base_dir.to_string()),
            folder: folder.to_string(),
            archive_name: archive_name.to_string(),
            cleanup,
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C, cleanup: bool) -> Self {
        Self::new(
            config.base_dir(),
            config.backup_folder(),
            config.archive_name(),
            cleanup,
        )
    }

    pub fn test_folder(&self) -> PathBuf {
        self.storage.resolve(&self.folder)
    }

    pub fn full_copy(&self) -> PathBuf {
        self.test_folder().join(BACKUP_FOLDER).join(FULL_COPY)
    }

    pub fn station_one<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> Result<()> {
        console.say(format!(
            "\n{}",
            center("Montressor Spaceport: Backup Utility", 60, '=')
        ))?;
        console.say("Initiating Directory Setup and Safe Copy...")?;

        let test_folder = self.test_folder();
        let source_folder = test_folder.join(SOURCE_FOLDER);
        let backup_folder = test_folder.join(BACKUP_FOLDER);
        fs::create_dir_all(&source_folder)?;
        fs::create_dir_all(&backup_folder)?;

        console.say(format!("\nDirectory setup complete in: {}", self.folder))?;
        console.say(format!("Source Folder: {}", SOURCE_FOLDER))?;
        console.say(format!("Backup Folder: {}", BACKUP_FOLDER))?;
        console.say("-".repeat(60))?;

        let log_file = format!("{}/{}/{}", self.folder, SOURCE_FOLDER, LOG_FILE);
        self.storage
            .write_file(&log_file, b"Unauthorized access attempt from Sector 7.")?;
        self.storage.write_file(
            &format!("{}/{}/config/settings.cfg", self.folder, SOURCE_FOLDER),
            b"Shields: 80%\nPower: Nominal",
        )?;
        console.say("Placeholder files created in Source folder.")?;
        console.say("-".repeat(60))?;

        fs::copy(
            self.storage.resolve(&log_file),
            backup_folder.join(LOG_FILE),
        )?;
        console.say(format!("Single file copied: {}", LOG_FILE))?;
        console.say("-".repeat(60))?;

        let full_copy = self.full_copy();
        copy_tree(&source_folder, &full_copy)?;
        tracing::info!("full copy written to {}", full_copy.display());
        console.say(format!("Full folder copied: {}", FULL_COPY))?;
        console.say("-".repeat(60))?;

        console.say("Inspecting the full backup folder contents:")?;
        for listing in walk_tree(&full_copy)? {
            console.say(format!(
                "\n--- Current Folder (Root): {}",
                file_name_of(&listing.folder)
            ))?;
            console.say(format!("    Sub-Folders (Dirs): {}", quoted_list(&listing.dirs)))?;
            console.say(format!("    Files: {}", quoted_list(&listing.files)))?;
        }

        console.say("\n--- STATION 1 COMPLETE ---")
    }

    pub fn station_two<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> Result<()> {
        console.say(format!(
            "\n{}",
            center("Montressor Spaceport: Full Tree Archiving", 60, '=')
        ))?;

        let full_copy = self.full_copy();
        if !full_copy.exists() {
            tracing::warn!("{} missing, skipping archive", full_copy.display());
            console.say(format!(
                "Error: Source folder {} not found. Did Station 1 run?",
                FULL_COPY
            ))?;
            return Ok(());
        }

        console.say(format!(
            "1. Creating FULL Tree ZIP Archive: {}",
            self.archive_name
        ))?;
        let archive = zip_tree(&full_copy)?;
        let archive_path = format!("{}/{}", self.folder, self.archive_name);
        tracing::debug!("writing archive ({} bytes) to {}", archive.len(), archive_path);
        self.storage.write_file(&archive_path, &archive)?;
        console.say(format!("Full contents of '{}' added to archive.", FULL_COPY))?;
        console.say("-".repeat(60))?;

        console.say("2. Demonstrating File Extraction:")?;
        let extraction_folder = self.test_folder().join(EXTRACTION_FOLDER);
        fs::create_dir_all(&extraction_folder)?;
        let data = self.storage.read_file(&archive_path)?;
        ZipArchive::new(Cursor::new(data))?.extract(&extraction_folder)?;
        console.say(format!("Archive contents extracted to: {}", EXTRACTION_FOLDER))?;

        console.say("\n--- STATION 2 COMPLETE ---")
    }

    /// Deletes the whole test folder. Only runs when asked for.
    pub fn clean_up<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> Result<()> {
        let test_folder = self.test_folder();
        if test_folder.exists() {
            fs::remove_dir_all(&test_folder)?;
            tracing::info!("removed {}", test_folder.display());
            console.say(format!("\nCleanup: removed {}.", self.folder))?;
        }
        Ok(())
    }
}

impl Exercise for BackupUtility {
    fn chapter(&self) -> &'static str {
        "Chapter 11"
    }

    fn title(&self) -> &'static str {
        "Organising Files"
    }

    fn announces_finish(&self) -> bool {
        true
    }

    fn run<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<()> {
        self.station_one(console)?;
        self.station_two(console)?;
        if self.cleanup {
            self.clean_up(console)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_tree(root: &Path) -> PathBuf {
        let source = root.join("source");
        fs::create_dir_all(source.join("config")).unwrap();
        fs::write(source.join("log.txt"), "log").unwrap();
        fs::write(source.join("config/settings.cfg"), "cfg").unwrap();
        source
    }

    #[test]
    fn test_copy_tree_refuses_existing_destination() {
        let temp_dir = TempDir::new().unwrap();
        let source = sample_tree(temp_dir.path());
        let destination = temp_dir.path().join("copy");

        assert_eq!(copy_tree(&source, &destination).unwrap(), 2);
        assert_eq!(fs::read_to_string(destination.join("config/settings.cfg")).unwrap(), "cfg");

        let err = copy_tree(&source, &destination).unwrap_err();
        assert!(matches!(err, JournalError::IoError(ref e) if e.kind() == std::io::ErrorKind::AlreadyExists));
    }

    #[test]
    fn test_walk_tree_is_top_down_and_sorted() {
        let temp_dir = TempDir::new().unwrap();
        let source = sample_tree(temp_dir.path());

        let listings = walk_tree(&source).unwrap();
        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0].folder, source);
        assert_eq!(listings[0].dirs, vec!["config".to_string()]);
        assert_eq!(listings[0].files, vec!["log.txt".to_string()]);
        assert_eq!(listings[1].files, vec!["settings.cfg".to_string()]);
    }

    #[test]
    fn test_zip_entries_are_relative_to_parent() {
        let temp_dir = TempDir::new().unwrap();
        let source = sample_tree(temp_dir.path());

        let data = zip_tree(&source).unwrap();
        let archive = ZipArchive::new(Cursor::new(data)).unwrap();
        let mut names: Vec<&str> = archive.file_names().collect();
        names.sort();
        assert_eq!(
            names,
            vec![
                "source/",
                "source/config/",
                "source/config/settings.cfg",
                "source/log.txt",
            ]
        );
    }
}
